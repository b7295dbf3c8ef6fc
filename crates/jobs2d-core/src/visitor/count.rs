use std::collections::BTreeMap;

use super::DriverVisitor;
use crate::dispatch::{VariantId, dispatch};
use crate::driver::{AnimatedDriverDecorator, DriverComposite, LineDriverAdapter, LoggerDriver};
use crate::error::BoxError;

/// variant ごとの driver 数を数える（composite / decorator の中身も含む）
#[derive(Debug, Default)]
pub struct VariantCounter {
    counts: BTreeMap<String, usize>,
}

impl VariantCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counts(&self) -> &BTreeMap<String, usize> {
        &self.counts
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn into_counts(self) -> BTreeMap<String, usize> {
        self.counts
    }

    fn bump<D: 'static>(&mut self) {
        let name = VariantId::of::<D>().short_name();
        *self.counts.entry(name.to_string()).or_default() += 1;
    }
}

impl DriverVisitor for VariantCounter {
    fn visit_logger(&mut self, _driver: &LoggerDriver) -> Result<(), BoxError> {
        self.bump::<LoggerDriver>();
        Ok(())
    }

    fn visit_animated(&mut self, driver: &AnimatedDriverDecorator) -> Result<(), BoxError> {
        self.bump::<AnimatedDriverDecorator>();
        dispatch(self, driver.inner())?;
        Ok(())
    }

    fn visit_line_adapter(&mut self, _driver: &LineDriverAdapter) -> Result<(), BoxError> {
        self.bump::<LineDriverAdapter>();
        Ok(())
    }

    fn visit_composite(&mut self, driver: &DriverComposite) -> Result<(), BoxError> {
        self.bump::<DriverComposite>();
        for child in driver.iter() {
            dispatch(self, child)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{Job2dDriver, RecordingLineDrawer};

    #[test]
    fn counts_nested_variants() {
        let inner = DriverComposite::new()
            .with(LoggerDriver::new("a"))
            .with(LoggerDriver::new("b"));
        let root = DriverComposite::new()
            .with(inner)
            .with(AnimatedDriverDecorator::new(
                Box::new(LineDriverAdapter::new(RecordingLineDrawer::default())),
                4,
            ));

        let mut counter = VariantCounter::new();
        let root: &dyn Job2dDriver = &root;
        root.accept(&mut counter).unwrap();

        assert_eq!(counter.total(), 6);
        assert_eq!(counter.counts()["DriverComposite"], 2);
        assert_eq!(counter.counts()["LoggerDriver"], 2);
        assert_eq!(counter.counts()["AnimatedDriverDecorator"], 1);
        assert_eq!(counter.counts()["LineDriverAdapter"], 1);
    }

    #[test]
    fn visiting_twice_counts_twice() {
        let logger = LoggerDriver::new("log");
        let mut counter = VariantCounter::new();

        dispatch(&mut counter, &logger).unwrap();
        dispatch(&mut counter, &logger).unwrap();

        assert_eq!(counter.into_counts()["LoggerDriver"], 2);
    }
}
