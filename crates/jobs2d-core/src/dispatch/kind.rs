//! DriverKind - 組み込み variant の閉じた sum type
//!
//! 組み込み driver だけを扱う呼び出し側は、registry を経由せずに
//! `match` の網羅性チェックを使って dispatch できます。

use crate::dispatch::variant::Variant;
use crate::driver::{AnimatedDriverDecorator, DriverComposite, Job2dDriver, LineDriverAdapter, LoggerDriver};
use crate::error::BoxError;
use crate::visitor::DriverVisitor;

/// 組み込み driver への借用ビュー
#[derive(Clone, Copy)]
pub enum DriverKind<'a> {
    Logger(&'a LoggerDriver),
    Animated(&'a AnimatedDriverDecorator),
    LineAdapter(&'a LineDriverAdapter),
    Composite(&'a DriverComposite),
}

impl<'a> DriverKind<'a> {
    /// 組み込み variant でなければ `None`
    pub fn of(driver: &'a dyn Job2dDriver) -> Option<Self> {
        let any = Variant::as_any(driver);
        if let Some(d) = any.downcast_ref::<LoggerDriver>() {
            Some(Self::Logger(d))
        } else if let Some(d) = any.downcast_ref::<AnimatedDriverDecorator>() {
            Some(Self::Animated(d))
        } else if let Some(d) = any.downcast_ref::<LineDriverAdapter>() {
            Some(Self::LineAdapter(d))
        } else {
            any.downcast_ref::<DriverComposite>().map(Self::Composite)
        }
    }

    pub fn accept<V: DriverVisitor + ?Sized>(self, visitor: &mut V) -> Result<(), BoxError> {
        match self {
            Self::Logger(d) => visitor.visit_logger(d),
            Self::Animated(d) => visitor.visit_animated(d),
            Self::LineAdapter(d) => visitor.visit_line_adapter(d),
            Self::Composite(d) => visitor.visit_composite(d),
        }
    }

    pub fn as_driver(self) -> &'a dyn Job2dDriver {
        match self {
            Self::Logger(d) => d,
            Self::Animated(d) => d,
            Self::LineAdapter(d) => d,
            Self::Composite(d) => d,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{Point, RecordingLineDrawer};
    use rstest::rstest;

    #[derive(Default)]
    struct Names(Vec<&'static str>);

    impl DriverVisitor for Names {
        fn visit_logger(&mut self, _: &LoggerDriver) -> Result<(), BoxError> {
            self.0.push("logger");
            Ok(())
        }
        fn visit_animated(&mut self, _: &AnimatedDriverDecorator) -> Result<(), BoxError> {
            self.0.push("animated");
            Ok(())
        }
        fn visit_line_adapter(&mut self, _: &LineDriverAdapter) -> Result<(), BoxError> {
            self.0.push("line");
            Ok(())
        }
        fn visit_composite(&mut self, _: &DriverComposite) -> Result<(), BoxError> {
            self.0.push("composite");
            Ok(())
        }
    }

    fn logger() -> Box<dyn Job2dDriver> {
        Box::new(LoggerDriver::new("log"))
    }

    fn animated() -> Box<dyn Job2dDriver> {
        Box::new(AnimatedDriverDecorator::new(logger(), 2))
    }

    fn line() -> Box<dyn Job2dDriver> {
        Box::new(LineDriverAdapter::new(RecordingLineDrawer::default()))
    }

    fn composite() -> Box<dyn Job2dDriver> {
        Box::new(DriverComposite::new())
    }

    #[rstest]
    #[case::logger(logger(), "logger")]
    #[case::animated(animated(), "animated")]
    #[case::line(line(), "line")]
    #[case::composite(composite(), "composite")]
    fn accept_matches_the_registry(#[case] driver: Box<dyn Job2dDriver>, #[case] expected: &str) {
        let mut closed = Names::default();
        DriverKind::of(driver.as_ref()).unwrap().accept(&mut closed).unwrap();

        let mut open = Names::default();
        driver.accept(&mut open).unwrap();

        assert_eq!(closed.0, vec![expected]);
        assert_eq!(closed.0, open.0);
    }

    #[test]
    fn unknown_driver_has_no_kind() {
        struct Plotter;
        impl Job2dDriver for Plotter {
            fn set_position(&mut self, _: Point) {}
            fn operate_to(&mut self, _: Point) {}
            fn position(&self) -> Point {
                Point::ORIGIN
            }
        }

        assert!(DriverKind::of(&Plotter).is_none());
    }

    #[test]
    fn as_driver_returns_same_instance() {
        let driver = logger();
        let kind = DriverKind::of(driver.as_ref()).unwrap();
        assert!(std::ptr::addr_eq(kind.as_driver(), driver.as_ref()));
    }
}
