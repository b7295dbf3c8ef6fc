//! DescribeVisitor - driver ツリーを serde で出力できる形に変換

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

use super::DriverVisitor;
use crate::dispatch::{DispatchRegistry, VariantId, dispatch, driver_dispatcher};
use crate::driver::{
    AnimatedDriverDecorator, DriverComposite, Job2dDriver, LineDriverAdapter, LoggerDriver, Point,
};
use crate::error::{BoxError, DispatchError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DriverNode {
    pub variant: String,
    pub position: Point,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub details: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DriverNode>,
}

impl DriverNode {
    fn new<D: Job2dDriver>(driver: &D) -> Self {
        Self {
            variant: VariantId::of::<D>().short_name().to_string(),
            position: driver.position(),
            details: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    fn detail(mut self, key: &str, value: impl ToString) -> Self {
        self.details.insert(key.to_string(), value.to_string());
        self
    }

    fn write_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        write!(
            f,
            "{:indent$}{} @ ({}, {})",
            "",
            self.variant,
            self.position.x,
            self.position.y,
            indent = depth * 2
        )?;
        for (key, value) in &self.details {
            write!(f, " {key}={value}")?;
        }
        writeln!(f)?;
        for child in &self.children {
            child.write_indented(f, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for DriverNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}

/// 訪問した driver ごとに `DriverNode` を 1 つ作る
///
/// composite と decorator の子はプロセス全体の dispatcher 経由で辿る。
#[derive(Debug, Default)]
pub struct DescribeVisitor {
    nodes: Vec<DriverNode>,
}

impl DescribeVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(self) -> Vec<DriverNode> {
        self.nodes
    }

    fn describe_child(driver: &dyn Job2dDriver) -> Result<Vec<DriverNode>, DispatchError> {
        let mut child = DescribeVisitor::new();
        dispatch(&mut child, driver)?;
        Ok(child.finish())
    }
}

impl DriverVisitor for DescribeVisitor {
    fn visit_logger(&mut self, driver: &LoggerDriver) -> Result<(), BoxError> {
        let node = DriverNode::new(driver)
            .detail("name", driver.name())
            .detail("commands", driver.commands());
        self.nodes.push(node);
        Ok(())
    }

    fn visit_animated(&mut self, driver: &AnimatedDriverDecorator) -> Result<(), BoxError> {
        let mut node = DriverNode::new(driver).detail("steps", driver.steps());
        node.children = Self::describe_child(driver.inner())?;
        self.nodes.push(node);
        Ok(())
    }

    fn visit_line_adapter(&mut self, driver: &LineDriverAdapter) -> Result<(), BoxError> {
        let node = DriverNode::new(driver)
            .detail("drawer", driver.drawer().name())
            .detail("lines", driver.lines());
        self.nodes.push(node);
        Ok(())
    }

    fn visit_composite(&mut self, driver: &DriverComposite) -> Result<(), BoxError> {
        let mut node = DriverNode::new(driver);
        for child in driver.iter() {
            node.children.extend(Self::describe_child(child)?);
        }
        self.nodes.push(node);
        Ok(())
    }
}

/// dispatch は成功したが entry が visitor を呼ばなかった
#[derive(Debug, Error)]
#[error("no description was produced for driver variant {0}")]
pub struct EmptyDescription(pub VariantId);

/// driver 1 つ分の `DriverNode` を作る
pub fn describe(driver: &dyn Job2dDriver) -> Result<DriverNode, DispatchError> {
    describe_with(driver_dispatcher()?, driver)
}

/// 指定した registry で最上位の driver を dispatch する
///
/// 子の driver はプロセス全体の dispatcher で辿る。
pub fn describe_with(
    registry: &DispatchRegistry,
    driver: &dyn Job2dDriver,
) -> Result<DriverNode, DispatchError> {
    let mut visitor = DescribeVisitor::new();
    registry.dispatch(&mut visitor, driver)?;
    visitor
        .finish()
        .pop()
        .ok_or_else(|| DispatchError::Visitor(Box::new(EmptyDescription(VariantId::of_driver(driver)))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{RecordingLineDrawer, Segment};
    use serde_json::json;

    struct Unknown;

    impl Job2dDriver for Unknown {
        fn set_position(&mut self, _: Point) {}
        fn operate_to(&mut self, _: Point) {}
        fn position(&self) -> Point {
            Point::ORIGIN
        }
    }

    fn tree() -> DriverComposite {
        let mut composite = DriverComposite::new()
            .with(LoggerDriver::new("log"))
            .with(AnimatedDriverDecorator::new(
                Box::new(LineDriverAdapter::new(RecordingLineDrawer::default())),
                3,
            ));
        composite.operate_to(Point::new(3, 0));
        composite
    }

    #[test]
    fn test_describe_walks_nested_drivers() {
        let node = describe(&tree()).unwrap();

        assert_eq!(node.variant, "DriverComposite");
        assert_eq!(node.children.len(), 2);
        assert_eq!(node.children[0].details["commands"], "1");
        assert_eq!(node.children[1].variant, "AnimatedDriverDecorator");
        assert_eq!(node.children[1].children[0].details["lines"], "3");
    }

    #[test]
    fn test_describe_serializes_to_json() {
        let node = describe(&LoggerDriver::new("log")).unwrap();
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(
            value,
            json!({
                "variant": "LoggerDriver",
                "position": { "x": 0, "y": 0 },
                "details": { "commands": "0", "name": "log" },
            })
        );
    }

    #[test]
    fn test_describe_renders_indented_text() {
        let text = describe(&tree()).unwrap().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "DriverComposite @ (3, 0)");
        assert_eq!(lines[1], "  LoggerDriver @ (3, 0) commands=1 name=log");
        assert_eq!(lines[2], "  AnimatedDriverDecorator @ (3, 0) steps=3");
        assert_eq!(lines[3], "    LineDriverAdapter @ (3, 0) drawer=recording lines=3");
    }

    #[test]
    fn test_unregistered_child_is_reported() {
        let composite = DriverComposite::new()
            .with(LoggerDriver::new("log"))
            .with(Unknown);

        let err = describe(&composite).unwrap_err();

        assert!(matches!(err, DispatchError::Visitor(_)));
        assert_eq!(err.unregistered_variant(), Some(VariantId::of::<Unknown>()));
    }

    #[test]
    fn test_segments_are_untouched_by_visiting() {
        let recording = RecordingLineDrawer::default();
        let mut adapter = LineDriverAdapter::new(recording.clone());
        adapter.operate_to(Point::new(1, 1));

        describe(&adapter).unwrap();

        assert_eq!(recording.segments(), vec![Segment::new(Point::ORIGIN, Point::new(1, 1))]);
    }

    #[test]
    fn test_entry_that_skips_the_visitor_is_not_reported_as_unregistered() {
        let mut registry = DispatchRegistry::<dyn DriverVisitor>::new();
        registry
            .register::<LoggerDriver, _>(|_, _| Ok(()))
            .unwrap();

        let err = describe_with(&registry, &LoggerDriver::new("log")).unwrap_err();

        assert_eq!(err.unregistered_variant(), None);
        let inner = err.into_visitor_error().unwrap();
        let empty = inner.downcast_ref::<EmptyDescription>().unwrap();
        assert_eq!(empty.0, VariantId::of::<LoggerDriver>());
    }
}
