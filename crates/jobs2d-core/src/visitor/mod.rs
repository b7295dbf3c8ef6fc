//! Visitor - driver の variant ごとの処理
//!
//! # 学習ポイント
//! - Double dispatch: driver の具象型は `dispatch()` が解決し、処理は visitor が持つ
//! - Object-safe trait (`dyn DriverVisitor` を registry の型パラメータにする)

pub mod describe;
pub mod count;

use crate::driver::{AnimatedDriverDecorator, DriverComposite, LineDriverAdapter, LoggerDriver};
use crate::error::BoxError;

pub use self::describe::{DescribeVisitor, DriverNode, EmptyDescription, describe, describe_with};
pub use self::count::VariantCounter;

/// DriverVisitor は組み込み variant ごとに 1 メソッドを持つ
///
/// # 使用例
/// ```ignore
/// struct Names(Vec<&'static str>);
///
/// impl DriverVisitor for Names {
///     fn visit_logger(&mut self, _: &LoggerDriver) -> Result<(), BoxError> {
///         self.0.push("logger");
///         Ok(())
///     }
///     // ...
/// }
///
/// jobs2d_core::dispatch(&mut names, driver.as_ref())?;
/// ```
///
/// 返したエラーは `DispatchError::Visitor` にそのまま入って呼び出し元に届く。
pub trait DriverVisitor {
    fn visit_logger(&mut self, driver: &LoggerDriver) -> Result<(), BoxError>;
    fn visit_animated(&mut self, driver: &AnimatedDriverDecorator) -> Result<(), BoxError>;
    fn visit_line_adapter(&mut self, driver: &LineDriverAdapter) -> Result<(), BoxError>;
    fn visit_composite(&mut self, driver: &DriverComposite) -> Result<(), BoxError>;
}
