//! プロセス全体で共有する dispatch table
//!
//! 初回アクセス時に一度だけ構築され、以後は読み取り専用です。

use std::sync::LazyLock;

use crate::dispatch::builder::DispatchRegistryBuilder;
use crate::dispatch::registry::DispatchRegistry;
use crate::driver::{AnimatedDriverDecorator, DriverComposite, Job2dDriver, LineDriverAdapter, LoggerDriver};
use crate::error::{BuildError, DispatchError, RegistryError};
use crate::visitor::DriverVisitor;

static DRIVER_DISPATCHER: LazyLock<Result<DispatchRegistry, BuildError>> =
    LazyLock::new(build_builtin);

/// 組み込みの 4 variant を登録
///
/// 組み込み variant の対応表はここだけに書く。
/// 独自 visitor 型の registry を作るときのひな形としても使えます。
pub fn register_builtin(registry: &mut DispatchRegistry<dyn DriverVisitor>) -> Result<(), RegistryError> {
    registry.register::<LoggerDriver, _>(|v, d| v.visit_logger(d))?;
    registry.register::<AnimatedDriverDecorator, _>(|v, d| v.visit_animated(d))?;
    registry.register::<LineDriverAdapter, _>(|v, d| v.visit_line_adapter(d))?;
    registry.register::<DriverComposite, _>(|v, d| v.visit_composite(d))?;
    Ok(())
}

/// 組み込み variant を登録済みの builder
pub fn builtin_builder() -> Result<DispatchRegistryBuilder, RegistryError> {
    let mut registry = DispatchRegistry::<dyn DriverVisitor>::new();
    register_builtin(&mut registry)?;
    Ok(DispatchRegistryBuilder::from_registry(registry))
}

/// プロセス全体の table を構築（全ての組み込み variant が揃っていることを検証）
fn build_builtin() -> Result<DispatchRegistry, BuildError> {
    let registry = builtin_builder()?
        .expect::<LoggerDriver>()
        .expect::<AnimatedDriverDecorator>()
        .expect::<LineDriverAdapter>()
        .expect::<DriverComposite>()
        .build()?;
    Ok(registry)
}

/// プロセス全体の dispatch table
///
/// 構築に失敗していた場合は部分的な table を返さず、毎回
/// `DispatchError::BuiltinUnavailable` で失敗する。
pub fn driver_dispatcher() -> Result<&'static DispatchRegistry, DispatchError> {
    match &*DRIVER_DISPATCHER {
        Ok(registry) => Ok(registry),
        Err(err) => Err(DispatchError::BuiltinUnavailable(err)),
    }
}

/// `driver` の具象型に対応する `visitor` のメソッドを呼ぶ
pub fn dispatch(
    visitor: &mut (dyn DriverVisitor + 'static),
    driver: &dyn Job2dDriver,
) -> Result<(), DispatchError> {
    driver_dispatcher()?.dispatch(visitor, driver)
}

impl dyn Job2dDriver {
    /// `dispatch(visitor, self)` の糖衣
    pub fn accept(&self, visitor: &mut (dyn DriverVisitor + 'static)) -> Result<(), DispatchError> {
        dispatch(visitor, self)
    }
}
