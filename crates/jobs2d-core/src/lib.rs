//! jobs2d-core
//!
//! driver の具象型に応じて visitor のメソッドを選ぶ dispatch 機構。
//!
//! # モジュール構成
//! - **dispatch**: VariantId, DispatchRegistry, builder, プロセス全体の table, 閉じた DriverKind
//! - **driver**: Job2dDriver trait と組み込み variant（logger, animated, line adapter, composite）
//! - **visitor**: DriverVisitor trait と組み込み visitor（describe, count）
//! - **error**: DispatchError, RegistryError, BuildError

pub mod dispatch;
pub mod driver;
pub mod visitor;
pub mod error;

pub use self::dispatch::{
    DispatchRegistry, DispatchRegistryBuilder, DriverKind, VariantId, dispatch, driver_dispatcher,
};
pub use self::driver::{Job2dDriver, Point};
pub use self::error::{BoxError, BuildError, DispatchError, RegistryError};
pub use self::visitor::DriverVisitor;
