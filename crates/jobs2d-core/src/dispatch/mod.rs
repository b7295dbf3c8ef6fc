//! Dispatch - driver の具象型に応じて visitor のメソッドを選ぶ
//!
//! # 二層構造
//! - **開いた集合**: `DispatchRegistry` - VariantId -> entry の対応表。外部 crate が variant を追加できる
//! - **閉じた集合**: `DriverKind` - 組み込み variant の sum type。`match` で網羅性を保証
//!
//! プロセス全体の table は `driver_dispatcher()` で取得します。

pub mod variant;
pub mod registry;
pub mod builder;
pub mod kind;
pub mod global;

// 主要な型を再エクスポート
pub use self::variant::VariantId;
pub use self::registry::DispatchRegistry;
pub use self::builder::DispatchRegistryBuilder;
pub use self::kind::DriverKind;
pub use self::global::{builtin_builder, dispatch, driver_dispatcher, register_builtin};
