//! VariantId - driver の具象型を識別するキー
//!
//! # 学習ポイント
//! - `TypeId` による型の同一性判定
//! - Blanket impl で `as_any()` を全ての型に提供する（sealed, crate 内専用）
//! - trait object から具象型への narrowing（`downcast_ref`）

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::driver::Job2dDriver;

/// VariantId は driver の具象型を表す
///
/// 比較と hash は `TypeId` のみで行い、`name` は診断用です。
#[derive(Clone, Copy)]
pub struct VariantId {
    type_id: TypeId,
    name: &'static str,
}

impl VariantId {
    pub fn of<T: Any>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// 値の具象型から VariantId を取得
    ///
    /// 引数は `&dyn Job2dDriver` なので、`&Box<dyn Job2dDriver>` も deref されて
    /// 中身の具象型が返る。
    ///
    /// 補助 trait は公開していないので、Box 自体の識別子を取ることはできない:
    /// ```compile_fail
    /// use jobs2d_core::dispatch::variant::Variant;
    /// ```
    pub fn of_driver(driver: &dyn Job2dDriver) -> Self {
        Variant::variant_id(driver)
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// 完全修飾の型名（例: `jobs2d_core::driver::logger::LoggerDriver`）
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// モジュールパスを除いた型名（例: `LoggerDriver`）
    pub fn short_name(&self) -> &'static str {
        let base_end = self.name.find('<').unwrap_or(self.name.len());
        let start = self.name[..base_end].rfind("::").map_or(0, |i| i + 2);
        &self.name[start..]
    }
}

impl PartialEq for VariantId {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for VariantId {}

impl Hash for VariantId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for VariantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VariantId({})", self.name)
    }
}

impl fmt::Display for VariantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

pub(crate) use self::sealed::Variant;

mod sealed {
    use std::any::Any;

    use super::VariantId;

    /// Variant は trait object から具象型を取り出すための補助 trait
    ///
    /// 全ての `Any + Send + Sync` 型に blanket impl されるので、
    /// driver 側で実装する必要はありません。`Box<dyn Job2dDriver>` にも
    /// 適用されてしまうため crate 外には公開せず、識別子は
    /// `VariantId::of_driver` からだけ取得させます。
    #[doc(hidden)]
    pub trait Variant: Any + Send + Sync {
        fn as_any(&self) -> &dyn Any;
        fn variant_id(&self) -> VariantId;
    }

    impl<T: Any + Send + Sync> Variant for T {
        fn as_any(&self) -> &dyn Any {
            self
        }

        fn variant_id(&self) -> VariantId {
            VariantId::of::<T>()
        }
    }
}
