//! DispatchRegistry - driver の具象型から visitor 呼び出しへの対応表
//!
//! # 学習ポイント
//! - HashMap での型消去された closure の管理
//! - Generic methods での登録と型安全性（key と narrowing を同じ `D` から作る）
//! - `?Sized` な visitor 型（`dyn DriverVisitor` など）を型パラメータに取る

use std::collections::HashMap;
use std::fmt;

use crate::dispatch::variant::{Variant, VariantId};
use crate::driver::Job2dDriver;
use crate::error::{BoxError, DispatchError, RegistryError};
use crate::visitor::DriverVisitor;

type Entry<V> = Box<dyn Fn(&mut V, &dyn Job2dDriver) -> Result<(), DispatchError> + Send + Sync>;

/// DispatchRegistry は VariantId -> entry の対応表
///
/// # 使用例
/// ```ignore
/// let mut registry = DispatchRegistry::<dyn DriverVisitor>::new();
/// registry.register::<LoggerDriver, _>(|v, d| v.visit_logger(d))?;
///
/// registry.dispatch(&mut visitor, &logger)?;
/// ```
///
/// # 設計
/// - 初期化時に構築（`&mut self`）
/// - 実行時は `&self` のみ。lock なしで複数スレッドから読める
pub struct DispatchRegistry<V: ?Sized = dyn DriverVisitor> {
    entries: HashMap<VariantId, Entry<V>>,
}

impl<V: ?Sized + 'static> DispatchRegistry<V> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// variant `D` の entry を登録
    ///
    /// 既に登録済みなら `RegistryError::AlreadyRegistered`。
    /// 上書きしたい場合は `replace()` を明示的に使うこと。
    pub fn register<D, F>(&mut self, visit: F) -> Result<(), RegistryError>
    where
        D: Job2dDriver,
        F: Fn(&mut V, &D) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        let variant = VariantId::of::<D>();
        if self.entries.contains_key(&variant) {
            return Err(RegistryError::AlreadyRegistered(variant));
        }
        self.entries.insert(variant, narrowing_entry(visit));
        tracing::debug!(variant = variant.short_name(), "registered dispatch entry");
        Ok(())
    }

    /// variant `D` の entry を登録（last-write-wins）
    ///
    /// 既存の entry を置き換えた場合は `true`。
    pub fn replace<D, F>(&mut self, visit: F) -> bool
    where
        D: Job2dDriver,
        F: Fn(&mut V, &D) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        let variant = VariantId::of::<D>();
        let replaced = self
            .entries
            .insert(variant, narrowing_entry(visit))
            .is_some();
        if replaced {
            tracing::warn!(variant = variant.short_name(), "replaced dispatch entry");
        } else {
            tracing::debug!(variant = variant.short_name(), "registered dispatch entry");
        }
        replaced
    }

    /// driver の具象型に対応する visitor メソッドを呼ぶ
    pub fn dispatch(&self, visitor: &mut V, driver: &dyn Job2dDriver) -> Result<(), DispatchError> {
        let variant = VariantId::of_driver(driver);
        let Some(entry) = self.entries.get(&variant) else {
            tracing::warn!(variant = %variant, "no dispatch entry for driver variant");
            return Err(DispatchError::UnregisteredVariant(variant));
        };
        tracing::trace!(variant = variant.short_name(), "dispatching");
        entry(visitor, driver)
    }

    pub fn contains<D: Job2dDriver>(&self) -> bool {
        self.entries.contains_key(&VariantId::of::<D>())
    }

    pub fn contains_variant(&self, variant: &VariantId) -> bool {
        self.entries.contains_key(variant)
    }

    /// 登録済みの variant（short name 順）
    pub fn registered_variants(&self) -> Vec<VariantId> {
        let mut variants: Vec<VariantId> = self.entries.keys().copied().collect();
        variants.sort_by(|a, b| a.short_name().cmp(b.short_name()).then(a.name().cmp(b.name())));
        variants
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V: ?Sized + 'static> Default for DispatchRegistry<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: ?Sized> fmt::Debug for DispatchRegistry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.entries.keys()).finish()
    }
}

/// `&dyn Job2dDriver` を `&D` に narrowing してから `visit` を呼ぶ entry を作る
fn narrowing_entry<V, D, F>(visit: F) -> Entry<V>
where
    V: ?Sized + 'static,
    D: Job2dDriver,
    F: Fn(&mut V, &D) -> Result<(), BoxError> + Send + Sync + 'static,
{
    Box::new(move |visitor: &mut V, driver: &dyn Job2dDriver| {
        match Variant::as_any(driver).downcast_ref::<D>() {
            Some(concrete) => visit(visitor, concrete).map_err(DispatchError::Visitor),
            None => Err(DispatchError::VariantMismatch {
                expected: VariantId::of::<D>(),
                found: VariantId::of_driver(driver),
            }),
        }
    })
}
