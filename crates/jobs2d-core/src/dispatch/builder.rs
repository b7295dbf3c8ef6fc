//! DispatchRegistryBuilder - registry の構築と起動時検証
//!
//! # 学習ポイント
//! - Builder パターンの実装
//! - 起動時検証（Fail-fast 設計）
//! - 構築後は immutable な registry だけを渡す

use crate::dispatch::registry::DispatchRegistry;
use crate::dispatch::variant::VariantId;
use crate::driver::Job2dDriver;
use crate::error::{BoxError, BuildError, RegistryError};
use crate::visitor::DriverVisitor;

/// DispatchRegistryBuilder は DispatchRegistry を構築
///
/// # 使用例
/// ```ignore
/// let registry = DispatchRegistryBuilder::<dyn DriverVisitor>::new()
///     .register::<LoggerDriver, _>(|v, d| v.visit_logger(d))?
///     .expect::<LoggerDriver>()
///     .build()?;
/// ```
///
/// # Fail-fast 設計
/// - expect() で必須の variant を宣言
/// - build() 時に「期待集合 ⊆ 登録済み集合」をチェック
/// - 不足があれば BuildError を返す
pub struct DispatchRegistryBuilder<V: ?Sized + 'static = dyn DriverVisitor> {
    registry: DispatchRegistry<V>,
    expected: Vec<VariantId>,
}

impl<V: ?Sized + 'static> DispatchRegistryBuilder<V> {
    pub fn new() -> Self {
        Self {
            registry: DispatchRegistry::new(),
            expected: Vec::new(),
        }
    }

    /// 登録済みの registry から builder を作る
    pub fn from_registry(registry: DispatchRegistry<V>) -> Self {
        Self {
            registry,
            expected: Vec::new(),
        }
    }

    pub fn register<D, F>(mut self, visit: F) -> Result<Self, RegistryError>
    where
        D: Job2dDriver,
        F: Fn(&mut V, &D) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.registry.register::<D, F>(visit)?;
        Ok(self)
    }

    /// last-write-wins で登録
    pub fn replace<D, F>(mut self, visit: F) -> Self
    where
        D: Job2dDriver,
        F: Fn(&mut V, &D) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.registry.replace::<D, F>(visit);
        self
    }

    pub fn expect<D: Job2dDriver>(self) -> Self {
        self.expect_variant(VariantId::of::<D>())
    }

    pub fn expect_variant(mut self, variant: VariantId) -> Self {
        if !self.expected.contains(&variant) {
            self.expected.push(variant);
        }
        self
    }

    /// 検証して immutable な registry を返す
    pub fn build(self) -> Result<DispatchRegistry<V>, BuildError> {
        let missing: Vec<VariantId> = self
            .expected
            .iter()
            .filter(|variant| !self.registry.contains_variant(variant))
            .copied()
            .collect();
        if !missing.is_empty() {
            return Err(BuildError::MissingVariants(missing));
        }
        tracing::debug!(variants = self.registry.len(), "dispatch registry built");
        Ok(self.registry)
    }
}

impl<V: ?Sized + 'static> Default for DispatchRegistryBuilder<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{AnimatedDriverDecorator, DriverComposite, LoggerDriver};
    use crate::error::DispatchError;
    use crate::visitor::VariantCounter;

    #[test]
    fn test_build_success() {
        let registry = DispatchRegistryBuilder::<dyn DriverVisitor>::new()
            .register::<LoggerDriver, _>(|v, d| v.visit_logger(d))
            .unwrap()
            .expect::<LoggerDriver>()
            .build();
        assert!(registry.is_ok());
    }

    #[test]
    fn test_build_missing_variants() {
        let registry = DispatchRegistryBuilder::<dyn DriverVisitor>::new()
            .register::<LoggerDriver, _>(|v, d| v.visit_logger(d))
            .unwrap()
            .expect::<LoggerDriver>()
            .expect::<DriverComposite>()
            .expect::<DriverComposite>()
            .build();
        assert!(matches!(
            registry,
            Err(BuildError::MissingVariants(missing)) if missing == vec![VariantId::of::<DriverComposite>()]
        ));
    }

    #[test]
    fn test_build_no_expectations() {
        let registry = DispatchRegistryBuilder::<dyn DriverVisitor>::new()
            .register::<AnimatedDriverDecorator, _>(|v, d| v.visit_animated(d))
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_register_rejects_duplicates() {
        let result = DispatchRegistryBuilder::<dyn DriverVisitor>::new()
            .register::<LoggerDriver, _>(|v, d| v.visit_logger(d))
            .unwrap()
            .register::<LoggerDriver, _>(|v, d| v.visit_logger(d));
        assert!(matches!(result, Err(RegistryError::AlreadyRegistered(_))));
    }

    #[test]
    fn test_replace_overrides_registered_entry() {
        let registry = DispatchRegistryBuilder::<dyn DriverVisitor>::new()
            .register::<LoggerDriver, _>(|v, d| v.visit_logger(d))
            .unwrap()
            .replace::<LoggerDriver, _>(|_, d| Err(format!("replaced {}", d.name()).into()))
            .expect::<LoggerDriver>()
            .build()
            .unwrap();
        assert_eq!(registry.len(), 1);

        let mut counter = VariantCounter::new();
        let err = registry
            .dispatch(&mut counter, &LoggerDriver::new("log"))
            .unwrap_err();

        assert!(matches!(err, DispatchError::Visitor(_)));
        assert_eq!(err.to_string(), "replaced log");
        assert_eq!(counter.total(), 0);
    }

    #[test]
    fn test_from_registry_keeps_entries() {
        let mut registry = DispatchRegistry::<dyn DriverVisitor>::new();
        registry
            .register::<LoggerDriver, _>(|v, d| v.visit_logger(d))
            .unwrap();

        let built = DispatchRegistryBuilder::from_registry(registry)
            .expect::<LoggerDriver>()
            .build()
            .unwrap();
        assert!(built.contains::<LoggerDriver>());
    }
}
