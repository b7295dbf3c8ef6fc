use thiserror::Error;

use crate::dispatch::VariantId;

/// visitor が返す任意のエラー
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// DispatchError は `dispatch()` の失敗
#[derive(Debug, Error)]
pub enum DispatchError {
    /// 登録されていない driver が渡された（プログラミングエラー）
    #[error("unregistered driver variant: {0}")]
    UnregisteredVariant(VariantId),

    /// entry の narrowing が key と一致しなかった
    #[error("dispatch entry for {expected} received {found}")]
    VariantMismatch { expected: VariantId, found: VariantId },

    /// プロセス全体の table の構築に失敗している
    #[error("built-in dispatch table is unavailable: {0}")]
    BuiltinUnavailable(&'static BuildError),

    /// visitor 自身のエラー（そのまま透過）
    #[error(transparent)]
    Visitor(BoxError),
}

impl DispatchError {
    /// 未登録の variant を探す
    ///
    /// composite を再帰的に辿る visitor は、子の `DispatchError` を
    /// `Visitor` に包んで返すので、source chain も辿ります。
    pub fn unregistered_variant(&self) -> Option<VariantId> {
        match self {
            Self::UnregisteredVariant(id) => Some(*id),
            Self::VariantMismatch { .. } | Self::BuiltinUnavailable(_) => None,
            Self::Visitor(err) => {
                let mut current: Option<&(dyn std::error::Error + 'static)> = Some(&**err);
                while let Some(e) = current {
                    if let Some(inner) = e.downcast_ref::<DispatchError>() {
                        return inner.unregistered_variant();
                    }
                    current = e.source();
                }
                None
            }
        }
    }

    /// visitor のエラーであれば取り出す
    pub fn into_visitor_error(self) -> Result<BoxError, Self> {
        match self {
            Self::Visitor(err) => Ok(err),
            other => Err(other),
        }
    }
}

/// RegistryError は登録時のエラー
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("dispatch entry for variant '{0}' is already registered")]
    AlreadyRegistered(VariantId),
}

/// BuildError は registry 構築時の検証エラー
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("missing driver variants: {0:?}. These variants were expected but not registered.")]
    MissingVariants(Vec<VariantId>),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}
