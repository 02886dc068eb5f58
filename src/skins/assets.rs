//! Asset provider seam.
//!
//! The session asks the provider for sprite tables. A provider that cannot
//! supply the alternate skin disables alt mode instead of failing.

use super::catalog;
use super::types::{SkinDefinition, SkinId};

pub trait AssetProvider {
    /// Sprite table for a skin, or `None` when its resources are missing.
    fn skin(&self, id: SkinId) -> Option<&'static SkinDefinition>;
}

/// Provider backed by the compiled-in tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinAssets;

impl AssetProvider for BuiltinAssets {
    fn skin(&self, id: SkinId) -> Option<&'static SkinDefinition> {
        Some(catalog::builtin(id))
    }
}

/// Provider that only ships the classic sheet.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassicOnlyAssets;

impl AssetProvider for ClassicOnlyAssets {
    fn skin(&self, id: SkinId) -> Option<&'static SkinDefinition> {
        match id {
            SkinId::Classic => Some(&catalog::CLASSIC),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_serves_every_skin() {
        for id in SkinId::ALL {
            assert!(BuiltinAssets.skin(id).is_some());
        }
    }

    #[test]
    fn test_classic_only_has_no_alt_skins() {
        assert!(ClassicOnlyAssets.skin(SkinId::Classic).is_some());
        assert!(ClassicOnlyAssets.skin(SkinId::Prairie).is_none());
    }

    #[test]
    fn test_skin_id_names_roundtrip() {
        for id in SkinId::ALL {
            assert_eq!(SkinId::from_name(id.name()), Some(id));
        }
        assert_eq!(SkinId::from_name(" Prairie "), Some(SkinId::Prairie));
        assert_eq!(SkinId::from_name("neon"), None);
    }
}
