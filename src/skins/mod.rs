//! Skins: sprite tables, hitboxes and per-skin tuning.

pub mod assets;
pub mod catalog;
pub mod types;

pub use assets::{AssetProvider, BuiltinAssets, ClassicOnlyAssets};
pub use catalog::{builtin, CLASSIC, INVERTED, PRAIRIE};
pub use types::{
    AvatarSprite, BackgroundConfig, BackgroundElDef, CloudSprite, JumpOverride, LineDef,
    ObstacleTypeDef, OverlaySprites, SkinDefinition, SkinId, SpritePoint, YPlacement,
};
