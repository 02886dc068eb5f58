//! Startup: either a playable session or the disabled notice.

use super::host::HighScoreHost;
use super::logic::GameSession;
use super::types::SessionOptions;
use crate::skins::AssetProvider;

pub const DEFAULT_DISABLED_MESSAGE: &str = "The runner game has been disabled by your administrator.";

/// Static notice shown instead of the game on managed deployments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisabledNotice {
    pub message: String,
}

impl DisabledNotice {
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            DEFAULT_DISABLED_MESSAGE.to_string()
        } else {
            message
        };
        Self { message }
    }
}

pub enum Launch {
    Disabled(DisabledNotice),
    Game(Box<GameSession>),
}

impl Launch {
    pub fn is_disabled(&self) -> bool {
        matches!(self, Self::Disabled(_))
    }
}

/// Build the session, unless the deployment disables the game.
///
/// A disabled launch constructs nothing: no avatar, no frame loop, no input
/// queue.
pub fn launch(
    disabled: Option<&str>,
    options: SessionOptions,
    assets: &dyn AssetProvider,
    host: Box<dyn HighScoreHost>,
) -> Launch {
    if let Some(message) = disabled {
        tracing::info!("game disabled, showing notice");
        return Launch::Disabled(DisabledNotice::new(message));
    }
    Launch::Game(Box::new(GameSession::new(options, assets, host)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::host::NoHighScoreHost;
    use crate::session::types::GameState;
    use crate::skins::BuiltinAssets;

    #[test]
    fn test_disabled_launch_has_no_session() {
        let launched = launch(
            Some("Blocked by policy"),
            SessionOptions::default(),
            &BuiltinAssets,
            Box::new(NoHighScoreHost),
        );
        match launched {
            Launch::Disabled(notice) => assert_eq!(notice.message, "Blocked by policy"),
            Launch::Game(_) => panic!("expected the notice"),
        }
    }

    #[test]
    fn test_blank_notice_uses_default_text() {
        assert_eq!(DisabledNotice::new("  ").message, DEFAULT_DISABLED_MESSAGE);
    }

    #[test]
    fn test_enabled_launch_waits() {
        let launched = launch(
            None,
            SessionOptions::default(),
            &BuiltinAssets,
            Box::new(NoHighScoreHost),
        );
        assert!(!launched.is_disabled());
        if let Launch::Game(session) = launched {
            assert_eq!(session.state(), GameState::Waiting);
        }
    }
}
