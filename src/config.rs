use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

use crate::errors::Error;

/// Engine configuration. Everything has a sensible default, so a host
/// with no config file gets a playable 5x5 game on the built-in word
/// list.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct BingoConfig {
    pub words: WordsConfig,
    pub game: GameConfig,
    pub admins: AdminsConfig,
}

impl BingoConfig {
    /// Loads `bingobot.toml` from the working directory, merged with
    /// `BINGOBOT_*` environment overrides (`BINGOBOT_WORDS__URL` and
    /// friends). A missing file is fine; defaults apply.
    pub fn load() -> Result<Self, Error> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("bingobot").required(false))
            .add_source(config::Environment::with_prefix("BINGOBOT").separator("__"))
            .build()?;

        Ok(config.try_deserialize::<Self>()?)
    }
}

/// Where the candidate word list comes from.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct WordsConfig {
    url: Option<String>,
    timeout_secs: u64,
}

impl Default for WordsConfig {
    fn default() -> Self {
        Self {
            url: None,
            timeout_secs: 10,
        }
    }
}

impl WordsConfig {
    pub fn url(&self) -> Option<&str> {
        if self.url.is_none() {
            warn!("no word list url configured, the built-in list will be used");
        }

        self.url.as_deref()
    }

    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct GameConfig {
    side_size: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self { side_size: 5 }
    }
}

impl GameConfig {
    pub const fn side_size(&self) -> usize {
        self.side_size
    }
}

/// The privileged-actor allow-list gating the admin surface.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct AdminsConfig {
    users: Vec<String>,
}

impl AdminsConfig {
    pub fn is_admin(&self, user_id: &str) -> bool {
        self.users.iter().any(|user| user == user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_playable() {
        let config = BingoConfig::default();

        assert_eq!(config.game.side_size(), 5);
        assert_eq!(config.words.timeout(), Duration::from_secs(10));
        assert!(config.words.url().is_none());
        assert!(!config.admins.is_admin("anyone"));
    }
}
