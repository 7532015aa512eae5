use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Command, Reply};

/// One entry in a game's append-only ledger. Every command attempt is
/// recorded whatever the outcome; the synthetic [`ActionKind::EndGame`]
/// marker delimits epochs for truncation at restart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub user_id: String,
    pub display_name: String,
    pub timestamp: DateTime<Utc>,
    pub action: ActionKind,
    pub error: Option<String>,
    pub result: Option<String>,
}

impl Activity {
    pub(super) fn record(command: &Command, reply: &Reply) -> Self {
        Self {
            user_id: command.user_id.clone(),
            display_name: command.display_name.clone(),
            timestamp: Utc::now(),
            action: command.action.into(),
            error: reply.error.clone(),
            result: reply.result.clone(),
        }
    }

    pub(super) fn end_game(user_id: &str, display_name: &str) -> Self {
        Self {
            user_id: user_id.to_owned(),
            display_name: display_name.to_owned(),
            timestamp: Utc::now(),
            action: ActionKind::EndGame,
            error: None,
            result: None,
        }
    }
}

/// What a ledger entry records. Mirrors [`super::Action`] plus the
/// `EndGame` marker, which no player can issue directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    Join,
    Start,
    Next,
    Bingo,
    Leave,
    Format,
    Card,
    EndGame,
}

impl From<super::Action> for ActionKind {
    fn from(action: super::Action) -> Self {
        match action {
            super::Action::Join => Self::Join,
            super::Action::Start => Self::Start,
            super::Action::Next => Self::Next,
            super::Action::Bingo => Self::Bingo,
            super::Action::Leave => Self::Leave,
            super::Action::Format => Self::Format,
            super::Action::Card => Self::Card,
        }
    }
}
