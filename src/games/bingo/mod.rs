//! The per-channel bingo session: roster, word set, turn cursor and
//! the command state machine driving them.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

mod activity;
pub use activity::{ActionKind, Activity};

pub mod core;
pub use self::core::Card;

pub mod table;
pub use table::{TableFormat, UnknownFormat};

mod words_list;
pub use words_list::WordsList;

mod store;
pub use store::{MemoryStore, SessionStore};

pub mod admin;

use crate::config::BingoConfig;

/// Flavor prefixes for called words, so `next` doesn't read like a
/// metronome.
const NEXT_WORD_PHRASES: [&str; 14] = [
    "The next word is",
    "And then we have",
    "Up next is",
    "Next is",
    "Your next word is",
    "Subsequently",
    "And now",
    "Next up",
    "And then",
    "Do I hear a BINGO for",
    "Anyone missing",
    "How about",
    "Try",
    "Let's try",
];

/// A per-channel game snapshot. The host owns storage and keys games by
/// channel id; the engine mutates the snapshot in place and assumes
/// single-writer access.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub channel_id: String,
    side_size: usize,
    word_set: Vec<String>,
    next_index: usize,
    started: Option<DateTime<Utc>>,
    players: Vec<Player>,
    activities: Vec<Activity>,
}

impl Game {
    pub fn new(channel_id: impl Into<String>, side_size: usize) -> Self {
        Self {
            channel_id: channel_id.into(),
            side_size,
            word_set: Vec::new(),
            next_index: 0,
            started: None,
            players: Vec::new(),
            activities: Vec::new(),
        }
    }

    pub fn in_progress(&self) -> bool {
        self.started.is_some()
    }

    pub fn started(&self) -> Option<DateTime<Utc>> {
        self.started
    }

    pub const fn side_size(&self) -> usize {
        self.side_size
    }

    pub fn word_set(&self) -> &[String] {
        &self.word_set
    }

    pub const fn next_index(&self) -> usize {
        self.next_index
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn player(&self, user_id: &str) -> Option<&Player> {
        self.players.iter().find(|player| player.user_id == user_id)
    }

    fn player_mut(&mut self, user_id: &str) -> Option<&mut Player> {
        self.players
            .iter_mut()
            .find(|player| player.user_id == user_id)
    }

    /// The words called so far this epoch.
    pub fn called_words(&self) -> &[String] {
        &self.word_set[..self.next_index]
    }

    fn end(&mut self, user_id: &str, display_name: &str) {
        self.started = None;
        self.activities
            .push(Activity::end_game(user_id, display_name));
    }

    /// Drops ledger entries up to and including the most recent
    /// `EndGame` marker, so each epoch starts with a fresh log.
    fn truncate_activities(&mut self) {
        if let Some(marker) = self
            .activities
            .iter()
            .rposition(|activity| activity.action == ActionKind::EndGame)
        {
            self.activities.drain(..=marker);
        }
    }
}

/// A roster entry, unique by user id. `card` stays empty until a card
/// is dealt, at start or when joining a game already in progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub user_id: String,
    pub display_name: String,
    #[serde(default)]
    pub format: TableFormat,
    pub card: Option<Card>,
}

impl Player {
    fn new(user_id: &str, display_name: &str) -> Self {
        Self {
            user_id: user_id.to_owned(),
            display_name: display_name.to_owned(),
            format: TableFormat::default(),
            card: None,
        }
    }
}

/// A player command, as parsed by the host from a chat message or
/// request.
#[derive(Debug, Clone)]
pub struct Command {
    pub user_id: String,
    pub display_name: String,
    pub action: Action,
    pub argument: Option<String>,
}

impl Command {
    pub fn new(
        user_id: impl Into<String>,
        display_name: impl Into<String>,
        action: Action,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            display_name: display_name.into(),
            action,
            argument: None,
        }
    }

    pub fn with_argument(mut self, argument: impl Into<String>) -> Self {
        self.argument = Some(argument.into());
        self
    }
}

/// The closed set of player actions. Unrecognized tags fail to parse
/// before any game state is touched, so they are never ledgered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Join,
    Start,
    Next,
    Bingo,
    Leave,
    Format,
    Card,
}

impl FromStr for Action {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "join" => Ok(Self::Join),
            "start" => Ok(Self::Start),
            "next" => Ok(Self::Next),
            "bingo" => Ok(Self::Bingo),
            "leave" => Ok(Self::Leave),
            "format" => Ok(Self::Format),
            "card" => Ok(Self::Card),
            other => Err(UnknownAction(other.to_owned())),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Join => "join",
            Self::Start => "start",
            Self::Next => "next",
            Self::Bingo => "bingo",
            Self::Leave => "leave",
            Self::Format => "format",
            Self::Card => "card",
        };

        write!(f, "{name}")
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("`{0}` is not a bingo command")]
pub struct UnknownAction(String);

/// What the host relays back: validation failures in `error` (best
/// sent privately to the caller), everything else in `result`. At most
/// one side is set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
    pub error: Option<String>,
    pub result: Option<String>,
}

impl Reply {
    fn err(text: impl Into<String>) -> Self {
        Self {
            error: Some(text.into()),
            result: None,
        }
    }

    fn ok(text: impl Into<String>) -> Self {
        Self {
            error: None,
            result: Some(text.into()),
        }
    }

    pub fn is_err(&self) -> bool {
        self.error.is_some()
    }

    /// Splits reply text into pieces no longer than `limit` characters,
    /// for transports with a message length cap.
    pub fn chunks(text: &str, limit: usize) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut buffer = String::new();
        let mut count = 0;

        for ch in text.chars() {
            if count == limit {
                chunks.push(std::mem::take(&mut buffer));
                count = 0;
            }

            buffer.push(ch);
            count += 1;
        }

        if !buffer.is_empty() {
            chunks.push(buffer);
        }

        chunks
    }
}

/// Executes commands against game snapshots. Holds the word-pool
/// provider and the configured grid size; everything per-game lives in
/// the [`Game`] the host passes in.
#[derive(Debug, Clone)]
pub struct Engine {
    words: WordsList,
    side_size: usize,
}

impl Engine {
    pub fn new(config: &BingoConfig) -> Self {
        Self {
            words: WordsList::new(&config.words),
            side_size: config.game.side_size(),
        }
    }

    /// A fresh snapshot for a channel no game exists for yet.
    pub fn new_game(&self, channel_id: impl Into<String>) -> Game {
        Game::new(channel_id, self.side_size)
    }

    /// Executes one command using an entropy-seeded random source.
    pub async fn execute(&self, game: &mut Game, command: &Command) -> Reply {
        let mut rng = StdRng::from_entropy();
        self.execute_with_rng(game, command, &mut rng).await
    }

    /// Executes one command with a caller-provided random source, for
    /// deterministic tests. Exactly one ledger entry is appended
    /// whatever the outcome.
    #[instrument(
        skip_all,
        fields(channel = %game.channel_id, user = %command.user_id, action = %command.action)
    )]
    pub async fn execute_with_rng<R>(
        &self,
        game: &mut Game,
        command: &Command,
        rng: &mut R,
    ) -> Reply
    where
        R: Rng + Send,
    {
        let reply = self.dispatch(game, command, rng).await;

        if let Some(ref error) = reply.error {
            info!(%error, "command rejected");
        }

        game.activities.push(Activity::record(command, &reply));

        reply
    }

    async fn dispatch<R>(&self, game: &mut Game, command: &Command, rng: &mut R) -> Reply
    where
        R: Rng + Send,
    {
        let argument = command.argument.as_deref();

        match command.action {
            Action::Join => join(game, command, argument, rng),
            Action::Start => self.start(game, command, argument, rng).await,
            Action::Next => next(game, command, rng),
            Action::Bingo => bingo(game, command),
            Action::Leave => leave(game, command),
            Action::Format => set_format(game, command, argument),
            Action::Card => card(game, command, argument),
        }
    }

    async fn start<R>(
        &self,
        game: &mut Game,
        command: &Command,
        argument: Option<&str>,
        rng: &mut R,
    ) -> Reply
    where
        R: Rng + Send,
    {
        if game.in_progress() {
            return Reply::err("The game is already in progress");
        }

        // solo starts are allowed: a caller who never joined is added
        // to the roster here
        let auto_joined = game.player(&command.user_id).is_none();
        if auto_joined {
            game.players
                .push(Player::new(&command.user_id, &command.display_name));
        }

        if let Some(argument) = argument {
            if let Ok(format) = argument.parse() {
                if let Some(player) = game.player_mut(&command.user_id) {
                    player.format = format;
                }
            }
        }

        let pool = self.words.fetch().await;

        let players = game.players.len();
        let multiplier = 1.6
            + if players > 100 {
                1.0
            } else {
                (players as f64).sqrt() / 10.0
            };
        let pool_size = ((game.side_size * game.side_size) as f64 * multiplier).ceil() as usize;

        game.word_set = core::shuffle(&pool, rng)
            .into_iter()
            .take(pool_size)
            .collect();

        let Some(first_word) = game.word_set.first().cloned() else {
            return Reply::err("No words are available to play with");
        };

        game.next_index = 1;
        game.started = Some(Utc::now());
        game.truncate_activities();

        for player in &mut game.players {
            player.card = Some(Card::deal(&game.word_set, game.side_size, rng));
        }

        info!(
            players,
            words = game.word_set.len(),
            "game started"
        );

        let welcome = if auto_joined {
            format!("Welcome to the game, {}!\r\n", command.display_name)
        } else {
            String::new()
        };

        Reply::ok(format!(
            "{welcome}The game has started. Check your DM channel for your card.\r\n\r\nThe first word is `{first_word}`"
        ))
    }
}

fn join(game: &mut Game, command: &Command, argument: Option<&str>, rng: &mut impl Rng) -> Reply {
    if game.player(&command.user_id).is_some() {
        return Reply::err(
            "You have already joined this game. Use `leave` if you'd like to leave the game",
        );
    }

    let mut player = Player::new(&command.user_id, &command.display_name);

    if let Some(argument) = argument {
        if let Ok(format) = argument.parse() {
            player.format = format;
        }
    }

    let mut text = format!("Welcome to the game, {}!", command.display_name);

    if game.in_progress() {
        // mid-game joiners are dealt into the running epoch right away
        player.card = Some(Card::deal(&game.word_set, game.side_size, rng));
        text.push_str("\r\n\r\n");
        text.push_str(&card_text(game, &player));
    }

    game.players.push(player);

    Reply::ok(text)
}

fn next(game: &mut Game, command: &Command, rng: &mut impl Rng) -> Reply {
    if game.player(&command.user_id).is_none() {
        return Reply::err("You are not a player in this game");
    }
    if !game.in_progress() {
        return Reply::err("The game has not yet started");
    }
    if game.next_index >= game.word_set.len() {
        return Reply::err("All words have been used");
    }

    let word = game.word_set[game.next_index].clone();
    game.next_index += 1;

    let phrase = NEXT_WORD_PHRASES
        .choose(rng)
        .expect("phrase list is not empty");

    Reply::ok(format!("{phrase} `{word}`"))
}

fn bingo(game: &mut Game, command: &Command) -> Reply {
    let Some(player) = game.player(&command.user_id) else {
        return Reply::err("You are not a player in this game");
    };
    if !game.in_progress() {
        return Reply::err("The game has not yet started");
    }
    let Some(card) = player.card.as_ref() else {
        return Reply::err("You do not have a current card");
    };

    if !core::has_bingo(game.called_words(), card) {
        let consolation = format!(
            "Nice try, but not yet. You need all words in a column, row, or one of the two full diagonals. Keep going.\r\n\r\n{}",
            card_text(game, player)
        );

        return Reply::err(consolation);
    }

    game.end(&command.user_id, &command.display_name);

    Reply::ok(format!(
        "{} HAS A BINGO!!!\r\n\r\nThe game is over, but can be restarted with the current players with just a `start`",
        command.display_name
    ))
}

fn leave(game: &mut Game, command: &Command) -> Reply {
    let Some(index) = game
        .players
        .iter()
        .position(|player| player.user_id == command.user_id)
    else {
        return Reply::err("You are not a player in this game");
    };

    game.players.remove(index);

    if game.players.is_empty() {
        game.end(&command.user_id, &command.display_name);

        return Reply::ok(format!(
            "{} has left the game, and the game has ended",
            command.display_name
        ));
    }

    Reply::ok(format!("{} has left the game", command.display_name))
}

fn set_format(game: &mut Game, command: &Command, argument: Option<&str>) -> Reply {
    let Some(player) = game.player_mut(&command.user_id) else {
        return Reply::err("You are not a player in this game");
    };

    let Some(Ok(format)) = argument.map(str::parse::<TableFormat>) else {
        return Reply::ok(format!(
            "Your current format is `{}`. Valid formats are `{}`",
            player.format,
            TableFormat::CHOICES.join("`, `"),
        ));
    };

    player.format = format;

    let mut text = format!("Your format has been set to `{format}`");

    // mid-game, show the card again so the change is visible right away
    if game.in_progress() {
        if let Some(player) = game.player(&command.user_id) {
            if player.card.is_some() {
                text.push_str("\r\n\r\n");
                text.push_str(&card_text(game, player));
            }
        }
    }

    Reply::ok(text)
}

fn card(game: &Game, command: &Command, argument: Option<&str>) -> Reply {
    let Some(player) = game.player(&command.user_id) else {
        return Reply::err("You are not a player in this game");
    };
    if player.card.is_none() {
        return Reply::err("You do not have a current card");
    }
    if !game.in_progress() {
        return Reply::err("The game has not yet started");
    }

    let format = argument.map_or(player.format, TableFormat::parse_lossy);

    Reply::ok(card_text_as(game, player, format))
}

/// Renders a player's card in their preferred format, called words
/// bolded, with the called-word list underneath. Hosts use this to DM
/// each player their card after `start`.
pub fn card_text(game: &Game, player: &Player) -> String {
    card_text_as(game, player, player.format)
}

fn card_text_as(game: &Game, player: &Player, format: TableFormat) -> String {
    let Some(card) = player.card.as_ref() else {
        return "You do not have a current card".to_owned();
    };

    let called = game.called_words();

    let rows: Vec<Vec<String>> = card
        .rows()
        .iter()
        .map(|row| {
            row.iter()
                .map(|word| {
                    if called.contains(word) {
                        format!("**{word}**")
                    } else {
                        word.clone()
                    }
                })
                .collect()
        })
        .collect();

    let table = match table::render(format, &rows) {
        Ok(table) => table,
        Err(error) => return error.to_string(),
    };

    let banner = if core::has_bingo(called, card) {
        "YOU HAVE A BINGO!!!\r\n\r\n"
    } else {
        ""
    };

    let called_list = called
        .iter()
        .map(|word| format!("`{word}`"))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "{banner}Your card is:\r\n{table}\r\n\r\nThe words which have been called so far are:\r\n{called_list}"
    )
}

/// The command summary shown for `help` and unrecognized input. Both
/// deployments share it; `is_admin` appends the host-gated commands.
pub fn help_text(is_admin: bool) -> String {
    let mut text = "You can use one of the following commands:\r\n\
        `join [format]`   Joins a game so that you will get a card the next time the game is started\r\n\
        `start [format]`  Starts a game\r\n\
        `next`            Calls out the next word\r\n\
        `bingo`           Declares that you have a bingo (validation is performed...)\r\n\
        `leave`           Leaves a game\r\n\
        `format {format}` Switches your card between an inline table (table), comma-separated values (csv), and tab-separated values (tsv)\r\n\
        `card`            Displays your card and which words have been called already\r\n\
        `help`            Shows this help screen"
        .to_owned();

    if is_admin {
        text.push_str(
            "\r\n\r\nYou have the following additional commands available to you:\r\n\
            `list`            Lists all ongoing games\r\n\
            `get {channel}`   Displays details about a given channel's game\r\n\
            `kill {channel}`  Kills the game in a given channel",
        );
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn truncation_drops_everything_through_the_last_end_game_marker() {
        let mut game = Game::new("channel", 5);

        let join = Command::new("u1", "Ada", Action::Join);
        game.activities.push(Activity::record(&join, &Reply::ok("welcome")));
        game.activities.push(Activity::end_game("u1", "Ada"));
        game.activities.push(Activity::record(&join, &Reply::ok("welcome")));
        game.activities.push(Activity::end_game("u1", "Ada"));

        let bingo = Command::new("u1", "Ada", Action::Bingo);
        game.activities.push(Activity::record(&bingo, &Reply::ok("win")));

        game.truncate_activities();

        assert_eq!(game.activities.len(), 1);
        assert_eq!(game.activities[0].action, ActionKind::Bingo);
    }

    #[test]
    fn truncation_without_a_marker_keeps_the_log() {
        let mut game = Game::new("channel", 5);

        let join = Command::new("u1", "Ada", Action::Join);
        game.activities.push(Activity::record(&join, &Reply::ok("welcome")));

        game.truncate_activities();

        assert_eq!(game.activities.len(), 1);
    }

    #[test]
    fn action_tags_parse_case_insensitively() {
        assert_eq!("JOIN".parse::<Action>(), Ok(Action::Join));
        assert_eq!(
            "dance".parse::<Action>(),
            Err(UnknownAction("dance".to_owned()))
        );
    }

    #[test]
    fn reply_chunks_respect_the_limit() {
        let text = "a".repeat(2500);

        let chunks = Reply::chunks(&text, 2000);

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].len(), 2000);
        assert_eq!(chunks[1].len(), 500);
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn help_text_gates_admin_commands() {
        assert!(!help_text(false).contains("kill"));
        assert!(help_text(true).contains("kill"));
    }
}
