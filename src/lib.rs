#![warn(clippy::perf)]
#![warn(clippy::unwrap_used)]

//! Chat-integrated multiplayer bingo.
//!
//! Players join a per-channel game, get dealt cards from a shared word
//! pool, have words called out in a fixed random order and race to
//! complete a row, column or diagonal. The engine here owns the word
//! pool lifecycle, card generation, turn progression, win detection and
//! the per-game activity ledger. Message transport, storage technology
//! and scheduling belong to the host process driving it.
//!
//! # Host contract
//!
//! - Serialize commands per channel: the engine assumes single-writer
//!   access to a [`Game`] and performs no locking of its own. A host
//!   that handles concurrent requests for the same channel must add a
//!   per-key mutex or an optimistic read-modify-write retry.
//! - Persist the (possibly mutated) [`Game`] snapshot after every
//!   command, including failed ones, so ledger entries for failures
//!   survive. The snapshot only needs round-trip fidelity; any storage
//!   that can hold the serde representation works.
//! - Catch panics and transport failures at the boundary, log them and
//!   apologize generically. The engine does not retry.
//! - Long replies may exceed a transport's message cap (2000 characters
//!   on Discord); see [`Reply::chunks`].

pub mod config;
pub mod errors;
pub mod games;
pub mod logging;

pub use config::BingoConfig;
pub use errors::{Error, RenderError};
pub use games::bingo::{
    admin, card_text, help_text, Action, ActionKind, Activity, Card, Command, Engine, Game,
    MemoryStore, Player, Reply, SessionStore, TableFormat, WordsList,
};
