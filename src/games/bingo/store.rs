//! The session storage seam. The host owns the store — a JSON file for
//! a long-lived bot, a cloud table for a stateless handler — and only
//! needs to round-trip the [`Game`] snapshot; the engine and the admin
//! facade see nothing but this trait.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::Game;

pub trait SessionStore {
    fn get(&self, channel_id: &str) -> Option<&Game>;

    fn get_mut(&mut self, channel_id: &str) -> Option<&mut Game>;

    fn insert(&mut self, game: Game);

    fn remove(&mut self, channel_id: &str) -> Option<Game>;

    fn iter(&self) -> Box<dyn Iterator<Item = &Game> + '_>;

    /// Games are created on the first command against an unknown
    /// channel and live until an admin kills them.
    fn get_or_insert(&mut self, channel_id: &str, side_size: usize) -> &mut Game {
        if self.get(channel_id).is_none() {
            self.insert(Game::new(channel_id, side_size));
        }

        self.get_mut(channel_id).expect("game was just inserted")
    }
}

/// In-memory store for hosts that snapshot the whole map to disk, and
/// for tests.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryStore {
    games: HashMap<String, Game>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, channel_id: &str) -> Option<&Game> {
        self.games.get(channel_id)
    }

    fn get_mut(&mut self, channel_id: &str) -> Option<&mut Game> {
        self.games.get_mut(channel_id)
    }

    fn insert(&mut self, game: Game) {
        self.games.insert(game.channel_id.clone(), game);
    }

    fn remove(&mut self, channel_id: &str) -> Option<Game> {
        self.games.remove(channel_id)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &Game> + '_> {
        Box::new(self.games.values())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_or_insert_creates_once() {
        let mut store = MemoryStore::new();

        store.get_or_insert("channel", 5);
        store.get_or_insert("channel", 5);

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("channel").map(Game::side_size), Some(5));
    }

    #[test]
    fn remove_deletes_the_game() {
        let mut store = MemoryStore::new();
        store.insert(Game::new("channel", 5));

        assert!(store.remove("channel").is_some());
        assert!(store.remove("channel").is_none());
        assert!(store.is_empty());
    }
}
