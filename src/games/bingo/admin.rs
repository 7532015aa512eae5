//! Host-gated admin surface: cross-session listing, inspection and
//! deletion. Thin by design; it only reads and deletes through the
//! session store. Hosts check the caller against
//! [`crate::config::AdminsConfig`] before routing here.

use super::{store::SessionStore, table, TableFormat};

/// One row per session: channel, grid size, roster and pool sizes,
/// turn cursor and start time.
pub fn list(store: &dyn SessionStore, format: TableFormat) -> String {
    let mut rows = vec![header_row()];

    for game in store.iter() {
        rows.push(vec![
            game.channel_id.clone(),
            game.side_size().to_string(),
            game.players().len().to_string(),
            game.word_set().len().to_string(),
            game.next_index().to_string(),
            game.started()
                .map(|started| started.to_rfc3339())
                .unwrap_or_default(),
        ]);
    }

    match table::render(format, &rows) {
        Ok(rendered) => rendered,
        Err(error) => error.to_string(),
    }
}

fn header_row() -> Vec<String> {
    ["Channel", "Side Size", "Players", "Word Count", "Next Index", "Started"]
        .iter()
        .map(|s| (*s).to_owned())
        .collect()
}

/// Dumps one session: game details, the roster with cards, and
/// optionally the full activity log.
pub fn get(store: &dyn SessionStore, channel_id: &str, include_activities: bool) -> String {
    let Some(game) = store.get(channel_id) else {
        return "Could not find that game".to_owned();
    };

    let words = game
        .word_set()
        .iter()
        .map(|word| format!("`{word}`"))
        .collect::<Vec<_>>()
        .join(", ");

    let mut text = format!(
        "**Channel**: {}\r\n**Side Size**: {}\r\n**Started**: {}\r\n**Next Index**: {}\r\n**Words**:\r\n{words}",
        game.channel_id,
        game.side_size(),
        game.started()
            .map(|started| started.to_rfc3339())
            .unwrap_or_else(|| "not started".to_owned()),
        game.next_index(),
    );

    if !game.players().is_empty() {
        text.push_str("\r\n\r\n**Players**:");

        for player in game.players() {
            text.push_str(&format!(
                "\r\n{}\r\n> ID: {}\r\n> Format: {}",
                player.display_name, player.user_id, player.format
            ));

            if let Some(card) = player.card.as_ref() {
                let rendered = table::render(TableFormat::Csv, card.rows())
                    .unwrap_or_else(|error| error.to_string());
                text.push_str("\r\n> Card:\r\n> ");
                text.push_str(&rendered.replace("\r\n", "\r\n> "));
            }
        }
    }

    if include_activities && !game.activities().is_empty() {
        text.push_str("\r\n\r\n**Activities**:");

        for activity in game.activities() {
            text.push_str(&format!(
                "\r\n{:?} by {} ({}) at {}",
                activity.action,
                activity.display_name,
                activity.user_id,
                activity.timestamp.to_rfc3339(),
            ));

            if let Some(ref error) = activity.error {
                text.push_str("\r\n> Error: ");
                text.push_str(&error.replace("\r\n", "\r\n> "));
            }
            if let Some(ref result) = activity.result {
                text.push_str("\r\n> Result: ");
                text.push_str(&result.replace("\r\n", "\r\n> "));
            }
        }
    }

    text
}

/// Deletes one session outright.
pub fn kill(store: &mut dyn SessionStore, channel_id: &str) -> String {
    if store.remove(channel_id).is_some() {
        "The game has been killed".to_owned()
    } else {
        "Could not find that game".to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::bingo::{Game, MemoryStore};

    #[test]
    fn list_renders_a_row_per_session() {
        let mut store = MemoryStore::new();
        store.insert(Game::new("alpha", 5));

        let listed = list(&store, TableFormat::Csv);

        assert!(listed.starts_with("Channel,Side Size,Players,Word Count,Next Index,Started\r\n"));
        assert!(listed.contains("alpha,5,0,0,0,"));
    }

    #[test]
    fn get_unknown_channel_reports_not_found() {
        let store = MemoryStore::new();

        assert_eq!(get(&store, "nope", false), "Could not find that game");
    }

    #[test]
    fn kill_removes_the_session() {
        let mut store = MemoryStore::new();
        store.insert(Game::new("alpha", 5));

        assert_eq!(kill(&mut store, "alpha"), "The game has been killed");
        assert_eq!(kill(&mut store, "alpha"), "Could not find that game");
    }
}
