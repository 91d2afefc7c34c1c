use parking_lot::Mutex;
use std::collections::HashMap;

use crate::game::Game;

/// Persistence boundary. Every mutating action is read-modify-write
/// against this store; `GameService` guarantees a single writer per
/// game id at a time.
pub trait GameStore: Send + Sync {
    fn load(&self, game_id: &str) -> Option<Game>;
    fn save(&self, game: &Game);
}

/// Keeps whole games in a map, handing out clones so readers always
/// see a consistent snapshot.
#[derive(Default)]
pub struct InMemoryStore {
    games: Mutex<HashMap<String, Game>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.games.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.lock().is_empty()
    }
}

impl GameStore for InMemoryStore {
    fn load(&self, game_id: &str) -> Option<Game> {
        self.games.lock().get(game_id).cloned()
    }

    fn save(&self, game: &Game) {
        self.games.lock().insert(game.id.clone(), game.clone());
    }
}
