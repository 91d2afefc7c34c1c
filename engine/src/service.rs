use log::warn;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use glyphs_protocol::{Color, GameStateView, GameSummary};

use crate::error::{GameError, Result};
use crate::game::{Game, Player};
use crate::store::{GameStore, InMemoryStore};

/// The request surface of the engine. Wraps a [`GameStore`] and
/// serializes mutating actions per game id: at most one action may
/// apply to a given game at a time, while different games proceed in
/// parallel. Reads go straight to the store and see a consistent
/// snapshot.
pub struct GameService<S: GameStore = InMemoryStore> {
    store: S,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl GameService<InMemoryStore> {
    pub fn in_memory() -> Self {
        GameService::new(InMemoryStore::new())
    }
}

impl<S: GameStore> GameService<S> {
    pub fn new(store: S) -> Self {
        GameService {
            store,
            locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn lock_for(&self, game_id: &str) -> Arc<Mutex<()>> {
        self.locks
            .lock()
            .entry(game_id.to_string())
            .or_default()
            .clone()
    }

    fn load(&self, game_id: &str) -> Result<Game> {
        self.store
            .load(game_id)
            .ok_or_else(|| GameError::NotFound(game_id.to_string()))
    }

    /// Loads, mutates and saves under the game's lock. Nothing is
    /// written back when `mutation` fails.
    fn mutate<F>(&self, game_id: &str, mutation: F) -> Result<Game>
    where
        F: FnOnce(&mut Game) -> Result<()>,
    {
        let lock = self.lock_for(game_id);
        let _guard = lock.lock();

        let mut game = self.load(game_id)?;
        if let Err(err) = mutation(&mut game) {
            warn!("game {game_id}: action rejected: {err}");
            return Err(err);
        }
        self.store.save(&game);
        Ok(game)
    }

    /// Creates a game, optionally seating the creator. A missing id is
    /// generated from a v4 UUID, truncated the way the original client
    /// expects.
    pub fn create_game(
        &self,
        id: Option<String>,
        creator: Option<(String, String)>,
    ) -> Result<Game> {
        let id = id.unwrap_or_else(|| Uuid::new_v4().to_string()[..8].to_string());

        let lock = self.lock_for(&id);
        let _guard = lock.lock();
        if self.store.load(&id).is_some() {
            return Err(GameError::Conflict(id));
        }

        let mut game = Game::new(id);
        if let Some((creator_id, creator_name)) = creator {
            let mut player = Player::new(creator_id, creator_name);
            player.creator = true;
            game.players.push(player);
        }
        self.store.save(&game);
        Ok(game)
    }

    pub fn get_game(&self, game_id: &str) -> Result<GameSummary> {
        Ok(self.load(game_id)?.summary())
    }

    pub fn game_state_for_player(&self, game_id: &str, player_id: &str) -> Result<GameStateView> {
        Ok(self.load(game_id)?.view_for(player_id))
    }

    pub fn join_game(&self, game_id: &str, player: Player) -> Result<Game> {
        self.mutate(game_id, |game| game.join(player))
    }

    pub fn start_game(&self, game_id: &str, player_id: &str) -> Result<Game> {
        self.mutate(game_id, |game| game.start(player_id))
    }

    pub fn play_card(&self, game_id: &str, player_id: &str, card_index: usize) -> Result<Game> {
        self.mutate(game_id, |game| game.play_card(player_id, card_index))
    }

    pub fn draw_card(&self, game_id: &str, player_id: &str) -> Result<Game> {
        self.mutate(game_id, |game| game.draw_card(player_id))
    }

    /// Takes the wire color name so a bad client string surfaces as an
    /// invalid-argument failure instead of a deserialization error.
    pub fn choose_color(&self, game_id: &str, player_id: &str, color: &str) -> Result<Game> {
        let color: Color = color
            .parse()
            .map_err(|_| GameError::InvalidArgument(format!("invalid color: {color}")))?;
        self.mutate(game_id, |game| game.choose_color(player_id, color))
    }
}
