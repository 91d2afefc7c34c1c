//! Rules engine for the glyphs card game: canonical game state, action
//! validation, special-card effects, and per-player state projection.
//! Transport and durable persistence live behind the [`GameStore`] and
//! view boundaries and are supplied by the caller.

pub mod error;
pub mod game;
pub mod service;
pub mod store;
mod view;


pub use error::{GameError, Result};
pub use game::{Game, Player};
pub use service::GameService;
pub use store::{GameStore, InMemoryStore};
