use chrono::{DateTime, Utc};
use glyphs_protocol::{Card, Color, Deck, Effect};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::error::{GameError, Result};

// ==== rule knobs ====
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 4;
/// Cards dealt to each player at start.
pub const HAND_SIZE: usize = 5;
/// The center pile keeps only this many most recently played cards.
pub const CENTER_SIZE: usize = 4;
/// Cards the draw-two effect forces on the next player.
pub const PENALTY_CARDS: usize = 2;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub creator: bool,
    /// Hand order is insertion order; plays are index-based.
    pub cards: Vec<Card>,
}

impl Player {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Player {
            id: id.into(),
            name: name.into(),
            creator: false,
            cards: Vec::new(),
        }
    }
}

/// One game of glyphs. Owned exclusively by the engine for the span of
/// an action; every mutating handler either commits a full transition
/// or leaves the aggregate untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Game {
    pub id: String,
    /// Seat order; fixed once the game has started.
    pub players: Vec<Player>,
    pub deck: Deck,
    /// Most recent plays, oldest at the front, capped at `CENTER_SIZE`.
    pub center_cards: VecDeque<Card>,
    pub current_player_index: usize,
    pub turn_counter: u32,
    /// +1 or -1.
    pub game_direction: i32,
    /// Set while a color-picker play awaits its `choose_color`.
    pub selected_color: Option<Color>,
    pub game_started: bool,
    pub game_finished: bool,
    pub winner_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Game {
    pub fn new(id: impl Into<String>) -> Self {
        Game {
            id: id.into(),
            players: Vec::new(),
            deck: Deck::empty(),
            center_cards: VecDeque::new(),
            current_player_index: 0,
            turn_counter: 1,
            game_direction: 1,
            selected_color: None,
            game_started: false,
            game_finished: false,
            winner_id: None,
            created_at: Utc::now(),
        }
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current_player_index)
    }

    fn current_player_mut(&mut self) -> &mut Player {
        &mut self.players[self.current_player_index]
    }

    /// Adds a player to the lobby. Re-joining with a seated id is a
    /// no-op so a duplicate request cannot corrupt the seat order.
    pub fn join(&mut self, player: Player) -> Result<()> {
        if self.game_started {
            return Err(GameError::InvalidState(
                "the game has already started".into(),
            ));
        }
        if self.players.iter().any(|p| p.id == player.id) {
            debug!("game {}: player {} is already seated", self.id, player.id);
            return Ok(());
        }
        if self.players.len() >= MAX_PLAYERS {
            return Err(GameError::Capacity);
        }
        info!("game {}: player {} ({}) joined", self.id, player.name, player.id);
        self.players.push(Player {
            creator: false,
            cards: Vec::new(),
            ..player
        });
        Ok(())
    }

    /// Closes the lobby, builds and deals the deck. Creator only.
    pub fn start(&mut self, player_id: &str) -> Result<()> {
        if !self
            .players
            .iter()
            .any(|p| p.id == player_id && p.creator)
        {
            return Err(GameError::Authorization);
        }
        if self.game_started {
            return Err(GameError::InvalidState(
                "the game has already started".into(),
            ));
        }
        if self.players.len() < MIN_PLAYERS {
            return Err(GameError::InvalidState(
                "at least 2 players are needed to start".into(),
            ));
        }

        self.deal();
        self.game_started = true;
        info!(
            "game {}: started with {} players, {} cards in the draw pile",
            self.id,
            self.players.len(),
            self.deck.len()
        );
        Ok(())
    }

    fn deal(&mut self) {
        let mut deck = Deck::full_shuffled();
        for player in self.players.iter_mut() {
            player.cards.clear();
            for _ in 0..HAND_SIZE {
                if let Some(card) = deck.draw() {
                    player.cards.push(card);
                }
            }
        }
        self.center_cards.clear();
        for _ in 0..CENTER_SIZE {
            if let Some(card) = deck.draw() {
                self.center_cards.push_back(card);
            }
        }
        self.deck = deck;
        self.current_player_index = 0;
        self.turn_counter = 1;
        self.game_direction = 1;
        self.selected_color = None;
    }

    fn require_active(&self) -> Result<()> {
        if !self.game_started {
            return Err(GameError::InvalidState(
                "the game has not started yet".into(),
            ));
        }
        if self.game_finished {
            return Err(GameError::InvalidState("the game is over".into()));
        }
        Ok(())
    }

    fn require_turn(&self, player_id: &str) -> Result<()> {
        self.require_active()?;
        match self.current_player() {
            Some(p) if p.id == player_id => Ok(()),
            _ => Err(GameError::TurnOrder),
        }
    }

    /// Legality check. A pending chosen color only admits cards of that
    /// color, and a matching play consumes it; otherwise the card must
    /// share color or symbol with any card in the center pile.
    pub fn can_play(&mut self, card: Card) -> bool {
        if let Some(color) = self.selected_color {
            let matches = card.color == color;
            if matches {
                self.selected_color = None;
            }
            return matches;
        }
        self.center_cards
            .iter()
            .any(|c| c.color == card.color || c.symbol == card.symbol)
    }

    pub fn play_card(&mut self, player_id: &str, card_index: usize) -> Result<()> {
        self.require_turn(player_id)?;

        let hand_size = self.players[self.current_player_index].cards.len();
        if card_index >= hand_size {
            return Err(GameError::InvalidArgument(format!(
                "card index {card_index} is out of range"
            )));
        }
        let card = self.players[self.current_player_index].cards[card_index];
        if !self.can_play(card) {
            return Err(GameError::RuleViolation);
        }

        self.current_player_mut().cards.remove(card_index);
        self.center_cards.push_back(card);
        if self.center_cards.len() > CENTER_SIZE {
            self.center_cards.pop_front();
        }

        if self.players[self.current_player_index].cards.is_empty() {
            // A winning play ends the game before any effect resolves.
            self.game_finished = true;
            self.winner_id = Some(player_id.to_string());
            info!("game {}: {} wins on turn {}", self.id, player_id, self.turn_counter);
            return Ok(());
        }

        let advance = match card.symbol.effect() {
            Some(effect) => self.apply_effect(effect),
            None => true,
        };
        if advance {
            self.advance_turn();
        }
        Ok(())
    }

    /// Resolves a special-card effect; returns whether the standard
    /// turn advance still follows.
    fn apply_effect(&mut self, effect: Effect) -> bool {
        match effect {
            Effect::DrawTwo => {
                // No reshuffle inside the penalty; a dry pile just
                // deals fewer.
                let target = self.next_player_index();
                for _ in 0..PENALTY_CARDS {
                    if let Some(card) = self.deck.draw() {
                        self.players[target].cards.push(card);
                    }
                }
                true
            }
            Effect::Skip => {
                self.current_player_index = self.next_player_index();
                true
            }
            Effect::Reverse => {
                self.game_direction = -self.game_direction;
                true
            }
            // The same player keeps the turn until choose_color.
            Effect::ColorPicker => false,
        }
    }

    pub fn draw_card(&mut self, player_id: &str) -> Result<()> {
        self.require_turn(player_id)?;

        if self.deck.is_empty() {
            self.reshuffle_center()?;
        }
        let card = self.deck.draw().ok_or(GameError::DeckExhausted)?;
        self.current_player_mut().cards.push(card);

        // A playable draw leaves the turn open for a follow-up play.
        if !self.can_play(card) {
            self.advance_turn();
        }
        Ok(())
    }

    /// Recycles all but the most recent center card into a fresh draw
    /// pile. Fails when there is nothing to recycle.
    fn reshuffle_center(&mut self) -> Result<()> {
        if self.center_cards.len() < 2 {
            return Err(GameError::DeckExhausted);
        }
        let Some(top) = self.center_cards.pop_back() else {
            return Err(GameError::DeckExhausted);
        };
        let recycled: Vec<Card> = self.center_cards.drain(..).collect();
        self.center_cards.push_back(top);
        info!(
            "game {}: reshuffled {} center cards into the draw pile",
            self.id,
            recycled.len()
        );
        self.deck = Deck::reshuffled(recycled);
        Ok(())
    }

    pub fn choose_color(&mut self, player_id: &str, color: Color) -> Result<()> {
        self.require_turn(player_id)?;
        self.selected_color = Some(color);
        self.advance_turn();
        Ok(())
    }

    /// Always in 0..player_count, whatever the direction.
    pub fn next_player_index(&self) -> usize {
        let n = self.players.len() as i32;
        ((self.current_player_index as i32 + self.game_direction + n) % n) as usize
    }

    fn advance_turn(&mut self) {
        self.current_player_index = self.next_player_index();
        self.turn_counter += 1;
    }
}
