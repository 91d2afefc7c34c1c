use glyphs_protocol::{GameStateView, GameSummary, PlayerView};

use crate::game::Game;

impl Game {
    /// Player-scoped projection. The viewer gets their own hand in
    /// full; everyone else is reduced to a card count. The center pile
    /// is public, the draw pile is size-only.
    pub fn view_for(&self, viewer_id: &str) -> GameStateView {
        GameStateView {
            game_id: self.id.clone(),
            turn_counter: self.turn_counter,
            current_player_index: self.current_player_index,
            game_direction: self.game_direction,
            selected_color: self.selected_color,
            game_started: self.game_started,
            game_finished: self.game_finished,
            winner_id: self.winner_id.clone(),
            players: self
                .players
                .iter()
                .map(|p| PlayerView {
                    id: p.id.clone(),
                    name: p.name.clone(),
                    creator: p.creator,
                    card_count: p.cards.len(),
                    cards: (p.id == viewer_id).then(|| p.cards.clone()),
                })
                .collect(),
            center_cards: self.center_cards.iter().copied().collect(),
            deck_size: self.deck.len(),
        }
    }

    /// One view per seated player, ready for the transport collaborator
    /// to push after a successful action.
    pub fn views_for_players(&self) -> Vec<(String, GameStateView)> {
        self.players
            .iter()
            .map(|p| (p.id.clone(), self.view_for(&p.id)))
            .collect()
    }

    /// Lobby summary with no card information.
    pub fn summary(&self) -> GameSummary {
        let creator = self.players.iter().find(|p| p.creator);
        let winner = self
            .winner_id
            .as_deref()
            .and_then(|id| self.players.iter().find(|p| p.id == id));
        GameSummary {
            id: self.id.clone(),
            creator_id: creator.map(|p| p.id.clone()),
            creator_name: creator.map(|p| p.name.clone()),
            player_count: self.players.len(),
            game_started: self.game_started,
            game_finished: self.game_finished,
            winner_id: self.winner_id.clone(),
            winner_name: winner.map(|p| p.name.clone()),
        }
    }
}
