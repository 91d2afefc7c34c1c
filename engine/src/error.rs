use glyphs_protocol::ActionFailure;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GameError>;

/// Everything a player action can fail with. Each message is what the
/// transport collaborator forwards to the acting player.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("game not found: {0}")]
    NotFound(String),
    #[error("a game with id {0} already exists")]
    Conflict(String),
    #[error("the game is already full (4 players maximum)")]
    Capacity,
    #[error("only the creator can start the game")]
    Authorization,
    #[error("it is not your turn")]
    TurnOrder,
    #[error("{0}")]
    InvalidArgument(String),
    #[error("this card cannot be played")]
    RuleViolation,
    #[error("{0}")]
    InvalidState(String),
    #[error("the draw pile is empty")]
    DeckExhausted,
}

impl GameError {
    /// Shape pushed to the acting player's channel on failure.
    pub fn notice(&self) -> ActionFailure {
        ActionFailure::new(self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_carries_flag_and_message() {
        let n = GameError::TurnOrder.notice();
        assert!(n.error);
        assert_eq!(n.message, "it is not your turn");
    }
}
