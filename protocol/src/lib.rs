use rand::seq::SliceRandom;
use rand::thread_rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

/// ---- Cards ----

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Color {
    #[serde(rename = "cardRed")]
    Red,
    #[serde(rename = "cardBlue")]
    Blue,
    #[serde(rename = "cardGreen")]
    Green,
    #[serde(rename = "cardYellow")]
    Yellow,
}

pub const COLORS: [Color; 4] = [Color::Red, Color::Blue, Color::Green, Color::Yellow];

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Color {
    /// Wire name, as the browser client sends it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Red => "cardRed",
            Color::Blue => "cardBlue",
            Color::Green => "cardGreen",
            Color::Yellow => "cardYellow",
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct ParseColorError;

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown card color")
    }
}

impl FromStr for Color {
    type Err = ParseColorError;
    fn from_str(s: &str) -> Result<Self, ParseColorError> {
        match s {
            "cardRed" => Ok(Color::Red),
            "cardBlue" => Ok(Color::Blue),
            "cardGreen" => Ok(Color::Green),
            "cardYellow" => Ok(Color::Yellow),
            _ => Err(ParseColorError),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Symbol {
    #[serde(rename = "★")]
    Star,
    #[serde(rename = "✦")]
    Sparkle,
    #[serde(rename = "◉")]
    Target,
    #[serde(rename = "⬠")]
    Pentagon,
    #[serde(rename = "△")]
    Triangle,
    #[serde(rename = "▢")]
    Square,
    #[serde(rename = "◇")]
    Diamond,
    #[serde(rename = "○")]
    Circle,
}

pub const SYMBOLS: [Symbol; 8] = [
    Symbol::Star,
    Symbol::Sparkle,
    Symbol::Target,
    Symbol::Pentagon,
    Symbol::Triangle,
    Symbol::Square,
    Symbol::Diamond,
    Symbol::Circle,
];

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let g = match self {
            Symbol::Star => "★",
            Symbol::Sparkle => "✦",
            Symbol::Target => "◉",
            Symbol::Pentagon => "⬠",
            Symbol::Triangle => "△",
            Symbol::Square => "▢",
            Symbol::Diamond => "◇",
            Symbol::Circle => "○",
        };
        f.write_str(g)
    }
}

/// ---- Special effects ----

/// What a symbol does when its card is played. Four symbols carry an
/// effect, the other four are plain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    DrawTwo,
    Skip,
    Reverse,
    ColorPicker,
}

impl Symbol {
    pub fn effect(self) -> Option<Effect> {
        match self {
            Symbol::Star => Some(Effect::DrawTwo),
            Symbol::Sparkle => Some(Effect::Skip),
            Symbol::Target => Some(Effect::Reverse),
            Symbol::Pentagon => Some(Effect::ColorPicker),
            Symbol::Triangle | Symbol::Square | Symbol::Diamond | Symbol::Circle => None,
        }
    }
}

/// A card has no identity beyond its value; the deck holds duplicates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Card {
    pub color: Color,
    pub symbol: Symbol,
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.symbol, self.color)
    }
}

/// ---- Deck ----

/// Copies of every color x symbol combination in a full deck.
pub const DECK_COPIES: usize = 2;
/// Full deck size: 2 x 4 colors x 8 symbols.
pub const DECK_SIZE: usize = DECK_COPIES * COLORS.len() * SYMBOLS.len();

/// The face-down draw pile. Cards come off the front.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deck {
    cards: VecDeque<Card>,
}

impl Deck {
    pub fn empty() -> Self {
        Deck {
            cards: VecDeque::new(),
        }
    }

    /// Full 64-card deck, uniformly shuffled.
    pub fn full_shuffled() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for _ in 0..DECK_COPIES {
            for &color in &COLORS {
                for &symbol in &SYMBOLS {
                    cards.push(Card { color, symbol });
                }
            }
        }
        cards.shuffle(&mut thread_rng());
        Deck {
            cards: cards.into(),
        }
    }

    /// Pile with a fixed order, front first. Used by stores and tests
    /// that need a known sequence.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Deck {
            cards: cards.into(),
        }
    }

    /// Rebuilds the pile from recycled cards, reshuffled.
    pub fn reshuffled(mut cards: Vec<Card>) -> Self {
        cards.shuffle(&mut thread_rng());
        Deck {
            cards: cards.into(),
        }
    }

    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop_front()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }
}

impl Default for Deck {
    fn default() -> Self {
        Deck::empty()
    }
}

/// ---- Per-player views ----

/// What one player is allowed to see about another seat. `cards` is
/// present only for the viewer's own seat.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub id: String,
    pub name: String,
    pub creator: bool,
    pub card_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cards: Option<Vec<Card>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GameStateView {
    pub game_id: String,
    pub turn_counter: u32,
    pub current_player_index: usize,
    pub game_direction: i32,
    pub selected_color: Option<Color>,
    pub game_started: bool,
    pub game_finished: bool,
    pub winner_id: Option<String>,
    pub players: Vec<PlayerView>,
    pub center_cards: Vec<Card>,
    pub deck_size: usize,
}

/// Lobby-facing summary of a game, no card information at all.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GameSummary {
    pub id: String,
    pub creator_id: Option<String>,
    pub creator_name: Option<String>,
    pub player_count: usize,
    pub game_started: bool,
    pub game_finished: bool,
    pub winner_id: Option<String>,
    pub winner_name: Option<String>,
}

/// Pushed to the acting player only when their action was rejected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionFailure {
    pub error: bool,
    pub message: String,
}

impl ActionFailure {
    pub fn new(message: impl Into<String>) -> Self {
        ActionFailure {
            error: true,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_deck_holds_two_copies_of_every_combination() {
        let mut deck = Deck::full_shuffled();
        assert_eq!(deck.len(), 64);

        let mut counts = std::collections::HashMap::new();
        while let Some(card) = deck.draw() {
            *counts.entry(card).or_insert(0usize) += 1;
        }
        assert_eq!(counts.len(), 32);
        assert!(counts.values().all(|&n| n == DECK_COPIES));
    }

    #[test]
    fn draw_comes_off_the_front() {
        let cards = vec![
            Card {
                color: Color::Red,
                symbol: Symbol::Star,
            },
            Card {
                color: Color::Blue,
                symbol: Symbol::Circle,
            },
        ];
        let mut deck = Deck {
            cards: cards.clone().into(),
        };
        assert_eq!(deck.draw(), Some(cards[0]));
        assert_eq!(deck.draw(), Some(cards[1]));
        assert_eq!(deck.draw(), None);
    }

    #[test]
    fn exactly_four_symbols_carry_effects() {
        let effects: Vec<_> = SYMBOLS.iter().filter_map(|s| s.effect()).collect();
        assert_eq!(
            effects,
            vec![
                Effect::DrawTwo,
                Effect::Skip,
                Effect::Reverse,
                Effect::ColorPicker
            ]
        );
    }

    #[test]
    fn colors_parse_from_wire_names() {
        for color in COLORS {
            assert_eq!(color.as_str().parse::<Color>(), Ok(color));
        }
        assert_eq!("mauve".parse::<Color>(), Err(ParseColorError));
    }

    #[test]
    fn cards_serialize_with_wire_names() {
        let card = Card {
            color: Color::Red,
            symbol: Symbol::Star,
        };
        let json = serde_json::to_string(&card).unwrap();
        assert_eq!(json, r#"{"color":"cardRed","symbol":"★"}"#);
        let back: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(back, card);
    }

    #[test]
    fn player_view_omits_absent_hand() {
        let view = PlayerView {
            id: "p2".into(),
            name: "Joe".into(),
            creator: false,
            card_count: 5,
            cards: None,
        };
        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("cards").is_none());
        assert_eq!(json["cardCount"], 5);
    }
}
