use serde::{Deserialize, Serialize};
use std::fmt;

pub const DECK_SIZE: usize = 52;
pub const RANKS: usize = 13;
pub const PAIR_COUNT: usize = DECK_SIZE / 2;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    pub fn symbol(self) -> &'static str {
        match self {
            Suit::Spades => "♠",
            Suit::Hearts => "♥",
            Suit::Diamonds => "♦",
            Suit::Clubs => "♣",
        }
    }
}

/// A card identified by its deck index in `[0, 52)`.
///
/// Rank and suit are derived from the index, so two cards with the same
/// index are the same card.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Card(u8);

impl Card {
    pub fn new(index: usize) -> Option<Card> {
        (index < DECK_SIZE).then(|| Card(index as u8))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Face value from 1 (ace) to 13 (king).
    pub fn rank(self) -> u8 {
        self.0 % RANKS as u8 + 1
    }

    pub fn suit(self) -> Suit {
        Suit::ALL[self.index() / RANKS]
    }

    pub fn label(self) -> &'static str {
        rank_label(self.rank())
    }

    pub fn matches(self, other: Card) -> bool {
        self.rank() == other.rank()
    }

    pub fn face(self) -> CardFace {
        CardFace {
            index: self.index(),
            rank: self.rank(),
            label: self.label().to_string(),
            suit: self.suit(),
            symbol: self.suit().symbol().to_string(),
        }
    }

    /// All 52 cards in index order.
    pub fn deck() -> impl Iterator<Item = Card> {
        (0..DECK_SIZE as u8).map(Card)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.label(), self.suit().symbol())
    }
}

pub fn rank_label(rank: u8) -> &'static str {
    const LABELS: [&str; RANKS] = [
        "A", "2", "3", "4", "5", "6", "7", "8", "9", "10", "J", "Q", "K",
    ];
    LABELS
        .get(usize::from(rank).wrapping_sub(1))
        .copied()
        .unwrap_or("?")
}

/// What the view draws on the front of a revealed card.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CardFace {
    pub index: usize,
    pub rank: u8,
    pub label: String,
    pub suit: Suit,
    pub symbol: String,
}
