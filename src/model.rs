use crate::card::Card;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Face {
    Down,
    Up,
    Paired,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Slot {
    pub card: Card,
    pub face: Face,
}

/// The dealt layout, indexed by board position.
#[derive(Clone, Debug, Default)]
pub struct Board {
    slots: Vec<Slot>,
}

impl Board {
    pub fn deal(order: impl IntoIterator<Item = Card>) -> Self {
        Self {
            slots: order
                .into_iter()
                .map(|card| Slot { card, face: Face::Down })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn card(&self, position: usize) -> Option<Card> {
        self.slots.get(position).map(|slot| slot.card)
    }

    pub fn face(&self, position: usize) -> Option<Face> {
        self.slots.get(position).map(|slot| slot.face)
    }

    /// True for revealed and paired cards. Out-of-range positions are not
    /// face up.
    pub fn is_face_up(&self, position: usize) -> bool {
        matches!(self.face(position), Some(Face::Up | Face::Paired))
    }

    pub fn set_face(&mut self, position: usize, face: Face) {
        if let Some(slot) = self.slots.get_mut(position) {
            slot.face = face;
        }
    }

    pub fn position_of(&self, card: Card) -> Option<usize> {
        self.slots.iter().position(|slot| slot.card == card)
    }

    pub fn all_paired(&self) -> bool {
        self.slots.iter().all(|slot| slot.face == Face::Paired)
    }

    pub fn order(&self) -> impl Iterator<Item = Card> + '_ {
        self.slots.iter().map(|slot| slot.card)
    }
}

/// Positions of the cards revealed in the current turn, at most two.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RevealedCards {
    slots: [Option<usize>; 2],
}

impl RevealedCards {
    pub fn push(&mut self, position: usize) {
        match self.slots {
            [None, _] => self.slots[0] = Some(position),
            [Some(_), None] => self.slots[1] = Some(position),
            [Some(_), Some(_)] => {
                log::warn!("ignoring third revealed card at {position}");
            }
        }
    }

    pub fn first(&self) -> Option<usize> {
        self.slots[0]
    }

    pub fn second(&self) -> Option<usize> {
        self.slots[1]
    }

    pub fn pair(&self) -> Option<(usize, usize)> {
        self.first().zip(self.second())
    }

    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.slots = [None, None];
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots.iter().flatten().copied()
    }

    pub fn is_pair_matched(&self, board: &Board) -> bool {
        self.pair()
            .and_then(|(a, b)| Some((board.card(a)?, board.card(b)?)))
            .is_some_and(|(a, b)| a.matches(b))
    }
}

/// Everything the turn controller mutates during a game.
#[derive(Clone, Debug, Default)]
pub struct CardModel {
    pub board: Board,
    pub revealed: RevealedCards,
    pub score: u32,
    pub tried_times: u32,
}

impl CardModel {
    pub fn new(board: Board) -> Self {
        Self {
            board,
            ..Self::default()
        }
    }
}
