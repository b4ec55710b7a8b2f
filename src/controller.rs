use crate::card::{Card, CardFace};
use crate::clock::{CancelToken, Scheduler};
use crate::config::GameConfig;
use crate::error::GameError;
use crate::model::{Board, CardModel, Face};
use crate::presenter::Presenter;
use crate::shuffle::GameRng;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    FirstCardAwaits,
    SecondCardAwaits,
    CardsMatchFailed,
    CardsMatched,
    GameFinished,
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GameState::FirstCardAwaits => "FirstCardAwaits",
            GameState::SecondCardAwaits => "SecondCardAwaits",
            GameState::CardsMatchFailed => "CardsMatchFailed",
            GameState::CardsMatched => "CardsMatched",
            GameState::GameFinished => "GameFinished",
        };
        f.write_str(name)
    }
}

/// What a single selection did.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing changed: the card was already up, the game was busy,
    /// paused or over.
    Ignored,
    /// First card of a turn turned over.
    Revealed,
    Matched,
    /// The pair differs; it flips back once the reset delay has passed.
    Mismatched,
    /// The last pair was found.
    Finished,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CardView {
    pub position: usize,
    /// Front of the card, only present while it is face up.
    pub face: Option<CardFace>,
    pub paired: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub state: GameState,
    pub score: u32,
    pub tried_times: u32,
    pub paused: bool,
    pub cards: Vec<CardView>,
}

/// One game of memory: the turn state machine plus everything it owns.
///
/// The host feeds selections through [`GameSession::dispatch`] and drives
/// time through [`GameSession::tick`]; all visual effects go to the
/// injected [`Presenter`].
pub struct GameSession<P: Presenter> {
    model: CardModel,
    state: GameState,
    scheduler: Scheduler,
    pending_reset: Option<CancelToken>,
    config: GameConfig,
    rng: GameRng,
    presenter: P,
    paused: bool,
}

impl<P: Presenter> GameSession<P> {
    pub fn new(config: GameConfig, presenter: P) -> Result<Self, GameError> {
        config.validate()?;
        let rng = GameRng::with_seed(config.seed);
        let mut session = Self {
            model: CardModel::default(),
            state: GameState::FirstCardAwaits,
            scheduler: Scheduler::new(),
            pending_reset: None,
            config,
            rng,
            presenter,
            paused: false,
        };
        session.deal();
        Ok(session)
    }

    fn deal(&mut self) {
        let board = Board::deal(self.rng.shuffled_deck());
        let faces: Vec<CardFace> = board.order().map(Card::face).collect();
        self.model = CardModel::new(board);
        self.state = GameState::FirstCardAwaits;
        self.presenter.render_deck(&faces);
        self.presenter.update_score(0);
        self.presenter.update_attempts(0);
        log::debug!("dealt {} cards", faces.len());
    }

    /// Bounds-checked selection of the card at `position`.
    pub fn select(&mut self, position: usize) -> Result<Outcome, GameError> {
        let len = self.model.board.len();
        if position >= len {
            return Err(GameError::PositionOutOfRange { position, len });
        }
        Ok(self.dispatch(position))
    }

    /// Handles one user selection of the card at `position`.
    pub fn dispatch(&mut self, position: usize) -> Outcome {
        if self.paused {
            return Outcome::Ignored;
        }
        if position >= self.model.board.len() {
            log::warn!("selection at {position} is off the board");
            return Outcome::Ignored;
        }
        if self.model.board.is_face_up(position) {
            return Outcome::Ignored;
        }

        match self.state {
            GameState::FirstCardAwaits => {
                self.reveal(position);
                self.model.revealed.push(position);
                self.transition(GameState::SecondCardAwaits);
                Outcome::Revealed
            }
            GameState::SecondCardAwaits => {
                self.model.tried_times += 1;
                self.presenter.update_attempts(self.model.tried_times);
                self.reveal(position);
                self.model.revealed.push(position);
                if self.model.revealed.is_pair_matched(&self.model.board) {
                    self.resolve_match()
                } else {
                    self.resolve_mismatch()
                }
            }
            // Nothing may be turned while a failed pair is still showing.
            GameState::CardsMatchFailed | GameState::CardsMatched | GameState::GameFinished => {
                Outcome::Ignored
            }
        }
    }

    fn resolve_match(&mut self) -> Outcome {
        self.model.score += self.config.match_reward;
        self.presenter.update_score(self.model.score);
        self.transition(GameState::CardsMatched);

        if let Some((first, second)) = self.model.revealed.pair() {
            self.model.board.set_face(first, Face::Paired);
            self.model.board.set_face(second, Face::Paired);
            self.presenter.mark_paired(first, second);
        }
        self.model.revealed.clear();

        if self.model.score >= self.config.win_score() {
            self.transition(GameState::GameFinished);
            log::info!(
                "game finished: score {} after {} tries",
                self.model.score,
                self.model.tried_times
            );
            self.presenter
                .show_completion(self.model.score, self.model.tried_times);
            return Outcome::Finished;
        }

        log::info!("pair matched, score {}", self.model.score);
        self.transition(GameState::FirstCardAwaits);
        Outcome::Matched
    }

    fn resolve_mismatch(&mut self) -> Outcome {
        self.transition(GameState::CardsMatchFailed);
        if let Some((first, second)) = self.model.revealed.pair() {
            self.presenter
                .flash_mismatch(first, second, self.config.flash_duration_ms);
        }
        self.pending_reset = Some(self.scheduler.schedule(self.config.reset_delay_ms));
        Outcome::Mismatched
    }

    /// Advances virtual time, running the deferred reset once it is due.
    pub fn tick(&mut self, dt_ms: f64) {
        if self.paused {
            return;
        }
        if self.scheduler.advance(dt_ms) {
            self.pending_reset = None;
            self.reset_cards();
        }
    }

    fn reset_cards(&mut self) {
        if self.state != GameState::CardsMatchFailed {
            log::warn!("reset fired in state {}", self.state);
            return;
        }
        let revealed: Vec<usize> = self.model.revealed.iter().collect();
        for position in revealed {
            self.model.board.set_face(position, Face::Down);
            self.presenter.conceal_card(position);
        }
        self.model.revealed.clear();
        self.transition(GameState::FirstCardAwaits);
    }

    fn reveal(&mut self, position: usize) {
        if let Some(card) = self.model.board.card(position) {
            self.model.board.set_face(position, Face::Up);
            self.presenter.reveal_card(position, &card.face());
        }
    }

    fn transition(&mut self, next: GameState) {
        log::debug!("{} -> {}", self.state, next);
        self.state = next;
    }

    /// Deals a fresh game, dropping any pending reset.
    pub fn restart(&mut self) {
        if let Some(token) = self.pending_reset.take() {
            self.scheduler.cancel(token);
        }
        self.paused = false;
        self.deal();
        log::info!("game restarted");
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.model.score
    }

    pub fn tried_times(&self) -> u32 {
        self.model.tried_times
    }

    pub fn revealed_len(&self) -> usize {
        self.model.revealed.len()
    }

    pub fn board(&self) -> &Board {
        &self.model.board
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn snapshot(&self) -> Snapshot {
        let cards = self
            .model
            .board
            .slots()
            .iter()
            .enumerate()
            .map(|(position, slot)| CardView {
                position,
                face: (slot.face != Face::Down).then(|| slot.card.face()),
                paired: slot.face == Face::Paired,
            })
            .collect();
        Snapshot {
            state: self.state,
            score: self.model.score,
            tried_times: self.model.tried_times,
            paused: self.paused,
            cards,
        }
    }
}
