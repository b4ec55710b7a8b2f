use crate::card::CardFace;

/// What the game asks of the view.
///
/// Cards are referred to by board position. The game never reads anything
/// back from the view; it keeps its own record of which cards are up.
pub trait Presenter {
    /// Lays out the deck face down, in dealing order.
    fn render_deck(&mut self, order: &[CardFace]);
    fn reveal_card(&mut self, position: usize, face: &CardFace);
    fn conceal_card(&mut self, position: usize);
    fn mark_paired(&mut self, first: usize, second: usize);
    /// Plays the wrong-pair cue. The view clears it on its own after
    /// `duration_ms`.
    fn flash_mismatch(&mut self, first: usize, second: usize, duration_ms: u32);
    fn update_score(&mut self, score: u32);
    fn update_attempts(&mut self, attempts: u32);
    fn show_completion(&mut self, score: u32, attempts: u32);
}

/// A view that draws nothing, for headless play.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn render_deck(&mut self, _order: &[CardFace]) {}
    fn reveal_card(&mut self, _position: usize, _face: &CardFace) {}
    fn conceal_card(&mut self, _position: usize) {}
    fn mark_paired(&mut self, _first: usize, _second: usize) {}
    fn flash_mismatch(&mut self, _first: usize, _second: usize, _duration_ms: u32) {}
    fn update_score(&mut self, _score: u32) {}
    fn update_attempts(&mut self, _attempts: u32) {}
    fn show_completion(&mut self, _score: u32, _attempts: u32) {}
}
