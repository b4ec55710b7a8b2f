pub mod card;
pub mod clock;
pub mod config;
pub mod controller;
pub mod error;
pub mod model;
pub mod presenter;
pub mod shuffle;

pub use card::{Card, CardFace, Suit, DECK_SIZE, PAIR_COUNT};
pub use config::GameConfig;
pub use controller::{GameSession, GameState, Outcome, Snapshot};
pub use error::GameError;
pub use presenter::{NullPresenter, Presenter};

use js_sys::{Array, Function, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

struct ConsoleLogger;

impl ::log::Log for ConsoleLogger {
    fn enabled(&self, _metadata: &::log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &::log::Record) {
        log(&format!("[{}] {}", record.level(), record.args()));
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger;

/// Routes the crate's log output to the browser console. Safe to call more
/// than once.
#[wasm_bindgen]
pub fn init_logging() {
    if ::log::set_logger(&LOGGER).is_ok() {
        ::log::set_max_level(::log::LevelFilter::Debug);
    }
}

/// Forwards view updates to a JS object.
///
/// Each call looks up a method of the same name in camelCase on the object;
/// missing methods are skipped and exceptions are logged, never propagated
/// into the game.
pub struct JsPresenter {
    view: JsValue,
}

impl JsPresenter {
    pub fn new(view: JsValue) -> Self {
        Self { view }
    }

    fn call(&self, name: &str, args: &[JsValue]) {
        if self.view.is_undefined() || self.view.is_null() {
            return;
        }
        let Ok(method) = Reflect::get(&self.view, &JsValue::from_str(name)) else {
            return;
        };
        let Some(function) = method.dyn_ref::<Function>() else {
            return;
        };
        let args: Array = args.iter().collect();
        if let Err(err) = function.apply(&self.view, &args) {
            ::log::warn!("view.{name} threw {err:?}");
        }
    }
}

fn position(position: usize) -> JsValue {
    JsValue::from_f64(position as f64)
}

impl Presenter for JsPresenter {
    fn render_deck(&mut self, order: &[CardFace]) {
        match serde_wasm_bindgen::to_value(&order) {
            Ok(order) => self.call("renderDeck", &[order]),
            Err(err) => ::log::warn!("could not encode deck: {err}"),
        }
    }

    fn reveal_card(&mut self, pos: usize, face: &CardFace) {
        let face = serde_wasm_bindgen::to_value(face).unwrap_or(JsValue::UNDEFINED);
        self.call("revealCard", &[position(pos), face]);
    }

    fn conceal_card(&mut self, pos: usize) {
        self.call("concealCard", &[position(pos)]);
    }

    fn mark_paired(&mut self, first: usize, second: usize) {
        self.call("markPaired", &[position(first), position(second)]);
    }

    fn flash_mismatch(&mut self, first: usize, second: usize, duration_ms: u32) {
        self.call(
            "flashMismatch",
            &[position(first), position(second), JsValue::from(duration_ms)],
        );
    }

    fn update_score(&mut self, score: u32) {
        self.call("updateScore", &[JsValue::from(score)]);
    }

    fn update_attempts(&mut self, attempts: u32) {
        self.call("updateAttempts", &[JsValue::from(attempts)]);
    }

    fn show_completion(&mut self, score: u32, attempts: u32) {
        self.call(
            "showCompletion",
            &[JsValue::from(score), JsValue::from(attempts)],
        );
    }
}

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen]
pub struct Game {
    session: GameSession<JsPresenter>,
}

#[wasm_bindgen]
impl Game {
    /// Deals a new game drawing into `view`. `config` may be `undefined` or
    /// a partial [`GameConfig`] object.
    pub fn new(view: JsValue, config: JsValue) -> Result<Game, JsValue> {
        init_logging();
        let config: GameConfig = if config.is_undefined() || config.is_null() {
            GameConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(to_js_error)?
        };
        let session = GameSession::new(config, JsPresenter::new(view)).map_err(to_js_error)?;
        Ok(Game { session })
    }

    /// The user clicked the card at `position`. Returns the outcome name.
    pub fn select(&mut self, position: usize) -> Result<String, JsValue> {
        let outcome = self.session.select(position).map_err(to_js_error)?;
        Ok(format!("{outcome:?}"))
    }

    /// Advances the game clock by `dt_ms` milliseconds.
    pub fn tick(&mut self, dt_ms: f64) {
        self.session.tick(dt_ms);
    }

    pub fn restart(&mut self) {
        self.session.restart();
    }

    pub fn pause(&mut self) {
        self.session.pause();
    }

    pub fn resume(&mut self) {
        self.session.resume();
    }

    pub fn is_paused(&self) -> bool {
        self.session.is_paused()
    }

    pub fn get_score(&self) -> u32 {
        self.session.score()
    }

    pub fn get_tried_times(&self) -> u32 {
        self.session.tried_times()
    }

    pub fn get_state(&self) -> String {
        self.session.state().to_string()
    }

    pub fn is_finished(&self) -> bool {
        self.session.state() == GameState::GameFinished
    }

    pub fn get_cards(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.session.snapshot()).map_err(to_js_error)
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use js_sys::Object;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn seeded_config(seed: u32) -> JsValue {
        let config = Object::new();
        Reflect::set(&config, &"seed".into(), &JsValue::from(seed)).unwrap();
        config.into()
    }

    fn recording_view() -> JsValue {
        let view = Object::new();
        let methods = [
            ("updateScore", "score", "this.score = score;"),
            ("updateAttempts", "attempts", "this.attempts = attempts;"),
            ("concealCard", "position", "this.concealed = (this.concealed || 0) + 1;"),
        ];
        for (name, arg, body) in methods {
            let function = Function::new_with_args(arg, body);
            Reflect::set(&view, &name.into(), &function).unwrap();
        }
        view.into()
    }

    fn pos(game: &Game, index: usize) -> usize {
        game.session
            .board()
            .position_of(Card::new(index).unwrap())
            .unwrap()
    }

    fn get(view: &JsValue, key: &str) -> Option<f64> {
        Reflect::get(view, &key.into()).unwrap().as_f64()
    }

    #[wasm_bindgen_test]
    fn test_match_updates_view() {
        let view = recording_view();
        let mut game = Game::new(view.clone(), seeded_config(9)).unwrap();
        let (a, b) = (pos(&game, 0), pos(&game, 13));
        assert_eq!(game.select(a).unwrap(), "Revealed");
        assert_eq!(game.select(b).unwrap(), "Matched");
        assert_eq!(game.get_score(), 10);
        assert_eq!(get(&view, "score"), Some(10.0));
        assert_eq!(get(&view, "attempts"), Some(1.0));
    }

    #[wasm_bindgen_test]
    fn test_mismatch_flips_back_on_tick() {
        let view = recording_view();
        let mut game = Game::new(view.clone(), seeded_config(9)).unwrap();
        let (a, b) = (pos(&game, 0), pos(&game, 1));
        game.select(a).unwrap();
        assert_eq!(game.select(b).unwrap(), "Mismatched");
        assert_eq!(game.get_state(), "CardsMatchFailed");
        game.tick(500.0);
        assert_eq!(game.get_state(), "CardsMatchFailed");
        game.tick(500.0);
        assert_eq!(game.get_state(), "FirstCardAwaits");
        assert_eq!(get(&view, "concealed"), Some(2.0));
    }

    #[wasm_bindgen_test]
    fn test_fractional_frames_flip_back() {
        let mut game = Game::new(JsValue::UNDEFINED, seeded_config(9)).unwrap();
        let (a, b) = (pos(&game, 0), pos(&game, 1));
        game.select(a).unwrap();
        game.select(b).unwrap();
        for _ in 0..60 {
            game.tick(1000.0 / 60.0);
        }
        assert_eq!(game.get_state(), "FirstCardAwaits");
    }

    #[wasm_bindgen_test]
    fn test_out_of_range_selection_errors() {
        let mut game = Game::new(JsValue::UNDEFINED, JsValue::UNDEFINED).unwrap();
        assert!(game.select(52).is_err());
        assert_eq!(game.get_tried_times(), 0);
    }

    #[wasm_bindgen_test]
    fn test_view_without_methods_is_fine() {
        let mut game = Game::new(Object::new().into(), JsValue::UNDEFINED).unwrap();
        game.select(0).unwrap();
        let cards: Snapshot = serde_wasm_bindgen::from_value(game.get_cards().unwrap()).unwrap();
        assert_eq!(cards.cards.len(), DECK_SIZE);
        assert_eq!(cards.state, GameState::SecondCardAwaits);
    }

    #[wasm_bindgen_test]
    fn test_invalid_config_is_rejected() {
        let config = Object::new();
        Reflect::set(&config, &"match_reward".into(), &JsValue::from(0)).unwrap();
        assert!(Game::new(JsValue::UNDEFINED, config.into()).is_err());
    }
}
