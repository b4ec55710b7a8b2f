use crate::card::PAIR_COUNT;
use crate::error::GameError;
use serde::{Deserialize, Serialize};

/// Tunable constants of a game.
///
/// Every field has a default, so the browser can pass a partial object
/// (or nothing at all).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct GameConfig {
    /// Points added to the score for each matched pair.
    pub match_reward: u32,
    /// How long mismatched cards stay face up before flipping back.
    pub reset_delay_ms: u32,
    /// Length of the wrong-pair animation, forwarded to the view.
    pub flash_duration_ms: u32,
    /// Fixed seed for the deal; `None` deals from entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            match_reward: 10,
            reset_delay_ms: 1000,
            flash_duration_ms: 500,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Score at which every pair has been found.
    pub fn win_score(&self) -> u32 {
        PAIR_COUNT as u32 * self.match_reward
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.match_reward == 0 {
            return Err(GameError::InvalidConfig(
                "match_reward must be greater than zero".to_string(),
            ));
        }
        if self.match_reward.checked_mul(PAIR_COUNT as u32).is_none() {
            return Err(GameError::InvalidConfig(format!(
                "match_reward {} overflows the winning score",
                self.match_reward
            )));
        }
        Ok(())
    }
}
