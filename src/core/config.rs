//! Rules configuration.
//!
//! A `RulesConfig` fixes the board geometry and the per-turn resource
//! budgets of a match. It is stored inside `Game` so that a remote peer
//! rebuilding state from a snapshot applies the same limits.

use serde::{Deserialize, Serialize};

/// Rules and board configuration for one match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Number of board rows.
    pub board_rows: i32,

    /// Number of board columns.
    pub board_cols: i32,

    /// Rows at each end of the board where a player may summon.
    pub home_rows: i32,

    /// Stamina a champion recovers at its owner's turn refresh.
    pub max_stamina: u32,

    /// Summons granted at each turn refresh.
    pub summons_per_turn: u32,

    /// Class upgrades a player may play per turn.
    pub class_upgrades_per_turn: u32,

    /// Cards drawn by the initial draw.
    pub initial_hand_size: usize,

    /// Cards drawn by the turn draw.
    pub turn_draw_count: usize,

    /// Maximum copies of one card name in a deck.
    pub max_copies_per_card: usize,

    /// Hit points of each crystal.
    pub crystal_hp: i32,

    /// Seed for deck shuffles and random card effects.
    pub seed: u64,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            board_rows: 7,
            board_cols: 5,
            home_rows: 2,
            max_stamina: 2,
            summons_per_turn: 1,
            class_upgrades_per_turn: 1,
            initial_hand_size: 5,
            turn_draw_count: 1,
            max_copies_per_card: 3,
            crystal_hp: 20,
            seed: 42,
        }
    }
}

impl RulesConfig {
    /// Set the board size.
    #[must_use]
    pub fn with_board(mut self, rows: i32, cols: i32) -> Self {
        assert!(rows >= 2 * self.home_rows, "Board must fit both home areas");
        assert!(cols > 0, "Board needs at least one column");
        self.board_rows = rows;
        self.board_cols = cols;
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the initial hand size.
    #[must_use]
    pub fn with_initial_hand_size(mut self, size: usize) -> Self {
        self.initial_hand_size = size;
        self
    }

    /// Set the crystal hit points.
    #[must_use]
    pub fn with_crystal_hp(mut self, hp: i32) -> Self {
        self.crystal_hp = hp;
        self
    }

    /// Row holding a player's crystal.
    #[must_use]
    pub fn base_row(&self, player: super::PlayerId) -> i32 {
        if player.index() == 0 {
            self.board_rows - 1
        } else {
            0
        }
    }

    /// Check whether `row` is inside a player's home area.
    ///
    /// Player 0 owns the last `home_rows` rows, player 1 the first ones.
    #[must_use]
    pub fn is_home_row(&self, player: super::PlayerId, row: i32) -> bool {
        if player.index() == 0 {
            row >= self.board_rows - self.home_rows && row < self.board_rows
        } else {
            row >= 0 && row < self.home_rows
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;

    #[test]
    fn test_default_config() {
        let config = RulesConfig::default();
        assert_eq!(config.max_stamina, 2);
        assert_eq!(config.summons_per_turn, 1);
        assert_eq!(config.max_copies_per_card, 3);
        assert_eq!((config.board_rows, config.board_cols), (7, 5));
    }

    #[test]
    fn test_builder_pattern() {
        let config = RulesConfig::default()
            .with_board(9, 6)
            .with_seed(123)
            .with_initial_hand_size(4)
            .with_crystal_hp(10);

        assert_eq!(config.board_rows, 9);
        assert_eq!(config.board_cols, 6);
        assert_eq!(config.seed, 123);
        assert_eq!(config.initial_hand_size, 4);
        assert_eq!(config.crystal_hp, 10);
    }

    #[test]
    #[should_panic(expected = "Board must fit both home areas")]
    fn test_board_too_small() {
        let _ = RulesConfig::default().with_board(3, 5);
    }

    #[test]
    fn test_home_rows() {
        let config = RulesConfig::default();
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);

        assert!(config.is_home_row(p0, 6));
        assert!(config.is_home_row(p0, 5));
        assert!(!config.is_home_row(p0, 4));
        assert!(config.is_home_row(p1, 0));
        assert!(config.is_home_row(p1, 1));
        assert!(!config.is_home_row(p1, 2));

        assert_eq!(config.base_row(p0), 6);
        assert_eq!(config.base_row(p1), 0);
    }

    #[test]
    fn test_serialization() {
        let config = RulesConfig::default().with_seed(7);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: RulesConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
