//! Game rules: action resolvers, the controller and UI queries.
//!
//! ## Key Types
//!
//! - `ActionRef`: which action a champion performs (innate, learned or
//!   attached)
//! - `PlayerAction`: a player meta-action with its payload
//! - `RuleViolation`: why an action was rejected
//! - `GameResult`: outcome of a finished game
//!
//! Callers go through `controller`, which runs every resolver on a working
//! copy and commits it only on success.

pub mod champion;
pub mod controller;
pub mod error;
pub mod player;
pub mod queries;

pub use champion::{
    bury_dead_champions, deal_damage, heal, kill_champion, resolve_champion_action, ActionRef,
    ChampionOutcome, InnateAction,
};
pub use controller::{
    champion_action, is_terminal, new_game, player_action, start_game, transact, GameResult,
    PlayerSetup,
};
pub use error::RuleViolation;
pub use player::{refresh_player, resolve_player_action, PlayerAction, PlayerActionKind};
pub use queries::{
    get_champions_actions_allowed_board_locations, get_player_actions_allowed_board_locations,
    get_player_allowed_hand_card_select, get_summon_board_locations, HandSelect,
};
