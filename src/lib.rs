//! # crystal-tactics
//!
//! Rules engine for a two-player tactical card and board game. Players
//! build decks of champions, gear, class upgrades, actions and orders,
//! summon champions onto a grid and fight until one side's crystal falls.
//!
//! ## Design Principles
//!
//! 1. **Pure state transitions**: every action validates against a `Game`
//!    and either mutates it completely or returns a `RuleViolation` and
//!    leaves it untouched.
//!
//! 2. **Deterministic and serializable**: the RNG position lives inside the
//!    game, so a peer that receives a snapshot replays identical shuffles
//!    and gear breaks.
//!
//! 3. **One arena, keyed zones**: every card lives in a `CardArena`; hands,
//!    decks, board cells and champion slots hold `CardGuid` keys, and each
//!    card is in exactly one zone.
//!
//! ## Architecture
//!
//! - **Copy-validate-commit**: the controller runs each action on a clone
//!   and commits it on success. Persistent collections (`im`) make the
//!   clone O(1).
//!
//! ## Modules
//!
//! - `core`: card ids, players, game state, action records, RNG, configuration
//! - `cards`: card variants, arena, deck-builder pool, catalog import
//! - `board`: locations, distance, direction, targeting and blocking
//! - `effects`: derived stats, status effects, repeatable actions
//! - `zones`: card location queries and the single-zone invariant
//! - `rules`: champion and player action resolvers, controller, queries
//! - `snapshot`: JSON and binary encoding of a game

pub mod core;
pub mod cards;
pub mod board;
pub mod effects;
pub mod zones;
pub mod rules;
pub mod snapshot;

// Re-export commonly used types
pub use crate::core::{
    CardGuid, GuidAllocator, PlayerId, PlayerMap,
    GameRng, GameRngState, RandomSource,
    RulesConfig, ActionRecord,
    Game, GameStatus, Player,
};

pub use crate::cards::{Card, CardArena, CardKind, CardPool, CardType};

pub use crate::board::{Board, Direction, Location};

pub use crate::rules::{
    champion_action, player_action, new_game, start_game, is_terminal,
    ActionRef, InnateAction, PlayerAction, PlayerSetup,
    ChampionOutcome, GameResult, RuleViolation,
};

pub use crate::zones::{check_single_zone, Zone};
