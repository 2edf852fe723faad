//! Core engine types: card ids, players, game state, action records, RNG,
//! configuration.

pub mod action;
pub mod config;
pub mod entity;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{ActionRecord, RecordKind};
pub use config::RulesConfig;
pub use entity::{CardGuid, GuidAllocator};
pub use player::{Player, PlayerEffect, PlayerEffectKind, PlayerId, PlayerMap, PLAYER_COUNT};
pub use rng::{GameRng, GameRngState, RandomSource};
pub use state::{Game, GameStatus};
