//! Card model: typed card variants, arena, pool and catalog import.
//!
//! ## Key Types
//!
//! - `Card`: common header plus a `CardKind` payload
//! - `CardKind`: Champion, Crystal, Gear, Class, Action or Order
//! - `CardArena`: owner of every card in a game, keyed by `CardGuid`
//! - `CardPool`: the deck builder's collection of unowned cards
//!
//! ## Predicates
//!
//! `is_champion`, `is_crystal`, `is_summoning`, `is_gear`, `is_class`,
//! `is_action`, `is_order` and `check_card_type` discriminate cards by their
//! `kind` tag.

pub mod action;
pub mod arena;
pub mod card;
pub mod catalog;
pub mod champion;
pub mod equipment;
pub mod order;
pub mod pool;
pub mod starter;

pub use action::{
    ActionCard, ActionType, DamageModifier, DamageTerm, DefensePool, DistanceRange, HitArea,
    StatRequirement, TargetDirection,
};
pub use arena::CardArena;
pub use card::{
    check_card_type, is_action, is_champion, is_class, is_crystal, is_gear, is_order,
    is_summoning, Card, CardKind, CardType,
};
pub use catalog::{cards_json_to_objects, CatalogError};
pub use champion::{Champion, Crystal, EquipmentSlot, Stat, StatBlock};
pub use equipment::{BodyPart, ClassCard, Gear};
pub use order::{DiscardRequirement, DrawCondition, OrderCard, OrderReward};
pub use pool::CardPool;
pub use starter::{starter_catalog, starter_pool, STARTER_CATALOG_JSON};
