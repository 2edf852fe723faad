//! Action log records.
//!
//! Every resolved action appends an `ActionRecord` to the acting player's
//! log. The log drives:
//! - Repeatable-action budgets (uses counted per turn)
//! - Class-upgrade budgets
//! - The UI action log and multiplayer replay

use serde::{Deserialize, Serialize};

use super::entity::CardGuid;
use super::player::PlayerId;
use crate::board::Location;

/// Which resolver produced a record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    /// A champion moved or used an action card.
    Champion,
    /// A player meta-action (draw, summon, equip, ...).
    Player,
}

/// A resolved action with ordering metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: PlayerId,

    /// Resolver that produced the record.
    pub kind: RecordKind,

    /// Action name ("Step", "BasicHit", an action card name, "Summon", ...).
    pub name: String,

    /// The card the action was performed with, if any.
    pub card: Option<CardGuid>,

    /// Board location the action started from.
    pub source: Option<Location>,

    /// Board location the action targeted.
    pub target: Option<Location>,

    /// Turn number when the action was taken.
    pub turn: u32,

    /// Logical timestamp, monotonic across the whole game.
    pub timestamp: u64,
}

impl ActionRecord {
    /// Create a record for a player meta-action.
    #[must_use]
    pub fn player(player: PlayerId, name: impl Into<String>, turn: u32, timestamp: u64) -> Self {
        Self {
            player,
            kind: RecordKind::Player,
            name: name.into(),
            card: None,
            source: None,
            target: None,
            turn,
            timestamp,
        }
    }

    /// Create a record for a champion action.
    #[must_use]
    pub fn champion(
        player: PlayerId,
        name: impl Into<String>,
        source: Location,
        target: Location,
        turn: u32,
        timestamp: u64,
    ) -> Self {
        Self {
            player,
            kind: RecordKind::Champion,
            name: name.into(),
            card: None,
            source: Some(source),
            target: Some(target),
            turn,
            timestamp,
        }
    }

    /// Attach the card used (builder pattern).
    #[must_use]
    pub fn with_card(mut self, card: CardGuid) -> Self {
        self.card = Some(card);
        self
    }

    /// Attach a target location (builder pattern).
    #[must_use]
    pub fn with_target(mut self, target: Location) -> Self {
        self.target = Some(target);
        self
    }
}
