//! Gear and Class upgrade cards.

use serde::{Deserialize, Serialize};

use super::champion::StatBlock;

/// Where a piece of gear is worn.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
    strum_macros::Display, strum_macros::EnumString,
)]
pub enum BodyPart {
    #[default]
    Hand,
    Body,
}

/// Equipment providing stat deltas.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Gear {
    pub deltas: StatBlock,
    pub body_part: BodyPart,
    /// Free-form category ("Sword", "Staff", ...) checked by action gates.
    pub category: String,
}

impl Gear {
    #[must_use]
    pub fn new(body_part: BodyPart, category: impl Into<String>, deltas: StatBlock) -> Self {
        Self {
            deltas,
            body_part,
            category: category.into(),
        }
    }
}

/// Class upgrade: changes a champion's class and grants one learned action.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClassCard {
    /// Class granted by the upgrade.
    pub class_name: String,
    /// Class the champion must currently have.
    pub required_class_name: String,
    pub deltas: StatBlock,
    /// Name of the action card bound on upgrade.
    pub learned_action: Option<String>,
}

impl ClassCard {
    #[must_use]
    pub fn new(
        class_name: impl Into<String>,
        required_class_name: impl Into<String>,
        deltas: StatBlock,
    ) -> Self {
        Self {
            class_name: class_name.into(),
            required_class_name: required_class_name.into(),
            deltas,
            learned_action: None,
        }
    }

    /// Set the granted action (builder pattern).
    #[must_use]
    pub fn with_learned_action(mut self, name: impl Into<String>) -> Self {
        self.learned_action = Some(name.into());
        self
    }
}
