//! Action cards: targeting rules and damage, heal and effect payloads.
//!
//! ## Damage terms
//!
//! An action's damage is the sum of its `damages` terms. Each term reads one
//! of the attacker's derived stats (or nothing) and combines it with its
//! modifier. Terms keep their source stat so the resolver can route
//! Str-sourced damage through armor and Int-sourced damage through mental.
//!
//! ## Innate actions
//!
//! Every champion can `Step` and `BasicHit` without holding a card;
//! [`ActionCard::step`] and [`ActionCard::basic_hit`] build those templates.

use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

use super::champion::{Stat, StatBlock};
use crate::effects::StatusEffect;

/// Broad category of an action.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
    strum_macros::Display, strum_macros::EnumString,
)]
pub enum ActionType {
    /// Movement.
    Step,
    #[default]
    Melee,
    Ranged,
    Magic,
    Support,
}

impl ActionType {
    /// Everything but movement resolves against a target card.
    #[must_use]
    pub fn is_attack(self) -> bool {
        self != ActionType::Step
    }
}

/// How a damage term combines its stat with `modifier_value`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageModifier {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "*")]
    Multiply,
}

/// Which defensive pool absorbs a damage term.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DefensePool {
    Armor,
    Mental,
}

/// One summand of an action's damage.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DamageTerm {
    pub stat: Option<Stat>,
    pub modifier: Option<DamageModifier>,
    pub modifier_value: i32,
}

impl DamageTerm {
    /// A term equal to the attacker's stat.
    #[must_use]
    pub fn of(stat: Stat) -> Self {
        Self {
            stat: Some(stat),
            modifier: None,
            modifier_value: 0,
        }
    }

    /// A flat amount not tied to any stat.
    #[must_use]
    pub fn flat(value: i32) -> Self {
        Self {
            stat: None,
            modifier: Some(DamageModifier::Add),
            modifier_value: value,
        }
    }

    #[must_use]
    pub fn plus(mut self, value: i32) -> Self {
        self.modifier = Some(DamageModifier::Add);
        self.modifier_value = value;
        self
    }

    #[must_use]
    pub fn times(mut self, value: i32) -> Self {
        self.modifier = Some(DamageModifier::Multiply);
        self.modifier_value = value;
        self
    }

    /// Evaluate the term against the attacker's derived stats.
    #[must_use]
    pub fn value(&self, attacker: &StatBlock) -> i32 {
        let base = self.stat.map_or(0, |s| attacker.get(s));
        match self.modifier {
            None => base,
            Some(DamageModifier::Add) => base + self.modifier_value,
            Some(DamageModifier::Multiply) => base * self.modifier_value,
        }
    }

    /// Pool that mitigates this term, if any.
    #[must_use]
    pub fn defense_pool(&self) -> Option<DefensePool> {
        match self.stat {
            Some(Stat::Str) => Some(DefensePool::Armor),
            Some(Stat::Int) => Some(DefensePool::Mental),
            _ => None,
        }
    }
}

/// Inclusive Manhattan distance range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DistanceRange {
    pub min: u32,
    pub max: u32,
}

impl DistanceRange {
    #[must_use]
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn contains(&self, distance: u32) -> bool {
        self.min <= distance && distance <= self.max
    }
}

impl Default for DistanceRange {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

/// Direction constraint between source and target.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
    strum_macros::Display, strum_macros::EnumString,
)]
pub enum TargetDirection {
    /// Same row or same column.
    #[default]
    Straight,
    Any,
}

/// Lateral cells added to the target set at a given ray distance.
///
/// Offsets are perpendicular to the ray: columns for vertical rays, rows for
/// horizontal ones.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitArea {
    pub distance: u32,
    pub offsets: SmallVec<[i32; 2]>,
}

impl HitArea {
    /// One cell on each side of the ray at `distance`.
    #[must_use]
    pub fn sweep(distance: u32) -> Self {
        Self {
            distance,
            offsets: smallvec![-1, 1],
        }
    }
}

/// Minimum stat value needed to attach an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatRequirement {
    pub stat: Stat,
    pub value: i32,
}

/// A combat or utility maneuver.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ActionCard {
    pub action_type: ActionType,
    pub damages: Vec<DamageTerm>,
    pub distance: DistanceRange,
    pub direction: TargetDirection,
    pub hit_areas: Vec<HitArea>,

    pub is_heal: bool,
    /// Ignores blockers along the path.
    pub is_free_targeting: bool,
    /// Only usable from behind the target.
    pub is_back_targeting: bool,

    pub is_repeatable: bool,
    /// Stat whose value grants extra uses per turn.
    pub repeatable_stat: Option<Stat>,

    pub required_class_name: Option<String>,
    pub required_stat: Option<StatRequirement>,
    pub required_gear_category: Option<String>,

    /// Status effects applied to the target after damage or heal.
    pub target_effects: Vec<StatusEffect>,

    /// Set once the action is used this turn.
    pub was_played: bool,
    /// Remaining free uses this turn for repeatable actions.
    pub repeatable_activation_left: u32,
}

impl ActionCard {
    /// Create an action with default targeting (distance 1, straight).
    #[must_use]
    pub fn new(action_type: ActionType) -> Self {
        Self {
            action_type,
            ..Self::default()
        }
    }

    /// Innate movement. Distance is bounded by the champion's dexterity at
    /// resolution time.
    #[must_use]
    pub fn step() -> Self {
        Self::new(ActionType::Step)
    }

    /// Innate adjacent strike dealing the attacker's strength.
    #[must_use]
    pub fn basic_hit() -> Self {
        Self::new(ActionType::Melee).with_damage(DamageTerm::of(Stat::Str))
    }

    #[must_use]
    pub fn with_damage(mut self, term: DamageTerm) -> Self {
        self.damages.push(term);
        self
    }

    #[must_use]
    pub fn with_distance(mut self, min: u32, max: u32) -> Self {
        self.distance = DistanceRange::new(min, max);
        self
    }

    #[must_use]
    pub fn with_direction(mut self, direction: TargetDirection) -> Self {
        self.direction = direction;
        self
    }

    #[must_use]
    pub fn with_hit_area(mut self, area: HitArea) -> Self {
        self.hit_areas.push(area);
        self
    }

    #[must_use]
    pub fn with_target_effect(mut self, effect: StatusEffect) -> Self {
        self.target_effects.push(effect);
        self
    }

    #[must_use]
    pub fn heal(mut self) -> Self {
        self.is_heal = true;
        self
    }

    #[must_use]
    pub fn free_targeting(mut self) -> Self {
        self.is_free_targeting = true;
        self
    }

    #[must_use]
    pub fn back_targeting(mut self) -> Self {
        self.is_back_targeting = true;
        self
    }

    #[must_use]
    pub fn repeatable(mut self, stat: Stat) -> Self {
        self.is_repeatable = true;
        self.repeatable_stat = Some(stat);
        self
    }

    #[must_use]
    pub fn requires_class(mut self, class_name: impl Into<String>) -> Self {
        self.required_class_name = Some(class_name.into());
        self
    }

    #[must_use]
    pub fn requires_stat(mut self, stat: Stat, value: i32) -> Self {
        self.required_stat = Some(StatRequirement { stat, value });
        self
    }

    #[must_use]
    pub fn requires_gear(mut self, category: impl Into<String>) -> Self {
        self.required_gear_category = Some(category.into());
        self
    }

    /// Sum of all damage terms for an attacker, before mitigation.
    #[must_use]
    pub fn raw_damage(&self, attacker: &StatBlock) -> i32 {
        self.damages.iter().map(|t| t.value(attacker)).sum()
    }

    /// Clear the per-turn usage flags.
    pub fn refresh(&mut self) {
        self.was_played = false;
        self.repeatable_activation_left = 0;
    }
}
