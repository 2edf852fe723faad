//! Champion and Crystal cards, plus the stat primitives they share with
//! equipment.

use serde::{Deserialize, Serialize};

use crate::board::Direction;
use crate::core::CardGuid;
use crate::effects::{StatusEffect, StatusEffectName};

/// A champion statistic.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize,
    strum_macros::Display, strum_macros::EnumString,
)]
pub enum Stat {
    Str,
    Dex,
    Int,
    Hp,
}

/// A set of stat values: base stats, derived stats, or equipment deltas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct StatBlock {
    #[serde(rename = "str")]
    pub strength: i32,
    #[serde(rename = "dex")]
    pub dexterity: i32,
    #[serde(rename = "int")]
    pub intelligence: i32,
    pub hp: i32,
}

impl StatBlock {
    /// Create a stat block.
    #[must_use]
    pub const fn new(strength: i32, dexterity: i32, intelligence: i32, hp: i32) -> Self {
        Self { strength, dexterity, intelligence, hp }
    }

    /// Read one stat.
    #[must_use]
    pub fn get(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Str => self.strength,
            Stat::Dex => self.dexterity,
            Stat::Int => self.intelligence,
            Stat::Hp => self.hp,
        }
    }

    /// Mutable access to one stat.
    pub fn get_mut(&mut self, stat: Stat) -> &mut i32 {
        match stat {
            Stat::Str => &mut self.strength,
            Stat::Dex => &mut self.dexterity,
            Stat::Int => &mut self.intelligence,
            Stat::Hp => &mut self.hp,
        }
    }

    /// Floor every stat at zero.
    #[must_use]
    pub fn floored(self) -> Self {
        Self {
            strength: self.strength.max(0),
            dexterity: self.dexterity.max(0),
            intelligence: self.intelligence.max(0),
            hp: self.hp.max(0),
        }
    }
}

impl std::ops::Add for StatBlock {
    type Output = StatBlock;

    fn add(self, rhs: StatBlock) -> StatBlock {
        StatBlock {
            strength: self.strength + rhs.strength,
            dexterity: self.dexterity + rhs.dexterity,
            intelligence: self.intelligence + rhs.intelligence,
            hp: self.hp + rhs.hp,
        }
    }
}

impl std::ops::AddAssign for StatBlock {
    fn add_assign(&mut self, rhs: StatBlock) {
        *self = *self + rhs;
    }
}

/// Equipment slot on a champion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipmentSlot {
    Body,
    LeftHand,
    RightHand,
}

/// A summonable unit.
///
/// `base` comes from the card; `cal` is derived by the stat engine from base
/// stats, equipment, class upgrade and status effects. `armor` and `mental`
/// are damage pools refreshed from `cal` only at the owner's turn refresh.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Champion {
    pub base: StatBlock,
    pub cal: StatBlock,
    pub armor: i32,
    pub mental: i32,
    pub stm: u32,
    pub current_hp: i32,

    /// Class printed on the card.
    pub class_name: String,
    /// Current class after upgrades.
    pub cal_class: String,

    pub body: Option<CardGuid>,
    pub left_hand: Option<CardGuid>,
    pub right_hand: Option<CardGuid>,
    pub upgrade: Option<CardGuid>,

    /// Names of actions this champion learns when summoned.
    pub learned_actions: Vec<String>,
    pub learned_actions_cards: Vec<CardGuid>,
    /// Entry of `learned_actions_cards` granted by the class upgrade.
    pub class_action_card: Option<CardGuid>,
    pub attached_actions_cards: Vec<CardGuid>,

    pub status_effects: Vec<StatusEffect>,
    pub direction: Direction,
    pub is_blocking: bool,
}

impl Champion {
    /// Create a champion with base stats and a class; derived stats start
    /// equal to the base stats.
    #[must_use]
    pub fn new(class_name: impl Into<String>, base: StatBlock) -> Self {
        let class_name = class_name.into();
        let base_floored = base.floored();
        Self {
            base,
            cal: base_floored,
            armor: base_floored.strength,
            mental: base_floored.intelligence,
            stm: 0,
            current_hp: base_floored.hp,
            cal_class: class_name.clone(),
            class_name,
            is_blocking: true,
            ..Self::default()
        }
    }

    /// Add learned action names (builder pattern).
    #[must_use]
    pub fn with_learned_actions<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.learned_actions.extend(names.into_iter().map(Into::into));
        self
    }

    /// Derived value of a stat.
    #[must_use]
    pub fn stat(&self, stat: Stat) -> i32 {
        self.cal.get(stat)
    }

    /// Maximum hit points.
    #[must_use]
    pub fn cal_hp(&self) -> i32 {
        self.cal.hp
    }

    /// Gear key held in a slot.
    #[must_use]
    pub fn slot(&self, slot: EquipmentSlot) -> Option<CardGuid> {
        match slot {
            EquipmentSlot::Body => self.body,
            EquipmentSlot::LeftHand => self.left_hand,
            EquipmentSlot::RightHand => self.right_hand,
        }
    }

    /// Mutable access to a slot.
    pub fn slot_mut(&mut self, slot: EquipmentSlot) -> &mut Option<CardGuid> {
        match slot {
            EquipmentSlot::Body => &mut self.body,
            EquipmentSlot::LeftHand => &mut self.left_hand,
            EquipmentSlot::RightHand => &mut self.right_hand,
        }
    }

    /// Occupied equipment slots, in body, right hand, left hand order.
    pub fn equipped(&self) -> impl Iterator<Item = (EquipmentSlot, CardGuid)> + '_ {
        [EquipmentSlot::Body, EquipmentSlot::RightHand, EquipmentSlot::LeftHand]
            .into_iter()
            .filter_map(|slot| self.slot(slot).map(|guid| (slot, guid)))
    }

    /// Every card bound to this champion: gear, upgrade, learned and
    /// attached actions.
    #[must_use]
    pub fn bound_cards(&self) -> Vec<CardGuid> {
        self.equipped()
            .map(|(_, guid)| guid)
            .chain(self.upgrade)
            .chain(self.learned_actions_cards.iter().copied())
            .chain(self.attached_actions_cards.iter().copied())
            .collect()
    }

    /// Check whether a status effect of this kind is active.
    #[must_use]
    pub fn has_status(&self, name: StatusEffectName) -> bool {
        self.status_effects.iter().any(|e| e.name == name)
    }

    /// A champion at zero hit points or below is dead.
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.current_hp <= 0
    }
}

/// A player's objective card. Destroying it ends the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Crystal {
    pub current_hp: i32,
    pub max_hp: i32,
    pub is_blocking: bool,
}

impl Crystal {
    /// Create an undamaged crystal.
    #[must_use]
    pub fn new(hp: i32) -> Self {
        Self {
            current_hp: hp,
            max_hp: hp,
            is_blocking: true,
        }
    }

    /// A crystal is destroyed once its hit points drop below zero.
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.current_hp < 0
    }
}
