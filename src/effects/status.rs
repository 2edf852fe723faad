//! Status effects: timed or instantaneous modifiers on champions.
//!
//! ## Lifecycle
//!
//! - Applied by an action's `target_effects` after damage or heal
//! - `duration > 0`: a copy is stored on the champion
//! - `duration == 0`: the instantaneous handler runs and nothing is stored
//! - Once per owner turn end: per-tick handlers run (Burn, Regen), durations
//!   drop by one, expired effects are removed and stats are recalculated
//!
//! ## Disables
//!
//! `Paralyze` blocks every champion action, `Silence` every action except
//! movement.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::stats::calculate_stats;
use crate::cards::{Champion, Stat};
use crate::core::{CardGuid, Game, RandomSource};

/// Status effect kinds.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize,
    strum_macros::Display, strum_macros::EnumString,
)]
pub enum StatusEffectName {
    StrBoost,
    DexBoost,
    IntBoost,
    StrDebuff,
    DexDebuff,
    IntDebuff,
    /// Loses `value` hit points each tick.
    Burn,
    /// Regains `value` hit points each tick, up to the maximum.
    Regen,
    Silence,
    Paralyze,
    /// Destroys one random equipped gear.
    BreakGear,
}

impl StatusEffectName {
    /// Stat a boost or debuff modifies by default.
    #[must_use]
    pub fn default_stat(self) -> Option<Stat> {
        match self {
            Self::StrBoost | Self::StrDebuff => Some(Stat::Str),
            Self::DexBoost | Self::DexDebuff => Some(Stat::Dex),
            Self::IntBoost | Self::IntDebuff => Some(Stat::Int),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_debuff(self) -> bool {
        matches!(self, Self::StrDebuff | Self::DexDebuff | Self::IntDebuff)
    }
}

/// An effect template on an action card, or a live effect on a champion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub name: StatusEffectName,
    /// Overrides the stat implied by `name`.
    #[serde(default)]
    pub stat: Option<Stat>,
    #[serde(default)]
    pub value: i32,
    /// Owner turns remaining; 0 means instantaneous.
    #[serde(default)]
    pub duration: u32,
}

impl StatusEffect {
    #[must_use]
    pub fn new(name: StatusEffectName, value: i32, duration: u32) -> Self {
        Self {
            name,
            stat: None,
            value,
            duration,
        }
    }

    /// Set an explicit stat (builder pattern).
    #[must_use]
    pub fn with_stat(mut self, stat: Stat) -> Self {
        self.stat = Some(stat);
        self
    }

    /// Stat this effect modifies, if it is a stat modifier.
    #[must_use]
    pub fn affected_stat(&self) -> Option<Stat> {
        self.name.default_stat().map(|default| self.stat.unwrap_or(default))
    }

    /// Signed contribution to the affected stat. Debuffs always subtract.
    #[must_use]
    pub fn stat_delta(&self) -> i32 {
        if self.name.is_debuff() {
            -self.value.abs()
        } else {
            self.value
        }
    }
}

/// Apply effect templates to a champion.
///
/// Returns false if `target` is not a champion.
pub fn apply_target_effects(
    game: &mut Game,
    target: CardGuid,
    effects: &[StatusEffect],
    rng: &mut dyn RandomSource,
) -> bool {
    if game.cards.champion(target).is_none() {
        return false;
    }

    for effect in effects {
        if effect.duration == 0 {
            run_instant(game, target, effect, rng);
        } else if let Some(champion) = game.cards.champion_mut(target) {
            champion.status_effects.push(effect.clone());
        }
    }
    calculate_stats(&mut game.cards, target);
    true
}

fn run_instant(game: &mut Game, target: CardGuid, effect: &StatusEffect, rng: &mut dyn RandomSource) {
    match effect.name {
        StatusEffectName::BreakGear => {
            break_gear(game, target, rng);
        }
        StatusEffectName::Burn | StatusEffectName::Regen => {
            if let Some(champion) = game.cards.champion_mut(target) {
                tick_hp(champion, effect);
            }
        }
        other => debug!(effect = %other, "instantaneous effect has no handler"),
    }
}

fn tick_hp(champion: &mut Champion, effect: &StatusEffect) {
    match effect.name {
        StatusEffectName::Burn => champion.current_hp -= effect.value.max(0),
        StatusEffectName::Regen => {
            champion.current_hp = (champion.current_hp + effect.value.max(0)).min(champion.cal.hp);
        }
        _ => {}
    }
}

/// Advance a champion's effects by one owner turn.
///
/// Runs per-tick handlers, decrements durations, removes expired effects and
/// recalculates stats. Returns false if `guid` is not a champion.
pub fn update_champion_status_effects(game: &mut Game, guid: CardGuid) -> bool {
    let Some(champion) = game.cards.champion_mut(guid) else {
        return false;
    };

    let effects = std::mem::take(&mut champion.status_effects);
    let mut kept = Vec::with_capacity(effects.len());
    for mut effect in effects {
        tick_hp(champion, &effect);
        effect.duration = effect.duration.saturating_sub(1);
        if effect.duration > 0 {
            kept.push(effect);
        }
    }
    champion.status_effects = kept;

    calculate_stats(&mut game.cards, guid);
    true
}

/// Remove one uniformly selected equipped gear and put it on its owner's
/// used pile. Returns the broken gear.
pub fn break_gear(game: &mut Game, champion: CardGuid, rng: &mut dyn RandomSource) -> Option<CardGuid> {
    let slots: Vec<_> = game.cards.champion(champion)?.equipped().collect();
    if slots.is_empty() {
        return None;
    }

    let (slot, gear) = slots[rng.pick_index(slots.len())];
    if let Some(c) = game.cards.champion_mut(champion) {
        *c.slot_mut(slot) = None;
    }
    if let Some(owner) = game.owner_of(gear).or_else(|| game.owner_of(champion)) {
        game.discard(owner, gear);
    }
    calculate_stats(&mut game.cards, champion);

    debug!(%champion, %gear, "gear broken");
    Some(gear)
}
