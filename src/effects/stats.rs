//! Derived champion stats.
//!
//! `cal` = base + equipped gear deltas + class upgrade deltas + active
//! status-effect deltas, each stat floored at zero. Recalculation clamps
//! `current_hp` to the new maximum but never touches `armor` or `mental`;
//! those pools are only refilled at the owner's turn refresh.

use crate::cards::{CardArena, Champion, StatBlock};
use crate::core::CardGuid;

/// Compute a champion's derived stats without mutating anything.
#[must_use]
pub fn derived_stats(champion: &Champion, arena: &CardArena) -> StatBlock {
    let mut total = champion.base;

    for (_, gear) in champion.equipped() {
        if let Some(gear) = arena.gear(gear) {
            total += gear.deltas;
        }
    }
    if let Some(class) = champion.upgrade.and_then(|guid| arena.class(guid)) {
        total += class.deltas;
    }
    for effect in &champion.status_effects {
        if let Some(stat) = effect.affected_stat() {
            *total.get_mut(stat) += effect.stat_delta();
        }
    }

    total.floored()
}

/// Recompute `cal` for the champion at `guid` and clamp its hit points.
///
/// Returns false if `guid` is not a champion.
pub fn calculate_stats(arena: &mut CardArena, guid: CardGuid) -> bool {
    let Some(cal) = arena.champion(guid).map(|c| derived_stats(c, arena)) else {
        return false;
    };
    if let Some(champion) = arena.champion_mut(guid) {
        champion.cal = cal;
        champion.current_hp = champion.current_hp.min(cal.hp);
    }
    true
}
