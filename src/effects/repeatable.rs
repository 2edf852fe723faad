//! Per-turn usage budgets of bound action cards.
//!
//! A non-repeatable action can be used once per turn. A repeatable action
//! grants the current value of its `repeatable_stat` as extra uses; the
//! first use costs stamina, the extra uses are free. Uses are counted from
//! the owner's action log for the current turn, so the budget follows the
//! stat even when it changes mid-turn.

use crate::cards::{ActionCard, Champion};
use crate::core::{CardGuid, Game, Player, RecordKind};

/// How the next use of an action would be paid for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RepeatableUse {
    /// Not used yet this turn: costs stamina.
    FirstUse,
    /// Covered by the repeatable budget: no stamina cost.
    Free,
    /// No uses left this turn.
    Exhausted,
}

/// Times `card` was used by `player`'s champions during `turn`.
#[must_use]
pub fn count_uses_this_turn(player: &Player, card: CardGuid, turn: u32) -> u32 {
    player
        .actions_in_turn(turn)
        .filter(|r| r.kind == RecordKind::Champion && r.card == Some(card))
        .count() as u32
}

/// Extra uses a repeatable action grants to a champion.
#[must_use]
pub fn repeatable_budget(action: &ActionCard, champion: &Champion) -> u32 {
    match (action.is_repeatable, action.repeatable_stat) {
        (true, Some(stat)) => champion.stat(stat).max(0) as u32,
        _ => 0,
    }
}

/// Classify the next use of an action given how often it was used this turn.
#[must_use]
pub fn check_repeatable_action(action: &ActionCard, champion: &Champion, uses: u32) -> RepeatableUse {
    if uses == 0 {
        RepeatableUse::FirstUse
    } else if action.is_repeatable && uses <= repeatable_budget(action, champion) {
        RepeatableUse::Free
    } else {
        RepeatableUse::Exhausted
    }
}

/// Update an action's runtime flags from its use count this turn.
pub fn set_repeatable_action_activations(action: &mut ActionCard, champion: &Champion, uses: u32) {
    action.was_played = uses > 0;
    action.repeatable_activation_left = if uses == 0 {
        0
    } else {
        (repeatable_budget(action, champion) + 1).saturating_sub(uses)
    };
}

/// Recompute the flags of every action bound to a champion from the owner's
/// log.
pub fn calculate_and_update_repeatable_actions(game: &mut Game, champion_guid: CardGuid) {
    let Some(owner) = game.owner_of(champion_guid) else {
        return;
    };
    let Some(champion) = game.cards.champion(champion_guid).cloned() else {
        return;
    };
    let turn = game.turn_number;

    for guid in champion
        .learned_actions_cards
        .iter()
        .chain(&champion.attached_actions_cards)
    {
        let uses = count_uses_this_turn(&game.players[owner], *guid, turn);
        if let Some(action) = game.cards.action_mut(*guid) {
            set_repeatable_action_activations(action, &champion, uses);
        }
    }
}

/// Clear usage flags on every action bound to a champion.
pub fn refresh_learned_actions(game: &mut Game, champion_guid: CardGuid) {
    let Some(champion) = game.cards.champion(champion_guid) else {
        return;
    };
    let bound: Vec<CardGuid> = champion
        .learned_actions_cards
        .iter()
        .chain(&champion.attached_actions_cards)
        .copied()
        .collect();

    for guid in bound {
        if let Some(action) = game.cards.action_mut(guid) {
            action.refresh();
        }
    }
}
