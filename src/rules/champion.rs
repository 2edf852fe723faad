//! Champion action resolver: movement and attacks.
//!
//! ## Flow
//!
//! Each call validates, resolves the effect, then applies side effects, in
//! a single pass. Validation runs before any mutation, so a rejected action
//! leaves the game untouched even without the controller's working copy.
//!
//! ## Validation order
//!
//! 1. Source cell holds a champion
//! 2. The champion belongs to the playing player
//! 3. The action is usable: bound to the champion, not spent this turn,
//!    stamina left unless a repeatable budget covers the use
//! 4. No disabling status (Paralyze, or Silence for non-movement)
//! 5. Class, gear and stat gates of card actions
//! 6. Geometry: movement or target rules

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::error::RuleViolation;
use crate::board::{
    calculate_distance, check_allowed_direction, check_allowed_distance, check_back_targeting,
    check_blocking_objects, get_board_location_in_straight_path, get_champion_direction,
    Direction, Location,
};
use crate::cards::{ActionCard, CardKind, Champion, DefensePool, StatBlock};
use crate::core::{ActionRecord, CardGuid, Game, GameStatus, PlayerId, RandomSource};
use crate::effects::{
    apply_target_effects, calculate_and_update_repeatable_actions, calculate_stats,
    check_repeatable_action, count_uses_this_turn, RepeatableUse, StatusEffectName,
};

/// Actions every champion has without a card.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize,
    strum_macros::Display, strum_macros::EnumString,
)]
pub enum InnateAction {
    Step,
    BasicHit,
}

impl InnateAction {
    #[must_use]
    pub fn template(self) -> ActionCard {
        match self {
            InnateAction::Step => ActionCard::step(),
            InnateAction::BasicHit => ActionCard::basic_hit(),
        }
    }
}

/// Which action a champion performs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionRef {
    Innate(InnateAction),
    /// An action card in the champion's learned list.
    Learned(CardGuid),
    /// An action card in the champion's attached list. Consumed on use.
    Attached(CardGuid),
}

impl ActionRef {
    #[must_use]
    pub fn card(self) -> Option<CardGuid> {
        match self {
            ActionRef::Innate(_) => None,
            ActionRef::Learned(guid) | ActionRef::Attached(guid) => Some(guid),
        }
    }
}

/// Result of a successful champion action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChampionOutcome {
    /// The card that was hit or healed. `None` for movement.
    pub targeted_card: Option<CardGuid>,
}

/// A validated action, ready to resolve.
pub(crate) struct Plan {
    pub(crate) player: PlayerId,
    pub(crate) champion: CardGuid,
    pub(crate) name: String,
    pub(crate) action: ActionCard,
    pub(crate) usage: RepeatableUse,
}

/// Validate and execute a champion action for the playing player.
pub fn resolve_champion_action(
    game: &mut Game,
    action: ActionRef,
    source: Location,
    target: Location,
    rng: &mut dyn RandomSource,
) -> Result<ChampionOutcome, RuleViolation> {
    let plan = validate(game, action, source, target)?;

    let targeted_card = if plan.action.action_type.is_attack() {
        Some(resolve_attack(game, &plan, target, rng))
    } else {
        move_champion(game, plan.champion, source, target);
        None
    };

    apply_side_effects(game, &plan, action, source, target);
    Ok(ChampionOutcome { targeted_card })
}

fn validate(
    game: &Game,
    action_ref: ActionRef,
    source: Location,
    target: Location,
) -> Result<Plan, RuleViolation> {
    let plan = validate_actor(game, action_ref, source)?;
    check_target(game, &plan, source, target)?;
    Ok(plan)
}

/// Checks that depend only on the acting champion and the action: every
/// step before geometry.
pub(crate) fn validate_actor(
    game: &Game,
    action_ref: ActionRef,
    source: Location,
) -> Result<Plan, RuleViolation> {
    match game.status {
        GameStatus::Over => return Err(RuleViolation::GameOver),
        GameStatus::Starting => return Err(RuleViolation::GameNotStarted),
        GameStatus::OnGoing => {}
    }

    // 1. Source champion.
    let guid = game.board.get(source).ok_or(RuleViolation::EntityNotFound)?;
    let card = game.cards.get(guid).ok_or(RuleViolation::EntityNotFound)?;
    let champion = card.as_champion().ok_or(RuleViolation::NotAChampion)?;

    // 2. Ownership.
    let player = game.playing_player;
    if card.owner != Some(player) {
        return Err(RuleViolation::NotYourChampion);
    }

    // 3. Usability and stamina.
    let (name, action) = action_template(game, champion, action_ref)?;
    let usage = match action_ref.card() {
        Some(card) => {
            let uses = count_uses_this_turn(game.player(player), card, game.turn_number);
            check_repeatable_action(&action, champion, uses)
        }
        None => RepeatableUse::FirstUse,
    };
    match usage {
        RepeatableUse::Exhausted => return Err(RuleViolation::ActionAlreadyPlayed),
        RepeatableUse::FirstUse if champion.stm == 0 => return Err(RuleViolation::NoStamina),
        _ => {}
    }

    // 4. Disables.
    if champion.has_status(StatusEffectName::Paralyze) {
        return Err(RuleViolation::Paralyzed);
    }
    if action.action_type.is_attack() && champion.has_status(StatusEffectName::Silence) {
        return Err(RuleViolation::Silenced);
    }

    // 5. Gates.
    if action_ref.card().is_some() {
        check_action_requirements(game, champion, &action)?;
    }

    Ok(Plan {
        player,
        champion: guid,
        name,
        action,
        usage,
    })
}

/// Geometry checks for a validated actor.
pub(crate) fn check_target(
    game: &Game,
    plan: &Plan,
    source: Location,
    target: Location,
) -> Result<(), RuleViolation> {
    if !game.board.in_bounds(target) {
        return Err(RuleViolation::OutOfBoard);
    }
    if plan.action.action_type.is_attack() {
        validate_attack_target(game, &plan.action, source, target)
    } else {
        let champion = game
            .cards
            .champion(plan.champion)
            .ok_or(RuleViolation::NotAChampion)?;
        validate_step(game, champion, source, target)
    }
}

/// Look up the action a reference points to and check it is bound to the
/// champion.
fn action_template(
    game: &Game,
    champion: &Champion,
    action_ref: ActionRef,
) -> Result<(String, ActionCard), RuleViolation> {
    let (guid, bound) = match action_ref {
        ActionRef::Innate(innate) => return Ok((innate.to_string(), innate.template())),
        ActionRef::Learned(guid) => (guid, &champion.learned_actions_cards),
        ActionRef::Attached(guid) => (guid, &champion.attached_actions_cards),
    };
    if !bound.contains(&guid) {
        return Err(RuleViolation::ActionNotBound);
    }
    let card = game.cards.get(guid).ok_or(RuleViolation::EntityNotFound)?;
    match &card.kind {
        CardKind::Action(action) => Ok((card.name.clone(), action.clone())),
        _ => Err(RuleViolation::ActionNotBound),
    }
}

/// Class, gear category and stat gates of an action card.
pub fn check_action_requirements(
    game: &Game,
    champion: &Champion,
    action: &ActionCard,
) -> Result<(), RuleViolation> {
    if let Some(class) = &action.required_class_name {
        if &champion.cal_class != class && &champion.class_name != class {
            return Err(RuleViolation::ClassMismatch);
        }
    }
    if let Some(category) = &action.required_gear_category {
        let equipped = champion
            .equipped()
            .any(|(_, gear)| game.cards.gear(gear).is_some_and(|g| &g.category == category));
        if !equipped {
            return Err(RuleViolation::GearMissing);
        }
    }
    if let Some(requirement) = action.required_stat {
        if champion.stat(requirement.stat) < requirement.value {
            return Err(RuleViolation::StatTooLow);
        }
    }
    Ok(())
}

fn validate_step(
    game: &Game,
    champion: &Champion,
    source: Location,
    target: Location,
) -> Result<(), RuleViolation> {
    if game.board.get(target).is_some() {
        return Err(RuleViolation::LocationOccupied);
    }
    if champion.cal.dexterity <= 0 {
        return Err(RuleViolation::NoDexterity);
    }
    if calculate_distance(source, target) > champion.cal.dexterity as u32 {
        return Err(RuleViolation::OutOfRange);
    }
    if source.row != target.row && source.col != target.col {
        return Err(RuleViolation::NotStraight);
    }
    Ok(())
}

fn validate_attack_target(
    game: &Game,
    action: &ActionCard,
    source: Location,
    target: Location,
) -> Result<(), RuleViolation> {
    let target_card = game.card_at(target).ok_or(RuleViolation::InvalidTarget)?;
    let facing = match &target_card.kind {
        CardKind::Champion(c) => c.direction,
        CardKind::Crystal(_) => Direction::None,
        _ => return Err(RuleViolation::InvalidTarget),
    };

    let reachable = get_board_location_in_straight_path(&game.board, &game.cards, source, action);
    if !reachable.contains(&target) {
        let range = action.distance;
        return Err(if !check_allowed_distance(range.min, range.max, source, target) {
            RuleViolation::OutOfRange
        } else if !check_allowed_direction(action.direction, source, target) {
            RuleViolation::NotStraight
        } else if !action.is_free_targeting
            && check_blocking_objects(&game.board, &game.cards, source, target)
        {
            RuleViolation::PathBlocked
        } else {
            RuleViolation::NotReachable
        });
    }

    if action.is_back_targeting && !check_back_targeting(source, target, facing) {
        return Err(RuleViolation::NotBehindTarget);
    }
    Ok(())
}

/// Relocate a champion and face it along the move.
fn move_champion(game: &mut Game, champion: CardGuid, source: Location, target: Location) {
    game.board.clear(source);
    game.board.place(target, champion);
    if let Some(c) = game.cards.champion_mut(champion) {
        c.direction = get_champion_direction(source, target);
    }
}

/// Apply damage or heal, then target effects. Returns the targeted card.
fn resolve_attack(
    game: &mut Game,
    plan: &Plan,
    target: Location,
    rng: &mut dyn RandomSource,
) -> CardGuid {
    let attacker = game
        .cards
        .champion(plan.champion)
        .map(|c| c.cal)
        .unwrap_or_default();
    let Some(target_guid) = game.board.get(target) else {
        return plan.champion;
    };

    if plan.action.is_heal {
        let amount = plan.action.raw_damage(&attacker).max(0);
        heal(game, target_guid, amount);
    } else {
        let dealt = deal_damage(game, target_guid, &plan.action, &attacker);
        debug!(attacker = %plan.champion, target = %target_guid, dealt, "attack resolved");
    }

    if !plan.action.target_effects.is_empty() {
        apply_target_effects(game, target_guid, &plan.action.target_effects, rng);
    }

    if let Some(crystal) = game.cards.crystal(target_guid) {
        if crystal.is_destroyed() {
            if let Some(owner) = game.owner_of(target_guid) {
                info!(loser = %owner, "crystal destroyed");
                game.finish(owner);
            }
        }
    } else if game.cards.champion(target_guid).is_some_and(Champion::is_dead) {
        kill_champion(game, target_guid, target);
    }

    target_guid
}

/// Heal a champion or crystal, capped at its maximum.
pub fn heal(game: &mut Game, target: CardGuid, amount: i32) {
    let Some(card) = game.cards.get_mut(target) else {
        return;
    };
    match &mut card.kind {
        CardKind::Champion(c) => c.current_hp = (c.current_hp + amount).min(c.cal.hp),
        CardKind::Crystal(c) => c.current_hp = (c.current_hp + amount).min(c.max_hp),
        _ => {}
    }
}

/// Apply an action's damage terms to a target. Str terms drain armor first,
/// Int terms drain mental first. Returns the hit points lost.
pub fn deal_damage(
    game: &mut Game,
    target: CardGuid,
    action: &ActionCard,
    attacker: &StatBlock,
) -> i32 {
    let Some(card) = game.cards.get_mut(target) else {
        return 0;
    };

    let mut total = 0;
    match &mut card.kind {
        CardKind::Champion(c) => {
            for term in &action.damages {
                let mut value = term.value(attacker).max(0);
                let pool = match term.defense_pool() {
                    Some(DefensePool::Armor) => Some(&mut c.armor),
                    Some(DefensePool::Mental) => Some(&mut c.mental),
                    None => None,
                };
                if let Some(pool) = pool {
                    let absorbed = value.min((*pool).max(0));
                    *pool = (*pool - absorbed).max(0);
                    value -= absorbed;
                }
                total += value;
            }
            c.current_hp -= total;
        }
        CardKind::Crystal(c) => {
            total = action.damages.iter().map(|t| t.value(attacker).max(0)).sum();
            c.current_hp -= total;
        }
        _ => {}
    }
    total
}

/// Remove a dead champion from the board. It and every card bound to it go
/// to its owner's used pile; the champion card is reset to its printed
/// state.
pub fn kill_champion(game: &mut Game, champion: CardGuid, location: Location) {
    game.board.clear(location);
    let Some(owner) = game.owner_of(champion) else {
        return;
    };
    let bound = game
        .cards
        .champion(champion)
        .map(Champion::bound_cards)
        .unwrap_or_default();

    for card in &bound {
        if let Some(action) = game.cards.action_mut(*card) {
            action.refresh();
        }
        game.discard(owner, *card);
    }
    if let Some(c) = game.cards.champion_mut(champion) {
        *c = Champion::new(c.class_name.clone(), c.base)
            .with_learned_actions(std::mem::take(&mut c.learned_actions));
    }
    game.discard(owner, champion);
    debug!(%champion, %owner, "champion died");
}

/// Bury every champion on the board at zero hit points or below.
pub fn bury_dead_champions(game: &mut Game) {
    let dead: Vec<(Location, CardGuid)> = game
        .board
        .occupied()
        .filter(|&(_, guid)| game.cards.champion(guid).is_some_and(Champion::is_dead))
        .collect();
    for (location, guid) in dead {
        kill_champion(game, guid, location);
    }
}

fn apply_side_effects(
    game: &mut Game,
    plan: &Plan,
    action_ref: ActionRef,
    source: Location,
    target: Location,
) {
    let champion_alive = game.board.find(plan.champion).is_some();

    if champion_alive {
        if let Some(c) = game.cards.champion_mut(plan.champion) {
            if plan.usage != RepeatableUse::Free {
                c.stm = c.stm.saturating_sub(1);
            }
            if plan.action.action_type.is_attack() {
                c.direction = get_champion_direction(source, target);
            }
        }
    }

    let turn = game.turn_number;
    let timestamp = game.next_timestamp();
    let mut record = ActionRecord::champion(plan.player, plan.name.clone(), source, target, turn, timestamp);
    if let Some(card) = action_ref.card() {
        record = record.with_card(card);
    }
    game.record(record);

    if let ActionRef::Attached(card) = action_ref {
        if let Some(c) = game.cards.champion_mut(plan.champion) {
            c.attached_actions_cards.retain(|&g| g != card);
        }
        if let Some(action) = game.cards.action_mut(card) {
            action.refresh();
        }
        game.discard(plan.player, card);
        calculate_stats(&mut game.cards, plan.champion);
    }

    if champion_alive {
        calculate_and_update_repeatable_actions(game, plan.champion);
    }
}
