//! Non-mutating queries that drive UI affordances.
//!
//! Each query reports why nothing is selectable through the same
//! `RuleViolation` the matching action would return.

use super::champion::{check_action_requirements, check_target, validate_actor, ActionRef};
use super::error::RuleViolation;
use super::player::{
    check_discard_requirement, matches_requirement, summon_locations, upgrades_left,
};
use crate::board::{get_board_location_in_straight_path, get_step_locations, Location};
use crate::cards::{CardKind, CardType};
use crate::core::{CardGuid, Game, GameStatus, PlayerId};

/// What a hand selection is for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandSelect {
    /// Cards that can be played right now.
    Play,
    /// Cards that can pay the discard cost of an order in hand.
    Discard { order: CardGuid },
}

fn check_turn(game: &Game, player: PlayerId) -> Result<(), RuleViolation> {
    match game.status {
        GameStatus::Over => Err(RuleViolation::GameOver),
        GameStatus::Starting => Err(RuleViolation::GameNotStarted),
        GameStatus::OnGoing if game.playing_player != player => Err(RuleViolation::NotYourTurn),
        GameStatus::OnGoing => Ok(()),
    }
}

/// Empty home-row cells where the player may summon.
pub fn get_summon_board_locations(game: &Game, player: PlayerId) -> Result<Vec<Location>, RuleViolation> {
    check_turn(game, player)?;
    if game.player(player).summons_left == 0 {
        return Err(RuleViolation::NoSummonsLeft);
    }
    Ok(summon_locations(game, player))
}

/// Board cells a hand card can be played on: summon cells for champions,
/// the player's eligible champions for gear, class and action cards.
pub fn get_player_actions_allowed_board_locations(
    game: &Game,
    player: PlayerId,
    card: CardGuid,
) -> Result<Vec<Location>, RuleViolation> {
    check_turn(game, player)?;
    if !game.player(player).has_in_hand(card) {
        return Err(RuleViolation::CardNotInHand);
    }
    let hand_card = game.cards.get(card).ok_or(RuleViolation::EntityNotFound)?;

    let own: Vec<(Location, CardGuid)> = game.champions_of(player).collect();
    let locations = match &hand_card.kind {
        CardKind::Champion(_) => return get_summon_board_locations(game, player),
        CardKind::Gear(_) => own.into_iter().map(|(l, _)| l).collect(),
        CardKind::Class(class) => {
            if upgrades_left(game, player) == 0 {
                return Err(RuleViolation::NoUpgradesLeft);
            }
            own.into_iter()
                .filter(|(_, g)| {
                    game.cards
                        .champion(*g)
                        .is_some_and(|c| c.cal_class == class.required_class_name)
                })
                .map(|(l, _)| l)
                .collect()
        }
        CardKind::Action(action) => own
            .into_iter()
            .filter(|(_, g)| {
                game.cards
                    .champion(*g)
                    .is_some_and(|c| check_action_requirements(game, c, action).is_ok())
            })
            .map(|(l, _)| l)
            .collect(),
        CardKind::Order(_) | CardKind::Crystal(_) => Vec::new(),
    };
    Ok(locations)
}

/// Cells a champion's action may target from `source`.
pub fn get_champions_actions_allowed_board_locations(
    game: &Game,
    action: ActionRef,
    source: Location,
) -> Result<Vec<Location>, RuleViolation> {
    let plan = validate_actor(game, action, source)?;

    let candidates = if plan.action.action_type.is_attack() {
        get_board_location_in_straight_path(&game.board, &game.cards, source, &plan.action)
    } else {
        let dex = game
            .cards
            .champion(plan.champion)
            .map(|c| c.cal.dexterity.max(0) as u32)
            .unwrap_or(0);
        get_step_locations(&game.board, source, dex)
    };

    Ok(candidates
        .into_iter()
        .filter(|&target| check_target(game, &plan, source, target).is_ok())
        .collect())
}

/// Hand cards selectable for a purpose.
pub fn get_player_allowed_hand_card_select(
    game: &Game,
    player: PlayerId,
    purpose: HandSelect,
) -> Result<Vec<CardGuid>, RuleViolation> {
    check_turn(game, player)?;
    let hand = &game.player(player).hand;

    match purpose {
        HandSelect::Play => Ok(hand
            .iter()
            .copied()
            .filter(|&card| is_playable(game, player, card))
            .collect()),
        HandSelect::Discard { order } => {
            if !hand.contains(&order) {
                return Err(RuleViolation::CardNotInHand);
            }
            let order_card = game
                .cards
                .order(order)
                .ok_or(RuleViolation::WrongCardType(CardType::Order))?;
            Ok(hand
                .iter()
                .copied()
                .filter(|&card| card != order)
                .filter(|&card| {
                    game.cards.get(card).is_some_and(|c| {
                        order_card.requirement.iter().any(|r| matches_requirement(c, r))
                    })
                })
                .collect())
        }
    }
}

fn is_playable(game: &Game, player: PlayerId, card: CardGuid) -> bool {
    match game.cards.get(card).map(|c| &c.kind) {
        Some(CardKind::Order(order)) => {
            let others: Vec<CardGuid> = game
                .player(player)
                .hand
                .iter()
                .copied()
                .filter(|&g| g != card)
                .collect();
            // Greedy pick of a payable discard set, most specific spec first.
            let mut specs: Vec<_> = order.requirement.iter().collect();
            specs.sort_by_key(|r| std::cmp::Reverse(r.specificity()));
            let mut picked = Vec::new();
            for requirement in specs {
                let mut needed = requirement.amount;
                for &g in &others {
                    if needed == 0 {
                        break;
                    }
                    if !picked.contains(&g)
                        && game.cards.get(g).is_some_and(|c| matches_requirement(c, requirement))
                    {
                        picked.push(g);
                        needed -= 1;
                    }
                }
            }
            check_discard_requirement(game, order, &picked)
        }
        Some(_) => get_player_actions_allowed_board_locations(game, player, card)
            .is_ok_and(|locations| !locations.is_empty()),
        None => false,
    }
}
