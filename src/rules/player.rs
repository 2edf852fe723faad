//! Player action resolver: draws, summons, equipment, upgrades, orders,
//! deck building and turn handoff.
//!
//! Each handler validates first and mutates only once every check passed.
//! Turn actions need an ongoing game and the actor to be the playing
//! player; deck-building actions need a game still in `Starting`.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::champion::{bury_dead_champions, check_action_requirements};
use super::error::RuleViolation;
use crate::board::{Direction, Location};
use crate::cards::{
    BodyPart, Card, CardKind, CardPool, CardType, DiscardRequirement, DrawCondition, OrderCard,
    OrderReward,
};
use crate::core::{
    ActionRecord, CardGuid, Game, GameStatus, PlayerEffect, PlayerEffectKind, PlayerId,
    RecordKind,
};
use crate::effects::{calculate_stats, refresh_learned_actions, update_champion_status_effects};

/// Names of player actions.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize,
    strum_macros::Display, strum_macros::EnumString,
)]
pub enum PlayerActionKind {
    TurnDraw,
    InitialDraw,
    Summon,
    Equip,
    Upgrade,
    Attach,
    PlayOrder,
    AddCardToDeck,
    RemoveCardFromDeck,
    ClearDeck,
    SetStartingChampion,
    EndTurn,
    Surrender,
}

impl PlayerActionKind {
    /// Deck-building actions, only legal before the game starts.
    #[must_use]
    pub fn is_deck_building(self) -> bool {
        matches!(
            self,
            PlayerActionKind::AddCardToDeck
                | PlayerActionKind::RemoveCardFromDeck
                | PlayerActionKind::ClearDeck
                | PlayerActionKind::SetStartingChampion
        )
    }
}

/// A player action with its payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerAction {
    TurnDraw,
    InitialDraw,
    Summon { card: CardGuid, location: Location },
    Equip { card: CardGuid, location: Location },
    Upgrade { card: CardGuid, location: Location },
    Attach { card: CardGuid, location: Location },
    /// Play an order from hand. `discards` pays the requirement; `selection`
    /// names the deck or used-pile cards a `SpecificDraw` or
    /// `ReturnUsedCardToDeck` reward picks.
    PlayOrder {
        card: CardGuid,
        discards: Vec<CardGuid>,
        selection: Vec<CardGuid>,
    },
    AddCardToDeck { card: CardGuid },
    RemoveCardFromDeck { card: CardGuid },
    ClearDeck,
    SetStartingChampion { card: CardGuid },
    EndTurn,
    Surrender,
}

impl PlayerAction {
    #[must_use]
    pub fn kind(&self) -> PlayerActionKind {
        match self {
            PlayerAction::TurnDraw => PlayerActionKind::TurnDraw,
            PlayerAction::InitialDraw => PlayerActionKind::InitialDraw,
            PlayerAction::Summon { .. } => PlayerActionKind::Summon,
            PlayerAction::Equip { .. } => PlayerActionKind::Equip,
            PlayerAction::Upgrade { .. } => PlayerActionKind::Upgrade,
            PlayerAction::Attach { .. } => PlayerActionKind::Attach,
            PlayerAction::PlayOrder { .. } => PlayerActionKind::PlayOrder,
            PlayerAction::AddCardToDeck { .. } => PlayerActionKind::AddCardToDeck,
            PlayerAction::RemoveCardFromDeck { .. } => PlayerActionKind::RemoveCardFromDeck,
            PlayerAction::ClearDeck => PlayerActionKind::ClearDeck,
            PlayerAction::SetStartingChampion { .. } => PlayerActionKind::SetStartingChampion,
            PlayerAction::EndTurn => PlayerActionKind::EndTurn,
            PlayerAction::Surrender => PlayerActionKind::Surrender,
        }
    }
}

/// Validate and execute a player action.
pub fn resolve_player_action(
    game: &mut Game,
    pool: &mut CardPool,
    actor: PlayerId,
    action: PlayerAction,
) -> Result<(), RuleViolation> {
    check_phase(game, actor, action.kind())?;

    match action {
        PlayerAction::TurnDraw => turn_draw(game, actor),
        PlayerAction::InitialDraw => initial_draw(game, actor),
        PlayerAction::Summon { card, location } => summon(game, actor, card, location),
        PlayerAction::Equip { card, location } => equip(game, actor, card, location),
        PlayerAction::Upgrade { card, location } => upgrade(game, actor, card, location),
        PlayerAction::Attach { card, location } => attach(game, actor, card, location),
        PlayerAction::PlayOrder {
            card,
            discards,
            selection,
        } => play_order(game, actor, card, &discards, &selection),
        PlayerAction::AddCardToDeck { card } => add_card_to_deck(game, pool, actor, card),
        PlayerAction::RemoveCardFromDeck { card } => remove_card_from_deck(game, pool, actor, card),
        PlayerAction::ClearDeck => {
            clear_deck(game, pool, actor);
            Ok(())
        }
        PlayerAction::SetStartingChampion { card } => set_starting_champion(game, actor, card),
        PlayerAction::EndTurn => {
            end_turn(game, actor);
            Ok(())
        }
        PlayerAction::Surrender => {
            info!(player = %actor, "player surrendered");
            game.finish(actor);
            Ok(())
        }
    }
}

/// Lifecycle and turn-ownership gate.
fn check_phase(game: &Game, actor: PlayerId, kind: PlayerActionKind) -> Result<(), RuleViolation> {
    if game.status == GameStatus::Over {
        return Err(RuleViolation::GameOver);
    }
    if kind.is_deck_building() {
        return if game.status == GameStatus::Starting {
            Ok(())
        } else {
            Err(RuleViolation::NotDeckBuilding)
        };
    }
    match kind {
        PlayerActionKind::Surrender => Ok(()),
        _ if game.status == GameStatus::Starting => Err(RuleViolation::GameNotStarted),
        PlayerActionKind::InitialDraw => Ok(()),
        _ if game.playing_player != actor => Err(RuleViolation::NotYourTurn),
        _ => Ok(()),
    }
}

fn log(game: &mut Game, actor: PlayerId, kind: PlayerActionKind, card: Option<CardGuid>, target: Option<Location>) {
    let turn = game.turn_number;
    let timestamp = game.next_timestamp();
    let mut record = ActionRecord::player(actor, kind.to_string(), turn, timestamp);
    if let Some(card) = card {
        record = record.with_card(card);
    }
    if let Some(target) = target {
        record = record.with_target(target);
    }
    game.record(record);
}

// === Draws ===

fn turn_draw(game: &mut Game, actor: PlayerId) -> Result<(), RuleViolation> {
    let count = game.config.turn_draw_count;
    let player = game.player(actor);
    if player.did_draw {
        return Err(RuleViolation::AlreadyDrew);
    }
    if player.deck.len() < count {
        return Err(RuleViolation::NotEnoughCards);
    }

    let player = game.player_mut(actor);
    for _ in 0..count {
        player.draw();
    }
    player.did_draw = true;
    log(game, actor, PlayerActionKind::TurnDraw, None, None);
    Ok(())
}

fn initial_draw(game: &mut Game, actor: PlayerId) -> Result<(), RuleViolation> {
    let initial = PlayerActionKind::InitialDraw.to_string();
    if game
        .player(actor)
        .actions_log
        .iter()
        .any(|r| r.kind == RecordKind::Player && r.name == initial)
    {
        return Err(RuleViolation::InitialHandDrawn);
    }
    let count = game.config.initial_hand_size;
    if game.player(actor).deck.len() < count {
        return Err(RuleViolation::NotEnoughCards);
    }

    let player = game.player_mut(actor);
    for _ in 0..count {
        player.draw();
    }
    if let Some(champion) = player.starting_champion.take() {
        player.hand.push_back(champion);
    }
    log(game, actor, PlayerActionKind::InitialDraw, None, None);
    Ok(())
}

// === Board actions ===

/// Check `card` is in the actor's hand and has the expected type.
fn hand_card(game: &Game, actor: PlayerId, card: CardGuid, expected: CardType) -> Result<(), RuleViolation> {
    if !game.player(actor).has_in_hand(card) {
        return Err(RuleViolation::CardNotInHand);
    }
    let found = game.cards.get(card).ok_or(RuleViolation::EntityNotFound)?;
    if found.card_type() != expected {
        return Err(RuleViolation::WrongCardType(expected));
    }
    Ok(())
}

/// The actor's champion at `location`.
fn own_champion(game: &Game, actor: PlayerId, location: Location) -> Result<CardGuid, RuleViolation> {
    if !game.board.in_bounds(location) {
        return Err(RuleViolation::OutOfBoard);
    }
    let card = game.card_at(location).ok_or(RuleViolation::EntityNotFound)?;
    if card.as_champion().is_none() {
        return Err(RuleViolation::NotAChampion);
    }
    if card.owner != Some(actor) {
        return Err(RuleViolation::NotYourChampion);
    }
    Ok(card.guid)
}

/// Empty home-row cells a player may summon to.
#[must_use]
pub fn summon_locations(game: &Game, player: PlayerId) -> Vec<Location> {
    game.board
        .locations()
        .filter(|l| game.config.is_home_row(player, l.row) && game.board.is_empty_at(*l))
        .collect()
}

fn summon(game: &mut Game, actor: PlayerId, card: CardGuid, location: Location) -> Result<(), RuleViolation> {
    hand_card(game, actor, card, CardType::Champion)?;
    if game.player(actor).summons_left == 0 {
        return Err(RuleViolation::NoSummonsLeft);
    }
    if !game.board.in_bounds(location) {
        return Err(RuleViolation::OutOfBoard);
    }
    if !game.config.is_home_row(actor, location.row) {
        return Err(RuleViolation::NotHomeRow);
    }
    if !game.board.is_empty_at(location) {
        return Err(RuleViolation::LocationOccupied);
    }

    let player = game.player_mut(actor);
    player.remove_from_hand(card);
    player.summons_left -= 1;
    game.board.place(location, card);

    let max_stamina = game.config.max_stamina;
    let facing = if actor.index() == 0 { Direction::Up } else { Direction::Down };
    let names = match game.cards.champion_mut(card) {
        Some(champion) => {
            champion.stm = max_stamina;
            champion.direction = facing;
            champion.learned_actions.clone()
        }
        None => Vec::new(),
    };
    for name in &names {
        bind_learned_action(game, actor, card, name);
    }
    calculate_stats(&mut game.cards, card);
    if let Some(champion) = game.cards.champion_mut(card) {
        champion.armor = champion.cal.strength;
        champion.mental = champion.cal.intelligence;
    }

    debug!(%card, %location, player = %actor, "champion summoned");
    log(game, actor, PlayerActionKind::Summon, Some(card), Some(location));
    Ok(())
}

/// Pull an action card named `name` from the player's used pile, deck or
/// hand (in that order) into the champion's learned list.
fn bind_learned_action(game: &mut Game, actor: PlayerId, champion: CardGuid, name: &str) -> Option<CardGuid> {
    let player = game.player(actor);
    let found = game
        .cards
        .find_action_named(&player.used, name)
        .or_else(|| game.cards.find_action_named(&player.deck, name))
        .or_else(|| game.cards.find_action_named(&player.hand, name))?;

    let player = game.player_mut(actor);
    let _ = player.remove_from_used(found)
        || player.remove_from_deck(found)
        || player.remove_from_hand(found);
    if let Some(action) = game.cards.action_mut(found) {
        action.refresh();
    }
    if let Some(c) = game.cards.champion_mut(champion) {
        c.learned_actions_cards.push(found);
    }
    Some(found)
}

fn equip(game: &mut Game, actor: PlayerId, card: CardGuid, location: Location) -> Result<(), RuleViolation> {
    hand_card(game, actor, card, CardType::Gear)?;
    let champion_guid = own_champion(game, actor, location)?;
    let body_part = game.cards.gear(card).map(|g| g.body_part).unwrap_or_default();

    game.player_mut(actor).remove_from_hand(card);
    let replaced = match game.cards.champion_mut(champion_guid) {
        Some(champion) => match body_part {
            BodyPart::Body => champion.body.replace(card),
            BodyPart::Hand if champion.right_hand.is_none() => champion.right_hand.replace(card),
            BodyPart::Hand if champion.left_hand.is_none() => champion.left_hand.replace(card),
            BodyPart::Hand => champion.right_hand.replace(card),
        },
        None => None,
    };
    if let Some(old) = replaced {
        game.discard(actor, old);
    }
    calculate_stats(&mut game.cards, champion_guid);

    log(game, actor, PlayerActionKind::Equip, Some(card), Some(location));
    Ok(())
}

/// Upgrades a player may still play this turn.
#[must_use]
pub fn upgrades_left(game: &Game, player: PlayerId) -> u32 {
    let p = game.player(player);
    let budget = game.config.class_upgrades_per_turn + p.effect_count(PlayerEffectKind::PlayExtraClassUpgrade);
    let used = p
        .actions_in_turn(game.turn_number)
        .filter(|r| r.kind == RecordKind::Player && r.name == PlayerActionKind::Upgrade.to_string())
        .count() as u32;
    budget.saturating_sub(used)
}

fn upgrade(game: &mut Game, actor: PlayerId, card: CardGuid, location: Location) -> Result<(), RuleViolation> {
    hand_card(game, actor, card, CardType::Class)?;
    let champion_guid = own_champion(game, actor, location)?;
    let class = game.cards.class(card).cloned().ok_or(RuleViolation::WrongCardType(CardType::Class))?;
    let current = game
        .cards
        .champion(champion_guid)
        .map(|c| c.cal_class.clone())
        .unwrap_or_default();
    if current != class.required_class_name {
        return Err(RuleViolation::ClassMismatch);
    }
    if upgrades_left(game, actor) == 0 {
        return Err(RuleViolation::NoUpgradesLeft);
    }

    game.player_mut(actor).remove_from_hand(card);
    let (previous, previous_action) = match game.cards.champion_mut(champion_guid) {
        Some(champion) => {
            champion.cal_class = class.class_name.clone();
            let previous_action = champion.class_action_card.take();
            if let Some(action) = previous_action {
                champion.learned_actions_cards.retain(|g| *g != action);
            }
            (champion.upgrade.replace(card), previous_action)
        }
        None => (None, None),
    };
    if let Some(old) = previous {
        game.discard(actor, old);
    }
    if let Some(old) = previous_action {
        if let Some(action) = game.cards.action_mut(old) {
            action.refresh();
        }
        game.discard(actor, old);
    }
    if let Some(name) = &class.learned_action {
        let granted = bind_learned_action(game, actor, champion_guid, name);
        if let Some(champion) = game.cards.champion_mut(champion_guid) {
            champion.class_action_card = granted;
        }
    }
    calculate_stats(&mut game.cards, champion_guid);

    debug!(champion = %champion_guid, class = %class.class_name, "champion upgraded");
    log(game, actor, PlayerActionKind::Upgrade, Some(card), Some(location));
    Ok(())
}

fn attach(game: &mut Game, actor: PlayerId, card: CardGuid, location: Location) -> Result<(), RuleViolation> {
    hand_card(game, actor, card, CardType::Action)?;
    let champion_guid = own_champion(game, actor, location)?;
    {
        let champion = game.cards.champion(champion_guid).ok_or(RuleViolation::NotAChampion)?;
        let action = game.cards.action(card).ok_or(RuleViolation::WrongCardType(CardType::Action))?;
        check_action_requirements(game, champion, action)?;
    }

    game.player_mut(actor).remove_from_hand(card);
    if let Some(action) = game.cards.action_mut(card) {
        action.refresh();
    }
    if let Some(champion) = game.cards.champion_mut(champion_guid) {
        champion.attached_actions_cards.push(card);
    }
    calculate_stats(&mut game.cards, champion_guid);

    log(game, actor, PlayerActionKind::Attach, Some(card), Some(location));
    Ok(())
}

// === Orders ===

/// Whether a card satisfies one discard spec's filters.
pub(crate) fn matches_requirement(card: &Card, requirement: &DiscardRequirement) -> bool {
    requirement.name.as_ref().map_or(true, |n| &card.name == n)
        && requirement.card_type.map_or(true, |t| card.card_type() == t)
}

/// Check a discard set pays an order's requirement exactly. Specs are
/// matched most specific first so a generic spec does not take a card a
/// named spec needs.
pub fn check_discard_requirement(game: &Game, order: &OrderCard, discards: &[CardGuid]) -> bool {
    if discards.len() != order.discard_count() {
        return false;
    }
    let mut specs: Vec<&DiscardRequirement> = order.requirement.iter().collect();
    specs.sort_by_key(|r| std::cmp::Reverse(r.specificity()));

    let mut taken = vec![false; discards.len()];
    for spec in specs {
        let mut needed = spec.amount;
        for (i, guid) in discards.iter().enumerate() {
            if needed == 0 {
                break;
            }
            if taken[i] {
                continue;
            }
            if game.cards.get(*guid).is_some_and(|c| matches_requirement(c, spec)) {
                taken[i] = true;
                needed -= 1;
            }
        }
        if needed > 0 {
            return false;
        }
    }
    true
}

fn has_duplicates(guids: &[CardGuid]) -> bool {
    let mut seen = rustc_hash::FxHashSet::default();
    guids.iter().any(|g| !seen.insert(*g))
}

/// Whether a conditioned draw may resolve.
#[must_use]
pub fn check_draw_condition(game: &Game, player: PlayerId, condition: DrawCondition) -> bool {
    let own = game.champions_of(player).count();
    match condition {
        DrawCondition::FewerChampionsThanOpponent => own < game.champions_of(player.opponent()).count(),
        DrawCondition::NoChampionsOnBoard => own == 0,
        DrawCondition::CrystalDamaged => game
            .crystal_of(player)
            .and_then(|(_, guid)| game.cards.crystal(guid))
            .is_some_and(|c| c.current_hp < c.max_hp),
    }
}

/// Deck cards matching the optional filters, from the top down.
fn deck_matches(game: &Game, player: PlayerId, card_type: Option<CardType>, name: Option<&str>) -> Vec<CardGuid> {
    game.player(player)
        .deck
        .iter()
        .rev()
        .copied()
        .filter(|guid| {
            game.cards.get(*guid).is_some_and(|c| {
                card_type.map_or(true, |t| c.card_type() == t) && name.map_or(true, |n| c.name == n)
            })
        })
        .collect()
}

/// Check that `selection` is exactly `min(amount, candidates)` distinct
/// candidates.
fn check_selection(selection: &[CardGuid], candidates: &[CardGuid], amount: u32) -> Result<(), RuleViolation> {
    let needed = (amount as usize).min(candidates.len());
    if selection.len() != needed
        || has_duplicates(selection)
        || !selection.iter().all(|g| candidates.contains(g))
    {
        return Err(RuleViolation::InvalidSelection);
    }
    Ok(())
}

fn move_deck_to_hand(game: &mut Game, player: PlayerId, cards: &[CardGuid]) {
    let p = game.player_mut(player);
    for &card in cards {
        if p.remove_from_deck(card) {
            p.hand.push_back(card);
        }
    }
}

fn play_order(
    game: &mut Game,
    actor: PlayerId,
    card: CardGuid,
    discards: &[CardGuid],
    selection: &[CardGuid],
) -> Result<(), RuleViolation> {
    hand_card(game, actor, card, CardType::Order)?;
    let order = game.cards.order(card).cloned().ok_or(RuleViolation::WrongCardType(CardType::Order))?;

    if has_duplicates(discards) || discards.contains(&card) {
        return Err(RuleViolation::InvalidSelection);
    }
    if !discards.iter().all(|g| game.player(actor).has_in_hand(*g)) {
        return Err(RuleViolation::CardNotInHand);
    }
    if !check_discard_requirement(game, &order, discards) {
        return Err(RuleViolation::RequirementNotSatisfied);
    }

    match &order.reward {
        OrderReward::SpecificDraw { amount, card_type } => {
            check_selection(selection, &deck_matches(game, actor, *card_type, None), *amount)?;
        }
        OrderReward::ReturnUsedCardToDeck { amount } => {
            let used: Vec<CardGuid> = game.player(actor).used.iter().copied().collect();
            check_selection(selection, &used, *amount)?;
        }
        OrderReward::ConditionedDraw { condition, .. } => {
            if !check_draw_condition(game, actor, *condition) {
                return Err(RuleViolation::ConditionNotMet);
            }
        }
        OrderReward::Draw { .. } | OrderReward::PlayerEffect { .. } => {}
    }

    // Pay the cost.
    for &discard in discards {
        game.player_mut(actor).remove_from_hand(discard);
        game.discard(actor, discard);
    }
    game.player_mut(actor).remove_from_hand(card);
    game.discard(actor, card);

    match order.reward {
        OrderReward::Draw { amount, card_type, name } => {
            let mut drawn = deck_matches(game, actor, card_type, name.as_deref());
            drawn.truncate(amount as usize);
            move_deck_to_hand(game, actor, &drawn);
        }
        OrderReward::ConditionedDraw { amount, .. } => {
            let mut drawn = deck_matches(game, actor, None, None);
            drawn.truncate(amount as usize);
            move_deck_to_hand(game, actor, &drawn);
        }
        OrderReward::SpecificDraw { .. } => move_deck_to_hand(game, actor, selection),
        OrderReward::ReturnUsedCardToDeck { .. } => {
            let p = game.player_mut(actor);
            for &returned in selection {
                if p.remove_from_used(returned) {
                    p.deck.push_front(returned);
                }
            }
        }
        OrderReward::PlayerEffect { kind } => {
            game.player_mut(actor).effects.push(PlayerEffect {
                kind,
                duration: order.duration.max(1),
            });
        }
    }

    debug!(order = %card, player = %actor, "order resolved");
    log(game, actor, PlayerActionKind::PlayOrder, Some(card), None);
    Ok(())
}

// === Deck building ===

/// Copies of a card name in a player's deck and starting-champion slot.
#[must_use]
pub fn copies_in_deck(game: &Game, player: PlayerId, name: &str) -> usize {
    let p = game.player(player);
    p.deck
        .iter()
        .chain(p.starting_champion.iter())
        .filter(|g| game.cards.name(**g) == Some(name))
        .count()
}

fn add_card_to_deck(game: &mut Game, pool: &mut CardPool, actor: PlayerId, card: CardGuid) -> Result<(), RuleViolation> {
    let name = pool.get(card).ok_or(RuleViolation::CardNotInPool)?.name.clone();
    let max = game.config.max_copies_per_card;
    if copies_in_deck(game, actor, &name) >= max {
        return Err(RuleViolation::TooManyCopies { name, max });
    }
    let taken = pool.take(card).ok_or(RuleViolation::CardNotInPool)?;
    game.put_in_deck(actor, taken);
    Ok(())
}

fn return_to_pool(game: &mut Game, pool: &mut CardPool, card: CardGuid) {
    if let Some(removed) = game.cards.remove(card) {
        pool.put(removed);
    }
}

fn remove_card_from_deck(game: &mut Game, pool: &mut CardPool, actor: PlayerId, card: CardGuid) -> Result<(), RuleViolation> {
    if !game.player_mut(actor).remove_from_deck(card) {
        return Err(RuleViolation::CardNotInDeck);
    }
    return_to_pool(game, pool, card);
    Ok(())
}

fn clear_deck(game: &mut Game, pool: &mut CardPool, actor: PlayerId) {
    let player = game.player_mut(actor);
    let mut cards: Vec<CardGuid> = player.deck.iter().copied().collect();
    cards.extend(player.starting_champion.take());
    player.deck.clear();
    for card in cards {
        return_to_pool(game, pool, card);
    }
}

fn set_starting_champion(game: &mut Game, actor: PlayerId, card: CardGuid) -> Result<(), RuleViolation> {
    if game.player(actor).starting_champion == Some(card) {
        return Err(RuleViolation::SameStartingChampion);
    }
    if !game.player(actor).deck.contains(&card) {
        return Err(RuleViolation::CardNotInDeck);
    }
    if !game.cards.get(card).is_some_and(|c| matches!(c.kind, CardKind::Champion(_))) {
        return Err(RuleViolation::WrongCardType(CardType::Champion));
    }

    let player = game.player_mut(actor);
    player.remove_from_deck(card);
    if let Some(previous) = player.starting_champion.replace(card) {
        player.deck.push_back(previous);
    }
    Ok(())
}

// === Turn handoff ===

fn end_turn(game: &mut Game, actor: PlayerId) {
    log(game, actor, PlayerActionKind::EndTurn, None, None);

    let champions: Vec<CardGuid> = game.champions_of(actor).map(|(_, guid)| guid).collect();
    for champion in champions {
        update_champion_status_effects(game, champion);
    }
    bury_dead_champions(game);
    game.player_mut(actor).tick_effects();

    let next = actor.opponent();
    game.playing_player = next;
    game.turn_number += 1;
    refresh_player(game, next);

    info!(player = %next, turn = game.turn_number, "turn started");
}

/// Restore a player's per-turn resources and their champions' stamina,
/// defense pools and action flags.
pub fn refresh_player(game: &mut Game, player: PlayerId) {
    let summons = game.config.summons_per_turn
        + game.player(player).effect_count(PlayerEffectKind::ExtraSummon);
    let p = game.player_mut(player);
    p.did_draw = false;
    p.summons_left = summons;

    let max_stamina = game.config.max_stamina;
    let champions: Vec<CardGuid> = game.champions_of(player).map(|(_, guid)| guid).collect();
    for guid in champions {
        if let Some(champion) = game.cards.champion_mut(guid) {
            champion.stm = max_stamina;
            champion.armor = champion.cal.strength;
            champion.mental = champion.cal.intelligence;
        }
        refresh_learned_actions(game, guid);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{ActionCard, Champion, ClassCard, Gear, Stat, StatBlock};
    use crate::core::{GuidAllocator, RulesConfig};
    use crate::effects::{StatusEffect, StatusEffectName};
    use crate::zones::check_single_zone;

    const P0: PlayerId = PlayerId::new(0);
    const P1: PlayerId = PlayerId::new(1);

    struct Fixture {
        game: Game,
        pool: CardPool,
        guids: GuidAllocator,
    }

    impl Fixture {
        fn new() -> Self {
            let mut guids = GuidAllocator::new();
            let mut game = Game::new(RulesConfig::default(), &mut guids);
            game.status = GameStatus::OnGoing;
            game.player_mut(P0).summons_left = 1;
            Self {
                game,
                pool: CardPool::new(),
                guids,
            }
        }

        fn card(&mut self, name: &str, kind: CardKind) -> Card {
            Card::new(self.guids.alloc(), name, kind)
        }

        fn in_hand(&mut self, player: PlayerId, name: &str, kind: CardKind) -> CardGuid {
            let card = self.card(name, kind).with_owner(player);
            let guid = card.guid;
            self.game.cards.insert(card);
            self.game.player_mut(player).hand.push_back(guid);
            guid
        }

        fn in_deck(&mut self, player: PlayerId, name: &str, kind: CardKind) -> CardGuid {
            let card = self.card(name, kind);
            self.game.put_in_deck(player, card)
        }

        fn act(&mut self, actor: PlayerId, action: PlayerAction) -> Result<(), RuleViolation> {
            resolve_player_action(&mut self.game, &mut self.pool, actor, action)
        }

        fn summoned(&mut self, player: PlayerId, location: Location, champion: Champion) -> CardGuid {
            let guid = self.in_hand(player, "Squire", CardKind::Champion(champion));
            self.game.player_mut(player).summons_left = 1;
            let previous = self.game.playing_player;
            self.game.playing_player = player;
            self.act(player, PlayerAction::Summon { card: guid, location }).unwrap();
            self.game.playing_player = previous;
            guid
        }
    }

    fn squire() -> Champion {
        Champion::new("Warrior", StatBlock::new(5, 2, 1, 12))
    }

    fn sword() -> CardKind {
        CardKind::Gear(Gear::new(BodyPart::Hand, "Sword", StatBlock::new(2, 0, 0, 0)))
    }

    fn slash() -> CardKind {
        CardKind::Action(ActionCard::basic_hit())
    }

    #[test]
    fn test_action_kind_names() {
        use std::str::FromStr;
        assert_eq!(PlayerActionKind::TurnDraw.to_string(), "TurnDraw");
        assert_eq!(PlayerActionKind::from_str("PlayOrder"), Ok(PlayerActionKind::PlayOrder));
        assert_eq!(PlayerAction::ClearDeck.kind(), PlayerActionKind::ClearDeck);
    }

    #[test]
    fn test_turn_draw_once() {
        let mut f = Fixture::new();
        let top = f.in_deck(P0, "Slash", slash());

        f.act(P0, PlayerAction::TurnDraw).unwrap();
        assert!(f.game.player(P0).has_in_hand(top));
        assert!(f.game.player(P0).did_draw);
        assert_eq!(f.act(P0, PlayerAction::TurnDraw), Err(RuleViolation::AlreadyDrew));
    }

    #[test]
    fn test_turn_draw_empty_deck() {
        let mut f = Fixture::new();
        assert_eq!(f.act(P0, PlayerAction::TurnDraw), Err(RuleViolation::NotEnoughCards));
    }

    #[test]
    fn test_not_your_turn() {
        let mut f = Fixture::new();
        assert_eq!(f.act(P1, PlayerAction::TurnDraw), Err(RuleViolation::NotYourTurn));
        assert_eq!(f.act(P1, PlayerAction::EndTurn), Err(RuleViolation::NotYourTurn));
    }

    #[test]
    fn test_initial_draw_includes_starting_champion() {
        let mut f = Fixture::new();
        for _ in 0..5 {
            f.in_deck(P1, "Slash", slash());
        }
        let leader = f.card("Squire", CardKind::Champion(squire())).with_owner(P1);
        let leader_guid = leader.guid;
        f.game.cards.insert(leader);
        f.game.player_mut(P1).starting_champion = Some(leader_guid);

        f.act(P1, PlayerAction::InitialDraw).unwrap();

        let p1 = f.game.player(P1);
        assert_eq!(p1.hand.len(), 6);
        assert!(p1.has_in_hand(leader_guid));
        assert!(p1.starting_champion.is_none());
        assert_eq!(check_single_zone(&f.game), Ok(()));
    }

    #[test]
    fn test_initial_draw_only_once() {
        let mut f = Fixture::new();
        for _ in 0..10 {
            f.in_deck(P1, "Slash", slash());
        }
        f.act(P1, PlayerAction::InitialDraw).unwrap();

        assert_eq!(f.act(P1, PlayerAction::InitialDraw), Err(RuleViolation::InitialHandDrawn));
        f.game.turn_number += 2;
        assert_eq!(f.act(P1, PlayerAction::InitialDraw), Err(RuleViolation::InitialHandDrawn));
        assert_eq!(f.game.player(P1).hand.len(), 5);
    }

    #[test]
    fn test_summon_binds_learned_actions() {
        let mut f = Fixture::new();
        let from_deck = f.in_deck(P0, "Slash", slash());
        let from_hand = f.in_hand(P0, "Slash", slash());
        let champion = f.in_hand(
            P0,
            "Squire",
            CardKind::Champion(squire().with_learned_actions(["Slash"])),
        );

        f.act(P0, PlayerAction::Summon { card: champion, location: Location::new(5, 1) })
            .unwrap();

        let c = f.game.cards.champion(champion).unwrap();
        assert_eq!(c.learned_actions_cards, vec![from_deck]);
        assert_eq!(c.stm, 2);
        assert_eq!(c.direction, Direction::Up);
        assert!(f.game.player(P0).has_in_hand(from_hand));
        assert_eq!(f.game.player(P0).summons_left, 0);
        assert_eq!(f.game.board.get(Location::new(5, 1)), Some(champion));
        assert_eq!(check_single_zone(&f.game), Ok(()));
    }

    #[test]
    fn test_summon_prefers_used_pile() {
        let mut f = Fixture::new();
        f.in_deck(P0, "Slash", slash());
        let used = f.card("Slash", slash()).with_owner(P0);
        let used_guid = used.guid;
        f.game.cards.insert(used);
        f.game.discard(P0, used_guid);
        let champion = f.in_hand(
            P0,
            "Squire",
            CardKind::Champion(squire().with_learned_actions(["Slash"])),
        );

        f.act(P0, PlayerAction::Summon { card: champion, location: Location::new(5, 1) })
            .unwrap();

        let c = f.game.cards.champion(champion).unwrap();
        assert_eq!(c.learned_actions_cards, vec![used_guid]);
    }

    #[test]
    fn test_summon_rejections() {
        let mut f = Fixture::new();
        let champion = f.in_hand(P0, "Squire", CardKind::Champion(squire()));
        let gear = f.in_hand(P0, "Sword", sword());

        assert_eq!(
            f.act(P0, PlayerAction::Summon { card: gear, location: Location::new(5, 1) }),
            Err(RuleViolation::WrongCardType(CardType::Champion))
        );
        assert_eq!(
            f.act(P0, PlayerAction::Summon { card: champion, location: Location::new(2, 1) }),
            Err(RuleViolation::NotHomeRow)
        );
        assert_eq!(
            f.act(P0, PlayerAction::Summon { card: champion, location: Location::new(6, 2) }),
            Err(RuleViolation::LocationOccupied)
        );
        assert_eq!(
            f.act(P0, PlayerAction::Summon { card: champion, location: Location::new(9, 1) }),
            Err(RuleViolation::OutOfBoard)
        );

        f.game.player_mut(P0).summons_left = 0;
        assert_eq!(
            f.act(P0, PlayerAction::Summon { card: champion, location: Location::new(5, 1) }),
            Err(RuleViolation::NoSummonsLeft)
        );
    }

    #[test]
    fn test_summon_area_for_second_player() {
        let mut f = Fixture::new();
        let locations = summon_locations(&f.game, P1);
        assert!(locations.iter().all(|l| l.row <= 1));
        // Two rows of five minus the crystal.
        assert_eq!(locations.len(), 9);

        f.game.playing_player = P1;
        f.game.player_mut(P1).summons_left = 1;
        let champion = f.in_hand(P1, "Squire", CardKind::Champion(squire()));
        f.act(P1, PlayerAction::Summon { card: champion, location: Location::new(1, 0) }).unwrap();
        assert_eq!(f.game.cards.champion(champion).unwrap().direction, Direction::Down);
    }

    #[test]
    fn test_equip_hand_slots() {
        let mut f = Fixture::new();
        let champion = f.summoned(P0, Location::new(5, 1), squire());
        let location = Location::new(5, 1);
        let first = f.in_hand(P0, "Sword", sword());
        let second = f.in_hand(P0, "Sword", sword());
        let third = f.in_hand(P0, "Sword", sword());

        f.act(P0, PlayerAction::Equip { card: first, location }).unwrap();
        f.act(P0, PlayerAction::Equip { card: second, location }).unwrap();
        let c = f.game.cards.champion(champion).unwrap();
        assert_eq!(c.right_hand, Some(first));
        assert_eq!(c.left_hand, Some(second));
        assert_eq!(c.cal.strength, 9);

        f.act(P0, PlayerAction::Equip { card: third, location }).unwrap();
        let c = f.game.cards.champion(champion).unwrap();
        assert_eq!(c.right_hand, Some(third));
        assert!(f.game.player(P0).used.contains(&first));
        assert_eq!(check_single_zone(&f.game), Ok(()));
    }

    #[test]
    fn test_equip_body_and_targets() {
        let mut f = Fixture::new();
        let champion = f.summoned(P0, Location::new(5, 1), squire());
        let enemy = f.summoned(P1, Location::new(1, 1), squire());
        let armor = f.in_hand(
            P0,
            "Mail",
            CardKind::Gear(Gear::new(BodyPart::Body, "Armor", StatBlock::new(0, 0, 0, 3))),
        );

        assert_eq!(
            f.act(P0, PlayerAction::Equip { card: armor, location: Location::new(1, 1) }),
            Err(RuleViolation::NotYourChampion)
        );
        assert_eq!(
            f.act(P0, PlayerAction::Equip { card: armor, location: Location::new(3, 3) }),
            Err(RuleViolation::EntityNotFound)
        );
        f.act(P0, PlayerAction::Equip { card: armor, location: Location::new(5, 1) }).unwrap();

        assert_eq!(f.game.cards.champion(champion).unwrap().body, Some(armor));
        assert_eq!(f.game.cards.champion(champion).unwrap().cal.hp, 15);
        assert!(f.game.cards.champion(enemy).unwrap().body.is_none());
    }

    #[test]
    fn test_upgrade_grants_class_and_action() {
        let mut f = Fixture::new();
        let champion = f.summoned(P0, Location::new(5, 1), squire());
        let bash = f.in_deck(P0, "Shield Bash", slash());
        let knight = f.in_hand(
            P0,
            "Knight",
            CardKind::Class(
                ClassCard::new("Knight", "Warrior", StatBlock::new(1, 0, 0, 4))
                    .with_learned_action("Shield Bash"),
            ),
        );

        f.act(P0, PlayerAction::Upgrade { card: knight, location: Location::new(5, 1) }).unwrap();

        let c = f.game.cards.champion(champion).unwrap();
        assert_eq!(c.upgrade, Some(knight));
        assert_eq!(c.cal_class, "Knight");
        assert_eq!(c.cal.strength, 6);
        assert_eq!(c.cal.hp, 16);
        assert!(c.learned_actions_cards.contains(&bash));
        assert_eq!(check_single_zone(&f.game), Ok(()));
    }

    #[test]
    fn test_upgrade_budget_and_class() {
        let mut f = Fixture::new();
        f.summoned(P0, Location::new(5, 1), squire());
        f.summoned(P0, Location::new(5, 3), squire());
        let knight = |f: &mut Fixture| {
            f.in_hand(
                P0,
                "Knight",
                CardKind::Class(ClassCard::new("Knight", "Warrior", StatBlock::default())),
            )
        };
        let mage = f.in_hand(
            P0,
            "Archmage",
            CardKind::Class(ClassCard::new("Archmage", "Mage", StatBlock::default())),
        );
        assert_eq!(
            f.act(P0, PlayerAction::Upgrade { card: mage, location: Location::new(5, 1) }),
            Err(RuleViolation::ClassMismatch)
        );

        let first = knight(&mut f);
        let second = knight(&mut f);
        f.act(P0, PlayerAction::Upgrade { card: first, location: Location::new(5, 1) }).unwrap();
        assert_eq!(
            f.act(P0, PlayerAction::Upgrade { card: second, location: Location::new(5, 3) }),
            Err(RuleViolation::NoUpgradesLeft)
        );

        f.game.player_mut(P0).effects.push(PlayerEffect {
            kind: PlayerEffectKind::PlayExtraClassUpgrade,
            duration: 1,
        });
        f.act(P0, PlayerAction::Upgrade { card: second, location: Location::new(5, 3) }).unwrap();
    }

    #[test]
    fn test_class_action_leaves_with_the_champion() {
        let mut f = Fixture::new();
        let location = Location::new(5, 1);
        let champion = f.summoned(P0, location, squire());
        let bash = f.in_deck(P0, "Shield Bash", slash());
        let knight = f.in_hand(
            P0,
            "Knight",
            CardKind::Class(
                ClassCard::new("Knight", "Warrior", StatBlock::default())
                    .with_learned_action("Shield Bash"),
            ),
        );
        f.act(P0, PlayerAction::Upgrade { card: knight, location }).unwrap();

        crate::rules::kill_champion(&mut f.game, champion, location);

        let c = f.game.cards.champion(champion).unwrap();
        assert!(c.learned_actions.is_empty());
        assert_eq!(c.class_action_card, None);
        assert_eq!(c.cal_class, "Warrior");
        assert!(f.game.player(P0).used.contains(&bash));
        assert_eq!(check_single_zone(&f.game), Ok(()));
    }

    #[test]
    fn test_second_upgrade_drops_previous_class_action() {
        let mut f = Fixture::new();
        let location = Location::new(5, 1);
        let champion = f.summoned(P0, location, squire());
        let bash = f.in_deck(P0, "Shield Bash", slash());
        let smite = f.in_deck(P0, "Smite", slash());
        let knight = f.in_hand(
            P0,
            "Knight",
            CardKind::Class(
                ClassCard::new("Knight", "Warrior", StatBlock::default())
                    .with_learned_action("Shield Bash"),
            ),
        );
        let paladin = f.in_hand(
            P0,
            "Paladin",
            CardKind::Class(
                ClassCard::new("Paladin", "Knight", StatBlock::default())
                    .with_learned_action("Smite"),
            ),
        );
        f.game.player_mut(P0).effects.push(PlayerEffect {
            kind: PlayerEffectKind::PlayExtraClassUpgrade,
            duration: 1,
        });

        f.act(P0, PlayerAction::Upgrade { card: knight, location }).unwrap();
        f.act(P0, PlayerAction::Upgrade { card: paladin, location }).unwrap();

        let c = f.game.cards.champion(champion).unwrap();
        assert_eq!(c.cal_class, "Paladin");
        assert_eq!(c.learned_actions_cards, vec![smite]);
        assert_eq!(c.class_action_card, Some(smite));
        let used = &f.game.player(P0).used;
        assert!(used.contains(&bash));
        assert!(used.contains(&knight));
        assert_eq!(check_single_zone(&f.game), Ok(()));
    }

    #[test]
    fn test_attach_checks_requirements() {
        let mut f = Fixture::new();
        let champion = f.summoned(P0, Location::new(5, 1), squire());
        let location = Location::new(5, 1);
        let gated = f.in_hand(
            P0,
            "Arcane Might",
            CardKind::Action(ActionCard::basic_hit().requires_stat(Stat::Int, 3)),
        );
        let open = f.in_hand(P0, "Cleave", slash());

        assert_eq!(
            f.act(P0, PlayerAction::Attach { card: gated, location }),
            Err(RuleViolation::StatTooLow)
        );
        f.act(P0, PlayerAction::Attach { card: open, location }).unwrap();

        let c = f.game.cards.champion(champion).unwrap();
        assert_eq!(c.attached_actions_cards, vec![open]);
        assert_eq!(check_single_zone(&f.game), Ok(()));
    }

    fn order(reward: OrderReward) -> CardKind {
        CardKind::Order(OrderCard::new(reward).with_requirement(DiscardRequirement::any(1)))
    }

    #[test]
    fn test_order_draw_with_filter() {
        let mut f = Fixture::new();
        let champion_in_deck = f.in_deck(P0, "Squire", CardKind::Champion(squire()));
        f.in_deck(P0, "Slash", slash());
        let recruit = f.in_hand(
            P0,
            "Recruit",
            order(OrderReward::Draw { amount: 2, card_type: Some(CardType::Champion), name: None }),
        );
        let fodder = f.in_hand(P0, "Sword", sword());

        f.act(
            P0,
            PlayerAction::PlayOrder { card: recruit, discards: vec![fodder], selection: vec![] },
        )
        .unwrap();

        let p0 = f.game.player(P0);
        assert_eq!(p0.hand.iter().copied().collect::<Vec<_>>(), vec![champion_in_deck]);
        assert_eq!(p0.deck.len(), 1);
        assert!(p0.used.contains(&recruit));
        assert!(p0.used.contains(&fodder));
        assert_eq!(check_single_zone(&f.game), Ok(()));
    }

    #[test]
    fn test_order_requirement_exact() {
        let mut f = Fixture::new();
        let typed = CardKind::Order(
            OrderCard::new(OrderReward::default())
                .with_requirement(DiscardRequirement::of_type(1, CardType::Gear))
                .with_requirement(DiscardRequirement::any(1)),
        );
        let card = f.in_hand(P0, "Trade", typed);
        let action = f.in_hand(P0, "Slash", slash());
        let other_action = f.in_hand(P0, "Slash", slash());
        let gear = f.in_hand(P0, "Sword", sword());
        f.in_deck(P0, "Slash", slash());

        let play = |discards: Vec<CardGuid>| PlayerAction::PlayOrder { card, discards, selection: vec![] };

        assert_eq!(f.act(P0, play(vec![action])), Err(RuleViolation::RequirementNotSatisfied));
        assert_eq!(
            f.act(P0, play(vec![action, other_action])),
            Err(RuleViolation::RequirementNotSatisfied)
        );
        assert_eq!(f.act(P0, play(vec![action, action])), Err(RuleViolation::InvalidSelection));
        assert_eq!(f.act(P0, play(vec![card, gear])), Err(RuleViolation::InvalidSelection));
        // The generic spec must not consume the gear the typed spec needs.
        f.act(P0, play(vec![gear, action])).unwrap();
    }

    #[test]
    fn test_specific_draw_selection() {
        let mut f = Fixture::new();
        let wanted = f.in_deck(P0, "Slash", slash());
        f.in_deck(P0, "Sword", sword());
        let scout = f.in_hand(
            P0,
            "Scout Report",
            order(OrderReward::SpecificDraw { amount: 1, card_type: Some(CardType::Action) }),
        );
        let fodder = f.in_hand(P0, "Sword", sword());

        let bad = f.game.player(P0).deck.back().copied().unwrap();
        assert_eq!(
            f.act(P0, PlayerAction::PlayOrder { card: scout, discards: vec![fodder], selection: vec![bad] }),
            Err(RuleViolation::InvalidSelection)
        );
        f.act(P0, PlayerAction::PlayOrder { card: scout, discards: vec![fodder], selection: vec![wanted] })
            .unwrap();
        assert!(f.game.player(P0).has_in_hand(wanted));
    }

    #[test]
    fn test_conditioned_draw() {
        let mut f = Fixture::new();
        f.in_deck(P0, "Slash", slash());
        let call = |f: &mut Fixture| {
            f.in_hand(
                P0,
                "Desperate Call",
                order(OrderReward::ConditionedDraw { amount: 2, condition: DrawCondition::NoChampionsOnBoard }),
            )
        };
        let first = call(&mut f);
        let fodder = f.in_hand(P0, "Sword", sword());

        // Partial draw: one card left in the deck.
        f.act(P0, PlayerAction::PlayOrder { card: first, discards: vec![fodder], selection: vec![] })
            .unwrap();
        assert_eq!(f.game.player(P0).deck.len(), 0);

        f.summoned(P0, Location::new(5, 1), squire());
        let second = call(&mut f);
        let fodder = f.in_hand(P0, "Sword", sword());
        assert_eq!(
            f.act(P0, PlayerAction::PlayOrder { card: second, discards: vec![fodder], selection: vec![] }),
            Err(RuleViolation::ConditionNotMet)
        );
        assert!(check_draw_condition(&f.game, P1, DrawCondition::FewerChampionsThanOpponent));
    }

    #[test]
    fn test_return_used_card_to_deck() {
        let mut f = Fixture::new();
        let old = f.card("Slash", slash()).with_owner(P0);
        let old_guid = old.guid;
        f.game.cards.insert(old);
        f.game.discard(P0, old_guid);
        f.in_deck(P0, "Sword", sword());
        let salvage = f.in_hand(P0, "Salvage", order(OrderReward::ReturnUsedCardToDeck { amount: 2 }));
        let fodder = f.in_hand(P0, "Sword", sword());

        f.act(
            P0,
            PlayerAction::PlayOrder { card: salvage, discards: vec![fodder], selection: vec![old_guid] },
        )
        .unwrap();

        assert_eq!(f.game.player(P0).deck.front(), Some(&old_guid));
        assert!(!f.game.player(P0).used.contains(&old_guid));
    }

    #[test]
    fn test_player_effect_extra_summon() {
        let mut f = Fixture::new();
        let rally = f.in_hand(
            P0,
            "Rally",
            CardKind::Order(
                OrderCard::new(OrderReward::PlayerEffect { kind: PlayerEffectKind::ExtraSummon })
                    .with_requirement(DiscardRequirement::any(1))
                    .with_duration(2),
            ),
        );
        let fodder = f.in_hand(P0, "Sword", sword());
        f.act(P0, PlayerAction::PlayOrder { card: rally, discards: vec![fodder], selection: vec![] })
            .unwrap();

        f.act(P0, PlayerAction::EndTurn).unwrap();
        f.act(P1, PlayerAction::EndTurn).unwrap();

        assert_eq!(f.game.player(P0).summons_left, 2);
    }

    #[test]
    fn test_end_turn_refreshes_next_player() {
        let mut f = Fixture::new();
        let enemy = f.summoned(P1, Location::new(1, 1), squire());
        {
            let c = f.game.cards.champion_mut(enemy).unwrap();
            c.stm = 0;
            c.armor = 0;
        }
        f.game.player_mut(P1).did_draw = true;

        f.act(P0, PlayerAction::EndTurn).unwrap();

        assert_eq!(f.game.playing_player, P1);
        assert_eq!(f.game.turn_number, 2);
        let p1 = f.game.player(P1);
        assert!(!p1.did_draw);
        assert_eq!(p1.summons_left, 1);
        let c = f.game.cards.champion(enemy).unwrap();
        assert_eq!(c.stm, 2);
        assert_eq!(c.armor, 5);
    }

    #[test]
    fn test_end_turn_ticks_statuses_and_buries() {
        let mut f = Fixture::new();
        let burning = f.summoned(P0, Location::new(5, 1), squire());
        {
            let c = f.game.cards.champion_mut(burning).unwrap();
            c.current_hp = 2;
            c.status_effects.push(StatusEffect::new(StatusEffectName::Burn, 3, 2));
        }

        f.act(P0, PlayerAction::EndTurn).unwrap();

        assert_eq!(f.game.board.get(Location::new(5, 1)), None);
        assert!(f.game.player(P0).used.contains(&burning));
        assert_eq!(check_single_zone(&f.game), Ok(()));
    }

    #[test]
    fn test_surrender() {
        let mut f = Fixture::new();
        f.act(P1, PlayerAction::Surrender).unwrap();
        assert_eq!(f.game.status, GameStatus::Over);
        assert_eq!(f.game.loser, Some(P1));
        assert_eq!(f.act(P0, PlayerAction::TurnDraw), Err(RuleViolation::GameOver));
    }

    #[test]
    fn test_deck_building() {
        let mut f = Fixture::new();
        f.game.status = GameStatus::Starting;
        let copies: Vec<CardGuid> = (0..4)
            .map(|_| {
                let card = f.card("Slash", slash());
                let guid = card.guid;
                f.pool.put(card);
                guid
            })
            .collect();

        for &guid in &copies[..3] {
            f.act(P0, PlayerAction::AddCardToDeck { card: guid }).unwrap();
        }
        assert_eq!(
            f.act(P0, PlayerAction::AddCardToDeck { card: copies[3] }),
            Err(RuleViolation::TooManyCopies { name: "Slash".into(), max: 3 })
        );
        assert_eq!(f.game.player(P0).deck.len(), 3);
        assert_eq!(f.game.owner_of(copies[0]), Some(P0));

        f.act(P0, PlayerAction::RemoveCardFromDeck { card: copies[0] }).unwrap();
        assert!(f.pool.contains(copies[0]));
        assert_eq!(f.pool.get(copies[0]).unwrap().owner, None);
        assert_eq!(
            f.act(P0, PlayerAction::RemoveCardFromDeck { card: copies[0] }),
            Err(RuleViolation::CardNotInDeck)
        );

        f.act(P0, PlayerAction::ClearDeck).unwrap();
        assert!(f.game.player(P0).deck.is_empty());
        assert_eq!(f.pool.len(), 4);
        assert_eq!(check_single_zone(&f.game), Ok(()));
    }

    #[test]
    fn test_starting_champion_swap() {
        let mut f = Fixture::new();
        f.game.status = GameStatus::Starting;
        let first = f.in_deck(P0, "Squire", CardKind::Champion(squire()));
        let second = f.in_deck(P0, "Scout", CardKind::Champion(squire()));
        let action = f.in_deck(P0, "Slash", slash());

        f.act(P0, PlayerAction::SetStartingChampion { card: first }).unwrap();
        assert_eq!(
            f.act(P0, PlayerAction::SetStartingChampion { card: first }),
            Err(RuleViolation::SameStartingChampion)
        );
        assert_eq!(
            f.act(P0, PlayerAction::SetStartingChampion { card: action }),
            Err(RuleViolation::WrongCardType(CardType::Champion))
        );
        f.act(P0, PlayerAction::SetStartingChampion { card: second }).unwrap();

        let p0 = f.game.player(P0);
        assert_eq!(p0.starting_champion, Some(second));
        assert!(p0.deck.contains(&first));
        assert_eq!(check_single_zone(&f.game), Ok(()));
    }

    #[test]
    fn test_phase_gates() {
        let mut f = Fixture::new();
        assert_eq!(f.act(P0, PlayerAction::ClearDeck), Err(RuleViolation::NotDeckBuilding));

        f.game.status = GameStatus::Starting;
        assert_eq!(f.act(P0, PlayerAction::TurnDraw), Err(RuleViolation::GameNotStarted));
    }
}
