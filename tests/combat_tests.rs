//! Combat integration tests.
//!
//! Champions are placed straight onto the board of a started game and act
//! through the controller with learned action cards.

use proptest::prelude::*;

use crystal_tactics::cards::{
    ActionCard, ActionType, Champion, DamageTerm, Stat, StatBlock, TargetDirection,
};
use crystal_tactics::effects::{StatusEffect, StatusEffectName};
use crystal_tactics::rules::{champion_action, new_game, player_action, start_game};
use crystal_tactics::{
    check_single_zone, ActionRef, Card, CardGuid, CardKind, CardPool, Game, GuidAllocator,
    InnateAction, Location, PlayerAction, PlayerId, RuleViolation, RulesConfig,
};

const P0: PlayerId = PlayerId::new(0);
const P1: PlayerId = PlayerId::new(1);

struct Arena {
    game: Game,
    guids: GuidAllocator,
}

impl Arena {
    fn new() -> Self {
        let mut guids = GuidAllocator::new();
        let mut game = new_game(RulesConfig::default(), Default::default(), &mut guids);
        start_game(&mut game).unwrap();
        Self { game, guids }
    }

    fn place(&mut self, owner: PlayerId, location: Location, class: &str, stats: StatBlock) -> CardGuid {
        let guid = self.guids.alloc();
        let mut champion = Champion::new(class, stats);
        champion.stm = 2;
        self.game
            .cards
            .insert(Card::new(guid, class, CardKind::Champion(champion)).with_owner(owner));
        self.game.board.place(location, guid);
        guid
    }

    fn learn(&mut self, champion: CardGuid, name: &str, action: ActionCard) -> CardGuid {
        let owner = self.game.owner_of(champion).unwrap();
        let guid = self.guids.alloc();
        self.game
            .cards
            .insert(Card::new(guid, name, CardKind::Action(action)).with_owner(owner));
        self.game
            .cards
            .champion_mut(champion)
            .unwrap()
            .learned_actions_cards
            .push(guid);
        guid
    }

    fn end_turn(&mut self, player: PlayerId) {
        player_action(&mut self.game, &mut CardPool::new(), player, PlayerAction::EndTurn).unwrap();
    }
}

fn fireball() -> ActionCard {
    ActionCard::new(ActionType::Magic)
        .with_damage(DamageTerm::of(Stat::Int).plus(2))
        .with_distance(1, 3)
        .free_targeting()
        .with_target_effect(StatusEffect::new(StatusEffectName::Burn, 2, 2))
}

fn mend() -> ActionCard {
    ActionCard::new(ActionType::Support)
        .with_damage(DamageTerm::of(Stat::Int).plus(1))
        .with_distance(1, 2)
        .with_direction(TargetDirection::Any)
        .heal()
        .free_targeting()
}

/// Magic drains the mental pool first, and the burn ticks only when the
/// victim's owner ends a turn.
#[test]
fn test_fireball_burns_on_victim_turn_end() {
    let mut arena = Arena::new();
    let mage = arena.place(P0, Location::new(5, 2), "Mage", StatBlock::new(1, 2, 5, 9));
    let knight = arena.place(P1, Location::new(3, 2), "Warrior", StatBlock::new(4, 2, 1, 12));
    let spell = arena.learn(mage, "Fireball", fireball());

    champion_action(
        &mut arena.game,
        P0,
        ActionRef::Learned(spell),
        Location::new(5, 2),
        Location::new(3, 2),
    )
    .unwrap();

    let victim = arena.game.cards.champion(knight).unwrap();
    assert_eq!(victim.current_hp, 6);
    assert_eq!(victim.mental, 0);
    assert_eq!(victim.armor, 4);
    assert!(victim.has_status(StatusEffectName::Burn));

    arena.end_turn(P0);
    assert_eq!(arena.game.cards.champion(knight).unwrap().current_hp, 6);

    arena.end_turn(P1);
    assert_eq!(arena.game.cards.champion(knight).unwrap().current_hp, 4);

    arena.end_turn(P0);
    arena.end_turn(P1);
    let victim = arena.game.cards.champion(knight).unwrap();
    assert_eq!(victim.current_hp, 2);
    assert!(victim.status_effects.is_empty());
}

/// A learned action is used once per turn and recovers at the refresh.
#[test]
fn test_learned_action_once_per_turn() {
    let mut arena = Arena::new();
    let mage = arena.place(P0, Location::new(5, 2), "Mage", StatBlock::new(1, 2, 5, 9));
    arena.place(P1, Location::new(3, 2), "Warrior", StatBlock::new(4, 2, 1, 30));
    let spell = arena.learn(mage, "Fireball", fireball());
    let cast = |game: &mut Game| {
        champion_action(
            game,
            P0,
            ActionRef::Learned(spell),
            Location::new(5, 2),
            Location::new(3, 2),
        )
    };

    cast(&mut arena.game).unwrap();
    assert_eq!(cast(&mut arena.game), Err(RuleViolation::ActionAlreadyPlayed));

    arena.end_turn(P0);
    arena.end_turn(P1);
    cast(&mut arena.game).unwrap();
}

/// A lethal hit clears the cell and discards the champion with its bound
/// cards; the champion card returns to its printed state.
#[test]
fn test_lethal_hit_discards_bound_cards() {
    let mut arena = Arena::new();
    arena.place(P0, Location::new(4, 2), "Warrior", StatBlock::new(6, 2, 1, 12));
    let victim = arena.place(P1, Location::new(3, 2), "Rogue", StatBlock::new(1, 3, 1, 4));
    let stab = arena.learn(victim, "Quick Stab", ActionCard::basic_hit());

    champion_action(
        &mut arena.game,
        P0,
        ActionRef::Innate(InnateAction::BasicHit),
        Location::new(4, 2),
        Location::new(3, 2),
    )
    .unwrap();

    let game = &arena.game;
    assert!(game.board.is_empty_at(Location::new(3, 2)));
    let used = &game.player(P1).used;
    assert!(used.contains(&victim));
    assert!(used.contains(&stab));

    let reset = game.cards.champion(victim).unwrap();
    assert_eq!(reset.current_hp, 4);
    assert!(reset.learned_actions_cards.is_empty());
    assert_eq!(check_single_zone(game), Ok(()));
}

/// Units between attacker and target stop a non-free attack.
#[test]
fn test_blocked_shot() {
    let mut arena = Arena::new();
    let archer = arena.place(P0, Location::new(5, 0), "Ranger", StatBlock::new(3, 2, 1, 10));
    arena.place(P0, Location::new(4, 0), "Warrior", StatBlock::new(3, 2, 1, 10));
    arena.place(P1, Location::new(2, 0), "Warrior", StatBlock::new(3, 2, 1, 10));
    let bow = arena.learn(
        archer,
        "Bow Shot",
        ActionCard::new(ActionType::Ranged)
            .with_damage(DamageTerm::of(Stat::Dex))
            .with_distance(1, 4),
    );
    let before = arena.game.clone();

    let result = champion_action(
        &mut arena.game,
        P0,
        ActionRef::Learned(bow),
        Location::new(5, 0),
        Location::new(2, 0),
    );

    assert_eq!(result, Err(RuleViolation::PathBlocked));
    assert_eq!(arena.game, before);
}

proptest! {
    /// Healing never lifts a champion above its derived maximum.
    #[test]
    fn prop_heal_is_capped(intelligence in 0i32..8, missing in 0i32..12) {
        let mut arena = Arena::new();
        let priest = arena.place(P0, Location::new(5, 1), "Priest", StatBlock::new(1, 2, intelligence, 10));
        let ally = arena.place(P0, Location::new(5, 3), "Warrior", StatBlock::new(3, 2, 1, 12));
        arena.game.cards.champion_mut(ally).unwrap().current_hp = 12 - missing;
        let spell = arena.learn(priest, "Mend", mend());

        champion_action(
            &mut arena.game,
            P0,
            ActionRef::Learned(spell),
            Location::new(5, 1),
            Location::new(5, 3),
        )
        .unwrap();

        let hp = arena.game.cards.champion(ally).unwrap().current_hp;
        prop_assert_eq!(hp, (12 - missing + intelligence + 1).min(12));
    }
}
