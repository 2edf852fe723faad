//! Card location queries and the single-zone invariant.
//!
//! Zones are not stored separately: a card's zone is wherever a key to it
//! lives (a player's hand, deck or used pile, the starting-champion slot, a
//! board cell, or a champion's equipment, upgrade, learned or attached
//! lists). `zone_index` scans all of them, and `check_single_zone` verifies
//! that every arena card appears in exactly one.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use crate::board::Location;
use crate::cards::EquipmentSlot;
use crate::core::{CardGuid, Game, PlayerId};

/// Where a card is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    Hand(PlayerId),
    Deck(PlayerId),
    Used(PlayerId),
    StartingChampion(PlayerId),
    Board(Location),
    Equipment { champion: CardGuid, slot: EquipmentSlot },
    Upgrade { champion: CardGuid },
    Learned { champion: CardGuid },
    Attached { champion: CardGuid },
}

/// Violations of the single-zone invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ZoneViolation {
    #[error("{card} is in {count} zones at once")]
    Duplicated { card: CardGuid, count: usize },

    #[error("{card} is in the arena but in no zone")]
    Orphaned { card: CardGuid },

    #[error("{card} is referenced by {zone:?} but missing from the arena")]
    Dangling { card: CardGuid, zone: Zone },
}

/// Every zone each referenced card appears in.
#[must_use]
pub fn zone_index(game: &Game) -> FxHashMap<CardGuid, SmallVec<[Zone; 1]>> {
    let mut index: FxHashMap<CardGuid, SmallVec<[Zone; 1]>> = FxHashMap::default();
    let mut add = |card: CardGuid, zone: Zone| index.entry(card).or_default().push(zone);

    for (id, player) in game.players.iter() {
        player.hand.iter().for_each(|&c| add(c, Zone::Hand(id)));
        player.deck.iter().for_each(|&c| add(c, Zone::Deck(id)));
        player.used.iter().for_each(|&c| add(c, Zone::Used(id)));
        if let Some(c) = player.starting_champion {
            add(c, Zone::StartingChampion(id));
        }
    }

    for (location, guid) in game.board.occupied() {
        add(guid, Zone::Board(location));
        let Some(champion) = game.cards.champion(guid) else {
            continue;
        };
        for (slot, gear) in champion.equipped() {
            add(gear, Zone::Equipment { champion: guid, slot });
        }
        if let Some(upgrade) = champion.upgrade {
            add(upgrade, Zone::Upgrade { champion: guid });
        }
        for &action in &champion.learned_actions_cards {
            add(action, Zone::Learned { champion: guid });
        }
        for &action in &champion.attached_actions_cards {
            add(action, Zone::Attached { champion: guid });
        }
    }

    index
}

/// Zone of a card. If the invariant is broken, the first zone found.
#[must_use]
pub fn locate(game: &Game, card: CardGuid) -> Option<Zone> {
    zone_index(game).get(&card).and_then(|zones| zones.first().copied())
}

/// Verify every arena card is in exactly one zone and every zone key points
/// at an arena card.
pub fn check_single_zone(game: &Game) -> Result<(), ZoneViolation> {
    let index = zone_index(game);

    for (&card, zones) in &index {
        if !game.cards.contains(card) {
            return Err(ZoneViolation::Dangling { card, zone: zones[0] });
        }
        if zones.len() > 1 {
            return Err(ZoneViolation::Duplicated { card, count: zones.len() });
        }
    }
    for card in game.cards.iter() {
        if !index.contains_key(&card.guid) {
            return Err(ZoneViolation::Orphaned { card: card.guid });
        }
    }
    Ok(())
}
