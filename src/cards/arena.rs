//! Card arena: the single owner of every card in a game.
//!
//! Zones (hand, deck, used pile, board cells, champion slots) hold
//! `CardGuid` keys into the arena. The arena is an `im::OrdMap`, so cloning
//! a `Game` for copy-validate-commit is O(1) and iteration order is stable
//! across peers.

use im::OrdMap;
use serde::{Deserialize, Serialize};

use super::action::ActionCard;
use super::card::{Card, CardKind};
use super::champion::{Champion, Crystal};
use super::equipment::{ClassCard, Gear};
use super::order::OrderCard;
use crate::core::CardGuid;

/// Cards keyed by guid.
///
/// ## Example
///
/// ```
/// use crystal_tactics::cards::{ActionCard, Card, CardArena, CardKind};
/// use crystal_tactics::core::CardGuid;
///
/// let mut arena = CardArena::new();
/// arena.insert(Card::new(CardGuid(1), "Slash", CardKind::Action(ActionCard::basic_hit())));
///
/// assert!(arena.action(CardGuid(1)).is_some());
/// assert!(arena.champion(CardGuid(1)).is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardArena {
    cards: OrdMap<CardGuid, Card>,
}

impl CardArena {
    /// Create an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a card, replacing any card with the same guid.
    pub fn insert(&mut self, card: Card) {
        self.cards.insert(card.guid, card);
    }

    /// Remove a card and hand it back by value.
    pub fn remove(&mut self, guid: CardGuid) -> Option<Card> {
        self.cards.remove(&guid)
    }

    #[must_use]
    pub fn get(&self, guid: CardGuid) -> Option<&Card> {
        self.cards.get(&guid)
    }

    pub fn get_mut(&mut self, guid: CardGuid) -> Option<&mut Card> {
        self.cards.get_mut(&guid)
    }

    #[must_use]
    pub fn contains(&self, guid: CardGuid) -> bool {
        self.cards.contains_key(&guid)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over cards in guid order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.values()
    }

    /// Card name, if the card exists.
    #[must_use]
    pub fn name(&self, guid: CardGuid) -> Option<&str> {
        self.get(guid).map(|c| c.name.as_str())
    }

    #[must_use]
    pub fn champion(&self, guid: CardGuid) -> Option<&Champion> {
        self.get(guid).and_then(Card::as_champion)
    }

    pub fn champion_mut(&mut self, guid: CardGuid) -> Option<&mut Champion> {
        self.get_mut(guid).and_then(Card::as_champion_mut)
    }

    #[must_use]
    pub fn crystal(&self, guid: CardGuid) -> Option<&Crystal> {
        self.get(guid).and_then(Card::as_crystal)
    }

    pub fn crystal_mut(&mut self, guid: CardGuid) -> Option<&mut Crystal> {
        self.get_mut(guid).and_then(Card::as_crystal_mut)
    }

    #[must_use]
    pub fn gear(&self, guid: CardGuid) -> Option<&Gear> {
        self.get(guid).and_then(Card::as_gear)
    }

    #[must_use]
    pub fn class(&self, guid: CardGuid) -> Option<&ClassCard> {
        self.get(guid).and_then(Card::as_class)
    }

    #[must_use]
    pub fn action(&self, guid: CardGuid) -> Option<&ActionCard> {
        self.get(guid).and_then(Card::as_action)
    }

    pub fn action_mut(&mut self, guid: CardGuid) -> Option<&mut ActionCard> {
        self.get_mut(guid).and_then(Card::as_action_mut)
    }

    #[must_use]
    pub fn order(&self, guid: CardGuid) -> Option<&OrderCard> {
        self.get(guid).and_then(Card::as_order)
    }

    /// Whether the card at `guid` stops rays. Missing cards never block.
    #[must_use]
    pub fn is_blocking(&self, guid: CardGuid) -> bool {
        self.get(guid).is_some_and(Card::is_blocking)
    }

    /// Find the first action card among `guids` with the given name.
    #[must_use]
    pub fn find_action_named<'a, I>(&self, guids: I, name: &str) -> Option<CardGuid>
    where
        I: IntoIterator<Item = &'a CardGuid>,
    {
        guids.into_iter().copied().find(|&guid| {
            self.get(guid)
                .is_some_and(|c| c.name == name && matches!(c.kind, CardKind::Action(_)))
        })
    }
}
