//! The deck builder's shared card collection.
//!
//! Cards move by value between the pool and a game's arena. The pool is
//! passed explicitly to every deck-affecting player action and, like the
//! game, is cloned for copy-validate-commit.

use im::OrdMap;
use serde::{Deserialize, Serialize};

use super::card::{Card, CardType};
use crate::core::CardGuid;

/// Unowned cards available to the deck builder.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardPool {
    cards: OrdMap<CardGuid, Card>,
}

impl CardPool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a pool from catalog cards.
    #[must_use]
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        let mut pool = Self::new();
        for card in cards {
            pool.put(card);
        }
        pool
    }

    /// Return a card to the pool, clearing its owner.
    pub fn put(&mut self, mut card: Card) {
        card.owner = None;
        self.cards.insert(card.guid, card);
    }

    /// Take a card out of the pool.
    pub fn take(&mut self, guid: CardGuid) -> Option<Card> {
        self.cards.remove(&guid)
    }

    #[must_use]
    pub fn get(&self, guid: CardGuid) -> Option<&Card> {
        self.cards.get(&guid)
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

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.values()
    }

    /// First pooled card with the given name, in guid order.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<CardGuid> {
        self.iter().find(|c| c.name == name).map(|c| c.guid)
    }

    /// Pooled cards of one type.
    pub fn of_type(&self, card_type: CardType) -> impl Iterator<Item = &Card> {
        self.iter().filter(move |c| c.card_type() == card_type)
    }
}
