//! The `Card` sum type and its type predicates.
//!
//! A card is a common header (`guid`, `owner`, `name`, `image`) plus a
//! `kind` payload. The free predicate functions are thin wrappers over the
//! `kind` tag so call sites can filter card lists without matching.

use serde::{Deserialize, Serialize};

use super::action::ActionCard;
use super::champion::{Champion, Crystal};
use super::equipment::{ClassCard, Gear};
use super::order::OrderCard;
use crate::core::{CardGuid, PlayerId};

/// Tag of a card kind, used by filters and discard specs.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
    strum_macros::Display, strum_macros::EnumString,
)]
pub enum CardType {
    Champion,
    Crystal,
    Gear,
    Class,
    Action,
    Order,
}

/// Kind-specific card data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CardKind {
    Champion(Champion),
    Crystal(Crystal),
    Gear(Gear),
    Class(ClassCard),
    Action(ActionCard),
    Order(OrderCard),
}

impl CardKind {
    #[must_use]
    pub fn card_type(&self) -> CardType {
        match self {
            CardKind::Champion(_) => CardType::Champion,
            CardKind::Crystal(_) => CardType::Crystal,
            CardKind::Gear(_) => CardType::Gear,
            CardKind::Class(_) => CardType::Class,
            CardKind::Action(_) => CardType::Action,
            CardKind::Order(_) => CardType::Order,
        }
    }
}

/// One physical card.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub guid: CardGuid,
    /// `None` while the card sits in the shared card pool.
    pub owner: Option<PlayerId>,
    pub name: String,
    pub image: String,
    pub kind: CardKind,
}

impl Card {
    /// Create an unowned card.
    #[must_use]
    pub fn new(guid: CardGuid, name: impl Into<String>, kind: CardKind) -> Self {
        Self {
            guid,
            owner: None,
            name: name.into(),
            image: String::new(),
            kind,
        }
    }

    /// Set the owner (builder pattern).
    #[must_use]
    pub fn with_owner(mut self, owner: PlayerId) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Set the image path (builder pattern).
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    #[must_use]
    pub fn card_type(&self) -> CardType {
        self.kind.card_type()
    }

    /// Whether the card stops rays passing through its cell.
    #[must_use]
    pub fn is_blocking(&self) -> bool {
        match &self.kind {
            CardKind::Champion(c) => c.is_blocking,
            CardKind::Crystal(c) => c.is_blocking,
            _ => false,
        }
    }

    #[must_use]
    pub fn as_champion(&self) -> Option<&Champion> {
        match &self.kind {
            CardKind::Champion(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_champion_mut(&mut self) -> Option<&mut Champion> {
        match &mut self.kind {
            CardKind::Champion(c) => Some(c),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_crystal(&self) -> Option<&Crystal> {
        match &self.kind {
            CardKind::Crystal(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_crystal_mut(&mut self) -> Option<&mut Crystal> {
        match &mut self.kind {
            CardKind::Crystal(c) => Some(c),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_gear(&self) -> Option<&Gear> {
        match &self.kind {
            CardKind::Gear(g) => Some(g),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_class(&self) -> Option<&ClassCard> {
        match &self.kind {
            CardKind::Class(c) => Some(c),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_action(&self) -> Option<&ActionCard> {
        match &self.kind {
            CardKind::Action(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_action_mut(&mut self) -> Option<&mut ActionCard> {
        match &mut self.kind {
            CardKind::Action(a) => Some(a),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_order(&self) -> Option<&OrderCard> {
        match &self.kind {
            CardKind::Order(o) => Some(o),
            _ => None,
        }
    }
}

#[must_use]
pub fn is_champion(card: &Card) -> bool {
    matches!(card.kind, CardKind::Champion(_))
}

#[must_use]
pub fn is_crystal(card: &Card) -> bool {
    matches!(card.kind, CardKind::Crystal(_))
}

/// Champions and crystals: the cards that occupy board cells.
#[must_use]
pub fn is_summoning(card: &Card) -> bool {
    is_champion(card) || is_crystal(card)
}

#[must_use]
pub fn is_gear(card: &Card) -> bool {
    matches!(card.kind, CardKind::Gear(_))
}

#[must_use]
pub fn is_class(card: &Card) -> bool {
    matches!(card.kind, CardKind::Class(_))
}

#[must_use]
pub fn is_action(card: &Card) -> bool {
    matches!(card.kind, CardKind::Action(_))
}

#[must_use]
pub fn is_order(card: &Card) -> bool {
    matches!(card.kind, CardKind::Order(_))
}

/// Map a card to its type tag.
#[must_use]
pub fn check_card_type(card: &Card) -> CardType {
    card.card_type()
}
