//! Order cards: a discard cost paid from hand and a reward.

use serde::{Deserialize, Serialize};

use super::card::CardType;
use crate::core::PlayerEffectKind;

/// One discard spec. `None` filters match any card.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DiscardRequirement {
    pub name: Option<String>,
    pub amount: u32,
    pub card_type: Option<CardType>,
}

impl DiscardRequirement {
    /// Discard `amount` cards of any kind.
    #[must_use]
    pub fn any(amount: u32) -> Self {
        Self {
            amount,
            ..Self::default()
        }
    }

    /// Discard `amount` cards of a type.
    #[must_use]
    pub fn of_type(amount: u32, card_type: CardType) -> Self {
        Self {
            amount,
            card_type: Some(card_type),
            ..Self::default()
        }
    }

    /// Discard `amount` copies of a named card.
    #[must_use]
    pub fn named(amount: u32, name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            amount,
            card_type: None,
        }
    }

    /// Number of filters set. More specific specs are matched first.
    #[must_use]
    pub fn specificity(&self) -> usize {
        usize::from(self.name.is_some()) + usize::from(self.card_type.is_some())
    }
}

/// Board or game predicate gating a conditioned draw.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize,
    strum_macros::Display, strum_macros::EnumString,
)]
pub enum DrawCondition {
    /// The player has fewer champions on the board than the opponent.
    FewerChampionsThanOpponent,
    /// The player has no champion on the board.
    NoChampionsOnBoard,
    /// The player's crystal has taken damage.
    CrystalDamaged,
}

/// What an order grants once its cost is paid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderReward {
    /// Draw up to `amount` cards from the top of the deck that match the
    /// filters.
    Draw {
        amount: u32,
        #[serde(default, rename = "cardType")]
        card_type: Option<CardType>,
        #[serde(default)]
        name: Option<String>,
    },
    /// Draw cards the player picked from the deck.
    SpecificDraw {
        amount: u32,
        #[serde(default, rename = "cardType")]
        card_type: Option<CardType>,
    },
    /// Draw from the top only when the condition holds.
    ConditionedDraw { amount: u32, condition: DrawCondition },
    /// Put picked cards from the used pile on the bottom of the deck.
    ReturnUsedCardToDeck { amount: u32 },
    /// Grant a player effect lasting the order's `duration`.
    PlayerEffect { kind: PlayerEffectKind },
}

impl Default for OrderReward {
    fn default() -> Self {
        OrderReward::Draw {
            amount: 1,
            card_type: None,
            name: None,
        }
    }
}

/// A hand-played card with a discard cost and a reward.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrderCard {
    pub requirement: Vec<DiscardRequirement>,
    pub reward: OrderReward,
    /// Owner turns a granted player effect lasts.
    pub duration: u32,
}

impl OrderCard {
    #[must_use]
    pub fn new(reward: OrderReward) -> Self {
        Self {
            requirement: Vec::new(),
            reward,
            duration: 0,
        }
    }

    #[must_use]
    pub fn with_requirement(mut self, requirement: DiscardRequirement) -> Self {
        self.requirement.push(requirement);
        self
    }

    #[must_use]
    pub fn with_duration(mut self, duration: u32) -> Self {
        self.duration = duration;
        self
    }

    /// Total number of cards the cost discards.
    #[must_use]
    pub fn discard_count(&self) -> usize {
        self.requirement.iter().map(|r| r.amount as usize).sum()
    }
}
