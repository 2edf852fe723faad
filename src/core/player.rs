//! Player identification and per-player data.
//!
//! ## PlayerId
//!
//! Seat identifier. The game is strictly two-player, so every `PlayerId`
//! has exactly one opponent.
//!
//! ## PlayerMap
//!
//! Per-seat storage backed by a `Vec`, indexable by `PlayerId`.
//!
//! ## Player
//!
//! A seat's zones (hand, deck, used pile), per-turn flags and the action
//! log. Zones hold card guids; the cards themselves live in the game's
//! card arena.

use im::Vector;
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::action::ActionRecord;
use super::entity::CardGuid;

/// Number of seats in a game.
pub const PLAYER_COUNT: usize = 2;

/// Seat identifier: `PlayerId(0)` plays from the bottom rows of the board,
/// `PlayerId(1)` from the top rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other seat.
    #[must_use]
    pub const fn opponent(self) -> Self {
        Self(1 - self.0)
    }

    /// Iterate over both seats.
    ///
    /// ```
    /// use crystal_tactics::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all().collect();
    /// assert_eq!(players, vec![PlayerId::new(0), PlayerId::new(1)]);
    /// ```
    pub fn all() -> impl Iterator<Item = PlayerId> {
        (0..PLAYER_COUNT as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player data storage with O(1) access.
///
/// ```
/// use crystal_tactics::core::{PlayerId, PlayerMap};
///
/// let mut hp: PlayerMap<i32> = PlayerMap::new(|_| 20);
/// hp[PlayerId::new(1)] = 15;
///
/// assert_eq!(hp[PlayerId::new(0)], 20);
/// assert_eq!(hp[PlayerId::new(1)], 15);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(factory: impl Fn(PlayerId) -> T) -> Self {
        Self {
            data: PlayerId::all().map(factory).collect(),
        }
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over (PlayerId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

/// Kind of a multi-turn modifier granted to a player by an Order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize,
    strum_macros::Display, strum_macros::EnumString,
)]
pub enum PlayerEffectKind {
    /// One more Class upgrade may be played each turn.
    PlayExtraClassUpgrade,
    /// One more summon is granted at each turn refresh.
    ExtraSummon,
}

/// A pending player modifier with the number of owner turns it still lasts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerEffect {
    pub kind: PlayerEffectKind,
    pub duration: u32,
}

/// One seat's zones and per-turn state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,

    /// Cards in hand, in draw order.
    pub hand: Vector<CardGuid>,

    /// Draw pile. The top is the back of the vector.
    pub deck: Vector<CardGuid>,

    /// Discard pile / graveyard.
    pub used: Vector<CardGuid>,

    /// Chronological log of resolved actions.
    pub actions_log: Vector<ActionRecord>,

    /// Whether the turn draw was taken this turn.
    pub did_draw: bool,

    /// Summons still available this turn.
    pub summons_left: u32,

    /// Deck-builder selection, drawn on the initial draw.
    pub starting_champion: Option<CardGuid>,

    /// Pending multi-turn modifiers.
    pub effects: Vec<PlayerEffect>,
}

impl Player {
    /// Create an empty seat.
    #[must_use]
    pub fn new(id: PlayerId) -> Self {
        Self {
            id,
            hand: Vector::new(),
            deck: Vector::new(),
            used: Vector::new(),
            actions_log: Vector::new(),
            did_draw: false,
            summons_left: 0,
            starting_champion: None,
            effects: Vec::new(),
        }
    }

    /// Remove a card from the hand.
    ///
    /// Returns true if the card was found and removed.
    pub fn remove_from_hand(&mut self, card: CardGuid) -> bool {
        remove_guid(&mut self.hand, card)
    }

    /// Remove a card from the deck.
    pub fn remove_from_deck(&mut self, card: CardGuid) -> bool {
        remove_guid(&mut self.deck, card)
    }

    /// Remove a card from the used pile.
    pub fn remove_from_used(&mut self, card: CardGuid) -> bool {
        remove_guid(&mut self.used, card)
    }

    /// Check whether a card is in hand.
    #[must_use]
    pub fn has_in_hand(&self, card: CardGuid) -> bool {
        self.hand.contains(&card)
    }

    /// Draw the top card of the deck into the hand.
    pub fn draw(&mut self) -> Option<CardGuid> {
        let card = self.deck.pop_back()?;
        self.hand.push_back(card);
        Some(card)
    }

    /// Count active effects of a kind.
    #[must_use]
    pub fn effect_count(&self, kind: PlayerEffectKind) -> u32 {
        self.effects.iter().filter(|e| e.kind == kind).count() as u32
    }

    /// Advance player effects by one owner turn, dropping expired ones.
    pub fn tick_effects(&mut self) {
        for effect in &mut self.effects {
            effect.duration = effect.duration.saturating_sub(1);
        }
        self.effects.retain(|e| e.duration > 0);
    }

    /// Log entries recorded during `turn`.
    pub fn actions_in_turn(&self, turn: u32) -> impl Iterator<Item = &ActionRecord> {
        self.actions_log.iter().filter(move |r| r.turn == turn)
    }
}

fn remove_guid(zone: &mut Vector<CardGuid>, card: CardGuid) -> bool {
    if let Some(pos) = zone.index_of(&card) {
        zone.remove(pos);
        true
    } else {
        false
    }
}
