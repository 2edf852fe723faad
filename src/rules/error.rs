//! Rule violations.
//!
//! Every rejected action returns one of these. The `Display` text is the
//! human-readable reason shown to the player. A rejected action never
//! mutates the committed game.

use thiserror::Error;

use crate::cards::CardType;

/// Why an action was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleViolation {
    // === Game lifecycle ===
    #[error("Game is over")]
    GameOver,

    #[error("Game has not started")]
    GameNotStarted,

    #[error("Game has already started")]
    AlreadyStarted,

    #[error("It is not your turn")]
    NotYourTurn,

    // === Board and entities ===
    #[error("Location is outside the board")]
    OutOfBoard,

    #[error("Entity was not found")]
    EntityNotFound,

    #[error("Entity is not a champion")]
    NotAChampion,

    #[error("Target is not a champion or crystal")]
    InvalidTarget,

    #[error("Champion does not belong to you")]
    NotYourChampion,

    #[error("Location is occupied")]
    LocationOccupied,

    // === Champion actions ===
    #[error("Champion has no stamina left")]
    NoStamina,

    #[error("Champion is paralyzed")]
    Paralyzed,

    #[error("Champion is silenced")]
    Silenced,

    #[error("Champion cannot move")]
    NoDexterity,

    #[error("Target is out of range")]
    OutOfRange,

    #[error("Target is not in a straight line")]
    NotStraight,

    #[error("Path to target is blocked")]
    PathBlocked,

    #[error("Target cannot be reached")]
    NotReachable,

    #[error("Attacker must be behind the target")]
    NotBehindTarget,

    #[error("Action is not bound to this champion")]
    ActionNotBound,

    #[error("Action was already played this turn")]
    ActionAlreadyPlayed,

    // === Requirements ===
    #[error("Champion class does not match the requirement")]
    ClassMismatch,

    #[error("Champion lacks the required gear")]
    GearMissing,

    #[error("Champion stat is below the requirement")]
    StatTooLow,

    // === Cards and zones ===
    #[error("Card is not in hand")]
    CardNotInHand,

    #[error("Card is not in the deck")]
    CardNotInDeck,

    #[error("Card is not in the card pool")]
    CardNotInPool,

    #[error("Card is not a {0}")]
    WrongCardType(CardType),

    #[error("Selected cards are not valid")]
    InvalidSelection,

    // === Player actions ===
    #[error("Player already drew this turn")]
    AlreadyDrew,

    #[error("Initial hand was already drawn")]
    InitialHandDrawn,

    #[error("Not enough cards in deck")]
    NotEnoughCards,

    #[error("No summons left this turn")]
    NoSummonsLeft,

    #[error("Location is outside the summon area")]
    NotHomeRow,

    #[error("No class upgrades left this turn")]
    NoUpgradesLeft,

    #[error("Discarded cards do not satisfy the requirement")]
    RequirementNotSatisfied,

    #[error("Order condition is not met")]
    ConditionNotMet,

    #[error("Deck can only change before the game starts")]
    NotDeckBuilding,

    #[error("Deck already holds {max} copies of {name}")]
    TooManyCopies { name: String, max: usize },

    #[error("Champion is already the starting champion")]
    SameStartingChampion,
}
