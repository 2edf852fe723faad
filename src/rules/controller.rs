//! Game controller: match setup, action dispatch, copy-validate-commit and
//! termination.
//!
//! ## Transactions
//!
//! Every dispatched action runs on a clone of the committed `Game` (and of
//! the card pool for deck-building actions). The clone replaces the
//! committed state only when the resolver succeeds. Persistent collections
//! keep the clone O(1).

use tracing::{debug, info};

use super::champion::{resolve_champion_action, ActionRef, ChampionOutcome};
use super::error::RuleViolation;
use super::player::{refresh_player, resolve_player_action, PlayerAction};
use crate::board::Location;
use crate::cards::{Card, CardPool};
use crate::core::{Game, GameStatus, GuidAllocator, PlayerId, RulesConfig, PLAYER_COUNT};

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
        }
    }
}

/// A player's starting cards.
#[derive(Clone, Debug, Default)]
pub struct PlayerSetup {
    pub deck: Vec<Card>,
    pub starting_champion: Option<Card>,
}

/// Create a game in deck-building state with crystals placed and each
/// player's deck and starting champion loaded.
#[must_use]
pub fn new_game(
    config: RulesConfig,
    setups: [PlayerSetup; PLAYER_COUNT],
    guids: &mut GuidAllocator,
) -> Game {
    let mut game = Game::new(config, guids);
    for (player, setup) in PlayerId::all().zip(setups) {
        for card in setup.deck {
            game.put_in_deck(player, card);
        }
        if let Some(champion) = setup.starting_champion {
            let guid = champion.guid;
            game.cards.insert(champion.with_owner(player));
            game.player_mut(player).starting_champion = Some(guid);
        }
    }
    game
}

/// Leave deck building: shuffle both decks with the game RNG and hand the
/// first turn to the playing player.
pub fn start_game(game: &mut Game) -> Result<(), RuleViolation> {
    match game.status {
        GameStatus::Starting => {}
        GameStatus::OnGoing => return Err(RuleViolation::AlreadyStarted),
        GameStatus::Over => return Err(RuleViolation::GameOver),
    }

    for player in PlayerId::all() {
        game.shuffle_deck(player);
    }
    game.status = GameStatus::OnGoing;
    let first = game.playing_player;
    refresh_player(game, first);

    info!(first = %first, "game started");
    Ok(())
}

/// Run `f` on a working copy of `game`, committing it only on success.
pub fn transact<T>(
    game: &mut Game,
    f: impl FnOnce(&mut Game) -> Result<T, RuleViolation>,
) -> Result<T, RuleViolation> {
    let mut working = game.clone();
    let result = f(&mut working);
    match &result {
        Ok(_) => *game = working,
        Err(reason) => debug!(%reason, "action rejected"),
    }
    result
}

/// Dispatch a champion action for `actor`.
pub fn champion_action(
    game: &mut Game,
    actor: PlayerId,
    action: ActionRef,
    source: Location,
    target: Location,
) -> Result<ChampionOutcome, RuleViolation> {
    transact(game, |working| {
        if working.status == GameStatus::OnGoing && working.playing_player != actor {
            return Err(RuleViolation::NotYourTurn);
        }
        let outcome = working.with_rng(|game, rng| {
            resolve_champion_action(game, action, source, target, rng)
        })?;
        log_game_over(working);
        Ok(outcome)
    })
}

/// Dispatch a player action for `actor`. Deck-building actions move cards
/// between `pool` and the game; the pool is committed with the game.
pub fn player_action(
    game: &mut Game,
    pool: &mut CardPool,
    actor: PlayerId,
    action: PlayerAction,
) -> Result<(), RuleViolation> {
    let mut working_pool = pool.clone();
    transact(game, |working| {
        resolve_player_action(working, &mut working_pool, actor, action)?;
        log_game_over(working);
        Ok(())
    })?;
    *pool = working_pool;
    Ok(())
}

fn log_game_over(game: &Game) {
    if let Some(GameResult::Winner(winner)) = is_terminal(game) {
        info!(%winner, "game over");
    }
}

/// `Some(result)` once the game is over.
#[must_use]
pub fn is_terminal(game: &Game) -> Option<GameResult> {
    match (game.status, game.loser) {
        (GameStatus::Over, Some(loser)) => Some(GameResult::Winner(loser.opponent())),
        _ => None,
    }
}
