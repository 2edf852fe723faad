//! The `Game` aggregate.
//!
//! ## Ownership
//!
//! Every card of a match lives in `cards` (the arena). Players' zones, board
//! cells and champion slots hold `CardGuid` keys. All collections are
//! persistent (`im`) or small, so `Game::clone` is cheap enough to run every
//! action on a working copy.
//!
//! ## Randomness
//!
//! The RNG position is stored as `GameRngState`, so a serialized game carries
//! it and a peer replays identical shuffles and gear breaks.

use serde::{Deserialize, Serialize};

use super::action::ActionRecord;
use super::config::RulesConfig;
use super::entity::{CardGuid, GuidAllocator};
use super::player::{Player, PlayerId, PlayerMap};
use super::rng::{GameRng, GameRngState};
use crate::board::{Board, Location};
use crate::cards::{Card, CardArena, CardKind, Champion, Crystal};

/// Match lifecycle.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
    strum_macros::Display,
)]
pub enum GameStatus {
    /// Deck building; no turn has been played.
    #[default]
    Starting,
    OnGoing,
    /// Terminal. Every further action is rejected.
    Over,
}

/// Aggregate root of one match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub config: RulesConfig,
    pub players: PlayerMap<Player>,
    pub board: Board,
    pub cards: CardArena,

    /// Whose turn it is.
    pub playing_player: PlayerId,
    /// Seat of the local viewer. Not used by the rules.
    pub viewer: PlayerId,

    pub status: GameStatus,
    pub loser: Option<PlayerId>,

    /// Turn counter, starting at 1.
    pub turn_number: u32,
    /// Logical clock stamped on action records.
    pub sequence: u64,

    pub rng: GameRngState,
}

impl Game {
    /// Create a game in deck-building state with both crystals on their base
    /// rows.
    #[must_use]
    pub fn new(config: RulesConfig, guids: &mut GuidAllocator) -> Self {
        let mut game = Self {
            players: PlayerMap::new(Player::new),
            board: Board::new(config.board_rows, config.board_cols),
            cards: CardArena::new(),
            playing_player: PlayerId::new(0),
            viewer: PlayerId::new(0),
            status: GameStatus::Starting,
            loser: None,
            turn_number: 1,
            sequence: 0,
            rng: GameRngState::seeded(config.seed),
            config,
        };

        for player in PlayerId::all() {
            let crystal = Card::new(
                guids.alloc(),
                "Crystal",
                CardKind::Crystal(Crystal::new(game.config.crystal_hp)),
            )
            .with_owner(player)
            .with_image("crystal.png");
            let location = Location::new(game.config.base_row(player), game.config.board_cols / 2);
            game.board.place(location, crystal.guid);
            game.cards.insert(crystal);
        }

        game
    }

    /// Set the local viewer seat (builder pattern).
    #[must_use]
    pub fn with_viewer(mut self, viewer: PlayerId) -> Self {
        self.viewer = viewer;
        self
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id]
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id]
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.status == GameStatus::Over
    }

    /// End the game with `loser` losing.
    pub fn finish(&mut self, loser: PlayerId) {
        self.status = GameStatus::Over;
        self.loser = Some(loser);
    }

    /// Owner of a card in the arena.
    #[must_use]
    pub fn owner_of(&self, card: CardGuid) -> Option<PlayerId> {
        self.cards.get(card).and_then(|c| c.owner)
    }

    /// Card occupying a board cell.
    #[must_use]
    pub fn card_at(&self, location: Location) -> Option<&Card> {
        self.board.get(location).and_then(|guid| self.cards.get(guid))
    }

    /// Champion occupying a board cell.
    #[must_use]
    pub fn champion_at(&self, location: Location) -> Option<(CardGuid, &Champion)> {
        let guid = self.board.get(location)?;
        self.cards.champion(guid).map(|c| (guid, c))
    }

    /// Champions a player has on the board.
    pub fn champions_of(&self, player: PlayerId) -> impl Iterator<Item = (Location, CardGuid)> + '_ {
        self.board.occupied().filter(move |&(_, guid)| {
            self.cards
                .get(guid)
                .is_some_and(|c| c.owner == Some(player) && c.as_champion().is_some())
        })
    }

    /// A player's crystal on the board.
    #[must_use]
    pub fn crystal_of(&self, player: PlayerId) -> Option<(Location, CardGuid)> {
        self.board.occupied().find(|&(_, guid)| {
            self.cards
                .get(guid)
                .is_some_and(|c| c.owner == Some(player) && c.as_crystal().is_some())
        })
    }

    /// Move an owned card into the arena and onto the top of its owner's deck.
    pub fn put_in_deck(&mut self, player: PlayerId, card: Card) -> CardGuid {
        let guid = card.guid;
        self.cards.insert(card.with_owner(player));
        self.players[player].deck.push_back(guid);
        guid
    }

    /// Move a card onto its owner's used pile.
    pub fn discard(&mut self, player: PlayerId, card: CardGuid) {
        self.players[player].used.push_back(card);
    }

    /// Next logical timestamp.
    pub fn next_timestamp(&mut self) -> u64 {
        self.sequence += 1;
        self.sequence
    }

    /// Append a record to a player's action log.
    pub fn record(&mut self, record: ActionRecord) {
        self.players[record.player].actions_log.push_back(record);
    }

    /// Run `f` with the game RNG, then store the advanced RNG position.
    pub fn with_rng<R>(&mut self, f: impl FnOnce(&mut Game, &mut GameRng) -> R) -> R {
        let mut rng = GameRng::from_state(&self.rng);
        let result = f(self, &mut rng);
        self.rng = rng.state();
        result
    }

    /// Shuffle a player's deck with the game RNG.
    pub fn shuffle_deck(&mut self, player: PlayerId) {
        self.with_rng(|game, rng| {
            let mut deck: Vec<CardGuid> = game.players[player].deck.iter().copied().collect();
            rng.shuffle(&mut deck);
            game.players[player].deck = deck.into_iter().collect();
        });
    }
}
