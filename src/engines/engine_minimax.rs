//! Depth-configured minimax engine with a seedable tie-break.
//!
//! The search returns every move sharing the best score; this engine picks
//! one of them at random. A fixed seed makes game replays reproducible.

use log::{debug, warn};
use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::chess_errors::ChessResult;
use crate::engines::engine_trait::Engine;
use crate::game_state::board::Board;
use crate::game_state::chess_types::{ChessMove, Side};
use crate::search::board_scoring::MaterialScorer;
use crate::search::minimax::{search, SearchConfig};

pub const DEPTH_ENV: &str = "ALPHABETA_DEPTH";
pub const PLAYER_SIDE_ENV: &str = "ALPHABETA_PLAYER_SIDE";
pub const SEED_ENV: &str = "ALPHABETA_SEED";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub depth: u8,
    /// The human side; the engine plays the other one.
    pub player_side: Side,
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let search = SearchConfig::default();
        Self {
            depth: search.depth,
            player_side: search.player_side,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Read `ALPHABETA_DEPTH`, `ALPHABETA_PLAYER_SIDE` and `ALPHABETA_SEED`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup. Unset keys keep their default;
    /// unparsable values are logged and ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(DEPTH_ENV) {
            match raw.trim().parse::<u8>() {
                Ok(depth) if depth > 0 => config.depth = depth,
                _ => warn!("ignoring {DEPTH_ENV}={raw:?}; using depth {}", config.depth),
            }
        }

        if let Some(raw) = lookup(PLAYER_SIDE_ENV) {
            let mut chars = raw.trim().chars();
            match (chars.next().and_then(Side::from_code), chars.next()) {
                (Some(side), None) => config.player_side = side,
                _ => warn!(
                    "ignoring {PLAYER_SIDE_ENV}={raw:?}; expected w or b, using {}",
                    config.player_side
                ),
            }
        }

        if let Some(raw) = lookup(SEED_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(seed) => config.seed = Some(seed),
                Err(_) => warn!("ignoring {SEED_ENV}={raw:?}; seeding from the OS"),
            }
        }

        config
    }
}

/// Pick one move from a tie set, `None` when it is empty.
pub fn choose_tied_move<R: Rng + ?Sized>(moves: &[ChessMove], rng: &mut R) -> Option<ChessMove> {
    moves.choose(rng).copied()
}

pub struct MinimaxEngine {
    config: EngineConfig,
    scorer: MaterialScorer,
    rng: StdRng,
}

impl MinimaxEngine {
    pub fn new(config: EngineConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            config,
            scorer: MaterialScorer::default(),
            rng,
        }
    }

    pub fn with_scorer(mut self, scorer: MaterialScorer) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

impl Default for MinimaxEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Engine for MinimaxEngine {
    fn name(&self) -> &str {
        "AlphaBeta Minimax"
    }

    fn side(&self) -> Side {
        self.config.player_side.opposite()
    }

    fn choose_move(&mut self, board: &mut Board) -> ChessResult<Option<ChessMove>> {
        let search_config = SearchConfig {
            depth: self.config.depth,
            player_side: self.config.player_side,
        };
        let result = search(board, search_config, &self.scorer)?;
        let picked = choose_tied_move(&result.best_moves, &mut self.rng);

        if let Some(mv) = picked {
            debug!(
                "{} picked {mv} from {} tied move(s) at score {}",
                self.name(),
                result.best_moves.len(),
                result.best_score
            );
        }

        Ok(picked)
    }
}
