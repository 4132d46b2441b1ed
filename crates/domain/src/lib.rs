// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod bracket;
mod error;
mod ledger;
mod standings;
mod stats;
mod tie_break;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use bracket::{Bracket, BracketChange, KnockoutRound, KnockoutSlot, Podium};
pub use error::DomainError;
pub use ledger::{MatchLedger, MatchRecord, PairKey};
pub use standings::{StandingsRow, rank, top};
pub use stats::{StatsTable, TeamStats, TieBreakMethod, TieBreakerMark};
pub use tie_break::{
    GroupStanding, HeadToHead, TieBreakerGroup, TieBreakerMatch, TieGroup, TieResolution,
    detect_material_ties, head_to_head, is_material,
};
pub use types::{
    Entrant, Pool, Qualifiers, Schedule, TiePolicy, TournamentConfig, TournamentPhase,
};
pub use validation::{MAX_SCORE, parse_score, validate_matchup, validate_scores};
