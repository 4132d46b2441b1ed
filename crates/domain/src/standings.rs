// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Standings calculation.
//!
//! Ordering, highest priority first:
//!
//! 1. Wins (more is better)
//! 2. Total group-stage points (more is better)
//! 3. Tie-breaker rank, only when every entrant in an equal run carries one
//!    (lower is better). An entrant without a rank is unresolved, not beaten.
//! 4. Registration order (Pool A as listed, then Pool B)
//!
//! Rule 4 silently decides unresolved ties. It is a deliberate policy: it
//! keeps the table deterministic, and the tie resolution engine is
//! responsible for ensuring that no unresolved tie crosses the cutoff.

use serde::{Deserialize, Serialize};

use crate::stats::{StatsTable, TeamStats};
use crate::types::Entrant;

/// One row of the ranked standings table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsRow {
    /// 1-indexed position.
    pub position: usize,
    /// The entrant.
    pub entrant: Entrant,
    /// The entrant's statistics at ranking time.
    pub stats: TeamStats,
}

/// Ranks every entrant in the table.
///
/// This is a pure function of the table; calling it twice on the same input
/// always produces the same order.
#[must_use]
pub fn rank(table: &StatsTable) -> Vec<StandingsRow> {
    let mut ordered: Vec<(Entrant, TeamStats)> = table.rows().to_vec();

    // Stable: equal (wins, points) keep registration order.
    ordered.sort_by(|(_, a), (_, b)| b.standing_key().cmp(&a.standing_key()));

    let mut start: usize = 0;
    while start < ordered.len() {
        let key: (u32, u32) = ordered[start].1.standing_key();
        let end: usize = start
            + ordered[start..]
                .iter()
                .take_while(|(_, s)| s.standing_key() == key)
                .count();

        let run: &mut [(Entrant, TeamStats)] = &mut ordered[start..end];
        if run.len() > 1 && run.iter().all(|(_, s)| s.tie_breaker.is_some()) {
            run.sort_by_key(|(_, s)| s.tie_breaker_rank());
        }
        start = end;
    }

    ordered
        .into_iter()
        .enumerate()
        .map(|(i, (entrant, stats))| StandingsRow {
            position: i + 1,
            entrant,
            stats,
        })
        .collect()
}

/// Returns the first `count` entrants of a ranked table.
#[must_use]
pub fn top(ranked: &[StandingsRow], count: usize) -> Vec<Entrant> {
    ranked
        .iter()
        .take(count)
        .map(|row| row.entrant.clone())
        .collect()
}
