// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries for the persistence layer.
//!
//! - `audit` — Audit event lookups and timelines
//! - `snapshots` — Snapshot loading and tournament listing

pub mod audit;
pub mod snapshots;

pub use audit::{count_audit_events, get_audit_event, get_audit_timeline};
pub use snapshots::{list_tournaments, load_snapshot};
