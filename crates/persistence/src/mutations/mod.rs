// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations for the persistence layer.
//!
//! - `audit` — Append-only audit event log
//! - `snapshots` — Snapshot upsert and tournament removal

pub mod audit;
pub mod snapshots;

pub use audit::persist_audit_event;
pub use snapshots::{delete_tournament, save_snapshot};
