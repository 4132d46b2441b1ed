// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tournament configuration files.
//!
//! A configuration is a JSON document:
//!
//! ```json
//! {
//!   "name": "Spring Cup",
//!   "pool_a": ["A1", "A2", "A3", "A4", "A5", "A6"],
//!   "pool_b": ["B1", "B2", "B3", "B4", "B5", "B6"],
//!   "schedule": "cross_pool",
//!   "qualifiers": "eight",
//!   "tie_policy": "straddle_cutoff"
//! }
//! ```
//!
//! Everything except `name` and `pool_a` has a default.

use std::path::Path;

use color_eyre::{Result, eyre::Context};
use tourney_domain::TournamentConfig;
use tracing::debug;

/// Parses and validates a configuration document.
///
/// # Errors
///
/// Returns an error if the JSON is malformed or the configuration breaks a
/// validation rule.
pub fn parse_config(json: &str) -> Result<TournamentConfig> {
    let mut config: TournamentConfig =
        serde_json::from_str(json).wrap_err("Malformed tournament configuration")?;
    config.name = config.name.trim().to_string();
    config.validate()?;
    Ok(config)
}

/// Reads a configuration file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not parse.
pub fn load_config(path: &Path) -> Result<TournamentConfig> {
    let json: String = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
    let config: TournamentConfig =
        parse_config(&json).wrap_err_with(|| format!("Invalid configuration in {}", path.display()))?;
    debug!(
        path = %path.display(),
        tournament = %config.name,
        entrants = config.entrant_count(),
        "Configuration loaded"
    );
    Ok(config)
}
