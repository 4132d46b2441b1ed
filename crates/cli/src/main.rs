// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # tourney - scorer's table for a group-stage + knockout tournament
//!
//! Every invocation opens the tournament from the database (or starts it
//! from `--config` the first time), applies at most one command, saves the
//! result and prints what changed.
//!
//! ```text
//! tourney --config cup.json submit A1 B1 11 7
//! tourney standings
//! tourney knockout quarterfinal 1 11 9
//! tourney reset --yes
//! ```

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
#![allow(clippy::multiple_crate_versions)]

mod config;
mod render;

#[cfg(test)]
mod tests;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{
    Result,
    eyre::{bail, eyre},
};
use tourney::{Change, Command, TournamentController};
use tourney_audit::{Actor, Cause};
use tourney_domain::{KnockoutRound, TournamentConfig, parse_score};
use tourney_persistence::Persistence;
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .without_time()
        .init();

    match args.run() {
        Ok(()) => (),
        Err(err) => {
            tracing::error!("{err}");
            std::process::exit(1);
        }
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(
    bin_name = "tourney",
    version,
    about = "Record results and run a group-stage + knockout tournament",
    styles = clap_cargo::style::CLAP_STYLING
)]
struct Args {
    /// Path to the `SQLite` database file
    #[arg(short, long, default_value = "tourney.db")]
    database: PathBuf,

    /// Tournament configuration (JSON). Needed only before the first save.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Tournament name. Defaults to the name in the configuration.
    #[arg(short, long)]
    tournament: Option<String>,

    #[command(subcommand)]
    command: CliCommand,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

#[derive(Clone, Debug, Subcommand)]
enum CliCommand {
    /// Record a group-stage result
    #[command(visible_alias = "s")]
    Submit {
        entrant_a: String,
        entrant_b: String,
        score_a: String,
        score_b: String,
    },

    /// Correct the scores of a recorded group-stage result
    #[command(visible_alias = "e")]
    Edit {
        /// Match number as shown by `matches`
        number: usize,
        score_a: String,
        score_b: String,
    },

    /// Delete a recorded group-stage result so it can be entered again
    Remove {
        /// Match number as shown by `matches`
        number: usize,
    },

    /// Record a tie-breaker result
    #[command(visible_alias = "tb")]
    TieBreaker {
        entrant_a: String,
        entrant_b: String,
        score_a: String,
        score_b: String,
    },

    /// Correct a recorded tie-breaker result
    EditTieBreaker {
        entrant_a: String,
        entrant_b: String,
        score_a: String,
        score_b: String,
    },

    /// Record a knockout result
    #[command(visible_alias = "k")]
    Knockout {
        /// quarterfinal (qf), semifinal (sf), third_place (third) or final
        round: String,
        /// Slot number as shown by `bracket`
        slot: usize,
        score_a: String,
        score_b: String,
    },

    /// Correct a recorded knockout result; later rounds are re-drawn
    EditKnockout {
        round: String,
        slot: usize,
        score_a: String,
        score_b: String,
    },

    /// Show the standings
    Standings {
        /// Print CSV instead of a table
        #[arg(long)]
        csv: bool,
    },

    /// Show played and remaining group-stage matches
    #[command(visible_alias = "m")]
    Matches {
        /// Print played results as CSV
        #[arg(long)]
        csv: bool,
    },

    /// Show the knockout bracket
    #[command(visible_alias = "b")]
    Bracket,

    /// Show the phase and what is still pending
    Status,

    /// Show the audit trail
    History,

    /// List stored tournaments
    List,

    /// Start the tournament over, discarding every result
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
}

impl Args {
    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }

    fn run(self) -> Result<()> {
        let mut store: Persistence = Persistence::new_with_file(&self.database)?;

        if matches!(self.command, CliCommand::List) {
            print!("{}", render::tournament_list(&store.list_tournaments()?));
            return Ok(());
        }

        let config: Option<TournamentConfig> =
            self.config.as_deref().map(config::load_config).transpose()?;
        let key: String = self
            .tournament
            .clone()
            .or_else(|| config.as_ref().map(|c| c.name.clone()))
            .ok_or_else(|| eyre!("Pass --tournament or --config to choose a tournament"))?;

        if matches!(self.command, CliCommand::History) {
            print!("{}", render::history_text(&store.get_audit_timeline(&key)?));
            return Ok(());
        }

        let mut controller: TournamentController<Persistence> =
            TournamentController::open(store, &key, config)?;
        let state = controller.state();

        let mutation: Command = match self.command {
            CliCommand::Standings { csv } => {
                let rows = state.standings();
                if csv {
                    print!("{}", render::standings_csv(&rows)?);
                } else {
                    print!(
                        "{}",
                        render::standings_table(&rows, state.config.qualifiers.count())
                    );
                }
                return Ok(());
            }
            CliCommand::Matches { csv } => {
                let list = state.match_list();
                if csv {
                    print!("{}", render::matches_csv(&list)?);
                } else {
                    print!("{}", render::match_table(&list));
                }
                return Ok(());
            }
            CliCommand::Bracket => {
                print!(
                    "{}",
                    render::bracket_text(&state.bracket_view(), state.podium().as_ref())
                );
                return Ok(());
            }
            CliCommand::Status => {
                print!("{}", render::status_text(state));
                return Ok(());
            }
            command => to_command(command)?,
        };

        let name: &'static str = mutation.name();
        let changes: Vec<Change> = controller.execute(
            mutation,
            operator(),
            Cause::new(
                format!("cli-{}", std::process::id()),
                format!("tourney {name}"),
            ),
        )?;
        for change in &changes {
            println!("{}", render::change_line(change));
        }
        Ok(())
    }
}

fn operator() -> Actor {
    let id: String = std::env::var("USER").unwrap_or_else(|_| String::from("operator"));
    Actor::new(id, String::from("operator"))
}

fn scores(score_a: &str, score_b: &str) -> Result<(u32, u32)> {
    Ok((
        parse_score("score_a", score_a)?,
        parse_score("score_b", score_b)?,
    ))
}

/// Converts a 1-based number shown to the operator to a 0-based index.
fn zero_based(what: &str, number: usize) -> Result<usize> {
    number
        .checked_sub(1)
        .ok_or_else(|| eyre!("{what} numbers start at 1"))
}

/// Maps a mutating subcommand onto the engine command.
#[allow(clippy::too_many_lines)]
fn to_command(command: CliCommand) -> Result<Command> {
    Ok(match command {
        CliCommand::Submit {
            entrant_a,
            entrant_b,
            score_a,
            score_b,
        } => {
            let (score_a, score_b) = scores(&score_a, &score_b)?;
            Command::SubmitMatch {
                entrant_a,
                entrant_b,
                score_a,
                score_b,
            }
        }
        CliCommand::Edit {
            number,
            score_a,
            score_b,
        } => {
            let (score_a, score_b) = scores(&score_a, &score_b)?;
            Command::EditMatch {
                index: zero_based("Match", number)?,
                score_a,
                score_b,
            }
        }
        CliCommand::Remove { number } => Command::RemoveMatch {
            index: zero_based("Match", number)?,
        },
        CliCommand::TieBreaker {
            entrant_a,
            entrant_b,
            score_a,
            score_b,
        } => {
            let (score_a, score_b) = scores(&score_a, &score_b)?;
            Command::SubmitTieBreaker {
                entrant_a,
                entrant_b,
                score_a,
                score_b,
            }
        }
        CliCommand::EditTieBreaker {
            entrant_a,
            entrant_b,
            score_a,
            score_b,
        } => {
            let (score_a, score_b) = scores(&score_a, &score_b)?;
            Command::EditTieBreaker {
                entrant_a,
                entrant_b,
                score_a,
                score_b,
            }
        }
        CliCommand::Knockout {
            round,
            slot,
            score_a,
            score_b,
        } => {
            let (score_a, score_b) = scores(&score_a, &score_b)?;
            Command::SubmitKnockout {
                round: round.parse::<KnockoutRound>()?,
                slot: zero_based("Slot", slot)?,
                score_a,
                score_b,
            }
        }
        CliCommand::EditKnockout {
            round,
            slot,
            score_a,
            score_b,
        } => {
            let (score_a, score_b) = scores(&score_a, &score_b)?;
            Command::EditKnockout {
                round: round.parse::<KnockoutRound>()?,
                slot: zero_based("Slot", slot)?,
                score_a,
                score_b,
            }
        }
        CliCommand::Reset { yes } => Command::ResetTournament { confirmed: yes },
        CliCommand::Standings { .. }
        | CliCommand::Matches { .. }
        | CliCommand::Bracket
        | CliCommand::Status
        | CliCommand::History
        | CliCommand::List => bail!("'{command:?}' does not change the tournament"),
    })
}
