// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use tourney_domain::TournamentPhase;

fn create_test_event(before: TournamentPhase, after: TournamentPhase) -> AuditEvent {
    AuditEvent::new(
        String::from("Spring Cup"),
        Actor::new(String::from("scorer"), String::from("operator")),
        Cause::new(String::from("cli-1"), String::from("CLI command")),
        Action::new(
            String::from("SubmitMatch"),
            Some(String::from("A1 11-7 B1")),
        ),
        StateSnapshot::new(before, String::from("35 of 36 matches")),
        StateSnapshot::new(after, String::from("36 of 36 matches")),
    )
}

#[test]
fn test_actor_creation_requires_all_fields() {
    let actor: Actor = Actor::new(String::from("scorer"), String::from("operator"));

    assert_eq!(actor.id, "scorer");
    assert_eq!(actor.actor_type, "operator");
}

#[test]
fn test_cause_creation_requires_all_fields() {
    let cause: Cause = Cause::new(String::from("cli-1"), String::from("CLI command"));

    assert_eq!(cause.id, "cli-1");
    assert_eq!(cause.description, "CLI command");
}

#[test]
fn test_action_details_are_optional() {
    let action: Action = Action::new(String::from("ResetTournament"), None);
    assert_eq!(action.name, "ResetTournament");
    assert_eq!(action.details, None);
}

#[test]
fn test_audit_event_carries_tournament_and_snapshots() {
    let event: AuditEvent =
        create_test_event(TournamentPhase::League, TournamentPhase::Quarterfinals);

    assert_eq!(event.tournament, "Spring Cup");
    assert_eq!(event.action.details.as_deref(), Some("A1 11-7 B1"));
    assert_eq!(event.before.phase, TournamentPhase::League);
    assert_eq!(event.after.summary, "36 of 36 matches");
}

#[test]
fn test_changed_phase() {
    assert!(create_test_event(TournamentPhase::League, TournamentPhase::TieBreaking).changed_phase());
    assert!(!create_test_event(TournamentPhase::League, TournamentPhase::League).changed_phase());
}

#[test]
fn test_audit_event_equality() {
    let first: AuditEvent = create_test_event(TournamentPhase::Finals, TournamentPhase::Complete);
    let second: AuditEvent = create_test_event(TournamentPhase::Finals, TournamentPhase::Complete);
    let third: AuditEvent = create_test_event(TournamentPhase::Finals, TournamentPhase::Finals);

    assert_eq!(first, second);
    assert_ne!(first, third);
}
