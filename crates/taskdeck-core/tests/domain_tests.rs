//! Property tests for the core domain rules

use proptest::prelude::*;
use taskdeck_core::{
    risk_score, CellRef, DueDateValue, EditField, EditSession, RiskBand, TaskId, TaskStatus,
};

fn status_strategy() -> impl Strategy<Value = TaskStatus> {
    prop_oneof![
        Just(TaskStatus::Todo),
        Just(TaskStatus::InProgress),
        Just(TaskStatus::Done),
    ]
}

fn field_strategy() -> impl Strategy<Value = EditField> {
    prop_oneof![
        Just(EditField::Name),
        Just(EditField::Assignee),
        Just(EditField::DueDate),
        Just(EditField::StoryPoints),
        Just(EditField::Status),
    ]
}

proptest! {
    #[test]
    fn risk_score_stays_in_range(points in proptest::option::of(-1000.0f64..10_000.0)) {
        let score = risk_score(points);
        prop_assert!(score <= 100);
    }

    #[test]
    fn risk_score_is_monotone(a in 0.0f64..1000.0, b in 0.0f64..1000.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(risk_score(Some(lo)) <= risk_score(Some(hi)));
    }

    #[test]
    fn risk_band_matches_thresholds(score in 0u8..=100) {
        let band = RiskBand::for_score(score);
        match band {
            RiskBand::High => prop_assert!(score > 70),
            RiskBand::Medium => prop_assert!(score > 40 && score <= 70),
            RiskBand::Low => prop_assert!(score <= 40),
        }
    }

    #[test]
    fn serial_dates_never_panic(serial in proptest::num::f64::ANY) {
        // totality: any float input resolves to Some or None
        let _ = taskdeck_core::date::serial_to_date(serial);
    }

    #[test]
    fn due_date_parsing_never_panics(text in ".{0,40}") {
        let _ = taskdeck_core::date::parse_due_date(&DueDateValue::Text(text));
    }

    #[test]
    fn points_draft_parsing_never_panics(draft in ".{0,20}") {
        let _ = taskdeck_core::edit::parse_points_draft(&draft);
    }

    #[test]
    fn loose_status_always_lands_on_a_variant(raw in ".{0,20}") {
        let status = TaskStatus::from_loose(&raw);
        prop_assert!(matches!(
            status,
            TaskStatus::Todo | TaskStatus::InProgress | TaskStatus::Done
        ));
    }

    #[test]
    fn wire_statuses_round_trip(status in status_strategy()) {
        prop_assert_eq!(TaskStatus::from_loose(status.as_str()), status);
    }

    #[test]
    fn edit_session_tracks_at_most_one_cell(
        ops in proptest::collection::vec(
            (0u8..4, 0u8..3, field_strategy(), ".{0,12}"),
            0..32,
        )
    ) {
        let mut session = EditSession::default();
        let mut committed = 0usize;

        for (op, row, field, draft) in ops {
            let cell = CellRef::new(TaskId::from(format!("t{row}")), field);
            match op {
                0 => {
                    session.begin(cell, draft);
                    prop_assert!(session.is_editing());
                }
                1 => {
                    let changed = session.set_draft(draft);
                    prop_assert_eq!(changed, session.is_editing());
                }
                2 => {
                    if session.commit().is_some() {
                        committed += 1;
                    }
                    prop_assert!(!session.is_editing());
                }
                _ => {
                    session.cancel();
                    prop_assert!(!session.is_editing());
                }
            }
            // the draft exists exactly while a cell is active
            prop_assert_eq!(session.draft().is_some(), session.is_editing());
        }

        // commits only ever come from active edits
        prop_assert!(committed <= 32);
    }
}
