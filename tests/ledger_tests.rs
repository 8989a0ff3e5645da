use chrono::{NaiveDate, NaiveTime};
use serde_json::json;

mod common;
use common::{FailingMirror, MemTable, RecordingMirror, sample_roll};
use rollbook::errors::AppError;
use rollbook::ledger::{EventForm, FinishForm, Ledger, RollSelector, StartForm};
use rollbook::mirror::{Mirror, MirrorStatus, MirrorTable};
use rollbook::models::{ClosedRoll, Event, EventKind, Roll, Shift};
use rollbook::utils::time::minutes_between;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn t(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M").unwrap()
}

fn start_form(machine: u32, order_lot: &str) -> StartForm {
    StartForm {
        date: d("2025-09-01"),
        shift: Shift::Morning,
        machine,
        raw_lot: "MP-100".to_string(),
        order_lot: order_lot.to_string(),
        operator: "Ana".to_string(),
        start_time: t("06:00"),
        remarks: String::new(),
    }
}

fn finish_form(selection: RollSelector) -> FinishForm {
    FinishForm {
        selection,
        end_time: t("12:00"),
        operator: "Luis".to_string(),
        weight: 12.5,
        tares: 2,
        remarks: "turno completo".to_string(),
    }
}

fn event_form(kind: EventKind, machine: u32) -> EventForm {
    EventForm {
        kind,
        date: d("2025-09-01"),
        machine,
        start_time: t("10:00"),
        end_time: t("10:25"),
        operator: "Marta".to_string(),
        description: "rotura de banda".to_string(),
        stop_meter: String::new(),
    }
}

fn ledger_with(
    open: MemTable<Roll>,
    closed: MemTable<ClosedRoll>,
    events: MemTable<Event>,
    mirror: Option<Box<dyn Mirror>>,
    keep_closed: bool,
) -> Ledger {
    Ledger::new(
        Box::new(open),
        Box::new(closed),
        Box::new(events),
        mirror,
        keep_closed,
    )
}

// ---------------------------------------------------------------
// Mirror leg: local-first, warning on failure
// ---------------------------------------------------------------

#[test]
fn test_start_commits_locally_when_mirror_fails() {
    let open = MemTable::new();
    let open_rows = open.handle();
    let ledger = ledger_with(
        open,
        MemTable::new(),
        MemTable::new(),
        Some(Box::new(FailingMirror)),
        true,
    );

    let submission = ledger
        .start_roll(start_form(3, "OF-77"))
        .expect("the local write must stand when the mirror is down");

    assert_eq!(open_rows.borrow().len(), 1);
    assert!(matches!(submission.mirror, MirrorStatus::Failed(_)));

    let warning = submission
        .mirror
        .warning()
        .expect("a failed mirror leg must surface a warning");
    assert!(warning.contains("mirror append failed"));
}

#[test]
fn test_mirror_skipped_when_disabled() {
    let open = MemTable::new();
    let open_rows = open.handle();
    let ledger = ledger_with(open, MemTable::new(), MemTable::new(), None, true);

    let submission = ledger.start_roll(start_form(3, "OF-77")).unwrap();

    assert_eq!(open_rows.borrow().len(), 1);
    assert_eq!(submission.mirror, MirrorStatus::Skipped);
    assert!(submission.mirror.warning().is_none(), "Skipping is not a warning");
}

#[test]
fn test_open_set_removal_survives_mirror_failure() {
    let open = MemTable::with_rows(vec![sample_roll("aa11", 3, "OF-77")]);
    let open_rows = open.handle();
    let closed = MemTable::new();
    let closed_rows = closed.handle();
    let ledger = ledger_with(
        open,
        closed,
        MemTable::new(),
        Some(Box::new(FailingMirror)),
        true,
    );

    let submission = ledger
        .finish_roll(finish_form(RollSelector::Id("aa11".to_string())))
        .expect("closing must succeed locally with the mirror down");

    assert!(open_rows.borrow().is_empty(), "Removal is not rolled back");
    assert_eq!(closed_rows.borrow().len(), 1);
    assert!(matches!(submission.mirror, MirrorStatus::Failed(_)));
}

// ---------------------------------------------------------------
// Start validation
// ---------------------------------------------------------------

#[test]
fn test_start_rejects_blank_fields_before_writing() {
    let open = MemTable::new();
    let open_rows = open.handle();
    let ledger = ledger_with(open, MemTable::new(), MemTable::new(), None, true);

    let mut form = start_form(3, "OF-77");
    form.raw_lot = "   ".to_string();
    let err = ledger.start_roll(form).unwrap_err();
    assert!(matches!(err, AppError::MissingField("raw-material lot")));

    let mut form = start_form(3, "OF-77");
    form.operator = String::new();
    let err = ledger.start_roll(form).unwrap_err();
    assert!(matches!(err, AppError::MissingField("operator")));

    let err = ledger.start_roll(start_form(0, "OF-77")).unwrap_err();
    assert!(matches!(err, AppError::InvalidMachine(0)));

    assert!(open_rows.borrow().is_empty(), "Rejected forms write nothing");
}

#[test]
fn test_same_machine_can_hold_two_open_rolls() {
    let open = MemTable::new();
    let open_rows = open.handle();
    let ledger = ledger_with(open, MemTable::new(), MemTable::new(), None, true);

    let first = ledger.start_roll(start_form(3, "OF-77")).unwrap();
    let second = ledger.start_roll(start_form(3, "OF-78")).unwrap();

    // No uniqueness is enforced per machine; both land in the open set
    assert_eq!(open_rows.borrow().len(), 2);
    assert_ne!(first.record.id, second.record.id);
}

// ---------------------------------------------------------------
// Close: selection, keep_closed_rolls, record shape
// ---------------------------------------------------------------

#[test]
fn test_finish_keeps_closed_roll_when_configured() {
    let open = MemTable::with_rows(vec![sample_roll("aa11", 3, "OF-77")]);
    let open_rows = open.handle();
    let closed = MemTable::new();
    let closed_rows = closed.handle();
    let mirror = RecordingMirror::new();
    let mirrored = mirror.handle();
    let ledger = ledger_with(
        open,
        closed,
        MemTable::new(),
        Some(Box::new(mirror)),
        true,
    );

    let submission = ledger
        .finish_roll(finish_form(RollSelector::Id("aa11".to_string())))
        .unwrap();

    assert!(open_rows.borrow().is_empty());
    assert_eq!(closed_rows.borrow().len(), 1);
    assert_eq!(submission.record.id, "aa11");
    assert_eq!(submission.record.weight, 12.5);
    assert!(submission.mirror.is_delivered());

    // One BOBINAS row in the fixed 14-column order
    let rows = mirrored.borrow();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].0, MirrorTable::Bobinas);
    assert_eq!(rows[0].1.len(), 14);
    assert_eq!(rows[0].1[0], json!("aa11"));
    assert_eq!(rows[0].1[9], json!("12:00"));
}

#[test]
fn test_finish_with_keep_closed_off_only_removes() {
    let open = MemTable::with_rows(vec![sample_roll("aa11", 3, "OF-77")]);
    let open_rows = open.handle();
    let closed = MemTable::new();
    let closed_rows = closed.handle();
    let mirror = RecordingMirror::new();
    let mirrored = mirror.handle();
    let ledger = ledger_with(
        open,
        closed,
        MemTable::new(),
        Some(Box::new(mirror)),
        false,
    );

    ledger
        .finish_roll(finish_form(RollSelector::Id("aa11".to_string())))
        .unwrap();

    // The remote store is the only system of record for history
    assert!(open_rows.borrow().is_empty());
    assert!(closed_rows.borrow().is_empty(), "No local closed history");
    assert_eq!(mirrored.borrow().len(), 1, "The mirror row is still sent");
}

#[test]
fn test_selector_prefix_must_be_unique() {
    let open = MemTable::with_rows(vec![
        sample_roll("aa11-0001", 3, "OF-77"),
        sample_roll("ab22-0002", 4, "OF-88"),
    ]);
    let ledger = ledger_with(open, MemTable::new(), MemTable::new(), None, true);

    // "a" matches both rolls
    let err = ledger
        .resolve(&RollSelector::Id("a".to_string()))
        .unwrap_err();
    assert!(matches!(err, AppError::AmbiguousRoll(_)));

    // "aa" narrows to one
    let roll = ledger.resolve(&RollSelector::Id("aa".to_string())).unwrap();
    assert_eq!(roll.id, "aa11-0001");

    // Unknown prefix
    let err = ledger
        .resolve(&RollSelector::Id("zz".to_string()))
        .unwrap_err();
    assert!(matches!(err, AppError::RollNotFound(_)));
}

#[test]
fn test_selector_exact_id_wins_over_prefix() {
    // One id is a strict prefix of the other: exact match must win
    let open = MemTable::with_rows(vec![
        sample_roll("aa11", 3, "OF-77"),
        sample_roll("aa11-0002", 4, "OF-88"),
    ]);
    let ledger = ledger_with(open, MemTable::new(), MemTable::new(), None, true);

    let roll = ledger
        .resolve(&RollSelector::Id("aa11".to_string()))
        .unwrap();
    assert_eq!(roll.machine, 3);
}

#[test]
fn test_selector_by_row_number() {
    let open = MemTable::with_rows(vec![
        sample_roll("aa11", 3, "OF-77"),
        sample_roll("ab22", 4, "OF-88"),
    ]);
    let ledger = ledger_with(open, MemTable::new(), MemTable::new(), None, true);

    let roll = ledger.resolve(&RollSelector::Pick(2)).unwrap();
    assert_eq!(roll.machine, 4);

    assert!(ledger.resolve(&RollSelector::Pick(0)).is_err());
    assert!(ledger.resolve(&RollSelector::Pick(3)).is_err());
}

// ---------------------------------------------------------------
// Events: correlation and mirror row shape
// ---------------------------------------------------------------

#[test]
fn test_event_copies_context_from_matching_machine() {
    let open = MemTable::with_rows(vec![sample_roll("aa11", 3, "OF-77")]);
    let events = MemTable::new();
    let event_rows = events.handle();
    let ledger = ledger_with(open, MemTable::new(), events, None, true);

    let submission = ledger
        .record_event(event_form(EventKind::Incident, 3))
        .unwrap();

    assert_eq!(submission.record.shift, Some(Shift::Morning));
    assert_eq!(submission.record.order_lot, "OF-77");
    assert_eq!(event_rows.borrow().len(), 1);
}

#[test]
fn test_incident_without_matching_machine_writes_nothing() {
    let open = MemTable::with_rows(vec![sample_roll("aa11", 3, "OF-77")]);
    let events = MemTable::new();
    let event_rows = events.handle();
    let mirror = RecordingMirror::new();
    let mirrored = mirror.handle();
    let ledger = ledger_with(
        open,
        MemTable::new(),
        events,
        Some(Box::new(mirror)),
        true,
    );

    let err = ledger
        .record_event(event_form(EventKind::Incident, 9))
        .unwrap_err();

    assert!(matches!(err, AppError::NoActiveOrder(9)));
    assert!(event_rows.borrow().is_empty(), "Rejection precedes any write");
    assert!(mirrored.borrow().is_empty(), "Nothing reaches the mirror either");
}

#[test]
fn test_task_without_matching_machine_gets_blank_context() {
    let ledger = ledger_with(MemTable::new(), MemTable::new(), MemTable::new(), None, true);

    let submission = ledger.record_event(event_form(EventKind::Task, 9)).unwrap();

    assert_eq!(submission.record.shift, None);
    assert_eq!(submission.record.order_lot, "");
}

#[test]
fn test_first_open_roll_in_table_order_donates_context() {
    let open = MemTable::with_rows(vec![
        sample_roll("aa11", 3, "OF-1"),
        sample_roll("ab22", 3, "OF-2"),
    ]);
    let ledger = ledger_with(open, MemTable::new(), MemTable::new(), None, true);

    let submission = ledger
        .record_event(event_form(EventKind::Incident, 3))
        .unwrap();

    assert_eq!(submission.record.order_lot, "OF-1");
}

#[test]
fn test_eventos_mirror_row_has_legacy_shape() {
    let open = MemTable::with_rows(vec![sample_roll("aa11", 3, "OF-77")]);
    let mirror = RecordingMirror::new();
    let mirrored = mirror.handle();
    let ledger = ledger_with(
        open,
        MemTable::new(),
        MemTable::new(),
        Some(Box::new(mirror)),
        true,
    );

    let mut form = event_form(EventKind::Incident, 3);
    form.stop_meter = "1200".to_string();
    let submission = ledger.record_event(form).unwrap();

    // Kept locally...
    assert_eq!(submission.record.stop_meter, "1200");

    // ...but the EVENTOS row is the legacy 10 columns, without id or
    // stop meter
    let rows = mirrored.borrow();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].0, MirrorTable::Eventos);
    let row = &rows[0].1;
    assert_eq!(row.len(), 10);
    assert_eq!(row[0], json!("2025-09-01"));
    assert_eq!(row[1], json!("1 (mañana)"));
    assert_eq!(row[3], json!("OF-77"));
    assert_eq!(row[4], json!("Incidencia"));
    assert_eq!(row[7], json!(25));
    assert!(!row.contains(&json!("1200")), "metro_paro is never mirrored");
}

#[test]
fn test_en_curso_mirror_row_has_nine_columns() {
    let open = MemTable::new();
    let mirror = RecordingMirror::new();
    let mirrored = mirror.handle();
    let ledger = ledger_with(
        open,
        MemTable::new(),
        MemTable::new(),
        Some(Box::new(mirror)),
        true,
    );

    ledger.start_roll(start_form(3, "OF-77")).unwrap();

    let rows = mirrored.borrow();
    assert_eq!(rows[0].0, MirrorTable::EnCurso);
    assert_eq!(rows[0].1.len(), 9);
    assert_eq!(rows[0].1[2], json!("1 (mañana)"));
    assert_eq!(rows[0].1[3], json!(3));
}

// ---------------------------------------------------------------
// Duration rule
// ---------------------------------------------------------------

#[test]
fn test_minutes_between_plain_rollover_and_zero_spans() {
    assert_eq!(minutes_between(t("09:00"), t("09:45")), 45);
    assert_eq!(minutes_between(t("23:50"), t("00:10")), 20);
    assert_eq!(minutes_between(t("10:00"), t("10:00")), 0);
}
