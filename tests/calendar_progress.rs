// Calendar completion flags and progress import/export.
use lectio::calendar::build_month;
use lectio::model::resolve_day;
use lectio::progress::Progress;

const PLAN: &str = r#"{"01-01": "太 1\n詩 1", "01-02": "太 2", "01-03": "not a reading"}"#;

#[test]
fn test_completion_flag_requires_every_item() {
    let mut done = Progress::default();
    let grid = build_month(2026, 1, PLAN, &done);
    let jan1 = grid.day(1).unwrap();
    assert_eq!((jan1.total, jan1.completed), (2, 0));
    assert!(!jan1.is_fully_completed);

    done.mark("MAT1");
    let jan1 = build_month(2026, 1, PLAN, &done).day(1).cloned().unwrap();
    assert!(!jan1.is_fully_completed);
    assert!((jan1.progress - 0.5).abs() < f32::EPSILON);

    done.mark("PSA1");
    let grid = build_month(2026, 1, PLAN, &done);
    assert!(grid.day(1).unwrap().is_fully_completed);
    assert!(!grid.day(2).unwrap().is_fully_completed);
}

#[test]
fn test_days_without_readings_are_never_complete() {
    let mut done = Progress::default();
    done.mark("MAT1");
    let grid = build_month(2026, 1, PLAN, &done);
    for day in [3, 4, 31] {
        let cell = grid.day(day).unwrap();
        assert!(!cell.has_plan);
        assert!(!cell.is_fully_completed);
    }
}

#[test]
fn test_malformed_plan_gives_empty_days() {
    assert!(resolve_day("{not json", "01-01").is_empty());
    assert!(resolve_day(r#"{"01-01": 5}"#, "01-01").is_empty());
    let grid = build_month(2026, 2, "[]", &Progress::default());
    assert!(grid.cells.iter().flatten().all(|d| !d.has_plan));
}

#[test]
fn test_import_is_idempotent() {
    let mut source = Progress::default();
    source.mark("MAT1");
    source.mark("PSA23:1-6");
    let exported = source.export_json();

    let mut target = Progress::default();
    target.mark("GEN1");
    assert_eq!(target.import_json(&exported).unwrap(), 2);
    let once = target.clone();
    assert_eq!(target.import_json(&exported).unwrap(), 0);
    assert_eq!(target, once);
    assert_eq!(target.len(), 3);
}

#[test]
fn test_bad_import_changes_nothing() {
    let mut p = Progress::default();
    p.mark("MAT1");
    let before = p.clone();
    for payload in ["", "{}", "[1, 2]", "MAT2", r#"{"done": ["MAT2"]}"#] {
        assert!(p.import_json(payload).is_err(), "{:?}", payload);
        assert_eq!(p, before);
    }
}
