//! Tests for reference and range resolution through the engine hooks

use hotcell::prelude::*;
use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::rc::Rc;

/// Engine whose hooks record the coordinates they were asked for.
///
/// Every single reference evaluates to 55 and every range to `[[3, 6, 10]]`.
struct Recorder {
    engine: Engine,
    cell: Rc<RefCell<Option<CellCoord>>>,
    range: Rc<RefCell<Option<(CellCoord, CellCoord)>>>,
    calls: Rc<RefCell<usize>>,
}

impl Recorder {
    fn new() -> Self {
        let mut engine = Engine::new();
        let cell = Rc::new(RefCell::new(None));
        let range = Rc::new(RefCell::new(None));
        let calls = Rc::new(RefCell::new(0));

        let (sink, counter) = (Rc::clone(&cell), Rc::clone(&calls));
        engine.on_call_reference_value(move |coord| {
            *sink.borrow_mut() = Some(coord.clone());
            *counter.borrow_mut() += 1;
            Some(Value::from(55))
        });

        let (sink, counter) = (Rc::clone(&range), Rc::clone(&calls));
        engine.on_call_range_value(move |start, end| {
            *sink.borrow_mut() = Some((start.clone(), end.clone()));
            *counter.borrow_mut() += 1;
            Some(vec![vec![Value::from(3), Value::from(6), Value::from(10)]])
        });

        Self {
            engine,
            cell,
            range,
            calls,
        }
    }

    fn cell_label(&self) -> Option<String> {
        self.cell.borrow().as_ref().map(|c| c.label.clone())
    }

    fn range_labels(&self) -> Option<(String, String)> {
        self.range
            .borrow()
            .as_ref()
            .map(|(s, e)| (s.label.clone(), e.label.clone()))
    }

    fn calls(&self) -> usize {
        *self.calls.borrow()
    }
}

fn block() -> Value {
    Value::block(vec![vec![Value::from(3), Value::from(6), Value::from(10)]])
}

#[test]
fn test_relative_cell() {
    let rec = Recorder::new();

    assert_eq!(rec.engine.evaluate("A1"), Evaluation::ok(Value::from(55)));
    assert_eq!(rec.cell_label().as_deref(), Some("A1"));

    assert_eq!(rec.engine.evaluate("a1"), Evaluation::ok(Value::from(55)));
    assert_eq!(rec.cell_label().as_deref(), Some("a1"));

    assert_eq!(rec.calls(), 2);
}

#[test]
fn test_absolute_markers_are_kept() {
    let rec = Recorder::new();

    assert_eq!(rec.engine.evaluate("$B$7"), Evaluation::ok(Value::from(55)));
    assert_eq!(rec.cell_label().as_deref(), Some("$B$7"));
}

#[test]
fn test_named_cell() {
    let rec = Recorder::new();

    assert_eq!(
        rec.engine.evaluate("@named_cell"),
        Evaluation::ok(Value::from(55))
    );
    assert_eq!(rec.cell_label().as_deref(), Some("@named_cell"));
    assert!(rec.cell.borrow().as_ref().map_or(false, CellCoord::is_named));
}

#[test]
fn test_malformed_named_cell() {
    let rec = Recorder::new();

    assert_eq!(
        rec.engine.evaluate("@.named_cell"),
        Evaluation::err(ErrorCode::Error)
    );
    assert_eq!(rec.calls(), 0);
}

#[test]
fn test_reference_ranges() {
    let rec = Recorder::new();

    for (formula, start, end) in [
        ("A1:B2", "A1", "B2"),
        ("a1:B2", "a1", "B2"),
        ("A1:b2", "A1", "b2"),
        ("a1:b2", "a1", "b2"),
    ] {
        assert_eq!(rec.engine.evaluate(formula), Evaluation::ok(block()));
        assert_eq!(
            rec.range_labels(),
            Some((start.to_string(), end.to_string()))
        );
    }

    assert_eq!(rec.calls(), 4);
}

#[test]
fn test_range_labels_are_not_reordered() {
    let rec = Recorder::new();

    rec.engine.evaluate("A9:B2");
    assert_eq!(rec.range_labels(), Some(("A9".into(), "B2".into())));

    rec.engine.evaluate("B2:A8");
    assert_eq!(rec.range_labels(), Some(("B2".into(), "A8".into())));
}

#[test]
fn test_named_cell_ranges() {
    let rec = Recorder::new();

    assert_eq!(
        rec.engine.evaluate("@NAMED_CELL1:@NAMED_CELL2"),
        Evaluation::ok(block())
    );
    assert_eq!(
        rec.range_labels(),
        Some(("@NAMED_CELL1".into(), "@NAMED_CELL2".into()))
    );

    assert_eq!(
        rec.engine.evaluate("@named_cell1:@named_cell2"),
        Evaluation::ok(block())
    );
    assert_eq!(
        rec.range_labels(),
        Some(("@named_cell1".into(), "@named_cell2".into()))
    );
}

#[test]
fn test_mismatched_range_is_value_error() {
    let rec = Recorder::new();

    assert_eq!(
        rec.engine.evaluate("@named_cell1:named-cell2"),
        Evaluation::err(ErrorCode::Value)
    );
    assert_eq!(
        rec.engine.evaluate("A1:@named_cell2"),
        Evaluation::err(ErrorCode::Value)
    );
    assert_eq!(rec.calls(), 0);
}

#[test]
fn test_unknown_character_wins_over_range_validation() {
    let rec = Recorder::new();

    assert_eq!(
        rec.engine.evaluate("!named_cell1:@named_cell2"),
        Evaluation::err(ErrorCode::Error)
    );
    assert_eq!(rec.calls(), 0);
}

#[test]
fn test_ranges_feed_aggregates() {
    let rec = Recorder::new();

    assert_eq!(
        rec.engine.evaluate("SUM(A1:C1)"),
        Evaluation::ok(Value::from(19))
    );
    assert_eq!(
        rec.engine.evaluate("A1 + A2"),
        Evaluation::ok(Value::from(110))
    );
}

#[test]
fn test_without_providers() {
    let engine = Engine::new();

    assert_eq!(engine.evaluate("A1"), Evaluation::ok(Value::Empty));
    assert_eq!(engine.evaluate("A1:B2"), Evaluation::ok(Value::Array(vec![])));
    assert_eq!(engine.evaluate("A1+1"), Evaluation::ok(Value::from(1)));
}

#[test]
fn test_sheet_provider() {
    let sheet = Sheet::new();
    sheet.set_cell("A1", 10).unwrap();
    sheet.set_cell("A2", 20).unwrap();
    sheet.set_cell("A3", 30).unwrap();
    sheet.set_cell("B1", "Hello").unwrap();
    sheet.set_named("rate", 0.1);

    let mut engine = Engine::new();
    sheet.attach(&mut engine);

    assert_eq!(engine.evaluate("=SUM(A1:A3)"), Evaluation::ok(Value::from(60)));
    assert_eq!(engine.evaluate("=AVERAGE(A3:A1)"), Evaluation::ok(Value::from(20)));
    assert_eq!(engine.evaluate("=A3*@rate"), Evaluation::ok(Value::from(3)));
    assert_eq!(
        engine.evaluate("=B1&\" \"&A1"),
        Evaluation::ok(Value::from("Hello 10"))
    );
    // A4 is empty
    assert_eq!(engine.evaluate("=A1+A4"), Evaluation::ok(Value::from(10)));
    assert_eq!(engine.evaluate("=SUM(A1:A4)"), Evaluation::ok(Value::from(60)));
}

#[test]
fn test_whole_sheet_range() {
    let sheet = Sheet::new();
    sheet.set_cell("A1", 10).unwrap();
    sheet.set_cell("C5", 5).unwrap();

    let mut engine = Engine::new();
    sheet.attach(&mut engine);

    assert_eq!(
        engine.evaluate("SUM(A1:XFD1048576)"),
        Evaluation::ok(Value::from(15))
    );
    assert_eq!(
        engine.evaluate("COUNT($A$1:$XFD$1048576)"),
        Evaluation::ok(Value::from(2))
    );
}
