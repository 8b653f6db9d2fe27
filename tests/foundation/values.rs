//! Integration tests for argument values and shapes

use voxecute_foundation::{ArgValue, IntRange, MapEntry, Shape};

#[test]
fn ranges() {
    let r = IntRange::new(Some(-2), Some(4));
    assert!(r.contains(-2) && r.contains(4));
    assert!(!r.contains(5));
    assert!(IntRange::exactly(3).contains(3));
    assert_eq!(ArgValue::Int(3).as_range(), Some(IntRange::exactly(3)));
}

#[test]
fn map_display_marks_inverted_entries() {
    let value = ArgValue::Map(vec![
        MapEntry::new("kills", false, ArgValue::Range(IntRange::new(Some(1), None))),
        MapEntry::new("deaths", true, ArgValue::Int(0)),
    ]);
    assert_eq!(value.to_string(), "{kills=1..,deaths=!0}");
}

#[test]
fn shapes_match_structurally() {
    let number = Shape::union([Shape::Number, Shape::Relative]);
    assert!(number.matches(&ArgValue::Int(1)));
    assert!(number.matches(&ArgValue::Relative(2.0)));
    assert!(!number.matches(&ArgValue::Text("x".into())));

    let scores = Shape::map_of(Shape::Range);
    assert!(scores.matches(&ArgValue::Map(vec![MapEntry::new("a", true, ArgValue::Int(1))])));

    let record = Shape::Record(vec![("flag", Shape::Bool)]);
    assert!(record.matches(&ArgValue::Map(vec![MapEntry::new("flag", false, ArgValue::Bool(true))])));
    assert!(!record.matches(&ArgValue::Map(vec![MapEntry::new("flag", true, ArgValue::Bool(true))])));
    assert!(!record.matches(&ArgValue::Map(vec![MapEntry::new("other", false, ArgValue::Bool(true))])));
}
