//! Integration tests for block predicates and score access

use voxecute_foundation::{InterpretError, StateValue};
use voxecute_language::{BlockPredicate, HolderExpr, Relation, ScoreAccess, SelectorRegistry, parse_range};
use voxecute_storage::Block;

// =============================================================================
// Block Predicates
// =============================================================================

#[test]
fn block_ids_are_namespaced() {
    let p = BlockPredicate::parse("stone").unwrap();
    assert_eq!(p.id(), "minecraft:stone");
    assert!(p.matches(&Block::new("stone")));
    assert!(!p.matches(&Block::new("dirt")));
}

#[test]
fn listed_states_must_match() {
    let p = BlockPredicate::parse(r#"oak_stairs["facing"="north",half=bottom,waterlogged=false]"#).unwrap();
    let stairs = Block::new("oak_stairs")
        .with_state("facing", StateValue::Text("north".into()))
        .with_state("half", StateValue::Text("bottom".into()))
        .with_state("waterlogged", StateValue::Bool(false))
        .with_state("shape", StateValue::Text("straight".into()));
    assert!(p.matches(&stairs));

    let flipped = stairs.with_state("half", StateValue::Text("top".into()));
    assert!(!p.matches(&flipped));
    assert!(!p.matches(&Block::new("oak_stairs")));
}

#[test]
fn malformed_blocks() {
    for text in ["", "stone[", "stone[facing]", "stone[facing=north"] {
        assert!(BlockPredicate::parse(text).is_err(), "{text}");
    }
}

// =============================================================================
// Scores
// =============================================================================

#[test]
fn score_holders() {
    let registry = SelectorRegistry::standard();
    let named = ScoreAccess::parse(&registry, "#global", "timer").unwrap();
    assert_eq!(named.holder, HolderExpr::Name("#global".into()));
    assert_eq!(named.objective, "timer");

    let single = ScoreAccess::parse(&registry, "@e[c=1]", "kills").unwrap();
    assert!(matches!(single.holder, HolderExpr::Selector(_)));

    let err = ScoreAccess::parse(&registry, "@a", "kills").unwrap_err();
    assert_eq!(err.as_interpret(), Some(&InterpretError::AmbiguousHolder("@a".into())));
    assert!(ScoreAccess::parse(&registry, "*", "kills").unwrap_err().is_parse());
}

#[test]
fn relations() {
    let cases = [
        ("<", Relation::Less, [true, false, false]),
        ("<=", Relation::LessOrEqual, [true, true, false]),
        ("=", Relation::Equal, [false, true, false]),
        (">=", Relation::GreaterOrEqual, [false, true, true]),
        (">", Relation::Greater, [false, false, true]),
    ];
    for (text, relation, expected) in cases {
        assert_eq!(Relation::parse(text).unwrap(), relation);
        assert_eq!([relation.holds(1, 2), relation.holds(2, 2), relation.holds(3, 2)], expected, "{text}");
    }
    assert!(Relation::parse("==").is_err());
}

#[test]
fn ranges() {
    assert_eq!(parse_range("..-1").unwrap().max, Some(-1));
    assert!(parse_range("..").is_err());
    assert!(parse_range("1..2 3").is_err());
}
