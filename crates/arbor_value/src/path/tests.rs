use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn f(text: &str) -> PathStep {
    PathStep::field(text)
}

#[test]
fn display_joins_fields_with_dots_and_brackets_indices() {
    let path = Path::new(vec![f("a"), f("b"), PathStep::Index(3), f("c")]);
    assert_eq!(path.to_string(), "a.b[3].c");
    assert_eq!(Path::root().to_string(), "");
    assert_eq!(
        Path::new(vec![PathStep::Index(0), PathStep::Index(1)]).to_string(),
        "[0][1]"
    );
}

#[test]
fn parse_inverts_display() {
    for text in ["", "a", "a.b[3].c", "[0][1]", "[2].x", "items[10].name"] {
        let path: Path = text.parse().unwrap();
        assert_eq!(path.to_string(), text);
    }
}

#[test]
fn parse_rejects_malformed_paths() {
    assert_eq!(
        ".a".parse::<Path>(),
        Err(PathParseError::Unexpected { pos: 0, found: '.' })
    );
    assert_eq!(
        "a..b".parse::<Path>(),
        Err(PathParseError::EmptyField { pos: 2 })
    );
    assert_eq!(
        "a[x]".parse::<Path>(),
        Err(PathParseError::BadIndex {
            text: "x".to_owned()
        })
    );
    assert_eq!(
        "a[1".parse::<Path>(),
        Err(PathParseError::UnterminatedIndex { pos: 1 })
    );
    assert!(matches!(
        "a]".parse::<Path>(),
        Err(PathParseError::Unexpected { found: ']', .. })
    ));
}

#[test]
fn parent_child_and_prefix() {
    let base: Path = "a.b".parse().unwrap();
    let child = base.child(PathStep::Index(2));
    assert_eq!(child.to_string(), "a.b[2]");
    assert_eq!(child.parent(), Some(base.clone()));
    assert!(child.starts_with(&base));
    assert!(!base.starts_with(&child));
    assert_eq!(child.last(), Some(PathStep::Index(2)));
    assert_eq!(Path::root().parent(), None);
}

#[test]
fn serializes_fields_as_tokens_and_indices_as_numbers() {
    let path = Path::new(vec![f("items"), PathStep::Index(4), f("name")]);
    let json = serde_json::to_string(&path).unwrap();
    assert_eq!(json, r#"["items",4,"name"]"#);
    let back: Path = serde_json::from_str(&json).unwrap();
    assert_eq!(back, path);
}

fn step() -> impl Strategy<Value = PathStep> {
    prop_oneof![
        "[a-z_][a-z0-9_]{0,6}".prop_map(|s| PathStep::field(&s)),
        any::<u32>().prop_map(PathStep::Index),
    ]
}

proptest! {
    #[test]
    fn serde_round_trip(steps in proptest::collection::vec(step(), 0..8)) {
        let path = Path::new(steps);
        let json = serde_json::to_string(&path).unwrap();
        let back: Path = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, path);
    }

    #[test]
    fn text_round_trip(steps in proptest::collection::vec(step(), 0..8)) {
        let path = Path::new(steps);
        let back: Path = path.to_string().parse().unwrap();
        prop_assert_eq!(back, path);
    }
}
