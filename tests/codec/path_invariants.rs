//! Path encoding invariants
//!
//! Encoding is a bijection: every path decodes back to itself and distinct
//! paths never share an encoding.

use crate::test_utils::arb_key;
use proptest::prelude::*;
use simdb_meta::{Path, PathParseError, PathSegment};

fn arb_segment() -> impl Strategy<Value = PathSegment> {
    (arb_key(), prop::option::of(1usize..50)).prop_map(|(name, index)| match index {
        Some(i) => PathSegment::indexed(name, i),
        None => PathSegment::key(name),
    })
}

fn arb_path() -> impl Strategy<Value = Path> {
    prop::collection::vec(arb_segment(), 1..6).prop_map(Path::from_segments)
}

proptest! {
    #[test]
    fn prop_decode_inverts_encode(p in arb_path()) {
        prop_assert_eq!(Path::decode(&p.encode()).unwrap(), p);
    }

    #[test]
    fn prop_distinct_paths_distinct_encodings(a in arb_path(), b in arb_path()) {
        prop_assert_eq!(a == b, a.encode() == b.encode());
    }

    #[test]
    fn prop_decode_never_panics(s in ".{0,16}") {
        let _ = Path::decode(&s);
    }
}

#[test]
fn test_metacharacter_keys() {
    let cases = [
        (Path::root().key("a.b"), "a\\.b"),
        (Path::root().key("code#2"), "code\\#2"),
        (Path::root().key("back\\slash"), "back\\\\slash"),
        (Path::root().indexed("x.y", 3).key("z"), "x\\.y#3.z"),
    ];
    for (path, encoded) in cases {
        assert_eq!(path.encode(), encoded);
        assert_eq!(Path::decode(encoded).unwrap(), path);
    }
}

#[test]
fn test_rejected_encodings() {
    assert_eq!(Path::decode(""), Err(PathParseError::Empty));
    assert!(matches!(Path::decode("a."), Err(PathParseError::EmptySegment(_))));
    assert!(matches!(Path::decode("a#0"), Err(PathParseError::ZeroIndex(_))));
    assert!(matches!(Path::decode("a#-1"), Err(PathParseError::InvalidIndex(..))));
    assert!(matches!(Path::decode("a\\x"), Err(PathParseError::UnknownEscape('x', _))));
}
