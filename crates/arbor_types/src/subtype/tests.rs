use super::*;
use proptest::prelude::*;

const ALL: [SubtypeOrder; 5] = [
    SubtypeOrder::IsSubtype,
    SubtypeOrder::IsSupertype,
    SubtypeOrder::IsEquivalent,
    SubtypeOrder::IsUnrelated,
    SubtypeOrder::IsDisjoint,
];

#[test]
fn reverse_swaps_only_the_directional_orders() {
    assert_eq!(SubtypeOrder::IsSubtype.reverse(), SubtypeOrder::IsSupertype);
    assert_eq!(SubtypeOrder::IsSupertype.reverse(), SubtypeOrder::IsSubtype);
    assert_eq!(SubtypeOrder::IsEquivalent.reverse(), SubtypeOrder::IsEquivalent);
    assert_eq!(SubtypeOrder::IsUnrelated.reverse(), SubtypeOrder::IsUnrelated);
    assert_eq!(SubtypeOrder::IsDisjoint.reverse(), SubtypeOrder::IsDisjoint);
}

#[test]
fn reverse_is_an_involution() {
    for order in ALL {
        assert_eq!(order.reverse().reverse(), order);
    }
}

#[test]
fn from_inclusion_table() {
    assert_eq!(SubtypeOrder::from_inclusion(true, true), SubtypeOrder::IsEquivalent);
    assert_eq!(SubtypeOrder::from_inclusion(true, false), SubtypeOrder::IsSubtype);
    assert_eq!(SubtypeOrder::from_inclusion(false, true), SubtypeOrder::IsSupertype);
    assert_eq!(SubtypeOrder::from_inclusion(false, false), SubtypeOrder::IsUnrelated);
}

#[test]
fn meet_of_opposite_directions_is_unrelated() {
    assert_eq!(
        SubtypeOrder::IsSubtype.meet(SubtypeOrder::IsSupertype),
        SubtypeOrder::IsUnrelated
    );
    assert_eq!(
        SubtypeOrder::IsEquivalent.meet(SubtypeOrder::IsSubtype),
        SubtypeOrder::IsSubtype
    );
    assert_eq!(
        SubtypeOrder::IsUnrelated.meet(SubtypeOrder::IsDisjoint),
        SubtypeOrder::IsDisjoint
    );
}

#[test]
fn predicates() {
    assert!(SubtypeOrder::IsEquivalent.is_subtype());
    assert!(SubtypeOrder::IsEquivalent.is_supertype());
    assert!(!SubtypeOrder::IsSupertype.is_subtype());
    assert!(!SubtypeOrder::IsUnrelated.is_related());
    assert!(!SubtypeOrder::IsDisjoint.is_related());
}

fn order() -> impl Strategy<Value = SubtypeOrder> {
    (0..ALL.len()).prop_map(|i| ALL[i])
}

proptest! {
    #[test]
    fn meet_commutes_with_reverse(a in order(), b in order()) {
        prop_assert_eq!(a.meet(b).reverse(), a.reverse().meet(b.reverse()));
        prop_assert_eq!(a.meet(b), b.meet(a));
    }
}
