use super::*;

#[test]
fn clone_shares_allocation() {
    let h1 = Heap::new(vec![1, 2, 3]);
    let h2 = h1.clone();
    assert!(Heap::ptr_eq(&h1, &h2));
    assert_eq!(Heap::ref_count(&h1), 2);
}

#[test]
fn make_mut_clones_when_aliased() {
    let h1 = Heap::new(vec![1, 2, 3]);
    let mut h2 = h1.clone();
    Heap::make_mut(&mut h2).push(4);
    assert_eq!(*h1, vec![1, 2, 3]);
    assert_eq!(*h2, vec![1, 2, 3, 4]);
    assert!(!Heap::ptr_eq(&h1, &h2));
}

#[test]
fn make_mut_writes_in_place_when_unique() {
    let mut h = Heap::new(vec![1]);
    let before: *const Vec<i32> = &*h;
    Heap::make_mut(&mut h).push(2);
    let after: *const Vec<i32> = &*h;
    assert_eq!(before, after);
    assert_eq!(*h, vec![1, 2]);
}

#[test]
fn equality_looks_through_pointer() {
    let h1 = Heap::new("hello".to_string());
    let h2 = Heap::new("hello".to_string());
    let h3 = Heap::new("world".to_string());
    assert_eq!(h1, h2);
    assert_ne!(h1, h3);
}

#[test]
fn unwrap_or_clone_leaves_other_handles_intact() {
    let h1 = Heap::new(vec![7]);
    let h2 = h1.clone();
    let mut owned = Heap::unwrap_or_clone(h2);
    owned.push(8);
    assert_eq!(*h1, vec![7]);
}

#[test]
fn display_looks_through_pointer() {
    let h = Heap::new(42);
    assert_eq!(h.to_string(), "42");
}
