use super::*;

#[test]
fn intern_deduplicates() {
    let interner = StringInterner::new();
    let a = interner.intern("width");
    let b = interner.intern("width");
    let c = interner.intern("height");
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(interner.lookup(a), "width");
    assert_eq!(interner.lookup(c), "height");
}

#[test]
fn starts_empty() {
    let interner = StringInterner::new();
    assert!(interner.is_empty());
    interner.intern("x");
    assert!(!interner.is_empty());
}

#[test]
fn foreign_names_resolve_to_empty_text() {
    let interner = StringInterner::new();
    assert_eq!(interner.lookup(Name::pack(7, 12_345)), "");
}

#[test]
fn len_counts_new_strings_once() {
    let interner = StringInterner::new();
    interner.intern("a");
    interner.intern("b");
    interner.intern("a");
    assert_eq!(interner.len(), 2);
}

#[test]
fn get_does_not_intern() {
    let interner = StringInterner::new();
    assert_eq!(interner.get("missing"), None);
    let name = interner.intern("present");
    assert_eq!(interner.get("present"), Some(name));
    assert_eq!(interner.len(), 1);
}

#[test]
fn concurrent_interning_agrees() {
    let interner = StringInterner::new();
    let names: Vec<Vec<Name>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    (0..64)
                        .map(|i| interner.intern(&format!("field{i}")))
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    for other in &names[1..] {
        assert_eq!(&names[0], other);
    }
    assert_eq!(interner.len(), 64);
}

#[test]
fn registry_is_shared() {
    let a = registry().intern("shared-registry-text");
    let b = registry().intern("shared-registry-text");
    assert_eq!(a, b);
}
