use super::*;

#[test]
fn stable_hash_is_deterministic() {
    assert_eq!(stable_hash64(b"scene one"), stable_hash64(b"scene one"));
    assert_ne!(stable_hash64(b"scene one"), stable_hash64(b"scene two"));
}

#[test]
fn str_writes_are_length_prefixed() {
    let mut a = StableHasher::new();
    a.write_str("ab");
    a.write_str("c");
    let mut b = StableHasher::new();
    b.write_str("a");
    b.write_str("bc");
    assert_ne!(a.digest128(), b.digest128());
}
