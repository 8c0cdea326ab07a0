use super::*;

#[test]
fn sparse_histogram_is_densified() {
    let counts = HashMap::from([("0".to_owned(), 4), ("3".to_owned(), 2)]);
    assert_eq!(stage_buckets(&counts), [4, 0, 0, 2, 0, 0]);
}

#[test]
fn empty_histogram_yields_all_zeros() {
    assert_eq!(stage_buckets(&HashMap::new()), [0; 6]);
}

#[test]
fn unknown_and_out_of_range_keys_are_dropped() {
    let counts = HashMap::from([
        ("granted".to_owned(), 7),
        ("-1".to_owned(), 3),
        ("6".to_owned(), 9),
        ("5".to_owned(), 1),
    ]);
    assert_eq!(stage_buckets(&counts), [0, 0, 0, 0, 0, 1]);
}
