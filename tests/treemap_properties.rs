//! Order-independence properties of the ordered map, checked over seeded
//! random insertion orders.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use simprod::treemap::OrderedMap;

fn entries() -> Vec<(String, f64)> {
    (0..200).map(|i| (format!("P{i:03}"), f64::from(i) * 0.5)).collect()
}

fn build(entries: &[(String, f64)]) -> OrderedMap {
    let mut map = OrderedMap::new();
    for (key, value) in entries {
        map.set(key, *value);
    }
    map
}

#[test]
fn keys_are_sorted_whatever_the_insertion_order() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut shuffled = entries();
    let mut expected: Vec<String> = shuffled.iter().map(|(k, _)| k.clone()).collect();
    expected.sort();
    for _ in 0..10 {
        shuffled.shuffle(&mut rng);
        let map = build(&shuffled);
        assert_eq!(map.keys(), expected);
        assert_eq!(map.len(), shuffled.len());
    }
}

#[test]
fn equality_ignores_insertion_order() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut a = entries();
    let mut b = entries();
    a.shuffle(&mut rng);
    b.shuffle(&mut rng);
    let map_a = build(&a);
    let map_b = build(&b);
    assert_eq!(map_a, map_b);
    assert_eq!(map_b, map_a);
}

#[test]
fn overwrites_keep_a_single_entry() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut doubled: Vec<(String, f64)> = entries().into_iter().chain(entries()).collect();
    doubled.shuffle(&mut rng);
    let map = build(&doubled);
    assert_eq!(map.len(), 200);
    for (key, value) in entries() {
        assert_eq!(map.get(&key), value);
    }
}

#[test]
fn one_changed_value_breaks_equality() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut shuffled = entries();
    shuffled.shuffle(&mut rng);
    let reference = build(&entries());
    let mut map = build(&shuffled);
    assert_eq!(map, reference);
    map.set("P100", -1.0);
    assert_ne!(map, reference);
}
