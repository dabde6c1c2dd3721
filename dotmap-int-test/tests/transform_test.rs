use dotmap::common::Value;
use dotmap_int_test::test_util::{numbered_collection, sample_collection};

#[ctor::ctor]
fn init() {
    colog::init();
}

fn is_numeric_key(key: &str) -> bool {
    key.parse::<i64>().is_ok()
}

#[test]
fn test_filter() {
    let mut c = sample_collection();
    c.set_multiple(numbered_collection());

    let d = c.filter(|_, _| false);
    assert!(d.is_empty());

    let d = c.filter(|_, _| true);
    assert_eq!(d, c);

    let d = c.filter(|key, _| is_numeric_key(key));
    assert_eq!(d.to_map(), numbered_collection().to_map());

    let d = c.filter(|_, value| value.is_map());
    assert_eq!(d.count(), 1);
    assert!(!d.has("null"));
    assert!(!d.has("hello"));
    assert!(d.has("app"));
}

#[test]
fn test_map() {
    let mut c = sample_collection();
    c.set_multiple(numbered_collection());

    let d = c.map(|_, value| value.clone());
    assert_eq!(d, c);

    let d = c
        .filter(|_, value| value.is_number())
        .map(|_, value| match value.as_i64() {
            Some(n) => Value::from(n * n),
            None => value.clone(),
        });

    assert_eq!(d.keys().collect::<Vec<_>>(), ["1", "3", "4"]);
    assert_eq!(d.get("1"), Some(&Value::from(1)));
    assert_eq!(d.get("3"), Some(&Value::from(9)));
    assert_eq!(d.get("4"), Some(&Value::from(256)));
}

#[test]
fn test_map_preserves_receiver() {
    let c = numbered_collection();
    let _ = c.map(|_, _| Value::Null);
    assert_eq!(c.get("1"), Some(&Value::from(1)));
}

#[test]
fn test_reduce() {
    let mut c = sample_collection();
    c.set_multiple(numbered_collection());

    // pass-through combiner returns the initial accumulator
    let d = c.reduce(|_, _, acc| acc, Value::Null);
    assert_eq!(d, Value::Null);

    let d = c.reduce(|_, _, _| 0i64, 1);
    assert_eq!(d, 0);

    // sum of the integer values: 1 + 3 + 16
    let d = c.reduce(|_, value, acc| acc + value.as_i64().unwrap_or(0), 0i64);
    assert_eq!(d, 20);

    // integer values minus numeric keys: 20 - (1 + 2 + 3 + 4)
    let d = c.reduce(
        |key, value, acc| {
            acc + value.as_i64().unwrap_or(0) - key.parse::<i64>().unwrap_or(0)
        },
        0i64,
    );
    assert_eq!(d, 10);
}

#[test]
fn test_filter_reduce_chain() {
    let mut c = sample_collection();
    c.set_multiple(numbered_collection());

    // (1 - 1) + (3 - 3) + (16 - 4)
    let d = c
        .filter(|_, value| value.is_number())
        .reduce(
            |key, value, acc| {
                acc + value.as_i64().unwrap_or(0) - key.parse::<i64>().unwrap_or(0)
            },
            0i64,
        );
    assert_eq!(d, 12);
}

#[test]
fn test_reduce_of_empty_collection_returns_initial() {
    let c = dotmap::collection::Collection::new();
    assert_eq!(c.reduce(|_, _, acc: i64| acc + 1, 42), 42);
    assert_eq!(c.reduce(|_, _, acc| acc, Value::Null), Value::Null);
}

#[test]
fn test_filter_map_composition_scenario() {
    let mut c = sample_collection();
    c.set_multiple(numbered_collection());

    let d = c
        .filter(|key, _| is_numeric_key(key))
        .map(|_, value| match value.as_i64() {
            Some(n) => Value::from(n + 1),
            None => value.clone(),
        });

    // exactly the numeric keys, in original order, each mapped
    assert_eq!(d.keys().collect::<Vec<_>>(), ["1", "2", "3", "4"]);
    assert_eq!(d.get("1"), Some(&Value::from(2)));
    assert_eq!(d.get("2"), Some(&Value::from("two")));
    assert_eq!(d.get("4"), Some(&Value::from(17)));
}
