use dotmap::col;
use dotmap::collection::Collection;
use dotmap::common::Value;
use dotmap_int_test::test_util::sample_collection;

#[ctor::ctor]
fn init() {
    colog::init();
}

#[test]
fn test_init() {
    let c = Collection::new();
    assert!(c.is_empty());
    assert!(c.to_map().is_empty());

    let c = sample_collection();
    assert_eq!(c.get("hello"), Some(&Value::from("world!")));
    assert_eq!(c.get("app.name"), Some(&Value::from("My App")));
    assert_eq!(c.get("app.version"), Some(&Value::from("1.1")));

    let c = col! { hello: "World!" };
    assert_eq!(c.count(), 1);
    assert_eq!(c.get("hello"), Some(&Value::from("World!")));
}

#[test]
fn test_version() {
    assert!(!Collection::VERSION.is_empty());
    assert!(Collection::VERSION.split('.').count() >= 2);
}

#[test]
fn test_has() {
    let c = sample_collection();

    // defined elements
    assert!(c.has("null"));
    assert!(c.has("hello"));
    assert!(c.has("app.name"));
    assert!(c.has("app.version"));

    // undefined elements
    assert!(!c.has("nothing"));
    assert!(!c.has("app.author"));
    assert!(!c.has("app.version.test"));
}

#[test]
fn test_get() {
    let c = sample_collection();

    // defined elements
    assert_eq!(c.get("null"), Some(&Value::Null));
    assert_eq!(c.get("hello"), Some(&Value::from("world!")));
    assert_eq!(c.get("app.name"), Some(&Value::from("My App")));
    assert_eq!(c.get("app.version"), Some(&Value::from("1.1")));

    // index-operator sugar delegates to get
    assert_eq!(c["hello"], Value::from("world!"));
    assert_eq!(c["app.name"], Value::from("My App"));
    assert_eq!(c["app.version"], Value::from("1.1"));
    assert_eq!(c["app"]["version"], Value::from("1.1"));

    // undefined elements
    assert_eq!(c.get("something"), None);
    assert_eq!(c.get("undefined"), None);
    assert_eq!(c.get("app.author"), None);
    assert_eq!(c["something"], Value::Null);
    assert_eq!(c["app.author"], Value::Null);

    // default behaviour: a stored null is not replaced by the default
    assert_eq!(c.get_or("null", "default"), Value::Null);
    assert_eq!(c.get_or("hello", "now-default"), Value::from("world!"));
    assert_eq!(c.get_or("something", "default"), Value::from("default"));
    assert_eq!(c.get_or("undefined", "now-default"), Value::from("now-default"));
    assert_eq!(c.get_or("app.author", "it"), Value::from("it"));
}

#[test]
fn test_set() {
    let mut c = sample_collection();

    assert!(!c.has("something"));

    // set for the first time
    assert!(c.set("something", "defined"));
    assert_eq!(c.get("something"), Some(&Value::from("defined")));
    assert_eq!(c.get_or("something", "default"), Value::from("defined"));

    // assign a new value
    assert!(c.set("something", "somethingelse"));
    assert_eq!(c.get_or("something", "default"), Value::from("somethingelse"));

    // a mapping can not be extended inside a string scalar
    assert!(!c.set("something.deep", "abyss"));
    assert!(!c.has("something.deep"));

    // predefined
    assert_eq!(c.get("app.version"), Some(&Value::from("1.1")));
    assert!(c.set("app.version", "1.2"));
    assert_eq!(c.get("app.version"), Some(&Value::from("1.2")));
    assert_eq!(c["app"]["version"], Value::from("1.2"));

    // a whole mapping as a value
    assert_eq!(c.get("certification"), None);
    assert!(c.set(
        "certification.authority",
        col! { name: "CA", address: "somewhere" },
    ));
    assert_eq!(c.get("certification.authority.name"), Some(&Value::from("CA")));
    assert_eq!(
        c.get("certification.authority.address"),
        Some(&Value::from("somewhere"))
    );
}

#[test]
fn test_set_creates_missing_intermediates() {
    let mut c = sample_collection();

    // "something" does not exist yet, so the nested structure is created
    assert!(c.set("something.deep", "abyss"));
    assert_eq!(c.get("something.deep"), Some(&Value::from("abyss")));

    // but "hello" resolves to a string scalar
    assert!(!c.set("hello.deep", "x"));
    assert_eq!(c.get("hello"), Some(&Value::from("world!")));
}

#[test]
fn test_set_failure_leaves_collection_unchanged() {
    let mut c = sample_collection();
    let before = c.to_map();

    assert!(!c.set("hello.a.b.c", 1));
    assert_eq!(c.to_map(), before);
}

#[test]
fn test_set_multiple() {
    let mut c = sample_collection();

    assert_eq!(c.get("something"), None);
    assert_eq!(c.get("undefined"), None);

    let all_ok = c.set_multiple([
        ("something", "defined"),
        ("undefined", "now-defined"),
    ]);
    assert!(all_ok);

    assert_eq!(c["something"], Value::from("defined"));
    assert_eq!(c.get_or("undefined", "default"), Value::from("now-defined"));
}

#[test]
fn test_remove() {
    let mut c = sample_collection();

    assert!(c.has("null"));
    assert!(c.has("hello"));

    c.remove("null");
    assert!(!c.has("null"));
    assert!(c.has("hello"));

    c.remove("hello");
    assert!(!c.has("null"));
    assert!(!c.has("hello"));

    // removing a nested key keeps its siblings and the parent
    assert!(c.has("app.version"));
    c.remove("app.version");
    assert!(c.has("app.name"));
    assert!(!c.has("app.version"));
    assert!(c.has("app"));
}

#[test]
fn test_remove_scenario_keeps_top_level_count() {
    let mut c = sample_collection();

    c.remove("app.version");
    assert!(c.has("app.name"));
    assert!(!c.has("app.version"));
    assert_eq!(c.count(), 3);
}

#[test]
fn test_to_map() {
    let init = col! {
        null: (),
        hello: "world!",
        array: {
            a: "A",
            b: "B",
        },
    };

    let map = init.to_map();
    assert_eq!(Collection::from(map.clone()), init);
    assert_eq!(
        map.keys().collect::<Vec<_>>(),
        ["null", "hello", "array"]
    );
}

#[test]
fn test_keys() {
    let c = sample_collection();
    assert_eq!(c.keys().collect::<Vec<_>>(), ["null", "hello", "app"]);
}

#[test]
fn test_count() {
    let mut c = col! {
        null: (),
        hello: "world!",
        array: {
            a: "A",
            b: "B",
        },
    };

    assert_eq!(c.count(), 3);

    c.remove("array.a");
    assert_eq!(c.count(), 3);

    c.remove("array");
    assert_eq!(c.count(), 2);

    c.remove("null");
    assert_eq!(c.count(), 1);
}
