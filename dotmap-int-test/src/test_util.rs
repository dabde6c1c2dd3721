use dotmap::col;
use dotmap::collection::Collection;

/// The shared fixture used across the integration tests:
///
/// ```json
/// {
///   "null": null,
///   "hello": "world!",
///   "app": { "name": "My App", "version": "1.1" }
/// }
/// ```
pub fn sample_collection() -> Collection {
    col! {
        null: (),
        hello: "world!",
        app: {
            name: "My App",
            version: "1.1",
        },
    }
}

/// A fixture with numeric string keys and mixed values, used by the
/// transform tests.
pub fn numbered_collection() -> Collection {
    col! {
        "1": 1,
        "2": "two",
        "3": 3,
        "4": 16,
    }
}
