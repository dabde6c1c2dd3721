//! The ordered nested key-value container and its construction macros.
//!
//! A [`Collection`] owns a mutable nested mapping from string keys to
//! [`Value`]s and resolves dotted query paths against it.
//!
//! ```rust
//! use dotmap::col;
//! use dotmap::common::Value;
//!
//! let mut c = col! {
//!     hello: "world!",
//!     app: {
//!         name: "My App",
//!         version: "1.1",
//!     },
//! };
//!
//! assert_eq!(c.get("app.version"), Some(&Value::from("1.1")));
//! assert!(c.set("app.version", "1.2"));
//! c.remove("app.name");
//! ```
//!
//! Top-level keys are literal strings; the separator `.` is interpreted only
//! when resolving a *query* path. Constructing from a mapping that contains a
//! dotted top-level key stores that key literally.

use indexmap::IndexMap;
use itertools::Itertools;
use smallvec::SmallVec;
use std::fmt::{Debug, Display};
use std::ops::Index;

use crate::common::{Value, NULL};
use crate::FIELD_SEPARATOR;

type FieldVec = SmallVec<[String; 8]>;

/// An ordered nested key-value container with dotted-path access.
///
/// A collection is composed of key-value pairs. The key is always a [String]
/// and the value is a [Value], which may itself be a nested mapping. A value
/// inside a nested mapping is addressed with a dotted path: for
/// `{"a": {"b": 1}}`, `collection.get("a.b")` yields the inner value.
///
/// Insertion order is preserved at every level and is observable through
/// [`keys`](Collection::keys), iteration, and serialization.
///
/// # Resolution
///
/// A dotted path `"a.b.c"` is split on `.` and walked segment by segment:
/// every non-terminal segment must resolve to a nested mapping, inside which
/// the next segment is looked up. A segment resolving to a scalar before the
/// path is exhausted makes the whole path unresolved; that is absence for
/// reads and failure for writes, never an error.
///
/// # Locking
///
/// [`lock`](Collection::lock) permanently disables every mutating operation
/// on the instance. Mutations on a locked collection report failure through
/// their return value and leave the data untouched. There is no unlock.
///
/// # Examples
///
/// ```rust
/// use dotmap::collection::Collection;
/// use dotmap::common::Value;
///
/// let mut c = Collection::new();
/// assert!(c.set("certification.authority.name", "CA"));
/// assert_eq!(c.get("certification.authority.name"), Some(&Value::from("CA")));
/// assert_eq!(c.count(), 1);
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Collection {
    data: IndexMap<String, Value>,
    locked: bool,
}

impl Collection {
    /// Version identifier of the container, exposed for introspection by
    /// collaborators. It carries no behavioral contract.
    pub const VERSION: &'static str = env!("CARGO_PKG_VERSION");

    /// Creates a new empty collection.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dotmap::collection::Collection;
    ///
    /// let c = Collection::new();
    /// assert!(c.is_empty());
    /// assert_eq!(c.count(), 0);
    /// ```
    pub fn new() -> Self {
        Collection {
            data: IndexMap::new(),
            locked: false,
        }
    }

    /// Checks if the collection has no top-level entries.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the number of top-level entries.
    ///
    /// Nested mappings count as one entry; this is never a recursive count
    /// of leaves.
    pub fn count(&self) -> usize {
        self.data.len()
    }

    /// Checks if the collection is locked.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Locks the collection.
    ///
    /// Once locked, [`insert`](Collection::insert), [`set`](Collection::set),
    /// [`set_multiple`](Collection::set_multiple),
    /// [`remove`](Collection::remove), and [`merge`](Collection::merge) are
    /// permanently disabled for this instance. Reads are unaffected.
    pub fn lock(&mut self) {
        self.locked = true;
    }

    /// Associates a value with a literal top-level key.
    ///
    /// Unlike [`set`](Collection::set), the key is stored as-is: a separator
    /// inside it carries no meaning. This is what construction from an
    /// initial mapping uses, so `{"app.version": "x"}` stays one literal key.
    ///
    /// Returns `false` without mutating when the collection is locked.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> bool {
        if self.locked {
            log::debug!("collection is locked, rejecting insert");
            return false;
        }
        self.data.insert(key.into(), value.into());
        true
    }

    /// Returns the value at the given dotted path, or `None` if the path does
    /// not resolve.
    ///
    /// A literal top-level key is checked first; only then is the path split
    /// on the separator and walked through nested mappings. A stored null is
    /// `Some(&Value::Null)`, distinct from an absent key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dotmap::col;
    /// use dotmap::common::Value;
    ///
    /// let c = col! {
    ///     hello: "world!",
    ///     app: { version: "1.1" },
    /// };
    ///
    /// assert_eq!(c.get("hello"), Some(&Value::from("world!")));
    /// assert_eq!(c.get("app.version"), Some(&Value::from("1.1")));
    /// assert_eq!(c.get("app.author"), None);
    /// // "hello" is a scalar, so nothing resolves below it
    /// assert_eq!(c.get("hello.deep"), None);
    /// ```
    pub fn get(&self, path: &str) -> Option<&Value> {
        if let Some(value) = self.data.get(path) {
            return Some(value);
        }
        if !path.contains(FIELD_SEPARATOR) {
            return None;
        }

        let mut current = &self.data;
        let mut segments = path.split(FIELD_SEPARATOR).peekable();
        while let Some(segment) = segments.next() {
            if segments.peek().is_none() {
                return current.get(segment);
            }
            match current.get(segment) {
                Some(Value::Map(nested)) => current = nested,
                _ => return None,
            }
        }
        None
    }

    /// Returns the value at the given dotted path, or the caller-supplied
    /// default if the path does not resolve.
    ///
    /// A stored null is returned as [Value::Null], not replaced by the
    /// default; only absence falls back.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dotmap::col;
    /// use dotmap::common::Value;
    ///
    /// let c = col! { null: (), hello: "world!" };
    ///
    /// assert_eq!(c.get_or("hello", "fallback"), Value::from("world!"));
    /// assert_eq!(c.get_or("missing", "fallback"), Value::from("fallback"));
    /// assert_eq!(c.get_or("null", "fallback"), Value::Null);
    /// ```
    pub fn get_or(&self, path: &str, default: impl Into<Value>) -> Value {
        match self.get(path) {
            Some(value) => value.clone(),
            None => default.into(),
        }
    }

    /// Checks if the given dotted path resolves to a present key.
    ///
    /// Presence is independent of the stored value; a stored null is present.
    pub fn has(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Sets the value at the given dotted path, creating missing intermediate
    /// mappings on the way.
    ///
    /// An existing literal top-level key takes precedence over the dotted
    /// walk, exactly as in [`get`](Collection::get): writing to `"app.version"`
    /// on a collection holding that literal key overwrites it in place rather
    /// than creating a nested mapping that the literal key would shadow.
    ///
    /// Returns `false` without mutating anything when:
    /// * the collection is locked,
    /// * the path is empty,
    /// * a non-terminal segment resolves to a non-mapping value — a scalar is
    ///   never silently promoted to a nested mapping.
    ///
    /// The descend path is validated before anything is created, so a failed
    /// write is atomic: no partial nested structure is left behind.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dotmap::col;
    ///
    /// let mut c = col! { hello: "world!" };
    ///
    /// assert!(c.set("something.deep", "abyss"));
    /// assert!(c.has("something.deep"));
    ///
    /// // "hello" resolves to a string scalar
    /// assert!(!c.set("hello.deep", "x"));
    /// assert!(!c.has("hello.deep"));
    /// ```
    pub fn set(&mut self, path: &str, value: impl Into<Value>) -> bool {
        if self.locked {
            log::debug!("collection is locked, rejecting write to {:?}", path);
            return false;
        }
        if path.is_empty() {
            log::debug!("empty path is not a valid key");
            return false;
        }

        let value = value.into();
        // a literal top-level key shadows the dotted walk on reads, so it
        // must win writes too
        if let Some(existing) = self.data.get_mut(path) {
            *existing = value;
            return true;
        }
        if !path.contains(FIELD_SEPARATOR) {
            self.data.insert(path.to_string(), value);
            return true;
        }

        let segments: Vec<&str> = path.split(FIELD_SEPARATOR).collect();
        if !self.can_descend(&segments) {
            log::debug!("cannot descend through non-mapping value at {:?}", path);
            return false;
        }
        Self::deep_set(&mut self.data, &segments, value);
        true
    }

    /// Applies [`set`](Collection::set) for each entry, in iteration order.
    ///
    /// Entries succeed or fail independently; a rejected entry does not abort
    /// the rest. Returns `true` iff every entry succeeded.
    pub fn set_multiple<K, V, I>(&mut self, entries: I) -> bool
    where
        K: AsRef<str>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut all_ok = true;
        for (key, value) in entries {
            all_ok &= self.set(key.as_ref(), value);
        }
        all_ok
    }

    /// Removes the key at the given dotted path.
    ///
    /// The path is resolved exactly like [`get`](Collection::get); when it
    /// fully resolves, the terminal key is deleted from its containing
    /// mapping, preserving the order of the remaining keys. Removal of an
    /// unresolved path, and removal while locked, are silent no-ops.
    pub fn remove(&mut self, path: &str) {
        if self.locked {
            log::debug!("collection is locked, ignoring removal of {:?}", path);
            return;
        }
        if self.data.shift_remove(path).is_some() {
            return;
        }
        if !path.contains(FIELD_SEPARATOR) {
            return;
        }

        let segments: Vec<&str> = path.split(FIELD_SEPARATOR).collect();
        Self::deep_remove(&mut self.data, &segments);
    }

    /// Merges another collection into this one.
    ///
    /// When a key exists in both and both values are nested mappings, they
    /// are merged recursively; otherwise the incoming value overwrites the
    /// existing one. Returns `false` without mutating when locked.
    pub fn merge(&mut self, other: &Collection) -> bool {
        if self.locked {
            log::debug!("collection is locked, rejecting merge");
            return false;
        }
        Self::merge_maps(&mut self.data, &other.data);
        true
    }

    /// Returns the ordered sequence of top-level keys.
    ///
    /// Keys of nested mappings are not included; see
    /// [`fields`](Collection::fields) for flattened paths.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.data.keys().map(String::as_str)
    }

    /// Retrieves all flattened leaf paths of this collection.
    ///
    /// Nested mappings contribute their leaves joined with the separator; an
    /// empty nested mapping contributes nothing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dotmap::col;
    ///
    /// let c = col! {
    ///     hello: "world!",
    ///     app: { name: "My App", version: "1.1" },
    /// };
    ///
    /// let fields: Vec<String> = c.fields().into_vec();
    /// assert_eq!(fields, ["hello", "app.name", "app.version"]);
    /// ```
    pub fn fields(&self) -> FieldVec {
        let mut fields = FieldVec::new();
        Self::collect_fields(&self.data, "", &mut fields);
        fields
    }

    /// Gets an iterator over the top-level key-value pairs.
    pub fn iter(&self) -> CollectionIter<'_> {
        CollectionIter {
            inner: self.data.iter(),
        }
    }

    /// Returns a reference to the underlying nested mapping.
    pub fn as_map(&self) -> &IndexMap<String, Value> {
        &self.data
    }

    /// Returns the full nested mapping as a plain structure, preserving
    /// insertion order at every level.
    ///
    /// Serializing the collection directly produces output identical to
    /// serializing this mapping.
    pub fn to_map(&self) -> IndexMap<String, Value> {
        self.data.clone()
    }

    /// Consumes the collection and returns the underlying mapping.
    pub fn into_map(self) -> IndexMap<String, Value> {
        self.data
    }

    /// Returns a new collection containing, in original insertion order,
    /// exactly the top-level entries for which the predicate is true.
    ///
    /// The receiver is unmodified and the result is unlocked, so transforms
    /// chain freely.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dotmap::col;
    ///
    /// let c = col! { a: 1, b: "two", c: 3 };
    /// let numbers = c.filter(|_, value| value.is_number());
    /// assert_eq!(numbers.keys().collect::<Vec<_>>(), ["a", "c"]);
    /// ```
    pub fn filter<P>(&self, mut predicate: P) -> Collection
    where
        P: FnMut(&str, &Value) -> bool,
    {
        let data = self
            .data
            .iter()
            .filter(|(key, value)| predicate(key.as_str(), value))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        Collection {
            data,
            locked: false,
        }
    }

    /// Returns a new collection with the same top-level keys in the same
    /// order, each value replaced by `transform(key, value)`.
    ///
    /// The receiver is unmodified.
    pub fn map<F>(&self, mut transform: F) -> Collection
    where
        F: FnMut(&str, &Value) -> Value,
    {
        let data = self
            .data
            .iter()
            .map(|(key, value)| (key.clone(), transform(key.as_str(), value)))
            .collect();
        Collection {
            data,
            locked: false,
        }
    }

    /// Folds the top-level entries in insertion order, starting from
    /// `initial`.
    ///
    /// A collection with zero top-level entries returns `initial` unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dotmap::col;
    ///
    /// let c = col! { a: 1, b: 2, c: 3 };
    /// let sum = c.reduce(|_, value, acc| acc + value.as_i64().unwrap_or(0), 0);
    /// assert_eq!(sum, 6);
    /// ```
    pub fn reduce<A, F>(&self, mut combine: F, initial: A) -> A
    where
        F: FnMut(&str, &Value, A) -> A,
    {
        let mut accumulator = initial;
        for (key, value) in &self.data {
            accumulator = combine(key.as_str(), value, accumulator);
        }
        accumulator
    }

    // Walks the existing portion of the path and reports whether every
    // already-present non-terminal segment is a mapping. Absent segments are
    // fine, they will be created fresh.
    fn can_descend(&self, segments: &[&str]) -> bool {
        let mut current = &self.data;
        for segment in &segments[..segments.len() - 1] {
            match current.get(*segment) {
                Some(Value::Map(nested)) => current = nested,
                Some(_) => return false,
                None => return true,
            }
        }
        true
    }

    // Precondition: the path was validated with can_descend, so every
    // existing non-terminal segment is a mapping.
    fn deep_set(map: &mut IndexMap<String, Value>, segments: &[&str], value: Value) {
        let key = segments[0];
        if segments.len() == 1 {
            map.insert(key.to_string(), value);
            return;
        }

        let entry = map
            .entry(key.to_string())
            .or_insert_with(|| Value::Map(IndexMap::new()));
        if let Value::Map(nested) = entry {
            Self::deep_set(nested, &segments[1..], value);
        }
    }

    fn deep_remove(map: &mut IndexMap<String, Value>, segments: &[&str]) {
        let key = segments[0];
        if segments.len() == 1 {
            map.shift_remove(key);
            return;
        }

        if let Some(Value::Map(nested)) = map.get_mut(key) {
            Self::deep_remove(nested, &segments[1..]);
        }
        // a non-mapping or absent segment makes removal a silent no-op
    }

    fn merge_maps(target: &mut IndexMap<String, Value>, source: &IndexMap<String, Value>) {
        for (key, value) in source {
            let recurse = matches!(
                (target.get(key), value),
                (Some(Value::Map(_)), Value::Map(_))
            );
            if recurse {
                if let (Some(Value::Map(existing)), Value::Map(incoming)) =
                    (target.get_mut(key), value)
                {
                    Self::merge_maps(existing, incoming);
                }
            } else {
                target.insert(key.clone(), value.clone());
            }
        }
    }

    fn collect_fields(map: &IndexMap<String, Value>, prefix: &str, fields: &mut FieldVec) {
        for (key, value) in map {
            let field = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{}{}{}", prefix, FIELD_SEPARATOR, key)
            };

            if let Value::Map(nested) = value {
                Self::collect_fields(nested, &field, fields);
            } else {
                fields.push(field);
            }
        }
    }

    pub(crate) fn to_pretty_json(&self, indent: usize) -> String {
        if self.data.is_empty() {
            return "{}".to_string();
        }

        let indent_str = " ".repeat(indent + 2);
        let body = self
            .data
            .iter()
            .map(|(key, value)| {
                format!(
                    "{}\"{}\": {}",
                    indent_str,
                    key,
                    value.to_pretty_json(indent + 2)
                )
            })
            .join(",\n");
        format!("{{\n{}\n{}}}", body, " ".repeat(indent))
    }

    pub(crate) fn to_debug_string(&self, indent: usize) -> String {
        if self.data.is_empty() {
            return "{}".to_string();
        }

        let indent_str = " ".repeat(indent + 2);
        let body = self
            .data
            .iter()
            .map(|(key, value)| {
                format!(
                    "{}\"{}\": {}",
                    indent_str,
                    key,
                    value.to_debug_string(indent + 2)
                )
            })
            .join(",\n");
        format!("{{\n{}\n{}}}", body, " ".repeat(indent))
    }
}

impl Debug for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_debug_string(0))
    }
}

impl Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_pretty_json(0))
    }
}

impl From<IndexMap<String, Value>> for Collection {
    fn from(data: IndexMap<String, Value>) -> Self {
        Collection {
            data,
            locked: false,
        }
    }
}

impl From<Collection> for Value {
    fn from(collection: Collection) -> Self {
        Value::Map(collection.into_map())
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Collection {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Collection {
            data: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
            locked: false,
        }
    }
}

/// Index-operator sugar for reads, delegating exactly to
/// [`get`](Collection::get).
///
/// An unresolved path yields [Value::Null] rather than a panic, keeping the
/// operator total. Writes, presence tests, and removals stay on the named
/// methods; Rust's `IndexMut` cannot express a failable write.
impl Index<&str> for Collection {
    type Output = Value;

    fn index(&self, path: &str) -> &Value {
        self.get(path).unwrap_or(&NULL)
    }
}

/// Iterator over the top-level key-value pairs of a [Collection], in
/// insertion order.
pub struct CollectionIter<'a> {
    inner: indexmap::map::Iter<'a, String, Value>,
}

impl<'a> Iterator for CollectionIter<'a> {
    type Item = (&'a str, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, value)| (key.as_str(), value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for CollectionIter<'_> {}

impl<'a> IntoIterator for &'a Collection {
    type Item = (&'a str, &'a Value);
    type IntoIter = CollectionIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for Collection {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use super::*;
    use crate::errors::{CollectionError, CollectionResult, ErrorKind};

    /// Serializes exactly like the underlying mapping, so serializing a
    /// collection is byte-identical to serializing
    /// [`to_map`](Collection::to_map).
    impl serde::Serialize for Collection {
        fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            self.data.serialize(serializer)
        }
    }

    impl<'de> serde::Deserialize<'de> for Collection {
        fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let data = IndexMap::<String, Value>::deserialize(deserializer)?;
            Ok(Collection {
                data,
                locked: false,
            })
        }
    }

    impl Collection {
        /// Serializes the collection to a JSON string.
        pub fn to_json(&self) -> CollectionResult<String> {
            Ok(serde_json::to_string(self)?)
        }

        /// Serializes the collection to a pretty-printed JSON string.
        pub fn to_json_pretty(&self) -> CollectionResult<String> {
            Ok(serde_json::to_string_pretty(self)?)
        }

        /// Builds an unlocked collection from a JSON object.
        ///
        /// Top-level keys of the document are stored literally, dotted or
        /// not. Insertion order follows document order.
        pub fn from_json(json: &str) -> CollectionResult<Collection> {
            serde_json::from_str(json)
                .map_err(|err| CollectionError::new(&err.to_string(), ErrorKind::ParseError))
        }
    }
}

/// Normalizes a stringified macro key by stripping surrounding quotes.
pub fn normalize(value: &str) -> String {
    value.trim_matches('"').to_string()
}

/// Creates a [Collection](crate::collection::Collection) with JSON-like syntax.
///
/// Nested braces become nested mappings; any other value is converted through
/// `Into<Value>`, so `()` stores a null.
///
/// # Examples
///
/// ```rust
/// use dotmap::col;
///
/// // Empty collection
/// let empty = col! {};
///
/// // Simple key-value pairs
/// let simple = col! {
///     name: "Alice",
///     age: 30,
/// };
///
/// // With expressions
/// let base = 100;
/// let with_expr = col! {
///     score: (base * 2),
/// };
///
/// // Nested mappings and literal keys
/// let config = col! {
///     "app.title": "stored literally",
///     app: {
///         version: "1.1",
///     },
/// };
/// ```
#[macro_export]
macro_rules! col {
    () => {
        $crate::collection::Collection::new()
    };

    ($($key:tt : $value:tt),* $(,)?) => {
        {
            #[allow(unused_imports)]
            use $crate::col_value;

            let mut collection = $crate::collection::Collection::new();
            $(
                collection.insert(
                    $crate::collection::normalize(stringify!($key)),
                    $crate::col_value!($value),
                );
            )*
            collection
        }
    };
}

/// Helper macro to convert values for the [col!](crate::col) macro.
/// Handles nested mappings and expressions.
#[macro_export]
macro_rules! col_value {
    // match a nested mapping
    ({ $($key:tt : $value:tt),* $(,)? }) => {
        $crate::common::Value::Map($crate::col!($($key : $value),*).into_map())
    };

    // match an expression (variable, function call, arithmetic in parens, literals, etc.)
    ($value:expr) => {
        $crate::common::Value::from($value)
    };
}
