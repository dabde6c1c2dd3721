//! # Dotmap - Nested Key-Value Container
//!
//! Dotmap is a lightweight, ordered, nested key-value container for Rust.
//! It exposes ergonomic deep-get/deep-set semantics over arbitrarily deep
//! mappings through dotted paths, without hand-rolled recursive lookups.
//!
//! ## Key Features
//!
//! - **Dotted paths**: `collection.get("app.version")` walks nested mappings
//! - **Order preserving**: insertion order is observable through key
//!   enumeration, iteration, and serialization at every nesting level
//! - **Locking**: a one-way lock turns every mutating operation into a
//!   failure-reporting no-op
//! - **Transforms**: order-preserving `filter`/`map`/`reduce` over top-level
//!   entries, freely chainable
//! - **Total contract**: misuse is reported through return values, never
//!   through panics
//! - **JSON interchange**: serialization of a collection is byte-identical to
//!   serialization of its plain nested mapping (with the default `serde`
//!   feature)
//!
//! ## Quick Start
//!
//! ```rust
//! use dotmap::col;
//! use dotmap::common::Value;
//!
//! let mut config = col! {
//!     hello: "world!",
//!     app: {
//!         name: "My App",
//!         version: "1.1",
//!     },
//! };
//!
//! assert_eq!(config.get("app.version"), Some(&Value::from("1.1")));
//!
//! // missing intermediate mappings are created on demand
//! assert!(config.set("something.deep", "abyss"));
//!
//! // but a scalar is never silently promoted to a mapping
//! assert!(!config.set("hello.deep", "x"));
//!
//! config.lock();
//! assert!(!config.set("app.version", "1.2"));
//! ```
//!
//! ## Module Organization
//!
//! - [`collection`] - The [`Collection`](collection::Collection) container and
//!   its construction macros
//! - [`common`] - The [`Value`](common::Value) union stored in collections
//! - [`errors`] - Error types and result definitions for the JSON surface

pub mod collection;
pub mod common;
pub mod errors;

/// Separator interpreted when resolving a query path. It carries no meaning
/// when a key is stored at the top level.
pub(crate) const FIELD_SEPARATOR: char = '.';
