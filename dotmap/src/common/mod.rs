//! Common types shared across the crate.
//!
//! The central type here is [`Value`], the tagged union stored inside a
//! [`Collection`](crate::collection::Collection). A value is either null, a
//! scalar (boolean, integer, float, string), or another ordered mapping of
//! the same shape.

mod value;

pub use value::Value;

pub(crate) use value::NULL;
