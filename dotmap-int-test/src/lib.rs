//! Integration test support for dotmap.

pub mod test_util;
