//! Usage: Cross-cutting utilities shared across domains (low-level helpers, pure logic).

pub(crate) mod blocking;
pub(crate) mod mutex_ext;
pub(crate) mod time;
