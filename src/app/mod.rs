//! Binary-local application orchestration.

pub(crate) mod entry;
