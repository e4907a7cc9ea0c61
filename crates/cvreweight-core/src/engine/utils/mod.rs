//! Helpers shared by the trajectory consumers.

pub(crate) mod records;
