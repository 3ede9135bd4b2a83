//! CLI command implementations

pub(crate) mod common;
pub(crate) mod load;
pub(crate) mod plan;
pub(crate) mod query;
pub(crate) mod report;
