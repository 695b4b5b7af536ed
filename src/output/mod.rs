//! Terminal decoration and transcript logging.

pub mod formatter;
pub mod logger;
