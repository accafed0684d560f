//! Extraction of statistics from fetched upstream pages
//!
//! [`structured`] reads the JSON payload of the practice page; [`legacy`]
//! falls back to heuristics over the older profile page markup.

pub mod legacy;
pub mod structured;
