//! GeeksForGeeks user statistics
//!
//! [`service::StatsService`] fetches a user's practice page, reads the
//! embedded JSON payload, and falls back to heuristics over the legacy
//! profile page when that fails. [`api`] exposes it over HTTP.

pub mod api;
pub mod app;
pub mod extract;
pub mod model;
pub mod retriever;
pub mod service;
