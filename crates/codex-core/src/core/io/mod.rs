//! Loading of bundled and user-supplied databases, and export of results.
//!
//! Databases are TOML files embedded at compile time; a user file with the same
//! schema can replace any of them. Results are written as JSON documents and as
//! long-format chart-data CSV.

pub mod database;
pub mod export;
