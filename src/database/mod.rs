//! # Database Loading Module
//!
//! Turns header names and data rows into a DuckDB table: column resolution,
//! value conversion, schema rendering and row import.
pub mod column;
pub mod converter;
pub mod destination;
pub mod importer;
pub mod schema;
pub mod value;
