//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - DuckDB for the durable Repository backend
//! - In-memory vectors for the throwaway Repository backend

pub mod duckdb;
pub mod memory;
