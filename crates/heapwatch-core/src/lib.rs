//! heapwatch-core — shared library for the heapwatch ecosystem.
//!
//! Provides:
//! - `snapshot` — V8 heap snapshot decoding, schema resolution, graph access
//! - `classify` — resource-type and constructor-name classification
//! - `analysis` — per-snapshot analysis, constructor deltas, leak detection
//! - `report` — report record (the JSON contract) and on-disk report store

pub mod analysis;
pub mod classify;
pub mod report;
pub mod snapshot;
