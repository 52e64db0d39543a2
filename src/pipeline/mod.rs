//! Per-query source pipeline: ingest, dedup, rank, register.

pub mod assemble;
pub mod dedup;
pub mod ingest;
pub mod ranking;
