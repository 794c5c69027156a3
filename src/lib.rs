//! Buy & Build analysis for the Nordic construction sector.
//!
//! Two pipelines over Excel source data: keyword classification of investee
//! companies into industry segments, and NACE-based mapping of a target
//! framework onto the same taxonomy to surface potential acquirers.

pub mod acquirers;
pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod format;
pub mod ingest;
pub mod model;
pub mod nace;
pub mod pipeline;
pub mod platform;
pub mod report;
pub mod score;
pub mod taxonomy;
