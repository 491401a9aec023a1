//! # Engine Module
//!
//! This module turns the stateless kernels of [`crate::core`] into scored comparisons
//! between whole structures and the collection-level tasks built on them.
//!
//! ## Overview
//!
//! A comparison is driven by a [`score::ScoreMethod`], an immutable pairing of a
//! similarity metric with a coordinate model. Scoring decides which structure slides
//! along the other, enumerates every superposition trial, evaluates the metric on each
//! (in parallel when the `parallel` feature is enabled) and keeps the best. Composite
//! models (N-CA-C-O, 3SPN) are scored per atom offset and summed.
//!
//! ## Architecture
//!
//! - **Scoring** ([`score`]) - The `ScoreMethod` façade and the trial accumulator
//! - **Threshold Predicate** ([`similarity`]) - Directional threshold checks and the
//!   default thresholds per metric and model
//! - **Configuration** ([`config`]) - Clustering parameters, built in code or loaded from TOML
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events
//! - **Error Handling** ([`error`]) - Engine-specific error types
//! - **Tasks** ([`tasks`]) - Clustering, pairwise difference profiles and k-mer windows
//!
//! ## Key Capabilities
//!
//! - **Sliding-window alignment** of a fragment against a longer structure
//! - **Fixed or per-point pivots** for the rigid-body superposition
//! - **Greedy clustering** under "all" or "any" merge rules
//! - **Per-unit deviation profiles** across a structure ensemble

pub mod config;
pub mod error;
pub mod progress;
pub mod score;
pub mod similarity;
pub mod tasks;
