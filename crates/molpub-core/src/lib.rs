//! # molpub Core Library
//!
//! A library for structural alignment and similarity scoring of protein and nucleic acid
//! chains, built around the Kabsch superposition.
//!
//! ## Architectural Philosophy
//!
//! The library keeps the same three layers throughout, each depending only on the ones
//! below it.
//!
//! - **[`core`]: The Foundation.** Stateless coordinate models (`ModelType`,
//!   `SimilarityMetric`), the Kabsch `Superposer` with its sliding windows and pivots,
//!   and the per-trial similarity kernels (deviation, TM-score, GDT).
//!
//! - **[`engine`]: The Logic Core.** The `ScoreMethod` façade that searches every trial
//!   for the best score, the threshold predicate `similar`, clustering configuration and
//!   the collection tasks: clustering, pairwise difference profiles and k-mer windows.
//!
//! - **[`workflows`]: The Public API.** End-to-end procedures such as `align`, which
//!   clusters a structure set and superposes it onto a common anchor.
//!
//! Coordinates are always `nalgebra::Point3<f64>` slices; reading structure files is left
//! to the caller.

pub mod core;
pub mod engine;
pub mod workflows;
