//! # Workflows Module
//!
//! This module provides the high-level entry points that combine clustering and
//! superposition into complete procedures over a collection of structures.
//!
//! ## Overview
//!
//! Workflows take plain coordinate arrays together with a
//! [`ClusterConfig`](crate::engine::config::ClusterConfig) and a progress reporter, run
//! the engine tasks in order and return an organized result. They perform no file I/O.
//!
//! ## Architecture
//!
//! - **Alignment Workflow** ([`align`]) - Clusters a structure set and superposes every
//!   member onto the first structure, grouping the superposed coordinates by cluster.

pub mod align;

pub use align::{Alignment, run as align};
