//! # Core Models Module
//!
//! This module contains the small set of value types every other layer of molpub
//! builds on: how a structure is sampled, which similarity metric is in use, and
//! helpers for working with raw coordinate arrays.
//!
//! ## Overview
//!
//! A structure is handed to molpub as an ordered point cloud (`Vec<Point3<f64>>`).
//! How those points map onto residues or nucleotides is described by a
//! [`model::ModelType`]; composite models such as `N-CA-C-O` interleave several
//! atoms per unit, so a cloud is only valid for such a model when its length is an
//! exact multiple of the atoms-per-unit count.
//!
//! ## Key Components
//!
//! - [`model`] - Model types (`CA`, `N-CA-C-O`, `3SPN`, `C3'`) and molecule families
//! - [`metric`] - Similarity metrics (RMSD, TM-score, GDT-HA, GDT-TS) and their ordering
//! - [`cloud`] - Centroids, interleaved decomposition and point-wise deviations
//!
//! ## Usage
//!
//! ```ignore
//! use molpub::core::models::{cloud, model::ModelType};
//!
//! let model: ModelType = "N-CA-C-O".parse()?;
//! let calpha = cloud::interleaved(&backbone, model.atoms_per_unit(), 1);
//! ```

pub mod cloud;
pub mod metric;
pub mod model;
