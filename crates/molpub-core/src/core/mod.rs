//! # Core Module
//!
//! This module provides the stateless building blocks of molpub: coordinate models,
//! the Kabsch superposition primitive and the similarity kernels.
//!
//! ## Overview
//!
//! Everything in `core` operates on plain arrays of 3D points. Structures arrive from
//! whatever loaded them (PDB/mmCIF readers, trajectory frames, generated models) as
//! `Vec<Point3<f64>>`, one cloud per chain and model granularity. Nothing here knows
//! about files, rendering or user interfaces.
//!
//! ## Architecture
//!
//! - **Coordinate Models** ([`models`]) - Model types, molecule families, similarity metrics
//!   and point cloud helpers
//! - **Superposition** ([`superposition`]) - Kabsch rigid-body alignment over sliding windows
//!   and pivot choices
//! - **Similarity Kernels** ([`metrics`]) - RMSD-style deviation, TM-score and GDT evaluated
//!   on a single superposition trial
//!
//! ## Scientific Foundation
//!
//! - **Kabsch algorithm** (1976) for the least-squares optimal rotation via SVD
//! - **TM-score** (Zhang and Skolnick, 2004) for length-normalised fold similarity
//! - **GDT** (Zemla, 2003) for cutoff-based model quality as used in CASP

pub mod metrics;
pub mod models;
pub mod superposition;
