//! # Superposition Module
//!
//! Rigid-body superposition of one point cloud onto another with the Kabsch algorithm
//! (W. Kabsch, Acta Cryst. A, 1976).
//!
//! ## Overview
//!
//! A [`kabsch::Superposer`] pairs a candidate cloud with an equal-or-longer reference.
//! When the reference is longer, the candidate is slid along it and every window offset
//! is tried; for each window the rotation is solved either about the centroids or about
//! each candidate point in turn (the pivot search used by TM-score style evaluation,
//! Zhang and Skolnick, Proteins, 2004). Each combination is a [`kabsch::Trial`].
//!
//! Trials are independent of each other: they can be enumerated lazily with
//! [`kabsch::Superposer::trials`] or computed by index with
//! [`kabsch::Superposer::trial`], which is what the scoring engine uses to fan work out
//! across threads.

pub mod kabsch;

pub use kabsch::{PivotMode, SuperpositionError, Superposer, Trial, Trials, rotation_between};
