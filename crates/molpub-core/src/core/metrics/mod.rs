//! # Metrics Module
//!
//! Per-trial similarity kernels evaluated on a superposed candidate and its reference
//! window.
//!
//! ## Overview
//!
//! Each kernel maps a pair of equal-length, already superposed point clouds to a scalar:
//!
//! - **Normalized deviation** - norm of the coordinate difference divided by the point count
//! - **TM-score** - `Σ 1/(1+(dᵢ/d0)²) / L`, with the distance scale d0 derived from the
//!   chain length using the protein (Zhang and Skolnick, 2004) or RNA (Gong et al., 2019)
//!   empirical formula
//! - **GDT** - the share of units within the HA ({0.5, 1, 2, 4} Å) or TS ({1, 2, 4, 8} Å)
//!   cutoffs, as a percentage
//!
//! Kernels know nothing about windows, pivots or composite models; the scoring engine
//! decides which subsequences to feed them and how to combine the results.

pub mod kernels;

pub use kernels::Kernel;
