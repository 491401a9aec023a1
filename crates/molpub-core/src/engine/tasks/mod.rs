//! Collection-level tasks built on pairwise scoring.
//!
//! Each submodule implements one operation over a set of structures or a single chain:
//! greedy similarity clustering, per-unit deviation profiles across an ensemble, and
//! the k-mer decomposition of a chain with its coordinates.

pub mod cluster;
pub mod difference;
pub mod kmer;
