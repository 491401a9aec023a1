use crate::core::models::metric::{GDT_HA_CUTOFFS, GDT_TS_CUTOFFS, SimilarityMetric};
use crate::core::models::model::MoleculeFamily;
use nalgebra::Point3;

/// Frobenius norm of the flattened difference divided by the number of points.
#[inline]
pub fn normalized_deviation(candidate: &[Point3<f64>], reference: &[Point3<f64>]) -> f64 {
    if candidate.is_empty() {
        return 0.0;
    }
    let squared: f64 = candidate
        .iter()
        .zip(reference)
        .map(|(c, r)| (c - r).norm_squared())
        .sum();
    squared.sqrt() / candidate.len() as f64
}

/// TM-score distance scale for a chain of `units` residues or nucleotides.
pub fn tm_d0(family: MoleculeFamily, units: usize) -> f64 {
    let length = units as f64;
    match family {
        MoleculeFamily::Protein => {
            if units > 21 {
                1.24 * (length - 15.0).cbrt() - 1.8
            } else {
                0.5
            }
        }
        MoleculeFamily::NucleicAcid => match units {
            31.. => 0.6 * (length - 0.5).sqrt() - 2.5,
            24..=30 => 0.7,
            20..=23 => 0.6,
            16..=19 => 0.5,
            12..=15 => 0.4,
            _ => 0.3,
        },
    }
}

#[inline]
pub fn tm_score(candidate: &[Point3<f64>], reference: &[Point3<f64>], d0: f64) -> f64 {
    if candidate.is_empty() {
        return 0.0;
    }
    let total: f64 = candidate
        .iter()
        .zip(reference)
        .map(|(c, r)| {
            let ratio = (c - r).norm() / d0;
            1.0 / (1.0 + ratio * ratio)
        })
        .sum();
    total / candidate.len() as f64
}

/// Percentage of units under each cutoff, averaged over the four cutoffs.
#[inline]
pub fn gdt_score(candidate: &[Point3<f64>], reference: &[Point3<f64>], cutoffs: &[f64; 4]) -> f64 {
    if candidate.is_empty() {
        return 0.0;
    }
    let hits: usize = candidate
        .iter()
        .zip(reference)
        .map(|(c, r)| {
            let distance = (c - r).norm();
            cutoffs.iter().filter(|&&cutoff| distance < cutoff).count()
        })
        .sum();
    hits as f64 / (cutoffs.len() * candidate.len()) as f64 * 100.0
}

/// A metric with its per-call constants resolved, ready to score superposition trials.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Kernel {
    Deviation,
    Tm { d0: f64 },
    Gdt { cutoffs: [f64; 4] },
}

impl Kernel {
    /// `units` is the candidate's unit count, which sets d0 for TM-score.
    pub fn for_metric(metric: SimilarityMetric, family: MoleculeFamily, units: usize) -> Self {
        match metric {
            SimilarityMetric::Rmsd => Kernel::Deviation,
            SimilarityMetric::Tm => Kernel::Tm {
                d0: tm_d0(family, units),
            },
            SimilarityMetric::GdtHa => Kernel::Gdt {
                cutoffs: GDT_HA_CUTOFFS,
            },
            SimilarityMetric::GdtTs => Kernel::Gdt {
                cutoffs: GDT_TS_CUTOFFS,
            },
        }
    }

    #[inline]
    pub fn evaluate(&self, candidate: &[Point3<f64>], reference: &[Point3<f64>]) -> f64 {
        match self {
            Kernel::Deviation => normalized_deviation(candidate, reference),
            Kernel::Tm { d0 } => tm_score(candidate, reference, *d0),
            Kernel::Gdt { cutoffs } => gdt_score(candidate, reference, cutoffs),
        }
    }
}
