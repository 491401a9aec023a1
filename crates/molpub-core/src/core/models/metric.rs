use phf::{Map, phf_map};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimilarityMetric {
    Rmsd,
    Tm,
    GdtHa,
    GdtTs,
}

pub const GDT_HA_CUTOFFS: [f64; 4] = [0.5, 1.0, 2.0, 4.0];
pub const GDT_TS_CUTOFFS: [f64; 4] = [1.0, 2.0, 4.0, 8.0];

static METRICS: Map<&'static str, SimilarityMetric> = phf_map! {
    "RMSD" => SimilarityMetric::Rmsd,
    "TM" => SimilarityMetric::Tm,
    "TM-SCORE" => SimilarityMetric::Tm,
    "GDT-HA" => SimilarityMetric::GdtHa,
    "GDT-TS" => SimilarityMetric::GdtTs,
};

impl SimilarityMetric {
    pub const ALL: [SimilarityMetric; 4] = [
        SimilarityMetric::Rmsd,
        SimilarityMetric::Tm,
        SimilarityMetric::GdtHa,
        SimilarityMetric::GdtTs,
    ];

    /// `true` when smaller scores mean more similar structures.
    #[inline]
    pub fn lower_is_better(self) -> bool {
        matches!(self, SimilarityMetric::Rmsd)
    }

    /// Whether `candidate` is a strictly better score than `incumbent` under this metric.
    #[inline]
    pub fn improves(self, candidate: f64, incumbent: f64) -> bool {
        let ordering = candidate.partial_cmp(&incumbent).unwrap_or(Ordering::Equal);
        if self.lower_is_better() {
            ordering == Ordering::Less
        } else {
            ordering == Ordering::Greater
        }
    }

    /// Distance cutoffs in Angstroms for the GDT family.
    pub fn gdt_cutoffs(self) -> Option<[f64; 4]> {
        match self {
            SimilarityMetric::GdtHa => Some(GDT_HA_CUTOFFS),
            SimilarityMetric::GdtTs => Some(GDT_TS_CUTOFFS),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SimilarityMetric::Rmsd => "RMSD",
            SimilarityMetric::Tm => "TM",
            SimilarityMetric::GdtHa => "GDT-HA",
            SimilarityMetric::GdtTs => "GDT-TS",
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown similarity metric '{0}' (expected one of RMSD, TM, GDT-HA, GDT-TS)")]
pub struct ParseMetricError(pub String);

impl FromStr for SimilarityMetric {
    type Err = ParseMetricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        METRICS
            .get(s.trim().to_uppercase().as_str())
            .copied()
            .ok_or_else(|| ParseMetricError(s.to_string()))
    }
}

impl fmt::Display for SimilarityMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
