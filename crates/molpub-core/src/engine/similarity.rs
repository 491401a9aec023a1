use super::error::EngineError;
use super::score::{ScoreMethod, SimilarityResult};
use crate::core::models::metric::SimilarityMetric;
use crate::core::models::model::ModelType;
use nalgebra::Point3;
use tracing::trace;

const TM_PROTEIN_THRESHOLD: f64 = 0.5;
const TM_NUCLEIC_ACID_THRESHOLD: f64 = 0.45;
const GDT_THRESHOLD: f64 = 92.4;

/// The threshold applied when none is declared, scaled by the number of atom offsets a
/// composite model sums over. RMSD has no default.
pub fn default_threshold(metric: SimilarityMetric, model: ModelType) -> Option<f64> {
    let per_offset = match (metric, model) {
        (SimilarityMetric::Rmsd, _) => return None,
        (SimilarityMetric::Tm, ModelType::Ca | ModelType::Backbone) => TM_PROTEIN_THRESHOLD,
        (SimilarityMetric::Tm, ModelType::ThreeSitePerNucleotide | ModelType::C3Prime) => {
            TM_NUCLEIC_ACID_THRESHOLD
        }
        (SimilarityMetric::GdtHa | SimilarityMetric::GdtTs, ModelType::Ca | ModelType::Backbone) => {
            GDT_THRESHOLD
        }
        _ => return None,
    };
    Some(per_offset * model.atoms_per_unit() as f64)
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityVerdict {
    pub similar: bool,
    pub threshold: f64,
    pub result: SimilarityResult,
}

/// Scores the pair and compares against `threshold` (or the method's default): RMSD
/// passes at or below it, every other metric at or above it.
pub fn similar(
    structure_1: &[Point3<f64>],
    structure_2: &[Point3<f64>],
    method: &ScoreMethod,
    use_center: bool,
    threshold: Option<f64>,
) -> Result<SimilarityVerdict, EngineError> {
    let (metric, model) = method.params();
    let threshold = threshold
        .or_else(|| default_threshold(metric, model))
        .ok_or(EngineError::MissingThreshold { metric })?;

    let result = method.score(structure_1, structure_2, use_center)?;
    let similar = if metric.lower_is_better() {
        result.score <= threshold
    } else {
        result.score >= threshold
    };

    trace!(score = result.score, threshold, similar, "Similarity decided.");

    Ok(SimilarityVerdict {
        similar,
        threshold,
        result,
    })
}
