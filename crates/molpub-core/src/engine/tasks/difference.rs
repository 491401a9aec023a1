use super::cluster::check_equal_lengths;
use crate::core::models::cloud::deviations;
use crate::core::models::model::ModelType;
use crate::engine::error::EngineError;
use itertools::Itertools;
use nalgebra::Point3;
use tracing::{info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// How per-pair deviation profiles are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DifferenceAggregation {
    /// Mean over all pairs.
    #[default]
    Average,
    /// Sum over all pairs. Not the element-wise maximum.
    Maximum,
}

/// Per-unit deviation across every unordered pair of structures, in chain order. The
/// structures are compared in the frame they are given in; superpose them first
/// (see [`crate::workflows::align::run`]) for a rotation-invariant profile.
///
/// Composite models reduce each unit to the Euclidean norm of its per-atom deviations.
#[instrument(skip_all, name = "set_difference_task")]
pub fn set_difference(
    structures: &[Vec<Point3<f64>>],
    model: ModelType,
    aggregation: DifferenceAggregation,
) -> Result<Vec<f64>, EngineError> {
    if structures.len() < 2 {
        return Err(EngineError::TooFewStructures {
            required: 2,
            found: structures.len(),
        });
    }
    check_equal_lengths(structures)?;
    let length = structures[0].len();
    let units = model
        .unit_count(length)
        .ok_or(EngineError::IncompatibleLength {
            model,
            length,
            atoms_per_unit: model.atoms_per_unit(),
        })?;

    let pairs: Vec<(usize, usize)> = (0..structures.len()).tuple_combinations().collect();

    #[cfg(not(feature = "parallel"))]
    let iterator = pairs.iter();

    #[cfg(feature = "parallel")]
    let iterator = pairs.par_iter();

    let profiles: Vec<Vec<f64>> = iterator
        .map(|&(i, j)| unit_profile(&structures[i], &structures[j], model))
        .collect();

    let mut totals = vec![0.0; units];
    for profile in &profiles {
        for (total, value) in totals.iter_mut().zip(profile) {
            *total += value;
        }
    }
    if aggregation == DifferenceAggregation::Average {
        let count = pairs.len() as f64;
        totals.iter_mut().for_each(|total| *total /= count);
    }

    info!(
        structures = structures.len(),
        pairs = pairs.len(),
        units,
        ?aggregation,
        "Pairwise difference profile computed."
    );

    Ok(totals)
}

fn unit_profile(a: &[Point3<f64>], b: &[Point3<f64>], model: ModelType) -> Vec<f64> {
    let per_point = deviations(a, b);
    if !model.is_composite() {
        return per_point;
    }
    per_point
        .chunks(model.atoms_per_unit())
        .map(|unit| unit.iter().map(|d| d * d).sum::<f64>().sqrt())
        .collect()
}
