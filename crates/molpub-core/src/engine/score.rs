use super::config::ConfigError;
use super::error::EngineError;
use crate::core::metrics::Kernel;
use crate::core::models::cloud::{PointCloud, interleaved, scatter_interleaved};
use crate::core::models::metric::SimilarityMetric;
use crate::core::models::model::ModelType;
use crate::core::superposition::{PivotMode, Superposer};
use nalgebra::Point3;
use tracing::trace;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Outcome of scoring one structure against another.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityResult {
    pub score: f64,
    /// The candidate (the shorter structure) superposed onto the reference window.
    pub candidate: PointCloud,
    /// The reference points the candidate was matched against.
    pub reference: PointCloud,
    /// Start of the window, in points of the reference structure.
    pub window_offset: usize,
    /// `true` when the second structure was used as the candidate.
    pub reversed: bool,
}

/// A similarity metric bound to a model type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScoreMethod {
    metric: SimilarityMetric,
    model: ModelType,
}

impl Default for ScoreMethod {
    fn default() -> Self {
        Self {
            metric: SimilarityMetric::Rmsd,
            model: ModelType::Ca,
        }
    }
}

impl ScoreMethod {
    pub fn new(metric: SimilarityMetric, model: ModelType) -> Result<Self, EngineError> {
        let gdt = metric.gdt_cutoffs().is_some();
        if gdt && !matches!(model, ModelType::Ca | ModelType::Backbone) {
            return Err(EngineError::UnsupportedModel { metric, model });
        }
        Ok(Self { metric, model })
    }

    pub fn from_names(metric: &str, model: &str) -> Result<Self, EngineError> {
        let metric: SimilarityMetric = metric.parse().map_err(ConfigError::from)?;
        let model: ModelType = model.parse().map_err(ConfigError::from)?;
        Self::new(metric, model)
    }

    pub fn metric(&self) -> SimilarityMetric {
        self.metric
    }

    pub fn model(&self) -> ModelType {
        self.model
    }

    pub fn params(&self) -> (SimilarityMetric, ModelType) {
        (self.metric, self.model)
    }

    /// Scores two structures, sliding the shorter one along the longer one when their
    /// lengths differ (which also forces per-point pivots).
    pub fn score(
        &self,
        structure_1: &[Point3<f64>],
        structure_2: &[Point3<f64>],
        use_center: bool,
    ) -> Result<SimilarityResult, EngineError> {
        self.check_conformance(structure_1)?;
        self.check_conformance(structure_2)?;

        let (candidate, reference, reversed) = if structure_1.len() > structure_2.len() {
            (structure_2, structure_1, true)
        } else {
            (structure_1, structure_2, false)
        };
        let pivot_mode = if structure_1.len() == structure_2.len() {
            PivotMode::from_use_center(use_center)
        } else {
            PivotMode::EveryPoint
        };

        let (score, rotated, window_offset) =
            if self.metric == SimilarityMetric::Rmsd || !self.model.is_composite() {
                self.evaluate_whole(candidate, reference, pivot_mode)?
            } else {
                self.evaluate_decomposed(candidate, reference, pivot_mode)?
            };

        trace!(
            metric = %self.metric,
            model = %self.model,
            score,
            window_offset,
            reversed,
            "Scored structure pair."
        );

        Ok(SimilarityResult {
            score,
            candidate: rotated,
            reference: reference[window_offset..window_offset + candidate.len()].to_vec(),
            window_offset,
            reversed,
        })
    }

    fn check_conformance(&self, structure: &[Point3<f64>]) -> Result<(), EngineError> {
        match self.model.unit_count(structure.len()) {
            Some(_) => Ok(()),
            None => Err(EngineError::IncompatibleLength {
                model: self.model,
                length: structure.len(),
                atoms_per_unit: self.model.atoms_per_unit(),
            }),
        }
    }

    fn kernel(&self, candidate_points: usize) -> Kernel {
        let units = candidate_points / self.model.atoms_per_unit();
        Kernel::for_metric(self.metric, self.model.family(), units)
    }

    fn evaluate_whole(
        &self,
        candidate: &[Point3<f64>],
        reference: &[Point3<f64>],
        pivot_mode: PivotMode,
    ) -> Result<(f64, PointCloud, usize), EngineError> {
        // Composite clouds only slide by whole units, so atoms stay matched by name.
        let superposer = Superposer::new(candidate, reference, pivot_mode)?
            .with_window_stride(self.model.atoms_per_unit());
        let kernel = if self.metric == SimilarityMetric::Rmsd {
            Kernel::Deviation
        } else {
            self.kernel(candidate.len())
        };

        let mut accumulator = TrialAccumulator::new(superposer.trial_count());
        accumulator.add(&trial_scores(&superposer, &kernel));
        let (best, score) = accumulator.best(self.metric).ok_or_else(no_trials)?;

        let trial = superposer.trial(best).ok_or_else(no_trials)?;
        Ok((score, trial.candidate, trial.window_offset))
    }

    // Each atom offset of a composite model (all N, all CA, ...) is superposed on its
    // own; the trial maximising the summed score across offsets wins.
    fn evaluate_decomposed(
        &self,
        candidate: &[Point3<f64>],
        reference: &[Point3<f64>],
        pivot_mode: PivotMode,
    ) -> Result<(f64, PointCloud, usize), EngineError> {
        let stride = self.model.atoms_per_unit();
        let subsequences: Vec<(PointCloud, PointCloud)> = (0..stride)
            .map(|offset| {
                (
                    interleaved(candidate, stride, offset),
                    interleaved(reference, stride, offset),
                )
            })
            .collect();
        let superposers = subsequences
            .iter()
            .map(|(c, r)| Superposer::new(c, r, pivot_mode))
            .collect::<Result<Vec<_>, _>>()?;

        let kernel = self.kernel(candidate.len());
        let trial_count = superposers.first().map_or(0, Superposer::trial_count);
        let mut accumulator = TrialAccumulator::new(trial_count);
        for superposer in &superposers {
            accumulator.add(&trial_scores(superposer, &kernel));
        }
        let (best, score) = accumulator.best(self.metric).ok_or_else(no_trials)?;

        let mut rotated = vec![Point3::origin(); candidate.len()];
        let mut window_offset = 0;
        for (offset, superposer) in superposers.iter().enumerate() {
            let trial = superposer.trial(best).ok_or_else(no_trials)?;
            scatter_interleaved(&mut rotated, &trial.candidate, stride, offset);
            window_offset = trial.window_offset * stride;
        }

        Ok((score, rotated, window_offset))
    }
}

fn no_trials() -> EngineError {
    EngineError::Internal("superposition produced no trials".to_string())
}

fn trial_scores(superposer: &Superposer, kernel: &Kernel) -> Vec<f64> {
    #[cfg(not(feature = "parallel"))]
    let scores = superposer
        .trials()
        .map(|trial| kernel.evaluate(&trial.candidate, trial.reference))
        .collect();

    #[cfg(feature = "parallel")]
    let scores = (0..superposer.trial_count())
        .into_par_iter()
        .filter_map(|index| superposer.trial(index))
        .map(|trial| kernel.evaluate(&trial.candidate, trial.reference))
        .collect();

    scores
}

/// Per-trial score totals summed over one or more superposition runs with identical
/// trial layouts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrialAccumulator {
    totals: Vec<f64>,
}

impl TrialAccumulator {
    pub fn new(trial_count: usize) -> Self {
        Self {
            totals: vec![0.0; trial_count],
        }
    }

    pub fn add(&mut self, scores: &[f64]) {
        for (total, score) in self.totals.iter_mut().zip(scores) {
            *total += score;
        }
    }

    pub fn totals(&self) -> &[f64] {
        &self.totals
    }

    /// Index and value of the best total; the lowest index wins ties.
    pub fn best(&self, metric: SimilarityMetric) -> Option<(usize, f64)> {
        let mut totals = self.totals.iter().copied().enumerate();
        let first = totals.next()?;
        Some(totals.fold(first, |best, current| {
            if metric.improves(current.1, best.1) {
                current
            } else {
                best
            }
        }))
    }
}
