use crate::core::models::cloud::{PointCloud, centroid, first_non_finite};
use nalgebra::{Matrix3, Point3, Rotation3};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SuperpositionError {
    #[error("Cannot superpose an empty structure")]
    EmptyStructure,

    #[error(
        "Candidate structure ({candidate} points) must not be longer than the reference structure ({reference} points)"
    )]
    CandidateLongerThanReference { candidate: usize, reference: usize },

    #[error("Structures must have the same number of points: {candidate} vs {reference}")]
    LengthMismatch { candidate: usize, reference: usize },

    #[error("Candidate coordinate {index} is not finite")]
    NonFiniteCandidate { index: usize },

    #[error("Reference coordinate {index} is not finite")]
    NonFiniteReference { index: usize },
}

/// Point held fixed at the origin while the optimal rotation is solved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PivotMode {
    /// One trial per window, rotating about the centroids.
    #[default]
    Centroid,
    /// One trial per candidate point, rotating about that point and its counterpart.
    EveryPoint,
}

impl PivotMode {
    pub fn from_use_center(use_center: bool) -> Self {
        if use_center {
            PivotMode::Centroid
        } else {
            PivotMode::EveryPoint
        }
    }
}

/// One (window, pivot) superposition of the candidate onto the reference.
#[derive(Debug, Clone)]
pub struct Trial<'a> {
    pub pivot_index: usize,
    pub pivot_count: usize,
    pub window_offset: usize,
    /// Rotation applied to the pivot-centred candidate.
    pub rotation: Rotation3<f64>,
    /// Candidate after rotation, expressed in the reference frame.
    pub candidate: PointCloud,
    /// The slice of the reference the candidate was superposed onto.
    pub reference: &'a [Point3<f64>],
}

/// Kabsch superposition of a candidate cloud onto every window of an equal-or-longer reference.
///
/// Trials are ordered window-major: trial `t` uses window `t / pivot_count` and pivot
/// `t % pivot_count`. Windows start every `window_stride` points (one by default), so
/// window `w` begins at reference point `w * window_stride`. Covariances of rank below two (fewer than three non-collinear
/// points) admit several optimal rotations; a proper rotation is still returned but
/// which one is unspecified.
#[derive(Debug, Clone, Copy)]
pub struct Superposer<'a> {
    candidate: &'a [Point3<f64>],
    reference: &'a [Point3<f64>],
    pivot_mode: PivotMode,
    window_stride: usize,
}

impl<'a> Superposer<'a> {
    pub fn new(
        candidate: &'a [Point3<f64>],
        reference: &'a [Point3<f64>],
        pivot_mode: PivotMode,
    ) -> Result<Self, SuperpositionError> {
        if candidate.is_empty() {
            return Err(SuperpositionError::EmptyStructure);
        }
        if candidate.len() > reference.len() {
            return Err(SuperpositionError::CandidateLongerThanReference {
                candidate: candidate.len(),
                reference: reference.len(),
            });
        }
        if let Some(index) = first_non_finite(candidate) {
            return Err(SuperpositionError::NonFiniteCandidate { index });
        }
        if let Some(index) = first_non_finite(reference) {
            return Err(SuperpositionError::NonFiniteReference { index });
        }
        if candidate.len() < 3 {
            warn!(
                points = candidate.len(),
                "Superposing fewer than three points; the optimal rotation is not unique."
            );
        }

        Ok(Self {
            candidate,
            reference,
            pivot_mode,
            window_stride: 1,
        })
    }

    /// Restricts windows to offsets that are multiples of `stride`, e.g. the atoms per
    /// unit of an interleaved model. A stride of zero is treated as one.
    pub fn with_window_stride(mut self, stride: usize) -> Self {
        self.window_stride = stride.max(1);
        self
    }

    pub fn pivot_mode(&self) -> PivotMode {
        self.pivot_mode
    }

    pub fn window_stride(&self) -> usize {
        self.window_stride
    }

    pub fn window_count(&self) -> usize {
        (self.reference.len() - self.candidate.len()) / self.window_stride + 1
    }

    pub fn pivot_count(&self) -> usize {
        match self.pivot_mode {
            PivotMode::Centroid => 1,
            PivotMode::EveryPoint => self.candidate.len(),
        }
    }

    pub fn trial_count(&self) -> usize {
        self.window_count() * self.pivot_count()
    }

    /// Computes trial `index` directly, without enumerating the ones before it.
    pub fn trial(&self, index: usize) -> Option<Trial<'a>> {
        if index >= self.trial_count() {
            return None;
        }
        let pivot_count = self.pivot_count();
        Some(self.evaluate(
            (index / pivot_count) * self.window_stride,
            index % pivot_count,
        ))
    }

    pub fn trials(&self) -> Trials<'a> {
        Trials {
            superposer: *self,
            next: 0,
            end: self.trial_count(),
        }
    }

    fn evaluate(&self, window_offset: usize, pivot_index: usize) -> Trial<'a> {
        let window = &self.reference[window_offset..window_offset + self.candidate.len()];

        let (candidate_pivot, reference_pivot) = match self.pivot_mode {
            PivotMode::Centroid => (centroid(self.candidate), centroid(window)),
            PivotMode::EveryPoint => (self.candidate[pivot_index], window[pivot_index]),
        };

        let h = cross_covariance(self.candidate, candidate_pivot, window, reference_pivot);
        let rotation = optimal_rotation(h);

        let candidate = self
            .candidate
            .iter()
            .map(|p| reference_pivot + rotation * (p - candidate_pivot))
            .collect();

        Trial {
            pivot_index,
            pivot_count: self.pivot_count(),
            window_offset,
            rotation,
            candidate,
            reference: window,
        }
    }
}

/// Lazy, restartable enumeration of a [`Superposer`]'s trials.
#[derive(Debug, Clone)]
pub struct Trials<'a> {
    superposer: Superposer<'a>,
    next: usize,
    end: usize,
}

impl<'a> Iterator for Trials<'a> {
    type Item = Trial<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let trial = self.superposer.trial(self.next);
        self.next += 1;
        trial
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Trials<'_> {}

/// Optimal rotation taking the centred `candidate` onto the centred `reference`.
pub fn rotation_between(
    candidate: &[Point3<f64>],
    reference: &[Point3<f64>],
) -> Result<Rotation3<f64>, SuperpositionError> {
    if candidate.len() != reference.len() {
        return Err(SuperpositionError::LengthMismatch {
            candidate: candidate.len(),
            reference: reference.len(),
        });
    }
    let superposer = Superposer::new(candidate, reference, PivotMode::Centroid)?;
    let h = cross_covariance(
        superposer.candidate,
        centroid(candidate),
        superposer.reference,
        centroid(reference),
    );
    Ok(optimal_rotation(h))
}

// H = Cᵗ·R over the pivot-centred clouds.
fn cross_covariance(
    candidate: &[Point3<f64>],
    candidate_pivot: Point3<f64>,
    reference: &[Point3<f64>],
    reference_pivot: Point3<f64>,
) -> Matrix3<f64> {
    candidate
        .iter()
        .zip(reference)
        .fold(Matrix3::zeros(), |acc, (c, r)| {
            acc + (c - candidate_pivot) * (r - reference_pivot).transpose()
        })
}

fn optimal_rotation(h: Matrix3<f64>) -> Rotation3<f64> {
    let svd = h.svd(true, true);
    // Both factors are always present when requested.
    let (Some(mut u), Some(v_t)) = (svd.u, svd.v_t) else {
        return Rotation3::identity();
    };

    if u.determinant() * v_t.determinant() < 0.0 {
        let weakest = svd.singular_values.imin();
        let flipped = -u.column(weakest);
        u.set_column(weakest, &flipped);
    }

    // U·Vᵗ rotates row vectors; its transpose acts on column vectors.
    Rotation3::from_matrix_unchecked((u * v_t).transpose())
}
