use nalgebra::{Point3, Vector3};

pub type PointCloud = Vec<Point3<f64>>;

pub fn centroid(points: &[Point3<f64>]) -> Point3<f64> {
    if points.is_empty() {
        return Point3::origin();
    }
    let sum: Vector3<f64> = points.iter().map(|p| p.coords).sum();
    Point3::from(sum / points.len() as f64)
}

/// Every `stride`-th point starting at `offset`, e.g. all C-alpha atoms of an N-CA-C-O cloud.
pub fn interleaved(points: &[Point3<f64>], stride: usize, offset: usize) -> PointCloud {
    points.iter().skip(offset).step_by(stride).copied().collect()
}

/// Inverse of [`interleaved`]: writes `subsequence` back into every `stride`-th slot of `target`.
pub fn scatter_interleaved(
    target: &mut [Point3<f64>],
    subsequence: &[Point3<f64>],
    stride: usize,
    offset: usize,
) {
    for (slot, point) in target
        .iter_mut()
        .skip(offset)
        .step_by(stride)
        .zip(subsequence)
    {
        *slot = *point;
    }
}

pub fn first_non_finite(points: &[Point3<f64>]) -> Option<usize> {
    points
        .iter()
        .position(|p| !p.coords.iter().all(|c| c.is_finite()))
}

/// Euclidean distance between corresponding points.
pub fn deviations(a: &[Point3<f64>], b: &[Point3<f64>]) -> Vec<f64> {
    a.iter().zip(b).map(|(p, q)| (p - q).norm()).collect()
}
