use crate::engine::error::EngineError;
use nalgebra::Point3;

/// Splits a chain and its coordinates into every contiguous window of `sub_length`
/// residues. The structure must hold the same number of points for every residue.
///
/// A `sub_length` longer than the chain yields nothing; otherwise exactly
/// `chain_length - sub_length + 1` windows are produced, in chain order.
pub fn kmer<'a>(
    chain: &'a str,
    structure: &'a [Point3<f64>],
    sub_length: usize,
) -> Result<Kmers<'a>, EngineError> {
    let boundaries: Vec<usize> = chain
        .char_indices()
        .map(|(offset, _)| offset)
        .chain(std::iter::once(chain.len()))
        .collect();
    let residues = boundaries.len() - 1;

    if residues == 0 {
        return Err(EngineError::InvalidKmer("the chain is empty".to_string()));
    }
    if sub_length == 0 {
        return Err(EngineError::InvalidKmer(
            "the sub-length must be positive".to_string(),
        ));
    }
    if structure.len() % residues != 0 {
        return Err(EngineError::InvalidKmer(format!(
            "{} points cannot be split evenly over {} residues",
            structure.len(),
            residues
        )));
    }

    Ok(Kmers {
        chain,
        structure,
        boundaries,
        sub_length,
        points_per_residue: structure.len() / residues,
        position: 0,
    })
}

/// Iterator over `(sequence, points)` windows, created by [`kmer`].
#[derive(Debug, Clone)]
pub struct Kmers<'a> {
    chain: &'a str,
    structure: &'a [Point3<f64>],
    boundaries: Vec<usize>,
    sub_length: usize,
    points_per_residue: usize,
    position: usize,
}

impl<'a> Kmers<'a> {
    pub fn points_per_residue(&self) -> usize {
        self.points_per_residue
    }

    // `boundaries` holds one entry per residue plus the end of the chain.
    fn window_count(&self) -> usize {
        self.boundaries.len().saturating_sub(self.sub_length)
    }
}

impl<'a> Iterator for Kmers<'a> {
    type Item = (&'a str, &'a [Point3<f64>]);

    fn next(&mut self) -> Option<Self::Item> {
        if self.position >= self.window_count() {
            return None;
        }
        let start = self.position;
        let end = start + self.sub_length;
        self.position += 1;

        let sequence = &self.chain[self.boundaries[start]..self.boundaries[end]];
        let points =
            &self.structure[start * self.points_per_residue..end * self.points_per_residue];
        Some((sequence, points))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.window_count().saturating_sub(self.position);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Kmers<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn structure(n: usize) -> Vec<Point3<f64>> {
        (0..n).map(|i| Point3::new(i as f64, 0.0, 0.0)).collect()
    }

    #[test]
    fn yields_every_contiguous_window() {
        let points = structure(5);
        let windows: Vec<_> = kmer("ACGUA", &points, 3).unwrap().collect();
        assert_eq!(windows.len(), 3);
        assert_eq!(windows[0].0, "ACG");
        assert_eq!(windows[2].0, "GUA");
        assert_eq!(windows[1].1, &points[1..4]);
    }

    #[test]
    fn covers_length_minus_k_plus_one_windows() {
        let points = structure(30);
        for k in 1..=10 {
            let kmers = kmer("MKTAYIAKQR", &points, k).unwrap();
            assert_eq!(kmers.len(), 10 - k + 1);
            assert_eq!(kmers.count(), 10 - k + 1);
        }
    }

    #[test]
    fn slices_points_by_residue() {
        let points = structure(12);
        let kmers = kmer("ACGU", &points, 2).unwrap();
        assert_eq!(kmers.points_per_residue(), 3);
        let (sequence, window) = kmers.clone().nth(1).unwrap();
        assert_eq!(sequence, "CG");
        assert_eq!(window, &points[3..9]);
        assert_eq!(kmers.count(), 3);
    }

    #[test]
    fn sub_length_beyond_chain_yields_nothing() {
        let points = structure(4);
        assert_eq!(kmer("ACGU", &points, 5).unwrap().count(), 0);
    }

    #[test]
    fn rejects_invalid_requests() {
        let points = structure(7);
        assert!(matches!(
            kmer("", &points, 1),
            Err(EngineError::InvalidKmer(_))
        ));
        assert!(matches!(
            kmer("ACG", &points[..6], 0),
            Err(EngineError::InvalidKmer(_))
        ));
        assert!(matches!(
            kmer("ACG", &points, 2),
            Err(EngineError::InvalidKmer(_))
        ));
    }
}
