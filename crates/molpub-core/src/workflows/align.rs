use crate::core::models::cloud::PointCloud;
use crate::engine::config::ClusterConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::tasks::cluster::cluster;
use nalgebra::Point3;
use std::collections::BTreeMap;
use tracing::{debug, info, instrument};

#[derive(Debug, Clone, PartialEq)]
pub struct Alignment {
    pub clusters: Vec<Vec<usize>>,
    /// Cluster holding `structures[0]`, the anchor every structure is superposed onto.
    pub anchor_cluster: usize,
    /// Superposed structures keyed by cluster id, in input order within each cluster.
    pub aligned: BTreeMap<usize, Vec<PointCloud>>,
}

/// Clusters the structures and superposes every one of them onto `structures[0]`.
///
/// A single anchor is used for the whole collection, so the result is only meaningful
/// when the structures share a common fold; members of clusters far from the anchor's
/// are placed by a low-quality superposition.
#[instrument(skip_all, name = "alignment_workflow")]
pub fn run(
    structures: &[Vec<Point3<f64>>],
    config: &ClusterConfig,
    reporter: &ProgressReporter,
) -> Result<Alignment, EngineError> {
    let Some(anchor) = structures.first() else {
        return Err(EngineError::TooFewStructures {
            required: 1,
            found: 0,
        });
    };

    let clusters = cluster(structures, config, reporter)?;

    let mut cluster_of = vec![0; structures.len()];
    for (cluster_id, members) in clusters.iter().enumerate() {
        for &member in members {
            cluster_of[member] = cluster_id;
        }
    }
    let anchor_cluster = cluster_of[0];

    info!(
        structures = structures.len(),
        clusters = clusters.len(),
        anchor_cluster,
        "Superposing structures onto the anchor."
    );
    reporter.report(Progress::SuperpositionStart {
        total_structures: structures.len(),
    });

    let mut aligned: BTreeMap<usize, Vec<PointCloud>> = BTreeMap::new();
    for (index, structure) in structures.iter().enumerate() {
        let placed = if index == 0 {
            anchor.clone()
        } else {
            let result = config.method.score(structure, anchor, config.use_center)?;
            debug!(index, score = result.score, "Structure superposed onto anchor.");
            result.candidate
        };
        aligned.entry(cluster_of[index]).or_default().push(placed);
        reporter.report(Progress::StructureSuperposed { index });
    }

    reporter.report(Progress::SuperpositionFinish);
    info!("Alignment complete.");

    Ok(Alignment {
        clusters,
        anchor_cluster,
        aligned,
    })
}
