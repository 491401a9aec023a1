use crate::engine::config::{ClusterConfig, MergeType};
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::similarity::similar;
use nalgebra::Point3;
use tracing::{debug, info, instrument, trace};

/// Greedy single-pass clustering. Clusters are returned in creation order and every
/// index in `0..structures.len()` appears exactly once.
///
/// With [`MergeType::All`] a structure joins the first cluster whose members are all
/// similar to it. With [`MergeType::Any`] every cluster holding at least one similar
/// member matches; when several match they are merged, in creation order, into the
/// earliest of them and the structure is appended last.
#[instrument(skip_all, name = "clustering_task")]
pub fn cluster(
    structures: &[Vec<Point3<f64>>],
    config: &ClusterConfig,
    reporter: &ProgressReporter,
) -> Result<Vec<Vec<usize>>, EngineError> {
    check_equal_lengths(structures)?;

    info!(
        structures = structures.len(),
        method = ?config.method.params(),
        merge = %config.merge,
        "Clustering structures."
    );
    reporter.report(Progress::ClusteringStart {
        total_structures: structures.len(),
    });

    let mut clusters: Vec<Vec<usize>> = Vec::new();
    for (index, structure) in structures.iter().enumerate() {
        let mut matched = Vec::new();
        for (cluster_id, members) in clusters.iter().enumerate() {
            let qualifies = match config.merge {
                MergeType::All => all_similar(structure, members, structures, config)?,
                MergeType::Any => any_similar(structure, members, structures, config)?,
            };
            if qualifies {
                matched.push(cluster_id);
                if config.merge == MergeType::All {
                    break;
                }
            }
        }

        let cluster_id = assign(&mut clusters, &matched, index);
        trace!(index, cluster = cluster_id, matched = matched.len(), "Structure assigned.");
        reporter.report(Progress::StructureAssigned {
            index,
            cluster: cluster_id,
        });
    }

    reporter.report(Progress::ClusteringFinish {
        cluster_count: clusters.len(),
    });
    info!(clusters = clusters.len(), "Clustering complete.");

    Ok(clusters)
}

pub(crate) fn check_equal_lengths(structures: &[Vec<Point3<f64>>]) -> Result<(), EngineError> {
    let Some(first) = structures.first() else {
        return Ok(());
    };
    match structures
        .iter()
        .enumerate()
        .find(|(_, structure)| structure.len() != first.len())
    {
        Some((index, structure)) => Err(EngineError::LengthMismatch {
            index,
            expected: first.len(),
            found: structure.len(),
        }),
        None => Ok(()),
    }
}

fn is_similar(
    structure: &[Point3<f64>],
    other: &[Point3<f64>],
    config: &ClusterConfig,
) -> Result<bool, EngineError> {
    let verdict = similar(
        structure,
        other,
        &config.method,
        config.use_center,
        config.threshold,
    )?;
    Ok(verdict.similar)
}

fn all_similar(
    structure: &[Point3<f64>],
    members: &[usize],
    structures: &[Vec<Point3<f64>>],
    config: &ClusterConfig,
) -> Result<bool, EngineError> {
    for &member in members {
        if !is_similar(structure, &structures[member], config)? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn any_similar(
    structure: &[Point3<f64>],
    members: &[usize],
    structures: &[Vec<Point3<f64>>],
    config: &ClusterConfig,
) -> Result<bool, EngineError> {
    for &member in members {
        if is_similar(structure, &structures[member], config)? {
            return Ok(true);
        }
    }
    Ok(false)
}

// `matched` is ascending. Returns the id of the cluster that received `index`.
fn assign(clusters: &mut Vec<Vec<usize>>, matched: &[usize], index: usize) -> usize {
    match matched {
        [] => {
            clusters.push(vec![index]);
            clusters.len() - 1
        }
        [target] => {
            clusters[*target].push(index);
            *target
        }
        [target, rest @ ..] => {
            debug!(index, merged = matched.len(), "Merging clusters bridged by one structure.");
            let mut absorbed = Vec::new();
            for &cluster_id in rest.iter().rev() {
                absorbed.push(clusters.remove(cluster_id));
            }
            for members in absorbed.into_iter().rev() {
                clusters[*target].extend(members);
            }
            clusters[*target].push(index);
            *target
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::metrics::kernels::normalized_deviation;
    use crate::core::models::metric::SimilarityMetric;
    use crate::core::models::model::ModelType;
    use crate::engine::config::ClusterConfigBuilder;
    use crate::engine::score::ScoreMethod;
    use nalgebra::{Rotation3, Vector3};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::sync::Mutex;

    fn random_cloud(rng: &mut StdRng, n: usize) -> Vec<Point3<f64>> {
        (0..n)
            .map(|_| {
                Point3::new(
                    rng.gen_range(-10.0..10.0),
                    rng.gen_range(-10.0..10.0),
                    rng.gen_range(-10.0..10.0),
                )
            })
            .collect()
    }

    fn rigid_copy(points: &[Point3<f64>], angle: f64) -> Vec<Point3<f64>> {
        let rotation = Rotation3::from_euler_angles(angle, 0.5 * angle, -angle);
        let shift = Vector3::new(angle, -2.0 * angle, 3.0);
        points.iter().map(|p| rotation * p + shift).collect()
    }

    fn config(method: ScoreMethod, threshold: Option<f64>, merge: MergeType) -> ClusterConfig {
        let mut builder = ClusterConfigBuilder::new().method(method).merge(merge);
        if let Some(threshold) = threshold {
            builder = builder.threshold(threshold);
        }
        builder.build().unwrap()
    }

    fn assert_partition(clusters: &[Vec<usize>], n: usize) {
        let mut seen: Vec<usize> = clusters.iter().flatten().copied().collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..n).collect::<Vec<_>>());
        assert!(clusters.iter().all(|c| !c.is_empty()));
    }

    #[test]
    fn identical_structures_form_one_cluster_for_every_method() {
        let mut rng = StdRng::seed_from_u64(11);
        let base = random_cloud(&mut rng, 24);
        let structures = vec![base; 10];

        for metric in SimilarityMetric::ALL {
            for model in ModelType::ALL {
                let Ok(method) = ScoreMethod::new(metric, model) else {
                    continue;
                };
                let threshold = (metric == SimilarityMetric::Rmsd).then_some(1.0);
                for merge in [MergeType::All, MergeType::Any] {
                    let clusters = cluster(
                        &structures,
                        &config(method, threshold, merge),
                        &ProgressReporter::new(),
                    )
                    .unwrap();
                    assert_eq!(clusters, vec![(0..10).collect::<Vec<_>>()], "{metric} {model} {merge}");
                }
            }
        }
    }

    #[test]
    fn unrelated_folds_are_separated() {
        let mut rng = StdRng::seed_from_u64(12);
        let fold_a = random_cloud(&mut rng, 30);
        let fold_b = random_cloud(&mut rng, 30);
        let structures = vec![
            fold_a.clone(),
            fold_b.clone(),
            rigid_copy(&fold_a, 0.4),
            rigid_copy(&fold_b, 1.1),
            rigid_copy(&fold_a, 2.0),
        ];
        let method = ScoreMethod::new(SimilarityMetric::Tm, ModelType::Ca).unwrap();

        for merge in [MergeType::All, MergeType::Any] {
            let clusters = cluster(
                &structures,
                &config(method, None, merge),
                &ProgressReporter::new(),
            )
            .unwrap();
            assert_partition(&clusters, structures.len());
            assert_eq!(clusters, vec![vec![0, 2, 4], vec![1, 3]]);
        }
    }

    #[test]
    fn bridging_structure_merges_clusters_only_under_any() {
        let mut rng = StdRng::seed_from_u64(13);
        let a = random_cloud(&mut rng, 30);
        let noise = random_cloud(&mut rng, 30);
        let c: Vec<Point3<f64>> = a
            .iter()
            .zip(&noise)
            .map(|(p, n)| p + n.coords * 0.2)
            .collect();
        let b: Vec<Point3<f64>> = a.iter().zip(&c).map(|(p, q)| p + (q - p) * 0.5).collect();

        let rmsd = ScoreMethod::default();
        let aligned = rmsd.score(&a, &c, true).unwrap().score;
        let half = normalized_deviation(&a, &c) / 2.0;
        assert!(aligned > half);
        let threshold = Some((aligned + half) / 2.0);
        let structures = vec![a, c, b];

        let any = cluster(
            &structures,
            &config(rmsd, threshold, MergeType::Any),
            &ProgressReporter::new(),
        )
        .unwrap();
        assert_eq!(any, vec![vec![0, 1, 2]]);

        let all = cluster(
            &structures,
            &config(rmsd, threshold, MergeType::All),
            &ProgressReporter::new(),
        )
        .unwrap();
        assert_eq!(all, vec![vec![0, 2], vec![1]]);
    }

    #[test]
    fn random_structures_are_partitioned_exactly_once() {
        let mut rng = StdRng::seed_from_u64(14);
        let structures: Vec<_> = (0..8).map(|_| random_cloud(&mut rng, 12)).collect();
        let method = ScoreMethod::default();

        for threshold in [0.5, 1.5, 3.0] {
            for merge in [MergeType::All, MergeType::Any] {
                let clusters = cluster(
                    &structures,
                    &config(method, Some(threshold), merge),
                    &ProgressReporter::new(),
                )
                .unwrap();
                assert_partition(&clusters, structures.len());
            }
        }
    }

    #[test]
    fn perturbed_structures_are_partitioned_for_every_method() {
        let mut rng = StdRng::seed_from_u64(17);
        let folds = [random_cloud(&mut rng, 24), random_cloud(&mut rng, 24)];
        let structures: Vec<Vec<Point3<f64>>> = (0..7)
            .map(|i| {
                let amplitude = 0.2 + 0.3 * i as f64;
                rigid_copy(&folds[i % 2], 0.3 * i as f64)
                    .into_iter()
                    .map(|p| {
                        p + Vector3::new(
                            rng.gen_range(-amplitude..amplitude),
                            rng.gen_range(-amplitude..amplitude),
                            rng.gen_range(-amplitude..amplitude),
                        )
                    })
                    .collect()
            })
            .collect();

        for metric in SimilarityMetric::ALL {
            for model in ModelType::ALL {
                let Ok(method) = ScoreMethod::new(metric, model) else {
                    continue;
                };
                for merge in [MergeType::All, MergeType::Any] {
                    for use_center in [true, false] {
                        let mut builder = ClusterConfigBuilder::new()
                            .method(method)
                            .merge(merge)
                            .use_center(use_center);
                        if metric == SimilarityMetric::Rmsd {
                            builder = builder.threshold(0.2);
                        }
                        let clusters =
                            cluster(&structures, &builder.build().unwrap(), &ProgressReporter::new())
                                .unwrap();
                        assert_partition(&clusters, structures.len());
                    }
                }
            }
        }
    }

    #[test]
    fn empty_input_yields_empty_partition() {
        let method = ScoreMethod::new(SimilarityMetric::Tm, ModelType::Ca).unwrap();
        let clusters = cluster(&[], &config(method, None, MergeType::All), &ProgressReporter::new())
            .unwrap();
        assert!(clusters.is_empty());
    }

    #[test]
    fn unequal_lengths_are_rejected() {
        let mut rng = StdRng::seed_from_u64(15);
        let structures = vec![random_cloud(&mut rng, 10), random_cloud(&mut rng, 11)];
        let method = ScoreMethod::new(SimilarityMetric::Tm, ModelType::Ca).unwrap();
        let result = cluster(
            &structures,
            &config(method, None, MergeType::All),
            &ProgressReporter::new(),
        );
        assert!(matches!(
            result,
            Err(EngineError::LengthMismatch {
                index: 1,
                expected: 10,
                found: 11
            })
        ));
    }

    #[test]
    fn progress_events_follow_assignment_order() {
        let mut rng = StdRng::seed_from_u64(16);
        let base = random_cloud(&mut rng, 15);
        let structures = vec![base.clone(), random_cloud(&mut rng, 15), base];
        let method = ScoreMethod::new(SimilarityMetric::Tm, ModelType::Ca).unwrap();

        let events = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            events.lock().unwrap().push(event);
        }));
        cluster(&structures, &config(method, None, MergeType::All), &reporter).unwrap();
        drop(reporter);

        let events = events.into_inner().unwrap();
        assert!(matches!(
            events.first(),
            Some(Progress::ClusteringStart { total_structures: 3 })
        ));
        let assigned: Vec<_> = events
            .iter()
            .filter_map(|event| match event {
                Progress::StructureAssigned { index, cluster } => Some((*index, *cluster)),
                _ => None,
            })
            .collect();
        assert_eq!(assigned, vec![(0, 0), (1, 1), (2, 0)]);
        assert!(matches!(
            events.last(),
            Some(Progress::ClusteringFinish { cluster_count: 2 })
        ));
    }

    #[test]
    fn assign_merges_into_earliest_cluster() {
        let mut clusters = vec![vec![0], vec![1], vec![2], vec![3]];
        let target = assign(&mut clusters, &[1, 3], 4);
        assert_eq!(target, 1);
        assert_eq!(clusters, vec![vec![0], vec![1, 3, 4], vec![2]]);
    }
}
