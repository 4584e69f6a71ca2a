//! Deterministic 1-D k-means partitioning for the Hyper-Erlang fitter.
//!
//! Lloyd iterations with sorted-quantile seeding over the *distinct* sample
//! values: each seed is a real data point and attracts at least itself, so
//! every cluster starts non-empty and the run is reproducible without a
//! random-number source. Assignment is by nearest centroid on the sample
//! value; ties go to the lower-indexed centroid.

use ndarray::ArrayView1;

use crate::fitting::errors::{FitError, FitResult};

/// Upper bound on Lloyd iterations; 1-D partitions converge in far fewer.
const MAX_ITER: usize = 100;

/// One cluster of the partition, ordered by ascending centroid in the
/// returned vector.
#[derive(Debug, Clone)]
pub(crate) struct Cluster {
    pub centroid: f64,
    pub members: Vec<f64>,
}

/// Partition `samples` into `k` clusters by nearest centroid.
///
/// # Errors
/// - [`FitError::InvalidPeaks`] if `k == 0`.
/// - [`FitError::TooManyClusters`] if fewer than `k` distinct values exist.
/// - [`FitError::DegenerateClusters`] if an iteration empties a cluster
///   (not reachable with quantile seeding; kept as a guard).
pub(crate) fn kmeans_1d(samples: ArrayView1<'_, f64>, k: usize) -> FitResult<Vec<Cluster>> {
    if k == 0 {
        return Err(FitError::InvalidPeaks { value: k });
    }

    let mut distinct: Vec<f64> = samples.iter().copied().collect();
    distinct.sort_by(|a, b| a.total_cmp(b));
    distinct.dedup();
    if distinct.len() < k {
        return Err(FitError::TooManyClusters { peaks: k, distinct: distinct.len() });
    }

    // Seed at evenly spaced distinct values; indices are strictly increasing
    // because distinct.len() >= k.
    let mut centroids: Vec<f64> = (0..k)
        .map(|j| {
            let idx = if k == 1 { (distinct.len() - 1) / 2 } else { j * (distinct.len() - 1) / (k - 1) };
            distinct[idx]
        })
        .collect();

    let n = samples.len();
    let mut assignment = vec![0usize; n];
    for _ in 0..MAX_ITER {
        let mut changed = false;
        for (i, &x) in samples.iter().enumerate() {
            let nearest = nearest_centroid(&centroids, x);
            if assignment[i] != nearest {
                assignment[i] = nearest;
                changed = true;
            }
        }

        let mut sums = vec![0.0f64; k];
        let mut counts = vec![0usize; k];
        for (i, &x) in samples.iter().enumerate() {
            sums[assignment[i]] += x;
            counts[assignment[i]] += 1;
        }
        for j in 0..k {
            if counts[j] == 0 {
                return Err(FitError::DegenerateClusters { peaks: k });
            }
            centroids[j] = sums[j] / counts[j] as f64;
        }

        if !changed {
            break;
        }
    }

    let mut clusters: Vec<Cluster> =
        centroids.iter().map(|&c| Cluster { centroid: c, members: Vec::new() }).collect();
    for (i, &x) in samples.iter().enumerate() {
        clusters[assignment[i]].members.push(x);
    }
    clusters.sort_by(|a, b| a.centroid.total_cmp(&b.centroid));
    Ok(clusters)
}

fn nearest_centroid(centroids: &[f64], x: f64) -> usize {
    let mut best = 0usize;
    let mut best_dist = f64::INFINITY;
    for (j, &c) in centroids.iter().enumerate() {
        let dist = (x - c).abs();
        if dist < best_dist {
            best = j;
            best_dist = dist;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // - Recovery of well-separated groups and exhaustive assignment (every
    //   sample lands in exactly one cluster).
    // - Config edge cases: k = 1, k = 0, more clusters than distinct values.
    // - Determinism across repeated runs.
    // -------------------------------------------------------------------------

    #[test]
    fn separates_two_well_separated_groups() {
        let samples = array![1.0, 1.1, 0.9, 10.0, 10.1, 9.9];
        let clusters = kmeans_1d(samples.view(), 2).unwrap();
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].members.len(), 3);
        assert_eq!(clusters[1].members.len(), 3);
        assert_relative_eq!(clusters[0].centroid, 1.0, max_relative = 1e-12);
        assert_relative_eq!(clusters[1].centroid, 10.0, max_relative = 1e-12);
        assert!(clusters[0].centroid < clusters[1].centroid);
    }

    #[test]
    fn every_sample_is_assigned_exactly_once() {
        let samples = array![0.2, 0.4, 3.0, 3.1, 7.9, 8.0, 8.2];
        let clusters = kmeans_1d(samples.view(), 3).unwrap();
        let total: usize = clusters.iter().map(|c| c.members.len()).sum();
        assert_eq!(total, samples.len());
    }

    #[test]
    fn single_cluster_collects_everything() {
        let samples = array![1.0, 2.0, 3.0];
        let clusters = kmeans_1d(samples.view(), 1).unwrap();
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].members.len(), 3);
        assert_relative_eq!(clusters[0].centroid, 2.0);
    }

    #[test]
    fn rejects_zero_clusters() {
        let samples = array![1.0, 2.0];
        assert_eq!(
            kmeans_1d(samples.view(), 0).unwrap_err(),
            FitError::InvalidPeaks { value: 0 }
        );
    }

    #[test]
    fn rejects_more_clusters_than_distinct_values() {
        let samples = array![1.0, 1.0, 2.0, 2.0];
        assert_eq!(
            kmeans_1d(samples.view(), 3).unwrap_err(),
            FitError::TooManyClusters { peaks: 3, distinct: 2 }
        );
    }

    #[test]
    fn repeated_runs_are_identical() {
        let samples = array![0.5, 0.6, 2.5, 2.4, 9.0, 9.5, 0.55];
        let first = kmeans_1d(samples.view(), 3).unwrap();
        let second = kmeans_1d(samples.view(), 3).unwrap();
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.centroid, b.centroid);
            assert_eq!(a.members, b.members);
        }
    }
}
