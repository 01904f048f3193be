use rand::Rng;

/// fixed-dimension point type for the postflop abstractor's 8-D equity
/// features (spec §3 "equity feature vector", §4.3 centroid training).
pub type Point8 = [f32; 8];

fn sq_dist(a: &Point8, b: &Point8) -> f32 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// index of, and squared distance to, the nearest centroid. ties broken by
/// lowest index (spec §4.2 invariant 6 / the postflop abstractor contract).
pub fn nearest(point: &Point8, centroids: &[Point8]) -> (usize, f32) {
    centroids
        .iter()
        .enumerate()
        .map(|(i, c)| (i, sq_dist(point, c)))
        .min_by(|(_, dx), (_, dy)| dx.partial_cmp(dy).expect("equity features are never NaN"))
        .expect("at least one centroid")
}

/// k-means++ seeding: first centroid uniform, subsequent centroids weighted
/// by squared distance to the nearest already-chosen centroid.
fn seed(points: &[Point8], k: usize, rng: &mut impl Rng) -> Vec<Point8> {
    assert!(!points.is_empty() && k > 0 && k <= points.len());
    let mut centroids = Vec::with_capacity(k);
    centroids.push(points[rng.random_range(0..points.len())]);
    while centroids.len() < k {
        let weights: Vec<f32> = points
            .iter()
            .map(|p| nearest(p, &centroids).1)
            .collect();
        let total: f32 = weights.iter().sum();
        if total <= 0.0 {
            // every remaining point coincides with a chosen centroid; pad
            // arbitrarily rather than looping forever.
            centroids.push(points[rng.random_range(0..points.len())]);
            continue;
        }
        let mut target = rng.random::<f32>() * total;
        let mut chosen = points.len() - 1;
        for (i, w) in weights.iter().enumerate() {
            if target <= *w {
                chosen = i;
                break;
            }
            target -= w;
        }
        centroids.push(points[chosen]);
    }
    centroids
}

/// Lloyd's algorithm: alternate nearest-centroid assignment and centroid
/// recomputation (mean of assigned points) until assignments stop changing
/// or `max_iter` is reached. spec §4.3: "if k-means fails to converge
/// within max_iter, keep the current best assignment" -- we simply stop,
/// since `centroids` always holds the last completed assignment's means.
fn lloyd(points: &[Point8], mut centroids: Vec<Point8>, max_iter: usize) -> Vec<Point8> {
    let k = centroids.len();
    let mut assignment = vec![usize::MAX; points.len()];
    for _ in 0..max_iter {
        let mut changed = false;
        for (i, p) in points.iter().enumerate() {
            let (nearest_idx, _) = nearest(p, &centroids);
            if assignment[i] != nearest_idx {
                assignment[i] = nearest_idx;
                changed = true;
            }
        }
        if !changed {
            break;
        }
        let mut sums = vec![[0f32; 8]; k];
        let mut counts = vec![0usize; k];
        for (p, &a) in points.iter().zip(&assignment) {
            counts[a] += 1;
            for d in 0..8 {
                sums[a][d] += p[d];
            }
        }
        for c in 0..k {
            if counts[c] == 0 {
                continue; // keep the previous centroid rather than producing NaN
            }
            for d in 0..8 {
                centroids[c][d] = sums[c][d] / counts[c] as f32;
            }
        }
    }
    centroids
}

/// sum of squared distances from each point to its nearest centroid -- the
/// standard k-means objective, used to pick the best of `n_init` restarts.
fn inertia(points: &[Point8], centroids: &[Point8]) -> f32 {
    points.iter().map(|p| nearest(p, centroids).1).sum()
}

/// fit `k` centroids to `points` with k-means++ seeding and Lloyd iteration,
/// running `n_init` independent restarts and keeping the lowest-inertia
/// result (spec §4.3's `n_init` knob; the reference configuration uses
/// `n_init = 1`, a single k-means++ seed rather than the usual
/// multi-restart best-of-n).
pub fn fit(points: &[Point8], k: usize, max_iter: usize, n_init: usize, rng: &mut impl Rng) -> Vec<Point8> {
    assert!(n_init > 0, "n_init must be at least 1");
    let mut best: Option<(Vec<Point8>, f32)> = None;
    for _ in 0..n_init {
        let initial = seed(points, k, rng);
        let centroids = lloyd(points, initial, max_iter);
        let cost = inertia(points, &centroids);
        if best.as_ref().map(|(_, best_cost)| cost < *best_cost).unwrap_or(true) {
            best = Some((centroids, cost));
        }
    }
    best.expect("n_init > 0 guarantees at least one restart").0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn separates_two_obvious_clusters() {
        let mut points = Vec::new();
        for i in 0..20 {
            let mut low = [0f32; 8];
            low[0] = i as f32 * 0.01;
            points.push(low);
            let mut high = [0f32; 8];
            high[0] = 100.0 + i as f32 * 0.01;
            points.push(high);
        }
        let mut rng = SmallRng::seed_from_u64(0);
        let centroids = fit(&points, 2, 50, 1, &mut rng);
        assert_eq!(centroids.len(), 2);
        let mut firsts: Vec<f32> = centroids.iter().map(|c| c[0]).collect();
        firsts.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert!(firsts[0] < 10.0);
        assert!(firsts[1] > 90.0);
    }

    #[test]
    fn multiple_restarts_never_increase_inertia_vs_a_single_restart() {
        let mut points = Vec::new();
        for i in 0..30 {
            let mut a = [0f32; 8];
            a[0] = (i % 7) as f32;
            points.push(a);
        }
        let mut rng_one = SmallRng::seed_from_u64(1);
        let one = fit(&points, 3, 50, 1, &mut rng_one);
        let mut rng_many = SmallRng::seed_from_u64(1);
        let many = fit(&points, 3, 50, 5, &mut rng_many);
        assert!(inertia(&points, &many) <= inertia(&points, &one) + 1e-6);
    }

    #[test]
    fn nearest_breaks_ties_by_lowest_index() {
        let centroids = vec![[0f32; 8], [0f32; 8]];
        let (idx, _) = nearest(&[0f32; 8], &centroids);
        assert_eq!(idx, 0);
    }
}
