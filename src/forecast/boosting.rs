//! Gradient-boosted regression trees over the time index
//!
//! A small boosting loop in the classic residual-fitting form: start from the
//! target mean, then repeatedly fit a shallow regression tree to the current
//! residuals and add its shrunken predictions. The only feature is the time
//! index, so trees reduce to one-dimensional threshold splits. Subsampling is
//! driven by a seeded RNG so that training is deterministic for a fixed seed.

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

/// Boosting hyperparameters.
///
/// These are fixed internally rather than exposed through ModelConfig; the
/// configuration surface stays limited to horizon, confidence, model kind,
/// seed and thresholds.
#[derive(Debug, Clone)]
pub(crate) struct BoostingParams {
    /// Number of boosting stages
    pub n_estimators: usize,
    /// Shrinkage applied to each tree's contribution
    pub learning_rate: f64,
    /// Maximum depth of each tree
    pub max_depth: usize,
    /// Fraction of samples drawn (without replacement) per stage
    pub subsample: f64,
    /// Minimum samples required to split a node
    pub min_samples_split: usize,
}

impl Default for BoostingParams {
    fn default() -> Self {
        BoostingParams {
            n_estimators: 100,
            learning_rate: 0.1,
            max_depth: 3,
            subsample: 0.8,
            min_samples_split: 2,
        }
    }
}

/// A fitted gradient boosting ensemble
#[derive(Debug, Clone)]
pub(crate) struct GradientBoostedTrend {
    initial_prediction: f64,
    learning_rate: f64,
    trees: Vec<RegressionTree>,
}

impl GradientBoostedTrend {
    /// Fit with squared error loss, where the negative gradient is simply the
    /// residual `y - prediction`.
    pub fn fit(xs: &[f64], ys: &[f64], params: &BoostingParams, seed: u64) -> Self {
        let n = ys.len();
        let mut rng = StdRng::seed_from_u64(seed);

        let initial_prediction = ys.iter().sum::<f64>() / n as f64;
        let mut predictions = vec![initial_prediction; n];
        let mut trees = Vec::with_capacity(params.n_estimators);

        for _ in 0..params.n_estimators {
            let residuals: Vec<f64> = ys
                .iter()
                .zip(&predictions)
                .map(|(y, p)| y - p)
                .collect();

            let indices = subsample_indices(n, params.subsample, &mut rng);
            let tree = RegressionTree::fit(
                xs,
                &residuals,
                &indices,
                params.max_depth,
                params.min_samples_split,
            );

            for (pred, &x) in predictions.iter_mut().zip(xs) {
                *pred += params.learning_rate * tree.predict(x);
            }
            trees.push(tree);
        }

        GradientBoostedTrend {
            initial_prediction,
            learning_rate: params.learning_rate,
            trees,
        }
    }

    pub fn predict(&self, x: f64) -> f64 {
        let mut prediction = self.initial_prediction;
        for tree in &self.trees {
            prediction += self.learning_rate * tree.predict(x);
        }
        prediction
    }
}

/// Draw `ceil(n * fraction)` indices without replacement via a partial
/// Fisher-Yates shuffle. Always keeps at least two samples so a tree can
/// still place a split.
fn subsample_indices(n: usize, fraction: f64, rng: &mut StdRng) -> Vec<usize> {
    if fraction >= 1.0 {
        return (0..n).collect();
    }
    let n_subsample = ((n as f64 * fraction).ceil() as usize).clamp(2, n);

    let mut indices: Vec<usize> = (0..n).collect();
    for i in (1..indices.len()).rev() {
        let j = rng.random_range(0..=i);
        indices.swap(i, j);
    }
    indices.truncate(n_subsample);
    indices
}

/// One-dimensional regression tree fitted to (x, target) pairs
#[derive(Debug, Clone)]
struct RegressionTree {
    root: TreeNode,
}

#[derive(Debug, Clone)]
enum TreeNode {
    Leaf {
        prediction: f64,
    },
    Split {
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

impl RegressionTree {
    fn fit(
        xs: &[f64],
        targets: &[f64],
        indices: &[usize],
        max_depth: usize,
        min_samples_split: usize,
    ) -> Self {
        RegressionTree {
            root: build_node(xs, targets, indices, 0, max_depth, min_samples_split),
        }
    }

    fn predict(&self, x: f64) -> f64 {
        let mut node = &self.root;
        loop {
            match node {
                TreeNode::Leaf { prediction } => return *prediction,
                TreeNode::Split {
                    threshold,
                    left,
                    right,
                } => {
                    node = if x < *threshold { left } else { right };
                }
            }
        }
    }
}

fn build_node(
    xs: &[f64],
    targets: &[f64],
    indices: &[usize],
    depth: usize,
    max_depth: usize,
    min_samples_split: usize,
) -> TreeNode {
    let prediction = indices.iter().map(|&i| targets[i]).sum::<f64>() / indices.len() as f64;

    if depth >= max_depth || indices.len() < min_samples_split {
        return TreeNode::Leaf { prediction };
    }

    match best_split(xs, targets, indices) {
        Some(threshold) => {
            let (left_idx, right_idx): (Vec<usize>, Vec<usize>) =
                indices.iter().partition(|&&i| xs[i] < threshold);
            let left = build_node(xs, targets, &left_idx, depth + 1, max_depth, min_samples_split);
            let right =
                build_node(xs, targets, &right_idx, depth + 1, max_depth, min_samples_split);
            TreeNode::Split {
                threshold,
                left: Box::new(left),
                right: Box::new(right),
            }
        }
        None => TreeNode::Leaf { prediction },
    }
}

/// Pick the threshold (midpoint between consecutive distinct x values)
/// minimizing the summed squared error of the two side means. None when all
/// x values coincide.
fn best_split(xs: &[f64], targets: &[f64], indices: &[usize]) -> Option<f64> {
    let mut sorted: Vec<usize> = indices.to_vec();
    sorted.sort_by(|&a, &b| xs[a].partial_cmp(&xs[b]).unwrap_or(std::cmp::Ordering::Equal));

    let mut best: Option<(f64, f64)> = None; // (sse, threshold)

    for w in 0..sorted.len() - 1 {
        let x_lo = xs[sorted[w]];
        let x_hi = xs[sorted[w + 1]];
        if x_lo == x_hi {
            continue;
        }
        let threshold = (x_lo + x_hi) / 2.0;

        let left: Vec<f64> = sorted[..=w].iter().map(|&i| targets[i]).collect();
        let right: Vec<f64> = sorted[w + 1..].iter().map(|&i| targets[i]).collect();
        let sse = side_sse(&left) + side_sse(&right);

        match best {
            Some((best_sse, _)) if sse >= best_sse => {}
            _ => best = Some((sse, threshold)),
        }
    }

    best.map(|(_, threshold)| threshold)
}

fn side_sse(values: &[f64]) -> f64 {
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    values.iter().map(|v| (v - mean).powi(2)).sum()
}
