//! K-nearest-neighbors face-shape classifier.
//!
//! Classifies a feature vector by majority vote among the k nearest reference
//! points under Euclidean distance, after per-dimension min-max normalization
//! against the reference dataset's bounds. Min-max normalization makes every
//! ratio contribute comparably to the distance despite differing natural
//! ranges (height/width spans ~1.1-1.7, chin/jaw ~0.3-0.7). Appropriate for a
//! 4-dimensional dataset of a few dozen points; not meant to scale beyond
//! that.

use crate::features::{FaceFeatures, FeatureVector, FEATURE_DIM, FEATURE_VERSION};
use crate::types::{FaceShape, Neighbor, ShapePrediction};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default number of neighbors consulted per classification.
pub const DEFAULT_K: usize = 3;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("reference dataset is empty")]
    Empty,
    #[error("dataset was tuned for feature convention {got:?}, extractor is {expected:?} — the pairing is not interchangeable")]
    FeatureVersionMismatch { expected: String, got: String },
    #[error("failed to parse dataset bundle: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("k must be at least 1")]
    ZeroK,
}

/// One labeled feature vector in the reference dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferencePoint {
    pub shape: FaceShape,
    pub features: FeatureVector,
}

/// Immutable set of labeled reference feature vectors.
///
/// Per-dimension min/max bounds are computed once at construction; the
/// dataset never changes afterwards, so cached bounds are behaviorally
/// identical to recomputing them per call. Safe for unsynchronized concurrent
/// reads.
#[derive(Debug, Clone)]
pub struct ReferenceDataset {
    points: Vec<ReferencePoint>,
    mins: [f32; FEATURE_DIM],
    maxs: [f32; FEATURE_DIM],
    feature_version: String,
}

impl ReferenceDataset {
    /// Build a dataset from labeled points, caching normalization bounds.
    ///
    /// `feature_version` names the extractor convention the points were tuned
    /// against; it must match [`FEATURE_VERSION`] for the dataset to be
    /// usable with this crate's extractor.
    pub fn new(points: Vec<ReferencePoint>, feature_version: &str) -> Result<Self, DatasetError> {
        if points.is_empty() {
            return Err(DatasetError::Empty);
        }
        if feature_version != FEATURE_VERSION {
            return Err(DatasetError::FeatureVersionMismatch {
                expected: FEATURE_VERSION.to_string(),
                got: feature_version.to_string(),
            });
        }

        let mut mins = [f32::INFINITY; FEATURE_DIM];
        let mut maxs = [f32::NEG_INFINITY; FEATURE_DIM];
        for point in &points {
            for (dim, &value) in point.features.iter().enumerate() {
                mins[dim] = mins[dim].min(value);
                maxs[dim] = maxs[dim].max(value);
            }
        }

        tracing::debug!(points = points.len(), ?mins, ?maxs, "reference dataset bounds");

        Ok(Self {
            points,
            mins,
            maxs,
            feature_version: feature_version.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[ReferencePoint] {
        &self.points
    }

    pub fn feature_version(&self) -> &str {
        &self.feature_version
    }

    /// Cached per-dimension (min, max) normalization bounds.
    pub fn bounds(&self) -> (&[f32; FEATURE_DIM], &[f32; FEATURE_DIM]) {
        (&self.mins, &self.maxs)
    }

    /// Number of reference points carrying the given label.
    pub fn count_for(&self, shape: FaceShape) -> usize {
        self.points.iter().filter(|p| p.shape == shape).count()
    }
}

/// KNN classifier over an injected reference dataset.
#[derive(Debug)]
pub struct ShapeClassifier {
    dataset: ReferenceDataset,
    k: usize,
}

impl ShapeClassifier {
    /// Create a classifier over the given dataset.
    ///
    /// `k` larger than the dataset degrades to `min(k, len)` neighbors at
    /// classification time. A label represented by fewer than `k` points can
    /// never win a unanimous vote; that is logged as a warning, not an error.
    pub fn new(dataset: ReferenceDataset, k: usize) -> Result<Self, ClassifierError> {
        if k == 0 {
            return Err(ClassifierError::ZeroK);
        }
        for &shape in FaceShape::all() {
            let count = dataset.count_for(shape);
            if count > 0 && count < k {
                tracing::warn!(
                    shape = shape.name(),
                    count,
                    k,
                    "label has fewer reference points than k"
                );
            }
        }
        Ok(Self { dataset, k })
    }

    pub fn dataset(&self) -> &ReferenceDataset {
        &self.dataset
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Classify an extracted feature record.
    pub fn classify_features(&self, features: &FaceFeatures) -> ShapePrediction {
        self.classify(&features.vector())
    }

    /// Classify a raw feature vector.
    ///
    /// Deterministic given the dataset: distances use a stable sort, and vote
    /// ties resolve to the tied label whose best entry appears earliest in
    /// distance order.
    pub fn classify(&self, input: &FeatureVector) -> ShapePrediction {
        let (mins, maxs) = self.dataset.bounds();
        let normalized_input = normalize_vector(input, mins, maxs);

        let mut neighbors: Vec<Neighbor> = self
            .dataset
            .points()
            .iter()
            .map(|point| Neighbor {
                shape: point.shape,
                distance: euclidean(
                    &normalized_input,
                    &normalize_vector(&point.features, mins, maxs),
                ),
            })
            .collect();

        // Stable: equal distances keep dataset order, which the tie-break
        // below relies on.
        neighbors.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let k_used = self.k.min(neighbors.len());
        neighbors.truncate(k_used);

        // Majority vote. Track each label's first position in distance order
        // so ties resolve to the label seen earliest among the k nearest.
        let mut votes: Vec<(FaceShape, usize, usize)> = Vec::new();
        for (position, neighbor) in neighbors.iter().enumerate() {
            match votes.iter_mut().find(|(shape, _, _)| *shape == neighbor.shape) {
                Some((_, count, _)) => *count += 1,
                None => votes.push((neighbor.shape, 1, position)),
            }
        }

        let &(shape, count, _) = votes
            .iter()
            .max_by(|(_, ca, fa), (_, cb, fb)| ca.cmp(cb).then(fb.cmp(fa)))
            .expect("non-empty dataset guarantees at least one neighbor");

        let confidence = count as f32 / k_used as f32;

        tracing::debug!(
            shape = shape.name(),
            confidence,
            k_used,
            nearest = neighbors.first().map(|n| n.distance),
            "classified feature vector"
        );

        ShapePrediction {
            shape,
            confidence,
            neighbors,
        }
    }
}

/// Min-max normalize a single value; degenerate dimensions (max == min)
/// normalize to 0 so they contribute nothing to the distance.
fn normalize(value: f32, min: f32, max: f32) -> f32 {
    let range = max - min;
    if range == 0.0 {
        0.0
    } else {
        (value - min) / range
    }
}

fn normalize_vector(
    vector: &FeatureVector,
    mins: &[f32; FEATURE_DIM],
    maxs: &[f32; FEATURE_DIM],
) -> FeatureVector {
    let mut out = [0.0; FEATURE_DIM];
    for dim in 0..FEATURE_DIM {
        out[dim] = normalize(vector[dim], mins[dim], maxs[dim]);
    }
    out
}

fn euclidean(a: &FeatureVector, b: &FeatureVector) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f32>()
        .sqrt()
}
