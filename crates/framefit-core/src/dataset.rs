//! Built-in reference dataset and loadable dataset bundles.
//!
//! The built-in dataset is hand-authored: five class-center clusters with
//! small jitter, six points per shape, tuned against the `jaw-taper-v2`
//! extractor convention. It is not learned from data. A dataset can also be
//! loaded from a JSON bundle to retune classification without recompiling;
//! the bundle records the feature convention it was tuned for, and loading
//! rejects a convention this crate's extractor does not implement.

use crate::classifier::{DatasetError, ReferenceDataset, ReferencePoint};
use crate::features::{FeatureVector, FEATURE_VERSION};
use crate::types::FaceShape;
use serde::{Deserialize, Serialize};

/// On-disk dataset bundle: feature convention plus labeled vectors.
#[derive(Debug, Serialize, Deserialize)]
pub struct DatasetBundle {
    pub feature_version: String,
    pub points: Vec<ReferencePoint>,
}

impl ReferenceDataset {
    /// Load a dataset from a JSON bundle string.
    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        let bundle: DatasetBundle = serde_json::from_str(json)?;
        Self::new(bundle.points, &bundle.feature_version)
    }
}

/// The built-in reference dataset.
///
/// Feature order per point: `[height_width, jaw_cheek, chin_jaw, vertical]`.
pub fn builtin_dataset() -> ReferenceDataset {
    #[rustfmt::skip]
    const POINTS: [(FaceShape, FeatureVector); 30] = [
        // Oval: balanced ratios, slightly longer than wide, soft chin.
        // Cluster center: [1.45, 0.75, 0.45, 1.00]
        (FaceShape::Oval, [1.45, 0.75, 0.45, 1.00]),
        (FaceShape::Oval, [1.48, 0.73, 0.42, 1.02]),
        (FaceShape::Oval, [1.42, 0.77, 0.48, 0.98]),
        (FaceShape::Oval, [1.50, 0.72, 0.44, 1.05]),
        (FaceShape::Oval, [1.46, 0.76, 0.46, 0.99]),
        (FaceShape::Oval, [1.44, 0.74, 0.43, 1.01]),
        // Round: short face, wide jaw but soft chin.
        // Cluster center: [1.15, 0.82, 0.50, 0.95]
        (FaceShape::Round, [1.15, 0.82, 0.50, 0.95]),
        (FaceShape::Round, [1.10, 0.85, 0.52, 0.92]),
        (FaceShape::Round, [1.20, 0.80, 0.48, 0.98]),
        (FaceShape::Round, [1.12, 0.83, 0.51, 0.94]),
        (FaceShape::Round, [1.18, 0.81, 0.49, 0.96]),
        (FaceShape::Round, [1.16, 0.84, 0.53, 0.93]),
        // Square: short-to-medium face, jaw nearly as wide as cheek, flat chin.
        // Cluster center: [1.25, 0.92, 0.65, 1.05]
        (FaceShape::Square, [1.25, 0.92, 0.65, 1.05]),
        (FaceShape::Square, [1.22, 0.95, 0.68, 1.02]),
        (FaceShape::Square, [1.30, 0.90, 0.62, 1.08]),
        (FaceShape::Square, [1.28, 0.93, 0.66, 1.04]),
        (FaceShape::Square, [1.24, 0.91, 0.64, 1.06]),
        (FaceShape::Square, [1.26, 0.94, 0.67, 1.03]),
        // Heart: medium height, drastic jaw taper, pointed chin.
        // Cluster center: [1.35, 0.65, 0.35, 1.10]
        (FaceShape::Heart, [1.35, 0.65, 0.35, 1.10]),
        (FaceShape::Heart, [1.32, 0.62, 0.32, 1.08]),
        (FaceShape::Heart, [1.40, 0.68, 0.38, 1.12]),
        (FaceShape::Heart, [1.38, 0.64, 0.34, 1.09]),
        (FaceShape::Heart, [1.34, 0.66, 0.36, 1.11]),
        (FaceShape::Heart, [1.36, 0.63, 0.33, 1.07]),
        // Oblong: very long face, balanced jaw and chin.
        // Cluster center: [1.62, 0.78, 0.50, 1.15]
        (FaceShape::Oblong, [1.60, 0.78, 0.50, 1.15]),
        (FaceShape::Oblong, [1.65, 0.75, 0.48, 1.18]),
        (FaceShape::Oblong, [1.58, 0.80, 0.52, 1.12]),
        (FaceShape::Oblong, [1.62, 0.77, 0.49, 1.16]),
        (FaceShape::Oblong, [1.56, 0.79, 0.51, 1.14]),
        (FaceShape::Oblong, [1.68, 0.76, 0.47, 1.20]),
    ];

    let points = POINTS
        .iter()
        .map(|&(shape, features)| ReferencePoint { shape, features })
        .collect();

    ReferenceDataset::new(points, FEATURE_VERSION)
        .expect("built-in dataset is non-empty and version-matched")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{ShapeClassifier, DEFAULT_K};
    use crate::features::extract_features;
    use crate::landmarks::test_support::{square_face_overrides, synthetic_landmarks};

    #[test]
    fn test_builtin_dataset_shape_coverage() {
        let dataset = builtin_dataset();
        assert_eq!(dataset.len(), 30);
        for &shape in FaceShape::all() {
            assert_eq!(dataset.count_for(shape), 6, "{shape} should have 6 points");
        }
        // Every label has at least DEFAULT_K points, so a unanimous vote is
        // possible for every class.
        assert!(FaceShape::all()
            .iter()
            .all(|&s| dataset.count_for(s) >= DEFAULT_K));
    }

    #[test]
    fn test_builtin_normalization_bounds_hold() {
        let dataset = builtin_dataset();
        let (mins, maxs) = dataset.bounds();
        for dim in 0..4 {
            assert!(mins[dim] < maxs[dim], "dimension {dim} is degenerate");
            let mut saw_min = false;
            let mut saw_max = false;
            for point in dataset.points() {
                let v = point.features[dim];
                assert!(v >= mins[dim] && v <= maxs[dim]);
                let normalized = (v - mins[dim]) / (maxs[dim] - mins[dim]);
                assert!((0.0..=1.0).contains(&normalized));
                saw_min |= normalized == 0.0;
                saw_max |= normalized == 1.0;
            }
            assert!(saw_min, "dimension {dim}: no point normalizes to 0");
            assert!(saw_max, "dimension {dim}: no point normalizes to 1");
        }
    }

    #[test]
    fn test_exact_reference_point_classifies_to_its_label() {
        // Scenario: the Oval cluster center fed back in must return Oval with
        // itself at distance 0 as the first neighbor.
        let classifier = ShapeClassifier::new(builtin_dataset(), 3).unwrap();
        let result = classifier.classify(&[1.45, 0.75, 0.45, 1.00]);
        assert_eq!(result.shape, FaceShape::Oval);
        assert!(result.neighbors[0].distance.abs() < 1e-6);
        assert_eq!(result.confidence, 1.0);
    }

    #[test]
    fn test_between_cluster_input_draws_mixed_neighbors() {
        // Scenario: the midpoint of the Oval and Heart cluster centers must
        // pull neighbors from both clusters, with confidence below 1.
        let classifier = ShapeClassifier::new(builtin_dataset(), 5).unwrap();
        let result = classifier.classify(&[1.40, 0.70, 0.40, 1.05]);
        let has_oval = result.neighbors.iter().any(|n| n.shape == FaceShape::Oval);
        let has_heart = result.neighbors.iter().any(|n| n.shape == FaceShape::Heart);
        assert!(has_oval && has_heart, "neighbors: {:?}", result.neighbors);
        assert!(result.confidence < 1.0);
    }

    #[test]
    fn test_cluster_centers_classify_unanimously() {
        let classifier = ShapeClassifier::new(builtin_dataset(), 3).unwrap();
        let centers: [(FaceShape, [f32; 4]); 5] = [
            (FaceShape::Oval, [1.45, 0.75, 0.45, 1.00]),
            (FaceShape::Round, [1.15, 0.82, 0.50, 0.95]),
            (FaceShape::Square, [1.25, 0.92, 0.65, 1.05]),
            (FaceShape::Heart, [1.35, 0.65, 0.35, 1.10]),
            (FaceShape::Oblong, [1.62, 0.78, 0.50, 1.15]),
        ];
        for (shape, center) in centers {
            let result = classifier.classify(&center);
            assert_eq!(result.shape, shape);
            assert_eq!(result.confidence, 1.0);
        }
    }

    #[test]
    fn test_square_jawed_landmarks_classify_square() {
        // End-to-end landmark contract check: a synthetic square-jawed face
        // (jaw nearly as wide as the cheekbones, flat chin, short vertical
        // span) must land in the Square cluster, not Heart or Oblong.
        let landmarks = synthetic_landmarks(&square_face_overrides());

        let features = extract_features(&landmarks);
        let classifier = ShapeClassifier::new(builtin_dataset(), 3).unwrap();
        let result = classifier.classify_features(&features);
        assert_eq!(result.shape, FaceShape::Square);
    }

    #[test]
    fn test_bundle_roundtrip() {
        let bundle = DatasetBundle {
            feature_version: FEATURE_VERSION.to_string(),
            points: builtin_dataset().points().to_vec(),
        };
        let json = serde_json::to_string(&bundle).unwrap();
        let dataset = ReferenceDataset::from_json(&json).unwrap();
        assert_eq!(dataset.len(), 30);
        assert_eq!(dataset.feature_version(), FEATURE_VERSION);
    }

    #[test]
    fn test_bundle_rejects_foreign_feature_version() {
        let json = r#"{
            "feature_version": "forehead-v1",
            "points": [ { "shape": "Oval", "features": [1.4, 0.7, 0.4, 1.0] } ]
        }"#;
        let err = ReferenceDataset::from_json(json).unwrap_err();
        assert!(matches!(err, DatasetError::FeatureVersionMismatch { .. }));
    }

    #[test]
    fn test_bundle_rejects_empty_points() {
        let json = format!(r#"{{ "feature_version": "{FEATURE_VERSION}", "points": [] }}"#);
        let err = ReferenceDataset::from_json(&json).unwrap_err();
        assert!(matches!(err, DatasetError::Empty));
    }

    #[test]
    fn test_bundle_rejects_malformed_json() {
        let err = ReferenceDataset::from_json("not json").unwrap_err();
        assert!(matches!(err, DatasetError::Parse(_)));
    }

    #[test]
    fn test_bundle_rejects_wrong_dimension() {
        // [f32; 4] rejects a 3-element array at parse time.
        let json = format!(
            r#"{{ "feature_version": "{FEATURE_VERSION}",
                  "points": [ {{ "shape": "Oval", "features": [1.4, 0.7, 0.4] }} ] }}"#
        );
        let err = ReferenceDataset::from_json(&json).unwrap_err();
        assert!(matches!(err, DatasetError::Parse(_)));
    }
}
