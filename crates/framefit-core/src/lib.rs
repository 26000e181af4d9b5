//! framefit-core — Face-shape classification engine.
//!
//! Classifies a detected face into one of five canonical shapes (Oval, Round,
//! Square, Heart, Oblong) from 68 facial landmark points, and maps the result
//! to eyewear-frame recommendations. Landmark detection itself is an external
//! concern; this crate consumes the detector's fixed 68-point layout.
//!
//! Pipeline: [`LandmarkSet`] → [`extract_features`] → [`ShapeClassifier`] →
//! [`ShapePrediction`] → [`FrameRecommendation`].
//!
//! Both stages are pure, synchronous, and deterministic; the reference
//! dataset and recommendation table are immutable after construction, so
//! concurrent classification from multiple threads needs no synchronization.

pub mod classifier;
pub mod dataset;
pub mod features;
pub mod landmarks;
pub mod types;

pub use classifier::{
    ClassifierError, DatasetError, ReferenceDataset, ReferencePoint, ShapeClassifier, DEFAULT_K,
};
pub use dataset::{builtin_dataset, DatasetBundle};
pub use features::{extract_features, FaceFeatures, FeatureVector, FEATURE_DIM, FEATURE_VERSION};
pub use landmarks::{LandmarkError, LandmarkSet, LANDMARK_COUNT};
pub use types::{FaceShape, FrameRecommendation, Neighbor, Point, ShapePrediction};
