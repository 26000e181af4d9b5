//! Geometric feature extraction from facial landmarks.
//!
//! Turns a 68-point landmark set into the dimensionless ratios used for
//! classification. Ratios, not absolute pixel distances, because absolute
//! distances depend on image resolution and camera distance; ratios cancel
//! the scale factor.

use crate::landmarks::{indices, LandmarkSet};
use serde::Serialize;

/// Number of dimensions in a classification feature vector.
pub const FEATURE_DIM: usize = 4;

/// Identifier of the landmark-index convention and ratio definitions below.
///
/// A reference dataset is only meaningful against the extractor convention it
/// was tuned for; dataset loading and classifier construction reject any
/// other version to prevent cross-wiring.
pub const FEATURE_VERSION: &str = "jaw-taper-v2";

/// Eye-to-chin span is roughly 1/1.618 of full face height for adult faces;
/// scale up to approximate the full height from the stable eye-to-chin proxy.
const EYE_TO_CHIN_SCALE: f32 = 1.618;

/// Feature vector: the four classification ratios in dataset order.
pub type FeatureVector = [f32; FEATURE_DIM];

/// Derived facial measurements.
///
/// Distances are in input pixels; the four ratios are unitless and
/// scale-invariant. Only the ratios feed the classifier, in the fixed order
/// `[height_width, jaw_cheek, chin_jaw, vertical]`.
#[derive(Debug, Clone, Serialize)]
pub struct FaceFeatures {
    /// Horizontal span of the jaw outline at cheekbone level (points 0-16).
    pub face_width: f32,
    /// Estimated full face height (eye-to-chin span scaled).
    pub face_height: f32,
    /// Width between the gonions (points 4-12).
    pub jaw_width: f32,
    /// Width across the chin curve (points 6-10).
    pub chin_width: f32,
    /// Face height over face width: long vs. wide.
    pub height_width_ratio: f32,
    /// Jaw width over face width: jaw taper (Heart/Oval) vs. wide base (Square).
    pub jaw_cheek_ratio: f32,
    /// Chin width over jaw width: chin angularity (pointed vs. flat).
    pub chin_jaw_ratio: f32,
    /// Lower face (nose to chin) over mid face (eyes to nose).
    pub vertical_ratio: f32,
}

impl FaceFeatures {
    /// The classification feature vector, in dataset order.
    pub fn vector(&self) -> FeatureVector {
        [
            self.height_width_ratio,
            self.jaw_cheek_ratio,
            self.chin_jaw_ratio,
            self.vertical_ratio,
        ]
    }
}

/// Extract facial measurements and classification ratios from landmarks.
///
/// Pure and deterministic; never fails for a constructed [`LandmarkSet`].
pub fn extract_features(landmarks: &LandmarkSet) -> FaceFeatures {
    let face_width = landmarks
        .point(indices::JAW_LEFT)
        .distance(&landmarks.point(indices::JAW_RIGHT));
    let jaw_width = landmarks
        .point(indices::GONION_LEFT)
        .distance(&landmarks.point(indices::GONION_RIGHT));
    let chin_width = landmarks
        .point(indices::CHIN_LEFT)
        .distance(&landmarks.point(indices::CHIN_RIGHT));

    // Face height from a stable vertical proxy: chin tip to the midpoint of
    // the two eye centers. The hairline is not in the 68-point set, so the
    // eye midline stands in for the face midline.
    let left_eye = landmarks
        .point(indices::LEFT_EYE_OUTER)
        .midpoint(&landmarks.point(indices::LEFT_EYE_INNER));
    let right_eye = landmarks
        .point(indices::RIGHT_EYE_INNER)
        .midpoint(&landmarks.point(indices::RIGHT_EYE_OUTER));
    let eye_mid = left_eye.midpoint(&right_eye);

    let chin_tip = landmarks.point(indices::CHIN_TIP);
    let eye_to_chin = chin_tip.distance(&eye_mid);
    let face_height = eye_to_chin * EYE_TO_CHIN_SCALE;

    let height_width_ratio = face_height / face_width;
    let jaw_cheek_ratio = jaw_width / face_width;
    let chin_jaw_ratio = chin_width / jaw_width;

    // Vertical split: lower face over mid face, with the nose bottom as the
    // boundary. A degenerate eye-to-nose distance substitutes 1 for the
    // denominator rather than erroring.
    let nose_bottom = landmarks.point(indices::NOSE_BOTTOM);
    let nose_to_chin = chin_tip.distance(&nose_bottom);
    let eye_to_nose = eye_mid.distance(&nose_bottom);
    let vertical_ratio = nose_to_chin / if eye_to_nose == 0.0 { 1.0 } else { eye_to_nose };

    FaceFeatures {
        face_width,
        face_height,
        jaw_width,
        chin_width,
        height_width_ratio,
        jaw_cheek_ratio,
        chin_jaw_ratio,
        vertical_ratio,
    }
}
