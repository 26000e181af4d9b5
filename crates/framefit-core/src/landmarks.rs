//! 68-point facial landmark contract.
//!
//! The index layout is a hard external contract shared with the upstream
//! landmark detector: 0-16 jaw outline, 17-21 left brow, 22-26 right brow,
//! 27-35 nose, 36-41 left eye, 42-47 right eye, 48-67 mouth. Reordering any
//! of these breaks every downstream ratio.

use crate::types::Point;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of points in a canonical landmark set.
pub const LANDMARK_COUNT: usize = 68;

/// Named landmark indices used by feature extraction.
pub mod indices {
    /// Left end of the jaw outline (cheekbone-level proxy).
    pub const JAW_LEFT: usize = 0;
    /// Right end of the jaw outline.
    pub const JAW_RIGHT: usize = 16;
    /// Left gonion (jaw-angle proxy).
    pub const GONION_LEFT: usize = 4;
    /// Right gonion.
    pub const GONION_RIGHT: usize = 12;
    /// Left edge of the chin curve.
    pub const CHIN_LEFT: usize = 6;
    /// Right edge of the chin curve.
    pub const CHIN_RIGHT: usize = 10;
    /// Chin tip.
    pub const CHIN_TIP: usize = 8;
    /// Bottom of the nose, boundary between mid and lower face.
    pub const NOSE_BOTTOM: usize = 33;
    /// Left eye, outer corner.
    pub const LEFT_EYE_OUTER: usize = 36;
    /// Left eye, inner corner.
    pub const LEFT_EYE_INNER: usize = 39;
    /// Right eye, inner corner.
    pub const RIGHT_EYE_INNER: usize = 42;
    /// Right eye, outer corner.
    pub const RIGHT_EYE_OUTER: usize = 45;
}

#[derive(Error, Debug)]
pub enum LandmarkError {
    #[error("expected {expected} landmark points, got {got}")]
    WrongPointCount { expected: usize, got: usize },
    #[error("landmark {index} has a non-finite coordinate")]
    NonFiniteCoordinate { index: usize },
}

/// An ordered set of exactly 68 facial landmarks from the external detector.
///
/// Immutable once constructed. Construction validates the contract (point
/// count, finite coordinates); everything downstream may index freely.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point>", into = "Vec<Point>")]
pub struct LandmarkSet {
    points: Vec<Point>,
}

impl LandmarkSet {
    /// Build a landmark set from detector output, validating the contract.
    pub fn from_points(points: Vec<Point>) -> Result<Self, LandmarkError> {
        if points.len() != LANDMARK_COUNT {
            return Err(LandmarkError::WrongPointCount {
                expected: LANDMARK_COUNT,
                got: points.len(),
            });
        }
        for (index, p) in points.iter().enumerate() {
            if !p.x.is_finite() || !p.y.is_finite() {
                return Err(LandmarkError::NonFiniteCoordinate { index });
            }
        }
        Ok(Self { points })
    }

    /// Build a landmark set from raw `(x, y)` pairs.
    pub fn from_pairs(pairs: &[(f32, f32)]) -> Result<Self, LandmarkError> {
        Self::from_points(pairs.iter().map(|&(x, y)| Point::new(x, y)).collect())
    }

    /// The landmark at a canonical index. Panics on out-of-range indices;
    /// valid indices are guaranteed by construction.
    pub fn point(&self, index: usize) -> Point {
        self.points[index]
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }
}

impl TryFrom<Vec<Point>> for LandmarkSet {
    type Error = LandmarkError;

    fn try_from(points: Vec<Point>) -> Result<Self, Self::Error> {
        Self::from_points(points)
    }
}

impl From<LandmarkSet> for Vec<Point> {
    fn from(set: LandmarkSet) -> Self {
        set.points
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::{LandmarkSet, LANDMARK_COUNT};
    use crate::landmarks::indices;
    use crate::types::Point;

    /// Landmark set with controlled geometry. Only the overridden indices are
    /// meaningful; the rest sit at a filler position.
    pub(crate) fn synthetic_landmarks(overrides: &[(usize, (f32, f32))]) -> LandmarkSet {
        let mut points = vec![Point::new(50.0, 50.0); LANDMARK_COUNT];
        for &(idx, (x, y)) in overrides {
            points[idx] = Point::new(x, y);
        }
        LandmarkSet::from_points(points).unwrap()
    }

    /// A square-jawed face: jaw nearly as wide as the cheekbones, flat chin,
    /// short vertical span. Extracted ratios land near
    /// `[1.25, 0.92, 0.65, 1.05]`.
    pub(crate) fn square_face_overrides() -> Vec<(usize, (f32, f32))> {
        vec![
            (indices::JAW_LEFT, (0.0, 0.0)),
            (indices::JAW_RIGHT, (100.0, 0.0)),
            (indices::GONION_LEFT, (4.0, 40.0)),
            (indices::GONION_RIGHT, (96.0, 40.0)),
            (indices::CHIN_LEFT, (20.0, 70.0)),
            (indices::CHIN_RIGHT, (80.0, 70.0)),
            (indices::CHIN_TIP, (50.0, 87.0)),
            (indices::NOSE_BOTTOM, (50.0, 47.5)),
            (indices::LEFT_EYE_OUTER, (20.0, 10.0)),
            (indices::LEFT_EYE_INNER, (36.0, 10.0)),
            (indices::RIGHT_EYE_INNER, (64.0, 10.0)),
            (indices::RIGHT_EYE_OUTER, (80.0, 10.0)),
        ]
    }
}
