use serde::{Deserialize, Serialize};

/// A 2-D point in image coordinates (pixels).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Midpoint between two points.
    pub fn midpoint(&self, other: &Point) -> Point {
        Point {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }
}

/// The five canonical face-shape categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FaceShape {
    /// Balanced proportions, slightly longer than wide, soft chin.
    Oval,
    /// Short face, wide jaw, soft chin.
    Round,
    /// Short-to-medium face, jaw nearly as wide as the cheekbones, flat chin.
    Square,
    /// Drastic jaw taper and a pointed chin.
    Heart,
    /// Markedly longer than wide, balanced jaw and chin.
    Oblong,
}

impl FaceShape {
    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Oval => "Oval",
            Self::Round => "Round",
            Self::Square => "Square",
            Self::Heart => "Heart",
            Self::Oblong => "Oblong",
        }
    }

    /// All shape variants, for iteration.
    pub fn all() -> &'static [FaceShape] {
        &[
            FaceShape::Oval,
            FaceShape::Round,
            FaceShape::Square,
            FaceShape::Heart,
            FaceShape::Oblong,
        ]
    }

    /// Eyewear-frame recommendation for this face shape.
    pub fn recommendation(&self) -> FrameRecommendation {
        match self {
            Self::Oval => FrameRecommendation {
                frames: "Almost any frame style works",
                description: "Oval faces are the most versatile shape. Aviator, \
                              wayfarer, cat-eye, and rectangular frames all suit it.",
                style: "aviator",
            },
            Self::Round => FrameRecommendation {
                frames: "Rectangular / angular frames",
                description: "Angular and rectangular frames add definition and \
                              make a round face look slimmer and more proportioned.",
                style: "rectangular",
            },
            Self::Square => FrameRecommendation {
                frames: "Round / oval frames",
                description: "Round or oval frames soften the angles of the face \
                              for a smoother, more balanced look.",
                style: "round",
            },
            Self::Heart => FrameRecommendation {
                frames: "Bottom-heavy frames",
                description: "Frames that are wider at the bottom balance a broad \
                              forehead against a narrower chin.",
                style: "bottom-heavy",
            },
            Self::Oblong => FrameRecommendation {
                frames: "Oversized / wide frames",
                description: "Oversized or wide frames visually shorten a long \
                              face and restore proportion.",
                style: "oversized",
            },
        }
    }
}

impl std::fmt::Display for FaceShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Static eyewear-frame advice for one face shape.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FrameRecommendation {
    /// Short summary of the recommended frame family.
    pub frames: &'static str,
    /// Longer styling rationale.
    pub description: &'static str,
    /// Reference frame-style identifier for asset lookup.
    pub style: &'static str,
}

/// One of the k nearest reference points considered during classification.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Neighbor {
    pub shape: FaceShape,
    /// Euclidean distance in normalized feature space.
    pub distance: f32,
}

/// Result of classifying a feature vector against the reference dataset.
#[derive(Debug, Clone, Serialize)]
pub struct ShapePrediction {
    /// Winning face shape (majority vote among the k nearest neighbors).
    pub shape: FaceShape,
    /// Fraction of the considered neighbors agreeing with the winner, in (0, 1].
    ///
    /// A local vote fraction, not a calibrated probability.
    pub confidence: f32,
    /// The neighbors that voted, sorted ascending by distance.
    pub neighbors: Vec<Neighbor>,
}
