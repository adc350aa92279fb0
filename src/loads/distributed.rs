//! Distributed loads on members

use serde::{Deserialize, Serialize};

/// Axis of a member's local coordinate system.
///
/// Distributed loads are expressed along one of these; X is the member axis,
/// Y and Z are the transverse bending axes from the orientation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocalAxis {
    /// Along the member (axial)
    X,
    /// Transverse, local y
    Y,
    /// Transverse, local z ("up-ish" for non-vertical members)
    Z,
}

/// A distributed (line) load on a member, linear between two stations.
///
/// Positions are fractions of the member length so a load can be declared
/// before geometry is resolved; `(0, 1)` covers the whole span.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DistributedLoad {
    /// Intensity at the start position (force per unit length)
    pub w1: f64,
    /// Intensity at the end position
    pub w2: f64,
    /// Start position as a fraction of member length
    pub x1: f64,
    /// End position as a fraction of member length
    pub x2: f64,
    /// Local axis the load acts along
    pub axis: LocalAxis,
}

impl DistributedLoad {
    /// Create a linearly varying load between two fractional positions
    pub fn new(w1: f64, w2: f64, x1: f64, x2: f64, axis: LocalAxis) -> Self {
        Self { w1, w2, x1, x2, axis }
    }

    /// Uniform load over the full member length
    pub fn uniform(w: f64, axis: LocalAxis) -> Self {
        Self::new(w, w, 0.0, 1.0, axis)
    }

    /// Uniform load over part of the member
    pub fn partial_uniform(w: f64, x1: f64, x2: f64, axis: LocalAxis) -> Self {
        Self::new(w, w, x1, x2, axis)
    }

    /// Check if the load has constant intensity
    pub fn is_uniform(&self) -> bool {
        (self.w1 - self.w2).abs() < 1e-12
    }

    /// Check if the load covers the whole member
    pub fn is_full_span(&self) -> bool {
        self.x1 <= 1e-12 && (self.x2 - 1.0).abs() < 1e-12
    }

    /// Check the fractional positions are ordered and inside [0, 1]
    pub(crate) fn positions_valid(&self) -> bool {
        self.x1 >= 0.0 && self.x2 <= 1.0 && self.x1 < self.x2
    }

    /// Total force resultant for a member of the given length
    pub fn total_force(&self, length: f64) -> f64 {
        (self.w1 + self.w2) / 2.0 * (self.x2 - self.x1) * length
    }

    /// Load resultant between the i-node and a section at distance `x`
    pub(crate) fn shear_integral(&self, x: f64, length: f64) -> f64 {
        let a = self.x1 * length;
        let b = self.x2 * length;
        let span = b - a;
        if x <= a || span <= 0.0 {
            return 0.0;
        }
        let t = x.min(b) - a;
        let slope = (self.w2 - self.w1) / span;
        self.w1 * t + slope * t * t / 2.0
    }

    /// Moment of the load left of `x` about the section at `x`
    pub(crate) fn moment_integral(&self, x: f64, length: f64) -> f64 {
        let a = self.x1 * length;
        let b = self.x2 * length;
        let span = b - a;
        if x <= a || span <= 0.0 {
            return 0.0;
        }
        let t = x.min(b) - a;
        let d = x - a;
        let slope = (self.w2 - self.w1) / span;
        self.w1 * (d * t - t * t / 2.0) + slope * (d * t * t / 2.0 - t * t * t / 3.0)
    }
}
