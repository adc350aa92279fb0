//! Node - a point in 3D space with six degrees of freedom

use serde::{Deserialize, Serialize};

use super::Support;

/// A 3D node in the structural model.
///
/// Carries its support fixity mask, the concentrated load accumulated on it,
/// and (after a solve) the displacement vector plus, for supported nodes,
/// the reaction vector. Components are ordered [DX, DY, DZ, RX, RY, RZ].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Z coordinate (global Z is vertical)
    pub z: f64,

    /// Support fixity mask (true = restrained)
    pub support: Support,

    /// Concentrated nodal loads accumulated on this node
    pub loads: [f64; 6],

    /// Internal DOF base index assigned during analysis
    #[serde(skip)]
    pub(crate) id: Option<usize>,

    /// Displacement vector from the last solve
    #[serde(skip)]
    pub(crate) displacement: Option<[f64; 6]>,

    /// Reaction vector from the last solve; only present when any fixity
    /// bit is set
    #[serde(skip)]
    pub(crate) reaction: Option<[f64; 6]>,
}

impl Node {
    /// Create a free, unloaded node at the given coordinates
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z,
            support: Support::free(),
            loads: [0.0; 6],
            id: None,
            displacement: None,
            reaction: None,
        }
    }

    /// Create a node with a support condition
    pub fn with_support(mut self, support: Support) -> Self {
        self.support = support;
        self
    }

    /// Get the coordinates as an array
    pub fn coords(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Calculate distance to another node
    pub fn distance_to(&self, other: &Node) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Displacement from the last solve, `[DX, DY, DZ, RX, RY, RZ]`
    pub fn displacement(&self) -> Option<[f64; 6]> {
        self.displacement
    }

    /// Reactions from the last solve, `[FX, FY, FZ, MX, MY, MZ]`; `None` for
    /// unsupported nodes
    pub fn reaction(&self) -> Option<[f64; 6]> {
        self.reaction
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_creation() {
        let node = Node::new(1.0, 2.0, 3.0);
        assert_eq!(node.x, 1.0);
        assert_eq!(node.y, 2.0);
        assert_eq!(node.z, 3.0);
        assert!(!node.support.is_supported());
    }

    #[test]
    fn test_node_distance() {
        let n1 = Node::new(0.0, 0.0, 0.0);
        let n2 = Node::new(3.0, 4.0, 0.0);
        assert!((n1.distance_to(&n2) - 5.0).abs() < 1e-10);
    }
}
