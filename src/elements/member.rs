//! Member - 3D frame element (beam/column)

use serde::{Deserialize, Serialize};

use crate::loads::{DistributedLoad, LocalAxis};

/// Structural role of a member within a floor system.
///
/// Report and code-check consumers filter member force tables by role; the
/// engine itself treats all kinds identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemberKind {
    /// Vertical member between a base and a column-top node
    Column,
    /// Beam spanning between column tops along the main-beam direction
    MainBeam,
    /// Beam segment along the orthogonal direction
    SecondaryBeam,
    /// Any other member
    Generic,
}

/// A 3D frame member (beam or column).
///
/// End forces are ordered [Fx_i, Fy_i, Fz_i, Mx_i, My_i, Mz_i,
/// Fx_j, Fy_j, Fz_j, Mx_j, My_j, Mz_j] in the member's local system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    /// Name of the i-node (start)
    pub i_node: String,
    /// Name of the j-node (end)
    pub j_node: String,
    /// Name of the material
    pub material: String,
    /// Name of the section
    pub section: String,
    /// Structural role
    pub kind: MemberKind,
    /// Distributed loads carried by this member
    pub loads: Vec<DistributedLoad>,

    /// Length cached during analysis preparation
    #[serde(skip)]
    pub(crate) length: Option<f64>,

    /// Local fixed-end force vector accumulated from distributed loads
    #[serde(skip)]
    pub(crate) fixed_end_forces: [f64; 12],

    /// Local end forces from the last solve
    #[serde(skip)]
    pub(crate) local_forces: Option<[f64; 12]>,
}

impl Member {
    /// Create a new member between two nodes
    pub fn new(i_node: &str, j_node: &str, material: &str, section: &str) -> Self {
        Self {
            i_node: i_node.to_string(),
            j_node: j_node.to_string(),
            material: material.to_string(),
            section: section.to_string(),
            kind: MemberKind::Generic,
            loads: Vec::new(),
            length: None,
            fixed_end_forces: [0.0; 12],
            local_forces: None,
        }
    }

    /// Set the structural role
    pub fn with_kind(mut self, kind: MemberKind) -> Self {
        self.kind = kind;
        self
    }

    /// Attach a distributed load
    pub fn with_load(mut self, load: DistributedLoad) -> Self {
        self.loads.push(load);
        self
    }

    /// Member length, available once the model has been prepared
    pub fn length(&self) -> Option<f64> {
        self.length
    }

    /// Local end forces from the last solve
    pub fn local_force(&self) -> Option<[f64; 12]> {
        self.local_forces
    }

    /// Sum of distributed-load resultants crossing the section at `x`, and
    /// their moment about that section, for loads along one local axis
    fn load_integrals(&self, axis: LocalAxis, x: f64, length: f64) -> (f64, f64) {
        let mut shear = 0.0;
        let mut moment = 0.0;
        for load in self.loads.iter().filter(|l| l.axis == axis) {
            shear += load.shear_integral(x, length);
            moment += load.moment_integral(x, length);
        }
        (shear, moment)
    }

    /// Axial force at distance `x` from the i-node (positive = tension)
    pub fn axial(&self, x: f64) -> Option<f64> {
        let f = self.local_forces?;
        let l = self.length?;
        let (px, _) = self.load_integrals(LocalAxis::X, x, l);
        Some(-(f[0] + px))
    }

    /// Shear force in the local y direction at distance `x`
    pub fn shear_y(&self, x: f64) -> Option<f64> {
        let f = self.local_forces?;
        let l = self.length?;
        let (wy, _) = self.load_integrals(LocalAxis::Y, x, l);
        Some(-(f[1] + wy))
    }

    /// Shear force in the local z direction at distance `x`
    pub fn shear_z(&self, x: f64) -> Option<f64> {
        let f = self.local_forces?;
        let l = self.length?;
        let (wz, _) = self.load_integrals(LocalAxis::Z, x, l);
        Some(-(f[2] + wz))
    }

    /// Torsion at distance `x` (constant; no distributed torsion loads)
    pub fn torsion(&self, _x: f64) -> Option<f64> {
        let f = self.local_forces?;
        Some(-f[3])
    }

    /// Bending moment about the local y axis at distance `x`
    pub fn moment_y(&self, x: f64) -> Option<f64> {
        let f = self.local_forces?;
        let l = self.length?;
        let (_, mz) = self.load_integrals(LocalAxis::Z, x, l);
        Some(f[4] + f[2] * x + mz)
    }

    /// Bending moment about the local z axis at distance `x`
    pub fn moment_z(&self, x: f64) -> Option<f64> {
        let f = self.local_forces?;
        let l = self.length?;
        let (_, my) = self.load_integrals(LocalAxis::Y, x, l);
        Some(f[5] - f[1] * x - my)
    }

    /// Maximum absolute end moment over both bending axes
    pub fn max_end_moment(&self) -> Option<f64> {
        let f = self.local_forces?;
        Some(
            f[4].abs()
                .max(f[5].abs())
                .max(f[10].abs())
                .max(f[11].abs()),
        )
    }
}
