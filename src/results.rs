//! Result types handed to report/viewer collaborators

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisStatus;
use crate::error::FrameResult;

/// Displacement results at a node
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NodeDisplacement {
    /// Displacement in X direction
    pub dx: f64,
    /// Displacement in Y direction
    pub dy: f64,
    /// Displacement in Z direction (vertical)
    pub dz: f64,
    /// Rotation about X axis
    pub rx: f64,
    /// Rotation about Y axis
    pub ry: f64,
    /// Rotation about Z axis
    pub rz: f64,
}

impl NodeDisplacement {
    /// Create from array [DX, DY, DZ, RX, RY, RZ]
    pub fn from_array(arr: [f64; 6]) -> Self {
        Self {
            dx: arr[0],
            dy: arr[1],
            dz: arr[2],
            rx: arr[3],
            ry: arr[4],
            rz: arr[5],
        }
    }

    /// Translation magnitude
    pub fn translation_magnitude(&self) -> f64 {
        (self.dx.powi(2) + self.dy.powi(2) + self.dz.powi(2)).sqrt()
    }
}

/// Reaction forces at a supported node
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Reactions {
    /// Reaction force in X direction
    pub fx: f64,
    /// Reaction force in Y direction
    pub fy: f64,
    /// Reaction force in Z direction
    pub fz: f64,
    /// Reaction moment about X axis
    pub mx: f64,
    /// Reaction moment about Y axis
    pub my: f64,
    /// Reaction moment about Z axis
    pub mz: f64,
}

impl Reactions {
    /// Create from array [FX, FY, FZ, MX, MY, MZ]
    pub fn from_array(arr: [f64; 6]) -> Self {
        Self {
            fx: arr[0],
            fy: arr[1],
            fz: arr[2],
            mx: arr[3],
            my: arr[4],
            mz: arr[5],
        }
    }

    /// Total force magnitude
    pub fn force_magnitude(&self) -> f64 {
        (self.fx.powi(2) + self.fy.powi(2) + self.fz.powi(2)).sqrt()
    }
}

/// Internal-force diagram for one member, sampled at evenly spaced stations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForceDiagram {
    /// Member length
    pub length: f64,
    /// Station positions measured from the i-node
    pub positions: Vec<f64>,
    /// Axial force at each station (positive = tension)
    pub axial: Vec<f64>,
    /// Shear in local y at each station
    pub shear_y: Vec<f64>,
    /// Shear in local z at each station
    pub shear_z: Vec<f64>,
    /// Torsion at each station
    pub torsion: Vec<f64>,
    /// Bending moment about local y at each station
    pub moment_y: Vec<f64>,
    /// Bending moment about local z at each station
    pub moment_z: Vec<f64>,
}

impl ForceDiagram {
    /// Largest absolute bending moment over both axes and all stations
    pub fn max_moment(&self) -> f64 {
        self.moment_y
            .iter()
            .chain(self.moment_z.iter())
            .fold(0.0, |acc, m| acc.max(m.abs()))
    }

    /// Largest absolute shear over both axes and all stations
    pub fn max_shear(&self) -> f64 {
        self.shear_y
            .iter()
            .chain(self.shear_z.iter())
            .fold(0.0, |acc, v| acc.max(v.abs()))
    }
}

/// Maximum vertical deflection over all nodes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeflectionSummary {
    /// Largest |DZ| in the model
    pub value: f64,
    /// Node where the maximum occurs
    pub node: String,
    /// Caller-supplied comparison limit, if any
    pub limit: Option<f64>,
}

impl DeflectionSummary {
    /// Whether the deflection passes the caller-supplied limit, if one was
    /// given
    pub fn within_limit(&self) -> Option<bool> {
        self.limit.map(|limit| self.value <= limit)
    }
}

/// Full result set of one analysis run.
///
/// Consumers read this structure only; the internal matrices never leave the
/// engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResults {
    /// Analysis status; always `Solved` for a returned results object
    pub status: AnalysisStatus,
    /// Nodal displacements keyed by node name
    pub displacements: BTreeMap<String, NodeDisplacement>,
    /// Support reactions keyed by node name (supported nodes only)
    pub reactions: BTreeMap<String, Reactions>,
    /// Member force diagrams keyed by member name
    pub member_forces: BTreeMap<String, ForceDiagram>,
    /// Maximum vertical deflection summary
    pub max_deflection: DeflectionSummary,
}

impl AnalysisResults {
    /// Serialize to a JSON string for report collaborators
    pub fn to_json(&self) -> FrameResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
