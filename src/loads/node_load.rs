//! Concentrated loads applied directly to nodes

use serde::{Deserialize, Serialize};

/// A concentrated force/moment applied at a node in global coordinates
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct NodeLoad {
    /// Force in global X
    pub fx: f64,
    /// Force in global Y
    pub fy: f64,
    /// Force in global Z
    pub fz: f64,
    /// Moment about global X
    pub mx: f64,
    /// Moment about global Y
    pub my: f64,
    /// Moment about global Z
    pub mz: f64,
}

impl NodeLoad {
    /// Create a pure force load
    pub fn force(fx: f64, fy: f64, fz: f64) -> Self {
        Self {
            fx,
            fy,
            fz,
            ..Self::default()
        }
    }

    /// Create a pure moment load
    pub fn moment(mx: f64, my: f64, mz: f64) -> Self {
        Self {
            mx,
            my,
            mz,
            ..Self::default()
        }
    }

    /// Create a vertical (global Z) force load; negative is downward
    pub fn fz(fz: f64) -> Self {
        Self::force(0.0, 0.0, fz)
    }

    /// Load components as an array [FX, FY, FZ, MX, MY, MZ]
    pub fn as_array(&self) -> [f64; 6] {
        [self.fx, self.fy, self.fz, self.mx, self.my, self.mz]
    }
}
