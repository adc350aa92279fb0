//! Support conditions

use serde::{Deserialize, Serialize};

/// Rigid support fixity mask at a node.
///
/// Each flag restrains one of the six nodal DOFs; restrained DOFs carry zero
/// displacement (the engine has no spring or enforced-displacement supports).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Support {
    /// Restrained in X translation
    pub dx: bool,
    /// Restrained in Y translation
    pub dy: bool,
    /// Restrained in Z translation
    pub dz: bool,
    /// Restrained in X rotation
    pub rx: bool,
    /// Restrained in Y rotation
    pub ry: bool,
    /// Restrained in Z rotation
    pub rz: bool,
}

impl Support {
    /// No restraints
    pub fn free() -> Self {
        Self::default()
    }

    /// Fully fixed support (all DOFs restrained)
    pub fn fixed() -> Self {
        Self {
            dx: true,
            dy: true,
            dz: true,
            rx: true,
            ry: true,
            rz: true,
        }
    }

    /// Pinned support (translations restrained, rotations free)
    pub fn pinned() -> Self {
        Self {
            dx: true,
            dy: true,
            dz: true,
            ..Self::default()
        }
    }

    /// Support with specific restraints
    pub fn with_restraints(dx: bool, dy: bool, dz: bool, rx: bool, ry: bool, rz: bool) -> Self {
        Self {
            dx,
            dy,
            dz,
            rx,
            ry,
            rz,
        }
    }

    /// Fixity mask as an array [DX, DY, DZ, RX, RY, RZ]
    pub fn as_array(&self) -> [bool; 6] {
        [self.dx, self.dy, self.dz, self.rx, self.ry, self.rz]
    }

    /// Check if any DOF is restrained
    pub fn is_supported(&self) -> bool {
        self.dx || self.dy || self.dz || self.rx || self.ry || self.rz
    }

    /// Count of restrained DOFs
    pub fn num_restrained(&self) -> usize {
        self.as_array().iter().filter(|&&r| r).count()
    }
}
