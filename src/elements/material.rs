//! Material properties

use serde::{Deserialize, Serialize};

use crate::error::{FrameError, FrameResult};

/// Linear-elastic material properties.
///
/// Immutable once added to the model catalog; members reference materials by
/// name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    /// Modulus of elasticity (Young's modulus) in Pa
    pub e: f64,
    /// Shear modulus in Pa
    pub g: f64,
    /// Poisson's ratio
    pub nu: f64,
    /// Density in kg/m³
    pub rho: f64,
}

impl Material {
    /// Create a material with given properties
    pub fn new(e: f64, g: f64, nu: f64, rho: f64) -> Self {
        Self { e, g, nu, rho }
    }

    /// Create an isotropic material from E and nu; G = E / (2 (1 + nu))
    pub fn isotropic(e: f64, nu: f64, rho: f64) -> Self {
        let g = e / (2.0 * (1.0 + nu));
        Self::new(e, g, nu, rho)
    }

    /// Standard structural steel
    pub fn steel() -> Self {
        Self {
            e: 200e9,
            g: 77e9,
            nu: 0.3,
            rho: 7850.0,
        }
    }

    /// Validate the moduli for use in a stiffness matrix
    pub(crate) fn validate(&self, name: &str) -> FrameResult<()> {
        if self.e <= 0.0 || self.g <= 0.0 {
            return Err(FrameError::InvalidMaterial(format!(
                "'{}' must have positive elastic and shear moduli (e={}, g={})",
                name, self.e, self.g
            )));
        }
        Ok(())
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::steel()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_isotropic_material() {
        let mat = Material::isotropic(200e9, 0.3, 7850.0);
        let expected_g = 200e9 / (2.0 * 1.3);
        assert!((mat.g - expected_g).abs() < 1.0);
    }

    #[test]
    fn test_invalid_material_rejected() {
        let mat = Material::new(-1.0, 77e9, 0.3, 7850.0);
        assert!(mat.validate("bad").is_err());
    }
}
