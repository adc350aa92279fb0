//! Cross-section properties for frame members

use serde::{Deserialize, Serialize};

use crate::error::{FrameError, FrameResult};

/// Cross-section properties for a frame member.
///
/// Immutable once added to the model catalog; members reference sections by
/// name. Consistent units are assumed (m², m⁴ in SI).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    /// Cross-sectional area
    pub a: f64,
    /// Moment of inertia about the local y-axis (strong axis for gravity
    /// bending under this engine's axis convention)
    pub iy: f64,
    /// Moment of inertia about the local z-axis
    pub iz: f64,
    /// Torsional constant
    pub j: f64,
}

impl Section {
    /// Create a section from raw properties
    pub fn new(a: f64, iy: f64, iz: f64, j: f64) -> Self {
        Self { a, iy, iz, j }
    }

    /// Create a solid rectangular section of the given width and depth
    pub fn rectangular(width: f64, depth: f64) -> Self {
        let a = width * depth;
        let iy = width * depth.powi(3) / 12.0;
        let iz = depth * width.powi(3) / 12.0;

        // Torsional constant for a rectangle (approximate)
        let (long, short) = if width > depth {
            (width, depth)
        } else {
            (depth, width)
        };
        let j = long * short.powi(3) / 3.0 * (1.0 - 0.63 * short / long);

        Self { a, iy, iz, j }
    }

    /// Create a wide flange (I-beam) section from plate dimensions
    ///
    /// # Arguments
    /// * `depth` - Total depth of section
    /// * `flange_width` - Width of flange
    /// * `flange_thickness` - Thickness of flange
    /// * `web_thickness` - Thickness of web
    pub fn wide_flange(
        depth: f64,
        flange_width: f64,
        flange_thickness: f64,
        web_thickness: f64,
    ) -> Self {
        let bf = flange_width;
        let tf = flange_thickness;
        let tw = web_thickness;
        let d = depth;
        let hw = d - 2.0 * tf;

        let a = 2.0 * bf * tf + hw * tw;
        let iy = (bf * d.powi(3) - (bf - tw) * hw.powi(3)) / 12.0;
        let iz = (2.0 * tf * bf.powi(3) + hw * tw.powi(3)) / 12.0;
        let j = (2.0 * bf * tf.powi(3) + hw * tw.powi(3)) / 3.0;

        Self { a, iy, iz, j }
    }

    /// Validate the properties for use in a stiffness matrix
    pub(crate) fn validate(&self, name: &str) -> FrameResult<()> {
        if self.a <= 0.0 || self.iy <= 0.0 || self.iz <= 0.0 || self.j <= 0.0 {
            return Err(FrameError::InvalidSection(format!(
                "'{}' must have positive area, inertias and torsional constant \
                 (a={}, iy={}, iz={}, j={})",
                name, self.a, self.iy, self.iz, self.j
            )));
        }
        Ok(())
    }

    /// Radius of gyration about the y-axis
    pub fn ry(&self) -> f64 {
        (self.iy / self.a).sqrt()
    }

    /// Radius of gyration about the z-axis
    pub fn rz(&self) -> f64 {
        (self.iz / self.a).sqrt()
    }
}
