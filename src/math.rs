//! Mathematical utilities for the direct stiffness method

use nalgebra::{DMatrix, DVector, Matrix3, SMatrix, SVector, Vector3};

use crate::error::{FrameError, FrameResult};
use crate::loads::LocalAxis;

pub type Mat = DMatrix<f64>;
pub type Vec = DVector<f64>;
pub type Mat3 = Matrix3<f64>;
pub type Vec3 = Vector3<f64>;

/// 12x12 matrix for member stiffness
pub type Mat12 = SMatrix<f64, 12, 12>;
/// 12-element vector for member end forces/displacements
pub type Vec12 = SVector<f64, 12>;

/// Geometric tolerance for zero-length and verticality checks
const GEOM_TOL: f64 = 1e-10;

/// 3-point Gauss-Legendre rule on [-1, 1], exact for polynomials up to degree 5
const GAUSS3: [(f64, f64); 3] = [
    (-0.774596669241483, 0.555555555555556),
    (0.0, 0.888888888888889),
    (0.774596669241483, 0.555555555555556),
];

/// Compute the local axis triad for a member.
///
/// Local x runs from the i-node to the j-node. For a member with a nonzero
/// horizontal projection, local z is the global vertical (+Z) orthogonalized
/// against local x. For a vertical member the global X axis is used as the
/// reference instead, which keeps the cross product well defined. Local y
/// completes a right-handed triad (y = z × x).
///
/// Returns the 3x3 direction-cosine matrix (rows = local x, y, z expressed
/// in global coordinates) and the member length.
pub fn local_axes(i_node: &[f64; 3], j_node: &[f64; 3]) -> FrameResult<(Mat3, f64)> {
    let delta = Vec3::new(
        j_node[0] - i_node[0],
        j_node[1] - i_node[1],
        j_node[2] - i_node[2],
    );
    let length = delta.norm();

    if length < GEOM_TOL {
        return Err(FrameError::InvalidGeometry(format!(
            "zero-length member between ({}, {}, {}) and ({}, {}, {})",
            i_node[0], i_node[1], i_node[2], j_node[0], j_node[1], j_node[2]
        )));
    }

    let x = delta / length;

    // Horizontal projection decides which reference axis avoids degeneracy
    let horizontal = (x[0] * x[0] + x[1] * x[1]).sqrt();
    let reference = if horizontal > GEOM_TOL {
        Vec3::z()
    } else {
        Vec3::x()
    };

    // Gram-Schmidt: strong axis is the reference orthogonalized against x
    let z = (reference - x * reference.dot(&x)).normalize();
    let y = z.cross(&x);

    let r = Mat3::from_rows(&[x.transpose(), y.transpose(), z.transpose()]);
    Ok((r, length))
}

/// Expand a 3x3 direction-cosine matrix into the 12x12 member transformation
/// matrix (four identical diagonal blocks).
pub fn transformation_matrix(r: &Mat3) -> Mat12 {
    let mut t = Mat12::zeros();
    for block in 0..4 {
        let offset = block * 3;
        for row in 0..3 {
            for col in 0..3 {
                t[(offset + row, offset + col)] = r[(row, col)];
            }
        }
    }
    t
}

/// Compute the local stiffness matrix for a 3D Euler-Bernoulli frame element
///
/// # Arguments
/// * `e` - Modulus of elasticity
/// * `g` - Shear modulus
/// * `a` - Cross-sectional area
/// * `iy` - Moment of inertia about local y-axis
/// * `iz` - Moment of inertia about local z-axis
/// * `jt` - Torsional constant
/// * `length` - Member length
pub fn member_local_stiffness(
    e: f64,
    g: f64,
    a: f64,
    iy: f64,
    iz: f64,
    jt: f64,
    length: f64,
) -> Mat12 {
    let l = length;
    let l2 = l * l;
    let l3 = l2 * l;

    let ea_l = e * a / l;
    let gj_l = g * jt / l;

    let eiy_l3 = e * iy / l3;
    let eiy_l2 = e * iy / l2;
    let eiy_l = e * iy / l;

    let eiz_l3 = e * iz / l3;
    let eiz_l2 = e * iz / l2;
    let eiz_l = e * iz / l;

    #[rustfmt::skip]
    let data = [
        // Row 0: axial at i
        ea_l,      0.0,          0.0,           0.0,    0.0,           0.0,          -ea_l,     0.0,          0.0,           0.0,    0.0,           0.0,
        // Row 1: shear Fy at i
        0.0,       12.0*eiz_l3,  0.0,           0.0,    0.0,           6.0*eiz_l2,   0.0,       -12.0*eiz_l3, 0.0,           0.0,    0.0,           6.0*eiz_l2,
        // Row 2: shear Fz at i
        0.0,       0.0,          12.0*eiy_l3,   0.0,    -6.0*eiy_l2,   0.0,          0.0,       0.0,          -12.0*eiy_l3,  0.0,    -6.0*eiy_l2,   0.0,
        // Row 3: torsion at i
        0.0,       0.0,          0.0,           gj_l,   0.0,           0.0,          0.0,       0.0,          0.0,           -gj_l,  0.0,           0.0,
        // Row 4: moment My at i
        0.0,       0.0,          -6.0*eiy_l2,   0.0,    4.0*eiy_l,     0.0,          0.0,       0.0,          6.0*eiy_l2,    0.0,    2.0*eiy_l,     0.0,
        // Row 5: moment Mz at i
        0.0,       6.0*eiz_l2,   0.0,           0.0,    0.0,           4.0*eiz_l,    0.0,       -6.0*eiz_l2,  0.0,           0.0,    0.0,           2.0*eiz_l,
        // Row 6: axial at j
        -ea_l,     0.0,          0.0,           0.0,    0.0,           0.0,          ea_l,      0.0,          0.0,           0.0,    0.0,           0.0,
        // Row 7: shear Fy at j
        0.0,       -12.0*eiz_l3, 0.0,           0.0,    0.0,           -6.0*eiz_l2,  0.0,       12.0*eiz_l3,  0.0,           0.0,    0.0,           -6.0*eiz_l2,
        // Row 8: shear Fz at j
        0.0,       0.0,          -12.0*eiy_l3,  0.0,    6.0*eiy_l2,    0.0,          0.0,       0.0,          12.0*eiy_l3,   0.0,    6.0*eiy_l2,    0.0,
        // Row 9: torsion at j
        0.0,       0.0,          0.0,           -gj_l,  0.0,           0.0,          0.0,       0.0,          0.0,           gj_l,   0.0,           0.0,
        // Row 10: moment My at j
        0.0,       0.0,          -6.0*eiy_l2,   0.0,    2.0*eiy_l,     0.0,          0.0,       0.0,          6.0*eiy_l2,    0.0,    4.0*eiy_l,     0.0,
        // Row 11: moment Mz at j
        0.0,       6.0*eiz_l2,   0.0,           0.0,    0.0,           2.0*eiz_l,    0.0,       -6.0*eiz_l2,  0.0,           0.0,    0.0,           4.0*eiz_l,
    ];

    Mat12::from_row_slice(&data)
}

/// Fixed-end forces for a uniform load over the full member length.
///
/// The returned vector holds the forces the member ends exert when both ends
/// are clamped, in the local system; the equivalent nodal loads are its
/// negation after rotation to global coordinates.
///
/// # Arguments
/// * `w` - Load intensity (force per unit length, along the local axis)
/// * `length` - Member length
/// * `axis` - Local axis the load acts along
pub fn fer_uniform_load(w: f64, length: f64, axis: LocalAxis) -> Vec12 {
    let l = length;
    let l2 = l * l;

    let mut fer = Vec12::zeros();

    match axis {
        LocalAxis::X => {
            fer[0] = -w * l / 2.0;
            fer[6] = -w * l / 2.0;
        }
        LocalAxis::Y => {
            fer[1] = -w * l / 2.0;
            fer[5] = -w * l2 / 12.0;
            fer[7] = -w * l / 2.0;
            fer[11] = w * l2 / 12.0;
        }
        LocalAxis::Z => {
            fer[2] = -w * l / 2.0;
            fer[4] = w * l2 / 12.0;
            fer[8] = -w * l / 2.0;
            fer[10] = -w * l2 / 12.0;
        }
    }

    fer
}

/// Fixed-end forces for a linearly varying load over part of the member.
///
/// Work-equivalent formulation: the equivalent nodal load is the integral of
/// the Hermite (transverse) or linear (axial) shape functions against the
/// load, evaluated by 3-point Gauss quadrature, which is exact for a
/// trapezoidal intensity. Reduces to the closed-form uniform case when
/// `w1 == w2` and the load covers the whole span.
///
/// # Arguments
/// * `w1`, `w2` - Intensity at the start and end of the loaded region
/// * `x1`, `x2` - Loaded region as distances from the i-node, `x1 < x2`
/// * `length` - Member length
/// * `axis` - Local axis the load acts along
pub fn fer_linear_load(w1: f64, w2: f64, x1: f64, x2: f64, length: f64, axis: LocalAxis) -> Vec12 {
    let mut fer = Vec12::zeros();
    let span = x2 - x1;
    if span <= 0.0 {
        return fer;
    }

    let l = length;
    let jac = span / 2.0;

    for (gp, wgt) in GAUSS3 {
        let x = (x1 + x2) / 2.0 + jac * gp;
        let w = w1 + (w2 - w1) * (x - x1) / span;
        let scale = wgt * jac * w;
        let xi = x / l;

        match axis {
            LocalAxis::X => {
                fer[0] -= scale * (1.0 - xi);
                fer[6] -= scale * xi;
            }
            LocalAxis::Y | LocalAxis::Z => {
                let xi2 = xi * xi;
                let xi3 = xi2 * xi;
                let h1 = 1.0 - 3.0 * xi2 + 2.0 * xi3;
                let h2 = l * (xi - 2.0 * xi2 + xi3);
                let h3 = 3.0 * xi2 - 2.0 * xi3;
                let h4 = l * (xi3 - xi2);

                if axis == LocalAxis::Y {
                    fer[1] -= scale * h1;
                    fer[5] -= scale * h2;
                    fer[7] -= scale * h3;
                    fer[11] -= scale * h4;
                } else {
                    // Rotations about y couple to z-displacement with the
                    // opposite sign of the slope
                    fer[2] -= scale * h1;
                    fer[4] += scale * h2;
                    fer[8] -= scale * h3;
                    fer[10] += scale * h4;
                }
            }
        }
    }

    fer
}

/// Solve a symmetric positive-definite system by Cholesky decomposition.
///
/// Returns `None` when the factorization fails, which for a reduced
/// stiffness system means the structure is unsupported or disconnected.
pub fn solve_cholesky(a: &Mat, b: &Vec) -> Option<Vec> {
    a.clone().cholesky().map(|chol| chol.solve(b))
}
