use crate::calibration::{Mat33, IDENTITY};

/// Compute the rotation matrix from a Rodrigues (axis-angle) vector.
///
/// The rotation angle is the vector norm and the rotation axis its
/// direction, following `R = I + sin(t)*[u]x + (1 - cos(t))*[u]x^2`.
///
/// # Arguments
///
/// * `rvec` - The Rodrigues vector.
///
/// # Returns
///
/// The 3x3 rotation matrix; the identity for a (near-)zero vector.
///
/// Example:
///
/// ```
/// use stereocalib::transforms::rodrigues_to_rotation_matrix;
///
/// let rotation = rodrigues_to_rotation_matrix(&[0.0, 0.0, 0.0]);
/// assert_eq!(rotation, [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
/// ```
pub fn rodrigues_to_rotation_matrix(rvec: &[f64; 3]) -> Mat33 {
    let angle = (rvec[0].powi(2) + rvec[1].powi(2) + rvec[2].powi(2)).sqrt();
    if angle < 1e-10 {
        return IDENTITY;
    }

    let x = rvec[0] / angle;
    let y = rvec[1] / angle;
    let z = rvec[2] / angle;

    let c = angle.cos();
    let s = angle.sin();
    let t = 1.0 - c;

    let m00 = c + x * x * t;
    let m11 = c + y * y * t;
    let m22 = c + z * z * t;

    let tmp1 = x * y * t;
    let tmp2 = z * s;

    let m10 = tmp1 + tmp2;
    let m01 = tmp1 - tmp2;

    let tmp3 = x * z * t;
    let tmp4 = y * s;

    let m20 = tmp3 - tmp4;
    let m02 = tmp3 + tmp4;

    let tmp5 = y * z * t;
    let tmp6 = x * s;

    let m12 = tmp5 - tmp6;
    let m21 = tmp5 + tmp6;

    [[m00, m01, m02], [m10, m11, m12], [m20, m21, m22]]
}
