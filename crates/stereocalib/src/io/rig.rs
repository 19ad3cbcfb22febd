use std::{fs, path::Path};

use serde::Deserialize;

use crate::calibration::{pinhole_matrix, CalibrationSet, Mat33, Vec3};

/// Error types for the rig JSON converter.
#[derive(Debug, thiserror::Error)]
pub enum RigError {
    /// Error reading or writing file
    #[error("error reading or writing file")]
    IoError(#[from] std::io::Error),

    /// Malformed rig calibration JSON
    #[error("malformed rig calibration JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The export does not contain a stereo pair
    #[error("rig export contains {0} camera(s), a stereo pair needs 2")]
    MissingCamera(usize),
}

#[derive(Debug, Deserialize)]
struct RigExport {
    cameras: Vec<CameraEntry>,
}

#[derive(Debug, Deserialize)]
struct CameraEntry {
    calibration: CameraCalibration,
}

#[derive(Debug, Deserialize)]
struct CameraCalibration {
    intrinsics: Intrinsics,
    extrinsics: Extrinsics,
}

#[derive(Debug, Deserialize)]
struct Intrinsics {
    affine: Affine,
    distortion: Distortion,
}

#[derive(Debug, Deserialize)]
struct Affine {
    fx: f64,
    fy: f64,
    cx: f64,
    cy: f64,
}

#[derive(Debug, Deserialize)]
struct Distortion {
    radial: Radial,
}

#[derive(Debug, Deserialize)]
struct Radial {
    k1: f64,
    k2: f64,
    k3: f64,
    k4: f64,
}

#[derive(Debug, Deserialize)]
struct Extrinsics {
    rotation: Rotation,
    translation: Translation,
}

#[derive(Debug, Deserialize)]
struct Rotation {
    r11: f64,
    r12: f64,
    r13: f64,
    r21: f64,
    r22: f64,
    r23: f64,
    r31: f64,
    r32: f64,
    r33: f64,
}

#[derive(Debug, Deserialize)]
struct Translation {
    tx: f64,
    ty: f64,
    tz: f64,
}

impl Affine {
    fn camera_matrix(&self) -> Mat33 {
        pinhole_matrix(self.fx, self.fy, self.cx, self.cy)
    }
}

impl Radial {
    fn coefficients(&self) -> [f64; 4] {
        [self.k1, self.k2, self.k3, self.k4]
    }
}

impl Rotation {
    fn matrix(&self) -> Mat33 {
        [
            [self.r11, self.r12, self.r13],
            [self.r21, self.r22, self.r23],
            [self.r31, self.r32, self.r33],
        ]
    }
}

impl Translation {
    fn vector(&self) -> Vec3 {
        [self.tx, self.ty, self.tz]
    }
}

fn distance(a: &Vec3, b: &Vec3) -> f64 {
    ((b[0] - a[0]).powi(2) + (b[1] - a[1]).powi(2) + (b[2] - a[2]).powi(2)).sqrt()
}

/// Parse a multi-camera rig JSON export into a [`CalibrationSet`].
///
/// Camera 0 is taken as the left camera and camera 1 as the right one;
/// additional cameras are ignored. The stereo baseline is the Euclidean
/// distance between the two translation vectors, in the source's units.
/// The translation vectors themselves are not part of the output.
///
/// # Arguments
///
/// * `json` - The contents of the rig calibration export.
/// * `width` - The output image width in pixels.
/// * `height` - The output image height in pixels.
pub fn parse_rig_json(json: &str, width: u32, height: u32) -> Result<CalibrationSet, RigError> {
    let rig: RigExport = serde_json::from_str(json)?;
    log::debug!("rig export contains {} cameras", rig.cameras.len());

    if rig.cameras.len() < 2 {
        return Err(RigError::MissingCamera(rig.cameras.len()));
    }
    let left = &rig.cameras[0].calibration;
    let right = &rig.cameras[1].calibration;

    let t_left = left.extrinsics.translation.vector();
    let t_right = right.extrinsics.translation.vector();

    Ok(CalibrationSet {
        left_camera_matrix: left.intrinsics.affine.camera_matrix(),
        right_camera_matrix: right.intrinsics.affine.camera_matrix(),
        left_dist_coeffs: left.intrinsics.distortion.radial.coefficients(),
        right_dist_coeffs: right.intrinsics.distortion.radial.coefficients(),
        r1: left.extrinsics.rotation.matrix(),
        r2: right.extrinsics.rotation.matrix(),
        t1: None,
        t2: None,
        baseline: distance(&t_left, &t_right),
        image_width: width,
        image_height: height,
    })
}

/// Read a rig JSON export file and convert it into a [`CalibrationSet`].
///
/// # Arguments
///
/// * `path` - The path to the rig calibration export.
/// * `width` - The output image width in pixels.
/// * `height` - The output image height in pixels.
pub fn read_rig_json(
    path: impl AsRef<Path>,
    width: u32,
    height: u32,
) -> Result<CalibrationSet, RigError> {
    let json = fs::read_to_string(path)?;
    parse_rig_json(&json, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn camera_json(fx: f64, tx: f64, ty: f64) -> String {
        format!(
            r#"{{
                "calibration": {{
                    "intrinsics": {{
                        "affine": {{ "fx": {fx}, "fy": 801.0, "cx": 512.5, "cy": 384.5 }},
                        "distortion": {{
                            "radial": {{ "k1": -0.25, "k2": 0.08, "k3": -0.01, "k4": 0.002 }}
                        }}
                    }},
                    "extrinsics": {{
                        "rotation": {{
                            "r11": 1.0, "r12": 0.0, "r13": 0.0,
                            "r21": 0.0, "r22": 1.0, "r23": 0.0,
                            "r31": 0.0, "r32": 0.0, "r33": 1.0
                        }},
                        "translation": {{ "tx": {tx}, "ty": {ty}, "tz": 0.0 }}
                    }}
                }}
            }}"#
        )
    }

    fn rig_json(cameras: &[String]) -> String {
        format!(r#"{{ "cameras": [{}] }}"#, cameras.join(","))
    }

    #[test]
    fn test_camera_matrices() -> Result<(), RigError> {
        let json = rig_json(&[camera_json(800.0, 0.0, 0.0), camera_json(805.0, 0.1, 0.0)]);
        let calib = parse_rig_json(&json, 512, 512)?;

        assert_eq!(
            calib.left_camera_matrix,
            [[800.0, 0.0, 512.5], [0.0, 801.0, 384.5], [0.0, 0.0, 1.0]]
        );
        assert_eq!(
            calib.right_camera_matrix,
            [[805.0, 0.0, 512.5], [0.0, 801.0, 384.5], [0.0, 0.0, 1.0]]
        );
        assert_eq!(calib.left_dist_coeffs, [-0.25, 0.08, -0.01, 0.002]);
        assert_eq!(calib.image_width, 512);
        assert_eq!(calib.image_height, 512);
        Ok(())
    }

    #[test]
    fn test_baseline_is_euclidean_distance() -> Result<(), RigError> {
        let json = rig_json(&[camera_json(800.0, 0.0, 0.0), camera_json(800.0, 3.0, 4.0)]);
        let calib = parse_rig_json(&json, 512, 512)?;
        assert_relative_eq!(calib.baseline, 5.0, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn test_translations_not_emitted() -> Result<(), RigError> {
        let json = rig_json(&[camera_json(800.0, 0.0, 0.0), camera_json(800.0, 0.1, 0.0)]);
        let calib = parse_rig_json(&json, 512, 512)?;
        assert!(calib.t1.is_none());
        assert!(calib.t2.is_none());
        Ok(())
    }

    #[test]
    fn test_extra_cameras_ignored() -> Result<(), RigError> {
        let json = rig_json(&[
            camera_json(800.0, 0.0, 0.0),
            camera_json(805.0, 0.1, 0.0),
            camera_json(900.0, 0.2, 0.0),
        ]);
        let calib = parse_rig_json(&json, 512, 512)?;
        assert_eq!(calib.right_camera_matrix[0][0], 805.0);
        Ok(())
    }

    #[test]
    fn test_single_camera_errors() {
        let json = rig_json(&[camera_json(800.0, 0.0, 0.0)]);
        let result = parse_rig_json(&json, 512, 512);
        assert!(matches!(result, Err(RigError::MissingCamera(1))));
    }

    #[test]
    fn test_missing_field_errors() {
        let json = r#"{ "cameras": [{ "calibration": {} }, { "calibration": {} }] }"#;
        let result = parse_rig_json(json, 512, 512);
        assert!(matches!(result, Err(RigError::JsonError(_))));
    }

    #[test]
    fn test_invalid_json_errors() {
        let result = parse_rig_json("not json", 512, 512);
        assert!(matches!(result, Err(RigError::JsonError(_))));
    }
}
