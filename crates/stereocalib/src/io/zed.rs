use std::{collections::HashMap, fs, path::Path};

use crate::calibration::{pinhole_matrix, CalibrationSet, Resolution, IDENTITY};
use crate::transforms::rodrigues_to_rotation_matrix;

/// Error types for the ZED `.conf` converter.
#[derive(Debug, thiserror::Error)]
pub enum ZedError {
    /// Error reading or writing file
    #[error("error reading or writing file")]
    IoError(#[from] std::io::Error),

    /// A required calibration section is missing
    #[error("section [{0}] not found in calibration file")]
    SectionNotFound(String),
}

/// Extract the `key=value` pairs of a bracket-delimited section.
///
/// The section body runs from the `[tag]` line to the next blank line (or
/// end of input). Lines whose value is not a numeric literal are skipped.
/// Returns `None` when the section header is absent.
fn section_values(conf: &str, tag: &str) -> Option<HashMap<String, f64>> {
    let header = format!("[{}]", tag);
    let mut lines = conf.lines();
    loop {
        match lines.next() {
            Some(line) if line.trim() == header => break,
            Some(_) => continue,
            None => return None,
        }
    }

    let mut values = HashMap::new();
    for line in lines {
        if line.trim().is_empty() {
            break;
        }
        if let Some((key, value)) = line.split_once('=') {
            if let Ok(value) = value.trim().parse::<f64>() {
                values.insert(key.trim().to_string(), value);
            }
        }
    }
    Some(values)
}

fn value_or_zero(values: &HashMap<String, f64>, key: &str) -> f64 {
    values.get(key).copied().unwrap_or(0.0)
}

fn camera_parameters(values: &HashMap<String, f64>) -> ([[f64; 3]; 3], [f64; 4]) {
    let matrix = pinhole_matrix(
        value_or_zero(values, "fx"),
        value_or_zero(values, "fy"),
        value_or_zero(values, "cx"),
        value_or_zero(values, "cy"),
    );
    let dist_coeffs = [
        value_or_zero(values, "k1"),
        value_or_zero(values, "k2"),
        value_or_zero(values, "k3"),
        value_or_zero(values, "k4"),
    ];
    (matrix, dist_coeffs)
}

/// Parse ZED `.conf` calibration contents into a [`CalibrationSet`].
///
/// The left camera defines the reference frame: `R1` is the identity and
/// `T1` the zero vector. `R2` comes from the Rodrigues vector stored in the
/// `[STEREO]` section under `RX_<res>`, `CV_<res>` and `RZ_<res>` (the
/// vertical component really is keyed `CV_`, not `RY_`, in this format).
/// `T2` is `[Baseline, TY, TZ]` converted from millimeters to meters, while
/// the top-level `baseline` field keeps the file's native units.
///
/// Missing scalar keys default to 0.0; a missing section is an error.
///
/// # Arguments
///
/// * `conf` - The contents of the `.conf` calibration file.
/// * `resolution` - The capture resolution selecting the camera sections.
pub fn parse_zed_conf(conf: &str, resolution: Resolution) -> Result<CalibrationSet, ZedError> {
    let left_tag = format!("LEFT_CAM_{}", resolution);
    let right_tag = format!("RIGHT_CAM_{}", resolution);

    let left = section_values(conf, &left_tag).ok_or(ZedError::SectionNotFound(left_tag))?;
    let right = section_values(conf, &right_tag).ok_or(ZedError::SectionNotFound(right_tag))?;
    let stereo = section_values(conf, "STEREO")
        .ok_or_else(|| ZedError::SectionNotFound("STEREO".to_string()))?;
    log::debug!(
        "parsed {} left, {} right and {} stereo parameters",
        left.len(),
        right.len(),
        stereo.len()
    );

    let (left_camera_matrix, left_dist_coeffs) = camera_parameters(&left);
    let (right_camera_matrix, right_dist_coeffs) = camera_parameters(&right);

    let rvec = [
        value_or_zero(&stereo, &format!("RX_{}", resolution)),
        value_or_zero(&stereo, &format!("CV_{}", resolution)),
        value_or_zero(&stereo, &format!("RZ_{}", resolution)),
    ];

    let baseline = value_or_zero(&stereo, "Baseline");
    let (image_width, image_height) = resolution.image_size();

    Ok(CalibrationSet {
        left_camera_matrix,
        right_camera_matrix,
        left_dist_coeffs,
        right_dist_coeffs,
        r1: IDENTITY,
        r2: rodrigues_to_rotation_matrix(&rvec),
        t1: Some([0.0, 0.0, 0.0]),
        t2: Some([
            baseline / 1000.0,
            value_or_zero(&stereo, "TY") / 1000.0,
            value_or_zero(&stereo, "TZ") / 1000.0,
        ]),
        baseline,
        image_width,
        image_height,
    })
}

/// Read a ZED `.conf` calibration file and convert it into a [`CalibrationSet`].
///
/// # Arguments
///
/// * `path` - The path to the `.conf` calibration file.
/// * `resolution` - The capture resolution selecting the camera sections.
pub fn read_zed_conf(
    path: impl AsRef<Path>,
    resolution: Resolution,
) -> Result<CalibrationSet, ZedError> {
    let conf = fs::read_to_string(path)?;
    parse_zed_conf(&conf, resolution)
}
