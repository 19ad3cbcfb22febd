use serde::Serialize;

use crate::calibration::CalibrationSet;

/// Multi-camera rig JSON export converter.
pub mod rig;

/// ZED `.conf` calibration file converter.
pub mod zed;

/// Serialize a calibration set as pretty-printed JSON with 4-space indent.
///
/// # Arguments
///
/// * `writer` - The destination to write the JSON document to.
/// * `calibration` - The calibration set to serialize.
pub fn write_calibration_json<W: std::io::Write>(
    writer: W,
    calibration: &CalibrationSet,
) -> Result<(), serde_json::Error> {
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
    calibration.serialize(&mut serializer)
}
