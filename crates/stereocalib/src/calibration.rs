use serde::{Deserialize, Serialize};

/// A 3x3 matrix stored in row-major order.
pub type Mat33 = [[f64; 3]; 3];

/// A 3-element vector.
pub type Vec3 = [f64; 3];

/// The 3x3 identity matrix.
pub const IDENTITY: Mat33 = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

/// Build a pinhole camera matrix from focal lengths and principal point.
///
/// # Arguments
///
/// * `fx`, `fy` - The focal lengths in pixels.
/// * `cx`, `cy` - The principal point in pixels.
///
/// # Returns
///
/// The 3x3 camera matrix `[[fx, 0, cx], [0, fy, cy], [0, 0, 1]]`.
pub fn pinhole_matrix(fx: f64, fy: f64, cx: f64, cy: f64) -> Mat33 {
    [[fx, 0.0, cx], [0.0, fy, cy], [0.0, 0.0, 1.0]]
}

/// Normalized stereo calibration produced by every converter.
///
/// Serializes to the JSON schema consumed by downstream stereo pipelines.
/// The translation vectors `T1`/`T2` are only emitted by converters that
/// know them; they are skipped in the JSON output when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationSet {
    /// Left camera pinhole matrix.
    #[serde(rename = "leftCameraMatrix")]
    pub left_camera_matrix: Mat33,
    /// Right camera pinhole matrix.
    #[serde(rename = "rightCameraMatrix")]
    pub right_camera_matrix: Mat33,
    /// Left camera radial distortion coefficients k1..k4.
    #[serde(rename = "leftDistCoeffs")]
    pub left_dist_coeffs: [f64; 4],
    /// Right camera radial distortion coefficients k1..k4.
    #[serde(rename = "rightDistCoeffs")]
    pub right_dist_coeffs: [f64; 4],
    /// Rotation of the left camera relative to the reference frame.
    #[serde(rename = "R1")]
    pub r1: Mat33,
    /// Rotation of the right camera relative to the reference frame.
    #[serde(rename = "R2")]
    pub r2: Mat33,
    /// Translation of the left camera, when the source format provides it.
    #[serde(rename = "T1", default, skip_serializing_if = "Option::is_none")]
    pub t1: Option<Vec3>,
    /// Translation of the right camera, when the source format provides it.
    #[serde(rename = "T2", default, skip_serializing_if = "Option::is_none")]
    pub t2: Option<Vec3>,
    /// Distance between the two optical centers.
    pub baseline: f64,
    /// Output image width in pixels.
    #[serde(rename = "imageWidth")]
    pub image_width: u32,
    /// Output image height in pixels.
    #[serde(rename = "imageHeight")]
    pub image_height: u32,
}

/// Capture resolutions supported by the ZED `.conf` calibration format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// 2208x1242
    TwoK,
    /// 1920x1080
    Fhd,
    /// 1280x720
    Hd,
    /// 672x376
    Vga,
}

impl Resolution {
    /// The image size `(width, height)` associated with this resolution.
    pub fn image_size(&self) -> (u32, u32) {
        match self {
            Resolution::TwoK => (2208, 1242),
            Resolution::Fhd => (1920, 1080),
            Resolution::Hd => (1280, 720),
            Resolution::Vga => (672, 376),
        }
    }

    /// The tag used to suffix section names and stereo keys in `.conf` files.
    pub fn tag(&self) -> &'static str {
        match self {
            Resolution::TwoK => "2K",
            Resolution::Fhd => "FHD",
            Resolution::Hd => "HD",
            Resolution::Vga => "VGA",
        }
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

impl std::str::FromStr for Resolution {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "2K" => Ok(Resolution::TwoK),
            "FHD" => Ok(Resolution::Fhd),
            "HD" => Ok(Resolution::Hd),
            "VGA" => Ok(Resolution::Vga),
            _ => Err(format!(
                "unsupported resolution '{}', expected one of 2K, FHD, HD, VGA",
                s
            )),
        }
    }
}
