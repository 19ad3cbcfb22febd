use argh::FromArgs;
use std::path::PathBuf;

use stereocalib::calibration::Resolution;
use stereocalib::io::{write_calibration_json, zed};

#[derive(FromArgs)]
/// Convert a ZED camera .conf calibration file to the normalized calibration schema
struct Args {
    /// path to the ZED .conf calibration file
    #[argh(positional)]
    file_path: PathBuf,

    /// capture resolution, one of 2K, FHD, HD, VGA
    #[argh(positional)]
    resolution: Resolution,

    /// output path for the calibration JSON file
    #[argh(positional)]
    output_path: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let calibration = zed::read_zed_conf(&args.file_path, args.resolution)?;

    let file = std::fs::File::create(&args.output_path)?;
    write_calibration_json(file, &calibration)?;

    println!(
        "Calibration data has been written to {}",
        args.output_path.display()
    );

    Ok(())
}
