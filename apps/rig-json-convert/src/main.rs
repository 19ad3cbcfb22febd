use argh::FromArgs;
use std::path::PathBuf;

use stereocalib::io::{rig, write_calibration_json};

#[derive(FromArgs)]
/// Convert a multi-camera rig JSON export to the normalized calibration schema
struct Args {
    /// path to the rig calibration export in JSON format
    #[argh(positional)]
    input_file: PathBuf,

    /// width of the calibration images
    #[argh(option, default = "512")]
    width: u32,

    /// height of the calibration images
    #[argh(option, default = "512")]
    height: u32,

    /// output calibration file; writes to stdout when omitted
    #[argh(option, short = 'o')]
    output_file: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let calibration = rig::read_rig_json(&args.input_file, args.width, args.height)?;

    match args.output_file {
        Some(path) => {
            let file = std::fs::File::create(&path)?;
            write_calibration_json(file, &calibration)?;
        }
        None => {
            let stdout = std::io::stdout();
            write_calibration_json(stdout.lock(), &calibration)?;
            println!();
        }
    }

    Ok(())
}
