use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use const_format::concatcp;
use serde::{Deserialize, Serialize};
use simple_error::SimpleResult;

use super::utils::check_required_filename;

#[derive(Args, Default, Deserialize, Serialize)]
pub struct RescueSettings {
    /// Directory for all output (must not already exist)
    #[arg(long, value_name = "DIR", default_value = concatcp!(env!("CARGO_PKG_NAME"), "_output"))]
    pub output_dir: Utf8PathBuf,

    /// SV breakends in json format, optionally gzip-compressed
    #[arg(long = "input", value_name = "FILE")]
    pub input_filename: Utf8PathBuf,

    /// Only search for the alternate path of this breakend id
    ///
    /// The search trace for the breakend is printed to stderr. This is intended for debugging only.
    ///
    #[arg(hide = true, long = "target-breakend", value_name = "ID")]
    pub target_breakend: Option<String>,

    /// Skip double-strand break linking
    #[arg(hide = true, long)]
    pub no_dsb: bool,
}

pub fn validate_and_fix_rescue_settings(settings: RescueSettings) -> SimpleResult<RescueSettings> {
    check_required_filename(settings.input_filename.as_str(), "breakend input")?;
    Ok(settings)
}

/// Write settings out in json format
pub fn write_rescue_settings<T: Serialize>(output_dir: &Utf8Path, settings: &T) {
    use crate::filenames::SETTINGS_FILENAME;
    use log::info;
    use unwrap::unwrap;

    let filename = output_dir.join(SETTINGS_FILENAME);

    info!("Writing settings to file: '{filename}'");

    let f = unwrap!(
        std::fs::File::create(&filename),
        "Unable to create settings json file: '{filename}'"
    );

    serde_json::to_writer_pretty(&f, settings).unwrap();
}
