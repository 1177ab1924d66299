mod rescue;
mod shared;
mod utils;

use camino::Utf8Path;
use chrono::Datelike;
use clap::Parser;
use serde::Serialize;
use simple_error::{SimpleResult, bail};

use self::rescue::validate_and_fix_rescue_settings;
pub use self::rescue::{RescueSettings, write_rescue_settings};
use self::shared::validate_and_fix_shared_settings;
pub use self::shared::SharedSettings;

#[derive(Parser, Serialize)]
#[command(
    author,
    version,
    about,
    after_help = format!("Copyright (C) 2004-{}     Pacific Biosciences of California, Inc.
This program comes with ABSOLUTELY NO WARRANTY; it is intended for
Research Use Only and not for use in diagnostic procedures.", chrono::Utc::now().year()),
    help_template = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}"
)]
#[clap(rename_all = "kebab_case")]
pub struct Settings {
    #[command(flatten)]
    pub shared: SharedSettings,

    #[command(flatten)]
    pub rescue: RescueSettings,
}

impl Settings {
    pub fn get_output_dir(&self) -> &Utf8Path {
        &self.rescue.output_dir
    }
}

/// Checks if a directory does not exist
///
pub fn check_novel_dirname(dirname: &Utf8Path, label: &str) -> SimpleResult<()> {
    if dirname.exists() {
        bail!("{} already exists: \"{}\"", label, dirname);
    }
    Ok(())
}

/// Validate settings and update parameters that can't be processed by clap
///
fn validate_and_fix_settings_impl(mut settings: Settings) -> SimpleResult<Settings> {
    settings.shared = validate_and_fix_shared_settings(settings.shared)?;
    settings.rescue = validate_and_fix_rescue_settings(settings.rescue)?;
    Ok(settings)
}

/// Validate settings and update to parameters that can't be processed automatically by clap.
///
pub fn validate_and_fix_settings(settings: Settings) -> Settings {
    match validate_and_fix_settings_impl(settings) {
        Ok(x) => x,
        Err(msg) => {
            eprintln!("Invalid command-line setting: {}", msg);
            std::process::exit(exitcode::USAGE);
        }
    }
}

pub fn parse_settings() -> Settings {
    Settings::parse()
}
