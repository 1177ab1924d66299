//! Logger setup for stderr and the run log file
//!

use camino::Utf8Path;
use unwrap::unwrap;

use crate::cli;
use crate::globals::PROGRAM_NAME;
use crate::os_utils::create_dir_all;

/// Log to stderr and to a log file in `output_dir`
///
/// If debug is true set the logger to the more verbose debug level
///
fn setup_logger(output_dir: &Utf8Path, debug: bool) -> Result<(), fern::InitError> {
    let level = if debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    let log_filename = output_dir.join(PROGRAM_NAME.to_string() + ".log");
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                PROGRAM_NAME,
                record.level(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .chain(fern::log_file(log_filename)?)
        .apply()?;
    Ok(())
}

/// Check and create output directory, then setup logger to write there
///
/// An existing output directory is only reused when `clobber` is set.
///
pub fn setup_output_dir_and_logger(output_dir: &Utf8Path, clobber: bool, debug: bool) {
    // No logger is available yet, so errors follow the command-line validation pattern
    if let Err(msg) = cli::check_novel_dirname(output_dir, "Output directory") {
        if !clobber {
            eprintln!("Invalid command-line setting: {}", msg);
            std::process::exit(exitcode::USAGE);
        }
    };
    create_dir_all(output_dir, "output");
    unwrap!(
        setup_logger(output_dir, debug),
        "Unable to setup logger in output directory: '{output_dir}'"
    );
}
