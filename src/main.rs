mod breakend;
mod breakend_input;
mod chrom_list;
mod cli;
mod filenames;
mod genome_segment;
mod globals;
mod int_range;
mod link;
mod link_breakends;
mod link_output;
mod link_store;
mod log_utils;
mod logger;
mod os_utils;
mod rescue;
mod run_stats;
mod variant_store;

use std::process;

use hhmmss::Hhmmss;
use log::{error, info};
use simple_error::SimpleResult;

use crate::globals::{PROGRAM_NAME, PROGRAM_VERSION};
use crate::logger::setup_output_dir_and_logger;
use crate::rescue::run_rescue;

fn run(settings: &cli::Settings) -> SimpleResult<()> {
    info!("Starting {PROGRAM_NAME} {PROGRAM_VERSION}");
    info!(
        "cmdline: {}",
        std::env::args().collect::<Vec<_>>().join(" ")
    );
    info!("Running on {} threads", settings.shared.thread_count);

    let start = std::time::Instant::now();

    run_rescue(settings)?;

    info!(
        "{PROGRAM_NAME} completed. Total Runtime: {}",
        start.elapsed().hhmmssxxx()
    );
    Ok(())
}

fn main() {
    let settings = cli::validate_and_fix_settings(cli::parse_settings());

    // Setup logger, including creation of the output directory for the log file:
    setup_output_dir_and_logger(
        settings.get_output_dir(),
        settings.shared.clobber,
        settings.shared.debug,
    );

    if let Err(err) = run(&settings) {
        error!("{err}");
        process::exit(exitcode::DATAERR);
    }
}
