use std::time::Instant;

use log::info;
use simple_error::{SimpleResult, bail};

use crate::breakend_input::read_breakend_input;
use crate::cli;
use crate::link_breakends::{LinkSettings, link_all_breakends};
use crate::link_output::{write_alternate_paths, write_link_stores};
use crate::run_stats::{InputStats, LinkStats, RescueRunStats, write_run_stats};

/// Link all input breakends and write the results to the output directory
///
/// Errors are returned for inconsistent input data.
///
pub fn run_rescue(settings: &cli::Settings) -> SimpleResult<()> {
    let output_dir = settings.get_output_dir();
    cli::write_rescue_settings(output_dir, settings);

    let input = read_breakend_input(&settings.rescue.input_filename)?;
    let store = &input.store;

    let target_breakend = match &settings.rescue.target_breakend {
        Some(id) => match store.get_breakend_index(id) {
            Some(breakend_index) => {
                if store.is_single(breakend_index) {
                    bail!("Target breakend '{}' is a single breakend", id);
                }
                info!("Restricting alternate path search to breakend '{id}'");
                Some(breakend_index)
            }
            None => {
                bail!("Target breakend '{}' is not found in the input", id);
            }
        },
        None => None,
    };

    let link_settings = LinkSettings {
        thread_count: settings.shared.thread_count,
        target_breakend,
        find_dsb_links: !settings.rescue.no_dsb,
    };

    let start = Instant::now();
    let links = link_all_breakends(store, &input.excluded_breakends, &link_settings);
    let linking_time = start.elapsed();

    write_alternate_paths(output_dir, store, &links.alternate_paths);
    write_link_stores(output_dir, store, &links);

    let run_stats = RescueRunStats {
        input_stats: InputStats::new(store, input.excluded_breakends.len()),
        link_stats: LinkStats::new(&links, linking_time.as_secs_f64()),
    };
    write_run_stats(output_dir, &run_stats);

    Ok(())
}
