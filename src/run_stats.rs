//! Track stats for the whole rescue run
//!

use std::fs::File;

use camino::Utf8Path;
use log::info;
use serde::{Deserialize, Serialize};
use unwrap::unwrap;

use crate::filenames::RUN_STATS_FILENAME;
use crate::link_breakends::BreakendLinks;
use crate::variant_store::VariantStore;

#[derive(Default, Deserialize, Serialize)]
pub struct InputStats {
    pub sv_count: usize,
    pub single_breakend_sv_count: usize,
    pub breakend_count: usize,
    pub excluded_breakend_count: usize,
}

impl InputStats {
    pub fn new(store: &VariantStore, excluded_breakend_count: usize) -> Self {
        Self {
            sv_count: store.svs().len(),
            single_breakend_sv_count: store.svs().iter().filter(|x| x.is_single()).count(),
            breakend_count: store.breakend_count(),
            excluded_breakend_count,
        }
    }
}

#[derive(Default, Deserialize, Serialize)]
pub struct LinkStats {
    /// Links are counted once per direction, so each connected breakend pair counts twice
    pub assembly_link_count: usize,
    pub dsb_link_count: usize,
    pub transitive_link_count: usize,
    pub combined_link_count: usize,

    pub alternate_path_count: usize,

    /// Breakends where the alternate path search ran without finding a path
    pub failed_path_search_count: usize,

    pub total_linking_time_secs: f64,
}

impl LinkStats {
    pub fn new(links: &BreakendLinks, total_linking_time_secs: f64) -> Self {
        Self {
            assembly_link_count: links.assembly_links.link_count(),
            dsb_link_count: links.dsb_links.link_count(),
            transitive_link_count: links.transitive_links.link_count(),
            combined_link_count: links.combined_links.link_count(),
            alternate_path_count: links.alternate_paths.paths.len(),
            failed_path_search_count: links.alternate_paths.failed.len(),
            total_linking_time_secs,
        }
    }
}

#[derive(Deserialize, Serialize)]
pub struct RescueRunStats {
    pub input_stats: InputStats,
    pub link_stats: LinkStats,
}

/// Write run_stats structure out in json format
pub fn write_run_stats(output_dir: &Utf8Path, run_stats: &RescueRunStats) {
    let filename = output_dir.join(RUN_STATS_FILENAME);

    info!("Writing run statistics to file: '{filename}'");

    let f = unwrap!(
        File::create(&filename),
        "Unable to create run statistics json file: '{filename}'"
    );

    serde_json::to_writer_pretty(&f, &run_stats).unwrap();
}
