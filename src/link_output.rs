//! Json output of alternate paths and link stores
//!

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;

use camino::Utf8Path;
use log::info;
use serde::Serialize;
use unwrap::unwrap;

use crate::filenames::{ALTERNATE_PATHS_FILENAME, LINKS_FILENAME};
use crate::link::Link;
use crate::link_breakends::{AlternatePaths, BreakendLinks};
use crate::link_store::LinkStore;
use crate::variant_store::VariantStore;

/// Link with breakend indexes replaced by ids
#[derive(Serialize)]
struct LinkRecord<'a> {
    id: &'a str,
    start: &'a str,
    end: &'a str,
    min_distance: i64,
    max_distance: i64,
}

impl<'a> LinkRecord<'a> {
    fn new(store: &'a VariantStore, link: &'a Link) -> Self {
        Self {
            id: &link.id,
            start: &store.breakend(link.start).id,
            end: &store.breakend(link.end).id,
            min_distance: link.min_distance,
            max_distance: link.max_distance,
        }
    }
}

#[derive(Serialize)]
struct AlternatePathRecord<'a> {
    breakend: &'a str,

    /// Confidence range of the breakend in region format
    breakend_region: String,

    mate: &'a str,
    path: String,
    path_breakends: Vec<String>,
    links: Vec<LinkRecord<'a>>,
}

/// Link store keyed by breakend id
type LinkStoreRecord<'a> = BTreeMap<&'a str, Vec<LinkRecord<'a>>>;

#[derive(Serialize)]
struct LinkStoresRecord<'a> {
    assembly: LinkStoreRecord<'a>,
    dsb: LinkStoreRecord<'a>,
    transitive: LinkStoreRecord<'a>,
    combined: LinkStoreRecord<'a>,
}

fn get_link_store_record<'a>(
    store: &'a VariantStore,
    link_store: &'a LinkStore,
) -> LinkStoreRecord<'a> {
    link_store
        .iter()
        .map(|(breakend_index, links)| {
            (
                store.breakend(breakend_index).id.as_str(),
                links.iter().map(|x| LinkRecord::new(store, x)).collect(),
            )
        })
        .collect()
}

fn get_alternate_path_records<'a>(
    store: &'a VariantStore,
    alternate_paths: &'a AlternatePaths,
) -> Vec<AlternatePathRecord<'a>> {
    alternate_paths
        .paths
        .values()
        .map(|path| AlternatePathRecord {
            breakend: &store.breakend(path.breakend).id,
            breakend_region: store
                .breakend(path.breakend)
                .segment
                .to_region_str(&store.chrom_list),
            mate: &store.breakend(path.mate).id,
            path: path.path_string(store),
            path_breakends: path.path_vcf_ids(store),
            links: path
                .links
                .iter()
                .map(|x| LinkRecord::new(store, x))
                .collect(),
        })
        .collect()
}

fn write_json<T: Serialize>(filename: &Utf8Path, label: &str, value: &T) {
    info!("Writing {label} to file: '{filename}'");

    let f = unwrap!(
        File::create(filename),
        "Unable to create {} json file: '{}'",
        label,
        filename
    );
    unwrap!(
        serde_json::to_writer_pretty(BufWriter::new(f), value),
        "Unable to write {} json file: '{}'",
        label,
        filename
    );
}

pub fn write_alternate_paths(
    output_dir: &Utf8Path,
    store: &VariantStore,
    alternate_paths: &AlternatePaths,
) {
    let filename = output_dir.join(ALTERNATE_PATHS_FILENAME);
    let records = get_alternate_path_records(store, alternate_paths);
    write_json(&filename, "alternate paths", &records);
}

pub fn write_link_stores(output_dir: &Utf8Path, store: &VariantStore, links: &BreakendLinks) {
    let filename = output_dir.join(LINKS_FILENAME);
    let record = LinkStoresRecord {
        assembly: get_link_store_record(store, &links.assembly_links),
        dsb: get_link_store_record(store, &links.dsb_links),
        transitive: get_link_store_record(store, &links.transitive_links),
        combined: get_link_store_record(store, &links.combined_links),
    };
    write_json(&filename, "link stores", &record);
}
