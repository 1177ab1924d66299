//! Read SV breakends from json input and build the variant store
//!

use std::collections::{BTreeSet, HashSet};
use std::fs::File;
use std::io::{BufReader, Read};

use camino::Utf8Path;
use flate2::read::MultiGzDecoder;
use log::info;
use serde::Deserialize;
use simple_error::{SimpleResult, bail, try_with};

use crate::breakend::{Breakend, BreakendOrientation, SvData};
use crate::chrom_list::ChromList;
use crate::genome_segment::{GenomeSegment, IntRange};
use crate::variant_store::VariantStore;

#[derive(Deserialize)]
struct BreakendRecord {
    id: String,
    chrom: String,
    pos: i64,
    orientation: BreakendOrientation,
    qual: f64,

    #[serde(default)]
    imprecise: bool,

    /// Confidence interval offsets relative to pos
    #[serde(default)]
    ci: (i64, i64),

    #[serde(default)]
    insert_sequence_length: i64,

    #[serde(default)]
    assembly_ids: Vec<String>,
}

#[derive(Deserialize)]
struct SvRecord {
    id: String,

    #[serde(default)]
    duplication_length: i64,

    breakends: Vec<BreakendRecord>,
}

#[derive(Deserialize)]
pub struct BreakendInput {
    svs: Vec<SvRecord>,

    /// Ids of breakends which can't take part in double-strand break links
    #[serde(default)]
    excluded_breakends: Vec<String>,
}

pub struct RescueInput {
    pub store: VariantStore,
    pub excluded_breakends: BTreeSet<usize>,
}

fn convert_breakend(
    record: BreakendRecord,
    sv_index: usize,
    chrom_list: &mut ChromList,
) -> SimpleResult<Breakend> {
    let (ci_start, ci_end) = record.ci;
    if ci_start > 0 || ci_end < 0 {
        bail!(
            "Breakend '{}' has invalid confidence interval [{},{}]",
            record.id,
            ci_start,
            ci_end
        );
    }
    if record.insert_sequence_length < 0 {
        bail!(
            "Breakend '{}' has negative insert sequence length",
            record.id
        );
    }

    let chrom_index = chrom_list.get_or_insert(&record.chrom);
    Ok(Breakend {
        id: record.id,
        sv_index,
        segment: GenomeSegment {
            chrom_index,
            range: IntRange::from_pair(record.pos + ci_start, record.pos + ci_end + 1),
        },
        position: record.pos,
        orientation: record.orientation,
        quality: record.qual,
        imprecise: record.imprecise,
        insert_sequence_length: record.insert_sequence_length,
        assembly_ids: record.assembly_ids,
    })
}

/// Convert parsed input into the variant store, checking that all ids are consistent
///
pub fn build_rescue_input(input: BreakendInput) -> SimpleResult<RescueInput> {
    let mut chrom_list = ChromList::default();
    let mut breakends = Vec::new();
    let mut svs = Vec::new();
    let mut sv_ids = HashSet::new();
    let mut breakend_ids = HashSet::new();

    for (sv_index, sv) in input.svs.into_iter().enumerate() {
        if !sv_ids.insert(sv.id.clone()) {
            bail!("Duplicate SV id '{}'", sv.id);
        }
        let breakend_count = sv.breakends.len();
        if !(1..=2).contains(&breakend_count) {
            bail!(
                "SV '{}' has {} breakends, each SV must have 1 or 2",
                sv.id,
                breakend_count
            );
        }
        if sv.duplication_length < 0 {
            bail!("SV '{}' has negative duplication length", sv.id);
        }

        let mut sv_breakends = Vec::new();
        for record in sv.breakends {
            if !breakend_ids.insert(record.id.clone()) {
                bail!("Duplicate breakend id '{}'", record.id);
            }
            sv_breakends.push(breakends.len());
            breakends.push(convert_breakend(record, sv_index, &mut chrom_list)?);
        }

        svs.push(SvData {
            id: sv.id,
            breakend1: sv_breakends[0],
            breakend2: sv_breakends.get(1).copied(),
            duplication_length: sv.duplication_length,
        });
    }

    let store = VariantStore::new(chrom_list, breakends, svs);

    let mut excluded_breakends = BTreeSet::new();
    for id in input.excluded_breakends.iter() {
        match store.get_breakend_index(id) {
            Some(breakend_index) => {
                excluded_breakends.insert(breakend_index);
            }
            None => {
                bail!("Excluded breakend id '{}' is not found in the input", id);
            }
        }
    }

    Ok(RescueInput {
        store,
        excluded_breakends,
    })
}

/// Read breakend input from a json file, which may be gzip-compressed
///
pub fn read_breakend_input(filename: &Utf8Path) -> SimpleResult<RescueInput> {
    info!("Reading breakend input from file: '{filename}'");

    let file = try_with!(
        File::open(filename),
        "Unable to open breakend input file: '{}'",
        filename
    );
    let reader: Box<dyn Read> = if filename.extension() == Some("gz") {
        Box::new(MultiGzDecoder::new(file))
    } else {
        Box::new(file)
    };
    let input: BreakendInput = try_with!(
        serde_json::from_reader(BufReader::new(reader)),
        "Unable to parse breakend input from json file: '{}'",
        filename
    );

    let rescue_input = build_rescue_input(input)?;
    info!(
        "Read {} SVs with {} breakends on {} chromosomes",
        rescue_input.store.svs().len(),
        rescue_input.store.breakend_count(),
        rescue_input.store.chrom_list.len()
    );
    Ok(rescue_input)
}
