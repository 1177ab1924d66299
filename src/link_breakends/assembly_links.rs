use std::collections::BTreeMap;

use itertools::Itertools;
use log::debug;

use crate::link_store::LinkStore;
use crate::variant_store::VariantStore;

/// Link every pair of breakends from different SVs which share an assembly
///
/// Single breakends are not linked. A breakend carrying several assembly ids joins the group of
/// each one, and groups are processed in assembly id order so that link ids are reproducible.
///
/// Link ids follow the pattern "<assembly_id>-<n>", where n counts links within the assembly
/// starting from 1.
///
pub fn build_assembly_links(store: &VariantStore) -> LinkStore {
    let mut assembly_breakends: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for sv in store.svs().iter().filter(|x| !x.is_single()) {
        for breakend_index in sv.breakends() {
            for assembly_id in store.breakend(breakend_index).assembly_ids.iter() {
                assembly_breakends
                    .entry(assembly_id.as_str())
                    .or_default()
                    .push(breakend_index);
            }
        }
    }

    let mut assembly_links = LinkStore::default();
    for (assembly_id, breakends) in assembly_breakends.iter() {
        if breakends.len() < 2 {
            continue;
        }

        // The SV pairing already connects breakends of the same SV
        let mut link_counter = 1;
        for (&breakend1, &breakend2) in breakends.iter().tuple_combinations() {
            if store.same_sv(breakend1, breakend2) {
                continue;
            }
            let link_id = format!("{assembly_id}-{link_counter}");
            link_counter += 1;
            assembly_links.add_links(store, &link_id, breakend1, breakend2, true);
        }
    }

    debug!(
        "Found {} assembly links over {} breakends",
        assembly_links.link_count() / 2,
        assembly_links.breakend_count()
    );
    assembly_links
}
