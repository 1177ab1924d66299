use std::collections::BTreeSet;

use log::debug;

use crate::link_store::LinkStore;
use crate::variant_store::VariantStore;

/// Max distance between the confidence ranges of two breakends paired as a double-strand break
pub const MAX_DSB_DISTANCE: i64 = 30;

/// Max position distance searched when checking that a double-strand break pairing is unique
pub const MAX_DSB_SEEK_DISTANCE: i64 = 1000;

/// Finds pairs of close, opposite-orientation breakends which can be explained as the two sides
/// of a double-strand break
///
/// Each breakend joins at most one such pair.
///
pub struct DsbLinkFinder<'a> {
    store: &'a VariantStore,
    assembly_links: &'a LinkStore,
    excluded_breakends: &'a BTreeSet<usize>,
    dsb_links: LinkStore,

    /// Counter used to generate the id of each new double-strand break link
    dsb_counter: usize,
}

impl<'a> DsbLinkFinder<'a> {
    pub fn new(
        store: &'a VariantStore,
        assembly_links: &'a LinkStore,
        excluded_breakends: &'a BTreeSet<usize>,
    ) -> Self {
        Self {
            store,
            assembly_links,
            excluded_breakends,
            dsb_links: LinkStore::default(),
            dsb_counter: 1,
        }
    }

    /// Find double-strand break links for all breakends in the store
    ///
    /// Breakends are visited in SV order. Breakends in `excluded_breakends` neither start nor
    /// join a pairing.
    ///
    pub fn find_breaks(
        store: &VariantStore,
        assembly_links: &LinkStore,
        excluded_breakends: &BTreeSet<usize>,
    ) -> LinkStore {
        let mut finder = DsbLinkFinder::new(store, assembly_links, excluded_breakends);
        for sv in store.svs() {
            for breakend_index in sv.breakends() {
                finder.find_breakend_dsb(breakend_index);
            }
        }

        debug!(
            "Found {} double-strand break links",
            finder.dsb_links.link_count() / 2
        );
        finder.dsb_links
    }

    /// Get breakends near `breakend_index` which are still eligible to pair with it
    fn get_candidates(&self, breakend_index: usize) -> Vec<usize> {
        let paired_orientation = self.store.breakend(breakend_index).orientation.opposite();
        self.store
            .select_others_nearby(breakend_index, MAX_DSB_DISTANCE, MAX_DSB_SEEK_DISTANCE)
            .into_iter()
            .filter(|&x| {
                self.store.breakend(x).orientation == paired_orientation
                    && !self.excluded_breakends.contains(&x)
                    && !self.dsb_links.contains_breakend(x)
            })
            .collect()
    }

    fn find_breakend_dsb(&mut self, breakend_index: usize) {
        if self.dsb_links.contains_breakend(breakend_index)
            || self.excluded_breakends.contains(&breakend_index)
        {
            return;
        }

        let candidates = self.get_candidates(breakend_index);
        if candidates.len() != 1 {
            return;
        }
        let other_index = candidates[0];

        // The pairing must be unique from the other side as well
        let other_candidates = self.get_candidates(other_index);
        if other_candidates != [breakend_index] {
            return;
        }

        if self.assembly_links.are_linked(breakend_index, other_index) {
            return;
        }

        let link_id = format!("dsb{}", self.dsb_counter);
        self.dsb_counter += 1;
        self.dsb_links
            .add_links(self.store, &link_id, breakend_index, other_index, true);
    }
}
