use std::collections::BTreeMap;

use crate::link::Link;
use crate::variant_store::VariantStore;

/// Index from each breakend to the links incident on it
///
/// Links for each breakend are kept in insertion order. Each link is stored with the keyed
/// breakend as its `start`, so a link between two breakends indexed from both sides is stored
/// once in each direction.
///
#[derive(Clone, Default)]
pub struct LinkStore {
    breakend_links: BTreeMap<usize, Vec<Link>>,
}

impl LinkStore {
    pub fn add_link(&mut self, breakend_index: usize, link: Link) {
        self.breakend_links
            .entry(breakend_index)
            .or_default()
            .push(link);
    }

    /// Add a link from breakend `start` to `end`, and its reverse from `end` to `start`
    ///
    /// If `allow_duplicates` is false, nothing is added when `start` already has a link to `end`.
    ///
    pub fn add_links(
        &mut self,
        store: &VariantStore,
        id: &str,
        start: usize,
        end: usize,
        allow_duplicates: bool,
    ) {
        if !allow_duplicates && self.are_linked(start, end) {
            return;
        }
        let link = Link::new(store, id, start, end);
        let reverse_link = link.reverse();
        self.add_link(start, link);
        self.add_link(end, reverse_link);
    }

    /// All links incident on the breakend, empty if there are none
    pub fn get_breakend_links(&self, breakend_index: usize) -> &[Link] {
        self.breakend_links
            .get(&breakend_index)
            .map(|x| x.as_slice())
            .unwrap_or(&[])
    }

    pub fn contains_breakend(&self, breakend_index: usize) -> bool {
        self.breakend_links.contains_key(&breakend_index)
    }

    /// True if `start` has any link ending at `end`
    pub fn are_linked(&self, start: usize, end: usize) -> bool {
        self.get_breakend_links(start).iter().any(|x| x.end == end)
    }

    pub fn breakend_count(&self) -> usize {
        self.breakend_links.len()
    }

    pub fn link_count(&self) -> usize {
        self.breakend_links.values().map(|x| x.len()).sum()
    }

    /// Iterate over (breakend index, links) in breakend index order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[Link])> {
        self.breakend_links
            .iter()
            .map(|(&breakend_index, links)| (breakend_index, links.as_slice()))
    }

    /// Union of two stores
    ///
    /// For breakends present in both stores, the links from `store1` come first.
    ///
    pub fn merge(store1: &LinkStore, store2: &LinkStore) -> LinkStore {
        let mut merged = store1.clone();
        for (&breakend_index, links) in store2.breakend_links.iter() {
            merged
                .breakend_links
                .entry(breakend_index)
                .or_default()
                .extend(links.iter().cloned());
        }
        merged
    }
}
