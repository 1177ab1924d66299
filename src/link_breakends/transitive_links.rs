//! Search for chains of links connecting an alternative to a breakend's mate
//!

use std::collections::VecDeque;

use strum::EnumCount;

use crate::breakend::{Breakend, BreakendOrientation};
use crate::genome_segment::GenomeSegment;
use crate::link::{Link, TRANSITIVE_LINK_ID_PREFIX};
use crate::link_store::LinkStore;
use crate::log_utils::debug_msg;
use crate::variant_store::VariantStore;

pub const MAX_ASSEMBLY_JUMPS: usize = 5;
pub const MAX_TRANSITIVE_JUMPS: usize = 2;

/// The search is disabled when the analysis contains more breakends than this
pub const MAX_VARIANTS: usize = 500_000;

pub const MAX_ALTERNATIVES: usize = 25;
pub const MAX_ALTERNATIVES_SEEK_DISTANCE: i64 = 1000;
pub const MAX_ALTERNATIVES_ADDITIONAL_DISTANCE: i64 = MAX_ALTERNATIVES_SEEK_DISTANCE;

pub const MIN_TRANSITIVE_DISTANCE: i64 = 30;
pub const MAX_TRANSITIVE_SEEK_DISTANCE: i64 = 2000;
pub const MAX_TRANSITIVE_ADDITIONAL_DISTANCE: i64 = 1000;

const DEFAULT_ALTERNATIVE_ALLOWANCE: i64 = 1;

/// A partial path in the transitive link search
///
/// The path starts from an alternative to the search breakend (`origin`) and currently ends at
/// `frontier`. The path's distance range is the sum of the distance ranges of its links.
///
#[derive(Clone, Debug)]
pub struct TransitiveLink {
    /// Id prefix for transitive links created from this path
    prefix: String,

    pub origin: usize,
    pub frontier: usize,
    pub links: Vec<Link>,
    pub remaining_assembly_jumps: usize,
    pub remaining_transitive_jumps: usize,
    pub min_distance: i64,
    pub max_distance: i64,
}

impl TransitiveLink {
    /// Start a path at `alternative`, with its SV pairing as the first link
    fn seed(store: &VariantStore, prefix: &str, alternative: usize) -> Self {
        let link = Link::from_sv(store, alternative);
        Self {
            prefix: prefix.to_string(),
            origin: alternative,
            frontier: link.end,
            min_distance: link.min_distance,
            max_distance: link.max_distance,
            links: vec![link],
            remaining_assembly_jumps: MAX_ASSEMBLY_JUMPS,
            remaining_transitive_jumps: MAX_TRANSITIVE_JUMPS,
        }
    }

    /// New path extending this one by `new_links`, with the frontier moved to the end of the
    /// last new link
    fn extend(&self, new_links: [Link; 2]) -> Self {
        let mut next = self.clone();
        for link in new_links {
            next.min_distance += link.min_distance;
            next.max_distance += link.max_distance;
            next.frontier = link.end;
            next.links.push(link);
        }
        next
    }

    fn decrement_assembly_jumps(&mut self) {
        self.remaining_assembly_jumps = self.remaining_assembly_jumps.saturating_sub(1);
    }

    fn decrement_transitive_jumps(&mut self) {
        self.remaining_transitive_jumps = self.remaining_transitive_jumps.saturating_sub(1);
    }

    /// Id for a transitive link leaving this path's frontier, tagged with the transitive depth
    fn next_transitive_link_id(&self) -> String {
        format!(
            "{}{}",
            self.prefix,
            MAX_TRANSITIVE_JUMPS - self.remaining_transitive_jumps
        )
    }
}

/// Work queues of the search
///
#[derive(Clone, Copy, Debug, strum::EnumCount)]
enum SearchQueue {
    /// Paths whose next expansion may follow assembly links. These are always processed first.
    AssemblyFrontier,

    /// Paths ending in a proximity-only transitive link
    TransitiveFrontier,

    /// Paths from the transitive frontier which reached the target
    Matched,
}

struct SearchState {
    queues: [VecDeque<TransitiveLink>; SearchQueue::COUNT],
}

impl SearchState {
    fn new() -> Self {
        Self {
            queues: std::array::from_fn(|_| VecDeque::new()),
        }
    }

    fn push(&mut self, queue: SearchQueue, node: TransitiveLink) {
        self.queues[queue as usize].push_back(node);
    }

    fn pop(&mut self, queue: SearchQueue) -> Option<TransitiveLink> {
        self.queues[queue as usize].pop_front()
    }

    fn len(&self, queue: SearchQueue) -> usize {
        self.queues[queue as usize].len()
    }
}

/// Window used to compare breakend locations, extended by the inserted sequence length on the
/// side the breakend extends toward
fn get_alternative_window(breakend: &Breakend) -> GenomeSegment {
    let mut segment = breakend.segment.clone();
    let insert_len = breakend.insert_sequence_length;
    match breakend.orientation {
        BreakendOrientation::Forward => segment.range.asymmetric_expand_by(0, insert_len),
        BreakendOrientation::Reverse => segment.range.asymmetric_expand_by(insert_len, 0),
    }
    segment
}

/// Return true if `other` is interchangeable with `target` for the purpose of the path search
///
/// Requires that the two breakends are from different SVs, share the same orientation, and
/// that their windows overlap after `target`'s window is widened by `allowance` on each side.
///
pub fn is_alternative(store: &VariantStore, target: usize, other: usize, allowance: i64) -> bool {
    if store.same_sv(target, other) {
        return false;
    }
    let target_breakend = store.breakend(target);
    let other_breakend = store.breakend(other);
    if target_breakend.orientation != other_breakend.orientation {
        return false;
    }
    let mut target_window = get_alternative_window(target_breakend);
    target_window.range.expand_by(allowance);
    target_window.intersect(&get_alternative_window(other_breakend))
}

/// Return true if `candidate` is far enough from `frontier`, on the side away from the
/// frontier's orientation, to continue the path through a transitive link
fn are_candidate_link(frontier: &Breakend, candidate: &Breakend) -> bool {
    match frontier.orientation {
        BreakendOrientation::Forward => {
            candidate.max_position() <= frontier.min_position() - MIN_TRANSITIVE_DISTANCE
        }
        BreakendOrientation::Reverse => {
            candidate.min_position() >= frontier.max_position() + MIN_TRANSITIVE_DISTANCE
        }
    }
}

/// Finds a chain of assembly and transitive links connecting a breakend to its mate
///
pub struct TransitiveLinkFinder<'a> {
    store: &'a VariantStore,
    assembly_links: &'a LinkStore,

    /// The search is disabled when the store contains more breakends than this
    max_variants: usize,
}

impl<'a> TransitiveLinkFinder<'a> {
    pub fn new(store: &'a VariantStore, assembly_links: &'a LinkStore) -> Self {
        Self {
            store,
            assembly_links,
            max_variants: MAX_VARIANTS,
        }
    }

    /// Find alternatives to `breakend_index`, in descending quality order
    ///
    /// Alternatives of equal quality stay in the order they were found. Returns no alternatives
    /// if there are too many, or if the analysis is too large to search.
    ///
    fn select_alternatives(&self, breakend_index: usize) -> Vec<usize> {
        if self.store.breakend_count() > self.max_variants {
            return Vec::new();
        }

        let mut alternatives: Vec<usize> = Vec::new();
        for candidate in self.store.select_others_nearby(
            breakend_index,
            MAX_ALTERNATIVES_ADDITIONAL_DISTANCE,
            MAX_ALTERNATIVES_SEEK_DISTANCE,
        ) {
            let candidate_breakend = self.store.breakend(candidate);
            if !candidate_breakend.is_precise()
                || self.store.is_single(candidate)
                || !is_alternative(
                    self.store,
                    breakend_index,
                    candidate,
                    DEFAULT_ALTERNATIVE_ALLOWANCE,
                )
            {
                continue;
            }
            let insert_index = alternatives
                .iter()
                .position(|&x| self.store.breakend(x).quality < candidate_breakend.quality)
                .unwrap_or(alternatives.len());
            alternatives.insert(insert_index, candidate);
        }

        if alternatives.len() > MAX_ALTERNATIVES {
            return Vec::new();
        }
        alternatives
    }

    /// Return true if the path ends at a breakend equivalent to `target`
    ///
    /// For a precise target, the path's distance range must also include the target's expected
    /// distance to its mate.
    ///
    fn matches_target(&self, node: &TransitiveLink, target: usize) -> bool {
        if !is_alternative(
            self.store,
            target,
            node.frontier,
            DEFAULT_ALTERNATIVE_ALLOWANCE,
        ) {
            return false;
        }
        let target_breakend = self.store.breakend(target);
        if !target_breakend.is_precise() {
            return true;
        }
        let target_distance = target_breakend.insert_sequence_length
            + self.store.get_sv(target).duplication_length;
        node.min_distance <= target_distance && target_distance <= node.max_distance
    }

    /// Extend the path through each assembly link of the frontier breakend
    ///
    /// Links are followed in descending quality order of the breakend they lead to.
    ///
    fn create_assembly_nodes(&self, node: &TransitiveLink) -> Vec<TransitiveLink> {
        if node.remaining_assembly_jumps == 0 {
            return Vec::new();
        }

        let mut links = self
            .assembly_links
            .get_breakend_links(node.frontier)
            .iter()
            .filter(|&x| !node.links.contains(x))
            .collect::<Vec<_>>();
        links.sort_by(|a, b| {
            let qa = self.store.breakend(a.end).quality;
            let qb = self.store.breakend(b.end).quality;
            qb.total_cmp(&qa)
        });

        let mut nodes = Vec::new();
        for link in links {
            let paired = link.end;
            if self.store.is_single(paired) || !self.store.breakend(paired).is_precise() {
                continue;
            }
            let mut next = node.extend([link.clone(), Link::from_sv(self.store, paired)]);
            next.decrement_assembly_jumps();
            nodes.push(next);
        }
        nodes
    }

    /// Extend the path through transitive links to nearby breakends
    ///
    /// Not applied when the frontier breakend has any assembly links.
    ///
    fn create_transitive_nodes(&self, node: &TransitiveLink) -> Vec<TransitiveLink> {
        if node.remaining_transitive_jumps == 0
            || self.assembly_links.contains_breakend(node.frontier)
        {
            return Vec::new();
        }

        let frontier = self.store.breakend(node.frontier);
        let link_id = node.next_transitive_link_id();
        let mut nodes = Vec::new();
        for candidate in self.store.select_others_nearby(
            node.frontier,
            MAX_TRANSITIVE_ADDITIONAL_DISTANCE,
            MAX_TRANSITIVE_SEEK_DISTANCE,
        ) {
            let candidate_breakend = self.store.breakend(candidate);
            if !candidate_breakend.is_precise()
                || self.store.is_single(candidate)
                || candidate_breakend.orientation == frontier.orientation
                || !are_candidate_link(frontier, candidate_breakend)
            {
                continue;
            }
            let transitive_link = Link::new(self.store, &link_id, node.frontier, candidate);
            let mut next = node.extend([transitive_link, Link::from_sv(self.store, candidate)]);
            next.decrement_transitive_jumps();
            nodes.push(next);
        }
        nodes
    }

    /// Search for a link chain from an alternative of `breakend_index` to a breakend equivalent
    /// to its mate
    ///
    /// Returns an empty chain if no unambiguous path is found.
    ///
    /// Assembly-backed paths are searched breadth first and the first one reaching the target is
    /// returned. Paths ending in transitive links are only explored once no assembly-backed paths
    /// remain, and the search is abandoned as ambiguous whenever more than one such path is
    /// pending.
    ///
    /// Panics if `breakend_index` is a single breakend.
    ///
    pub fn find_transitive_links(&self, breakend_index: usize, debug: bool) -> Vec<Link> {
        let target = self.store.mate(breakend_index);
        let breakend_id = &self.store.breakend(breakend_index).id;

        let alternatives = self.select_alternatives(breakend_index);
        debug_msg!(
            debug,
            "Breakend {breakend_id}: {} alternatives",
            alternatives.len()
        );
        if alternatives.is_empty() {
            return Vec::new();
        }

        let prefix = format!("{TRANSITIVE_LINK_ID_PREFIX}_{breakend_id}_");
        let mut state = SearchState::new();
        for alternative in alternatives {
            state.push(
                SearchQueue::AssemblyFrontier,
                TransitiveLink::seed(self.store, &prefix, alternative),
            );
        }
        self.run_search(state, target, breakend_id, debug)
    }

    /// Process the search queues until a path to `target` is resolved or the search fails
    fn run_search(
        &self,
        mut state: SearchState,
        target: usize,
        breakend_id: &str,
        debug: bool,
    ) -> Vec<Link> {
        loop {
            if state.len(SearchQueue::TransitiveFrontier) > 1 {
                debug_msg!(
                    debug,
                    "Breakend {breakend_id}: abandoning search with multiple transitive paths"
                );
                return Vec::new();
            }

            let node = if let Some(node) = state.pop(SearchQueue::AssemblyFrontier) {
                if self.matches_target(&node, target) {
                    debug_msg!(
                        debug,
                        "Breakend {breakend_id}: found assembly path from alternative {}: {:?}",
                        self.store.breakend(node.origin).id,
                        node.links
                    );
                    return node.links;
                }
                node
            } else if let Some(node) = state.pop(SearchQueue::TransitiveFrontier) {
                if self.matches_target(&node, target) {
                    state.push(SearchQueue::Matched, node);
                    continue;
                }
                node
            } else {
                break;
            };

            for next in self.create_assembly_nodes(&node) {
                state.push(SearchQueue::AssemblyFrontier, next);
            }
            for next in self.create_transitive_nodes(&node) {
                state.push(SearchQueue::TransitiveFrontier, next);
            }
        }

        let matched_count = state.len(SearchQueue::Matched);
        match state.pop(SearchQueue::Matched) {
            Some(node) if matched_count == 1 => {
                debug_msg!(
                    debug,
                    "Breakend {breakend_id}: found transitive path from alternative {}: {:?}",
                    self.store.breakend(node.origin).id,
                    node.links
                );
                node.links
            }
            _ => {
                debug_msg!(
                    debug,
                    "Breakend {breakend_id}: {matched_count} matching transitive paths"
                );
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link_breakends::assembly_links::build_assembly_links;
    use crate::variant_store::test_utils::*;

    fn get_path_ids(store: &VariantStore, links: &[Link]) -> Vec<String> {
        let mut ids = Vec::new();
        if let Some(first) = links.first() {
            ids.push(store.breakend(first.start).id.clone());
        }
        ids.extend(links.iter().map(|x| store.breakend(x.end).id.clone()));
        ids
    }

    /// bnd1/bnd2 can be explained by alternative bnd3/bnd4 followed by two assembly jumps
    fn get_assembly_path_store(target_insert_len: i64) -> VariantStore {
        TestStoreBuilder::default()
            .sv(
                bnd("bnd1", 1000, 1, 50.0).ins(target_insert_len),
                bnd("bnd2", 5000, -1, 50.0).ins(target_insert_len),
            )
            .sv(
                bnd("bnd3", 1005, 1, 80.0),
                bnd("bnd4", 4000, -1, 50.0).asm(&["asm1"]),
            )
            .sv(
                bnd("bnd5", 4100, 1, 50.0).asm(&["asm1"]),
                bnd("bnd6", 4300, -1, 50.0).asm(&["asm2"]),
            )
            .sv(
                bnd("bnd7", 4350, 1, 50.0).asm(&["asm2"]),
                bnd("bnd8", 4995, -1, 50.0),
            )
            .build()
    }

    #[test]
    fn test_is_alternative() {
        let store = TestStoreBuilder::default()
            .sv(bnd("a1", 1000, 1, 50.0), bnd("a2", 1001, -1, 50.0))
            .sv(bnd("b1", 1001, 1, 50.0), bnd("b2", 5000, -1, 50.0))
            .sv(bnd("c1", 1002, 1, 50.0), bnd("c2", 900, -1, 50.0).ins(100))
            .sv(bnd("d1", 1050, 1, 50.0).ins(100), bnd("d2", 7000, -1, 50.0))
            .sv(bnd("e1", 850, -1, 50.0), bnd("e2", 950, -1, 50.0))
            .build();
        let a1 = idx(&store, "a1");

        assert!(is_alternative(&store, a1, idx(&store, "b1"), 1));
        assert!(!is_alternative(&store, a1, idx(&store, "c1"), 1));
        assert!(is_alternative(&store, a1, idx(&store, "c1"), 2));

        // Same SV or different orientation is never an alternative:
        assert!(!is_alternative(&store, a1, idx(&store, "a2"), 1));
        assert!(!is_alternative(&store, a1, idx(&store, "c2"), 1));

        // Insert sequence widens the window only toward the breakend orientation:
        let d1 = idx(&store, "d1");
        assert!(!is_alternative(&store, d1, a1, 1));
        assert!(is_alternative(&store, a1, d1, 50));
        let c2 = idx(&store, "c2");
        assert!(is_alternative(&store, c2, idx(&store, "e1"), 1));
        assert!(!is_alternative(&store, c2, idx(&store, "e2"), 1));
    }

    #[test]
    fn test_select_alternatives() {
        let store = TestStoreBuilder::default()
            .sv(bnd("a1", 1000, 1, 50.0), bnd("a2", 5000, -1, 50.0))
            .sv(bnd("b1", 999, 1, 20.0), bnd("b2", 6000, -1, 50.0))
            .sv(bnd("c1", 1001, 1, 40.0), bnd("c2", 6000, -1, 50.0))
            .sv(bnd("d1", 1000, 1, 40.0), bnd("d2", 6000, -1, 50.0))
            .sv(
                bnd("e1", 1000, 1, 90.0).imprecise((0, 0)),
                bnd("e2", 6000, -1, 50.0),
            )
            .sv(bnd("f1", 1000, -1, 90.0), bnd("f2", 6000, -1, 50.0))
            .single(bnd("s1", 1000, 1, 90.0))
            .build();
        let finder_links = LinkStore::default();
        let finder = TransitiveLinkFinder::new(&store, &finder_links);

        // Nearby results are in position order (b1, d1, c1), so the equal quality d1 and c1
        // alternatives keep that order:
        let alternatives = finder.select_alternatives(idx(&store, "a1"));
        assert_eq!(
            alternatives,
            vec![idx(&store, "d1"), idx(&store, "c1"), idx(&store, "b1")]
        );
    }

    #[test]
    fn test_too_many_alternatives() {
        const IDS: [&str; 52] = [
            "x0", "y0", "x1", "y1", "x2", "y2", "x3", "y3", "x4", "y4", "x5", "y5", "x6", "y6",
            "x7", "y7", "x8", "y8", "x9", "y9", "x10", "y10", "x11", "y11", "x12", "y12", "x13",
            "y13", "x14", "y14", "x15", "y15", "x16", "y16", "x17", "y17", "x18", "y18", "x19",
            "y19", "x20", "y20", "x21", "y21", "x22", "y22", "x23", "y23", "x24", "y24", "x25",
            "y25",
        ];
        let build = |alternative_count: usize| {
            let mut builder = TestStoreBuilder::default()
                .sv(bnd("a1", 1000, 1, 50.0), bnd("a2", 5000, -1, 50.0));
            for i in 0..alternative_count {
                builder = builder.sv(
                    bnd(IDS[2 * i], 1000, 1, 50.0),
                    bnd(IDS[2 * i + 1], 5000, -1, 50.0),
                );
            }
            builder.build()
        };

        let store = build(MAX_ALTERNATIVES);
        let links = LinkStore::default();
        let finder = TransitiveLinkFinder::new(&store, &links);
        assert_eq!(
            finder.select_alternatives(idx(&store, "a1")).len(),
            MAX_ALTERNATIVES
        );

        let store = build(MAX_ALTERNATIVES + 1);
        let finder = TransitiveLinkFinder::new(&store, &links);
        assert!(finder.select_alternatives(idx(&store, "a1")).is_empty());
        assert!(finder.find_transitive_links(idx(&store, "a1"), false).is_empty());
    }

    #[test]
    fn test_max_variants() {
        let store = get_assembly_path_store(150);
        let assembly_links = build_assembly_links(&store);
        let mut finder = TransitiveLinkFinder::new(&store, &assembly_links);
        assert_eq!(finder.max_variants, MAX_VARIANTS);

        finder.max_variants = store.breakend_count() - 1;
        assert!(finder.select_alternatives(idx(&store, "bnd1")).is_empty());
        assert!(
            finder
                .find_transitive_links(idx(&store, "bnd1"), false)
                .is_empty()
        );

        finder.max_variants = store.breakend_count();
        assert_eq!(finder.find_transitive_links(idx(&store, "bnd1"), false).len(), 5);
    }

    #[test]
    fn test_assembly_path() {
        let store = get_assembly_path_store(150);
        let assembly_links = build_assembly_links(&store);
        let finder = TransitiveLinkFinder::new(&store, &assembly_links);

        let links = finder.find_transitive_links(idx(&store, "bnd1"), false);
        assert_eq!(
            get_path_ids(&store, &links),
            vec!["bnd3", "bnd4", "bnd5", "bnd6", "bnd7", "bnd8"]
        );
        let link_ids = links.iter().map(|x| x.id.as_str()).collect::<Vec<_>>();
        assert_eq!(link_ids, vec!["PAIR", "asm1-1", "PAIR", "asm2-1", "PAIR"]);

        // Each link's end leads to the next link's start
        for (l1, l2) in links.iter().zip(links.iter().skip(1)) {
            assert_eq!(l1.end, l2.start);
        }
    }

    #[test]
    fn test_path_distance_must_match_target() {
        for (target_insert_len, expected) in [(149, false), (150, true), (151, false)] {
            let store = get_assembly_path_store(target_insert_len);
            let assembly_links = build_assembly_links(&store);
            let finder = TransitiveLinkFinder::new(&store, &assembly_links);
            let links = finder.find_transitive_links(idx(&store, "bnd1"), false);
            assert_eq!(!links.is_empty(), expected);
        }
    }

    /// bnd4 has assembly partners bnd5 and bnd7, and either one leads to the target
    fn get_two_partner_store(bnd5_qual: f64, bnd7_qual: f64) -> VariantStore {
        TestStoreBuilder::default()
            .sv(
                bnd("bnd1", 1000, 1, 50.0).ins(100),
                bnd("bnd2", 5000, -1, 50.0).ins(100),
            )
            .sv(
                bnd("bnd3", 1005, 1, 80.0),
                bnd("bnd4", 4000, -1, 50.0).asm(&["asm1"]),
            )
            .sv(
                bnd("bnd5", 4100, 1, bnd5_qual).asm(&["asm1"]),
                bnd("bnd6", 4995, -1, 50.0),
            )
            .sv(
                bnd("bnd7", 4100, 1, bnd7_qual).asm(&["asm1"]),
                bnd("bnd8", 4995, -1, 50.0),
            )
            .build()
    }

    #[test]
    fn test_assembly_partner_quality_order() {
        let store = get_two_partner_store(10.0, 90.0);
        let assembly_links = build_assembly_links(&store);
        let finder = TransitiveLinkFinder::new(&store, &assembly_links);
        let seed = TransitiveLink::seed(&store, "trs_bnd1_", idx(&store, "bnd3"));
        let frontiers = finder
            .create_assembly_nodes(&seed)
            .iter()
            .map(|x| x.frontier)
            .collect::<Vec<_>>();
        assert_eq!(frontiers, vec![idx(&store, "bnd8"), idx(&store, "bnd6")]);

        // The higher quality partner is searched first, so its path wins
        let links = finder.find_transitive_links(idx(&store, "bnd1"), false);
        assert_eq!(
            get_path_ids(&store, &links),
            vec!["bnd3", "bnd4", "bnd7", "bnd8"]
        );
        assert_eq!(links[1].id, "asm1-2");
    }

    #[test]
    fn test_equal_quality_assembly_partners_keep_link_order() {
        let store = get_two_partner_store(50.0, 50.0);
        let assembly_links = build_assembly_links(&store);
        let finder = TransitiveLinkFinder::new(&store, &assembly_links);
        let seed = TransitiveLink::seed(&store, "trs_bnd1_", idx(&store, "bnd3"));
        let frontiers = finder
            .create_assembly_nodes(&seed)
            .iter()
            .map(|x| x.frontier)
            .collect::<Vec<_>>();
        assert_eq!(frontiers, vec![idx(&store, "bnd6"), idx(&store, "bnd8")]);

        let links = finder.find_transitive_links(idx(&store, "bnd1"), false);
        assert_eq!(
            get_path_ids(&store, &links),
            vec!["bnd3", "bnd4", "bnd5", "bnd6"]
        );
        assert_eq!(links[1].id, "asm1-1");
    }

    #[test]
    fn test_imprecise_target_ignores_distance() {
        let store = TestStoreBuilder::default()
            .sv(
                bnd("bnd1", 1000, 1, 50.0).ins(400),
                bnd("bnd2", 5000, -1, 50.0).imprecise((0, 0)).ins(400),
            )
            .sv(
                bnd("bnd3", 1005, 1, 80.0),
                bnd("bnd4", 4000, -1, 50.0).asm(&["asm1"]),
            )
            .sv(
                bnd("bnd5", 4100, 1, 50.0).asm(&["asm1"]),
                bnd("bnd6", 4995, -1, 50.0),
            )
            .build();
        let assembly_links = build_assembly_links(&store);
        let finder = TransitiveLinkFinder::new(&store, &assembly_links);
        let links = finder.find_transitive_links(idx(&store, "bnd1"), false);
        assert_eq!(
            get_path_ids(&store, &links),
            vec!["bnd3", "bnd4", "bnd5", "bnd6"]
        );
    }

    #[test]
    fn test_matching_alternative_sv() {
        // An SV duplicating the breakend pair is a one-link path
        let store = TestStoreBuilder::default()
            .sv(bnd("bnd1", 1000, 1, 50.0), bnd("bnd2", 5000, -1, 50.0))
            .sv(bnd("bnd3", 1001, 1, 80.0), bnd("bnd4", 5001, -1, 50.0))
            .build();
        let assembly_links = build_assembly_links(&store);
        let finder = TransitiveLinkFinder::new(&store, &assembly_links);
        let links = finder.find_transitive_links(idx(&store, "bnd1"), false);
        assert_eq!(links.len(), 1);
        assert!(links[0].is_pair());
        assert_eq!(links[0].start, idx(&store, "bnd3"));
    }

    /// bnd1/bnd2 can be explained by alternative bnd3/bnd4 followed by a 500 base transitive
    /// link to bnd5/bnd6
    fn get_transitive_builder(target_insert_len: i64) -> TestStoreBuilder {
        TestStoreBuilder::default()
            .sv(
                bnd("bnd1", 1000, 1, 50.0).ins(target_insert_len),
                bnd("bnd2", 5000, -1, 50.0).ins(target_insert_len),
            )
            .sv(bnd("bnd3", 1001, 1, 80.0), bnd("bnd4", 3000, -1, 50.0))
            .sv(bnd("bnd5", 3500, 1, 50.0), bnd("bnd6", 5001, -1, 50.0))
    }

    #[test]
    fn test_transitive_path() {
        let store = get_transitive_builder(500).build();
        let assembly_links = build_assembly_links(&store);
        let finder = TransitiveLinkFinder::new(&store, &assembly_links);
        let links = finder.find_transitive_links(idx(&store, "bnd1"), false);
        assert_eq!(
            get_path_ids(&store, &links),
            vec!["bnd3", "bnd4", "bnd5", "bnd6"]
        );
        assert_eq!(links[1].id, "trs_bnd1_0");
        assert!(links[1].is_transitive());
        assert_eq!((links[1].min_distance, links[1].max_distance), (500, 500));
    }

    #[test]
    fn test_transitive_path_distance_must_match_target() {
        for (target_insert_len, expected) in [(499, false), (500, true), (501, false)] {
            let store = get_transitive_builder(target_insert_len).build();
            let assembly_links = build_assembly_links(&store);
            let finder = TransitiveLinkFinder::new(&store, &assembly_links);
            let links = finder.find_transitive_links(idx(&store, "bnd1"), false);
            assert_eq!(!links.is_empty(), expected);
        }
    }

    #[test]
    fn test_later_matching_transitive_path_is_ambiguous() {
        let store = get_transitive_builder(500).build();
        let assembly_links = build_assembly_links(&store);
        let finder = TransitiveLinkFinder::new(&store, &assembly_links);
        let target = idx(&store, "bnd2");

        let seed = TransitiveLink::seed(&store, "trs_bnd1_", idx(&store, "bnd3"));
        let transitive_nodes = finder.create_transitive_nodes(&seed);
        assert_eq!(transitive_nodes.len(), 1);
        let matched = transitive_nodes[0].clone();
        assert!(finder.matches_target(&matched, target));

        // A single matched path is returned once the frontiers are empty
        let mut state = SearchState::new();
        state.push(SearchQueue::Matched, matched.clone());
        let links = finder.run_search(state, target, "bnd1", false);
        assert_eq!(
            get_path_ids(&store, &links),
            vec!["bnd3", "bnd4", "bnd5", "bnd6"]
        );

        // A transitive path expanded after the first match also matches, so neither is used
        let mut state = SearchState::new();
        state.push(SearchQueue::Matched, matched);
        state.push(SearchQueue::AssemblyFrontier, seed);
        assert!(finder.run_search(state, target, "bnd1", false).is_empty());
    }

    #[test]
    fn test_multiple_transitive_paths_are_ambiguous() {
        let store = get_transitive_builder(500)
            .sv(bnd("bnd7", 3600, 1, 50.0), bnd("bnd8", 5000, -1, 50.0))
            .build();
        let assembly_links = build_assembly_links(&store);
        let finder = TransitiveLinkFinder::new(&store, &assembly_links);
        assert!(
            finder
                .find_transitive_links(idx(&store, "bnd1"), false)
                .is_empty()
        );
    }

    #[test]
    fn test_transitive_candidate_too_close() {
        let store = TestStoreBuilder::default()
            .sv(
                bnd("bnd1", 1000, 1, 50.0).ins(20),
                bnd("bnd2", 5000, -1, 50.0).ins(20),
            )
            .sv(bnd("bnd3", 1001, 1, 80.0), bnd("bnd4", 4980, -1, 50.0))
            .sv(bnd("bnd5", 5000 - 1, 1, 50.0), bnd("bnd6", 5001, -1, 50.0))
            .build();
        let assembly_links = build_assembly_links(&store);
        let finder = TransitiveLinkFinder::new(&store, &assembly_links);
        assert!(
            finder
                .find_transitive_links(idx(&store, "bnd1"), false)
                .is_empty()
        );
    }

    #[test]
    fn test_assembly_links_suppress_transitive_nodes() {
        let store = get_transitive_builder(500)
            .sv(
                bnd("bnd9", 8000, 1, 50.0)
                    .imprecise((-10, 10))
                    .asm(&["asm9"]),
                bnd("bnd10", 9000, -1, 50.0),
            )
            .build();

        // Without assembly support bnd4 has one transitive successor:
        let assembly_links = build_assembly_links(&store);
        let finder = TransitiveLinkFinder::new(&store, &assembly_links);
        let seed = TransitiveLink::seed(&store, "trs_bnd1_", idx(&store, "bnd3"));
        assert_eq!(finder.create_transitive_nodes(&seed).len(), 1);

        // Any assembly link on the frontier blocks transitive expansion:
        let mut assembly_links = LinkStore::default();
        assembly_links.add_links(
            &store,
            "asm9-1",
            idx(&store, "bnd4"),
            idx(&store, "bnd9"),
            true,
        );
        let finder = TransitiveLinkFinder::new(&store, &assembly_links);
        assert!(finder.create_transitive_nodes(&seed).is_empty());

        // The only assembly successor is imprecise, so the search fails:
        assert!(finder.create_assembly_nodes(&seed).is_empty());
        assert!(
            finder
                .find_transitive_links(idx(&store, "bnd1"), false)
                .is_empty()
        );
    }

    #[test]
    fn test_jump_budgets() {
        let store = get_assembly_path_store(150);
        let assembly_links = build_assembly_links(&store);
        let finder = TransitiveLinkFinder::new(&store, &assembly_links);

        let seed = TransitiveLink::seed(&store, "trs_bnd1_", idx(&store, "bnd3"));
        assert_eq!(seed.remaining_assembly_jumps, MAX_ASSEMBLY_JUMPS);
        assert_eq!(seed.remaining_transitive_jumps, MAX_TRANSITIVE_JUMPS);

        let next = finder.create_assembly_nodes(&seed);
        assert_eq!(next.len(), 1);
        assert_eq!(next[0].remaining_assembly_jumps, MAX_ASSEMBLY_JUMPS - 1);
        assert_eq!(next[0].remaining_transitive_jumps, MAX_TRANSITIVE_JUMPS);
        assert_eq!(next[0].frontier, idx(&store, "bnd6"));
        assert_eq!((next[0].min_distance, next[0].max_distance), (100, 100));

        let mut exhausted = seed.clone();
        exhausted.remaining_assembly_jumps = 0;
        assert!(finder.create_assembly_nodes(&exhausted).is_empty());
        exhausted.decrement_assembly_jumps();
        exhausted.remaining_transitive_jumps = 0;
        exhausted.decrement_transitive_jumps();
        assert_eq!(exhausted.remaining_assembly_jumps, 0);
        assert_eq!(exhausted.remaining_transitive_jumps, 0);
        assert!(finder.create_transitive_nodes(&exhausted).is_empty());
    }

    #[test]
    fn test_transitive_link_id_depth() {
        let store = get_transitive_builder(500).build();
        let mut node = TransitiveLink::seed(&store, "trs_bnd1_", idx(&store, "bnd3"));
        assert_eq!(node.next_transitive_link_id(), "trs_bnd1_0");
        node.decrement_transitive_jumps();
        assert_eq!(node.next_transitive_link_id(), "trs_bnd1_1");
    }

    #[test]
    #[should_panic]
    fn test_single_breakend_search_panics() {
        let store = TestStoreBuilder::default()
            .single(bnd("s1", 1000, 1, 50.0))
            .build();
        let links = LinkStore::default();
        TransitiveLinkFinder::new(&store, &links).find_transitive_links(0, false);
    }
}
