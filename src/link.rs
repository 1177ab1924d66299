use std::fmt;

use crate::variant_store::VariantStore;

/// Reserved link id connecting the two breakends of the same SV
pub const PAIR_LINK_ID: &str = "PAIR";

/// Prefix shared by every link id generated during the transitive link search
pub const TRANSITIVE_LINK_ID_PREFIX: &str = "trs";

/// Edge between two breakends
///
/// The distance range is computed once on construction. A link is undirected with respect to
/// distance, but endpoint order matters for path assembly: a path is a list of links where each
/// link's `end` breakend leads to the next link's `start` breakend.
///
#[derive(Clone, Eq, PartialEq)]
pub struct Link {
    pub id: String,
    pub start: usize,
    pub end: usize,
    pub min_distance: i64,
    pub max_distance: i64,
}

impl Link {
    /// Create the link between `breakend_index` and its mate
    ///
    /// Panics if `breakend_index` is a single breakend.
    ///
    pub fn from_sv(store: &VariantStore, breakend_index: usize) -> Self {
        let breakend = store.breakend(breakend_index);
        let sv = store.get_sv(breakend_index);
        let distance = sv.duplication_length + breakend.insert_sequence_length;
        Self {
            id: PAIR_LINK_ID.to_string(),
            start: breakend_index,
            end: sv.other_breakend(breakend_index),
            min_distance: distance,
            max_distance: distance,
        }
    }

    /// Create a link between two arbitrary breakends
    ///
    /// For two breakends of the same SV the SV pairing distance is used, otherwise the distance
    /// range spans the two differences between the breakends' position bounds.
    ///
    pub fn new(store: &VariantStore, id: &str, start: usize, end: usize) -> Self {
        if store.same_sv(start, end) {
            let mut link = Self::from_sv(store, start);
            link.id = id.to_string();
            return link;
        }

        let be1 = store.breakend(start);
        let be2 = store.breakend(end);
        let d1 = (be1.max_position() - be2.min_position()).abs();
        let d2 = (be1.min_position() - be2.max_position()).abs();
        Self {
            id: id.to_string(),
            start,
            end,
            min_distance: std::cmp::min(d1, d2),
            max_distance: std::cmp::max(d1, d2),
        }
    }

    /// Same link with endpoints swapped
    pub fn reverse(&self) -> Self {
        Self {
            id: self.id.clone(),
            start: self.end,
            end: self.start,
            min_distance: self.min_distance,
            max_distance: self.max_distance,
        }
    }

    pub fn is_pair(&self) -> bool {
        self.id == PAIR_LINK_ID
    }

    pub fn is_transitive(&self) -> bool {
        self.id.starts_with(TRANSITIVE_LINK_ID_PREFIX)
    }
}

impl fmt::Debug for Link {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Link: {} {}->{} distance: [{},{}]",
            self.id, self.start, self.end, self.min_distance, self.max_distance
        )
    }
}

/// Reverse a link chain end-to-end
///
/// The order of the links is inverted and each link is individually reversed, so the result
/// describes the same path walked from the opposite end.
///
pub fn reverse_link_chain(links: &[Link]) -> Vec<Link> {
    links.iter().rev().map(|x| x.reverse()).collect()
}
