//! Arena of all input breakends, with a positional index for proximity queries
//!

use std::collections::HashMap;

use bio::data_structures::interval_tree::IntervalTree;

use crate::breakend::{Breakend, SvData};
use crate::chrom_list::ChromList;

/// Owns every breakend and SV in the analysis
///
/// Breakends and SVs reference each other by index into the `breakends` and `svs` vectors, so
/// mate lookups are constant time without shared ownership.
///
pub struct VariantStore {
    pub chrom_list: ChromList,
    breakends: Vec<Breakend>,
    svs: Vec<SvData>,
    breakend_id_to_index: HashMap<String, usize>,

    /// One interval tree per chromosome, mapping each breakend's confidence range to its index
    position_index: Vec<IntervalTree<i64, usize>>,
}

impl VariantStore {
    /// Build the store and its positional index
    ///
    /// The caller is responsible for the referential integrity of the breakend/SV graph: every
    /// breakend's sv_index must point to an SV which lists it, and each SV's breakend indexes
    /// must point back to it.
    ///
    pub fn new(chrom_list: ChromList, breakends: Vec<Breakend>, svs: Vec<SvData>) -> Self {
        let mut position_index = (0..chrom_list.len())
            .map(|_| IntervalTree::new())
            .collect::<Vec<_>>();
        let mut breakend_id_to_index = HashMap::new();
        for (breakend_index, breakend) in breakends.iter().enumerate() {
            let range = &breakend.segment.range;
            position_index[breakend.segment.chrom_index]
                .insert(range.start..range.end, breakend_index);
            breakend_id_to_index.insert(breakend.id.clone(), breakend_index);
        }

        Self {
            chrom_list,
            breakends,
            svs,
            breakend_id_to_index,
            position_index,
        }
    }

    pub fn breakend(&self, breakend_index: usize) -> &Breakend {
        &self.breakends[breakend_index]
    }

    pub fn svs(&self) -> &[SvData] {
        &self.svs
    }

    pub fn breakend_count(&self) -> usize {
        self.breakends.len()
    }

    pub fn get_breakend_index(&self, id: &str) -> Option<usize> {
        self.breakend_id_to_index.get(id).copied()
    }

    pub fn get_sv(&self, breakend_index: usize) -> &SvData {
        &self.svs[self.breakends[breakend_index].sv_index]
    }

    pub fn is_single(&self, breakend_index: usize) -> bool {
        self.get_sv(breakend_index).is_single()
    }

    /// Index of the mate breakend
    ///
    /// Panics for a single breakend.
    ///
    pub fn mate(&self, breakend_index: usize) -> usize {
        self.get_sv(breakend_index).other_breakend(breakend_index)
    }

    pub fn same_sv(&self, breakend_index1: usize, breakend_index2: usize) -> bool {
        self.breakends[breakend_index1].sv_index == self.breakends[breakend_index2].sv_index
    }

    /// Find all other breakends close to the query breakend
    ///
    /// A breakend is returned if its confidence range intersects the query breakend's confidence
    /// range expanded by `additional_distance` on each side, and its position is no more than
    /// `seek_distance` from the query breakend's position.
    ///
    /// Results are sorted by (position, breakend index) so that downstream tie-breaking is
    /// reproducible.
    ///
    pub fn select_others_nearby(
        &self,
        breakend_index: usize,
        additional_distance: i64,
        seek_distance: i64,
    ) -> Vec<usize> {
        let breakend = &self.breakends[breakend_index];
        let mut window = breakend.segment.range.clone();
        window.expand_by(additional_distance);

        let mut nearby = self.position_index[breakend.segment.chrom_index]
            .find(window.start..window.end)
            .map(|x| *x.data())
            .filter(|&x| {
                x != breakend_index
                    && (self.breakends[x].position - breakend.position).abs() <= seek_distance
            })
            .collect::<Vec<_>>();
        nearby.sort_by_key(|&x| (self.breakends[x].position, x));
        nearby
    }
}
