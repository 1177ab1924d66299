use std::fmt;

use crate::chrom_list::ChromList;
pub use crate::int_range::IntRange;

/// The structure represents a contiguous region of the genome on a single chromosome
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd)]
pub struct GenomeSegment {
    /// chrom_index is defined by the order of first appearance in the breakend input
    pub chrom_index: usize,
    pub range: IntRange,
}

impl GenomeSegment {
    /// Convert to a string in 'samtools' region format (e.g. chr20:100-200)
    ///
    /// Ranges are stored with the coordinate convention of the input, so no offset is applied.
    ///
    pub fn to_region_str(&self, chrom_list: &ChromList) -> String {
        let chrom = &chrom_list.labels[self.chrom_index];
        format!("{chrom}:{}-{}", self.range.start, self.range.end - 1)
    }

    pub fn intersect(&self, other: &Self) -> bool {
        self.chrom_index == other.chrom_index && self.range.intersect_range(&other.range)
    }
}

impl fmt::Debug for GenomeSegment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Segment: {}:{:?}", self.chrom_index, self.range)
    }
}
