use std::fmt;

/// A simple type for integer ranges
///
/// All ranges follow the bed file range convention: half-closed, [start,end)
///
/// This is used instead of the native rust Range type to focus on breakend confidence intervals
/// and the search windows derived from them.
///
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd)]
pub struct IntRange {
    pub start: i64,
    pub end: i64,
}

impl IntRange {
    pub fn from_pair(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Return true if the ranges intersect (adjacency does not count)
    ///
    pub fn intersect_range(&self, other: &IntRange) -> bool {
        other.end > self.start && other.start < self.end
    }

    /// Widen the range separately on left and right sides
    ///
    pub fn asymmetric_expand_by(&mut self, left_size: i64, right_size: i64) {
        self.start -= left_size;
        self.end += right_size;
    }

    pub fn expand_by(&mut self, size: i64) {
        self.asymmetric_expand_by(size, size);
    }
}

impl fmt::Debug for IntRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}-{})", self.start, self.end)
    }
}
