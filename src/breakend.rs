use std::fmt;

use serde::{Deserialize, Serialize};

use crate::genome_segment::GenomeSegment;

/// Orientation of a breakend
///
/// 'Forward' (+1 in the input) means the breakend extends rightward from its position, 'Reverse'
/// (-1 in the input) means it extends leftward.
///
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum BreakendOrientation {
    Forward,
    Reverse,
}

impl BreakendOrientation {
    pub fn opposite(&self) -> Self {
        match self {
            BreakendOrientation::Forward => BreakendOrientation::Reverse,
            BreakendOrientation::Reverse => BreakendOrientation::Forward,
        }
    }
}

impl TryFrom<i8> for BreakendOrientation {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(BreakendOrientation::Forward),
            -1 => Ok(BreakendOrientation::Reverse),
            _ => Err(format!("Breakend orientation must be 1 or -1, found {value}")),
        }
    }
}

impl From<BreakendOrientation> for i8 {
    fn from(value: BreakendOrientation) -> Self {
        match value {
            BreakendOrientation::Forward => 1,
            BreakendOrientation::Reverse => -1,
        }
    }
}

/// A single SV breakend
///
/// Breakends are owned by the `VariantStore` arena and refer to their SV by index.
///
#[derive(Clone)]
pub struct Breakend {
    pub id: String,

    /// Index of the owning SV in the variant store
    pub sv_index: usize,

    /// The segment range represents the confidence interval of the breakend location,
    /// [min_position, max_position+1). For a precise breakend the range has size one.
    pub segment: GenomeSegment,

    pub position: i64,
    pub orientation: BreakendOrientation,
    pub quality: f64,
    pub imprecise: bool,
    pub insert_sequence_length: i64,

    /// Ids of every assembly supporting this breakend
    pub assembly_ids: Vec<String>,
}

impl Breakend {
    pub fn min_position(&self) -> i64 {
        self.segment.range.start
    }

    pub fn max_position(&self) -> i64 {
        self.segment.range.end - 1
    }

    pub fn is_precise(&self) -> bool {
        !self.imprecise
    }
}

impl fmt::Debug for Breakend {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Breakend: {} {:?} pos: {} orientation: {:?} qual: {} imprecise: {}",
            self.id, self.segment, self.position, self.orientation, self.quality, self.imprecise
        )
    }
}

/// An SV with one breakend (single breakend) or two mated breakends
///
#[derive(Clone, Debug)]
pub struct SvData {
    pub id: String,
    pub breakend1: usize,
    pub breakend2: Option<usize>,

    /// Zero unless the SV is a duplication
    pub duplication_length: i64,
}

impl SvData {
    pub fn is_single(&self) -> bool {
        self.breakend2.is_none()
    }

    /// Indexes of every breakend in the SV
    pub fn breakends(&self) -> impl Iterator<Item = usize> + '_ {
        std::iter::once(self.breakend1).chain(self.breakend2)
    }

    /// Get the mate of `breakend_index` within this SV
    ///
    /// Panics if the SV is a single breakend or `breakend_index` is not part of the SV, either of
    /// which indicates an error in the caller's breakend graph.
    ///
    pub fn other_breakend(&self, breakend_index: usize) -> usize {
        let breakend2 = self
            .breakend2
            .unwrap_or_else(|| panic!("Requested mate of single breakend SV '{}'", self.id));
        if breakend_index == self.breakend1 {
            breakend2
        } else {
            assert_eq!(
                breakend_index, breakend2,
                "Breakend index is not part of SV '{}'",
                self.id
            );
            self.breakend1
        }
    }
}
