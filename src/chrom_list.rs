use std::collections::HashMap;

/// Chromosome labels observed in the breakend input, indexed in order of first appearance
///
#[derive(Default)]
pub struct ChromList {
    pub labels: Vec<String>,
    pub label_to_index: HashMap<String, usize>,
}

impl ChromList {
    /// Return the index of the chromosome label, adding it to the list if it is novel
    ///
    pub fn get_or_insert(&mut self, label: &str) -> usize {
        if let Some(&chrom_index) = self.label_to_index.get(label) {
            return chrom_index;
        }
        let chrom_index = self.labels.len();
        self.labels.push(label.to_string());
        self.label_to_index.insert(label.to_string(), chrom_index);
        chrom_index
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }
}
