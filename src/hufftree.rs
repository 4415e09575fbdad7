use std::cmp::Ordering;
use std::fmt;

use crate::bit_vec::Bits;
use crate::code_table::CodeTable;
use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::min_heap::MinHeap;

#[derive(Debug, Clone)]
pub struct HuffmanTree {
    pub root: HuffNode,
}

impl HuffmanTree {
    /// Run Huffman's algorithm over `frequencies`.
    ///
    /// An empty table has no root and fails with `EmptyQueueAccess`; callers
    /// that accept empty input check for it first. Counts whose total does
    /// not fit in a `u64` fail with `WeightOverflow`.
    pub fn from_frequencies(frequencies: &FrequencyTable) -> Result<Self> {
        // every internal weight is bounded by the root's, i.e. the total
        frequencies.checked_total().ok_or(HuffmanError::WeightOverflow)?;

        let leaves: Vec<HuffNode> = frequencies.iter()
            .map(|(symbol, count)| HuffNode::new(symbol, count))
            .collect();

        HuffmanTree::build_from_heap(MinHeap::build(leaves))
    }

    fn build_from_heap(mut heap: MinHeap<HuffNode>) -> Result<Self> {
        while heap.len() > 1 {
            let x = heap.extract_min()?;
            let y = heap.extract_min()?;

            heap.insert(HuffNode::merge(x, y))?;
        }
        let root = heap.extract_min()?;

        Ok(HuffmanTree { root })
    }

    pub fn code_table(&self) -> CodeTable {
        CodeTable::from_tree(self)
    }

    /// Total weight, i.e. the number of symbols the tree was built from.
    pub fn weight(&self) -> u64 {
        self.root.weight()
    }

    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    fn fmt_node(f: &mut fmt::Formatter<'_>, node: &HuffNode, depth: usize, label: &str) -> fmt::Result {
        let indent = "  ".repeat(depth);
        match node {
            HuffNode::Leaf { symbol, weight } => {
                writeln!(f, "{}{}-> Leaf: {:?} ({}) [weight: {}]",
                        indent, label, *symbol as char, symbol, weight)
            },
            HuffNode::Internal { weight, left, right } => {
                writeln!(f, "{}{}-> Internal [weight: {}]", indent, label, weight)?;
                Self::fmt_node(f, left, depth + 1, "0")?;
                Self::fmt_node(f, right, depth + 1, "1")
            }
        }
    }
}

impl fmt::Display for HuffmanTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Self::fmt_node(f, &self.root, 0, "root")
    }
}

#[derive(Debug, Clone)]
pub enum HuffNode {
    Leaf {
        weight: u64,
        symbol: u8,
    },
    Internal {
        weight: u64,
        left: Box<HuffNode>,
        right: Box<HuffNode>,
    }
}

impl HuffNode {
    pub fn new(symbol: u8, weight: u64) -> Self {
        HuffNode::Leaf { weight, symbol }
    }

    pub fn weight(&self) -> u64 {
        match self {
            HuffNode::Leaf { weight, .. } => *weight,
            HuffNode::Internal { weight, .. } => *weight,
        }
    }

    /// Join two subtrees; `a` becomes the left (0) branch. The combined
    /// weight saturates at `u64::MAX`.
    pub fn merge(a: Self, b: Self) -> Self {
        let weight = a.weight().saturating_add(b.weight());
        HuffNode::Internal {
            weight,
            left: Box::new(a),
            right: Box::new(b),
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            HuffNode::Leaf { .. } => 1,
            HuffNode::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    /// Preorder walk recording the root-to-leaf path of every symbol.
    pub(crate) fn collect_codes(&self, prefix: &mut Bits, visit: &mut impl FnMut(u8, &Bits)) {
        match self {
            HuffNode::Leaf { symbol, .. } => visit(*symbol, prefix),
            HuffNode::Internal { left, right, .. } => {
                prefix.push(false);
                left.collect_codes(prefix, visit);
                prefix.pop();

                prefix.push(true);
                right.collect_codes(prefix, visit);
                prefix.pop();
            }
        }
    }
}

impl PartialEq for HuffNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HuffNode {}

impl PartialOrd for HuffNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HuffNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // equal weights: leaves before internal nodes, leaves by symbol
        self.weight().cmp(&other.weight()).then_with(|| match (self, other) {
            (HuffNode::Leaf { symbol: a, .. }, HuffNode::Leaf { symbol: b, .. }) => a.cmp(b),
            (HuffNode::Leaf { .. }, HuffNode::Internal { .. }) => Ordering::Less,
            (HuffNode::Internal { .. }, HuffNode::Leaf { .. }) => Ordering::Greater,
            (HuffNode::Internal { .. }, HuffNode::Internal { .. }) => Ordering::Equal,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn textbook() -> FrequencyTable {
        FrequencyTable::from_counts([
            (b'a', 5), (b'b', 9), (b'c', 12), (b'd', 13), (b'e', 16), (b'f', 45),
        ])
    }

    #[test]
    fn root_weight_is_total() {
        let tree = HuffmanTree::from_frequencies(&textbook()).unwrap();
        assert_eq!(tree.weight(), 100);
        assert_eq!(tree.leaf_count(), 6);
    }

    #[test]
    fn textbook_shape() {
        let tree = HuffmanTree::from_frequencies(&textbook()).unwrap();
        // f (45) is merged last, against the 55 subtree
        match &tree.root {
            HuffNode::Internal { left, right, .. } => {
                assert!(matches!(**left, HuffNode::Leaf { symbol: b'f', weight: 45 }));
                assert_eq!(right.weight(), 55);
            }
            leaf => panic!("expected an internal root, got {:?}", leaf),
        }
    }

    #[test]
    fn single_symbol_tree_is_a_leaf() {
        let tree = HuffmanTree::from_frequencies(&FrequencyTable::from_bytes(b"zzzz")).unwrap();
        assert!(matches!(tree.root, HuffNode::Leaf { symbol: b'z', weight: 4 }));
    }

    #[test]
    fn empty_table_has_no_root() {
        let err = HuffmanTree::from_frequencies(&FrequencyTable::new()).unwrap_err();
        assert!(matches!(err, HuffmanError::EmptyQueueAccess));
    }

    #[test]
    fn overflowing_weights_are_refused() {
        let frequencies = FrequencyTable::from_counts([(b'a', u64::MAX), (b'b', 1)]);
        let err = HuffmanTree::from_frequencies(&frequencies).unwrap_err();
        assert!(matches!(err, HuffmanError::WeightOverflow));

        let tree = HuffmanTree::from_frequencies(&FrequencyTable::from_counts([
            (b'a', u64::MAX - 1),
            (b'b', 1),
        ]))
        .unwrap();
        assert_eq!(tree.weight(), u64::MAX);
    }

    #[test]
    fn ordering_breaks_ties_deterministically() {
        let a = HuffNode::new(b'a', 3);
        let b = HuffNode::new(b'b', 3);
        let internal = HuffNode::merge(HuffNode::new(b'x', 1), HuffNode::new(b'y', 2));
        assert!(a < b);
        assert!(b < internal);
        assert!(HuffNode::new(b'z', 2) < a);
    }

    #[test]
    fn display_lists_every_leaf() {
        let tree = HuffmanTree::from_frequencies(&FrequencyTable::from_bytes(b"aab")).unwrap();
        let dump = tree.to_string();
        assert!(dump.starts_with("root-> Internal [weight: 3]"));
        assert!(dump.contains("Leaf: 'a' (97) [weight: 2]"));
        assert!(dump.contains("Leaf: 'b' (98) [weight: 1]"));
    }
}
