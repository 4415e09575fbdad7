//! Symbol → prefix-free code mapping.

use std::collections::BTreeMap;
use std::io::{Read, Write};

use crate::bit_vec::{packed_len, to_packed_bytes, Bits, BitsRef};
use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::hufftree::{HuffNode, HuffmanTree};
use crate::metadata::{read_array, read_exact};

/// Most entries a table can hold: one per byte value.
pub const MAX_ENTRIES: usize = 256;

/// The code of every symbol in one Huffman tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<u8, Bits>,
}

impl CodeTable {
    pub fn new() -> Self {
        CodeTable {
            codes: BTreeMap::new(),
        }
    }

    /// Walk `tree` in preorder, left edges appending 0 and right edges 1.
    ///
    /// A tree that is a single leaf has no edges, so its symbol is given the
    /// code `0`.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = BTreeMap::new();
        match &tree.root {
            HuffNode::Leaf { symbol, .. } => {
                let mut code = Bits::new();
                code.push(false);
                codes.insert(*symbol, code);
            }
            root => {
                let mut prefix = Bits::new();
                root.collect_codes(&mut prefix, &mut |symbol, code| {
                    codes.insert(symbol, code.clone());
                });
            }
        }
        CodeTable { codes }
    }

    /// Build the tree for `frequencies` and derive its table. An empty
    /// frequency table gives an empty code table.
    pub fn from_frequencies(frequencies: &FrequencyTable) -> Result<Self> {
        if frequencies.is_empty() {
            return Ok(CodeTable::new());
        }
        Ok(HuffmanTree::from_frequencies(frequencies)?.code_table())
    }

    pub fn get(&self, symbol: u8) -> Option<&BitsRef> {
        self.codes.get(&symbol).map(|code| code.as_bitslice())
    }

    /// The symbol whose code is exactly `code`, if any.
    pub fn lookup(&self, code: &BitsRef) -> Option<u8> {
        self.codes.iter()
            .find(|(_, candidate)| candidate.as_bitslice() == code)
            .map(|(&symbol, _)| symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &BitsRef)> + '_ {
        self.codes.iter().map(|(&symbol, code)| (symbol, code.as_bitslice()))
    }

    /// Length of the longest code, 0 for an empty table.
    pub fn max_code_len(&self) -> usize {
        self.codes.values().map(|code| code.len()).max().unwrap_or(0)
    }

    /// Σ count × code length: the payload size in bits for `frequencies`.
    /// Symbols without a code contribute nothing; the sum saturates at
    /// `u64::MAX`.
    pub fn weighted_length(&self, frequencies: &FrequencyTable) -> u64 {
        frequencies.iter()
            .filter_map(|(symbol, count)| self.get(symbol).map(|code| count.saturating_mul(code.len() as u64)))
            .fold(0u64, u64::saturating_add)
    }

    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<&Bits> = self.codes.values().collect();
        codes.iter().enumerate().all(|(i, a)| {
            codes.iter().enumerate().all(|(j, b)| i == j || !b.starts_with(a.as_bitslice()))
        })
    }

    fn insert(&mut self, symbol: u8, code: Bits) -> Result<()> {
        if code.is_empty() {
            return Err(HuffmanError::malformed(format!("symbol {:#04x} has an empty code", symbol)));
        }
        if self.codes.insert(symbol, code).is_some() {
            return Err(HuffmanError::malformed(format!("symbol {:#04x} listed twice", symbol)));
        }
        Ok(())
    }

    /// Write `entry_count: u16`, then per entry `symbol: u8`,
    /// `code_len: u8` and the code packed MSB-first.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        let count = self.codes.len() as u16;
        writer.write_all(&count.to_le_bytes())?;

        for (&symbol, code) in &self.codes {
            // a tree over at most 256 leaves is at most 255 deep
            debug_assert!((1..=u8::MAX as usize).contains(&code.len()));
            writer.write_all(&[symbol, code.len() as u8])?;
            writer.write_all(&to_packed_bytes(code))?;
        }
        Ok(())
    }

    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let count = u16::from_le_bytes(read_array(reader, "code table size")?) as usize;
        if count > MAX_ENTRIES {
            return Err(HuffmanError::malformed(format!("code table lists {} symbols", count)));
        }

        let mut table = CodeTable::new();
        for _ in 0..count {
            let [symbol, code_len] = read_array(reader, "code table entry")?;
            let code_len = code_len as usize;

            let mut packed = vec![0u8; packed_len(code_len)];
            read_exact(reader, &mut packed, "code bits")?;

            let mut code = Bits::from_vec(packed);
            code.truncate(code_len);
            table.insert(symbol, code)?;
        }
        Ok(table)
    }
}
