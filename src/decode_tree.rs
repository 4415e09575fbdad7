//! Decoding trie rebuilt from a persisted code table.
//!
//! Nodes live in a flat arena and refer to their children by index, so the
//! tree can be grown one code at a time and walked one bit at a time.

use crate::bit_vec::BitsRef;
use crate::code_table::CodeTable;
use crate::error::{HuffmanError, Result};

const ROOT: usize = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Empty,
    Branch(usize),
    Leaf(u8),
}

/// Binary trie with one leaf per code: bit 0 follows the left slot, bit 1
/// the right.
#[derive(Debug, Clone)]
pub struct DecodeTree {
    nodes: Vec<[Slot; 2]>,
}

impl DecodeTree {
    /// Fails with `MalformedContainer` if two codes collide or one code is a
    /// prefix of another.
    pub fn from_code_table(table: &CodeTable) -> Result<Self> {
        let mut tree = DecodeTree {
            nodes: vec![[Slot::Empty; 2]],
        };
        for (symbol, code) in table.iter() {
            tree.insert(symbol, code)?;
        }
        Ok(tree)
    }

    fn insert(&mut self, symbol: u8, code: &BitsRef) -> Result<()> {
        let conflict = || HuffmanError::malformed(format!("code of symbol {:#04x} is not prefix-free", symbol));

        let (last, path) = code.split_last().ok_or_else(conflict)?;
        let mut node = ROOT;
        for bit in path.iter().by_vals() {
            node = match self.nodes[node][bit as usize] {
                Slot::Branch(next) => next,
                Slot::Empty => {
                    let next = self.nodes.len();
                    self.nodes.push([Slot::Empty; 2]);
                    self.nodes[node][bit as usize] = Slot::Branch(next);
                    next
                }
                Slot::Leaf(_) => return Err(conflict()),
            };
        }

        let slot = &mut self.nodes[node][*last as usize];
        if *slot != Slot::Empty {
            return Err(conflict());
        }
        *slot = Slot::Leaf(symbol);
        Ok(())
    }

    /// Decode every bit of `bits`, expecting exactly `expected` symbols.
    pub fn decode(&self, bits: &BitsRef, expected: usize) -> Result<Vec<u8>> {
        let bit_count = bits.len();
        // every symbol takes at least one bit
        let mut result = Vec::with_capacity(expected.min(bit_count));
        let mut node = ROOT;

        for (position, bit) in bits.iter().by_vals().enumerate() {
            node = match self.nodes[node][bit as usize] {
                Slot::Branch(next) => next,
                Slot::Leaf(symbol) => {
                    result.push(symbol);
                    ROOT
                }
                Slot::Empty => {
                    return Err(HuffmanError::UndecodableBitSequence { position, bit_count });
                }
            };
        }

        if node != ROOT {
            // ran out of bits halfway down a code
            return Err(HuffmanError::UndecodableBitSequence {
                position: bit_count,
                bit_count,
            });
        }

        if result.len() != expected {
            return Err(HuffmanError::malformed(format!(
                "expected {} symbols, payload holds {}",
                expected,
                result.len()
            )));
        }

        Ok(result)
    }
}
