use std::collections::BTreeMap;
use std::io::{ErrorKind, Read};

use crate::error::Result;

const READ_CHUNK: usize = 8 * 1024;

/// Occurrence count of every byte seen in an input.
///
/// Only symbols that actually occur are stored, so `len()` is the number of
/// distinct symbols and every stored count is at least 1.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<u8, u64>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        FrequencyTable {
            counts: BTreeMap::new(),
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        let counts = bytes.iter()
            .copied()
            .fold(BTreeMap::new(), |mut acc, byte| {
                *acc.entry(byte).or_insert(0) += 1;
                acc
            });

        FrequencyTable { counts }
    }

    /// Count every byte of `reader`, reading it once from start to end.
    ///
    /// Standalone analysis entry point: the codec buffers its input anyway
    /// and counts it with [`FrequencyTable::from_bytes`], while this only
    /// ever holds one chunk in memory.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut table = FrequencyTable::new();
        let mut buf = [0u8; READ_CHUNK];

        loop {
            match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => table.record(&buf[..n]),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }

        Ok(table)
    }

    /// Build a table from explicit counts. Zero counts are dropped and
    /// repeated symbols are summed, saturating at `u64::MAX`.
    ///
    /// Counts may add up to more than a `u64` holds; such a table cannot be
    /// turned into a tree (see [`FrequencyTable::checked_total`]).
    pub fn from_counts<I>(counts: I) -> Self
    where
        I: IntoIterator<Item = (u8, u64)>,
    {
        let mut table = FrequencyTable::new();
        for (symbol, count) in counts {
            if count > 0 {
                let entry = table.counts.entry(symbol).or_insert(0);
                *entry = entry.saturating_add(count);
            }
        }
        table
    }

    fn record(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            *self.counts.entry(byte).or_insert(0) += 1;
        }
    }

    /// Count for `symbol`, zero if it never occurred.
    pub fn count(&self, symbol: u8) -> u64 {
        self.counts.get(&symbol).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of symbols counted, saturating at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.checked_total().unwrap_or(u64::MAX)
    }

    /// Total number of symbols counted, `None` if it overflows.
    pub fn checked_total(&self) -> Option<u64> {
        self.counts.values().try_fold(0u64, |acc, &count| acc.checked_add(count))
    }

    /// `(symbol, count)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts.iter().map(|(&symbol, &count)| (symbol, count))
    }
}
