use std::io::{Read, Write};

use crate::bit_vec::{BitsRef, PackedBits};
use crate::code_table::CodeTable;
use crate::compressed_data::CompressedData;
use crate::decode_tree::DecodeTree;
use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;

/// Huffman codes for one input, ready to encode it.
pub struct HuffmanCodec {
    frequencies: FrequencyTable,
    code_table: CodeTable,
}

/// Sizes of one compression run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionStats {
    pub original_bytes: u64,
    pub compressed_bytes: u64,
    pub distinct_symbols: usize,
    pub payload_bits: u64,
}

impl CompressionStats {
    /// Compressed size as a fraction of the original; 0 for empty input.
    pub fn ratio(&self) -> f64 {
        if self.original_bytes == 0 {
            return 0.0;
        }
        self.compressed_bytes as f64 / self.original_bytes as f64
    }
}

impl HuffmanCodec {
    pub fn new(frequencies: FrequencyTable) -> Result<Self> {
        let code_table = CodeTable::from_frequencies(&frequencies)?;
        Ok(HuffmanCodec {
            frequencies,
            code_table,
        })
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::new(FrequencyTable::from_bytes(data))
    }

    pub fn frequencies(&self) -> &FrequencyTable {
        &self.frequencies
    }

    pub fn code_table(&self) -> &CodeTable {
        &self.code_table
    }

    pub fn encode(&self, data: &[u8]) -> Result<CompressedData> {
        // exact when `data` is what the table was counted from, and never
        // more than this input can need
        let upper_bound = data.len().saturating_mul(self.code_table.max_code_len());
        let expected = usize::try_from(self.code_table.weighted_length(&self.frequencies)).unwrap_or(usize::MAX);
        let capacity = expected.min(upper_bound).min(BitsRef::MAX_BITS);
        let mut payload = PackedBits::with_capacity(capacity);

        for &byte in data {
            let code = self.code_table
                .get(byte)
                .ok_or(HuffmanError::UnknownSymbolInTable(byte))?;
            payload.push_code(code);
        }

        Ok(CompressedData {
            code_table: self.code_table.clone(),
            original_length: data.len(),
            payload,
        })
    }

    pub fn decode(compressed: &CompressedData) -> Result<Vec<u8>> {
        let tree = DecodeTree::from_code_table(&compressed.code_table)?;
        tree.decode(compressed.payload.as_bitslice(), compressed.original_length)
    }

    /// Count, encode and serialize `data` in one go.
    pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
        Self::from_bytes(data)?.encode(data)?.serialize()
    }

    pub fn decompress(bytes: &[u8]) -> Result<Vec<u8>> {
        Self::decode(&CompressedData::deserialize(bytes)?)
    }

    /// Compress everything `input` yields into `output`.
    ///
    /// The whole input is buffered: codes depend on the full frequency count,
    /// so nothing can be written before the last byte has been read.
    pub fn compress_stream<R: Read, W: Write>(mut input: R, mut output: W) -> Result<CompressionStats> {
        let mut data = Vec::new();
        input.read_to_end(&mut data)?;

        let codec = Self::from_bytes(&data)?;
        let bytes = codec.encode(&data)?.serialize()?;
        output.write_all(&bytes)?;
        output.flush()?;

        Ok(CompressionStats {
            original_bytes: data.len() as u64,
            compressed_bytes: bytes.len() as u64,
            distinct_symbols: codec.code_table.len(),
            payload_bits: codec.code_table.weighted_length(&codec.frequencies),
        })
    }

    /// Decompress a container read from `input` into `output`, returning the
    /// number of bytes written.
    pub fn decompress_stream<R: Read, W: Write>(mut input: R, mut output: W) -> Result<u64> {
        let compressed = CompressedData::read_from(&mut input)?;
        let decoded = Self::decode(&compressed)?;
        output.write_all(&decoded)?;
        output.flush()?;
        Ok(decoded.len() as u64)
    }
}
