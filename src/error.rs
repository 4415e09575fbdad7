//! Error types for Huffman compression.

use thiserror::Error;

/// Error variants for building codes, encoding and decoding.
#[derive(Debug, Error)]
pub enum HuffmanError {
    /// `extract_min` was called on an empty priority queue.
    #[error("extract_min called on an empty priority queue")]
    EmptyQueueAccess,

    /// `insert` was called on a full priority queue.
    #[error("priority queue is full (capacity {0})")]
    HeapOverflow(usize),

    /// Symbol counts whose sum does not fit in a `u64`.
    #[error("total symbol weight overflows u64")]
    WeightOverflow,

    /// A symbol being encoded has no entry in the code table.
    #[error("symbol {0:#04x} has no entry in the code table")]
    UnknownSymbolInTable(u8),

    /// The container could not be parsed or is internally inconsistent.
    #[error("malformed container: {0}")]
    MalformedContainer(String),

    /// Payload bits that do not form a complete code.
    #[error("undecodable bit sequence at bit {position} of {bit_count}")]
    UndecodableBitSequence { position: usize, bit_count: usize },

    /// An I/O error occurred while reading or writing a stream.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl HuffmanError {
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        HuffmanError::MalformedContainer(msg.into())
    }
}

/// A specialized Result type for Huffman operations.
pub type Result<T> = std::result::Result<T, HuffmanError>;
