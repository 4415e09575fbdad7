//! # hzip
//!
//! Lossless compression of text (or any byte stream) with Huffman coding.
//!
//! ## Quick Start
//!
//! ```rust
//! use hzip::HuffmanCodec;
//!
//! let text = b"abracadabra";
//! let compressed = HuffmanCodec::compress(text)?;
//! let restored = HuffmanCodec::decompress(&compressed)?;
//! assert_eq!(restored, text.to_vec());
//! # Ok::<(), hzip::HuffmanError>(())
//! ```
//!
//! ## Pipeline
//!
//! bytes → [`FrequencyTable`] → [`HuffmanTree`] (built on a fixed-capacity
//! [`min_heap::MinHeap`]) → [`CodeTable`] → [`CompressedData`] → bytes.
//! Decoding rebuilds a trie from the stored code table and walks it one bit
//! at a time.

pub mod bit_vec;
pub mod code_table;
pub mod compressed_data;
pub mod decode_tree;
pub mod error;
pub mod frequency;
pub mod huffman_codec;
pub mod hufftree;
pub mod metadata;
pub mod min_heap;

// Re-export main types for convenience
pub use code_table::CodeTable;
pub use compressed_data::CompressedData;
pub use error::{HuffmanError, Result};
pub use frequency::FrequencyTable;
pub use huffman_codec::{CompressionStats, HuffmanCodec};
pub use hufftree::{HuffNode, HuffmanTree};
