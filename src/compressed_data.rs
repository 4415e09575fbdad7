use std::io::{Cursor, Read, Write};

use crate::bit_vec::{packed_len, PackedBits};
use crate::code_table::CodeTable;
use crate::error::{HuffmanError, Result};
use crate::metadata::{read_header, write_header, Header};

/// A complete container: the code table, the original length and the
/// packed payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedData {
    pub code_table: CodeTable,
    pub original_length: usize,
    pub payload: PackedBits,
}

impl CompressedData {
    pub fn bit_count(&self) -> usize {
        self.payload.bit_count()
    }

    pub fn serialize(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.write_to(&mut bytes)?;
        Ok(bytes)
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        let header = Header {
            original_length: self.original_length as u64,
            code_table: self.code_table.clone(),
            bit_count: self.bit_count() as u64,
        };
        write_header(writer, &header)?;
        writer.write_all(&self.payload.to_bytes())?;
        Ok(())
    }

    /// Parse a whole container. Bytes after the payload are rejected.
    pub fn deserialize(bytes: &[u8]) -> Result<Self> {
        Self::read_from(&mut Cursor::new(bytes))
    }

    /// Read a container from `reader`, which must end right after the
    /// payload.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let header = read_header(reader)?;

        let original_length = usize::try_from(header.original_length)
            .map_err(|_| HuffmanError::malformed("original length does not fit in memory"))?;
        let bit_count = usize::try_from(header.bit_count)
            .map_err(|_| HuffmanError::malformed("bit count does not fit in memory"))?;

        // bounded by the bytes actually present, not by the declared count
        let payload_len = packed_len(bit_count);
        let mut payload = Vec::new();
        reader.by_ref().take(payload_len as u64).read_to_end(&mut payload)?;
        if payload.len() != payload_len {
            return Err(HuffmanError::malformed(format!(
                "truncated payload: expected {} bytes, found {}",
                payload_len,
                payload.len()
            )));
        }

        let mut trailing = Vec::new();
        reader.by_ref().take(1).read_to_end(&mut trailing)?;
        if !trailing.is_empty() {
            return Err(HuffmanError::malformed("trailing bytes after payload"));
        }

        Ok(CompressedData {
            code_table: header.code_table,
            original_length,
            payload: PackedBits::from_bytes(payload, bit_count)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::FrequencyTable;

    fn sample() -> CompressedData {
        let data = b"abracadabra";
        let code_table = CodeTable::from_frequencies(&FrequencyTable::from_bytes(data)).unwrap();
        let mut payload = PackedBits::new();
        for &byte in data {
            payload.push_code(code_table.get(byte).unwrap());
        }
        CompressedData {
            code_table,
            original_length: data.len(),
            payload,
        }
    }

    #[test]
    fn container_reads_back() {
        let compressed = sample();
        let bytes = compressed.serialize().unwrap();
        assert_eq!(CompressedData::deserialize(&bytes).unwrap(), compressed);
    }

    #[test]
    fn payload_sits_at_the_end() {
        let compressed = sample();
        let bytes = compressed.serialize().unwrap();
        let payload = compressed.payload.to_bytes();
        assert_eq!(&bytes[bytes.len() - payload.len()..], &payload[..]);

        let count_at = bytes.len() - payload.len() - 8;
        let mut count = [0u8; 8];
        count.copy_from_slice(&bytes[count_at..count_at + 8]);
        assert_eq!(u64::from_le_bytes(count), compressed.bit_count() as u64);
    }

    #[test]
    fn rejects_trailing_bytes() {
        let mut bytes = sample().serialize().unwrap();
        bytes.push(0);
        assert!(matches!(
            CompressedData::deserialize(&bytes),
            Err(HuffmanError::MalformedContainer(_))
        ));
    }

    /// Fails every other read with `Interrupted`.
    struct Stuttering {
        data: Cursor<Vec<u8>>,
        interrupt: bool,
    }

    impl Read for Stuttering {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            self.interrupt = !self.interrupt;
            if self.interrupt {
                return Err(std::io::ErrorKind::Interrupted.into());
            }
            self.data.read(buf)
        }
    }

    #[test]
    fn interrupted_reads_are_retried() {
        let compressed = sample();
        let bytes = compressed.serialize().unwrap();

        let mut reader = Stuttering { data: Cursor::new(bytes.clone()), interrupt: false };
        assert_eq!(CompressedData::read_from(&mut reader).unwrap(), compressed);

        let mut trailing = bytes;
        trailing.push(0);
        let mut reader = Stuttering { data: Cursor::new(trailing), interrupt: false };
        assert!(matches!(
            CompressedData::read_from(&mut reader),
            Err(HuffmanError::MalformedContainer(_))
        ));
    }

    #[test]
    fn rejects_truncated_payload() {
        let bytes = sample().serialize().unwrap();
        assert!(matches!(
            CompressedData::deserialize(&bytes[..bytes.len() - 1]),
            Err(HuffmanError::MalformedContainer(_))
        ));
    }

    #[test]
    fn huge_bit_count_is_rejected_without_allocating() {
        let empty = CompressedData {
            code_table: CodeTable::new(),
            original_length: 0,
            payload: PackedBits::new(),
        };
        let mut bytes = empty.serialize().unwrap();
        let count_at = bytes.len() - 8;
        bytes[count_at..].copy_from_slice(&(u64::MAX / 2).to_le_bytes());
        assert!(matches!(
            CompressedData::deserialize(&bytes),
            Err(HuffmanError::MalformedContainer(_))
        ));
    }
}
