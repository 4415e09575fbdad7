use std::io::{ErrorKind, Read, Write};

use crate::code_table::CodeTable;
use crate::error::{HuffmanError, Result};

/// Leading bytes of every container.
pub const MAGIC: [u8; 4] = *b"HZIP";
pub const FORMAT_VERSION: u8 = 1;

/// Everything in a container ahead of the packed payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub original_length: u64,
    pub code_table: CodeTable,
    pub bit_count: u64,
}

pub fn write_header<W: Write>(writer: &mut W, header: &Header) -> Result<()> {
    writer.write_all(&MAGIC)?;
    writer.write_all(&[FORMAT_VERSION])?;
    writer.write_all(&header.original_length.to_le_bytes())?;
    header.code_table.write_to(writer)?;
    writer.write_all(&header.bit_count.to_le_bytes())?;
    Ok(())
}

pub fn read_header<R: Read>(reader: &mut R) -> Result<Header> {
    let magic: [u8; 4] = read_array(reader, "magic")?;
    if magic != MAGIC {
        return Err(HuffmanError::malformed(format!("bad magic {:02x?}", magic)));
    }

    let [version] = read_array(reader, "version")?;
    if version != FORMAT_VERSION {
        return Err(HuffmanError::malformed(format!("unsupported version {}", version)));
    }

    let original_length = u64::from_le_bytes(read_array(reader, "original length")?);
    let code_table = CodeTable::read_from(reader)?;
    let bit_count = u64::from_le_bytes(read_array(reader, "bit count")?);

    Ok(Header {
        original_length,
        code_table,
        bit_count,
    })
}

/// `read_exact`, with running out of input reported as a truncated
/// container rather than an I/O failure.
pub(crate) fn read_exact<R: Read>(reader: &mut R, buf: &mut [u8], what: &str) -> Result<()> {
    reader.read_exact(buf).map_err(|e| match e.kind() {
        ErrorKind::UnexpectedEof => HuffmanError::malformed(format!("truncated {}", what)),
        _ => HuffmanError::Io(e),
    })
}

pub(crate) fn read_array<const N: usize, R: Read>(reader: &mut R, what: &str) -> Result<[u8; N]> {
    let mut buf = [0u8; N];
    read_exact(reader, &mut buf, what)?;
    Ok(buf)
}
