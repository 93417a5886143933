//! Low level cursor over the tagged data elements of a MAT-file.

use crate::{FigError, Result};

pub(crate) const MI_INT8: u32 = 1;
pub(crate) const MI_UINT8: u32 = 2;
pub(crate) const MI_INT16: u32 = 3;
pub(crate) const MI_UINT16: u32 = 4;
pub(crate) const MI_INT32: u32 = 5;
pub(crate) const MI_UINT32: u32 = 6;
pub(crate) const MI_SINGLE: u32 = 7;
pub(crate) const MI_DOUBLE: u32 = 9;
pub(crate) const MI_INT64: u32 = 12;
pub(crate) const MI_UINT64: u32 = 13;
pub(crate) const MI_MATRIX: u32 = 14;
pub(crate) const MI_COMPRESSED: u32 = 15;
pub(crate) const MI_UTF8: u32 = 16;
pub(crate) const MI_UTF16: u32 = 17;
pub(crate) const MI_UTF32: u32 = 18;

/// Byte order announced by the container header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Little,
    Big,
}

/// One tagged data element borrowed from the underlying buffer.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Element<'a> {
    pub data_type: u32,
    pub bytes: &'a [u8],
}

pub(crate) struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
    endian: Endian,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8], endian: Endian) -> Self {
        Self {
            data,
            pos: 0,
            endian,
        }
    }

    pub fn endian(&self) -> Endian {
        self.endian
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(FigError::format(format!(
                "unexpected end of data at offset {}: needed {len} bytes, {} left",
                self.pos,
                self.remaining()
            )));
        }
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        let bytes = self.read_bytes(4)?;
        Ok(read_u32(bytes, self.endian))
    }

    /// Reads the next element, honouring the packed small-element form.
    ///
    /// Regular elements are followed by padding up to the next 8-byte
    /// boundary. Compressed elements are not padded.
    pub fn read_element(&mut self) -> Result<Element<'a>> {
        let word = self.read_u32()?;
        if word >> 16 != 0 {
            let data_type = word & 0xFFFF;
            let len = (word >> 16) as usize;
            if len > 4 {
                return Err(FigError::format(format!(
                    "small data element claims {len} bytes"
                )));
            }
            let payload = self.read_bytes(4)?;
            return Ok(Element {
                data_type,
                bytes: &payload[..len],
            });
        }

        let data_type = word;
        let len = self.read_u32()? as usize;
        let bytes = self.read_bytes(len)?;
        if data_type != MI_COMPRESSED {
            let padding = (8 - len % 8) % 8;
            self.pos += padding.min(self.remaining());
        }
        Ok(Element { data_type, bytes })
    }

    /// Reads an element and checks its data type against `expected`.
    pub fn expect_element(&mut self, expected: &[u32], what: &str) -> Result<Element<'a>> {
        let element = self.read_element()?;
        if expected.contains(&element.data_type) {
            Ok(element)
        } else {
            Err(FigError::format(format!(
                "expected {what}, found data type {}",
                element.data_type
            )))
        }
    }
}

pub(crate) fn read_u16(bytes: &[u8], endian: Endian) -> u16 {
    let raw = [bytes[0], bytes[1]];
    match endian {
        Endian::Little => u16::from_le_bytes(raw),
        Endian::Big => u16::from_be_bytes(raw),
    }
}

pub(crate) fn read_u32(bytes: &[u8], endian: Endian) -> u32 {
    let raw = [bytes[0], bytes[1], bytes[2], bytes[3]];
    match endian {
        Endian::Little => u32::from_le_bytes(raw),
        Endian::Big => u32::from_be_bytes(raw),
    }
}

fn read_u64(bytes: &[u8], endian: Endian) -> u64 {
    let mut raw = [0u8; 8];
    raw.copy_from_slice(&bytes[..8]);
    match endian {
        Endian::Little => u64::from_le_bytes(raw),
        Endian::Big => u64::from_be_bytes(raw),
    }
}

/// Widens the payload of a numeric element to `f64`.
///
/// MATLAB frequently stores double arrays in the smallest integer type that
/// holds every value, so the conversion is driven by the element's data type
/// and never by the array class.
pub(crate) fn decode_numbers(element: Element<'_>, endian: Endian) -> Result<Vec<f64>> {
    let bytes = element.bytes;
    let width = match element.data_type {
        MI_INT8 | MI_UINT8 => 1,
        MI_INT16 | MI_UINT16 => 2,
        MI_INT32 | MI_UINT32 | MI_SINGLE => 4,
        MI_DOUBLE | MI_INT64 | MI_UINT64 => 8,
        other => {
            return Err(FigError::format(format!(
                "data type {other} does not hold numbers"
            )))
        }
    };
    if bytes.len() % width != 0 {
        return Err(FigError::format(format!(
            "numeric element of {} bytes is not a multiple of {width}",
            bytes.len()
        )));
    }

    let values = bytes
        .chunks_exact(width)
        .map(|chunk| match element.data_type {
            MI_INT8 => chunk[0] as i8 as f64,
            MI_UINT8 => chunk[0] as f64,
            MI_INT16 => read_u16(chunk, endian) as i16 as f64,
            MI_UINT16 => read_u16(chunk, endian) as f64,
            MI_INT32 => read_u32(chunk, endian) as i32 as f64,
            MI_UINT32 => read_u32(chunk, endian) as f64,
            MI_SINGLE => f32::from_bits(read_u32(chunk, endian)) as f64,
            MI_INT64 => read_u64(chunk, endian) as i64 as f64,
            MI_UINT64 => read_u64(chunk, endian) as f64,
            _ => f64::from_bits(read_u64(chunk, endian)),
        })
        .collect();
    Ok(values)
}

/// Decodes the payload of a character element into code points.
pub(crate) fn decode_chars(element: Element<'_>, endian: Endian) -> Result<Vec<char>> {
    let bytes = element.bytes;
    match element.data_type {
        MI_UINT16 | MI_UTF16 => {
            if bytes.len() % 2 != 0 {
                return Err(FigError::format("odd-length UTF-16 character data"));
            }
            let units: Vec<u16> = bytes
                .chunks_exact(2)
                .map(|chunk| read_u16(chunk, endian))
                .collect();
            Ok(char::decode_utf16(units)
                .map(|unit| unit.unwrap_or(char::REPLACEMENT_CHARACTER))
                .collect())
        }
        MI_UTF8 => Ok(String::from_utf8_lossy(bytes).chars().collect()),
        MI_INT8 | MI_UINT8 => Ok(bytes.iter().map(|&b| b as char).collect()),
        MI_INT32 | MI_UINT32 | MI_UTF32 => {
            if bytes.len() % 4 != 0 {
                return Err(FigError::format("truncated UTF-32 character data"));
            }
            Ok(bytes
                .chunks_exact(4)
                .map(|chunk| {
                    char::from_u32(read_u32(chunk, endian)).unwrap_or(char::REPLACEMENT_CHARACTER)
                })
                .collect())
        }
        other => Err(FigError::format(format!(
            "data type {other} does not hold characters"
        ))),
    }
}

/// Decodes a NUL-padded ASCII name such as an array or field name.
pub(crate) fn decode_name(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}
