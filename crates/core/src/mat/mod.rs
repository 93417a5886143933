//! Reader for MAT-file level 5 containers.
//!
//! A `.fig` file is a MAT-file holding a single struct variable. This module
//! turns the raw bytes into a generic tree of [`Value`]s: it validates the
//! 128-byte header, walks the top-level data elements, inflates
//! `miCOMPRESSED` elements and decodes every `miMATRIX` it finds. It knows
//! nothing about figures; the record adapter and decoders sit on top.

mod array;
mod reader;
mod value;

use std::{io::Read, path::Path};

use flate2::read::ZlibDecoder;
use indexmap::IndexMap;

pub use reader::Endian;
pub use value::{CellArray, CharArray, Fields, NumericArray, NumericClass, StructArray, Value};

use crate::{FigError, Result};
use reader::{ByteReader, MI_COMPRESSED, MI_MATRIX};

const HEADER_LEN: usize = 128;
const HEADER_TEXT_LEN: usize = 116;
const SUPPORTED_VERSION: u16 = 0x0100;

/// Decoded MAT-file: its descriptive header text and every named variable.
#[derive(Debug, Clone, PartialEq)]
pub struct MatFile {
    pub header_text: String,
    pub endian: Endian,
    pub variables: IndexMap<String, Value>,
}

impl MatFile {
    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }
}

/// Reads and parses the container at `path`.
pub fn parse_file(path: impl AsRef<Path>) -> Result<MatFile> {
    let path = path.as_ref();
    tracing::debug!(?path, "reading container");
    let bytes = std::fs::read(path)?;
    parse_bytes(&bytes)
}

/// Parses an in-memory container.
pub fn parse_bytes(bytes: &[u8]) -> Result<MatFile> {
    if bytes.len() < HEADER_LEN {
        return Err(FigError::format(format!(
            "file is {} bytes, shorter than the {HEADER_LEN}-byte header",
            bytes.len()
        )));
    }

    let header_text = String::from_utf8_lossy(&bytes[..HEADER_TEXT_LEN])
        .trim_end_matches(['\0', ' '])
        .to_string();
    if header_text.starts_with("MATLAB 7.3") {
        return Err(FigError::format(
            "HDF5-based (v7.3) containers are not supported",
        ));
    }

    let endian = match &bytes[126..128] {
        b"IM" => Endian::Little,
        b"MI" => Endian::Big,
        other => {
            return Err(FigError::format(format!(
                "bad endian indicator {:?}",
                String::from_utf8_lossy(other)
            )))
        }
    };
    let version = reader::read_u16(&bytes[124..126], endian);
    if version != SUPPORTED_VERSION {
        return Err(FigError::format(format!(
            "unsupported container version {version:#06x}"
        )));
    }

    let mut variables = IndexMap::new();
    let mut reader = ByteReader::new(&bytes[HEADER_LEN..], endian);
    // Anything shorter than a tag at the tail is padding.
    while reader.remaining() >= 8 {
        let element = reader.read_element()?;
        let (name, value) = match element.data_type {
            MI_MATRIX => array::decode_matrix(element.bytes, endian)?,
            MI_COMPRESSED => {
                let inflated = inflate(element.bytes)?;
                let mut inner = ByteReader::new(&inflated, endian);
                let element = inner.expect_element(&[MI_MATRIX], "compressed array")?;
                array::decode_matrix(element.bytes, endian)?
            }
            other => {
                tracing::trace!(data_type = other, "skipping top-level element");
                continue;
            }
        };
        tracing::debug!(name = %name, value = %value.describe(), "decoded variable");
        variables.insert(name, value);
    }

    Ok(MatFile {
        header_text,
        endian,
        variables,
    })
}

fn inflate(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut inflated = Vec::new();
    ZlibDecoder::new(bytes)
        .read_to_end(&mut inflated)
        .map_err(|err| FigError::format(format!("corrupt compressed element: {err}")))?;
    Ok(inflated)
}
