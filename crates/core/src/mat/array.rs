//! Decoding of `miMATRIX` elements into [`Value`]s.

use indexmap::IndexMap;

use super::reader::{
    decode_chars, decode_name, decode_numbers, ByteReader, Element, Endian, MI_INT32, MI_INT8,
    MI_MATRIX, MI_UINT32, MI_UINT8,
};
use super::value::{CellArray, CharArray, NumericArray, NumericClass, StructArray, Value};
use crate::{FigError, Result};

const CLASS_CELL: u8 = 1;
const CLASS_STRUCT: u8 = 2;
const CLASS_OBJECT: u8 = 3;
const CLASS_CHAR: u8 = 4;
const CLASS_SPARSE: u8 = 5;
const CLASS_FUNCTION: u8 = 16;
const CLASS_OPAQUE: u8 = 17;

const FLAG_COMPLEX: u32 = 0x0800;
const FLAG_LOGICAL: u32 = 0x0200;

/// Fieldless struct elements occupy no payload bytes, so their count is
/// capped separately.
const MAX_FIELDLESS_ELEMENTS: usize = 1 << 20;

/// Decodes the payload of a `miMATRIX` element into its array name and value.
pub(crate) fn decode_matrix(bytes: &[u8], endian: Endian) -> Result<(String, Value)> {
    if bytes.is_empty() {
        return Ok((String::new(), Value::Empty));
    }

    let mut reader = ByteReader::new(bytes, endian);
    let flags = reader.expect_element(&[MI_UINT32], "array flags")?;
    if flags.bytes.len() < 8 {
        return Err(FigError::format("array flags element is too short"));
    }
    let flag_word = super::reader::read_u32(flags.bytes, endian);
    let class = (flag_word & 0xFF) as u8;

    // Opaque and function handle payloads are skipped; only an opaque
    // object's name sits at a known position.
    match class {
        CLASS_OPAQUE => {
            let name = reader.expect_element(&[MI_INT8, MI_UINT8], "array name")?;
            return Ok((decode_name(name.bytes), Value::Unsupported { class }));
        }
        CLASS_FUNCTION => return Ok((String::new(), Value::Unsupported { class })),
        _ => {}
    }

    let dims = read_dims(&mut reader)?;
    let name = decode_name(reader.expect_element(&[MI_INT8, MI_UINT8], "array name")?.bytes);
    let count = element_count(&dims)
        .ok_or_else(|| FigError::format(format!("array `{name}` dimensions {dims:?} overflow")))?;

    let value = match class {
        CLASS_CELL => {
            let items = (0..count)
                .map(|_| read_nested(&mut reader))
                .collect::<Result<Vec<_>>>()?;
            Value::Cell(CellArray { dims, items })
        }
        CLASS_STRUCT => Value::Struct(read_struct(&mut reader, dims, count)?),
        CLASS_OBJECT => {
            let class_name = decode_name(
                reader
                    .expect_element(&[MI_INT8, MI_UINT8], "object class name")?
                    .bytes,
            );
            let fields = read_struct(&mut reader, dims, count)?;
            Value::Object { class_name, fields }
        }
        CLASS_CHAR => Value::Char(read_chars(&mut reader, dims, count)?),
        CLASS_SPARSE => Value::Unsupported { class },
        code => {
            let Some(numeric_class) = NumericClass::from_code(code) else {
                return Err(FigError::format(format!("unknown array class {code}")));
            };
            let real = read_numbers(&mut reader, count, &name)?;
            let imag = if flag_word & FLAG_COMPLEX != 0 {
                Some(read_numbers(&mut reader, count, &name)?)
            } else {
                None
            };
            Value::Numeric(NumericArray {
                class: numeric_class,
                dims,
                real,
                imag,
                logical: flag_word & FLAG_LOGICAL != 0,
            })
        }
    };

    tracing::trace!(name = %name, value = %value.describe(), "decoded array");
    Ok((name, value))
}

fn element_count(dims: &[usize]) -> Option<usize> {
    dims.iter().try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
}

fn read_dims(reader: &mut ByteReader<'_>) -> Result<Vec<usize>> {
    let element = reader.expect_element(&[MI_INT32], "dimensions")?;
    decode_numbers(element, reader.endian())?
        .into_iter()
        .map(|dim| {
            if dim < 0.0 {
                Err(FigError::format(format!("negative dimension {dim}")))
            } else {
                Ok(dim as usize)
            }
        })
        .collect()
}

fn read_nested(reader: &mut ByteReader<'_>) -> Result<Value> {
    let element = reader.expect_element(&[MI_MATRIX], "nested array")?;
    let (_, value) = decode_matrix(element.bytes, reader.endian())?;
    Ok(value)
}

fn read_numbers(reader: &mut ByteReader<'_>, count: usize, name: &str) -> Result<Vec<f64>> {
    let element: Element<'_> = reader.read_element()?;
    let values = decode_numbers(element, reader.endian())?;
    if values.len() != count {
        return Err(FigError::format(format!(
            "array `{name}` declares {count} elements but stores {}",
            values.len()
        )));
    }
    Ok(values)
}

fn read_chars(reader: &mut ByteReader<'_>, dims: Vec<usize>, count: usize) -> Result<CharArray> {
    let chars = if count == 0 && reader.remaining() == 0 {
        Vec::new()
    } else {
        decode_chars(reader.read_element()?, reader.endian())?
    };
    if chars.len() != count {
        return Err(FigError::format(format!(
            "char array declares {count} characters but stores {}",
            chars.len()
        )));
    }

    let row_count = dims.first().copied().unwrap_or(0);
    let cols = if row_count == 0 { 0 } else { count / row_count };
    let rows = (0..row_count)
        .map(|row| (0..cols).map(|col| chars[row + col * row_count]).collect())
        .collect();
    Ok(CharArray { dims, rows })
}

fn read_struct(reader: &mut ByteReader<'_>, dims: Vec<usize>, count: usize) -> Result<StructArray> {
    let name_len = decode_numbers(
        reader.expect_element(&[MI_INT32], "field name length")?,
        reader.endian(),
    )?;
    let name_len = name_len.first().copied().unwrap_or(0.0) as usize;
    let names = reader.expect_element(&[MI_INT8, MI_UINT8], "field names")?;
    let field_names: Vec<String> = if name_len == 0 {
        Vec::new()
    } else {
        names.bytes.chunks(name_len).map(decode_name).collect()
    };

    // Every field of every element is at least one 8-byte tag.
    let needed = count.saturating_mul(field_names.len()).saturating_mul(8);
    if needed > reader.remaining() || (field_names.is_empty() && count > MAX_FIELDLESS_ELEMENTS) {
        return Err(FigError::format(format!(
            "struct array declares {count} elements with {} fields in {} bytes",
            field_names.len(),
            reader.remaining()
        )));
    }

    let mut elements = Vec::with_capacity(count);
    for _ in 0..count {
        let mut fields = IndexMap::with_capacity(field_names.len());
        for field in &field_names {
            fields.insert(field.clone(), read_nested(reader)?);
        }
        elements.push(fields);
    }

    Ok(StructArray {
        dims,
        field_names,
        elements,
    })
}
