//! Test-only MAT-file writer used to build synthetic `.fig` containers.
#![allow(dead_code)]

use std::io::Write;

use fig_reader_core::mat::{Fields, StructArray, Value};
use flate2::{write::ZlibEncoder, Compression};

const MI_INT8: u32 = 1;
const MI_UINT16: u32 = 4;
const MI_INT32: u32 = 5;
const MI_UINT32: u32 = 6;
const MI_DOUBLE: u32 = 9;
const MI_MATRIX: u32 = 14;
const MI_COMPRESSED: u32 = 15;

const FIELD_NAME_LEN: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Plain,
    Compressed,
    BigEndian,
}

struct Writer {
    big: bool,
}

impl Writer {
    fn u32(&self, value: u32) -> [u8; 4] {
        if self.big {
            value.to_be_bytes()
        } else {
            value.to_le_bytes()
        }
    }

    fn element(&self, data_type: u32, payload: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(payload.len() + 16);
        out.extend_from_slice(&self.u32(data_type));
        out.extend_from_slice(&self.u32(payload.len() as u32));
        out.extend_from_slice(payload);
        while out.len() % 8 != 0 {
            out.push(0);
        }
        out
    }

    fn header(&self, class: u8, flags: u32, dims: &[usize], name: &str) -> Vec<u8> {
        let mut out = Vec::new();
        let mut flag_bytes = Vec::new();
        flag_bytes.extend_from_slice(&self.u32(class as u32 | flags));
        flag_bytes.extend_from_slice(&self.u32(0));
        out.extend(self.element(MI_UINT32, &flag_bytes));

        let dim_bytes: Vec<u8> = dims.iter().flat_map(|&dim| self.u32(dim as u32)).collect();
        out.extend(self.element(MI_INT32, &dim_bytes));
        out.extend(self.element(MI_INT8, name.as_bytes()));
        out
    }

    fn matrix(&self, name: &str, value: &Value) -> Vec<u8> {
        let payload = match value {
            Value::Empty => Vec::new(),
            Value::Numeric(array) => {
                let mut out = self.header(6, 0, &array.dims, name);
                let data: Vec<u8> = array
                    .real
                    .iter()
                    .flat_map(|v| {
                        if self.big {
                            v.to_be_bytes()
                        } else {
                            v.to_le_bytes()
                        }
                    })
                    .collect();
                out.extend(self.element(MI_DOUBLE, &data));
                out
            }
            Value::Char(array) => {
                let mut out = self.header(4, 0, &array.dims, name);
                let rows: Vec<Vec<u16>> = array
                    .rows
                    .iter()
                    .map(|row| row.encode_utf16().collect())
                    .collect();
                let cols = rows.first().map(Vec::len).unwrap_or(0);
                let mut data = Vec::new();
                for col in 0..cols {
                    for row in &rows {
                        let unit = row[col];
                        data.extend_from_slice(&if self.big {
                            unit.to_be_bytes()
                        } else {
                            unit.to_le_bytes()
                        });
                    }
                }
                out.extend(self.element(MI_UINT16, &data));
                out
            }
            Value::Cell(array) => {
                let mut out = self.header(1, 0, &array.dims, name);
                for item in &array.items {
                    out.extend(self.matrix("", item));
                }
                out
            }
            Value::Struct(array) => {
                let mut out = self.header(2, 0, &array.dims, name);
                out.extend(self.element(MI_INT32, &self.u32(FIELD_NAME_LEN as u32)));
                let mut names = Vec::new();
                for field in &array.field_names {
                    let mut padded = field.as_bytes().to_vec();
                    padded.resize(FIELD_NAME_LEN, 0);
                    names.extend(padded);
                }
                out.extend(self.element(MI_INT8, &names));
                for element in &array.elements {
                    for field in &array.field_names {
                        out.extend(self.matrix("", &element[field]));
                    }
                }
                out
            }
            other => panic!("test writer cannot encode {other:?}"),
        };
        self.element(MI_MATRIX, &payload)
    }
}

/// Encodes `variables` into a complete MAT-file.
pub fn container(variables: &[(&str, Value)], layout: Layout) -> Vec<u8> {
    let writer = Writer {
        big: layout == Layout::BigEndian,
    };

    let mut out = vec![b' '; 116];
    let text = b"MATLAB 5.0 MAT-file, Platform: test, Created on: synthetic";
    out[..text.len()].copy_from_slice(text);
    out.extend_from_slice(&[0; 8]);
    if writer.big {
        out.extend_from_slice(&[0x01, 0x00]);
        out.extend_from_slice(b"MI");
    } else {
        out.extend_from_slice(&[0x00, 0x01]);
        out.extend_from_slice(b"IM");
    }

    for (name, value) in variables {
        let matrix = writer.matrix(name, value);
        if layout == Layout::Compressed {
            let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(&matrix).unwrap();
            let compressed = encoder.finish().unwrap();
            out.extend_from_slice(&writer.u32(MI_COMPRESSED));
            out.extend_from_slice(&writer.u32(compressed.len() as u32));
            out.extend(compressed);
        } else {
            out.extend(matrix);
        }
    }
    out
}

/// Builds one handle-graphics record struct element.
pub fn record(tag: &str, properties: Vec<(&str, Value)>, children: Vec<Fields>) -> Fields {
    let mut props = Fields::new();
    for (name, value) in properties {
        props.insert(name.to_string(), value);
    }

    let mut fields = Fields::new();
    fields.insert("type".to_string(), Value::text(tag));
    fields.insert("handle".to_string(), Value::row(&[1.0]));
    fields.insert(
        "properties".to_string(),
        Value::Struct(StructArray::scalar(props)),
    );
    let children = if children.is_empty() {
        Value::matrix(0, 0, Vec::new())
    } else {
        Value::Struct(StructArray::column(children))
    };
    fields.insert("children".to_string(), children);
    fields.insert("special".to_string(), Value::matrix(0, 0, Vec::new()));
    fields
}

pub fn root(record: Fields) -> Value {
    Value::Struct(StructArray::scalar(record))
}

/// The error-bar series used throughout the end-to-end tests.
pub fn run1_series() -> Fields {
    record(
        "specgraph.errorbarseries",
        vec![
            ("DisplayName", Value::text("run1")),
            ("XData", Value::column(&[0.0, 1.0, 2.0])),
            ("YData", Value::column(&[1.0, 3.0, 2.0])),
            ("LData", Value::column(&[0.1, 0.2, 0.1])),
            ("UData", Value::column(&[0.1, 0.1, 0.2])),
            ("Color", Value::matrix(1, 3, vec![0.2, 0.4, 0.6])),
        ],
        Vec::new(),
    )
}

/// figure(Name=Fig1) → axes(XLim=[0 10]) → run1 series.
pub fn sample_figure() -> Fields {
    let axes = record(
        "axes",
        vec![("XLim", Value::row(&[0.0, 10.0]))],
        vec![run1_series()],
    );
    record("figure", vec![("Name", Value::text("Fig1"))], vec![axes])
}

pub fn write_fig(dir: &tempfile::TempDir, name: &str, bytes: &[u8]) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}
