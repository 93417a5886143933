use indexmap::IndexMap;
use serde::Serialize;

/// Field map of a single struct element, in container order.
pub type Fields = IndexMap<String, Value>;

/// Generic value decoded from a MAT-file array.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Value {
    Numeric(NumericArray),
    Char(CharArray),
    Cell(CellArray),
    Struct(StructArray),
    /// Old-style class instance: a struct payload tagged with a class name.
    Object {
        class_name: String,
        fields: StructArray,
    },
    /// An array element with no payload at all.
    Empty,
    /// Array classes the reader recognises but does not decode (sparse
    /// matrices, function handles, opaque MCOS objects).
    Unsupported { class: u8 },
}

impl Value {
    /// Dimensions of the array; `Empty` and `Unsupported` report `0x0`.
    pub fn dims(&self) -> &[usize] {
        match self {
            Value::Numeric(array) => &array.dims,
            Value::Char(array) => &array.dims,
            Value::Cell(array) => &array.dims,
            Value::Struct(array) => &array.dims,
            Value::Object { fields, .. } => &fields.dims,
            Value::Empty | Value::Unsupported { .. } => &[0, 0],
        }
    }

    /// Short human readable description used in error messages.
    pub fn describe(&self) -> String {
        let dims = self
            .dims()
            .iter()
            .map(|dim| dim.to_string())
            .collect::<Vec<_>>()
            .join("x");
        let kind = match self {
            Value::Numeric(array) if array.logical => "logical",
            Value::Numeric(_) => "numeric",
            Value::Char(_) => "char",
            Value::Cell(_) => "cell",
            Value::Struct(_) => "struct",
            Value::Object { .. } => "object",
            Value::Empty => "empty",
            Value::Unsupported { .. } => "unsupported",
        };
        format!("{dims} {kind}")
    }

    /// Number of elements, the product of all dimensions. Saturates at
    /// `usize::MAX`.
    pub fn len(&self) -> usize {
        self.dims()
            .iter()
            .try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
            .unwrap_or(usize::MAX)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_numeric(&self) -> Option<&NumericArray> {
        match self {
            Value::Numeric(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_char(&self) -> Option<&CharArray> {
        match self {
            Value::Char(array) => Some(array),
            _ => None,
        }
    }

    /// Struct payload of either a plain struct or a class instance.
    pub fn as_struct(&self) -> Option<&StructArray> {
        match self {
            Value::Struct(array) => Some(array),
            Value::Object { fields, .. } => Some(fields),
            _ => None,
        }
    }

    pub fn as_cell(&self) -> Option<&CellArray> {
        match self {
            Value::Cell(array) => Some(array),
            _ => None,
        }
    }

    /// Convenience constructor for an `rows x cols` double matrix stored
    /// column-major.
    pub fn matrix(rows: usize, cols: usize, real: Vec<f64>) -> Self {
        Value::Numeric(NumericArray {
            class: NumericClass::Double,
            dims: vec![rows, cols],
            real,
            imag: None,
            logical: false,
        })
    }

    /// An `N x 1` double column vector.
    pub fn column(values: &[f64]) -> Self {
        Self::matrix(values.len(), 1, values.to_vec())
    }

    /// A `1 x N` double row vector.
    pub fn row(values: &[f64]) -> Self {
        Self::matrix(1, values.len(), values.to_vec())
    }

    /// A single-row char array.
    pub fn text(text: &str) -> Self {
        let len = text.chars().count();
        Value::Char(CharArray {
            dims: vec![usize::from(len > 0), len],
            rows: if len > 0 { vec![text.to_string()] } else { Vec::new() },
        })
    }
}

/// Storage class of a numeric array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericClass {
    Double,
    Single,
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
}

impl NumericClass {
    pub(crate) fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            6 => Self::Double,
            7 => Self::Single,
            8 => Self::Int8,
            9 => Self::UInt8,
            10 => Self::Int16,
            11 => Self::UInt16,
            12 => Self::Int32,
            13 => Self::UInt32,
            14 => Self::Int64,
            15 => Self::UInt64,
            _ => return None,
        })
    }
}

/// Numeric (or logical) array, values widened to `f64` and kept in
/// column-major order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericArray {
    pub class: NumericClass,
    pub dims: Vec<usize>,
    pub real: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imag: Option<Vec<f64>>,
    pub logical: bool,
}

impl NumericArray {
    pub fn rows(&self) -> usize {
        self.dims.first().copied().unwrap_or(0)
    }

    /// Columns, folding every trailing dimension together.
    pub fn cols(&self) -> usize {
        self.dims.iter().skip(1).product()
    }

    /// Element at `(row, col)` of the column-major storage.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.rows() || col >= self.cols() {
            return None;
        }
        self.real.get(row + col * self.rows()).copied()
    }
}

/// Char matrix, kept as one string per row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CharArray {
    pub dims: Vec<usize>,
    pub rows: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellArray {
    pub dims: Vec<usize>,
    pub items: Vec<Value>,
}

/// Struct array. Every element shares `field_names`; elements are stored in
/// column-major order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructArray {
    pub dims: Vec<usize>,
    pub field_names: Vec<String>,
    pub elements: Vec<Fields>,
}

impl StructArray {
    /// A `1 x 1` struct holding `fields`.
    pub fn scalar(fields: Fields) -> Self {
        Self {
            dims: vec![1, 1],
            field_names: fields.keys().cloned().collect(),
            elements: vec![fields],
        }
    }

    /// An `N x 1` struct array; all elements must share the same field names.
    pub fn column(elements: Vec<Fields>) -> Self {
        let field_names = elements
            .first()
            .map(|fields| fields.keys().cloned().collect())
            .unwrap_or_default();
        Self {
            dims: vec![elements.len(), usize::from(!elements.is_empty())],
            field_names,
            elements,
        }
    }
}
