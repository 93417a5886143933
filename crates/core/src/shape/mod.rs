//! Shape normalisation for container values.
//!
//! MATLAB stores lists as `N x 1` column vectors, so every numeric series
//! property arrives two-dimensional. The helpers here turn those arrays back
//! into flat sequences and fail with [`FigError::Shape`] when a value cannot
//! be read that way.

use crate::{mat::Value, FigError, Result};

/// Flattens a vector-shaped numeric array into a plain sequence.
///
/// `N x 1` is the usual layout, `1 x N` and `1 x 1` are accepted as well.
/// Arrays with more than one non-singleton dimension are rejected.
pub fn column_vector(field: &str, value: &Value) -> Result<Vec<f64>> {
    let Some(array) = value.as_numeric() else {
        return Err(FigError::shape(
            field,
            format!("expected a numeric vector, found {}", value.describe()),
        ));
    };
    if array.dims.is_empty() {
        return Err(FigError::shape(field, "value has no dimensions"));
    }
    if array.real.is_empty() {
        return Ok(Vec::new());
    }

    let non_singleton = array.dims.iter().filter(|&&dim| dim > 1).count();
    if non_singleton > 1 {
        return Err(FigError::shape(
            field,
            format!("expected a vector, found {}", value.describe()),
        ));
    }
    Ok(array.real.clone())
}

/// Returns the first row of a numeric matrix, which must have exactly
/// `width` columns.
pub fn first_row(field: &str, value: &Value, width: usize) -> Result<Vec<f64>> {
    let Some(array) = value.as_numeric() else {
        return Err(FigError::shape(
            field,
            format!("expected a numeric row, found {}", value.describe()),
        ));
    };
    if array.rows() == 0 || array.cols() != width {
        return Err(FigError::shape(
            field,
            format!(
                "expected at least one row of {width} values, found {}",
                value.describe()
            ),
        ));
    }
    let row: Vec<f64> = (0..width).filter_map(|col| array.get(0, col)).collect();
    if row.len() != width {
        return Err(FigError::shape(field, "row storage is shorter than its dimensions"));
    }
    Ok(row)
}

/// Returns the first string of a char array or of a cell array of strings.
///
/// An empty char array yields an empty string.
pub fn first_string(field: &str, value: &Value) -> Result<String> {
    match value {
        Value::Char(array) => Ok(array.rows.first().cloned().unwrap_or_default()),
        Value::Cell(cell) => match cell.items.first() {
            Some(item) => first_string(field, item),
            None => Ok(String::new()),
        },
        Value::Empty => Ok(String::new()),
        other => Err(FigError::shape(
            field,
            format!("expected text, found {}", other.describe()),
        )),
    }
}
