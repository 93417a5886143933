use serde::Serialize;

use crate::{
    config::{LengthCheck, LoadOptions},
    mat::Value,
    record::Record,
    shape, FigError, Result,
};

/// Decoded `specgraph.errorbarseries`.
///
/// Unlike figures and axes, a series keeps a fixed, curated set of
/// properties rather than its whole property bag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorBarNode {
    pub label: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    /// Row 0 holds the lower bound magnitudes, row 1 the upper ones.
    pub yerr: [Vec<f64>; 2],
    pub color: [f64; 3],
}

impl ErrorBarNode {
    pub fn lower(&self) -> &[f64] {
        &self.yerr[0]
    }

    pub fn upper(&self) -> &[f64] {
        &self.yerr[1]
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Decodes an error-bar series with the default (strict) options.
///
/// The record's type tag is not checked; callers filter by kind first.
pub fn decode_errorbar<R: Record>(record: &R) -> Result<ErrorBarNode> {
    decode_errorbar_with(record, &LoadOptions::default())
}

pub fn decode_errorbar_with<R: Record>(record: &R, options: &LoadOptions) -> Result<ErrorBarNode> {
    let label = shape::first_string("DisplayName", required(record, "DisplayName")?)?;
    let x = shape::column_vector("XData", required(record, "XData")?)?;
    let y = shape::column_vector("YData", required(record, "YData")?)?;
    let lower = shape::column_vector("LData", required(record, "LData")?)?;
    let upper = shape::column_vector("UData", required(record, "UData")?)?;
    let color = shape::first_row("Color", required(record, "Color")?, 3)?;

    if options.length_check == LengthCheck::Strict {
        for (field, values) in [("YData", &y), ("LData", &lower), ("UData", &upper)] {
            if values.len() != x.len() {
                return Err(FigError::shape(
                    field,
                    format!("has {} values but XData has {}", values.len(), x.len()),
                ));
            }
        }
    }

    tracing::debug!(label = %label, points = x.len(), "decoded error-bar series");
    Ok(ErrorBarNode {
        label,
        x,
        y,
        yerr: [lower, upper],
        color: [color[0], color[1], color[2]],
    })
}

fn required<'r, R: Record>(record: &'r R, field: &str) -> Result<&'r Value> {
    record.property(field)?.ok_or_else(|| FigError::missing(field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        mat::{CellArray, Fields, StructArray},
        record::HgRecord,
    };

    fn series_fields(properties: Fields) -> Fields {
        let mut fields = Fields::new();
        fields.insert("type".to_string(), Value::text("specgraph.errorbarseries"));
        fields.insert(
            "properties".to_string(),
            Value::Struct(StructArray::scalar(properties)),
        );
        fields.insert("children".to_string(), Value::matrix(0, 0, Vec::new()));
        fields
    }

    fn well_formed() -> Fields {
        let mut properties = Fields::new();
        properties.insert("DisplayName".to_string(), Value::text("run1"));
        properties.insert("XData".to_string(), Value::column(&[0.0, 1.0, 2.0]));
        properties.insert("YData".to_string(), Value::column(&[1.0, 3.0, 2.0]));
        properties.insert("LData".to_string(), Value::column(&[0.1, 0.2, 0.1]));
        properties.insert("UData".to_string(), Value::column(&[0.1, 0.1, 0.2]));
        properties.insert("Color".to_string(), Value::row(&[0.2, 0.4, 0.6]));
        properties.insert("LineWidth".to_string(), Value::row(&[0.5]));
        properties
    }

    #[test]
    fn extracts_curated_properties() {
        let fields = series_fields(well_formed());
        let node = decode_errorbar(&HgRecord::new(&fields)).unwrap();

        assert_eq!(node.label, "run1");
        assert_eq!(node.x, vec![0.0, 1.0, 2.0]);
        assert_eq!(node.y, vec![1.0, 3.0, 2.0]);
        assert_eq!(node.lower(), &[0.1, 0.2, 0.1]);
        assert_eq!(node.upper(), &[0.1, 0.1, 0.2]);
        assert_eq!(node.color, [0.2, 0.4, 0.6]);
        assert_eq!(node.len(), 3);
    }

    #[test]
    fn column_data_is_flattened() {
        let mut properties = well_formed();
        properties.insert("XData".to_string(), Value::matrix(3, 1, vec![1.0, 2.0, 3.0]));
        let fields = series_fields(properties);
        let node = decode_errorbar(&HgRecord::new(&fields)).unwrap();
        assert_eq!(node.x, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn label_may_be_stored_in_a_cell() {
        let mut properties = well_formed();
        properties.insert(
            "DisplayName".to_string(),
            Value::Cell(CellArray {
                dims: vec![1, 1],
                items: vec![Value::text("run1")],
            }),
        );
        let fields = series_fields(properties);
        let node = decode_errorbar(&HgRecord::new(&fields)).unwrap();
        assert_eq!(node.label, "run1");
    }

    #[test]
    fn each_missing_field_is_named() {
        for field in ["DisplayName", "XData", "YData", "LData", "UData", "Color"] {
            let mut properties = well_formed();
            properties.shift_remove(field);
            let fields = series_fields(properties);

            let err = decode_errorbar(&HgRecord::new(&fields)).unwrap_err();
            match err {
                FigError::MissingField { field: missing } => assert_eq!(missing, field),
                other => panic!("expected missing field, got {other:?}"),
            }
        }
    }

    #[test]
    fn missing_property_struct_is_not_a_missing_field() {
        let mut fields = series_fields(well_formed());
        fields.shift_remove("properties");

        let err = decode_errorbar(&HgRecord::new(&fields)).unwrap_err();
        assert!(matches!(err, FigError::Structure(_)), "{err:?}");
    }

    #[test]
    fn mismatched_bounds_fail_in_strict_mode() {
        let mut properties = well_formed();
        properties.insert("LData".to_string(), Value::column(&[0.1, 0.2]));
        properties.insert("UData".to_string(), Value::column(&[0.1, 0.2, 0.3, 0.4]));
        let fields = series_fields(properties);

        let err = decode_errorbar(&HgRecord::new(&fields)).unwrap_err();
        assert!(matches!(err, FigError::Shape { ref field, .. } if field == "LData"));
    }

    #[test]
    fn mismatched_bounds_are_kept_in_permissive_mode() {
        let mut properties = well_formed();
        properties.insert("LData".to_string(), Value::column(&[0.1, 0.2]));
        let fields = series_fields(properties);

        let node =
            decode_errorbar_with(&HgRecord::new(&fields), &LoadOptions::permissive()).unwrap();
        assert_eq!(node.lower(), &[0.1, 0.2]);
        assert_eq!(node.x.len(), 3);
    }

    #[test]
    fn color_must_have_three_channels() {
        let mut properties = well_formed();
        properties.insert("Color".to_string(), Value::row(&[0.2, 0.4]));
        let fields = series_fields(properties);

        let err = decode_errorbar(&HgRecord::new(&fields)).unwrap_err();
        assert!(matches!(err, FigError::Shape { ref field, .. } if field == "Color"));
    }

    #[test]
    fn matrix_data_is_a_shape_error() {
        let mut properties = well_formed();
        properties.insert(
            "YData".to_string(),
            Value::matrix(3, 2, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]),
        );
        let fields = series_fields(properties);

        let err = decode_errorbar(&HgRecord::new(&fields)).unwrap_err();
        assert!(matches!(err, FigError::Shape { ref field, .. } if field == "YData"));
    }
}
