use serde::Serialize;

use crate::{
    config::LoadOptions,
    kind::{AxesChild, ObjectKind},
    record::{PropertyBag, Record},
    series::{decode_errorbar_with, ErrorBarNode},
    FigError, Result,
};

/// Decoded `axes` object: its full property bag plus its error-bar series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxesNode {
    pub properties: PropertyBag,
    pub children: Vec<ErrorBarNode>,
}

pub fn decode_axes<R: Record>(record: &R) -> Result<AxesNode> {
    decode_axes_with(record, &LoadOptions::default())
}

pub fn decode_axes_with<R: Record>(record: &R, options: &LoadOptions) -> Result<AxesNode> {
    let tag = record.type_tag()?;
    if ObjectKind::from_tag(&tag) != ObjectKind::Axes {
        return Err(FigError::TypeMismatch {
            expected: "an axes object",
            found: tag,
        });
    }

    let mut children = Vec::new();
    for child in record.children()? {
        match AxesChild::from(ObjectKind::from_tag(&child.type_tag()?)) {
            AxesChild::ErrorBarSeries => children.push(decode_errorbar_with(&child, options)?),
            AxesChild::Unrecognized(kind) => {
                tracing::debug!(kind = kind.tag(), "skipping axes child");
            }
        }
    }

    Ok(AxesNode {
        properties: record.property_bag()?,
        children,
    })
}
