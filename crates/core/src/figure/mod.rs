use serde::Serialize;

use crate::{
    axes::{decode_axes_with, AxesNode},
    config::LoadOptions,
    kind::{FigureChild, ObjectKind},
    record::{PropertyBag, Record},
    series::ErrorBarNode,
    FigError, Result,
};

/// Root of a decoded figure tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FigureNode {
    pub properties: PropertyBag,
    pub children: Vec<AxesNode>,
}

impl FigureNode {
    /// Iterates over every error-bar series of every axes, in container order.
    pub fn series(&self) -> impl Iterator<Item = &ErrorBarNode> {
        self.children.iter().flat_map(|axes| axes.children.iter())
    }
}

pub fn decode_figure<R: Record>(record: &R) -> Result<FigureNode> {
    decode_figure_with(record, &LoadOptions::default())
}

pub fn decode_figure_with<R: Record>(record: &R, options: &LoadOptions) -> Result<FigureNode> {
    let tag = record.type_tag()?;
    if ObjectKind::from_tag(&tag) != ObjectKind::Figure {
        return Err(FigError::TypeMismatch {
            expected: "a figure",
            found: tag,
        });
    }

    let mut children = Vec::new();
    for child in record.children()? {
        match FigureChild::from(ObjectKind::from_tag(&child.type_tag()?)) {
            FigureChild::Axes => children.push(decode_axes_with(&child, options)?),
            FigureChild::Unrecognized(kind) => {
                tracing::debug!(kind = kind.tag(), "skipping figure child");
            }
        }
    }

    tracing::debug!(axes = children.len(), "decoded figure");
    Ok(FigureNode {
        properties: record.property_bag()?,
        children,
    })
}
