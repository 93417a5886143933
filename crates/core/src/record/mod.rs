use indexmap::IndexMap;

use crate::{
    mat::{Fields, Value},
    shape, FigError, Result,
};

/// Ordered name → value map copied verbatim from a record's properties.
pub type PropertyBag = IndexMap<String, Value>;

/// Capabilities the decoders need from a container record.
///
/// A record is one node of the handle-graphics tree: it carries a type tag,
/// a property struct and a list of child records. The `handle` and `special`
/// fields are never read.
pub trait Record: Sized {
    /// The record's type tag, e.g. `figure` or `specgraph.errorbarseries`.
    fn type_tag(&self) -> Result<String>;

    /// Looks up a single property by its exact, case-sensitive name.
    ///
    /// Fails with `Structure` when the record has no property struct at
    /// all; an absent property is `Ok(None)`.
    fn property(&self, name: &str) -> Result<Option<&Value>>;

    /// Copies every property into a bag, preserving container order.
    fn property_bag(&self) -> Result<PropertyBag>;

    /// Child records in container order.
    fn children(&self) -> Result<Vec<Self>>;
}

/// [`Record`] adapter over one element of a decoded `hgS` struct array.
#[derive(Debug, Clone, Copy)]
pub struct HgRecord<'a> {
    fields: &'a Fields,
}

impl<'a> HgRecord<'a> {
    pub fn new(fields: &'a Fields) -> Self {
        Self { fields }
    }

    /// Wraps the first element of a struct-valued container variable.
    pub fn from_value(value: &'a Value) -> Result<Self> {
        let array = value.as_struct().ok_or_else(|| {
            FigError::structure(format!(
                "expected a struct record, found {}",
                value.describe()
            ))
        })?;
        array
            .elements
            .first()
            .map(Self::new)
            .ok_or_else(|| FigError::structure("record struct has no elements"))
    }

    fn properties(&self) -> Result<&'a Fields> {
        let value = self
            .fields
            .get("properties")
            .ok_or_else(|| FigError::structure("record has no `properties` field"))?;
        value
            .as_struct()
            .and_then(|array| array.elements.first())
            .ok_or_else(|| {
                FigError::structure(format!(
                    "record `properties` should be a scalar struct, found {}",
                    value.describe()
                ))
            })
    }
}

impl<'a> Record for HgRecord<'a> {
    fn type_tag(&self) -> Result<String> {
        let value = self
            .fields
            .get("type")
            .ok_or_else(|| FigError::structure("record has no `type` field"))?;
        shape::first_string("type", value).map_err(|_| {
            FigError::structure(format!(
                "record `type` should be text, found {}",
                value.describe()
            ))
        })
    }

    fn property(&self, name: &str) -> Result<Option<&Value>> {
        Ok(self.properties()?.get(name))
    }

    fn property_bag(&self) -> Result<PropertyBag> {
        Ok(self.properties()?.clone())
    }

    fn children(&self) -> Result<Vec<Self>> {
        match self.fields.get("children") {
            None | Some(Value::Empty) => Ok(Vec::new()),
            Some(Value::Struct(array)) => Ok(array.elements.iter().map(Self::new).collect()),
            // Leaf objects store `[]` instead of an empty struct array.
            Some(value) if value.is_empty() => Ok(Vec::new()),
            Some(other) => Err(FigError::structure(format!(
                "`children` should be a struct array, found {}",
                other.describe()
            ))),
        }
    }
}
