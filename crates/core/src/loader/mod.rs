use std::path::Path;

use crate::{
    config::LoadOptions,
    figure::{decode_figure_with, FigureNode},
    mat::{self, MatFile, Value},
    record::HgRecord,
    FigError, Result,
};

/// Returns the root record variable of a parsed container.
pub fn root_value<'a>(file: &'a MatFile, options: &LoadOptions) -> Result<&'a Value> {
    file.variable(&options.root_key).ok_or_else(|| {
        FigError::structure(format!(
            "container has no `{}` root record",
            options.root_key
        ))
    })
}

/// Decodes the figure held by an already parsed container.
pub fn decode_container(file: &MatFile, options: &LoadOptions) -> Result<FigureNode> {
    let root = HgRecord::from_value(root_value(file, options)?)?;
    decode_figure_with(&root, options)
}

/// Loads the figure stored at `path` with default options.
pub fn load_figure(path: impl AsRef<Path>) -> Result<FigureNode> {
    load_figure_with(path, &LoadOptions::default())
}

pub fn load_figure_with(path: impl AsRef<Path>, options: &LoadOptions) -> Result<FigureNode> {
    let path = path.as_ref();
    tracing::info!(?path, "loading figure");
    let file = mat::parse_file(path)?;
    decode_container(&file, options)
}

/// Decodes a figure from the bytes of a `.fig` file.
pub fn decode_figure_bytes(bytes: &[u8], options: &LoadOptions) -> Result<FigureNode> {
    let file = mat::parse_bytes(bytes)?;
    decode_container(&file, options)
}
