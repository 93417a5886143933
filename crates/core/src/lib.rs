//! Core library for the MATLAB figure reader.
//!
//! A `.fig` file is a MAT-file holding the handle-graphics tree of a figure.
//! The [`mat`] module parses the container into generic values; the
//! [`figure`], [`axes`] and [`series`] decoders then rebuild a typed
//! figure → axes → error-bar series tree from it. Child kinds other than the
//! ones each level understands are skipped, never treated as errors.

pub mod axes;
pub mod config;
pub mod error;
pub mod figure;
pub mod kind;
pub mod loader;
pub mod mat;
pub mod record;
pub mod series;
pub mod shape;

pub use axes::{decode_axes, decode_axes_with, AxesNode};
pub use config::{LengthCheck, LoadOptions, DEFAULT_ROOT_KEY};
pub use error::{FigError, Result};
pub use figure::{decode_figure, decode_figure_with, FigureNode};
pub use kind::{AxesChild, FigureChild, ObjectKind};
pub use loader::{decode_container, decode_figure_bytes, load_figure, load_figure_with};
pub use mat::{MatFile, Value};
pub use record::{HgRecord, PropertyBag, Record};
pub use series::{decode_errorbar, decode_errorbar_with, ErrorBarNode};
