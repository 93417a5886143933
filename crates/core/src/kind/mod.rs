/// Handle-graphics object kinds known to the reader.
///
/// A `.fig` tree usually looks like
///
/// ```text
/// figure
///   |- axes
///   |    |- surface
///   |    |- graph2d.lineseries
///   |    |- specgraph.errorbarseries
///   |- legend
///   |- scribe.colorbar
///   |- scribe.scribeaxes
/// ```
///
/// Only some of these are decoded; the rest are named here so a parent can
/// say explicitly which children it skips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectKind {
    Figure,
    Axes,
    ErrorBarSeries,
    LineSeries,
    Surface,
    Legend,
    ScribeLegend,
    Colorbar,
    ScribeAxes,
    Unrecognized(String),
}

impl ObjectKind {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "figure" => Self::Figure,
            "axes" => Self::Axes,
            "specgraph.errorbarseries" => Self::ErrorBarSeries,
            "graph2d.lineseries" => Self::LineSeries,
            "surface" => Self::Surface,
            "legend" => Self::Legend,
            "scribe.legend" => Self::ScribeLegend,
            "scribe.colorbar" => Self::Colorbar,
            "scribe.scribeaxes" => Self::ScribeAxes,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    /// The type tag as stored in the container.
    pub fn tag(&self) -> &str {
        match self {
            Self::Figure => "figure",
            Self::Axes => "axes",
            Self::ErrorBarSeries => "specgraph.errorbarseries",
            Self::LineSeries => "graph2d.lineseries",
            Self::Surface => "surface",
            Self::Legend => "legend",
            Self::ScribeLegend => "scribe.legend",
            Self::Colorbar => "scribe.colorbar",
            Self::ScribeAxes => "scribe.scribeaxes",
            Self::Unrecognized(tag) => tag,
        }
    }
}

/// Children a figure decodes. Everything else is skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FigureChild {
    Axes,
    Unrecognized(ObjectKind),
}

impl From<ObjectKind> for FigureChild {
    fn from(kind: ObjectKind) -> Self {
        match kind {
            ObjectKind::Axes => Self::Axes,
            other => Self::Unrecognized(other),
        }
    }
}

/// Children an axes decodes. Everything else is skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AxesChild {
    ErrorBarSeries,
    Unrecognized(ObjectKind),
}

impl From<ObjectKind> for AxesChild {
    fn from(kind: ObjectKind) -> Self {
        match kind {
            ObjectKind::ErrorBarSeries => Self::ErrorBarSeries,
            other => Self::Unrecognized(other),
        }
    }
}
