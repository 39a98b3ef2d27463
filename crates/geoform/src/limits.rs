//! Numeric limits and defaults.

/// Decimal digits kept when numbers are rounded for output.
///
/// Applies to the codec's fallback for unrecognized geometry kinds and to
/// coordinates exported from the draw group.
pub const COORDINATE_PRECISION: u32 = 6;

/// Minimum number of positions in a Polygon compact value.
pub const MIN_POLYGON_POINTS: usize = 3;

/// Position arity bounds: (lat, lon) or (lat, lon, alt).
pub const MIN_POSITION_LEN: usize = 2;
pub const MAX_POSITION_LEN: usize = 3;

/// Maximum nesting of shape groups unwrapped when loading an entry.
pub const MAX_GROUP_DEPTH: usize = 16;

/// Color applied to newly drawn shapes when the entry has none.
pub const DEFAULT_SHAPE_COLOR: &str = "#ff0000";

/// Color a polygon turns while it self-intersects.
pub const DRAW_ERROR_COLOR: &str = "#e1e100";

/// Stroke weight of newly drawn shapes.
pub const DEFAULT_SHAPE_WEIGHT: f64 = 4.0;

/// Fill opacity of a shape selected for editing.
pub const SELECTED_FILL_OPACITY: f64 = 0.3;
