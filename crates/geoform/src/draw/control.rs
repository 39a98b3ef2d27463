//! The interactive draw/edit control attached while a session is live.
//!
//! The control is plain data. It serializes to the camelCase option layout
//! web draw toolbars take, so a surface can hand it to its renderer as-is.

use serde::{Deserialize, Serialize};

use crate::config::DrawOptions;
use crate::limits::{DRAW_ERROR_COLOR, SELECTED_FILL_OPACITY};

/// Corner of the map the toolbar sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlPosition {
    #[default]
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Stroke options for drawn paths.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PathOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl PathOptions {
    fn stroke(color: &str, weight: f64) -> Self {
        Self {
            color: Some(color.to_string()),
            weight: Some(weight),
        }
    }
}

/// A tool that draws an outlined area (circle, rectangle).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaTool {
    pub shape_options: PathOptions,
    pub show_area: bool,
}

/// A tool that places points (marker, circle marker).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointTool {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape_options: Option<PathOptions>,
    pub repeat_mode: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolylineTool {
    pub shape_options: PathOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolygonTool {
    /// Only simple polygons when false.
    pub allow_intersection: bool,
    pub draw_error: PathOptions,
    pub shape_options: PathOptions,
    pub show_area: bool,
}

/// Drawing tools offered by the toolbar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawTools {
    pub circle: AreaTool,
    pub circlemarker: PointTool,
    pub marker: PointTool,
    pub rectangle: AreaTool,
    pub polyline: PolylineTool,
    pub polygon: PolygonTool,
}

/// Look of a path while it is selected for editing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedPathOptions {
    pub maintain_color: bool,
    pub fill_opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditOptions {
    pub selected_path_options: SelectedPathOptions,
    /// Show a centroid handle that moves the whole shape.
    pub move_markers: bool,
    pub shape_options: PathOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolyEditOptions {
    pub allow_intersection: bool,
    pub show_area: bool,
}

/// Edit and delete tools for shapes already in the draw group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditTools {
    pub edit: EditOptions,
    pub poly: PolyEditOptions,
    pub remove: bool,
}

/// Full configuration of the draw control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawControl {
    pub position: ControlPosition,
    pub draw: DrawTools,
    pub edit: EditTools,
}

impl DrawControl {
    /// Builds the control for a session whose new shapes use `color`.
    pub fn new(color: &str, options: &DrawOptions) -> Self {
        let weight = options.shape_weight;
        let repeat_mode = options.repeat_mode;

        let draw = DrawTools {
            circle: AreaTool {
                shape_options: PathOptions::stroke(color, weight),
                show_area: true,
            },
            circlemarker: PointTool {
                shape_options: Some(PathOptions {
                    color: None,
                    weight: Some(weight),
                }),
                repeat_mode,
            },
            marker: PointTool {
                shape_options: None,
                repeat_mode,
            },
            rectangle: AreaTool {
                shape_options: PathOptions::stroke(color, weight),
                show_area: true,
            },
            polyline: PolylineTool {
                shape_options: PathOptions::stroke(color, weight),
            },
            polygon: PolygonTool {
                allow_intersection: false,
                draw_error: PathOptions {
                    color: Some(DRAW_ERROR_COLOR.to_string()),
                    weight: None,
                },
                shape_options: PathOptions {
                    color: Some(color.to_string()),
                    weight: None,
                },
                show_area: true,
            },
        };

        // Shapes being edited keep the default color, not the entry's.
        let edit = EditTools {
            edit: EditOptions {
                selected_path_options: SelectedPathOptions {
                    maintain_color: true,
                    fill_opacity: SELECTED_FILL_OPACITY,
                },
                move_markers: true,
                shape_options: PathOptions {
                    color: Some(options.default_color.clone()),
                    weight: None,
                },
            },
            poly: PolyEditOptions {
                allow_intersection: false,
                show_area: true,
            },
            remove: true,
        };

        Self {
            position: ControlPosition::TopLeft,
            draw,
            edit,
        }
    }

    /// Color applied to newly drawn paths.
    pub fn color(&self) -> Option<&str> {
        self.draw.polyline.shape_options.color.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_entry_color_reaches_draw_tools() {
        let control = DrawControl::new("#0000ff", &DrawOptions::default());
        assert_eq!(control.color(), Some("#0000ff"));
        assert_eq!(control.draw.circle.shape_options.color.as_deref(), Some("#0000ff"));
        assert_eq!(control.draw.polygon.shape_options.color.as_deref(), Some("#0000ff"));
        assert_eq!(control.draw.polygon.draw_error.color.as_deref(), Some("#e1e100"));
        assert_eq!(control.edit.edit.shape_options.color.as_deref(), Some("#ff0000"));
    }

    #[test]
    fn test_fixed_settings() {
        let control = DrawControl::new("#ff0000", &DrawOptions::default());
        assert_eq!(control.position, ControlPosition::TopLeft);
        assert!(!control.draw.polygon.allow_intersection);
        assert!(control.draw.polygon.show_area);
        assert!(control.edit.edit.move_markers);
        assert!(control.edit.edit.selected_path_options.maintain_color);
        assert_eq!(control.edit.edit.selected_path_options.fill_opacity, 0.3);
        assert!(control.edit.remove);
        assert!(control.draw.marker.repeat_mode);
        assert_eq!(control.draw.polyline.shape_options.weight, Some(4.0));
    }

    #[test]
    fn test_serialized_layout() {
        let options = DrawOptions {
            repeat_mode: false,
            ..DrawOptions::default()
        };
        let value = serde_json::to_value(DrawControl::new("#ff0000", &options)).unwrap();
        assert_eq!(value["position"], json!("topleft"));
        assert_eq!(value["draw"]["marker"], json!({"repeatMode": false}));
        assert_eq!(
            value["draw"]["polygon"]["drawError"],
            json!({"color": "#e1e100"})
        );
        assert_eq!(
            value["edit"]["edit"]["selectedPathOptions"]["maintainColor"],
            json!(true)
        );
        assert_eq!(value["edit"]["poly"]["allowIntersection"], json!(false));
    }
}
