//! Interactive geometry editing on a map surface.
//!
//! - [`DrawSessionManager`]: the Idle/Editing state machine for one surface
//! - [`DrawSession`] and [`DrawGroup`]: the shapes under edit
//! - [`Shape`]: drawable shapes and their GeoJSON mapping
//! - [`DrawControl`]: configuration of the draw toolbar
//! - [`MapSurface`]: what the host's map must provide
//! - [`SurfaceRegistry`]: lookup of surfaces by id

pub mod control;
pub mod event;
pub mod manager;
pub mod registry;
pub mod session;
pub mod shape;
pub mod surface;

pub use control::{ControlPosition, DrawControl};
pub use event::DrawEvent;
pub use manager::{DrawEntry, DrawSessionManager, EditOutcome};
pub use registry::{SurfaceId, SurfaceRegistry};
pub use session::{DrawGroup, DrawSession, EventOutcome};
pub use shape::{LatLng, Shape, ShapeStyle, shapes_to_feature_collection};
pub use surface::{ControlHandle, HeadlessSurface, MapSurface, ShapeId, SurfaceCall};
