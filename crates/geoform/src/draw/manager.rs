//! The draw session manager.
//!
//! One manager drives one map surface. It is either idle or editing exactly
//! one entry; starting a new session always ends the previous one first, so
//! at most one edit control is attached at any time.
//!
//! Surface calls can fail. Failures are logged and the manager carries on
//! with its own state, so ending a session is always possible and never
//! leaves the manager half-way between states.

use tracing::{debug, info, warn};

use crate::config::DrawOptions;
use crate::draw::control::DrawControl;
use crate::draw::event::DrawEvent;
use crate::draw::session::{DrawSession, EventOutcome};
use crate::draw::shape::{Shape, ShapeStyle};
use crate::draw::surface::{MapSurface, ShapeId};
use crate::model::GeoJson;

/// An entry whose geometry can be edited on a map.
pub trait DrawEntry {
    /// The entry's current geometry.
    fn geometry(&self) -> Option<&GeoJson>;

    /// Color for shapes drawn while editing this entry.
    fn color(&self) -> Option<&str> {
        None
    }

    /// Style applied to the entry's shapes when they are loaded.
    fn style(&self) -> ShapeStyle {
        ShapeStyle::default()
    }
}

/// Result of ending a session.
#[derive(Debug, Clone, PartialEq)]
pub struct EditOutcome<E> {
    /// The entry that was being edited.
    pub entry: Option<E>,
    /// The draw group at the end of the session, as a FeatureCollection.
    pub geometry: GeoJson,
}

#[derive(Debug)]
enum SessionState<E> {
    Idle,
    Editing(DrawSession<E>),
}

/// Runs edit sessions on a map surface.
#[derive(Debug)]
pub struct DrawSessionManager<S, E> {
    surface: S,
    options: DrawOptions,
    state: SessionState<E>,
}

impl<S: MapSurface, E: DrawEntry> DrawSessionManager<S, E> {
    /// Creates an idle manager with default options.
    pub fn new(surface: S) -> Self {
        Self::with_options(surface, DrawOptions::default())
    }

    /// Creates an idle manager.
    pub fn with_options(surface: S, options: DrawOptions) -> Self {
        Self {
            surface,
            options,
            state: SessionState::Idle,
        }
    }

    pub fn options(&self) -> &DrawOptions {
        &self.options
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, SessionState::Editing(_))
    }

    /// The live session, if any.
    pub fn session(&self) -> Option<&DrawSession<E>> {
        match &self.state {
            SessionState::Editing(session) => Some(session),
            SessionState::Idle => None,
        }
    }

    /// The entry being edited, if any.
    pub fn entry(&self) -> Option<&E> {
        self.session().and_then(DrawSession::entry)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Starts editing `entry`, or a blank drawing when `entry` is None.
    ///
    /// A live session is ended first and its outcome returned.
    pub fn start_editing(&mut self, entry: Option<E>) -> Option<EditOutcome<E>> {
        let previous = self.end_editing();

        let color = entry
            .as_ref()
            .and_then(|e| e.color())
            .unwrap_or(self.options.default_color.as_str())
            .to_string();
        let shapes = entry
            .as_ref()
            .map(|e| self.entry_shapes(e))
            .unwrap_or_default();

        let mut session = DrawSession::new(entry);
        for shape in shapes {
            let id = ShapeId::new();
            if let Err(err) = self.surface.add_shape(id, &shape) {
                warn!(%id, kind = shape.kind(), %err, "failed to add shape to surface");
            }
            session.group.insert(id, shape);
        }

        let control = DrawControl::new(&color, &self.options);
        match self.surface.add_control(&control) {
            Ok(handle) => session.control = Some(handle),
            Err(err) => warn!(%err, "failed to attach draw control"),
        }

        info!(shapes = session.group.len(), %color, "editing started");
        self.state = SessionState::Editing(session);
        previous
    }

    /// Ends the live session and returns what was drawn.
    ///
    /// Returns None, without touching the surface, when idle.
    pub fn end_editing(&mut self) -> Option<EditOutcome<E>> {
        let SessionState::Editing(mut session) =
            std::mem::replace(&mut self.state, SessionState::Idle)
        else {
            return None;
        };

        if let Some(handle) = session.control.take() {
            if let Err(err) = self.surface.remove_control(handle) {
                warn!(%handle, %err, "failed to detach draw control");
            }
        }

        let geometry = session.to_geojson(self.options.export_precision);
        for id in session.group.clear() {
            if let Err(err) = self.surface.remove_shape(id) {
                warn!(%id, %err, "failed to remove shape from surface");
            }
        }

        info!("editing ended");
        Some(EditOutcome {
            entry: session.entry,
            geometry,
        })
    }

    /// Applies a surface event to the live session.
    ///
    /// Created shapes are added to the surface as well. Events while idle
    /// are ignored.
    pub fn handle_event(&mut self, event: DrawEvent) -> EventOutcome {
        let SessionState::Editing(session) = &mut self.state else {
            debug!(event = event.name(), "ignoring draw event while idle");
            return EventOutcome::Ignored;
        };

        if let DrawEvent::Created { id, shape } = &event {
            if !session.group.contains(*id) {
                if let Err(err) = self.surface.add_shape(*id, shape) {
                    warn!(%id, %err, "failed to add drawn shape to surface");
                }
            }
        }

        let name = event.name();
        let outcome = session.apply(event);
        debug!(event = name, ?outcome, "draw event applied");
        outcome
    }

    /// Ends any live session, then releases the surface.
    pub fn teardown(&mut self) -> Option<EditOutcome<E>> {
        let outcome = self.end_editing();
        self.surface.teardown();
        outcome
    }

    /// Ends any live session and hands the surface back.
    pub fn into_surface(mut self) -> S {
        self.end_editing();
        self.surface
    }

    /// Loads the entry's geometry. Parts that cannot be drawn are skipped
    /// so the rest of the geometry survives the session.
    fn entry_shapes(&self, entry: &E) -> Vec<Shape> {
        let Some(geometry) = entry.geometry().filter(|g| !g.is_empty()) else {
            return Vec::new();
        };
        match Shape::from_geojson(geometry, &entry.style()) {
            Ok(shape) => shape.flatten_lossy(self.options.max_group_depth),
            Err(err) => {
                warn!(%err, "entry geometry cannot be drawn; starting empty");
                Vec::new()
            }
        }
    }
}
