//! The map surface a draw session edits on.
//!
//! A surface renders shapes and hosts the interactive edit control. It is
//! owned by the host application; the session manager only adds and removes
//! what it put there. Notifications flow the other way: the host forwards
//! the surface's draw and edit events to
//! [`DrawSessionManager::handle_event`](crate::draw::DrawSessionManager::handle_event).

use std::fmt;

use rustc_hash::FxHashMap;
use uuid::Uuid;

use crate::draw::control::DrawControl;
use crate::draw::shape::Shape;
use crate::error::SurfaceError;

/// Identity of a shape on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(Uuid);

impl ShapeId {
    /// Creates a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wraps an id assigned by the host.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ShapeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Handle to an edit control attached to a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControlHandle(Uuid);

impl ControlHandle {
    /// Creates a fresh, time-ordered handle.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ControlHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ControlHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Operations a draw session needs from a map surface.
pub trait MapSurface {
    /// Renders a shape under the given id.
    fn add_shape(&mut self, id: ShapeId, shape: &Shape) -> Result<(), SurfaceError>;

    /// Removes a previously added shape.
    fn remove_shape(&mut self, id: ShapeId) -> Result<(), SurfaceError>;

    /// Attaches an edit control and returns its handle.
    fn add_control(&mut self, control: &DrawControl) -> Result<ControlHandle, SurfaceError>;

    /// Detaches an edit control.
    fn remove_control(&mut self, handle: ControlHandle) -> Result<(), SurfaceError>;

    /// Releases the surface's own resources.
    fn teardown(&mut self) {}
}

/// A call made against a [`HeadlessSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceCall {
    AddShape(ShapeId),
    RemoveShape(ShapeId),
    AddControl(ControlHandle),
    RemoveControl(ControlHandle),
    Teardown,
}

/// An in-memory surface with no rendering.
///
/// Keeps the shapes and controls it was given and a log of every call, which
/// makes it usable for server-side sessions and for tests. Failures can be
/// injected with [`HeadlessSurface::fail_next`].
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    shapes: FxHashMap<ShapeId, Shape>,
    controls: Vec<(ControlHandle, DrawControl)>,
    calls: Vec<SurfaceCall>,
    fail_next: Option<SurfaceError>,
    torn_down: bool,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next fallible call return `err`.
    pub fn fail_next(&mut self, err: SurfaceError) {
        self.fail_next = Some(err);
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// Controls currently attached, oldest first.
    pub fn controls(&self) -> &[(ControlHandle, DrawControl)] {
        &self.controls
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    fn check(&mut self) -> Result<(), SurfaceError> {
        if self.torn_down {
            return Err(SurfaceError::Unavailable);
        }
        match self.fail_next.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl MapSurface for HeadlessSurface {
    fn add_shape(&mut self, id: ShapeId, shape: &Shape) -> Result<(), SurfaceError> {
        self.check()?;
        self.calls.push(SurfaceCall::AddShape(id));
        self.shapes.insert(id, shape.clone());
        Ok(())
    }

    fn remove_shape(&mut self, id: ShapeId) -> Result<(), SurfaceError> {
        self.check()?;
        self.calls.push(SurfaceCall::RemoveShape(id));
        self.shapes
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| SurfaceError::UnknownShape { id: id.to_string() })
    }

    fn add_control(&mut self, control: &DrawControl) -> Result<ControlHandle, SurfaceError> {
        self.check()?;
        let handle = ControlHandle::new();
        self.calls.push(SurfaceCall::AddControl(handle));
        self.controls.push((handle, control.clone()));
        Ok(handle)
    }

    fn remove_control(&mut self, handle: ControlHandle) -> Result<(), SurfaceError> {
        self.check()?;
        self.calls.push(SurfaceCall::RemoveControl(handle));
        let before = self.controls.len();
        self.controls.retain(|(h, _)| *h != handle);
        if self.controls.len() == before {
            return Err(SurfaceError::UnknownControl { id: handle.to_string() });
        }
        Ok(())
    }

    fn teardown(&mut self) {
        self.calls.push(SurfaceCall::Teardown);
        self.shapes.clear();
        self.controls.clear();
        self.torn_down = true;
    }
}
