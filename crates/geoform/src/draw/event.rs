//! Draw and edit notifications from a map surface.

use crate::draw::shape::Shape;
use crate::draw::surface::ShapeId;

/// A notification the host forwards from the surface's draw toolbar.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawEvent {
    /// The operator finished drawing a new shape.
    Created { id: ShapeId, shape: Shape },
    /// The operator deleted shapes. The surface has already removed them.
    Deleted { ids: Vec<ShapeId> },
    DrawStart,
    DrawStop,
    DrawVertex,
    EditStart,
    /// A shape was dragged to `shape`.
    EditMove { id: ShapeId, shape: Shape },
    /// A circle or rectangle was resized to `shape`.
    EditResize { id: ShapeId, shape: Shape },
    /// A vertex was moved, added or removed, giving `shape`.
    EditVertex { id: ShapeId, shape: Shape },
    EditStop,
}

impl DrawEvent {
    /// Wire name of the event, as draw toolbars emit it.
    pub fn name(&self) -> &'static str {
        match self {
            DrawEvent::Created { .. } => "draw:created",
            DrawEvent::Deleted { .. } => "draw:deleted",
            DrawEvent::DrawStart => "draw:drawstart",
            DrawEvent::DrawStop => "draw:drawstop",
            DrawEvent::DrawVertex => "draw:drawvertex",
            DrawEvent::EditStart => "draw:editstart",
            DrawEvent::EditMove { .. } => "draw:editmove",
            DrawEvent::EditResize { .. } => "draw:editresize",
            DrawEvent::EditVertex { .. } => "draw:editvertex",
            DrawEvent::EditStop => "draw:editstop",
        }
    }

    /// Returns true for events that change the draw group.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            DrawEvent::Created { .. }
                | DrawEvent::Deleted { .. }
                | DrawEvent::EditMove { .. }
                | DrawEvent::EditResize { .. }
                | DrawEvent::EditVertex { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names() {
        assert_eq!(DrawEvent::DrawStart.name(), "draw:drawstart");
        assert_eq!(DrawEvent::Deleted { ids: vec![] }.name(), "draw:deleted");
        assert!(!DrawEvent::EditStop.is_mutation());
        assert!(DrawEvent::Deleted { ids: vec![] }.is_mutation());
    }
}
