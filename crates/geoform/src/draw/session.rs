//! State of one edit session.
//!
//! A session owns the draw group: the shapes currently being edited, keyed
//! by [`ShapeId`] and kept in insertion order. [`DrawSession::apply`] is the
//! transition function for surface events; it only touches session state.
//! Mirroring changes onto the surface is the manager's job.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::draw::event::DrawEvent;
use crate::draw::shape::{Shape, shapes_to_feature_collection};
use crate::draw::surface::{ControlHandle, ShapeId};
use crate::model::{FeatureCollection, GeoJson};

/// Ordered set of shapes under edit.
#[derive(Debug, Clone, Default)]
pub struct DrawGroup {
    shapes: FxHashMap<ShapeId, Shape>,
    order: Vec<ShapeId>,
}

impl DrawGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.shapes.contains_key(&id)
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    /// Ids in insertion order.
    pub fn ids(&self) -> &[ShapeId] {
        &self.order
    }

    /// Shapes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (ShapeId, &Shape)> + '_ {
        self.order
            .iter()
            .filter_map(|id| self.shapes.get(id).map(|shape| (*id, shape)))
    }

    /// Inserts or replaces a shape. Returns the shape it replaced.
    ///
    /// A replaced shape keeps its position in the order.
    pub fn insert(&mut self, id: ShapeId, shape: Shape) -> Option<Shape> {
        let previous = self.shapes.insert(id, shape);
        if previous.is_none() {
            self.order.push(id);
        }
        previous
    }

    /// Replaces the shape stored under a known id. Unknown ids are left alone.
    pub fn replace(&mut self, id: ShapeId, shape: Shape) -> bool {
        match self.shapes.get_mut(&id) {
            Some(slot) => {
                *slot = shape;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: ShapeId) -> Option<Shape> {
        let removed = self.shapes.remove(&id)?;
        self.order.retain(|other| *other != id);
        Some(removed)
    }

    /// Empties the group and returns the ids it held, in order.
    pub fn clear(&mut self) -> Vec<ShapeId> {
        self.shapes.clear();
        std::mem::take(&mut self.order)
    }

    /// Exports every shape, circles as Point features with a radius.
    pub fn to_feature_collection(&self, precision: u32) -> FeatureCollection {
        shapes_to_feature_collection(self.iter().map(|(_, shape)| shape), precision)
    }
}

/// What applying an event did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    Added(ShapeId),
    Removed(Vec<ShapeId>),
    Updated(ShapeId),
    /// Logged only.
    Observed,
    /// Nothing to apply it to.
    Ignored,
}

/// A live edit session.
#[derive(Debug)]
pub struct DrawSession<E> {
    pub(crate) entry: Option<E>,
    pub(crate) group: DrawGroup,
    pub(crate) control: Option<ControlHandle>,
}

impl<E> DrawSession<E> {
    pub fn new(entry: Option<E>) -> Self {
        Self {
            entry,
            group: DrawGroup::new(),
            control: None,
        }
    }

    /// The entry being edited, if any.
    pub fn entry(&self) -> Option<&E> {
        self.entry.as_ref()
    }

    pub fn group(&self) -> &DrawGroup {
        &self.group
    }

    /// Handle of the attached control, if attaching it succeeded.
    pub fn control(&self) -> Option<ControlHandle> {
        self.control
    }

    /// Exports the draw group.
    pub fn to_geojson(&self, precision: u32) -> GeoJson {
        GeoJson::FeatureCollection(self.group.to_feature_collection(precision))
    }

    /// Applies a surface event to the draw group.
    pub fn apply(&mut self, event: DrawEvent) -> EventOutcome {
        match event {
            DrawEvent::Created { id, shape } => match self.group.insert(id, shape) {
                None => EventOutcome::Added(id),
                Some(_) => EventOutcome::Updated(id),
            },
            DrawEvent::Deleted { ids } => {
                let removed: Vec<ShapeId> = ids
                    .into_iter()
                    .filter(|id| self.group.remove(*id).is_some())
                    .collect();
                if removed.is_empty() {
                    EventOutcome::Ignored
                } else {
                    EventOutcome::Removed(removed)
                }
            }
            DrawEvent::EditMove { id, shape }
            | DrawEvent::EditResize { id, shape }
            | DrawEvent::EditVertex { id, shape } => {
                if self.group.replace(id, shape) {
                    EventOutcome::Updated(id)
                } else {
                    debug!(%id, "edit event for a shape outside the draw group");
                    EventOutcome::Ignored
                }
            }
            event @ (DrawEvent::DrawStart
            | DrawEvent::DrawStop
            | DrawEvent::DrawVertex
            | DrawEvent::EditStart
            | DrawEvent::EditStop) => {
                debug!(event = event.name(), "draw event");
                EventOutcome::Observed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::shape::{LatLng, ShapeStyle};
    use crate::model::Geometry;

    fn marker(lat: f64, lng: f64) -> Shape {
        Shape::Marker {
            position: LatLng::new(lat, lng),
            style: ShapeStyle::default(),
        }
    }

    #[test]
    fn test_group_keeps_insertion_order() {
        let mut group = DrawGroup::new();
        let ids: Vec<_> = (0..4).map(|_| ShapeId::new()).collect();
        for (i, id) in ids.iter().enumerate() {
            group.insert(*id, marker(i as f64, 0.0));
        }
        group.remove(ids[1]);
        assert_eq!(group.ids(), &[ids[0], ids[2], ids[3]]);

        // Replacing keeps the slot.
        assert!(group.replace(ids[0], marker(9.0, 9.0)));
        assert_eq!(group.ids()[0], ids[0]);
        assert!(!group.replace(ids[1], marker(9.0, 9.0)));

        assert_eq!(group.clear(), vec![ids[0], ids[2], ids[3]]);
        assert!(group.is_empty());
    }

    #[test]
    fn test_apply_created_and_deleted() {
        let mut session: DrawSession<()> = DrawSession::new(None);
        let a = ShapeId::new();
        let b = ShapeId::new();
        assert_eq!(
            session.apply(DrawEvent::Created { id: a, shape: marker(1.0, 2.0) }),
            EventOutcome::Added(a)
        );
        assert_eq!(
            session.apply(DrawEvent::Created { id: b, shape: marker(3.0, 4.0) }),
            EventOutcome::Added(b)
        );
        assert_eq!(
            session.apply(DrawEvent::Deleted { ids: vec![a, ShapeId::new()] }),
            EventOutcome::Removed(vec![a])
        );
        assert_eq!(
            session.apply(DrawEvent::Deleted { ids: vec![a] }),
            EventOutcome::Ignored
        );
        assert_eq!(session.group().ids(), &[b]);
    }

    #[test]
    fn test_apply_edits_replace_geometry() {
        let mut session: DrawSession<()> = DrawSession::new(None);
        let id = ShapeId::new();
        session.apply(DrawEvent::Created { id, shape: marker(1.0, 2.0) });
        assert_eq!(
            session.apply(DrawEvent::EditMove { id, shape: marker(5.0, 6.0) }),
            EventOutcome::Updated(id)
        );
        assert_eq!(session.group().get(id), Some(&marker(5.0, 6.0)));

        let stranger = ShapeId::new();
        assert_eq!(
            session.apply(DrawEvent::EditVertex { id: stranger, shape: marker(0.0, 0.0) }),
            EventOutcome::Ignored
        );
        assert!(!session.group().contains(stranger));
    }

    #[test]
    fn test_lifecycle_events_are_observed() {
        let mut session: DrawSession<()> = DrawSession::new(None);
        for event in [
            DrawEvent::DrawStart,
            DrawEvent::DrawVertex,
            DrawEvent::DrawStop,
            DrawEvent::EditStart,
            DrawEvent::EditStop,
        ] {
            assert_eq!(session.apply(event), EventOutcome::Observed);
        }
        assert!(session.group().is_empty());
    }

    #[test]
    fn test_export_in_order() {
        let mut session: DrawSession<()> = DrawSession::new(None);
        session.apply(DrawEvent::Created { id: ShapeId::new(), shape: marker(1.0, 2.0) });
        session.apply(DrawEvent::Created {
            id: ShapeId::new(),
            shape: Shape::Circle {
                center: LatLng::new(3.0, 4.0),
                radius: 50.0,
                style: ShapeStyle::default(),
            },
        });
        let GeoJson::FeatureCollection(fc) = session.to_geojson(6) else {
            panic!("expected a feature collection");
        };
        assert_eq!(fc.features.len(), 2);
        assert_eq!(fc.features[0].geometry, Some(Geometry::point(vec![2.0, 1.0])));
        assert_eq!(fc.features[1].property("radius"), Some(&serde_json::json!(50)));
    }
}
