use crate::components::{Billboard, Bounds, Marker, Transform};
use crate::entity::EntityId;

/// Column-per-component entity storage.
///
/// Small and dense: the photo globe holds one globe entity plus one entity
/// per photo location, all spawned at load time.
#[derive(Debug, Default)]
pub struct World {
    next_index: u32,
    transforms: Vec<Option<Transform>>,
    bounds: Vec<Option<Bounds>>,
    markers: Vec<Option<Marker>>,
    billboards: Vec<Option<Billboard>>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self) -> EntityId {
        let id = EntityId(self.next_index);
        self.next_index += 1;
        self.ensure_capacity(id.index() as usize);
        id
    }

    pub fn entity_count(&self) -> u32 {
        self.next_index
    }

    pub fn set_transform(&mut self, entity: EntityId, transform: Transform) {
        self.ensure_capacity(entity.index() as usize);
        self.transforms[entity.index() as usize] = Some(transform);
    }

    pub fn set_bounds(&mut self, entity: EntityId, bounds: Bounds) {
        self.ensure_capacity(entity.index() as usize);
        self.bounds[entity.index() as usize] = Some(bounds);
    }

    pub fn set_marker(&mut self, entity: EntityId, marker: Marker) {
        self.ensure_capacity(entity.index() as usize);
        self.markers[entity.index() as usize] = Some(marker);
    }

    pub fn set_billboard(&mut self, entity: EntityId, billboard: Billboard) {
        self.ensure_capacity(entity.index() as usize);
        self.billboards[entity.index() as usize] = Some(billboard);
    }

    pub fn transform(&self, entity: EntityId) -> Option<Transform> {
        self.transforms.get(entity.index() as usize).and_then(|t| *t)
    }

    pub fn bounds(&self, entity: EntityId) -> Option<Bounds> {
        self.bounds.get(entity.index() as usize).and_then(|b| *b)
    }

    pub fn marker(&self, entity: EntityId) -> Option<Marker> {
        self.markers.get(entity.index() as usize).and_then(|m| *m)
    }

    pub fn billboard(&self, entity: EntityId) -> Option<Billboard> {
        self.billboards.get(entity.index() as usize).and_then(|b| *b)
    }

    /// All marker entities with a placement, in ascending index order.
    pub fn markers(&self) -> Vec<(EntityId, Transform, Marker)> {
        let mut out = Vec::new();
        for (idx, marker) in self.markers.iter().enumerate() {
            let Some(marker) = marker else { continue };
            let Some(transform) = self.transforms.get(idx).and_then(|t| *t) else {
                continue;
            };
            out.push((EntityId(idx as u32), transform, *marker));
        }
        out
    }

    /// Markers whose photo asset has arrived (billboard attached), in
    /// ascending index order. These are the visible ones.
    pub fn visible_billboards(&self) -> Vec<(EntityId, Transform, Billboard)> {
        let mut out = Vec::new();
        for (idx, billboard) in self.billboards.iter().enumerate() {
            let Some(billboard) = billboard else { continue };
            let Some(transform) = self.transforms.get(idx).and_then(|t| *t) else {
                continue;
            };
            out.push((EntityId(idx as u32), transform, *billboard));
        }
        out
    }

    fn ensure_capacity(&mut self, idx: usize) {
        if self.transforms.len() <= idx {
            let len = idx + 1;
            self.transforms.resize(len, None);
            self.bounds.resize(len, None);
            self.markers.resize(len, None);
            self.billboards.resize(len, None);
        }
    }
}
