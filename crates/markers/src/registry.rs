use foundation::math::geo::{Coordinate, MARKER_RADIUS};
use scene::World;
use scene::components::{Billboard, Bounds, Marker, Transform};
use scene::entity::EntityId;

use crate::manifest::PhotoManifest;

/// Base width of a photo billboard before zoom scaling.
pub const IMAGE_SIZE: f64 = 0.2;

/// Where a marker's photo asset is in its (unordered, fire-and-forget)
/// loading lifecycle.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AssetState {
    Pending,
    Ready,
    Failed,
}

#[derive(Debug)]
struct Entry {
    entity: EntityId,
    image_id: String,
    state: AssetState,
}

/// Owns the two-phase marker lifecycle.
///
/// Phase 1 (`register`, synchronous): spawn an entity with the `Marker`
/// capability and its placement on the marker sphere. The entity has no
/// billboard yet, so it is neither visible nor pickable.
///
/// Phase 2 (`attach_asset` / `fail_asset`, whenever the host's loader gets
/// around to it, in any order): attach the sized billboard and pickable
/// bounds, or record the failure and leave the marker permanently hidden.
/// The interaction controller never waits on either phase.
#[derive(Debug, Default)]
pub struct MarkerRegistry {
    entries: Vec<Entry>,
}

impl MarkerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers every photo in the manifest, in its deterministic
    /// iteration order.
    pub fn from_manifest(world: &mut World, manifest: &PhotoManifest) -> Self {
        let mut registry = Self::new();
        for (image_id, location) in &manifest.photos {
            registry.register(
                world,
                image_id.clone(),
                Coordinate::new(location.lat, location.lon),
            );
        }
        registry
    }

    pub fn register(
        &mut self,
        world: &mut World,
        image_id: impl Into<String>,
        coordinate: Coordinate,
    ) -> EntityId {
        let entity = world.spawn();
        world.set_marker(entity, Marker::new(coordinate));
        world.set_transform(entity, Transform::at(coordinate.local_position(MARKER_RADIUS)));

        let image_id = image_id.into();
        log::debug!("registered marker {image_id:?} at {coordinate:?}");
        self.entries.push(Entry {
            entity,
            image_id,
            state: AssetState::Pending,
        });
        entity
    }

    /// Completes a pending asset load: sizes the billboard from the photo's
    /// aspect ratio and makes the marker visible and pickable.
    ///
    /// Returns `false` if the id is unknown, already resolved, or the
    /// aspect ratio is unusable.
    pub fn attach_asset(&mut self, world: &mut World, image_id: &str, aspect_ratio: f64) -> bool {
        if !aspect_ratio.is_finite() || aspect_ratio <= 0.0 {
            return false;
        }
        let Some(entry) = self.entry_mut(image_id) else {
            return false;
        };
        if entry.state != AssetState::Pending {
            return false;
        }
        entry.state = AssetState::Ready;
        let entity = entry.entity;

        let billboard = Billboard::from_aspect(IMAGE_SIZE, aspect_ratio);
        world.set_billboard(entity, billboard);
        refresh_bounds(world, entity, billboard);
        log::debug!("marker asset ready: {image_id:?}");
        true
    }

    /// Records a failed asset load; the marker stays hidden forever (no
    /// retry here).
    pub fn fail_asset(&mut self, image_id: &str) -> bool {
        let Some(entry) = self.entry_mut(image_id) else {
            return false;
        };
        if entry.state != AssetState::Pending {
            return false;
        }
        entry.state = AssetState::Failed;
        log::warn!("marker asset failed: {image_id:?}");
        true
    }

    /// Reapplies the zoom scale factor to every visible marker.
    ///
    /// Always a full pass over all markers, never incremental.
    pub fn set_scale(&mut self, world: &mut World, factor: f64) {
        for entry in &self.entries {
            if entry.state != AssetState::Ready {
                continue;
            }
            let Some(mut billboard) = world.billboard(entry.entity) else {
                continue;
            };
            billboard.scale = factor;
            world.set_billboard(entry.entity, billboard);
            refresh_bounds(world, entry.entity, billboard);
        }
    }

    pub fn asset_state(&self, image_id: &str) -> Option<AssetState> {
        self.entries
            .iter()
            .find(|e| e.image_id == image_id)
            .map(|e| e.state)
    }

    pub fn entity(&self, image_id: &str) -> Option<EntityId> {
        self.entries
            .iter()
            .find(|e| e.image_id == image_id)
            .map(|e| e.entity)
    }

    pub fn image_ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.image_id.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry_mut(&mut self, image_id: &str) -> Option<&mut Entry> {
        self.entries.iter_mut().find(|e| e.image_id == image_id)
    }
}

fn refresh_bounds(world: &mut World, entity: EntityId, billboard: Billboard) {
    if let Some(transform) = world.transform(entity) {
        world.set_bounds(
            entity,
            Bounds::around(transform.position, billboard.half_extent()),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{AssetState, IMAGE_SIZE, MarkerRegistry};
    use crate::manifest::{PhotoLocation, PhotoManifest};
    use foundation::math::geo::{Coordinate, MARKER_RADIUS};
    use scene::World;

    fn manifest_of(entries: &[(&str, f64, f64)]) -> PhotoManifest {
        let mut manifest = PhotoManifest::new();
        for (id, lat, lon) in entries {
            manifest.photos.insert(
                id.to_string(),
                PhotoLocation {
                    lat: *lat,
                    lon: *lon,
                    image_url: None,
                },
            );
        }
        manifest
    }

    #[test]
    fn registers_all_manifest_photos() {
        let mut world = World::new();
        let manifest = manifest_of(&[("a.jpg", 10.0, 20.0), ("b.jpg", -30.0, 150.0)]);
        let registry = MarkerRegistry::from_manifest(&mut world, &manifest);

        assert_eq!(registry.len(), 2);
        assert_eq!(world.markers().len(), 2);
        assert_eq!(registry.asset_state("a.jpg"), Some(AssetState::Pending));
        // Nothing is visible or pickable until assets arrive.
        assert!(world.visible_billboards().is_empty());
    }

    #[test]
    fn registration_clamps_out_of_range_coordinates() {
        let mut world = World::new();
        let manifest = manifest_of(&[("pole.jpg", 89.9, 200.0)]);
        let registry = MarkerRegistry::from_manifest(&mut world, &manifest);

        let entity = registry.entity("pole.jpg").unwrap();
        let marker = world.marker(entity).unwrap();
        assert_eq!(marker.coordinate, Coordinate::new(85.0, -160.0));
    }

    #[test]
    fn attach_makes_marker_visible_and_pickable() {
        let mut world = World::new();
        let manifest = manifest_of(&[("a.jpg", 0.0, 0.0)]);
        let mut registry = MarkerRegistry::from_manifest(&mut world, &manifest);

        assert!(registry.attach_asset(&mut world, "a.jpg", 1.5));
        assert_eq!(registry.asset_state("a.jpg"), Some(AssetState::Ready));

        let entity = registry.entity("a.jpg").unwrap();
        let billboard = world.billboard(entity).unwrap();
        assert_eq!(billboard.width, IMAGE_SIZE);
        assert!(world.bounds(entity).is_some());

        let transform = world.transform(entity).unwrap();
        assert!((transform.position.x - MARKER_RADIUS).abs() < 1e-12);
    }

    #[test]
    fn attach_is_single_shot() {
        let mut world = World::new();
        let manifest = manifest_of(&[("a.jpg", 0.0, 0.0)]);
        let mut registry = MarkerRegistry::from_manifest(&mut world, &manifest);

        assert!(registry.attach_asset(&mut world, "a.jpg", 1.0));
        assert!(!registry.attach_asset(&mut world, "a.jpg", 1.0));
        assert!(!registry.attach_asset(&mut world, "missing.jpg", 1.0));
        assert!(!registry.attach_asset(&mut world, "a.jpg", f64::NAN));
    }

    #[test]
    fn failed_asset_never_becomes_visible() {
        let mut world = World::new();
        let manifest = manifest_of(&[("a.jpg", 0.0, 0.0)]);
        let mut registry = MarkerRegistry::from_manifest(&mut world, &manifest);

        assert!(registry.fail_asset("a.jpg"));
        assert_eq!(registry.asset_state("a.jpg"), Some(AssetState::Failed));
        assert!(!registry.attach_asset(&mut world, "a.jpg", 1.0));
        assert!(world.visible_billboards().is_empty());
    }

    #[test]
    fn completion_order_is_arbitrary() {
        let mut world = World::new();
        let manifest = manifest_of(&[("a.jpg", 0.0, 0.0), ("b.jpg", 1.0, 1.0), ("c.jpg", 2.0, 2.0)]);
        let mut registry = MarkerRegistry::from_manifest(&mut world, &manifest);

        // Assets arrive out of registration order; each appears on its own.
        assert!(registry.attach_asset(&mut world, "c.jpg", 1.0));
        assert_eq!(world.visible_billboards().len(), 1);
        assert!(registry.attach_asset(&mut world, "a.jpg", 1.0));
        assert_eq!(world.visible_billboards().len(), 2);
        assert!(registry.fail_asset("b.jpg"));
        assert_eq!(world.visible_billboards().len(), 2);
    }

    #[test]
    fn set_scale_touches_every_ready_marker() {
        let mut world = World::new();
        let manifest = manifest_of(&[("a.jpg", 0.0, 0.0), ("b.jpg", 10.0, 10.0)]);
        let mut registry = MarkerRegistry::from_manifest(&mut world, &manifest);
        registry.attach_asset(&mut world, "a.jpg", 1.0);
        registry.attach_asset(&mut world, "b.jpg", 2.0);

        registry.set_scale(&mut world, 0.5);
        for (_, _, billboard) in world.visible_billboards() {
            assert_eq!(billboard.scale, 0.5);
        }
    }
}
