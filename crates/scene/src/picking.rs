use foundation::math::Vec3;
use foundation::math::geo::Coordinate;

use crate::World;
use crate::components::Bounds;
use crate::entity::EntityId;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self { origin, dir }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickHit {
    pub entity: EntityId,
    /// The picked marker's geographic coordinate.
    pub coordinate: Coordinate,
    pub distance: f64,
    pub point: Vec3,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickOptions {
    pub max_distance: f64,
}

impl Default for PickOptions {
    fn default() -> Self {
        Self {
            max_distance: 1.0e30,
        }
    }
}

/// Deterministic ray picking over marker entities.
///
/// Ordering contract:
/// - The closest hit along the (normalized) ray wins.
/// - Ties at the same distance go to the lower `EntityId::index()`.
///
/// Notes:
/// - Only entities carrying the `Marker` capability participate; the globe
///   body and any other scene entities are never returned.
/// - A marker without bounds (photo asset not yet attached) is skipped.
/// - A miss is the expected outcome, not an error.
pub fn pick_ray(world: &World, ray: Ray, opts: PickOptions) -> Option<PickHit> {
    let dir = ray.dir.normalized()?;

    let mut best: Option<(f64, EntityId, Coordinate)> = None;
    for (entity, _transform, marker) in world.markers() {
        let Some(bounds) = world.bounds(entity) else {
            continue;
        };
        let Some(t) = ray_bounds_hit_t(ray.origin, dir, bounds, 0.0, opts.max_distance) else {
            continue;
        };

        best = match best {
            None => Some((t, entity, marker.coordinate)),
            Some((bt, be, bc)) => {
                let ord = t.total_cmp(&bt).then_with(|| entity.index().cmp(&be.index()));
                if ord.is_lt() {
                    Some((t, entity, marker.coordinate))
                } else {
                    Some((bt, be, bc))
                }
            }
        };
    }

    let (t, entity, coordinate) = best?;
    Some(PickHit {
        entity,
        coordinate,
        distance: t,
        point: ray.origin + dir * t,
    })
}

/// Screen picking wrapper.
///
/// The caller supplies a deterministic screen->ray mapping via `make_ray`.
pub fn pick_screen<F>(
    world: &World,
    x_px: f64,
    y_px: f64,
    mut make_ray: F,
    opts: PickOptions,
) -> Option<PickHit>
where
    F: FnMut(f64, f64) -> Option<Ray>,
{
    let ray = make_ray(x_px, y_px)?;
    pick_ray(world, ray, opts)
}

fn ray_bounds_hit_t(
    origin: Vec3,
    dir: Vec3,
    bounds: Bounds,
    mut t_min: f64,
    mut t_max: f64,
) -> Option<f64> {
    // Slabs intersection; returns entry distance.
    let origin = [origin.x, origin.y, origin.z];
    let dir = [dir.x, dir.y, dir.z];
    let min = [bounds.min.x, bounds.min.y, bounds.min.z];
    let max = [bounds.max.x, bounds.max.y, bounds.max.z];

    for axis in 0..3 {
        let o = origin[axis];
        let d = dir[axis];

        if d.abs() < 1e-12 {
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }

        let inv = 1.0 / d;
        let mut t1 = (min[axis] - o) * inv;
        let mut t2 = (max[axis] - o) * inv;
        if t1 > t2 {
            std::mem::swap(&mut t1, &mut t2);
        }

        t_min = t_min.max(t1);
        t_max = t_max.min(t2);
        if t_max < t_min {
            return None;
        }
    }

    Some(t_min.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::{PickOptions, Ray, pick_ray};
    use crate::World;
    use crate::components::{Bounds, Marker, Transform};
    use foundation::math::Vec3;
    use foundation::math::geo::Coordinate;

    fn spawn_marker(world: &mut World, x: f64, coordinate: Coordinate) -> crate::entity::EntityId {
        let e = world.spawn();
        let position = Vec3::new(x, 0.0, 0.0);
        world.set_transform(e, Transform::at(position));
        world.set_marker(e, Marker::new(coordinate));
        world.set_bounds(e, Bounds::around(position, 0.1));
        e
    }

    #[test]
    fn ray_picks_nearest_marker() {
        let mut world = World::new();
        let near = spawn_marker(&mut world, 5.0, Coordinate::new(10.0, 20.0));
        let _far = spawn_marker(&mut world, 10.0, Coordinate::new(-5.0, 40.0));

        let ray = Ray::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        let hit = pick_ray(&world, ray, PickOptions::default()).expect("hit");
        assert_eq!(hit.entity, near);
        assert_eq!(hit.coordinate, Coordinate::new(10.0, 20.0));
        assert!(hit.distance >= 4.9 && hit.distance <= 5.1);
    }

    #[test]
    fn tie_breaks_by_entity_index() {
        let mut world = World::new();
        let first = spawn_marker(&mut world, 5.0, Coordinate::new(1.0, 1.0));
        let _second = spawn_marker(&mut world, 5.0, Coordinate::new(2.0, 2.0));

        let ray = Ray::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        let hit = pick_ray(&world, ray, PickOptions::default()).expect("hit");
        assert_eq!(hit.entity, first);
    }

    #[test]
    fn non_marker_entities_are_ignored() {
        let mut world = World::new();
        // Globe-like entity: placed and bounded, but not a marker.
        let globe = world.spawn();
        world.set_transform(globe, Transform::identity());
        world.set_bounds(
            globe,
            Bounds::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0)),
        );

        let ray = Ray::new(Vec3::new(3.0, 0.0, 0.0), Vec3::new(-1.0, 0.0, 0.0));
        assert!(pick_ray(&world, ray, PickOptions::default()).is_none());
    }

    #[test]
    fn unbounded_marker_is_not_pickable_yet() {
        let mut world = World::new();
        let e = world.spawn();
        world.set_transform(e, Transform::at(Vec3::new(5.0, 0.0, 0.0)));
        world.set_marker(e, Marker::new(Coordinate::new(0.0, 0.0)));

        let ray = Ray::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        assert!(pick_ray(&world, ray, PickOptions::default()).is_none());
    }

    #[test]
    fn miss_returns_none() {
        let mut world = World::new();
        spawn_marker(&mut world, 5.0, Coordinate::new(0.0, 0.0));
        let ray = Ray::new(Vec3::new(0.0, 2.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        assert!(pick_ray(&world, ray, PickOptions::default()).is_none());
    }
}
