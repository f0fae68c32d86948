use foundation::math::geo::{Coordinate, world_to_globe};
use foundation::math::{Vec2, Vec3, to_radians};
use scene::World;
use scene::picking::{PickOptions, Ray, pick_screen};

/// Vertical field of view of the viewing camera (degrees).
pub const FOV_Y_DEG: f64 = 45.0;

/// What a pointer-down asks of the scene: "is there a marker under this
/// pixel, and where does it point?".
///
/// The trait is the seam between the controller and the rendering layer's
/// ray-intersection machinery; tests substitute a stub.
pub trait HitTest {
    fn pick(&self, pos_px: Vec2) -> Option<Coordinate>;
}

/// Viewing setup needed to turn a pixel into a globe-local ray.
///
/// The camera sits on +X at `distance`, looking at the origin with +Y up;
/// the globe rotates underneath it, so rays are carried into the
/// globe-local frame with the inverse of the current orientation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickCamera {
    pub viewport: Vec2,
    pub fov_y_rad: f64,
    pub distance: f64,
    pub orientation: Coordinate,
}

impl PickCamera {
    pub fn new(viewport: Vec2, distance: f64, orientation: Coordinate) -> Self {
        Self {
            viewport,
            fov_y_rad: to_radians(FOV_Y_DEG),
            distance,
            orientation,
        }
    }

    /// Pick ray for a pixel position, in the globe-local frame.
    pub fn globe_ray(&self, x_px: f64, y_px: f64) -> Option<Ray> {
        let w = self.viewport.x.max(1.0);
        let h = self.viewport.y.max(1.0);

        // Normalized device coordinates, +Y up.
        let ndc_x = (x_px / w) * 2.0 - 1.0;
        let ndc_y = 1.0 - (y_px / h) * 2.0;

        let tan_half = (0.5 * self.fov_y_rad).tan();
        let aspect = w / h;

        // Camera basis in world space: eye on +X looking at the origin.
        let forward = Vec3::new(-1.0, 0.0, 0.0);
        let up = Vec3::new(0.0, 1.0, 0.0);
        let right = Vec3::new(0.0, 0.0, -1.0);

        let dir = forward
            + right * (ndc_x * tan_half * aspect)
            + up * (ndc_y * tan_half);
        let dir = dir.normalized()?;
        let origin = Vec3::new(self.distance, 0.0, 0.0);

        Some(Ray::new(
            world_to_globe(origin, self.orientation),
            world_to_globe(dir, self.orientation),
        ))
    }
}

/// The scene-backed hit test: pixel -> NDC ray -> marker pick.
pub struct ScenePicker<'a> {
    world: &'a World,
    camera: PickCamera,
}

impl<'a> ScenePicker<'a> {
    pub fn new(world: &'a World, camera: PickCamera) -> Self {
        Self { world, camera }
    }
}

impl HitTest for ScenePicker<'_> {
    fn pick(&self, pos_px: Vec2) -> Option<Coordinate> {
        pick_screen(
            self.world,
            pos_px.x,
            pos_px.y,
            |x, y| self.camera.globe_ray(x, y),
            PickOptions::default(),
        )
        .map(|hit| hit.coordinate)
    }
}

#[cfg(test)]
mod tests {
    use super::{HitTest, PickCamera, ScenePicker};
    use foundation::math::geo::{Coordinate, MARKER_RADIUS};
    use foundation::math::{Vec2, Vec3};
    use scene::World;
    use scene::components::{Bounds, Marker, Transform};

    const VIEWPORT: Vec2 = Vec2 { x: 1280.0, y: 720.0 };

    fn spawn_marker(world: &mut World, coordinate: Coordinate) {
        let e = world.spawn();
        let position = coordinate.local_position(MARKER_RADIUS);
        world.set_transform(e, Transform::at(position));
        world.set_marker(e, Marker::new(coordinate));
        world.set_bounds(e, Bounds::around(position, 0.1));
    }

    #[test]
    fn center_pixel_ray_points_down_the_axis() {
        let camera = PickCamera::new(VIEWPORT, 3.0, Coordinate::new(0.0, 0.0));
        let ray = camera.globe_ray(640.0, 360.0).expect("ray");
        assert!((ray.origin.x - 3.0).abs() < 1e-12);
        assert!((ray.dir.x + 1.0).abs() < 1e-12);
        assert!(ray.dir.y.abs() < 1e-12 && ray.dir.z.abs() < 1e-12);
    }

    #[test]
    fn picks_the_marker_being_looked_at() {
        let mut world = World::new();
        let target = Coordinate::new(40.7, -74.0);
        spawn_marker(&mut world, target);

        // Orientation faces the marker, so it sits front and center.
        let camera = PickCamera::new(VIEWPORT, 3.0, target);
        let picker = ScenePicker::new(&world, camera);
        let picked = picker.pick(Vec2::new(640.0, 360.0));
        assert_eq!(picked, Some(target));
    }

    #[test]
    fn misses_when_marker_is_on_the_limb() {
        let mut world = World::new();
        spawn_marker(&mut world, Coordinate::new(40.7, -74.0));

        // Globe turned 90 degrees away; the marker sits on the limb, far
        // from the center pixel's ray.
        let camera = PickCamera::new(VIEWPORT, 3.0, Coordinate::new(0.0, 16.0));
        let picker = ScenePicker::new(&world, camera);
        assert_eq!(picker.pick(Vec2::new(640.0, 360.0)), None);
    }

    #[test]
    fn corner_pixel_misses_the_globe() {
        let mut world = World::new();
        let target = Coordinate::new(0.0, 0.0);
        spawn_marker(&mut world, target);

        let camera = PickCamera::new(VIEWPORT, 3.0, target);
        let picker = ScenePicker::new(&world, camera);
        assert_eq!(picker.pick(Vec2::new(0.0, 0.0)), None);
    }
}
