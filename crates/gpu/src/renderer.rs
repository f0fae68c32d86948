use foundation::math::Vec3;
use foundation::math::geo::{Coordinate, GLOBE_RADIUS, globe_to_world};
use scene::world::World;

/// The viewing camera: on +X at `distance`, looking at the origin.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OrbitCamera {
    pub distance: f64,
    pub fov_y_rad: f64,
}

impl OrbitCamera {
    pub fn at_distance(distance: f64, fov_y_rad: f64) -> Self {
        Self {
            distance,
            fov_y_rad,
        }
    }

    pub fn eye(&self) -> Vec3 {
        Vec3::new(self.distance, 0.0, 0.0)
    }
}

/// One draw the real renderer would issue. Collecting these is where this
/// crate stops; rasterization belongs to the host's graphics stack.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum RenderCommand {
    Globe {
        radius: f64,
        /// Orientation for the globe body (texture rotation).
        lat_deg: f64,
        lon_deg: f64,
    },
    Billboard {
        /// World-space position, current orientation applied.
        position: Vec3,
        width: f64,
        height: f64,
        scale: f64,
    },
}

#[derive(Debug, Default)]
pub struct RenderFrame {
    pub commands: Vec<RenderCommand>,
}

pub struct Renderer;

impl Renderer {
    /// Walks the world and emits the globe followed by every visible
    /// marker billboard, with the current orientation applied.
    pub fn collect(world: &World, orientation: Coordinate, _camera: OrbitCamera) -> RenderFrame {
        let mut frame = RenderFrame::default();
        frame.commands.push(RenderCommand::Globe {
            radius: GLOBE_RADIUS,
            lat_deg: orientation.lat_deg,
            lon_deg: orientation.lon_deg,
        });

        for (_, transform, billboard) in world.visible_billboards() {
            frame.commands.push(RenderCommand::Billboard {
                position: globe_to_world(transform.position, orientation),
                width: billboard.width,
                height: billboard.height,
                scale: billboard.scale,
            });
        }
        frame
    }
}
