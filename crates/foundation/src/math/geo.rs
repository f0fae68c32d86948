use crate::math::angles::{clamp_latitude, normalize_longitude, to_radians};
use crate::math::vec::Vec3;

/// Globe radius in scene units.
pub const GLOBE_RADIUS: f64 = 1.0;
/// Radius of the sphere photo markers sit on, slightly above the surface.
pub const MARKER_RADIUS: f64 = 1.05;

/// A latitude/longitude pair in degrees.
///
/// Invariant: a constructed `Coordinate` is always in canonical form:
/// latitude clamped to `[-LAT_LIMIT_DEG, LAT_LIMIT_DEG]`, longitude wrapped
/// into `(-180, 180]`. Every mutation site goes through `new`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Coordinate {
    pub lat_deg: f64,
    pub lon_deg: f64,
}

impl Coordinate {
    pub fn new(lat_deg: f64, lon_deg: f64) -> Self {
        Self {
            lat_deg: clamp_latitude(lat_deg),
            lon_deg: normalize_longitude(lon_deg),
        }
    }

    /// Position of this coordinate in the globe-local frame, on a sphere of
    /// the given radius. Longitude 0 / latitude 0 faces +X; +Y is the north
    /// pole axis.
    pub fn local_position(self, radius: f64) -> Vec3 {
        let lat = to_radians(self.lat_deg);
        let lon = to_radians(self.lon_deg);
        Vec3::new(
            radius * lat.cos() * lon.cos(),
            radius * lat.sin(),
            radius * lat.cos() * lon.sin(),
        )
    }
}

impl Default for Coordinate {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Maps a globe-local vector into world space for the given orientation.
///
/// The globe spins by the orientation longitude about +Y, then tilts by the
/// orientation latitude about +Z, so the coordinate currently "looked at"
/// ends up on the +X axis facing the camera.
pub fn globe_to_world(v: Vec3, orientation: Coordinate) -> Vec3 {
    v.rotate_y(to_radians(orientation.lon_deg))
        .rotate_z(to_radians(-orientation.lat_deg))
}

/// Inverse of [`globe_to_world`]; used to carry pick rays into the
/// globe-local frame markers are stored in.
pub fn world_to_globe(v: Vec3, orientation: Coordinate) -> Vec3 {
    v.rotate_z(to_radians(orientation.lat_deg))
        .rotate_y(to_radians(-orientation.lon_deg))
}
