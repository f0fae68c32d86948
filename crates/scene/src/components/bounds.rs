use foundation::math::Vec3;

/// Axis-aligned bounds in the globe-local frame; the pickable extent of an
/// entity.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// A cube of the given half extent centered on `center`.
    pub fn around(center: Vec3, half_extent: f64) -> Self {
        let h = Vec3::new(half_extent, half_extent, half_extent);
        Self {
            min: center - h,
            max: center + h,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Bounds;
    use foundation::math::Vec3;

    #[test]
    fn around_is_symmetric() {
        let b = Bounds::around(Vec3::new(1.0, 2.0, 3.0), 0.5);
        assert_eq!(b.min, Vec3::new(0.5, 1.5, 2.5));
        assert_eq!(b.max, Vec3::new(1.5, 2.5, 3.5));
    }
}
