use foundation::math::geo::Coordinate;

/// Capability tag: this entity is a photo marker and may be hit-tested.
///
/// Picking filters on the presence of this component, so nothing else in
/// the scene (the globe itself included) can be mistaken for a marker.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Marker {
    pub coordinate: Coordinate,
}

impl Marker {
    pub fn new(coordinate: Coordinate) -> Self {
        Self { coordinate }
    }
}
