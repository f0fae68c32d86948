pub mod angles;
pub mod geo;
pub mod vec;

pub use angles::*;
pub use geo::*;
pub use vec::*;
