pub mod event_bus;
pub mod frame;
pub mod step_timer;

pub use event_bus::*;
pub use frame::*;
pub use step_timer::*;
