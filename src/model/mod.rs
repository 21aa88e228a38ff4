mod body;
pub mod orbit;
mod orrery;
mod registry;

pub use body::{color_from_hex, BodyDescriptor, BodyID};
pub use orbit::{OrbitalState, Spin};
pub use orrery::Orrery;
pub use registry::BodyRegistry;
