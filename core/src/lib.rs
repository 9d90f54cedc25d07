mod device;
pub mod error;
mod messaging;
mod reading;
mod system;

pub use device::*;
pub use messaging::*;
pub use reading::*;
pub use system::*;

/// Source tag of readings produced by the internal generator
pub static INTERNAL_SOURCE: &str = "internal";

/// Fallback for submissions without a `device_type`
pub static DEFAULT_DEVICE_TYPE: &str = "sensor";
