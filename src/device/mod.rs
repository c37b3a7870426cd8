//! Device addressing and the credentials shared by every device in a run.

mod address;
mod credentials;

pub use address::{DeviceAddress, parse_device_list};
pub use credentials::{DEFAULT_MODEL, DeviceCredentials};
