pub mod color_temp;
pub mod device;
pub mod light_state;

pub use device::Device;
pub use light_state::{DeviceState, LightSettings};
