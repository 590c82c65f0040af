mod product_info;
mod reading;

pub(crate) use product_info::str16_from_packet;
pub use product_info::{FirmwareVersion, ProductInfo};
pub use reading::{decode_reading, Reading, ANGLE_WRAP_THRESHOLD};
