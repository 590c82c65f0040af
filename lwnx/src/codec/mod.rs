pub mod decoder;
pub mod encoder;

pub use decoder::{Decoded, PacketDecoder, ParseState};
pub use encoder::encode_packet;
