pub mod decode;
pub mod encode;
pub mod position;
pub mod reader;

pub use decode::{decode, decode_canvas};
pub use encode::{encode_layout, encode_settings, encode_stat, encode_timer, EncodeError};
pub use reader::DecodeError;
