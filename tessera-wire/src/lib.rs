//! Tessera Wire - masked partial-field codec.
//!
//! Every structure the layout engine receives is a delta: a `u32` bit mask
//! followed by one encoded value per set bit, in a fixed declaration order.
//! Fields whose bit is clear are not present and must keep their previous
//! value on the receiving side.
//!
//! ## Encoding
//!
//! - Integers and floats are big-endian (`f32` travels as its IEEE bits).
//! - Strings are either length-prefixed (`u16`/`u32`) or null-terminated.
//! - Nested records are length-prefixed byte strings holding another masked
//!   record, so a reader can skip or clip them independently.

mod error;
mod mask;
mod reader;
mod writer;

pub use error::{Result, WireError};
pub use mask::Mask;
pub use reader::Reader;
pub use writer::{MaskWriter, Writer};
