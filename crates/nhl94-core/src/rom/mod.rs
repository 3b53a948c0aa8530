//! Raw image access: bounds-checked readers/writers and text decoding.

mod bytes;
pub mod text;

// Synthetic image builder for testing (always available for unit and integration tests)
#[doc(hidden)]
pub mod mock;

pub use bytes::{RomReader, RomWriter, decode_bcd, encode_bcd, join_nibbles, split_byte};
pub use text::{DecodedString, read_length_prefixed};

#[doc(hidden)]
pub use mock::{MockPlayer, MockTeam, RomBuilder};
