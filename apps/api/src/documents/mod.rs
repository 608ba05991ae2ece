// Document decoding — turns an uploaded resume into raw text.
// PDF via pdf-extract; plain-text uploads pass through as UTF-8.

pub mod decoder;

pub use decoder::{decode_upload, DecodeError};
