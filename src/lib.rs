#![no_std]
#![cfg_attr(docs_rs, feature(doc_cfg))]
#![warn(missing_docs)]

//! A small PNG reader.
//!
//! The crate walks the PNG chunk stream, collects the header, the compressed
//! image data, and any `tEXt` entries, inflates the image data, and then
//! reverses the per-scanline filters to give you the raw samples.
//!
//! Only non-interlaced grayscale and truecolor images with 8 or 16 bits per
//! channel are decoded. Everything else is still *parsed* (so you can look at
//! the header), but the decoder reports it as unsupported rather than guess
//! at a pixel layout.
//!
//! ```no_run
//! # #[cfg(all(feature = "alloc", feature = "miniz_oxide"))]
//! # fn f() -> Result<(), minipng::PngError> {
//! let bytes: &[u8] = unimplemented!("data from somewhere");
//! let png = minipng::png::decode_png(bytes)?;
//! let first_row = png.pixels.row(0);
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(any(feature = "std", test))]
extern crate std;

#[cfg(target_pointer_width = "16")]
compile_error!("this crate assumes 32-bit or bigger pointers!");

mod error;
pub use error::*;

mod int_endian;
pub use int_endian::*;

mod parser_helpers;
pub(crate) use parser_helpers::*;

pub mod png;
