#![forbid(unsafe_code)]

//! Module for working with PNG data.
//!
//! * [Portable Network Graphics Specification (Second Edition)][png-spec]
//!
//! [png-spec]: https://www.w3.org/TR/2003/REC-PNG-20031110/
//!
//! ## Library Design Assumptions
//!
//! * The entire PNG encoded source data stream is a single byte slice.
//! * Each stage of the decoding process goes into a single output buffer which
//!   holds all of the output of that stage at once.
//! * Only non-interlaced grayscale and truecolor images, at 8 or 16 bits per
//!   channel, are decoded to pixels. Other headers still parse, and are then
//!   reported as [`Unsupported`].
//!
//! ## Automatic Decoding
//!
//! Call [`decode_png`] and you get the header, the text entries, and the
//! unfiltered pixels. This requires the `alloc` and `miniz_oxide` crate
//! features. Use [`decode_png_with`] to pick a memory limit or to bring your
//! own [`Inflate`] implementation.
//!
//! ## Manual Decoding
//!
//! 1) Call [`collect_payload`] (or walk [`RawChunkIter`] yourself). This gives
//!    you the [`ImageHeader`], all of the `IDAT` data joined into one zlib
//!    stream, and the `tEXt` entries.
//! 2) Call [`decompress_payload`] to inflate the stream. The output is
//!    *filtered* data: each scanline is one filter type byte followed by the
//!    row's samples.
//! 3) Call [`unfilter_scanlines`] with an output buffer of
//!    `height * width * bytes_per_pixel` bytes. Scanlines are reconstructed
//!    top to bottom, since each one can depend on the row above it.
//!
//! Steps 1 and 3 work without `alloc` if you walk the chunks yourself and
//! provide the buffers.
//!
//! ## Parsing Errors
//!
//! Unlike a lenient viewer, this decoder is all-or-nothing. The one thing it
//! tolerates is a chunk type it doesn't know, which is logged (with the `log`
//! crate) and skipped. Chunk CRCs aren't checked.

mod chunk;
pub use chunk::*;

mod ihdr;
pub use ihdr::*;

mod inflate;
pub use inflate::*;

mod unfilter;
pub use unfilter::*;

#[cfg(feature = "alloc")]
mod text;
#[cfg(feature = "alloc")]
pub use text::*;

#[cfg(feature = "alloc")]
mod payload;
#[cfg(feature = "alloc")]
pub use payload::*;

#[cfg(feature = "alloc")]
mod pixels;
#[cfg(feature = "alloc")]
pub use pixels::*;

#[cfg(feature = "alloc")]
mod decode;
#[cfg(feature = "alloc")]
pub use decode::*;
