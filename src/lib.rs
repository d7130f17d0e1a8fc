// lib.rs      gifdoc crate.
//
// Copyright (c) 2026  gifdoc authors
//
//! A library for decoding GIF images into structured documents.
//!
//! [Document::parse] walks the block structure of an entire GIF byte buffer
//! and builds a [Document]: the logical screen descriptor, the global color
//! table, the animation repeat count, and one [Frame] record per image with
//! its still-compressed pixel data.  Per-frame operations inflate, reorder
//! and compose that data on demand:
//!
//! * [decode_indexed] runs the LZW decompressor, yielding palette indices
//! * [deinterlace] reorders rows of an interlaced frame
//! * [to_image] maps indices through the active color table into an RGBA
//!   [Image] with its placement on the logical screen
//!
//! All three are memoized on the frame, so repeated calls are cheap.
//!
//! ## Example
//! ```
//! # fn main() -> Result<(), gifdoc::Error> {
//! # let gif = &[
//! #   0x47, 0x49, 0x46, 0x38, 0x39, 0x61, 0x02, 0x00,
//! #   0x02, 0x00, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00,
//! #   0xff, 0x00, 0xff, 0x2c, 0x00, 0x00, 0x00, 0x00,
//! #   0x02, 0x00, 0x02, 0x00, 0x00, 0x02, 0x02, 0x8c,
//! #   0x53, 0x00, 0x3b,
//! # ][..];
//! let mut doc = gifdoc::Document::parse(gif)?;
//! for i in 0..doc.frames().len() {
//!     let image = doc.to_image(i)?;
//!     println!("{}x{} @ {},{}", image.width(), image.height(),
//!         image.left(), image.top());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! [decode_indexed]: struct.Document.html#method.decode_indexed
//! [deinterlace]: struct.Document.html#method.deinterlace
//! [to_image]: struct.Document.html#method.to_image
//! [Document]: struct.Document.html
//! [Document::parse]: struct.Document.html#method.parse
//! [Frame]: struct.Frame.html
//! [Image]: struct.Image.html
#![forbid(unsafe_code)]
#[macro_use]
extern crate log;

pub mod block;
mod decode;
mod error;
mod lzw;
mod private;

pub use crate::error::{Error, Result};
pub use crate::private::{Document, Frame, Image};
