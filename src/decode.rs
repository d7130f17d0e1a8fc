// decode.rs
//
// Copyright (c) 2026  gifdoc authors
//
//! GIF container parsing
//!
//! Walks the block structure of a complete GIF byte buffer and assembles a
//! [Document](../struct.Document.html) of frame records holding
//! still-compressed image data.  Truncation of LZW pixel data and bytes
//! trailing the end marker are tolerated; everything else malformed is a
//! structural error carrying the offset of the offending byte.
use crate::block::{
    ColorTable, GraphicControl, ImageDesc, LogicalScreenDesc, CHANNELS,
};
use crate::error::{Error, Result};
use crate::private::{Document, Frame};

/// Extension introducer
const EXTENSION: u8 = 0x21;
/// Image separator
const IMAGE_DESC: u8 = 0x2C;
/// GIF trailer (end marker)
const TRAILER: u8 = 0x3B;

/// Graphic control extension label
const GRAPHIC_CONTROL: u8 = 0xF9;
/// Application extension label
const APPLICATION: u8 = 0xFF;
/// Comment extension label
const COMMENT: u8 = 0xFE;
/// Plain text extension label
const PLAIN_TEXT: u8 = 0x01;

/// Cursor over a GIF byte buffer
struct Parser<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Parser<'a> {
    /// Create a parser at the start of a buffer
    fn new(buf: &'a [u8]) -> Self {
        Parser { buf, pos: 0 }
    }

    /// Get the current byte offset
    fn offset(&self) -> usize {
        self.pos
    }

    /// Get the number of unconsumed bytes
    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Consume one byte
    fn u8(&mut self) -> Result<u8> {
        let byte = self
            .buf
            .get(self.pos)
            .copied()
            .ok_or(Error::UnexpectedEndOfFile { offset: self.pos })?;
        self.pos += 1;
        Ok(byte)
    }

    /// Consume a 16-bit little-endian value
    fn u16_le(&mut self) -> Result<u16> {
        let lo = self.u8()?;
        let hi = self.u8()?;
        Ok(u16::from(lo) | u16::from(hi) << 8)
    }

    /// Consume `len` bytes
    fn slice(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self.pos + len;
        if end <= self.buf.len() {
            let buf = &self.buf[self.pos..end];
            self.pos = end;
            Ok(buf)
        } else {
            Err(Error::UnexpectedEndOfFile {
                offset: self.buf.len(),
            })
        }
    }

    /// Consume the zero terminator ending a sub-block sequence
    fn terminator(&mut self) -> Result<()> {
        let offset = self.offset();
        let byte = self.u8()?;
        if byte == 0 {
            Ok(())
        } else {
            Err(Error::MissingBlockTerminator { offset, byte })
        }
    }

    /// Skip length-prefixed sub-blocks up to a zero-length terminator
    fn skip_sub_blocks(&mut self) -> Result<()> {
        loop {
            let len = self.u8()?;
            if len == 0 {
                return Ok(());
            }
            self.slice(len.into())?;
        }
    }
}

/// Parse an entire GIF byte buffer into a document
pub(crate) fn parse(buf: &[u8]) -> Result<Document> {
    let mut parser = Parser::new(buf);
    let mut doc = parse_preamble(&mut parser)?;
    // graphic control metadata attaches to the next image descriptor
    let mut pending: Option<GraphicControl> = None;
    let mut trailer = false;
    while !trailer && parser.remaining() > 0 {
        let offset = parser.offset();
        let byte = parser.u8()?;
        match byte {
            EXTENSION => parse_extension(&mut parser, &mut doc, &mut pending)?,
            IMAGE_DESC => {
                debug!("image descriptor @ {:#010X}", offset);
                let frame = parse_image(&mut parser, pending.take())?;
                doc.push_frame(frame);
            }
            TRAILER => trailer = true,
            byte => return Err(Error::UnknownBlock { offset, byte }),
        }
    }
    if pending.is_some() {
        debug!("graphic control without an image descriptor dropped");
    }
    let extra = parser.remaining();
    if extra > 0 {
        warn!("{} bytes of data after trailer ignored", extra);
    }
    Ok(doc)
}

/// Parse the signature, logical screen descriptor and global color table
fn parse_preamble(parser: &mut Parser) -> Result<Document> {
    let header = parser.slice(6)?;
    if &header[..3] != b"GIF" {
        return Err(Error::MalformedHeader);
    }
    let version = [header[3], header[4], header[5]];
    match &version {
        b"87a" | b"89a" => {}
        _ => return Err(Error::UnsupportedVersion(version)),
    }
    let width = parser.u16_le()?;
    let height = parser.u16_le()?;
    let flags = parser.u8()?;
    let background_color_idx = parser.u8()?;
    let pixel_aspect_ratio = parser.u8()?;
    let screen_desc = LogicalScreenDesc::default()
        .with_screen_width(width)
        .with_screen_height(height)
        .with_flags(flags)
        .with_background_color_idx(background_color_idx)
        .with_pixel_aspect_ratio(pixel_aspect_ratio);
    debug!("logical screen {}x{}", width, height);
    let global_color_table = if screen_desc.color_table_present() {
        let sz = screen_desc.color_table_len() * CHANNELS;
        Some(ColorTable::with_colors(parser.slice(sz)?))
    } else {
        None
    };
    Ok(Document::new(screen_desc, global_color_table))
}

/// Parse one extension block
fn parse_extension(
    parser: &mut Parser,
    doc: &mut Document,
    pending: &mut Option<GraphicControl>,
) -> Result<()> {
    let offset = parser.offset();
    let label = parser.u8()?;
    match label {
        GRAPHIC_CONTROL => {
            debug!("graphic control extension @ {:#010X}", offset);
            let len = parser.u8()?;
            let data = parser.slice(len.into())?;
            parser.terminator()?;
            let mut control = GraphicControl::default();
            control.set_flags(data.first().copied().unwrap_or(0));
            if data.len() >= 3 {
                let delay = u16::from(data[1]) | u16::from(data[2]) << 8;
                control.set_delay_time_cs(delay);
            }
            if control.transparent_color().is_some() {
                let idx = data.get(3).copied().unwrap_or(0);
                control.set_transparent_color_idx(idx);
            }
            *pending = Some(control);
        }
        APPLICATION => {
            debug!("application extension @ {:#010X}", offset);
            let len_offset = parser.offset();
            let len = parser.u8()?;
            if len != 11 {
                return Err(Error::MalformedApplicationExtension {
                    offset: len_offset,
                    len,
                });
            }
            let app_id = parser.slice(11)?;
            if app_id == b"NETSCAPE2.0" {
                parser.u8()?; // sub-block size, not validated
                let id_offset = parser.offset();
                let id = parser.u8()?;
                if id != 1 {
                    return Err(Error::MalformedLoopCount {
                        offset: id_offset,
                        byte: id,
                    });
                }
                let repeat = parser.u16_le()?;
                parser.terminator()?;
                doc.set_repeat(repeat);
            } else {
                // arbitrary application extensions are permitted
                parser.skip_sub_blocks()?;
            }
        }
        COMMENT | PLAIN_TEXT => {
            debug!("extension {:#04X} skipped @ {:#010X}", label, offset);
            parser.skip_sub_blocks()?;
        }
        byte => return Err(Error::UnknownExtension { offset, byte }),
    }
    Ok(())
}

/// Parse an image descriptor, optional local color table and image data
fn parse_image(
    parser: &mut Parser,
    graphic_control_ext: Option<GraphicControl>,
) -> Result<Frame> {
    let left = parser.u16_le()?;
    let top = parser.u16_le()?;
    let width = parser.u16_le()?;
    let height = parser.u16_le()?;
    let flags = parser.u8()?;
    let image_desc = ImageDesc::default()
        .with_left(left)
        .with_top(top)
        .with_width(width)
        .with_height(height)
        .with_flags(flags);
    let local_color_table = if image_desc.color_table_present() {
        let sz = image_desc.color_table_len() * CHANNELS;
        Some(ColorTable::with_colors(parser.slice(sz)?))
    } else {
        None
    };
    let offset = parser.offset();
    let min_code_size = parser.u8()?;
    if min_code_size < 2 || min_code_size > 8 {
        return Err(Error::InvalidCodeSize {
            offset,
            code_size: min_code_size,
        });
    }
    // concatenate sub-block payloads; boundaries are irrelevant to LZW
    let mut raw_data = Vec::new();
    loop {
        let len = parser.u8()?;
        if len == 0 {
            break;
        }
        raw_data.extend_from_slice(parser.slice(len.into())?);
    }
    Ok(Frame::new(
        graphic_control_ext,
        image_desc,
        local_color_table,
        min_code_size,
        raw_data,
    ))
}
