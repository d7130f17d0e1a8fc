// private.rs
//
// Copyright (c) 2026  gifdoc authors
//
//! Private module for top-level items
use crate::block::{ColorTable, GraphicControl, ImageDesc, LogicalScreenDesc};
use crate::decode;
use crate::error::{Error, Result};
use crate::lzw::Decompressor;
use pix::rgb::SRgba8;
use pix::Raster;

/// Starting row of each interlace pass
const PASS_START: [usize; 4] = [0, 4, 2, 1];
/// Row stride of each interlace pass
const PASS_STRIDE: [usize; 4] = [8, 8, 4, 2];

/// Deinterlaced row cache state
#[derive(Clone, Debug)]
enum Deinterlaced {
    /// Reordered rows, cached beside the decoded data
    Rows(Vec<u8>),
    /// Reordered rows folded into the primary decoded cache
    Folded,
}

/// One frame of a GIF document
///
/// Created by [Document::parse](struct.Document.html#method.parse) with its
/// pixel data still LZW-compressed; the decoded and deinterlaced caches are
/// populated at most once, through the per-frame operations on
/// [Document](struct.Document.html).
#[derive(Clone, Debug)]
pub struct Frame {
    /// Animation metadata from the preceding graphic control extension
    graphic_control_ext: Option<GraphicControl>,
    /// Image descriptor
    image_desc: ImageDesc,
    /// Local color table
    local_color_table: Option<ColorTable>,
    /// Minimum LZW code size (2-8)
    min_code_size: u8,
    /// Compressed image data, sub-block payloads concatenated
    raw_data: Vec<u8>,
    /// Decoded color indices (lazy)
    indexed: Option<Vec<u8>>,
    /// Deinterlaced color indices (lazy)
    deinterlaced: Option<Deinterlaced>,
}

impl Frame {
    /// Create a new frame
    pub(crate) fn new(
        graphic_control_ext: Option<GraphicControl>,
        image_desc: ImageDesc,
        local_color_table: Option<ColorTable>,
        min_code_size: u8,
        raw_data: Vec<u8>,
    ) -> Self {
        Frame {
            graphic_control_ext,
            image_desc,
            local_color_table,
            min_code_size,
            raw_data,
            indexed: None,
            deinterlaced: None,
        }
    }

    /// Get the graphic control metadata, if any
    pub fn graphic_control_ext(&self) -> Option<&GraphicControl> {
        self.graphic_control_ext.as_ref()
    }

    /// Get the image descriptor
    pub fn image_desc(&self) -> &ImageDesc {
        &self.image_desc
    }

    /// Get the local color table, if any
    pub fn local_color_table(&self) -> Option<&ColorTable> {
        self.local_color_table.as_ref()
    }

    /// Get the minimum LZW code size
    pub fn min_code_size(&self) -> u8 {
        self.min_code_size
    }

    /// Get the compressed image data
    pub fn raw_data(&self) -> &[u8] {
        &self.raw_data
    }

    /// Get the transparent color index used when compositing
    fn transparent_idx(&self) -> u8 {
        self.graphic_control_ext
            .map(|c| c.transparent_color_idx())
            .unwrap_or(0)
    }

    /// Populate the decoded index cache
    fn decode(&mut self) {
        if self.indexed.is_none() {
            let pixels = Decompressor::new(self.min_code_size)
                .decompress(&self.raw_data, self.image_desc.image_sz());
            self.indexed = Some(pixels);
        }
    }

    /// Get the sequence to composite: deinterlaced rows when cached,
    /// otherwise the primary decoded cache
    fn display_indexed(&self) -> &[u8] {
        match &self.deinterlaced {
            Some(Deinterlaced::Rows(rows)) => rows,
            _ => self.indexed.as_deref().unwrap_or(&[]),
        }
    }
}

/// A parsed GIF document
///
/// Frames are stored in display order and addressed by index; the two
/// per-frame caches are the only state mutated after parsing, each written
/// at most once.
#[derive(Clone, Debug)]
pub struct Document {
    /// Logical screen descriptor
    screen_desc: LogicalScreenDesc,
    /// Global color table
    global_color_table: Option<ColorTable>,
    /// Animation repeat count (0 means loop forever)
    repeat: u16,
    /// Frames in display order
    frames: Vec<Frame>,
}

impl Document {
    /// Parse an entire GIF byte buffer
    pub fn parse(buf: &[u8]) -> Result<Self> {
        decode::parse(buf)
    }

    /// Create an empty document
    pub(crate) fn new(
        screen_desc: LogicalScreenDesc,
        global_color_table: Option<ColorTable>,
    ) -> Self {
        Document {
            screen_desc,
            global_color_table,
            repeat: 0,
            frames: Vec::new(),
        }
    }

    /// Append a parsed frame
    pub(crate) fn push_frame(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    /// Set the animation repeat count
    pub(crate) fn set_repeat(&mut self, repeat: u16) {
        self.repeat = repeat;
    }

    /// Get the logical screen descriptor
    pub fn screen_desc(&self) -> &LogicalScreenDesc {
        &self.screen_desc
    }

    /// Get the global color table, if any
    pub fn global_color_table(&self) -> Option<&ColorTable> {
        self.global_color_table.as_ref()
    }

    /// Get the animation repeat count (0 means loop forever)
    pub fn repeat(&self) -> u16 {
        self.repeat
    }

    /// Get all frames, in display order
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Get one frame by index
    pub fn frame(&self, index: usize) -> Result<&Frame> {
        self.frames.get(index).ok_or(Error::FrameIndexOutOfBounds {
            index,
            frames: self.frames.len(),
        })
    }

    /// Get one frame mutably
    fn frame_mut(&mut self, index: usize) -> Result<&mut Frame> {
        let frames = self.frames.len();
        self.frames
            .get_mut(index)
            .ok_or(Error::FrameIndexOutOfBounds { index, frames })
    }

    /// Decode one frame's LZW data into a sequence of color indices
    ///
    /// The result is memoized on the frame; repeated calls return the
    /// cached sequence.  A truncated stream is zero-padded to
    /// `width * height` indices rather than treated as an error.
    pub fn decode_indexed(&mut self, index: usize) -> Result<&[u8]> {
        let frame = self.frame_mut(index)?;
        frame.decode();
        Ok(frame.indexed.as_deref().unwrap_or(&[]))
    }

    /// Reorder an interlaced frame's decoded indices into row order
    ///
    /// Fails with [Error::NotInterlaced](enum.Error.html) unless the
    /// frame's interlace flag is set.  The result is memoized beside the
    /// decoded cache, which is left untouched.
    pub fn deinterlace(&mut self, index: usize) -> Result<&[u8]> {
        self.deinterlace_frame(index, false)
    }

    /// Reorder an interlaced frame's decoded indices, in place
    ///
    /// Like [deinterlace](struct.Document.html#method.deinterlace), but the
    /// primary decoded cache is replaced with the reordered rows and the
    /// separate deinterlace cache is marked as folded in.
    pub fn deinterlace_overwrite(&mut self, index: usize) -> Result<&[u8]> {
        self.deinterlace_frame(index, true)
    }

    fn deinterlace_frame(
        &mut self,
        index: usize,
        overwrite: bool,
    ) -> Result<&[u8]> {
        self.decode_indexed(index)?;
        let frame = self.frame_mut(index)?;
        if !frame.image_desc.interlaced() {
            return Err(Error::NotInterlaced { index });
        }
        if frame.deinterlaced.is_none() {
            let indexed = frame.indexed.as_deref().unwrap_or(&[]);
            let rows = deinterlace_rows(
                indexed,
                frame.image_desc.width().into(),
                frame.image_desc.height().into(),
            );
            frame.deinterlaced = Some(Deinterlaced::Rows(rows));
        }
        if overwrite {
            if let Some(Deinterlaced::Rows(rows)) = frame.deinterlaced.take()
            {
                frame.indexed = Some(rows);
            }
            frame.deinterlaced = Some(Deinterlaced::Folded);
        }
        match &frame.deinterlaced {
            Some(Deinterlaced::Rows(rows)) => Ok(rows),
            _ => Ok(frame.indexed.as_deref().unwrap_or(&[])),
        }
    }

    /// Compose one frame into an RGBA image
    ///
    /// Decodes (and, for interlaced frames, deinterlaces) on demand, then
    /// maps each color index through the active color table: the frame's
    /// local table if present, else the global table, else an all-black
    /// fallback.  A pixel is fully transparent when its index equals the
    /// frame's transparent color index (0 when the frame carries no
    /// graphic control extension).
    pub fn to_image(&mut self, index: usize) -> Result<Image> {
        self.decode_indexed(index)?;
        if self.frame(index)?.image_desc.interlaced() {
            self.deinterlace(index)?;
        }
        let frame = self.frame(index)?;
        let fallback;
        let table = match frame
            .local_color_table
            .as_ref()
            .or_else(|| self.global_color_table.as_ref())
        {
            Some(table) => table,
            None => {
                fallback = ColorTable::with_colors(&[0; 768]);
                &fallback
            }
        };
        let transparent = frame.transparent_idx();
        let desc = frame.image_desc;
        let width = usize::from(desc.width());
        let height = usize::from(desc.height());
        let mut rgba = vec![0; width * height * 4];
        let indexed = frame.display_indexed();
        for (i, px) in indexed.iter().take(width * height).enumerate() {
            let [red, green, blue] = table.rgb(*px).unwrap_or([0, 0, 0]);
            let p = i * 4;
            rgba[p] = red;
            rgba[p + 1] = green;
            rgba[p + 2] = blue;
            rgba[p + 3] = if *px == transparent { 0 } else { 255 };
        }
        let raster = Raster::<SRgba8>::with_u8_buffer(
            desc.width().into(),
            desc.height().into(),
            rgba,
        );
        Ok(Image {
            raster,
            left: desc.left(),
            top: desc.top(),
        })
    }
}

/// Reorder a decoded index sequence from interlace pass order to row order
fn deinterlace_rows(indexed: &[u8], width: usize, height: usize) -> Vec<u8> {
    let mut rows = vec![0; indexed.len()];
    let mut from = 0;
    for (&start, &stride) in PASS_START.iter().zip(PASS_STRIDE.iter()) {
        let mut row = start;
        while row < height {
            let to = row * width;
            if from + width > indexed.len() || to + width > rows.len() {
                // degenerate decode, nothing more to reorder
                return rows;
            }
            rows[to..to + width]
                .copy_from_slice(&indexed[from..from + width]);
            from += width;
            row += stride;
        }
    }
    rows
}

/// An RGBA image composed from one frame
///
/// Carries the frame's placement on the logical screen so callers can
/// composite it onto a larger canvas, honoring the frame's
/// [DisposalMethod](block/enum.DisposalMethod.html).
pub struct Image {
    /// RGBA pixel data
    raster: Raster<SRgba8>,
    /// Left position on the logical screen
    left: u16,
    /// Top position on the logical screen
    top: u16,
}

impl Image {
    /// Get the RGBA raster
    pub fn raster(&self) -> &Raster<SRgba8> {
        &self.raster
    }

    /// Convert into the RGBA raster, discarding placement
    pub fn into_raster(self) -> Raster<SRgba8> {
        self.raster
    }

    /// Get the left position on the logical screen
    pub fn left(&self) -> u16 {
        self.left
    }

    /// Get the top position on the logical screen
    pub fn top(&self) -> u16 {
        self.top
    }

    /// Get the width, in pixels
    pub fn width(&self) -> u32 {
        self.raster.width()
    }

    /// Get the height, in pixels
    pub fn height(&self) -> u32 {
        self.raster.height()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::block::{ImageDesc, LogicalScreenDesc};

    /// Build a one-frame document without going through the parser
    fn doc_with_frame(frame: Frame) -> Document {
        let screen_desc = LogicalScreenDesc::default()
            .with_screen_width(frame.image_desc.width())
            .with_screen_height(frame.image_desc.height());
        let mut doc = Document::new(screen_desc, None);
        doc.push_frame(frame);
        doc
    }

    fn frame(desc: ImageDesc, raw_data: Vec<u8>) -> Frame {
        Frame::new(None, desc, None, 2, raw_data)
    }

    #[test]
    fn decode_is_memoized() -> Result<()> {
        let desc = ImageDesc::default().with_width(2).with_height(2);
        let mut doc = doc_with_frame(frame(desc, vec![0x8C, 0x53]));
        let first = doc.decode_indexed(0)?.as_ptr();
        let again = doc.decode_indexed(0)?.as_ptr();
        assert_eq!(first, again);
        Ok(())
    }

    #[test]
    fn deinterlace_four_rows() -> Result<()> {
        // pass order for 4 rows of width 1: row 0, row 2, rows 1 and 3
        let desc = ImageDesc::default()
            .with_width(1)
            .with_height(4)
            .with_flags(0b0100_0000);
        let mut doc = doc_with_frame(frame(desc, vec![0x44, 0x34, 0x05]));
        assert_eq!(doc.decode_indexed(0)?, &[0, 1, 2, 3]);
        assert_eq!(doc.deinterlace(0)?, &[0, 2, 1, 3]);
        // the primary cache is untouched
        assert_eq!(doc.decode_indexed(0)?, &[0, 1, 2, 3]);
        Ok(())
    }

    #[test]
    fn deinterlace_eight_rows() -> Result<()> {
        let desc = ImageDesc::default()
            .with_width(1)
            .with_height(8)
            .with_flags(0b0100_0000);
        let mut doc = doc_with_frame(frame(desc, Vec::new()));
        // bypass LZW with a known sequential decode
        doc.frames[0].indexed = Some(vec![0, 1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(doc.deinterlace(0)?, &[0, 4, 2, 5, 1, 6, 3, 7]);
        Ok(())
    }

    #[test]
    fn deinterlace_is_memoized() -> Result<()> {
        let desc = ImageDesc::default()
            .with_width(1)
            .with_height(4)
            .with_flags(0b0100_0000);
        let mut doc = doc_with_frame(frame(desc, vec![0x44, 0x34, 0x05]));
        let first = doc.deinterlace(0)?.as_ptr();
        let again = doc.deinterlace(0)?.as_ptr();
        assert_eq!(first, again);
        Ok(())
    }

    #[test]
    fn deinterlace_needs_interlace_flag() {
        let desc = ImageDesc::default().with_width(2).with_height(2);
        let mut doc = doc_with_frame(frame(desc, vec![0x8C, 0x53]));
        assert_eq!(
            doc.deinterlace(0).unwrap_err(),
            Error::NotInterlaced { index: 0 },
        );
    }

    #[test]
    fn deinterlace_overwrite_folds() -> Result<()> {
        let desc = ImageDesc::default()
            .with_width(1)
            .with_height(4)
            .with_flags(0b0100_0000);
        let mut doc = doc_with_frame(frame(desc, vec![0x44, 0x34, 0x05]));
        assert_eq!(doc.deinterlace_overwrite(0)?, &[0, 2, 1, 3]);
        // the reordered rows replace the primary cache
        assert_eq!(doc.decode_indexed(0)?, &[0, 2, 1, 3]);
        // folded state persists across both variants
        assert_eq!(doc.deinterlace(0)?, &[0, 2, 1, 3]);
        assert_eq!(doc.deinterlace_overwrite(0)?, &[0, 2, 1, 3]);
        Ok(())
    }

    #[test]
    fn compose_with_global_table() -> Result<()> {
        let gif = [
            0x47, 0x49, 0x46, 0x38, 0x39, 0x61, 0x02, 0x00, //
            0x02, 0x00, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00, //
            0xFF, 0x00, 0xFF, 0x2C, 0x00, 0x00, 0x00, 0x00, //
            0x02, 0x00, 0x02, 0x00, 0x00, 0x02, 0x02, 0x8C, //
            0x53, 0x00, 0x3B,
        ];
        let mut doc = Document::parse(&gif)?;
        let image = doc.to_image(0)?;
        assert_eq!(image.width(), 2);
        assert_eq!(image.height(), 2);
        assert_eq!((image.left(), image.top()), (0, 0));
        let expected = [0xFF, 0x00, 0xFF, 0xFF].repeat(4);
        assert_eq!(image.raster().as_u8_slice(), &expected[..]);
        Ok(())
    }

    #[test]
    fn compose_local_table_precedence() -> Result<()> {
        let desc = ImageDesc::default()
            .with_width(2)
            .with_height(2)
            .with_flags(0b1000_0000);
        let local = ColorTable::with_colors(&[0, 0, 0, 0, 0xAA, 0]);
        let frame = Frame::new(None, desc, Some(local), 2, vec![0x8C, 0x53]);
        let screen_desc = LogicalScreenDesc::default()
            .with_screen_width(2)
            .with_screen_height(2);
        let global = ColorTable::with_colors(&[0, 0, 0, 0xFF, 0, 0]);
        let mut doc = Document::new(screen_desc, Some(global));
        doc.push_frame(frame);
        let image = doc.to_image(0)?;
        let expected = [0x00, 0xAA, 0x00, 0xFF].repeat(4);
        assert_eq!(image.raster().as_u8_slice(), &expected[..]);
        Ok(())
    }

    #[test]
    fn compose_fallback_table_is_black() -> Result<()> {
        let desc = ImageDesc::default().with_width(2).with_height(2);
        let mut doc = doc_with_frame(frame(desc, vec![0x8C, 0x53]));
        let image = doc.to_image(0)?;
        let expected = [0x00, 0x00, 0x00, 0xFF].repeat(4);
        assert_eq!(image.raster().as_u8_slice(), &expected[..]);
        Ok(())
    }

    #[test]
    fn compose_transparency() -> Result<()> {
        // transparency flag set with index 1; every pixel is index 1
        let gif = [
            0x47, 0x49, 0x46, 0x38, 0x39, 0x61, 0x02, 0x00, //
            0x02, 0x00, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00, //
            0xFF, 0x00, 0xFF, 0x21, 0xF9, 0x04, 0x01, 0x00, //
            0x00, 0x01, 0x00, 0x2C, 0x00, 0x00, 0x00, 0x00, //
            0x02, 0x00, 0x02, 0x00, 0x00, 0x02, 0x02, 0x8C, //
            0x53, 0x00, 0x3B,
        ];
        let mut doc = Document::parse(&gif)?;
        let image = doc.to_image(0)?;
        let expected = [0xFF, 0x00, 0xFF, 0x00].repeat(4);
        assert_eq!(image.raster().as_u8_slice(), &expected[..]);
        Ok(())
    }

    #[test]
    fn compose_default_transparent_index_is_zero() -> Result<()> {
        // no graphic control: index 0 composes transparent
        let desc = ImageDesc::default().with_width(1).with_height(2);
        let mut doc = doc_with_frame(frame(desc, Vec::new()));
        doc.frames[0].indexed = Some(vec![0, 1]);
        let image = doc.to_image(0)?;
        assert_eq!(
            image.raster().as_u8_slice(),
            &[0, 0, 0, 0, 0, 0, 0, 0xFF][..],
        );
        Ok(())
    }

    #[test]
    fn compose_degenerate_frame() -> Result<()> {
        // empty payload decodes to [0]; remaining pixels stay zeroed
        let desc = ImageDesc::default().with_width(2).with_height(2);
        let mut doc = doc_with_frame(frame(desc, Vec::new()));
        assert_eq!(doc.decode_indexed(0)?, &[0]);
        let image = doc.to_image(0)?;
        assert_eq!(image.raster().as_u8_slice(), &[0u8; 16][..]);
        Ok(())
    }

    #[test]
    fn compose_interlaced_frame() -> Result<()> {
        let desc = ImageDesc::default()
            .with_width(1)
            .with_height(4)
            .with_flags(0b0100_0000);
        let table = ColorTable::with_colors(&[
            0x10, 0, 0, 0x20, 0, 0, 0x30, 0, 0, 0x40, 0, 0,
        ]);
        let frame =
            Frame::new(None, desc, Some(table), 2, vec![0x44, 0x34, 0x05]);
        let mut doc = doc_with_frame(frame);
        let image = doc.to_image(0)?;
        // decoded [0, 1, 2, 3] deinterlaces to [0, 2, 1, 3]; index 0 is
        // transparent by default
        assert_eq!(
            image.raster().as_u8_slice(),
            &[
                0x10, 0, 0, 0x00, //
                0x30, 0, 0, 0xFF, //
                0x20, 0, 0, 0xFF, //
                0x40, 0, 0, 0xFF, //
            ][..],
        );
        Ok(())
    }
}
