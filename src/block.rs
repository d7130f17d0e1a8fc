// block.rs
//
// Copyright (c) 2026  gifdoc authors
//
//! Block-level data model for the GIF container format
//!
//! Packed descriptor bytes are decoded with explicit shift / mask
//! operations against named bit constants.

/// Color channels in a color table entry
pub(crate) const CHANNELS: usize = 3;

/// Method for treating a frame before drawing the next one
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DisposalMethod {
    /// No disposal specified
    NoAction,
    /// Keep the frame in place
    Keep,
    /// Restore to the background color
    Background,
    /// Restore to the previous frame
    Previous,
    /// Reserved methods
    Reserved(u8),
}

impl Default for DisposalMethod {
    fn default() -> Self {
        DisposalMethod::NoAction
    }
}

impl From<u8> for DisposalMethod {
    fn from(n: u8) -> Self {
        use self::DisposalMethod::*;
        match n & 0b0111 {
            0 => NoAction,
            1 => Keep,
            2 => Background,
            3 => Previous,
            _ => Reserved(n),
        }
    }
}

/// A color table: RGB triples for a global or local palette
///
/// Table length is always a power of two between 2 and 256, determined by
/// the 3-bit size field of the owning descriptor: `2 ^ (size + 1)`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ColorTable {
    colors: Vec<u8>,
}

impl ColorTable {
    /// Create a color table from raw RGB triples
    pub fn with_colors(colors: &[u8]) -> Self {
        assert_eq!(colors.len() / CHANNELS * CHANNELS, colors.len());
        let colors = colors.to_vec();
        ColorTable { colors }
    }

    /// Get the number of entries
    pub fn len(&self) -> usize {
        self.colors.len() / CHANNELS
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Get the raw color data
    pub fn colors(&self) -> &[u8] {
        &self.colors
    }

    /// Get one entry as an RGB triple
    pub fn rgb(&self, idx: u8) -> Option<[u8; 3]> {
        let i = usize::from(idx) * CHANNELS;
        if i + CHANNELS <= self.colors.len() {
            Some([self.colors[i], self.colors[i + 1], self.colors[i + 2]])
        } else {
            None
        }
    }
}

/// The logical screen descriptor, directly following the header
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LogicalScreenDesc {
    screen_width: u16,
    screen_height: u16,
    flags: u8,
    background_color_idx: u8, // index into global color table
    pixel_aspect_ratio: u8,
}

impl LogicalScreenDesc {
    const COLOR_TABLE_PRESENT: u8 = 0b1000_0000;
    const COLOR_RESOLUTION: u8 = 0b0111_0000;
    const COLOR_TABLE_ORDERING: u8 = 0b0000_1000;
    const COLOR_TABLE_SIZE: u8 = 0b0000_0111;

    /// Set the screen width
    pub fn with_screen_width(mut self, screen_width: u16) -> Self {
        self.screen_width = screen_width;
        self
    }

    /// Get the screen width
    pub fn screen_width(&self) -> u16 {
        self.screen_width
    }

    /// Set the screen height
    pub fn with_screen_height(mut self, screen_height: u16) -> Self {
        self.screen_height = screen_height;
        self
    }

    /// Get the screen height
    pub fn screen_height(&self) -> u16 {
        self.screen_height
    }

    /// Set the packed flags
    pub fn with_flags(mut self, flags: u8) -> Self {
        self.flags = flags;
        self
    }

    /// Get the packed flags
    pub fn flags(&self) -> u8 {
        self.flags
    }

    /// Check if a global color table is present
    pub fn color_table_present(&self) -> bool {
        self.flags & Self::COLOR_TABLE_PRESENT != 0
    }

    /// Get the color resolution field (0-7)
    pub fn color_resolution(&self) -> u8 {
        (self.flags & Self::COLOR_RESOLUTION) >> 4
    }

    /// Check if the global color table is sorted
    pub fn color_table_sorted(&self) -> bool {
        self.flags & Self::COLOR_TABLE_ORDERING != 0
    }

    /// Get the global color table size field (0-7)
    pub fn color_table_size(&self) -> u8 {
        self.flags & Self::COLOR_TABLE_SIZE
    }

    /// Get the number of global color table entries: `2 ^ (size + 1)`
    pub fn color_table_len(&self) -> usize {
        2 << self.color_table_size() as usize
    }

    /// Set the background color index
    pub fn with_background_color_idx(mut self, idx: u8) -> Self {
        self.background_color_idx = idx;
        self
    }

    /// Get the background color index
    pub fn background_color_idx(&self) -> u8 {
        self.background_color_idx
    }

    /// Set the pixel aspect ratio
    pub fn with_pixel_aspect_ratio(mut self, ratio: u8) -> Self {
        self.pixel_aspect_ratio = ratio;
        self
    }

    /// Get the pixel aspect ratio
    pub fn pixel_aspect_ratio(&self) -> u8 {
        self.pixel_aspect_ratio
    }
}

/// Animation metadata from a graphic control extension
///
/// Attaches to the image descriptor that follows it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GraphicControl {
    flags: u8,
    delay_time_cs: u16, // delay in centiseconds (hundredths of a second)
    transparent_color_idx: u8,
}

impl GraphicControl {
    #[allow(dead_code)]
    const RESERVED: u8 = 0b1110_0000;
    const DISPOSAL_METHOD: u8 = 0b0001_1100;
    const USER_INPUT: u8 = 0b0000_0010;
    const TRANSPARENT_COLOR: u8 = 0b0000_0001;

    /// Set the packed flags
    pub fn set_flags(&mut self, flags: u8) {
        self.flags = flags;
    }

    /// Get the packed flags
    pub fn flags(&self) -> u8 {
        self.flags
    }

    /// Get the frame disposal method
    pub fn disposal_method(&self) -> DisposalMethod {
        ((self.flags & Self::DISPOSAL_METHOD) >> 2).into()
    }

    /// Get the user input flag
    pub fn user_input(&self) -> bool {
        self.flags & Self::USER_INPUT != 0
    }

    /// Get the transparent color, if the transparency flag is set
    pub fn transparent_color(&self) -> Option<u8> {
        if self.flags & Self::TRANSPARENT_COLOR != 0 {
            Some(self.transparent_color_idx)
        } else {
            None
        }
    }

    /// Get the transparent color index, regardless of the flag
    pub fn transparent_color_idx(&self) -> u8 {
        self.transparent_color_idx
    }

    /// Set the transparent color index
    pub fn set_transparent_color_idx(&mut self, idx: u8) {
        self.transparent_color_idx = idx;
    }

    /// Get the delay time in centiseconds
    pub fn delay_time_cs(&self) -> u16 {
        self.delay_time_cs
    }

    /// Set the delay time in centiseconds
    pub fn set_delay_time_cs(&mut self, delay_time_cs: u16) {
        self.delay_time_cs = delay_time_cs;
    }

    /// Get the delay time in milliseconds
    pub fn delay_time_ms(&self) -> u32 {
        u32::from(self.delay_time_cs) * 10
    }
}

/// An image descriptor: placement, dimensions and packed flags of one frame
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ImageDesc {
    left: u16,
    top: u16,
    width: u16,
    height: u16,
    flags: u8,
}

impl ImageDesc {
    const COLOR_TABLE_PRESENT: u8 = 0b1000_0000;
    const INTERLACED: u8 = 0b0100_0000;
    const COLOR_TABLE_ORDERING: u8 = 0b0010_0000;
    #[allow(dead_code)]
    const RESERVED: u8 = 0b0001_1000;
    const COLOR_TABLE_SIZE: u8 = 0b0000_0111;

    /// Set the left position
    pub fn with_left(mut self, left: u16) -> Self {
        self.left = left;
        self
    }

    /// Get the left position
    pub fn left(&self) -> u16 {
        self.left
    }

    /// Set the top position
    pub fn with_top(mut self, top: u16) -> Self {
        self.top = top;
        self
    }

    /// Get the top position
    pub fn top(&self) -> u16 {
        self.top
    }

    /// Set the width
    pub fn with_width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    /// Get the width
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Set the height
    pub fn with_height(mut self, height: u16) -> Self {
        self.height = height;
        self
    }

    /// Get the height
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Set the packed flags
    pub fn with_flags(mut self, flags: u8) -> Self {
        self.flags = flags;
        self
    }

    /// Get the packed flags
    pub fn flags(&self) -> u8 {
        self.flags
    }

    /// Check if a local color table is present
    pub fn color_table_present(&self) -> bool {
        self.flags & Self::COLOR_TABLE_PRESENT != 0
    }

    /// Check if the frame is interlaced
    pub fn interlaced(&self) -> bool {
        self.flags & Self::INTERLACED != 0
    }

    /// Check if the local color table is sorted
    pub fn color_table_sorted(&self) -> bool {
        self.flags & Self::COLOR_TABLE_ORDERING != 0
    }

    /// Get the local color table size field (0-7)
    pub fn color_table_size(&self) -> u8 {
        self.flags & Self::COLOR_TABLE_SIZE
    }

    /// Get the number of local color table entries: `2 ^ (size + 1)`
    pub fn color_table_len(&self) -> usize {
        2 << self.color_table_size() as usize
    }

    /// Get the image size, in pixels
    pub fn image_sz(&self) -> usize {
        self.width as usize * self.height as usize
    }
}
