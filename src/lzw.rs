// lzw.rs
//
// Copyright (c) 2026  gifdoc authors
//
//! Lempel-Ziv-Welch decompression for GIF
//!
//! The GIF variant of LZW: codes are packed least-significant-bit first
//! into a byte stream, starting at `min_code_size + 1` bits per code and
//! growing up to 12 bits as the dictionary fills.  Decompression is
//! deliberately permissive: an end-of-information code, an out-of-range
//! code or an exhausted byte stream all end decoding normally, and any
//! shortfall is padded with index 0.

/// Maximum number of dictionary codes (12-bit limit)
const MAX_CODES: usize = 4096;

/// LZW decompressor for one frame of image data
#[derive(Debug)]
pub(crate) struct Decompressor {
    /// Prefix code of each dictionary entry
    prefix: Vec<u16>,
    /// Suffix byte of each dictionary entry
    suffix: Vec<u8>,
    /// Stack of pixels from walking a prefix chain
    stack: Vec<u8>,
    /// Minimum code size
    min_code_size: u8,
    /// Clear code: `2 ^ min_code_size`
    clear: u16,
    /// Next available dictionary code
    available: u16,
    /// Current code width, in bits
    code_size: u8,
    /// Previously decoded code
    prev: Option<u16>,
    /// First pixel of the previously decoded chain
    first: u8,
}

impl Decompressor {
    /// Create a new decompressor
    pub fn new(min_code_size: u8) -> Self {
        let clear = 1u16 << min_code_size;
        let mut suffix = vec![0u8; MAX_CODES];
        for code in 0..clear {
            suffix[code as usize] = code as u8;
        }
        Decompressor {
            prefix: vec![0; MAX_CODES],
            suffix,
            stack: Vec::with_capacity(MAX_CODES + 1),
            min_code_size,
            clear,
            available: clear + 2,
            code_size: min_code_size + 1,
            prev: None,
            first: 0,
        }
    }

    /// Get the end-of-information code
    fn eoi(&self) -> u16 {
        self.clear + 1
    }

    /// Get the bit mask for the current code width
    fn code_mask(&self) -> u32 {
        (1 << u32::from(self.code_size)) - 1
    }

    /// Reset the dictionary after a clear code
    fn reset(&mut self) {
        self.code_size = self.min_code_size + 1;
        self.available = self.clear + 2;
        self.prev = None;
    }

    /// Decompress image data into a sequence of `pixel_count` color indices
    ///
    /// An empty `data` buffer yields the degenerate sequence `[0]`;
    /// otherwise the result is exactly `pixel_count` long, zero-padded if
    /// the stream ends early.
    pub fn decompress(mut self, data: &[u8], pixel_count: usize) -> Vec<u8> {
        if data.is_empty() {
            return vec![0];
        }
        let mut pixels = Vec::with_capacity(pixel_count);
        let mut datum: u32 = 0;
        let mut bits: u8 = 0;
        let mut bytes = data.iter().copied();
        'codes: while pixels.len() < pixel_count {
            while bits < self.code_size {
                match bytes.next() {
                    Some(b) => {
                        datum |= u32::from(b) << bits;
                        bits += 8;
                    }
                    None => break 'codes,
                }
            }
            let code = (datum & self.code_mask()) as u16;
            datum >>= self.code_size;
            bits -= self.code_size;
            if code == self.clear {
                self.reset();
                continue;
            }
            // EOI or an out-of-range code ends the stream normally
            if code == self.eoi() || code > self.available {
                break;
            }
            self.push_chain(code);
            while let Some(px) = self.stack.pop() {
                pixels.push(px);
                if pixels.len() >= pixel_count {
                    break 'codes;
                }
            }
        }
        pixels.resize(pixel_count, 0);
        pixels
    }

    /// Push the pixel chain of one data code onto the stack (reversed),
    /// and grow the dictionary by one entry.
    fn push_chain(&mut self, code: u16) {
        let prev = match self.prev {
            Some(prev) => prev,
            None => {
                self.first = self.suffix[code as usize];
                self.stack.push(self.first);
                self.prev = Some(code);
                return;
            }
        };
        let mut c = code;
        if c == self.available {
            // not yet in the dictionary: chain is previous + its first pixel
            self.stack.push(self.first);
            c = prev;
        }
        while c > self.clear {
            self.stack.push(self.suffix[c as usize]);
            c = self.prefix[c as usize];
        }
        self.first = self.suffix[c as usize];
        self.stack.push(self.first);
        if usize::from(self.available) < MAX_CODES {
            self.prefix[usize::from(self.available)] = prev;
            self.suffix[usize::from(self.available)] = self.first;
            self.available += 1;
            // grow code width at each power-of-two boundary, capped at 12
            if u32::from(self.available) & self.code_mask() == 0
                && usize::from(self.available) < MAX_CODES
            {
                self.code_size += 1;
            }
        }
        self.prev = Some(code);
    }
}
