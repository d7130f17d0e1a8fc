// error.rs
//
// Copyright (c) 2026  gifdoc authors
//
use std::fmt;

/// Errors encountered while parsing or decoding
///
/// Structural errors carry the byte offset of the offending byte, so a
/// malformed file can be diagnosed down to the exact position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// Signature does not begin with `GIF`.
    MalformedHeader,
    /// GIF version not supported (87a or 89a only).
    UnsupportedVersion([u8; 3]),
    /// Buffer ends in the middle of a block.
    UnexpectedEndOfFile {
        /// Offset of the first missing byte
        offset: usize,
    },
    /// Unrecognized block introducer.
    UnknownBlock {
        /// Offset of the introducer
        offset: usize,
        /// The introducer byte
        byte: u8,
    },
    /// Unrecognized extension label.
    UnknownExtension {
        /// Offset of the label
        offset: usize,
        /// The label byte
        byte: u8,
    },
    /// Zero terminator missing after a sub-block sequence.
    MissingBlockTerminator {
        /// Offset where the terminator should be
        offset: usize,
        /// The byte found instead
        byte: u8,
    },
    /// Application extension with a block length other than 11.
    MalformedApplicationExtension {
        /// Offset of the length byte
        offset: usize,
        /// The length found
        len: u8,
    },
    /// NETSCAPE2.0 sub-block identifier other than 1.
    MalformedLoopCount {
        /// Offset of the identifier byte
        offset: usize,
        /// The identifier found
        byte: u8,
    },
    /// LZW minimum code size outside of 2..=8.
    InvalidCodeSize {
        /// Offset of the code size byte
        offset: usize,
        /// The code size found
        code_size: u8,
    },
    /// Frame index beyond the document's frame count.
    FrameIndexOutOfBounds {
        /// Requested frame index
        index: usize,
        /// Number of frames in the document
        frames: usize,
    },
    /// Deinterlace requested for a frame without the interlace flag.
    NotInterlaced {
        /// Requested frame index
        index: usize,
    },
}

/// Gifdoc result type
pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        use self::Error::*;
        match self {
            MalformedHeader => write!(fmt, "malformed GIF header"),
            UnsupportedVersion(v) => write!(
                fmt,
                "unsupported GIF version: {}",
                String::from_utf8_lossy(v)
            ),
            UnexpectedEndOfFile { offset } => {
                write!(fmt, "unexpected end of file @ {:#010X}", offset)
            }
            UnknownBlock { offset, byte } => {
                write!(fmt, "unknown block: {:#04X} @ {:#010X}", byte, offset)
            }
            UnknownExtension { offset, byte } => write!(
                fmt,
                "unknown extension: {:#04X} @ {:#010X}",
                byte, offset
            ),
            MissingBlockTerminator { offset, byte } => write!(
                fmt,
                "missing null terminator: {:#04X} @ {:#010X}",
                byte, offset
            ),
            MalformedApplicationExtension { offset, len } => write!(
                fmt,
                "app extension of 11 byte length expected: {} @ {:#010X}",
                len, offset
            ),
            MalformedLoopCount { offset, byte } => write!(
                fmt,
                "invalid app extension sub-block: {:#04X} @ {:#010X}",
                byte, offset
            ),
            InvalidCodeSize { offset, code_size } => write!(
                fmt,
                "invalid LZW minimum code size: {} @ {:#010X}",
                code_size, offset
            ),
            FrameIndexOutOfBounds { index, frames } => write!(
                fmt,
                "frame index {} out of bounds ({} frames)",
                index, frames
            ),
            NotInterlaced { index } => {
                write!(fmt, "frame {} is not interlaced", index)
            }
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn display_offsets() {
        let e = Error::MissingBlockTerminator {
            offset: 0x1A,
            byte: 0x2C,
        };
        assert_eq!(
            e.to_string(),
            "missing null terminator: 0x2C @ 0x0000001A"
        );
        let e = Error::InvalidCodeSize {
            offset: 23,
            code_size: 9,
        };
        assert_eq!(
            e.to_string(),
            "invalid LZW minimum code size: 9 @ 0x00000017"
        );
    }
}
