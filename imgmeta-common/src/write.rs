//! Sequential writer with forward references
//!
//! Binary formats like TIFF store offsets to data that is only written later.
//! [`ByteWriter::forward`] reserves the space for such a value under a key,
//! [`ByteWriter::resolve`] fills it in once the value is known, without moving
//! the write position.
//!
//! ```
//! # use imgmeta_common::write::*;
//! let mut buffer = [0; 8];
//! let mut writer = ByteWriter::new(&mut buffer);
//!
//! writer.forward("len", 2).unwrap();
//! writer.write_string("abc").unwrap();
//! writer.resolve("len", 3).unwrap();
//! writer.check_resolved().unwrap();
//!
//! assert_eq!(writer.written(), &[0, 3, b'a', b'b', b'c']);
//! ```

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::ops::Range;

use crate::math::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ByteOrder {
    LittleEndian,
    #[default]
    BigEndian,
}

impl ByteOrder {
    pub fn from_little_endian(little_endian: bool) -> Self {
        if little_endian {
            Self::LittleEndian
        } else {
            Self::BigEndian
        }
    }

    /// Byte order mark used in TIFF headers
    pub fn tiff_mark(self) -> &'static [u8; 2] {
        match self {
            Self::LittleEndian => b"II",
            Self::BigEndian => b"MM",
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Forward {
    pos: usize,
    width: usize,
}

impl Forward {
    fn range(&self) -> Result<Range<usize>, WriteError> {
        Ok(self.pos..self.pos.safe_add(self.width)?)
    }
}

#[derive(Debug)]
pub struct ByteWriter<'a, K: Ord + Debug> {
    buffer: &'a mut [u8],
    byte_order: ByteOrder,
    pos: usize,
    forwards: BTreeMap<K, Forward>,
}

impl<'a, K: Ord + Debug> ByteWriter<'a, K> {
    /// Writer over the complete buffer, starting in big endian
    pub fn new(buffer: &'a mut [u8]) -> Self {
        Self {
            buffer,
            byte_order: ByteOrder::default(),
            pos: 0,
            forwards: BTreeMap::new(),
        }
    }

    /// Writer over `len` bytes of `buffer`, starting at `start`
    ///
    /// Without `len`, the writer can use the remaining buffer. All positions
    /// reported by the writer are relative to `start`.
    pub fn with_range(
        buffer: &'a mut [u8],
        start: usize,
        len: Option<usize>,
    ) -> Result<Self, WriteError> {
        let buffer_len = buffer.len();
        let end = match len {
            Some(len) => start.safe_add(len)?,
            None => buffer_len,
        };

        let buffer = buffer
            .get_mut(start..end)
            .ok_or(WriteError::RangeOutsideBuffer {
                start,
                end,
                len: buffer_len,
            })?;

        Ok(Self::new(buffer))
    }

    pub fn set_byte_order(&mut self, byte_order: ByteOrder) {
        self.byte_order = byte_order;
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Current write position
    pub fn tell(&self) -> usize {
        self.pos
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// All bytes up to the current position
    pub fn written(&self) -> &[u8] {
        &self.buffer[..self.pos]
    }

    /// Advance by `count` bytes
    ///
    /// The skipped bytes are zeroed.
    pub fn skip(&mut self, count: usize) -> Result<(), WriteError> {
        let range = self.advance(count)?;
        self.buffer[range].fill(0);
        Ok(())
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), WriteError> {
        let range = self.advance(bytes.len())?;
        self.buffer[range].copy_from_slice(bytes);
        Ok(())
    }

    /// Writes one byte per character
    pub fn write_string(&mut self, s: &str) -> Result<(), WriteError> {
        if !s.is_ascii() {
            return Err(WriteError::NonAsciiString);
        }

        self.write_bytes(s.as_bytes())
    }

    /// Writes an unsigned integer with `width` bytes in the current byte order
    pub fn write_scalar(&mut self, value: u64, width: usize) -> Result<(), WriteError> {
        check_unsigned(value, width)?;
        let range = self.advance(width)?;
        self.put(range, value);
        Ok(())
    }

    /// Writes a signed integer with `width` bytes in the current byte order
    pub fn write_signed(&mut self, value: i64, width: usize) -> Result<(), WriteError> {
        check_signed(value, width)?;
        let range = self.advance(width)?;
        self.put(range, u64::from_ne_bytes(value.to_ne_bytes()));
        Ok(())
    }

    pub fn write_u8(&mut self, value: u8) -> Result<(), WriteError> {
        self.write_scalar(value.into(), 1)
    }

    pub fn write_u16(&mut self, value: u16) -> Result<(), WriteError> {
        self.write_scalar(value.into(), 2)
    }

    pub fn write_u32(&mut self, value: u32) -> Result<(), WriteError> {
        self.write_scalar(value.into(), 4)
    }

    pub fn write_i32(&mut self, value: i32) -> Result<(), WriteError> {
        self.write_signed(value.into(), 4)
    }

    /// Reserves `width` bytes that are filled in by [`Self::resolve`]
    pub fn forward(&mut self, key: K, width: usize) -> Result<(), WriteError> {
        check_width(width)?;

        if self.forwards.contains_key(&key) {
            return Err(WriteError::DuplicateForward(format!("{key:?}")));
        }

        let range = self.advance(width)?;
        let pos = range.start;
        self.buffer[range].fill(0);
        self.forwards.insert(key, Forward { pos, width });

        Ok(())
    }

    /// Writes `value` into the space reserved for `key`
    ///
    /// The write position is not changed.
    pub fn resolve(&mut self, key: K, value: u64) -> Result<(), WriteError> {
        let Some(forward) = self.forwards.get(&key).copied() else {
            return Err(WriteError::UnknownForward(format!("{key:?}")));
        };

        check_unsigned(value, forward.width)?;
        let range = forward.range()?;
        self.put(range, value);
        self.forwards.remove(&key);

        Ok(())
    }

    /// Resolves `key` to the current write position
    pub fn resolve_offset(&mut self, key: K) -> Result<(), WriteError> {
        let pos = self.pos.u64()?;
        self.resolve(key, pos)
    }

    pub fn is_pending(&self, key: &K) -> bool {
        self.forwards.contains_key(key)
    }

    /// Fails if any forward reference has not been resolved
    pub fn check_resolved(&self) -> Result<(), WriteError> {
        if self.forwards.is_empty() {
            Ok(())
        } else {
            let keys = self
                .forwards
                .keys()
                .map(|key| format!("{key:?}"))
                .collect::<Vec<_>>();
            Err(WriteError::Unresolved(keys.join(", ")))
        }
    }

    fn advance(&mut self, count: usize) -> Result<Range<usize>, WriteError> {
        let end = self.pos.safe_add(count)?;

        if end > self.buffer.len() {
            return Err(WriteError::CapacityExceeded {
                pos: self.pos,
                requested: count,
                capacity: self.buffer.len(),
            });
        }

        let range = self.pos..end;
        self.pos = end;
        Ok(range)
    }

    /// Stores the lowest `range.len()` bytes of `bits`
    fn put(&mut self, range: Range<usize>, bits: u64) {
        let slot = &mut self.buffer[range];
        let width = slot.len();

        match self.byte_order {
            ByteOrder::LittleEndian => slot.copy_from_slice(&bits.to_le_bytes()[..width]),
            ByteOrder::BigEndian => {
                let bytes = bits.to_be_bytes();
                let (_, low) = bytes.split_at(bytes.len().saturating_sub(width));
                slot.copy_from_slice(low);
            }
        }
    }
}

fn check_width(width: usize) -> Result<(), WriteError> {
    match width {
        1 | 2 | 4 | 8 => Ok(()),
        width => Err(WriteError::UnsupportedWidth(width)),
    }
}

fn check_unsigned(value: u64, width: usize) -> Result<(), WriteError> {
    let max = match width {
        1 => u8::MAX.into(),
        2 => u16::MAX.into(),
        4 => u32::MAX.into(),
        8 => u64::MAX,
        width => return Err(WriteError::UnsupportedWidth(width)),
    };

    if value > max {
        return Err(WriteError::ValueOutOfRange {
            value: value.into(),
            width,
        });
    }

    Ok(())
}

fn check_signed(value: i64, width: usize) -> Result<(), WriteError> {
    let (min, max) = match width {
        1 => (i8::MIN.into(), i8::MAX.into()),
        2 => (i16::MIN.into(), i16::MAX.into()),
        4 => (i32::MIN.into(), i32::MAX.into()),
        8 => (i64::MIN, i64::MAX),
        width => return Err(WriteError::UnsupportedWidth(width)),
    };

    if !(min..=max).contains(&value) {
        return Err(WriteError::ValueOutOfRange {
            value: value.into(),
            width,
        });
    }

    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("Writing {requested} bytes at position {pos} exceeds capacity of {capacity} bytes")]
    CapacityExceeded {
        pos: usize,
        requested: usize,
        capacity: usize,
    },
    #[error("Range {start}..{end} lies outside of buffer with {len} bytes")]
    RangeOutsideBuffer { start: usize, end: usize, len: usize },
    #[error("Forward reference {0} is already reserved")]
    DuplicateForward(String),
    #[error("Forward reference {0} was never reserved")]
    UnknownForward(String),
    #[error("Unresolved forward references: {0}")]
    Unresolved(String),
    #[error("Unsupported scalar width: {0}")]
    UnsupportedWidth(usize),
    #[error("Value {value} does not fit into {width} bytes")]
    ValueOutOfRange { value: i128, width: usize },
    #[error("String contains non-ASCII characters")]
    NonAsciiString,
    #[error("Math: {0}")]
    Math(#[from] MathError),
}
