//! Payload chunking into fixed-size blocks.
//!
//! [`FrameChunker`] produces a lazy, finite, restartable sequence of
//! [`FrameBlock`]s. Every block except the last has exactly `block_size`
//! bytes. When padding is enabled, an odd-length final block gets one
//! trailing zero byte.

use std::borrow::Cow;

/// One block of payload bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBlock<'a> {
    /// 0-indexed position of the block in the payload.
    pub index: usize,
    /// Byte offset of the block in the payload.
    pub offset: usize,
    /// Bytes handed to the codec, including any padding byte.
    pub data: Cow<'a, [u8]>,
    /// Number of payload bytes in the block, excluding padding.
    pub logical_len: usize,
}

impl FrameBlock<'_> {
    /// Whether a padding byte was appended.
    pub fn is_padded(&self) -> bool {
        self.data.len() != self.logical_len
    }

    /// Byte values as floats, padding included.
    pub fn to_floats(&self) -> Vec<f64> {
        self.data.iter().map(|&b| b as f64).collect()
    }
}

/// Splits a payload into [`FrameBlock`]s.
#[derive(Debug, Clone, Copy)]
pub struct FrameChunker {
    block_size: usize,
    pad_to_even: bool,
}

impl FrameChunker {
    /// Creates a chunker.
    ///
    /// # Panics
    /// Panics if `block_size` is zero.
    pub fn new(block_size: usize, pad_to_even: bool) -> Self {
        assert!(block_size > 0, "block size must be non-zero");
        Self {
            block_size,
            pad_to_even,
        }
    }

    /// Payload bytes per full block.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Number of blocks for a payload of `len` bytes.
    pub fn block_count(&self, len: usize) -> usize {
        len.div_ceil(self.block_size)
    }

    /// Iterates over the blocks of `payload`.
    pub fn blocks<'a>(&self, payload: &'a [u8]) -> FrameChunks<'a> {
        FrameChunks {
            payload,
            cursor: 0,
            index: 0,
            block_size: self.block_size,
            pad_to_even: self.pad_to_even,
        }
    }
}

/// Iterator over the blocks of one payload.
///
/// Call [`FrameChunker::blocks`] again to start over from the first block.
#[derive(Debug, Clone)]
pub struct FrameChunks<'a> {
    payload: &'a [u8],
    cursor: usize,
    index: usize,
    block_size: usize,
    pad_to_even: bool,
}

impl<'a> Iterator for FrameChunks<'a> {
    type Item = FrameBlock<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.payload.len() {
            return None;
        }

        let end = (self.cursor + self.block_size).min(self.payload.len());
        let slice = &self.payload[self.cursor..end];
        let data = if self.pad_to_even && slice.len() % 2 != 0 {
            let mut padded = Vec::with_capacity(slice.len() + 1);
            padded.extend_from_slice(slice);
            padded.push(0);
            Cow::Owned(padded)
        } else {
            Cow::Borrowed(slice)
        };

        let block = FrameBlock {
            index: self.index,
            offset: self.cursor,
            data,
            logical_len: slice.len(),
        };
        self.cursor = end;
        self.index += 1;
        Some(block)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.payload.len() - self.cursor).div_ceil(self.block_size);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for FrameChunks<'_> {}

impl std::iter::FusedIterator for FrameChunks<'_> {}
