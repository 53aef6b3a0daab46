// SPDX-License-Identifier: Apache-2.0

mod iter;
mod piece;
mod write;

pub use iter::ByteIter;
pub use piece::{Piece, PIECE_DATA_CAP, PIECE_SIZE};
pub use write::WriteBuf;

use std::fmt;
use std::fmt::{Debug, Formatter};
use std::mem;
use all_asserts::debug_assert_lt;
use crate::ring::Ring;

/// An appendable scatter/gather byte buffer.
///
/// Data lives in an ordered sequence of fixed-capacity heap [`Piece`]s.
/// Appends fill the last piece's spare capacity before allocating new
/// pieces, so the pieces form a dense FIFO byte sequence. Reads address
/// bytes by their logical offset; consuming bytes from the head frees
/// whole pieces as they become unreachable and keeps a `first_offset`
/// into the surviving head piece.
///
/// The buffer is not internally synchronized. Callers that share an
/// instance between threads must serialize access, and the byte cursor
/// returned by [`iter`] borrows the buffer for its whole lifetime, so a
/// structural mutation while a cursor is live does not compile.
///
/// [`iter`]: AppendBuffer::iter
#[derive(Default)]
pub struct AppendBuffer {
	pieces: Ring<Box<Piece>>,
	len: usize,
	first_offset: usize,
}

impl AppendBuffer {
	/// Creates a new, empty buffer.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the number of live bytes in the buffer.
	pub fn len(&self) -> usize { self.len }

	/// Returns `true` if the buffer holds no live bytes.
	pub fn is_empty(&self) -> bool { self.len == 0 }

	/// Frees every piece and resets the buffer to its initial state.
	pub fn clear(&mut self) {
		self.pieces.clear();
		self.len = 0;
		self.first_offset = 0;
	}

	/// Takes the buffer's contents, leaving it empty. O(1): the piece
	/// sequence changes hands without touching the pieces.
	pub fn take(&mut self) -> AppendBuffer {
		mem::take(self)
	}

	/// Appends `data` at the tail, filling the last piece's spare capacity
	/// before allocating new pieces. Returns the number of bytes appended;
	/// the appended bytes are always a durable prefix of `data`, so the
	/// returned count is authoritative.
	pub fn append(&mut self, data: &[u8]) -> usize {
		let mut remaining = data;
		if remaining.is_empty() {
			return 0;
		}

		if let Some(last) = self.pieces.back_mut() {
			let copied = last.fill(remaining);
			self.len += copied;
			remaining = &remaining[copied..];
		}

		while !remaining.is_empty() {
			let mut piece = Piece::boxed();
			let copied = piece.fill(remaining);
			self.pieces.push_back(piece);
			self.len += copied;
			remaining = &remaining[copied..];
		}

		data.len()
	}

	/// Copies bytes starting at logical `offset` into `out` without
	/// consuming them. Returns the number of bytes copied: short of
	/// `out.len()` when the read runs past the end, zero when `offset` is
	/// out of reach.
	pub fn copy_into(&self, offset: usize, out: &mut [u8]) -> usize {
		let mut it = self.iter();
		it.advance(offset);

		let mut copied = 0;
		while copied < out.len() {
			let Some(chunk) = it.remaining_in_piece() else { break };
			let n = chunk.len().min(out.len() - copied);
			out[copied..copied + n].copy_from_slice(&chunk[..n]);
			copied += n;
			it.advance(n);
		}

		copied
	}

	/// Advances the head past `n` bytes, freeing pieces that become fully
	/// consumed.
	///
	/// Consuming exactly [`len`] bytes empties the buffer and returns
	/// `true`. Consuming more than [`len`] *also* empties the buffer but
	/// returns `false`; the overflow is destructive by contract, and the
	/// return value is the only difference.
	///
	/// [`len`]: AppendBuffer::len
	pub fn consume(&mut self, n: usize) -> bool {
		if n >= self.len {
			let in_range = n == self.len;
			self.clear();
			return in_range;
		}

		// The head piece is shortened by the already-trimmed prefix.
		let mut remaining = n + self.first_offset;
		while let Some(first) = self.pieces.front() {
			if remaining < first.len() {
				break;
			}
			remaining -= first.len();
			self.pieces.pop_front();
		}

		debug_assert_lt!(
			remaining,
			self.pieces.front().map_or(usize::MAX, |first| first.len())
		);

		self.first_offset = remaining;
		self.len -= n;
		true
	}

	/// Returns the unused tail of the last piece, or `None` when the
	/// buffer is empty or the last piece is full. Bytes written here
	/// become live once claimed with [`grow`].
	///
	/// [`grow`]: AppendBuffer::grow
	pub fn end_free(&mut self) -> Option<&mut [u8]> {
		let spare = self.pieces.back_mut()?.spare();
		if spare.is_empty() {
			None
		} else {
			Some(spare)
		}
	}

	/// Marks `n` bytes of the last piece's unused tail as live. Fails when
	/// the buffer is empty or `n` exceeds the spare capacity.
	pub fn grow(&mut self, n: usize) -> bool {
		let Some(last) = self.pieces.back_mut() else { return false };
		if !last.grow(n) {
			return false;
		}
		self.len += n;
		true
	}

	/// Attaches a detached piece at the tail, taking ownership of it and
	/// its bytes in use.
	///
	/// The current last piece must have no spare capacity, otherwise the
	/// piece sequence would no longer be dense; on that failure the piece
	/// is handed back unchanged in `Err` and the buffer is untouched.
	pub fn append_piece(&mut self, piece: Box<Piece>) -> Result<(), Box<Piece>> {
		if let Some(last) = self.pieces.back() {
			if !last.is_full() {
				return Err(piece);
			}
		}

		self.len += piece.len();
		self.pieces.push_back(piece);
		Ok(())
	}

	/// Reserves a zero-copy write region at the tail: the last piece's
	/// spare capacity when there is any, a fresh detached piece otherwise.
	/// The caller fills the region and commits the bytes written; see
	/// [`WriteBuf`].
	pub fn write_buffer(&mut self) -> WriteBuf<'_> {
		WriteBuf::new(self)
	}

	/// Returns a byte cursor positioned at the first live byte.
	pub fn iter(&self) -> ByteIter<'_> {
		ByteIter::new(self)
	}
}

impl Clone for AppendBuffer {
	/// Deep-copies every piece, preserving the per-piece layout, the
	/// trimmed prefix and the live length.
	fn clone(&self) -> Self {
		let mut pieces = Ring::new();
		for piece in self.pieces.iter() {
			pieces.push_back(Box::new(piece.as_ref().clone()));
		}

		Self {
			pieces,
			len: self.len,
			first_offset: self.first_offset,
		}
	}
}

impl Debug for AppendBuffer {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("AppendBuffer")
			.field("len", &self.len)
			.field("pieces", &self.pieces.len())
			.field("first_offset", &self.first_offset)
			.finish()
	}
}
