// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::fmt::{Debug, Formatter};
use std::mem::size_of;

/// Total memory one piece accounts for: the piece allocation itself plus
/// its slot in the owning buffer's ring.
pub const PIECE_SIZE: usize = 256;

/// The narrowest unsigned integer that can hold [`PIECE_DATA_CAP`].
pub(crate) type PieceLen = u8;

/// Bytes of payload a single [`Piece`] can hold: [`PIECE_SIZE`] minus the
/// ring slot and the length field.
pub const PIECE_DATA_CAP: usize = PIECE_SIZE - size_of::<usize>() - size_of::<PieceLen>();

// A larger PIECE_DATA_CAP must widen PieceLen to match.
const _: () = assert!(PIECE_DATA_CAP <= PieceLen::MAX as usize);
const _: () = assert!(size_of::<Piece>() + size_of::<usize>() <= PIECE_SIZE);

/// A fixed-capacity storage fragment of an [`AppendBuffer`].
///
/// Pieces are heap-allocated individually and owned by exactly one buffer
/// at a time. A detached piece from [`Piece::boxed`] belongs to the caller
/// until it is attached with [`AppendBuffer::append_piece`]; dropping it
/// releases the allocation.
///
/// [`AppendBuffer`]: super::AppendBuffer
/// [`AppendBuffer::append_piece`]: super::AppendBuffer::append_piece
#[derive(Clone)]
pub struct Piece {
	len: PieceLen,
	data: [u8; PIECE_DATA_CAP],
}

impl Piece {
	/// Allocates a new, empty detached piece.
	pub fn boxed() -> Box<Piece> {
		Box::new(Piece {
			len: 0,
			data: [0; PIECE_DATA_CAP],
		})
	}

	/// Returns the number of bytes in use.
	pub fn len(&self) -> usize { self.len as usize }

	/// Returns `true` if no bytes are in use.
	pub fn is_empty(&self) -> bool { self.len == 0 }

	/// Returns `true` if the piece has no spare capacity.
	pub fn is_full(&self) -> bool { self.len() == PIECE_DATA_CAP }

	/// Returns the payload capacity, [`PIECE_DATA_CAP`].
	pub const fn capacity(&self) -> usize { PIECE_DATA_CAP }

	/// Returns the bytes in use.
	pub fn data(&self) -> &[u8] {
		&self.data[..self.len as usize]
	}

	/// Returns the unused tail of the payload.
	pub fn spare(&mut self) -> &mut [u8] {
		let len = self.len as usize;
		&mut self.data[len..]
	}

	/// Marks `n` spare bytes as in use, returning `false` if `n` exceeds
	/// the spare capacity.
	pub fn grow(&mut self, n: usize) -> bool {
		if n > PIECE_DATA_CAP - self.len as usize {
			return false;
		}
		self.len += n as PieceLen;
		true
	}

	/// Marks every byte as unused.
	pub fn clear(&mut self) {
		self.len = 0;
	}

	/// Copies as much of `data` as fits into the spare tail, returning the
	/// number of bytes copied.
	pub(crate) fn fill(&mut self, data: &[u8]) -> usize {
		let spare = self.spare();
		let n = spare.len().min(data.len());
		spare[..n].copy_from_slice(&data[..n]);
		self.len += n as PieceLen;
		n
	}
}

impl Debug for Piece {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("Piece")
			.field("len", &self.len)
			.finish_non_exhaustive()
	}
}
