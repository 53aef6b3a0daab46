// SPDX-License-Identifier: Apache-2.0

use super::{AppendBuffer, Piece};

/// A zero-copy write reservation from [`AppendBuffer::write_buffer`].
///
/// The reservation is either the unused tail of the buffer's last piece,
/// or a freshly allocated piece when the buffer has no spare tail. The
/// caller writes into [`as_mut_slice`] and commits the number of bytes
/// actually written; dropping the reservation without committing leaves
/// the buffer unchanged and releases a fresh piece.
///
/// The reservation holds the buffer mutably, so the region cannot move or
/// be invalidated while the caller fills it.
///
/// [`as_mut_slice`]: WriteBuf::as_mut_slice
pub struct WriteBuf<'b> {
	buf: &'b mut AppendBuffer,
	/// `Some` when the reservation is a fresh detached piece, `None` when
	/// it is the last piece's spare tail.
	fresh: Option<Box<Piece>>,
}

impl<'b> WriteBuf<'b> {
	pub(super) fn new(buf: &'b mut AppendBuffer) -> Self {
		let fresh = match buf.pieces.back() {
			Some(last) if !last.is_full() => None,
			_ => Some(Piece::boxed()),
		};

		Self { buf, fresh }
	}

	/// Returns the writable region of the reservation.
	pub fn as_mut_slice(&mut self) -> &mut [u8] {
		match &mut self.fresh {
			Some(piece) => piece.spare(),
			None => self.buf.pieces
				.back_mut()
				.expect("a tail reservation implies a last piece")
				.spare(),
		}
	}

	/// Commits `used` bytes of the reservation into the buffer, making
	/// them live. Fails when `used` exceeds the reserved length; a failed
	/// commit leaves the buffer unchanged.
	pub fn commit(self, used: usize) -> bool {
		match self.fresh {
			Some(mut piece) => {
				piece.grow(used) && self.buf.append_piece(piece).is_ok()
			}
			None => self.buf.grow(used),
		}
	}
}
