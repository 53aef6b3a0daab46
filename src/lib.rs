// SPDX-License-Identifier: Apache-2.0

//! ## How it works
//!
//! Byte data on its way from producers to consumers sits in one of two
//! structures. An [`AppendBuffer`] is a FIFO byte buffer scattered over
//! fixed-capacity chunks of heap memory called *pieces*. Appends fill the
//! last piece before new pieces are allocated, reads address any live byte
//! by its logical offset, and consuming bytes from the head frees whole
//! pieces as they become unreachable. A piece can also be detached, filled
//! directly by the caller (say, by a `read()` into its spare bytes) and
//! attached back, so staging incoming data costs no extra copy.
//!
//! An [`AsyncQueue`] hands whole messages between threads. It is a bounded
//! FIFO of byte blobs guarded by one mutex and two condition variables:
//! pushes block while the queue is full, pops block while it is empty, and
//! both give up at an absolute [`Deadline`]. Waiters are woken in a
//! broadcast when the queue crosses the empty or full boundary.
//!
//! The buffer is single-threaded and relies on the borrow checker to keep
//! cursors honest; the queue is safe to share freely between threads.

mod buffer;
mod error;
mod queue;
mod ring;
mod time;

pub use buffer::*;
pub use error::*;
pub use queue::*;
pub use time::*;
