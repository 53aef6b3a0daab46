// SPDX-License-Identifier: Apache-2.0

use parking_lot::{Condvar, Mutex, MutexGuard};
use crate::{Deadline, QueueError, QueueResult};
use crate::ring::Ring;

/// The maximum number of pending messages an [`AsyncQueue`] holds.
pub const QUEUE_CAPACITY: usize = 128;

type Messages = Ring<Box<[u8]>>;

/// A bounded, blocking, multi-producer/multi-consumer queue of byte
/// messages.
///
/// Pushes block while the queue holds [`QUEUE_CAPACITY`] messages and pops
/// block while it holds none; both give up at an absolute [`Deadline`].
/// Messages are copied in on push and handed out as `Box<[u8]>` on pop, so
/// the caller owns the payload outright and releases it by dropping it.
///
/// One mutex guards the pending list. Waiters sit on two condition
/// variables, one per direction, woken in a broadcast when the queue
/// crosses the empty or full boundary. Waking only on those transitions is
/// enough: an operation that arrives while its condition already holds
/// checks it under the mutex and proceeds without waiting. Wake-ups are
/// never trusted; every wait re-checks its predicate in a loop.
///
/// Pops observe pushes in FIFO order: each producer's own messages come
/// out in push order, with arbitrary interleaving between producers. There
/// is no fairness guarantee among blocked waiters.
pub struct AsyncQueue {
	messages: Mutex<Messages>,
	/// Signaled on the empty to non-empty transition.
	msg_available: Condvar,
	/// Signaled on the full to non-full transition.
	space_available: Condvar,
}

impl AsyncQueue {
	/// Creates an empty queue, immediately usable from any number of
	/// threads. Dropping the queue releases every pending payload.
	pub fn new() -> Self {
		Self {
			messages: Mutex::new(Ring::new()),
			msg_available: Condvar::new(),
			space_available: Condvar::new(),
		}
	}

	/// Returns `true` if no messages are pending, observed under the
	/// queue lock.
	pub fn is_empty(&self) -> bool {
		self.messages.lock().is_empty()
	}

	/// Appends a copy of `msg` at the tail, waiting until the queue has
	/// room or `deadline` passes.
	///
	/// An expired deadline fails with [`TimedOut`] only when the queue is
	/// full. [`OutOfMemory`] reports a failed message allocation; the
	/// queue is unchanged and `msg` stays with the caller.
	///
	/// [`TimedOut`]: QueueError::TimedOut
	/// [`OutOfMemory`]: QueueError::OutOfMemory
	pub fn push_timed(&self, msg: &[u8], deadline: Deadline) -> QueueResult {
		let mut messages = self.messages.lock();

		while messages.len() >= QUEUE_CAPACITY {
			self.wait(&self.space_available, &mut messages, deadline)?;
		}

		let copy = copy_message(msg)?;

		messages.push_back(copy);
		if messages.len() == 1 {
			// A pop waiter can only exist while the queue is empty, so
			// only the empty to non-empty push needs to wake them.
			self.msg_available.notify_all();
		}

		Ok(())
	}

	/// Appends a copy of `msg`, blocking while the queue is full.
	pub fn push(&self, msg: &[u8]) -> QueueResult {
		self.push_timed(msg, Deadline::Never)
	}

	/// Appends a copy of `msg` only if the queue has room right now.
	pub fn try_push(&self, msg: &[u8]) -> QueueResult {
		self.push_timed(msg, Deadline::Expired)
	}

	/// Removes the oldest message, waiting until one arrives or `deadline`
	/// passes. The returned payload belongs to the caller.
	pub fn pop_timed(&self, deadline: Deadline) -> QueueResult<Box<[u8]>> {
		let mut messages = self.messages.lock();

		while messages.is_empty() {
			self.wait(&self.msg_available, &mut messages, deadline)?;
		}

		let msg = messages
			.pop_front()
			.expect("the lock is held and the queue is non-empty");

		if messages.len() == QUEUE_CAPACITY - 1 {
			self.space_available.notify_all();
		}

		Ok(msg)
	}

	/// Removes the oldest message, blocking while the queue is empty.
	pub fn pop(&self) -> QueueResult<Box<[u8]>> {
		self.pop_timed(Deadline::Never)
	}

	/// Removes the oldest message only if one is pending right now.
	pub fn try_pop(&self) -> QueueResult<Box<[u8]>> {
		self.pop_timed(Deadline::Expired)
	}

	/// One bounded wait step. A wait that reports timeout is
	/// authoritative: the caller returns [`TimedOut`] without re-checking
	/// its predicate.
	///
	/// [`TimedOut`]: QueueError::TimedOut
	fn wait(
		&self,
		cond: &Condvar,
		messages: &mut MutexGuard<'_, Messages>,
		deadline: Deadline,
	) -> QueueResult {
		match deadline {
			Deadline::Never => {
				cond.wait(messages);
				Ok(())
			}
			Deadline::Expired => Err(QueueError::TimedOut),
			Deadline::At(instant) => {
				if cond.wait_until(messages, instant).timed_out() {
					Err(QueueError::TimedOut)
				} else {
					Ok(())
				}
			}
		}
	}
}

impl Default for AsyncQueue {
	fn default() -> Self {
		Self::new()
	}
}

/// Copies `msg` into a standalone heap allocation, failing cleanly when
/// the allocator does.
fn copy_message(msg: &[u8]) -> QueueResult<Box<[u8]>> {
	let mut copy = Vec::new();
	if copy.try_reserve_exact(msg.len()).is_err() {
		return Err(QueueError::OutOfMemory);
	}
	copy.extend_from_slice(msg);
	Ok(copy.into_boxed_slice())
}
