// SPDX-License-Identifier: Apache-2.0

use std::result;

/// The error type for [`AsyncQueue`] operations.
///
/// [`AsyncQueue`]: crate::AsyncQueue
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum QueueError {
	/// The deadline passed while waiting for the queue.
	#[error("deadline passed while waiting on the queue")]
	TimedOut,
	/// Storage for the message copy could not be allocated.
	#[error("failed to allocate message storage")]
	OutOfMemory,
}

pub type QueueResult<T = ()> = result::Result<T, QueueError>;
