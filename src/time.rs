// SPDX-License-Identifier: Apache-2.0

use std::time::{Duration, Instant};

/// An absolute point in time at which a blocking queue operation gives up.
///
/// [`Never`] waits indefinitely, [`At`] waits until the given instant, and
/// [`Expired`] is the already-elapsed sentinel that turns any blocking
/// operation into a try operation: it fails with `TimedOut` the moment the
/// operation would have to wait.
///
/// Deadlines are monotonic, so they are unaffected by wall-clock
/// adjustments while a thread waits.
///
/// [`Never`]: Deadline::Never
/// [`At`]: Deadline::At
/// [`Expired`]: Deadline::Expired
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Deadline {
	/// Wait indefinitely.
	Never,
	/// Give up immediately if the operation would block.
	Expired,
	/// Wait until the given instant.
	At(Instant),
}

impl Deadline {
	/// Returns the deadline `timeout` from now.
	pub fn after(timeout: Duration) -> Self {
		Self::At(Instant::now() + timeout)
	}

	/// Returns the deadline `ms` milliseconds from now.
	pub fn after_millis(ms: u64) -> Self {
		Self::after(Duration::from_millis(ms))
	}

	/// Returns the deadline `us` microseconds from now.
	pub fn after_micros(us: u64) -> Self {
		Self::after(Duration::from_micros(us))
	}
}

impl From<Instant> for Deadline {
	fn from(at: Instant) -> Self {
		Self::At(at)
	}
}

impl From<Duration> for Deadline {
	fn from(timeout: Duration) -> Self {
		Self::after(timeout)
	}
}
