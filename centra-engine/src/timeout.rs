//! Deadline wrapper for long-running computations.
//!
//! The work runs on its own thread and posts its result on a channel; the
//! caller blocks on the channel with a timeout instead of polling a shared
//! flag. Expiry abandons the worker: cancellation is cooperative only, the
//! thread runs to completion in the background and its late result is
//! dropped with the channel. Each invocation owns its channel and thread,
//! so a wrapper run is single-use and never returns to a running state.
//!
//! A zero deadline disables the wrapper entirely: the work runs inline on
//! the caller's thread and the result is identical to calling it directly.

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use log::warn;

/// Result of running work under a deadline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Completed(T),
    Expired,
}

impl<T> Outcome<T> {
    pub fn is_expired(&self) -> bool {
        matches!(self, Outcome::Expired)
    }

    pub fn into_completed(self) -> Option<T> {
        match self {
            Outcome::Completed(value) => Some(value),
            Outcome::Expired => None,
        }
    }
}

/// Run `work`, waiting at most `deadline_secs` seconds for its result.
/// `deadline_secs == 0` means no deadline.
pub fn run_with_deadline<T, F>(deadline_secs: u64, work: F) -> Outcome<T>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    if deadline_secs == 0 {
        return Outcome::Completed(work());
    }

    let (sender, receiver) = mpsc::sync_channel(1);
    thread::spawn(move || {
        // The receiver may be gone by the time the work finishes; a failed
        // send just drops the late result.
        let _ = sender.send(work());
    });

    match receiver.recv_timeout(Duration::from_secs(deadline_secs)) {
        Ok(value) => Outcome::Completed(value),
        Err(_) => {
            warn!("computation expired after {deadline_secs}s; abandoning worker");
            Outcome::Expired
        }
    }
}
