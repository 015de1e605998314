//! Caller-supplied deadlines for request-scoped store calls.

use std::time::{Duration, Instant};

use rusqlite::Connection;

use crate::error::StoreError;

/// Number of SQLite VM instructions between deadline checks.
const PROGRESS_HANDLER_OPS: i32 = 1000;

/// Point in time after which a store call must give up and roll back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Deadline(Option<Instant>);

impl Deadline {
    /// No time limit.
    pub fn none() -> Self {
        Self(None)
    }

    pub fn at(instant: Instant) -> Self {
        Self(Some(instant))
    }

    pub fn after(timeout: Duration) -> Self {
        Self(Instant::now().checked_add(timeout))
    }

    pub fn instant(&self) -> Option<Instant> {
        self.0
    }

    pub fn is_expired(&self) -> bool {
        self.0.is_some_and(|d| Instant::now() >= d)
    }

    /// Time left before the deadline, or `None` when there is no deadline.
    pub fn remaining(&self) -> Option<Duration> {
        self.0.map(|d| d.saturating_duration_since(Instant::now()))
    }

    /// Cap a lock wait so it never outlives the deadline.
    ///
    /// Rounded up by a millisecond because SQLite takes whole milliseconds.
    pub fn bound_busy_timeout(&self, busy_timeout: Duration) -> Duration {
        match self.remaining() {
            Some(left) => busy_timeout.min(left + Duration::from_millis(1)),
            None => busy_timeout,
        }
    }

    /// Report a lock wait that ran into the deadline as `DeadlineExceeded`.
    pub fn classify(&self, err: StoreError) -> StoreError {
        let lock_wait = matches!(
            &err,
            StoreError::Sqlite(rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked,
                    ..
                },
                _,
            ))
        );
        if lock_wait && self.is_expired() {
            StoreError::DeadlineExceeded
        } else {
            err
        }
    }

    /// Fail with `DeadlineExceeded` if the deadline has passed.
    pub fn check(&self) -> Result<(), StoreError> {
        if self.is_expired() {
            Err(StoreError::DeadlineExceeded)
        } else {
            Ok(())
        }
    }

    /// Interrupt long-running statements on `conn` once the deadline passes.
    ///
    /// An interrupted statement fails with `SQLITE_INTERRUPT`, which maps to
    /// `StoreError::DeadlineExceeded`.
    pub fn install(&self, conn: &Connection) {
        match self.0 {
            Some(deadline) => conn.progress_handler(
                PROGRESS_HANDLER_OPS,
                Some(move || Instant::now() >= deadline),
            ),
            None => conn.progress_handler(PROGRESS_HANDLER_OPS, None::<fn() -> bool>),
        }
    }
}
