//! Parallel encode fan-out.
//!
//! A column is split into disjoint index ranges ([`EncodeTask`]), each range
//! is encoded by one worker of a dedicated rayon pool, and
//! [`DictionaryEncoder::encode_parallel`] returns only after every task has
//! joined. Scans may start as soon as it returns.
//!
//! Cross-task row order in the encoded column is the order in which tasks
//! acquire the encoder lock, not the column order. Only "one code per input
//! item" is preserved across tasks.

use std::ops::Range;

use rayon::prelude::*;

use super::DictionaryEncoder;
use crate::config::EncodeConfig;
use crate::error::{Error, Result};

/// One disjoint slice of the input column handed to a worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeTask {
    /// Task number, in column order.
    pub id: usize,
    /// Row range this task encodes.
    pub range: Range<usize>,
}

impl EncodeTask {
    /// Number of rows in the task.
    #[must_use]
    pub fn len(&self) -> usize {
        self.range.len()
    }

    /// Returns true if the task covers no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

/// Splits a column into tasks for a fixed number of workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FanOut {
    workers: usize,
    min_chunk_len: usize,
}

impl FanOut {
    /// Creates a fan-out with `workers` workers and no minimum chunk length.
    ///
    /// A worker count of 0 is treated as 1.
    #[must_use]
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
            min_chunk_len: 1,
        }
    }

    /// Builder: smallest range handed to one worker.
    #[must_use]
    pub fn with_min_chunk_len(mut self, min_chunk_len: usize) -> Self {
        self.min_chunk_len = min_chunk_len.max(1);
        self
    }

    /// Creates a fan-out from the `[encode]` configuration section.
    #[must_use]
    pub fn from_config(config: &EncodeConfig) -> Self {
        Self::new(config.effective_workers()).with_min_chunk_len(config.min_chunk_len)
    }

    /// Number of workers.
    #[must_use]
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Plans tasks covering `0..len` exactly once, in column order.
    ///
    /// Produces at most `workers` tasks; fewer when `min_chunk_len` makes
    /// the chunks larger than an even split.
    #[must_use]
    pub fn plan(&self, len: usize) -> Vec<EncodeTask> {
        if len == 0 {
            return Vec::new();
        }
        let chunk = len.div_ceil(self.workers).max(self.min_chunk_len);
        (0..len)
            .step_by(chunk)
            .enumerate()
            .map(|(id, start)| EncodeTask {
                id,
                range: start..(start + chunk).min(len),
            })
            .collect()
    }
}

impl DictionaryEncoder {
    /// Encodes `column` with several workers and waits for all of them.
    ///
    /// Each planned task calls [`DictionaryEncoder::encode`] on its own
    /// range, so every task's rows stay contiguous and in input order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Internal`] if the worker pool cannot be built, or the
    /// first error returned by a task's `encode`.
    pub fn encode_parallel<S>(&self, column: &[S], fan_out: &FanOut) -> Result<()>
    where
        S: AsRef<str> + Sync,
    {
        let tasks = fan_out.plan(column.len());
        if tasks.len() <= 1 {
            return self.encode(column);
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(fan_out.workers())
            .thread_name(|i| format!("colscan-encode-{i}"))
            .build()
            .map_err(|e| Error::Internal(format!("encode pool: {e}")))?;

        tracing::debug!(
            rows = column.len(),
            tasks = tasks.len(),
            workers = fan_out.workers(),
            "parallel encode started"
        );

        pool.install(|| {
            tasks.par_iter().try_for_each(|task| {
                tracing::trace!(task = task.id, rows = task.len(), "encode task");
                self.encode(&column[task.range.clone()])
            })
        })
    }
}
