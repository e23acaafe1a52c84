//! Scalar vs vector comparison runs.
//!
//! Each `compare_*` function answers one query both ways over the same
//! data, timing each side. The two answers are checked as sets: only
//! agreement is guaranteed, not order.

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use crate::dictionary::{Code, ColumnSnapshot, DictionaryEncoder};
use crate::error::{Error, Result};
use crate::scan::{prefix_indices, ScalarScanner, ScanBackend, VectorScanner};

/// Outcome of running one query through both paths.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison<T> {
    /// Query kind, e.g. `"equality"`.
    pub kind: &'static str,
    /// The queried item or prefix.
    pub query: String,
    /// Backend the vector side ran on.
    pub backend: ScanBackend,
    /// Scalar result.
    pub scalar: Vec<T>,
    /// Vector result.
    pub vector: Vec<T>,
    /// Scalar wall time.
    pub scalar_elapsed: Duration,
    /// Vector wall time.
    pub vector_elapsed: Duration,
}

impl<T: Ord + Clone> Comparison<T> {
    /// Returns true when both paths produced the same set.
    #[must_use]
    pub fn agrees(&self) -> bool {
        self.scalar.iter().collect::<BTreeSet<_>>() == self.vector.iter().collect::<BTreeSet<_>>()
    }

    /// Values the scalar path found and the vector path did not.
    #[must_use]
    pub fn missing(&self) -> Vec<T> {
        let vector: BTreeSet<&T> = self.vector.iter().collect();
        self.scalar
            .iter()
            .filter(|v| !vector.contains(v))
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Values the vector path found and the scalar path did not.
    #[must_use]
    pub fn extra(&self) -> Vec<T> {
        let scalar: BTreeSet<&T> = self.scalar.iter().collect();
        self.vector
            .iter()
            .filter(|v| !scalar.contains(v))
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Scalar time over vector time, `None` if the vector side took no
    /// measurable time.
    #[must_use]
    pub fn speedup(&self) -> Option<f64> {
        let vector = self.vector_elapsed.as_secs_f64();
        (vector > 0.0).then(|| self.scalar_elapsed.as_secs_f64() / vector)
    }
}

fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let out = f();
    (out, start.elapsed())
}

/// Rows holding `item`: dictionary lookup plus a scalar column walk
/// against a vector scan for the same code.
///
/// An item that was never encoded matches no rows on either side.
pub fn compare_equality(
    encoder: &DictionaryEncoder,
    snapshot: &ColumnSnapshot,
    scanner: &VectorScanner,
    item: &str,
) -> Result<Comparison<usize>> {
    let (scalar, scalar_elapsed) =
        timed(|| ScalarScanner::new(encoder).equality_rows(snapshot.encoded(), item));

    let (vector, vector_elapsed) = timed(|| match encoder.query(item) {
        Some(code) => scanner.equality(snapshot.encoded(), code),
        None => Ok(Vec::new()),
    });

    Ok(Comparison {
        kind: "equality",
        query: item.to_string(),
        backend: scanner.backend(),
        scalar,
        vector: vector?,
        scalar_elapsed,
        vector_elapsed,
    })
}

/// Dictionary codes whose key starts with `prefix`.
///
/// The vector side scans the snapshot's code-ordered key list, so the
/// index of a matching key is its code.
pub fn compare_prefix(
    encoder: &DictionaryEncoder,
    snapshot: &ColumnSnapshot,
    scanner: &VectorScanner,
    prefix: &str,
) -> Result<Comparison<Code>> {
    let (scalar, scalar_elapsed) = timed(|| ScalarScanner::new(encoder).prefix(prefix));
    let (vector, vector_elapsed) = timed(|| scanner.prefix(snapshot.keys(), prefix));

    let vector = vector?
        .into_iter()
        .map(|idx| {
            Code::try_from(idx)
                .map_err(|_| Error::Internal(format!("key index {idx} outside the code space")))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Comparison {
        kind: "prefix",
        query: prefix.to_string(),
        backend: scanner.backend(),
        scalar,
        vector,
        scalar_elapsed,
        vector_elapsed,
    })
}

/// Rows of a raw column starting with `prefix`.
pub fn compare_prefix_rows<S: AsRef<str>>(
    column: &[S],
    scanner: &VectorScanner,
    prefix: &str,
) -> Result<Comparison<usize>> {
    let (scalar, scalar_elapsed) = timed(|| prefix_indices(column, prefix));
    let (vector, vector_elapsed) = timed(|| scanner.prefix(column, prefix));

    Ok(Comparison {
        kind: "prefix_rows",
        query: prefix.to_string(),
        backend: scanner.backend(),
        scalar,
        vector: vector?,
        scalar_elapsed,
        vector_elapsed,
    })
}
