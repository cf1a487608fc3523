// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fmt;

use crate::Error;


/// A processing result of a single target.
#[derive(Clone, PartialEq, Debug)]
pub enum Outcome {
    /// The target was modified.
    Done,

    /// The target was modified using an approximation.
    Degraded,

    /// The target doesn't need any changes.
    Unchanged,

    /// The target was skipped.
    Skipped(Error),
}


/// Per-target results of a batch operation.
#[derive(Clone, Debug)]
pub struct Report<N> {
    entries: Vec<(N, Outcome)>,
}

impl<N> Default for Report<N> {
    fn default() -> Self {
        Report { entries: Vec::new() }
    }
}

impl<N> Report<N> {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a target result.
    pub fn push(&mut self, node: N, outcome: Outcome) {
        self.entries.push((node, outcome));
    }

    /// Returns all results in processing order.
    #[inline]
    pub fn entries(&self) -> &[(N, Outcome)] {
        &self.entries
    }

    /// Returns a result of the first entry for `node`.
    pub fn outcome(&self, node: N) -> Option<&Outcome>
        where N: PartialEq
    {
        self.entries.iter().find(|(n, _)| *n == node).map(|(_, o)| o)
    }

    /// Returns aggregated counters.
    pub fn summary(&self) -> Summary {
        let mut summary = Summary::default();
        for (_, outcome) in &self.entries {
            match outcome {
                Outcome::Done => summary.done += 1,
                Outcome::Degraded => summary.degraded += 1,
                Outcome::Unchanged => summary.unchanged += 1,
                Outcome::Skipped(_) => summary.skipped += 1,
            }
        }

        summary
    }
}


/// Aggregated batch counters.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Default, Debug)]
pub struct Summary {
    pub done: usize,
    pub degraded: usize,
    pub unchanged: usize,
    pub skipped: usize,
}

impl Summary {
    /// Returns the number of targets that were processed without errors.
    #[inline]
    pub fn processed(&self) -> usize {
        self.done + self.degraded + self.unchanged
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f, "processed {} (changed {}, approximate {}, unchanged {}), skipped {}",
            self.processed(), self.done, self.degraded, self.unchanged, self.skipped
        )
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary() {
        let mut report = Report::new();
        report.push(1, Outcome::Done);
        report.push(2, Outcome::Degraded);
        report.push(3, Outcome::Skipped(Error::CycleDetected));
        report.push(4, Outcome::Unchanged);
        report.push(5, Outcome::Done);

        let summary = report.summary();
        assert_eq!(summary.processed(), 4);
        assert_eq!(summary.done, 2);
        assert_eq!(summary.degraded, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(
            summary.to_string(),
            "processed 4 (changed 2, approximate 1, unchanged 1), skipped 1"
        );
        assert_eq!(report.outcome(3), Some(&Outcome::Skipped(Error::CycleDetected)));
        assert_eq!(report.outcome(6), None);
    }
}
