use std::ops::AddAssign;
use std::path::PathBuf;

/// Line counters for one processed trajectory stream.
///
/// `total_lines` never includes comment lines. The accumulator also leaves out blank lines
/// and records too short for the configured columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineTally {
    pub total_lines: u64,
    pub valid_lines: u64,
}

impl AddAssign for LineTally {
    fn add_assign(&mut self, other: Self) {
        self.total_lines += other.total_lines;
        self.valid_lines += other.valid_lines;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StreamReport {
    pub path: PathBuf,
    pub tally: LineTally,
}

/// Per-file tallies of a workflow run, in processing order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub streams: Vec<StreamReport>,
}

impl RunSummary {
    pub fn record(&mut self, path: PathBuf, tally: LineTally) {
        self.streams.push(StreamReport { path, tally });
    }

    pub fn total(&self) -> LineTally {
        let mut total = LineTally::default();
        for report in &self.streams {
            total += report.tally;
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_sums_every_stream() {
        let mut summary = RunSummary::default();
        summary.record(
            PathBuf::from("a.traj"),
            LineTally {
                total_lines: 3,
                valid_lines: 2,
            },
        );
        summary.record(
            PathBuf::from("b.traj"),
            LineTally {
                total_lines: 5,
                valid_lines: 5,
            },
        );
        assert_eq!(
            summary.total(),
            LineTally {
                total_lines: 8,
                valid_lines: 7
            }
        );
        assert_eq!(summary.streams[1].path, PathBuf::from("b.traj"));
    }
}
