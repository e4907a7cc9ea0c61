pub mod egabf;
pub mod histogram;
pub mod reweight;

use cvreweight::engine::state::RunSummary;

pub(crate) fn print_summary(summary: &RunSummary) {
    for stream in &summary.streams {
        println!(
            "{}: {} data line(s), {} valid",
            stream.path.display(),
            stream.tally.total_lines,
            stream.tally.valid_lines
        );
    }
    let total = summary.total();
    if summary.streams.len() > 1 {
        println!(
            "Total: {} data line(s), {} valid",
            total.total_lines, total.valid_lines
        );
    }
}
