//! Text-search timing.
//!
//! Replays a free-text query many times against a live engine and reports
//! how long each recomposition took, including the options and count events.

use crate::engine::SearchEngine;
use crate::utils::progress;
use std::time::{Duration, Instant};

/// Inputs timed when none are given: empty, short prefix, full word and a miss
pub const DEFAULT_INPUTS: [&str; 4] = ["", "cho", "chocolat", "chosssss"];

/// Timing of one input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchRow {
    pub input: String,
    pub iterations: u32,
    pub total: Duration,
    /// Result size for this input
    pub matches: usize,
}

impl BenchRow {
    pub fn average(&self) -> Duration {
        if self.iterations == 0 {
            Duration::ZERO
        } else {
            self.total / self.iterations
        }
    }
}

/// Time `iterations` text searches for each input.
///
/// The engine's text query is cleared afterwards; tag selections are kept.
pub fn bench_text_search(
    engine: &mut SearchEngine,
    inputs: &[String],
    iterations: u32,
    show_progress: bool,
) -> Vec<BenchRow> {
    let bar = progress::step_bar(inputs.len() as u64 * iterations as u64, show_progress);
    let mut rows = Vec::with_capacity(inputs.len());

    for input in inputs {
        if let Some(ref bar) = bar {
            bar.set_message(format!("\"{}\"", input));
        }

        let start = Instant::now();
        for _ in 0..iterations {
            engine.set_text(input, &mut |_| {});
            if let Some(ref bar) = bar {
                bar.inc(1);
            }
        }
        let total = start.elapsed();

        let matches = engine.result_ids().len();
        log::debug!("Timed \"{}\": {:?} over {} runs", input, total, iterations);
        rows.push(BenchRow {
            input: input.clone(),
            iterations,
            total,
            matches,
        });
    }

    if let Some(bar) = bar {
        bar.finish_and_clear();
    }
    engine.set_text("", &mut |_| {});

    rows
}

/// Print timing rows as a table
pub fn print_bench_table(rows: &[BenchRow]) {
    println!(
        "{:<20} {:>10} {:>14} {:>14} {:>8}",
        "input", "runs", "total", "average", "matches"
    );
    for row in rows {
        println!(
            "{:<20} {:>10} {:>14} {:>14} {:>8}",
            format!("\"{}\"", row.input),
            row.iterations,
            format!("{:.3?}", row.total),
            format!("{:.3?}", row.average()),
            row.matches
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::load::parse_items;
    use crate::index::types::Facet;

    fn engine() -> SearchEngine {
        let items = parse_items(
            r#"[
                {"id": 1, "name": "Mousse au chocolat", "appliance": "Casserole"},
                {"id": 2, "name": "Chou farci", "appliance": "Cocotte"},
                {"id": 3, "name": "Tarte", "description": "Pate et chocolat", "appliance": "Four"}
            ]"#,
        )
        .unwrap();
        SearchEngine::new(items).unwrap()
    }

    #[test]
    fn test_bench_reports_matches_per_input() {
        let mut engine = engine();
        let inputs: Vec<String> = DEFAULT_INPUTS.iter().map(|s| s.to_string()).collect();
        let rows = bench_text_search(&mut engine, &inputs, 4, false);

        let matches: Vec<_> = rows.iter().map(|r| r.matches).collect();
        assert_eq!(matches, [3, 3, 2, 0]);
        assert!(rows.iter().all(|r| r.iterations == 4));
        assert_eq!(engine.filters().text(), "");
    }

    #[test]
    fn test_bench_keeps_tag_selection() {
        let mut engine = engine();
        engine.add_tag(Facet::Appliances, "Four", &mut |_| {});
        let rows = bench_text_search(&mut engine, &["chocolat".to_string()], 1, false);

        assert_eq!(rows[0].matches, 1);
        assert_eq!(engine.result_ids(), vec![3]);
    }

    #[test]
    fn test_average_of_zero_iterations() {
        let row = BenchRow {
            input: String::new(),
            iterations: 0,
            total: Duration::from_millis(5),
            matches: 0,
        };
        assert_eq!(row.average(), Duration::ZERO);
    }
}
