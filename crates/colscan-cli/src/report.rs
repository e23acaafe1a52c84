//! Comparison report formatting.

use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use serde::Serialize;

use colscan_core::Comparison;

/// One comparison, flattened for output.
#[derive(Debug, Serialize)]
pub struct ComparisonRow {
    pub kind: &'static str,
    pub query: String,
    pub backend: &'static str,
    pub scalar_matches: usize,
    pub vector_matches: usize,
    pub scalar_us: f64,
    pub vector_us: f64,
    pub speedup: Option<f64>,
    pub agrees: bool,
}

impl<T: Ord + Clone> From<&Comparison<T>> for ComparisonRow {
    fn from(cmp: &Comparison<T>) -> Self {
        Self {
            kind: cmp.kind,
            query: cmp.query.clone(),
            backend: cmp.backend.name(),
            scalar_matches: cmp.scalar.len(),
            vector_matches: cmp.vector.len(),
            scalar_us: cmp.scalar_elapsed.as_secs_f64() * 1e6,
            vector_us: cmp.vector_elapsed.as_secs_f64() * 1e6,
            speedup: cmp.speedup(),
            agrees: cmp.agrees(),
        }
    }
}

/// Summary of the encoded column the comparisons ran on.
#[derive(Debug, Serialize)]
pub struct EncodeSummary {
    pub rows: usize,
    pub distinct: usize,
    pub workers: usize,
    pub encode_us: f64,
}

/// Full report of a `compare` run.
#[derive(Debug, Serialize)]
pub struct CompareReport {
    pub encode: EncodeSummary,
    pub comparisons: Vec<ComparisonRow>,
}

impl CompareReport {
    pub fn all_agree(&self) -> bool {
        self.comparisons.iter().all(|row| row.agrees)
    }
}

/// Prints the report as pretty JSON.
pub fn print_json(report: &CompareReport) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

/// Prints the report as a table.
pub fn print_table(report: &CompareReport) {
    let encode = &report.encode;
    println!(
        "{} {} rows, {} distinct, {} worker(s), {:.1} µs",
        "Encoded".green().bold(),
        encode.rows,
        encode.distinct,
        encode.workers,
        encode.encode_us
    );

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let header: Vec<Cell> = [
        "query", "input", "backend", "scalar", "vector", "scalar µs", "vector µs", "speedup",
        "result",
    ]
    .iter()
    .map(|c| Cell::new(c).fg(Color::Cyan))
    .collect();
    table.set_header(header);

    for row in &report.comparisons {
        let verdict = if row.agrees {
            Cell::new("agree").fg(Color::Green)
        } else {
            Cell::new("DISAGREE").fg(Color::Red)
        };
        table.add_row(vec![
            Cell::new(row.kind),
            Cell::new(format!("{:?}", row.query)),
            Cell::new(row.backend),
            Cell::new(row.scalar_matches),
            Cell::new(row.vector_matches),
            Cell::new(format!("{:.2}", row.scalar_us)),
            Cell::new(format!("{:.2}", row.vector_us)),
            Cell::new(row.speedup.map_or("-".to_string(), |s| format!("{s:.2}x"))),
            verdict,
        ]);
    }

    println!("{table}");
}
