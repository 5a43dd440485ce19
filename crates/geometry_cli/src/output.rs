//! Text and JSON rendering for CLI results.
//!
//! # Responsibility
//! - Format calculation results, history tables and statistics.
//! - Render stored epoch-millisecond timestamps in UTC or local time.
//!
//! # Invariants
//! - Absent radii render as `none` in text and `null` in JSON.
//! - Empty history renders a fixed message instead of an empty table.

use chrono::{DateTime, Local, Utc};
use geometry_core::report::format_optional;
use geometry_core::{
    AnyShape, CalculationRecord, CalculationSnapshot, CalculationStatistics, CompletedCalculation,
};
use serde::Serialize;

const TIME_FORMAT: &str = "%d.%m.%Y %H:%M";

/// JSON shape of one calculate-and-save result.
#[derive(Debug, Serialize)]
pub struct CalculationOutput {
    pub id: i64,
    #[serde(flatten)]
    pub snapshot: CalculationSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right_triangle: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side_length: Option<f64>,
}

impl From<&CompletedCalculation> for CalculationOutput {
    fn from(value: &CompletedCalculation) -> Self {
        let side_length = match value.shape {
            AnyShape::Trapezoid(trapezoid) => Some(trapezoid.side_length()),
            _ => None,
        };
        Self {
            id: value.id,
            snapshot: value.snapshot(),
            right_triangle: value.shape.is_right_triangle(),
            side_length,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ClearOutput {
    pub confirmed: bool,
    pub deleted: u64,
}

pub fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(err) => eprintln!("failed to encode JSON output: {err}"),
    }
}

pub fn render_calculation(output: &CalculationOutput) -> String {
    let snapshot = &output.snapshot;
    let mut lines = vec![format!("{} ({})", snapshot.shape_type, snapshot.parameters)];
    for (label, value) in snapshot.result_rows() {
        lines.push(format!("{label}: {value}"));
    }
    if let Some(side_length) = output.side_length {
        lines.push(format!("Side length: {side_length:.4}"));
    }
    if let Some(right) = output.right_triangle {
        lines.push(format!("Type: {}", if right { "right" } else { "not right" }));
    }
    lines.push(format!("Saved as calculation #{}", output.id));
    lines.join("\n")
}

pub fn render_history(records: &[CalculationRecord], local_time: bool) -> String {
    if records.is_empty() {
        return "History is empty".to_string();
    }

    let mut lines = vec![
        format!(
            "{:<5} {:<10} {:<25} {:>12} {:>10} {:>10}  {}",
            "ID", "Type", "Parameters", "Area", "R circ", "R insc", "Time"
        ),
        "-".repeat(92),
    ];
    for record in records {
        lines.push(format!(
            "{:<5} {:<10} {:<25} {:>12.2} {:>10} {:>10}  {}",
            record.id,
            record.shape_type.as_str(),
            record.parameters,
            record.area,
            format_optional(record.circumscribed_radius),
            format_optional(record.inscribed_radius),
            format_timestamp(record.created_at, local_time)
        ));
    }
    lines.join("\n")
}

pub fn render_statistics(stats: &CalculationStatistics, local_time: bool) -> String {
    let mut lines = vec![format!("Total calculations: {}", stats.total)];
    for entry in &stats.by_shape {
        lines.push(format!(
            "{}: count={} avg_area={:.4} min_area={:.4} max_area={:.4}",
            entry.shape_type, entry.count, entry.avg_area, entry.min_area, entry.max_area
        ));
    }
    let last = stats
        .last_created_at
        .map_or_else(|| "never".to_string(), |ms| format_timestamp(ms, local_time));
    lines.push(format!("Last calculation: {last}"));
    lines.join("\n")
}

pub fn format_timestamp(epoch_ms: i64, local_time: bool) -> String {
    let Some(utc) = DateTime::<Utc>::from_timestamp_millis(epoch_ms) else {
        return epoch_ms.to_string();
    };
    if local_time {
        utc.with_timezone(&Local).format(TIME_FORMAT).to_string()
    } else {
        format!("{} UTC", utc.format(TIME_FORMAT))
    }
}
