//! Rendering of assignment reports and ETA estimates.

use std::fmt::Write as _;
use std::io::{self, Write};

use clap::ValueEnum;
use dispatch_lib::{AssignmentReport, EtaEstimate, HaltReason};
use serde::Serialize;

use crate::terminal::ColorPalette;

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON, same shape as the HTTP response body.
    Json,
    /// Human-readable summary.
    #[default]
    Text,
}

/// Write `value` as pretty JSON followed by a newline.
pub fn write_json<T: Serialize>(out: &mut impl Write, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}

fn format_eta(eta_min: Option<f64>, palette: &ColorPalette) -> String {
    match eta_min {
        Some(minutes) => format!("{}{:.1} min{}", palette.green, minutes, palette.reset),
        None => format!("{}no eta{}", palette.red, palette.reset),
    }
}

fn halt_color(halt: HaltReason, palette: &ColorPalette) -> &'static str {
    match halt {
        HaltReason::PoolEmpty => palette.green,
        HaltReason::CapacityExhausted | HaltReason::RoundLimit => palette.yellow,
        HaltReason::NoProgress => palette.red,
    }
}

/// Render an assignment report as text.
///
/// ```text
/// Assigned 4 of 5 orders to 2 couriers (capacity_exhausted after 2 rounds)
///   M-001 [1] -> 101  0.612 km  1.5 min  6a Avenida, Zona 1
///   ...
/// Total distance: 4.12 km (avg 1.03 km per order)
/// Unassigned: 105
/// ```
pub fn render_report_text(report: &AssignmentReport, palette: &ColorPalette) -> String {
    let mut text = String::new();
    let stats = &report.stats;
    let total = stats.total_orders_assigned + stats.orders_remaining;

    let _ = writeln!(
        text,
        "{}Assigned {} of {} orders to {} couriers{} ({}{}{} after {} rounds)",
        palette.white_bold,
        stats.total_orders_assigned,
        total,
        stats.motos_used,
        palette.reset,
        halt_color(report.halt_reason, palette),
        report.halt_reason,
        palette.reset,
        report.rounds,
    );

    if let Some(message) = &report.message {
        let _ = writeln!(text, "{}{}{}", palette.yellow, message, palette.reset);
    }

    for assignment in &report.assignments {
        let _ = write!(
            text,
            "  {}{}{} [{}] -> {}  {}{:.3} km{}  {}",
            palette.white_bold,
            assignment.courier_label,
            palette.reset,
            assignment.courier_id,
            assignment.order_id,
            palette.cyan,
            assignment.distance_km,
            palette.reset,
            format_eta(assignment.eta_min, palette),
        );
        if !assignment.order_address.is_empty() {
            let _ = write!(
                text,
                "  {}{}{}",
                palette.gray, assignment.order_address, palette.reset
            );
        }
        text.push('\n');
    }

    if !report.assignments.is_empty() {
        let _ = writeln!(
            text,
            "Total distance: {:.2} km (avg {:.2} km per order)",
            stats.total_distance_km, stats.avg_distance_per_order
        );
    }

    if !report.unassigned_orders.is_empty() {
        let ids: Vec<String> = report
            .unassigned_orders
            .iter()
            .map(ToString::to_string)
            .collect();
        let _ = writeln!(
            text,
            "{}Unassigned: {}{}",
            palette.red,
            ids.join(", "),
            palette.reset
        );
    }

    text
}

/// Render a single ETA estimate as text.
pub fn render_eta_text(estimate: &EtaEstimate, palette: &ColorPalette) -> String {
    format!(
        "Distance: {}{:.3} km{}\nETA: {} at {} km/h\n",
        palette.cyan,
        estimate.distance_km,
        palette.reset,
        format_eta(estimate.eta_min, palette),
        estimate.speed_kmh,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::colors;
    use dispatch_lib::{assign_orders, AssignmentRequest, SolverDefaults};

    fn report(body: &[u8]) -> AssignmentReport {
        let request = AssignmentRequest::from_json_slice(body).unwrap();
        assign_orders(&request, &SolverDefaults::default())
    }

    #[test]
    fn text_report_lists_assignments_and_leftovers() {
        let report = report(
            br#"{"motos":[{"id":7,"latitude":0,"longitude":0,"max_orders_capacity":1,"license_plate":"P-7"}],
                "orders":[{"id":1,"latitude":0,"longitude":1,"address":"North St"},{"id":"x2","latitude":0,"longitude":2}]}"#,
        );
        let text = render_report_text(&report, &ColorPalette::plain());

        assert!(text.starts_with("Assigned 1 of 2 orders to 1 couriers (capacity_exhausted after 1 rounds)"));
        assert!(text.contains("  P-7 [7] -> 1  111.195 km  266.9 min  North St\n"));
        assert!(text.contains("Total distance: 111.19 km (avg 111.19 km per order)"));
        assert!(text.contains("Unassigned: x2"));
    }

    #[test]
    fn colored_report_dims_addresses() {
        let report = report(
            br#"{"motos":[{"id":1,"latitude":0,"longitude":0}],
                "orders":[{"id":1,"latitude":0,"longitude":1,"address":"North St"}]}"#,
        );
        let text = render_report_text(&report, &ColorPalette::colored());
        let dimmed = format!("{}North St{}", colors::GRAY, colors::RESET);
        assert!(text.contains(&dimmed));
    }

    #[test]
    fn text_report_shows_message_for_empty_fleet() {
        let report = report(br#"{"orders":[{"id":1}]}"#);
        let text = render_report_text(&report, &ColorPalette::plain());
        assert!(text.contains("No motos or orders to optimize"));
        assert!(!text.contains("Total distance"));
        assert!(text.contains("Unassigned: 1"));
    }

    #[test]
    fn eta_text_marks_missing_eta() {
        let estimate = EtaEstimate {
            distance_km: 12.5,
            eta_min: None,
            speed_kmh: 0.0,
        };
        let text = render_eta_text(&estimate, &ColorPalette::plain());
        assert_eq!(text, "Distance: 12.500 km\nETA: no eta at 0 km/h\n");
    }

    #[test]
    fn json_output_ends_with_newline() {
        let mut out = Vec::new();
        write_json(&mut out, &serde_json::json!({"a": 1})).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("}\n"));
    }
}
