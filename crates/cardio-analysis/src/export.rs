//! CSV export of the measurement history

use cardio_core::HistoryRecord;

/// Column header, kept byte-identical to the shipped export format
pub const CSV_HEADER: &str = "Thời gian,Nhịp TB (bpm),Rủi ro,Max,Min";

/// Render the history as CSV, one row per record in stored order.
///
/// Fields are comma joined with no quoting; averages carry one decimal,
/// max/min are whole BPM.
pub fn history_csv(records: &[HistoryRecord]) -> String {
    let rows: Vec<String> = records.iter()
        .map(|r| {
            format!(
                "{},{:.1},{},{:.0},{:.0}",
                r.timestamp, r.avg_bpm, r.risk_score, r.max_bpm, r.min_bpm
            )
        })
        .collect();

    format!("{}\n{}", CSV_HEADER, rows.join("\n"))
}
