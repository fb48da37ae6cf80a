use crate::core::metrics::{MetricsSummary, ProcMetrics};
use std::io::{self, Write};

pub const REPORT_HEADER: &str = "# label; BT; AT; Q; Pr; WT; CT; RT; TAT";

/// Write the run report: one row per completed process in completion order,
/// then the averages. An empty run reports `no data` instead of averages.
pub fn write_report<W: Write>(out: &mut W, rows: &[ProcMetrics]) -> io::Result<()> {
    writeln!(out, "{REPORT_HEADER}")?;

    for m in rows {
        writeln!(
            out,
            "{};{};{};{};{};{};{};{};{}",
            m.label,
            m.burst_time,
            m.arrival_time,
            m.queue_rank,
            m.priority,
            m.waiting_time,
            m.completion_time,
            m.response_time,
            m.turnaround_time,
        )?;
    }

    writeln!(out)?;
    match MetricsSummary::from_metrics(rows) {
        Some(summary) => writeln!(
            out,
            "avg WT={:.2}; avg CT={:.2}; avg RT={:.2}; avg TAT={:.2}",
            summary.avg_waiting,
            summary.avg_completion,
            summary.avg_response,
            summary.avg_turnaround,
        ),
        None => writeln!(out, "no data"),
    }
}

/// Render the report to a string.
pub fn report_to_string(rows: &[ProcMetrics]) -> String {
    let mut buf = Vec::new();
    write_report(&mut buf, rows).expect("writing to a Vec cannot fail");
    String::from_utf8(buf).expect("report output is valid UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::ProcessRecord;

    fn metrics(label: &str, burst: u64, arrival: u64, start: u64, completion: u64) -> ProcMetrics {
        let mut record = ProcessRecord::new(label, burst, arrival, 1, 2);
        record.remaining_time = 0;
        record.start_time = Some(start);
        record.completion_time = Some(completion);
        ProcMetrics::from_record(&record)
    }

    #[test]
    fn report_lists_rows_then_averages() {
        let rows = vec![metrics("A", 4, 0, 0, 4), metrics("B", 2, 0, 4, 6)];
        let report = report_to_string(&rows);

        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines[0], REPORT_HEADER);
        assert_eq!(lines[1], "A;4;0;1;2;0;4;0;4");
        assert_eq!(lines[2], "B;2;0;1;2;4;6;4;6");
        assert_eq!(lines[3], "");
        assert_eq!(lines[4], "avg WT=2.00; avg CT=5.00; avg RT=2.00; avg TAT=5.00");
    }

    #[test]
    fn empty_run_reports_no_data() {
        let report = report_to_string(&[]);
        assert!(report.contains("no data"));
        assert!(!report.contains("avg"));
    }
}
