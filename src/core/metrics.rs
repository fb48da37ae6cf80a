use super::state::{ProcessRecord, Ticks};
use average::Estimate;

/// Per-process timing metrics, derived post-hoc from a completed record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcMetrics {
    pub label: String,
    pub burst_time: Ticks,
    pub arrival_time: Ticks,
    pub queue_rank: usize,
    pub priority: i64,
    pub waiting_time: Ticks,
    pub completion_time: Ticks,
    pub response_time: Ticks,
    pub turnaround_time: Ticks,
}

impl ProcMetrics {
    pub fn from_record(record: &ProcessRecord) -> Self {
        let completion = record
            .completion_time
            .expect("metrics require a completed record");
        let start = record
            .start_time
            .expect("completed record must have started");

        let turnaround = completion - record.arrival_time;
        Self {
            label: record.label.clone(),
            burst_time: record.burst_time,
            arrival_time: record.arrival_time,
            queue_rank: record.queue_rank,
            priority: record.priority,
            waiting_time: turnaround - record.burst_time,
            completion_time: completion,
            response_time: start - record.arrival_time,
            turnaround_time: turnaround,
        }
    }
}

/// Arithmetic means across a completed run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricsSummary {
    pub count: usize,
    pub avg_waiting: f64,
    pub avg_completion: f64,
    pub avg_response: f64,
    pub avg_turnaround: f64,
}

impl MetricsSummary {
    /// `None` for an empty run; averages over nothing are not a number.
    pub fn from_metrics(rows: &[ProcMetrics]) -> Option<Self> {
        if rows.is_empty() {
            return None;
        }
        Some(Self {
            count: rows.len(),
            avg_waiting: avg(rows.iter().map(|m| m.waiting_time as f64)),
            avg_completion: avg(rows.iter().map(|m| m.completion_time as f64)),
            avg_response: avg(rows.iter().map(|m| m.response_time as f64)),
            avg_turnaround: avg(rows.iter().map(|m| m.turnaround_time as f64)),
        })
    }
}

fn avg(iter: impl Iterator<Item = f64>) -> f64 {
    iter.collect::<average::Mean>().estimate()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completed_record(
        burst: Ticks,
        arrival: Ticks,
        start: Ticks,
        completion: Ticks,
    ) -> ProcessRecord {
        let mut record = ProcessRecord::new("p", burst, arrival, 1, 0);
        record.remaining_time = 0;
        record.start_time = Some(start);
        record.completion_time = Some(completion);
        record
    }

    #[test]
    fn derives_metrics_from_a_completed_record() {
        let metrics = ProcMetrics::from_record(&completed_record(5, 1, 3, 9));
        assert_eq!(metrics.turnaround_time, 8);
        assert_eq!(metrics.response_time, 2);
        assert_eq!(metrics.waiting_time, 3);
        assert_eq!(metrics.completion_time, 9);
    }

    #[test]
    fn summary_averages_every_metric() {
        let rows = vec![
            ProcMetrics::from_record(&completed_record(4, 0, 0, 4)),
            ProcMetrics::from_record(&completed_record(2, 0, 4, 6)),
        ];
        let summary = MetricsSummary::from_metrics(&rows).unwrap();

        assert_eq!(summary.count, 2);
        assert_eq!(summary.avg_waiting, 2.0);
        assert_eq!(summary.avg_completion, 5.0);
        assert_eq!(summary.avg_response, 2.0);
        assert_eq!(summary.avg_turnaround, 5.0);
    }

    #[test]
    fn summary_of_nothing_is_none() {
        assert_eq!(MetricsSummary::from_metrics(&[]), None);
    }
}
