//! Dashboard totals and date formatting for history rows.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

use crate::model::generation::GenerationJob;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardStats {
    pub total_templates: usize,
    pub total_cards: u64,
    pub cards_this_month: u64,
}

/// Sums generated cards over the whole history and over `year`/`month`
/// (1-based).
pub fn compute(templates: usize, history: &[GenerationJob], year: i32, month: u32) -> DashboardStats {
    let mut stats = DashboardStats { total_templates: templates, ..Default::default() };
    for job in history {
        stats.total_cards += job.generated_cards;
        let in_month = job
            .created_at
            .as_deref()
            .and_then(parse_timestamp)
            .is_some_and(|at| at.year() == year && at.month() == month);
        if in_month {
            stats.cards_this_month += job.generated_cards;
        }
    }
    stats
}

/// Accepts RFC 3339 and the naive ISO form the backend emits without an
/// offset. Bare dates are read as midnight.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.naive_utc());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// `Mar 4, 2025`; unparseable input is shown as received.
pub fn format_date(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(at) => at.format("%b %-d, %Y").to_string(),
        None => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::generation::JobStatus;
    use pretty_assertions::assert_eq;

    fn job(cards: u64, created_at: Option<&str>) -> GenerationJob {
        GenerationJob {
            id: cards.to_string(),
            template_name: "Staff".into(),
            data_file_name: "staff.csv".into(),
            generated_cards: cards,
            total_cards: cards,
            status: JobStatus::Completed,
            created_at: created_at.map(str::to_string),
            pdf_url: None,
        }
    }

    #[test]
    fn monthly_total_only_counts_current_month() {
        let history = vec![
            job(10, Some("2025-03-02T10:00:00")),
            job(5, Some("2025-03-31T23:59:59.123456")),
            job(7, Some("2025-02-28T12:00:00Z")),
            job(3, Some("2024-03-15T08:00:00+00:00")),
            job(2, None),
        ];
        let stats = compute(4, &history, 2025, 3);
        assert_eq!(
            stats,
            DashboardStats { total_templates: 4, total_cards: 27, cards_this_month: 15 }
        );
    }

    #[test]
    fn timestamps_in_several_shapes() {
        assert!(parse_timestamp("2025-03-02T10:00:00").is_some());
        assert!(parse_timestamp("2025-03-02 10:00:00").is_some());
        assert!(parse_timestamp("2025-03-02T10:00:00.5+05:30").is_some());
        assert!(parse_timestamp("2025-03-02").is_some());
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn dates_render_short_month() {
        assert_eq!(format_date("2025-03-04T10:00:00"), "Mar 4, 2025");
        assert_eq!(format_date("n/a"), "n/a");
    }
}
