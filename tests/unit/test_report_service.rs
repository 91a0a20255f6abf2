#[cfg(test)]
mod tests {
    use automation_tracker_api::models::{Automation, Maintenance};
    use automation_tracker_api::services::report_service::{
        CHART_COLORS, MonthlyBucket, distribution_by_automation, monthly_histogram,
        thirty_day_snapshot, trend_percentage,
    };
    use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn record(name: &str, date: Option<DateTime<Utc>>) -> Maintenance {
        let automation = Automation::new(name.to_string(), None);
        Maintenance::new(automation, None, date)
    }

    /// Same automation instance shared across records, the way a real query
    /// result joins one machine onto many rows.
    fn records_for(automation: &Automation, dates: &[DateTime<Utc>]) -> Vec<Maintenance> {
        dates
            .iter()
            .map(|d| Maintenance::new(automation.clone(), None, Some(*d)))
            .collect()
    }

    fn orphan_record(date: DateTime<Utc>) -> Maintenance {
        let mut maintenance = record("temp", Some(date));
        maintenance.automation = None;
        maintenance
    }

    fn bucket(month: &str, year: i32, maintenance: u64) -> MonthlyBucket {
        MonthlyBucket {
            month: month.to_string(),
            year,
            maintenance,
        }
    }

    #[test]
    fn test_histogram_spans_six_months_across_year_boundary() {
        let today = NaiveDate::from_ymd_opt(2026, 2, 15).unwrap();
        let buckets = monthly_histogram(&[], today);

        assert_eq!(buckets.len(), 6);
        assert_eq!(buckets[0], bucket("September", 2025, 0));
        assert_eq!(buckets[1], bucket("October", 2025, 0));
        assert_eq!(buckets[2], bucket("November", 2025, 0));
        assert_eq!(buckets[3], bucket("December", 2025, 0));
        assert_eq!(buckets[4], bucket("January", 2026, 0));
        assert_eq!(buckets[5], bucket("February", 2026, 0));
    }

    #[test]
    fn test_histogram_counts_by_month_and_year() {
        let today = NaiveDate::from_ymd_opt(2026, 6, 15).unwrap();
        let records = vec![
            record("A", Some(at(2026, 6, 1))),
            record("A", Some(at(2026, 6, 20))),
            record("B", Some(at(2026, 4, 3))),
            // Same month name, wrong year: must not be absorbed
            record("B", Some(at(2025, 6, 3))),
            // Outside the window entirely
            record("C", Some(at(2025, 11, 3))),
            // Undated records never count
            record("C", None),
        ];

        let buckets = monthly_histogram(&records, today);
        assert_eq!(buckets[5], bucket("June", 2026, 2));
        assert_eq!(buckets[3], bucket("April", 2026, 1));
        let total: u64 = buckets.iter().map(|b| b.maintenance).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn test_trend_rises_fifty_percent() {
        let buckets = vec![bucket("May", 2026, 10), bucket("June", 2026, 15)];
        assert_eq!(trend_percentage(&buckets), 50.0);
    }

    #[test]
    fn test_trend_is_zero_when_previous_month_empty() {
        let buckets = vec![bucket("May", 2026, 0), bucket("June", 2026, 5)];
        assert_eq!(trend_percentage(&buckets), 0.0);
    }

    #[test]
    fn test_trend_is_zero_with_fewer_than_two_buckets() {
        assert_eq!(trend_percentage(&[]), 0.0);
        assert_eq!(trend_percentage(&[bucket("June", 2026, 9)]), 0.0);
    }

    #[test]
    fn test_trend_rounds_to_one_decimal() {
        let buckets = vec![bucket("May", 2026, 3), bucket("June", 2026, 4)];
        assert_eq!(trend_percentage(&buckets), 33.3);

        let buckets = vec![bucket("May", 2026, 4), bucket("June", 2026, 3)];
        assert_eq!(trend_percentage(&buckets), -25.0);
    }

    #[test]
    fn test_distribution_collapses_tail_into_others() {
        let date = at(2026, 6, 1);
        let mut records = Vec::new();
        for (name, count) in [("A", 10), ("B", 8), ("C", 6), ("D", 4), ("E", 2), ("F", 1)] {
            let automation = Automation::new(name.to_string(), None);
            records.extend(records_for(&automation, &vec![date; count]));
        }

        let distribution = distribution_by_automation(&records);

        assert_eq!(distribution.total, 31);
        assert_eq!(distribution.buckets.len(), 5);
        let names: Vec<&str> = distribution.buckets.iter().map(|b| b.system.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C", "D", "Others"]);
        // Others absorbs everything past the top four
        assert_eq!(distribution.buckets[4].maintenance, 3);
    }

    #[test]
    fn test_distribution_five_distinct_names_keeps_all() {
        let date = at(2026, 6, 1);
        let mut records = Vec::new();
        for name in ["A", "B", "C", "D", "E"] {
            let automation = Automation::new(name.to_string(), None);
            records.extend(records_for(&automation, &[date]));
        }

        let distribution = distribution_by_automation(&records);
        assert_eq!(distribution.buckets.len(), 5);
        assert!(distribution.buckets.iter().all(|b| b.system != "Others"));
    }

    #[test]
    fn test_distribution_orders_by_count_then_name() {
        let date = at(2026, 6, 1);
        let zeta = Automation::new("Zeta".to_string(), None);
        let alpha = Automation::new("Alpha".to_string(), None);
        let mid = Automation::new("Mid".to_string(), None);

        let mut records = records_for(&mid, &[date, date]);
        records.extend(records_for(&zeta, &[date]));
        records.extend(records_for(&alpha, &[date]));

        let distribution = distribution_by_automation(&records);
        let names: Vec<&str> = distribution.buckets.iter().map(|b| b.system.as_str()).collect();
        assert_eq!(names, vec!["Mid", "Alpha", "Zeta"]);
    }

    #[test]
    fn test_distribution_assigns_palette_by_index() {
        let date = at(2026, 6, 1);
        let mut records = Vec::new();
        for (i, name) in ["A", "B", "C"].iter().enumerate() {
            let automation = Automation::new(name.to_string(), None);
            records.extend(records_for(&automation, &vec![date; 3 - i]));
        }

        let distribution = distribution_by_automation(&records);
        for (i, slice) in distribution.buckets.iter().enumerate() {
            assert_eq!(slice.fill, CHART_COLORS[i]);
        }
    }

    #[test]
    fn test_distribution_skips_orphaned_records() {
        let date = at(2026, 6, 1);
        let automation = Automation::new("Solo".to_string(), None);
        let mut records = records_for(&automation, &[date]);
        records.push(orphan_record(date));

        let distribution = distribution_by_automation(&records);
        assert_eq!(distribution.buckets.len(), 1);
        assert_eq!(distribution.total, 1);
    }

    #[test]
    fn test_distribution_of_nothing_is_empty() {
        let distribution = distribution_by_automation(&[]);
        assert!(distribution.buckets.is_empty());
        assert_eq!(distribution.total, 0);
    }

    #[test]
    fn test_snapshot_counts_window_only() {
        let today = at(2026, 6, 30);
        let press = Automation::new("Press".to_string(), None);
        let oven = Automation::new("Oven".to_string(), None);

        let mut records = records_for(&press, &[at(2026, 6, 10), at(2026, 6, 20), at(2026, 6, 25)]);
        records.extend(records_for(&oven, &[at(2026, 6, 15)]));
        // Older than 30 days, excluded
        records.extend(records_for(&press, &[at(2026, 4, 1)]));

        let snapshot = thirty_day_snapshot(&records, today);
        assert_eq!(snapshot.total_maintenance, 4);
        assert_eq!(snapshot.automations_serviced, 2);
        assert_eq!(snapshot.efficiency, Some(2.0));
        assert_eq!(snapshot.most_maintained.as_deref(), Some("Press"));
        assert_eq!(snapshot.efficiency_label(), "2/month");
        assert_eq!(snapshot.most_maintained_label(), "Press");
    }

    #[test]
    fn test_snapshot_efficiency_rounds_to_one_decimal() {
        let today = at(2026, 6, 30);
        let press = Automation::new("Press".to_string(), None);
        let oven = Automation::new("Oven".to_string(), None);
        let lathe = Automation::new("Lathe".to_string(), None);

        let mut records = records_for(&press, &[at(2026, 6, 10), at(2026, 6, 11)]);
        records.extend(records_for(&oven, &[at(2026, 6, 12), at(2026, 6, 13)]));
        records.extend(records_for(&lathe, &[at(2026, 6, 14)]));

        let snapshot = thirty_day_snapshot(&records, today);
        // 5 events over 3 machines
        assert_eq!(snapshot.efficiency, Some(1.7));
    }

    #[test]
    fn test_snapshot_of_empty_window_degrades_to_labels() {
        let snapshot = thirty_day_snapshot(&[], at(2026, 6, 30));
        assert_eq!(snapshot.total_maintenance, 0);
        assert_eq!(snapshot.automations_serviced, 0);
        assert_eq!(snapshot.efficiency, None);
        assert_eq!(snapshot.efficiency_label(), "N/A");
        assert_eq!(snapshot.most_maintained_label(), "N/A");
    }

    #[test]
    fn test_snapshot_with_only_orphans_reports_none() {
        let today = at(2026, 6, 30);
        let records = vec![orphan_record(at(2026, 6, 10))];

        let snapshot = thirty_day_snapshot(&records, today);
        assert_eq!(snapshot.total_maintenance, 1);
        assert_eq!(snapshot.automations_serviced, 0);
        assert_eq!(snapshot.efficiency, None);
        assert_eq!(snapshot.most_maintained_label(), "None");
    }

    #[test]
    fn test_snapshot_window_boundary_is_thirty_days() {
        let today = at(2026, 6, 30);
        let press = Automation::new("Press".to_string(), None);

        let inside = today - Duration::days(30);
        let outside = today - Duration::days(30) - Duration::seconds(1);
        let records = records_for(&press, &[inside, outside]);

        let snapshot = thirty_day_snapshot(&records, today);
        assert_eq!(snapshot.total_maintenance, 1);
    }
}
