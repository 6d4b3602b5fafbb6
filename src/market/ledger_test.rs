use super::*;

#[test]
fn summary_headline_numbers() {
    let s = summary();
    assert!((s.balance - 47.8).abs() < f64::EPSILON);
    assert!((s.total_earned - 156.3).abs() < f64::EPSILON);
    assert!((s.total_spent - 108.5).abs() < f64::EPSILON);
}

#[test]
fn history_has_six_entries_with_matching_signs() {
    let entries = history();
    assert_eq!(entries.len(), 6);
    for entry in entries {
        match entry.kind {
            EntryKind::Earning => assert!(entry.amount > 0.0, "earning {} must be positive", entry.id),
            EntryKind::Spending => assert!(entry.amount < 0.0, "spending {} must be negative", entry.id),
        }
    }
}

#[test]
fn format_amount_signs_earnings_explicitly() {
    assert_eq!(format_amount(12.5), "+12.5");
    assert_eq!(format_amount(-8.2), "-8.2");
    assert_eq!(format_amount(0.0), "+0.0");
}

#[test]
fn format_amount_rounds_to_one_decimal() {
    assert_eq!(format_amount(1.25), "+1.2");
    assert_eq!(format_amount(-1.26), "-1.3");
}
