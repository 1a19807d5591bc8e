//! Shift validation behaviour on in-memory sheets

use pretty_assertions::assert_eq;
use shift_checker::core::tokens::{count_day_tokens, normalize_day_tokens};
use shift_checker::core::{ShiftValidator, Validity};
use shift_checker::types::{CellValue, Sheet};

fn shift_data(rows: Vec<(&str, CellValue, CellValue)>) -> Sheet {
    let mut sheet = Sheet::new(
        "Shift_Data",
        vec![
            "Enterprise id".to_string(),
            "Shift B dates".to_string(),
            "Shift C dates".to_string(),
        ],
    );
    for (id, b, c) in rows {
        sheet.push_row(vec![CellValue::from(id), b, c]);
    }
    sheet
}

fn time_entries(rows: Vec<(&str, CellValue)>) -> Sheet {
    let mut sheet = Sheet::new(
        "FG",
        vec!["Email".to_string(), "Time Entry Date".to_string()],
    );
    for (email, date) in rows {
        sheet.push_row(vec![CellValue::from(email), date]);
    }
    sheet
}

fn text(s: &str) -> CellValue {
    CellValue::from(s)
}

// ═══════════════════════════════════════════════════════════════════════════
// CLAIM CELLS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_blank_shift_b_is_valid_empty() {
    let report = ShiftValidator::default()
        .validate(
            &shift_data(vec![("abc", text("   "), text("1"))]),
            &time_entries(vec![("abc@x.com", text("2024-01-01"))]),
        )
        .unwrap();

    let record = &report.records[0];
    assert_eq!(record.shift_b.validity, Validity::Empty);
    assert!(record.shift_b.missing_days.is_empty());
    assert_eq!(record.shift_c.validity, Validity::Valid);
    assert_ne!(record.shift_b.validity, record.shift_c.validity);
}

#[test]
fn test_zero_padded_claim_reports_missing_day() {
    assert_eq!(normalize_day_tokens("01,02,3"), vec!["1", "2", "3"]);

    let report = ShiftValidator::default()
        .validate(
            &shift_data(vec![("abc", text("01,02,3"), CellValue::Empty)]),
            &time_entries(vec![
                ("abc@x.com", text("2024-05-01")),
                ("abc@x.com", text("2024-05-02")),
            ]),
        )
        .unwrap();

    let shift_b = &report.records[0].shift_b;
    assert_eq!(shift_b.missing_days, vec!["3"]);
    assert_eq!(shift_b.validity, Validity::Invalid);
}

#[test]
fn test_token_count_keeps_zero_padding() {
    assert_eq!(count_day_tokens("01,02"), 2);

    let report = ShiftValidator::default()
        .validate(
            &shift_data(vec![("abc", text("01,02"), text("00"))]),
            &time_entries(vec![]),
        )
        .unwrap();
    assert_eq!(report.records[0].shift_b.total_days, 2);
    // "00" counts as a token but normalizes to nothing to check
    assert_eq!(report.records[0].shift_c.total_days, 1);
    assert_eq!(report.records[0].shift_c.validity, Validity::Valid);
}

#[test]
fn test_non_numeric_tokens_compare_literally() {
    let report = ShiftValidator::default()
        .validate(
            &shift_data(vec![("abc", text("1,x"), CellValue::Empty)]),
            &time_entries(vec![("abc@x.com", text("2024-05-01"))]),
        )
        .unwrap();
    assert_eq!(report.records[0].shift_b.missing_days, vec!["x"]);
}

// ═══════════════════════════════════════════════════════════════════════════
// IDENTIFIER MATCHING
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_identifier_is_case_insensitive_substring() {
    let report = ShiftValidator::default()
        .validate(
            &shift_data(vec![("abc", text("4"), CellValue::Empty)]),
            &time_entries(vec![("ABC123@x.com", text("2024-05-04"))]),
        )
        .unwrap();
    assert_eq!(report.records[0].shift_b.validity, Validity::Valid);
}

#[test]
fn test_identifier_prefix_matches_other_employee() {
    let report = ShiftValidator::default()
        .validate(
            &shift_data(vec![("E123", text("6"), CellValue::Empty)]),
            &time_entries(vec![("e1234@x.com", text("2024-05-06"))]),
        )
        .unwrap();
    assert_eq!(report.records[0].shift_b.validity, Validity::Valid);
}

#[test]
fn test_other_employees_days_do_not_count() {
    let report = ShiftValidator::default()
        .validate(
            &shift_data(vec![("abc", text("6"), CellValue::Empty)]),
            &time_entries(vec![("xyz@x.com", text("2024-05-06"))]),
        )
        .unwrap();
    assert_eq!(report.records[0].shift_b.missing_days, vec!["6"]);
}

#[test]
fn test_numeric_identifier() {
    let mut shifts = shift_data(vec![]);
    shifts.push_row(vec![CellValue::Number(1042.0), text("2"), CellValue::Empty]);

    let report = ShiftValidator::default()
        .validate(
            &shifts,
            &time_entries(vec![("emp1042@x.com", text("2024-05-02"))]),
        )
        .unwrap();
    assert_eq!(report.records[0].enterprise_id, "1042");
    assert_eq!(report.records[0].shift_b.validity, Validity::Valid);
}

// ═══════════════════════════════════════════════════════════════════════════
// TIME ENTRY DATES
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_unparseable_dates_never_match() {
    let report = ShiftValidator::default()
        .validate(
            &shift_data(vec![("abc", text("1"), CellValue::Empty)]),
            &time_entries(vec![
                ("abc@x.com", text("first of May")),
                ("abc@x.com", CellValue::Empty),
                ("abc@x.com", CellValue::Bool(true)),
            ]),
        )
        .unwrap();
    assert_eq!(report.records[0].shift_b.validity, Validity::Invalid);
    assert_eq!(report.stats.unparseable_dates, 2);
}

#[test]
fn test_serial_and_text_dates_both_match() {
    let report = ShiftValidator::default()
        .validate(
            &shift_data(vec![("abc", text("4,5"), CellValue::Empty)]),
            &time_entries(vec![
                ("abc@x.com", CellValue::Number(45355.0)),
                ("abc@x.com", text("03/05/2024")),
            ]),
        )
        .unwrap();
    assert_eq!(report.records[0].shift_b.validity, Validity::Valid);
}

// ═══════════════════════════════════════════════════════════════════════════
// SUMMARY
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_summary_totals() {
    let report = ShiftValidator::default()
        .validate(
            &shift_data(vec![
                ("abc", text("1,2"), text("3")),
                ("abc", text("4,5,6"), CellValue::Empty),
                ("xyz", CellValue::Empty, text("07.08")),
            ]),
            &time_entries(vec![]),
        )
        .unwrap();

    assert_eq!(report.summary.total_resources, 2);
    assert_eq!(report.summary.total_shift_b_days, 5);
    assert_eq!(report.summary.total_shift_c_days, 3);

    let row_sum: usize = report.records.iter().map(|r| r.shift_b.total_days).sum();
    assert_eq!(report.summary.total_shift_b_days, row_sum);
}

#[test]
fn test_empty_claim_sheet() {
    let report = ShiftValidator::default()
        .validate(&shift_data(vec![]), &time_entries(vec![]))
        .unwrap();
    assert!(report.records.is_empty());
    assert_eq!(report.summary.total_resources, 0);
    assert_eq!(report.annotated_sheet("Shift Data").row_count(), 0);
    assert_eq!(report.summary_sheet("Summary").row_count(), 1);
}

#[test]
fn test_repeat_runs_are_identical() {
    let shifts = shift_data(vec![("abc", text("1,2,3"), text("9"))]);
    let entries = time_entries(vec![("abc@x.com", text("2024-05-02"))]);
    let validator = ShiftValidator::default();

    assert_eq!(
        validator.validate(&shifts, &entries).unwrap(),
        validator.validate(&shifts, &entries).unwrap()
    );
}
