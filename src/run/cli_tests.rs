#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;
use crate::models::CategoryId;

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_parse_summary_args() {
    let parsed = parse_summary_args(&args(&[
        "--salary",
        "2000",
        "--preset",
        "50",
        "30",
        "20",
        "--spend",
        "utilities:100:power",
    ]))
    .unwrap();
    assert_eq!(parsed.salary.as_deref(), Some("2000"));
    assert_eq!(
        parsed.preset,
        Some(["50".to_string(), "30".to_string(), "20".to_string()])
    );
    assert_eq!(parsed.spends, vec!["utilities:100:power".to_string()]);
}

#[test]
fn test_parse_summary_args_errors() {
    assert!(parse_summary_args(&args(&["--salary"])).is_err());
    assert!(parse_summary_args(&args(&["--preset", "50", "30"])).is_err());
    assert!(parse_summary_args(&args(&["--bogus"])).is_err());
    assert!(parse_summary_args(&args(&[
        "--preset", "1", "2", "3", "--category", "Rent:10"
    ]))
    .is_err());
}

#[test]
fn test_parse_category_arg() {
    let input = parse_category_arg("Rent:40:#ff0000").unwrap();
    assert_eq!(input.name, "Rent");
    assert_eq!(input.percentage, dec!(40));
    assert_eq!(input.color, "#FF0000");

    let input = parse_category_arg("Fun:12.5").unwrap();
    assert_eq!(input.color, DEFAULT_COLOR);

    let input = parse_category_arg("Time:Off:5").unwrap();
    assert_eq!(input.name, "Time:Off");
    assert_eq!(input.percentage, dec!(5));

    assert_eq!(
        parse_category_arg("Rent:40:#zz0000").unwrap_err(),
        AllocationError::InvalidColor("#zz0000".into())
    );
    assert!(matches!(
        parse_category_arg("Rent:140").unwrap_err(),
        AllocationError::InvalidPercentage(_)
    ));
}

#[test]
fn test_parse_category_arg_color_without_hash() {
    assert_eq!(
        parse_category_arg("Rent:40:red").unwrap_err(),
        AllocationError::InvalidColor("red".into())
    );
    assert!(matches!(
        parse_category_arg("Rent:Home:abc").unwrap_err(),
        AllocationError::InvalidPercentage(_)
    ));
}

#[test]
fn test_build_session_preset_with_spending() {
    let parsed = parse_summary_args(&args(&[
        "--salary",
        "$2,000",
        "--preset",
        "50",
        "30",
        "20",
        "--spend",
        "Utilities:100:electric",
    ]))
    .unwrap();
    let session = build_session(&parsed).unwrap();
    let budget = session.budget().unwrap();
    assert_eq!(budget.percentage(CategoryId(0)), Some(dec!(45)));
    assert_eq!(budget.running_salary(), dec!(1900));
    assert_eq!(session.ledger().entries()[0].reason, "electric");
}

#[test]
fn test_build_session_requires_salary() {
    let parsed = parse_summary_args(&args(&["--preset", "50", "30", "20"])).unwrap();
    let err = build_session(&parsed).err().unwrap();
    assert!(err.to_string().contains("--salary"));
}

#[test]
fn test_build_session_personalized_without_categories() {
    let parsed = parse_summary_args(&args(&["--salary", "1500"])).unwrap();
    let err = build_session(&parsed).err().unwrap();
    assert_eq!(
        err.downcast_ref::<AllocationError>(),
        Some(&AllocationError::NoCategoriesProvided)
    );
}

#[test]
fn test_spend_unknown_category() {
    let parsed = parse_summary_args(&args(&[
        "--salary",
        "1000",
        "--category",
        "Rent:50",
        "--spend",
        "Food:10",
    ]))
    .unwrap();
    let err = build_session(&parsed).err().unwrap();
    assert_eq!(
        err.downcast_ref::<AllocationError>(),
        Some(&AllocationError::UnknownCategory("Food".into()))
    );
}

#[test]
fn test_spend_on_name_with_colon() {
    let parsed = parse_summary_args(&args(&[
        "--salary",
        "1000",
        "--category",
        "Rent:Home:40",
        "--category",
        "Rent:10",
        "--spend",
        "Rent:Home:10:deposit",
        "--spend",
        "rent:5",
    ]))
    .unwrap();
    let session = build_session(&parsed).unwrap();
    let budget = session.budget().unwrap();
    assert_eq!(budget.categories()[0].name, "Rent:Home");
    assert_eq!(budget.percentage(CategoryId(0)), Some(dec!(39)));
    assert_eq!(budget.percentage(CategoryId(1)), Some(dec!(9.5)));
    let entries = session.ledger().entries();
    assert_eq!(entries[0].category_name, "Rent:Home");
    assert_eq!(entries[0].reason, "deposit");
    assert_eq!(entries[1].category_name, "Rent");
}

#[test]
fn test_spend_over_allocation() {
    let parsed = parse_summary_args(&args(&[
        "--salary",
        "1000",
        "--category",
        "Rent:50",
        "--spend",
        "rent:600",
    ]))
    .unwrap();
    let err = build_session(&parsed).err().unwrap();
    assert!(matches!(
        err.downcast_ref::<AllocationError>(),
        Some(AllocationError::InsufficientAllocation { .. })
    ));
}

#[test]
fn test_summary_lines() {
    let parsed = parse_summary_args(&args(&[
        "--salary",
        "2000",
        "--category",
        "Rent:40:#FF0000",
        "--spend",
        "Rent:200:March",
    ]))
    .unwrap();
    let session = build_session(&parsed).unwrap();
    let lines = summary_lines(&session);
    assert!(lines[0].contains("Personalized"));
    assert!(lines.iter().any(|l| l.starts_with("Rent") && l.contains("30%")));
    assert!(lines.iter().any(|l| l.contains("$600.00") && l.contains("#FF0000")));
    assert!(lines.iter().any(|l| l.contains("March")));
    assert!(lines.iter().any(|l| l.contains("Monthly Salary:   $2,000.00")));
    assert!(lines.iter().any(|l| l.contains("Funds Available:  $1,800.00")));
}

#[test]
fn test_shellexpand() {
    assert_eq!(shellexpand("/tmp/x.log"), "/tmp/x.log");
    let expanded = shellexpand("~/x.log");
    assert!(expanded.ends_with("/x.log"));
    assert!(!expanded.starts_with('~'));
}
