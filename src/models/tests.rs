#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

fn standard_preset() -> Budget {
    Budget::preset(dec!(2000), dec!(50), dec!(30), dec!(20)).unwrap()
}

fn id_of(budget: &Budget, name: &str) -> CategoryId {
    budget.find_by_name(name).unwrap().id
}

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
}

// ── Budget::build ─────────────────────────────────────────────

#[test]
fn test_preset_scenario() {
    let budget = standard_preset();
    let cats = budget.categories();
    assert_eq!(cats.len(), 3);

    let expected = [
        ("Utilities", dec!(50), dec!(1000)),
        ("Savings", dec!(30), dec!(600)),
        ("Personal Needs", dec!(20), dec!(400)),
    ];
    for (cat, (name, pct, dollars)) in cats.iter().zip(expected) {
        assert_eq!(cat.name, name);
        assert_eq!(budget.percentage(cat.id), Some(pct));
        assert_eq!(budget.allocated_amount(cat.id), Some(dollars));
    }
    assert_eq!(budget.original_salary(), dec!(2000));
    assert_eq!(budget.running_salary(), dec!(2000));
    assert_eq!(budget.mode(), AllocationMode::Preset);
}

#[test]
fn test_preset_colors() {
    let budget = standard_preset();
    let colors: Vec<&str> = budget.categories().iter().map(|c| c.color.as_str()).collect();
    assert_eq!(colors, vec!["#007BFF", "#FADADD", "#FFC107"]);
}

#[test]
fn test_preset_skips_zero_buckets() {
    let budget = Budget::preset(dec!(1000), dec!(0), dec!(40), dec!(0)).unwrap();
    assert_eq!(budget.categories().len(), 1);
    assert_eq!(budget.categories()[0].name, "Savings");
    assert_eq!(budget.categories()[0].id, CategoryId(0));
}

#[test]
fn test_preset_all_zero_builds_empty() {
    let budget = Budget::preset(dec!(1000), dec!(0), dec!(0), dec!(0)).unwrap();
    assert!(budget.categories().is_empty());
}

#[test]
fn test_total_over_100_allowed() {
    let budget = Budget::preset(dec!(1000), dec!(100), dec!(100), dec!(100)).unwrap();
    assert_eq!(budget.total_percentage(), dec!(300));
}

#[test]
fn test_personalized_keeps_zero_entries() {
    let budget = Budget::personalized(
        dec!(3000),
        vec![
            CategoryInput::new("Rent", dec!(40), "#FF0000"),
            CategoryInput::new("Fun", dec!(0), "#00FF00"),
        ],
    )
    .unwrap();
    assert_eq!(budget.categories().len(), 2);
    assert_eq!(budget.allocated_amount(id_of(&budget, "rent")), Some(dec!(1200)));
    assert_eq!(budget.mode(), AllocationMode::Personalized);
}

#[test]
fn test_personalized_trims_names() {
    let budget = Budget::personalized(
        dec!(100),
        vec![CategoryInput::new("  Rent ", dec!(10), "#FF0000")],
    )
    .unwrap();
    assert_eq!(budget.categories()[0].name, "Rent");
}

#[test]
fn test_build_rejects_bad_salary() {
    for salary in [dec!(0), dec!(-1), MAX_SALARY + Decimal::ONE, Decimal::MAX] {
        let err = Budget::preset(salary, dec!(10), dec!(10), dec!(10)).unwrap_err();
        assert_eq!(err, AllocationError::InvalidSalary);
    }
}

#[test]
fn test_build_rejects_out_of_range_percentage() {
    let err = Budget::preset(dec!(1000), dec!(101), dec!(0), dec!(0)).unwrap_err();
    assert!(matches!(err, AllocationError::InvalidPercentage(_)));

    let err = Budget::personalized(
        dec!(1000),
        vec![CategoryInput::new("Rent", dec!(-5), "#FF0000")],
    )
    .unwrap_err();
    assert!(matches!(err, AllocationError::InvalidPercentage(_)));
}

#[test]
fn test_build_rejects_empty_name() {
    let err = Budget::personalized(
        dec!(1000),
        vec![CategoryInput::new("   ", dec!(5), "#FF0000")],
    )
    .unwrap_err();
    assert_eq!(err, AllocationError::EmptyCategoryName);
}

#[test]
fn test_build_rejects_no_personalized_categories() {
    let err = Budget::personalized(dec!(1000), Vec::new()).unwrap_err();
    assert_eq!(err, AllocationError::NoCategoriesProvided);
}

#[test]
fn test_build_rejects_duplicate_names() {
    let err = Budget::personalized(
        dec!(1000),
        vec![
            CategoryInput::new("Food", dec!(5), "#FF0000"),
            CategoryInput::new("food", dec!(5), "#00FF00"),
        ],
    )
    .unwrap_err();
    assert_eq!(err, AllocationError::DuplicateCategoryName("food".into()));
}

#[test]
fn test_salary_checked_before_categories() {
    let err = Budget::personalized(dec!(0), Vec::new()).unwrap_err();
    assert_eq!(err, AllocationError::InvalidSalary);
}

// ── record / reverse ──────────────────────────────────────────

#[test]
fn test_record_spending_scenario() {
    let mut budget = standard_preset();
    let utilities = id_of(&budget, "Utilities");
    let updated = budget.record_spending(utilities, dec!(100)).unwrap();
    assert_eq!(updated, dec!(45));
    assert_eq!(budget.percentage(utilities), Some(dec!(45)));
    assert_eq!(budget.running_salary(), dec!(1900));
    assert_eq!(budget.original_salary(), dec!(2000));
}

#[test]
fn test_record_spending_insufficient() {
    let mut budget = standard_preset();
    let utilities = id_of(&budget, "Utilities");
    let err = budget.record_spending(utilities, dec!(1500)).unwrap_err();
    assert!(matches!(
        err,
        AllocationError::InsufficientAllocation { ref category, .. } if category == "Utilities"
    ));
    assert_eq!(budget.percentage(utilities), Some(dec!(50)));
    assert_eq!(budget.running_salary(), dec!(2000));
}

#[test]
fn test_record_spending_exact_allocation() {
    let mut budget = standard_preset();
    let needs = id_of(&budget, "Personal Needs");
    let updated = budget.record_spending(needs, dec!(400)).unwrap();
    assert_eq!(updated, Decimal::ZERO);
    let err = budget.record_spending(needs, dec!(0.01)).unwrap_err();
    assert!(matches!(err, AllocationError::InsufficientAllocation { .. }));
}

#[test]
fn test_record_spending_rejects_non_positive() {
    let mut budget = standard_preset();
    let savings = id_of(&budget, "Savings");
    assert_eq!(
        budget.record_spending(savings, dec!(0)).unwrap_err(),
        AllocationError::InvalidAmount
    );
    assert_eq!(
        budget.record_spending(savings, dec!(-3)).unwrap_err(),
        AllocationError::InvalidAmount
    );
}

#[test]
fn test_record_spending_unknown_category() {
    let mut budget = standard_preset();
    let err = budget.record_spending(CategoryId(42), dec!(1)).unwrap_err();
    assert!(matches!(err, AllocationError::UnknownCategory(_)));
}

#[test]
fn test_record_then_reverse_round_trip() {
    let amounts = [dec!(0.01), dec!(1), dec!(33.33), dec!(333.37), dec!(999.99), dec!(1000)];
    for amt in amounts {
        let mut budget = standard_preset();
        let utilities = id_of(&budget, "Utilities");
        let before_pct = budget.percentage(utilities).unwrap();
        let before_salary = budget.running_salary();

        budget.record_spending(utilities, amt).unwrap();
        budget.reverse_spending(utilities, amt).unwrap();

        assert_eq!(budget.percentage(utilities).unwrap(), before_pct, "amount {amt}");
        assert_eq!(budget.running_salary(), before_salary, "amount {amt}");
    }
}

#[test]
fn test_round_trip_with_awkward_salary() {
    let mut budget = Budget::preset(dec!(3000), dec!(33.3), dec!(0), dec!(0)).unwrap();
    let utilities = id_of(&budget, "Utilities");
    budget.record_spending(utilities, dec!(1)).unwrap();
    budget.reverse_spending(utilities, dec!(1)).unwrap();
    assert_eq!(budget.percentage(utilities), Some(dec!(33.3)));
}

#[test]
fn test_spending_at_largest_salary() {
    let mut budget = Budget::preset(MAX_SALARY, dec!(100), dec!(100), dec!(100)).unwrap();
    let mut ledger = Ledger::new();
    let ids: Vec<_> = budget.categories().iter().map(|c| c.id).collect();
    for id in ids {
        ledger
            .record(&mut budget, day(), "all of it", id, MAX_SALARY)
            .unwrap();
        assert_eq!(budget.percentage(id), Some(dec!(0)));
    }
    assert_eq!(budget.running_salary(), MAX_SALARY * dec!(-2));
    assert_eq!(ledger.total_spent(), MAX_SALARY * dec!(3));

    ledger.reverse_all(&mut budget).unwrap();
    assert_eq!(budget.running_salary(), MAX_SALARY);
}

// ── Ledger ────────────────────────────────────────────────────

#[test]
fn test_ledger_record_and_remove() {
    let mut budget = standard_preset();
    let mut ledger = Ledger::new();
    let utilities = id_of(&budget, "Utilities");

    let id = ledger
        .record(&mut budget, day(), " Electric bill ", utilities, dec!(100))
        .unwrap()
        .id;
    assert_eq!(ledger.len(), 1);
    let entry = ledger.get(id).unwrap();
    assert_eq!(entry.reason, "Electric bill");
    assert_eq!(entry.category_name, "Utilities");
    assert_eq!(ledger.total_spent(), dec!(100));
    assert_eq!(budget.running_salary(), dec!(1900));

    let removed = ledger.remove(&mut budget, id).unwrap();
    assert_eq!(removed.amount, dec!(100));
    assert!(ledger.is_empty());
    assert_eq!(budget.percentage(utilities), Some(dec!(50)));
    assert_eq!(budget.running_salary(), dec!(2000));
}

#[test]
fn test_ledger_rejected_spend_not_recorded() {
    let mut budget = standard_preset();
    let mut ledger = Ledger::new();
    let savings = id_of(&budget, "Savings");
    assert!(ledger
        .record(&mut budget, day(), "Car", savings, dec!(601))
        .is_err());
    assert!(ledger.is_empty());
    assert_eq!(budget.running_salary(), dec!(2000));
}

#[test]
fn test_ledger_ids_are_unique_after_removal() {
    let mut budget = standard_preset();
    let mut ledger = Ledger::new();
    let savings = id_of(&budget, "Savings");
    let first = ledger.record(&mut budget, day(), "a", savings, dec!(1)).unwrap().id;
    ledger.remove(&mut budget, first).unwrap();
    let second = ledger.record(&mut budget, day(), "b", savings, dec!(1)).unwrap().id;
    assert_ne!(first, second);
}

#[test]
fn test_ledger_remove_unknown() {
    let mut budget = standard_preset();
    let mut ledger = Ledger::new();
    assert_eq!(
        ledger.remove(&mut budget, EntryId(7)).unwrap_err(),
        AllocationError::UnknownEntry(7)
    );
}

#[test]
fn test_ledger_reverse_all() {
    let mut budget = standard_preset();
    let mut ledger = Ledger::new();
    let utilities = id_of(&budget, "Utilities");
    let savings = id_of(&budget, "Savings");
    ledger.record(&mut budget, day(), "", utilities, dec!(250)).unwrap();
    ledger.record(&mut budget, day(), "", savings, dec!(12.5)).unwrap();

    assert_eq!(ledger.reverse_all(&mut budget).unwrap(), 2);
    assert!(ledger.is_empty());
    assert_eq!(budget.running_salary(), dec!(2000));
    assert_eq!(budget.percentage(utilities), Some(dec!(50)));
    assert_eq!(budget.percentage(savings), Some(dec!(30)));
}

// ── Parsing ───────────────────────────────────────────────────

#[test]
fn test_parse_salary() {
    assert_eq!(parse_salary("2000").unwrap(), dec!(2000));
    assert_eq!(parse_salary(" $2,500.50 ").unwrap(), dec!(2500.50));
    assert_eq!(parse_salary("").unwrap_err(), AllocationError::InvalidSalary);
    assert_eq!(parse_salary("abc").unwrap_err(), AllocationError::InvalidSalary);
    assert_eq!(parse_salary("0").unwrap_err(), AllocationError::InvalidSalary);
    assert_eq!(parse_salary("-10").unwrap_err(), AllocationError::InvalidSalary);
    assert_eq!(
        parse_salary("79228162514264337593543950335").unwrap_err(),
        AllocationError::InvalidSalary
    );
    assert_eq!(parse_salary("1000000000000000").unwrap(), MAX_SALARY);
}

#[test]
fn test_parse_percentage() {
    assert_eq!(parse_percentage("0").unwrap(), dec!(0));
    assert_eq!(parse_percentage("100").unwrap(), dec!(100));
    assert_eq!(parse_percentage("12.5%").unwrap(), dec!(12.5));
    assert!(matches!(
        parse_percentage("100.01"),
        Err(AllocationError::InvalidPercentage(_))
    ));
    assert!(matches!(
        parse_percentage("ten"),
        Err(AllocationError::InvalidPercentage(_))
    ));
    assert!(matches!(
        parse_percentage(""),
        Err(AllocationError::InvalidPercentage(_))
    ));
}

#[test]
fn test_parse_amount() {
    assert_eq!(parse_amount("4.50").unwrap(), dec!(4.50));
    assert_eq!(parse_amount("0").unwrap_err(), AllocationError::InvalidAmount);
    assert_eq!(parse_amount("x").unwrap_err(), AllocationError::InvalidAmount);
}

// ── Misc ──────────────────────────────────────────────────────

#[test]
fn test_allocation_mode_parse() {
    assert_eq!(AllocationMode::parse("preset"), Some(AllocationMode::Preset));
    assert_eq!(AllocationMode::parse("PERSONAL"), Some(AllocationMode::Personalized));
    assert_eq!(AllocationMode::parse("custom"), Some(AllocationMode::Personalized));
    assert_eq!(AllocationMode::parse("nope"), None);
    assert_eq!(AllocationMode::Preset.toggled(), AllocationMode::Personalized);
}

#[test]
fn test_preset_category_display() {
    assert_eq!(format!("{}", PresetCategory::PersonalNeeds), "Personal Needs");
    assert_eq!(PresetCategory::all().len(), 3);
}

#[test]
fn test_find_by_name_case_insensitive() {
    let budget = standard_preset();
    assert!(budget.find_by_name("personal needs").is_some());
    assert!(budget.find_by_name("Groceries").is_none());
}
