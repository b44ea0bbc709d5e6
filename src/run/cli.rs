use anyhow::{Context, Result};

use crate::models::{
    parse_amount, parse_percentage, parse_salary, AllocationError, Budget, CategoryId,
    CategoryInput,
};
use crate::session::Session;
use crate::ui::form::{is_hex_color, DEFAULT_COLOR};
use crate::ui::util::{format_amount, format_percentage, truncate};

pub(crate) fn as_cli(args: &[String]) -> Result<()> {
    match args[1].as_str() {
        "summary" | "s" => cli_summary(&args[2..]),
        flag if flag.starts_with("--") && !matches!(flag, "--help" | "--version") => {
            cli_summary(&args[1..])
        }
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("allocatui {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("AllocaTUI: split a monthly salary into budget categories");
    println!();
    println!("Usage: allocatui [command]");
    println!();
    println!("Commands:");
    println!("  (none)                            Launch interactive TUI");
    println!("  summary                           Build an allocation and print it");
    println!("    --salary <amount>               Monthly salary (required)");
    println!("    --preset <u> <s> <n>            Utilities, Savings, Personal Needs %");
    println!("    --category <name>:<pct>[:<#color>]");
    println!("                                    Personalized category (repeatable)");
    println!("    --spend <name>:<amount>[:<reason>]");
    println!("                                    Record spending (repeatable)");
    println!("  --help, -h                        Show this help");
    println!("  --version, -V                     Show version");
}

#[derive(Debug, Default, PartialEq, Eq)]
struct SummaryArgs {
    salary: Option<String>,
    preset: Option<[String; 3]>,
    categories: Vec<String>,
    spends: Vec<String>,
}

fn parse_summary_args(args: &[String]) -> Result<SummaryArgs> {
    let mut parsed = SummaryArgs::default();
    let mut iter = args.iter();
    while let Some(flag) = iter.next() {
        let mut value = |name: &str| {
            iter.next()
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("{name} needs a value"))
        };
        match flag.as_str() {
            "--salary" => parsed.salary = Some(value("--salary")?),
            "--preset" => {
                let u = value("--preset")?;
                let s = value("--preset")?;
                let n = value("--preset")?;
                parsed.preset = Some([u, s, n]);
            }
            "--category" => {
                let v = value("--category")?;
                parsed.categories.push(v);
            }
            "--spend" => {
                let v = value("--spend")?;
                parsed.spends.push(v);
            }
            other => anyhow::bail!("Unknown option: {other}"),
        }
    }
    if parsed.preset.is_some() && !parsed.categories.is_empty() {
        anyhow::bail!("Use either --preset or --category, not both");
    }
    Ok(parsed)
}

/// `<name>:<pct>[:<#color>]`. The name is everything before the last
/// one or two fields, so it may itself contain colons.
fn parse_category_arg(arg: &str) -> Result<CategoryInput, AllocationError> {
    let mut parts: Vec<&str> = arg.rsplitn(3, ':').collect();
    parts.reverse();
    let (name, pct, color) = match parts.as_slice() {
        [name, pct, color] if looks_like_color(pct, color) => (*name, *pct, *color),
        [a, b, pct] => {
            // No color given: rejoin the name that rsplitn broke apart.
            return Ok(CategoryInput::new(
                format!("{a}:{b}"),
                parse_percentage(pct)?,
                DEFAULT_COLOR,
            ));
        }
        [name, pct] => (*name, *pct, DEFAULT_COLOR),
        _ => return Err(AllocationError::InvalidPercentage(String::new())),
    };
    if !is_hex_color(color) {
        return Err(AllocationError::InvalidColor(color.to_string()));
    }
    Ok(CategoryInput::new(
        name,
        parse_percentage(pct)?,
        color.to_uppercase(),
    ))
}

/// A trailing field is a color when it starts with `#`, or when it is not a
/// percentage but the field before it is.
fn looks_like_color(pct: &str, last: &str) -> bool {
    last.starts_with('#') || (parse_percentage(last).is_err() && parse_percentage(pct).is_ok())
}

fn build_budget(args: &SummaryArgs) -> Result<Budget> {
    let salary_text = args
        .salary
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("--salary is required"))?;
    let salary = parse_salary(salary_text)?;

    let budget = match &args.preset {
        Some([u, s, n]) => Budget::preset(
            salary,
            parse_percentage(u)?,
            parse_percentage(s)?,
            parse_percentage(n)?,
        )?,
        None => {
            let entries = args
                .categories
                .iter()
                .map(|c| parse_category_arg(c))
                .collect::<Result<Vec<_>, _>>()?;
            Budget::personalized(salary, entries)?
        }
    };
    Ok(budget)
}

/// Split `<name>:<amount>[:<reason>]`. Category names may contain colons, so
/// the longest leading run of fields that names a category wins.
fn split_spend_arg<'a>(
    budget: &Budget,
    arg: &'a str,
) -> Result<(CategoryId, &'a str, &'a str), AllocationError> {
    for (at, _) in arg.rmatch_indices(':') {
        if let Some(category) = budget.find_by_name(&arg[..at]) {
            let rest = &arg[at + 1..];
            let (amount, reason) = rest.split_once(':').unwrap_or((rest, ""));
            return Ok((category.id, amount, reason));
        }
    }
    let name = arg.split(':').next().unwrap_or("").trim();
    Err(AllocationError::UnknownCategory(name.to_string()))
}

fn apply_spend(session: &mut Session, arg: &str) -> Result<()> {
    let budget = session.budget().ok_or(AllocationError::NoBudget)?;
    let (category_id, amount, reason) = split_spend_arg(budget, arg)?;
    let amount = parse_amount(amount)?;
    let today = chrono::Local::now().date_naive();
    session
        .record_spending(today, reason, category_id, amount)
        .with_context(|| format!("Failed to record spending '{arg}'"))?;
    Ok(())
}

fn build_session(args: &SummaryArgs) -> Result<Session> {
    let mut session = Session::new();
    session.submit(build_budget(args)?);
    for arg in &args.spends {
        apply_spend(&mut session, arg)?;
    }
    Ok(session)
}

fn summary_lines(session: &Session) -> Vec<String> {
    let Some(budget) = session.budget() else {
        return vec!["No budget".to_string()];
    };
    let salary = budget.original_salary();
    let mut lines = vec![
        format!("AllocaTUI: {} allocation", budget.mode()),
        "─".repeat(56),
        format!("{:<24} {:>9} {:>12}  Color", "Category", "Percent", "Amount"),
    ];
    for cat in budget.categories() {
        lines.push(format!(
            "{:<24} {:>9} {:>12}  {}",
            truncate(&cat.name, 24),
            format_percentage(cat.percentage(salary)),
            format_amount(cat.remaining_amount(salary)),
            cat.color,
        ));
    }

    if !session.ledger().is_empty() {
        lines.push(String::new());
        lines.push("Spending:".to_string());
        for entry in session.ledger().entries() {
            lines.push(format!(
                "  {} {:<20} {:<24} {:>12}",
                entry.date.format("%Y-%m-%d"),
                truncate(&entry.category_name, 20),
                truncate(&entry.reason, 24),
                format_amount(entry.amount),
            ));
        }
    }

    lines.push(String::new());
    lines.push(format!("  Monthly Salary:   {}", format_amount(salary)));
    lines.push(format!(
        "  Funds Available:  {}",
        format_amount(budget.running_salary())
    ));
    lines
}

fn cli_summary(args: &[String]) -> Result<()> {
    let parsed = parse_summary_args(args)?;
    let session = build_session(&parsed)?;
    for line in summary_lines(&session) {
        println!("{line}");
    }
    Ok(())
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
