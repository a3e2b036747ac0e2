//! Command table and handlers for the interactive shell.

use chrono::Local;

use crate::cli::core::{parse_amount, parse_date, CommandError, CommandResult, ShellContext};
use crate::cli::io as cli_io;
use crate::cli::output;
use crate::ledger::{TransactionId, TransactionKind};
use crate::report;

pub struct CommandEntry {
    pub names: &'static [&'static str],
    pub description: &'static str,
    pub usage: &'static str,
}

pub const COMMANDS: &[CommandEntry] = &[
    CommandEntry {
        names: &["add"],
        description: "Record a new income or expense transaction",
        usage: "add [<title> <category> <amount> <YYYY-MM-DD> <income|expense>]",
    },
    CommandEntry {
        names: &["list"],
        description: "Show all recorded transactions",
        usage: "list",
    },
    CommandEntry {
        names: &["delete"],
        description: "Remove a transaction by id",
        usage: "delete <id>",
    },
    CommandEntry {
        names: &["export"],
        description: "Write the journal to a CSV file",
        usage: "export [path]",
    },
    CommandEntry {
        names: &["report"],
        description: "Aggregate views over the journal",
        usage: "report <categories|monthly>",
    },
    CommandEntry {
        names: &["categories"],
        description: "List the suggested category names",
        usage: "categories",
    },
    CommandEntry {
        names: &["help"],
        description: "Show available commands or details for one",
        usage: "help [command]",
    },
    CommandEntry {
        names: &["exit", "quit"],
        description: "Leave the shell",
        usage: "exit",
    },
];

type Handler = fn(&mut ShellContext, &[&str]) -> CommandResult;

pub(crate) fn handler(command: &str) -> Option<Handler> {
    match command {
        "add" => Some(cmd_add),
        "list" => Some(cmd_list),
        "delete" => Some(cmd_delete),
        "export" => Some(cmd_export),
        "report" => Some(cmd_report),
        "categories" => Some(cmd_categories),
        "help" => Some(cmd_help),
        "exit" | "quit" => Some(cmd_exit),
        _ => None,
    }
}

pub(crate) fn entry(command: &str) -> Option<&'static CommandEntry> {
    COMMANDS
        .iter()
        .find(|entry| entry.names.contains(&command))
}

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (title, category, amount, date, kind) = if args.is_empty() {
        prompt_add_form(context)?
    } else {
        parse_add_args(args)?
    };

    let (id, saved) = context.manager.add(title, category, amount, date, kind);
    cli_io::print_success(format!("Added transaction #{id}."));
    context.warn_on_save_failure(saved);
    Ok(())
}

fn parse_add_args(
    args: &[&str],
) -> Result<(String, String, f64, chrono::NaiveDate, TransactionKind), CommandError> {
    if args.len() != 5 {
        return Err(CommandError::InvalidArguments(
            "expected: add <title> <category> <amount> <YYYY-MM-DD> <income|expense>".into(),
        ));
    }
    let title = args[0].trim();
    if title.is_empty() {
        return Err(CommandError::InvalidArguments("Title cannot be empty.".into()));
    }
    let category = args[1].trim();
    if category.is_empty() {
        return Err(CommandError::InvalidArguments("Category cannot be empty.".into()));
    }
    let amount = parse_amount(args[2])?;
    let date = parse_date(args[3])?;
    let kind = TransactionKind::parse(args[4]).ok_or_else(|| {
        CommandError::InvalidArguments(format!(
            "invalid type `{}` (use income or expense)",
            args[4]
        ))
    })?;
    Ok((title.to_string(), category.to_string(), amount, date, kind))
}

fn prompt_add_form(
    context: &ShellContext,
) -> Result<(String, String, f64, chrono::NaiveDate, TransactionKind), CommandError> {
    if context.mode == super::core::CliMode::Script {
        return Err(CommandError::InvalidArguments(
            "interactive add is unavailable in script mode; pass the fields as arguments".into(),
        ));
    }

    let title = loop {
        let value = cli_io::prompt_text(&context.theme, "Title")?;
        if value.trim().is_empty() {
            cli_io::print_warning("Title cannot be empty.");
            continue;
        }
        break value.trim().to_string();
    };

    let items: Vec<&str> = context.config.categories.iter().map(String::as_str).collect();
    let category = if items.is_empty() {
        cli_io::prompt_text(&context.theme, "Category")?
    } else {
        let idx = cli_io::prompt_select(&context.theme, "Category", &items, 0)?;
        items[idx].to_string()
    };

    let amount = loop {
        let value = cli_io::prompt_text(&context.theme, "Amount")?;
        match parse_amount(value.trim()) {
            Ok(amount) => break amount,
            Err(_) => cli_io::print_warning("Amount must be a valid number."),
        }
    };

    let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
    let date = loop {
        let value = cli_io::prompt_text_with_default(&context.theme, "Date", &today)?;
        match parse_date(value.trim()) {
            Ok(date) => break date,
            Err(_) => cli_io::print_warning("Date must be YYYY-MM-DD."),
        }
    };

    let kind_idx = cli_io::prompt_select(&context.theme, "Type", &["Expense", "Income"], 0)?;
    let kind = if kind_idx == 1 {
        TransactionKind::Income
    } else {
        TransactionKind::Expense
    };

    Ok((title, category, amount, date, kind))
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let entries = context.manager.journal().entries();
    if entries.is_empty() {
        cli_io::print_info("No transactions recorded yet.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = entries
        .iter()
        .map(|tx| {
            vec![
                tx.id().to_string(),
                tx.date.format("%Y-%m-%d").to_string(),
                tx.kind.to_string(),
                tx.category.clone(),
                format!("{:.2}", tx.amount),
                tx.title.clone(),
            ]
        })
        .collect();
    output::render_table(&["ID", "Date", "Type", "Category", "Amount", "Title"], &rows);
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [raw] = args else {
        return Err(CommandError::InvalidArguments("expected: delete <id>".into()));
    };
    let id = raw.parse::<u64>().map_err(|_| {
        CommandError::InvalidArguments(format!("invalid id `{}` (use a positive integer)", raw))
    })?;

    let (removed, saved) = context.manager.remove(TransactionId(id));
    if removed {
        cli_io::print_success(format!("Deleted transaction #{id}."));
        context.warn_on_save_failure(saved);
    } else {
        cli_io::print_warning(format!("No transaction with id {id}."));
    }
    Ok(())
}

fn cmd_export(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let path = match args {
        [] if context.mode == super::core::CliMode::Interactive => {
            let value =
                cli_io::prompt_text_with_default(&context.theme, "Export path", "transactions.csv")?;
            std::path::PathBuf::from(value.trim())
        }
        [] => std::path::PathBuf::from("transactions.csv"),
        [path] => std::path::PathBuf::from(path),
        _ => {
            return Err(CommandError::InvalidArguments(
                "expected: export [path]".into(),
            ))
        }
    };

    context.manager.export_csv(&path)?;
    cli_io::print_success(format!(
        "Exported {} transaction(s) to {}.",
        context.manager.journal().len(),
        path.display()
    ));
    Ok(())
}

fn cmd_report(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        ["categories"] => report_categories(context),
        ["monthly"] => report_monthly(context),
        _ => Err(CommandError::InvalidArguments(
            "expected: report <categories|monthly>".into(),
        )),
    }
}

fn report_categories(context: &ShellContext) -> CommandResult {
    let totals = report::expense_by_category(context.manager.journal().entries());
    if totals.is_empty() {
        cli_io::print_info("No expenses recorded yet.");
        return Ok(());
    }

    let mut sorted: Vec<_> = totals.into_iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(&b.0));

    output::section("Expenses by category");
    let total: f64 = sorted.iter().map(|(_, amount)| *amount).sum();
    let rows: Vec<Vec<String>> = sorted
        .into_iter()
        .map(|(category, amount)| {
            let share = if total > 0.0 { amount / total } else { 0.0 };
            let bar = "#".repeat((share * 20.0).round() as usize);
            vec![
                category,
                format!("{:.2}", amount),
                format!("{:>5.1}% {bar}", share * 100.0),
            ]
        })
        .collect();
    output::render_table(&["Category", "Total", "Share"], &rows);
    Ok(())
}

fn report_monthly(context: &ShellContext) -> CommandResult {
    let months = report::income_and_expense_by_month(context.manager.journal().entries());

    output::section("Income and expenses by month");
    let rows: Vec<Vec<String>> = months
        .iter()
        .map(|(month, totals)| {
            vec![
                MONTH_LABELS[(*month as usize) - 1].to_string(),
                format!("{:.2}", totals.income),
                format!("{:.2}", totals.expense),
            ]
        })
        .collect();
    output::render_table(&["Month", "Income", "Expense"], &rows);
    Ok(())
}

fn cmd_categories(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::section("Suggested categories");
    for name in &context.config.categories {
        cli_io::print_info(format!("  {name}"));
    }
    cli_io::print_info("Any other category name is accepted as well.");
    Ok(())
}

fn cmd_help(_context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {
            output::section("Available commands");
            for entry in COMMANDS {
                cli_io::print_info(format!("  {:<12} {}", entry.names[0], entry.description));
            }
            cli_io::print_info("Use `help <command>` for details.");
        }
        [name] => match entry(&name.to_lowercase()) {
            Some(entry) => {
                output::section(format!("Help: {}", entry.names[0]));
                cli_io::print_info(format!("  Description: {}", entry.description));
                cli_io::print_info(format!("  Usage: {}", entry.usage));
            }
            None => cli_io::print_warning(format!("Unknown command `{}`.", name)),
        },
        _ => {
            return Err(CommandError::InvalidArguments(
                "expected: help [command]".into(),
            ))
        }
    }
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
