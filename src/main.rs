use clap::{Parser, Subcommand};
use fino::operations::add::{add_expense_to_ledger, add_income_to_ledger, create_expense_input, parse_expense_details};
use fino::operations::chart::render_chart;
use fino::operations::import::import_expenses_from_csv;
use fino::storage::{JsonStore, DEFAULT_DATA_FILE};
use fino::{Ledger, Result};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "fino")]
#[command(about = "Track income, categorized expenses and savings")]
struct Cli {
    /// Ledger file (also read from `FINO_DATA_FILE`).
    #[arg(long, env = "FINO_DATA_FILE", default_value = DEFAULT_DATA_FILE)]
    data_file: PathBuf,

    /// Runs an interactive session when omitted.
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add income and print the new income total.
    Income { amount: String },
    /// Record an expense dated today.
    Expense {
        amount: String,
        category: String,
        description: String,
    },
    /// List the categories in use.
    Categories,
    /// Print the expense report for one category, or for all expenses.
    Report {
        #[arg(long)]
        category: Option<String>,
    },
    /// Draw a pie or bar chart of spending per category.
    Chart {
        #[arg(default_value = "pie")]
        chart_type: String,
    },
    /// Import `amount,category,description` rows from a CSV file.
    Import { path: PathBuf },
}

pub enum UserCommands {
    Income,
    Expense,
    Categories,
    Report,
    Chart,
    Import,
    Print,
    Exit,
    Unknown,
}

fn main() -> ExitCode {
    fino::logging::init_tracing();
    let cli = Cli::parse();
    let store = JsonStore::new(cli.data_file);

    let result = match cli.command {
        Some(command) => run_command(&store, command),
        None => run_interactive(&store),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_command(store: &JsonStore, command: Command) -> Result<()> {
    let mut ledger = store.load()?;

    match command {
        Command::Income { amount } => {
            let income = add_income_to_ledger(&mut ledger, &amount)?;
            store.save(&ledger)?;
            println!("Income total: {}", income);
        }
        Command::Expense {
            amount,
            category,
            description,
        } => {
            let input = create_expense_input(&amount, &category, &description)?;
            add_expense_to_ledger(&mut ledger, &input)?;
            store.save(&ledger)?;
            println!("Expense added successfully!");
        }
        Command::Categories => print_categories(&ledger),
        Command::Report { category } => print_report(&ledger, category.as_deref()),
        Command::Chart { chart_type } => render_chart(&ledger, &chart_type)?,
        Command::Import { path } => {
            let count = import_expenses_from_csv(&mut ledger, &path)?;
            store.save(&ledger)?;
            println!("Successfully imported {} expenses.", count);
        }
    }

    Ok(())
}

fn run_interactive(store: &JsonStore) -> Result<()> {
    println!("Welcome to fino!");
    let mut ledger = store.load()?;

    loop {
        println!("Please enter a command (income, expense, categories, report, chart, import, print, exit):");

        let input = match read_user_input() {
            Ok(cmd) => cmd,
            Err(e) => {
                println!("Error reading input: {}", e);
                continue;
            }
        };
        let Some(word) = input.split_whitespace().next() else {
            continue;
        };

        match check_for_command(word) {
            UserCommands::Income => {
                println!("Enter the income amount:");
                let Some(details) = prompt() else { continue };
                match add_income_to_ledger(&mut ledger, &details) {
                    Ok(income) => println!("Income total: {}", income),
                    Err(e) => println!("Error adding income: {}", e),
                }
            }
            UserCommands::Expense => {
                println!("Enter expense details in the format:\namount, category, description");
                let Some(details) = prompt() else { continue };
                let added = parse_expense_details(&details)
                    .and_then(|input| add_expense_to_ledger(&mut ledger, &input));
                match added {
                    Ok(()) => println!("Expense added successfully!"),
                    Err(e) => {
                        println!("Error adding expense: {}", e);
                        println!("Please try again.");
                    }
                }
            }
            UserCommands::Categories => print_categories(&ledger),
            UserCommands::Report => {
                println!("Enter a category (leave empty for all expenses):");
                let Some(details) = prompt() else { continue };
                print_report(&ledger, Some(details.as_str()));
            }
            UserCommands::Chart => {
                println!("Enter the chart type (pie or bar):");
                let Some(details) = prompt() else { continue };
                if let Err(e) = render_chart(&ledger, &details) {
                    println!("Error: {}", e);
                }
            }
            UserCommands::Import => {
                println!("Enter the CSV file path to import from:");
                let Some(details) = prompt() else { continue };
                match import_expenses_from_csv(&mut ledger, Path::new(&details)) {
                    Ok(count) => println!("Successfully imported {} expenses.", count),
                    Err(e) => println!("Error importing expenses: {}", e),
                }
            }
            UserCommands::Print => {
                println!("Income: {}", ledger.income());
                for expense in ledger.expenses() {
                    println!(
                        "{}  {:<15} {:>10.2}  {}",
                        expense.date, expense.category, expense.amount, expense.description
                    );
                }
                println!("Savings: {}", ledger.savings());
            }
            UserCommands::Exit => {
                store.save(&ledger)?;
                println!("Saved to {}. Exiting the application.", store.path().display());
                break;
            }
            UserCommands::Unknown => println!("Unknown command '{}'.", word),
        }
    }

    Ok(())
}

fn print_categories(ledger: &Ledger) {
    let categories = ledger.list_categories();
    if categories.is_empty() {
        println!("No expenses recorded yet.");
    }
    for category in categories {
        println!("{}", category);
    }
}

fn print_report(ledger: &Ledger, category: Option<&str>) {
    let report = ledger.report_by_category(category);
    println!("{}", report);
    println!("Balance: {}", ledger.savings());
}

fn prompt() -> Option<String> {
    match read_user_input() {
        Ok(details) => Some(details),
        Err(e) => {
            println!("Error reading input: {}", e);
            None
        }
    }
}

fn read_user_input() -> std::result::Result<String, String> {
    let mut input = String::new();
    let read = io::stdin()
        .read_line(&mut input)
        .map_err(|_| "Failed to read line".to_string())?;
    if read == 0 {
        // stdin closed; treat like `exit`
        return Ok("exit".to_string());
    }
    Ok(input.trim().to_string())
}

fn check_for_command(input: &str) -> UserCommands {
    match input {
        "income" => UserCommands::Income,
        "expense" => UserCommands::Expense,
        "categories" => UserCommands::Categories,
        "report" => UserCommands::Report,
        "chart" => UserCommands::Chart,
        "import" => UserCommands::Import,
        "print" => UserCommands::Print,
        "exit" => UserCommands::Exit,
        _ => UserCommands::Unknown,
    }
}
