use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use time::{Duration, OffsetDateTime};

use bilancio::{AppState, DatabaseConfig, Transaction, TransactionType};

/// A utility for creating a test database for the Bilancio server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,

    /// How many days of sample transactions to create, counting back from today.
    #[arg(long, short, default_value_t = 90)]
    days: i64,
}

/// The recurring expenses added to the sample data as (category, sub-category, amount).
const DAILY_EXPENSES: [(&str, &str, f64); 4] = [
    ("Food", "Groceries", 42.5),
    ("Travel", "Bus fare", 3.2),
    ("Entertainment", "Movie tickets", 18.0),
    ("Bills", "Mobile recharge", 12.99),
];

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let state = AppState::new(DatabaseConfig::new(output_path), "Etc/UTC")?;

    println!("Creating sample transactions...");
    let today = OffsetDateTime::now_utc().date();
    let mut count = 0;

    for days_ago in 0..args.days {
        let date = today - Duration::days(days_ago);

        if date.day() == 1 {
            state.store.create(
                Transaction::build(date, "Salary", TransactionType::Income, 4200.0)
                    .sub_category("Monthly pay"),
            )?;
            state.store.create(
                Transaction::build(date, "Bills", TransactionType::Expense, 1500.0)
                    .sub_category("Rent"),
            )?;
            count += 2;
        }

        // Spread the smaller expenses out so that each day looks a bit different.
        let (category, sub_category, amount) =
            DAILY_EXPENSES[days_ago as usize % DAILY_EXPENSES.len()];
        let amount = amount + (days_ago % 7) as f64;
        state.store.create(
            Transaction::build(date, category, TransactionType::Expense, amount)
                .sub_category(sub_category),
        )?;
        count += 1;
    }

    println!("Created {count} transactions.");
    println!("Success!");

    Ok(())
}
