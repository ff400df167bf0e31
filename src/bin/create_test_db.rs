use std::{error::Error, path::Path, process::exit};

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use wallet_ledger::{
    Amount, CategoryName, Kind, NewTransaction, PasswordHash, Username, WalletName,
    create_category, create_transaction, create_user, create_wallet, initialize_db,
};

/// A utility for creating a test database for Wallet Ledger.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
///
/// The test user has the username "test" and the password "test".
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let output_path = Path::new(&args.output_path);

    if output_path.extension().is_none_or(|extension| extension.is_empty()) {
        eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
        exit(1);
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;
    initialize_db(&conn)?;

    println!("Creating test user...");
    let password_hash = PasswordHash::from_raw_password("test", 4)?;
    let user = create_user(Username::new_unchecked("test"), password_hash, &conn)?;

    println!("Creating wallets and categories...");
    let cash = create_wallet(WalletName::new_unchecked("Cash"), user.id, &conn)?;
    let bank = create_wallet(WalletName::new_unchecked("Bank"), user.id, &conn)?;
    let salary = create_category(
        CategoryName::new_unchecked("Salary"),
        Kind::Income,
        user.id,
        &conn,
    )?;
    let groceries = create_category(
        CategoryName::new_unchecked("Groceries"),
        Kind::Expense,
        user.id,
        &conn,
    )?;

    println!("Creating transactions...");
    let today = OffsetDateTime::now_utc().date();
    let month_start = today - Duration::days(i64::from(today.day()) - 1);
    let transactions = [
        (bank.id, "Pay day", 250_000, Kind::Income, salary.id, 0),
        (bank.id, "Supermarket", 8_450, Kind::Expense, groceries.id, 1),
        (cash.id, "Farmers market", 2_300, Kind::Expense, groceries.id, 2),
    ];

    for (wallet_id, description, cents, kind, category_id, days_after_start) in transactions {
        let date = (month_start + Duration::days(days_after_start)).min(today);

        create_transaction(
            &NewTransaction {
                wallet_id,
                description: Some(description.to_owned()),
                amount: Amount::from_cents(cents),
                date,
                kind,
                category_id: Some(category_id),
            },
            &conn,
        )?;
    }

    println!("Success!");

    Ok(())
}
