//! Cash Dispenser CLI
//!
//! Reads withdrawal requests from CSV, dispenses each in order and writes
//! the outcome of every request to stdout.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- requests.csv              # limitless funds
//! cargo run -- requests.csv stock.csv    # stocked from a table
//! cargo run -- requests.csv factory      # factory stock
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use cash_dispenser::{load_inventory, CashDispenser, DispenserError, Inventory, Result};
use log::info;
use std::env;
use std::fs::File;
use std::io::{self, BufReader};
use std::process;

const FACTORY_STOCK_ARG: &str = "factory";

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err(DispenserError::MissingArgument);
    }

    let inventory = match args.get(2).map(String::as_str) {
        None => Inventory::unconstrained(),
        Some(FACTORY_STOCK_ARG) => Inventory::filled(),
        Some(stock_path) => load_inventory(BufReader::new(File::open(stock_path)?))?,
    };

    let requests = BufReader::new(File::open(&args[1])?);

    let mut dispenser = CashDispenser::new(inventory);
    dispenser.process_csv(requests)?;

    let stdout = io::stdout();
    let handle = stdout.lock();
    dispenser.write_output(handle)?;

    if dispenser.inventory().is_constrained() {
        info!("Remaining balance: {}", dispenser.balance()?);
    }

    Ok(())
}
