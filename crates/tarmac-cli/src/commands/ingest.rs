//! Ingest command - clean the dataset and append it to MySQL.

use std::path::PathBuf;

use colored::Colorize;
use tarmac::{IngestReport, MemorySink, MySqlSink, Tarmac};

use super::load_config;
use crate::cli::IngestArgs;

pub fn run(config: Option<PathBuf>, args: IngestArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config)?;
    let tarmac = Tarmac::new(config)?;

    // The connection is opened only once every cleaning stage has passed.
    let prepared = tarmac.prepare()?;

    let report = if args.dry_run {
        let mut sink = MemorySink::new();
        tarmac.load(prepared, &mut sink)?
    } else {
        let mut sink = MySqlSink::connect(&tarmac.config().mysql)?;
        let report = tarmac.load(prepared, &mut sink)?;
        sink.close();
        report
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report, args.dry_run);
    }

    Ok(())
}

fn print_summary(report: &IngestReport, dry_run: bool) {
    let verb = if dry_run { "Prepared" } else { "Appended" };
    println!(
        "{} {} row(s) from {} to {}",
        verb.green().bold(),
        report.rows_written.to_string().white().bold(),
        report.source.file.white(),
        report.table_name.cyan()
    );
    println!();

    let airlines = &report.transform.airlines;
    println!("{}", "Airlines:".yellow().bold());
    println!("  Exact:      {}", airlines.exact.to_string().green());
    println!("  Corrected:  {}", airlines.corrected.to_string().blue());
    println!("  Unresolved: {}", airlines.unresolved.to_string().red());
    for value in &airlines.unresolved_values {
        println!("    {} {}", "-".dimmed(), value);
    }
    println!();

    println!(
        "{} {} value(s) changed across {} operation(s)",
        "Cleaning:".yellow().bold(),
        report.transform.values_changed,
        report.transform.operations_applied
    );

    if dry_run {
        println!();
        println!("{}", "Dry run: nothing was written.".dimmed());
    }
}
