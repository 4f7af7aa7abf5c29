use clap::Parser;
use colored::Colorize;
use run_report_merger::cli::{args::Args, commands};
use std::process;

fn main() {
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    match commands::run(args) {
        Ok(summary) => {
            println!(
                "{} wrote {} data rows to {} in {:.2}s",
                "Success:".green().bold(),
                summary.rows,
                summary.output_path.display(),
                summary.duration.as_secs_f64()
            );
            process::exit(0);
        }
        Err(error) => {
            eprintln!("{} {error}", "Error:".red().bold());
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Run Report Merger - DDNS Detailed Run Report Builder");
    println!("====================================================");
    println!();
    println!("Merge a sample/barcode sheet with an EpiInfo export and MinKNOW run");
    println!("metrics into the detailed run report consumed by the analysis pipeline.");
    println!();
    println!("USAGE:");
    println!("    run-report-merger <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    merge       Merge a sequencing run into a new detailed run report");
    println!("    update      Refresh the Epi columns of an existing report");
    println!("    template    Generate a fill-in template for one of the input kinds");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("EXAMPLES:");
    println!("    # Merge a run with Epi data and a MinKNOW report:");
    println!("    run-report-merger merge --samples barcodes.csv --epi epi_export.csv \\");
    println!("                            --minknow report.html --run-number 20250206_005 \\");
    println!("                            --lab CDC-KIN --pcr-machine \"QuantStudio 5\"");
    println!();
    println!("    # Refresh Epi columns after the database was corrected:");
    println!("    run-report-merger update --report 20250206_005_detailed_run_report.csv \\");
    println!("                             --epi epi_export.csv");
    println!();
    println!("    # Generate a prefilled barcodes sheet:");
    println!("    run-report-merger template --kind samples --prefill-barcodes");
    println!();
    println!("For detailed help on any command, use:");
    println!("    run-report-merger <COMMAND> --help");
}
