mod loader;
mod logger;
mod model;
mod pipeline;
mod poster;
mod report;
mod validator;

use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::Parser;

use logger::RunLogger;
use model::error::PipelineError;
use pipeline::{Pipeline, RunSummary};
use poster::Poster;

const DEFAULT_ENDPOINT: &str = "https://httpbin.org/post";

#[derive(Parser, Debug)]
#[command(
    name = "invoice_pipeline",
    version,
    about = "Batch invoice validation and posting demo"
)]
struct Cli {
    /// Directory of .json invoice files
    #[arg(long, default_value = "invoices")]
    input_dir: PathBuf,

    /// Where to write the summary CSV
    #[arg(long, default_value = "output/processed_invoices.csv")]
    output_csv: PathBuf,

    /// Endpoint valid invoices are posted to
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Disable remote posting; every valid invoice is marked skipped
    #[arg(long)]
    offline: bool,

    /// Append-only run log
    #[arg(long, default_value = "logs/invoice_pipeline.log")]
    log_file: PathBuf,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), PipelineError> {
    let cli = Cli::parse();

    let logger = Arc::new(RunLogger::open(&cli.log_file)?);

    let poster = if cli.offline {
        Poster::disabled()
    } else {
        Poster::http(&cli.endpoint)?
    };

    let pipeline = Pipeline::new(poster, Arc::clone(&logger));
    let summary = pipeline.run(&cli.input_dir, &cli.output_csv)?;

    print_summary(&summary, &cli);
    Ok(())
}

fn print_summary(summary: &RunSummary, cli: &Cli) {
    println!("=== Invoice Pipeline Summary ===");
    println!("Loaded:        {}", summary.loaded);
    println!("Load failures: {}", summary.load_failures);
    println!("Valid:         {}", summary.valid);
    println!("Invalid:       {}", summary.invalid);
    println!("Posted:        {}", summary.posted);
    println!("Post failures: {}", summary.post_failures);
    println!("Skipped:       {}", summary.skipped);
    println!("Output: {}", cli.output_csv.display());
    println!("Log:    {}", cli.log_file.display());
}
