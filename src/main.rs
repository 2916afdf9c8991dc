//! TableMill - Command-line interface for synthetic table generation

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;
use tablemill::{Result, TableSchema};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "tablemill",
    about = "Synthetic tabular dataset generation for testing and prototyping",
    version = env!("CARGO_PKG_VERSION"),
    author = "TableMill Contributors"
)]
struct Cli {
    /// Table schema file (JSON)
    #[arg(short = 's', long)]
    schema: PathBuf,

    /// Number of rows to generate
    #[arg(short = 'n', long, default_value = "1000")]
    rows: usize,

    /// Output file
    #[arg(short = 'o', long, default_value = "./table.csv")]
    output: PathBuf,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "csv")]
    format: OutputFormat,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Show progress bar
    #[arg(short = 'p', long)]
    progress: bool,

    /// Verbose output
    #[arg(short = 'v', long)]
    verbose: bool,
}

#[derive(Debug, ValueEnum, Clone, Copy)]
enum OutputFormat {
    Csv,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive("tablemill=debug".parse().unwrap())
    } else {
        EnvFilter::from_default_env().add_directive("tablemill=info".parse().unwrap())
    };

    tracing_subscriber::fmt().with_env_filter(filter).init();

    println!("🔧 Configuration:");
    println!("  Schema: {}", cli.schema.display());
    println!("  Rows: {}", cli.rows);
    println!("  Format: {:?}", cli.format);
    println!("  Output: {}", cli.output.display());
    if let Some(seed) = cli.seed {
        println!("  Seed: {seed}");
    }
    println!();

    let schema = TableSchema::load(&cli.schema)?;
    let mut generator = schema.build()?;

    if let Some(seed) = cli.seed {
        generator = generator.with_seed(seed);
    }
    if cli.progress {
        generator = generator.with_progress();
    }

    let sample_start = Instant::now();
    let table = generator.sample(cli.rows)?;
    let sample_time = sample_start.elapsed();

    let export_start = Instant::now();
    match cli.format {
        OutputFormat::Csv => table.write_csv_file(&cli.output)?,
        OutputFormat::Json => table.write_json(&cli.output)?,
    }
    let export_time = export_start.elapsed();

    println!("✅ Generation Complete!");
    println!("  📁 Output: {}", cli.output.display());
    println!("  📊 Rows: {}", table.num_rows());
    println!("  📋 Columns: {}", table.num_columns());
    println!("  ⏱️  Sampling: {:.2}s", sample_time.as_secs_f64());
    println!("  ⏱️  Export: {:.2}s", export_time.as_secs_f64());

    Ok(())
}
