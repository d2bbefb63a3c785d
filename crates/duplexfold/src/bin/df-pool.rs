use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use colored::*;
use env_logger::{Builder, Env};
use log::info;

use df_align::AlignError;
use df_thermo::ReactionCondition;
use duplexfold::{interaction_matrix, read_pool_file, row_summary};

/// Screen a primer pool for pairwise cross-hybridization.
#[derive(Parser)]
#[command(name = "df-pool", version, about)]
struct Args {
    /// Pool file: one primer per line, '#' comments allowed.
    pool: PathBuf,

    /// Reaction temperature in degrees Celsius.
    #[arg(short, long, default_value_t = 37.0)]
    temperature: f64,

    /// Monovalent salt concentration in mol/L (reserved).
    #[arg(long, default_value_t = 1.0)]
    salt: f64,

    /// Only align the 3'-terminal K bases of each query primer.
    #[arg(short, long)]
    kmer: Option<usize>,

    /// Include self-interactions on the diagonal.
    #[arg(long = "self")]
    include_self: bool,
}

fn run(args: &Args) -> anyhow::Result<()> {
    let pool = read_pool_file(&args.pool)?;
    info!("screening {} primers at {} C", pool.len(), args.temperature);

    let condition = ReactionCondition::new(args.temperature, args.salt);
    let matrix = interaction_matrix(&pool, condition, args.kmer, args.include_self)?;

    let name_width = pool.iter().map(String::len).max().unwrap_or(0);
    for (primer, row) in pool.iter().zip(&matrix) {
        print!("{:>width$} ", primer, width = name_width);
        for del_g in row {
            print!("{:>9.1} ", del_g);
        }
        let (strongest, mean) = row_summary(row);
        println!("  min= {:.1}  mean= {:.1}", strongest, mean);
    }
    Ok(())
}

fn main() -> ExitCode {
    Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "ERROR:".red(), e);
            if e.downcast_ref::<AlignError>()
                .is_some_and(|e| matches!(e, AlignError::InvalidBase(_)))
            {
                ExitCode::from(1)
            } else {
                ExitCode::from(2)
            }
        }
    }
}
