use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use colored::*;
use env_logger::{Builder, Env};
use log::{info, warn};
use serde_json::json;

use df_align::{align_duplex, duplex_matrix, AlignError, Decision};
use df_thermo::ReactionCondition;

/// Predict the minimum free energy hybridization of two DNA strands.
#[derive(Parser)]
#[command(name = "df-align", version, about)]
struct Args {
    /// Reference strand, 5'->3'.
    #[arg(short, long)]
    reference: String,

    /// Query strand, 5'->3'.
    #[arg(short, long)]
    query: String,

    /// Reaction temperature in degrees Celsius.
    #[arg(short, long, default_value_t = 37.0)]
    temperature: f64,

    /// Monovalent salt concentration in mol/L (reserved).
    #[arg(long, default_value_t = 1.0)]
    salt: f64,

    /// Emit the result as JSON instead of text.
    #[arg(long)]
    json: bool,

    /// Dump the decision matrix slot by slot.
    #[arg(long)]
    matrix: bool,
}

fn run(args: &Args) -> Result<(), AlignError> {
    let condition = ReactionCondition::new(args.temperature, args.salt);
    let result = align_duplex(&args.reference, &args.query, condition)?;

    if args.matrix {
        match duplex_matrix(&args.reference, &args.query, condition) {
            Ok(matrix) => {
                for (label, slot) in [
                    ("bind", Decision::Match),
                    ("top_bulge", Decision::TopBulge),
                    ("bottom_bulge", Decision::BottomBulge),
                    ("stop", Decision::Stop),
                ] {
                    println!("[{}]", label);
                    print!("{}", matrix.slot_table(slot));
                }
            }
            Err(AlignError::EmptyInput) => {
                warn!("matrix dump skipped: input below 2 bases per strand");
            }
            Err(e) => return Err(e),
        }
    }

    if args.json {
        let payload = json!({
            "reference": args.reference.to_ascii_uppercase(),
            "query": args.query.to_ascii_uppercase(),
            "temperature_celsius": args.temperature,
            "salt_molarity": args.salt,
            "delG_cal_per_mol": result.del_g,
            "coord": result.coord,
            "rendered": result.rendered,
        });
        println!("{}", serde_json::to_string_pretty(&payload).expect("serializable payload"));
        return Ok(());
    }

    if result.rendered.is_empty() {
        println!("No favourable hybridization (delG = 0.00 kcal/mol).");
        return Ok(());
    }
    info!("best decision {} at ({}, {})",
        result.coord.decision, result.coord.row, result.coord.col);
    println!("{}", result.rendered);
    println!("delG = {:.2} kcal/mol", result.del_g / 1000.0);
    Ok(())
}

fn main() -> ExitCode {
    Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e @ AlignError::InvalidBase(_)) => {
            eprintln!("{} {}", "ERROR:".red(), e);
            ExitCode::from(1)
        }
        Err(e) => {
            eprintln!("{} {}", "ERROR:".red(), e);
            ExitCode::from(2)
        }
    }
}
