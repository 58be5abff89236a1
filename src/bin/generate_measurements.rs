use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Parser)]
#[command(name = "generate-measurements")]
#[command(about = "Synthesizes a raw measurement file for benchmarking", long_about = None)]
struct Args {
    /// Destination file
    #[arg(short, long)]
    output: PathBuf,

    /// Number of measurement rows
    #[arg(short = 'n', long, default_value_t = 1_000_000)]
    rows: u64,

    /// Field delimiter
    #[arg(short, long, default_value_t = ';')]
    delimiter: char,

    /// Seed for reproducible files
    #[arg(long)]
    seed: Option<u64>,
}

const STATIONS: &[&str] = &[
    "Abha",
    "Abidjan",
    "Accra",
    "Amsterdam",
    "Anchorage",
    "Asuncion",
    "Bangkok",
    "Belo Horizonte",
    "Bogota",
    "Brasilia",
    "Cape Town",
    "Caracas",
    "Curitiba",
    "Dakar",
    "Darwin",
    "Fortaleza",
    "Harbin",
    "Helsinki",
    "Irkutsk",
    "Jakarta",
    "Kinshasa",
    "La Paz",
    "Lima",
    "Lisbon",
    "Manaus",
    "Montevideo",
    "Nairobi",
    "Oslo",
    "Porto Alegre",
    "Quito",
    "Recife",
    "Reykjavik",
    "Rio de Janeiro",
    "Salvador",
    "Santiago",
    "Sao Paulo",
    "Tromso",
    "Ulaanbaatar",
    "Windhoek",
    "Yakutsk",
];

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    if let Some(parent) = args.output.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    let mut writer = BufWriter::new(file);

    for _ in 0..args.rows {
        let station = STATIONS[rng.gen_range(0..STATIONS.len())];
        let temperature: f64 = rng.gen_range(-99.9..99.9);
        writeln!(writer, "{station}{}{temperature:.1}", args.delimiter)?;
    }
    writer.flush()?;

    println!("{} rows -> {}", args.rows, args.output.display());
    Ok(())
}
