//! Command-line driver for ferrite-tinn.
//!
//! ```text
//! ferrite-tinn train --data semeion.data --inputs 256 --outputs 10 --hidden 28
//! ferrite-tinn predict --model model.json < rows.txt
//! ferrite-tinn predict --model model.rs < rows.txt
//! ferrite-tinn export --model model.json > model.rs
//! ```
//!
//! Log output goes to stderr and is controlled by `RUST_LOG` (default `info`).

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::info;

use ferrite_tinn::data::dataset::parse_row;
use ferrite_tinn::network::export::{format_values, to_source, DEFAULT_DIGITS};
use ferrite_tinn::network::model_file;
use ferrite_tinn::{train_loop, Dataset, Network, Precision, Scalar, TrainConfig};

#[derive(Parser, Debug)]
#[command(author, version, about = "Train and run a one-hidden-layer neural network")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Train a network on a whitespace-separated dataset and save it
    Train(TrainArgs),
    /// Predict every row read from stdin with a saved model
    Predict {
        /// JSON model file, or Rust constants written by `export` (`.rs`)
        #[arg(long, default_value = "model.json")]
        model: PathBuf,
    },
    /// Print a saved model as Rust constants
    Export {
        /// JSON model file, or Rust constants written by `export` (`.rs`)
        #[arg(long, default_value = "model.json")]
        model: PathBuf,
        /// Fixed decimal places; shortest exact form when omitted
        #[arg(long)]
        digits: Option<usize>,
    },
}

#[derive(Args, Debug)]
struct TrainArgs {
    /// Dataset file, one sample per line
    #[arg(long, default_value = "semeion.data")]
    data: PathBuf,

    /// Values per input vector
    #[arg(long, default_value_t = 256)]
    inputs: usize,

    /// Values per target vector
    #[arg(long, default_value_t = 10)]
    outputs: usize,

    /// Hidden units
    #[arg(long, default_value_t = 28)]
    hidden: usize,

    /// JSON file with `learning_rate`, `anneal` and `epochs`
    #[arg(long)]
    config: Option<PathBuf>,

    /// Initial learning rate (overrides the config file)
    #[arg(long)]
    rate: Option<f64>,

    /// Learning-rate multiplier per epoch (overrides the config file)
    #[arg(long)]
    anneal: Option<f64>,

    /// Number of epochs (overrides the config file)
    #[arg(long)]
    epochs: Option<usize>,

    /// Seed for initialization and shuffling; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, value_enum, default_value_t = PrecisionArg::F32)]
    precision: PrecisionArg,

    /// Where to write the trained model
    #[arg(long, default_value = "model.json")]
    model: PathBuf,

    /// Also write the model as Rust constants to this file
    #[arg(long)]
    export: Option<PathBuf>,

    /// Decimal places for --export; shortest exact form when omitted
    #[arg(long)]
    digits: Option<usize>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PrecisionArg {
    F32,
    F64,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Train(args) => match args.precision {
            PrecisionArg::F32 => run_train::<f32>(&args),
            PrecisionArg::F64 => run_train::<f64>(&args),
        },
        Command::Predict { model } => match peek_precision(&model)? {
            Precision::F32 => run_predict::<f32>(&model),
            Precision::F64 => run_predict::<f64>(&model),
        },
        Command::Export { model, digits } => match peek_precision(&model)? {
            Precision::F32 => run_export::<f32>(&model, digits),
            Precision::F64 => run_export::<f64>(&model, digits),
        },
    }
}

fn run_train<T: Scalar>(args: &TrainArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => TrainConfig::load_json(path)
            .with_context(|| format!("reading training config {}", path.display()))?,
        None => TrainConfig::default(),
    };
    if let Some(rate) = args.rate {
        config.learning_rate = rate;
    }
    if let Some(anneal) = args.anneal {
        config.anneal = anneal;
    }
    if let Some(epochs) = args.epochs {
        config.epochs = epochs;
    }

    let mut dataset = Dataset::<T>::load(&args.data, args.inputs, args.outputs)
        .with_context(|| format!("loading dataset {}", args.data.display()))?;
    info!("loaded {} samples from {}", dataset.len(), args.data.display());

    let mut network = match args.seed {
        Some(seed) => Network::<T>::seeded(args.inputs, args.hidden, args.outputs, seed)?,
        None => Network::<T>::new(args.inputs, args.hidden, args.outputs, None)?,
    };

    let error = train_loop(&mut network, &mut dataset, &config)?;
    info!("finished training, mean error {:.12}", error.as_f64());

    network.save_json(&args.model)
        .with_context(|| format!("writing model {}", args.model.display()))?;
    info!("saved model to {}", args.model.display());

    if let Some(path) = &args.export {
        std::fs::write(path, to_source(&network, args.digits))
            .with_context(|| format!("writing {}", path.display()))?;
        info!("exported model constants to {}", path.display());
    }

    // Reload from disk and check one sample, so a broken save shows up here.
    let mut restored = Network::<T>::load_json(&args.model)?;
    if let Some(sample) = dataset.samples().first() {
        let prediction = restored.predict(&sample.input)?;
        info!("target     {}", format_values(&sample.target, " ", Some(DEFAULT_DIGITS)));
        info!("prediction {}", format_values(&prediction, " ", Some(DEFAULT_DIGITS)));
    }

    Ok(())
}

fn run_predict<T: Scalar>(model: &Path) -> Result<()> {
    let mut network = Network::<T>::load(model)
        .with_context(|| format!("loading model {}", model.display()))?;
    let input_size = network.shape().input_size;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for (idx, line) in stdin.lock().lines().enumerate() {
        let line = line?;
        let Some(input) = parse_row::<T>(&line, idx + 1, input_size)? else {
            continue;
        };
        let prediction = network.predict(&input)?;
        writeln!(out, "{}", format_values(&prediction, " ", Some(DEFAULT_DIGITS)))?;
    }

    Ok(())
}

fn run_export<T: Scalar>(model: &Path, digits: Option<usize>) -> Result<()> {
    let network = Network::<T>::load(model)
        .with_context(|| format!("loading model {}", model.display()))?;
    print!("{}", to_source(&network, digits));
    Ok(())
}

fn peek_precision(model: &Path) -> Result<Precision> {
    model_file::precision_of(model)
        .with_context(|| format!("reading model {}", model.display()))
}
