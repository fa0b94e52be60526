use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand};

use noirgen::diagnostic::render_diagnostics;
use noirgen::emit::Emitter;
use noirgen::model::{KeyConvention, ModelParameters};
use noirgen::samples::TestSamples;

#[derive(Parser)]
#[command(
    name = "noirgen",
    version,
    about = "Generate Noir circuit programs from trained neural network parameters"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a Noir program from model parameters
    Generate(GenerateArgs),
    /// Report the network topology without generating code
    Inspect(InspectArgs),
}

#[derive(Args)]
struct GenerateArgs {
    /// Destination path for the generated Noir program
    #[arg(long = "save_path", default_value = "main.nr")]
    save_path: PathBuf,
    /// Path to the model parameters JSON
    #[arg(long = "model_parameters", alias = "model_data")]
    model_parameters: PathBuf,
    /// Path to the test samples JSON
    #[arg(long = "test_samples")]
    test_samples: Option<PathBuf>,
    /// Key naming convention: auto, short (w1/b1), or long (l1_weights/l1_biases)
    #[arg(long, default_value = "auto")]
    keys: String,
}

#[derive(Args)]
struct InspectArgs {
    /// Path to the model parameters JSON
    #[arg(long = "model_parameters", alias = "model_data")]
    model_parameters: PathBuf,
    /// Key naming convention: auto, short (w1/b1), or long (l1_weights/l1_biases)
    #[arg(long, default_value = "auto")]
    keys: String,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Generate(args) => cmd_generate(args),
        Command::Inspect(args) => cmd_inspect(args),
    }
}

// --- noirgen generate ---

fn cmd_generate(args: GenerateArgs) {
    let keys = parse_keys(&args.keys);
    let model = load_model(&args.model_parameters, keys);
    let samples = args
        .test_samples
        .as_ref()
        .map(|path| load_samples(path, model.convention));

    let program = Emitter::new().emit_program(&model, samples.as_ref());

    if let Err(e) = std::fs::write(&args.save_path, &program) {
        eprintln!(
            "error: cannot write '{}': {}",
            args.save_path.display(),
            e
        );
        process::exit(1);
    }
    println!("Generated Noir program: {}", args.save_path.display());
}

// --- noirgen inspect ---

fn cmd_inspect(args: InspectArgs) {
    let keys = parse_keys(&args.keys);
    let model = load_model(&args.model_parameters, keys);

    println!("Model: {}", args.model_parameters.display());
    println!("Key convention: {}", model.convention.name());
    println!("Input width: {}", model.input_dim);
    println!("Layers: {}", model.layer_count());
    for (i, layer) in model.layers.iter().enumerate() {
        let outputs = layer.biases.len();
        let inputs = if outputs == 0 {
            "?".to_string()
        } else {
            (layer.weights.len() / outputs).to_string()
        };
        println!(
            "  layer {}: {} -> {}  ({}: {} values, {}: {} values)",
            i + 1,
            inputs,
            outputs,
            layer.weights_key,
            layer.weights.len(),
            layer.biases_key,
            layer.biases.len(),
        );
    }
}

// --- shared helpers ---

fn parse_keys(keys: &str) -> Option<KeyConvention> {
    match keys {
        "auto" => None,
        "short" => Some(KeyConvention::Short),
        "long" => Some(KeyConvention::Long),
        other => {
            eprintln!(
                "error: unknown key convention '{}' (expected auto, short, or long)",
                other
            );
            process::exit(1);
        }
    }
}

fn read_source(path: &Path) -> String {
    match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("error: cannot read '{}': {}", path.display(), e);
            process::exit(1);
        }
    }
}

fn load_model(path: &Path, keys: Option<KeyConvention>) -> ModelParameters {
    let source = read_source(path);
    match ModelParameters::parse(&source, keys) {
        Ok(model) => {
            render_diagnostics(&model.warnings, &path.to_string_lossy(), &source);
            model
        }
        Err(diag) => {
            diag.render(&path.to_string_lossy(), &source);
            process::exit(1);
        }
    }
}

fn load_samples(path: &Path, convention: KeyConvention) -> TestSamples {
    let source = read_source(path);
    match TestSamples::parse(&source, convention) {
        Ok(samples) => samples,
        Err(diag) => {
            diag.render(&path.to_string_lossy(), &source);
            process::exit(1);
        }
    }
}
