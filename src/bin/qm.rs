//! Quine-McCluskey Logic Minimizer - Command Line Interface

use clap::{ArgAction, Parser, ValueEnum};
use qm_logic::blif::BlifReader;
use qm_logic::pla::{PLAReader, PLAWriter};
use qm_logic::{
    ComplementStyle, CoverStrategy, FunctionSpec, LiteralOrder, Minimizable, MinimizerConfig,
    SopFormat,
};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum InputFormat {
    /// Berkeley Logic Interchange Format (single `.names` block)
    Blif,
    /// Single-output PLA
    Pla,
}

impl InputFormat {
    /// Guess from the file extension, BLIF unless it ends in `.pla`
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("pla") => InputFormat::Pla,
            _ => InputFormat::Blif,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Strategy {
    /// Greedy reduction after essential extraction (default)
    Greedy,
    /// Exhaustive search for a minimum cover
    Exact,
}

impl From<Strategy> for CoverStrategy {
    fn from(val: Strategy) -> Self {
        match val {
            Strategy::Greedy => CoverStrategy::Greedy,
            Strategy::Exact => CoverStrategy::Exact,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputType {
    /// Sum-of-products expression
    Sop,
    /// Single-output PLA
    Pla,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Order {
    /// Input order
    Positional,
    /// Plain literals first
    True,
    /// Complemented literals first
    Complement,
}

impl From<Order> for LiteralOrder {
    fn from(val: Order) -> Self {
        match val {
            Order::Positional => LiteralOrder::Positional,
            Order::True => LiteralOrder::TrueThenComplement,
            Order::Complement => LiteralOrder::ComplementThenTrue,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "qm")]
#[command(about = "Quine-McCluskey logic minimizer", long_about = None)]
#[command(version)]
struct Args {
    /// Input BLIF or PLA file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Input format (guessed from the extension if not given)
    #[arg(short = 'f', long = "format", value_enum)]
    format: Option<InputFormat>,

    /// Reduction step after essential extraction
    #[arg(short = 'S', long = "strategy", value_enum, default_value = "greedy")]
    strategy: Strategy,

    /// Widest function accepted
    #[arg(long = "max-inputs", default_value_t = MinimizerConfig::default().max_inputs)]
    max_inputs: usize,

    /// Output format
    #[arg(short = 'o', long = "output", value_enum, default_value = "sop")]
    output_format: OutputType,

    /// Literal order inside product terms
    #[arg(long = "order", value_enum, default_value = "positional")]
    order: Order,

    /// Write complements as `~a` instead of `a'`
    #[arg(long = "tilde")]
    tilde: bool,

    /// Provide execution summary
    #[arg(short = 's', long = "summary")]
    summary: bool,

    /// Suppress printing of solution
    #[arg(short = 'x', long = "no-output")]
    no_output: bool,

    /// Output file (writes to stdout if not specified)
    #[arg(short = 'O', long = "out-file")]
    output_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => simplelog::LevelFilter::Warn,
        1 => simplelog::LevelFilter::Info,
        2 => simplelog::LevelFilter::Debug,
        _ => simplelog::LevelFilter::Trace,
    };
    if let Err(e) = simplelog::TermLogger::init(
        level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    ) {
        eprintln!("Could not initialize logging: {}", e);
    }
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let format = args
        .format
        .unwrap_or_else(|| InputFormat::from_path(&args.input));
    let spec = match format {
        InputFormat::Blif => FunctionSpec::from_blif_file(&args.input),
        InputFormat::Pla => FunctionSpec::from_pla_file(&args.input),
    };
    let spec = match spec {
        Ok(spec) => spec,
        Err(e) => {
            eprintln!("Error reading '{}': {}", args.input.display(), e);
            process::exit(1);
        }
    };

    if args.summary {
        eprintln!(
            "Input: {} inputs, output '{}', {} rows",
            spec.inputs.len(),
            spec.output,
            spec.entries.len()
        );
    }

    let config = MinimizerConfig {
        strategy: args.strategy.into(),
        max_inputs: args.max_inputs,
    };
    let cover = match spec.minimize_with_config(&config) {
        Ok(cover) => cover,
        Err(e) => {
            eprintln!("Error minimizing '{}': {}", args.input.display(), e);
            process::exit(1);
        }
    };

    if args.summary {
        let stats = cover.stats();
        eprintln!("Initial terms:       {}", stats.initial_terms);
        eprintln!("Merge generations:   {}", stats.generations);
        eprintln!("Prime implicants:    {}", stats.prime_implicants);
        eprintln!("Essential:           {}", stats.essential);
        eprintln!("Added by reduction:  {}", stats.reduction);
        eprintln!("Cover literals:      {}", cover.literal_count());
    }

    if args.no_output {
        return;
    }

    let rendered = match args.output_format {
        OutputType::Sop => {
            let format = SopFormat {
                output_label: Some(spec.output.to_string()),
                literal_order: args.order.into(),
                complement: if args.tilde {
                    ComplementStyle::Prefix
                } else {
                    ComplementStyle::Postfix
                },
                ..SopFormat::default()
            };
            Ok(format!("{}\n", cover.to_sop(&format)))
        }
        OutputType::Pla => cover.to_pla_string(Some(spec.output.as_ref())),
    };
    let rendered = match rendered {
        Ok(rendered) => rendered,
        Err(e) => {
            eprintln!("Error rendering output: {}", e);
            process::exit(1);
        }
    };

    let written = match &args.output_file {
        Some(path) => fs::write(path, rendered),
        None => io::stdout().write_all(rendered.as_bytes()),
    };
    if let Err(e) = written {
        eprintln!("Error writing output: {}", e);
        process::exit(1);
    }
    if args.summary {
        if let Some(path) = &args.output_file {
            eprintln!("Wrote output to: {}", path.display());
        }
    }
}
