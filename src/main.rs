use anyhow::{Context, Result};
use bdnet2verilog::Options;
use clap::{CommandFactory, Parser};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::process;

const EXIT_FAILURE: i32 = 1;
const EXIT_HELP: i32 = 2;

/// Converts a netlist in bdnet format to Verilog. Output goes to stdout.
#[derive(Debug, Parser)]
#[command(name = "bdnet2verilog", disable_help_flag = true)]
struct Args {
    /// Don't add power nodes to instances; only nodes present in the
    /// INSTANCE statement are used
    #[arg(short = 'p')]
    no_power: bool,

    /// Keep the letter case of instance cell names
    #[arg(short = 'c')]
    keep_case: bool,

    /// Fail on lines inside INPUT, OUTPUT or INSTANCE blocks that are not
    /// `name : value` records
    #[arg(short, long)]
    strict: bool,

    /// Log progress to stderr (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print this message
    #[arg(short = 'h', short_alias = 'H')]
    help: bool,

    /// bdnet netlist
    netlist: Option<PathBuf>,
}

fn usage() {
    eprintln!("{}", Args::command().render_help());
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .try_init();
}

fn run(args: &Args) -> Result<()> {
    let path = args
        .netlist
        .as_ref()
        .context("couldn't find a filename as input")?;
    let file = File::open(path)
        .with_context(|| format!("couldn't open {} for read", path.display()))?;

    let opts = Options {
        implicit_power: !args.no_power,
        preserve_case: args.keep_case,
        strict: args.strict,
        ..Options::default()
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    bdnet2verilog::translate(BufReader::new(file), &mut out, &opts)
        .with_context(|| format!("translating {}", path.display()))?;
    out.flush()?;
    Ok(())
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            usage();
            process::exit(EXIT_HELP);
        }
    };

    init_logging(args.verbose);

    if args.help {
        usage();
        process::exit(EXIT_HELP);
    }

    if let Err(e) = run(&args) {
        eprintln!("error: {:#}", e);
        process::exit(EXIT_FAILURE);
    }
}
