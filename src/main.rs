use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use j1939_dl::{catalog, Config, DurationPolicy, Format, RequestDispatcher};

#[derive(Parser, Debug)]
#[command(name = "j1939-dl", version, about = "Request J1939 datasets from a generation server")]
struct Args {
    /// Path to a JSON config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// How verbose the output should be, can be set up to 3 times. Has no effect if RUST_LOG is set
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a dataset and save it
    Generate(GenerateArgs),
    /// List the PGNs the generation server offers
    Pgns,
}

#[derive(clap::Args, Debug)]
struct GenerateArgs {
    /// PGN to include; repeat the flag or separate with commas
    #[arg(short, long = "pgn", value_name = "PGN", value_delimiter = ',')]
    pgns: Vec<String>,

    /// Include every listed PGN
    #[arg(long)]
    all: bool,

    /// Output format (csv, trc or txt), per default taken from the config
    #[arg(short, long)]
    format: Option<Format>,

    /// Requested duration, sent exactly as given
    #[arg(short, long)]
    duration: Option<String>,

    /// Base URL of the generation server, e.g. http://127.0.0.1:3000
    #[arg(short, long)]
    server: Option<String>,

    /// Directory to save the dataset in
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Refuse durations that are not a whole number of seconds
    #[arg(long)]
    strict_duration: bool,

    /// Use the file name suggested by the server
    #[arg(long)]
    server_filename: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    tracing_init(args.verbose);

    match run(args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn tracing_init(verbose: u8) {
    let filter = EnvFilter::builder()
        .with_default_directive(
            match verbose {
                0 => LevelFilter::WARN,
                1 => LevelFilter::INFO,
                2 => LevelFilter::DEBUG,
                _ => LevelFilter::TRACE,
            }
            .into(),
        )
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(args: Args) -> j1939_dl::Result<ExitCode> {
    let config = match &args.config {
        Some(path) => Config::from_json_file(path)?,
        None => Config::default(),
    };

    match args.command {
        Command::Pgns => {
            print_catalog();
            Ok(ExitCode::SUCCESS)
        }
        Command::Generate(generate) => run_generate(config, generate).await,
    }
}

fn print_catalog() {
    println!("{:<7} {:<12} {:>9}  NAME", "PGN", "CAN ID", "CYCLE");
    for entry in catalog::all() {
        println!(
            "{:<7} {:<12} {:>7}ms  {}",
            entry.pgn,
            entry.can_id_hex(),
            entry.cycle_time_ms,
            entry.name
        );
    }
}

async fn run_generate(mut config: Config, args: GenerateArgs) -> j1939_dl::Result<ExitCode> {
    if let Some(server) = args.server {
        config.server.base_url = server;
    }
    if let Some(dir) = args.output_dir {
        config.download.download_dir = dir;
    }
    if args.strict_duration {
        config.form.duration_policy = DurationPolicy::Numeric;
    }
    if args.server_filename {
        config.download.use_server_filename = true;
    }

    let dispatcher = RequestDispatcher::new(config)?;
    let form = dispatcher.form();

    if args.all {
        for entry in catalog::all() {
            form.check(entry.id());
        }
    }
    for raw in &args.pgns {
        let pgn: j1939_dl::PgnId = raw.parse()?;
        if catalog::lookup(&pgn).is_none() {
            tracing::warn!(pgn = %pgn, "PGN is not in the catalog, the server may reject it");
        }
        form.check(pgn);
    }
    if let Some(format) = args.format {
        form.set_format(format);
    }
    if let Some(duration) = args.duration {
        form.set_duration(duration);
    }

    // Notices and diagnostics have already been reported by the dispatcher.
    match dispatcher.generate().await {
        Ok(file) => {
            println!("✓ Saved {} ({} bytes)", file.path.display(), file.bytes);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            tracing::debug!(code = e.error_code(), kind = ?e.kind(), "generation did not complete");
            Ok(ExitCode::FAILURE)
        }
    }
}
