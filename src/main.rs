use std::io::Read;

use planarity_witness::{
    CheckContext, CheckOutcome, CheckRequest, HttpReply, Upload, check_planarity, output,
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Json(serde_json::Error),
    Check(planarity_witness::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::Check(err) => write!(f, "{err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<planarity_witness::Error> for CliError {
    fn from(value: planarity_witness::Error) -> Self {
        Self::Check(value)
    }
}

#[derive(Debug, Default)]
struct Args {
    input: Option<String>,
    algorithm: Option<String>,
    scale: Option<f64>,
    seed: Option<u64>,
    pretty: bool,
    dot: bool,
}

fn usage() -> &'static str {
    "planarity-witness\n\
\n\
USAGE:\n\
  planarity-witness [--algorithm Left-Right|kuratowski_search] [--scale <n>] [--seed <n>] [--pretty] [--dot] [<path>|-]\n\
\n\
NOTES:\n\
  - Reads the graph from stdin when <path> is omitted or '-'.\n\
  - Prints the check result as JSON, or as a DOT graph with conflict edges in red when --dot is given.\n\
  - Log verbosity follows RUST_LOG (default: warn).\n"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "--pretty" => args.pretty = true,
            "--dot" => args.dot = true,
            "--algorithm" => {
                let Some(name) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.algorithm = Some(name.clone());
            }
            "--scale" => {
                let Some(scale) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                let scale = scale.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
                if !(scale.is_finite() && scale > 0.0) {
                    return Err(CliError::Usage(usage()));
                }
                args.scale = Some(scale);
            }
            "--seed" => {
                let Some(seed) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.seed = Some(seed.parse::<u64>().map_err(|_| CliError::Usage(usage()))?);
            }
            other if other.starts_with("--") => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<Upload, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = Vec::new();
            std::io::stdin().read_to_end(&mut buf)?;
            Ok(Upload::new(buf, ""))
        }
        Some(path) => Ok(Upload::new(std::fs::read(path)?, path)),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

fn run(args: Args) -> Result<HttpReply, CliError> {
    let mut ctx = CheckContext::default();
    if let Some(scale) = args.scale {
        ctx.layout.scale = scale;
    }
    if let Some(seed) = args.seed {
        ctx.layout.seed = seed;
    }

    let request = CheckRequest {
        file: Some(read_input(args.input.as_deref())?),
        algorithm: args.algorithm,
    };
    let reply = check_planarity(&ctx, &request);

    match &reply.body {
        CheckOutcome::Checked(checked) if args.dot => print!("{}", output::to_dot(checked)?),
        body => write_json(body, args.pretty)?,
    }
    Ok(reply)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(reply) if reply.status_code >= 500 => std::process::exit(1),
        Ok(reply) if reply.status_code >= 400 => std::process::exit(2),
        Ok(_) => {}
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
