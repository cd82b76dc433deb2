use clap::Parser;
use colored::Colorize;
use log::LevelFilter;
use std::fs;
use std::process;
use std::time::Duration;

use reqshot_core::executor::{self, Executor};
use reqshot_core::{curl, ExecuteError, HttpMethod, Job};

mod logging;
mod output;
mod reqwest_client;

use logging::LogFormat;
use reqwest_client::{ReqwestTransport, TransportOptions};

/// reqshot: execute one HTTP request and report the outcome
#[derive(Parser, Debug)]
#[command(name = "reqshot", version, about = "Single-shot HTTP request executor")]
struct Cli {
    /// `[METHOD] URL`; the method defaults to GET, or POST when data is given
    #[arg(num_args = 0..=2, value_name = "METHOD URL")]
    target: Vec<String>,

    /// Load the job from a JSON file instead of the command line
    #[arg(short, long, value_name = "FILE")]
    job: Option<String>,

    /// Request header as `Name: value`; may be repeated
    #[arg(short = 'H', long = "header", value_name = "HEADER")]
    headers: Vec<String>,

    /// Request payload
    #[arg(short = 'd', long = "data")]
    data: Option<String>,

    /// Tag attached to every log line about this job
    #[arg(short, long)]
    info: Option<String>,

    /// Request timeout in seconds; 0 waits indefinitely
    #[arg(short, long, default_value_t = 30)]
    timeout: u64,

    /// Send the request through this proxy
    #[arg(long)]
    proxy: Option<String>,

    #[arg(long)]
    user_agent: Option<String>,

    /// Show verbose output (headers, body details)
    #[arg(short, long)]
    verbose: bool,

    /// Print the equivalent curl command without sending the request
    #[arg(long)]
    dry_run: bool,

    #[arg(long, default_value = "warn")]
    log_level: LevelFilter,

    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    log_format: LogFormat,
}

fn fail(stage: &str, e: impl std::fmt::Display) -> ! {
    eprintln!("{} {}: {}", "✖".red().bold(), stage, e);
    process::exit(1);
}

fn parse_header(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("Invalid header '{}', expected 'Name: value'", raw))?;
    Ok((name.trim().to_string(), value.trim().to_string()))
}

fn build_job(cli: &Cli) -> Result<Job, String> {
    let mut job = match cli.job {
        Some(ref path) => {
            let contents = fs::read_to_string(path)
                .map_err(|e| format!("Error reading file '{}': {}", path, e))?;
            Job::from_json(&contents).map_err(|e| format!("Invalid job file '{}': {}", path, e))?
        }
        None => Job::default(),
    };

    match cli.target.as_slice() {
        [] if cli.job.is_some() => {}
        [] => return Err("Missing URL (or --job FILE)".to_string()),
        [url] => {
            job.url = url.clone();
            if cli.job.is_none() && cli.data.is_some() {
                job.method = HttpMethod::Post;
            }
        }
        [method, url, ..] => {
            job.method = method.parse().map_err(|e| format!("{}", e))?;
            job.url = url.clone();
        }
    }

    for raw in &cli.headers {
        let (name, value) = parse_header(raw)?;
        job.headers.insert(name, value);
    }
    if let Some(ref data) = cli.data {
        job.payload = Some(data.clone().into_bytes());
    }
    if let Some(ref info) = cli.info {
        job.info = info.clone();
    }

    Ok(job)
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logger(cli.log_level, cli.log_format) {
        fail("Logger error", e);
    }

    let mut job = match build_job(&cli) {
        Ok(j) => j,
        Err(e) => fail("Job error", e),
    };

    if cli.dry_run {
        let rendered = executor::prepare(&job)
            .map_err(|e| e.to_string())
            .and_then(|req| curl::render(&req).map_err(|e| e.to_string()));
        match rendered {
            Ok(cmd) => {
                output::print_job(&job, cli.verbose);
                println!("{}", cmd);
                println!("{}", "  (dry-run: request not sent)".dimmed().italic());
                return;
            }
            Err(e) => fail("Job error", e),
        }
    }

    let transport = match ReqwestTransport::new(TransportOptions {
        proxy: cli.proxy.clone(),
        user_agent: cli.user_agent.clone(),
    }) {
        Ok(t) => t,
        Err(e) => fail("HTTP client error", e),
    };

    output::print_job(&job, cli.verbose);
    let executor = Executor::new(transport);
    match executor.execute(&mut job, Duration::from_secs(cli.timeout)) {
        Ok(exchange) => output::print_exchange(&exchange, cli.verbose),
        Err(e) => {
            if let ExecuteError::BadStatus { ref exchange, .. } = e {
                output::print_exchange(exchange, cli.verbose);
            }
            fail("Execution error", e);
        }
    }
}
