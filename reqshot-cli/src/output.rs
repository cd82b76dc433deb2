//! Terminal rendering of jobs and responses.
use colored::{ColoredString, Colorize};
use reqshot_core::{Exchange, HttpMethod, Job};

const MAX_BODY_LINES: usize = 50;

fn method_colored(method: &HttpMethod) -> ColoredString {
    let s = method.as_str();
    match method {
        HttpMethod::Get => s.green().bold(),
        HttpMethod::Post => s.yellow().bold(),
        HttpMethod::Put => s.blue().bold(),
        HttpMethod::Patch => s.magenta().bold(),
        HttpMethod::Delete => s.red().bold(),
        HttpMethod::Head => s.cyan().bold(),
        HttpMethod::Options
        | HttpMethod::Trace
        | HttpMethod::Connect
        | HttpMethod::Custom(_) => s.white().bold(),
    }
}

pub fn print_job(job: &Job, verbose: bool) {
    println!("{} {}", method_colored(&job.method), job.url.underline());

    if !job.info.is_empty() {
        println!("{} {}", "▸".green(), job.info.bold());
    }

    if verbose {
        for (k, v) in &job.headers {
            println!("  {}: {}", k.dimmed(), v);
        }
        if let Some(b) = job.body() {
            println!("  {}", "Body:".dimmed());
            print_body(&String::from_utf8_lossy(b));
        }
    }
}

pub fn print_exchange(exchange: &Exchange, verbose: bool) {
    let status = exchange.status_code;
    let status_colored = match status {
        200..=299 => format!("{}", status).green().bold(),
        300..=399 => format!("{}", status).cyan().bold(),
        400..=499 => format!("{}", status).yellow().bold(),
        500..=599 => format!("{}", status).red().bold(),
        _ => format!("{}", status).white().bold(),
    };

    println!("  {} {}", "Status:".dimmed(), status_colored);

    if verbose {
        println!("  {} {}", "Protocol:".dimmed(), exchange.response.version);
        if exchange.response.url != exchange.job.url {
            println!("  {} {}", "Final URL:".dimmed(), exchange.response.url);
        }
        if let Some(ref proxy) = exchange.proxy {
            println!("  {} {}", "Proxy:".dimmed(), proxy);
        }
        println!("  {}", "Response Headers:".dimmed());
        for (k, v) in &exchange.headers {
            println!("    {}: {}", k.as_str().dimmed(), v.as_str());
        }
    }

    let resp_body = exchange.body_text();
    if !resp_body.is_empty() {
        println!("  {}", "Response Body:".dimmed());
        print_body(&resp_body);
    }
}

/// Pretty-prints JSON bodies; anything else is cut after a fixed number of lines.
fn print_body(body: &str) {
    for line in body_lines(body) {
        println!("    {}", line);
    }
}

fn body_lines(body: &str) -> Vec<String> {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        let pretty = serde_json::to_string_pretty(&json).unwrap_or_else(|_| body.to_string());
        return pretty.lines().map(str::to_string).collect();
    }

    let lines: Vec<&str> = body.lines().collect();
    let mut out: Vec<String> = lines
        .iter()
        .take(MAX_BODY_LINES)
        .map(|l| l.to_string())
        .collect();
    if lines.len() > MAX_BODY_LINES {
        out.push(
            format!("... ({} more lines)", lines.len() - MAX_BODY_LINES)
                .dimmed()
                .to_string(),
        );
    }
    out
}
