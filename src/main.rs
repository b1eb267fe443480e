use anyhow::Context;
use cache_validators::config::Config;
use cache_validators::engine::RequestValidators;
use cache_validators::pipeline::{Disposition, HeaderPipeline, RecordingResponse};
use cache_validators::resolver::RequestContext;
use clap::Parser;
use std::path::PathBuf;

/// Cache Validators - compute caching headers for a request and decide on 304
#[derive(Parser, Debug)]
#[command(name = "cache-validators")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file (defaults apply when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to a JSON request fixture
    #[arg(short, long)]
    request: PathBuf,

    /// If-None-Match value sent by the client
    #[arg(long)]
    if_none_match: Option<String>,

    /// If-Modified-Since value sent by the client
    #[arg(long)]
    if_modified_since: Option<String>,

    /// Simulate a response whose output has already started
    #[arg(long)]
    headers_sent: bool,

    /// Simulate a response without a structured status setter
    #[arg(long)]
    no_status_setter: bool,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => Config::default(),
    };
    config.validate()?;

    cache_validators::logging::init_subscriber(&config.logging)?;

    tracing::info!(
        config_file = ?args.config,
        request_file = %args.request.display(),
        etag = config.headers.add_etag_header,
        last_modified = config.headers.add_last_modified_header,
        expires = config.headers.add_expires_header,
        max_age = config.headers.cache_max_age_seconds,
        "Configuration loaded successfully"
    );

    let request = RequestContext::from_json_file(&args.request)
        .with_context(|| format!("loading request from {}", args.request.display()))?;

    let validators = RequestValidators {
        if_none_match: args.if_none_match,
        if_modified_since: args.if_modified_since,
    };

    let mut response = RecordingResponse::new();
    if args.headers_sent {
        response = response.committed();
    }
    if args.no_status_setter {
        response = response.without_status_setter();
    }

    let pipeline = HeaderPipeline::new(config.headers);
    let disposition = pipeline.handle(&request, &validators, &mut response);

    if let Some(line) = &response.status_line {
        println!("{}", line);
    }
    if let Some(status) = response.status {
        println!("Status: {}", status);
    }
    for (name, value) in &response.headers {
        println!("{}: {}", name, value);
    }

    match disposition {
        Disposition::Skipped(reason) => println!("# skipped: {}", reason),
        Disposition::HeadersAlreadySent => println!("# headers already sent, nothing written"),
        Disposition::Proceed { .. } => println!("# proceed"),
        Disposition::NotModified {
            validator,
            emission,
            ..
        } => println!("# not modified ({:?} match, {:?})", validator, emission),
    }

    Ok(())
}
