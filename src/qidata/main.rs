use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use qidata::api::{AnnotationRequest, CmdMessage, ConfigAction, FileReport, MessageLevel, QidataApi};
use qidata::error::{QidataError, Result};
use qidata::version::AnnotationVersion;
use std::path::PathBuf;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

mod args;
use args::{AnnotationArgs, Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let api = QidataApi::new(config_dir()?)?;

    match cli.command {
        Commands::Show { file, json } => handle_show(&api, file, json),
        Commands::Detect { files } => handle_detect(&api, files),
        Commands::Add(args) => handle_add(&api, args),
        Commands::Remove(args) => handle_remove(&api, args),
        Commands::Config { key, value } => handle_config(&api, key, value),
    }
}

/// `RUST_LOG` wins; otherwise `-v` selects debug and the default is warn.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,qidata={}", level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).without_time())
        .init();
}

fn config_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os("QIDATA_HOME") {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "qidata", "qidata")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| QidataError::Api("Could not determine config dir".into()))
}

fn handle_show(api: &QidataApi, file: PathBuf, json: bool) -> Result<()> {
    let result = api.show(&file)?;
    if let Some(report) = &result.report {
        if json {
            let records = report.store.to_records();
            let content =
                serde_json::to_string_pretty(&records).map_err(QidataError::Serialization)?;
            println!("{}", content);
            return Ok(());
        }
        print_report(report);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_detect(api: &QidataApi, files: Vec<PathBuf>) -> Result<()> {
    let result = api.detect(&files)?;
    for (path, version) in &result.versions {
        println!("{}: {}", path.display(), format_version(*version));
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_add(api: &QidataApi, args: AnnotationArgs) -> Result<()> {
    let (file, request) = into_request(args);
    let result = api.add_annotation(&file, &request)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_remove(api: &QidataApi, args: AnnotationArgs) -> Result<()> {
    let (file, request) = into_request(args);
    let result = api.remove_annotation(&file, &request)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(api: &QidataApi, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };

    let result = api.config(action)?;
    if let Some(config) = &result.config {
        for (key, value) in config.entries() {
            println!("{} = {}", key, value);
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn into_request(args: AnnotationArgs) -> (PathBuf, AnnotationRequest) {
    let request = AnnotationRequest {
        type_name: args.type_name,
        annotator: args.annotator,
        fields: args.fields,
        location: args.location,
    };
    (args.file, request)
}

fn format_version(version: Option<AnnotationVersion>) -> ColoredString {
    match version {
        Some(v) if v.is_current() => format!("version {}", v).green(),
        Some(v) => format!("version {} (outdated)", v).yellow(),
        None => "not annotated".dimmed(),
    }
}

fn print_report(report: &FileReport) {
    println!(
        "{} {}",
        report.path.display().to_string().bold(),
        format!("({})", report.kind).dimmed()
    );
    if !report.store.is_empty() {
        print!("{}", report.store);
    }
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}
