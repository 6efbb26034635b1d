use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "splice", version)]
struct Cli {
    /// Log conversion decisions to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the detected format of a project file.
    Detect(DetectArgs),
    /// Convert a project file and print the import outcome as JSON.
    Import(ImportArgs),
    /// Import a project file and print resolved layer properties at one instant.
    Eval(EvalArgs),
}

#[derive(Parser, Debug)]
struct DetectArgs {
    /// Input project file.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct ImportArgs {
    /// Input project file.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// JSON file with import options.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the outcome here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct EvalArgs {
    /// Input project file.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Project time in seconds.
    #[arg(long)]
    time: f64,

    /// Only this layer id (evaluated even when inactive).
    #[arg(long)]
    layer: Option<String>,

    /// JSON file with import options.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Detect(args) => cmd_detect(args),
        Command::Import(args) => cmd_import(args),
        Command::Eval(args) => cmd_eval(args),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "warn,splice=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn read_input(path: &Path) -> anyhow::Result<(String, Vec<u8>)> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read project '{}'", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok((name, bytes))
}

fn importer(config: Option<&Path>) -> anyhow::Result<splice::Importer> {
    let options = match config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("read config '{}'", path.display()))?;
            splice::ImportOptions::from_json(&raw)
                .with_context(|| format!("parse config '{}'", path.display()))?
        }
        None => splice::ImportOptions::default(),
    };
    Ok(splice::Importer::new(options))
}

fn cmd_detect(args: DetectArgs) -> anyhow::Result<()> {
    let (name, bytes) = read_input(&args.in_path)?;
    let content = splice::decode_input(&bytes);
    let format = splice::detect(&name, &content)?;
    println!("{format}");
    Ok(())
}

fn cmd_import(args: ImportArgs) -> anyhow::Result<()> {
    let (name, bytes) = read_input(&args.in_path)?;
    let outcome = importer(args.config.as_deref())?
        .import(&name, &bytes)
        .with_context(|| format!("import '{}'", args.in_path.display()))?;
    let json = serde_json::to_string_pretty(&outcome).context("serialize import outcome")?;

    match args.out {
        Some(out) => {
            if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(&out, json).with_context(|| format!("write '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_eval(args: EvalArgs) -> anyhow::Result<()> {
    let (name, bytes) = read_input(&args.in_path)?;
    let outcome = importer(args.config.as_deref())?
        .import(&name, &bytes)
        .with_context(|| format!("import '{}'", args.in_path.display()))?;
    let project = &outcome.project;

    let json = match &args.layer {
        Some(id) => {
            let layer = project
                .layer(id)
                .with_context(|| format!("no layer '{id}' in '{}'", project.name))?;
            serde_json::to_string_pretty(&splice::evaluate(layer, args.time))
        }
        None => serde_json::to_string_pretty(&splice::evaluate_frame(project, args.time)),
    }
    .context("serialize resolved properties")?;
    println!("{json}");
    Ok(())
}
