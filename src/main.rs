use asset_resizer::error::{AppError, Result};
use asset_resizer::file_utils::suggested_save_name;
use asset_resizer::report::BatchReport;
use asset_resizer::request::{Resampling, ResizeMode};
use asset_resizer::services::{DirectoryService, Preview, PreviewService, ResizeJob, ResizeService};
use asset_resizer::state::AppState;
use log::info;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::mpsc;

const HELP: &str = "\
asset-resizer: browse, preview and batch-resize image assets

USAGE:
  asset-resizer list <DIR> [--json]
  asset-resizer preview <DIR> <NAME> [--json]
  asset-resizer resize <DIR> --width W --height H [--filter F] [--json] <NAME>...
  asset-resizer save-as <DIR> --width W --height H [--output PATH] [--filter F] [--json] <NAME>

OPTIONS:
  --filter F   nearest | bilinear (default bilinear)
  --output P   save-as destination (default <DIR>/resized_<NAME>)
  --json       print machine-readable output
  -h, --help   show this text

Set RUST_LOG to control log output.
";

fn main() -> ExitCode {
    let mut logger = env_logger::Builder::from_default_env();
    #[cfg(debug_assertions)]
    logger.filter_level(log::LevelFilter::Debug);
    logger.init();

    match run(pico_args::Arguments::from_env()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::from(2)
        }
    }
}

/// Options shared by the resize and save-as commands.
struct ResizeArgs {
    width: String,
    height: String,
    filter: Option<Resampling>,
    output: Option<PathBuf>,
}

impl ResizeArgs {
    fn from_args(args: &mut pico_args::Arguments) -> Result<Self> {
        Ok(Self {
            width: args.value_from_str("--width")?,
            height: args.value_from_str("--height")?,
            filter: args.opt_value_from_fn("--filter", str::parse::<Resampling>)?,
            output: args.opt_value_from_str("--output")?,
        })
    }
}

/// Returns whether the command fully succeeded.
fn run(mut args: pico_args::Arguments) -> Result<bool> {
    if args.contains(["-h", "--help"]) {
        print!("{}", HELP);
        return Ok(true);
    }

    let json = args.contains("--json");
    let command = args
        .subcommand()?
        .ok_or_else(|| AppError::Usage("missing command, see --help".to_string()))?;

    let app_state = AppState::new();
    let directories = DirectoryService::new(app_state.workspace.clone());

    match command.as_str() {
        "list" => {
            let (dir, _) = positionals(args)?;
            let entries = directories.open(dir);
            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                for entry in &entries {
                    println!("{}", entry.name());
                }
            }
            Ok(true)
        }
        "preview" => {
            let (dir, names) = positionals(args)?;
            directories.open(dir);
            let previews = PreviewService::new(app_state.workspace.clone());
            let name = names.first().map(String::as_str);
            let preview = previews.preview(name);
            print_preview(name, &preview, json)?;
            Ok(matches!(preview, Preview::Image(_)))
        }
        "resize" | "save-as" => {
            let options = ResizeArgs::from_args(&mut args)?;
            let (dir, selection) = positionals(args)?;
            let mode = if command == "save-as" {
                let output = match (options.output, selection.as_slice()) {
                    (Some(path), _) => path,
                    (None, [name]) => dir.join(suggested_save_name(name)),
                    (None, _) => PathBuf::new(),
                };
                ResizeMode::SaveAs(output)
            } else {
                ResizeMode::Overwrite
            };

            directories.open(dir);
            let resizer = ResizeService::new(app_state.workspace.clone());
            let mut job = resizer.prepare(selection, &options.width, &options.height, mode)?;
            if let Some(filter) = options.filter {
                job = job.with_resampling(filter);
            }

            let report = run_on_worker(&resizer, job)?;
            print_report(&report, json)?;
            Ok(report.is_success())
        }
        other => Err(AppError::Usage(format!("unknown command '{}'", other))),
    }
}

/// Runs the batch on the worker and waits for its report.
fn run_on_worker(resizer: &ResizeService, job: ResizeJob) -> Result<BatchReport> {
    let (tx, rx) = mpsc::channel();
    resizer.submit(job, move |report| {
        let _ = tx.send(report);
    })?;
    let report = rx.recv().map_err(|_| AppError::WorkerLost)?;
    info!("Batch finished: {} failures", report.failures.len());
    Ok(report)
}

fn positionals(args: pico_args::Arguments) -> Result<(PathBuf, Vec<String>)> {
    let mut free = args.finish().into_iter();
    let dir = free
        .next()
        .map(PathBuf::from)
        .ok_or_else(|| AppError::Usage("missing directory".to_string()))?;
    let names = free
        .map(|arg| {
            arg.into_string()
                .map_err(|raw| AppError::Usage(format!("name is not valid UTF-8: {:?}", raw)))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok((dir, names))
}

fn print_preview(name: Option<&str>, preview: &Preview, json: bool) -> Result<()> {
    if json {
        let value = serde_json::json!({
            "name": name,
            "dimensions": preview.dimensions(),
            "placeholder": preview.placeholder(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }
    match preview.placeholder() {
        Some(text) => println!("{}", text),
        None => println!("{}", name.unwrap_or_default()),
    }
    println!("{}", preview.size_label());
    Ok(())
}

fn print_report(report: &BatchReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!("{}", report);
    }
    Ok(())
}
