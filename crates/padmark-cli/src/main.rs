//! padmark: pad, resize and watermark a folder of images.
//!
//! Outcomes are printed as JSON on stdout; logs go to stderr (filter with RUST_LOG).

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use padmark_cli::{error_response, init_tracing, print_json, SettingsArgs};
use padmark_core::RuntimeConfig;
use padmark_processing::{generate_preview, render_preview, run_batch_with_cancel};
use tokio_util::sync::CancellationToken;

#[derive(Parser)]
#[command(name = "padmark", about = "Batch square-pad, resize and watermark images")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process every image of the input folder into the output folder
    Run {
        #[command(flatten)]
        settings: SettingsArgs,
    },
    /// Render the first image of the input folder without writing the output folder
    Preview {
        #[command(flatten)]
        settings: SettingsArgs,
        /// Write the PNG here instead of printing a data URL
        #[arg(long, value_name = "FILE")]
        save: Option<PathBuf>,
    },
    /// Inspect or update the settings file
    Settings {
        #[command(subcommand)]
        sub: SettingsCommands,
    },
}

#[derive(Subcommand)]
enum SettingsCommands {
    /// Print the saved settings (null when none can be read)
    Show {
        /// Settings file (defaults to PADMARK_SETTINGS or settings.json)
        #[arg(long, value_name = "PATH")]
        settings: Option<PathBuf>,
    },
    /// Merge the given overrides into the saved settings
    Save {
        #[command(flatten)]
        settings: SettingsArgs,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let runtime = match RuntimeConfig::from_env() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Invalid environment configuration: {:#}", e);
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&runtime.log_filter);

    let cli = Cli::parse();

    match execute(cli.command, &runtime).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %format!("{:#}", e), "Command failed");
            if let Err(print_err) = print_json(&error_response(&e)) {
                eprintln!("{:#}", print_err);
            }
            ExitCode::FAILURE
        }
    }
}

async fn execute(command: Commands, runtime: &RuntimeConfig) -> anyhow::Result<()> {
    match command {
        Commands::Run { settings } => {
            let config = settings.batch_config(runtime)?;

            let cancel = CancellationToken::new();
            let on_signal = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    tracing::warn!("Interrupt received, finishing files in flight");
                    on_signal.cancel();
                }
            });

            let outcome = run_batch_with_cancel(&config, cancel).await?;
            print_json(&outcome)?;
        }
        Commands::Preview { settings, save } => {
            let config = settings.batch_config(runtime)?;
            match save {
                Some(path) => {
                    let preview = render_preview(&config).await?;
                    tokio::fs::write(&path, &preview.png)
                        .await
                        .with_context(|| format!("Failed to write preview to {}", path.display()))?;
                    print_json(&serde_json::json!({
                        "success": true,
                        "filename": preview.filename,
                        "savedTo": path,
                    }))?;
                }
                None => print_json(&generate_preview(&config).await?)?,
            }
        }
        Commands::Settings { sub } => match sub {
            SettingsCommands::Show { settings } => {
                let args = SettingsArgs {
                    settings,
                    ..SettingsArgs::default()
                };
                let store = args.store(runtime);
                print_json(&store.load())?;
            }
            SettingsCommands::Save { settings } => {
                let store = settings.store(runtime);
                let merged = settings.merged_settings(&store);
                store
                    .save(&merged)
                    .with_context(|| format!("Failed to save {}", store.path().display()))?;
                tracing::info!(path = %store.path().display(), "Settings saved");
                print_json(&merged)?;
            }
        },
    }

    Ok(())
}
