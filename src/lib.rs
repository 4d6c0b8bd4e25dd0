// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod listfile;
pub mod logging;
pub mod pipeline;
pub mod types;
pub mod watch;

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::cli::CliArgs;
use crate::config::{load_settings, validate_paths, Settings};
use crate::errors::Result;
use crate::exec::TokioSupervisor;
use crate::fs::{FileSystem, RealFileSystem};
use crate::listfile::{distribute, targets, Listfile};
use crate::pipeline::Pipeline;
use crate::watch::{reap_run, spawn_watcher, DeliverySwitch, Dispatcher, FilePattern};

/// High-level entry point used by `main.rs`.
///
/// This wires together, in order:
/// - settings loading
/// - listfile loading (+ custom overlay)
/// - path validation
/// - listfile distribution to each converter (and Epsilon)
/// - either one pipeline run (`--once`) or the file watcher until Ctrl-C
pub async fn run(args: CliArgs) -> Result<()> {
    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);

    let settings = load_settings(&args.config)?;

    let sources = [PathBuf::from(&args.listfile), PathBuf::from(&args.custom_listfile)];
    let listfile = Listfile::load(fs.as_ref(), &sources)?;

    validate_paths(&settings, fs.as_ref())?;

    if args.dry_run {
        print_dry_run(&settings, &listfile);
        return Ok(());
    }

    distribute(&listfile, &settings, fs.as_ref())?;

    let pipeline = Arc::new(Pipeline::from_settings(
        &settings,
        Arc::clone(&fs),
        Arc::new(TokioSupervisor),
    )?);
    let stages: Vec<&str> = pipeline.stage_names().collect();
    info!(?stages, "conversion pipeline ready");

    if args.once {
        let summary = pipeline.run().await?;
        info!(harvested = summary.harvested_count(), "done processing map");
        return Ok(());
    }

    watch_until_shutdown(&settings, pipeline).await
}

/// Run the watcher + dispatcher loop until Ctrl-C or the watcher goes away.
async fn watch_until_shutdown(settings: &Settings, pipeline: Arc<Pipeline>) -> Result<()> {
    let switch = DeliverySwitch::new();
    let dispatcher = Dispatcher::new(pipeline, switch.clone());

    let (_watcher_handle, mut changes) =
        spawn_watcher(&settings.monitor_dir, FilePattern::adt()?, switch)?;

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    let mut last_run = None;

    loop {
        tokio::select! {
            change = changes.recv() => match change {
                Some(path) => {
                    // A new run only starts once the gate is idle, so the
                    // previous task has already finished its work.
                    if let Some(run) = dispatcher.dispatch(&path) {
                        if let Some(previous) = last_run.replace(run) {
                            reap_run(previous).await;
                        }
                    }
                }
                None => {
                    info!("watcher channel closed; exiting");
                    break;
                }
            },
            res = &mut shutdown => {
                if let Err(e) = res {
                    eprintln!("failed to listen for Ctrl+C: {e}");
                }
                info!("shutdown requested");
                break;
            }
        }
    }

    if let Some(run) = last_run.take() {
        if !run.is_finished() {
            info!("abandoning in-progress map update");
            run.abort();
        }
        reap_run(run).await;
    }

    Ok(())
}

/// Dry-run output: resolved settings and the listfiles that would be written.
fn print_dry_run(settings: &Settings, listfile: &Listfile) {
    println!("autoupconvert dry-run");
    println!("  monitor_dir           = {}", settings.monitor_dir.display());
    println!("  french_converter_path = {}", settings.french_converter_path.display());
    println!("  mtxp_converter_path   = {}", settings.mtxp_converter_path.display());
    println!("  output_dir            = {}", settings.output_dir.display());
    match &settings.rename {
        Some(rule) => println!("  rename                = {:?} -> {:?}", rule.from, rule.to),
        None => println!("  rename                = (none)"),
    }
    match &settings.epsilon_dir {
        Some(dir) => println!("  epsilon_dir           = {}", dir.display()),
        None => println!("  epsilon_dir           = (disabled)"),
    }
    println!();

    println!("listfile: {} entries", listfile.len());
    for target in targets(settings) {
        let lines = target.subset.render(listfile).lines().count();
        println!(
            "  - {} -> {} ({} lines)",
            target.subset,
            target.destination.display(),
            lines
        );
    }
}
