//! Dispatch from parsed arguments to the API facade.
//!
//! Flow: parse → (completions / config need nothing else) → load config → install logging
//! → open registry → run one command → close registry.

use super::logging;
use super::render::{RepoSummary, Renderer};
use super::setup::{Cli, Commands};
use anyhow::{bail, Context, Result};
use clap::{CommandFactory, Parser};
use nero::api::NeroApi;
use nero::config::NeroConfig;
use nero::registry::Registry;
use std::fs;
use std::path::Path;
use tracing::info;

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(*shell, &mut cmd, "nero", &mut std::io::stdout());
            return Ok(());
        }
        Commands::Config { force } => {
            logging::init("info", cli.verbose);
            return write_config(&cli.config, *force);
        }
        _ => {}
    }

    let config = NeroConfig::load(&cli.config)
        .with_context(|| format!("failed to load config {}", cli.config.display()))?;
    logging::init(&config.log_level, cli.verbose);

    let api = NeroApi::new(Registry::from_config(&config)?);
    let renderer = Renderer::new(cli.json);

    let result = dispatch(&api, cli.command, renderer);
    let closed = api.registry().close();
    let output = result?;
    closed?;

    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}

fn dispatch(api: &NeroApi, command: Commands, renderer: Renderer) -> Result<String> {
    let output = match command {
        Commands::Upload { repo, file, meta } => {
            let bytes =
                fs::read(&file).with_context(|| format!("failed to read {}", file.display()))?;
            let view = api.upload_bytes(&repo, &bytes, meta.map(Into::into))?;
            info!(repo = %repo, id = %view.id, file = %file.display(), "uploaded media");
            renderer.media(&view)
        }
        Commands::List { repo } => renderer.media_list(&api.list(&repo)?),
        Commands::Get { repo, id } => renderer.media(&api.get(&repo, &id)?),
        Commands::Random {
            repo,
            count,
            category,
        } => {
            let views = match category {
                Some(category) => api.random_by_category(&repo, &category, count)?,
                None => api.random(&repo, count)?,
            };
            renderer.media_list(&views)
        }
        Commands::Remove { repo, id } => renderer.removed(&api.remove(&repo, &id)?),
        Commands::Repos => {
            let repos: Vec<RepoSummary> = api.registry().iter().map(RepoSummary::from).collect();
            renderer.repos(&repos)
        }
        Commands::Config { .. } | Commands::Completions { .. } => String::new(),
    };
    Ok(output)
}

fn write_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, NeroConfig::template())
        .with_context(|| format!("failed to write {}", path.display()))?;

    info!(path = %path.display(), "wrote example configuration");
    println!("Wrote {}", path.display());
    Ok(())
}
