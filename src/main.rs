use std::io::Write;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;

use typemark::cli::{CliArgs, OutputMode, RunConfig, RunMode};
use typemark::markup::Highlighter;
use typemark::process::{collect_pages, process_all, RunSummary};
use typemark::profile::{self, Profile, ProfileSource};
use typemark::{Classifier, Config, TypeNames};

fn main() -> ExitCode {
    typemark::tracing::init();

    let run = match CliArgs::parse().into_config() {
        Ok(run) => run,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::from(2);
        }
    };

    match execute(run) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn execute(run: RunConfig) -> Result<ExitCode> {
    let config = Config::load();

    match &run.mode {
        RunMode::ListProfiles => {
            list_profiles(run.json)?;
            Ok(ExitCode::SUCCESS)
        }
        RunMode::Classify { token, next } => {
            let classifier = Classifier::new(load_names(&run, &config)?);
            let decision = classifier.classify(token, next.as_deref());
            if run.json {
                println!(
                    "{}",
                    serde_json::json!({
                        "token": token,
                        "next": next,
                        "classification": format!("{:?}", decision),
                    })
                );
            } else {
                println!("{:?}", decision);
            }
            Ok(ExitCode::SUCCESS)
        }
        RunMode::Process { paths, output } => {
            let classifier = Classifier::new(load_names(&run, &config)?);
            let classes = run.classes(&config);
            tracing::debug!(
                "Highlighting with type class {:?}, identifier class {:?}",
                classes.type_class,
                classes.identifier_class
            );
            let mut highlighter =
                Highlighter::new(classifier, classes).context("Failed to set up HTML parser")?;

            let pages = collect_pages(paths);
            if pages.is_empty() {
                bail!("No HTML pages found");
            }

            let stdout = std::io::stdout();
            let mut stdout = stdout.lock();
            let summary = process_all(&mut highlighter, &pages, output, &mut stdout);
            stdout.flush().context("Failed to flush stdout")?;

            report(&summary, output, run.json)?;

            let check_failed = *output == OutputMode::Check && summary.changed_pages().count() > 0;
            if !summary.failed.is_empty() || check_failed {
                Ok(ExitCode::FAILURE)
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

/// Union of every profile named on the command line or in config
fn load_names(run: &RunConfig, config: &Config) -> Result<TypeNames> {
    let ids = run.profile_ids(config);
    let mut names = profile::load_merged(&ids, typemark::config_paths::profiles_dir().as_deref())
        .with_context(|| format!("Failed to load profiles {:?}", ids))?;

    for path in &run.profile_files {
        let extra = Profile::from_file(path)
            .with_context(|| format!("Failed to load profile file {}", path.display()))?;
        tracing::info!("Loaded profile {} from {}", extra.name, path.display());
        names.merge(&extra.names);
    }

    if names.is_empty() {
        tracing::warn!("Active profiles contain no type names; nothing will be marked");
    }
    Ok(names)
}

#[derive(Serialize)]
struct ProfileListing {
    id: String,
    name: String,
    source: &'static str,
}

fn list_profiles(json: bool) -> Result<()> {
    let listing: Vec<ProfileListing> = profile::list_available_profiles()
        .into_iter()
        .map(|info| ProfileListing {
            id: info.id,
            name: info.name,
            source: match info.source {
                ProfileSource::User => "user",
                ProfileSource::Builtin => "builtin",
            },
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
    } else {
        for entry in &listing {
            println!("{:<20} {:<20} ({})", entry.id, entry.name, entry.source);
        }
    }
    Ok(())
}

fn report(summary: &RunSummary, output: &OutputMode, json: bool) -> Result<()> {
    if json {
        let rendered = serde_json::to_string_pretty(summary)?;
        if *output == OutputMode::Stdout {
            eprintln!("{}", rendered);
        } else {
            println!("{}", rendered);
        }
        return Ok(());
    }

    for failed in &summary.failed {
        eprintln!("error: {}", failed.error);
    }

    if *output == OutputMode::Check {
        for page in summary.changed_pages() {
            eprintln!("would mark {} tokens in {}", page.marked, page.path.display());
        }
    }

    // Keep stdout clean when the page itself was printed there
    if *output != OutputMode::Stdout {
        eprintln!(
            "{} pages, {} tokens marked, {} failed",
            summary.pages.len(),
            summary.marked(),
            summary.failed.len()
        );
    }
    Ok(())
}
