use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::{Duration, Instant};

use tidyrules::cli::args::{Cli, Commands, ConfigAction};
use tidyrules::cli::output;
use tidyrules::cli::report::RunReport;
use tidyrules::common::config::{Config, OutputFormat};
use tidyrules::common::{format, safety};
use tidyrules::engine::{self, RunOptions, ScanEvent};
use tidyrules::rules::{self, Rule, RuleSource};

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("tidyrules=debug")
            .with_writer(std::io::stderr)
            .init();
    }

    let config = Config::load()?;
    let format: OutputFormat = cli
        .format
        .clone()
        .map(Into::into)
        .unwrap_or(config.output_format);

    match cli.command {
        Commands::Run {
            ref root,
            ref rules,
            ref preset,
            apply,
            dry_run,
            yes,
        } => cmd_run(
            &cli,
            &config,
            format,
            root,
            rules.as_deref(),
            preset.as_deref(),
            dry_run || (!apply && config.dry_run),
            yes,
        ),

        Commands::Check { ref file } => cmd_check(&cli, format, file),

        Commands::Presets { ref name } => cmd_presets(name.as_deref()),

        Commands::Config { ref action } => cmd_config(action),

        Commands::Completions { ref shell } => {
            use clap::CommandFactory;
            let mut cmd = Cli::command();
            let shell = match shell {
                tidyrules::cli::args::CompletionShell::Bash => clap_complete::Shell::Bash,
                tidyrules::cli::args::CompletionShell::Zsh => clap_complete::Shell::Zsh,
                tidyrules::cli::args::CompletionShell::Fish => clap_complete::Shell::Fish,
            };
            clap_complete::generate(shell, &mut cmd, "tidyrules", &mut std::io::stdout());
            Ok(())
        }
    }
}

// ─── Run ──────────────────────────────────────────────────────────────────────

#[allow(clippy::too_many_arguments)]
fn cmd_run(
    cli: &Cli,
    config: &Config,
    format: OutputFormat,
    root: &Path,
    rules_file: Option<&Path>,
    preset: Option<&str>,
    dry_run: bool,
    yes: bool,
) -> Result<()> {
    if !root.is_dir() {
        anyhow::bail!("Path is not a directory: {}", root.display());
    }

    // Parse everything before touching the filesystem
    let source = RuleSource::resolve(root, rules_file, preset, config)?;
    let rules = source.load()?;

    let root = std::path::absolute(root)?;
    safety::check_root(&root, dry_run)?;

    let show_progress = !cli.quiet && format == OutputFormat::Human;
    if show_progress {
        println!();
        println!(
            "  {} Applying {} rules from {} to {}",
            "🔍",
            rules.len(),
            source.to_string().cyan(),
            format::format_path(&root).cyan()
        );
    }

    if !dry_run && config.confirm && !yes {
        let human = format == OutputFormat::Human;
        let preview = execute(&root, &rules, RunOptions::dry_run(), false);

        // Machine-readable formats keep stdout for the report alone
        if preview.paths.is_empty() {
            if human {
                println!("  {} Nothing to delete!", "✨");
                return Ok(());
            }
        } else {
            if human {
                output::print_run_report(&preview, cli.verbose);
            }
            let question = format!(
                "PERMANENTLY DELETE {}?",
                format::format_count(preview.paths.len())
            );
            if !confirm(&question, human)? {
                if human {
                    println!("  {} Cancelled", "✗".red());
                } else {
                    eprintln!("Cancelled");
                }
                return Ok(());
            }
        }
    }

    let options = RunOptions { dry_run };
    let report = execute(&root, &rules, options, show_progress);

    match format {
        OutputFormat::Human => output::print_run_report(&report, cli.verbose),
        OutputFormat::Json => output::print_run_json(&report),
        OutputFormat::Quiet => output::print_run_quiet(&report),
    }

    Ok(())
}

/// Run the engine, folding its events into a report and a spinner
fn execute(root: &Path, rules: &[Rule], options: RunOptions, show_progress: bool) -> RunReport {
    let start = Instant::now();
    let mut report = RunReport::new(options.dry_run);

    let pb = if show_progress {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {pos} checks, {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    engine::run_with_events(root, rules, &options, |event| {
        if let Some(ref pb) = pb {
            match &event {
                ScanEvent::ScanDirectory { directory } => {
                    pb.inc(1);
                    pb.set_message(format::truncate(&format::format_path(directory), 50));
                }
                ScanEvent::FileFound { .. } => {
                    pb.set_message(format!("{} matched", report.paths.len() + 1));
                }
                _ => {}
            }
        }
        report.record(&event);
    });

    if let Some(ref pb) = pb {
        pb.finish_and_clear();
    }

    report.duration_secs = start.elapsed().as_secs_f64();
    report
}

/// Ask on stdout, or on stderr when stdout carries a report
fn confirm(question: &str, on_stdout: bool) -> Result<bool> {
    use std::io::Write;
    if on_stdout {
        print!("\n  {} {} [y/N] ", "❓", question);
        std::io::stdout().flush()?;
    } else {
        eprint!("{} [y/N] ", question);
        std::io::stderr().flush()?;
    }

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}

// ─── Check ────────────────────────────────────────────────────────────────────

fn cmd_check(cli: &Cli, format: OutputFormat, file: &Path) -> Result<()> {
    let rules = rules::load_rules_file(file)?;
    let source = RuleSource::File(file.to_path_buf());

    match format {
        OutputFormat::Human if !cli.quiet => output::print_rules(&rules, &source),
        OutputFormat::Json => {
            let json = serde_json::json!({
                "file": file.display().to_string(),
                "rules": rules.iter().map(|r| r.to_string()).collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        _ => {
            for rule in &rules {
                println!("{}", rule);
            }
        }
    }

    Ok(())
}

// ─── Presets ──────────────────────────────────────────────────────────────────

fn cmd_presets(name: Option<&str>) -> Result<()> {
    match name {
        Some(name) => {
            let rules = rules::load_preset(name)?;
            output::print_rules(&rules, &RuleSource::Preset(name.to_string()));
        }
        None => output::print_presets(),
    }
    Ok(())
}

// ─── Config ───────────────────────────────────────────────────────────────────

fn cmd_config(action: &ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Init => {
            let config = Config::default();
            config.save()?;
            println!(
                "  {} TidyRules initialized at {}",
                "✓".green(),
                format::format_path(&Config::config_path())
            );
            Ok(())
        }
        ConfigAction::Show => {
            let config = Config::load()?;
            println!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
        ConfigAction::Reset => {
            let config = Config::default();
            config.save()?;
            println!("  {} Configuration reset to defaults", "✓".green());
            Ok(())
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(key, value)?;
            config.save()?;
            println!("  {} Set {} = {}", "✓".green(), key, value);
            Ok(())
        }
    }
}
