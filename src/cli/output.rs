use colored::*;

use super::report::RunReport;
use crate::common::format::{self, format_path};
use crate::rules::{loader, Rule, RuleSource};

/// Print a rule list, one canonical rule per line
pub fn print_rules(rules: &[Rule], source: &RuleSource) {
    println!();
    println!(
        "  {} {} rules from {}",
        "📜",
        rules.len(),
        source.to_string().cyan()
    );
    println!("{}", "─".repeat(60).dimmed());
    for (i, rule) in rules.iter().enumerate() {
        println!("  {}  {}", format!("{:>3}", i + 1).dimmed(), rule);
    }
    println!();
}

/// Print run results in human-readable format
pub fn print_run_report(report: &RunReport, detailed: bool) {
    println!();
    let title = if report.dry_run {
        "TidyRules Dry Run"
    } else {
        "TidyRules Cleanup"
    };
    println!("{}  {}", "🧹", title);
    println!("{}", "─".repeat(60).dimmed());
    println!(
        "  {}  •  {} rules  •  {} checks  •  {}",
        format_path(&report.root).cyan(),
        report.rule_count,
        report.directories_visited,
        format::format_duration(report.duration_secs).dimmed()
    );
    println!("{}", "─".repeat(60).dimmed());
    println!();

    if report.paths.is_empty() {
        println!("  {} Nothing matched. Already tidy!", "✨");
        println!();
        return;
    }

    let shown = if detailed { report.paths.len() } else { report.paths.len().min(20) };
    for path in &report.paths[..shown] {
        let marker = if report.dry_run { "○".yellow() } else { "✓".green() };
        println!("  {} {}", marker, format::truncate(&format_path(path), 72));
    }
    if shown < report.paths.len() {
        println!(
            "  {} ... and {} more (use --verbose to list all)",
            "→".dimmed(),
            report.paths.len() - shown
        );
    }
    println!();

    if !report.errors.is_empty() {
        println!(
            "  {} {}",
            "⚠".yellow(),
            format!("{} warnings:", report.errors.len()).yellow()
        );
        for error in &report.errors {
            println!("    {} {}", "→".dimmed(), error.dimmed());
        }
        println!();
    }

    println!("{}", "─".repeat(60).dimmed());
    if report.dry_run {
        println!(
            "  {} Dry run: would delete {}. No files modified.",
            "ℹ️",
            format::format_count(report.paths.len()).bold()
        );
        println!(
            "  {} Delete with: {}",
            "💡",
            "tidyrules run --apply".cyan()
        );
    } else {
        println!(
            "  {} Deleted {} of {} matched",
            "🔥",
            report.deleted.to_string().bold(),
            format::format_count(report.paths.len())
        );
    }
    println!();
}

/// Print run results as JSON
pub fn print_run_json(report: &RunReport) {
    match serde_json::to_string_pretty(report) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing results: {}", e),
    }
}

/// Print run results in quiet mode (one path per line, pipe-friendly)
pub fn print_run_quiet(report: &RunReport) {
    for path in &report.paths {
        println!("{}", path.display());
    }
}

/// Print the built-in presets
pub fn print_presets() {
    println!();
    println!("  {} Built-in presets", "📦");
    println!("{}", "─".repeat(60).dimmed());
    for name in loader::PRESETS {
        let count = loader::load_preset(name).map(|r| r.len()).unwrap_or(0);
        println!("  {} {} rules", format!("{:<10}", name).bold(), count);
    }
    println!();
    println!("  {} Use with: {}", "💡", "tidyrules run --preset <name>".cyan());
    println!();
}
