use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use serde::Serialize;

use hierdiff_diff::diff_trees;
use hierdiff_mark::{to_tree, ExtractSide, HierarchyObject, MarkConfig, Marker};
use hierdiff_types::{EditKind, TreePath};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;
    match cli.command {
        Command::Diff(args) => cmd_diff(args, cli.format, config),
        Command::Mark(args) => cmd_mark(args, cli.format, config),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<MarkConfig> {
    match path {
        Some(path) => MarkConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(MarkConfig::default()),
    }
}

fn load_document(path: &Path) -> anyhow::Result<HierarchyObject> {
    HierarchyObject::from_path(path)
        .with_context(|| format!("failed to read hierarchy {}", path.display()))
}

#[derive(Serialize)]
struct RecordView<'a> {
    kind: EditKind,
    path: &'a TreePath,
}

fn cmd_diff(args: DiffArgs, format: OutputFormat, config: MarkConfig) -> anyhow::Result<()> {
    config.limits.validate()?;
    let base = to_tree(&load_document(&args.base)?, &config.limits)
        .with_context(|| format!("invalid hierarchy {}", args.base.display()))?;
    let target = to_tree(&load_document(&args.target)?, &config.limits)
        .with_context(|| format!("invalid hierarchy {}", args.target.display()))?;

    let diff = diff_trees(&base, &target);
    let shown: Vec<_> = diff
        .iter()
        .filter(|r| args.kinds.is_empty() || args.kinds.contains(&r.kind))
        .collect();

    match format {
        OutputFormat::Json => {
            let views: Vec<RecordView<'_>> = shown
                .iter()
                .map(|r| RecordView {
                    kind: r.kind,
                    path: &r.path,
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&views)?);
        }
        OutputFormat::Text => {
            for record in &shown {
                println!("{} {}", symbol(record.kind), record.path);
            }
            println!(
                "\n{} inserted, {} deleted, {} paired",
                diff.insertions().to_string().green(),
                diff.deletions().to_string().red(),
                diff.changes().to_string().yellow(),
            );
        }
    }
    Ok(())
}

fn symbol(kind: EditKind) -> colored::ColoredString {
    let s = kind.symbol().to_string();
    match kind {
        EditKind::Insert => s.green().bold(),
        EditKind::Delete => s.red().bold(),
        EditKind::Change => s.yellow(),
    }
}

fn cmd_mark(args: MarkArgs, format: OutputFormat, mut config: MarkConfig) -> anyhow::Result<()> {
    if let Some(side) = args.side {
        config.side = side;
    }
    if let Some(suffix) = args.suffix {
        match config.side {
            ExtractSide::Base => config.deletion_suffix = suffix,
            ExtractSide::Target => config.addition_suffix = suffix,
        }
    }

    let marker = Marker::new(config)?;
    let base = load_document(&args.base)?;
    let target = load_document(&args.target)?;
    let outcome = marker.run(&base, &target)?;

    let json = outcome.document.to_json_string_pretty()?;
    match &args.output {
        Some(path) => std::fs::write(path, format!("{json}\n"))
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => println!("{json}"),
    }

    if format == OutputFormat::Text {
        let (count, what) = match outcome.side {
            ExtractSide::Base => (outcome.deletions, "deleted"),
            ExtractSide::Target => (outcome.insertions, "added"),
        };
        if count == 0 {
            eprintln!("{} No diffs found.", "!".yellow().bold());
        } else {
            eprintln!(
                "{} Marked {} {} object(s) on {} (suffix {})",
                "✓".green().bold(),
                outcome.marked.to_string().bold(),
                what,
                outcome.side.to_string().cyan(),
                marker.config().suffix().yellow(),
            );
        }
    }
    Ok(())
}
