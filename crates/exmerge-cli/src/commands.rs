use std::io;
use std::path::Path;

use anyhow::{ensure, Context};
use chrono::Utc;
use colored::Colorize;
use exmerge_diff::diff_leaves;
use exmerge_index::ResolveMode;
use exmerge_merge::{merge_documents, DecisionMaker, KeepBaselineDecider};
use exmerge_tree::ingest;
use exmerge_types::{KindAttribute, SourceId};
use serde_json::json;
use tracing::info;

use crate::cli::*;
use crate::codec::{load, save, Codec, JsonCodec};
use crate::config::CliConfig;
use crate::progress::ConsoleProgress;
use crate::prompt::TerminalDecider;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Merge(args) => cmd_merge(args, cli.format),
        Command::Diff(args) => cmd_diff(args, cli.format),
        Command::Paths(args) => cmd_paths(args, cli.format),
    }
}

fn ensure_exists(path: &Path) -> anyhow::Result<()> {
    ensure!(path.is_file(), "file does not exist: {}", path.display());
    Ok(())
}

fn resolve_mode(strict: bool) -> ResolveMode {
    if strict { ResolveMode::Strict } else { ResolveMode::Lenient }
}

fn cmd_merge(args: MergeArgs, format: OutputFormat) -> anyhow::Result<()> {
    let mut config = CliConfig::load(args.config.as_deref())?;
    if args.strict_paths {
        config.merge.resolve_mode = ResolveMode::Strict;
    }
    if args.collapse_identical {
        config.merge.collapse_identical_candidates = true;
    }
    if args.max_attempts.is_some() {
        config.merge.max_decision_attempts = args.max_attempts;
    }

    ensure_exists(&args.baseline)?;
    for path in &args.modified {
        ensure_exists(path)?;
    }

    let codec = JsonCodec::new(config.output.pretty);
    let baseline = load(&codec, &args.baseline)?;
    let modified = args
        .modified
        .iter()
        .map(|path| Ok((SourceId::new(path.display().to_string())?, load(&codec, path)?)))
        .collect::<anyhow::Result<Vec<_>>>()?;
    info!(baseline = %args.baseline.display(), modified = modified.len(), "loaded documents");

    let mut decider: Box<dyn DecisionMaker> = if args.keep_baseline {
        Box::new(KeepBaselineDecider)
    } else {
        Box::new(TerminalDecider::new(io::stdin().lock(), io::stdout()))
    };
    let mut progress = ConsoleProgress::new(io::stderr());
    let outcome = merge_documents(
        &baseline,
        &modified,
        config.merge.clone(),
        decider.as_mut(),
        &mut progress,
    )
    .context("merge failed")?;

    let output = args
        .output
        .unwrap_or_else(|| config.output_path(Utc::now(), codec.extension()));
    save(&codec, &output, &outcome.tree)?;

    let report = &outcome.report;
    match format {
        OutputFormat::Json => {
            let value = json!({ "output": output.display().to_string(), "report": report });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Text => {
            println!("{} Merged {} files into {}", "✓".green().bold(), modified.len(), output.display().to_string().bold());
            println!("  Leaves:        {}", report.leaves);
            println!("  Unchanged:     {}", report.unchanged);
            println!("  Auto-adopted:  {}", report.auto_adopted.to_string().green());
            println!("  Arbitrated:    {}", report.arbitrated.to_string().yellow());
            println!("  Kept baseline: {}", report.kept_baseline);
            println!("  Skipped:       {}", report.skipped.to_string().dimmed());
        }
    }
    Ok(())
}

fn cmd_diff(args: DiffArgs, format: OutputFormat) -> anyhow::Result<()> {
    ensure_exists(&args.baseline)?;
    ensure_exists(&args.modified)?;

    let codec = JsonCodec::default();
    let baseline = ingest(&load(&codec, &args.baseline)?);
    let modified = ingest(&load(&codec, &args.modified)?);
    let diff = diff_leaves(&baseline, &modified, resolve_mode(args.strict_paths))?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&diff)?),
        OutputFormat::Text if diff.is_empty() => {
            println!("No changes ({} leaves compared).", diff.compared);
        }
        OutputFormat::Text => {
            for change in &diff.changes {
                println!("{}  {} -> {}", change.path.bold(), change.old.red(), change.new.green());
            }
            println!("\n{} of {} leaves changed.", diff.len(), diff.compared);
        }
    }
    Ok(())
}

fn cmd_paths(args: PathsArgs, format: OutputFormat) -> anyhow::Result<()> {
    ensure_exists(&args.file)?;
    let wanted = args
        .kind
        .as_deref()
        .map(|kind| KindAttribute::from_attribute(kind, "").map(|k| k.attribute_name()))
        .transpose()?;

    let tree = ingest(&load(&JsonCodec::default(), &args.file)?);
    let mut rows = Vec::new();
    for leaf in tree.leaves() {
        let kind = tree[leaf].kind();
        if wanted.is_some_and(|w| kind.attribute_name() != w) {
            continue;
        }
        rows.push((tree.path(leaf)?, kind));
    }

    match format {
        OutputFormat::Json => {
            let value: Vec<_> = rows
                .iter()
                .map(|(path, kind)| json!({ "path": path, "kind": kind.attribute_name(), "value": kind.value() }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Text => {
            for (path, kind) in &rows {
                println!("{}  {}", path, kind.to_string().dimmed());
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use clap::Parser;
    use exmerge_types::{ElementNode, Payload};

    use super::*;

    fn doc(health: &str, shield: &str) -> ElementNode {
        ElementNode::container("GcPlayer.xml").with_child(
            ElementNode::container("GcStats.xml")
                .named("Stats")
                .with_child(ElementNode::leaf("Health", health))
                .with_child(ElementNode::leaf("Shield", shield))
                .with_child(ElementNode::annotation("Note", "tuned")),
        )
    }

    fn write(dir: &Path, name: &str, element: &ElementNode) -> PathBuf {
        let path = dir.join(name);
        save(&JsonCodec::default(), &path, element).unwrap();
        path
    }

    fn leaf_value(element: &ElementNode, name: &str) -> String {
        let node = element.children[0]
            .children
            .iter()
            .find(|c| c.name.as_deref() == Some(name))
            .unwrap();
        match &node.payload {
            Payload::Leaf { value } => value.clone(),
            other => panic!("not a leaf: {other:?}"),
        }
    }

    fn run(args: &[&str]) -> anyhow::Result<()> {
        run_command(Cli::try_parse_from(args)?)
    }

    #[test]
    fn merge_writes_combined_document() {
        let dir = tempfile::tempdir().unwrap();
        let base = write(dir.path(), "base.json", &doc("100", "50"));
        let a = write(dir.path(), "a.json", &doc("150", "50"));
        let b = write(dir.path(), "b.json", &doc("100", "75"));
        let out = dir.path().join("out.json");

        run(&[
            "exmerge", "merge",
            base.to_str().unwrap(), a.to_str().unwrap(), b.to_str().unwrap(),
            "-o", out.to_str().unwrap(),
        ])
        .unwrap();

        let merged = load(&JsonCodec::default(), &out).unwrap();
        assert_eq!(leaf_value(&merged, "Health"), "150");
        assert_eq!(leaf_value(&merged, "Shield"), "75");
    }

    #[test]
    fn merge_keep_baseline_resolves_conflicts_without_prompting() {
        let dir = tempfile::tempdir().unwrap();
        let base = write(dir.path(), "base.json", &doc("100", "50"));
        let a = write(dir.path(), "a.json", &doc("150", "50"));
        let b = write(dir.path(), "b.json", &doc("200", "50"));
        let out = dir.path().join("out.json");

        run(&[
            "exmerge", "--format", "json", "merge",
            base.to_str().unwrap(), a.to_str().unwrap(), b.to_str().unwrap(),
            "-o", out.to_str().unwrap(), "--keep-baseline",
        ])
        .unwrap();

        let merged = load(&JsonCodec::default(), &out).unwrap();
        assert_eq!(leaf_value(&merged, "Health"), "100");
    }

    #[test]
    fn merge_uses_configured_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let base = write(dir.path(), "base.json", &doc("100", "50"));
        let a = write(dir.path(), "a.json", &doc("150", "50"));
        let out_dir = dir.path().join("merged");
        let config = dir.path().join("exmerge.toml");
        fs::write(
            &config,
            format!("[output]\ndir = {:?}\nprefix = \"Combined\"\n", out_dir.to_str().unwrap()),
        )
        .unwrap();

        run(&[
            "exmerge", "merge", base.to_str().unwrap(), a.to_str().unwrap(),
            "--config", config.to_str().unwrap(),
        ])
        .unwrap();

        let written: Vec<_> = fs::read_dir(&out_dir).unwrap().map(|e| e.unwrap().file_name()).collect();
        assert_eq!(written.len(), 1);
        let name = written[0].to_string_lossy().into_owned();
        assert!(name.starts_with("Combined-") && name.ends_with(".json"), "{name}");
    }

    #[test]
    fn merge_rejects_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let base = write(dir.path(), "base.json", &doc("100", "50"));
        let missing = dir.path().join("missing.json");

        let err = run(&["exmerge", "merge", base.to_str().unwrap(), missing.to_str().unwrap()])
            .unwrap_err();
        assert!(err.to_string().contains("file does not exist"));
    }

    #[test]
    fn merge_reports_structural_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let base = write(dir.path(), "base.json", &doc("100", "50"));
        let truncated = ElementNode::container("GcPlayer.xml").with_child(
            ElementNode::container("GcStats.xml")
                .named("Stats")
                .with_child(ElementNode::leaf("Health", "100")),
        );
        let a = write(dir.path(), "a.json", &truncated);
        let out = dir.path().join("out.json");

        let err = run(&[
            "exmerge", "merge", base.to_str().unwrap(), a.to_str().unwrap(),
            "-o", out.to_str().unwrap(), "--keep-baseline",
        ])
        .unwrap_err();
        assert!(err.to_string().contains("merge failed"));
        assert!(!out.exists());
    }

    #[test]
    fn diff_and_paths_run() {
        let dir = tempfile::tempdir().unwrap();
        let base = write(dir.path(), "base.json", &doc("100", "50"));
        let a = write(dir.path(), "a.json", &doc("150", "50"));

        run(&["exmerge", "diff", base.to_str().unwrap(), a.to_str().unwrap()]).unwrap();
        run(&["exmerge", "--format", "json", "diff", base.to_str().unwrap(), a.to_str().unwrap()]).unwrap();
        run(&["exmerge", "paths", base.to_str().unwrap(), "--kind", "comment"]).unwrap();
    }

    #[test]
    fn paths_rejects_unknown_kind() {
        let dir = tempfile::tempdir().unwrap();
        let base = write(dir.path(), "base.json", &doc("100", "50"));
        assert!(run(&["exmerge", "paths", base.to_str().unwrap(), "--kind", "colour"]).is_err());
    }
}
