//! Format plans and apply summaries as text or JSON.

use crate::command::ExternalFileCommand;
use crate::tooling::apply::ApplySummary;
use crate::tooling::cli::HandlerFailure;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::path::Path;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

fn display_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

/// Plan as a table of actions, paths relative to `root`.
pub fn format_plan_text(root: &Path, commands: &[ExternalFileCommand]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Plan")));
    if commands.is_empty() {
        out.push_str("No changes.\n");
        return out;
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Action", "Path", "Bytes"]);
    for command in commands {
        let (action, bytes) = match command {
            ExternalFileCommand::DeleteFile { .. } => ("delete", "-".to_string()),
            ExternalFileCommand::UpsertFile { data, .. } => ("write", data.len().to_string()),
        };
        table.add_row(vec![
            action.to_string(),
            display_path(root, command.path()),
            bytes,
        ]);
    }
    out.push_str(&format!("{}\n\n", table));
    out.push_str(&format!("{} change(s)\n", commands.len()));
    out
}

#[derive(Serialize)]
struct PlanJson<'a> {
    root: &'a Path,
    commands: &'a [ExternalFileCommand],
    errors: &'a [HandlerFailure],
}

/// Plan plus recovered handler failures as pretty JSON.
pub fn format_plan_json(
    root: &Path,
    commands: &[ExternalFileCommand],
    errors: &[HandlerFailure],
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&PlanJson {
        root,
        commands,
        errors,
    })
}

pub fn format_apply_summary_text(summary: &ApplySummary) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Applied")));
    out.push_str(&format!("  Written: {}\n", summary.written));
    out.push_str(&format!("  Deleted: {}\n", summary.deleted));
    if summary.missing > 0 {
        out.push_str(&format!("  Already absent: {}\n", summary.missing));
    }
    out
}

/// Handler failures for stderr, one per line.
pub fn format_handler_failures(root: &Path, errors: &[HandlerFailure]) -> String {
    let mut out = String::new();
    for failure in errors {
        out.push_str(&format!(
            "{} {}: {}\n",
            "skipped".yellow(),
            display_path(root, &failure.path),
            failure.message
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_plan_text() {
        let out = format_plan_text(Path::new("/repo"), &[]);
        assert!(out.contains("No changes."));
    }

    #[test]
    fn test_plan_text_lists_relative_paths() {
        let commands = vec![
            ExternalFileCommand::delete_file("/repo/a/old.txt"),
            ExternalFileCommand::upsert_file("/repo/a/new.txt", "hello"),
        ];
        let out = format_plan_text(Path::new("/repo"), &commands);
        assert!(out.contains("a/old.txt"));
        assert!(out.contains("delete"));
        assert!(out.contains("write"));
        assert!(out.contains("2 change(s)"));
    }

    #[test]
    fn test_plan_json_uses_tagged_commands() {
        let commands = vec![ExternalFileCommand::upsert_file("/repo/a.txt", "x")];
        let failures = vec![HandlerFailure {
            path: "/repo/b.txt".into(),
            message: "boom".to_string(),
        }];
        let json = format_plan_json(Path::new("/repo"), &commands, &failures).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["commands"][0]["kind"], "upsertFile");
        assert_eq!(value["commands"][0]["data"], "x");
        assert_eq!(value["errors"][0]["message"], "boom");
    }
}
