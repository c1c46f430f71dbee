//! Structured per-tool output summaries.
//!
//! Pure deterministic maps `(content, tool_name) → shorter content` used by
//! the compressor for tool turns. Each summarizer degrades gracefully: it
//! never errors, and a summary that would not actually shrink the output is
//! discarded by the caller.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use vega_core::text::{head_tail, truncate_with_suffix};

/// Tool names treated as file reads.
const FILE_READ_TOOLS: &[&str] = &["read_file", "read", "open_file", "cat"];

/// Tool names treated as directory listings.
const DIR_LIST_TOOLS: &[&str] = &["ls", "list_dir", "list_directory", "dir"];

/// Tool names treated as searches.
const SEARCH_TOOLS: &[&str] = &["grep", "search", "find", "glob", "search_files"];

/// Cap on a generic head-truncated summary.
const GENERIC_HEAD_CHARS: usize = 600;

/// How many identifiers a file-read summary lists at most.
const MAX_IDENTIFIERS: usize = 12;

/// Declaration keywords across the languages the editor commonly touches:
/// Rust/JS/TS/Python/Go/Java-ish. One capture group: the identifier.
static IDENTIFIER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^\s*(?:pub\s+)?(?:async\s+)?(?:fn|struct|enum|trait|impl|class|def|function|const|interface|type)\s+([A-Za-z_][A-Za-z0-9_]*)",
    )
    .expect("identifier regex is valid")
});

/// Summarize one tool output according to the tool's role.
#[must_use]
pub fn summarize_tool_output(content: &str, tool_name: &str, raw_params: &Value) -> String {
    let name = tool_name.to_ascii_lowercase();
    if FILE_READ_TOOLS.contains(&name.as_str()) {
        summarize_file_read(content, raw_params)
    } else if DIR_LIST_TOOLS.contains(&name.as_str()) {
        summarize_directory_listing(content)
    } else if SEARCH_TOOLS.contains(&name.as_str()) {
        summarize_search(content)
    } else {
        summarize_generic(content)
    }
}

/// File-read result → path + line count + key identifiers.
#[must_use]
pub fn summarize_file_read(content: &str, raw_params: &Value) -> String {
    let path = raw_params
        .get("path")
        .or_else(|| raw_params.get("file_path"))
        .and_then(Value::as_str)
        .unwrap_or("(unknown path)");
    let line_count = content.lines().count();

    let mut identifiers: Vec<&str> = IDENTIFIER_RE
        .captures_iter(content)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .collect();
    identifiers.dedup();
    identifiers.truncate(MAX_IDENTIFIERS);

    if identifiers.is_empty() {
        format!("[file {path}: {line_count} lines, contents elided]")
    } else {
        format!(
            "[file {path}: {line_count} lines, declares: {}]",
            identifiers.join(", ")
        )
    }
}

/// Directory-listing result → head and tail of the entries.
#[must_use]
pub fn summarize_directory_listing(content: &str) -> String {
    let entries: Vec<&str> = content.lines().collect();
    if entries.len() <= 12 {
        return content.to_owned();
    }
    let head = entries[..6].join("\n");
    let tail = entries[entries.len() - 4..].join("\n");
    format!(
        "{head}\n[... {} entries elided ...]\n{tail}",
        entries.len() - 10
    )
}

/// Search result → file count plus a short sample.
#[must_use]
pub fn summarize_search(content: &str) -> String {
    let lines: Vec<&str> = content.lines().collect();
    if lines.len() <= 8 {
        return content.to_owned();
    }
    let sample = lines[..5].join("\n");
    format!("[{} result lines, sample:]\n{sample}", lines.len())
}

/// Fallback: head truncation with a marker.
#[must_use]
pub fn summarize_generic(content: &str) -> String {
    truncate_with_suffix(content, GENERIC_HEAD_CHARS, "...[output truncated]")
}

/// Head+tail elision for long user turns: keep the opening intent and the
/// trailing specifics.
#[must_use]
pub fn elide_user_text(content: &str, head: usize, tail: usize, marker: &str) -> String {
    head_tail(content, head, tail, marker)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
