use anyhow::Result;
use colored::Colorize;
use loopguard_common::{Diagnostic, DiagnosticCategory, LineMap};
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::driver::FileReport;

/// Text reporter: `file:line:col - severity rule: message` followed by the
/// offending source line.
pub struct Reporter {
    color: bool,
    line_maps: FxHashMap<String, LineMap>,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter {
            color,
            line_maps: FxHashMap::default(),
        }
    }

    pub fn render(&mut self, files: &[FileReport]) -> String {
        let mut out = String::new();
        let mut errors = 0;
        let mut warnings = 0;
        for file in files {
            for diagnostic in &file.result.diagnostics {
                if !out.is_empty() {
                    out.push('\n');
                }
                out.push_str(&self.format_diagnostic(diagnostic, &file.source));
                out.push('\n');
                if diagnostic.is_error() {
                    errors += 1;
                } else {
                    warnings += 1;
                }
            }
        }
        if errors + warnings > 0 {
            out.push('\n');
            out.push_str(&self.format_summary(errors, warnings));
            out.push('\n');
        }
        out
    }

    pub fn format_diagnostic(&mut self, diagnostic: &Diagnostic, source: &str) -> String {
        let (line, column) = self.position_for(&diagnostic.file, source, diagnostic.start);

        let mut output = format!("{}:{}:{}", diagnostic.file, line, column);
        output.push_str(" - ");
        output.push_str(&self.format_category(diagnostic.category));
        let code = self.format_code(diagnostic);
        if !code.is_empty() {
            output.push(' ');
            output.push_str(&code);
        }
        output.push_str(": ");
        output.push_str(&diagnostic.message_text);

        if let Some(snippet) = self.format_snippet(diagnostic, source, line, column) {
            output.push_str(&snippet);
        }
        output
    }

    /// The first line of the diagnostic span, underlined:
    ///
    /// ```text
    ///     3   for (var i = 0; i < n; i++) { f(() => i); }
    ///                                         ~~~~~~~
    /// ```
    fn format_snippet(
        &mut self,
        diagnostic: &Diagnostic,
        source: &str,
        line: u32,
        column: u32,
    ) -> Option<String> {
        let line_text = source.lines().nth(line.checked_sub(1)? as usize)?;
        let (end_line, end_column) = self.position_for(
            &diagnostic.file,
            source,
            diagnostic.start + diagnostic.length,
        );

        let mut underline = String::new();
        for (index, ch) in line_text.chars().enumerate() {
            let col = index as u32 + 1;
            let in_span = col >= column && (end_line > line || col < end_column);
            match (col < column, in_span) {
                (true, _) => underline.push(if ch == '\t' { '\t' } else { ' ' }),
                (false, true) => underline.push('~'),
                (false, false) => break,
            }
        }
        if !underline.contains('~') {
            underline.push('~');
        }

        let underline = if self.color {
            underline.red().to_string()
        } else {
            underline
        };
        Some(format!("\n  {line:>3}   {line_text}\n        {underline}"))
    }

    fn position_for(&mut self, file: &str, source: &str, offset: u32) -> (u32, u32) {
        self.line_maps
            .entry(file.to_string())
            .or_insert_with(|| LineMap::build(source))
            .line_and_column(offset, source)
    }

    fn format_category(&self, category: DiagnosticCategory) -> String {
        let label = category.as_str();
        if !self.color {
            return label.to_string();
        }
        match category {
            DiagnosticCategory::Error => label.red().bold().to_string(),
            DiagnosticCategory::Warning => label.yellow().bold().to_string(),
            DiagnosticCategory::Suggestion => label.blue().bold().to_string(),
            DiagnosticCategory::Message => label.cyan().bold().to_string(),
        }
    }

    /// Rule id for lint findings, `TS<code>` for syntax errors.
    fn format_code(&self, diagnostic: &Diagnostic) -> String {
        let label = match (diagnostic.rule, diagnostic.code) {
            (Some(rule), _) => rule.to_string(),
            (None, 0) => return String::new(),
            (None, code) => format!("TS{code}"),
        };
        if self.color {
            label.bright_blue().to_string()
        } else {
            label
        }
    }

    pub fn format_summary(&self, errors: usize, warnings: usize) -> String {
        let problems = errors + warnings;
        let text = format!(
            "Found {problems} {} ({errors} {}, {warnings} {}).",
            plural(problems, "problem"),
            plural(errors, "error"),
            plural(warnings, "warning"),
        );
        if !self.color {
            return text;
        }
        if errors > 0 {
            text.red().bold().to_string()
        } else {
            text.yellow().bold().to_string()
        }
    }
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}

// =============================================================================
// JSON output
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonFileResult<'a> {
    file_path: &'a str,
    messages: Vec<JsonMessage<'a>>,
    error_count: usize,
    warning_count: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonMessage<'a> {
    rule_id: Option<&'a str>,
    /// 1 = warning, 2 = error
    severity: u8,
    message: &'a str,
    line: u32,
    column: u32,
    end_line: u32,
    end_column: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<u32>,
}

/// One object per file, in the shape of ESLint's `json` formatter.
pub fn render_json(files: &[FileReport]) -> Result<String> {
    let results: Vec<JsonFileResult<'_>> = files
        .iter()
        .map(|file| {
            let line_map = LineMap::build(&file.source);
            let messages = file
                .result
                .diagnostics
                .iter()
                .map(|diagnostic| {
                    let (line, column) = line_map.line_and_column(diagnostic.start, &file.source);
                    let (end_line, end_column) = line_map
                        .line_and_column(diagnostic.start + diagnostic.length, &file.source);
                    JsonMessage {
                        rule_id: diagnostic.rule,
                        severity: if diagnostic.is_error() { 2 } else { 1 },
                        message: &diagnostic.message_text,
                        line,
                        column,
                        end_line,
                        end_column,
                        code: (diagnostic.code != 0).then_some(diagnostic.code),
                    }
                })
                .collect();
            JsonFileResult {
                file_path: &file.display_name,
                messages,
                error_count: file.result.error_count(),
                warning_count: file.result.warning_count(),
            }
        })
        .collect();
    Ok(serde_json::to_string_pretty(&results)?)
}
