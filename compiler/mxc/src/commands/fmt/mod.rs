//! Format command for markup documents.
//!
//! Formats single files, whole directories (files in parallel) or stdin.
//! The engine only produces edits; this command applies them, previews them
//! as a diff, or prints them as they are.

#![allow(
    clippy::struct_excessive_bools,
    reason = "FmtOptions mirrors independent CLI flags"
)]

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use mx_fmt::{apply_edits, DocumentFormatter, FormatConfig, Quotation, TextEdit};
use mx_ir::{chars, LineIndex, Span};
use mx_parse::Problem;
use rayon::prelude::*;

use super::report::format_problems;
use super::{read_file, FmtError};

/// Extensions picked up when walking a directory.
const EXTENSIONS: &[&str] = &[
    "xml", "xsd", "xsl", "xslt", "svg", "xhtml", "wsdl", "rng", "pom", "dtd",
];

/// Options for one `mx fmt` invocation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FmtOptions {
    /// Report files that would change, write nothing.
    pub check: bool,
    /// Print a diff instead of writing.
    pub diff: bool,
    /// Read from stdin, write to stdout.
    pub stdin: bool,
    /// Print the raw edits instead of applying them.
    pub edits: bool,
    /// One-based, inclusive line range to format.
    pub lines: Option<(u32, u32)>,
    pub config: FormatConfig,
}

/// What happened to one file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatResult {
    Unchanged,
    Formatted,
    /// Changes were found but not written (`--check`, `--diff`, `--edits`).
    WouldFormat,
}

/// One formatting pass over a source text.
#[derive(Clone, Debug)]
pub struct Formatted {
    pub edits: Vec<TextEdit>,
    pub output: String,
    pub problems: Vec<Problem>,
}

impl Formatted {
    pub fn is_changed(&self) -> bool {
        !self.edits.is_empty()
    }
}

/// Parse and format `source`. Never fails; parse problems are returned for
/// the caller to report.
pub fn format_source(source: &str, options: &FmtOptions) -> Formatted {
    let parsed = mx_parse::parse(source);
    let mut formatter = DocumentFormatter::new(&parsed.document, &options.config);
    if let Some(lines) = options.lines {
        formatter = formatter.with_range(line_span(source, lines));
    }
    let edits = formatter.format();
    let output = apply_edits(source, &edits);
    Formatted {
        edits,
        output,
        problems: parsed.problems,
    }
}

/// Byte span of the one-based lines `first..=last`, widened backwards over
/// the whitespace in front of `first` so its indentation can be rewritten.
fn line_span(source: &str, (first, last): (u32, u32)) -> Span {
    let index = LineIndex::new(source);
    let len = source.len() as u32;
    let start = index.line_start(first.saturating_sub(1)).unwrap_or(len);
    let end = index.line_start(last).unwrap_or(len).max(start);
    let start = chars::whitespace_run_start(source, 0, start as usize) as u32;
    Span::new(start, end)
}

/// Format one file according to `options`.
pub fn format_file(path: &str, options: &FmtOptions) -> Result<FormatResult, FmtError> {
    let content = read_file(path)?;
    let formatted = format_source(&content, options);
    if !formatted.problems.is_empty() {
        eprint!("{}", format_problems(path, &formatted.problems, &content));
    }

    if !formatted.is_changed() {
        return Ok(FormatResult::Unchanged);
    }
    if options.edits {
        print!("{}", render_edits(path, &content, &formatted.edits));
        return Ok(FormatResult::WouldFormat);
    }
    if options.diff {
        print!("{}", render_diff(path, &content, &formatted.edits));
        return Ok(FormatResult::WouldFormat);
    }
    if options.check {
        return Ok(FormatResult::WouldFormat);
    }

    std::fs::write(path, &formatted.output).map_err(|source| FmtError::Write {
        path: path.to_owned(),
        source,
    })?;
    Ok(FormatResult::Formatted)
}

/// Format stdin to stdout (or print its edits with `--edits`).
pub fn format_stdin(options: &FmtOptions) -> Result<(), FmtError> {
    let mut content = String::new();
    std::io::stdin()
        .read_to_string(&mut content)
        .map_err(FmtError::Stdin)?;

    let formatted = format_source(&content, options);
    if !formatted.problems.is_empty() {
        eprint!("{}", format_problems("<stdin>", &formatted.problems, &content));
    }
    if options.edits {
        print!("{}", render_edits("<stdin>", &content, &formatted.edits));
    } else {
        print!("{}", formatted.output);
    }
    Ok(())
}

/// Counters for a run over many files.
#[derive(Debug, Default)]
pub struct Tally {
    formatted: AtomicUsize,
    unchanged: AtomicUsize,
    errors: AtomicUsize,
}

impl Tally {
    fn record(&self, path: &str, result: Result<FormatResult, FmtError>, options: &FmtOptions) {
        match result {
            Ok(FormatResult::Formatted) => {
                println!("Formatted: {path}");
                self.formatted.fetch_add(1, Ordering::Relaxed);
            }
            Ok(FormatResult::WouldFormat) => {
                if options.check {
                    println!("Would format: {path}");
                }
                self.formatted.fetch_add(1, Ordering::Relaxed);
            }
            Ok(FormatResult::Unchanged) => {
                self.unchanged.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                eprintln!("error: {e}");
                self.errors.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    pub fn formatted(&self) -> usize {
        self.formatted.load(Ordering::Relaxed)
    }

    pub fn unchanged(&self) -> usize {
        self.unchanged.load(Ordering::Relaxed)
    }

    pub fn errors(&self) -> usize {
        self.errors.load(Ordering::Relaxed)
    }
}

/// Format every matching file under `dir`, in parallel.
pub fn format_directory(dir: &Path, options: &FmtOptions, tally: &Tally) {
    let mut files = Vec::new();
    collect_files(dir, &mut files);
    tracing::debug!(dir = %dir.display(), files = files.len(), "formatting directory");

    files.par_iter().for_each(|file| {
        let path = file.display().to_string();
        tally.record(&path, format_file(&path, options), options);
    });
}

fn is_markup_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)))
}

/// Collect formattable files below `dir`, skipping hidden entries, `target`
/// and `node_modules`.
pub(crate) fn collect_files(dir: &Path, files: &mut Vec<PathBuf>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("error: cannot read directory '{}': {e}", dir.display());
            return;
        }
    };

    let mut paths: Vec<PathBuf> = entries.flatten().map(|entry| entry.path()).collect();
    paths.sort();
    for path in paths {
        let skipped = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with('.') || name == "target" || name == "node_modules");
        if skipped {
            continue;
        }
        if path.is_dir() {
            collect_files(&path, files);
        } else if is_markup_file(&path) {
            files.push(path);
        }
    }
}

/// One edit per line: `path:start-end "new text"`, positions one-based.
fn render_edits(path: &str, source: &str, edits: &[TextEdit]) -> String {
    let index = LineIndex::new(source);
    let mut output = String::new();
    for edit in edits {
        let range = edit.range(source, &index);
        output.push_str(&format!(
            "{path}:{}-{} {:?}\n",
            range.start, range.end, edit.new_text
        ));
    }
    output
}

/// Unified-style diff built from the edits: every group of touched lines is
/// shown before and after.
fn render_diff(path: &str, source: &str, edits: &[TextEdit]) -> String {
    let index = LineIndex::new(source);
    let len = source.len() as u32;
    let mut output = format!("--- {path}\n+++ {path}\n");

    let mut rest = edits;
    while let Some(first) = rest.first() {
        let first_line = index.line_of(first.start);
        let mut last_line = index.line_of(first.end);
        let mut count = 1;
        while let Some(next) = rest.get(count) {
            if index.line_of(next.start) > last_line {
                break;
            }
            last_line = last_line.max(index.line_of(next.end));
            count += 1;
        }
        let (hunk, tail) = rest.split_at(count);
        rest = tail;

        let start = index.line_start(first_line).unwrap_or(len);
        let end = index.line_start(last_line + 1).unwrap_or(len);
        let before = &source[start as usize..end as usize];
        let shifted: Vec<TextEdit> = hunk
            .iter()
            .map(|edit| TextEdit::new(edit.start - start, edit.end - start, edit.new_text.as_str()))
            .collect();
        let after = apply_edits(before, &shifted);

        output.push_str(&format!("@@ line {} @@\n", first_line + 1));
        for line in before.lines() {
            output.push_str(&format!("-{line}\n"));
        }
        for line in after.lines() {
            output.push_str(&format!("+{line}\n"));
        }
    }
    output
}

/// What the command line asked for.
#[derive(Debug, PartialEq, Eq)]
enum Invocation {
    Help,
    Format {
        options: FmtOptions,
        paths: Vec<String>,
    },
}

fn parse_number(option: &'static str, value: &str) -> Result<usize, FmtError> {
    value.parse().map_err(|_| FmtError::InvalidValue {
        option,
        value: value.to_owned(),
    })
}

fn parse_lines(value: &str) -> Result<(u32, u32), FmtError> {
    let invalid = || FmtError::InvalidValue {
        option: "--lines",
        value: value.to_owned(),
    };
    let (first, last) = value.split_once(':').ok_or_else(invalid)?;
    let first: u32 = first.parse().map_err(|_| invalid())?;
    let last: u32 = last.parse().map_err(|_| invalid())?;
    if first == 0 || last < first {
        return Err(invalid());
    }
    Ok((first, last))
}

fn parse_args(args: &[String]) -> Result<Invocation, FmtError> {
    let mut options = FmtOptions::default();
    let mut paths = Vec::new();

    for arg in args {
        let (flag, value) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => (flag, Some(value)),
            _ => (arg.as_str(), None),
        };
        let required = |option: &'static str| value.ok_or(FmtError::MissingValue(option));

        match flag {
            "--help" | "-h" => return Ok(Invocation::Help),
            "--check" => options.check = true,
            "--diff" => options.diff = true,
            "--stdin" => options.stdin = true,
            "--edits" => options.edits = true,
            "--lines" => options.lines = Some(parse_lines(required("--lines")?)?),
            "--width" => {
                options.config.max_line_width = parse_number("--width", required("--width")?)?;
            }
            "--tab-size" => {
                options.config.tab_size = parse_number("--tab-size", required("--tab-size")?)?;
            }
            "--tabs" => options.config.insert_spaces = false,
            "--join" => options.config.join_content_lines = true,
            "--split-attributes" => options.config.split_attributes = true,
            "--closing-bracket-new-line" => options.config.closing_bracket_new_line = true,
            "--preserve-attribute-line-breaks" => {
                options.config.preserve_attribute_line_breaks = true;
            }
            "--quotes" => {
                let quotation = match required("--quotes")? {
                    "double" => Quotation::Double,
                    "single" => Quotation::Single,
                    other => {
                        return Err(FmtError::InvalidValue {
                            option: "--quotes",
                            value: other.to_owned(),
                        })
                    }
                };
                options.config = std::mem::take(&mut options.config).with_preferred_quotes(quotation);
            }
            "--no-space-before-empty-close" => options.config.space_before_empty_close_tag = false,
            "--no-grammar" => options.config.grammar_aware_formatting = false,
            "--final-newline" => options.config.insert_final_newline = true,
            "--keep-final-newlines" => options.config.trim_final_newlines = false,
            _ if flag.starts_with('-') => return Err(FmtError::UnknownOption(arg.clone())),
            _ => paths.push(arg.clone()),
        }
    }

    options.config.validate()?;
    if options.stdin {
        if !paths.is_empty() {
            return Err(FmtError::Conflict("paths", "--stdin"));
        }
        if options.check {
            return Err(FmtError::Conflict("--check", "--stdin"));
        }
        if options.diff {
            return Err(FmtError::Conflict("--diff", "--stdin"));
        }
    }
    if options.lines.is_some() && !options.stdin && paths.len() != 1 {
        return Err(FmtError::LinesNeedOneFile);
    }
    if paths.is_empty() && !options.stdin {
        paths.push(".".to_owned());
    }
    Ok(Invocation::Format { options, paths })
}

/// Run the format command with the given arguments.
pub fn run_format(args: &[String]) {
    let (options, paths) = match parse_args(args) {
        Ok(Invocation::Help) => {
            print_fmt_help();
            return;
        }
        Ok(Invocation::Format { options, paths }) => (options, paths),
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!("Run 'mx fmt --help' for usage");
            std::process::exit(1);
        }
    };

    if options.stdin {
        if let Err(e) = format_stdin(&options) {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
        return;
    }

    let tally = Tally::default();
    for path in &paths {
        let target = Path::new(path);
        if target.is_dir() {
            format_directory(target, &options, &tally);
        } else {
            tally.record(path, format_file(path, &options), &options);
        }
    }

    let (formatted, unchanged, errors) = (tally.formatted(), tally.unchanged(), tally.errors());
    if formatted + unchanged + errors > 1 {
        let verb = if options.check || options.diff || options.edits {
            "would be formatted"
        } else {
            "formatted"
        };
        println!("\n{formatted} {verb}, {unchanged} unchanged");
    }
    if errors > 0 || (options.check && formatted > 0) {
        std::process::exit(1);
    }
}

fn print_fmt_help() {
    println!("Format markup documents");
    println!();
    println!("Usage: mx fmt [options] [paths...]");
    println!();
    println!("Arguments:");
    println!("  paths        Files or directories to format (default: .)");
    println!();
    println!("Modes:");
    println!("  --check      Check if files are formatted (exit 1 if not)");
    println!("  --diff       Show changed lines instead of modifying files");
    println!("  --edits      Print the edits instead of applying them");
    println!("  --stdin      Read from stdin, write to stdout");
    println!("  --lines=A:B  Only format lines A through B (one file or stdin)");
    println!();
    println!("Settings:");
    println!("  --width=N                          Maximum line width, 0 for none (default: 100)");
    println!("  --tab-size=N                       Columns per indentation level (default: 2)");
    println!("  --tabs                             Indent with tabs");
    println!("  --join                             Reflow text content to the line width");
    println!("  --split-attributes                 One attribute per line");
    println!("  --closing-bracket-new-line         Put '>' of split tags on its own line");
    println!("  --preserve-attribute-line-breaks   Keep line breaks between attributes");
    println!("  --quotes=double|single             Enforce one quote style");
    println!("  --no-space-before-empty-close      Write <a/> instead of <a />");
    println!("  --no-grammar                       Ignore content models");
    println!("  --final-newline                    End documents with a line break");
    println!("  --keep-final-newlines              Keep trailing blank lines");
    println!();
    println!("Directories are searched recursively for {}.", EXTENSIONS.join(", "));
    println!("Hidden entries, target/ and node_modules/ are skipped.");
    println!();
    println!("Examples:");
    println!("  mx fmt                           # Format everything under the current directory");
    println!("  mx fmt pom.xml                   # Format a single file");
    println!("  mx fmt --check                   # Check formatting in CI");
    println!("  mx fmt --diff --width=80 doc.xml # Preview changes");
    println!("  cat doc.xml | mx fmt --stdin     # Format stdin to stdout");
}
