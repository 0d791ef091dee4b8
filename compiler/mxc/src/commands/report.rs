//! Rendering parse problems for the terminal.
//!
//! Problems never stop a command; they are printed as warnings next to the
//! offending source line and the document is processed anyway.

use std::fmt::Write;
use std::io::IsTerminal;

use mx_ir::LineIndex;
use mx_parse::{Problem, ProblemKind};

/// ANSI color codes for terminal output.
mod colors {
    pub const WARNING: &str = "\x1b[1;33m"; // Bold yellow
    pub const HELP: &str = "\x1b[1;32m"; // Bold green
    pub const BOLD: &str = "\x1b[1m";
    pub const BLUE: &str = "\x1b[1;34m"; // Bold blue
    pub const RESET: &str = "\x1b[0m";
}

/// Check if stderr is a terminal (for color output).
fn use_colors() -> bool {
    std::io::stderr().is_terminal()
}

/// Wraps `text` in `color` when coloring is on.
struct Paint {
    enabled: bool,
}

impl Paint {
    fn apply(&self, color: &str, text: &str) -> String {
        if self.enabled {
            format!("{color}{text}{}", colors::RESET)
        } else {
            text.to_owned()
        }
    }
}

/// The line containing byte `offset` (without its terminator) and the
/// offset where that line starts.
pub(crate) fn get_source_line(source: &str, offset: u32) -> Option<(&str, usize)> {
    let offset = offset as usize;
    if offset > source.len() || !source.is_char_boundary(offset) {
        return None;
    }
    let line_start = source[..offset].rfind(['\n', '\r']).map_or(0, |pos| pos + 1);
    let line_end = source[offset..]
        .find(['\n', '\r'])
        .map_or(source.len(), |pos| offset + pos);
    Some((&source[line_start..line_end], line_start))
}

fn suggestion(kind: &ProblemKind) -> Option<String> {
    match kind {
        ProblemKind::UnclosedComment => Some("close the comment with `-->`".to_owned()),
        ProblemKind::UnclosedCData => Some("close the section with `]]>`".to_owned()),
        ProblemKind::UnclosedProcessingInstruction => {
            Some("close the instruction with `?>`".to_owned())
        }
        ProblemKind::UnclosedStartTag(_) | ProblemKind::UnclosedEndTag(_) => {
            Some("add the missing `>`".to_owned())
        }
        ProblemKind::UnclosedElement(name) => Some(format!("add `</{name}>`")),
        ProblemKind::OrphanEndTag(_) => {
            Some("remove it or add the matching start tag".to_owned())
        }
        ProblemKind::UnterminatedQuote => Some("add the matching quote".to_owned()),
        ProblemKind::UnquotedValue => Some("wrap the value in quotes".to_owned()),
        ProblemKind::MissingValue(_) => Some("add a quoted value after `=`".to_owned()),
        ProblemKind::UnclosedDeclaration
        | ProblemKind::StrayCharacter(_)
        | ProblemKind::DocumentTooLarge(_) => None,
    }
}

/// Render one problem: header, location, source line and underline.
pub fn format_problem(path: &str, problem: &Problem, source: &str) -> String {
    render(
        path,
        problem,
        source,
        &LineIndex::new(source),
        &Paint {
            enabled: use_colors(),
        },
    )
}

fn render(path: &str, problem: &Problem, source: &str, index: &LineIndex, paint: &Paint) -> String {
    let mut output = String::new();
    let start = index.position(source, problem.span.start);
    let end = index.position(source, problem.span.end);

    let _ = writeln!(
        output,
        "{}{}",
        paint.apply(colors::WARNING, "warning"),
        paint.apply(colors::BOLD, &format!(": {}", problem.kind)),
    );
    let _ = writeln!(output, "  {} {path}:{start}", paint.apply(colors::BLUE, "-->"));

    if let Some((line, _)) = get_source_line(source, problem.span.start) {
        let number = (start.line + 1).to_string();
        let padding = " ".repeat(number.len());
        let gutter = paint.apply(colors::BLUE, "|");
        let width = if end.line == start.line && end.character > start.character {
            (end.character - start.character) as usize
        } else {
            line.chars().count().saturating_sub(start.character as usize)
        };

        let _ = writeln!(output, "  {padding} {gutter}");
        let _ = writeln!(
            output,
            "  {} {line}",
            paint.apply(colors::BLUE, &format!("{number} |"))
        );
        let _ = writeln!(
            output,
            "  {padding} {gutter} {}{}",
            " ".repeat(start.character as usize),
            paint.apply(colors::WARNING, &"^".repeat(width.max(1))),
        );
    }

    if let Some(help) = suggestion(&problem.kind) {
        let _ = writeln!(output, "  = {}: {help}", paint.apply(colors::HELP, "help"));
    }
    output
}

/// Render every problem of one file, followed by a count.
pub fn format_problems(path: &str, problems: &[Problem], source: &str) -> String {
    let index = LineIndex::new(source);
    let paint = Paint {
        enabled: use_colors(),
    };
    let mut output = String::new();
    for problem in problems {
        output.push_str(&render(path, problem, source, &index, &paint));
        output.push('\n');
    }
    if problems.len() > 1 {
        let _ = writeln!(
            output,
            "{}: {} problems in {path}",
            paint.apply(colors::WARNING, "warning"),
            problems.len()
        );
    }
    output
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use mx_ir::Span;
    use pretty_assertions::assert_eq;

    fn plain(path: &str, problem: &Problem, source: &str) -> String {
        render(
            path,
            problem,
            source,
            &LineIndex::new(source),
            &Paint { enabled: false },
        )
    }

    #[test]
    fn source_line_around_offset() {
        let source = "<a>\n  <b>\n</a>";
        assert_eq!(get_source_line(source, 6), Some(("  <b>", 4)));
        assert_eq!(get_source_line(source, 0), Some(("<a>", 0)));
        assert_eq!(get_source_line(source, 14), Some(("</a>", 10)));
        assert_eq!(get_source_line(source, 15), None);
    }

    #[test]
    fn source_line_with_crlf() {
        let source = "<a>\r\n<b>\r\n</a>";
        assert_eq!(get_source_line(source, 5), Some(("<b>", 5)));
    }

    #[test]
    fn renders_orphan_end_tag() {
        let source = "<a>\n  </b>\n</a>";
        let problem = Problem::new(ProblemKind::OrphanEndTag("b".to_owned()), Span::new(6, 10));
        let expected = "\
warning: end tag `</b>` does not match any open element
  --> test.xml:2:3
    |
  2 |   </b>
    |   ^^^^
  = help: remove it or add the matching start tag
";
        assert_eq!(plain("test.xml", &problem, source), expected);
    }

    #[test]
    fn multi_line_problem_underlines_to_line_end() {
        let source = "<a>\n<!-- open\nmore";
        let problem = Problem::new(ProblemKind::UnclosedComment, Span::new(4, 18));
        let rendered = plain("c.xml", &problem, source);
        assert!(rendered.contains("  2 | <!-- open\n"));
        assert!(rendered.contains("    | ^^^^^^^^^\n"));
    }

    #[test]
    fn empty_span_gets_one_caret() {
        let source = "<a x=>";
        let problem = Problem::new(ProblemKind::MissingValue("x".to_owned()), Span::new(5, 5));
        let rendered = plain("v.xml", &problem, source);
        assert!(rendered.contains("  --> v.xml:1:6\n"));
        assert!(rendered.contains("    |      ^\n"));
    }
}
