//! Parse command: print the tree the formatter sees.

use std::fmt::Write;

use mx_ir::{Document, NodeId, NodeKind};

use super::read_file;
use super::report::format_problems;

/// Longest text excerpt shown per node.
const EXCERPT_CHARS: usize = 24;

/// Parse a file and print its tree, then its problems on stderr.
pub fn parse_file(path: &str) {
    let content = match read_file(path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    let parsed = mx_parse::parse(&content);
    println!("Parse result for '{path}':");
    println!("  Nodes: {}", parsed.document.node_count());
    println!("  Problems: {}", parsed.problems.len());
    println!();
    print!("{}", dump_tree(&parsed.document));

    if parsed.has_problems() {
        eprintln!();
        eprint!("{}", format_problems(path, &parsed.problems, &content));
    }
}

fn excerpt(text: &str) -> String {
    let mut short: String = text.chars().take(EXCERPT_CHARS).collect();
    if short.len() < text.len() {
        short.push_str("...");
    }
    format!("{short:?}")
}

fn describe(doc: &Document, id: NodeId) -> String {
    let node = doc.node(id);
    let mut line = node.kind.name().to_owned();
    match &node.kind {
        NodeKind::Element(element) => {
            let _ = write!(line, " <{}>", doc.element_name(element));
            if !element.attributes.is_empty() {
                let names: Vec<&str> = element
                    .attributes
                    .iter()
                    .map(|attribute| doc.attribute_name(attribute))
                    .collect();
                let _ = write!(line, " [{}]", names.join(", "));
            }
            if element.is_self_closing() {
                line.push_str(" self-closing");
            } else if element.end_tag.is_none() {
                line.push_str(" unclosed");
            }
        }
        NodeKind::ProcessingInstruction(instruction) => {
            let _ = write!(line, " {}", doc.slice(instruction.target));
        }
        NodeKind::Text => {
            let _ = write!(line, " {}", excerpt(doc.slice(node.span)));
        }
        NodeKind::Comment | NodeKind::CData | NodeKind::DocType | NodeKind::Stray => {}
    }
    let _ = write!(line, " @{:?}", node.span);
    line
}

/// Indented outline of the document, one node per line. Walks with an
/// explicit stack so deep documents cannot overflow.
pub fn dump_tree(doc: &Document) -> String {
    let mut output = String::new();
    let mut stack: Vec<(NodeId, usize)> = doc.roots().iter().rev().map(|&id| (id, 0)).collect();
    while let Some((id, depth)) = stack.pop() {
        let _ = writeln!(output, "{}{}", "  ".repeat(depth), describe(doc, id));
        stack.extend(doc.children(id).iter().rev().map(|&child| (child, depth + 1)));
    }
    output
}
