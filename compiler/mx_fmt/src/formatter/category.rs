//! Content categories: how an element's children are laid out.

use mx_ir::{Document, Element};

use crate::config::FormatConfig;
use crate::content_model::ContentModel;

/// Layout rule for the children of one element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Category {
    /// Block children, one per line; text is left as written.
    IgnoreSpace,
    /// Text only, reflowed within the width.
    NormalizeSpace,
    /// Text and inline children joined on shared lines.
    MixedContent,
    /// Whitespace-significant; nothing inside is edited.
    PreserveSpace,
}

impl Category {
    /// True when whitespace in text runs collapses to single spaces.
    #[inline]
    pub(crate) fn joins(self, config: &FormatConfig) -> bool {
        self == Category::MixedContent || config.join_content_lines
    }
}

/// Decide the category of `element`, whose parent has category `parent`.
///
/// An explicit `xml:space` wins, then inherited preservation and the
/// configured preserve list. After that the content model decides when one
/// is bound, and otherwise the element's own content does.
pub(crate) fn resolve(
    doc: &Document,
    element: &Element,
    parent: Category,
    config: &FormatConfig,
    model: Option<&dyn ContentModel>,
) -> Category {
    let name = doc.element_name(element);
    let xml_space = doc
        .find_attribute(element, "xml:space")
        .and_then(|attribute| doc.attribute_value(attribute));
    match xml_space {
        Some("preserve") => return Category::PreserveSpace,
        Some("default") => {}
        _ if parent == Category::PreserveSpace || config.preserves_space(name) => {
            return Category::PreserveSpace;
        }
        _ => {}
    }

    if config.grammar_aware_formatting {
        if let Some(model) = model {
            return if model.is_mixed_content(name) {
                Category::MixedContent
            } else {
                Category::IgnoreSpace
            };
        }
    }

    if parent == Category::MixedContent {
        return Category::MixedContent;
    }
    match (element.has_text(), element.has_markup()) {
        (true, true) => Category::MixedContent,
        (true, false) => Category::NormalizeSpace,
        _ => Category::IgnoreSpace,
    }
}
