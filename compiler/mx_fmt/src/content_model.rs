//! Grammar oracle for mixed content.
//!
//! A schema engine (XSD, RelaxNG, DTD) knows which elements may interleave
//! text and child elements. The formatter only needs that one answer, so the
//! engine is plugged in through [`ContentModel`].

use rustc_hash::FxHashSet;

pub trait ContentModel {
    /// True when `qualified_name` (prefix included) allows mixed content.
    fn is_mixed_content(&self, qualified_name: &str) -> bool;
}

impl<F> ContentModel for F
where
    F: Fn(&str) -> bool,
{
    fn is_mixed_content(&self, qualified_name: &str) -> bool {
        self(qualified_name)
    }
}

/// A content model backed by a fixed set of mixed-content element names.
#[derive(Clone, Debug, Default)]
pub struct MixedContentSet {
    names: FxHashSet<String>,
}

impl MixedContentSet {
    pub fn new() -> Self {
        MixedContentSet::default()
    }

    pub fn insert(&mut self, name: impl Into<String>) {
        self.names.insert(name.into());
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for MixedContentSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        MixedContentSet {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl ContentModel for MixedContentSet {
    fn is_mixed_content(&self, qualified_name: &str) -> bool {
        self.names.contains(qualified_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_lookup() {
        let model: MixedContentSet = ["para", "xs:documentation"].into_iter().collect();
        assert_eq!(model.len(), 2);
        assert!(model.is_mixed_content("para"));
        assert!(model.is_mixed_content("xs:documentation"));
        assert!(!model.is_mixed_content("documentation"));
    }

    #[test]
    fn test_closure_is_a_content_model() {
        let model = |name: &str| name.starts_with("html:");
        assert!(model.is_mixed_content("html:p"));
        assert!(!model.is_mixed_content("svg:g"));
    }

    #[test]
    fn test_insert() {
        let mut model = MixedContentSet::new();
        assert!(model.is_empty());
        model.insert("p");
        assert!(model.is_mixed_content("p"));
    }
}
