//! Formatting settings.
//!
//! [`FormatConfig`] is resolved once per request and only read afterwards.
//! With the `serde` feature it (de)serializes with the camelCase names
//! editors send in their formatting settings.

/// Default maximum line width before breaking.
pub const MAX_LINE_WIDTH: usize = 100;

/// Default number of columns per indentation level.
pub const TAB_SIZE: usize = 2;

/// Elements whose content is whitespace-significant unless configured
/// otherwise.
pub const DEFAULT_PRESERVE_SPACE: &[&str] = &[
    "xsl:text",
    "xsl:comment",
    "xsl:processing-instruction",
    "literallayout",
    "programlisting",
    "screen",
    "synopsis",
    "pre",
    "xd:pre",
];

/// Whether attribute quotes are rewritten.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub enum EnforceQuoteStyle {
    /// Leave quotes as written.
    #[default]
    Ignore,
    /// Rewrite quotes to [`FormatConfig::quotation`].
    Preferred,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub enum Quotation {
    #[default]
    Double,
    Single,
}

impl Quotation {
    #[inline]
    pub fn as_char(self) -> char {
        match self {
            Quotation::Double => '"',
            Quotation::Single => '\'',
        }
    }
}

/// The quote rule in effect for one pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QuotePolicy {
    Ignore,
    Preferred(char),
}

/// Configuration for the formatter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct FormatConfig {
    /// Maximum line width; `0` disables width-based breaking.
    pub max_line_width: usize,
    /// Columns per indentation level.
    pub tab_size: usize,
    /// Indent with spaces (`true`) or one tab per level.
    pub insert_spaces: bool,
    /// Put every attribute of a multi-attribute tag on its own line.
    pub split_attributes: bool,
    /// Indentation levels, relative to the tag, of split attributes.
    pub split_attributes_indent_size: usize,
    /// Keep (and re-indent) line breaks authors put before attributes.
    pub preserve_attribute_line_breaks: bool,
    /// Reflow text: collapse whitespace and re-break at the line width.
    pub join_content_lines: bool,
    pub enforce_quote_style: EnforceQuoteStyle,
    #[cfg_attr(feature = "serde", serde(rename = "quotationCharacter"))]
    pub quotation: Quotation,
    /// Ask the bound content model which elements hold mixed content.
    pub grammar_aware_formatting: bool,
    /// Write `<a />` rather than `<a/>`.
    pub space_before_empty_close_tag: bool,
    /// Put `>` of a split start tag on its own line.
    pub closing_bracket_new_line: bool,
    /// Blank lines kept between block children.
    pub preserved_newlines: usize,
    /// Remove whitespace after the last node of the document.
    pub trim_final_newlines: bool,
    /// End the document with exactly one line separator.
    pub insert_final_newline: bool,
    /// Elements whose content is never touched.
    pub preserve_space: Vec<String>,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            max_line_width: MAX_LINE_WIDTH,
            tab_size: TAB_SIZE,
            insert_spaces: true,
            split_attributes: false,
            split_attributes_indent_size: 2,
            preserve_attribute_line_breaks: false,
            join_content_lines: false,
            enforce_quote_style: EnforceQuoteStyle::Ignore,
            quotation: Quotation::Double,
            grammar_aware_formatting: true,
            space_before_empty_close_tag: true,
            closing_bracket_new_line: false,
            preserved_newlines: 2,
            trim_final_newlines: true,
            insert_final_newline: false,
            preserve_space: DEFAULT_PRESERVE_SPACE
                .iter()
                .map(|&name| name.to_owned())
                .collect(),
        }
    }
}

/// A setting combination the formatter cannot work with.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("tab size must be at least 1")]
    ZeroTabSize,
}

impl FormatConfig {
    #[must_use]
    pub fn with_max_line_width(mut self, max_line_width: usize) -> Self {
        self.max_line_width = max_line_width;
        self
    }

    #[must_use]
    pub fn with_tab_size(mut self, tab_size: usize) -> Self {
        self.tab_size = tab_size;
        self
    }

    #[must_use]
    pub fn with_insert_spaces(mut self, insert_spaces: bool) -> Self {
        self.insert_spaces = insert_spaces;
        self
    }

    #[must_use]
    pub fn with_split_attributes(mut self, split_attributes: bool) -> Self {
        self.split_attributes = split_attributes;
        self
    }

    #[must_use]
    pub fn with_preserve_attribute_line_breaks(mut self, preserve: bool) -> Self {
        self.preserve_attribute_line_breaks = preserve;
        self
    }

    #[must_use]
    pub fn with_join_content_lines(mut self, join: bool) -> Self {
        self.join_content_lines = join;
        self
    }

    /// Enforce `quotation` on every attribute value.
    #[must_use]
    pub fn with_preferred_quotes(mut self, quotation: Quotation) -> Self {
        self.enforce_quote_style = EnforceQuoteStyle::Preferred;
        self.quotation = quotation;
        self
    }

    #[must_use]
    pub fn with_space_before_empty_close_tag(mut self, space: bool) -> Self {
        self.space_before_empty_close_tag = space;
        self
    }

    #[must_use]
    pub fn with_insert_final_newline(mut self, insert: bool) -> Self {
        self.insert_final_newline = insert;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tab_size == 0 {
            return Err(ConfigError::ZeroTabSize);
        }
        Ok(())
    }

    pub fn quote_policy(&self) -> QuotePolicy {
        match self.enforce_quote_style {
            EnforceQuoteStyle::Ignore => QuotePolicy::Ignore,
            EnforceQuoteStyle::Preferred => QuotePolicy::Preferred(self.quotation.as_char()),
        }
    }

    /// True when `name` is listed in `preserve_space`.
    pub fn preserves_space(&self, name: &str) -> bool {
        self.preserve_space.iter().any(|preserved| preserved == name)
    }
}
