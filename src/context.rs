//! Shared per-document parse context
//!
//! One `Context` is created per catalog document and shared (via `Rc`)
//! between all records parsed from it. It carries the active locale,
//! the source filename for diagnostics, and the document's format
//! style, which steers a few format-specific codec decisions.

use std::rc::Rc;

/// Style of the document a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatStyle {
    /// Merged multi-component catalog (compact per-locale attributes)
    Collection,
    /// One-component metadata file (richer localized blocks)
    SingleDocument,
}

/// Shared state of the document currently being parsed or emitted
#[derive(Debug, Clone)]
pub struct Context {
    locale: String,
    filename: Option<String>,
    style: FormatStyle,
}

impl Context {
    /// Create a new context for the given format style
    pub fn new(style: FormatStyle) -> Self {
        Self {
            locale: "C".to_string(),
            filename: None,
            style,
        }
    }

    /// Set the active locale
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Set the source filename, used in diagnostics
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Wrap this context in an `Rc` for sharing across records
    pub fn shared(self) -> Rc<Self> {
        Rc::new(self)
    }

    /// The active locale of the document
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// The source filename, if known
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// Name to use when referring to the document in log messages
    pub fn display_name(&self) -> &str {
        self.filename.as_deref().unwrap_or("<data>")
    }

    /// The format style of the document
    pub fn style(&self) -> FormatStyle {
        self.style
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_defaults() {
        let ctx = Context::new(FormatStyle::Collection);
        assert_eq!(ctx.locale(), "C");
        assert_eq!(ctx.filename(), None);
        assert_eq!(ctx.display_name(), "<data>");
        assert_eq!(ctx.style(), FormatStyle::Collection);
    }

    #[test]
    fn test_context_builders() {
        let ctx = Context::new(FormatStyle::SingleDocument)
            .with_locale("de")
            .with_filename("org.example.app.metainfo.xml");
        assert_eq!(ctx.locale(), "de");
        assert_eq!(ctx.display_name(), "org.example.app.metainfo.xml");
    }
}
