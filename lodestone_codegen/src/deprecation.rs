/// Whether a schema field is deprecated, with the optional reason.
#[derive(Debug, Clone, PartialEq)]
pub enum DeprecationStatus {
    Current,
    Deprecated(Option<String>)
}

/// How codegen reacts to selecting a deprecated field.
#[derive(Debug, Clone, PartialEq)]
pub enum DeprecationStrategy {
    /// Generate the field as if it were current.
    Allow,
    /// Omit deprecated fields from the generated types entirely.
    Deny,
    /// Generate the field with a `#[deprecated]` note.
    Warn
}

impl Default for DeprecationStrategy {
    fn default() -> Self {
        DeprecationStrategy::Warn
    }
}
