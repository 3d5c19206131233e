//! Tokenizer configuration.

/// Configurable characters recognized by the tokenizer.
///
/// Parentheses and the comma argument delimiter are fixed parts of the call
/// syntax; the quote, escape, and comment characters can be adjusted to fit
/// the host's text format. Quotes suspend all delimiters, the escape
/// character takes the following character literally, and the comment
/// marker (when set) truncates the rest of the line outside quotes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Syntax {
    /// Character that opens and closes a quoted section.
    pub quote: char,
    /// Character that takes the following character literally.
    pub escape: char,
    /// Optional marker truncating the rest of the line.
    pub comment: Option<char>,
    /// When set, an argument containing quoted sections is reduced to the
    /// quoted content: `foo"bar"baz` becomes `bar`.
    pub trim_quotes: bool,
}

impl Syntax {
    /// The default syntax: `"` quotes, `\` escapes, no comment marker,
    /// quote trimming on.
    pub const DEFAULT: Self = Self {
        quote: '"',
        escape: '\\',
        comment: None,
        trim_quotes: true,
    };
}

impl Default for Syntax {
    fn default() -> Self {
        Self::DEFAULT
    }
}
