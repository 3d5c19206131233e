//! Compiles a line of text into a segment tree.
//!
//! A call span is a word immediately followed by `(`. Everything between
//! call spans is literal text and survives the round trip verbatim, so
//! `Total: add(2, 3, 5)` expands to `Total: 10` with the spacing intact.
//!
//! Quotes suspend delimiters and are stripped; the escape character takes
//! the next character literally; the comment marker (when configured)
//! truncates the rest of the line outside quotes. A `(` without a leading
//! word and an unmatched `)` are literal text. An unclosed call is still
//! produced, with its arguments running to the end of the line.

use crate::parameter::{Call, Compiled, Parameter, Segment};
use crate::syntax::Syntax;

/// Compiles `line` into a reusable segment tree.
#[must_use]
pub fn compile(line: &str, syntax: &Syntax) -> Compiled {
    let mut parser = Parser {
        chars: line.chars().collect(),
        pos: 0,
        syntax,
    };
    let segments = parser.parse_line();
    Compiled {
        segments,
        source: line.to_string(),
    }
}

/// Returns true if `c` can be part of a call name.
fn is_word_char(c: char, syntax: &Syntax) -> bool {
    !c.is_whitespace()
        && !matches!(c, '(' | ')' | ',')
        && c != syntax.quote
        && c != syntax.escape
        && syntax.comment != Some(c)
}

struct Parser<'a> {
    chars: Vec<char>,
    pos: usize,
    syntax: &'a Syntax,
}

impl Parser<'_> {
    fn slice(&self, start: usize, end: usize) -> String {
        self.chars[start..end].iter().collect()
    }

    /// Top level: literal text with embedded call spans.
    fn parse_line(&mut self) -> Vec<Segment> {
        let mut segments = Vec::new();
        let mut buf = String::new();
        // Trailing run of word characters in buf; a candidate call name.
        let mut word = String::new();
        let mut word_start = 0;
        let mut in_quote = false;
        while self.pos < self.chars.len() {
            let c = self.chars[self.pos];
            if in_quote {
                if c == self.syntax.escape && self.pos + 1 < self.chars.len() {
                    buf.push(self.chars[self.pos + 1]);
                    self.pos += 2;
                } else if c == self.syntax.quote {
                    in_quote = false;
                    self.pos += 1;
                } else {
                    buf.push(c);
                    self.pos += 1;
                }
                continue;
            }
            if self.syntax.comment == Some(c) {
                self.pos = self.chars.len();
                break;
            }
            if c == self.syntax.quote {
                in_quote = true;
                word.clear();
                self.pos += 1;
            } else if c == self.syntax.escape && self.pos + 1 < self.chars.len() {
                buf.push(self.chars[self.pos + 1]);
                word.clear();
                self.pos += 2;
            } else if c == '(' && !word.is_empty() {
                // The word chars are the tail of buf; peel them off.
                buf.truncate(buf.len() - word.len());
                if !buf.is_empty() {
                    segments.push(Segment::Text(std::mem::take(&mut buf)));
                }
                let name = std::mem::take(&mut word);
                let call = self.parse_call(name, word_start);
                segments.push(Segment::Call(call));
            } else if is_word_char(c, self.syntax) {
                if word.is_empty() {
                    word_start = self.pos;
                }
                word.push(c);
                buf.push(c);
                self.pos += 1;
            } else {
                word.clear();
                buf.push(c);
                self.pos += 1;
            }
        }
        if !buf.is_empty() {
            segments.push(Segment::Text(buf));
        }
        segments
    }

    /// Argument list of a call. Entered with `pos` on the `(`.
    fn parse_call(&mut self, name: String, name_start: usize) -> Call {
        self.pos += 1;
        let mut args = Vec::new();
        let mut builder = ArgBuilder::default();
        let mut arg_start = self.pos;
        let full_end;
        loop {
            if self.pos >= self.chars.len() {
                full_end = self.chars.len();
                self.finish_arg(&mut args, &mut builder, arg_start, full_end);
                break;
            }
            let c = self.chars[self.pos];
            if builder.in_quote {
                if c == self.syntax.escape && self.pos + 1 < self.chars.len() {
                    builder.push_quoted(self.chars[self.pos + 1]);
                    self.pos += 2;
                } else if c == self.syntax.quote {
                    builder.in_quote = false;
                    self.pos += 1;
                } else {
                    builder.push_quoted(c);
                    self.pos += 1;
                }
                continue;
            }
            if self.syntax.comment == Some(c) {
                full_end = self.pos;
                self.pos = self.chars.len();
                self.finish_arg(&mut args, &mut builder, arg_start, full_end);
                break;
            }
            if c == self.syntax.quote {
                builder.begin_quote();
                self.pos += 1;
            } else if c == self.syntax.escape && self.pos + 1 < self.chars.len() {
                builder.push_plain(self.chars[self.pos + 1]);
                self.pos += 2;
            } else if c == '(' {
                if builder.word.is_empty() {
                    builder.paren_depth += 1;
                    builder.push_plain('(');
                    self.pos += 1;
                } else {
                    let (nested_name, nested_start) = builder.take_word();
                    let call = self.parse_call(nested_name, nested_start);
                    builder.push_call(call);
                }
            } else if c == ')' {
                if builder.paren_depth > 0 {
                    builder.paren_depth -= 1;
                    builder.push_plain(')');
                    self.pos += 1;
                } else {
                    let end = self.pos;
                    self.pos += 1;
                    self.finish_arg(&mut args, &mut builder, arg_start, end);
                    full_end = self.pos;
                    break;
                }
            } else if c == ',' && builder.paren_depth == 0 {
                let end = self.pos;
                self.pos += 1;
                self.finish_arg(&mut args, &mut builder, arg_start, end);
                arg_start = self.pos;
            } else if is_word_char(c, self.syntax) {
                builder.push_word(c, self.pos);
                self.pos += 1;
            } else {
                builder.push_plain(c);
                self.pos += 1;
            }
        }
        Call {
            name,
            full: self.slice(name_start, full_end),
            args,
        }
    }

    fn finish_arg(
        &self,
        args: &mut Vec<Parameter>,
        builder: &mut ArgBuilder,
        start: usize,
        end: usize,
    ) {
        let builder = std::mem::take(builder);
        if let Some(param) = builder.finish(self.slice(start, end), self.syntax.trim_quotes) {
            args.push(param);
        }
    }
}

/// One run of text inside an argument, before quote trimming.
enum Chunk {
    Plain(String),
    Quoted(String),
    Call(Call),
}

#[derive(Default)]
struct ArgBuilder {
    chunks: Vec<Chunk>,
    in_quote: bool,
    had_quote: bool,
    word: String,
    word_start: usize,
    paren_depth: usize,
}

impl ArgBuilder {
    fn begin_quote(&mut self) {
        self.in_quote = true;
        self.had_quote = true;
        self.word.clear();
        self.chunks.push(Chunk::Quoted(String::new()));
    }

    fn push_quoted(&mut self, c: char) {
        if let Some(Chunk::Quoted(text)) = self.chunks.last_mut() {
            text.push(c);
        }
    }

    fn push_plain(&mut self, c: char) {
        self.word.clear();
        self.plain_buf().push(c);
    }

    fn push_word(&mut self, c: char, pos: usize) {
        if self.word.is_empty() {
            self.word_start = pos;
        }
        self.word.push(c);
        self.plain_buf().push(c);
    }

    fn plain_buf(&mut self) -> &mut String {
        if !matches!(self.chunks.last(), Some(Chunk::Plain(_))) {
            self.chunks.push(Chunk::Plain(String::new()));
        }
        match self.chunks.last_mut() {
            Some(Chunk::Plain(text)) => text,
            _ => unreachable!("a plain chunk was just pushed"),
        }
    }

    /// Peels the pending word off the trailing plain chunk; it becomes the
    /// name of a nested call.
    fn take_word(&mut self) -> (String, usize) {
        if let Some(Chunk::Plain(text)) = self.chunks.last_mut() {
            text.truncate(text.len() - self.word.len());
            if text.is_empty() {
                self.chunks.pop();
            }
        }
        (std::mem::take(&mut self.word), self.word_start)
    }

    fn push_call(&mut self, call: Call) {
        self.word.clear();
        self.chunks.push(Chunk::Call(call));
    }

    fn finish(self, raw: String, trim_quotes: bool) -> Option<Parameter> {
        let had_quote = self.had_quote;
        let chunks: Vec<Chunk> = if trim_quotes && had_quote {
            // Quoted sections (and nested calls) replace the argument.
            self.chunks
                .into_iter()
                .filter(|chunk| !matches!(chunk, Chunk::Plain(_)))
                .collect()
        } else {
            self.chunks
        };

        let mut segments: Vec<Segment> = Vec::new();
        for chunk in chunks {
            match chunk {
                Chunk::Plain(text) | Chunk::Quoted(text) => {
                    if let Some(Segment::Text(last)) = segments.last_mut() {
                        last.push_str(&text);
                    } else {
                        segments.push(Segment::Text(text));
                    }
                }
                Chunk::Call(call) => segments.push(Segment::Call(call)),
            }
        }

        if !had_quote {
            if let Some(Segment::Text(first)) = segments.first_mut() {
                *first = first.trim_start().to_string();
            }
            if let Some(Segment::Text(last)) = segments.last_mut() {
                *last = last.trim_end().to_string();
            }
            segments.retain(|segment| !matches!(segment, Segment::Text(text) if text.is_empty()));
            if segments.is_empty() {
                // Empty arguments are dropped so they never count toward
                // arity.
                return None;
            }
        } else if segments.is_empty() {
            // An explicitly quoted empty string is a real argument.
            segments.push(Segment::Text(String::new()));
        }

        let text: String = segments
            .iter()
            .map(|segment| match segment {
                Segment::Text(text) => text.clone(),
                Segment::Call(call) => call.full.clone(),
            })
            .collect();
        let full = if had_quote {
            raw
        } else {
            raw.trim().to_string()
        };
        Some(Parameter::new(segments, text, full))
    }
}
