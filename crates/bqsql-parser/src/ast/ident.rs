/// A single name segment, stored exactly as written (backquotes included).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(String);

impl Identifier {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_quoted(&self) -> bool {
        self.0.len() >= 2 && self.0.starts_with('`') && self.0.ends_with('`')
    }

    /// The name without surrounding backquotes.
    pub fn unquoted(&self) -> &str {
        if self.is_quoted() {
            &self.0[1..self.0.len() - 1]
        } else {
            &self.0
        }
    }
}

/// Dotted name such as `project.dataset.table`. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentifierPath {
    segments: Vec<Identifier>,
}

impl IdentifierPath {
    pub fn new(first: Identifier, rest: impl IntoIterator<Item = Identifier>) -> Self {
        let mut segments = vec![first];
        segments.extend(rest);
        Self { segments }
    }

    pub fn segments(&self) -> &[Identifier] {
        &self.segments
    }

    pub fn first(&self) -> &Identifier {
        &self.segments[0]
    }

    pub fn last(&self) -> &Identifier {
        &self.segments[self.segments.len() - 1]
    }

    pub fn is_single(&self) -> bool {
        self.segments.len() == 1
    }

    /// Source form: segments joined by `.`, backquotes kept.
    pub fn dotted(&self) -> String {
        let parts: Vec<&str> = self.segments.iter().map(Identifier::as_str).collect();
        parts.join(".")
    }

    /// Canonical name: backquotes stripped from every segment, then joined.
    pub fn unquoted_name(&self) -> String {
        let parts: Vec<&str> = self.segments.iter().map(Identifier::unquoted).collect();
        parts.join(".")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstantKind {
    String,
    Bytes,
    Number,
    Boolean,
    Null,
}

/// A literal. `text` is the exact source spelling; booleans and `NULL` are
/// normalized to upper case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constant {
    pub kind: ConstantKind,
    pub text: String,
}

impl Constant {
    pub fn new(kind: ConstantKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn number(text: impl Into<String>) -> Self {
        Self::new(ConstantKind::Number, text)
    }

    /// Decoded contents of a string or bytes literal.
    ///
    /// Raw literals (`r'…'`) keep backslashes verbatim; other literals have
    /// their escapes resolved.
    pub fn string_value(&self) -> Option<String> {
        if !matches!(self.kind, ConstantKind::String | ConstantKind::Bytes) {
            return None;
        }
        let body_start = self.text.find(['\'', '"'])?;
        let prefix = &self.text[..body_start];
        let quoted = &self.text[body_start..];
        let quote_len = if quoted.starts_with("'''") || quoted.starts_with("\"\"\"") {
            3
        } else {
            1
        };
        let inner = quoted.get(quote_len..quoted.len().checked_sub(quote_len)?)?;
        if prefix.contains(['r', 'R']) {
            Some(inner.to_owned())
        } else {
            Some(unescape(inner))
        }
    }
}

fn unescape(inner: &str) -> String {
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
