//! Linearizes a [`Doc`] into text.
//!
//! Layout is computed top-down with the starting column known, so a `Choice`
//! can decide whether its compact candidate fits where it actually lands.
//!
//! A block is a list of lines. The first line is relative: it continues
//! whatever text precedes it at the starting column. Every later line is
//! absolute and already carries its own leading spaces. Parents only ever
//! touch the first line, which keeps multi-line string literals verbatim.

use crate::config::LayoutConfig;
use crate::doc::Doc;

type Block = Vec<String>;

#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer {
    config: LayoutConfig,
}

impl Renderer {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn render(&self, doc: &Doc) -> String {
        tracing::trace!(
            width = self.config.width,
            indent = self.config.indent,
            "rendering document"
        );
        self.layout(doc, 0).join("\n")
    }

    fn layout(&self, doc: &Doc, col: usize) -> Block {
        match doc {
            Doc::Text(text) => text.split('\n').map(str::to_owned).collect(),
            Doc::Line(parts) => self.layout_line(parts, col),
            Doc::Stack(parts) => self.layout_stack(parts.iter(), col),
            Doc::Indent(inner) => {
                let indent = self.config.indent;
                let mut block = self.layout(inner, col + indent);
                pad_first(&mut block, indent);
                block
            }
            Doc::Wrap { items, sep } => self.layout_wrap(items, sep, col),
            Doc::Choice { compact, full } => {
                let block = self.layout(compact, col);
                if self.fits(&block, col) {
                    block
                } else {
                    self.layout(full, col)
                }
            }
        }
    }

    fn layout_line(&self, parts: &[Doc], col: usize) -> Block {
        let mut out = vec![String::new()];
        for part in parts {
            let start = end_column(&out, col);
            let mut lines = self.layout(part, start).into_iter();
            if let Some(first) = lines.next()
                && let Some(last) = out.last_mut()
            {
                last.push_str(&first);
            }
            out.extend(lines);
        }
        out
    }

    fn layout_stack<'d>(&self, parts: impl Iterator<Item = &'d Doc>, col: usize) -> Block {
        let mut out = Block::new();
        for (i, part) in parts.enumerate() {
            let mut block = self.layout(part, col);
            if i > 0 {
                pad_first(&mut block, col);
            }
            out.extend(block);
        }
        if out.is_empty() {
            out.push(String::new());
        }
        out
    }

    fn layout_wrap(&self, items: &[Doc], sep: &str, col: usize) -> Block {
        if let Some(joined) = self.flat_join(items, sep)
            && col + width(&joined) <= self.config.width
        {
            return vec![joined];
        }
        self.layout_stack(items.iter(), col)
    }

    /// Joins `items` on one line, or `None` when some item spans several lines.
    fn flat_join(&self, items: &[Doc], sep: &str) -> Option<String> {
        let mut line = String::new();
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                line.push_str(sep);
            }
            line.push_str(&self.flat(item)?);
        }
        Some(line)
    }

    /// One-line rendering of `doc` with every `Choice` on its compact side
    /// when that side has one. Measures only, no layout decisions.
    fn flat(&self, doc: &Doc) -> Option<String> {
        match doc {
            Doc::Text(text) => (!text.contains('\n')).then(|| text.clone()),
            Doc::Line(parts) => parts.iter().map(|part| self.flat(part)).collect(),
            Doc::Stack(parts) => match parts.as_slice() {
                [] => Some(String::new()),
                [only] => self.flat(only),
                _ => None,
            },
            Doc::Indent(inner) => {
                let mut line = self.flat(inner)?;
                if !line.is_empty() {
                    line.insert_str(0, &" ".repeat(self.config.indent));
                }
                Some(line)
            }
            Doc::Wrap { items, sep } => self.flat_join(items, sep),
            Doc::Choice { compact, full } => self.flat(compact).or_else(|| self.flat(full)),
        }
    }

    fn fits(&self, block: &Block, col: usize) -> bool {
        block.iter().enumerate().all(|(i, line)| {
            let start = if i == 0 { col } else { 0 };
            start + width(line) <= self.config.width
        })
    }
}

fn width(text: &str) -> usize {
    text.chars().count()
}

/// Column right after the last character of `block` placed at `col`.
fn end_column(block: &Block, col: usize) -> usize {
    match block.as_slice() {
        [only] => col + width(only),
        [.., last] => width(last),
        [] => col,
    }
}

/// Blank lines stay blank so no trailing whitespace is produced.
fn pad_first(block: &mut Block, pad: usize) {
    if let Some(first) = block.first_mut()
        && !first.is_empty()
    {
        first.insert_str(0, &" ".repeat(pad));
    }
}
