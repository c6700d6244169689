//! Table dependency graph and its Graphviz rendering.
//!
//! An edge `dest -> src` means `dest` is written from a query reading `src`.

use std::collections::HashSet;
use std::fmt::Write;

use indexmap::{IndexMap, IndexSet};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DependencyGraph {
    edges: IndexMap<String, IndexSet<String>>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, dest: impl Into<String>, src: impl Into<String>) {
        self.edges
            .entry(dest.into())
            .or_default()
            .insert(src.into());
    }

    pub fn len(&self) -> usize {
        self.edges.values().map(IndexSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Edges grouped by destination, in first-seen order.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.edges
            .iter()
            .flat_map(|(dest, srcs)| srcs.iter().map(move |src| (dest.as_str(), src.as_str())))
    }

    /// Transitive reduction: drop every edge whose endpoints stay connected
    /// through another path.
    ///
    /// Edges are considered in insertion order, so within a cycle the
    /// earliest redundant edge goes first. Self-loops are kept.
    pub fn minimise(&mut self) {
        let candidates: Vec<(String, String)> = self
            .edges()
            .filter(|(dest, src)| dest != src)
            .map(|(dest, src)| (dest.to_owned(), src.to_owned()))
            .collect();

        for (dest, src) in candidates {
            if self.reachable_without_edge(&dest, &src) {
                tracing::trace!(%dest, %src, "dropping implied edge");
                if let Some(srcs) = self.edges.get_mut(&dest) {
                    srcs.shift_remove(&src);
                }
            }
        }
        self.edges.retain(|_, srcs| !srcs.is_empty());
    }

    /// Whether `to` is reachable from `from` without the direct `from -> to` edge.
    fn reachable_without_edge(&self, from: &str, to: &str) -> bool {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut stack = vec![from];

        while let Some(node) = stack.pop() {
            let Some(srcs) = self.edges.get(node) else {
                continue;
            };
            for next in srcs {
                if node == from && next == to {
                    continue;
                }
                if next == to {
                    return true;
                }
                if seen.insert(next.as_str()) {
                    stack.push(next);
                }
            }
        }
        false
    }

    pub fn to_dot(&self) -> String {
        let mut out = String::from("digraph connections {\n");
        for (dest, src) in self.edges() {
            // Writing into a String can't fail.
            let _ = writeln!(out, "{} -> {};", dot_id(dest), dot_id(src));
        }
        out.push_str("}\n");
        out
    }
}

/// Double-quoted Graphviz ID. Only `"` and `\` need escaping.
fn dot_id(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    out.push('"');
    for c in name.chars() {
        if matches!(c, '"' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

impl<D: Into<String>, S: Into<String>> Extend<(D, S)> for DependencyGraph {
    fn extend<I: IntoIterator<Item = (D, S)>>(&mut self, iter: I) {
        for (dest, src) in iter {
            self.insert(dest, src);
        }
    }
}

impl<D: Into<String>, S: Into<String>> FromIterator<(D, S)> for DependencyGraph {
    fn from_iter<I: IntoIterator<Item = (D, S)>>(iter: I) -> Self {
        let mut graph = Self::new();
        graph.extend(iter);
        graph
    }
}
