//! Layout engine for bqsql.
//!
//! A [`Doc`] describes *how* something may be printed; the [`Renderer`]
//! linearizes it into text for a given [`LayoutConfig`].
//!
//! # Example
//!
//! ```
//! use bqsql_core::{Doc, LayoutConfig, Renderer};
//!
//! let args = vec![Doc::text("a,"), Doc::text("b,"), Doc::text("c)")];
//! let call = Doc::line([Doc::text("f("), Doc::wrap(args, " ")]);
//!
//! let narrow = Renderer::new(LayoutConfig::new().with_width(5));
//! assert_eq!(narrow.render(&call), "f(a,\n  b,\n  c)");
//!
//! let wide = Renderer::new(LayoutConfig::default());
//! assert_eq!(wide.render(&call), "f(a, b, c)");
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod doc;
pub mod render;

pub use config::LayoutConfig;
pub use doc::Doc;
pub use render::Renderer;

#[cfg(test)]
mod doc_tests;
