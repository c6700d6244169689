pub mod error;
pub mod graph;
pub mod input;
pub mod logging;
pub mod run;

#[cfg(test)]
mod graph_tests;
#[cfg(test)]
mod run_tests;
