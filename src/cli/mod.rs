//! Command line interface: arguments, terminal summary, and report files.

pub mod args;
pub mod output;
