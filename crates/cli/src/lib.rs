//! Rust Prompts CLI Library
//!
//! This crate provides `rp`, a command-line front end that asks a single
//! question, or every question in a YAML definition file, and prints the
//! answers on stdout, one per line.
//!
//! # Architecture
//!
//! - [`cli_args`]: Command-line argument parsing
//! - [`questions`]: Mapping of arguments onto widget options
//!
//! # Examples
//!
//! ```bash
//! # Pick a drink, starting on the second one
//! rp select "Drink?" Vodka Beer Wine --default 2
//!
//! # Letter keys, `h` shows the full list
//! rp expand "Overwrite Gemfile?" y:Overwrite n:Skip d:"Show diff"
//!
//! # A stepped range, or explicit values
//! rp slider "Volume?" --min 0 --max 100 --step 5
//! rp slider "Grade?" --values a,b,c,d --default b
//!
//! # Every question in a file
//! rp file ~/.rust-prompts/setup.yml
//! ```

pub mod cli_args;
pub mod questions;
