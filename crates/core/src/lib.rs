//! Rust Prompts Core Library
//!
//! Interactive terminal questions that redraw in place: a single-select
//! list, a letter-keyed expand menu and a stepped slider.
//!
//! # Key Features
//!
//! - **Choices**: ordered, validated collections with case-insensitive filtering
//! - **Widgets**: list, expand and slider, each a state machine over key events
//! - **Redraw**: frames are erased row for row, accounting for line wrapping
//! - **Terminals**: a crossterm backed terminal and a scripted one for tests
//! - **Definitions**: prompts described in YAML files
//!
//! # Examples
//!
//! ```no_run
//! use rust_prompts_core::choices::Choices;
//! use rust_prompts_core::prompt::Prompt;
//!
//! let mut prompt = Prompt::stdout();
//! let choices = Choices::from_choices(["Vodka", "Beer", "Wine"])?;
//! let drink = prompt.select("Choose your destiny?", choices)?;
//! println!("{drink}");
//! # Ok::<(), rust_prompts_core::error::Error>(())
//! ```

pub mod choice;
pub mod choices;
pub mod definitions;
pub mod error;
pub mod expand;
pub mod file_handling;
pub mod key;
pub mod list;
pub mod options;
pub mod paginator;
pub mod prompt;
pub mod render;
pub mod slider;
pub mod style;
pub mod symbols;
pub mod terminal;

pub use choice::Choice;
pub use choices::Choices;
pub use error::{Error, Result};
pub use prompt::Prompt;
