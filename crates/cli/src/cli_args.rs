//! Command-line argument parsing.
//!
//! This module defines the command-line interface structure using the `clap`
//! crate. Each subcommand asks one kind of question.

use clap::{Parser, Subcommand, ValueEnum};
use rust_prompts_core::options::{ColorMode, DefaultChoice, ShowHelp};

/// Command-line arguments for the `rp` binary.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use rust_prompts_cli::cli_args::Args;
///
/// let args = Args::parse_from(["rp", "select", "Drink?", "Beer", "Wine"]);
/// ```
#[derive(Parser, Debug)] // requires `derive` feature
#[command(term_width = 0)] // Just to make testing across clap features easier
pub struct Args {
    /// When to color the output. `auto` honours `NO_COLOR`.
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto, global = true)]
    pub color: ColorChoice,

    /// Text printed in front of every question.
    #[arg(long, default_value = "", global = true)]
    pub prefix: String,

    /// Draw with plain ASCII glyphs instead of unicode symbols.
    #[arg(long, action, global = true)]
    pub ascii: bool,

    #[command(subcommand)]
    pub command: PromptCommand,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl From<ColorChoice> for ColorMode {
    fn from(choice: ColorChoice) -> Self {
        match choice {
            ColorChoice::Auto => ColorMode::Auto,
            ColorChoice::Always => ColorMode::Always,
            ColorChoice::Never => ColorMode::Never,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpChoice {
    Start,
    Always,
    Never,
}

impl From<HelpChoice> for ShowHelp {
    fn from(choice: HelpChoice) -> Self {
        match choice {
            HelpChoice::Start => ShowHelp::Start,
            HelpChoice::Always => ShowHelp::Always,
            HelpChoice::Never => ShowHelp::Never,
        }
    }
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum PromptCommand {
    /// Pick one choice from a list.
    Select {
        question: String,

        #[arg(required = true, num_args(1..))]
        choices: Vec<String>,

        /// Default choice by 1-based position or by name. Repeatable.
        #[arg(long, short = 'd', value_parser = parse_default_choice)]
        default: Vec<DefaultChoice>,

        /// Wrap around at the first and last choice.
        #[arg(long, action)]
        cycle: bool,

        /// Narrow the choices by typing.
        #[arg(long, action, conflicts_with = "enumerate")]
        filter: bool,

        /// Number the choices, followed by this delimiter.
        #[arg(long = "enum", short = 'e')]
        enumerate: Option<String>,

        #[arg(long)]
        per_page: Option<usize>,

        /// Replaces the pointer in front of the active choice.
        #[arg(long)]
        marker: Option<String>,
    },

    /// Pick one choice by pressing its key.
    Expand {
        question: String,

        /// Choices written as `key:name`, for example `y:Overwrite`.
        #[arg(required = true, num_args(1..), value_parser = parse_keyed_choice)]
        choices: Vec<KeyedChoice>,

        /// Default choice by 1-based position or by name.
        #[arg(long, short = 'd', value_parser = parse_default_choice)]
        default: Option<DefaultChoice>,
    },

    /// Pick a value from a range with the arrow keys.
    Slider {
        question: String,

        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        min: f64,

        #[arg(long, default_value_t = 10.0, allow_negative_numbers = true)]
        max: f64,

        #[arg(long, default_value_t = 1.0)]
        step: f64,

        /// Explicit values, comma separated. Replaces the numeric range.
        #[arg(long, value_delimiter = ',')]
        values: Option<Vec<String>>,

        #[arg(long, short = 'd', allow_negative_numbers = true)]
        default: Option<String>,

        /// Template with `{slider}`, `{value}` and `{pipe}` placeholders.
        #[arg(long)]
        format: Option<String>,

        /// Don't print the answer line when done.
        #[arg(long, short = 'q', action)]
        quiet: bool,

        #[arg(long, value_enum, default_value_t = HelpChoice::Start)]
        show_help: HelpChoice,
    },

    /// Ask every question in a YAML definition file.
    File {
        /// Path to the definition file, `~` is expanded.
        path: String,
    },
}

/// A choice name with its single-character key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyedChoice {
    pub key: String,
    pub name: String,
}

/// Parses `key:name`. Key validation happens when the choices are built.
///
/// # Errors
///
/// Returns a message for clap when the separator or either part is missing.
pub fn parse_keyed_choice(value: &str) -> Result<KeyedChoice, String> {
    match value.split_once(':') {
        Some((key, name)) if !key.is_empty() && !name.is_empty() => Ok(KeyedChoice {
            key: key.to_string(),
            name: name.to_string(),
        }),
        _ => Err(format!("expected `key:name`, got `{value}`")),
    }
}

/// Numbers are positions, anything else a choice name.
///
/// # Errors
///
/// Never fails; the signature is the one clap expects.
pub fn parse_default_choice(value: &str) -> Result<DefaultChoice, String> {
    Ok(value
        .parse::<usize>()
        .map_or_else(|_| DefaultChoice::Name(value.to_string()), DefaultChoice::Index))
}
