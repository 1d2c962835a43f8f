//! Widget configuration.
//!
//! Every options struct deserializes from YAML with missing keys falling back
//! to their defaults, and offers chained setters for building in code. Cross
//! field rules are checked once, when the widget is constructed.

use std::fmt::{Debug, Formatter};

use crossterm::style::Color;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Result;
use crate::style::{AsTermColor, ColorDefinition, Styler};
use crate::symbols::Symbols;

/// When to emit color escape sequences.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Colored unless `NO_COLOR` is set.
    #[default]
    Auto,
    Always,
    Never,
}

/// Display settings shared by all widgets.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Appearance {
    pub prefix: String,
    pub active_color: ColorDefinition,
    pub help_color: ColorDefinition,
    pub color: ColorMode,
    pub symbols: Symbols,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            active_color: ColorDefinition::from("green"),
            help_color: ColorDefinition::from("bright_black"),
            color: ColorMode::Auto,
            symbols: Symbols::default(),
        }
    }
}

impl Appearance {
    pub(crate) fn resolve(&self) -> Result<Theme> {
        let styler = match self.color {
            ColorMode::Auto => Styler::from_env(),
            ColorMode::Always => Styler::new(true),
            ColorMode::Never => Styler::new(false),
        };

        Ok(Theme {
            prefix: self.prefix.clone(),
            active: self.active_color.as_crossterm_color()?,
            help: self.help_color.as_crossterm_color()?,
            symbols: self.symbols.clone(),
            styler,
        })
    }
}

/// [`Appearance`] with colors resolved, owned by a running widget.
#[derive(Debug, Clone)]
pub(crate) struct Theme {
    pub prefix: String,
    pub active: Color,
    pub help: Color,
    pub symbols: Symbols,
    pub styler: Styler,
}

impl Theme {
    pub fn active(&self, text: &str) -> String {
        self.styler.decorate(text, self.active)
    }

    pub fn help(&self, text: &str) -> String {
        self.styler.decorate(text, self.help)
    }

    pub fn header(&self, question: &str) -> String {
        format!("{}{} ", self.prefix, question)
    }
}

/// A default selection, by 1-based position or by choice name.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum DefaultChoice {
    Index(usize),
    Name(String),
}

impl From<usize> for DefaultChoice {
    fn from(index: usize) -> Self {
        DefaultChoice::Index(index)
    }
}

impl From<&str> for DefaultChoice {
    fn from(name: &str) -> Self {
        DefaultChoice::Name(name.to_string())
    }
}

fn one_or_many<'de, D>(deserializer: D) -> std::result::Result<Vec<DefaultChoice>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(DefaultChoice),
        Many(Vec<DefaultChoice>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(default) => vec![default],
        OneOrMany::Many(defaults) => defaults,
    })
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ListOptions {
    #[serde(flatten)]
    pub appearance: Appearance,
    /// Every entry is validated; the first one becomes active.
    #[serde(deserialize_with = "one_or_many")]
    pub default: Vec<DefaultChoice>,
    /// Replaces the pointer symbol in front of the active choice.
    pub marker: Option<String>,
    pub cycle: bool,
    pub filter: bool,
    /// Delimiter printed after each choice number; enables number keys.
    #[serde(rename = "enum")]
    pub enumerate: Option<String>,
    pub per_page: Option<usize>,
    pub page_help: Option<String>,
    pub help: Option<String>,
}

impl ListOptions {
    #[must_use]
    pub fn appearance(mut self, appearance: Appearance) -> Self {
        self.appearance = appearance;
        self
    }

    /// Adds a default by 1-based position.
    #[must_use]
    pub fn default_index(mut self, index: usize) -> Self {
        self.default.push(DefaultChoice::Index(index));
        self
    }

    /// Adds a default by choice name.
    #[must_use]
    pub fn default_name(mut self, name: impl Into<String>) -> Self {
        self.default.push(DefaultChoice::Name(name.into()));
        self
    }

    #[must_use]
    pub fn marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = Some(marker.into());
        self
    }

    #[must_use]
    pub fn cycle(mut self, cycle: bool) -> Self {
        self.cycle = cycle;
        self
    }

    #[must_use]
    pub fn filter(mut self, filter: bool) -> Self {
        self.filter = filter;
        self
    }

    #[must_use]
    pub fn enumerate(mut self, delimiter: impl Into<String>) -> Self {
        self.enumerate = Some(delimiter.into());
        self
    }

    #[must_use]
    pub fn per_page(mut self, per_page: usize) -> Self {
        self.per_page = Some(per_page);
        self
    }

    #[must_use]
    pub fn page_help(mut self, text: impl Into<String>) -> Self {
        self.page_help = Some(text.into());
        self
    }

    #[must_use]
    pub fn help(mut self, text: impl Into<String>) -> Self {
        self.help = Some(text.into());
        self
    }
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ExpandOptions {
    #[serde(flatten)]
    pub appearance: Appearance,
    pub default: Option<DefaultChoice>,
}

impl ExpandOptions {
    #[must_use]
    pub fn appearance(mut self, appearance: Appearance) -> Self {
        self.appearance = appearance;
        self
    }

    #[must_use]
    pub fn default_index(mut self, index: usize) -> Self {
        self.default = Some(DefaultChoice::Index(index));
        self
    }

    #[must_use]
    pub fn default_name(mut self, name: impl Into<String>) -> Self {
        self.default = Some(DefaultChoice::Name(name.into()));
        self
    }
}

/// When the slider's help footer is drawn.
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ShowHelp {
    /// Only on the first frame.
    #[default]
    Start,
    Always,
    Never,
}

pub type SliderFormatter<T> = Box<dyn Fn(&str, &T) -> String>;

#[derive(Deserialize)]
#[serde(default, bound(deserialize = "T: Deserialize<'de>"))]
pub struct SliderOptions<T> {
    #[serde(flatten)]
    pub appearance: Appearance,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    /// Explicit values; when present `min`, `max` and `step` are unused.
    pub values: Option<Vec<T>>,
    pub default: Option<T>,
    /// Skip the final answer line.
    pub quiet: bool,
    pub show_help: ShowHelp,
    pub help: Option<String>,
    /// Template with `{slider}`, `{value}` and `{pipe}` placeholders.
    pub format: Option<String>,
    /// Takes precedence over `format`.
    #[serde(skip)]
    pub formatter: Option<SliderFormatter<T>>,
}

impl<T> Default for SliderOptions<T> {
    fn default() -> Self {
        Self {
            appearance: Appearance::default(),
            min: 0.0,
            max: 10.0,
            step: 1.0,
            values: None,
            default: None,
            quiet: false,
            show_help: ShowHelp::Start,
            help: None,
            format: None,
            formatter: None,
        }
    }
}

impl<T: Debug> Debug for SliderOptions<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SliderOptions")
            .field("appearance", &self.appearance)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("step", &self.step)
            .field("values", &self.values)
            .field("default", &self.default)
            .field("quiet", &self.quiet)
            .field("show_help", &self.show_help)
            .field("help", &self.help)
            .field("format", &self.format)
            .field("formatter", &self.formatter.as_ref().map(|_| ".."))
            .finish()
    }
}

impl<T> SliderOptions<T> {
    #[must_use]
    pub fn appearance(mut self, appearance: Appearance) -> Self {
        self.appearance = appearance;
        self
    }

    #[must_use]
    pub fn range(mut self, min: f64, max: f64, step: f64) -> Self {
        self.min = min;
        self.max = max;
        self.step = step;
        self
    }

    #[must_use]
    pub fn values(mut self, values: impl IntoIterator<Item = T>) -> Self {
        self.values = Some(values.into_iter().collect());
        self
    }

    #[must_use]
    pub fn default_value(mut self, value: T) -> Self {
        self.default = Some(value);
        self
    }

    #[must_use]
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    #[must_use]
    pub fn show_help(mut self, show_help: ShowHelp) -> Self {
        self.show_help = show_help;
        self
    }

    #[must_use]
    pub fn help(mut self, text: impl Into<String>) -> Self {
        self.help = Some(text.into());
        self
    }

    #[must_use]
    pub fn format(mut self, template: impl Into<String>) -> Self {
        self.format = Some(template.into());
        self
    }

    #[must_use]
    pub fn formatter(mut self, formatter: impl Fn(&str, &T) -> String + 'static) -> Self {
        self.formatter = Some(Box::new(formatter));
        self
    }
}
