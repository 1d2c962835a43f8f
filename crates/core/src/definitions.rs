//! Prompts described as data, as loaded from YAML definition files.
//!
//! ```yaml
//! - kind: select
//!   question: Drink?
//!   choices: [Vodka, Beer, Wine]
//!   options:
//!     default: 2
//!     cycle: true
//! - kind: expand
//!   question: Overwrite Gemfile?
//!   choices:
//!     - { key: y, name: Overwrite, value: yes }
//!     - { key: n, name: Skip, value: no }
//! - kind: slider
//!   question: Volume?
//!   options: { min: 0, max: 100, step: 5 }
//! ```

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_yaml::{Mapping, Value};

use crate::choice::Choice;
use crate::choices::Choices;
use crate::error::{Error, Result};
use crate::options::Appearance;
use crate::prompt::Prompt;
use crate::terminal::Terminal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Select,
    Expand,
    Slider,
}

impl FromStr for PromptKind {
    type Err = Error;

    fn from_str(kind: &str) -> Result<Self> {
        match kind {
            "select" | "list" => Ok(PromptKind::Select),
            "expand" => Ok(PromptKind::Expand),
            "slider" => Ok(PromptKind::Slider),
            _ => Err(Error::UnknownPromptKind(kind.to_string())),
        }
    }
}

impl Display for PromptKind {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(match self {
            PromptKind::Select => "select",
            PromptKind::Expand => "expand",
            PromptKind::Slider => "slider",
        })
    }
}

/// A choice written either as a bare name or as a mapping.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ChoiceDefinition {
    Name(String),
    Detailed {
        name: String,
        value: Option<Value>,
        key: Option<String>,
    },
}

impl ChoiceDefinition {
    pub fn name(&self) -> &str {
        match self {
            ChoiceDefinition::Name(name) | ChoiceDefinition::Detailed { name, .. } => name,
        }
    }

    /// The answer text; the name when no value is given.
    pub fn value(&self) -> String {
        match self {
            ChoiceDefinition::Detailed {
                value: Some(value), ..
            } => scalar_text(value),
            _ => self.name().to_string(),
        }
    }

    fn to_choice(&self) -> Choice<String> {
        let choice = Choice::new(self.name(), self.value());
        match self {
            ChoiceDefinition::Detailed { key: Some(key), .. } => choice.with_key(key.clone()),
            _ => choice,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct PromptDefinition {
    pub kind: String,
    pub question: String,
    #[serde(default)]
    pub choices: Vec<ChoiceDefinition>,
    /// Deserialized into the options struct of `kind` when asked.
    #[serde(default)]
    pub options: Mapping,
}

impl Display for PromptDefinition {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{} `{}`", self.kind, self.question)
    }
}

impl PromptDefinition {
    pub fn kind(&self) -> Result<PromptKind> {
        self.kind.parse()
    }

    fn options<O: DeserializeOwned>(&self, options: Mapping) -> Result<O> {
        serde_yaml::from_value(Value::Mapping(options)).map_err(|e| Error::InvalidOptions {
            prompt: self.to_string(),
            original: e,
        })
    }

    /// `appearance` as a mapping with this definition's own options on top.
    fn merged_options(&self, appearance: &Appearance) -> Result<Mapping> {
        let base = serde_yaml::to_value(appearance).map_err(|e| Error::InvalidOptions {
            prompt: self.to_string(),
            original: e,
        })?;
        let mut merged = match base {
            Value::Mapping(mapping) => mapping,
            _ => Mapping::new(),
        };

        for (key, value) in &self.options {
            match (merged.get_mut(key), value) {
                // Symbols override glyph by glyph
                (Some(Value::Mapping(symbols)), Value::Mapping(overrides))
                    if key.as_str() == Some("symbols") =>
                {
                    for (glyph, text) in overrides {
                        symbols.insert(glyph.clone(), text.clone());
                    }
                }
                _ => {
                    merged.insert(key.clone(), value.clone());
                }
            }
        }
        Ok(merged)
    }

    fn choices(&self) -> Result<Choices<String>> {
        Choices::from_choices(self.choices.iter().map(ChoiceDefinition::to_choice))
    }

    // Numeric defaults must be 1-based positions; anything else would only
    // surface as a generic options error.
    fn check_default_indexes(&self) -> Result<()> {
        let invalid = |value: &Value| matches!(value, Value::Number(n) if n.as_u64().is_none());
        let has_invalid = match self.options.get("default") {
            Some(Value::Sequence(defaults)) => defaults.iter().any(invalid),
            Some(default) => invalid(default),
            None => false,
        };

        if has_invalid {
            return Err(Error::InvalidDefault {
                size: self.choices.len(),
            });
        }
        Ok(())
    }

    /// Checks everything that can be checked before asking: the kind, the
    /// options and the choices.
    ///
    /// # Errors
    ///
    /// Returns the error asking would fail with before drawing anything.
    pub fn validate(&self) -> Result<()> {
        let options = self.merged_options(&Appearance::default())?;

        match self.kind()? {
            PromptKind::Select => {
                self.check_default_indexes()?;
                let options = self.options(options)?;
                crate::list::List::new(&self.question, self.choices()?, options).map(|_| ())
            }
            PromptKind::Expand => {
                self.check_default_indexes()?;
                let options = self.options(options)?;
                crate::expand::Expand::new(&self.question, self.choices()?, options).map(|_| ())
            }
            PromptKind::Slider if self.options.contains_key("values") => {
                let options = self.options(stringify_values(options))?;
                crate::slider::Slider::<String>::new(&self.question, options).map(|_| ())
            }
            PromptKind::Slider => {
                let options = self.options(options)?;
                crate::slider::Slider::<f64>::new(&self.question, options).map(|_| ())
            }
        }
    }

    /// Asks this question on `prompt`, answering with the chosen value's text.
    ///
    /// The prompt's appearance applies to every setting the definition's
    /// `options` leave out.
    ///
    /// # Errors
    ///
    /// Fails on an unknown kind, invalid options or choices, or any error
    /// from running the widget.
    pub fn ask<T: Terminal>(&self, prompt: &mut Prompt<T>) -> Result<String> {
        let options = self.merged_options(prompt.appearance())?;

        match self.kind()? {
            PromptKind::Select => {
                self.check_default_indexes()?;
                let options = self.options(options)?;
                prompt.select_with(&self.question, self.choices()?, options)
            }
            PromptKind::Expand => {
                self.check_default_indexes()?;
                let options = self.options(options)?;
                prompt.expand_with(&self.question, self.choices()?, options)
            }
            PromptKind::Slider if self.options.contains_key("values") => {
                let options = self.options(stringify_values(options))?;
                prompt.slider_with::<String>(&self.question, options)
            }
            PromptKind::Slider => {
                let options = self.options(options)?;
                prompt
                    .slider_with::<f64>(&self.question, options)
                    .map(|value| value.to_string())
            }
        }
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::Null => String::new(),
        other => serde_yaml::to_string(other)
            .map(|text| text.trim_end().to_string())
            .unwrap_or_default(),
    }
}

// Explicit slider values may be written as numbers or strings; the slider
// sees them all as text, along with the default.
fn stringify_values(mut options: Mapping) -> Mapping {
    if let Some(Value::Sequence(values)) = options.get_mut("values") {
        for value in values.iter_mut() {
            *value = Value::String(scalar_text(value));
        }
    }
    if let Some(default) = options.get_mut("default") {
        *default = Value::String(scalar_text(default));
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::KeyEvent;
    use crate::options::ColorMode;
    use crate::terminal::ScriptedTerminal;

    fn definition(yaml: &str) -> PromptDefinition {
        serde_yaml::from_str(yaml).unwrap()
    }

    fn ask_keys(yaml: &str, keys: Vec<KeyEvent>) -> Result<String> {
        let mut prompt = Prompt::new(ScriptedTerminal::new(keys)).with_appearance(Appearance {
            color: ColorMode::Never,
            ..Appearance::default()
        });
        definition(yaml).ask(&mut prompt)
    }

    fn ask(yaml: &str, input: &str) -> Result<String> {
        ask_keys(yaml, input.chars().map(KeyEvent::from).collect())
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("select".parse::<PromptKind>().unwrap(), PromptKind::Select);
        assert_eq!("list".parse::<PromptKind>().unwrap(), PromptKind::Select);
        assert!(matches!(
            "multi".parse::<PromptKind>(),
            Err(Error::UnknownPromptKind(kind)) if kind == "multi"
        ));
    }

    #[test]
    fn test_choice_forms() {
        let prompt = definition(
            r#"
kind: expand
question: Overwrite?
choices:
  - Plain
  - { name: Overwrite, key: y, value: true }
  - { name: Level, value: 3 }
"#,
        );
        assert_eq!(prompt.choices[0], ChoiceDefinition::Name("Plain".to_string()));
        assert_eq!(prompt.choices[0].value(), "Plain");
        assert_eq!(prompt.choices[1].value(), "true");
        assert_eq!(prompt.choices[2].value(), "3");
    }

    #[test]
    fn test_select_definition_answers_value() {
        let yaml = r#"
kind: select
question: Drink?
choices: [Vodka, { name: Beer, value: lager }, Wine]
options: { default: 2, color: never }
"#;
        assert_eq!(ask(yaml, "\r").unwrap(), "lager");
    }

    #[test]
    fn test_expand_definition() {
        let yaml = r#"
kind: expand
question: Overwrite?
choices:
  - { key: y, name: Overwrite, value: "yes" }
  - { key: n, name: Skip, value: "no" }
options: { color: never }
"#;
        assert_eq!(ask(yaml, "n").unwrap(), "no");
    }

    #[test]
    fn test_slider_definitions() {
        let numeric = "kind: slider\nquestion: Size?\noptions: { min: 32, max: 54, step: 2, color: never }";
        assert_eq!(ask(numeric, "\r").unwrap(), "44");

        let grades =
            "kind: slider\nquestion: Grade?\noptions: { values: [a, b, 3], default: b, color: never }";
        assert_eq!(
            ask_keys(grades, vec![KeyEvent::Right, KeyEvent::Enter]).unwrap(),
            "3"
        );
    }

    #[test]
    fn test_invalid_options_rejected_before_drawing() {
        let yaml = "kind: select\nquestion: Drink?\nchoices: [Beer]\noptions: { cycle: sometimes }";
        let prompt = definition(yaml);
        assert!(matches!(prompt.validate(), Err(Error::InvalidOptions { .. })));

        let enum_filter =
            "kind: select\nquestion: Drink?\nchoices: [Beer]\noptions: { enum: ')', filter: true }";
        assert!(matches!(
            definition(enum_filter).validate(),
            Err(Error::EnumWithFilter)
        ));
    }

    #[test]
    fn test_prompt_appearance_fills_unset_options() {
        let yaml = "kind: select\nquestion: Drink?\nchoices: [Vodka, Beer]";
        let mut prompt = Prompt::new(ScriptedTerminal::from_input("\r")).with_appearance(Appearance {
            prefix: "? ".to_string(),
            color: ColorMode::Never,
            symbols: crate::symbols::Symbols::ascii(),
            ..Appearance::default()
        });
        assert_eq!(definition(yaml).ask(&mut prompt).unwrap(), "Vodka");

        let output = prompt.terminal().output();
        assert!(output.contains("? Drink? (Use arrow keys, press Enter to select)\n> Vodka\n"));
        assert!(!output.contains("\x1b[38;"));
    }

    #[test]
    fn test_definition_options_override_prompt_appearance() {
        let yaml = r#"
kind: select
question: Drink?
choices: [Vodka, Beer]
options: { prefix: "", symbols: { pointer: "*" } }
"#;
        let mut prompt = Prompt::new(ScriptedTerminal::from_input("\r")).with_appearance(Appearance {
            prefix: "? ".to_string(),
            color: ColorMode::Never,
            symbols: crate::symbols::Symbols::ascii(),
            ..Appearance::default()
        });
        definition(yaml).ask(&mut prompt).unwrap();

        let output = prompt.terminal().output();
        assert!(output.starts_with("\x1b[?25lDrink? "));
        assert!(output.contains("* Vodka\n"));
    }

    #[test]
    fn test_fractional_default_index() {
        let yaml = "kind: select\nquestion: Drink?\nchoices: [Vodka, Beer]\noptions: { default: 1.5 }";
        match definition(yaml).validate() {
            Err(error @ Error::InvalidDefault { .. }) => assert_eq!(
                error.to_string(),
                "default index must be an integer in range (1 - 2)"
            ),
            other => panic!("expected an invalid default, got {other:?}"),
        }

        let many = "kind: expand\nquestion: Q?\nchoices: [{ key: y, name: Yes }]\noptions: { default: [1, -1] }";
        assert!(matches!(
            definition(many).validate(),
            Err(Error::InvalidDefault { size: 1 })
        ));
    }
}
