//! Entry point for asking questions on one terminal.

use std::fmt::Display;

use log::info;

use crate::choices::Choices;
use crate::error::Result;
use crate::expand::Expand;
use crate::list::List;
use crate::options::{Appearance, ExpandOptions, ListOptions, SliderOptions};
use crate::render::run;
use crate::slider::{Slider, SliderValue};
use crate::terminal::{CrosstermTerminal, Terminal};

/// Asks one question at a time on a terminal.
///
/// The prompt carries the [`Appearance`] every widget starts from. The
/// `*_options` methods hand out option structs seeded with it, and the short
/// forms `select`, `expand` and `slider` use those seeded options unchanged.
pub struct Prompt<T: Terminal> {
    terminal: T,
    appearance: Appearance,
}

impl Prompt<CrosstermTerminal> {
    /// A prompt on the process's own terminal.
    pub fn stdout() -> Self {
        Self::new(CrosstermTerminal::new())
    }
}

impl<T: Terminal> Prompt<T> {
    pub fn new(terminal: T) -> Self {
        Self {
            terminal,
            appearance: Appearance::default(),
        }
    }

    #[must_use]
    pub fn with_appearance(mut self, appearance: Appearance) -> Self {
        self.appearance = appearance;
        self
    }

    pub fn appearance(&self) -> &Appearance {
        &self.appearance
    }

    pub fn terminal(&self) -> &T {
        &self.terminal
    }

    pub fn into_terminal(self) -> T {
        self.terminal
    }

    pub fn list_options(&self) -> ListOptions {
        ListOptions::default().appearance(self.appearance.clone())
    }

    pub fn expand_options(&self) -> ExpandOptions {
        ExpandOptions::default().appearance(self.appearance.clone())
    }

    pub fn slider_options<V>(&self) -> SliderOptions<V> {
        SliderOptions::default().appearance(self.appearance.clone())
    }

    /// Single choice from a list.
    ///
    /// # Errors
    ///
    /// See [`List::new`] and [`run`].
    pub fn select<V>(&mut self, question: &str, choices: Choices<V>) -> Result<V> {
        let options = self.list_options();
        self.select_with(question, choices, options)
    }

    /// # Errors
    ///
    /// See [`List::new`] and [`run`].
    pub fn select_with<V>(
        &mut self,
        question: &str,
        choices: Choices<V>,
        options: ListOptions,
    ) -> Result<V> {
        info!("Asking select question {question:?} with {} choices", choices.len());
        let list = List::new(question, choices, options)?;
        run(list, &mut self.terminal)
    }

    /// Single choice by letter key.
    ///
    /// # Errors
    ///
    /// See [`Expand::new`] and [`run`].
    pub fn expand<V>(&mut self, question: &str, choices: Choices<V>) -> Result<V> {
        let options = self.expand_options();
        self.expand_with(question, choices, options)
    }

    /// # Errors
    ///
    /// See [`Expand::new`] and [`run`].
    pub fn expand_with<V>(
        &mut self,
        question: &str,
        choices: Choices<V>,
        options: ExpandOptions,
    ) -> Result<V> {
        info!("Asking expand question {question:?} with {} choices", choices.len());
        let expand = Expand::new(question, choices, options)?;
        run(expand, &mut self.terminal)
    }

    /// A value from the default `0..=10` range.
    ///
    /// # Errors
    ///
    /// See [`Slider::new`] and [`run`].
    pub fn slider<V>(&mut self, question: &str) -> Result<V>
    where
        V: SliderValue + Display + PartialEq,
    {
        let options = self.slider_options();
        self.slider_with(question, options)
    }

    /// # Errors
    ///
    /// See [`Slider::new`] and [`run`].
    pub fn slider_with<V>(&mut self, question: &str, options: SliderOptions<V>) -> Result<V>
    where
        V: SliderValue + Display + PartialEq,
    {
        info!("Asking slider question {question:?}");
        let slider = Slider::new(question, options)?;
        run(slider, &mut self.terminal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ColorMode;
    use crate::terminal::ScriptedTerminal;

    fn scripted(input: &str) -> Prompt<ScriptedTerminal> {
        Prompt::new(ScriptedTerminal::from_input(input)).with_appearance(Appearance {
            prefix: "? ".to_string(),
            color: ColorMode::Never,
            ..Appearance::default()
        })
    }

    #[test]
    fn test_prefix_applies_to_every_widget() {
        let mut prompt = scripted("\r");
        let choices = Choices::from_choices(["Red", "Blue"]).unwrap();
        assert_eq!(prompt.select("Color?", choices).unwrap(), "Red");
        assert!(prompt.terminal().output().ends_with("? Color? Red\n\x1b[?25h"));

        let mut prompt = scripted("\r");
        let answer: i64 = prompt.slider("Level?").unwrap();
        assert_eq!(answer, 5);
        assert!(prompt.terminal().output().ends_with("? Level? 5\n\x1b[?25h"));
    }

    #[test]
    fn test_seeded_options_keep_appearance() {
        let prompt = scripted("");
        let options = prompt.list_options().cycle(true);
        assert_eq!(options.appearance.prefix, "? ");
        assert_eq!(prompt.expand_options().appearance.color, ColorMode::Never);
    }

    #[test]
    fn test_configuration_error_draws_nothing() {
        let mut prompt = scripted("\r");
        let choices = Choices::from_choices(["Red", "Blue"]).unwrap();
        let result = prompt.expand("Color?", choices);
        assert!(result.is_err_and(|e| e.is_configuration()));
        assert_eq!(prompt.terminal().output(), "");
        assert_eq!(prompt.terminal().remaining_keys(), 1);
    }
}
