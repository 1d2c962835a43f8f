//! Letter-keyed menu with an inline help listing.
//!
//! The collapsed form is a single line listing every key. Pressing the help
//! key replaces it with one row per choice until a choice key is pressed.

use itertools::Itertools;
use log::debug;

use crate::choices::{Choices, HELP_KEY};
use crate::error::{Error, Result};
use crate::key::KeyEvent;
use crate::list::resolve_defaults;
use crate::options::{ExpandOptions, Theme};
use crate::render::{Frame, Widget};

pub struct Expand<T> {
    question: String,
    choices: Choices<T>,
    theme: Theme,
    default: usize,
    active: usize,
    expanded: bool,
    done: bool,
}

impl<T> Expand<T> {
    /// # Errors
    ///
    /// Fails when a choice has no key, the default is out of range or
    /// unknown, or a color cannot be resolved. Key collisions are already
    /// rejected while building `choices`.
    pub fn new(
        question: impl Into<String>,
        choices: Choices<T>,
        options: ExpandOptions,
    ) -> Result<Self> {
        if let Some(missing) = choices.iter().find(|choice| choice.key().is_none()) {
            return Err(Error::MissingChoiceKey(missing.name().to_string()));
        }

        let default = resolve_defaults(&choices, options.default.as_slice())?
            .first()
            .copied()
            .unwrap_or(1);

        Ok(Self {
            question: question.into(),
            theme: options.appearance.resolve()?,
            choices,
            default,
            active: default,
            expanded: false,
            done: false,
        })
    }

    /// 1-based position of the choice that will be answered.
    pub fn active(&self) -> usize {
        self.active
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Key shown for the choice at `index`, uppercased for the default.
    fn display_key(&self, index: usize) -> String {
        let key = self.choices.at(index).key().unwrap_or_default();
        if index == self.default {
            key.to_uppercase().collect()
        } else {
            key.to_string()
        }
    }

    fn hint(&self) -> String {
        let keys = (1..=self.choices.len())
            .map(|index| self.display_key(index))
            .chain(std::iter::once(HELP_KEY.to_string()))
            .join(",");
        self.theme
            .help(&format!("(enter \"{HELP_KEY}\" for help) [{keys}] "))
    }

    fn select_key(&mut self, key: char) {
        let position = self
            .choices
            .iter()
            .position(|choice| choice.key() == Some(key));
        if let Some(position) = position {
            self.active = position + 1;
            self.done = true;
        }
    }
}

impl<T> Widget for Expand<T> {
    type Answer = T;

    fn render(&mut self) -> Frame {
        let header = self.theme.header(&self.question);

        if self.done {
            let name = self.theme.active(self.choices.at(self.active).name());
            return Frame::new().line(format!("{header}{name}")).finished();
        }

        if !self.expanded {
            return Frame::new().line(format!("{header}{}", self.hint()));
        }

        let mut frame = Frame::new().line(header);
        for (index, choice) in self.choices.iter().enumerate() {
            frame.push(format!("  {} - {}", self.display_key(index + 1), choice.name()));
        }
        frame.push(format!("  {HELP_KEY} - print help"));
        frame.push(format!("  Choice [{}]: ", self.display_key(self.default)));
        frame
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match key {
            KeyEvent::Enter => {
                self.active = self.default;
                self.done = true;
            }
            KeyEvent::Char(HELP_KEY) => self.expanded = true,
            KeyEvent::Char(c) => self.select_key(c),
            _ => {}
        }

        debug!(
            "Expand active {}, expanded {}, done {}",
            self.active, self.expanded, self.done
        );
    }

    fn is_done(&self) -> bool {
        self.done
    }

    fn into_answer(self) -> T {
        self.choices.into_choice(self.active).into_value()
    }
}
