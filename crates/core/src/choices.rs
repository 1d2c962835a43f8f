//! Ordered, name-keyed collection of choices.
//!
//! Collections are assembled through [`ChoicesBuilder`], which validates
//! every entry as it is appended. Once built, a [`Choices`] value has no way
//! to grow, so the set a widget renders is fixed for the whole interaction.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::choice::Choice;
use crate::error::{Error, Result};

/// Key that opens the expanded help menu, never bound to a choice.
pub const HELP_KEY: char = 'h';

#[derive(Debug)]
pub struct Choices<T> {
    entries: IndexMap<String, Choice<T>>,
}

impl<T> Choices<T> {
    pub fn builder() -> ChoicesBuilder<T> {
        ChoicesBuilder::default()
    }

    /// Builds a collection from choices in order.
    ///
    /// # Errors
    ///
    /// Fails on the first invalid choice, or when no choices are given.
    pub fn from_choices<I, C>(choices: I) -> Result<Self>
    where
        I: IntoIterator<Item = C>,
        C: Into<Choice<T>>,
    {
        let mut builder = Self::builder();
        for choice in choices {
            builder.add(choice.into())?;
        }
        builder.build()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Choice at a 1-based position.
    ///
    /// # Panics
    ///
    /// Panics when `index` is outside `1..=len`; positions are validated
    /// before the first render.
    pub fn at(&self, index: usize) -> &Choice<T> {
        &self.entries[index - 1]
    }

    /// 1-based position of the choice with this name.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.entries.get_index_of(name).map(|i| i + 1)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Choice<T>> {
        self.entries.values()
    }

    /// View of the choices whose name contains `filter`, ignoring case.
    pub fn filtered(&self, filter: &str) -> Filtered<'_, T> {
        Filtered {
            choices: self,
            needle: filter.to_lowercase(),
        }
    }

    /// Takes ownership of the choice at a 1-based position.
    pub(crate) fn into_choice(mut self, index: usize) -> Choice<T> {
        let (_, choice) = self.entries.swap_remove_index(index - 1).unwrap_or_else(|| {
            unreachable!("choice index {index} validated before interaction")
        });
        choice
    }
}

/// Filtered view over a [`Choices`] collection.
///
/// The view borrows the collection and is recomputed on every call, so it
/// can be walked as many times as needed.
pub struct Filtered<'a, T> {
    choices: &'a Choices<T>,
    needle: String,
}

impl<'a, T> Filtered<'a, T> {
    /// Matching choices paired with their 1-based position in the full
    /// collection.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &'a Choice<T>)> + '_ {
        self.choices
            .entries
            .values()
            .enumerate()
            .filter(|(_, choice)| {
                self.needle.is_empty() || choice.name().to_lowercase().contains(&self.needle)
            })
            .map(|(i, choice)| (i + 1, choice))
    }

    pub fn len(&self) -> usize {
        if self.needle.is_empty() {
            return self.choices.len();
        }
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The match at a 1-based position within the view.
    pub fn get(&self, position: usize) -> Option<(usize, &'a Choice<T>)> {
        position.checked_sub(1).and_then(|n| self.iter().nth(n))
    }
}

/// Append-only accumulator for [`Choices`].
#[derive(Debug)]
pub struct ChoicesBuilder<T> {
    entries: IndexMap<String, Choice<T>>,
    keys: HashSet<char>,
}

impl<T> Default for ChoicesBuilder<T> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
            keys: HashSet::new(),
        }
    }
}

impl<T> ChoicesBuilder<T> {
    /// Appends a choice.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the name is already present, or
    /// the key is not exactly one character, is the help key or is taken.
    pub fn add(&mut self, choice: Choice<T>) -> Result<&mut Self> {
        if self.entries.contains_key(choice.name()) {
            return Err(Error::DuplicateChoiceName(choice.name().to_string()));
        }

        if let Some(raw_key) = choice.raw_key() {
            let mut chars = raw_key.chars();
            let key = match (chars.next(), chars.next()) {
                (Some(key), None) => key,
                (None, _) => return Err(Error::EmptyChoiceKey(choice.name().to_string())),
                _ => return Err(Error::ChoiceKeyTooLong(raw_key.to_string())),
            };
            if key == HELP_KEY {
                return Err(Error::ReservedChoiceKey(key));
            }
            if !self.keys.insert(key) {
                return Err(Error::DuplicateChoiceKey(key));
            }
        }

        self.entries.insert(choice.name().to_string(), choice);
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Freezes the collection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyChoices`] when nothing was added.
    pub fn build(self) -> Result<Choices<T>> {
        if self.entries.is_empty() {
            return Err(Error::EmptyChoices);
        }
        Ok(Choices {
            entries: self.entries,
        })
    }
}
