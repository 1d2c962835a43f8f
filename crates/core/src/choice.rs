//! A single selectable entry.

use std::fmt::{Debug, Display, Formatter};

/// The result payload of a [`Choice`].
///
/// A deferred value is produced only once the widget finishes and the choice
/// is the one selected.
pub enum Value<T> {
    Immediate(T),
    Deferred(Box<dyn FnOnce() -> T>),
}

impl<T> Value<T> {
    pub fn resolve(self) -> T {
        match self {
            Value::Immediate(value) => value,
            Value::Deferred(producer) => producer(),
        }
    }
}

impl<T: Debug> Debug for Value<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Immediate(value) => f.debug_tuple("Immediate").field(value).finish(),
            Value::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

/// Display name, result value and optional single-letter key binding.
///
/// The key is kept as given and validated when the choice is added to a
/// [`crate::choices::ChoicesBuilder`].
#[derive(Debug)]
pub struct Choice<T> {
    name: String,
    value: Value<T>,
    key: Option<String>,
}

impl<T> Choice<T> {
    pub fn new(name: impl Into<String>, value: T) -> Self {
        Self {
            name: name.into(),
            value: Value::Immediate(value),
            key: None,
        }
    }

    pub fn deferred(name: impl Into<String>, producer: impl FnOnce() -> T + 'static) -> Self {
        Self {
            name: name.into(),
            value: Value::Deferred(Box::new(producer)),
            key: None,
        }
    }

    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The key exactly as configured, before validation.
    pub fn raw_key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn key(&self) -> Option<char> {
        self.key.as_deref().and_then(|key| key.chars().next())
    }

    pub fn into_value(self) -> T {
        self.value.resolve()
    }
}

impl Choice<String> {
    /// A choice whose value is its own name.
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(name.clone(), name)
    }
}

impl From<&str> for Choice<String> {
    fn from(name: &str) -> Self {
        Choice::named(name)
    }
}

impl<T> Display for Choice<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_immediate_value() {
        let choice = Choice::new("Overwrite", 3);
        assert_eq!(choice.name(), "Overwrite");
        assert_eq!(choice.key(), None);
        assert_eq!(choice.into_value(), 3);
    }

    #[test]
    fn test_deferred_value_runs_only_on_resolve() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let choice = Choice::deferred("Later", move || {
            counter.set(counter.get() + 1);
            "ok"
        });

        assert_eq!(calls.get(), 0);
        assert_eq!(choice.into_value(), "ok");
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_key_is_first_character() {
        let choice = Choice::named("Skip").with_key("n");
        assert_eq!(choice.key(), Some('n'));
        assert_eq!(choice.raw_key(), Some("n"));
    }

    #[test]
    fn test_from_str_uses_name_as_value() {
        let choice: Choice<String> = "vodka".into();
        assert_eq!(format!("{choice}"), "vodka");
        assert_eq!(choice.into_value(), "vodka");
    }
}
