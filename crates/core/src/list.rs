//! Single-select list menu.
//!
//! Arrow keys move the active row, Enter or space selects it. Optionally the
//! rows can be numbered (number keys jump to a row) or narrowed by typing a
//! filter, but not both.

use itertools::Itertools;
use log::debug;

use crate::choice::Choice;
use crate::choices::Choices;
use crate::error::{Error, Result};
use crate::key::KeyEvent;
use crate::options::{DefaultChoice, ListOptions, Theme};
use crate::paginator::{is_paginated, step_down, step_up, Paginator, DEFAULT_PAGE_SIZE};
use crate::render::{Frame, Widget};

pub const PAGE_HELP: &str = "(Move up or down to reveal more choices)";

pub struct List<T> {
    question: String,
    choices: Choices<T>,
    theme: Theme,
    marker: String,
    cycle: bool,
    filter: Option<String>,
    enumerate: Option<String>,
    page_size: usize,
    page_help: String,
    help: String,
    paginator: Paginator,
    active: usize,
    first_render: bool,
    done: bool,
}

impl<T> List<T> {
    /// Validates `options` against `choices`.
    ///
    /// # Errors
    ///
    /// Fails when both filtering and enumeration are enabled, a default is
    /// out of range or unknown, or a color cannot be resolved.
    pub fn new(
        question: impl Into<String>,
        choices: Choices<T>,
        options: ListOptions,
    ) -> Result<Self> {
        if options.filter && options.enumerate.is_some() {
            return Err(Error::EnumWithFilter);
        }

        let defaults = resolve_defaults(&choices, &options.default)?;
        let theme = options.appearance.resolve()?;
        let help = options
            .help
            .unwrap_or_else(|| {
                default_help(choices.len(), options.filter, options.enumerate.is_some())
            });

        Ok(Self {
            question: question.into(),
            marker: options
                .marker
                .unwrap_or_else(|| theme.symbols.pointer.clone()),
            theme,
            cycle: options.cycle,
            filter: options.filter.then(String::new),
            enumerate: options.enumerate,
            page_size: options.per_page.unwrap_or(DEFAULT_PAGE_SIZE).max(1),
            page_help: options.page_help.unwrap_or_else(|| PAGE_HELP.to_string()),
            help,
            paginator: Paginator::new(),
            active: defaults.first().copied().unwrap_or(1),
            first_render: true,
            done: false,
            choices,
        })
    }

    /// 1-based position of the active row among the visible choices.
    pub fn active(&self) -> usize {
        self.active
    }

    pub fn filter_text(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    fn visible_len(&self) -> usize {
        self.choices.filtered(self.filter_or_empty()).len()
    }

    fn filter_or_empty(&self) -> &str {
        self.filter.as_deref().unwrap_or("")
    }

    fn edit_filter(&mut self, edit: impl FnOnce(&mut String)) {
        if let Some(filter) = self.filter.as_mut() {
            edit(filter);
            self.active = 1;
            self.paginator.reset();
        }
    }

    fn header_hint(&self) -> String {
        if self.done {
            let filtered = self.choices.filtered(self.filter_or_empty());
            let name = filtered
                .get(self.active)
                .map(|(_, choice)| choice.name())
                .unwrap_or_default();
            self.theme.active(name)
        } else if self.first_render {
            self.theme.help(&self.help)
        } else {
            match self.filter.as_deref() {
                Some(filter) if !filter.is_empty() => {
                    self.theme.help(&format!("(Filter: {filter:?})"))
                }
                _ => String::new(),
            }
        }
    }
}

/// Help line for the first frame.
pub fn default_help(size: usize, filter: bool, enumerate: bool) -> String {
    let (keys, extra) = if enumerate {
        (format!(" or number (1-{size})"), String::new())
    } else if filter {
        (String::new(), ", and letter keys to filter".to_string())
    } else {
        (String::new(), String::new())
    };

    format!("(Use arrow{keys} keys, press Enter to select{extra})")
}

/// Checks every default against the collection, returning 1-based positions.
pub(crate) fn resolve_defaults<T>(
    choices: &Choices<T>,
    defaults: &[DefaultChoice],
) -> Result<Vec<usize>> {
    defaults
        .iter()
        .map(|default| match default {
            DefaultChoice::Index(index) if (1..=choices.len()).contains(index) => Ok(*index),
            DefaultChoice::Index(index) => Err(Error::DefaultOutOfRange {
                default: *index,
                size: choices.len(),
            }),
            DefaultChoice::Name(name) => {
                choices
                    .index_of(name)
                    .ok_or_else(|| Error::DefaultNotFound {
                        default: name.clone(),
                        range: choices.iter().map(Choice::name).join(", "),
                    })
            }
        })
        .collect()
}

impl<T> Widget for List<T> {
    type Answer = T;

    fn render(&mut self) -> Frame {
        let header = format!("{}{}", self.theme.header(&self.question), self.header_hint());
        self.first_render = false;

        if self.done {
            return Frame::new().line(header).finished();
        }

        let mut frame = Frame::new().line(header);
        let visible = self.choices.filtered(self.filter.as_deref().unwrap_or(""));
        let total = visible.len();
        let window = self.paginator.window(self.active, total, self.page_size);

        for (position, (_, choice)) in visible
            .iter()
            .enumerate()
            .skip(window.start)
            .take(window.len())
        {
            let number = self
                .enumerate
                .as_ref()
                .map(|delimiter| format!("{}{delimiter} ", position + 1))
                .unwrap_or_default();

            if position + 1 == self.active {
                let selected = format!("{} {number}{}", self.marker, choice.name());
                frame.push(self.theme.active(&selected));
            } else {
                frame.push(format!("  {number}{}", choice.name()));
            }
        }

        if total == 0 {
            frame.push("");
        }

        if is_paginated(total, self.page_size) {
            frame.push(self.theme.help(&self.page_help));
        }

        frame
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let total = self.visible_len();

        match key {
            KeyEvent::Up => self.active = step_up(self.active, total, self.cycle),
            KeyEvent::Down | KeyEvent::Tab => {
                self.active = step_down(self.active, total, self.cycle);
            }
            key if key.is_confirm() => {
                if total > 0 {
                    self.done = true;
                }
            }
            KeyEvent::Char(c) if self.enumerate.is_some() && c.is_ascii_digit() => {
                let number = c.to_digit(10).map_or(0, |n| n as usize);
                if (1..=total).contains(&number) {
                    self.active = number;
                }
            }
            KeyEvent::Char(c) if !c.is_control() && !c.is_whitespace() => {
                self.edit_filter(|filter| filter.push(c));
            }
            KeyEvent::Backspace => self.edit_filter(|filter| {
                filter.pop();
            }),
            KeyEvent::Delete => self.edit_filter(String::clear),
            _ => {}
        }

        debug!(
            "List active {} of {}, filter {:?}",
            self.active,
            self.visible_len(),
            self.filter
        );
    }

    fn is_done(&self) -> bool {
        self.done
    }

    fn into_answer(self) -> T {
        let index = self
            .choices
            .filtered(self.filter.as_deref().unwrap_or(""))
            .get(self.active)
            .map_or(self.active, |(index, _)| index);
        self.choices.into_choice(index).into_value()
    }
}
