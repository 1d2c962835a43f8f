//! Frames and the redraw loop shared by every widget.

use std::fmt::{Display, Formatter};

use log::debug;

use crate::error::{Error, Result};
use crate::key::KeyEvent;
use crate::style::display_width;
use crate::terminal::{HiddenCursor, Terminal};

/// One rendered block of text.
///
/// Lines are joined with `\n`. A final frame ends with a newline so the
/// answer stays on screen and the cursor moves past it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    lines: Vec<String>,
    trailing_newline: bool,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Marks this as a terminal frame, ending in a newline.
    #[must_use]
    pub fn finished(mut self) -> Self {
        self.trailing_newline = true;
        self
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Physical rows this frame covers on a terminal `columns` wide.
    pub fn rows(&self, columns: usize) -> usize {
        self.lines.iter().map(|line| line_rows(line, columns)).sum()
    }
}

impl Display for Frame {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.lines.join("\n"))?;
        if self.trailing_newline {
            f.write_str("\n")?;
        }
        Ok(())
    }
}

/// Rows one logical line wraps onto, never less than one.
pub fn line_rows(line: &str, columns: usize) -> usize {
    let columns = columns.max(1);
    let width = display_width(line);
    1 + width.saturating_sub(1) / columns
}

/// A widget driven by [`run`].
pub trait Widget {
    type Answer;

    /// The frame for the current state. Called once per loop iteration and
    /// once more after the widget is done.
    fn render(&mut self) -> Frame;

    /// Applies one keypress. Unbound keys are ignored.
    fn handle_key(&mut self, key: KeyEvent);

    fn is_done(&self) -> bool;

    fn into_answer(self) -> Self::Answer;
}

/// Runs a widget to completion against `terminal`.
///
/// Each iteration writes a frame, blocks on one key, updates the widget and
/// erases exactly the rows the frame took. Once done, the final frame is
/// written and the cursor shown again.
///
/// # Errors
///
/// Returns [`Error::Interrupted`] on Ctrl-C, or any terminal I/O error. The
/// cursor is restored in both cases.
pub fn run<W, T>(mut widget: W, terminal: &mut T) -> Result<W::Answer>
where
    W: Widget,
    T: Terminal + ?Sized,
{
    let mut terminal = HiddenCursor::hide(terminal)?;

    while !widget.is_done() {
        let frame = widget.render();
        terminal.write(&frame.to_string())?;

        let key = terminal.read_key()?;
        if key == KeyEvent::Interrupt {
            return Err(Error::Interrupted);
        }
        debug!("Dispatching {key:?}");
        widget.handle_key(key);

        let rows = frame.rows(terminal.columns()?);
        debug!("Erasing {rows} rows");
        terminal.erase_lines(rows)?;
    }

    let frame = widget.render();
    terminal.write(&frame.to_string())?;
    drop(terminal);

    Ok(widget.into_answer())
}
