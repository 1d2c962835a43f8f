//! Terminal I/O used by the render loop.
//!
//! [`Terminal`] is the seam between the widgets and the outside world. The
//! crossterm implementation talks to the real tty; [`ScriptedTerminal`]
//! replays a fixed key script and records everything written, which is how
//! the frame sequences are tested.

use std::collections::VecDeque;
use std::io::{stdout, ErrorKind, Stdout, Write};
use std::ops::{Deref, DerefMut};

use crossterm::cursor::{Hide, MoveToColumn, MoveUp, Show};
use crossterm::event::{self, Event};
use crossterm::terminal::{self, disable_raw_mode, enable_raw_mode, Clear, ClearType};
use log::{trace, warn};

use crate::error::Result;
use crate::key::KeyEvent;
use crate::style::ansi;

/// Column width assumed when the terminal cannot report one.
pub const FALLBACK_COLUMNS: usize = 80;

pub trait Terminal {
    fn write(&mut self, text: &str) -> Result<()>;

    /// Blocks until one keypress is available.
    fn read_key(&mut self) -> Result<KeyEvent>;

    fn columns(&self) -> Result<usize>;

    fn hide_cursor(&mut self) -> Result<()> {
        self.write(&ansi(Hide))
    }

    fn show_cursor(&mut self) -> Result<()> {
        self.write(&ansi(Show))
    }

    /// Clears `rows` physical rows, ending at the start of the topmost one.
    fn erase_lines(&mut self, rows: usize) -> Result<()> {
        if rows == 0 {
            return Ok(());
        }
        self.write(&erase_sequence(rows))
    }
}

/// Escape sequence clearing the current row and the `rows - 1` above it.
pub fn erase_sequence(rows: usize) -> String {
    let clear_row = format!("{}{}", ansi(Clear(ClearType::CurrentLine)), ansi(MoveToColumn(0)));
    let up = ansi(MoveUp(1));

    let mut sequence = String::new();
    for row in 0..rows {
        sequence.push_str(&clear_row);
        if row + 1 < rows {
            sequence.push_str(&up);
        }
    }
    sequence
}

/// Keeps the cursor hidden while alive and shows it again on drop, whether
/// the interaction finished, failed or was interrupted.
pub struct HiddenCursor<'a, T: Terminal + ?Sized> {
    terminal: &'a mut T,
}

impl<'a, T: Terminal + ?Sized> HiddenCursor<'a, T> {
    pub fn hide(terminal: &'a mut T) -> Result<Self> {
        terminal.hide_cursor()?;
        Ok(Self { terminal })
    }
}

impl<T: Terminal + ?Sized> Deref for HiddenCursor<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.terminal
    }
}

impl<T: Terminal + ?Sized> DerefMut for HiddenCursor<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.terminal
    }
}

impl<T: Terminal + ?Sized> Drop for HiddenCursor<'_, T> {
    fn drop(&mut self) {
        if let Err(e) = self.terminal.show_cursor() {
            warn!("Failed to show the cursor again: {e}");
        }
    }
}

struct RawModeGuard;

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        // Disable raw mode on drop
        let _ = disable_raw_mode();
    }
}

/// The process's own terminal.
///
/// Raw mode is only enabled for the duration of a key read, so frames are
/// written with normal line discipline.
pub struct CrosstermTerminal {
    stdout: Stdout,
}

impl Default for CrosstermTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl CrosstermTerminal {
    pub fn new() -> Self {
        Self { stdout: stdout() }
    }
}

impl Terminal for CrosstermTerminal {
    fn write(&mut self, text: &str) -> Result<()> {
        trace!("Writing {} bytes", text.len());
        self.stdout.write_all(text.as_bytes())?;
        self.stdout.flush()?;
        Ok(())
    }

    fn read_key(&mut self) -> Result<KeyEvent> {
        enable_raw_mode()?;
        let _raw_mode_guard = RawModeGuard; // Raw mode is disabled when this goes out of scope

        loop {
            if let Event::Key(key_event) = event::read()? {
                if let Some(key) = KeyEvent::from_crossterm(key_event) {
                    return Ok(key);
                }
            }
        }
    }

    fn columns(&self) -> Result<usize> {
        let (width, _) = terminal::size()?;
        if width == 0 {
            return Ok(FALLBACK_COLUMNS);
        }
        Ok(width as usize)
    }
}

/// In-memory terminal replaying a key script.
#[derive(Debug, Clone)]
pub struct ScriptedTerminal {
    keys: VecDeque<KeyEvent>,
    output: String,
    columns: usize,
}

impl ScriptedTerminal {
    pub fn new<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<KeyEvent>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            output: String::new(),
            columns: FALLBACK_COLUMNS,
        }
    }

    /// One key per character of `input`.
    pub fn from_input(input: &str) -> Self {
        Self::new(input.chars())
    }

    #[must_use]
    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = columns;
        self
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn remaining_keys(&self) -> usize {
        self.keys.len()
    }
}

impl Terminal for ScriptedTerminal {
    fn write(&mut self, text: &str) -> Result<()> {
        self.output.push_str(text);
        Ok(())
    }

    fn read_key(&mut self) -> Result<KeyEvent> {
        self.keys.pop_front().ok_or_else(|| {
            std::io::Error::new(ErrorKind::UnexpectedEof, "key script exhausted").into()
        })
    }

    fn columns(&self) -> Result<usize> {
        Ok(self.columns)
    }
}
