//! Text styling: color configuration, decoration and stripping.

use std::borrow::Cow;

use crossterm::style::{Color, ResetColor, SetForegroundColor};
use crossterm::Command;
use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

use crate::error::{Error, Result};

/// A color as written in options: a name, or one of `rgb`, `ansi`, `name`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ColorDefinition {
    Name(String),
    Detailed {
        #[serde(skip_serializing_if = "Option::is_none")]
        rgb: Option<(u8, u8, u8)>,
        #[serde(skip_serializing_if = "Option::is_none")]
        ansi: Option<u8>,
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
}

impl From<&str> for ColorDefinition {
    fn from(name: &str) -> Self {
        ColorDefinition::Name(name.to_string())
    }
}

/// Trait for converting color definitions to terminal colors
pub trait AsTermColor {
    fn as_crossterm_color(&self) -> Result<Color>;
}

impl AsTermColor for ColorDefinition {
    fn as_crossterm_color(&self) -> Result<Color> {
        match self {
            ColorDefinition::Name(name) => color_from_name(name),
            ColorDefinition::Detailed { rgb, ansi, name } => {
                let defined_count = [rgb.is_some(), ansi.is_some(), name.is_some()]
                    .iter()
                    .filter(|&&x| x)
                    .count();

                if defined_count > 1 {
                    return Err(Error::MultipleColorTypes);
                }

                match (rgb, ansi, name) {
                    (Some((r, g, b)), None, None) => Ok(Color::Rgb {
                        r: *r,
                        g: *g,
                        b: *b,
                    }),
                    (None, Some(ansi), None) => Ok(Color::AnsiValue(*ansi)),
                    (None, None, Some(name)) => color_from_name(name),
                    _ => Ok(Color::Reset),
                }
            }
        }
    }
}

/// Resolves a color name. Plain names are the standard 8 terminal colors,
/// `bright_` names their high-intensity variants; `_`, `-` and case are
/// ignored.
pub fn color_from_name(name: &str) -> Result<Color> {
    let normalized: String = name
        .chars()
        .filter(|c| *c != '_' && *c != '-')
        .collect::<String>()
        .to_lowercase();

    Ok(match normalized.as_str() {
        "black" => Color::Black,
        "red" | "darkred" => Color::DarkRed,
        "green" | "darkgreen" => Color::DarkGreen,
        "yellow" | "darkyellow" => Color::DarkYellow,
        "blue" | "darkblue" => Color::DarkBlue,
        "magenta" | "darkmagenta" => Color::DarkMagenta,
        "cyan" | "darkcyan" => Color::DarkCyan,
        "white" | "grey" | "gray" => Color::Grey,
        "brightblack" | "darkgrey" | "darkgray" => Color::DarkGrey,
        "brightred" => Color::Red,
        "brightgreen" => Color::Green,
        "brightyellow" => Color::Yellow,
        "brightblue" => Color::Blue,
        "brightmagenta" => Color::Magenta,
        "brightcyan" => Color::Cyan,
        "brightwhite" => Color::White,
        _ => return Err(Error::UnknownColorName(name.to_string())),
    })
}

/// Applies and removes foreground colors.
///
/// A disabled styler passes text through untouched. Named colors are
/// written the way crossterm writes them, as 256-color indices: `green` is
/// `ESC[38;5;2m` rather than `ESC[32m`, and `bright_black` is `ESC[38;5;8m`
/// rather than `ESC[90m`. The reset is `ESC[0m` in both cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Styler {
    enabled: bool,
}

impl Default for Styler {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Styler {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Colors are disabled when `NO_COLOR` is set (https://no-color.org/).
    pub fn from_env() -> Self {
        Self::new(std::env::var_os("NO_COLOR").is_none())
    }

    pub fn decorate(&self, text: &str, color: Color) -> String {
        if !self.enabled || text.is_empty() {
            return text.to_string();
        }

        let mut styled = String::with_capacity(text.len() + 16);
        // Writing into a String cannot fail
        let _ = SetForegroundColor(color).write_ansi(&mut styled);
        styled.push_str(text);
        let _ = ResetColor.write_ansi(&mut styled);
        styled
    }
}

/// Strip ANSI escape sequences from a string.
///
/// Returns `Cow::Borrowed` when no escape sequences are present.
pub fn strip(text: &str) -> Cow<'_, str> {
    if !text.contains('\x1b') {
        return Cow::Borrowed(text);
    }

    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\x1b' {
            result.push(c);
            continue;
        }
        match chars.peek() {
            Some('[') => {
                chars.next();
                // CSI: parameters then a final byte in 0x40..=0x7E
                for c in chars.by_ref() {
                    if ('\x40'..='\x7e').contains(&c) {
                        break;
                    }
                }
            }
            Some(']') => {
                chars.next();
                // OSC: until BEL or ESC \
                while let Some(c) = chars.next() {
                    if c == '\x07' {
                        break;
                    }
                    if c == '\x1b' && chars.peek() == Some(&'\\') {
                        chars.next();
                        break;
                    }
                }
            }
            Some(_) => {
                chars.next();
            }
            None => {}
        }
    }

    Cow::Owned(result)
}

/// Number of terminal columns `text` covers once styling is removed.
pub fn display_width(text: &str) -> usize {
    strip(text).width()
}

/// Writes a crossterm command's escape sequence into a string.
pub(crate) fn ansi(command: impl Command) -> String {
    let mut sequence = String::new();
    let _ = command.write_ansi(&mut sequence);
    sequence
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_names_are_standard_colors() {
        assert_eq!(color_from_name("green").unwrap(), Color::DarkGreen);
        assert_eq!(color_from_name("bright_black").unwrap(), Color::DarkGrey);
        assert_eq!(color_from_name("Bright-Red").unwrap(), Color::Red);
        assert_eq!(color_from_name("darkblue").unwrap(), Color::DarkBlue);
    }

    #[test]
    fn test_unknown_color_name() {
        let result = color_from_name("octarine");
        assert!(matches!(result, Err(Error::UnknownColorName(name)) if name == "octarine"));
    }

    #[test]
    fn test_detailed_color_definition() {
        let rgb = ColorDefinition::Detailed {
            rgb: Some((1, 2, 3)),
            ansi: None,
            name: None,
        };
        assert_eq!(
            rgb.as_crossterm_color().unwrap(),
            Color::Rgb { r: 1, g: 2, b: 3 }
        );

        let both = ColorDefinition::Detailed {
            rgb: Some((1, 2, 3)),
            ansi: Some(4),
            name: None,
        };
        assert!(matches!(
            both.as_crossterm_color(),
            Err(Error::MultipleColorTypes)
        ));
    }

    #[test]
    fn test_color_definition_from_yaml() {
        let name: ColorDefinition = serde_yaml::from_str("cyan").unwrap();
        assert_eq!(name, ColorDefinition::Name("cyan".to_string()));

        let ansi: ColorDefinition = serde_yaml::from_str("ansi: 240").unwrap();
        assert_eq!(ansi.as_crossterm_color().unwrap(), Color::AnsiValue(240));
    }

    #[test]
    fn test_decorate_and_strip() {
        let styler = Styler::new(true);
        let styled = styler.decorate("Overwrite", Color::DarkGreen);
        assert!(styled.starts_with('\x1b'));
        assert!(styled.ends_with("\x1b[0m"));
        assert_eq!(strip(&styled), "Overwrite");
        assert_eq!(display_width(&styled), 9);
    }

    #[test]
    fn test_named_colors_use_256_color_indices() {
        let styler = Styler::new(true);
        assert_eq!(
            styler.decorate("Vodka", color_from_name("green").unwrap()),
            "\x1b[38;5;2mVodka\x1b[0m"
        );
        assert_eq!(
            styler.decorate("(help)", color_from_name("bright_black").unwrap()),
            "\x1b[38;5;8m(help)\x1b[0m"
        );
    }

    #[test]
    fn test_disabled_styler_passes_through() {
        let styler = Styler::new(false);
        assert_eq!(styler.decorate("Skip", Color::Red), "Skip");
    }

    #[test]
    fn test_strip_borrows_plain_text() {
        assert!(matches!(strip("plain"), Cow::Borrowed("plain")));
        assert_eq!(strip("\x1b]0;title\x07text\x1b[2K"), "text");
    }

    #[test]
    fn test_display_width_counts_columns() {
        assert_eq!(display_width("──●──"), 5);
        assert_eq!(display_width(""), 0);
    }
}
