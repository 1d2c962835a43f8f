//! Stepped value picker.
//!
//! The slider walks an ordered list of values with the arrow keys. The list
//! is either given explicitly or generated from `min`, `max` and `step`.
//! Movement clamps at both ends.

use std::collections::HashMap;
use std::fmt::Display;

use itertools::Itertools;
use leon::Template;
use log::{debug, warn};

use crate::error::{Error, Result};
use crate::key::KeyEvent;
use crate::options::{ShowHelp, SliderFormatter, SliderOptions, Theme};
use crate::render::{Frame, Widget};

pub const DEFAULT_FORMAT: &str = "{slider} {value}";

/// Upper bound on the number of values a range may generate.
pub const MAX_SLIDER_VALUES: usize = 10_000;

/// Values a slider can generate from a numeric range.
///
/// Types that only make sense as an explicit `values` list keep the default
/// implementation, which declines every step.
pub trait SliderValue: Sized {
    fn from_step(_value: f64) -> Option<Self> {
        None
    }
}

impl SliderValue for f64 {
    fn from_step(value: f64) -> Option<Self> {
        Some(value)
    }
}

// Integer sliders only accept whole steps, rounding would repeat values.
impl SliderValue for i64 {
    fn from_step(value: f64) -> Option<Self> {
        let whole = value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64;
        whole.then_some(value as i64)
    }
}

impl SliderValue for i32 {
    fn from_step(value: f64) -> Option<Self> {
        let whole = value.fract() == 0.0
            && value >= f64::from(i32::MIN)
            && value <= f64::from(i32::MAX);
        whole.then_some(value as i32)
    }
}

impl SliderValue for String {}

impl SliderValue for &str {}

/// The arithmetic progression `min, min + step, ..` up to `max` inclusive.
///
/// # Errors
///
/// Fails when `step` is not a positive finite number, `min` or `max` is not
/// finite, `min` is greater than `max`, or the range holds more than
/// [`MAX_SLIDER_VALUES`] values.
pub fn stepped(min: f64, max: f64, step: f64) -> Result<Vec<f64>> {
    if !step.is_finite() || step <= 0.0 {
        return Err(Error::InvalidSliderStep(step));
    }
    if !min.is_finite() || !max.is_finite() || min > max {
        return Err(Error::EmptySliderRange { min, max });
    }

    let steps = ((max - min) / step + 1e-9).floor();
    if !steps.is_finite() || steps >= MAX_SLIDER_VALUES as f64 {
        return Err(Error::SliderRangeTooLarge {
            min,
            max,
            step,
            limit: MAX_SLIDER_VALUES,
        });
    }

    let count = steps as usize + 1;
    Ok((0..count)
        .map(|i| round_step(min + i as f64 * step))
        .collect())
}

// Drops float noise such as 0.30000000000000004.
fn round_step(value: f64) -> f64 {
    (value * 1e10).round() / 1e10
}

enum Layout<T> {
    Template(String),
    Formatter(SliderFormatter<T>),
}

pub struct Slider<T> {
    question: String,
    values: Vec<T>,
    theme: Theme,
    layout: Layout<T>,
    quiet: bool,
    show_help: ShowHelp,
    help: String,
    position: usize,
    first_render: bool,
    done: bool,
}

impl<T> Slider<T>
where
    T: SliderValue + Display + PartialEq,
{
    /// # Errors
    ///
    /// Fails when the range or value list is empty, the step is not
    /// positive, a generated value doesn't fit `T`, the default is not one of the values, the format template
    /// is invalid, or a color cannot be resolved.
    pub fn new(question: impl Into<String>, options: SliderOptions<T>) -> Result<Self> {
        let values = match options.values {
            Some(values) => values,
            None => stepped(options.min, options.max, options.step)?
                .into_iter()
                .map(|value| T::from_step(value).ok_or(Error::UnrepresentableSliderValue(value)))
                .collect::<Result<Vec<T>>>()?,
        };
        if values.is_empty() {
            return Err(Error::NoSliderValues);
        }

        let position = match &options.default {
            Some(default) => values
                .iter()
                .position(|value| value == default)
                .ok_or_else(|| Error::DefaultNotFound {
                    default: default.to_string(),
                    range: values.iter().join(", "),
                })?,
            None => values.len() / 2,
        };

        let layout = match (options.formatter, options.format) {
            (Some(formatter), _) => Layout::Formatter(formatter),
            (None, Some(format)) => {
                validate_template(&format)?;
                Layout::Template(format)
            }
            (None, None) => Layout::Template(DEFAULT_FORMAT.to_string()),
        };

        let theme = options.appearance.resolve()?;
        let help = options.help.unwrap_or_else(|| {
            format!(
                "(Use {}/{} arrow keys, press Enter to select)",
                theme.symbols.arrow_left, theme.symbols.arrow_right
            )
        });

        Ok(Self {
            question: question.into(),
            values,
            theme,
            layout,
            quiet: options.quiet,
            show_help: options.show_help,
            help,
            position,
            first_render: true,
            done: false,
        })
    }
}

impl<T: Display> Slider<T> {
    pub fn value(&self) -> &T {
        &self.values[self.position]
    }

    /// 0-based position of the current value.
    pub fn position(&self) -> usize {
        self.position
    }

    fn track(&self) -> String {
        let symbols = &self.theme.symbols;
        let after = self.values.len() - 1 - self.position;
        format!(
            "{}{}{}",
            symbols.line.repeat(self.position),
            self.theme.active(&symbols.bullet),
            symbols.line.repeat(after)
        )
    }

    fn formatted(&self) -> String {
        let track = self.track();
        let value = self.value();

        match &self.layout {
            Layout::Formatter(formatter) => formatter(&track, value),
            Layout::Template(format) => {
                let values = HashMap::from([
                    ("slider".to_string(), track.clone()),
                    ("value".to_string(), value.to_string()),
                    ("pipe".to_string(), self.theme.symbols.pipe.clone()),
                ]);
                match Template::parse(format).map(|template| template.render(&values)) {
                    Ok(Ok(rendered)) => rendered,
                    Ok(Err(e)) => {
                        warn!("Failed to render slider format: {e}");
                        format!("{track} {value}")
                    }
                    Err(e) => {
                        warn!("Failed to parse slider format: {e}");
                        format!("{track} {value}")
                    }
                }
            }
        }
    }

    fn shows_help(&self) -> bool {
        match self.show_help {
            ShowHelp::Always => true,
            ShowHelp::Start => self.first_render,
            ShowHelp::Never => false,
        }
    }
}

const FORMAT_KEYS: [&str; 3] = ["slider", "value", "pipe"];

fn validate_template(format: &str) -> Result<()> {
    let template = Template::parse(format)?;
    let unknown = template
        .keys()
        .map(|key| key.to_string())
        .find(|key| !FORMAT_KEYS.contains(&key.as_str()));

    match unknown {
        Some(key) => Err(Error::UnknownFormatKey(key)),
        None => Ok(()),
    }
}

impl<T: Display> Widget for Slider<T> {
    type Answer = T;

    fn render(&mut self) -> Frame {
        let header = self.theme.header(&self.question);

        if self.done {
            if self.quiet {
                return Frame::new();
            }
            let value = self.theme.active(&self.value().to_string());
            return Frame::new().line(format!("{header}{value}")).finished();
        }

        let mut frame = Frame::new().line(format!("{header}{}", self.formatted()));
        if self.shows_help() {
            frame.push(self.theme.help(&self.help));
        }
        self.first_render = false;
        frame
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match key {
            KeyEvent::Left | KeyEvent::Down => self.position = self.position.saturating_sub(1),
            KeyEvent::Right | KeyEvent::Up => {
                self.position = (self.position + 1).min(self.values.len() - 1);
            }
            key if key.is_confirm() => self.done = true,
            _ => {}
        }

        debug!("Slider at {} of {}", self.position, self.values.len());
    }

    fn is_done(&self) -> bool {
        self.done
    }

    fn into_answer(mut self) -> T {
        self.values.swap_remove(self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{Appearance, ColorMode};
    use crate::symbols::Symbols;

    fn plain<T>() -> SliderOptions<T> {
        SliderOptions::default().appearance(Appearance {
            color: ColorMode::Never,
            ..Appearance::default()
        })
    }

    #[test]
    fn test_stepped_values() {
        assert_eq!(
            stepped(32.0, 54.0, 2.0).unwrap(),
            (0..12).map(|i| 32.0 + 2.0 * f64::from(i)).collect::<Vec<_>>()
        );
        assert_eq!(stepped(0.0, 1.0, 0.1).unwrap()[3], 0.3);
        assert_eq!(stepped(5.0, 5.0, 1.0).unwrap(), vec![5.0]);
        assert_eq!(stepped(0.0, 10.0, 3.0).unwrap(), vec![0.0, 3.0, 6.0, 9.0]);
    }

    #[test]
    fn test_invalid_ranges_rejected() {
        assert!(matches!(
            stepped(0.0, 10.0, 0.0),
            Err(Error::InvalidSliderStep(_))
        ));
        assert!(matches!(
            stepped(10.0, 0.0, 1.0),
            Err(Error::EmptySliderRange { .. })
        ));
        assert!(matches!(
            Slider::new("Letter?", plain::<String>().values(Vec::new())),
            Err(Error::NoSliderValues)
        ));
        // Strings can't be generated from a numeric range
        assert!(matches!(
            Slider::new("Letter?", plain::<String>()),
            Err(Error::UnrepresentableSliderValue(_))
        ));
    }

    #[test]
    fn test_unbounded_ranges_rejected() {
        assert!(matches!(
            stepped(0.0, f64::INFINITY, 1.0),
            Err(Error::EmptySliderRange { .. })
        ));
        assert!(matches!(
            stepped(f64::NEG_INFINITY, 0.0, 1.0),
            Err(Error::EmptySliderRange { .. })
        ));
        assert!(matches!(
            stepped(0.0, 1.0, f64::INFINITY),
            Err(Error::InvalidSliderStep(_))
        ));
        assert!(matches!(
            stepped(0.0, 1e15, 1.0),
            Err(Error::SliderRangeTooLarge { limit: MAX_SLIDER_VALUES, .. })
        ));
        assert!(matches!(
            stepped(0.0, f64::MAX, f64::MIN_POSITIVE),
            Err(Error::SliderRangeTooLarge { .. })
        ));

        let largest = stepped(1.0, MAX_SLIDER_VALUES as f64, 1.0).unwrap();
        assert_eq!(largest.len(), MAX_SLIDER_VALUES);
        assert!(Slider::new("N?", plain::<i64>().range(0.0, 1e15, 1.0)).is_err());
    }

    #[test]
    fn test_integer_slider_rejects_fractional_steps() {
        let result = Slider::new("N?", plain::<i64>().range(0.0, 2.0, 0.5));
        assert!(matches!(
            result,
            Err(Error::UnrepresentableSliderValue(value)) if value == 0.5
        ));
        assert!(Slider::new("N?", plain::<i32>().range(0.5, 3.5, 1.0)).is_err());
        assert!(Slider::new("N?", plain::<i32>().range(0.0, 3e10, 1e10)).is_err());

        // Whole steps still work, and every value is distinct
        let mut slider = Slider::new(
            "N?",
            plain::<i64>().range(0.0, 4.0, 2.0).default_value(2),
        )
        .unwrap();
        slider.handle_key(KeyEvent::Right);
        assert_eq!(*slider.value(), 4);
        slider.handle_key(KeyEvent::Left);
        slider.handle_key(KeyEvent::Left);
        assert_eq!(*slider.value(), 0);
    }

    #[test]
    fn test_default_is_middle_of_range() {
        let slider = Slider::new("What size?", plain::<f64>().range(32.0, 54.0, 2.0)).unwrap();
        assert_eq!(*slider.value(), 44.0);

        let slider = Slider::new("What size?", plain::<i64>()).unwrap();
        assert_eq!(*slider.value(), 5);
    }

    #[test]
    fn test_unknown_default_names_range() {
        let result = Slider::new(
            "What size?",
            plain::<i64>().range(0.0, 4.0, 2.0).default_value(3),
        );
        match result {
            Err(error @ Error::DefaultNotFound { .. }) => assert_eq!(
                error.to_string(),
                "default `3` is not one of the available values (0, 2, 4)"
            ),
            _ => panic!("default outside the range should be rejected"),
        }
    }

    #[test]
    fn test_render_track_and_help_once() {
        let mut slider = Slider::new(
            "What size?",
            plain::<f64>().range(32.0, 54.0, 2.0).default_value(38.0),
        )
        .unwrap();

        assert_eq!(
            slider.render().lines(),
            &[
                "What size? ───●──────── 38",
                "(Use ←/→ arrow keys, press Enter to select)",
            ]
        );
        assert_eq!(slider.render().lines(), &["What size? ───●──────── 38"]);
    }

    #[test]
    fn test_always_and_never_show_help() {
        let mut always = Slider::new("N?", plain::<i64>().show_help(ShowHelp::Always)).unwrap();
        always.render();
        assert_eq!(always.render().lines().len(), 2);

        let mut never = Slider::new("N?", plain::<i64>().show_help(ShowHelp::Never)).unwrap();
        assert_eq!(never.render().lines().len(), 1);
    }

    #[test]
    fn test_movement_clamps_at_both_ends() {
        let mut slider = Slider::new("N?", plain::<i64>().default_value(10)).unwrap();
        slider.handle_key(KeyEvent::Right);
        slider.handle_key(KeyEvent::Up);
        assert_eq!(*slider.value(), 10);

        for _ in 0..20 {
            slider.handle_key(KeyEvent::Left);
        }
        assert_eq!(*slider.value(), 0);
        slider.handle_key(KeyEvent::Down);
        assert_eq!(slider.position(), 0);
    }

    #[test]
    fn test_explicit_values() {
        let letters = ["a", "b", "c", "d", "e", "f", "g"].map(String::from);
        let mut slider = Slider::new(
            "What letter?",
            plain::<String>().values(letters).default_value("b".to_string()),
        )
        .unwrap();
        slider.handle_key(KeyEvent::Right);
        slider.handle_key(KeyEvent::Right);
        assert_eq!(slider.render().lines()[0], "What letter? ───●─── d");
        slider.handle_key(KeyEvent::Enter);
        assert!(slider.is_done());
        assert_eq!(slider.into_answer(), "d");
    }

    #[test]
    fn test_format_template() {
        let mut slider = Slider::new(
            "What size?",
            plain::<i64>()
                .range(0.0, 20.0, 2.0)
                .default_value(6)
                .format("|{slider}| {value}%")
                .help("(Move with arrows)"),
        )
        .unwrap();
        assert_eq!(
            slider.render().lines(),
            &["What size? |───●───────| 6%", "(Move with arrows)"]
        );
    }

    #[test]
    fn test_pipe_in_format_template() {
        let mut slider = Slider::new(
            "What size?",
            plain::<i64>()
                .range(0.0, 4.0, 1.0)
                .default_value(1)
                .format("{pipe}{slider}{pipe} {value}")
                .show_help(ShowHelp::Never),
        )
        .unwrap();
        assert_eq!(slider.render().lines(), &["What size? |─●───| 1"]);
    }

    #[test]
    fn test_formatter_closure_wins() {
        let mut slider = Slider::new(
            "What size?",
            plain::<i64>()
                .range(0.0, 20.0, 2.0)
                .default_value(6)
                .format("{value}")
                .formatter(|track, value| format!("[{track}] {value} units")),
        )
        .unwrap();
        assert_eq!(slider.render().lines()[0], "What size? [───●───────] 6 units");
    }

    #[test]
    fn test_bad_format_rejected() {
        assert!(matches!(
            Slider::new("N?", plain::<i64>().format("{slider} {percent}")),
            Err(Error::UnknownFormatKey(key)) if key == "percent"
        ));
        assert!(matches!(
            Slider::new("N?", plain::<i64>().format("{slider")),
            Err(Error::Format(_))
        ));
    }

    #[test]
    fn test_done_frame_and_quiet() {
        let mut slider = Slider::new("What size?", plain::<i64>()).unwrap();
        slider.handle_key(KeyEvent::Enter);
        assert_eq!(slider.render().to_string(), "What size? 5\n");

        let mut quiet = Slider::new("What size?", plain::<i64>().quiet(true)).unwrap();
        quiet.handle_key(KeyEvent::Space);
        assert_eq!(quiet.render().to_string(), "");
        assert_eq!(quiet.into_answer(), 5);
    }

    #[test]
    fn test_custom_symbols() {
        let appearance = Appearance {
            color: ColorMode::Never,
            symbols: Symbols {
                bullet: "x".to_string(),
                line: "_".to_string(),
                ..Symbols::default()
            },
            ..Appearance::default()
        };
        let mut slider = Slider::new(
            "What size?",
            SliderOptions::<f64>::default()
                .appearance(appearance)
                .range(32.0, 54.0, 2.0),
        )
        .unwrap();
        assert_eq!(slider.render().lines()[0], "What size? ______x_____ 44");
    }
}
