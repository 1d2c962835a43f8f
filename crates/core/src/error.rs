use leon::ParseError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Terminal IO error: {}", _0)]
    Io(#[from] std::io::Error),

    #[error("Interrupted while waiting for a keypress.")]
    Interrupted,

    #[error("Error {} {} file at `{}`: {}", .action, .file_description, .path, .original)]
    Yaml {
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    },

    #[error("IO error with {} file at path `{}`: {}", .file_description, .path, .original)]
    File {
        file_description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("Invalid options for {}: {}", .prompt, .original)]
    InvalidOptions {
        prompt: String,
        original: serde_yaml::Error,
    },

    #[error("No prompts defined in file at `{}`", .0)]
    EmptyDefinitionFile(String),

    #[error("Unknown prompt kind `{}`, expected one of select, expand or slider", .0)]
    UnknownPromptKind(String),

    #[error("default index `{}` out of range (1 - {})", .default, .size)]
    DefaultOutOfRange { default: usize, size: usize },

    #[error("default index must be an integer in range (1 - {})", .size)]
    InvalidDefault { size: usize },

    #[error("default `{}` is not one of the available values ({})", .default, .range)]
    DefaultNotFound { default: String, range: String },

    #[error("Enumeration can't be used with filter")]
    EnumWithFilter,

    #[error("Choice `{}` is missing a key attribute", .0)]
    MissingChoiceKey(String),

    #[error("Choice key `{}` is more than one character long", .0)]
    ChoiceKeyTooLong(String),

    #[error("Choice `{}` has an empty key, keys must be exactly one character", .0)]
    EmptyChoiceKey(String),

    #[error("Choice key `{}` is reserved for help menu", .0)]
    ReservedChoiceKey(char),

    #[error("Choice key `{}` is a duplicate", .0)]
    DuplicateChoiceKey(char),

    #[error("Choice `{}` is a duplicate", .0)]
    DuplicateChoiceName(String),

    #[error("No choices were given, at least one choice is required")]
    EmptyChoices,

    #[error("Slider range from `{}` to `{}` is empty or not finite", .min, .max)]
    EmptySliderRange { min: f64, max: f64 },

    #[error("Slider step `{}` must be a finite number greater than zero", .0)]
    InvalidSliderStep(f64),

    #[error(
        "Slider range from `{}` to `{}` by `{}` has more than {} values",
        .min, .max, .step, .limit
    )]
    SliderRangeTooLarge {
        min: f64,
        max: f64,
        step: f64,
        limit: usize,
    },

    #[error("Slider value `{}` can't be represented by the slider's value type", .0)]
    UnrepresentableSliderValue(f64),

    #[error("Slider requires at least one value")]
    NoSliderValues,

    #[error("For a color, only one of `rgb`, `ansi` or `name` should be defined.")]
    MultipleColorTypes,

    #[error("Unknown color name: \"{}\"", _0)]
    UnknownColorName(String),

    #[error("Error parsing format string: {}", .0)]
    Format(#[from] ParseError),

    #[error("Unknown placeholder `{}` in format string, expected `slider`, `value` or `pipe`", .0)]
    UnknownFormatKey(String),
}

impl Error {
    pub fn yaml_error(
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    ) -> Self {
        Self::Yaml {
            action,
            file_description,
            path,
            original,
        }
    }

    pub fn file_error(file_description: String, path: String, original: std::io::Error) -> Self {
        Self::File {
            file_description,
            path,
            original,
        }
    }

    /// True for errors raised while validating a widget's setup, before any
    /// frame was drawn.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        !matches!(
            self,
            Self::Io(_)
                | Self::Interrupted
                | Self::Yaml { .. }
                | Self::File { .. }
                | Self::EmptyDefinitionFile(_)
                | Self::UnknownPromptKind(_)
        )
    }
}
