//! Turns parsed arguments into questions.

use log::debug;
use rust_prompts_core::choice::Choice;
use rust_prompts_core::choices::Choices;
use rust_prompts_core::error::{Error, Result};
use rust_prompts_core::file_handling::get_prompt_definitions;
use rust_prompts_core::options::Appearance;
use rust_prompts_core::prompt::Prompt;
use rust_prompts_core::symbols::Symbols;
use rust_prompts_core::terminal::Terminal;

use crate::cli_args::{Args, PromptCommand};

/// The appearance selected by the global flags.
pub fn appearance(args: &Args) -> Appearance {
    Appearance {
        prefix: args.prefix.clone(),
        color: args.color.into(),
        symbols: if args.ascii {
            Symbols::ascii()
        } else {
            Symbols::default()
        },
        ..Appearance::default()
    }
}

/// Asks the question(s) described by `command`, returning one answer per
/// question in order.
///
/// # Errors
///
/// Returns configuration errors before anything is drawn, and terminal or
/// interrupt errors from the interaction itself.
pub fn ask<T: Terminal>(prompt: &mut Prompt<T>, command: &PromptCommand) -> Result<Vec<String>> {
    debug!("Running {command:?}");

    match command {
        PromptCommand::Select {
            question,
            choices,
            default,
            cycle,
            filter,
            enumerate,
            per_page,
            marker,
        } => {
            let mut options = prompt.list_options().cycle(*cycle).filter(*filter);
            options.default.clone_from(default);
            options.enumerate.clone_from(enumerate);
            options.per_page = *per_page;
            options.marker.clone_from(marker);

            let choices = Choices::from_choices(choices.iter().map(String::as_str))?;
            Ok(vec![prompt.select_with(question, choices, options)?])
        }
        PromptCommand::Expand {
            question,
            choices,
            default,
        } => {
            let mut options = prompt.expand_options();
            options.default.clone_from(default);

            let choices = Choices::from_choices(
                choices
                    .iter()
                    .map(|choice| Choice::named(choice.name.clone()).with_key(choice.key.clone())),
            )?;
            Ok(vec![prompt.expand_with(question, choices, options)?])
        }
        PromptCommand::Slider {
            question,
            min,
            max,
            step,
            values,
            default,
            format,
            quiet,
            show_help,
        } => {
            if let Some(values) = values {
                let mut options = prompt
                    .slider_options::<String>()
                    .values(values.iter().cloned())
                    .quiet(*quiet)
                    .show_help((*show_help).into());
                options.default.clone_from(default);
                options.format.clone_from(format);
                return Ok(vec![prompt.slider_with(question, options)?]);
            }

            let mut options = prompt
                .slider_options::<f64>()
                .range(*min, *max, *step)
                .quiet(*quiet)
                .show_help((*show_help).into());
            options.format.clone_from(format);
            if let Some(default) = default {
                let value = default.parse::<f64>().map_err(|_| Error::DefaultNotFound {
                    default: default.clone(),
                    range: format!("numbers from {min} to {max}"),
                })?;
                options.default = Some(value);
            }
            let answer = prompt.slider_with(question, options)?;
            Ok(vec![answer.to_string()])
        }
        PromptCommand::File { path } => {
            let definitions = get_prompt_definitions(path)?;
            definitions
                .iter()
                .map(|definition| definition.ask(prompt))
                .collect()
        }
    }
}
