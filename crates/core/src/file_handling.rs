//! Reading prompt definition files.

use std::fs::File;

use serde::Deserialize;

use crate::definitions::PromptDefinition;
use crate::error::{Error, Result};

const FILE_DESCRIPTION: &str = "prompt definition";

/// Expands a leading `~` in a user supplied path.
pub fn expand_path(path: &str) -> String {
    shellexpand::tilde(path).to_string()
}

fn get_reader(file_description: &str, path: &str) -> Result<File> {
    File::open(path)
        .map_err(|e| Error::file_error(file_description.to_string(), path.to_string(), e))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(Box<PromptDefinition>),
    Many(Vec<PromptDefinition>),
}

/// Loads the prompts in a definition file, in order.
///
/// The file holds either a single prompt mapping or a sequence of them. Each
/// prompt is validated so that a broken definition fails before the first
/// question is drawn.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened
/// - The YAML is malformed or doesn't match the expected structure
/// - The file holds no prompts
/// - A prompt has an unknown kind, invalid options or invalid choices
///
/// # Examples
///
/// ```no_run
/// use rust_prompts_core::file_handling::get_prompt_definitions;
///
/// let prompts = get_prompt_definitions("~/.rust-prompts/setup.yml")?;
/// println!("Loaded {} prompts", prompts.len());
/// # Ok::<(), rust_prompts_core::error::Error>(())
/// ```
pub fn get_prompt_definitions(path: &str) -> Result<Vec<PromptDefinition>> {
    let path = expand_path(path);
    let reader = get_reader(FILE_DESCRIPTION, &path)?;

    let parsed: OneOrMany = serde_yaml::from_reader(reader).map_err(|e| {
        Error::yaml_error(
            "reading".to_string(),
            FILE_DESCRIPTION.to_string(),
            path.clone(),
            e,
        )
    })?;

    let definitions = match parsed {
        OneOrMany::One(definition) => vec![*definition],
        OneOrMany::Many(definitions) => definitions,
    };

    if definitions.is_empty() {
        return Err(Error::EmptyDefinitionFile(path));
    }

    for definition in &definitions {
        definition.validate()?;
    }

    Ok(definitions)
}
