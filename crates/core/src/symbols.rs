use serde::{Deserialize, Serialize};

/// Glyphs used when drawing widgets.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Symbols {
    pub pointer: String,
    pub bullet: String,
    pub line: String,
    pub pipe: String,
    pub arrow_left: String,
    pub arrow_right: String,
}

impl Default for Symbols {
    fn default() -> Self {
        Self {
            pointer: "‣".to_string(),
            bullet: "●".to_string(),
            line: "─".to_string(),
            pipe: "|".to_string(),
            arrow_left: "←".to_string(),
            arrow_right: "→".to_string(),
        }
    }
}

impl Symbols {
    /// Glyphs for terminals without unicode support.
    pub fn ascii() -> Self {
        Self {
            pointer: ">".to_string(),
            bullet: "O".to_string(),
            line: "-".to_string(),
            pipe: "|".to_string(),
            arrow_left: "<-".to_string(),
            arrow_right: "->".to_string(),
        }
    }
}
