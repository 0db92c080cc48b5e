//! Prompt construction for scene review.
//!
//! Builds the request sent to the advisory service: the scene as pretty JSON
//! plus a request for a bulleted list of suggestions, which is the shape
//! [`parse_suggestions`](super::parse_suggestions) expects back.

use serde_json::Value;

/// Maximum scene JSON size (in characters) to include in prompts
const MAX_SCENE_SIZE: usize = 100_000;

/// System prompt for scene review
pub const SCENE_REVIEW_SYSTEM_PROMPT: &str = r#"You are an expert media production consultant specializing in scene structure and continuity.

You review structured scene descriptions (characters, props, environments, effects) before they go into production. Focus on:
- Structural issues that could impact production
- Potential continuity problems
- Efficiency improvements
- Best practices for this type of scene

Answer only with a bulleted list of specific, actionable suggestions, one per line."#;

/// Builder for constructing scene review prompts
#[derive(Debug, Default)]
pub struct PromptBuilder {
    scene_json: Option<String>,
}

impl PromptBuilder {
    pub fn new() -> Self {
        PromptBuilder::default()
    }

    /// Add the scene record to review
    pub fn with_scene(mut self, scene: &Value) -> Self {
        let rendered = serde_json::to_string_pretty(scene).unwrap_or_else(|_| scene.to_string());
        self.scene_json = Some(truncate(rendered));
        self
    }

    /// Build the final prompt
    pub fn build(self) -> String {
        let mut prompt = String::new();

        if let Some(scene) = self.scene_json {
            prompt.push_str("## Scene Data\n\n");
            prompt.push_str("```json\n");
            prompt.push_str(&scene);
            prompt.push_str("\n```\n\n");
        }

        prompt.push_str("## Request\n\n");
        prompt.push_str(
            "Please analyze the scene above and suggest improvements. \
             Format your response as a bulleted list of specific, actionable suggestions.",
        );

        prompt
    }

    pub fn system_prompt() -> &'static str {
        SCENE_REVIEW_SYSTEM_PROMPT
    }
}

fn truncate(mut rendered: String) -> String {
    if rendered.len() <= MAX_SCENE_SIZE {
        return rendered;
    }
    let mut cut = MAX_SCENE_SIZE;
    while !rendered.is_char_boundary(cut) {
        cut -= 1;
    }
    rendered.truncate(cut);
    rendered.push_str("\n... [truncated]");
    rendered
}
