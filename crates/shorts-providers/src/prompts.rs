//! Prompt templates sent to the text model.

use crate::traits::PromptStyle;

/// Number of scenes requested in a storyboard batch.
pub const STORYBOARD_SCENES: usize = 5;

/// Build the prompt for a narration script.
pub fn build_script_prompt(topic: &str, language: &str) -> String {
    format!(
        r#"Write the narration for a YouTube Short. It should be roughly 60 to 80 words, tell something genuinely interesting about the topic below, and open with a catchy hook such as "Did you know that?" or "This will blow your mind". The text will be read aloud as a voiceover, so leave out hashtags, emojis and stage directions.

Topic: "{topic}"

IMPORTANT: write the script in {language}. Return only the voiceover text, with no title and no meta information."#
    )
}

/// Build the prompt for a single background prompt derived from a script.
pub fn build_segment_prompt(script: &str) -> String {
    format!(
        "I am producing a YouTube Short from the script below and need a background visual for it, made with a text-to-image model. Write one short prompt for that model (a single sentence at most) that fits the script: {script}\n\nReturn the prompt and nothing else."
    )
}

/// Build the prompt for a batch of sequential scene prompts.
pub fn build_storyboard_prompt(script: &str, topic: &str, style: PromptStyle) -> String {
    match style {
        PromptStyle::Video => format!(
            r#"You are a cinematographer who writes prompts for AI video models used in premium commercial work.

Write {STORYBOARD_SCENES} distinct, sequential VIDEO prompts for a short video about "{topic}".

Script: "{script}"

Split the script into {STORYBOARD_SCENES} scenes in chronological order. Every prompt must follow this structure and focus on motion and visuals:

"A cinematic vertical video shot (Ratio 9:16) in 4k resolution. [environment and lighting]. Camera movement is [slow pan, drone shot, dolly in, ...]. The action shows [subject and its movement]. High production value, hyper-realistic, detailed textures."

Reply with a JSON array of strings only, like ["Prompt 1...", "Prompt 2...", ...]. No markdown code fences."#
        ),
        PromptStyle::Image => format!(
            r#"You are an art director who writes prompts for hyper-realistic commercial photography generated by AI image models.

Write {STORYBOARD_SCENES} distinct, sequential image prompts for a short video about "{topic}".

Script: "{script}"

Split the script into {STORYBOARD_SCENES} scenes in chronological order. Every prompt must follow this structure, adapting the subject to its scene:

"A hyper-realistic vertical lifestyle photo (Ratio 4:5, 1080x1350) shot with directional soft light in a [environment]. Captured on a high-end mirrorless camera with a 50 mm lens at f/2.0. The camera is positioned [angle], giving the subject a quiet sense of confidence. The subject is [subject and action in detail]."

Reply with a JSON array of strings only, like ["Prompt 1...", "Prompt 2...", ...]. No markdown code fences."#
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_prompt_mentions_topic_and_language() {
        let prompt = build_script_prompt("hydration", "Portuguese (Brazil)");
        assert!(prompt.contains("\"hydration\""));
        assert!(prompt.contains("Portuguese (Brazil)"));
    }

    #[test]
    fn test_segment_prompt_embeds_script() {
        let prompt = build_segment_prompt("Water is essential.");
        assert!(prompt.contains("Water is essential."));
    }

    #[test]
    fn test_storyboard_styles_differ() {
        let video = build_storyboard_prompt("s", "t", PromptStyle::Video);
        let image = build_storyboard_prompt("s", "t", PromptStyle::Image);
        assert!(video.contains("VIDEO prompts"));
        assert!(video.contains("9:16"));
        assert!(image.contains("4:5"));
        assert!(image.contains("JSON array"));
    }
}
