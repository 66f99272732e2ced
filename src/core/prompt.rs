use crate::domain::model::{SongCategory, INTERNATIONAL_SONG_COUNT, KOREAN_SONG_COUNT, TOTAL_SONG_COUNT};
use serde_json::{json, Value};

/// Builds the instruction sent to the model. The theme is embedded verbatim.
pub fn build_prompt(theme: &str) -> String {
    format!(
        r#"
Recommend exactly {total} songs suitable for a commute (subway or bus) based on this theme/genre: "{theme}".
Requirement:
1. Exactly {korean} songs must be Korean (K-Pop, K-Indie, K-Ballad, etc.).
2. Exactly {international} songs must be International (Pop, Rock, Jazz, etc.).
3. The reasoning should be concise and in Korean, explaining why it's good for a commute.
4. Provide the response in JSON format.
"#,
        total = TOTAL_SONG_COUNT,
        korean = KOREAN_SONG_COUNT,
        international = INTERNATIONAL_SONG_COUNT,
        theme = theme,
    )
}

/// `responseSchema` for Gemini structured output.
pub fn response_schema() -> Value {
    let categories: Vec<&str> = SongCategory::ALL.iter().map(|c| c.as_str()).collect();

    json!({
        "type": "OBJECT",
        "properties": {
            "recommendations": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING", "description": "Song title" },
                        "artist": { "type": "STRING", "description": "Artist name" },
                        "category": {
                            "type": "STRING",
                            "enum": categories,
                            "description": "Category of the song"
                        },
                        "reason": {
                            "type": "STRING",
                            "description": "Why this song is recommended for the commute"
                        }
                    },
                    "required": ["title", "artist", "category", "reason"]
                }
            }
        },
        "required": ["recommendations"]
    })
}
