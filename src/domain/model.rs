use serde::{Deserialize, Serialize};
use std::fmt;

/// Themes submitted with a single tap.
pub const PRESET_THEMES: [&str; 6] = [
    "활기찬 아침",
    "비 오는 날 차분한 감성",
    "도시적인 시티팝",
    "지친 퇴근길 위로",
    "집중하기 좋은 로파이",
    "신나는 댄스곡",
];

pub const KOREAN_SONG_COUNT: usize = 5;
pub const INTERNATIONAL_SONG_COUNT: usize = 2;
pub const TOTAL_SONG_COUNT: usize = KOREAN_SONG_COUNT + INTERNATIONAL_SONG_COUNT;

/// Looks up a preset by its 1-based position as shown to the user.
pub fn preset_by_number(number: usize) -> Option<&'static str> {
    number
        .checked_sub(1)
        .and_then(|idx| PRESET_THEMES.get(idx))
        .copied()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SongCategory {
    Korean,
    International,
}

impl SongCategory {
    pub const ALL: [SongCategory; 2] = [SongCategory::Korean, SongCategory::International];

    /// Wire value, also used in the response schema enum.
    pub fn as_str(&self) -> &'static str {
        match self {
            SongCategory::Korean => "Korean",
            SongCategory::International => "International",
        }
    }

    /// Label shown on the card badge.
    pub fn label(&self) -> &'static str {
        match self {
            SongCategory::Korean => "국내",
            SongCategory::International => "해외",
        }
    }
}

impl fmt::Display for SongCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongRecommendation {
    pub title: String,
    pub artist: String,
    pub category: SongCategory,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub recommendations: Vec<SongRecommendation>,
}

impl RecommendationResponse {
    pub fn len(&self) -> usize {
        self.recommendations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recommendations.is_empty()
    }

    pub fn count_of(&self, category: SongCategory) -> usize {
        self.recommendations
            .iter()
            .filter(|song| song.category == category)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_wire_format() {
        let json = serde_json::to_string(&SongCategory::International).unwrap();
        assert_eq!(json, "\"International\"");

        let parsed: SongCategory = serde_json::from_str("\"Korean\"").unwrap();
        assert_eq!(parsed, SongCategory::Korean);

        assert!(serde_json::from_str::<SongCategory>("\"korean\"").is_err());
    }

    #[test]
    fn test_preset_lookup_is_one_based() {
        assert_eq!(preset_by_number(1), Some("활기찬 아침"));
        assert_eq!(preset_by_number(6), Some("신나는 댄스곡"));
        assert_eq!(preset_by_number(0), None);
        assert_eq!(preset_by_number(7), None);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let song = SongRecommendation {
            title: "Hype Boy".to_string(),
            artist: "NewJeans".to_string(),
            category: SongCategory::Korean,
            reason: "가볍게 듣기 좋아요".to_string(),
        };
        let response = RecommendationResponse {
            recommendations: vec![song.clone(), song],
        };
        assert_eq!(response.len(), 2);
        assert_eq!(response.count_of(SongCategory::Korean), 2);
        assert_eq!(response.count_of(SongCategory::International), 0);
    }
}
