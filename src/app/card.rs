use crate::domain::model::{SongCategory, SongRecommendation};
use crate::utils::error::{RecoError, Result};
use std::fmt;
use url::Url;

/// Video search link for a song: `<base>?search_query=<artist title>`.
pub fn search_url(search_base: &str, song: &SongRecommendation) -> Result<Url> {
    let mut url = Url::parse(search_base).map_err(|e| RecoError::InvalidConfigValueError {
        field: "search_base".to_string(),
        value: search_base.to_string(),
        reason: format!("Invalid URL format: {}", e),
    })?;
    url.query_pairs_mut()
        .append_pair("search_query", &format!("{} {}", song.artist, song.title));
    Ok(url)
}

/// One rendered recommendation. `index` is zero-based; the card shows `#index+1`.
pub struct SongCard<'a> {
    pub song: &'a SongRecommendation,
    pub index: usize,
    pub link: Url,
}

impl<'a> SongCard<'a> {
    pub fn new(song: &'a SongRecommendation, index: usize, search_base: &str) -> Result<Self> {
        Ok(Self {
            song,
            index,
            link: search_url(search_base, song)?,
        })
    }

    fn badge(&self) -> String {
        match self.song.category {
            SongCategory::Korean => format!("[{}]", SongCategory::Korean.label()),
            SongCategory::International => format!("<{}>", SongCategory::International.label()),
        }
    }
}

impl fmt::Display for SongCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} #{}", self.badge(), self.index + 1)?;
        writeln!(f, "  {}", self.song.title)?;
        writeln!(f, "  {}", self.song.artist)?;
        writeln!(f, "  \"{}\"", self.song.reason)?;
        write!(f, "  ▶ YouTube에서 듣기: {}", self.link)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://www.youtube.com/results";

    fn song(artist: &str, title: &str, category: SongCategory) -> SongRecommendation {
        SongRecommendation {
            title: title.to_string(),
            artist: artist.to_string(),
            category,
            reason: "지하철에서 듣기 좋아요".to_string(),
        }
    }

    #[test]
    fn test_search_url_encodes_artist_then_title() {
        let url = search_url(BASE, &song("X", "Y", SongCategory::Korean)).unwrap();

        assert_eq!(url.as_str(), "https://www.youtube.com/results?search_query=X+Y");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs, vec![("search_query".to_string(), "X Y".to_string())]);
    }

    #[test]
    fn test_search_url_escapes_reserved_and_unicode() {
        let url = search_url(BASE, &song("AC/DC & Co", "밤편지?", SongCategory::International))
            .unwrap();

        let query = url.query().unwrap();
        assert!(!query.contains('&'));
        assert!(!query.contains('?'));
        let (_, value) = url.query_pairs().next().unwrap();
        assert_eq!(value, "AC/DC & Co 밤편지?");
    }

    #[test]
    fn test_invalid_base_is_rejected() {
        assert!(search_url("not a url", &song("a", "b", SongCategory::Korean)).is_err());
    }

    #[test]
    fn test_card_shows_category_ordinal_and_link() {
        let korean = song("아이유", "밤편지", SongCategory::Korean);
        let card = SongCard::new(&korean, 0, BASE).unwrap().to_string();
        assert!(card.starts_with("[국내] #1"));
        assert!(card.contains("밤편지"));
        assert!(card.contains("아이유"));
        assert!(card.contains("\"지하철에서 듣기 좋아요\""));
        assert!(card.contains("search_query="));

        let intl = song("Daft Punk", "One More Time", SongCategory::International);
        let card = SongCard::new(&intl, 6, BASE).unwrap().to_string();
        assert!(card.starts_with("<해외> #7"));
    }
}
