use anyhow::Result;
use commute_beats::app::view::render_view;
use commute_beats::utils::error::{EMPTY_THEME_MESSAGE, FETCH_FAILED_MESSAGE};
use commute_beats::{
    AppShell, ConfigProvider, GeminiClient, RecommendationProvider, SongCategory, TomlConfig, View,
};
use httpmock::prelude::*;
use serde_json::json;
use tokio_test::{assert_err, assert_ok};

const FIXTURE: &str = include_str!("fixtures/commute_seven.json");
const GENERATE_PATH: &str = "/v1beta/models/gemini-3-flash-preview:generateContent";

fn envelope(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }],
        "usageMetadata": { "promptTokenCount": 120, "candidatesTokenCount": 480 }
    })
}

fn config_for(server: &MockServer) -> Result<TomlConfig> {
    let toml = format!(
        r#"
[provider]
api_key = "integration-key"
endpoint = "{}"
"#,
        server.url("/v1beta")
    );
    Ok(TomlConfig::from_toml_str(&toml)?)
}

#[tokio::test]
async fn test_seven_song_fixture_renders_seven_cards() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path(GENERATE_PATH)
            .header("x-goog-api-key", "integration-key")
            .body_contains("도시적인 시티팝");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(envelope(FIXTURE));
    });

    let config = config_for(&server)?;
    let search_base = config.search_base().to_string();
    let client = GeminiClient::new(config);

    let mut shell = AppShell::new();
    shell.set_theme("도시적인 시티팝");
    let submission = shell.submit().expect("non-blank theme starts an attempt");
    assert!(shell.is_loading());

    assert!(shell.fetch(&client, submission).await);
    api_mock.assert();

    assert!(!shell.is_loading());
    assert!(shell.error().is_none());
    let songs = shell.recommendations();
    assert_eq!(songs.len(), 7);
    assert_eq!(
        songs.iter().filter(|s| s.category == SongCategory::Korean).count(),
        5
    );
    assert_eq!(
        songs
            .iter()
            .filter(|s| s.category == SongCategory::International)
            .count(),
        2
    );

    let mut out = Vec::new();
    render_view(&mut out, &shell, &search_base)?;
    let text = String::from_utf8(out)?;
    assert_eq!(text.matches("search_query=").count(), 7);
    assert!(text.contains("https://www.youtube.com/results?search_query=NewJeans+Hype+Boy"));
    assert!(text.contains("[국내] #1"));
    assert!(text.contains("<해외> #7"));
    Ok(())
}

#[tokio::test]
async fn test_unparsable_response_keeps_previous_list() -> Result<()> {
    let server = MockServer::start();
    let mut good = server.mock(|when, then| {
        when.method(POST).path(GENERATE_PATH);
        then.status(200).json_body(envelope(FIXTURE));
    });

    let client = GeminiClient::new(config_for(&server)?);
    let mut shell = AppShell::new();

    let first = shell.begin("활기찬 아침").expect("attempt");
    shell.fetch(&client, first).await;
    let before = shell.recommendations().to_vec();
    assert_eq!(before.len(), 7);

    good.delete();
    server.mock(|when, then| {
        when.method(POST).path(GENERATE_PATH);
        then.status(200)
            .json_body(envelope("{\"recommendations\": [ {\"title\": \"unterminated\""));
    });

    let second = shell.begin("신나는 댄스곡").expect("attempt");
    shell.fetch(&client, second).await;

    assert!(!shell.is_loading());
    assert_eq!(shell.error(), Some(FETCH_FAILED_MESSAGE));
    assert_eq!(shell.recommendations(), before.as_slice());
    assert_eq!(shell.view(), View::Error(FETCH_FAILED_MESSAGE));
    Ok(())
}

#[tokio::test]
async fn test_server_error_ends_in_error_view() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path(GENERATE_PATH);
        then.status(500).body("internal");
    });

    let client = GeminiClient::new(config_for(&server)?);
    let mut shell = AppShell::new();
    let submission = shell.begin("지친 퇴근길 위로").expect("attempt");
    shell.fetch(&client, submission).await;

    api_mock.assert_hits(1);
    assert!(!shell.is_loading());
    assert!(shell.recommendations().is_empty());
    assert_eq!(shell.error(), Some(FETCH_FAILED_MESSAGE));
    Ok(())
}

#[tokio::test]
async fn test_blank_themes_never_reach_the_provider() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST);
        then.status(200).json_body(envelope(FIXTURE));
    });

    let client = GeminiClient::new(config_for(&server)?);
    for blank in ["", "   ", "\t\n", " \u{3000} "] {
        let mut shell = AppShell::new();
        shell.set_theme(blank);
        assert!(shell.submit().is_none());
        assert_eq!(shell.error(), Some(EMPTY_THEME_MESSAGE));
        assert!(!shell.is_loading());

        assert_err!(client.recommend(blank).await);
    }

    api_mock.assert_hits(0);
    Ok(())
}

#[tokio::test]
async fn test_same_theme_twice_yields_same_shape() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path(GENERATE_PATH);
        then.status(200).json_body(envelope(FIXTURE));
    });

    let client = GeminiClient::new(config_for(&server)?);
    let first = assert_ok!(client.recommend("집중하기 좋은 로파이").await);
    let second = assert_ok!(client.recommend("집중하기 좋은 로파이").await);

    api_mock.assert_hits(2);
    assert_eq!(first.len(), second.len());
    for category in SongCategory::ALL {
        assert_eq!(first.count_of(category), second.count_of(category));
    }
    assert_eq!(first, second);
    Ok(())
}

#[tokio::test]
async fn test_skewed_split_is_rejected_unless_lenient() -> Result<()> {
    let skewed = json!({
        "recommendations": (1..=7).map(|i| json!({
            "title": format!("곡 {}", i),
            "artist": "가수",
            "category": "Korean",
            "reason": "좋아요"
        })).collect::<Vec<_>>()
    })
    .to_string();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path(GENERATE_PATH);
        then.status(200).json_body(envelope(&skewed));
    });

    let strict = GeminiClient::new(config_for(&server)?);
    let err = assert_err!(strict.recommend("비 오는 날 차분한 감성").await);
    assert!(err.is_fetch_failure());

    let lenient_toml = format!(
        r#"
[provider]
api_key = "integration-key"
endpoint = "{}"

[validation]
strict = false
"#,
        server.url("/v1beta")
    );
    let lenient = GeminiClient::new(TomlConfig::from_toml_str(&lenient_toml)?);
    let response = assert_ok!(lenient.recommend("비 오는 날 차분한 감성").await);
    assert_eq!(response.count_of(SongCategory::Korean), 7);
    Ok(())
}
