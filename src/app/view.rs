use crate::app::card::SongCard;
use crate::app::shell::{AppShell, View};
use crate::domain::model::{PRESET_THEMES, TOTAL_SONG_COUNT};
use crate::utils::error::Result;
use chrono::{Datelike, NaiveDate};
use std::io::Write;

const RULE: &str = "────────────────────────────────────────────";
const SKELETON_ROW: &str = "  ░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░";

/// Formats a date as the header shows it, e.g. `2026년 10월 18일`.
pub fn korean_date(date: NaiveDate) -> String {
    format!("{}년 {}월 {}일", date.year(), date.month(), date.day())
}

pub fn render_header<W: Write>(out: &mut W, today: NaiveDate) -> Result<()> {
    writeln!(out, "♪ Commute Beats                {}", korean_date(today))?;
    writeln!(out, "{}", RULE)?;
    writeln!(out, "오늘의 출퇴근을 위한 완벽한 {}곡", TOTAL_SONG_COUNT)?;
    writeln!(
        out,
        "원하시는 음악 테마나 장르를 말씀해주세요. 국내 5곡, 해외 2곡을 엄선해드립니다."
    )?;
    writeln!(out)?;
    render_presets(out)
}

pub fn render_presets<W: Write>(out: &mut W) -> Result<()> {
    let chips: Vec<String> = PRESET_THEMES
        .iter()
        .enumerate()
        .map(|(i, preset)| format!("/{} {}", i + 1, preset))
        .collect();
    writeln!(out, "프리셋: {}", chips.join("  "))?;
    Ok(())
}

/// Renders whichever of the four views the shell is in.
pub fn render_view<W: Write>(out: &mut W, shell: &AppShell, search_base: &str) -> Result<()> {
    writeln!(out, "{}", RULE)?;
    match shell.view() {
        View::Idle => {
            writeln!(out, "어떤 음악을 듣고 싶으신가요?")?;
            writeln!(
                out,
                "위의 입력창에 테마를 입력하거나 프리셋 버튼을 눌러보세요."
            )?;
        }
        View::Loading => {
            writeln!(out, "검색 중...")?;
            for _ in 0..TOTAL_SONG_COUNT {
                writeln!(out, "{}", SKELETON_ROW)?;
            }
        }
        View::Error(message) => {
            writeln!(out, "⚠ {}", message)?;
        }
        View::Results(songs) if songs.is_empty() => {
            writeln!(out, "추천 결과가 없습니다. /again 으로 다시 시도해보세요.")?;
        }
        View::Results(songs) => {
            writeln!(out, "추천 리스트  (/again 재추천 받기)")?;
            for (index, song) in songs.iter().enumerate() {
                writeln!(out)?;
                writeln!(out, "{}", SongCard::new(song, index, search_base)?)?;
            }
        }
    }
    out.flush()?;
    Ok(())
}
