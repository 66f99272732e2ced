use crate::app::shell::{AppShell, AttemptId, Submission};
use crate::app::view::{render_presets, render_view};
use crate::domain::model::{preset_by_number, RecommendationResponse};
use crate::domain::ports::RecommendationProvider;
use crate::utils::error::Result;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Free text, sent as the theme. Empty text triggers the validation error.
    Submit(String),
    Preset(usize),
    Again,
    Presets,
    Quit,
    Unknown(String),
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(cmd) = line.trim().strip_prefix('/') else {
        return Command::Submit(line.to_string());
    };

    match cmd {
        "again" | "retry" => Command::Again,
        "presets" => Command::Presets,
        "quit" | "exit" | "q" => Command::Quit,
        n => match n.parse::<usize>() {
            Ok(number) if preset_by_number(number).is_some() => Command::Preset(number),
            _ => Command::Unknown(line.trim().to_string()),
        },
    }
}

type Completion = (AttemptId, Result<RecommendationResponse>);

/// Interactive loop. Owns the shell; provider calls run as spawned tasks and
/// report back over a channel, so input keeps flowing while a request is out.
pub struct Session<P, W> {
    shell: AppShell,
    provider: Arc<P>,
    search_base: String,
    out: W,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
}

impl<P, W> Session<P, W>
where
    P: RecommendationProvider + 'static,
    W: Write,
{
    pub fn new(provider: Arc<P>, search_base: impl Into<String>, out: W) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            shell: AppShell::new(),
            provider,
            search_base: search_base.into(),
            out,
            tx,
            rx,
        }
    }

    pub fn shell(&self) -> &AppShell {
        &self.shell
    }

    pub fn into_parts(self) -> (AppShell, W) {
        (self.shell, self.out)
    }

    /// Reads commands until `/quit` or end of input. At end of input any
    /// request still in flight is awaited before returning. A line that is
    /// not valid UTF-8 is logged and skipped.
    pub async fn run<R: AsyncBufRead + Unpin>(&mut self, input: R) -> Result<()> {
        let mut lines = input.split(b'\n');
        let mut input_open = true;

        self.render()?;

        loop {
            if !input_open && !self.shell.is_loading() {
                break;
            }

            tokio::select! {
                line = lines.next_segment(), if input_open => {
                    match line? {
                        Some(bytes) => match String::from_utf8(bytes) {
                            Ok(line) => {
                                if !self.handle(parse_command(&line))? {
                                    break;
                                }
                            }
                            Err(e) => {
                                tracing::warn!("Skipping input line that is not valid UTF-8: {}", e);
                            }
                        },
                        None => {
                            tracing::debug!("Input closed");
                            input_open = false;
                        }
                    }
                }
                Some((attempt, result)) = self.rx.recv() => {
                    if self.shell.complete(attempt, result) {
                        self.render()?;
                    }
                }
            }
        }

        Ok(())
    }

    /// Returns `false` when the session should end.
    fn handle(&mut self, command: Command) -> Result<bool> {
        let submission = match command {
            Command::Submit(theme) => {
                self.shell.set_theme(theme);
                self.shell.submit()
            }
            Command::Preset(number) => match preset_by_number(number) {
                Some(preset) => self.shell.select_preset(preset),
                None => None,
            },
            Command::Again => self.shell.submit(),
            Command::Presets => {
                render_presets(&mut self.out)?;
                return Ok(true);
            }
            Command::Quit => return Ok(false),
            Command::Unknown(raw) => {
                writeln!(self.out, "알 수 없는 명령입니다: {}", raw)?;
                render_presets(&mut self.out)?;
                return Ok(true);
            }
        };

        if let Some(submission) = submission {
            self.spawn(submission);
        }
        self.render()?;
        Ok(true)
    }

    fn spawn(&self, submission: Submission) {
        let provider = Arc::clone(&self.provider);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = provider.recommend(&submission.theme).await;
            // receiver only goes away when the session is dropped
            let _ = tx.send((submission.attempt, result));
        });
    }

    fn render(&mut self) -> Result<()> {
        render_view(&mut self.out, &self.shell, &self.search_base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("시티팝\n"), Command::Submit("시티팝".to_string()));
        assert_eq!(parse_command(""), Command::Submit(String::new()));
        assert_eq!(parse_command("   "), Command::Submit("   ".to_string()));
        assert_eq!(parse_command("/1"), Command::Preset(1));
        assert_eq!(parse_command("/6"), Command::Preset(6));
        assert_eq!(parse_command("/7"), Command::Unknown("/7".to_string()));
        assert_eq!(parse_command("/again"), Command::Again);
        assert_eq!(parse_command("/presets"), Command::Presets);
        assert_eq!(parse_command("/quit"), Command::Quit);
        assert_eq!(parse_command("/dance"), Command::Unknown("/dance".to_string()));
    }
}
