use clap::Parser;
use commute_beats::app::session::Session;
use commute_beats::app::view::{render_header, render_view};
use commute_beats::domain::model::preset_by_number;
use commute_beats::utils::error::{ErrorSeverity, RecoError};
use commute_beats::utils::{logger, validation::Validate};
use commute_beats::{AppShell, CliConfig, ConfigProvider, GeminiClient, TomlConfig};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting commute-beats");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let result = match config.config.clone() {
        Some(path) => match TomlConfig::from_file(&path) {
            Ok(mut file_config) => {
                tracing::info!("📄 Using config file {}", path.display());
                file_config.apply_overrides(config.search_base.as_deref(), config.lenient);
                run(file_config, &config).await
            }
            Err(e) => Err(e),
        },
        None => run(config.clone(), &config).await,
    };

    if let Ok(false) = result {
        std::process::exit(2);
    }

    if let Err(e) = result {
        tracing::error!(
            "❌ {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

/// Returns `false` when the one-shot search ended in the error view.
async fn run<C>(provider_config: C, cli: &CliConfig) -> Result<bool, RecoError>
where
    C: ConfigProvider + Validate + 'static,
{
    provider_config.validate()?;

    let search_base = provider_config.search_base().to_string();
    let client = GeminiClient::new(provider_config);

    let mut stdout = std::io::stdout();
    render_header(&mut stdout, chrono::Local::now().date_naive())?;

    let one_shot = match (&cli.theme, cli.preset) {
        (Some(theme), _) => Some(theme.clone()),
        (None, Some(number)) => preset_by_number(number as usize).map(str::to_string),
        (None, None) => None,
    };

    let Some(theme) = one_shot else {
        let mut session = Session::new(Arc::new(client), search_base, stdout);
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        session.run(stdin).await?;
        return Ok(true);
    };

    let mut shell = AppShell::new();
    let submission = if cli.preset.is_some() {
        shell.select_preset(&theme)
    } else {
        shell.set_theme(theme);
        shell.submit()
    };

    if let Some(submission) = submission {
        render_view(&mut stdout, &shell, &search_base)?;
        shell.fetch(&client, submission).await;
    }
    render_view(&mut stdout, &shell, &search_base)?;

    // the failure is already on screen as the error view
    Ok(shell.error().is_none())
}
