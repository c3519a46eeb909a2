//! MTSSBJ dashboard client
//!
//! Terminal front end: logs in, keeps the session on disk and prints the
//! dashboard, calendar and menu.

use mtssbj_client::core::config::{CliArgs, Command, Config};
use mtssbj_client::core::{ErrorSummary, Logger};
use mtssbj_client::views::{route, CalendarView, LoginForm, MainPage, Route, SideMenu, View};
use mtssbj_client::AppContext;

use anyhow::{bail, Result};
use clap::Parser;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();

    // Load configuration (handles CLI args, env vars, and config file)
    let config = match Config::load(&args) {
        Ok(cfg) => cfg,
        Err(e) => {
            // Print error to stderr since logging isn't initialized yet
            eprintln!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let _logger = match Logger::init(&config.logging) {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            return Err(e);
        }
    };

    info!("Starting MTSSBJ client v{}", mtssbj_client::VERSION);
    info!(base_url = %config.api.base_url, api_prefix = %config.api.api_prefix, "API configuration");

    let app = AppContext::from_config(&config)?;

    match args.command {
        Command::Login { username, password } => {
            let mut form = LoginForm::new(username, password);
            if !form.submit(&app.session).await {
                print_lines(&form.render());
                bail!("login failed");
            }
            println!("Logged in as {}", app.session.username().await.unwrap_or_default());
        }
        Command::Logout => {
            app.session.logout().await;
            println!("Logged out");
        }
        Command::Status => {
            let authenticated = app.session.check_auth().await;
            let state = serde_json::to_string(&app.session.state().await)?;
            match route(authenticated, "/") {
                Route::Main => println!(
                    "Session {}: {} ({})",
                    state.trim_matches('"'),
                    app.session.username().await.unwrap_or_default(),
                    app.session.role().await.unwrap_or_else(|| "no role".to_string())
                ),
                _ => println!("Session {}: not logged in", state.trim_matches('"')),
            }
        }
        Command::Dashboard { keyword } => {
            require_session(&app).await?;
            let mut page = MainPage::new(app.session.username().await);
            page.load(&app.dashboard).await;
            if let Some(keyword) = keyword.filter(|k| !k.is_empty()) {
                page.set_search_keyword(keyword);
                page.search(&app.dashboard).await;
            }
            print_lines(&page.render());
        }
        Command::Calendar { date } => {
            require_session(&app).await?;
            let mut view = CalendarView::default();
            match date {
                Some(date) => view.change_week(&app.dashboard, &date).await,
                None => match app.dashboard.fetch_calendar_data(None).await {
                    Ok(data) => view.set_data(data),
                    Err(e) => bail!("{}", ErrorSummary::from_error(&e)),
                },
            }
            print_lines(&view.render());
        }
        Command::Menu { expand_all } => {
            require_session(&app).await?;
            let mut menu = SideMenu::new();
            menu.load(&app.dashboard).await;
            if expand_all {
                menu.expand_all();
            }
            print_lines(&menu.render());
        }
    }

    Ok(())
}

/// Data commands need a session; without one the user is sent to login
async fn require_session(app: &AppContext) -> Result<()> {
    let authenticated = app.session.check_auth().await;
    if let Route::Redirect(target) = route(authenticated, "/") {
        bail!("not logged in (go to {}); run `mtssbj login --username <name> --password <password>`", target);
    }
    Ok(())
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}
