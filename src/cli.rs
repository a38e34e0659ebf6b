//! Command-line surface: one subcommand per view.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use inline_colorization::*;

use crate::navigation::Route;
use crate::state::AppState;
use crate::views::email_checker::{self, AnalysisInput};
use crate::views::evaluation::{self, EvaluationForm};
use crate::views::history::{self, HistoryFilter};
use crate::views::login::{self, LoginForm};
use crate::views::profile;
use crate::views::register::{self, RegisterForm};
use crate::views::{dashboard, shell, ValidationError, ViewError};

#[derive(Parser, Debug)]
#[command(name = "phishguard", version, about = "Phishing detection client")]
pub struct Cli {
    /// Path to the YAML configuration file.
    #[arg(long, short, default_value = "./config.yaml", env = "PHISHGUARD_CONFIG")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in with email and password.
    Login(Credentials),
    /// Log in with an access token from Google's OAuth flow.
    LoginGoogle {
        #[arg(long, env = "PHISHGUARD_GOOGLE_ACCESS_TOKEN")]
        access_token: Option<String>,
    },
    /// Create an account.
    Register {
        #[command(flatten)]
        credentials: Credentials,
        #[arg(long, env = "PHISHGUARD_CONFIRM_PASSWORD")]
        confirm_password: String,
    },
    /// Forget the stored session.
    Logout,
    /// Show who the stored access token belongs to.
    Whoami,
    /// Show aggregate statistics.
    Dashboard,
    /// Analyze pasted text or an .eml file.
    Analyze {
        #[arg(long, conflicts_with = "file")]
        text: Option<String>,
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// List past analyses.
    History {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value = "all")]
        filter: HistoryFilter,
    },
    /// Rate the system from 1 to 5 per category.
    Evaluate(Ratings),
    /// Show or change the profile.
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    /// Print the JSON schema of the configuration file.
    PrintSchema,
}

#[derive(Args, Debug)]
pub struct Credentials {
    #[arg(long)]
    pub email: String,
    #[arg(long, env = "PHISHGUARD_PASSWORD")]
    pub password: String,
}

#[derive(Args, Debug)]
pub struct Ratings {
    #[arg(long)]
    pub accuracy: Option<u8>,
    #[arg(long)]
    pub usability: Option<u8>,
    #[arg(long)]
    pub speed: Option<u8>,
    #[arg(long)]
    pub reliability: Option<u8>,
    #[arg(long)]
    pub overall: Option<u8>,
    #[arg(long, default_value = "")]
    pub comments: String,
}

#[derive(Subcommand, Debug)]
pub enum ProfileAction {
    Show,
    Update {
        /// Defaults to the email in the stored access token.
        #[arg(long)]
        email: Option<String>,
        #[arg(long, default_value = "", env = "PHISHGUARD_CURRENT_PASSWORD")]
        current_password: String,
        #[arg(long, default_value = "", env = "PHISHGUARD_NEW_PASSWORD")]
        new_password: String,
        #[arg(long, default_value = "", env = "PHISHGUARD_CONFIRM_PASSWORD")]
        confirm_password: String,
    },
}

/// Exit status for a failed command: 2 for rejected input, 3 when the user
/// has to log in (again), 1 otherwise.
pub fn exit_code(err: &ViewError) -> u8 {
    match err {
        ViewError::Validation(_) => 2,
        ViewError::SessionExpired | ViewError::Redirected(_) => 3,
        _ => 1,
    }
}

/// Human-facing line for a failed command.
pub fn describe(err: &ViewError) -> String {
    match err {
        ViewError::Redirected(Route::Login) => {
            "Not logged in. Run `phishguard login` first.".to_string()
        }
        other => other.to_string(),
    }
}

async fn framed(state: &AppState, route: Route, body: String) {
    let user = state.session.user().await;
    print!("{}", shell::render(route, user.as_ref()));
    println!();
    print!("{}", body);
}

/// Run one command against `state`. Everything printed here goes to stdout.
pub async fn execute(state: &AppState, command: Command) -> Result<(), ViewError> {
    match command {
        Command::Login(credentials) => {
            let form = LoginForm {
                email: credentials.email,
                password: credentials.password,
            };
            let navigation = login::submit(state, &form).await?;
            println!("{color_green}Logged in.{color_reset} Now at {}", navigation.route);
        }
        Command::LoginGoogle { access_token } => {
            let token = match access_token {
                Some(token) => token,
                None => {
                    let hint = state
                        .config
                        .google
                        .client_id
                        .as_deref()
                        .map(|id| format!(" for client id {}", id))
                        .unwrap_or_default();
                    eprintln!("Pass a Google OAuth access token{} with --access-token", hint);
                    return Err(ValidationError::Missing("Google access token").into());
                }
            };
            let navigation = login::submit_google(state, &token).await?;
            println!("{color_green}Logged in with Google.{color_reset} Now at {}", navigation.route);
        }
        Command::Register {
            credentials,
            confirm_password,
        } => {
            let form = RegisterForm {
                email: credentials.email,
                password: credentials.password,
                confirm_password,
            };
            let registered = register::submit(state, &form).await?;
            println!("{}", registered.message);
        }
        Command::Logout => {
            login::logout(state).await?;
            println!("Logged out.");
        }
        Command::Whoami => {
            let authenticated = state.session.is_authenticated().await;
            match state.session.user().await {
                Some(user) => {
                    println!("{}", user.identifier);
                    if let Some(exp) = user.expires_at {
                        let expired = user.is_expired(Utc::now().timestamp());
                        let when = DateTime::<Utc>::from_timestamp(exp, 0)
                            .map(|d| d.format("%Y-%m-%d %H:%M UTC").to_string())
                            .unwrap_or_else(|| exp.to_string());
                        let state_label = if expired { "expired" } else { "expires" };
                        println!("Token {} {}", state_label, when);
                    }
                }
                None if authenticated => {
                    println!("Logged in (identity not readable from the token)");
                }
                None => return Err(ViewError::Redirected(Route::Login)),
            }
        }
        Command::Dashboard => {
            let stats = dashboard::load(state).await?;
            framed(state, Route::Dashboard, dashboard::render(&stats)).await;
        }
        Command::Analyze { text, file } => {
            let report = email_checker::analyze(state, AnalysisInput { text, file }).await?;
            framed(state, Route::EmailChecker, report.render()).await;
        }
        Command::History { search, filter } => {
            let mut view = history::load(state).await?;
            view.search = search;
            view.filter = filter;
            framed(state, Route::EmailHistory, view.render()).await;
        }
        Command::Evaluate(ratings) => {
            let form = EvaluationForm {
                accuracy: ratings.accuracy,
                usability: ratings.usability,
                speed: ratings.speed,
                reliability: ratings.reliability,
                overall: ratings.overall,
                comments: ratings.comments,
            };
            let message = evaluation::submit(state, &form).await?;
            println!("{}", message);
        }
        Command::Profile { action } => match action {
            ProfileAction::Show => {
                let form = profile::show(state).await?;
                let email = if form.email.is_empty() {
                    "(not in token)".to_string()
                } else {
                    form.email
                };
                framed(state, Route::Profile, format!("Email: {}\n", email)).await;
            }
            ProfileAction::Update {
                email,
                current_password,
                new_password,
                confirm_password,
            } => {
                let prefilled = profile::show(state).await?;
                let form = profile::ProfileForm {
                    email: email.unwrap_or(prefilled.email),
                    current_password,
                    new_password,
                    confirm_password,
                };
                let message = profile::update(state, &form).await?;
                println!("{}", message);
            }
        },
        // Handled before any state exists.
        Command::PrintSchema => {}
    }
    Ok(())
}
