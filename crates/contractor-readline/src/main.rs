use std::borrow::Cow::{self, Borrowed, Owned};
use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Parser;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use contractor_application::{ContractorServices, Reply};
use contractor_core::contract::DocumentRole;
use contractor_infrastructure::ConfigService;

mod command;

use command::{AdminAction, COMMANDS, Command};

#[derive(Parser)]
#[command(name = "contractor")]
#[command(about = "Contractor - fill in contract forms and generate documents", long_about = None)]
struct Cli {
    /// Conversation identity; records and admin rights are tied to it
    #[arg(long, default_value_t = 1)]
    user_id: i64,

    /// Config file (defaults to ~/.config/contractor/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("contractor=info")),
        )
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn print_reply(reply: Reply) {
    match reply {
        Reply::Prompt(text) => {
            for line in text.lines() {
                println!("{}", line.bright_blue());
            }
        }
        Reply::Documents(documents) => {
            println!("{}", "✅ Документы сформированы:".bright_green());
            for document in documents {
                let label = match document.role {
                    DocumentRole::Primary => "договор",
                    DocumentRole::Assignment => "поручение",
                    DocumentRole::Report => "акт отчета",
                };
                println!("  {} {}", format!("[{}]", label).green(), document.location);
            }
            println!("{}", "Для создания нового договора используйте /start".bright_black());
        }
        Reply::Error(text) => {
            println!("{}", format!("❌ {}", text).red());
        }
    }
}

/// Runs one admin action and turns its outcome into a reply.
async fn admin_reply(services: &ContractorServices, user_id: i64, action: AdminAction) -> Reply {
    let result = match action {
        AdminAction::Stats => services.admin.stats(user_id).await.map(|s| s.to_string()),
        AdminAction::Templates => services.admin.templates(user_id).await.map(|names| {
            if names.is_empty() {
                "📁 Шаблоны не найдены".to_string()
            } else {
                let list: Vec<String> = names.iter().map(|n| format!("• {}", n)).collect();
                format!("📁 Шаблоны документов:\n\n{}", list.join("\n"))
            }
        }),
        AdminAction::Cleanup => services
            .admin
            .cleanup_output(user_id)
            .await
            .map(|removed| format!("🗑️ Удалено файлов: {}", removed)),
    };

    match result {
        Ok(text) => Reply::Prompt(text),
        Err(e) => Reply::Error(e.to_string()),
    }
}

/// The REPL stands in for a chat transport: one user, one line per event.
#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config_service = match cli.config {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new(),
    };
    let config = config_service
        .get_config()
        .context("Failed to load configuration")?;
    tracing::info!(
        templates_dir = %config.templates_dir.display(),
        output_dir = %config.output_dir.display(),
        "Contractor starting"
    );

    let services = ContractorServices::from_config(&config);
    let user_id = cli.user_id;

    // ===== REPL Setup =====
    let mut rl = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    println!("{}", "=== Contractor ===".bright_magenta().bold());
    println!(
        "{}",
        "Type '/start' to create a contract, '/help' for help, or 'quit' to exit.".bright_black()
    );
    println!();

    // ===== Main REPL Loop =====
    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                let reply = match Command::parse(trimmed) {
                    Command::Quit => {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                    Command::Start => services.forms.begin(user_id).await,
                    Command::SelectType(tag) => services.forms.select_type(user_id, &tag).await,
                    Command::Cancel => services.forms.cancel(user_id).await,
                    Command::MyContracts => services.forms.my_contracts(user_id).await,
                    Command::Help => services.forms.help(),
                    Command::Admin(action) => admin_reply(&services, user_id, action).await,
                    Command::Answer(text) => services.forms.answer(user_id, &text).await,
                    Command::Unknown(input) => {
                        println!("{}", format!("Unknown command: {}", input).bright_black());
                        continue;
                    }
                };
                print_reply(reply);
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    Ok(())
}
