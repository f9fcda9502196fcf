use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use taskline_core::config::{load_config, write_config, TasklineConfig};
use taskline_core::{Reply, Taskline, TasklineError};

mod logging;

#[derive(Parser)]
#[command(name = "taskline", version, about = "Taskline - Simple CLI To-Do Manager")]
struct Cli {
    /// Store file to use instead of the configured one
    #[arg(long, global = true)]
    store: Option<PathBuf>,
    /// Do not take the advisory store lock
    #[arg(long, global = true)]
    no_lock: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Create a new list (single token, no spaces)
    New { list: String },
    /// Add a task; everything after the list name is the task text
    Add {
        list: String,
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        task: Vec<String>,
    },
    /// Show tasks in a list
    Ls { list: String },
    /// Show all lists
    Lists,
    /// Remove a task by number
    Rm {
        list: String,
        #[arg(allow_negative_numbers = true)]
        num: String,
    },
    /// Delete an entire list
    Del { list: String },
    /// Mark a task as done
    Done {
        list: String,
        #[arg(allow_negative_numbers = true)]
        num: String,
    },
    /// Show effective settings
    Config {
        /// Persist the effective settings to .taskline.toml
        #[arg(long)]
        write: bool,
    },
    /// About Taskline (Portuguese by default, pass 'en' for English)
    About { lang: Option<String> },
    /// Print version information
    Version,
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let root = std::env::current_dir().context("resolve working directory")?;
    let mut config = load_config(&root).context("load .taskline.toml")?;
    if let Some(store) = &cli.store {
        config.store_file = Some(store.to_string_lossy().to_string());
    }
    if cli.no_lock {
        config.lock = Some(false);
    }
    let app = Taskline::from_config(&root, &config);
    // `del` on a missing list is a warning, unlike the other lookups.
    let missing_list_is_warning = matches!(command, Command::Del { .. });

    let reply = match command {
        Command::New { list } => app.create_list(&list),
        Command::Add { list, task } => app.add_task(&list, &task.join(" ")),
        Command::Ls { list } => app.list_tasks(&list),
        Command::Lists => app.list_all_lists(),
        Command::Rm { list, num } => app.remove_task(&list, &num),
        Command::Del { list } => app.delete_list(&list),
        Command::Done { list, num } => app.mark_done(&list, &num),
        Command::Config { write } => {
            print_config(&root, &config, app.store().path(), write)?;
            return Ok(());
        }
        Command::About { lang } => {
            print_about(lang.as_deref() == Some("en"));
            return Ok(());
        }
        Command::Version => {
            println!("taskline {}", taskline_core::version());
            return Ok(());
        }
    };
    print_reply(&reply, missing_list_is_warning);
    Ok(())
}

fn print_reply(reply: &Reply, missing_list_is_warning: bool) {
    for notice in &reply.notices {
        println!("{} {}", notice.tag(), notice.message());
    }
    match &reply.outcome {
        Ok(body) => {
            for line in body.lines() {
                println!("{line}");
            }
        }
        Err(err) => println!("{} {}", error_tag(err, missing_list_is_warning), err),
    }
}

fn error_tag(err: &TasklineError, missing_list_is_warning: bool) -> &'static str {
    let missing_list = matches!(err, TasklineError::NotFound(_));
    if err.is_usage() || (missing_list && missing_list_is_warning) {
        "[WARN]"
    } else {
        "[ERROR]"
    }
}

fn print_config(
    root: &std::path::Path,
    config: &TasklineConfig,
    store_path: &std::path::Path,
    write: bool,
) -> Result<()> {
    println!("store_file = {}", store_path.display());
    println!("lock = {}", config.lock_enabled());
    if write {
        let path = write_config(root, config).context("write .taskline.toml")?;
        println!("[OK] Wrote {}", path.display());
    }
    Ok(())
}

fn print_about(english: bool) {
    if english {
        println!("Taskline {} - About", taskline_core::version());
        println!("Taskline is a simple, local-first CLI task manager.");
        println!("It stores data in ./tasks.json and is free & open-source.");
        println!("Features: lists, tasks, remove, done, JSON storage.");
    } else {
        println!("Taskline {} - Sobre", taskline_core::version());
        println!("Taskline é um gerenciador de tarefas simples para terminal.");
        println!("Armazenamento local em ./tasks.json. Livre e Open Source.");
        println!("Funcionalidades: listas, adicionar, remover, concluir, armazenamento em JSON.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn add_joins_remaining_tokens() {
        let cli = Cli::parse_from(["taskline", "add", "work", "buy", "oat", "milk"]);
        match cli.command {
            Some(Command::Add { list, task }) => {
                assert_eq!(list, "work");
                assert_eq!(task.join(" "), "buy oat milk");
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn negative_numbers_reach_the_core() {
        let cli = Cli::parse_from(["taskline", "rm", "work", "-1"]);
        assert!(matches!(cli.command, Some(Command::Rm { num, .. }) if num == "-1"));
    }

    #[test]
    fn usage_errors_are_warnings() {
        assert_eq!(
            error_tag(&TasklineError::AlreadyExists("w".to_string()), false),
            "[WARN]"
        );
        assert_eq!(
            error_tag(&TasklineError::NotFound("w".to_string()), false),
            "[ERROR]"
        );
        assert_eq!(
            error_tag(&TasklineError::NotFound("w".to_string()), true),
            "[WARN]"
        );
    }
}
