use crate::config::Config;
use crate::errors::{AppError, AppResult};

use crate::cli::parser::Commands;
use std::process::Command;

fn default_editor() -> String {
    std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(target_os = "windows") {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        })
}

/// Run `editor` on `path`; true when it exited successfully.
fn run_editor(editor: &str, path: &std::path::Path) -> bool {
    matches!(Command::new(editor).arg(path).status(), Ok(s) if s.success())
}

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        edit_config,
        editor,
    } = cmd
    {
        let path = Config::config_file();

        // ---- PRINT CONFIG ----
        if *print_config {
            let yaml = serde_yaml::to_string(cfg).map_err(|e| AppError::Config(e.to_string()))?;
            println!("📄 Current configuration ({}):\n", path.display());
            println!("{}", yaml);
        }

        // ---- EDIT CONFIG ----
        if *edit_config {
            let fallback = default_editor();
            let requested = editor.clone().unwrap_or_else(|| fallback.clone());

            if run_editor(&requested, &path) {
                println!("✅ Configuration file edited successfully using '{}'", requested);
            } else {
                eprintln!(
                    "⚠️  Editor '{}' not available, falling back to '{}'",
                    requested, fallback
                );
                if run_editor(&fallback, &path) {
                    println!(
                        "✅ Configuration file edited successfully using fallback '{}'",
                        fallback
                    );
                } else {
                    return Err(AppError::Config(format!(
                        "failed to edit {} with '{}'",
                        path.display(),
                        fallback
                    )));
                }
            }
        }
    }

    Ok(())
}
