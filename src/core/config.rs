use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use std::process::Command;

pub struct ConfigLogic;

impl ConfigLogic {
    pub fn print(cfg: &Config) -> AppResult<()> {
        println!("📄 Current configuration ({}):\n", Config::config_file().display());
        println!("{}", cfg.to_yaml()?);
        Ok(())
    }

    /// Open the configuration file in `editor`, falling back to $EDITOR /
    /// $VISUAL and finally to the platform default.
    pub fn edit(editor: &Option<String>) -> AppResult<()> {
        let path = Config::config_file();
        if !path.exists() {
            return Err(AppError::Config(format!(
                "{} does not exist, run `lapchart init` first",
                path.display()
            )));
        }

        let default_editor = std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| {
                if cfg!(target_os = "windows") {
                    "notepad".to_string()
                } else {
                    "nano".to_string()
                }
            });

        let editor_to_use = editor.clone().unwrap_or_else(|| default_editor.clone());

        match Command::new(&editor_to_use).arg(&path).status() {
            Ok(s) if s.success() => {
                success(format!("Configuration edited with '{}'", editor_to_use));
                Ok(())
            }
            _ if editor_to_use != default_editor => {
                warning(format!(
                    "Editor '{}' not available, falling back to '{}'",
                    editor_to_use, default_editor
                ));
                let status = Command::new(&default_editor)
                    .arg(&path)
                    .status()
                    .map_err(|e| AppError::Config(e.to_string()))?;
                if status.success() {
                    success(format!("Configuration edited with '{}'", default_editor));
                    Ok(())
                } else {
                    Err(AppError::Config(format!("editor '{}' failed", default_editor)))
                }
            }
            _ => Err(AppError::Config(format!("editor '{}' failed", editor_to_use))),
        }
    }
}
