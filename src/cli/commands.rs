//! Command implementations for the dragonsave CLI.
//!
//! Commands:
//! - save / update: write progress for a user
//! - load: decrypt and print progress
//! - exists / key: inspect the save directory
//! - init: write a config file

use super::ProgressInput;
use anyhow::{bail, Context, Result};
use colored::Colorize;
use dragonsave::config::default_config_path;
use dragonsave::{Config, Payload, SaveRepository};
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

/// Load config from an explicit path, the default path, or defaults; then apply
/// the --base-dir override.
pub fn resolve_config(config_path: Option<&Path>, base_dir: Option<&Path>) -> Result<Config> {
    let mut config = match config_path {
        Some(path) => Config::load(path)?,
        None => Config::load_default()?,
    };
    if let Some(dir) = base_dir {
        config.base_dir = dir.to_path_buf();
    }
    tracing::debug!("Using base directory {}", config.base_dir.display());
    Ok(config)
}

/// Password from a hidden prompt, or one line of stdin
fn read_password(from_stdin: bool) -> Result<String> {
    if from_stdin {
        let mut line = String::new();
        io::stdin()
            .lock()
            .read_line(&mut line)
            .context("Cannot read password from stdin")?;
        return Ok(line.trim_end_matches(['\r', '\n']).to_string());
    }
    rpassword::prompt_password("Password: ").context("Cannot read password")
}

fn parse_progress(input: &ProgressInput) -> Result<Payload> {
    match (&input.json, &input.file) {
        (Some(json), None) => serde_json::from_str(json).context("Progress is not valid JSON"),
        (None, Some(path)) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Cannot read progress file: {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Progress file is not valid JSON: {}", path.display()))
        }
        _ => bail!("Provide progress either inline or with --file"),
    }
}

pub fn save(
    config: &Config,
    username: &str,
    input: &ProgressInput,
    password_stdin: bool,
) -> Result<()> {
    let progress = parse_progress(input)?;
    let repo = SaveRepository::from_config(config)?;
    let password = read_password(password_stdin)?;

    repo.save(username, &password, &progress)?;

    println!(
        "{} Saved progress for {} to {}",
        "✓".green(),
        username.bold(),
        repo.save_path(username)?.display()
    );
    Ok(())
}

pub fn update(
    config: &Config,
    username: &str,
    input: &ProgressInput,
    password_stdin: bool,
) -> Result<()> {
    let progress = parse_progress(input)?;
    let repo = SaveRepository::from_config(config)?;
    let password = read_password(password_stdin)?;

    repo.update_progress(username, &password, &progress)?;

    println!("{} Updated progress for {}", "✓".green(), username.bold());
    Ok(())
}

pub fn load(config: &Config, username: &str, pretty: bool, password_stdin: bool) -> Result<()> {
    let repo = SaveRepository::from_config(config)?;
    let password = read_password(password_stdin)?;

    let progress = repo.load(username, &password)?;

    let output = if pretty {
        serde_json::to_string_pretty(&progress)?
    } else {
        serde_json::to_string(&progress)?
    };
    println!("{}", output);
    Ok(())
}

pub fn exists(config: &Config, username: &str) -> Result<()> {
    let repo = SaveRepository::from_config(config)?;

    if repo.exists(username)? {
        println!("{} Save found for {}", "✓".green(), username.bold());
    } else {
        println!("{} No save for {}", "✗".yellow(), username.bold());
    }
    Ok(())
}

pub fn key(config: &Config) -> Result<()> {
    let repo = SaveRepository::from_config(config)?;
    let store = repo.key_store();

    let existed = store.exists();
    store.get_or_create_key()?;

    if existed {
        println!("{} Key: {}", "✓".green(), store.path().display());
    } else {
        println!("{} Generated new key: {}", "✓".green(), store.path().display());
        println!(
            "  {}",
            "Back this file up. Losing it makes every save unreadable.".yellow()
        );
    }
    Ok(())
}

/// Write `config` to `path` (default config path if none), refusing to replace
/// an existing file unless `force` is set.
pub fn init(config: &Config, path: Option<&Path>, force: bool) -> Result<PathBuf> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if path.exists() && !force {
        bail!(
            "Config file already exists: {} (use --force to overwrite)",
            path.display()
        );
    }

    config.save(&path)?;
    println!("{} Wrote config to {}", "✓".green(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_parse_inline_progress() -> Result<()> {
        let input = ProgressInput {
            json: Some(r#"{"level": 3, "gold": 120}"#.to_string()),
            file: None,
        };
        assert_eq!(parse_progress(&input)?, json!({"level": 3, "gold": 120}));
        Ok(())
    }

    #[test]
    fn test_parse_progress_file() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("progress.json");
        std::fs::write(&path, r#"{"wave": 5, "inventory": []}"#)?;

        let input = ProgressInput {
            json: None,
            file: Some(path),
        };
        assert_eq!(parse_progress(&input)?, json!({"wave": 5, "inventory": []}));
        Ok(())
    }

    #[test]
    fn test_parse_invalid_json() {
        let input = ProgressInput {
            json: Some("{level: 3".to_string()),
            file: None,
        };
        assert!(parse_progress(&input).is_err());
    }

    #[test]
    fn test_init_writes_config_once() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("conf").join("dragonsave.toml");
        let config = Config::with_base_dir(temp_dir.path().join("saves"));

        let written = init(&config, Some(&config_path), false)?;
        assert_eq!(written, config_path);
        assert_eq!(Config::load(&config_path)?.base_dir, temp_dir.path().join("saves"));

        assert!(init(&config, Some(&config_path), false).is_err());
        init(&config, Some(&config_path), true)?;
        Ok(())
    }

    #[test]
    fn test_base_dir_override() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("dragonsave.toml");
        Config::with_base_dir(temp_dir.path().join("from-config")).save(&config_path)?;

        let config = resolve_config(Some(&config_path), None)?;
        assert_eq!(config.base_dir, temp_dir.path().join("from-config"));

        let override_dir = temp_dir.path().join("override");
        let config = resolve_config(Some(&config_path), Some(&override_dir))?;
        assert_eq!(config.base_dir, override_dir);
        Ok(())
    }
}
