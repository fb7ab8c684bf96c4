//! Config subcommand handlers.

use std::fmt::Write as _;
use std::path::Path;

use dialoguer::{Confirm, Input, Select};

use tuyasl_config::{self as config, Config};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::commands;
use crate::error::CliError;
use crate::output;

// ── Helpers ─────────────────────────────────────────────────────────

/// Format config for display, masking the password.
fn format_config_redacted(cfg: &Config) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "country_code = \"{}\"", cfg.country_code);
    if let Some(ref u) = cfg.user_name {
        let _ = writeln!(out, "user_name = \"{u}\"");
    }
    if cfg.password.is_some() {
        let _ = writeln!(out, "password = \"****\"");
    }
    if let Some(ref env) = cfg.password_env {
        let _ = writeln!(out, "password_env = \"{env}\"");
    }
    let _ = writeln!(out, "biz_type = \"{}\"", cfg.biz_type);
    let _ = writeln!(out, "from = \"{}\"", cfg.from);
    let _ = writeln!(out, "timeout_ms = {}", cfg.timeout_ms);
    let _ = writeln!(out, "token_path = \"{}\"", cfg.token_path.display());
    if let Some(ref endpoint) = cfg.endpoint {
        let _ = writeln!(out, "endpoint = \"{endpoint}\"");
    }
    if let Some(ref ca) = cfg.ca_cert {
        let _ = writeln!(out, "ca_cert = \"{}\"", ca.display());
    }

    out.trim_end().to_owned()
}

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn prompt_password() -> Result<String, CliError> {
    let pass = rpassword::prompt_password("Password: ").map_err(prompt_err)?;
    if pass.is_empty() {
        return Err(CliError::Validation {
            field: "password".into(),
            reason: "password cannot be empty".into(),
        });
    }
    Ok(pass)
}

// ── Init ────────────────────────────────────────────────────────────

fn init(path: &Path) -> Result<(), CliError> {
    if path.exists() {
        let overwrite = Confirm::new()
            .with_prompt(format!("{} exists. Overwrite?", path.display()))
            .default(false)
            .interact()
            .map_err(prompt_err)?;
        if !overwrite {
            return Ok(());
        }
    }

    let country_code: String = Input::new()
        .with_prompt("Country code (e.g. IT, US, CN)")
        .interact_text()
        .map_err(prompt_err)?;
    let user_name: String = Input::new()
        .with_prompt("User name (e-mail or phone)")
        .interact_text()
        .map_err(prompt_err)?;
    let password = prompt_password()?;

    let choices = &[
        "Store in system keyring (recommended)",
        "Save to config file (plaintext)",
    ];
    let selection = Select::new()
        .with_prompt("Where should the password be kept?")
        .items(choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    let plaintext = if selection == 0 {
        config::store_password(&user_name, &password)?;
        eprintln!("   ✓ password stored in system keyring");
        None
    } else {
        Some(password)
    };

    let region = tuyasl_core::resolve_region(&country_code);
    let cfg = Config {
        country_code,
        user_name: Some(user_name),
        password: plaintext,
        ..Config::default()
    };
    config::save_config_to(&cfg, path)?;

    eprintln!("   ✓ wrote {} ({region} region)", path.display());
    Ok(())
}

// ── Dispatch ────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let path = commands::config_file(global);

    match args.command {
        ConfigCommand::Path => {
            output::print_output(&path.display().to_string());
            Ok(())
        }

        ConfigCommand::Show => {
            let mut cfg = commands::load_config(global)?;
            if cfg.password.is_some() {
                cfg.password = Some("****".into());
            }
            let out = output::render_single(&global.output, &cfg, format_config_redacted)?;
            output::print_output(&out);
            Ok(())
        }

        ConfigCommand::Init => init(&path),

        ConfigCommand::SetPassword => {
            let cfg = commands::load_config(global)?;
            let user_name = cfg.user_name.ok_or_else(|| CliError::MissingSetting {
                field: "user_name".into(),
                path: path.display().to_string(),
            })?;
            let password = prompt_password()?;
            config::store_password(&user_name, &password)?;
            eprintln!("   ✓ password for '{user_name}' stored in system keyring");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacted_view_masks_password() {
        let cfg = Config {
            country_code: "IT".into(),
            user_name: Some("alice@example.com".into()),
            password: Some("hunter2".into()),
            ..Config::default()
        };

        let shown = format_config_redacted(&cfg);

        assert!(shown.contains("password = \"****\""));
        assert!(!shown.contains("hunter2"));
        assert!(shown.contains("biz_type = \"smart_life\""));
    }
}
