//! `tuyasl login`: one login through the session, token persisted.

use std::path::Path;

use serde::Serialize;

use tuyasl_config::Config;
use tuyasl_core::{Region, Session};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

/// What gets printed. Tokens stay in the token file.
#[derive(Serialize)]
struct LoginSummary<'a> {
    success: bool,
    region: Region,
    token_type: Option<String>,
    expires_in: Option<i64>,
    token_path: &'a Path,
}

pub async fn handle(cfg: &Config, global: &GlobalOpts) -> Result<(), CliError> {
    // Fail on missing credentials before building the HTTP client.
    let login = cfg.login_config()?;
    let session = Session::new(cfg.session_options()?)?;

    let credentials = session.login(&login).await?;

    let summary = LoginSummary {
        success: credentials.success,
        region: session.region(),
        token_type: credentials.token_type,
        expires_in: credentials.expires_in,
        token_path: session.credentials().token_path(),
    };

    let out = output::render_single(&global.output, &summary, |s| {
        let mut lines = vec![format!("Logged in ({} region)", s.region)];
        if let Some(ref kind) = s.token_type {
            lines.push(format!("Token type: {kind}"));
        }
        if let Some(secs) = s.expires_in {
            lines.push(format!("Expires in: {secs}s"));
        }
        lines.push(format!("Token saved to {}", s.token_path.display()));
        lines.join("\n")
    })?;
    output::print_output(&out);
    Ok(())
}
