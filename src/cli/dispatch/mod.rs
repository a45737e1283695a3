//! Command-line argument dispatch.
//!
//! Maps validated CLI matches to the action the binary executes.

use crate::cli::actions::{server::Args, Action};
use crate::cli::commands::{
    ARG_APPLY_SCHEMA, ARG_APP_NAME, ARG_BEARER_PLUGIN, ARG_COOKIE_PREFIX, ARG_DSN,
    ARG_NO_ADMIN_PLUGIN, ARG_PORT, ARG_SECRET, ARG_SECURE_COOKIES,
};
use anyhow::{anyhow, Context, Result};
use secrecy::SecretString;
use url::Url;

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing, the DSN is not a Postgres URL,
/// or the secret is empty.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(8080);
    let dsn = matches
        .get_one::<String>(ARG_DSN)
        .cloned()
        .context("missing required argument: --dsn")?;
    validate_dsn(&dsn)?;

    let secret = matches
        .get_one::<String>(ARG_SECRET)
        .cloned()
        .context("missing required argument: --secret")?;
    if secret.trim().is_empty() {
        return Err(anyhow!("invalid --secret: must not be empty"));
    }

    let app_name = matches
        .get_one::<String>(ARG_APP_NAME)
        .cloned()
        .unwrap_or_else(|| "vibe-check".to_string());
    let cookie_prefix = matches
        .get_one::<String>(ARG_COOKIE_PREFIX)
        .cloned()
        .unwrap_or_else(|| "better-auth".to_string());

    Ok(Action::Server(Args {
        port,
        dsn: SecretString::from(dsn),
        secret: SecretString::from(secret),
        app_name,
        cookie_prefix,
        admin_plugin: !matches.get_flag(ARG_NO_ADMIN_PLUGIN),
        bearer_plugin: matches.get_flag(ARG_BEARER_PLUGIN),
        secure_cookies: matches.get_flag(ARG_SECURE_COOKIES),
        apply_schema: matches.get_flag(ARG_APPLY_SCHEMA),
    }))
}

fn validate_dsn(dsn: &str) -> Result<()> {
    let url = Url::parse(dsn).context("invalid --dsn: not a URL")?;
    match url.scheme() {
        "postgres" | "postgresql" => {}
        scheme => return Err(anyhow!("invalid --dsn: unsupported scheme {scheme}")),
    }
    // Unix socket DSNs leave the authority empty and pass the socket as `?host=`.
    let has_host = url.host_str().is_some_and(|host| !host.is_empty());
    let has_socket = url.query_pairs().any(|(key, value)| key == "host" && !value.is_empty());
    if !has_host && !has_socket {
        return Err(anyhow!("invalid --dsn: no host specified"));
    }
    Ok(())
}

/// The DSN with its password masked, safe for logs.
#[must_use]
pub fn redact_dsn(dsn: &str) -> String {
    match Url::parse(dsn) {
        Ok(mut url) => {
            if url.password().is_some() && url.set_password(Some("***")).is_err() {
                return "***".to_string();
            }
            url.to_string()
        }
        Err(_) => "***".to_string(),
    }
}
