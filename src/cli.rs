use std::{env, path::PathBuf};

use anyhow::{Context, Result, anyhow};

use crate::{config::DEFAULT_CONFIG_PATH, routes::Route};

const USAGE: &str = "usage: housing-console [--config <path>] <route> [field=value ...] [--patch] [--yes]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub config_path: PathBuf,
    pub route: Route,
    /// `field=value` pairs in the order given.
    pub fields: Vec<(String, String)>,
    /// Confirms a delete route.
    pub confirmed: bool,
    /// Edit routes send only the changed fields.
    pub patch: bool,
}

impl CliArgs {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .rev()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }
}

pub fn cli_args_from_env() -> Result<CliArgs> {
    parse_args(env::args().skip(1))
}

pub fn parse_args<I>(args: I) -> Result<CliArgs>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut config_path = None;
    let mut route = None;
    let mut fields = Vec::new();
    let mut confirmed = false;
    let mut patch = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let value = args
                    .next()
                    .ok_or_else(|| anyhow!("missing value for --config"))?;
                config_path = Some(PathBuf::from(value));
            }
            "--yes" => confirmed = true,
            "--patch" => patch = true,
            flag if flag.starts_with("--") => {
                return Err(anyhow!("unknown argument: {flag}. {USAGE}"));
            }
            pair if route.is_some() => {
                let (field, value) = pair
                    .split_once('=')
                    .ok_or_else(|| anyhow!("expected field=value, got {pair}. {USAGE}"))?;
                if field.trim().is_empty() {
                    return Err(anyhow!("empty field name in {pair}"));
                }
                fields.push((field.trim().to_string(), value.to_string()));
            }
            path => {
                route = Some(Route::parse(path).with_context(|| format!("invalid route. {USAGE}"))?);
            }
        }
    }

    Ok(CliArgs {
        config_path: config_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH)),
        route: route.unwrap_or(Route::Home),
        fields,
        confirmed,
        patch,
    })
}
