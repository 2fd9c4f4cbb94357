//! Command-line interface definition and parsing.

use clap::Parser;
use jwt_simple::prelude::HS256Key;
use std::path::PathBuf;

/// Command-line arguments for the auction server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file.
    #[arg(short, long, env = "APP_CONFIG")]
    pub config: Option<PathBuf>,

    /// The HMAC secret for verification of JWT claims. Required to serve.
    #[arg(short, long, env = "APP_SECRET")]
    pub secret: Option<String>,

    /// Write the OpenAPI document to this path and exit.
    #[arg(long)]
    pub schema: Option<PathBuf>,
}

impl Cli {
    /// Parse command-line arguments, without exiting the process on failure.
    pub fn import() -> Result<Self, clap::Error> {
        Self::try_parse()
    }

    /// The JWT verification key, if a secret was given.
    pub fn secret_key(&self) -> Option<HS256Key> {
        self.secret
            .as_deref()
            .map(|secret| HS256Key::from_bytes(secret.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_flag_is_optional() {
        let cli = Cli::try_parse_from(["auctiondemo", "--secret", "hunter2"]).unwrap();
        assert_eq!(cli.secret.as_deref(), Some("hunter2"));
        assert!(cli.secret_key().is_some());
        assert!(cli.schema.is_none());
    }

    #[test]
    fn schema_dump_needs_no_secret() {
        let cli = Cli::try_parse_from(["auctiondemo", "--schema", "api.json"]).unwrap();
        assert_eq!(cli.schema, Some(PathBuf::from("api.json")));
    }
}
