//! Command-line surface.

use charsheet_core::default_log_level;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "charsheet", version, about = "Character sheet manager")]
pub struct Cli {
    /// Path to the SQLite database file
    #[arg(long, env = "CHARSHEET_DB_PATH", default_value = "charsheet.sqlite3")]
    pub db: PathBuf,

    /// Log level: trace, debug, info, warn or error
    #[arg(long, env = "CHARSHEET_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Absolute directory for rotating log files; logging is off when unset
    #[arg(long, env = "CHARSHEET_LOG_DIR")]
    pub log_dir: Option<String>,

    /// Print results as JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Level passed to the logger: the flag or env value, else the build default.
    pub fn resolved_log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(default_log_level())
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List all characters, newest first
    List,
    /// Show one character
    Show { id: String },
    /// Create a character; every sheet field must be given
    Create {
        #[command(flatten)]
        form: FormArgs,
    },
    /// Overwrite every field of a character
    Update {
        id: String,
        #[command(flatten)]
        form: FormArgs,
    },
    /// Delete a character together with its skills and items
    Delete { id: String },
    /// Manage a character's skills
    Skills {
        #[command(subcommand)]
        action: EntryAction,
    },
    /// Manage a character's inventory
    Items {
        #[command(subcommand)]
        action: EntryAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum EntryAction {
    /// List entries owned by a character, newest first
    List { character: String },
    /// Show one entry under its owning character
    Show { character: String, entry: String },
    /// Add an entry (`-f name=... -f content=...`)
    Add {
        character: String,
        #[command(flatten)]
        form: FormArgs,
    },
    /// Overwrite an entry's name and content
    Edit {
        entry: String,
        #[command(flatten)]
        form: FormArgs,
    },
    /// Remove one entry
    Remove { entry: String },
}

#[derive(Args, Debug)]
pub struct FormArgs {
    /// Form field as `key=value`; repeat for each field
    #[arg(short = 'f', long = "field", value_parser = parse_field)]
    pub fields: Vec<(String, String)>,
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.trim().to_string(), value.to_string()))
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| format!("expected `key=value`, got `{raw}`"))
}

#[cfg(test)]
mod tests {
    use super::{parse_field, Cli, Command};
    use charsheet_core::default_log_level;
    use clap::{CommandFactory, Parser};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_field_keeps_value_untrimmed() {
        assert_eq!(
            parse_field("name= Aria =x").unwrap(),
            ("name".to_string(), " Aria =x".to_string())
        );
        assert!(parse_field("novalue").is_err());
        assert!(parse_field("=x").is_err());
    }

    #[test]
    fn create_collects_repeated_fields() {
        let cli = Cli::try_parse_from([
            "charsheet",
            "--db",
            "/tmp/x.sqlite3",
            "create",
            "-f",
            "name=Aria",
            "--field",
            "age=17",
        ])
        .unwrap();
        match cli.command {
            Command::Create { form } => assert_eq!(form.fields.len(), 2),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn log_level_falls_back_to_build_default() {
        let cli = Cli::try_parse_from(["charsheet", "--log-dir", "/tmp/logs", "list"]).unwrap();
        if std::env::var_os("CHARSHEET_LOG_LEVEL").is_none() {
            assert_eq!(cli.resolved_log_level(), default_log_level());
        }

        let cli = Cli::try_parse_from(["charsheet", "--log-level", "warn", "list"]).unwrap();
        assert_eq!(cli.resolved_log_level(), "warn");
    }
}
