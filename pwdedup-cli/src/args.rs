use clap::builder::FalseyValueParser;
use clap::{ArgAction, Parser};
use pwdedup_core::DedupConfig;
use std::path::PathBuf;

/// Command-line arguments.
///
/// Every switch can also come from its environment variable; either source
/// turns it on. Env values `0`, `false`, `no`, `off`, `n`, `f` and empty
/// count as off.
#[derive(Parser, Debug)]
#[command(
    name = "pwdedup",
    version,
    about = "Deduplicate a password-manager CSV export, keeping the newest entry per account"
)]
pub struct Cli {
    /// CSV export to clean. Surrounding quotes and a leading `~/` are accepted.
    pub input: String,

    /// Compare sites by `scheme://host` only
    #[arg(
        short = 'n',
        long,
        env = "PWDEDUP_NORMALIZE_URL",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new()
    )]
    pub normalize_url: bool,

    /// Compare usernames case-insensitively
    #[arg(
        short = 'l',
        long,
        env = "PWDEDUP_LOWERCASE_USERNAMES",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new()
    )]
    pub lowercase_usernames: bool,

    /// Drop entries whose password is blank
    #[arg(
        short = 'e',
        long,
        env = "PWDEDUP_IGNORE_EMPTY_PASSWORDS",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new()
    )]
    pub ignore_empty_passwords: bool,

    /// Drop entries without a modifyTime
    #[arg(
        short = 'm',
        long,
        env = "PWDEDUP_REQUIRE_MODIFY_TIME",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new()
    )]
    pub require_modify_time: bool,

    /// Write the result over the input file
    #[arg(
        short = 'w',
        long,
        env = "PWDEDUP_OVERWRITE",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new()
    )]
    pub overwrite: bool,

    /// Output file; defaults to "<input name> (cleaned).<ext>" next to the input
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// TOML file with an [options] table of the same switches
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Report what would happen without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Switches set by flags or environment.
    pub fn dedup_config(&self) -> DedupConfig {
        DedupConfig {
            normalize_url: self.normalize_url,
            lowercase_usernames: self.lowercase_usernames,
            ignore_empty_passwords: self.ignore_empty_passwords,
            require_modify_time: self.require_modify_time,
            overwrite_output: self.overwrite,
        }
    }
}
