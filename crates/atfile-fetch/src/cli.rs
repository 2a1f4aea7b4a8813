//! Command-line arguments

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "atfile-fetch")]
#[command(about = "Fetch an ATFile upload from a PDS and check its content")]
#[command(version)]
#[command(
    override_usage = "atfile-fetch -k <RECORD_KEY> [-u <USERNAME>] [-p <PASSWORD>] [-s <SERVER>]"
)]
pub struct Cli {
    /// PDS username
    #[arg(short, long, value_name = "USERNAME")]
    pub username: Option<String>,

    /// PDS password (an app password is recommended)
    #[arg(short, long, value_name = "PASSWORD")]
    pub password: Option<String>,

    /// Record key of the upload
    #[arg(short = 'k', long, value_name = "RECORD_KEY")]
    pub key: String,

    /// PDS server URL
    #[arg(short, long, value_name = "SERVER")]
    pub server: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Fail when audio/mpeg content has neither an ID3 tag nor a frame sync
    #[arg(long)]
    pub strict: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::try_parse_from([
            "atfile-fetch", "-k", "3kxyz", "-u", "alice", "-p", "secret", "-s", "https://zio.blue",
        ])
        .unwrap();
        assert_eq!(cli.key, "3kxyz");
        assert_eq!(cli.username.as_deref(), Some("alice"));
        assert_eq!(cli.password.as_deref(), Some("secret"));
        assert_eq!(cli.server.as_deref(), Some("https://zio.blue"));
        assert!(!cli.strict);
        assert!(!cli.json);
    }

    #[test]
    fn test_key_is_required() {
        let err = Cli::try_parse_from(["atfile-fetch", "-u", "alice"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }
}
