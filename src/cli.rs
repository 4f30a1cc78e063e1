// Command table: global flags and the four subcommands, plus the help
// text shown when an invocation is rejected.

use crate::config::API_URL_ENV;
use clap::builder::NonEmptyStringValueParser;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

const EXIT_CODES: &str = "\
Exit codes:
  0  success
  1  other failure (config file, terminal)
  2  usage error (unknown command, missing or empty option)
  3  network error (connection could not be made)
  4  HTTP error (the API answered with a non-2xx status)
  5  filesystem error (output file could not be written)";

/// Command-line front-end for the Modern-Scraper API
#[derive(Parser, Debug)]
#[command(
    name = "modern-scraper",
    version,
    about,
    long_about = None,
    after_help = EXIT_CODES,
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Base URL of the API
    #[arg(long, global = true, env = API_URL_ENV, value_name = "URL")]
    pub api_url: Option<String>,

    /// Print request logs to stderr (filter with RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Get all urls for a given domain.
    GetUrls {
        /// The domain to get urls for.
        #[arg(long, value_parser = NonEmptyStringValueParser::new())]
        domain: String,
    },
    /// Extract the HTML from a given url.
    ExtractHtml {
        /// The url to extract HTML from.
        #[arg(long, value_parser = NonEmptyStringValueParser::new())]
        url: String,
    },
    /// Extract the HTML from all urls for a given domain and save it to a file.
    ExtractHtmlAll {
        /// The domain to extract HTML from.
        #[arg(long, value_parser = NonEmptyStringValueParser::new())]
        domain: String,
        /// The file to save the HTML to.
        #[arg(long, value_name = "PATH", value_parser = non_empty_path)]
        file: PathBuf,
    },
    /// Bring up the CLI menu.
    Menu,
}

fn non_empty_path(value: &str) -> Result<PathBuf, String> {
    if value.is_empty() {
        return Err("a value is required".into());
    }
    Ok(PathBuf::from(value))
}

/// Help to print after a usage error: the subcommand's own help when one
/// was named on the command line, otherwise the full command list.
pub fn usage_help<S: AsRef<str>>(args: &[S]) -> String {
    let mut cmd = Cli::command();
    cmd.build();
    let named = args
        .iter()
        .skip(1)
        .map(|arg| arg.as_ref())
        .find(|arg| cmd.find_subcommand(arg).is_some())
        .map(str::to_string);
    let sub_help = named.and_then(|name| cmd.find_subcommand_mut(&name).map(|sub| sub.render_help()));
    match sub_help {
        Some(help) => help.to_string(),
        None => cmd.render_help().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("modern-scraper").chain(args.iter().copied()))
    }

    #[test]
    fn command_table_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_every_command() {
        let cli = parse(&["get-urls", "--domain", "example.com"]).unwrap();
        assert_eq!(cli.command, Command::GetUrls { domain: "example.com".into() });

        let cli = parse(&["extract-html", "--url", "https://example.com/a"]).unwrap();
        assert_eq!(cli.command, Command::ExtractHtml { url: "https://example.com/a".into() });

        let cli = parse(&["extract-html-all", "--domain", "example.com", "--file", "out.html"]).unwrap();
        assert_eq!(
            cli.command,
            Command::ExtractHtmlAll {
                domain: "example.com".into(),
                file: PathBuf::from("out.html"),
            }
        );

        let cli = parse(&["menu"]).unwrap();
        assert_eq!(cli.command, Command::Menu);
    }

    #[test]
    fn missing_option_is_rejected() {
        let err = parse(&["extract-html-all", "--domain", "example.com"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn empty_option_is_rejected() {
        let err = parse(&["get-urls", "--domain", ""]).unwrap_err();
        assert_eq!(err.exit_code(), 2);

        let err = parse(&["extract-html-all", "--domain", "a.com", "--file", ""]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn unknown_command_is_rejected() {
        let err = parse(&["crawl", "--domain", "example.com"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn usage_help_lists_commands_for_unknown_command() {
        let help = usage_help(&["modern-scraper", "crawl", "--domain", "x"]);
        for name in ["get-urls", "extract-html", "extract-html-all", "menu"] {
            assert!(help.contains(name), "{help}");
        }
        assert!(help.contains("Get all urls for a given domain"), "{help}");
    }

    #[test]
    fn usage_help_describes_the_named_command() {
        let help = usage_help(&["modern-scraper", "extract-html-all", "--domain", "a.com"]);
        assert!(help.contains("--file"), "{help}");
        assert!(help.contains("The file to save the HTML to"), "{help}");
        assert!(!help.contains("Get all urls for a given domain"), "{help}");
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = parse(&["get-urls", "--domain", "a.com", "--api-url", "http://localhost:1", "-v"]).unwrap();
        assert_eq!(cli.api_url.as_deref(), Some("http://localhost:1"));
        assert!(cli.verbose);
    }
}
