// Entrypoint for the CLI application.
// - Keeps `main` small: parse arguments, build the API client, dispatch.
// - Typed errors decide the exit code; anything else exits with 1.

use clap::Parser;
use modern_scraper_cli::api::ScraperClient;
use modern_scraper_cli::cli::{usage_help, Cli};
use modern_scraper_cli::commands::dispatch;
use modern_scraper_cli::config::{default_config_path, Settings};
use modern_scraper_cli::error::{report, ScraperError, EXIT_FAILURE, EXIT_USAGE};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args_os()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();
    let cli = match Cli::try_parse_from(std::env::args_os()) {
        Ok(cli) => cli,
        // --help and --version
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            // Nothing has been sent yet; show what was wrong and how to call it.
            let _ = e.print();
            eprintln!();
            eprint!("{}", usage_help(&args));
            return ExitCode::from(EXIT_USAGE as u8);
        }
    };

    if cli.verbose {
        use env_logger::Env;
        let env = Env::default()
            .filter_or("RUST_LOG", "info")
            .write_style_or("RUST_LOG_STYLE", "auto");
        env_logger::init_from_env(env);
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", report(e.as_ref()));
            let code = e
                .downcast_ref::<ScraperError>()
                .map(ScraperError::exit_code)
                .unwrap_or(EXIT_FAILURE);
            ExitCode::from(code as u8)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = Settings::resolve(cli.api_url, default_config_path().as_deref())?;
    log::info!("using API at {}", settings.api_url);
    let api = ScraperClient::new(&settings)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    dispatch(&cli.command, &api, &mut out)
}
