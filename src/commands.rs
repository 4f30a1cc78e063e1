// Command handlers. Each one composes one or two API calls and either
// prints the body or saves it to a file; `dispatch` maps a parsed command
// onto its handler.

use crate::api::{Fetch, ResourcePath};
use crate::cli::Command;
use crate::error::{Result, ScraperError};
use crate::ui;
use std::io::Write;
use std::path::Path;

/// Print every known url for `domain`.
pub fn get_urls<F: Fetch + ?Sized, W: Write>(api: &F, domain: &str, out: &mut W) -> Result<()> {
    let body = api.get_resource(&ResourcePath::urls(domain)?)?;
    print_body(&body, out)
}

/// Print the HTML of a single page.
pub fn extract_html<F: Fetch + ?Sized, W: Write>(api: &F, url: &str, out: &mut W) -> Result<()> {
    let body = api.get_resource(&ResourcePath::html(url)?)?;
    print_body(&body, out)
}

/// Save the HTML of every page of `domain` to `file`, replacing whatever
/// was there. Nothing is written unless both requests succeed.
pub fn extract_html_all<F: Fetch + ?Sized, W: Write>(
    api: &F,
    domain: &str,
    file: &Path,
    out: &mut W,
) -> Result<()> {
    // The url listing is requested but not needed by the bulk endpoint.
    let urls = api.get_resource(&ResourcePath::urls(domain)?)?;
    log::debug!("{} returned {} bytes of urls", domain, urls.len());

    let html = api.get_resource(&ResourcePath::html_all(domain)?)?;
    std::fs::write(file, &html).map_err(|source| ScraperError::Filesystem {
        path: file.to_path_buf(),
        source,
    })?;
    log::info!("wrote {} bytes to {}", html.len(), file.display());

    writeln!(out, "Saved HTML to {}", file.display())?;
    Ok(())
}

/// Run the handler for a parsed command. `menu` takes over the terminal
/// until the operator picks "Exit".
pub fn dispatch<F: Fetch + ?Sized, W: Write>(
    command: &Command,
    api: &F,
    out: &mut W,
) -> anyhow::Result<()> {
    match command {
        Command::GetUrls { domain } => get_urls(api, domain, out)?,
        Command::ExtractHtml { url } => extract_html(api, url, out)?,
        Command::ExtractHtmlAll { domain, file } => extract_html_all(api, domain, file, out)?,
        Command::Menu => {
            ui::show_banner(out)?;
            ui::main_menu(api, &mut ui::TerminalPrompter, out)?
        }
    }
    Ok(())
}

/// Write a response body unchanged, ending the line if the body didn't.
fn print_body<W: Write>(body: &[u8], out: &mut W) -> Result<()> {
    out.write_all(body)?;
    if !body.ends_with(b"\n") {
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}
