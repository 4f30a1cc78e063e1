// UI layer: the interactive menu. Prompting goes through the `Prompter`
// trait; the terminal implementation uses `dialoguer`, tests use a script.

use crate::api::Fetch;
use crate::commands::{extract_html, extract_html_all, get_urls};
use anyhow::{anyhow, Result};
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType};
use dialoguer::{Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::path::PathBuf;

const BANNER: &str = r"
 __  __           _                       ____
|  \/  | ___   __| | ___ _ __ _ __       / ___|  ___ _ __ __ _ _ __   ___ _ __
| |\/| |/ _ \ / _` |/ _ \ '__| '_ \ _____\___ \ / __| '__/ _` | '_ \ / _ \ '__|
| |  | | (_) | (_| |  __/ |  | | | |_____|___) | (__| | | (_| | |_) |  __/ |
|_|  |_|\___/ \__,_|\___|_|  |_| |_|     |____/ \___|_|  \__,_| .__/ \___|_|
                                                              |_|";

const MENU_PROMPT: &str = "What would you like to do?";

/// Top-level menu entries, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    GetUrls,
    ExtractHtml,
    ExtractHtmlAll,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 4] = [
        MenuChoice::GetUrls,
        MenuChoice::ExtractHtml,
        MenuChoice::ExtractHtmlAll,
        MenuChoice::Exit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::GetUrls => "Get all urls for a domain",
            MenuChoice::ExtractHtml => "Extract the HTML from a url",
            MenuChoice::ExtractHtmlAll => {
                "Extract the HTML from all urls for a domain and save it to a file"
            }
            MenuChoice::Exit => "Exit",
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Source of operator answers for the menu.
pub trait Prompter {
    /// Let the operator pick one of `items`; returns its index.
    fn select(&mut self, prompt: &str, items: &[&str]) -> Result<usize>;
    /// Ask for a non-empty line of text.
    fn input(&mut self, prompt: &str) -> Result<String>;
}

/// Keyboard-driven prompts on the controlling terminal.
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn select(&mut self, prompt: &str, items: &[&str]) -> Result<usize> {
        // Arrow keys and Enter to choose.
        let selection = Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact()?;
        Ok(selection)
    }

    fn input(&mut self, prompt: &str) -> Result<String> {
        let value: String = Input::new()
            .with_prompt(prompt)
            .validate_with(|s: &String| -> std::result::Result<(), &'static str> {
                if s.trim().is_empty() {
                    Err("a value is required")
                } else {
                    Ok(())
                }
            })
            .interact_text()?;
        Ok(value.trim().to_string())
    }
}

/// Clear the terminal and print the banner.
pub fn show_banner<W: Write>(out: &mut W) -> Result<()> {
    execute!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    writeln!(out, "{}", BANNER.yellow())?;
    writeln!(out)?;
    Ok(())
}

/// Main interactive menu. Runs the chosen flow and comes back to the
/// selection until the operator picks "Exit". A failed flow ends the menu
/// with its error.
pub fn main_menu<F, P, W>(api: &F, prompter: &mut P, out: &mut W) -> Result<()>
where
    F: Fetch + ?Sized,
    P: Prompter + ?Sized,
    W: Write,
{
    let labels: Vec<&str> = MenuChoice::ALL.iter().map(|c| c.label()).collect();
    loop {
        let index = prompter.select(MENU_PROMPT, &labels)?;
        let choice =
            MenuChoice::from_index(index).ok_or_else(|| anyhow!("no menu entry at {index}"))?;
        log::debug!("menu choice: {:?}", choice);
        match choice {
            MenuChoice::GetUrls => {
                let domain = prompter.input("Domain")?;
                let spinner = spinner("Fetching urls...");
                let res = get_urls(api, &domain, out);
                spinner.finish_and_clear();
                res?;
            }
            MenuChoice::ExtractHtml => {
                let url = prompter.input("Url")?;
                let spinner = spinner("Extracting HTML...");
                let res = extract_html(api, &url, out);
                spinner.finish_and_clear();
                res?;
            }
            MenuChoice::ExtractHtmlAll => {
                let domain = prompter.input("Domain")?;
                let file = PathBuf::from(prompter.input("File path")?);
                let spinner = spinner("Extracting HTML for every url...");
                let res = extract_html_all(api, &domain, &file, out);
                spinner.finish_and_clear();
                res?;
            }
            MenuChoice::Exit => return Ok(()),
        }
    }
}

fn spinner(message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message);
    spinner
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::FakeApi;
    use crate::error::ScraperError;
    use std::collections::VecDeque;

    /// Answers prompts from a fixed script and fails once it runs dry.
    struct ScriptedPrompter {
        selections: VecDeque<usize>,
        inputs: VecDeque<String>,
        asked: Vec<String>,
    }

    impl ScriptedPrompter {
        fn new(selections: &[usize], inputs: &[&str]) -> Self {
            ScriptedPrompter {
                selections: selections.iter().copied().collect(),
                inputs: inputs.iter().map(|s| s.to_string()).collect(),
                asked: Vec::new(),
            }
        }
    }

    impl Prompter for ScriptedPrompter {
        fn select(&mut self, prompt: &str, items: &[&str]) -> Result<usize> {
            self.asked.push(prompt.to_string());
            assert_eq!(items.len(), MenuChoice::ALL.len());
            self.selections
                .pop_front()
                .ok_or_else(|| anyhow!("script exhausted"))
        }

        fn input(&mut self, prompt: &str) -> Result<String> {
            self.asked.push(prompt.to_string());
            self.inputs
                .pop_front()
                .ok_or_else(|| anyhow!("script exhausted"))
        }
    }

    #[test]
    fn labels_match_menu_order() {
        let labels: Vec<&str> = MenuChoice::ALL.iter().map(|c| c.label()).collect();
        assert_eq!(
            labels,
            vec![
                "Get all urls for a domain",
                "Extract the HTML from a url",
                "Extract the HTML from all urls for a domain and save it to a file",
                "Exit",
            ]
        );
        assert_eq!(MenuChoice::from_index(3), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::from_index(4), None);
    }

    #[test]
    fn exit_invokes_no_handler() {
        let api = FakeApi::default();
        let mut prompter = ScriptedPrompter::new(&[3], &[]);
        let mut out = Vec::new();

        main_menu(&api, &mut prompter, &mut out).unwrap();

        assert!(api.requested().is_empty());
        assert!(out.is_empty());
        assert_eq!(prompter.asked, vec![MENU_PROMPT]);
    }

    #[test]
    fn flow_runs_then_returns_to_menu() {
        let api = FakeApi::default()
            .with("urls/example.com", "[\"http://example.com/a\"]")
            .with("html/example.com", "<html></html>");
        let mut prompter = ScriptedPrompter::new(&[0, 1, 3], &["example.com", "example.com"]);
        let mut out = Vec::new();

        main_menu(&api, &mut prompter, &mut out).unwrap();

        assert_eq!(api.requested(), vec!["urls/example.com", "html/example.com"]);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "[\"http://example.com/a\"]\n<html></html>\n"
        );
        assert_eq!(
            prompter.asked,
            vec![MENU_PROMPT, "Domain", MENU_PROMPT, "Url", MENU_PROMPT]
        );
    }

    #[test]
    fn save_flow_collects_domain_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("site.html");
        let api = FakeApi::default()
            .with("urls/example.com", "[]")
            .with("html/all/example.com", "<html>ok</html>");
        let file_arg = file.to_string_lossy().into_owned();
        let mut prompter = ScriptedPrompter::new(&[2, 3], &["example.com", &file_arg]);
        let mut out = Vec::new();

        main_menu(&api, &mut prompter, &mut out).unwrap();

        assert_eq!(std::fs::read(&file).unwrap(), b"<html>ok</html>");
        assert!(String::from_utf8(out).unwrap().contains("site.html"));
    }

    #[test]
    fn failed_flow_ends_the_menu() {
        let api = FakeApi::default().failing("urls/example.com", 500);
        // A second selection is scripted but must never be asked for.
        let mut prompter = ScriptedPrompter::new(&[0, 3], &["example.com"]);
        let mut out = Vec::new();

        let err = main_menu(&api, &mut prompter, &mut out).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ScraperError>(),
            Some(ScraperError::Http { status: 500, .. })
        ));
        assert_eq!(prompter.selections.len(), 1);
    }

    #[test]
    fn banner_is_written() {
        let mut out = Vec::new();
        show_banner(&mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("|  \\/  |"));
    }
}
