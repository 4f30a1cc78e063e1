// Library root
// -----------
// This crate exposes a small library surface for the CLI. The binary
// (`main.rs`) parses arguments and hands the chosen command to
// `commands::dispatch`.
//
// Module responsibilities:
// - `config`: resolves the API base URL (flag, env, config file, default).
// - `error`: error taxonomy and exit codes.
// - `api`: HTTP GETs against the Modern-Scraper API.
// - `cli`: the `clap` command table.
// - `commands`: the get-urls / extract-html / extract-html-all handlers.
// - `ui`: the interactive menu over the same handlers.
pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod ui;
