//! CLI definitions and the one-shot list mode.

use std::collections::HashSet;
use std::process::ExitCode;
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use unicode_width::UnicodeWidthStr;

use crate::browser::{Browser, Columns, PAGE_SIZE, SEARCH_DEBOUNCE, SortDirection, SortKey};
use crate::catalog::{CatalogClient, DEFAULT_BASE_URL};

#[derive(Parser)]
#[command(
    name = "pricegrid",
    version,
    about = "Browse model pricing from the OpenRouter catalog"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Catalog API base URL.
    #[arg(long, global = true, default_value = DEFAULT_BASE_URL, env = "PRICEGRID_BASE_URL")]
    pub base_url: String,

    /// Optional API key, sent as a bearer token.
    #[arg(long, global = true, env = "OPENROUTER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch the catalog once and print matching models.
    List(ListArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// Free-text search over name, provider, modalities, and features.
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Only show models from these providers (repeatable).
    #[arg(short, long)]
    pub provider: Vec<String>,

    /// Hide free models.
    #[arg(long)]
    pub hide_free: bool,

    /// Sort column.
    #[arg(long, value_enum, default_value = "input-cost")]
    pub sort: SortKey,

    /// Sort descending instead of ascending.
    #[arg(long)]
    pub desc: bool,

    #[arg(
        long,
        default_value_t = 1,
        help = format!("Number of pages to show ({PAGE_SIZE} rows per page)")
    )]
    pub pages: usize,

    /// Show descriptions and include them in search.
    #[arg(long)]
    pub descriptions: bool,

    /// Print rows as JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

/// One-shot mode: fetch, derive, print, exit.
pub async fn run(base_url: String, api_key: Option<String>, args: ListArgs) -> ExitCode {
    let client = CatalogClient::new(base_url, api_key);
    let mut browser = Browser::new(Columns {
        descriptions: args.descriptions,
        ..Default::default()
    });

    browser.begin_fetch();
    match client.fetch_catalog().await {
        Ok(snapshot) => browser.apply_snapshot(snapshot),
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::FAILURE;
        }
    }

    // Flags map straight onto query state; commit past the debounce window
    // since there is no further input coming.
    let now = Instant::now();
    browser.set_search_input(args.search, now);
    browser.tick(now + SEARCH_DEBOUNCE);
    if !args.provider.is_empty() {
        browser.set_providers(args.provider.into_iter().collect::<HashSet<_>>());
    }
    if args.hide_free {
        browser.toggle_hide_free();
    }
    browser.set_sort_key(args.sort);
    if args.desc {
        browser.set_sort_direction(SortDirection::Descending);
    }
    for _ in 1..args.pages.max(1) {
        browser.load_more();
    }

    if args.json {
        match serde_json::to_string_pretty(&browser.rows()) {
            Ok(out) => println!("{out}"),
            Err(err) => {
                eprintln!("Error: {err}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        print_table(&browser);
    }
    ExitCode::SUCCESS
}

fn print_table(browser: &Browser) {
    let rows = browser.rows();
    let columns = browser.columns();

    let mut headers = vec!["MODEL", "PROVIDER", "CONTEXT", "INPUT", "OUTPUT"];
    if columns.image_cost {
        headers.push("IMAGE");
    }
    if columns.cache_costs {
        headers.push("CACHE R");
        headers.push("CACHE W");
    }
    headers.push("FEATURES");

    let table: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            let name = if row.keep {
                format!("* {}", row.name)
            } else {
                row.name.clone()
            };
            let mut cells = vec![
                name,
                row.provider.clone(),
                row.context_window.clone(),
                row.input_cost.clone(),
                row.output_cost.clone(),
            ];
            if columns.image_cost {
                cells.push(row.image_cost.clone());
            }
            if columns.cache_costs {
                cells.push(row.cache_read_cost.clone());
                cells.push(row.cache_write_cost.clone());
            }
            cells.push(row.features.join(", "));
            cells
        })
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            table
                .iter()
                .map(|cells| cells[i].width())
                .chain(std::iter::once(h.width()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    print_cells(&headers.iter().map(ToString::to_string).collect::<Vec<_>>(), &widths);
    for (row, cells) in rows.iter().zip(&table) {
        print_cells(cells, &widths);
        if columns.descriptions && !row.description.is_empty() {
            println!("    {}", row.description);
        }
    }

    let total = browser.total_matching();
    let mut footer = format!("{} of {} models", rows.len(), total);
    if browser.has_more() {
        footer.push_str("  (more available: raise --pages)");
    }
    if let Some(updated) = browser.last_updated() {
        footer.push_str(&format!("  fetched {}", updated.format("%Y-%m-%d %H:%M:%S UTC")));
    }
    println!("{footer}");
}

fn print_cells(cells: &[String], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell}{}", " ".repeat(width.saturating_sub(cell.width()))))
        .collect::<Vec<_>>()
        .join("  ");
    println!("{}", line.trim_end());
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parses() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_pages_help_tracks_page_size() {
        let cmd = Cli::command();
        let list = cmd.find_subcommand("list").unwrap();
        let arg = list.get_arguments().find(|a| a.get_id() == "pages").unwrap();
        let help = arg.get_help().map(ToString::to_string).unwrap_or_default();
        assert!(help.contains(&PAGE_SIZE.to_string()), "help was: {help}");
    }

    #[test]
    fn test_list_args_defaults() {
        let cli = Cli::parse_from(["pricegrid", "list"]);
        let Some(Commands::List(args)) = cli.command else {
            panic!("expected list subcommand");
        };
        assert_eq!(args.pages, 1);
        assert_eq!(args.sort, SortKey::InputCost);
        assert!(!args.desc);
        assert!(!args.json);
    }

    #[test]
    fn test_list_args_full() {
        let cli = Cli::parse_from([
            "pricegrid",
            "list",
            "--search",
            "claude",
            "--provider",
            "Anthropic",
            "--provider",
            "Openai",
            "--hide-free",
            "--sort",
            "output-cost",
            "--desc",
            "--pages",
            "3",
        ]);
        let Some(Commands::List(args)) = cli.command else {
            panic!("expected list subcommand");
        };
        assert_eq!(args.search, "claude");
        assert_eq!(args.provider, vec!["Anthropic", "Openai"]);
        assert!(args.hide_free);
        assert_eq!(args.sort, SortKey::OutputCost);
        assert_eq!(args.pages, 3);
    }
}
