//! Plain-text table rendering for the interactive mode.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{self, Clear, ClearType};
use unicode_width::UnicodeWidthStr;

use super::Ui;
use crate::browser::SortDirection;

const NAME_WIDTH: usize = 34;
const PROVIDER_WIDTH: usize = 12;
const CONTEXT_WIDTH: usize = 7;
const PRICE_WIDTH: usize = 9;

pub(crate) fn draw(stdout: &mut io::Stdout, ui: &Ui) -> Result<()> {
    let (cols, rows_avail) = terminal::size().unwrap_or((110, 30));
    let width = cols as usize;
    let height = rows_avail as usize;

    queue!(stdout, Clear(ClearType::All))?;
    let mut line: u16 = 0;

    put(stdout, &mut line, width, &title_line(ui))?;
    put(stdout, &mut line, width, &filter_line(ui))?;
    if let Some(error) = ui.browser.error() {
        put(stdout, &mut line, width, &format!("! {error}"))?;
    }
    put(stdout, &mut line, width, &header_line(ui))?;

    let columns = ui.browser.columns();
    let table_rows = ui.browser.rows();
    // Leave room for the footer
    let max_lines = height.saturating_sub(usize::from(line) + 2);
    let mut used = 0;
    for (i, row) in table_rows.iter().enumerate() {
        if used >= max_lines {
            break;
        }
        let marker = if row.keep { "*" } else { " " };
        let mut text = format!(
            "{marker} {} {} {} {} {}",
            pad(&row.name, NAME_WIDTH),
            pad(&row.provider, PROVIDER_WIDTH),
            pad(&row.context_window, CONTEXT_WIDTH),
            pad(&row.input_cost, PRICE_WIDTH),
            pad(&row.output_cost, PRICE_WIDTH),
        );
        if columns.image_cost {
            text.push_str(&format!(" {}", pad(&row.image_cost, PRICE_WIDTH)));
        }
        if columns.cache_costs {
            text.push_str(&format!(
                " {} {}",
                pad(&row.cache_read_cost, PRICE_WIDTH),
                pad(&row.cache_write_cost, PRICE_WIDTH)
            ));
        }
        text.push_str(&format!(" {}", row.features.join(", ")));

        if i == ui.selected {
            queue!(stdout, SetAttribute(Attribute::Reverse))?;
            put(stdout, &mut line, width, &text)?;
            queue!(stdout, SetAttribute(Attribute::Reset))?;
        } else {
            put(stdout, &mut line, width, &text)?;
        }
        used += 1;

        if columns.descriptions && !row.description.is_empty() && used < max_lines {
            put(stdout, &mut line, width, &format!("    {}", row.description))?;
            used += 1;
        }
    }

    put(stdout, &mut line, width, &footer_line(ui))?;
    put(
        stdout,
        &mut line,
        width,
        "type to search · ↑↓ select · ←→ provider · Tab sort · S-Tab dir · ⏎ more · ^K pin · ^F free · ^D desc · ^R refresh · ^Y copy · Esc quit",
    )?;

    stdout.flush()?;
    Ok(())
}

fn title_line(ui: &Ui) -> String {
    let mut text = format!("pricegrid · {} models", ui.browser.catalog_len());
    if ui.browser.is_loading() {
        text.push_str(" · fetching…");
    } else if let Some(updated) = ui.browser.last_updated() {
        text.push_str(&format!(" · updated {}", updated.format("%H:%M:%S UTC")));
    }
    text
}

fn filter_line(ui: &Ui) -> String {
    let (sort_key, direction) = ui.browser.sort();
    let arrow = match direction {
        SortDirection::Ascending => "↑",
        SortDirection::Descending => "↓",
    };
    // A refresh can shrink the provider list under the cursor
    let provider = ui
        .provider_cursor
        .checked_sub(1)
        .and_then(|i| ui.browser.providers().get(i))
        .cloned()
        .unwrap_or_else(|| "all".to_string());
    format!(
        "Search: {}▏  provider: {}  hide free: {}  sort: {} {}",
        ui.input,
        provider,
        if ui.browser.hide_free() { "on" } else { "off" },
        sort_key.label(),
        arrow,
    )
}

fn header_line(ui: &Ui) -> String {
    let columns = ui.browser.columns();
    let mut text = format!(
        "  {} {} {} {} {}",
        pad("MODEL", NAME_WIDTH),
        pad("PROVIDER", PROVIDER_WIDTH),
        pad("CONTEXT", CONTEXT_WIDTH),
        pad("INPUT", PRICE_WIDTH),
        pad("OUTPUT", PRICE_WIDTH),
    );
    if columns.image_cost {
        text.push_str(&format!(" {}", pad("IMAGE", PRICE_WIDTH)));
    }
    if columns.cache_costs {
        text.push_str(&format!(
            " {} {}",
            pad("CACHE R", PRICE_WIDTH),
            pad("CACHE W", PRICE_WIDTH)
        ));
    }
    text.push_str(" FEATURES");
    text
}

fn footer_line(ui: &Ui) -> String {
    let shown = ui.browser.rows().len();
    let total = ui.browser.total_matching();
    let mut text = format!("{shown} of {total} shown");
    if ui.browser.has_more() {
        text.push_str(" · ⏎ for more");
    }
    if let Some(status) = &ui.status {
        text.push_str(&format!(" · {status}"));
    }
    text
}

fn put(stdout: &mut io::Stdout, line: &mut u16, width: usize, text: &str) -> Result<()> {
    queue!(stdout, MoveTo(0, *line), Print(fit(text, width)))?;
    *line += 1;
    Ok(())
}

/// Pad or truncate to an exact display width.
fn pad(text: &str, width: usize) -> String {
    let fitted = fit(text, width);
    let remaining = width.saturating_sub(fitted.width());
    format!("{fitted}{}", " ".repeat(remaining))
}

/// Truncate to a display width, appending an ellipsis when cut.
fn fit(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > width.saturating_sub(1) {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::{fit, pad};
    use unicode_width::UnicodeWidthStr;

    #[test]
    fn test_pad_exact_width() {
        assert_eq!(pad("abc", 5), "abc  ");
        assert_eq!(pad("abcdef", 5).width(), 5);
    }

    #[test]
    fn test_fit_truncates_with_ellipsis() {
        assert_eq!(fit("short", 10), "short");
        let cut = fit("a very long model name", 10);
        assert!(cut.ends_with('…'));
        assert!(cut.width() <= 10);
    }
}
