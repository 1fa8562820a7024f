//! Interactive terminal mode.
//!
//! A plain crossterm event loop over the [`Browser`] state container. All
//! pipeline logic lives in `browser`; this module only translates key
//! events into mutations and repaints the derived rows.

mod render;

use std::io::{self, Write};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use base64::Engine as _;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use crossterm::{cursor, execute};
use tokio::sync::mpsc;

use crate::browser::{Browser, Columns};
use crate::catalog::{CatalogClient, Snapshot};

pub(crate) struct Ui {
    pub(crate) browser: Browser,
    /// Raw search input; reaches the pipeline through the debounce.
    pub(crate) input: String,
    pub(crate) selected: usize,
    /// Provider filter cursor: 0 = all, 1.. = single provider.
    pub(crate) provider_cursor: usize,
    pub(crate) status: Option<String>,
}

enum FetchOutcome {
    Snapshot(Snapshot),
    Failed(String),
}

pub async fn run(client: CatalogClient, columns: Columns) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, cursor::Hide)?;

    let result = event_loop(&mut stdout, client, columns).await;

    execute!(stdout, cursor::Show, LeaveAlternateScreen)?;
    disable_raw_mode()?;
    result
}

async fn event_loop(
    stdout: &mut io::Stdout,
    client: CatalogClient,
    columns: Columns,
) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut ui = Ui {
        browser: Browser::new(columns),
        input: String::new(),
        selected: 0,
        provider_cursor: 0,
        status: None,
    };

    ui.browser.begin_fetch();
    spawn_fetch(client.clone(), tx.clone());

    loop {
        ui.selected = ui.selected.min(ui.browser.rows().len().saturating_sub(1));
        render::draw(stdout, &ui)?;

        if event::poll(Duration::from_millis(50))?
            && let Event::Key(key) = event::read()?
            && key.kind != KeyEventKind::Release
            && handle_key(&mut ui, key, &client, &tx)?
        {
            return Ok(());
        }

        if ui.browser.tick(Instant::now()) {
            ui.selected = 0;
        }

        while let Ok(outcome) = rx.try_recv() {
            match outcome {
                FetchOutcome::Snapshot(snapshot) => {
                    ui.browser.apply_snapshot(snapshot);
                    ui.status = None;
                }
                FetchOutcome::Failed(message) => ui.browser.apply_error(message),
            }
        }
    }
}

/// Handle one key press. Returns true to quit.
fn handle_key(
    ui: &mut Ui,
    key: KeyEvent,
    client: &CatalogClient,
    tx: &mpsc::UnboundedSender<FetchOutcome>,
) -> Result<bool> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => return Ok(true),
        KeyCode::Char('k') if ctrl => {
            if let Some(id) = selected_id(ui) {
                ui.browser.toggle_keep(&id);
            }
        }
        KeyCode::Char('f') if ctrl => {
            ui.browser.toggle_hide_free();
            ui.selected = 0;
        }
        KeyCode::Char('d') if ctrl => ui.browser.toggle_descriptions(),
        KeyCode::Char('r') if ctrl => {
            if ui.browser.begin_fetch() {
                ui.status = Some("Refreshing…".to_string());
                spawn_fetch(client.clone(), tx.clone());
            }
        }
        KeyCode::Char('y') if ctrl => {
            if let Some(id) = selected_id(ui)
                && let Some(payload) = ui.browser.copy_payload(&id)
            {
                copy_to_clipboard(&payload)?;
                ui.status = Some(format!("Copied {payload}"));
            }
        }
        KeyCode::Char(c) if !ctrl => {
            ui.input.push(c);
            ui.browser.set_search_input(ui.input.clone(), Instant::now());
        }
        KeyCode::Backspace => {
            ui.input.pop();
            ui.browser.set_search_input(ui.input.clone(), Instant::now());
        }
        KeyCode::Esc => {
            if ui.input.is_empty() {
                return Ok(true);
            }
            ui.input.clear();
            ui.browser.set_search_input(String::new(), Instant::now());
        }
        KeyCode::Up => ui.selected = ui.selected.saturating_sub(1),
        KeyCode::Down => {
            let len = ui.browser.rows().len();
            if len > 0 {
                ui.selected = (ui.selected + 1).min(len - 1);
            }
        }
        // Tab cycles the sort column; Shift-Tab re-selects the active
        // column, which flips its direction.
        KeyCode::Tab => {
            let (sort_key, _) = ui.browser.sort();
            ui.browser.set_sort(sort_key.next());
        }
        KeyCode::BackTab => {
            let (sort_key, _) = ui.browser.sort();
            ui.browser.set_sort(sort_key);
        }
        KeyCode::Left => cycle_provider(ui, false),
        KeyCode::Right => cycle_provider(ui, true),
        KeyCode::Enter | KeyCode::PageDown => {
            if ui.browser.has_more() {
                ui.browser.load_more();
            }
        }
        _ => {}
    }
    Ok(false)
}

fn selected_id(ui: &Ui) -> Option<String> {
    ui.browser.rows().get(ui.selected).map(|r| r.id.clone())
}

/// Step the provider filter through "all" plus each provider in turn.
fn cycle_provider(ui: &mut Ui, forward: bool) {
    let count = ui.browser.providers().len();
    let positions = count + 1;
    ui.provider_cursor = if forward {
        (ui.provider_cursor + 1) % positions
    } else {
        (ui.provider_cursor + positions - 1) % positions
    };

    let selection = if ui.provider_cursor == 0 {
        std::collections::HashSet::new()
    } else {
        let provider = ui.browser.providers()[ui.provider_cursor - 1].clone();
        std::iter::once(provider).collect()
    };
    ui.browser.set_providers(selection);
    ui.selected = 0;
}

fn spawn_fetch(client: CatalogClient, tx: mpsc::UnboundedSender<FetchOutcome>) {
    tokio::spawn(async move {
        match client.fetch_catalog().await {
            Ok(snapshot) => {
                let _ = tx.send(FetchOutcome::Snapshot(snapshot));
            }
            Err(err) => {
                let _ = tx.send(FetchOutcome::Failed(err.to_string()));
            }
        }
    });
}

/// OSC 52: hand the payload to the terminal's clipboard.
fn copy_to_clipboard(text: &str) -> Result<()> {
    let encoded = base64::engine::general_purpose::STANDARD.encode(text);
    let mut out = io::stdout();
    write!(out, "\x1b]52;c;{encoded}\x07")?;
    out.flush()?;
    Ok(())
}
