use anyhow::{Context, Result};
use termion::event::Key;
use termion::input::MouseTerminal;
use termion::raw::IntoRawMode;
use termion::screen::AlternateScreen;
use tui::backend::TermionBackend;
use tui::layout::{Constraint, Direction, Layout};
use tui::style::{Color, Modifier, Style};
use tui::widgets::{Block, Borders, Paragraph, SelectableList, Text, Widget};
use tui::Terminal;

use crate::clipboard;
use crate::event::{Event, Events};
use crate::store;
use crate::PasstuiError;

#[derive(Debug, Default)]
struct Ui {
    entries: Vec<String>,
    matches: Vec<String>,
    search: String,
    selected: Option<usize>,
    status: Option<String>,
}

impl Ui {
    fn new(entries: Vec<String>) -> Self {
        let matches = entries.clone();

        Ui {
            entries,
            matches,
            search: String::new(),
            selected: Some(0),
            status: None,
        }
    }

    /// Narrow the visible list to entries containing the search string.
    fn refilter(&mut self) {
        self.matches = self
            .entries
            .iter()
            .filter(|entry| entry.contains(&self.search))
            .cloned()
            .collect();
        self.selected = if self.matches.is_empty() {
            None
        } else {
            Some(0)
        };
    }

    fn selected_entry(&self) -> Option<String> {
        self.selected.and_then(|idx| self.matches.get(idx).cloned())
    }

    fn select_previous(&mut self) {
        if let Some(selected) = self.selected {
            if selected > 0 {
                self.selected = Some(selected - 1);
            }
        }
    }

    fn select_next(&mut self) {
        if let Some(selected) = self.selected {
            if selected + 1 < self.matches.len() {
                self.selected = Some(selected + 1);
            }
        }
    }
}

enum UiResult {
    Copied(String),
    Show { name: String, password: String },
    Abort,
}

/// +-Search----------------------------------------------------+
/// | <typed filter>                                            |
/// +-Entries (x of y)------------------------------------------+
/// | > entry 1 <-- as selected entry                           |
/// | entry 2                                                   |
/// +-----------------------------------------------------------+
/// | <↑/↓> to move, <Enter> to copy, <→> to show, <ESC> to quit|
/// +-----------------------------------------------------------+
pub fn interactive(timeout: u64) -> Result<()> {
    let entries = store::list("")?;

    if entries.is_empty() {
        return Err(PasstuiError::StoreEmpty.into());
    }

    let mut app = Ui::new(entries);
    let mut result = UiResult::Abort;

    // `terminal` gets dropped at the end of the scope, allowing stdout to work
    // as expected
    {
        let stdout = std::io::stdout().into_raw_mode()?;
        let stdout = MouseTerminal::from(stdout);
        let stdout = AlternateScreen::from(stdout);
        let backend = TermionBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        let events = Events::new();
        terminal.hide_cursor()?;

        loop {
            let size = terminal.size()?;

            terminal.draw(|mut frame| {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .margin(1)
                    .constraints(
                        [
                            Constraint::Length(3), // number of cells
                            Constraint::Min(4),
                            Constraint::Length(3), // number of cells
                        ]
                        .as_ref(),
                    )
                    .split(size);
                Paragraph::new(vec![Text::raw(app.search.to_owned())].iter())
                    .block(
                        Block::default()
                            .title("Search")
                            .title_style(Style::default().fg(Color::Red))
                            .borders(Borders::ALL),
                    )
                    .render(&mut frame, chunks[0]);
                SelectableList::default()
                    .block(Block::default().borders(Borders::ALL).title(&format!(
                        "Entries ({} of {})",
                        app.matches.len(),
                        app.entries.len()
                    )))
                    .items(&app.matches)
                    .select(app.selected)
                    .highlight_style(Style::default().fg(Color::Yellow).modifier(Modifier::BOLD))
                    .highlight_symbol(">")
                    .render(&mut frame, chunks[1]);
                let footer = match app.status {
                    Some(ref status) => {
                        Text::styled(status.to_owned(), Style::default().fg(Color::Red))
                    }
                    None => Text::raw(
                        "<↑/↓> to change the selection, <Enter> to copy, <→> to show, <ESC> to quit",
                    ),
                };
                Paragraph::new(vec![footer].iter())
                    .block(Block::default().borders(Borders::ALL))
                    .render(&mut frame, chunks[2]);
            })?;

            match events.next()? {
                Event::Input(input) => match input {
                    Key::Esc => break,
                    Key::Up => app.select_previous(),
                    Key::Down => app.select_next(),
                    Key::Char('\n') => {
                        let name = match app.selected_entry() {
                            Some(name) => name,
                            None => continue,
                        };

                        match store::get(&name) {
                            Ok(password) => {
                                clipboard::clip(&password)
                                    .with_context(|| "Failed to copy to the clipboard")?;
                                clipboard::spawn_unclip(&password, timeout)?;

                                result = UiResult::Copied(name);
                                break;
                            }
                            Err(err) => app.status = Some(err.to_string()),
                        }
                    }
                    Key::Right => {
                        let name = match app.selected_entry() {
                            Some(name) => name,
                            None => continue,
                        };

                        match store::get(&name) {
                            Ok(password) => {
                                result = UiResult::Show { name, password };
                                break;
                            }
                            Err(err) => app.status = Some(err.to_string()),
                        }
                    }
                    Key::Backspace => {
                        app.search.pop();
                        app.refilter();
                        app.status = None;
                    }
                    Key::Char(c) => {
                        app.search.push(c);
                        app.refilter();
                        app.status = None;
                    }
                    _ => {}
                },
                Event::Tick => {}
            }
        }
        terminal.show_cursor()?;
    }

    match result {
        UiResult::Copied(name) => {
            println!(
                "Password for {} copied to clipboard. Will clear in {} seconds.",
                name, timeout
            );
        }
        UiResult::Show { name, password } => {
            println!("Password for {}: {}", name, password);
        }
        UiResult::Abort => {}
    }

    Ok(())
}
