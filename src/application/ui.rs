use std::io;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableBracketedPaste;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Scrollbar;
use ratatui::widgets::ScrollbarOrientation;
use ratatui::widgets::Wrap;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tui_textarea::Key;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Action;
use crate::domain::models::AppState;
use crate::domain::models::Event;
use crate::domain::models::PersonaRegistry;
use crate::domain::models::SlashCommand;
use crate::domain::models::TextArea;
use crate::domain::services::actions::help_text;
use crate::domain::services::events::EventsService;
use crate::domain::services::CommandOutcome;
use crate::domain::services::Orchestrator;
use crate::domain::services::Palette;
use crate::domain::services::Persistence;
use crate::domain::services::Status;
use crate::domain::services::Store;
use crate::domain::services::ThemeFlag;
use crate::domain::services::ViewState;
use crate::infrastructure::backends::BackendManager;
use crate::infrastructure::storage::StorageManager;

const SIDEBAR_WIDTH: u16 = 34;
const INPUT_MAX_LINES: usize = 5;

fn render_sidebar(frame: &mut Frame, rect: Rect, state: &AppState, palette: Palette) {
    let mut lines = vec![Line::styled("Personas", palette.highlight()), Line::from("")];
    for persona in state.personas.iter() {
        if persona.id == state.current_persona_id {
            lines.push(Line::styled(
                format!("▸ {}", persona.name),
                palette.highlight(),
            ));
        } else {
            lines.push(Line::styled(format!("  {}", persona.name), palette.base()));
        }
        lines.push(Line::styled(
            format!("  {}", persona.description),
            palette.muted(),
        ));
    }

    let on_off = |value: bool| {
        if value {
            return "on";
        }
        return "off";
    };
    let theme = if state.dark_mode { "dark" } else { "light" };

    lines.extend(vec![
        Line::from(""),
        Line::styled("Settings", palette.highlight()),
        Line::from(""),
        Line::from(format!("Temperature  {}", state.settings.temperature)),
        Line::from(format!("Max tokens   {}", state.settings.max_tokens)),
        Line::from(format!(
            "Timestamps   {}",
            on_off(state.settings.show_timestamps)
        )),
        Line::from(format!("Theme        {theme}")),
        Line::from(""),
        Line::styled("Hotkeys", palette.highlight()),
        Line::from(""),
        Line::styled("Ctrl+P  Next persona", palette.muted()),
        Line::styled("Ctrl+T  Dark mode", palette.muted()),
        Line::styled("Ctrl+B  Sidebar", palette.muted()),
        Line::styled("Ctrl+L  Clear messages", palette.muted()),
        Line::styled("Ctrl+C  Quit", palette.muted()),
    ]);

    frame.render_widget(
        Paragraph::new(lines)
            .style(palette.base())
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::RIGHT)
                    .border_style(palette.muted())
                    .padding(Padding::new(1, 1, 0, 0)),
            ),
        rect,
    );
}

fn render_status(frame: &mut Frame, rect: Rect, view: &ViewState, palette: Palette) {
    let (text, style) = match &view.status {
        Some(status) if status.is_error => (status.text.to_string(), palette.base().fg(palette.error)),
        Some(status) => (status.text.to_string(), palette.base().fg(palette.accent)),
        None => (
            "Enter to send, Shift+Enter for a new line, /help for commands".to_string(),
            palette.muted(),
        ),
    };

    frame.render_widget(Paragraph::new(format!(" {text}")).style(style), rect);
}

fn render(
    frame: &mut Frame,
    state: &AppState,
    view: &mut ViewState,
    textarea: &tui_textarea::TextArea,
    palette: Palette,
    is_sending: bool,
) {
    frame.render_widget(Block::default().style(palette.base()), frame.area());

    let mut main_area = frame.area();
    if state.is_sidebar_open {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(1)])
            .split(frame.area());
        render_sidebar(frame, columns[0], state, palette);
        main_area = columns[1];
    }

    let input_height = textarea.lines().len().clamp(1, INPUT_MAX_LINES) as u16 + 2;
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(input_height),
        ])
        .split(main_area);

    if layout[0].width != view.last_known_width || layout[0].height != view.last_known_height {
        view.set_rect(layout[0]);
    }
    view.sync(state, palette);

    if view.show_help {
        frame.render_widget(
            Paragraph::new(help_text())
                .style(palette.base())
                .wrap(Wrap { trim: false })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .border_style(palette.highlight())
                        .title("Help")
                        .padding(Padding::new(1, 1, 0, 0)),
                ),
            layout[0],
        );
    } else {
        view.bubble_list
            .render(frame, layout[0], view.scroll.position);
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            layout[0].inner(Margin {
                vertical: 1,
                horizontal: 0,
            }),
            &mut view.scroll.scrollbar_state,
        );
    }

    render_status(frame, layout[1], view, palette);

    let persona_name = state.personas.display_name(&state.current_persona_id, "AI");
    if is_sending {
        view.loading
            .render(frame, layout[2], persona_name, palette.base());
    } else {
        frame.render_widget(textarea, layout[2]);
    }
}

async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    store: &mut Store,
    theme: &ThemeFlag,
    view: &mut ViewState,
    tx: mpsc::UnboundedSender<Action>,
    events: &mut EventsService,
) -> Result<()> {
    let mut orchestrator = Orchestrator::default();
    let mut textarea = TextArea::default();

    #[cfg(feature = "dev")]
    {
        textarea.insert_str("Explain photosynthesis in two sentences.");
    }

    loop {
        let palette = theme.palette();
        let state = store.state();
        let persona_name = state.personas.display_name(&state.current_persona_id, "AI");
        TextArea::decorate(&mut textarea, persona_name, palette.base());

        terminal.draw(|frame| {
            render(
                frame,
                state,
                view,
                &textarea,
                palette,
                orchestrator.is_sending(),
            );
        })?;

        match events.next().await? {
            Event::ChatSettled(res) => {
                orchestrator.settle(store, res);
            }
            Event::KeyboardCTRLC() => {
                break;
            }
            Event::KeyboardCTRLB() => {
                store.toggle_sidebar();
            }
            Event::KeyboardCTRLL() => {
                store.clear_messages();
                view.status = Some(Status::info("Messages cleared"));
            }
            Event::KeyboardCTRLP() => {
                view.next_persona(store);
            }
            Event::KeyboardCTRLT() => {
                store.toggle_dark_mode();
            }
            Event::KeyboardEnter() => {
                let input = textarea.lines().join("\n");
                if !orchestrator.can_submit(&input) {
                    continue;
                }
                textarea = TextArea::default();
                view.show_help = false;

                if let Some(command) = SlashCommand::parse(&input) {
                    if view.handle_slash_command(store, &command) == CommandOutcome::Quit {
                        break;
                    }
                    continue;
                }

                view.status = None;
                if let Some(request) = orchestrator.submit(store, &input) {
                    tx.send(Action::ChatRequest(request))?;
                }
            }
            Event::KeyboardNewline() => {
                if !orchestrator.is_sending() {
                    textarea.insert_newline();
                }
            }
            Event::KeyboardPaste(text) => {
                if !orchestrator.is_sending() {
                    textarea.insert_str(text);
                }
            }
            Event::KeyboardCharInput(input) => {
                if input.key == Key::Esc {
                    view.show_help = false;
                    continue;
                }
                if !orchestrator.is_sending() {
                    textarea.input(input);
                }
            }
            Event::UIScrollDown() => {
                view.scroll.down();
            }
            Event::UIScrollUp() => {
                view.scroll.up();
            }
            Event::UIScrollPageDown() => {
                view.scroll.down_page();
            }
            Event::UIScrollPageUp() => {
                view.scroll.up_page();
            }
            Event::UITick() => {
                if orchestrator.is_sending() {
                    view.loading.tick();
                }
            }
            Event::UIResize() => (),
        }
    }

    return Ok(());
}

pub fn destruct_terminal_for_panic() {
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    );
    let _ = crossterm::execute!(io::stdout(), cursor::Show);
}

fn build_store(theme: &ThemeFlag) -> Result<Store> {
    let personas = PersonaRegistry::default();
    let persistence = Persistence::new(StorageManager::from_config()?);
    let persisted = persistence.load(&personas);

    let mut store = Store::new(personas);
    store.subscribe(Box::new(theme.clone()));
    store.subscribe(Box::new(persistence));
    store.hydrate(persisted);

    let persona = Config::get(ConfigKey::Persona);
    if !persona.is_empty() {
        store.set_persona(&persona);
    }

    return Ok(store);
}

pub async fn start(
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let theme = ThemeFlag::default();
    let mut store = build_store(&theme)?;
    let mut view = ViewState::new(theme.palette(), &Config::get(ConfigKey::Username));

    if let Err(err) = BackendManager::get().health_check().await {
        tracing::warn!(error = ?err, "Chat API health check failed");
        view.status = Some(Status::error(&format!(
            "Can't reach the chat API at {}. Is it running? ({err})",
            Config::get(ConfigKey::ApiURL)
        )));
    }

    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    enable_raw_mode()?;
    crossterm::execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;
    let mut events = EventsService::new(rx);

    start_loop(
        &mut terminal,
        &mut store,
        &theme,
        &mut view,
        tx,
        &mut events,
    )
    .await?;

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    return Ok(());
}
