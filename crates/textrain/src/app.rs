//! Animation state machine and event loop.

use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rand::rngs::StdRng;
use ratatui::{DefaultTerminal, Frame, widgets::Paragraph};
use textrain_core::{Dimensions, InputIntent, RainPalette};
use textrain_rain::{Column, FrameScheduler, advance, column_count, initialize, rasterize};

use crate::menu::DocumentMenu;
use crate::source::{TextSource, to_cells};

/// How long to block on input while no frame is pending.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Events the state machine reacts to, in the order the host delivers them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Input(InputIntent),
    Resize(u16, u16),
    DocumentChosen(String),
    FrameAdvance,
}

/// Columns and characters of one animating session.
#[derive(Debug)]
struct RainSession {
    document: String,
    source: Vec<char>,
    columns: Vec<Column>,
}

#[derive(Debug)]
enum Mode {
    Selecting,
    Animating(RainSession),
    Quitting,
}

/// The main application which holds the state and logic of the application.
pub struct App {
    mode: Mode,
    /// Document list; absent when started on a single document.
    menu: Option<DocumentMenu>,
    library: Box<dyn TextSource>,
    scheduler: FrameScheduler,
    rng: StdRng,
    palette: RainPalette,
    dims: Dimensions,
    /// Set whenever state changed since the last draw.
    dirty: bool,
}

impl App {
    /// Start on the document list.
    pub fn new(
        library: Box<dyn TextSource>,
        palette: RainPalette,
        rng: StdRng,
        dims: Dimensions,
    ) -> Self {
        let menu = DocumentMenu::new(library.list_documents());
        Self {
            mode: Mode::Selecting,
            menu: Some(menu),
            library,
            scheduler: FrameScheduler::new(),
            rng,
            palette,
            dims,
            dirty: true,
        }
    }

    /// Start animating `document` straight away, with no list to return to.
    pub fn with_document(
        library: Box<dyn TextSource>,
        palette: RainPalette,
        rng: StdRng,
        dims: Dimensions,
        document: &str,
        now: Instant,
    ) -> Self {
        let mut app = Self {
            mode: Mode::Selecting,
            menu: None,
            library,
            scheduler: FrameScheduler::new(),
            rng,
            palette,
            dims,
            dirty: true,
        };
        app.start_animation(document, now);
        app
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        while !self.is_quitting() {
            if self.dirty {
                terminal.draw(|frame| self.render(frame))?;
                self.dirty = false;
            }
            self.handle_crossterm_events()?;

            let now = Instant::now();
            if self.scheduler.fire(now) {
                self.handle(AppEvent::FrameAdvance, now);
            }
        }
        Ok(())
    }

    pub fn is_quitting(&self) -> bool {
        matches!(self.mode, Mode::Quitting)
    }

    /// Process one event to completion.
    pub fn handle(&mut self, event: AppEvent, now: Instant) {
        if self.is_quitting() {
            return;
        }

        match event {
            AppEvent::Input(InputIntent::Quit) => self.quit(),
            AppEvent::Input(InputIntent::Select) => {
                if !matches!(self.mode, Mode::Selecting) {
                    return;
                }
                let chosen = self
                    .menu
                    .as_ref()
                    .and_then(|menu| menu.selected())
                    .map(str::to_string);
                if let Some(name) = chosen {
                    self.handle(AppEvent::DocumentChosen(name), now);
                }
            }
            AppEvent::Input(InputIntent::Back) => {
                if let Mode::Animating(session) = &self.mode
                    && self.menu.is_some()
                {
                    tracing::debug!(document = %session.document, "back to document list");
                    self.scheduler.stop();
                    self.mode = Mode::Selecting;
                    self.dirty = true;
                }
            }
            AppEvent::DocumentChosen(name) => {
                if matches!(self.mode, Mode::Selecting) {
                    self.start_animation(&name, now);
                }
            }
            AppEvent::Resize(width, height) => {
                self.dims = Dimensions::new(width, height);
                if let Mode::Animating(session) = &mut self.mode {
                    session.columns = initialize(
                        column_count(width),
                        height,
                        session.source.len(),
                        &mut self.rng,
                    );
                    tracing::debug!(
                        width,
                        height,
                        columns = session.columns.len(),
                        "rebuilt columns"
                    );
                }
                self.dirty = true;
            }
            AppEvent::FrameAdvance => {
                // A frame that was already due when the mode changed is dropped here.
                if let Mode::Animating(session) = &mut self.mode {
                    advance(
                        &mut session.columns,
                        self.dims.height,
                        session.source.len(),
                        &mut self.rng,
                    );
                    self.scheduler.rearm(now);
                    self.dirty = true;
                }
            }
        }
    }

    /// Load `name`, build columns for the current terminal and start the
    /// frame scheduler. An unreadable document rains its error message.
    fn start_animation(&mut self, name: &str, now: Instant) {
        let source = match self.library.read_document(name) {
            Ok(chars) => chars,
            Err(e) => {
                tracing::warn!(document = name, error = %e, "falling back to error text");
                to_cells(&format!("error: {e} "))
            }
        };
        let columns = initialize(
            column_count(self.dims.width),
            self.dims.height,
            source.len(),
            &mut self.rng,
        );
        tracing::debug!(
            document = name,
            chars = source.len(),
            columns = columns.len(),
            "start animating"
        );
        self.mode = Mode::Animating(RainSession {
            document: name.to_string(),
            source,
            columns,
        });
        self.scheduler.start(now);
        self.dirty = true;
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        match &self.mode {
            Mode::Selecting => {
                if let Some(menu) = &mut self.menu {
                    menu.render(frame, area, self.palette.colors()[0]);
                }
            }
            Mode::Animating(session) => {
                let rain = rasterize(
                    &session.columns,
                    self.dims,
                    &session.source,
                    self.palette,
                    &mut self.rng,
                );
                frame.render_widget(Paragraph::new(rain.to_text()), area);
            }
            Mode::Quitting => {}
        }
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Blocks at most until the next frame is due.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        let timeout = self.scheduler.timeout(Instant::now(), IDLE_POLL);
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    self.on_key_event(key, Instant::now())
                }
                Event::Resize(width, height) => {
                    self.handle(AppEvent::Resize(width, height), Instant::now())
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent, now: Instant) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => {
                self.handle(AppEvent::Input(InputIntent::Quit), now)
            }
            (_, KeyCode::Enter) => self.handle(AppEvent::Input(InputIntent::Select), now),
            (_, KeyCode::Esc | KeyCode::Backspace) => {
                self.handle(AppEvent::Input(InputIntent::Back), now)
            }
            (_, KeyCode::Up | KeyCode::Char('k')) => self.move_selection(DocumentMenu::previous),
            (_, KeyCode::Down | KeyCode::Char('j')) => self.move_selection(DocumentMenu::next),
            (_, KeyCode::Char('c')) => self.cycle_palette(),
            _ => {}
        }
    }

    fn move_selection(&mut self, step: fn(&mut DocumentMenu)) {
        if let (Mode::Selecting, Some(menu)) = (&self.mode, &mut self.menu) {
            step(menu);
            self.dirty = true;
        }
    }

    /// Cycle through available palettes.
    fn cycle_palette(&mut self) {
        self.palette = self.palette.next();
        self.dirty = true;
    }

    /// Stop the scheduler and leave for good.
    fn quit(&mut self) {
        self.scheduler.stop();
        self.mode = Mode::Quitting;
        tracing::debug!("quit");
    }
}
