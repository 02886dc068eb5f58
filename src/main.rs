//! Terminal front end for the runner.

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{
    self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture, Event,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use dino_runner::audio::{AudioOutput, NullAudio};
use dino_runner::core::{SpeedMode, DEFAULT_HEIGHT};
use dino_runner::session::{
    launch, DisabledNotice, GameSession, HighScoreHost, InputSender, JsonHighScoreStore,
    KeyCommand, KeyTranslator, Launch, NoHighScoreHost,
};
use dino_runner::settings::Settings;
use dino_runner::skins::BuiltinAssets;
use dino_runner::ui::{
    canvas_width_for, play_field, render_disabled_notice, render_runner_scene, CellMapping,
};
use dino_runner::utils::{logging, persistence, version_line};
use ratatui::layout::Rect;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

/// Redraw interval while no frame is scheduled (waiting, crashed, paused).
const IDLE_REDRAW_MS: f64 = 50.0;

#[derive(Parser, Debug)]
#[command(
    name = "dino-runner",
    about = "Side-scrolling runner for the terminal",
    disable_version_flag = true
)]
struct Cli {
    /// Use the reduced speed profile
    #[arg(long)]
    slow: bool,
    /// Enable audio cues for approaching obstacles
    #[arg(long)]
    audio_cues: bool,
    /// Alternate skin unlocked by the collectable (prairie, inverted)
    #[arg(long, value_name = "NAME")]
    skin: Option<String>,
    /// Cap the play field at the classic width
    #[arg(long)]
    arcade: bool,
    /// Dark color scheme
    #[arg(long)]
    dark: bool,
    /// Show a disabled notice instead of the game
    #[arg(long, value_name = "MESSAGE", num_args = 0..=1, default_missing_value = "")]
    disabled: Option<String>,
    /// Seed for obstacle generation
    #[arg(long)]
    seed: Option<u64>,
    /// Do not read or write the high score file
    #[arg(long)]
    no_save: bool,
    /// Print version information
    #[arg(long, short = 'V')]
    version: bool,
}

impl Cli {
    /// Command line flags override the settings file.
    fn apply(&self, settings: &mut Settings) {
        if self.slow {
            settings.speed_mode = SpeedMode::Reduced;
        }
        if self.audio_cues {
            settings.audio_cues = true;
        }
        if let Some(skin) = &self.skin {
            settings.alt_skin = Some(skin.clone());
        }
        if self.arcade {
            settings.arcade = true;
        }
        if self.dark {
            settings.dark_mode = true;
        }
        if let Some(message) = &self.disabled {
            settings.disabled_notice = Some(message.clone());
        }
        if self.seed.is_some() {
            settings.seed = self.seed;
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if cli.version {
        println!("{}", version_line());
        return Ok(());
    }

    let log_path =
        persistence::save_path(persistence::LOG_FILE).context("locating the data directory")?;
    logging::init_file_logging(&log_path).context("opening the log file")?;
    tracing::info!("{}", version_line());

    let mut settings = Settings::load();
    cli.apply(&mut settings);
    if let Err(e) = settings.validate() {
        tracing::warn!(error = %e, "ignoring alternate skin");
        settings.alt_skin = None;
    }

    let (mut terminal, release_events) = setup_terminal().context("setting up the terminal")?;
    let result = run(&mut terminal, &cli, settings, release_events);
    restore_terminal(&mut terminal, release_events).context("restoring the terminal")?;
    result
}

fn setup_terminal() -> Result<(Tui, bool)> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableMouseCapture)?;
    stdout.execute(EnableFocusChange)?;

    let release_events = supports_keyboard_enhancement().unwrap_or(false);
    if release_events {
        stdout.execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))?;
    }
    tracing::info!(release_events, "terminal ready");

    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    Ok((terminal, release_events))
}

fn restore_terminal(terminal: &mut Tui, release_events: bool) -> Result<()> {
    let backend = terminal.backend_mut();
    if release_events {
        backend.execute(PopKeyboardEnhancementFlags)?;
    }
    backend.execute(DisableFocusChange)?;
    backend.execute(DisableMouseCapture)?;
    backend.execute(LeaveAlternateScreen)?;
    disable_raw_mode()?;
    terminal.show_cursor()?;
    Ok(())
}

/// Forward terminal events from a blocking reader thread.
fn spawn_event_reader() -> mpsc::Receiver<Event> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break;
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "terminal input failed");
                break;
            }
        }
    });
    rx
}

fn open_high_score(no_save: bool) -> (Box<dyn HighScoreHost>, Option<u64>) {
    if no_save {
        return (Box::new(NoHighScoreHost), None);
    }
    match JsonHighScoreStore::open_default() {
        Ok(store) => {
            let stored = store.load();
            (Box::new(store), Some(stored))
        }
        Err(e) => {
            tracing::warn!(error = %e, "high score storage unavailable");
            (Box::new(NoHighScoreHost), None)
        }
    }
}

#[cfg(feature = "audio")]
fn open_audio() -> Box<dyn AudioOutput> {
    match dino_runner::audio::RodioAudio::try_default() {
        Ok(out) => Box::new(out),
        Err(e) => {
            tracing::warn!(error = %e, "no audio device, running silent");
            Box::new(NullAudio)
        }
    }
}

#[cfg(not(feature = "audio"))]
fn open_audio() -> Box<dyn AudioOutput> {
    Box::new(NullAudio)
}

fn run(terminal: &mut Tui, cli: &Cli, settings: Settings, release_events: bool) -> Result<()> {
    let events = spawn_event_reader();
    let field = play_field(terminal.size()?);
    let seed = settings.seed.unwrap_or_else(rand::random);
    let options = settings.session_options(canvas_width_for(field.width), seed);
    let (host, stored) = open_high_score(cli.no_save);

    match launch(
        settings.disabled_notice.as_deref(),
        options,
        &BuiltinAssets,
        host,
    ) {
        Launch::Disabled(notice) => run_notice(terminal, &events, &notice),
        Launch::Game(mut session) => {
            if let Some(value) = stored {
                session.initialize_high_score(value as f64);
            }
            run_game(terminal, &events, &mut session, settings, release_events, cli.no_save)
        }
    }
}

fn run_notice(terminal: &mut Tui, events: &mpsc::Receiver<Event>, notice: &DisabledNotice) -> Result<()> {
    let mut keys = KeyTranslator::new(false);
    loop {
        terminal.draw(|frame| render_disabled_notice(frame, frame.size(), notice))?;
        match events.recv() {
            Ok(Event::Key(key)) => {
                if keys.translate_key(key).contains(&KeyCommand::Quit) {
                    return Ok(());
                }
            }
            Ok(_) => {}
            Err(_) => return Ok(()),
        }
    }
}

enum Flow {
    Continue,
    Quit,
}

struct GameLoop<'a> {
    session: &'a mut GameSession,
    input: InputSender,
    keys: KeyTranslator,
    mapping: Option<CellMapping>,
    settings: Settings,
    persist_settings: bool,
}

impl GameLoop<'_> {
    fn handle_event(&mut self, ev: Event, now: f64) -> Flow {
        match ev {
            Event::Key(key) => {
                for command in self.keys.translate_key(key) {
                    match command {
                        KeyCommand::Game(action) => {
                            self.input.send(action);
                        }
                        KeyCommand::ToggleAudioCues => {
                            let enabled = !self.session.audio_cues_enabled();
                            self.session.set_audio_cues(enabled);
                            self.settings.audio_cues = enabled;
                            self.save_settings();
                        }
                        KeyCommand::ToggleSpeedMode => {
                            let mode = self.session.next_speed_mode().toggled();
                            self.session.set_speed_mode(mode);
                            self.settings.speed_mode = mode;
                            self.save_settings();
                        }
                        KeyCommand::Quit => return Flow::Quit,
                    }
                }
            }
            Event::Mouse(mouse) => {
                if let Some(mapping) = self.mapping {
                    if let Some(action) = self
                        .keys
                        .translate_mouse(mouse, |col, row| mapping.to_canvas(col, row))
                    {
                        self.input.send(action);
                    }
                }
            }
            Event::Resize(width, height) => {
                let field = play_field(Rect::new(0, 0, width, height));
                self.session
                    .request_resize(canvas_width_for(field.width), DEFAULT_HEIGHT, now);
            }
            Event::FocusLost => self.session.set_visible(false, now),
            Event::FocusGained => self.session.set_visible(true, now),
            _ => {}
        }
        Flow::Continue
    }

    fn save_settings(&self) {
        if !self.persist_settings {
            return;
        }
        if let Err(e) = self.settings.save() {
            tracing::warn!(error = %e, "failed to save settings");
        }
    }
}

fn run_game(
    terminal: &mut Tui,
    events: &mpsc::Receiver<Event>,
    session: &mut GameSession,
    settings: Settings,
    release_events: bool,
    no_save: bool,
) -> Result<()> {
    let start = Instant::now();
    let clock = || start.elapsed().as_secs_f64() * 1000.0;
    let mut audio = open_audio();
    let mut game = GameLoop {
        input: session.input_sender(),
        session,
        keys: KeyTranslator::new(release_events),
        mapping: None,
        settings,
        persist_settings: !no_save,
    };

    loop {
        let now = clock();
        game.session.pump(now);
        game.session.drain_audio(audio.as_mut());

        let mut mapping = None;
        terminal.draw(|frame| {
            mapping = Some(render_runner_scene(frame, frame.size(), game.session, now));
        })?;
        game.mapping = mapping;

        let wait = game
            .session
            .next_frame_due()
            .map_or(IDLE_REDRAW_MS, |due| (due - clock()).clamp(0.0, IDLE_REDRAW_MS));
        match events.recv_timeout(Duration::from_secs_f64(wait / 1000.0)) {
            Ok(ev) => {
                if let Flow::Quit = game.handle_event(ev, clock()) {
                    break;
                }
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    tracing::info!(
        runs = game.session.play_count(),
        best = game.session.score().high_score_actual(),
        "session ended"
    );
    Ok(())
}
