use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;
use tracing::{debug, info};

use crate::driver::TickDriver;
use crate::game::{GameEngine, RunState};
use crate::input::{ControlPad, InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

pub struct HumanMode {
    engine: GameEngine,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    control_pad: ControlPad,
    /// Set when a game was (re)started since the tick timer was last synced
    new_game: bool,
    should_quit: bool,
}

impl HumanMode {
    pub fn with_engine(engine: GameEngine) -> Self {
        Self {
            engine,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            control_pad: ControlPad::default(),
            new_game: false,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut ticks = TickDriver::new(self.engine.config().tick_interval());

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Game logic tick, only delivered while a game is running
                _ = ticks.tick() => {
                    self.update_game();
                }

                // Render frame
                _ = render_timer.tick() => {
                    terminal.draw(|frame| {
                        self.control_pad =
                            self.renderer.render(frame, self.engine.state(), &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            ticks.sync(
                self.engine.run_state() == RunState::Running,
                std::mem::take(&mut self.new_game),
            );

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let action = match event {
            // Only process key press events, not release
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                self.input_handler.handle_key_event(key)
            }
            Event::Mouse(mouse) => self
                .input_handler
                .handle_mouse_event(mouse, &self.control_pad),
            _ => KeyAction::None,
        };
        self.apply(action);
    }

    fn apply(&mut self, action: KeyAction) {
        match action {
            KeyAction::Steer(heading) => {
                self.engine.set_heading(heading);
            }
            KeyAction::Start => {
                let state = self.engine.run_state();
                if state == RunState::NotStarted || state.is_over() {
                    self.start_game();
                }
            }
            KeyAction::Restart => {
                if matches!(
                    self.engine.run_state(),
                    RunState::Running | RunState::Paused
                ) {
                    debug!(score = self.engine.score(), "game abandoned");
                }
                self.start_game();
            }
            KeyAction::Pause => match self.engine.toggle_pause() {
                RunState::Paused => self.metrics.on_pause(),
                RunState::Running => self.metrics.on_resume(),
                _ => {}
            },
            KeyAction::Quit => {
                info!("quit requested");
                self.should_quit = true;
            }
            KeyAction::None => {}
        }
    }

    fn update_game(&mut self) {
        let outcome = self.engine.tick();

        if outcome.ended_game() {
            self.metrics.on_game_over(self.engine.score());
        }
    }

    fn start_game(&mut self) {
        self.engine.reset();
        self.metrics.on_game_start();
        self.new_game = true;
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )
        .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
