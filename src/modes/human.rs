use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::Duration;
use tokio::time::interval;

use crate::game::{GameClock, GameConfig, GameSession};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::persist::{SaveData, SaveStore};
use crate::render::{Hud, Renderer};

/// The guided first-run walkthrough, advanced by watching the session
struct Tutorial {
    step: usize,
    final_key_pressed: bool,
}

const TUTORIAL_MESSAGES: [&str; 4] = [
    "Welcome to Perkmandelc! Use the arrow keys or WASD to get rolling.",
    "Careful: walls and your own carts are fatal. Ride up to the boundary to see for yourself.",
    "Collect coal to add carts and score points.",
    "You're ready - but you won't be alone out there. Press any key to play.",
];

impl Tutorial {
    fn new() -> Self {
        Self {
            step: 0,
            final_key_pressed: false,
        }
    }

    fn message(&self) -> &'static str {
        TUTORIAL_MESSAGES[self.step]
    }

    fn on_last_step(&self) -> bool {
        self.step == TUTORIAL_MESSAGES.len() - 1
    }

    /// Advance past any satisfied steps; true once the walkthrough is done
    fn advance(&mut self, session: &GameSession) -> bool {
        while self.step < TUTORIAL_MESSAGES.len() {
            let satisfied = match self.step {
                0 => session.has_moved(),
                1 => session.head_on_edge() || session.game_over(),
                2 => session.has_grown(),
                _ => self.final_key_pressed,
            };
            if !satisfied {
                return false;
            }
            self.step += 1;
        }
        true
    }
}

/// Interactive keyboard-driven play in the terminal
pub struct HumanMode {
    session: GameSession,
    clock: GameClock,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    store: SaveStore,
    save: SaveData,
    tutorial: Option<Tutorial>,
    paused: bool,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig, multiplayer: bool, store: SaveStore) -> Self {
        let save = store.load();
        let session = GameSession::new(config, multiplayer);

        Self {
            metrics: GameMetrics::new(save.high_score),
            tutorial: (!save.tutorial_done).then(Tutorial::new),
            session,
            clock: GameClock::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            store,
            save,
            paused: false,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
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

        // Simulation ticks at the configured cadence (150 ms nominal)
        let mut tick_timer = interval(Duration::from_millis(self.session.config.tick_interval_ms));

        // Render at 30 FPS, decoupled from the simulation
        let mut render_timer = interval(Duration::from_millis(33));

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event)?;
                    }
                }

                // Simulation tick
                _ = tick_timer.tick() => {
                    self.update_game()?;
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    let hud = Hud {
                        paused: self.paused,
                        tutorial_message: self.tutorial.as_ref().map(|t| t.message()),
                    };
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.session, &self.metrics, &hud);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn update_game(&mut self) -> Result<()> {
        if !self.paused {
            let was_over = self.session.game_over();
            let report = self.session.tick(self.clock.now_ms());

            if report.ai_died {
                self.metrics.on_rival_death();
            }
            if report.game_over && !was_over {
                self.on_game_over()?;
            }
        }

        self.poll_tutorial()?;
        Ok(())
    }

    fn on_game_over(&mut self) -> Result<()> {
        let score = self.session.score();
        if self.metrics.on_game_over(score) {
            self.save.high_score = score;
            self.store
                .save(&self.save)
                .context("Failed to persist high score")?;
        }
        Ok(())
    }

    fn poll_tutorial(&mut self) -> Result<()> {
        let Some(tutorial) = self.tutorial.as_mut() else {
            return Ok(());
        };
        if tutorial.advance(&self.session) {
            self.tutorial = None;
            self.save.tutorial_done = true;
            self.store
                .save(&self.save)
                .context("Failed to persist tutorial flag")?;
        }
        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            if let Some(tutorial) = self.tutorial.as_mut() {
                if tutorial.on_last_step() {
                    tutorial.final_key_pressed = true;
                }
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Steer(dir) => {
                    if !self.paused {
                        self.session.set_player_direction(dir);
                    }
                }
                KeyAction::SpawnPowerUp => {
                    if !self.paused && !self.session.game_over() {
                        self.session.spawn_power_up();
                    }
                }
                KeyAction::TogglePause => {
                    if !self.session.game_over() {
                        self.paused = !self.paused;
                    }
                }
                KeyAction::Restart => {
                    self.restart();
                }
                KeyAction::Quit => {
                    self.should_quit = true;
                }
                KeyAction::None => {}
            }
        }

        Ok(())
    }

    fn restart(&mut self) {
        self.session.retry();
        self.metrics.on_game_start();
        self.paused = false;
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Direction;
    use tempfile::TempDir;

    fn mode_in(dir: &TempDir, multiplayer: bool) -> HumanMode {
        let store = SaveStore::new(dir.path().join("save.json"));
        HumanMode::new(GameConfig::default(), multiplayer, store)
    }

    #[test]
    fn test_initialization() {
        let dir = TempDir::new().unwrap();
        let mode = mode_in(&dir, false);
        assert!(!mode.session.game_over());
        assert_eq!(mode.session.score(), 0);
        // First run: tutorial active
        assert!(mode.tutorial.is_some());
    }

    #[test]
    fn test_tutorial_skipped_once_done() {
        let dir = TempDir::new().unwrap();
        let store = SaveStore::new(dir.path().join("save.json"));
        store
            .save(&SaveData {
                high_score: 7,
                tutorial_done: true,
            })
            .unwrap();

        let mode = HumanMode::new(GameConfig::default(), false, store);
        assert!(mode.tutorial.is_none());
        assert_eq!(mode.metrics.high_score, 7);
    }

    #[test]
    fn test_tutorial_walkthrough_persists_flag() {
        let dir = TempDir::new().unwrap();
        let mut mode = mode_in(&dir, false);

        // Step 0: start moving
        mode.session.set_player_direction(Direction::Right);
        mode.poll_tutorial().unwrap();
        assert_eq!(mode.tutorial.as_ref().unwrap().step, 1);

        // Step 1: reach the boundary
        mode.session.train.body[0] = crate::game::Position::new(0, 10);
        mode.poll_tutorial().unwrap();
        assert_eq!(mode.tutorial.as_ref().unwrap().step, 2);

        // Step 2: collect a coal
        mode.session.train.grow();
        mode.session.train.body[0] = crate::game::Position::new(5, 10);
        mode.session.tick(0);
        mode.poll_tutorial().unwrap();
        assert_eq!(mode.tutorial.as_ref().unwrap().step, 3);

        // Step 3: any key
        mode.tutorial.as_mut().unwrap().final_key_pressed = true;
        mode.poll_tutorial().unwrap();
        assert!(mode.tutorial.is_none());
        assert!(mode.store.load().tutorial_done);
    }

    #[test]
    fn test_game_over_persists_new_high_score() {
        let dir = TempDir::new().unwrap();
        let mut mode = mode_in(&dir, false);
        mode.tutorial = None;

        // Fake a finished run worth 2 points
        mode.session.train.grow();
        mode.session.set_player_direction(Direction::Right);
        mode.session.tick(0);
        mode.session.train.grow();
        mode.session.tick(150);
        assert_eq!(mode.session.score(), 2);

        mode.on_game_over().unwrap();
        assert_eq!(mode.store.load().high_score, 2);
        assert_eq!(mode.metrics.high_score, 2);
    }

    #[test]
    fn test_restart_resets_session_and_pause() {
        let dir = TempDir::new().unwrap();
        let mut mode = mode_in(&dir, true);
        mode.paused = true;
        mode.session.set_player_direction(Direction::Right);
        mode.session.tick(0);

        mode.restart();
        assert!(!mode.paused);
        assert_eq!(mode.session.score(), 0);
        assert!(!mode.session.has_moved());
    }
}
