use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{Interval, MissedTickBehavior, interval};
use tracing::{info, warn};

use crate::audio::{AudioSink, SoundCue};
use crate::game::{FrameView, GameEngine, RoundState, TickOutcome};
use crate::input::InputHandler;
use crate::metrics::GameMetrics;
use crate::modes::screen::{Screen, ScreenCommand};
use crate::render::Renderer;

/// Keyboard play in the terminal: menu, rounds, game-over screen
pub struct HumanMode {
    engine: GameEngine,
    round: Option<RoundState>,
    view: Option<FrameView>,
    screen: Screen,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    audio: Box<dyn AudioSink>,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(engine: GameEngine, audio: Box<dyn AudioSink>) -> Self {
        let metrics = GameMetrics::new(engine.config().high_score_capacity);

        Self {
            engine,
            round: None,
            view: None,
            screen: Screen::menu(),
            metrics,
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            audio,
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

        info!("human mode started");

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        info!(
            rounds = self.metrics.rounds_played,
            best = self.metrics.high_score(),
            "human mode finished"
        );

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Game ticks speed up with the score
        let mut tick_rate = self.ticks_per_second();
        let mut tick_timer = speed_timer(self.engine.config().tick_interval(self.score()));

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event)?;
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    self.update_game();

                    let rate = self.ticks_per_second();
                    if rate != tick_rate {
                        tick_rate = rate;
                        tick_timer = delayed_speed_timer(self.engine.config().tick_interval(self.score()));
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(
                            frame,
                            &self.screen,
                            self.view.as_ref(),
                            &self.metrics,
                            tick_rate,
                        );
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

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            let action = self.input_handler.handle_key_event(key);

            if self.screen.is_button_press(action) {
                self.audio.play(SoundCue::Click);
            }

            match self.screen.on_key(action) {
                ScreenCommand::StartRound => self.start_round()?,
                ScreenCommand::Quit => self.should_quit = true,
                ScreenCommand::Stay => {}
            }
        }

        Ok(())
    }

    fn update_game(&mut self) {
        if self.screen != Screen::Playing {
            return;
        }
        let Some(round) = self.round.as_mut() else {
            return;
        };

        let action = self.input_handler.take_action();
        let result = self.engine.step(round, action);

        for event in &result.events {
            if let Some(cue) = SoundCue::for_event(event) {
                self.audio.play(cue);
            }
        }

        self.view = Some(self.engine.frame(round));

        if let TickOutcome::Ended { final_score, cause } = result.outcome {
            self.metrics.on_round_over(final_score);
            self.screen = Screen::game_over(final_score, cause);
        }
    }

    fn start_round(&mut self) -> Result<()> {
        let round = self
            .engine
            .start_round()
            .context("Failed to start a new round")?;

        self.view = Some(self.engine.frame(&round));
        self.round = Some(round);
        self.screen = Screen::Playing;
        self.metrics.on_round_start();
        self.input_handler.clear();
        Ok(())
    }

    fn score(&self) -> u32 {
        self.round.as_ref().map_or(0, |round| round.score)
    }

    fn ticks_per_second(&self) -> u32 {
        self.engine.config().ticks_per_second(self.score())
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        if let Err(err) = terminal.show_cursor() {
            warn!(%err, "failed to show cursor");
        }
        Ok(())
    }
}

/// Tick timer whose first tick fires immediately
fn speed_timer(period: Duration) -> Interval {
    let mut timer = interval(period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}

/// Tick timer that waits one full period before its first tick
fn delayed_speed_timer(period: Duration) -> Interval {
    let mut timer = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::Silent;
    use crate::game::{Cell, CollisionType, Direction, Food, GameConfig, Snake};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Remembers every cue it is asked to play
    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<SoundCue>>>);

    impl AudioSink for Recorder {
        fn play(&mut self, cue: SoundCue) {
            self.0.borrow_mut().push(cue);
        }
    }

    fn mode() -> HumanMode {
        HumanMode::new(GameEngine::with_seed(GameConfig::small(), 8), Box::new(Silent))
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_starts_on_menu() {
        let mode = mode();
        assert_eq!(mode.screen, Screen::menu());
        assert!(mode.round.is_none());
        assert_eq!(mode.ticks_per_second(), 10);
    }

    #[test]
    fn test_menu_play_starts_round() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Enter)).unwrap();

        assert_eq!(mode.screen, Screen::Playing);
        let round = mode.round.as_ref().unwrap();
        assert!(round.is_playing());
        assert_eq!(round.score, 0);
        assert!(mode.view.is_some());
    }

    #[test]
    fn test_menu_quit() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Down)).unwrap();
        mode.handle_event(key(KeyCode::Enter)).unwrap();
        assert!(mode.should_quit);
    }

    #[test]
    fn test_steering_reaches_the_engine() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Enter)).unwrap();
        mode.handle_event(key(KeyCode::Down)).unwrap();

        mode.update_game();

        let round = mode.round.as_ref().unwrap();
        assert_eq!(round.player.direction, Direction::Down);
        assert_eq!(round.ticks, 1);
    }

    #[test]
    fn test_round_over_records_score_and_plays_cues() {
        let recorder = Recorder::default();
        let mut mode = HumanMode::new(
            GameEngine::with_seed(GameConfig::small(), 8),
            Box::new(recorder.clone()),
        );
        mode.handle_event(key(KeyCode::Enter)).unwrap();

        let round = mode.round.as_mut().unwrap();
        round.player = Snake::new(Cell::new(9, 0), Direction::Right);
        round.score = 4;

        mode.update_game();

        assert!(matches!(
            mode.screen,
            Screen::GameOver { final_score: 4, .. }
        ));
        assert_eq!(mode.metrics.rounds_played, 1);
        assert_eq!(mode.metrics.high_scores.top(), vec![4]);
        assert_eq!(
            *recorder.0.borrow(),
            vec![SoundCue::Click, SoundCue::RoundOver]
        );

        // Further ticks do nothing until a new round starts
        mode.update_game();
        assert_eq!(mode.metrics.rounds_played, 1);

        mode.handle_event(key(KeyCode::Char('r'))).unwrap();
        assert_eq!(mode.screen, Screen::Playing);
        assert_eq!(mode.round.as_ref().unwrap().score, 0);
    }

    #[test]
    fn test_full_board_shows_game_over_instead_of_exiting() {
        let config = GameConfig {
            obstacle_count: 0,
            player_spawn: Cell::new(0, 0),
            enemy_spawn: Cell::new(1, 1),
            ..GameConfig::new(2, 2)
        };
        let mut mode = HumanMode::new(GameEngine::with_seed(config, 3), Box::new(Silent));
        mode.handle_event(key(KeyCode::Enter)).unwrap();

        let round = mode.round.as_mut().unwrap();
        round.player = Snake::with_body(Cell::new(1, 0), [Cell::new(1, 1)], Direction::Left);
        round.player.grow(1);
        round.enemy = Snake::new(Cell::new(0, 1), Direction::Right);
        round.food = Food::new(Cell::new(0, 0));
        round.score = 6;

        mode.update_game();

        assert_eq!(mode.screen, Screen::game_over(7, CollisionType::BoardFull));
        assert!(!mode.should_quit);
        assert_eq!(mode.metrics.high_scores.top(), vec![7]);
    }
}
