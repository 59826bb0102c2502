use std::time::Instant;

use log::info;

use crate::config::GameConfig;
use crate::game::{GameState, Phase};
use crate::input::{Direction, GameInput};
use crate::scheduler::Scheduler;

/// Commands accepted by the game core.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Command {
    Tick,
    CountdownTick,
    SetDirection(Direction),
    TogglePause,
    Restart,
}

/// Whether the outer loop should keep going after an input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Owns the game state and feeds it scheduled and user commands.
#[derive(Debug)]
pub struct Driver {
    state: GameState,
    scheduler: Scheduler,
}

impl Driver {
    /// Wraps `state` with clocks started at `now`.
    #[must_use]
    pub fn new(state: GameState, config: &GameConfig, now: Instant) -> Self {
        Self {
            state,
            scheduler: Scheduler::new(config, now),
        }
    }

    /// Read-only view for rendering.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Applies one command and logs any phase change it causes.
    pub fn dispatch(&mut self, command: Command) {
        let before = self.state.phase();

        match command {
            Command::Tick => self.state.tick(),
            Command::CountdownTick => self.state.countdown_tick(),
            Command::SetDirection(direction) => self.state.set_direction(direction),
            Command::TogglePause => self.state.toggle_pause(),
            Command::Restart => self.state.restart(),
        }

        let after = self.state.phase();
        if after != before || command == Command::Restart {
            self.log_transition(command, before, after);
        }
    }

    /// Translates a keyboard input into commands.
    pub fn handle_input(&mut self, input: GameInput) -> Flow {
        match input {
            GameInput::Quit => return Flow::Quit,
            GameInput::Direction(direction) => self.dispatch(Command::SetDirection(direction)),
            GameInput::Pause => self.dispatch(Command::TogglePause),
            GameInput::Restart if self.state.phase() == Phase::Over => {
                self.dispatch(Command::Restart);
            }
            GameInput::Restart => {}
            GameInput::Confirm => self.dispatch(Command::Restart),
        }

        Flow::Continue
    }

    /// Fires every scheduled command that is due at `now`.
    pub fn advance(&mut self, now: Instant) {
        let due = self.scheduler.poll(now);

        for _ in 0..due.ticks {
            self.dispatch(Command::Tick);
        }
        for _ in 0..due.countdowns {
            self.dispatch(Command::CountdownTick);
        }
    }

    /// Earliest instant at which `advance` has work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Instant {
        self.scheduler.next_deadline()
    }

    fn log_transition(&self, command: Command, before: Phase, after: Phase) {
        match after {
            Phase::Over => info!(
                "game over ({:?}): score {}, highest {}, {}s left",
                self.state.over_reason(),
                self.state.score(),
                self.state.highest_score(),
                self.state.time_left()
            ),
            _ => info!("{command:?}: {before:?} -> {after:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::{Command, Driver, Flow};
    use crate::config::{GameConfig, Settings, TIME_LIMIT_SECS};
    use crate::game::{GameState, Phase};
    use crate::input::{Direction, GameInput};

    fn driver(now: Instant) -> (Driver, GameConfig) {
        let config = Settings::default().resolve().expect("defaults are valid");
        let state = GameState::new_with_seed(config.grid, 21);
        (Driver::new(state, &config, now), config)
    }

    #[test]
    fn quit_stops_the_loop() {
        let (mut driver, _) = driver(Instant::now());
        assert_eq!(driver.handle_input(GameInput::Quit), Flow::Quit);
        assert_eq!(driver.handle_input(GameInput::Pause), Flow::Continue);
    }

    #[test]
    fn restart_key_only_works_after_game_over() {
        let (mut driver, _) = driver(Instant::now());
        driver.dispatch(Command::SetDirection(Direction::Down));
        driver.dispatch(Command::Tick);
        let head = driver.state().head();

        driver.handle_input(GameInput::Restart);
        assert_eq!(driver.state().head(), head);

        for _ in 0..TIME_LIMIT_SECS {
            driver.dispatch(Command::CountdownTick);
        }
        assert_eq!(driver.state().phase(), Phase::Over);

        driver.handle_input(GameInput::Restart);
        assert_eq!(driver.state().phase(), Phase::Running);
        assert_eq!(driver.state().time_left(), TIME_LIMIT_SECS);
    }

    #[test]
    fn confirm_restarts_at_any_time() {
        let (mut driver, _) = driver(Instant::now());
        driver.dispatch(Command::Tick);
        driver.dispatch(Command::CountdownTick);

        driver.handle_input(GameInput::Confirm);

        assert_eq!(driver.state().time_left(), TIME_LIMIT_SECS);
        assert_eq!(driver.state().phase(), Phase::Running);
    }

    #[test]
    fn paused_game_restarts_only_on_confirm() {
        let config = Settings::default().resolve().expect("defaults are valid");
        let mut state = GameState::new_with_seed(config.grid, 21);
        let next = state.head().step(Direction::Right);
        state.debug_set_food(next);
        let mut driver = Driver::new(state, &config, Instant::now());
        driver.dispatch(Command::Tick);
        driver.dispatch(Command::CountdownTick);
        assert_eq!(driver.state().score(), 1);

        driver.handle_input(GameInput::Pause);
        let head = driver.state().head();
        let body: Vec<_> = driver.state().body().copied().collect();
        let food = driver.state().food();

        driver.handle_input(GameInput::Restart);

        assert_eq!(driver.state().phase(), Phase::Paused);
        assert_eq!(driver.state().head(), head);
        assert_eq!(driver.state().body().copied().collect::<Vec<_>>(), body);
        assert_eq!(driver.state().food(), food);
        assert_eq!(driver.state().score(), 1);
        assert_eq!(driver.state().time_left(), TIME_LIMIT_SECS - 1);

        driver.handle_input(GameInput::Confirm);

        assert_eq!(driver.state().phase(), Phase::Running);
        assert_eq!(driver.state().score(), 0);
        assert_eq!(driver.state().time_left(), TIME_LIMIT_SECS);
        assert_eq!(driver.state().highest_score(), 1);
    }

    #[test]
    fn advance_runs_ticks_and_countdown_on_their_own_clocks() {
        let start = Instant::now();
        let (mut driver, _) = driver(start);
        let head = driver.state().head();

        for step in 1..=10 {
            driver.advance(start + Duration::from_millis(step * 100));
        }

        assert_eq!(driver.state().head().x, head.x + 10);
        assert_eq!(driver.state().time_left(), TIME_LIMIT_SECS - 1);
    }

    #[test]
    fn stalled_frame_still_counts_every_second() {
        let start = Instant::now();
        let (mut driver, _) = driver(start);
        driver.dispatch(Command::SetDirection(Direction::Down));

        driver.advance(start + Duration::from_millis(3050));

        assert_eq!(driver.state().time_left(), TIME_LIMIT_SECS - 3);
        assert_eq!(driver.state().head().y, 6);
    }

    #[test]
    fn paused_game_ignores_scheduled_commands() {
        let start = Instant::now();
        let (mut driver, _) = driver(start);
        driver.handle_input(GameInput::Pause);
        let head = driver.state().head();

        driver.advance(start + Duration::from_secs(5));

        assert_eq!(driver.state().phase(), Phase::Paused);
        assert_eq!(driver.state().head(), head);
        assert_eq!(driver.state().time_left(), TIME_LIMIT_SECS);
    }
}
