//! Repeating timer that paces the simulation
//!
//! The engine has no notion of time. The front end arms a [`TickDriver`] while a
//! game is running and disarms it when the game pauses or ends, so no ticks are
//! delivered outside of play.

use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

pub struct TickDriver {
    period: Duration,
    timer: Option<Interval>,
}

impl TickDriver {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            timer: None,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.timer.is_some()
    }

    /// Arm a fresh timer; the first tick arrives one full period from now
    pub fn start(&mut self) {
        let mut timer = interval_at(Instant::now() + self.period, self.period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.timer = Some(timer);
    }

    pub fn stop(&mut self) {
        self.timer = None;
    }

    /// Arm or disarm to match whether the game is running.
    ///
    /// A live timer keeps its phase across pauses of the loop, unless a new
    /// game has just begun, in which case it restarts from a full period.
    pub fn sync(&mut self, running: bool, new_game: bool) {
        match (running, self.is_armed()) {
            (true, false) => self.start(),
            (true, true) if new_game => self.start(),
            (false, true) => self.stop(),
            _ => {}
        }
    }

    /// Wait for the next tick. Never resolves while disarmed.
    pub async fn tick(&mut self) {
        match self.timer.as_mut() {
            Some(timer) => {
                timer.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}
