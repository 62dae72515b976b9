//! Fixed-timestep clock and the periodic ticker that drives the pet.
//!
//! `draw_web()` calls at ~60fps with a variable delta. `GameTime` turns
//! wall-clock timestamps into whole ticks of a fixed interval, and `Ticker`
//! delivers one callback invocation per elapsed tick.

pub struct GameTime {
    /// Milliseconds per tick (e.g. 2000ms for the pet's decay step).
    ms_per_tick: f64,
    /// Largest frame delta accepted. Anything longer (backgrounded tab) is
    /// clamped, so suspended time is simply lost.
    max_frame_ms: f64,
    /// Accumulated milliseconds not yet consumed as ticks.
    accumulator: f64,
    /// Total elapsed ticks since creation.
    pub total_ticks: u64,
    /// Clamped length of the most recent frame, in milliseconds.
    pub last_frame_ms: u32,
    /// Timestamp of the last update (ms), None before the first frame.
    last_timestamp: Option<f64>,
}

impl GameTime {
    pub fn new(ms_per_tick: u32, max_frame_ms: u32) -> Self {
        Self {
            ms_per_tick: ms_per_tick.max(1) as f64,
            max_frame_ms: max_frame_ms as f64,
            accumulator: 0.0,
            total_ticks: 0,
            last_frame_ms: 0,
            last_timestamp: None,
        }
    }

    /// Feed a wall-clock timestamp (from `performance.now()`).
    /// Returns the number of whole ticks that elapsed since the last call.
    pub fn update(&mut self, now_ms: f64) -> u32 {
        let delta = match self.last_timestamp {
            Some(prev) => (now_ms - prev).clamp(0.0, self.max_frame_ms),
            None => 0.0,
        };
        self.last_timestamp = Some(now_ms);
        self.last_frame_ms = delta as u32;

        self.accumulator += delta;
        let ticks = (self.accumulator / self.ms_per_tick) as u32;
        self.accumulator -= ticks as f64 * self.ms_per_tick;
        self.total_ticks += ticks as u64;
        ticks
    }
}

/// Repeating timer: calls the most recently registered callback once per
/// elapsed interval until stopped.
pub struct Ticker {
    time: GameTime,
    callback: Option<Box<dyn FnMut()>>,
    running: bool,
}

impl Ticker {
    pub fn new(interval_ms: u32, max_frame_ms: u32) -> Self {
        Self {
            time: GameTime::new(interval_ms, max_frame_ms),
            callback: None,
            running: true,
        }
    }

    /// Register (or replace) the tick callback. The interval keeps running;
    /// the next due tick goes to the new callback.
    pub fn set_callback(&mut self, callback: impl FnMut() + 'static) {
        self.callback = Some(Box::new(callback));
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Clamped duration of the last frame, for real-time timers.
    pub fn last_frame_ms(&self) -> u32 {
        self.time.last_frame_ms
    }

    /// Advance to `now_ms` and fire the callback for every due tick.
    /// Returns the number of ticks delivered.
    pub fn update(&mut self, now_ms: f64) -> u32 {
        let ticks = self.time.update(now_ms);
        if !self.running {
            return 0;
        }
        if let Some(cb) = self.callback.as_mut() {
            for _ in 0..ticks {
                cb();
            }
        }
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn first_frame_returns_zero_ticks() {
        let mut gt = GameTime::new(2000, 500);
        assert_eq!(gt.update(0.0), 0);
        assert_eq!(gt.last_frame_ms, 0);
    }

    #[test]
    fn frames_accumulate_into_one_tick() {
        let mut gt = GameTime::new(2000, 500);
        gt.update(0.0);
        let mut total = 0;
        // 125 frames of 16ms = 2000ms
        for i in 1..=125 {
            total += gt.update(i as f64 * 16.0);
        }
        assert_eq!(total, 1);
        assert_eq!(gt.total_ticks, 1);
    }

    #[test]
    fn remainder_carried_over() {
        let mut gt = GameTime::new(100, 500);
        gt.update(0.0);
        assert_eq!(gt.update(150.0), 1);
        assert_eq!(gt.update(200.0), 1);
        assert_eq!(gt.total_ticks, 2);
    }

    #[test]
    fn backgrounded_tab_loses_time() {
        let mut gt = GameTime::new(2000, 500);
        gt.update(0.0);
        // a full minute away only counts as one clamped frame
        assert_eq!(gt.update(60_000.0), 0);
        assert_eq!(gt.last_frame_ms, 500);
    }

    #[test]
    fn clock_going_backwards_is_ignored() {
        let mut gt = GameTime::new(100, 500);
        gt.update(1000.0);
        assert_eq!(gt.update(900.0), 0);
        assert_eq!(gt.last_frame_ms, 0);
    }

    #[test]
    fn ticker_fires_once_per_interval() {
        let count = Rc::new(Cell::new(0));
        let mut ticker = Ticker::new(100, 500);
        let c = count.clone();
        ticker.set_callback(move || c.set(c.get() + 1));

        ticker.update(0.0);
        assert_eq!(ticker.update(350.0), 3);
        assert_eq!(count.get(), 3);
    }

    #[test]
    fn ticker_uses_latest_callback() {
        let first = Rc::new(Cell::new(0));
        let second = Rc::new(Cell::new(0));
        let mut ticker = Ticker::new(100, 500);

        let f = first.clone();
        ticker.set_callback(move || f.set(f.get() + 1));
        ticker.update(0.0);
        ticker.update(150.0); // 1 tick, 50ms carried
        assert_eq!(first.get(), 1);

        let s = second.clone();
        ticker.set_callback(move || s.set(s.get() + 1));
        // carried 50ms + 50ms = next tick, delivered to the new callback
        ticker.update(200.0);
        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 1);
    }

    #[test]
    fn stopped_ticker_delivers_nothing() {
        let count = Rc::new(Cell::new(0));
        let mut ticker = Ticker::new(100, 500);
        let c = count.clone();
        ticker.set_callback(move || c.set(c.get() + 1));
        ticker.update(0.0);
        ticker.stop();
        assert!(!ticker.is_running());
        assert_eq!(ticker.update(400.0), 0);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn ticker_without_callback_still_counts() {
        let mut ticker = Ticker::new(100, 500);
        ticker.update(0.0);
        assert_eq!(ticker.update(200.0), 2);
        assert_eq!(ticker.last_frame_ms(), 200);
    }
}
