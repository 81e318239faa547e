use std::{collections::BTreeMap, time::Duration};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerMode {
    /// Re-arms after firing, carrying any overshoot into the next period
    Loop,
    /// Resets and stops after firing once
    OneShot,
}

/// A restartable timer driven by frame deltas
#[derive(Clone, Debug)]
pub struct Timer {
    interval: Duration,
    mode: TimerMode,
    elapsed: Duration,
    carry: Duration,
    running: bool,
}

impl Timer {
    /// A stopped timer
    pub fn new(interval: Duration, mode: TimerMode) -> Self {
        Self {
            interval,
            mode,
            elapsed: Duration::ZERO,
            carry: Duration::ZERO,
            running: false,
        }
    }

    /// A running looping timer
    pub fn looping(interval: Duration) -> Self {
        let mut timer = Self::new(interval, TimerMode::Loop);
        timer.start();
        timer
    }

    /// A running one-shot timer
    pub fn one_shot(interval: Duration) -> Self {
        let mut timer = Self::new(interval, TimerMode::OneShot);
        timer.start();
        timer
    }

    /// Advances the timer by `delta`. Returns true if it fired, which happens
    /// at most once per call.
    pub fn update(&mut self, delta: Duration) -> bool {
        if !self.running {
            return false;
        }

        self.elapsed += delta;

        if self.interval.is_zero() {
            return false;
        }

        let total = self.elapsed();
        if total < self.interval {
            return false;
        }

        match self.mode {
            TimerMode::Loop => {
                let overshoot = total - self.interval;
                self.restart();
                self.carry = overshoot;
            }
            TimerMode::OneShot => self.reset(),
        }

        true
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Clears elapsed time and starts
    pub fn restart(&mut self) {
        self.elapsed = Duration::ZERO;
        self.carry = Duration::ZERO;
        self.start();
    }

    /// Clears elapsed time and stops
    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
        self.carry = Duration::ZERO;
        self.stop();
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Running and due, i.e. the next update will fire
    pub fn is_finished(&self) -> bool {
        self.running && !self.interval.is_zero() && self.elapsed() >= self.interval
    }

    /// Time accumulated in the current period, carry included
    pub fn elapsed(&self) -> Duration {
        self.elapsed + self.carry
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }
}

/// Keys order by insertion
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerKey(u64);

type TimerCallback<C> = Box<dyn FnMut(&mut C, TimerKey)>;

/// Fans one per-frame clock signal out to many timers.
///
/// Callbacks receive a caller-chosen context `C` so they can act on
/// application state without capturing it.
pub struct Scheduler<C> {
    next_key: u64,
    entries: BTreeMap<TimerKey, (Timer, TimerCallback<C>)>,
}

impl<C> Default for Scheduler<C> {
    fn default() -> Self {
        Self {
            next_key: 0,
            entries: BTreeMap::new(),
        }
    }
}

impl<C> Scheduler<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<F>(&mut self, timer: Timer, callback: F) -> TimerKey
    where
        F: FnMut(&mut C, TimerKey) + 'static,
    {
        let key = TimerKey(self.next_key);
        self.next_key += 1;
        self.entries.insert(key, (timer, Box::new(callback)));
        key
    }

    pub fn remove(&mut self, key: &TimerKey) -> Option<Timer> {
        self.entries.remove(key).map(|(timer, _)| timer)
    }

    pub fn timer(&self, key: &TimerKey) -> Option<&Timer> {
        self.entries.get(key).map(|(timer, _)| timer)
    }

    pub fn timer_mut(&mut self, key: &TimerKey) -> Option<&mut Timer> {
        self.entries.get_mut(key).map(|(timer, _)| timer)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Updates every timer by `delta` and runs the callbacks of those that
    /// fired, oldest timer first. Returns how many fired.
    pub fn advance(&mut self, context: &mut C, delta: Duration) -> usize {
        let mut fired = 0;
        for (key, (timer, callback)) in self.entries.iter_mut() {
            if timer.update(delta) {
                callback(&mut *context, *key);
                fired += 1;
            }
        }
        fired
    }
}
