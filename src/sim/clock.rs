use chrono::{DateTime, Local, TimeDelta};

/// A simulation clock that maps step indices onto simulated timestamps.
///
/// Simulated time is derived from the step counter alone, so the pace at
/// which a caller ticks the clock never affects the timestamps it reports.
///
/// # Examples
///
/// ```
/// use chrono::{Local, TimeZone};
/// use hydro_resort_sim::sim::clock::Clock;
///
/// let start = Local.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
/// let mut clock = Clock::new(start, 15);
///
/// assert_eq!(clock.tick(), (0, start));
/// assert_eq!(clock.step(), 1);
/// assert_eq!(clock.now().format("%H:%M").to_string(), "00:15");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Clock {
    /// Index of the next step to run
    step: u64,
    /// Timestamp of step 0
    start: DateTime<Local>,
    /// Minutes advanced per step
    step_minutes: u32,
}

impl Clock {
    /// Creates a clock at step 0.
    ///
    /// # Arguments
    ///
    /// * `start` - Simulated timestamp of the first step
    /// * `step_minutes` - Minutes advanced per step
    pub fn new(start: DateTime<Local>, step_minutes: u32) -> Self {
        Self {
            step: 0,
            start,
            step_minutes,
        }
    }

    /// Index of the next step to run.
    pub fn step(&self) -> u64 {
        self.step
    }

    /// Timestamp of step 0.
    pub fn start(&self) -> DateTime<Local> {
        self.start
    }

    /// Simulated timestamp of the next step.
    pub fn now(&self) -> DateTime<Local> {
        self.time_at(self.step)
    }

    /// Simulated timestamp at the start of `step`.
    pub fn time_at(&self, step: u64) -> DateTime<Local> {
        let minutes = i64::try_from(step * u64::from(self.step_minutes)).unwrap_or(i64::MAX);
        self.start + TimeDelta::minutes(minutes)
    }

    /// Advances the clock by one step.
    ///
    /// # Returns
    ///
    /// The step index and timestamp before advancing.
    pub fn tick(&mut self) -> (u64, DateTime<Local>) {
        let step = self.step;
        let time = self.now();
        self.step += 1;
        (step, time)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn start() -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2024, 6, 1, 0, 0, 0)
            .single()
            .expect("midnight should exist in the local zone")
    }

    #[test]
    fn test_new_clock() {
        let clock = Clock::new(start(), 15);
        assert_eq!(clock.step(), 0);
        assert_eq!(clock.now(), start());
        assert_eq!(clock.start(), start());
    }

    #[test]
    fn test_tick() {
        let mut clock = Clock::new(start(), 30);
        assert_eq!(clock.tick(), (0, start()));
        assert_eq!(clock.tick(), (1, start() + TimeDelta::minutes(30)));
        assert_eq!(clock.step(), 2);
        assert_eq!(clock.now(), start() + TimeDelta::minutes(60));
    }

    #[test]
    fn test_time_strictly_increases() {
        let mut clock = Clock::new(start(), 15);
        let mut previous = clock.tick().1;
        for _ in 0..200 {
            let (_, time) = clock.tick();
            assert_eq!(time - previous, TimeDelta::minutes(15));
            previous = time;
        }
    }

    #[test]
    fn test_time_at_crosses_days() {
        let clock = Clock::new(start(), 15);
        assert_eq!(clock.time_at(96), start() + TimeDelta::days(1));
    }
}
