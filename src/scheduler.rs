use std::{
    ops::ControlFlow,
    thread,
    time::{Duration, Instant},
};

/// Drives a callback at a fixed cadence. The callback gets the time since its
/// previous call and returns `Break` to stop the loop.
pub trait Scheduler {
    fn on_tick<F>(&mut self, interval: Duration, callback: F) -> anyhow::Result<()>
    where
        F: FnMut(Duration) -> anyhow::Result<ControlFlow<()>>;
}

/// Wall-clock scheduler. Sleeps until each deadline and resyncs instead of
/// bursting when a callback overruns.
#[derive(Debug, Default)]
pub struct FixedRate;

impl Scheduler for FixedRate {
    fn on_tick<F>(&mut self, interval: Duration, mut callback: F) -> anyhow::Result<()>
    where
        F: FnMut(Duration) -> anyhow::Result<ControlFlow<()>>,
    {
        let mut last = Instant::now();
        let mut next = last + interval;
        loop {
            let now = Instant::now();
            if now < next {
                thread::sleep(next - now);
            }
            let now = Instant::now();
            let dt = now - last;
            last = now;

            next += interval;
            if next < now {
                next = now + interval;
            }

            if callback(dt)?.is_break() {
                return Ok(());
            }
        }
    }
}

/// Runs at most `remaining` ticks back to back, each reporting `dt == interval`.
#[derive(Debug)]
pub struct Stepped {
    remaining: usize,
}

impl Stepped {
    pub fn new(ticks: usize) -> Self {
        Stepped { remaining: ticks }
    }
}

impl Scheduler for Stepped {
    fn on_tick<F>(&mut self, interval: Duration, mut callback: F) -> anyhow::Result<()>
    where
        F: FnMut(Duration) -> anyhow::Result<ControlFlow<()>>,
    {
        while self.remaining > 0 {
            self.remaining -= 1;
            if callback(interval)?.is_break() {
                break;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stepped_runs_requested_ticks() {
        let mut calls = 0;
        Stepped::new(5)
            .on_tick(Duration::from_millis(100), |dt| {
                assert_eq!(dt, Duration::from_millis(100));
                calls += 1;
                Ok(ControlFlow::Continue(()))
            })
            .unwrap();
        assert_eq!(calls, 5);
    }

    #[test]
    fn stepped_stops_on_break() {
        let mut calls = 0;
        Stepped::new(10)
            .on_tick(Duration::from_millis(1), |_| {
                calls += 1;
                Ok(if calls == 3 {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                })
            })
            .unwrap();
        assert_eq!(calls, 3);
    }

    #[test]
    fn callback_error_propagates() {
        let result = Stepped::new(3).on_tick(Duration::from_millis(1), |_| {
            anyhow::bail!("render failed")
        });
        assert!(result.is_err());
    }

    #[test]
    fn fixed_rate_waits_between_ticks() {
        let interval = Duration::from_millis(5);
        let start = Instant::now();
        let mut calls = 0;
        let mut first_dt = Duration::ZERO;
        FixedRate
            .on_tick(interval, |dt| {
                if calls == 0 {
                    first_dt = dt;
                }
                calls += 1;
                Ok(if calls == 3 {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                })
            })
            .unwrap();
        assert_eq!(calls, 3);
        assert!(first_dt >= interval);
        assert!(start.elapsed() >= interval * 3);
    }
}
