//! Frame-rate limiter
//!
//! Sleeps after each present so frames start at a steady cadence. The wake
//! target advances by one frame duration per call but is never allowed to
//! fall more than [`MAX_DRIFT`] behind the clock, so a long stall doesn't
//! turn into a burst of unpaced catch-up frames.

use std::time::{Duration, Instant};

use crate::error::{ConfigError, ConfigResult};

/// How far the wake target may lag behind "now"
pub const MAX_DRIFT: Duration = Duration::from_millis(10);

#[derive(Debug, Clone)]
pub struct FrameRateLimiter {
    frame: Duration,
    sleep_until: Instant,
}

/// Duration of one frame at `fps`
pub fn frame_duration_for(fps: i32) -> ConfigResult<Duration> {
    if fps <= 0 {
        return Err(ConfigError::InvalidFrameRate(fps));
    }
    Ok(Duration::from_secs_f64(1.0 / fps as f64))
}

impl FrameRateLimiter {
    pub fn new(target_fps: i32) -> ConfigResult<Self> {
        Ok(Self {
            frame: frame_duration_for(target_fps)?,
            sleep_until: Instant::now(),
        })
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame
    }

    /// Frame duration in seconds, as used for the simulation step
    pub fn dt(&self) -> f32 {
        self.frame.as_secs_f32()
    }

    pub fn set_target_fps(&mut self, fps: i32) -> ConfigResult<()> {
        self.frame = frame_duration_for(fps)?;
        log::debug!("Target frame rate set to {}", fps);
        Ok(())
    }

    /// Advance the wake target and return it
    pub fn next_wake(&mut self, now: Instant) -> Instant {
        let scheduled = self.sleep_until + self.frame;
        let floor = now.checked_sub(MAX_DRIFT).unwrap_or(now);
        self.sleep_until = scheduled.max(floor);
        self.sleep_until
    }

    /// Call once per frame after presenting; blocks until the next frame slot
    pub fn post_present(&mut self) {
        let now = Instant::now();
        let wake = self.next_wake(now);
        if wake > now {
            std::thread::sleep(wake - now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_positive_fps() {
        assert!(matches!(FrameRateLimiter::new(0), Err(ConfigError::InvalidFrameRate(0))));
        assert!(matches!(FrameRateLimiter::new(-30), Err(ConfigError::InvalidFrameRate(-30))));

        let mut limiter = FrameRateLimiter::new(60).unwrap();
        assert!(limiter.set_target_fps(0).is_err());
        assert!((limiter.dt() - 1.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn test_frame_duration() {
        let d = frame_duration_for(180).unwrap();
        assert!((d.as_secs_f64() - 1.0 / 180.0).abs() < 1e-9);
        let d = frame_duration_for(1).unwrap();
        assert_eq!(d, Duration::from_secs(1));
    }

    #[test]
    fn test_steady_schedule_advances_one_frame() {
        let mut limiter = FrameRateLimiter::new(100).unwrap();
        let start = limiter.sleep_until;
        let first = limiter.next_wake(start);
        assert_eq!(first - start, Duration::from_millis(10));
        let second = limiter.next_wake(start + Duration::from_millis(5));
        assert_eq!(second - start, Duration::from_millis(20));
    }

    #[test]
    fn test_drift_is_clamped_after_stall() {
        let mut limiter = FrameRateLimiter::new(100).unwrap();
        let start = limiter.sleep_until;
        // Half a second stall: target snaps to now - MAX_DRIFT
        let late = start + Duration::from_millis(500);
        let wake = limiter.next_wake(late);
        assert_eq!(wake, late - MAX_DRIFT);
        // Following frames pace normally from there
        let next = limiter.next_wake(late);
        assert_eq!(next, late);
    }

    #[test]
    fn test_post_present_sleeps_roughly_one_frame() {
        let mut limiter = FrameRateLimiter::new(200).unwrap();
        let begin = Instant::now();
        limiter.post_present();
        limiter.post_present();
        assert!(begin.elapsed() >= Duration::from_millis(5));
    }
}
