// Copyright 2026 the Limelight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame pacing and fade.
//!
//! A session redraws on a fixed tick of [`TICK_MS`] (60 Hz). Frame `k` of a
//! session represents `k * TICK_MS` milliseconds of elapsed time. Elapsed
//! time is always derived from the frame index rather than accumulated, and
//! the termination test is done in integer arithmetic, so frame counts are
//! exact for any duration.

/// Redraw rate of a session.
pub const FRAMES_PER_SECOND: u32 = 60;

/// Interval between frames in milliseconds (≈16.67 ms).
pub const TICK_MS: f64 = 1000.0 / FRAMES_PER_SECOND as f64;

/// Returns the elapsed time of frame `frame` in milliseconds.
#[inline]
#[must_use]
pub fn elapsed_ms(frame: u64) -> f64 {
    frame.saturating_mul(1000) as f64 / f64::from(FRAMES_PER_SECOND)
}

/// Returns `true` if `frame`'s elapsed time has reached `duration_ms`.
///
/// The final frame is still drawn; the surface is removed right after it.
#[inline]
#[must_use]
pub const fn is_final_frame(frame: u64, duration_ms: u32) -> bool {
    frame.saturating_mul(1000) >= duration_ms as u64 * FRAMES_PER_SECOND as u64
}

/// Returns the number of deferred frames a session with `duration_ms` runs.
///
/// This is `ceil(duration_ms / TICK_MS)`. Frame 0 runs synchronously when
/// the session starts and is not counted; a zero duration schedules nothing.
#[inline]
#[must_use]
pub const fn scheduled_frames(duration_ms: u32) -> u64 {
    (duration_ms as u64 * FRAMES_PER_SECOND as u64).div_ceil(1000)
}

/// Returns the global draw opacity at `elapsed_ms` into a session.
///
/// Linear fade `max(0, (duration - elapsed) / duration)`. A zero duration
/// yields 0.
#[inline]
#[must_use]
pub fn opacity(elapsed_ms: f64, duration_ms: u32) -> f64 {
    if duration_ms == 0 {
        return 0.0;
    }
    let duration = f64::from(duration_ms);
    ((duration - elapsed_ms) / duration).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_is_sixty_hertz() {
        assert!((TICK_MS - 16.666_666).abs() < 1e-3, "tick was {TICK_MS}");
        assert_eq!(elapsed_ms(0), 0.0);
        assert_eq!(elapsed_ms(60), 1000.0);
        assert_eq!(elapsed_ms(90), 1500.0);
    }

    #[test]
    fn scheduled_frames_is_ceil_of_duration_over_tick() {
        assert_eq!(scheduled_frames(0), 0);
        assert_eq!(scheduled_frames(1), 1);
        assert_eq!(scheduled_frames(16), 1);
        assert_eq!(scheduled_frames(17), 2);
        assert_eq!(scheduled_frames(100), 6);
        assert_eq!(scheduled_frames(1500), 90);
        assert_eq!(scheduled_frames(1501), 91);
    }

    #[test]
    fn first_final_frame_matches_scheduled_count() {
        for duration in [0_u32, 1, 16, 17, 50, 100, 333, 1500, 10_007] {
            let last = scheduled_frames(duration);
            assert!(
                is_final_frame(last, duration),
                "frame {last} should end a {duration} ms session"
            );
            if last > 0 {
                assert!(
                    !is_final_frame(last - 1, duration),
                    "frame {} ended a {duration} ms session early",
                    last - 1
                );
            }
        }
    }

    #[test]
    fn final_frame_agrees_with_float_elapsed() {
        for duration in [1_u32, 100, 1500, 2000] {
            for frame in 0..200 {
                assert_eq!(
                    is_final_frame(frame, duration),
                    elapsed_ms(frame) >= f64::from(duration),
                    "frame {frame}, duration {duration}"
                );
            }
        }
    }

    #[test]
    fn opacity_fades_linearly_and_clamps() {
        assert_eq!(opacity(0.0, 1500), 1.0);
        assert_eq!(opacity(750.0, 1500), 0.5);
        assert_eq!(opacity(1500.0, 1500), 0.0);
        assert_eq!(opacity(1516.7, 1500), 0.0);
    }

    #[test]
    fn opacity_zero_duration_is_zero() {
        assert_eq!(opacity(0.0, 0), 0.0);
        assert_eq!(opacity(16.0, 0), 0.0);
    }

    #[test]
    fn opacity_is_monotonic_over_frames() {
        let duration = 1500;
        let mut prev = f64::INFINITY;
        for frame in 0..=scheduled_frames(duration) {
            let a = opacity(elapsed_ms(frame), duration);
            assert!(a <= prev, "opacity rose at frame {frame}: {prev} -> {a}");
            assert!((0.0..=1.0).contains(&a), "opacity {a} out of range");
            prev = a;
        }
        assert_eq!(prev, 0.0, "last frame must be fully transparent");
    }
}
