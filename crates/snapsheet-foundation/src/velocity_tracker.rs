//! Release velocity estimation for drag gestures.
//!
//! Impulse strategy: the velocity is derived from the kinetic energy the
//! recent pointer movement would have imparted on a unit mass, which is far
//! less sensitive to a single jittery sample than a two-point difference.

/// Ring buffer size for velocity tracking samples.
const HISTORY_SIZE: usize = 20;

/// Only samples within this window before the newest one are considered.
const HORIZON_MS: i64 = 100;

/// A gap this long between samples means the pointer had stopped.
pub const ASSUME_STOPPED_MS: i64 = 40;

#[derive(Clone, Copy, Debug)]
struct Sample {
    time_ms: i64,
    position: f32,
}

/// 1D velocity tracker over absolute positions.
///
/// ```ignore
/// let mut tracker = VelocityTracker1D::new();
/// tracker.add_data_point(time_ms, position_y);
/// let velocity = tracker.calculate_velocity(); // px/sec
/// ```
#[derive(Clone, Debug)]
pub struct VelocityTracker1D {
    samples: [Option<Sample>; HISTORY_SIZE],
    /// Slot of the newest sample.
    head: usize,
}

impl Default for VelocityTracker1D {
    fn default() -> Self {
        Self::new()
    }
}

impl VelocityTracker1D {
    pub fn new() -> Self {
        Self {
            samples: [None; HISTORY_SIZE],
            head: 0,
        }
    }

    pub fn add_data_point(&mut self, time_ms: i64, position: f32) {
        self.head = (self.head + 1) % HISTORY_SIZE;
        self.samples[self.head] = Some(Sample { time_ms, position });
    }

    /// Velocity in units/second; 0.0 with fewer than two usable samples.
    pub fn calculate_velocity(&self) -> f32 {
        let Some(newest) = self.samples[self.head] else {
            return 0.0;
        };

        // Collected newest first: (age relative to newest, negated; position).
        let mut times = [0.0f32; HISTORY_SIZE];
        let mut positions = [0.0f32; HISTORY_SIZE];
        let mut count = 0;
        let mut slot = self.head;
        let mut previous_time = newest.time_ms;

        while let Some(sample) = self.samples[slot] {
            let age = newest.time_ms - sample.time_ms;
            let gap = (previous_time - sample.time_ms).abs();
            if age > HORIZON_MS || gap > ASSUME_STOPPED_MS {
                break;
            }
            times[count] = -(age as f32);
            positions[count] = sample.position;
            previous_time = sample.time_ms;
            count += 1;
            if count == HISTORY_SIZE {
                break;
            }
            slot = (slot + HISTORY_SIZE - 1) % HISTORY_SIZE;
        }

        if count < 2 {
            return 0.0;
        }
        impulse_velocity(&times[..count], &positions[..count]) * 1000.0
    }

    /// Velocity in units/second, clamped to `[-max_velocity, max_velocity]`.
    pub fn calculate_velocity_with_max(&self, max_velocity: f32) -> f32 {
        if !max_velocity.is_finite() || max_velocity <= 0.0 {
            return 0.0;
        }
        let velocity = self.calculate_velocity();
        if !velocity.is_finite() {
            return 0.0;
        }
        velocity.clamp(-max_velocity, max_velocity)
    }

    pub fn reset(&mut self) {
        self.samples = [None; HISTORY_SIZE];
        self.head = 0;
    }
}

/// Impulse velocity in units/ms. Slices are ordered newest first.
fn impulse_velocity(times: &[f32], positions: &[f32]) -> f32 {
    let oldest = times.len() - 1;
    let mut work = 0.0f32;

    for i in (1..=oldest).rev() {
        let (t_older, t_newer) = (times[i], times[i - 1]);
        if t_older == t_newer {
            continue;
        }
        let v_curr = (positions[i - 1] - positions[i]) / (t_newer - t_older);
        let v_prev = kinetic_energy_to_velocity(work);
        work += (v_curr - v_prev) * v_curr.abs();
        if i == oldest {
            work *= 0.5;
        }
    }

    kinetic_energy_to_velocity(work)
}

/// E = ½·m·v² with m = 1.
#[inline]
fn kinetic_energy_to_velocity(kinetic_energy: f32) -> f32 {
    kinetic_energy.signum() * (2.0 * kinetic_energy.abs()).sqrt()
}
