//! Trajectory policy: control-point placement, sampling density and pacing.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

use crate::algorithm::spline::Spline;
use crate::models::point::Point;

/// Dense, timed path executed for a single move request.
pub type Trajectory = Vec<Point>;

/// Minimum number of samples on any curve.
pub const MIN_SAMPLE_COUNT: usize = 3;
/// Endpoint distance (px) covered by one additional sample.
pub const PIXELS_PER_SAMPLE: f64 = 6.0;

/// Decisions the cursor delegates when planning and pacing a move.
///
/// Implementations hold no per-call state besides their randomness source.
pub trait TrajectoryPolicy {
    /// Ambient idle time between discrete actions.
    fn sleep_duration(&mut self) -> Duration;

    /// Dwell time between button press and release.
    fn click_sleep_duration(&mut self) -> Duration;

    /// Offset applied when recentering on the screen.
    fn screen_center_offsets(&mut self) -> (f64, f64);

    /// Wheel clicks for one scroll step.
    fn scroll_increment(&mut self) -> i64;

    /// Points the curve must pass through. Empty for a zero-length move.
    fn control_points(&mut self, from: &Point, to: &Point) -> Vec<Point>;

    /// Number of samples to take along the fitted curve.
    fn sample_count(&self, points: &[Point]) -> usize;

    /// Attaches a travel duration to every point.
    fn assign_durations(&mut self, points: Vec<Point>) -> Trajectory;

    /// Unconstrained destination for idle wandering.
    fn wandering_destination(&mut self, current: &Point) -> Point;

    /// Full timed path from `from` to `to`, or `None` for a degenerate move.
    fn trajectory(&mut self, from: &Point, to: &Point) -> Option<Trajectory> {
        let control = self.control_points(from, to);
        let count = self.sample_count(&control);
        let spline = Spline::from_points(&control, count)?;
        let points = spline.points().collect();
        Some(self.assign_durations(points))
    }
}

/// Calibrated policy imitating ballistic-then-corrective hand motion.
#[derive(Debug, Clone)]
pub struct HumanLikePolicy<R: Rng = StdRng> {
    rng: R,
}

impl HumanLikePolicy<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> HumanLikePolicy<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    fn gaussian(&mut self, mean: f64, std_dev: f64) -> f64 {
        let z: f64 = self.rng.sample(StandardNormal);
        mean + std_dev * z
    }

    fn abs_gaussian_secs(&mut self, mean: f64, std_dev: f64) -> Duration {
        Duration::from_secs_f64(self.gaussian(mean, std_dev).abs())
    }
}

impl<R: Rng> TrajectoryPolicy for HumanLikePolicy<R> {
    fn sleep_duration(&mut self) -> Duration {
        let base = self.abs_gaussian_secs(0.1, 0.6);
        let multiplier: u32 = self.rng.gen_range(0..=3);
        base * multiplier
    }

    fn click_sleep_duration(&mut self) -> Duration {
        Duration::from_secs_f64(self.rng.gen_range(0.001..=0.2))
    }

    fn screen_center_offsets(&mut self) -> (f64, f64) {
        let max_offset = 20;
        let x: i32 = self.rng.gen_range(-max_offset..=max_offset);
        let y: i32 = self.rng.gen_range(-max_offset..=max_offset);
        (x as f64, y as f64)
    }

    fn scroll_increment(&mut self) -> i64 {
        self.rng.gen_range(-5..=-2)
    }

    fn control_points(&mut self, from: &Point, to: &Point) -> Vec<Point> {
        let distance = Point::distance(from, to);
        if distance == 0.0 {
            return Vec::new();
        }

        let rng = &mut self.rng;
        let start = Point::new(from.x, from.y);

        let spread_x = distance / rng.gen_range(2.0..=5.0);
        let spread_y = distance / rng.gen_range(2.0..=5.0);
        let middle = Point::midpoint(from, to).jittered(rng, spread_x, spread_y);

        let approach_x = distance / rng.gen_range(10u32..=50) as f64;
        let approach_y = distance / rng.gen_range(10u32..=50) as f64;
        let approach = to.jittered(rng, approach_x, approach_y);

        let slack_x = rng.gen_range(0u32..=10) as f64;
        let slack_y = rng.gen_range(0u32..=10) as f64;
        let landing = to.jittered(rng, slack_x, slack_y);

        vec![start, middle, approach, landing]
    }

    fn sample_count(&self, points: &[Point]) -> usize {
        let (Some(first), Some(last)) = (points.first(), points.last()) else {
            return MIN_SAMPLE_COUNT;
        };
        let samples = (Point::distance(first, last) / PIXELS_PER_SAMPLE).floor() as usize;
        samples.max(MIN_SAMPLE_COUNT)
    }

    fn assign_durations(&mut self, points: Vec<Point>) -> Trajectory {
        // First half accelerates, the rest settles onto the target.
        let fast_count = (points.len() + 1) / 2;
        points
            .into_iter()
            .enumerate()
            .map(|(index, point)| {
                let duration = if index < fast_count {
                    self.abs_gaussian_secs(0.00001, 0.001)
                } else {
                    self.abs_gaussian_secs(0.01, 0.025)
                };
                point.with_duration(duration)
            })
            .collect()
    }

    fn wandering_destination(&mut self, current: &Point) -> Point {
        let rng = &mut self.rng;
        let mut offset = || {
            let low = -(rng.gen_range(50u32..=600) as f64);
            let high = rng.gen_range(50u32..=600) as f64;
            rng.gen_range(low..=high)
        };
        let offset_x = offset();
        let offset_y = offset();
        Point::new(current.x + offset_x, current.y + offset_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(seed: u64) -> HumanLikePolicy {
        HumanLikePolicy::seeded(seed)
    }

    fn line(length: f64) -> Vec<Point> {
        vec![Point::new(0.0, 0.0), Point::new(length, 0.0)]
    }

    #[test]
    fn sample_count_has_floor_of_three() {
        let policy = policy(1);
        for length in [0.0, 1.0, 6.0, 17.0, 17.9] {
            assert_eq!(policy.sample_count(&line(length)), 3);
        }
        assert_eq!(policy.sample_count(&[]), 3);
    }

    #[test]
    fn sample_count_grows_with_distance() {
        let policy = policy(1);
        assert_eq!(policy.sample_count(&line(30.0)), 5);
        assert_eq!(policy.sample_count(&line(600.0)), 100);

        let mut previous = 0;
        for length in (0..2000).step_by(7) {
            let count = policy.sample_count(&line(length as f64));
            assert!(count >= previous);
            previous = count;
        }
    }

    #[test]
    fn zero_distance_has_no_control_points_or_trajectory() {
        let mut policy = policy(3);
        let here = Point::new(100.0, 100.0);
        assert!(policy.control_points(&here, &here).is_empty());
        assert!(policy.trajectory(&here, &here).is_none());
    }

    #[test]
    fn control_points_follow_landmarks() {
        let mut policy = policy(11);
        let from = Point::new(0.0, 0.0);
        let to = Point::new(400.0, 300.0);
        let distance = 500.0;

        for _ in 0..200 {
            let points = policy.control_points(&from, &to);
            assert_eq!(points.len(), 4);
            assert_eq!((points[0].x, points[0].y), (0.0, 0.0));
            assert!((points[1].x - 200.0).abs() <= distance / 2.0);
            assert!((points[1].y - 150.0).abs() <= distance / 2.0);
            assert!((points[2].x - 400.0).abs() <= distance / 10.0);
            assert!((points[2].y - 300.0).abs() <= distance / 10.0);
            assert!((points[3].x - 400.0).abs() <= 10.0);
            assert!((points[3].y - 300.0).abs() <= 10.0);
        }
    }

    #[test]
    fn trajectory_is_timed_and_lands_near_target() {
        let mut policy = policy(5);
        let from = Point::new(50.0, 80.0);
        let to = Point::new(650.0, 80.0);
        let path = policy.trajectory(&from, &to).expect("non-degenerate move");

        assert!(path.len() >= 90);
        assert!(path.iter().all(|point| point.duration.is_some()));
        let first = &path[0];
        let last = path.last().expect("non-empty");
        assert!((first.x - 50.0).abs() < 1e-9 && (first.y - 80.0).abs() < 1e-9);
        assert!(Point::distance(last, &to) <= 10.0 * std::f64::consts::SQRT_2 + 1e-9);
    }

    #[test]
    fn durations_split_into_fast_then_slow_halves() {
        let mut policy = policy(21);
        let points: Vec<Point> = (0..2001).map(|i| Point::new(i as f64, 0.0)).collect();
        let timed = policy.assign_durations(points);
        assert_eq!(timed.len(), 2001);

        let secs: Vec<f64> = timed
            .iter()
            .map(|point| point.duration.expect("duration assigned").as_secs_f64())
            .collect();
        let fast_count = 1001;
        let fast_mean = secs[..fast_count].iter().sum::<f64>() / fast_count as f64;
        let slow_mean = secs[fast_count..].iter().sum::<f64>() / (secs.len() - fast_count) as f64;

        assert!(fast_mean < 0.002);
        assert!(slow_mean > 0.01);
        assert!(fast_mean * 5.0 < slow_mean);
    }

    #[test]
    fn odd_length_puts_middle_point_in_fast_half() {
        let mut policy = policy(2);
        let timed = policy.assign_durations(vec![Point::new(0.0, 0.0); 3]);
        assert_eq!(timed.len(), 3);
        // Two fast draws with sigma 1ms stay far below 20ms in practice.
        assert!(timed[0].duration.expect("timed") < Duration::from_millis(20));
        assert!(timed[1].duration.expect("timed") < Duration::from_millis(20));
    }

    #[test]
    fn pauses_stay_in_range() {
        let mut policy = policy(9);
        for _ in 0..1000 {
            let click = policy.click_sleep_duration();
            assert!(click >= Duration::from_secs_f64(0.001) && click <= Duration::from_secs_f64(0.2));

            let (dx, dy) = policy.screen_center_offsets();
            assert!((-20.0..=20.0).contains(&dx) && (-20.0..=20.0).contains(&dy));

            let scroll = policy.scroll_increment();
            assert!((-5..=-2).contains(&scroll));
        }
    }

    #[test]
    fn sleep_duration_is_sometimes_zero_and_never_negative() {
        let mut policy = policy(4);
        let draws: Vec<Duration> = (0..400).map(|_| policy.sleep_duration()).collect();
        assert!(draws.iter().any(|d| d.is_zero()));
        assert!(draws.iter().any(|d| !d.is_zero()));
    }

    #[test]
    fn wandering_stays_within_six_hundred_pixels() {
        let mut policy = policy(13);
        let current = Point::new(960.0, 540.0);
        for _ in 0..500 {
            let destination = policy.wandering_destination(&current);
            assert!((destination.x - 960.0).abs() <= 600.0);
            assert!((destination.y - 540.0).abs() <= 600.0);
        }
    }

    #[test]
    fn same_seed_reproduces_trajectory() {
        let from = Point::new(10.0, 10.0);
        let to = Point::new(300.0, 420.0);
        let first = policy(99).trajectory(&from, &to);
        let second = policy(99).trajectory(&from, &to);
        assert_eq!(first, second);
    }
}
