use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const TEMP_START: f64 = 35.0;
const TEMP_MIN: f64 = 30.0;
const TEMP_MAX: f64 = 55.0;

/// Simulated CPU temperature for the taskbar, a bounded random walk
pub struct TemperatureSensor {
    current: f64,
    rng: StdRng,
}

impl TemperatureSensor {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Reproducible walk for tests
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            current: TEMP_START,
            rng,
        }
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    /// Take one step of the walk and return the new reading
    pub fn sample(&mut self) -> f64 {
        let r: f64 = self.rng.gen_range(0.0..1.0);
        self.current = (self.current + (r - 0.4) * 2.0).clamp(TEMP_MIN, TEMP_MAX);
        self.current
    }

    pub fn label(&self) -> String {
        format!("Temp: {:.1}°C", self.current)
    }
}

impl Default for TemperatureSensor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_35() {
        let sensor = TemperatureSensor::with_seed(7);
        assert_eq!(sensor.label(), "Temp: 35.0°C");
    }

    #[test]
    fn test_walk_stays_in_bounds_and_steps_are_small() {
        let mut sensor = TemperatureSensor::with_seed(12345);
        let mut previous = sensor.current();
        for _ in 0..10_000 {
            let reading = sensor.sample();
            assert!((TEMP_MIN..=TEMP_MAX).contains(&reading));
            assert!((reading - previous).abs() <= 1.2 + f64::EPSILON);
            previous = reading;
        }
    }

    #[test]
    fn test_same_seed_same_walk() {
        let mut a = TemperatureSensor::with_seed(0);
        let mut b = TemperatureSensor::with_seed(0);
        let walk_a: Vec<f64> = (0..50).map(|_| a.sample()).collect();
        let walk_b: Vec<f64> = (0..50).map(|_| b.sample()).collect();
        assert_eq!(walk_a, walk_b);
        assert!(walk_a.iter().any(|r| (*r - TEMP_START).abs() > f64::EPSILON));
    }
}
