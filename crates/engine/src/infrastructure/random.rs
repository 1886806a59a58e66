//! Random implementations.

use crate::infrastructure::ports::RandomPort;

/// System random - uses real randomness.
pub struct SystemRandom;

impl SystemRandom {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPort for SystemRandom {
    fn gen_range(&self, min: i32, max: i32) -> i32 {
        use rand::Rng;
        if min >= max {
            return min;
        }
        rand::thread_rng().gen_range(min..max)
    }

    fn gen_unit(&self) -> f32 {
        use rand::Rng;
        rand::thread_rng().gen::<f32>()
    }
}

/// Fixed random for testing.
#[cfg(test)]
pub struct FixedRandom {
    pub int: i32,
    pub unit: f32,
}

#[cfg(test)]
impl RandomPort for FixedRandom {
    fn gen_range(&self, min: i32, max: i32) -> i32 {
        self.int.clamp(min, (max - 1).max(min))
    }

    fn gen_unit(&self) -> f32 {
        self.unit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_random_stays_in_half_open_ranges() {
        let random = SystemRandom::new();
        for _ in 0..1_000 {
            let n = random.gen_range(0, 10);
            assert!((0..10).contains(&n));
            let u = random.gen_unit();
            assert!((0.0..1.0).contains(&u));
        }
        assert_eq!(random.gen_range(5, 5), 5);
    }

    #[test]
    fn fixed_random_is_clamped_to_range() {
        let random = FixedRandom { int: 250, unit: 0.5 };
        assert_eq!(random.gen_range(0, 100), 99);
        assert_eq!(random.gen_range(0, 10), 9);
        assert_eq!(random.gen_unit(), 0.5);
    }
}
