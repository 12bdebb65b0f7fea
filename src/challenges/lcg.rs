//! Seeded linear-congruential generator for challenge shuffles
//!
//! Draws use exact integer arithmetic. Changing the constants or the draw
//! order reshuffles the challenge groups of existing profiles.

const MULTIPLIER: i128 = 1_103_515_245;
const INCREMENT: i128 = 12_345;
pub const MODULUS: i64 = 2_147_483_647;

#[derive(Clone, Copy, Debug)]
pub struct Lcg {
    state: i64,
}

impl Lcg {
    pub fn new(seed: i64) -> Self {
        Self { state: seed }
    }

    pub fn state(&self) -> i64 {
        self.state
    }

    /// Next value in `[0, MODULUS)`
    pub fn next(&mut self) -> i64 {
        let raw = (self.state as i128 * MULTIPLIER + INCREMENT) % MODULUS as i128;
        let mut value = raw as i64;
        if value < 0 {
            value += MODULUS;
        }
        self.state = value;
        value
    }

    /// In-place Fisher-Yates shuffle, walking from the back
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = (self.next() % (i as i64 + 1)) as usize;
            items.swap(i, j);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_draws_from_seed_one() {
        let mut rng = Lcg::new(1);
        // 1 * 1103515245 + 12345
        assert_eq!(rng.next(), 1_103_527_590);
        // (1103527590 * 1103515245 + 12345) mod (2^31 - 1)
        let expected = ((1_103_527_590i128 * 1_103_515_245 + 12_345) % 2_147_483_647) as i64;
        assert_eq!(rng.next(), expected);
    }

    #[test]
    fn test_negative_seed_normalized() {
        let mut rng = Lcg::new(-5);
        for _ in 0..100 {
            let v = rng.next();
            assert!((0..MODULUS).contains(&v));
        }
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut items: Vec<u32> = (0..7).collect();
        Lcg::new(42).shuffle(&mut items);
        let mut sorted = items.clone();
        sorted.sort();
        assert_eq!(sorted, (0..7).collect::<Vec<_>>());
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = Lcg::new(7920);
        let mut b = Lcg::new(7920);
        for _ in 0..32 {
            assert_eq!(a.next(), b.next());
        }
        assert_eq!(a.state(), b.state());
    }
}
