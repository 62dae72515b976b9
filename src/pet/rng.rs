//! Small deterministic RNG shared by the mini-games and friend codes.

pub fn next_rng(seed: u64) -> u64 {
    seed.wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407)
}

/// Advance `seed` and return a value in `0..max` (0 when `max` is 0).
pub fn rng_range(seed: &mut u64, max: u32) -> u32 {
    *seed = next_rng(*seed);
    if max == 0 {
        return 0;
    }
    ((*seed >> 33) % max as u64) as u32
}

/// Fisher-Yates shuffle driven by `rng_range`.
pub fn shuffle<T>(items: &mut [T], seed: &mut u64) {
    for i in (1..items.len()).rev() {
        let j = rng_range(seed, (i + 1) as u32) as usize;
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rng_is_deterministic() {
        let mut a = 7u64;
        let mut b = 7u64;
        for _ in 0..20 {
            assert_eq!(rng_range(&mut a, 9), rng_range(&mut b, 9));
        }
    }

    #[test]
    fn range_is_respected() {
        let mut s = 1u64;
        for _ in 0..500 {
            assert!(rng_range(&mut s, 3) < 3);
        }
        assert_eq!(rng_range(&mut s, 0), 0);
    }

    #[test]
    fn shuffle_keeps_elements() {
        let mut v: Vec<u32> = (0..12).collect();
        let mut s = 99u64;
        shuffle(&mut v, &mut s);
        let mut sorted = v.clone();
        sorted.sort();
        assert_eq!(sorted, (0..12).collect::<Vec<_>>());
    }
}
