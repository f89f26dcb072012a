// CPython's random module is MT19937 with its own seeding on top:
// random.seed(int) feeds the 32-bit words of |seed| to init_by_array, and
// randint/randrange draw through getrandbits with rejection sampling.
// Matching all three is what makes fixture files byte-identical to the
// ones produced by the Python tooling.

const N: usize = 624;
const M: usize = 397;
const MATRIX_A: u32 = 0x9908_b0df;
const UPPER_MASK: u32 = 0x8000_0000;
const LOWER_MASK: u32 = 0x7fff_ffff;

/// Mersenne Twister (MT19937) seeded and sampled exactly like CPython's
/// `random.Random`.
#[derive(Clone)]
pub struct MersenneTwister {
    mt: [u32; N],
    mti: usize,
}

impl MersenneTwister {
    /// Create a generator seeded as `random.seed(seed)` would seed it.
    pub fn new(seed: u64) -> Self {
        let mut rng = Self {
            mt: [0; N],
            mti: N + 1,
        };
        rng.seed(seed);
        rng
    }

    /// Reseed in place.
    ///
    /// The key is the little-endian list of 32-bit words of the seed, with
    /// high zero words dropped. Zero still contributes one word.
    pub fn seed(&mut self, seed: u64) {
        let low = seed as u32;
        let high = (seed >> 32) as u32;
        if high == 0 {
            self.init_by_array(&[low]);
        } else {
            self.init_by_array(&[low, high]);
        }
    }

    fn init_genrand(&mut self, s: u32) {
        self.mt[0] = s;
        for i in 1..N {
            let prev = self.mt[i - 1];
            self.mt[i] = 1_812_433_253u32
                .wrapping_mul(prev ^ (prev >> 30))
                .wrapping_add(i as u32);
        }
        self.mti = N;
    }

    fn init_by_array(&mut self, key: &[u32]) {
        self.init_genrand(19_650_218);

        let mut i = 1;
        let mut j = 0;
        for _ in 0..N.max(key.len()) {
            let prev = self.mt[i - 1];
            self.mt[i] = (self.mt[i] ^ (prev ^ (prev >> 30)).wrapping_mul(1_664_525))
                .wrapping_add(key[j])
                .wrapping_add(j as u32);
            i += 1;
            j += 1;
            if i >= N {
                self.mt[0] = self.mt[N - 1];
                i = 1;
            }
            if j >= key.len() {
                j = 0;
            }
        }

        for _ in 0..N - 1 {
            let prev = self.mt[i - 1];
            self.mt[i] = (self.mt[i] ^ (prev ^ (prev >> 30)).wrapping_mul(1_566_083_941))
                .wrapping_sub(i as u32);
            i += 1;
            if i >= N {
                self.mt[0] = self.mt[N - 1];
                i = 1;
            }
        }

        // MSB is 1, assuring a non-zero initial array
        self.mt[0] = 0x8000_0000;
    }

    fn twist(&mut self) {
        for kk in 0..N {
            let y = (self.mt[kk] & UPPER_MASK) | (self.mt[(kk + 1) % N] & LOWER_MASK);
            let mag = if y & 1 != 0 { MATRIX_A } else { 0 };
            self.mt[kk] = self.mt[(kk + M) % N] ^ (y >> 1) ^ mag;
        }
        self.mti = 0;
    }

    /// Next tempered 32-bit output (`genrand_uint32`).
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        if self.mti >= N {
            self.twist();
        }

        let mut y = self.mt[self.mti];
        self.mti += 1;

        y ^= y >> 11;
        y ^= (y << 7) & 0x9d2c_5680;
        y ^= (y << 15) & 0xefc6_0000;
        y ^ (y >> 18)
    }

    /// `random.getrandbits(k)` for `k <= 64`.
    ///
    /// Words are consumed low word first; the last word keeps only its top
    /// bits, so `getrandbits(40)` uses one full word and 8 bits of the next.
    ///
    /// # Panics
    ///
    /// Panics if `k > 64`.
    pub fn getrandbits(&mut self, k: u32) -> u64 {
        assert!(k <= 64, "getrandbits supports at most 64 bits, got {}", k);

        if k == 0 {
            return 0;
        }
        if k <= 32 {
            return (self.next_u32() >> (32 - k)) as u64;
        }

        let low = self.next_u32() as u64;
        let rest = k - 32;
        let high = (self.next_u32() >> (32 - rest)) as u64;
        (high << 32) | low
    }

    /// `random.random()`: a float in [0, 1) with 53 bits of precision.
    pub fn random(&mut self) -> f64 {
        let a = (self.next_u32() >> 5) as f64;
        let b = (self.next_u32() >> 6) as f64;
        (a * 67_108_864.0 + b) * (1.0 / 9_007_199_254_740_992.0)
    }

    /// Uniform integer in `[0, n)` by rejection on `bit_length(n)` bits,
    /// the same draw sequence as CPython's `_randbelow`.
    ///
    /// # Panics
    ///
    /// Panics if `n == 0`.
    pub fn randbelow(&mut self, n: u64) -> u64 {
        assert!(n > 0, "randbelow requires a non-empty range");

        let k = u64::BITS - n.leading_zeros();
        let mut r = self.getrandbits(k);
        while r >= n {
            r = self.getrandbits(k);
        }
        r
    }

    /// Uniform integer in the inclusive range `[low, high]`
    /// (`random.randint(low, high)`).
    ///
    /// # Panics
    ///
    /// Panics if `low > high`.
    pub fn randint(&mut self, low: u64, high: u64) -> u64 {
        assert!(low <= high, "empty range for randint({}, {})", low, high);

        match (high - low).checked_add(1) {
            Some(width) => low + self.randbelow(width),
            // [0, u64::MAX]: every 64-bit value is in range
            None => self.getrandbits(64),
        }
    }
}
