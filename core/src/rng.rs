//! Deterministic random number generation.
//!
//! RULE: Nothing in the generator may call any platform RNG.
//! All randomness flows through GeneratorRng instances derived
//! from the single master seed the caller supplies.
//!
//! Each table generator gets its own RNG stream, seeded deterministically
//! from (master_seed XOR generator_slot). This means:
//!   - Adding a new generator never changes existing generators' streams.
//!   - Each generator's stream is fully reproducible in isolation.

use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;
use uuid::Uuid;

/// A named, deterministic RNG for a single table generator.
pub struct GeneratorRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl GeneratorRng {
    /// Create a generator RNG from the master seed and a stable
    /// slot index. The index must never change once assigned.
    pub fn new(master_seed: u64, slot_index: u64) -> Self {
        let derived_seed = master_seed ^ (slot_index.wrapping_mul(0x9e37_79b9_7f4a_7c15));
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        use rand::RngCore;
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Draw a raw u64 (full range).
    pub fn next_u64(&mut self) -> u64 {
        use rand::RngCore;
        self.inner.next_u64()
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        use rand::RngCore;
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }

    /// Bernoulli trial: returns true with probability p.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Uniform float in [lo, hi).
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    /// Uniform integer in [lo, hi], both ends inclusive.
    pub fn int_between(&mut self, lo: i64, hi: i64) -> i64 {
        assert!(lo <= hi, "lo must be <= hi");
        lo + self.next_u64_below((hi - lo + 1) as u64) as i64
    }

    /// Standard normal via Box-Muller.
    pub fn normal(&mut self, mu: f64, sigma: f64) -> f64 {
        let u1 = self.next_f64().max(1e-12);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mu + sigma * z
    }

    /// Log-normal: exp of a normal draw.
    pub fn lognormal(&mut self, mu: f64, sigma: f64) -> f64 {
        self.normal(mu, sigma).exp()
    }

    /// Exponential with the given mean.
    pub fn exponential(&mut self, mean: f64) -> f64 {
        -mean * self.next_f64().max(1e-12).ln()
    }

    /// Beta(a, b) via Johnk's algorithm. Adequate for the small shape
    /// parameters used by the cohort price-sensitivity curves.
    pub fn beta(&mut self, a: f64, b: f64) -> f64 {
        loop {
            let x = self.next_f64().max(1e-12).powf(1.0 / a);
            let y = self.next_f64().max(1e-12).powf(1.0 / b);
            if x + y <= 1.0 {
                return x / (x + y);
            }
        }
    }

    /// Weighted categorical draw over (item, weight) pairs.
    /// Weights need not sum to exactly 1.0; the last item absorbs
    /// floating-point residue.
    pub fn pick<'a, T>(&mut self, weighted: &'a [(T, f64)]) -> &'a T {
        assert!(!weighted.is_empty(), "pick on empty slice");
        let total: f64 = weighted.iter().map(|(_, w)| w).sum();
        let roll = self.next_f64() * total;
        let mut cumulative = 0.0;
        for (item, weight) in weighted {
            cumulative += weight;
            if roll < cumulative {
                return item;
            }
        }
        &weighted[weighted.len() - 1].0
    }

    /// Uniform index in [0, len).
    pub fn index_below(&mut self, len: usize) -> usize {
        self.next_u64_below(len as u64) as usize
    }

    /// Deterministic v4-shaped UUID drawn from this stream.
    pub fn uuid(&mut self) -> Uuid {
        let mut bytes = [0u8; 16];
        bytes[..8].copy_from_slice(&self.next_u64().to_le_bytes());
        bytes[8..].copy_from_slice(&self.next_u64().to_le_bytes());
        uuid::Builder::from_random_bytes(bytes).into_uuid()
    }
}

/// All generator RNGs for a single run, indexed by stable slot.
pub struct RngBank {
    master_seed: u64,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn for_generator(&self, slot: GeneratorSlot) -> GeneratorRng {
        GeneratorRng::new(self.master_seed, slot as u64).with_name(slot.name())
    }
}

/// Stable generator slot assignments.
/// NEVER reorder or remove entries — only append.
/// Reordering changes every generator's seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum GeneratorSlot {
    Customer = 0,
    Supplier = 1,
    Product = 2,
    Campaign = 3,
    Order = 4,
    SupportTicket = 5,
    CartAbandonment = 6,
    Returns = 7,
    SystemMetrics = 8,
    // Add new generators here — append only.
}

impl GeneratorSlot {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Supplier => "supplier",
            Self::Product => "product",
            Self::Campaign => "campaign",
            Self::Order => "order",
            Self::SupportTicket => "support_ticket",
            Self::CartAbandonment => "cart_abandonment",
            Self::Returns => "returns",
            Self::SystemMetrics => "system_metrics",
        }
    }
}
