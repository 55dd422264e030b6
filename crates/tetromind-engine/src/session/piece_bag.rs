use std::{collections::VecDeque, fmt::Write as _};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
    seq::SliceRandom,
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::PieceKind;

/// Seed for deterministic piece generation.
///
/// A 128-bit seed initializing the random number generator of a
/// [`PieceBag`]. The same seed always produces the same piece sequence,
/// which is what makes simulated games reproducible, recordable, and
/// comparable across weight configurations.
///
/// Serialized as a 32-character hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BagSeed([u8; 16]);

impl BagSeed {
    /// Builds a seed from a plain integer, convenient for CLI flags.
    #[must_use]
    pub const fn from_u64(value: u64) -> Self {
        let mut bytes = [0; 16];
        let value = value.to_be_bytes();
        let mut i = 0;
        while i < value.len() {
            bytes[8 + i] = value[i];
            i += 1;
        }
        Self(bytes)
    }
}

impl Serialize for BagSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let num = u128::from_be_bytes(self.0);
        let mut hex_str = String::with_capacity(2 * self.0.len());
        write!(&mut hex_str, "{num:032x}").unwrap();
        serializer.serialize_str(&hex_str)
    }
}

impl<'de> Deserialize<'de> for BagSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        if hex_str.len() != 32 {
            return Err(serde::de::Error::custom(format!(
                "invalid hex: expected 32 characters, got {}",
                hex_str.len()
            )));
        }
        let num = u128::from_str_radix(&hex_str, 16)
            .map_err(|e| serde::de::Error::custom(format!("invalid hex: {hex_str} ({e})")))?;
        Ok(Self(num.to_be_bytes()))
    }
}

/// Allows generating random `BagSeed` values with `rng.random()`.
impl Distribution<BagSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> BagSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        BagSeed(seed)
    }
}

/// Supplies pieces using the 7-bag randomization system.
///
/// A bag holding all 7 piece kinds is shuffled and drained in order, then
/// refilled. This bounds droughts of any piece kind while keeping the
/// sequence random.
#[derive(Debug, Clone)]
pub struct PieceBag {
    rng: Pcg32,
    queue: VecDeque<PieceKind>,
}

impl Default for PieceBag {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceBag {
    /// Creates a piece bag with a random seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic piece
    /// generation.
    #[must_use]
    pub fn with_seed(seed: BagSeed) -> Self {
        let rng = Pcg32::from_seed(seed.0);
        let queue = VecDeque::with_capacity(PieceKind::LEN * 2);
        let mut this = Self { rng, queue };
        this.refill();
        this
    }

    /// Refills the queue with a shuffled set of 7 pieces when needed.
    ///
    /// After refilling, the queue contains at least 8 elements, so the next
    /// piece can always be previewed even right after a pop.
    fn refill(&mut self) {
        while self.queue.len() <= PieceKind::LEN {
            let mut bag = PieceKind::ALL;
            bag.shuffle(&mut self.rng);
            self.queue.extend(bag);
        }
    }

    /// Draws the next piece from the queue.
    ///
    /// # Panics
    ///
    /// Panics if the queue is empty (cannot happen with the refill logic).
    pub fn pop_next(&mut self) -> PieceKind {
        self.refill();
        self.queue
            .pop_front()
            .expect("piece queue should never be empty")
    }

    /// Returns the upcoming piece without consuming it.
    #[must_use]
    pub fn peek_next(&self) -> PieceKind {
        self.queue[0]
    }
}
