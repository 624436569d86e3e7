use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{BlockColor, Piece, ShapeKind};

/// Draws random pieces from the fixed catalog of 7 shapes.
///
/// Each draw picks a shape kind and a palette color independently and
/// uniformly, with replacement. The returned piece owns its own copy of the
/// template, so rotating it never alters the catalog.
///
/// The random source is a type parameter so callers can inject any
/// [`Rng`]; the default is a seeded [`Pcg32`].
///
/// # Example
///
/// ```
/// use blocktris_engine::{BlockColor, PieceSeed, ShapeCatalog};
///
/// let seed = PieceSeed::from_bytes([1; 16]);
/// let mut a = ShapeCatalog::with_seed(seed, BlockColor::ALL.to_vec());
/// let mut b = ShapeCatalog::with_seed(seed, BlockColor::ALL.to_vec());
///
/// assert_eq!(a.random_piece(), b.random_piece());
/// ```
#[derive(Debug, Clone)]
pub struct ShapeCatalog<R = Pcg32> {
    rng: R,
    palette: Vec<BlockColor>,
}

impl ShapeCatalog<Pcg32> {
    /// Creates a catalog with a random seed.
    #[must_use]
    pub fn new(palette: Vec<BlockColor>) -> Self {
        Self::with_seed(rand::rng().random(), palette)
    }

    /// Like [`Self::new`], but with a specific seed for deterministic draws.
    #[must_use]
    pub fn with_seed(seed: PieceSeed, palette: Vec<BlockColor>) -> Self {
        Self::with_rng(Pcg32::from_seed(seed.0), palette)
    }
}

impl<R> ShapeCatalog<R>
where
    R: Rng,
{
    /// Creates a catalog drawing from `rng`.
    ///
    /// An empty palette falls back to [`BlockColor::ALL`].
    pub fn with_rng(rng: R, palette: Vec<BlockColor>) -> Self {
        let palette = if palette.is_empty() {
            BlockColor::ALL.to_vec()
        } else {
            palette
        };
        Self { rng, palette }
    }

    #[must_use]
    pub fn palette(&self) -> &[BlockColor] {
        &self.palette
    }

    /// Draws a fresh piece anchored at the origin.
    pub fn random_piece(&mut self) -> Piece {
        let kind: ShapeKind = self.rng.random();
        let color = self.palette[self.rng.random_range(0..self.palette.len())];
        Piece::new(kind, color)
    }
}

/// Seed for deterministic piece generation.
///
/// A 128-bit seed for the catalog's random number generator. The same seed
/// yields the same sequence of shapes and colors, which makes games
/// reproducible for debugging and testing.
///
/// The seed is written as a 32-character hex string, both by [`fmt::Display`]
/// and by serde, and parsed back by [`FromStr`] (upper or lower case).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceSeed([u8; 16]);

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid seed {input:?}: expected 32 hex characters")]
pub struct ParseSeedError {
    #[error(not(source))]
    input: String,
}

impl PieceSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for PieceSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseSeedError {
            input: s.to_owned(),
        };
        if s.len() != 32 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(err());
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| err())?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PieceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `PieceSeed` values with `rng.random()`.
impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}

/// RNG that always yields zero bits, so every draw is the first kind and color.
#[cfg(test)]
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ZeroRng;

#[cfg(test)]
impl rand::RngCore for ZeroRng {
    fn next_u32(&mut self) -> u32 {
        0
    }

    fn next_u64(&mut self) -> u64 {
        0
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        dst.fill(0);
    }
}
