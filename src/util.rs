//! Shared Types
//!
//! Index and weight typedefs used across the crate, plus the deterministic
//! random number generator used by the randomized test utilities.
//!

use crate::rand_xoshiro::rand_core::RngCore;

cfg_if::cfg_if! {
    if #[cfg(feature="i32_weight")] {
        /// use i32 to store weight, to be compatible with 32-bit matching solvers
        pub type Weight = i32;
    } else {
        pub type Weight = isize;
    }
}

cfg_if::cfg_if! {
    if #[cfg(feature="u32_index")] {
        // use u32 to store index, for less memory usage
        pub type VertexIndex = u32;  // the vertex index in the input graph
        pub type VertexNum = VertexIndex;
    } else {
        pub type VertexIndex = usize;
        pub type VertexNum = VertexIndex;
    }
}

/// stable handle of a non-trivial blossom inside [`crate::blossom::BlossomArena`]
pub type BlossomIndex = usize;

/// an ordered pair of vertices `(v, w)`; the direction is meaningful for label edges,
/// where the label always enters through the second endpoint
pub type EdgePair = (VertexIndex, VertexIndex);

#[allow(dead_code)]
/// use Xoshiro256StarStar for deterministic random number generator
pub type DeterministicRng = rand_xoshiro::Xoshiro256StarStar;

pub trait F64Rng {
    fn next_f64(&mut self) -> f64;
}

impl F64Rng for DeterministicRng {
    fn next_f64(&mut self) -> f64 {
        f64::from_bits(0x3FF << 52 | self.next_u64() >> 12) - 1.
    }
}
