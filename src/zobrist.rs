use crate::level::{Level, Position};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Zobrist hash for level states
pub struct Zobrist {
    width: usize,
    box_hashes: Vec<u64>,
    player_hashes: Vec<u64>,
}

impl Zobrist {
    pub fn new(width: usize, height: usize) -> Self {
        // Use a seeded PRNG for reproducible Zobrist hashes
        let mut rng = ChaCha8Rng::seed_from_u64(0x5ec0_5ba4_c0de_f00d);

        let cells = width * height;
        let box_hashes = (0..cells).map(|_| rng.next_u64()).collect();
        let player_hashes = (0..cells).map(|_| rng.next_u64()).collect();

        Zobrist {
            width,
            box_hashes,
            player_hashes,
        }
    }

    pub fn for_level(level: &Level) -> Self {
        Self::new(level.width(), level.height())
    }

    fn offset(&self, pos: Position) -> usize {
        pos.1 as usize * self.width + pos.0 as usize
    }

    /// Get hash value for a box at a specific position
    pub fn box_hash(&self, pos: Position) -> u64 {
        self.box_hashes[self.offset(pos)]
    }

    /// Get hash value for player position
    pub fn player_hash(&self, pos: Position) -> u64 {
        self.player_hashes[self.offset(pos)]
    }

    /// Compute hash for all boxes in a level
    pub fn compute_boxes_hash(&self, level: &Level) -> u64 {
        level
            .box_positions()
            .fold(0u64, |hash, pos| hash ^ self.box_hash(pos))
    }

    /// Compute the hash for a level state (boxes hash XOR player position hash).
    /// Box order does not matter.
    pub fn compute_hash(&self, level: &Level) -> u64 {
        self.compute_boxes_hash(level) ^ self.player_hash(level.player_pos())
    }
}
