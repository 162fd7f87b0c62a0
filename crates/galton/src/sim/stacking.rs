//! Bin occupancy and stacked resting positions.
//!
//! Slot `k` of a bin spans `[floor + k * 2r, floor + (k + 1) * 2r)`; its ball center is
//! `floor + r + k * 2r`. Slots are handed out in arrival order, so the first ball sits
//! flush on the floor and every later one rests directly on the previous.
use crate::board::Board;

/// Number of particles resting in each bin.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BinOccupancy {
    counts: Vec<u32>,
}

impl BinOccupancy {
    /// All-empty occupancy for `bins` bins.
    pub fn new(bins: usize) -> Self {
        Self {
            counts: vec![0; bins],
        }
    }

    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    /// Particles in `bin`. Panics if `bin` is out of range.
    pub fn count(&self, bin: u32) -> u32 {
        self.counts[bin as usize]
    }

    /// Total particles across all bins.
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| c as u64).sum()
    }

    pub fn bin_count(&self) -> usize {
        self.counts.len()
    }

    pub fn into_counts(self) -> Vec<u32> {
        self.counts
    }

    /// Returns the pre-increment count of `bin` and records one more arrival.
    fn claim(&mut self, bin: u32) -> u32 {
        let bins = self.counts.len();
        let count = self
            .counts
            .get_mut(bin as usize)
            .unwrap_or_else(|| panic!("bin {bin} outside board with {bins} bins"));
        let slot = *count;
        *count += 1;
        slot
    }
}

/// A stack slot assigned to one particle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StackSlot {
    /// Zero-based arrival order within the bin.
    pub index: u32,
    /// Vertical coordinate of the ball center.
    pub vertical_offset: f32,
}

/// Hands out non-overlapping stack slots for a board's bins.
#[derive(Clone, Debug)]
pub struct BinStacker {
    floor_y: f32,
    ball_radius: f32,
    occupancy: BinOccupancy,
}

impl BinStacker {
    pub fn new(floor_y: f32, ball_radius: f32, bins: usize) -> Self {
        Self {
            floor_y,
            ball_radius,
            occupancy: BinOccupancy::new(bins),
        }
    }

    /// Stacker for `board`'s bins and floor.
    pub fn for_board(board: &Board) -> Self {
        Self::new(board.bin_floor_y(), board.ball_radius(), board.bin_count())
    }

    /// Next slot in `bin`. Panics if `bin` is out of range.
    pub fn allocate(&mut self, bin: u32) -> StackSlot {
        let index = self.occupancy.claim(bin);
        StackSlot {
            index,
            vertical_offset: self.slot_offset(index),
        }
    }

    /// Ball center height of slot `index`, independent of occupancy.
    pub fn slot_offset(&self, index: u32) -> f32 {
        self.floor_y + self.ball_radius + index as f32 * (2.0 * self.ball_radius)
    }

    pub fn occupancy(&self) -> &BinOccupancy {
        &self.occupancy
    }

    pub fn into_occupancy(self) -> BinOccupancy {
        self.occupancy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardSpec;

    #[test]
    fn first_ball_sits_on_the_floor() {
        let mut stacker = BinStacker::new(-2.0, 0.25, 3);
        let slot = stacker.allocate(1);
        assert_eq!(slot.index, 0);
        assert_eq!(slot.vertical_offset, -1.75);
        assert_eq!(stacker.occupancy().counts(), &[0, 1, 0]);
    }

    #[test]
    fn slots_stack_without_gaps_or_overlap() {
        let floor = -2.475f32;
        let r = 0.06f32;
        let mut stacker = BinStacker::new(floor, r, 5);
        let offsets: Vec<f32> = (0..8).map(|_| stacker.allocate(2).vertical_offset).collect();
        for (k, y) in offsets.iter().enumerate() {
            assert_eq!(*y, floor + r + k as f32 * (2.0 * r));
        }
        for w in offsets.windows(2) {
            assert!((w[1] - w[0] - 2.0 * r).abs() < 1e-6);
        }
        assert_eq!(stacker.occupancy().count(2), 8);
    }

    #[test]
    fn bins_stack_independently_in_arrival_order() {
        let mut stacker = BinStacker::new(0.0, 0.5, 3);
        let order = [0, 2, 0, 1, 0, 2];
        let slots: Vec<u32> = order.iter().map(|&b| stacker.allocate(b).index).collect();
        assert_eq!(slots, vec![0, 0, 1, 0, 2, 1]);
        assert_eq!(stacker.occupancy().counts(), &[3, 1, 2]);
        assert_eq!(stacker.occupancy().total(), order.len() as u64);
    }

    #[test]
    fn board_stacker_uses_board_floor() {
        let board = Board::try_new(BoardSpec::additive(4, 1.0).with_ball_radius(0.1)).unwrap();
        let mut stacker = BinStacker::for_board(&board);
        assert_eq!(stacker.occupancy().bin_count(), 5);
        let slot = stacker.allocate(4);
        assert_eq!(slot.vertical_offset, board.bin_floor_y() + 0.1);
    }

    #[test]
    #[should_panic(expected = "bin 3 outside board")]
    fn unknown_bin_panics() {
        BinStacker::new(0.0, 0.1, 3).allocate(3);
    }
}
