//! Named sets of pinned lattice vertices.

use alloc::vec::Vec as AllocVec;

/// Which vertices are pinned when the lattice is (re)built.
///
/// Indices are row-major, `row * n + col`, with row 0 at the top.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FixedPointArrangement {
    /// Both top corners. Lattices of 16 or more per side also pin the
    /// vertex diagonally inside each corner.
    #[default]
    Curtain,
    /// Top-left and bottom-left corners.
    FlagLeft,
    /// Top-right and bottom-right corners.
    FlatRight,
    FourCorners,
    AllTop,
    AllLeft,
    AllRight,
    AllLeftRight,
    AllPerimeter,
    /// Nothing pinned.
    Loose,
}

impl FixedPointArrangement {
    pub const ALL: [FixedPointArrangement; 10] = [
        FixedPointArrangement::Curtain,
        FixedPointArrangement::FlagLeft,
        FixedPointArrangement::FlatRight,
        FixedPointArrangement::FourCorners,
        FixedPointArrangement::AllTop,
        FixedPointArrangement::AllLeft,
        FixedPointArrangement::AllRight,
        FixedPointArrangement::AllLeftRight,
        FixedPointArrangement::AllPerimeter,
        FixedPointArrangement::Loose,
    ];

    /// Lattice indices pinned by this arrangement on an `n`×`n` lattice.
    ///
    /// Indices may repeat on tiny lattices (e.g. `n == 1`); pinning is
    /// idempotent so callers need not dedupe.
    pub fn pinned_indices(self, n: usize) -> AllocVec<usize> {
        use FixedPointArrangement::*;

        if n == 0 {
            return AllocVec::new();
        }
        let last = n - 1;
        match self {
            Curtain => {
                let mut v = alloc::vec![0, last];
                if n >= 16 {
                    v.push(n + 1);
                    v.push(2 * n - 2);
                }
                v
            }
            FlagLeft => alloc::vec![0, last * n],
            FlatRight => alloc::vec![last, n * n - 1],
            FourCorners => alloc::vec![0, last, last * n, n * n - 1],
            AllTop => (0..n).collect(),
            AllLeft => (0..n).map(|r| r * n).collect(),
            AllRight => (0..n).map(|r| r * n + last).collect(),
            AllLeftRight => (0..n).flat_map(|r| [r * n, r * n + last]).collect(),
            AllPerimeter => {
                let mut v: AllocVec<usize> = (0..n).collect();
                v.extend((0..n).map(|c| last * n + c));
                for r in 1..last {
                    v.push(r * n);
                    v.push(r * n + last);
                }
                v
            }
            Loose => AllocVec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curtain_adds_inner_pins_on_large_lattices() {
        assert_eq!(FixedPointArrangement::Curtain.pinned_indices(4), alloc::vec![0, 3]);
        assert_eq!(
            FixedPointArrangement::Curtain.pinned_indices(16),
            alloc::vec![0, 15, 17, 30]
        );
    }

    #[test]
    fn perimeter_covers_every_border_vertex_once() {
        let n = 5;
        let mut pins = FixedPointArrangement::AllPerimeter.pinned_indices(n);
        pins.sort_unstable();
        pins.dedup();
        assert_eq!(pins.len(), 4 * (n - 1));
        for idx in pins {
            let (r, c) = (idx / n, idx % n);
            assert!(r == 0 || c == 0 || r == n - 1 || c == n - 1);
        }
    }

    #[test]
    fn left_right_pins_both_columns() {
        let pins = FixedPointArrangement::AllLeftRight.pinned_indices(3);
        assert_eq!(pins, alloc::vec![0, 2, 3, 5, 6, 8]);
    }

    #[test]
    fn loose_pins_nothing() {
        assert!(FixedPointArrangement::Loose.pinned_indices(8).is_empty());
    }
}
