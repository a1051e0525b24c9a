//! Axial hex coordinates (q, r)
//!
//! Uses axial coordinates for neighbor lookups and converts to cube space
//! for distance and line interpolation.

use serde::{Deserialize, Serialize};

/// Axial hex coordinate
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct AxialCoord {
    pub q: i32,
    pub r: i32,
}

/// Offset applied to both endpoints before lerping so rounding ties break
/// the same way regardless of line direction.
const LINE_NUDGE: (f64, f64) = (1e-6, 2e-6);

impl AxialCoord {
    pub const ORIGIN: AxialCoord = AxialCoord { q: 0, r: 0 };

    pub fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Cube coordinate S (derived from q and r)
    pub fn s(&self) -> i32 {
        -self.q - self.r
    }

    /// Neighbor in the given direction
    pub fn step(&self, direction: HexDirection) -> Self {
        let offset = direction.offset();
        Self::new(self.q + offset.q, self.r + offset.r)
    }

    /// All 6 neighbors, in direction-table order
    pub fn neighbors(&self) -> [AxialCoord; 6] {
        HexDirection::ALL.map(|d| self.step(d))
    }

    /// Distance in hex steps
    pub fn distance(&self, other: &Self) -> u32 {
        let dq = (self.q - other.q).abs();
        let dr = (self.r - other.r).abs();
        let ds = (self.s() - other.s()).abs();
        ((dq + dr + ds) / 2) as u32
    }

    /// Is `other` one of the six neighbors?
    pub fn is_adjacent(&self, other: &Self) -> bool {
        self.distance(other) == 1
    }

    /// Hex coordinates in a line from self to other (inclusive)
    ///
    /// The line is contiguous, has `distance + 1` entries, and the line from
    /// `other` back to `self` is the exact reverse of this one.
    pub fn line_to(&self, other: &Self) -> Vec<AxialCoord> {
        let n = self.distance(other);
        if n == 0 {
            return vec![*self];
        }

        let (aq, ar) = (self.q as f64 + LINE_NUDGE.0, self.r as f64 + LINE_NUDGE.1);
        let (bq, br) = (other.q as f64 + LINE_NUDGE.0, other.r as f64 + LINE_NUDGE.1);

        let mut results = Vec::with_capacity(n as usize + 1);
        results.push(*self);
        for i in 1..n {
            let t = i as f64 / n as f64;
            let q = aq + (bq - aq) * t;
            let r = ar + (br - ar) * t;
            results.push(Self::round(q, r));
        }
        results.push(*other);
        results
    }

    /// Round floating point hex to nearest integer hex
    fn round(q: f64, r: f64) -> Self {
        let s = -q - r;
        let mut rq = q.round();
        let mut rr = r.round();
        let rs = s.round();

        let q_diff = (rq - q).abs();
        let r_diff = (rr - r).abs();
        let s_diff = (rs - s).abs();

        if q_diff > r_diff && q_diff > s_diff {
            rq = -rr - rs;
        } else if r_diff > s_diff {
            rr = -rq - rs;
        }

        Self::new(rq as i32, rr as i32)
    }

    /// All hexes within range (inclusive), ordered by q then r
    pub fn hexes_in_range(&self, range: u32) -> Vec<AxialCoord> {
        let range = range as i32;
        let mut results = Vec::new();
        for dq in -range..=range {
            for dr in (-range).max(-dq - range)..=range.min(-dq + range) {
                results.push(AxialCoord::new(self.q + dq, self.r + dr));
            }
        }
        results
    }
}

impl std::fmt::Display for AxialCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}

/// The six hex directions, indexed 0-5 in the fixed direction table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum HexDirection {
    #[default]
    East,
    NorthEast,
    NorthWest,
    West,
    SouthWest,
    SouthEast,
}

impl HexDirection {
    pub const ALL: [HexDirection; 6] = [
        HexDirection::East,
        HexDirection::NorthEast,
        HexDirection::NorthWest,
        HexDirection::West,
        HexDirection::SouthWest,
        HexDirection::SouthEast,
    ];

    /// Direction from a table index (wraps modulo 6)
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 6]
    }

    /// Index into the direction table
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Axial offset for this direction
    pub fn offset(&self) -> AxialCoord {
        match self {
            HexDirection::East => AxialCoord::new(1, 0),
            HexDirection::NorthEast => AxialCoord::new(1, -1),
            HexDirection::NorthWest => AxialCoord::new(0, -1),
            HexDirection::West => AxialCoord::new(-1, 0),
            HexDirection::SouthWest => AxialCoord::new(-1, 1),
            HexDirection::SouthEast => AxialCoord::new(0, 1),
        }
    }

    /// Rotate by `steps` sixths of a turn (negative = clockwise)
    pub fn turned(&self, steps: i32) -> Self {
        Self::from_index((self.index() as i32 + steps).rem_euclid(6) as usize)
    }

    /// Opposite direction
    pub fn opposite(&self) -> Self {
        self.turned(3)
    }
}
