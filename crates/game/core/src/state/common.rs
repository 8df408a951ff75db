use std::fmt;

/// Identifier of one playground instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlaygroundId(pub u64);

impl fmt::Display for PlaygroundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "playground-{}", self.0)
    }
}

/// Stable identifier of a map object in the grid arena.
///
/// Identifiers are never reused within one grid: replacing a cell's occupant
/// always allocates a fresh id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectId(pub u32);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Non-negative grid position expressed in cell coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinates {
    pub x: u32,
    pub y: u32,
}

impl Coordinates {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance, exact in integer arithmetic.
    pub fn distance_squared(self, other: Self) -> u64 {
        let dx = u64::from(self.x.abs_diff(other.x));
        let dy = u64::from(self.y.abs_diff(other.y));
        dx * dx + dy * dy
    }

    pub fn distance(self, other: Self) -> f64 {
        (self.distance_squared(other) as f64).sqrt()
    }

    /// King-move distance: the number of 8-neighbour steps between two cells.
    pub fn chebyshev_distance(self, other: Self) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    /// True when `other` is one of the eight neighbours of `self`.
    pub fn is_adjacent(self, other: Self) -> bool {
        self.chebyshev_distance(other) == 1
    }

    /// Applies a signed offset, returning `None` below zero or on overflow.
    pub fn offset(self, dx: i64, dy: i64) -> Option<Self> {
        let x = u32::try_from(i64::from(self.x).checked_add(dx)?).ok()?;
        let y = u32::try_from(i64::from(self.y).checked_add(dy)?).ok()?;
        Some(Self { x, y })
    }

    /// The eight neighbours that do not underflow, in row-major order.
    pub fn neighbours(self) -> impl Iterator<Item = Self> {
        const OFFSETS: [(i64, i64); 8] = [
            (-1, -1),
            (0, -1),
            (1, -1),
            (-1, 0),
            (1, 0),
            (-1, 1),
            (0, 1),
            (1, 1),
        ];
        OFFSETS
            .into_iter()
            .filter_map(move |(dx, dy)| self.offset(dx, dy))
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Integer resource meter (stamina) tracked per agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    pub current: u32,
    pub maximum: u32,
}

impl ResourceMeter {
    pub fn full(maximum: u32) -> Self {
        Self {
            current: maximum,
            maximum,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.current == 0
    }

    /// Spends `amount`, returning false (and leaving the meter unchanged) if
    /// not enough is left.
    pub fn consume(&mut self, amount: u32) -> bool {
        match self.current.checked_sub(amount) {
            Some(rest) => {
                self.current = rest;
                true
            }
            None => false,
        }
    }

    pub fn restore(&mut self) {
        self.current = self.maximum;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distances() {
        let a = Coordinates::new(1, 1);
        let b = Coordinates::new(4, 5);
        assert_eq!(a.distance_squared(b), 25);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(a.chebyshev_distance(b), 4);
        assert!(a.is_adjacent(Coordinates::new(2, 2)));
        assert!(!a.is_adjacent(a));
    }

    #[test]
    fn offset_rejects_negative_results() {
        assert_eq!(Coordinates::ORIGIN.offset(-1, 0), None);
        assert_eq!(
            Coordinates::new(2, 3).offset(-2, 1),
            Some(Coordinates::new(0, 4))
        );
        assert_eq!(Coordinates::ORIGIN.neighbours().count(), 3);
        assert_eq!(Coordinates::new(5, 5).neighbours().count(), 8);
    }

    #[test]
    fn meter_consume_is_all_or_nothing() {
        let mut meter = ResourceMeter::full(2);
        assert!(meter.consume(2));
        assert!(meter.is_exhausted());
        assert!(!meter.consume(1));
        assert_eq!(meter.current, 0);
        meter.restore();
        assert_eq!(meter.current, 2);
    }
}
