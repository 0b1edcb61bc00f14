//! Clocking schemes: mappings from coordinates to clock numbers.
//!
//! A scheme is either *regular*, defined by a small periodic cutout
//! replicated across the plane, or *irregular*, where every zone is assigned
//! manually. Overriding a single zone of a regular scheme demotes it to
//! irregular for reporting purposes; lookups stay well-defined with the
//! override winning.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use lazy_static::lazy_static;
use thiserror::Error;

use crate::coordinate::Coordinate;
use crate::lattice::MAX_FANIN_SIZE;

/// A clock number in `[0, num_clocks)`.
pub type ClockNumber = u8;

/// Pure function evaluating the regular pattern of a scheme.
pub type ClockFn = Arc<dyn Fn(Coordinate) -> ClockNumber + Send + Sync>;

/// Names of the shipped clocking schemes.
pub mod clock_name {
    pub const OPEN: &str = "OPEN";
    pub const OPEN3: &str = "OPEN3";
    pub const OPEN4: &str = "OPEN4";
    pub const COLUMNAR: &str = "COLUMNAR";
    pub const COLUMNAR3: &str = "COLUMNAR3";
    pub const COLUMNAR4: &str = "COLUMNAR4";
    pub const TWODDWAVE: &str = "2DDWAVE";
    pub const TWODDWAVE3: &str = "2DDWAVE3";
    pub const TWODDWAVE4: &str = "2DDWAVE4";
    pub const TWODDWAVE_HEX: &str = "2DDWAVEHEX";
    pub const TWODDWAVE_HEX3: &str = "2DDWAVEHEX3";
    pub const TWODDWAVE_HEX4: &str = "2DDWAVEHEX4";
    pub const USE: &str = "USE";
    pub const RES: &str = "RES";
    pub const BANCS: &str = "BANCS";
}

/// Number of clock phases a scheme cycles through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NumClocks {
    Three,
    Four,
}

impl NumClocks {
    const fn count(self) -> ClockNumber {
        match self {
            NumClocks::Three => 3,
            NumClocks::Four => 4,
        }
    }
}

/// Raised when a scheme name does not resolve against the registry.
#[derive(Error, Clone, Debug)]
pub enum SchemeError {
    #[error("unknown clocking scheme '{0}'")]
    UnknownScheme(String),
}

/// A clocking scheme: a (possibly overridden) assignment of clock numbers to
/// coordinates, together with the degree caps it supports per zone.
#[derive(Clone)]
pub struct ClockingScheme {
    name: String,
    max_in_degree: u8,
    max_out_degree: u8,
    num_clocks: ClockNumber,
    regular: bool,
    pattern: ClockFn,
    overrides: HashMap<Coordinate, ClockNumber>,
}

impl ClockingScheme {
    /// Creates a scheme from a pattern function and its metadata.
    pub fn new(
        name: impl Into<String>,
        pattern: ClockFn,
        max_in_degree: u8,
        max_out_degree: u8,
        num_clocks: ClockNumber,
        regular: bool,
    ) -> Self {
        debug_assert!(num_clocks >= 3);

        Self {
            name: name.into(),
            max_in_degree,
            max_out_degree,
            num_clocks,
            regular,
            pattern,
            overrides: HashMap::new(),
        }
    }

    /// The clock number of `cz`: the override map wins over the pattern on
    /// irregular schemes; regular schemes consult the pattern alone.
    pub fn clock_number(&self, cz: Coordinate) -> ClockNumber {
        if self.regular {
            return (self.pattern)(cz);
        }

        if let Some(&cn) = self.overrides.get(&cz) {
            return cn;
        }

        (self.pattern)(cz)
    }

    /// Assigns `cn mod num_clocks` to `cz`, demoting the scheme to
    /// not-purely-regular.
    pub fn override_clock_number(&mut self, cz: Coordinate, cn: ClockNumber) {
        self.regular = false;
        self.overrides.insert(cz, cn % self.num_clocks);
    }

    /// `true` iff no zone has ever been overridden.
    pub fn is_regular(&self) -> bool {
        self.regular
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Case-insensitive name comparison.
    pub fn has_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    pub fn num_clocks(&self) -> ClockNumber {
        self.num_clocks
    }

    /// Maximum number of inputs this scheme supports per clock zone.
    pub fn max_in_degree(&self) -> u8 {
        self.max_in_degree
    }

    /// Maximum number of outputs this scheme supports per clock zone.
    pub fn max_out_degree(&self) -> u8 {
        self.max_out_degree
    }

    /// Resolves a scheme by name, case-insensitively. Bare family names
    /// select the 4-phase variant where one exists.
    pub fn from_name(name: &str) -> Result<Self, SchemeError> {
        let key = name.to_ascii_uppercase();
        SCHEME_REGISTRY
            .get(key.as_str())
            .map(|factory| factory())
            .ok_or_else(|| SchemeError::UnknownScheme(name.to_string()))
    }
}

impl fmt::Debug for ClockingScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClockingScheme")
            .field("name", &self.name)
            .field("num_clocks", &self.num_clocks)
            .field("regular", &self.regular)
            .field("overrides", &self.overrides.len())
            .finish()
    }
}

fn cutout_pattern<const R: usize, const C: usize>(cutout: [[ClockNumber; C]; R]) -> ClockFn {
    Arc::new(move |cz: Coordinate| cutout[cz.y() as usize % R][cz.x() as usize % C])
}

/// An irregular scheme that reports clock 0 everywhere until overridden;
/// used as the "open" scheme where every zone is assigned manually.
pub fn open_clocking(n: NumClocks) -> ClockingScheme {
    let name = match n {
        NumClocks::Three => clock_name::OPEN3,
        NumClocks::Four => clock_name::OPEN4,
    };

    ClockingScheme::new(
        name,
        Arc::new(|_| 0),
        MAX_FANIN_SIZE,
        MAX_FANIN_SIZE,
        n.count(),
        false,
    )
}

/// Linear columnar clocking: clock equals the column index modulo the
/// number of phases.
pub fn columnar_clocking(n: NumClocks) -> ClockingScheme {
    let (name, pattern): (_, ClockFn) = match n {
        NumClocks::Three => (
            clock_name::COLUMNAR3,
            cutout_pattern([[0, 1, 2], [0, 1, 2], [0, 1, 2]]),
        ),
        NumClocks::Four => (
            clock_name::COLUMNAR4,
            cutout_pattern([
                [0, 1, 2, 3],
                [0, 1, 2, 3],
                [0, 1, 2, 3],
                [0, 1, 2, 3],
            ]),
        ),
    };

    ClockingScheme::new(name, pattern, MAX_FANIN_SIZE.min(3), 2, n.count(), true)
}

/// Diagonal 2DDWave clocking.
pub fn twoddwave_clocking(n: NumClocks) -> ClockingScheme {
    let (name, pattern): (_, ClockFn) = match n {
        NumClocks::Three => (
            clock_name::TWODDWAVE3,
            cutout_pattern([[0, 1, 2], [1, 2, 0], [2, 0, 1]]),
        ),
        NumClocks::Four => (
            clock_name::TWODDWAVE4,
            cutout_pattern([
                [0, 1, 2, 3],
                [1, 2, 3, 0],
                [2, 3, 0, 1],
                [3, 0, 1, 2],
            ]),
        ),
    };

    ClockingScheme::new(name, pattern, MAX_FANIN_SIZE.min(2), 2, n.count(), true)
}

/// Hexagonal variation of 2DDWave: rows advance in pairs.
pub fn twoddwave_hex_clocking(n: NumClocks) -> ClockingScheme {
    let (name, pattern): (_, ClockFn) = match n {
        NumClocks::Three => (
            clock_name::TWODDWAVE_HEX3,
            cutout_pattern([
                [0, 1, 2],
                [0, 1, 2],
                [1, 2, 0],
                [1, 2, 0],
                [2, 0, 1],
                [2, 0, 1],
            ]),
        ),
        NumClocks::Four => (
            clock_name::TWODDWAVE_HEX4,
            cutout_pattern([
                [0, 1, 2, 3],
                [0, 1, 2, 3],
                [1, 2, 3, 0],
                [1, 2, 3, 0],
                [2, 3, 0, 1],
                [2, 3, 0, 1],
                [3, 0, 1, 2],
                [3, 0, 1, 2],
            ]),
        ),
    };

    ClockingScheme::new(name, pattern, MAX_FANIN_SIZE.min(2), 2, n.count(), true)
}

/// The universal, scalable, and efficient (USE) 4-phase clocking.
pub fn use_clocking() -> ClockingScheme {
    ClockingScheme::new(
        clock_name::USE,
        cutout_pattern([
            [0, 1, 2, 3],
            [3, 2, 1, 0],
            [2, 3, 0, 1],
            [1, 0, 3, 2],
        ]),
        MAX_FANIN_SIZE.min(2),
        2,
        4,
        true,
    )
}

/// The RES 4-phase clocking.
pub fn res_clocking() -> ClockingScheme {
    ClockingScheme::new(
        clock_name::RES,
        cutout_pattern([
            [3, 0, 1, 2],
            [0, 1, 0, 3],
            [1, 2, 3, 0],
            [0, 3, 2, 1],
        ]),
        MAX_FANIN_SIZE.min(3),
        3,
        4,
        true,
    )
}

/// The bidirectional alternating (BANCS) 3-phase clocking.
pub fn bancs_clocking() -> ClockingScheme {
    ClockingScheme::new(
        clock_name::BANCS,
        cutout_pattern([
            [0, 1, 2],
            [2, 1, 0],
            [2, 0, 1],
            [1, 0, 2],
            [1, 2, 0],
            [0, 2, 1],
        ]),
        MAX_FANIN_SIZE.min(2),
        2,
        3,
        true,
    )
}

lazy_static! {
    static ref SCHEME_REGISTRY: HashMap<&'static str, fn() -> ClockingScheme> = {
        let mut registry: HashMap<&'static str, fn() -> ClockingScheme> = HashMap::new();
        registry.insert(clock_name::OPEN, || open_clocking(NumClocks::Four));
        registry.insert(clock_name::OPEN3, || open_clocking(NumClocks::Three));
        registry.insert(clock_name::OPEN4, || open_clocking(NumClocks::Four));
        registry.insert(clock_name::COLUMNAR, || columnar_clocking(NumClocks::Four));
        registry.insert(clock_name::COLUMNAR3, || columnar_clocking(NumClocks::Three));
        registry.insert(clock_name::COLUMNAR4, || columnar_clocking(NumClocks::Four));
        registry.insert(clock_name::TWODDWAVE, || twoddwave_clocking(NumClocks::Four));
        registry.insert(clock_name::TWODDWAVE3, || {
            twoddwave_clocking(NumClocks::Three)
        });
        registry.insert(clock_name::TWODDWAVE4, || {
            twoddwave_clocking(NumClocks::Four)
        });
        registry.insert(clock_name::TWODDWAVE_HEX, || {
            twoddwave_hex_clocking(NumClocks::Four)
        });
        registry.insert(clock_name::TWODDWAVE_HEX3, || {
            twoddwave_hex_clocking(NumClocks::Three)
        });
        registry.insert(clock_name::TWODDWAVE_HEX4, || {
            twoddwave_hex_clocking(NumClocks::Four)
        });
        registry.insert(clock_name::USE, use_clocking);
        registry.insert(clock_name::RES, res_clocking);
        registry.insert(clock_name::BANCS, bancs_clocking);
        registry
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn coord(x: u32, y: u32) -> Coordinate {
        Coordinate::new_xy(x, y)
    }

    #[rstest]
    #[case(open_clocking(NumClocks::Three), clock_name::OPEN3, 3, false)]
    #[case(open_clocking(NumClocks::Four), clock_name::OPEN4, 4, false)]
    #[case(columnar_clocking(NumClocks::Three), clock_name::COLUMNAR3, 3, true)]
    #[case(columnar_clocking(NumClocks::Four), clock_name::COLUMNAR4, 4, true)]
    #[case(twoddwave_clocking(NumClocks::Three), clock_name::TWODDWAVE3, 3, true)]
    #[case(twoddwave_clocking(NumClocks::Four), clock_name::TWODDWAVE4, 4, true)]
    #[case(twoddwave_hex_clocking(NumClocks::Three), clock_name::TWODDWAVE_HEX3, 3, true)]
    #[case(twoddwave_hex_clocking(NumClocks::Four), clock_name::TWODDWAVE_HEX4, 4, true)]
    #[case(use_clocking(), clock_name::USE, 4, true)]
    #[case(res_clocking(), clock_name::RES, 4, true)]
    #[case(bancs_clocking(), clock_name::BANCS, 3, true)]
    fn scheme_metadata(
        #[case] scheme: ClockingScheme,
        #[case] name: &str,
        #[case] num_clocks: ClockNumber,
        #[case] regular: bool,
    ) {
        assert!(scheme.has_name(name));
        assert_eq!(scheme.num_clocks(), num_clocks);
        assert_eq!(scheme.is_regular(), regular);

        // every shipped pattern stays within [0, num_clocks)
        for y in 0..8 {
            for x in 0..8 {
                assert!(scheme.clock_number(coord(x, y)) < num_clocks);
            }
        }
    }

    #[test]
    fn twoddwave_is_diagonal() {
        let scheme = twoddwave_clocking(NumClocks::Four);

        assert_eq!(scheme.clock_number(coord(0, 0)), 0);
        assert_eq!(scheme.clock_number(coord(1, 0)), 1);
        assert_eq!(scheme.clock_number(coord(0, 1)), 1);
        assert_eq!(scheme.clock_number(coord(1, 1)), 2);
        assert_eq!(scheme.clock_number(coord(3, 3)), 2);
        assert_eq!(scheme.clock_number(coord(4, 0)), 0);
    }

    #[test]
    fn use_matches_its_cutout() {
        let scheme = use_clocking();

        assert_eq!(scheme.clock_number(coord(0, 0)), 0);
        assert_eq!(scheme.clock_number(coord(1, 0)), 1);
        assert_eq!(scheme.clock_number(coord(0, 1)), 3);
        assert_eq!(scheme.clock_number(coord(1, 1)), 2);
    }

    #[test]
    fn pattern_repeats_with_its_period() {
        let scheme = bancs_clocking();

        for y in 0..6 {
            for x in 0..3 {
                assert_eq!(
                    scheme.clock_number(coord(x, y)),
                    scheme.clock_number(coord(x + 3, y + 6))
                );
            }
        }
    }

    #[test]
    fn overriding_demotes_regularity_but_keeps_lookups() {
        let mut scheme = twoddwave_clocking(NumClocks::Four);
        assert!(scheme.is_regular());

        scheme.override_clock_number(coord(1, 0), 3);
        assert!(!scheme.is_regular());
        assert_eq!(scheme.clock_number(coord(1, 0)), 3);
        // non-overridden zones still follow the pattern
        assert_eq!(scheme.clock_number(coord(0, 1)), 1);

        // override values are reduced modulo the clock count
        scheme.override_clock_number(coord(0, 0), 6);
        assert_eq!(scheme.clock_number(coord(0, 0)), 2);
    }

    #[test]
    fn cloning_snapshots_the_override_map() {
        let mut original = open_clocking(NumClocks::Four);
        original.override_clock_number(coord(0, 0), 1);

        let snapshot = original.clone();
        original.override_clock_number(coord(0, 0), 2);

        assert_eq!(snapshot.clock_number(coord(0, 0)), 1);
        assert_eq!(original.clock_number(coord(0, 0)), 2);
    }

    #[rstest]
    #[case("open", clock_name::OPEN4, 4)]
    #[case("2DDWave", clock_name::TWODDWAVE4, 4)]
    #[case("2ddwave3", clock_name::TWODDWAVE3, 3)]
    #[case("columnar", clock_name::COLUMNAR4, 4)]
    #[case("use", clock_name::USE, 4)]
    #[case("res", clock_name::RES, 4)]
    #[case("bancs", clock_name::BANCS, 3)]
    fn registry_lookup_is_case_insensitive(
        #[case] query: &str,
        #[case] resolved: &str,
        #[case] num_clocks: ClockNumber,
    ) {
        let scheme = ClockingScheme::from_name(query).unwrap();
        assert!(scheme.has_name(resolved));
        assert_eq!(scheme.num_clocks(), num_clocks);
    }

    #[test]
    fn unknown_names_are_errors() {
        let err = ClockingScheme::from_name("TRIANGULAR").unwrap_err();
        assert!(matches!(err, SchemeError::UnknownScheme(name) if name == "TRIANGULAR"));
    }
}
