//! Truth tables and the shared function cache.
//!
//! Nodes reference their Boolean function by a small integer literal into a
//! cache of canonical truth tables. A literal is `2 * index | c`, where `c`
//! marks the complement of the cached table; the cache only ever stores
//! *normal* functions (output 0 for the all-zero input), so a function and
//! its complement share one cache slot.

use std::collections::HashMap;

/// The reserved literals of a freshly initialized [`FunctionCache`].
pub mod literal {
    pub const CONST0: u32 = 0;
    pub const CONST1: u32 = 1;
    pub const BUF: u32 = 2;
    pub const NOT: u32 = 3;
    pub const AND: u32 = 4;
    pub const NAND: u32 = 5;
    pub const OR: u32 = 6;
    pub const NOR: u32 = 7;
    pub const XOR: u32 = 8;
    pub const XNOR: u32 = 9;
    pub const MAJ: u32 = 10;
    pub const MINORITY: u32 = 11;
}

/// A truth table over `num_vars` variables, one output bit per input
/// pattern. Input `i` of a pattern is bit `i` of the pattern index.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TruthTable {
    num_vars: u8,
    bits: Vec<u64>,
}

impl TruthTable {
    /// The constant-0 function over `num_vars` variables.
    pub fn zero(num_vars: u8) -> Self {
        Self {
            num_vars,
            bits: vec![0; Self::words(num_vars)],
        }
    }

    /// Builds a table over at most 6 variables from its bit pattern.
    pub fn from_bits(num_vars: u8, bits: u64) -> Self {
        debug_assert!(num_vars <= 6);

        Self {
            num_vars,
            bits: vec![bits & Self::word_mask(num_vars)],
        }
    }

    /// The 1-variable identity function.
    pub fn identity() -> Self {
        Self::from_bits(1, 0b10)
    }

    /// The 2-variable conjunction.
    pub fn conjunction() -> Self {
        Self::from_bits(2, 0b1000)
    }

    /// The 2-variable disjunction.
    pub fn disjunction() -> Self {
        Self::from_bits(2, 0b1110)
    }

    /// The 2-variable exclusive disjunction.
    pub fn exclusive_or() -> Self {
        Self::from_bits(2, 0b0110)
    }

    /// The 3-variable majority function.
    pub fn majority() -> Self {
        Self::from_bits(3, 0xE8)
    }

    fn words(num_vars: u8) -> usize {
        if num_vars < 6 { 1 } else { 1 << (num_vars - 6) }
    }

    fn word_mask(num_vars: u8) -> u64 {
        if num_vars < 6 {
            (1u64 << (1 << num_vars)) - 1
        } else {
            u64::MAX
        }
    }

    pub fn num_vars(&self) -> u8 {
        self.num_vars
    }

    /// Number of output bits, i.e. `2^num_vars`.
    pub fn num_bits(&self) -> u64 {
        1 << self.num_vars
    }

    /// The output bit for input pattern `index`.
    pub fn bit(&self, index: u64) -> bool {
        debug_assert!(index < self.num_bits());

        (self.bits[(index / 64) as usize] >> (index % 64)) & 1 == 1
    }

    /// The pointwise complement.
    pub fn complement(&self) -> Self {
        let mask = Self::word_mask(self.num_vars);
        Self {
            num_vars: self.num_vars,
            bits: self.bits.iter().map(|w| !w & mask).collect(),
        }
    }

    /// `true` iff the output for the all-zero input is 0.
    pub fn is_normal(&self) -> bool {
        !self.bit(0)
    }

    /// `true` iff every output bit is 0.
    pub fn is_const0(&self) -> bool {
        self.bits.iter().all(|&w| w == 0)
    }

    /// Evaluates the function; `inputs[i]` is variable `i`.
    pub fn evaluate(&self, inputs: &[bool]) -> bool {
        debug_assert_eq!(inputs.len(), usize::from(self.num_vars));

        let index = inputs
            .iter()
            .enumerate()
            .fold(0u64, |acc, (i, &b)| acc | (u64::from(b) << i));

        self.bit(index)
    }
}

/// Interning cache of canonical truth tables, handing out function literals.
///
/// A fresh cache is pre-seeded so that the [`literal`] constants hold; every
/// network shares this numbering, which the classification predicates rely
/// on.
#[derive(Clone, Debug)]
pub struct FunctionCache {
    tables: Vec<TruthTable>,
    indices: HashMap<TruthTable, u32>,
}

impl FunctionCache {
    /// Creates a cache seeded with the constant, identity, and standard
    /// 2-/3-input gate functions.
    pub fn new() -> Self {
        let mut cache = Self {
            tables: Vec::new(),
            indices: HashMap::new(),
        };

        cache.insert(&TruthTable::zero(0));
        // NOT is not normal; its complement, the identity, is what gets stored
        cache.insert(&TruthTable::identity().complement());
        cache.insert(&TruthTable::conjunction());
        cache.insert(&TruthTable::disjunction());
        cache.insert(&TruthTable::exclusive_or());
        cache.insert(&TruthTable::majority());

        cache
    }

    /// Interns `tt` and returns its literal. The normal form of `tt` is
    /// cached; the complement bit of the literal records which polarity was
    /// requested.
    pub fn insert(&mut self, tt: &TruthTable) -> u32 {
        let (normal, complemented) = if tt.is_normal() {
            (tt.clone(), 0)
        } else {
            (tt.complement(), 1)
        };

        let index = match self.indices.get(&normal) {
            Some(&index) => index,
            None => {
                let index = self.tables.len() as u32;
                self.tables.push(normal.clone());
                self.indices.insert(normal, index);
                index
            }
        };

        (index << 1) | complemented
    }

    /// The function denoted by `lit`.
    pub fn get(&self, lit: u32) -> TruthTable {
        let table = &self.tables[(lit >> 1) as usize];

        if lit & 1 == 1 {
            table.complement()
        } else {
            table.clone()
        }
    }
}

impl Default for FunctionCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(TruthTable::zero(0), literal::CONST0)]
    #[case(TruthTable::zero(0).complement(), literal::CONST1)]
    #[case(TruthTable::identity(), literal::BUF)]
    #[case(TruthTable::identity().complement(), literal::NOT)]
    #[case(TruthTable::conjunction(), literal::AND)]
    #[case(TruthTable::conjunction().complement(), literal::NAND)]
    #[case(TruthTable::disjunction(), literal::OR)]
    #[case(TruthTable::disjunction().complement(), literal::NOR)]
    #[case(TruthTable::exclusive_or(), literal::XOR)]
    #[case(TruthTable::exclusive_or().complement(), literal::XNOR)]
    #[case(TruthTable::majority(), literal::MAJ)]
    #[case(TruthTable::majority().complement(), literal::MINORITY)]
    fn reserved_literals_match_the_seed(#[case] tt: TruthTable, #[case] lit: u32) {
        assert_eq!(FunctionCache::new().insert(&tt), lit);
    }

    #[test]
    fn literals_round_trip_through_get() {
        let mut cache = FunctionCache::new();

        let xor = TruthTable::exclusive_or();
        let lit = cache.insert(&xor);
        assert_eq!(cache.get(lit), xor);

        let xnor = xor.complement();
        let nlit = cache.insert(&xnor);
        assert_eq!(cache.get(nlit), xnor);
        assert_eq!(nlit, lit | 1);
    }

    #[test]
    fn novel_functions_extend_the_cache() {
        let mut cache = FunctionCache::new();

        // 3-input and-or: f = ab | c
        let and_or = TruthTable::from_bits(3, 0b1111_1000);
        let lit = cache.insert(&and_or);
        assert!(lit > literal::MINORITY);
        assert_eq!(cache.insert(&and_or), lit);
        assert_eq!(cache.get(lit), and_or);
    }

    #[test]
    fn evaluation_follows_the_bit_order() {
        let maj = TruthTable::majority();
        assert!(!maj.evaluate(&[false, false, false]));
        assert!(!maj.evaluate(&[true, false, false]));
        assert!(maj.evaluate(&[true, true, false]));
        assert!(maj.evaluate(&[true, false, true]));
        assert!(maj.evaluate(&[true, true, true]));

        let xor = TruthTable::exclusive_or();
        assert!(xor.evaluate(&[true, false]));
        assert!(xor.evaluate(&[false, true]));
        assert!(!xor.evaluate(&[true, true]));
    }

    #[test]
    fn normality_and_constants() {
        assert!(TruthTable::conjunction().is_normal());
        assert!(!TruthTable::conjunction().complement().is_normal());
        assert!(TruthTable::zero(2).is_const0());
        assert!(!TruthTable::zero(2).complement().is_const0());
        assert_eq!(TruthTable::zero(0).num_bits(), 1);
    }
}
