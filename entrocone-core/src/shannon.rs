//! Generators for Shannon-type inequality systems.
//!
//! Entropy is a set function on the power set of the variable indices; the
//! value on the empty set is zero and irrelevant, so a system over `N`
//! variables has `2^N` columns with column 0 unused. The elemental
//! inequalities are the standard positivities of Shannon information:
//! conditional entropies `H(X_i | X_rest) >= 0` and conditional mutual
//! informations `I(X_a : X_b | X_K) >= 0`.

use crate::bits::{binomial, skip_bit};
use crate::system::System;
use crate::vector::Vector;

/// Largest supported variable count; `2^N` columns must stay addressable
/// and dense row storage reasonable.
const MAX_NUM_VARS: usize = 26;

/// Number of elemental inequalities for `num_vars` random variables:
/// `N` conditional entropies plus `C(N,2) * 2^(N-2)` conditional mutual
/// informations.
pub fn num_elemental_inequalities(num_vars: usize) -> usize {
    assert!((2..=MAX_NUM_VARS).contains(&num_vars), "need 2..=26 variables");
    num_vars + binomial(num_vars, 2) * (1 << (num_vars - 2))
}

/// Build the system of elemental inequalities for `num_vars` random
/// variables, over `2^num_vars` columns.
pub fn elemental_inequalities(num_vars: usize) -> System {
    assert!((2..=MAX_NUM_VARS).contains(&num_vars), "need 2..=26 variables");

    let dim = (1usize << num_vars) - 1;
    // After choosing 2 variables there are 2^(N-2) subsets of the rest.
    let sub_dim = 1usize << (num_vars - 2);
    let nb_lines = num_elemental_inequalities(num_vars);
    let nb_cols = dim + 1;

    let mut system = System::new(nb_cols, nb_lines);

    // Entropy coordinate of the joint entropy of all variables. Since the
    // left-most column is unused, the variables involved in a joint entropy
    // correspond exactly to the bit representation of its index.
    let all = dim;

    // Conditional entropy positivities H(X_i | X_c) >= 0 with c = ~{i}.
    for i in 0..num_vars {
        let c = all ^ (1 << i);
        let mut v = Vector::new(nb_cols);
        v.set(all, 1);
        v.set(c, -1);
        system.add_inequality(v);
    }

    // Conditional mutual information positivities I(X_a : X_b | X_K) >= 0
    // with a, b not in K.
    for a in 0..num_vars - 1 {
        for b in a + 1..num_vars {
            let big_a = 1usize << a;
            let big_b = 1usize << b;
            for i in 0..sub_dim {
                let k = skip_bit(skip_bit(i, a), b);
                let mut v = Vector::new(nb_cols);
                v.set(big_a | k, 1);
                v.set(big_b | k, 1);
                v.set(big_a | big_b | k, -1);
                if k != 0 {
                    v.set(k, -1);
                }
                system.add_inequality(v);
            }
        }
    }

    system
}

/// Add the mutual-independence equality for the initial layer of a layered
/// causal network: the joint entropy of the `ni` initial-layer variables
/// equals the sum of their marginals.
///
/// The initial layer occupies the high bit positions `nf .. nf + ni`; the
/// system must have `2^(nf + ni)` columns. A single initial variable needs
/// no constraint.
pub fn set_initial_state_iid(system: &mut System, nf: usize, ni: usize) {
    assert_eq!(
        system.num_cols(),
        1 << (nf + ni),
        "system must span the two-layer entropy space"
    );
    if ni <= 1 {
        return;
    }
    let layer1 = ((1usize << ni) - 1) << nf;
    let mut v = Vector::new(system.num_cols());
    v.set(layer1, -1);
    for cell in 0..ni {
        v.set(1 << (nf + cell), 1);
    }
    system.add_equality(v);
}

/// Add the causal conditional-independence equalities of a periodic layered
/// network: each of the `nf` final-layer variables is independent of its
/// non-descendants given its `links` parents in the initial layer.
///
/// The parents of final cell `i` are the initial cells `(i + j) mod ni` for
/// `j in 0..links`; the equality encodes `I(X_i : Nd(i) | Pa(i)) = 0`.
pub fn add_causal_constraints(system: &mut System, nf: usize, ni: usize, links: usize) {
    assert_eq!(
        system.num_cols(),
        1 << (nf + ni),
        "system must span the two-layer entropy space"
    );
    assert!(links >= 1 && links <= ni, "fan-in must be 1..=ni");

    let all = system.num_cols() - 1;
    for i in 0..nf {
        let var = 1usize << i;
        let mut pa = 0usize;
        for j in 0..links {
            pa |= 1 << (nf + (i + j) % ni);
        }
        let nd = all ^ (var | pa);
        let mut v = Vector::new(system.num_cols());
        v.set(pa | var, 1);
        v.set(pa | nd, 1);
        v.set(pa, -1);
        v.set(all, -1);
        system.add_equality(v);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elemental_counts() {
        assert_eq!(num_elemental_inequalities(2), 3);
        assert_eq!(num_elemental_inequalities(3), 9);
        assert_eq!(num_elemental_inequalities(4), 28);
    }

    #[test]
    fn elemental_two_variables() {
        let system = elemental_inequalities(2);
        assert_eq!(system.num_cols(), 4);
        let rows: Vec<&[i64]> = system.rows().iter().map(|v| v.as_slice()).collect();
        assert_eq!(rows.len(), 3);
        // H(X0|X1) >= 0, H(X1|X0) >= 0, I(X0:X1) >= 0
        assert!(rows.iter().any(|r| *r == [0, -1, 0, 1]));
        assert!(rows.iter().any(|r| *r == [0, 0, -1, 1]));
        assert!(rows.iter().any(|r| *r == [0, 1, 1, -1]));
    }

    #[test]
    fn elemental_rows_are_primitive_and_sparse() {
        for num_vars in 2..=4 {
            let system = elemental_inequalities(num_vars);
            assert_eq!(system.len(), num_elemental_inequalities(num_vars));
            for row in system.rows() {
                let mut normalized = row.clone();
                normalized.normalize();
                assert_eq!(&normalized, row, "row must already be primitive");
                let nonzero = row.iter().filter(|&&x| x != 0).count();
                assert!((2..=4).contains(&nonzero));
                assert_eq!(row.get(0), 0, "padding column stays clear");
            }
        }
    }

    #[test]
    fn iid_equality_ties_marginals_to_the_joint() {
        let mut system = System::new(16, 2);
        set_initial_state_iid(&mut system, 2, 2);
        assert_eq!(system.len(), 2);
        let v = &system.rows()[0];
        assert_eq!(v.get(0b0100), 1);
        assert_eq!(v.get(0b1000), 1);
        assert_eq!(v.get(0b1100), -1);
        assert_eq!(v.iter().filter(|&&x| x != 0).count(), 3);
    }

    #[test]
    fn iid_is_skipped_for_a_single_initial_variable() {
        let mut system = System::new(4, 1);
        set_initial_state_iid(&mut system, 1, 1);
        assert!(system.is_empty());
    }

    #[test]
    fn causal_constraints_reference_parents_and_nondescendants() {
        let mut system = System::new(16, 4);
        add_causal_constraints(&mut system, 2, 2, 2);
        // two final cells, each contributing an equality pair
        assert_eq!(system.len(), 4);

        // cell 0: Var = 0b0001, Pa = {initial 0, initial 1} = 0b1100,
        // Nd = all ^ (Var|Pa) = 0b0010
        let v = &system.rows()[0];
        assert_eq!(v.get(0b1101), 1);
        assert_eq!(v.get(0b1110), 1);
        assert_eq!(v.get(0b1100), -1);
        assert_eq!(v.get(0b1111), -1);
    }

    #[test]
    fn causal_fan_in_wraps_around_the_layer() {
        let mut system = System::new(1 << 6, 6);
        add_causal_constraints(&mut system, 3, 3, 2);
        // cell 2 has parents (2+0)%3 = 2 and (2+1)%3 = 0
        let v = &system.rows()[4];
        let pa = (1 << (3 + 2)) | (1 << 3);
        assert_eq!(v.get(pa), -1);
    }
}
