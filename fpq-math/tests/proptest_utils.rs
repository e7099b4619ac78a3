use proptest::prelude::*;
use fpq_math::{accel, argmax_abs_index, insert_component, remap, remove_component};

// Property 1: the selected component dominates every other one
proptest! {
    #[test]
    fn prop_argmax_abs_dominates(v in prop::array::uniform4(-1e6f64..1e6f64)) {
        let idx = argmax_abs_index(&v);
        for (i, &c) in v.iter().enumerate() {
            prop_assert!(v[idx].abs() >= c.abs(), "index {} beaten by {}", idx, i);
            if i < idx {
                // ties go to the lowest index
                prop_assert!(c.abs() < v[idx].abs());
            }
        }
    }
}

// Property 2: remove then insert restores the input for every index
proptest! {
    #[test]
    fn prop_remove_insert_roundtrip(
        v in prop::array::uniform3(-10.0f32..10.0f32),
        index in 0usize..3
    ) {
        let rest: [f32; 2] = remove_component(&v, index).unwrap();
        let back: [f32; 3] = insert_component(&rest, index, v[index]).unwrap();
        prop_assert_eq!(back, v);
    }
}

// Property 3: remap is undone by the reverse remap
proptest! {
    #[test]
    fn prop_remap_reversible(
        x in -1.0f64..1.0f64,
        lo in -100.0f64..-1.0f64,
        hi in 1.0f64..100.0f64
    ) {
        let forward = remap(x, -1.0, 1.0, lo, hi).unwrap();
        prop_assert!(forward >= lo - 1e-9 && forward <= hi + 1e-9);
        let back = remap(forward, lo, hi, -1.0, 1.0).unwrap();
        prop_assert!((back - x).abs() < 1e-12, "{} -> {} -> {}", x, forward, back);
    }
}

// Property 4: the missing component completes a unit vector
proptest! {
    #[test]
    fn prop_solve_missing_component_unit(v in prop::array::uniform3(-0.5f64..0.5f64)) {
        let w: f64 = accel::solve_missing_component(&v);
        let total: f64 = v.iter().map(|c| c * c).sum::<f64>() + w * w;
        prop_assert!((total - 1.0).abs() < 1e-12);
        prop_assert!(w >= 0.0);
    }
}
