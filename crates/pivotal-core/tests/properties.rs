// File: crates/pivotal-core/tests/properties.rs
// Purpose: Property tests for pivot determinism and top/bottom-N limiting.

use pivotal_core::{pivot_table, AggFunc, Cell, Limit, Pivot, Table};
use proptest::prelude::*;

fn build(rows: &[(u8, u8, i32)]) -> Table {
    Table::from_rows(
        ["cat", "grp", "v"],
        rows.iter().map(|&(c, g, v)| {
            [Cell::from(format!("c{c}")), Cell::from(format!("g{g}")), Cell::from(v as f64)]
        }),
    )
    .expect("fixed width rows")
}

fn rows() -> impl Strategy<Value = Vec<(u8, u8, i32)>> {
    prop::collection::vec((0u8..8, 0u8..3, -50i32..50), 0..60)
}

fn agg() -> impl Strategy<Value = AggFunc> {
    prop::sample::select(AggFunc::ALL.to_vec())
}

fn source_position(full: &Pivot, limited: &Pivot, row: usize) -> usize {
    full.row_position(&limited.index[row]).expect("limited rows come from the source")
}

proptest! {
    #[test]
    fn pivot_is_deterministic(rows in rows(), agg in agg()) {
        let t = build(&rows);
        let a = pivot_table(&t, "cat", "v", Some("grp"), agg).unwrap();
        let b = pivot_table(&t.clone(), "cat", "v", Some("grp"), agg).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn pivot_rows_are_sorted_and_unique(rows in rows()) {
        let p = pivot_table(&build(&rows), "cat", "v", Some("grp"), AggFunc::Sum).unwrap();
        prop_assert!(p.index.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(p.columns.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn top_n_keeps_the_largest_totals(rows in rows(), n in 1usize..10) {
        let full = pivot_table(&build(&rows), "cat", "v", Some("grp"), AggFunc::Sum).unwrap();
        let top = Limit::Top(n).apply(&full).unwrap();
        prop_assert_eq!(top.num_rows(), n.min(full.num_rows()));

        let kept = top.row_totals();
        let min_kept = kept.iter().copied().fold(f64::INFINITY, f64::min);
        for (i, label) in full.index.iter().enumerate() {
            if top.row_position(label).is_none() {
                prop_assert!(full.row_total(i) <= min_kept);
            }
        }
        for w in 0..top.num_rows().saturating_sub(1) {
            prop_assert!(kept[w] >= kept[w + 1]);
            if kept[w] == kept[w + 1] {
                prop_assert!(source_position(&full, &top, w) < source_position(&full, &top, w + 1));
            }
        }
    }

    #[test]
    fn bottom_n_keeps_the_smallest_totals(rows in rows(), n in 1usize..10) {
        let full = pivot_table(&build(&rows), "cat", "v", Some("grp"), AggFunc::Sum).unwrap();
        let bottom = Limit::Bottom(n).apply(&full).unwrap();
        prop_assert!(bottom.num_rows() <= n);

        let kept = bottom.row_totals();
        let max_kept = kept.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        for (i, label) in full.index.iter().enumerate() {
            if bottom.row_position(label).is_none() {
                prop_assert!(full.row_total(i) >= max_kept);
            }
        }
        prop_assert!(kept.windows(2).all(|w| w[0] <= w[1]));
    }
}
