use proptest::prelude::*;
use trendtab_core::{ColumnSequence, Extremum, Table, TableConfig};
use trendtab_model::{Cell, Direction, Record};

fn first_extremum(values: &[i64], pick_max: bool) -> Option<Extremum> {
    let mut best: Option<(i64, usize)> = None;
    for (index, value) in values.iter().enumerate() {
        let replace = match best {
            None => true,
            Some((current, _)) if pick_max => *value > current,
            Some((current, _)) => *value < current,
        };
        if replace {
            best = Some((*value, index));
        }
    }
    best.map(|(value, index)| Extremum {
        value: value as f64,
        index,
    })
}

prop_compose! {
    /// Rows drawn from a small key pool so that key sets overlap and differ.
    fn arb_rows()(
        rows in prop::collection::vec(
            prop::collection::btree_map("[a-e]", -1000i64..1000, 0..5),
            0..20,
        )
    ) -> Vec<Record> {
        rows.into_iter()
            .map(|row| row.into_iter().collect::<Record>())
            .collect()
    }
}

proptest! {
    #[test]
    fn prop_running_extremes_match_true_extremes(
        values in prop::collection::vec(-50i64..50, 1..60),
        missing_every in 2usize..6,
    ) {
        let mut column = ColumnSequence::new("score", Direction::Ascending);
        let mut numeric = Vec::new();
        for (index, value) in values.iter().enumerate() {
            if index % missing_every == 0 {
                column.append(Cell::Missing);
                numeric.push(None);
            } else {
                column.append(Cell::Integer(*value));
                numeric.push(Some(*value));
            }
        }
        // Index space includes the missing placeholders.
        let expected_max = numeric
            .iter()
            .enumerate()
            .filter_map(|(index, value)| value.map(|value| (index, value)))
            .fold(None::<(i64, usize)>, |best, (index, value)| match best {
                Some((current, _)) if value <= current => best,
                _ => Some((value, index)),
            });
        let expected_min = numeric
            .iter()
            .enumerate()
            .filter_map(|(index, value)| value.map(|value| (index, value)))
            .fold(None::<(i64, usize)>, |best, (index, value)| match best {
                Some((current, _)) if value >= current => best,
                _ => Some((value, index)),
            });
        prop_assert_eq!(
            column.max(),
            expected_max.map(|(value, index)| Extremum { value: value as f64, index })
        );
        prop_assert_eq!(
            column.min(),
            expected_min.map(|(value, index)| Extremum { value: value as f64, index })
        );
    }

    #[test]
    fn prop_dense_extremes_keep_first_occurrence(values in prop::collection::vec(-5i64..5, 1..40)) {
        let mut column = ColumnSequence::new("loss", Direction::Descending);
        for value in &values {
            column.append(Cell::Integer(*value));
        }
        prop_assert_eq!(column.max(), first_extremum(&values, true));
        prop_assert_eq!(column.min(), first_extremum(&values, false));
    }

    #[test]
    fn prop_every_column_has_row_count_values(rows in arb_rows()) {
        let mut table = Table::new(TableConfig::new().without_timestamp()).expect("table");
        let row_count = rows.len();
        table.add_rows(rows).expect("rows");
        prop_assert_eq!(table.row_count(), row_count);
        for column in table.columns() {
            prop_assert_eq!(column.len(), row_count);
            prop_assert_eq!(column.relations().len(), row_count);
            prop_assert_eq!(column.deltas().len(), row_count);
        }
    }

    #[test]
    fn prop_render_is_idempotent(rows in arb_rows()) {
        let config = TableConfig::new()
            .without_timestamp()
            .with_percentage_delta(true);
        let mut table = Table::new(config).expect("table");
        table.add_rows(rows).expect("rows");
        prop_assert_eq!(table.render(), table.render());
    }
}
