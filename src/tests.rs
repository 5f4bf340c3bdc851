#[cfg(test)]
mod tests {
    use std::num::NonZero;
    use std::str::FromStr;

    use num_bigint::BigUint;
    use num_traits::ToPrimitive;
    use proptest::prelude::*;
    use strum::VariantArray;

    use crate::board::Board;
    use crate::builder::{BuilderInvalidReason, CensusBuilder};
    use crate::census::Census;
    use crate::config::{Symmetry, Verbosity};
    use crate::distance::Distance;
    use crate::reach::{self, Reach};
    use crate::row::Row;
    use crate::tables::RowTables;

    fn census(size: usize, symmetry: Symmetry, require_edge: bool, threads: usize) -> Census {
        CensusBuilder::with_size(NonZero::new(size).unwrap())
            .symmetry(symmetry)
            .require_edge(require_edge)
            .threads(threads)
            .build()
            .unwrap()
    }

    fn rows(bits: &[u32]) -> Vec<Row> {
        bits.iter().copied().map(Row).collect()
    }

    #[test]
    fn row_runs_and_validity() {
        assert!(Row(0b00000).is_valid(5));
        assert!(Row(0b10001).is_valid(5));
        assert!(Row(0b0001000).is_valid(7));
        assert!(!Row(0b00100).is_valid(5));
        assert!(!Row(0b01000).is_valid(5));
        assert!(!Row(0b10110).is_valid(5));
        // the all-black row has no white runs at all
        assert!(Row::full(5).is_valid(5));

        assert_eq!(Row(0b1001000).white_runs(7).collect::<Vec<_>>(), vec![1..3, 4..7]);
        assert_eq!(Row(0b00011).mirror(5), Row(0b11000));
        assert_eq!(Row(0b00011).render(5), "00011");
        assert!(Row(0b10001).is_palindrome(5));
        assert!(Row(0b10000).has_edge(5));
        assert!(!Row(0b10001).has_edge(5));
        assert_eq!(Row(0b1100011).without(Row(0b1000001)), Row(0b0100010));
    }

    #[test]
    fn row_cells_round_trip() {
        let row = Row(0b1000111);
        assert_eq!(Row::from_cells(row.cells(7)), row);
        assert!(row.is_black(0, 7));
        assert!(!row.is_black(1, 7));
        assert!(row.is_black(6, 7));
    }

    proptest! {
        #[test]
        fn prop_mirror_is_involution(width in 3usize..=15, bits in 0u32..(1 << 15)) {
            let row = Row(bits & Row::full(width).0);
            prop_assert_eq!(row.mirror(width).mirror(width), row);
            prop_assert_eq!(row.mirror(width).is_valid(width), row.is_valid(width));
        }

        #[test]
        fn prop_validity_matches_text_scan(width in 3usize..=15, bits in 0u32..(1 << 15)) {
            let row = Row(bits & Row::full(width).0);
            let rendered = row.render(width);
            let expected = rendered.split('1').all(|run| run.is_empty() || run.len() >= 3);
            prop_assert_eq!(row.is_valid(width), expected);
        }
    }

    #[test]
    fn reach_of_row_numbers_runs() {
        assert_eq!(Reach::of_row(Row(0b1001000), 7), Reach::from_ids(&[0, 1, 1, 0, 2, 2, 2]));
        assert_eq!(Reach::of_row(Row::full(7), 7), Reach::EMPTY);
        assert_eq!(Reach::of_row(Row(0b00000), 5).max_component(), 1);
        assert_eq!(Reach::from_ids(&[0, 1, 1, 0, 2]).render(5), " 0  1  1  0  2 ");
    }

    #[test]
    fn reach_advances_from_open_middle() {
        let middle = Reach::of_row(Row(0b00000), 5);
        let (top, bottom) = reach::advance(middle, middle, Row(0b00000), Row(0b00011), 5).unwrap();

        assert_eq!(top, Reach::from_ids(&[1, 1, 1, 0, 0]));
        assert_eq!(bottom, Reach::from_ids(&[0, 0, 1, 1, 1]));
    }

    #[test]
    fn reach_merges_through_open_row() {
        let top = Reach::from_ids(&[1, 1, 1, 0, 2, 2, 2]);
        let bottom = Reach::from_ids(&[2, 2, 2, 0, 1, 1, 1]);
        let (top, bottom) = reach::advance(top, bottom, Row(0b0001000), Row(0), 7).unwrap();

        assert_eq!(top, Reach::from_ids(&[1; 7]));
        assert_eq!(bottom, Reach::from_ids(&[1; 7]));
        assert!(top.is_single() && bottom.is_single());
    }

    #[test]
    fn reach_is_canonical() {
        let old = Row(0b0001000);
        let once = reach::advance(
            Reach::from_ids(&[2, 2, 2, 0, 1, 1, 1]),
            Reach::from_ids(&[1, 1, 1, 0, 2, 2, 2]),
            old,
            old,
            7,
        );
        let swapped = reach::advance(
            Reach::from_ids(&[1, 1, 1, 0, 2, 2, 2]),
            Reach::from_ids(&[2, 2, 2, 0, 1, 1, 1]),
            old,
            old,
            7,
        );

        assert_eq!(once, swapped);
        assert_eq!(
            once,
            Some((Reach::from_ids(&[1, 1, 1, 0, 2, 2, 2]), Reach::from_ids(&[2, 2, 2, 0, 1, 1, 1])))
        );
    }

    #[test]
    fn reach_rejects_sealed_component() {
        let top = Reach::from_ids(&[1, 1, 1, 0, 0, 0, 0]);
        let bottom = Reach::from_ids(&[0, 0, 0, 0, 1, 1, 1]);

        assert_eq!(reach::advance(top, bottom, Row(0b0001111), Row(0b1111000), 7), None);
    }

    #[test]
    fn reach_closes_on_sentinel() {
        let top = Reach::from_ids(&[1, 1, 1, 0, 2, 2, 2]);
        let bottom = Reach::from_ids(&[2, 2, 2, 0, 1, 1, 1]);

        assert_eq!(
            reach::advance(top, bottom, Row(0b0001000), Row::full(7), 7),
            Some((Reach::EMPTY, Reach::EMPTY))
        );
    }

    #[test]
    fn distance_counts_down_and_resets() {
        let distance = Distance::init(Row(0b10000), Row(0b01000), Row(0b00100), 5);
        assert_eq!((0..5).map(|c| distance.get(c)).collect::<Vec<_>>(), vec![1, 2, 3, 0, 0]);
        assert_eq!(distance.pending_mask(5), Row(0b11000));
        assert!(!distance.is_terminal(5));

        let distance = distance.apply(Row(0), 5);
        assert_eq!((0..5).map(|c| distance.get(c)).collect::<Vec<_>>(), vec![0, 1, 2, 0, 0]);

        let distance = distance.apply(Row(0), 5).apply(Row(0), 5);
        assert_eq!(distance, Distance::default());
        assert!(distance.is_terminal(5));

        let distance = distance.apply(Row(0b00100), 5);
        assert_eq!(distance.get(2), 3);
        assert!(distance.is_terminal(5));
        assert_eq!(distance.pending_mask(5), Row(0));
    }

    #[test]
    fn tables_for_size_five() {
        let tables = RowTables::new(5, Symmetry::Rotational);

        assert_eq!(tables.universe(), rows(&[0b00000, 0b00001, 0b00011, 0b10000, 0b10001, 0b11000]));
        assert_eq!(tables.middle_rows(), rows(&[0b00000, 0b10001]));
        assert_eq!(tables.sentinel(), Row(0b11111));
        assert!(tables.is_middle(tables.sentinel()));
        assert_eq!(tables.mirror(Row(0b00001)), Row(0b10000));

        assert_eq!(
            tables.rows(tables.compatible_with_middle(Row(0))).collect::<Vec<_>>(),
            rows(&[0b00000, 0b00001, 0b00011, 0b10000, 0b11000])
        );
        assert_eq!(tables.compatible_with_middle(Row(0b10001)).len(), 6);

        assert_eq!(
            tables.rows(tables.avoid_one_one(Row(0b00001))).collect::<Vec<_>>(),
            rows(&[0b00000, 0b10000, 0b11000])
        );
        assert_eq!(tables.rows(tables.avoid_one_zero(Row(0b00011))).collect::<Vec<_>>(), rows(&[0b00011]));
        assert!(tables.avoid_one_one(Row::full(5)).and(tables.avoid_one_zero(Row(0b10001))).is_empty());

        assert_eq!(tables.reach_of(Row(0b10001)), Reach::from_ids(&[0, 1, 1, 1, 0]));
        assert_eq!(tables.reach_of(tables.sentinel()), Reach::EMPTY);
    }

    #[test]
    fn tables_full_symmetry_keeps_palindromes() {
        let tables = RowTables::new(5, Symmetry::Full);
        assert_eq!(tables.universe(), rows(&[0b00000, 0b10001]));

        let tables = RowTables::new(7, Symmetry::Rotational);
        assert_eq!(tables.universe().len(), 16);
        assert_eq!(tables.middle_rows(), rows(&[0b0000000, 0b0001000, 0b1000001, 0b1100011]));

        assert_eq!(RowTables::new(9, Symmetry::Rotational).universe().len(), 43);
        assert_eq!(RowTables::new(9, Symmetry::Full).universe().len(), 7);
    }

    #[test]
    fn board_assembly_and_regions() {
        let mut board = Board::from_half(&rows(&[0b00011, 0b00000, 0b10001]), 5);

        assert_eq!(format!("{}", board), "00011
00000
10001
00000
11000
");
        assert_eq!(board.row(4), Row(0b11000));
        assert_eq!(board.column(4), Row(0b10100));
        assert_eq!(board.white_regions(), 1);
        assert!(board.is_connected());
        // the top of column 0 is a run of two
        assert!(!board.columns_valid());

        board.fill(&rows(&[0b00000, 0b11111, 0b00000]));
        assert_eq!(board.white_regions(), 3);
        assert!(!board.is_connected());

        board.fill(&rows(&[0b00000, 0b00000, 0b00000]));
        assert!(board.is_connected());
        assert!(board.columns_valid());
    }

    #[test]
    fn count_small_sizes() {
        let expected = [(3, 1u32, 1u32, 1u32), (5, 12, 2, 13), (7, 312, 20, 347)];

        for (size, rotational, full, edgeless) in expected {
            assert_eq!(census(size, Symmetry::Rotational, true, 2).count().unwrap(), BigUint::from(rotational));
            assert_eq!(census(size, Symmetry::Full, true, 2).count().unwrap(), BigUint::from(full));
            assert_eq!(census(size, Symmetry::Rotational, false, 2).count().unwrap(), BigUint::from(edgeless));
        }
    }

    #[test]
    fn count_agrees_with_search() {
        for size in [3, 5, 7] {
            for symmetry in Symmetry::VARIANTS {
                for require_edge in [true, false] {
                    let census = census(size, *symmetry, require_edge, 3);
                    let total = census.count().unwrap();
                    let tally = census.verify().unwrap();
                    assert_eq!(total.to_u64(), Some(tally.accepted), "size {} {} {}", size, symmetry, require_edge);
                }
            }
        }
    }

    #[test]
    fn search_sees_raw_connected_boards() {
        assert_eq!(census(3, Symmetry::Rotational, true, 1).verify().unwrap().connected, 1);
        assert_eq!(census(5, Symmetry::Rotational, true, 2).verify().unwrap().connected, 22);
        assert_eq!(census(5, Symmetry::Full, true, 2).verify().unwrap().connected, 6);
        assert_eq!(census(7, Symmetry::Rotational, true, 4).verify().unwrap().connected, 397);
        assert_eq!(census(7, Symmetry::Full, true, 4).verify().unwrap().connected, 35);
    }

    #[test]
    fn count_size_nine() {
        assert_eq!(census(9, Symmetry::Rotational, true, 4).count().unwrap(), BigUint::from(31187u32));
        assert_eq!(census(9, Symmetry::Full, true, 4).count().unwrap(), BigUint::from(269u32));
        assert_eq!(census(9, Symmetry::Rotational, false, 4).count().unwrap(), BigUint::from(33057u32));
    }

    #[test]
    fn generations_grow_and_shrink() {
        let census = census(7, Symmetry::Rotational, true, 2);
        let mut driver = census.driver().unwrap();
        let mut sizes = vec![driver.generation().len()];

        assert_eq!(driver.step(), 2);
        while driver.advance() {
            sizes.push(driver.generation().len());
        }

        assert_eq!(sizes, vec![25, 42, 27]);
        assert!(driver.is_finished());
        assert!(!driver.advance());
        assert_eq!(driver.total(), BigUint::from(312u32));
    }

    #[test]
    fn generations_independent_of_threads() {
        let single = census(9, Symmetry::Rotational, true, 1);
        let many = census(9, Symmetry::Rotational, true, 4);
        let mut single = single.driver().unwrap();
        let mut many = many.driver().unwrap();

        assert_eq!(single.generation(), many.generation());
        while single.advance() {
            assert!(many.advance());
            assert_eq!(single.generation(), many.generation());
        }
        assert!(many.is_finished());
    }

    #[test]
    fn traced_boards_are_valid() {
        let census = CensusBuilder::with_size(NonZero::new(7).unwrap())
            .threads(2)
            .trace_boards(true)
            .build()
            .unwrap();
        let mut driver = census.driver().unwrap();
        driver.run();

        let traced = driver.counted().filter_map(|(state, _)| state.board.clone()).collect::<Vec<_>>();
        // each state is one board, and mirror pairs are kept once
        assert_eq!(driver.total(), BigUint::from(312u32));
        assert!(traced.len() < 312);

        for text in traced {
            let lines = text.lines().collect::<Vec<_>>();
            assert_eq!(lines.len(), 7);
            let half = lines[..4].iter().map(|line| Row(u32::from_str_radix(line, 2).unwrap())).collect::<Vec<_>>();
            let mut board = Board::from_half(&half, 7);
            assert_eq!(format!("{}", board), format!("{}\n", text));
            assert!(board.is_connected());
            assert!(board.columns_valid());
            assert!((0..7).all(|y| board.row(y).is_valid(7)));
        }
    }

    #[test]
    fn builder_rejects_bad_settings() {
        let even = CensusBuilder::with_size(NonZero::new(8).unwrap());
        assert_eq!(even.is_valid(), Some(&vec![BuilderInvalidReason::EvenSize]));

        let large = CensusBuilder::with_size(NonZero::new(17).unwrap());
        assert_eq!(large.is_valid(), Some(&vec![BuilderInvalidReason::SizeOutOfRange]));

        let tiny = CensusBuilder::with_size(NonZero::new(2).unwrap());
        assert_eq!(
            tiny.build().err(),
            Some(&vec![BuilderInvalidReason::SizeOutOfRange, BuilderInvalidReason::EvenSize])
        );

        let mut idle = CensusBuilder::with_size(NonZero::new(5).unwrap());
        idle.threads(0).symmetry(Symmetry::Full);
        assert_eq!(idle.is_valid(), Some(&vec![BuilderInvalidReason::NoThreads]));
        assert!(idle.build().is_err());

        let default = CensusBuilder::default();
        assert!(default.is_valid().is_none());
    }

    #[test]
    fn settings_from_builder() {
        let census = CensusBuilder::with_size(NonZero::new(11).unwrap())
            .threads(3)
            .symmetry(Symmetry::Full)
            .require_edge(false)
            .verbosity(Verbosity::Rounds)
            .build()
            .unwrap();
        let settings = census.settings();

        assert_eq!(settings.width(), 11);
        assert_eq!(settings.half(), 6);
        assert_eq!(settings.threads, 3);
        assert_eq!(settings.symmetry, Symmetry::Full);
        assert!(!settings.require_edge);
        assert!(settings.reports(Verbosity::Rounds));
        assert!(!settings.reports(Verbosity::Boards));
        assert_eq!(census.tables().width(), 11);
    }

    #[test]
    fn option_names_round_trip() {
        for symmetry in Symmetry::VARIANTS {
            assert_eq!(Symmetry::from_str(&symmetry.to_string()).unwrap(), *symmetry);
        }
        for verbosity in Verbosity::VARIANTS {
            assert_eq!(Verbosity::from_str(&verbosity.to_string()).unwrap(), *verbosity);
        }
        assert_eq!(Symmetry::Rotational.to_string(), "rotational");
        assert_eq!(Verbosity::from_str("boards").unwrap(), Verbosity::Boards);
    }
}
