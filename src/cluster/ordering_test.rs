#[cfg(test)]
mod tests {
    use crate::cluster::ordering::{
        SortStrategy, choose_strategy, general_sort_by_key, insertion_sort_by_key,
        is_sorted_by_key, lower_bound_by_key,
    };
    use quickcheck::quickcheck;

    #[test]
    fn test_choose_strategy() {
        assert_eq!(choose_strategy(0, 10), SortStrategy::Skip);
        assert_eq!(choose_strategy(0, 0), SortStrategy::Skip);
        assert_eq!(choose_strategy(1, 10), SortStrategy::Insertion);
        // 0.2 is not above the threshold
        assert_eq!(choose_strategy(2, 10), SortStrategy::Insertion);
        assert_eq!(choose_strategy(3, 10), SortStrategy::General);
        assert_eq!(choose_strategy(5, 5), SortStrategy::General);
    }

    #[test]
    fn test_insertion_sort_is_stable() {
        let mut items = vec![(3.0, 'a'), (1.0, 'b'), (3.0, 'c'), (2.0, 'd'), (1.0, 'e')];
        insertion_sort_by_key(&mut items, |item| item.0);
        assert_eq!(
            items,
            vec![(1.0, 'b'), (1.0, 'e'), (2.0, 'd'), (3.0, 'a'), (3.0, 'c')]
        );
    }

    #[test]
    fn test_insertion_sort_nearly_sorted_tail() {
        let mut items = vec![-10.0, -3.5, 0.0, 4.0, 12.0, 7.0, -20.0];
        insertion_sort_by_key(&mut items, |&v| v);
        assert_eq!(items, vec![-20.0, -10.0, -3.5, 0.0, 4.0, 7.0, 12.0]);
    }

    #[test]
    fn test_lower_bound() {
        let items = [1.0, 2.0, 2.0, 2.0, 5.0];
        assert_eq!(lower_bound_by_key(&items, 0.0, |&v| v), 0);
        assert_eq!(lower_bound_by_key(&items, 1.0, |&v| v), 0);
        assert_eq!(lower_bound_by_key(&items, 2.0, |&v| v), 1);
        assert_eq!(lower_bound_by_key(&items, 2.5, |&v| v), 4);
        assert_eq!(lower_bound_by_key(&items, 5.0, |&v| v), 4);
        assert_eq!(lower_bound_by_key(&items, 6.0, |&v| v), 5);

        let empty: [f64; 0] = [];
        assert_eq!(lower_bound_by_key(&empty, 1.0, |&v| v), 0);
    }

    quickcheck! {
        fn prop_insertion_sort_sorts(xs: Vec<i32>) -> bool {
            let mut items: Vec<f64> = xs.iter().map(|&x| x as f64 / 7.0).collect();
            insertion_sort_by_key(&mut items, |&v| v);
            is_sorted_by_key(&items, |&v| v)
        }

        fn prop_general_sort_matches_insertion(xs: Vec<i32>) -> bool {
            let mut a: Vec<f64> = xs.iter().map(|&x| x as f64).collect();
            let mut b = a.clone();
            insertion_sort_by_key(&mut a, |&v| v);
            general_sort_by_key(&mut b, |&v| v);
            a == b
        }

        fn prop_lower_bound_matches_linear_scan(xs: Vec<i16>, query: i16) -> bool {
            let mut items: Vec<f64> = xs.iter().map(|&x| x as f64 / 4.0).collect();
            general_sort_by_key(&mut items, |&v| v);
            let query = query as f64 / 4.0;

            let expected = items
                .iter()
                .position(|&v| v >= query)
                .unwrap_or(items.len());
            lower_bound_by_key(&items, query, |&v| v) == expected
        }
    }
}
