// Unit tests for the person tree

use matchbook::core::{PersonTree, TreeError};
use matchbook::models::{Gender, Height, NewPerson, Person};
use std::sync::Arc;

fn create_person(id: u64, height: f64) -> Arc<Person> {
    Arc::new(Person::new(
        id,
        NewPerson {
            name: format!("Person {}", id),
            height,
            gender: Gender::Female,
            wanted_dates: 1,
        },
    ))
}

fn ids(people: &[Arc<Person>]) -> Vec<u64> {
    people.iter().map(|p| p.id).collect()
}

#[test]
fn test_range_query_scenario() {
    let tree = PersonTree::new();
    tree.add(create_person(1, 150.0)).unwrap();
    tree.add(create_person(2, 155.0)).unwrap();

    let found = tree.query_by_height(Height(151.0), Height(161.0));
    assert_eq!(ids(&found), vec![2]);
}

#[test]
fn test_range_query_independent_of_insertion_order() {
    let heights = [(1, 140.0), (2, 152.5), (3, 160.0), (4, 171.0), (5, 185.0), (6, 199.9)];
    let orders: [[usize; 6]; 3] = [[0, 1, 2, 3, 4, 5], [5, 4, 3, 2, 1, 0], [3, 0, 5, 1, 4, 2]];

    for order in orders {
        let tree = PersonTree::new();
        for i in order {
            let (id, height) = heights[i];
            tree.add(create_person(id, height)).unwrap();
        }

        let found = tree.query_by_height(Height(152.5), Height(185.0));
        assert_eq!(ids(&found), vec![2, 3, 4, 5], "insertion order {:?}", order);
    }
}

#[test]
fn test_range_query_empty_tree() {
    let tree = PersonTree::new();
    assert!(tree.query_by_height(Height::MIN, Height::MAX).is_empty());
    assert!(tree.is_empty());
}

#[test]
fn test_range_query_keeps_insertion_order_within_height() {
    let tree = PersonTree::new();
    for id in [9, 3, 7] {
        tree.add(create_person(id, 165.0)).unwrap();
    }
    tree.add(create_person(1, 160.0)).unwrap();

    let found = tree.query_by_height(Height::MIN, Height::MAX);
    assert_eq!(ids(&found), vec![1, 9, 3, 7]);
}

#[test]
fn test_remove_then_remove() {
    let tree = PersonTree::new();
    tree.add(create_person(1, 150.0)).unwrap();

    assert_eq!(tree.remove(1), Ok(()));
    assert_eq!(tree.remove(1), Err(TreeError::NotFound(1)));
}

#[test]
fn test_add_then_find_round_trip() {
    let tree = PersonTree::new();
    let person = create_person(4, 168.25);
    tree.add(Arc::clone(&person)).unwrap();

    let found = tree.find_by_id(4).expect("person should be stored");
    assert_eq!(*found, *person);
}

#[test]
fn test_indexes_stay_consistent() {
    let tree = PersonTree::new();

    // Deterministic pseudo-random mix of adds and removes over a small id space
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    let mut present = std::collections::HashSet::new();
    for _ in 0..500 {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;

        let id = state % 40;
        let height = 150.0 + (state % 7) as f64 * 5.0;
        if present.contains(&id) {
            assert!(tree.remove(id).is_ok());
            present.remove(&id);
        } else {
            assert!(tree.add(create_person(id, height)).is_ok());
            present.insert(id);
        }

        tree.check_consistency().unwrap();
    }

    assert_eq!(tree.len(), present.len());
    let mut listed: Vec<u64> = tree.snapshot().into_iter().flat_map(|b| b.ids).collect();
    listed.sort_unstable();
    let mut expected: Vec<u64> = present.into_iter().collect();
    expected.sort_unstable();
    assert_eq!(listed, expected);
}

#[test]
fn test_concurrent_adds_and_queries() {
    let tree = PersonTree::new();

    std::thread::scope(|s| {
        for t in 0..4u64 {
            let tree = &tree;
            s.spawn(move || {
                for i in 0..100u64 {
                    let id = t * 1000 + i;
                    tree.add(create_person(id, 150.0 + (i % 10) as f64)).unwrap();
                }
            });
        }
        s.spawn(|| {
            for _ in 0..100 {
                let found = tree.query_by_height(Height(150.0), Height(200.0));
                assert!(found.windows(2).all(|w| w[0].height <= w[1].height));
            }
        });
    });

    assert_eq!(tree.len(), 400);
    tree.check_consistency().unwrap();
}
