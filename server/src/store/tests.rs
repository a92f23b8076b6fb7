/*
 * Created on Thu Feb 10 2022
 *
 * This file is a part of Oakdb
 * Oakdb is a free and open-source concurrent ordered key/value database
 * written by Ray Mercer ("the Author") with the vision to provide safe
 * shared access to tree-structured data without compromising on
 * correctness or simplicity
 *
 * Copyright (c) 2022, Ray Mercer <hey.raymercer@outlook.com>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 *
*/

mod store_tests {
    use super::super::Store;

    fn assert_strictly_increasing(store: &Store) {
        let names = store.inorder_names();
        assert!(
            names.windows(2).all(|w| w[0] < w[1]),
            "in-order traversal is not strictly increasing: {:?}",
            names
        );
    }

    #[test]
    fn test_empty_store() {
        let store = Store::new();
        assert!(store.get_cloned(b"anything").is_none());
        assert!(!store.true_if_removed(b"anything"));
        assert!(store.inorder_names().is_empty());
    }

    #[test]
    fn test_add_then_query_roundtrip() {
        let store = Store::new();
        assert!(store.true_if_insert(b"alpha", b"1"));
        assert!(store.true_if_insert(b"beta", b"2"));
        assert_eq!(store.get_cloned(b"alpha").unwrap().as_ref(), b"1");
        assert_eq!(store.get_cloned(b"beta").unwrap().as_ref(), b"2");
        assert!(store.get_cloned(b"gamma").is_none());
    }

    #[test]
    fn test_duplicate_add_leaves_value_alone() {
        let store = Store::new();
        assert!(store.true_if_insert(b"k", b"v1"));
        assert!(!store.true_if_insert(b"k", b"v2"));
        assert_eq!(store.get_cloned(b"k").unwrap().as_ref(), b"v1");
    }

    #[test]
    fn test_delete_leaf() {
        let store = Store::new();
        store.true_if_insert(b"m", b"1");
        store.true_if_insert(b"f", b"2");
        assert!(store.true_if_removed(b"f"));
        assert!(store.get_cloned(b"f").is_none());
        assert_eq!(store.get_cloned(b"m").unwrap().as_ref(), b"1");
        assert_strictly_increasing(&store);
    }

    #[test]
    fn test_delete_node_with_single_child() {
        let store = Store::new();
        // m -> f -> a is a left chain; removing f must reattach a under m
        store.true_if_insert(b"m", b"1");
        store.true_if_insert(b"f", b"2");
        store.true_if_insert(b"a", b"3");
        assert!(store.true_if_removed(b"f"));
        assert_eq!(store.get_cloned(b"a").unwrap().as_ref(), b"3");
        assert_eq!(store.get_cloned(b"m").unwrap().as_ref(), b"1");
        assert_strictly_increasing(&store);
        // and the right-chain mirror image
        store.true_if_insert(b"t", b"4");
        store.true_if_insert(b"x", b"5");
        assert!(store.true_if_removed(b"t"));
        assert_eq!(store.get_cloned(b"x").unwrap().as_ref(), b"5");
        assert_strictly_increasing(&store);
    }

    #[test]
    fn test_delete_two_children_successor_is_right_child() {
        let store = Store::new();
        for (name, value) in [
            (&b"m"[..], &b"1"[..]),
            (b"f", b"1"),
            (b"t", b"1"),
            (b"a", b"1"),
            (b"h", b"1"),
        ] {
            assert!(store.true_if_insert(name, value));
        }
        // m has two children and its right child t has no left subtree, so
        // t's contents move into m's node
        assert!(store.true_if_removed(b"m"));
        assert!(store.get_cloned(b"m").is_none());
        assert_eq!(store.get_cloned(b"t").unwrap().as_ref(), b"1");
        assert_eq!(store.get_cloned(b"f").unwrap().as_ref(), b"1");
        assert_eq!(store.get_cloned(b"a").unwrap().as_ref(), b"1");
        assert_eq!(store.get_cloned(b"h").unwrap().as_ref(), b"1");
        assert_strictly_increasing(&store);
    }

    #[test]
    fn test_delete_two_children_deep_successor_with_right_child() {
        let store = Store::new();
        // shape: d(b, h(f(e(-, eb), g), j)); the successor of d is e, which
        // still owns a right child that must land on f's left slot
        for name in [&b"d"[..], b"b", b"h", b"f", b"j", b"e", b"g", b"eb"] {
            assert!(store.true_if_insert(name, b"x"));
        }
        assert!(store.true_if_removed(b"d"));
        assert!(store.get_cloned(b"d").is_none());
        for name in [&b"b"[..], b"h", b"f", b"j", b"e", b"g", b"eb"] {
            assert!(store.get_cloned(name).is_some(), "lost {:?}", name);
        }
        assert_strictly_increasing(&store);
    }

    #[test]
    fn test_second_delete_is_absent() {
        let store = Store::new();
        store.true_if_insert(b"a", b"1");
        assert!(store.true_if_removed(b"a"));
        assert!(!store.true_if_removed(b"a"));
        assert!(store.inorder_names().is_empty());
    }

    #[test]
    fn test_query_copy_survives_delete() {
        let store = Store::new();
        store.true_if_insert(b"k", b"payload");
        let copy = store.get_cloned(b"k").unwrap();
        assert!(store.true_if_removed(b"k"));
        assert_eq!(copy.as_ref(), b"payload");
    }
}

mod randomized_tests {
    use super::super::Store;
    use rand::prelude::*;
    use std::collections::BTreeMap;

    fn random_name(rng: &mut impl Rng) -> Vec<u8> {
        let len = rng.gen_range(1..=8);
        (0..len).map(|_| rng.gen_range(b'a'..=b'z')).collect()
    }

    #[test]
    fn test_inorder_matches_model_after_random_ops() {
        let store = Store::new();
        let mut model: BTreeMap<Vec<u8>, Vec<u8>> = BTreeMap::new();
        let mut rng = rand::thread_rng();
        for _ in 0..4096 {
            let name = random_name(&mut rng);
            if rng.gen_bool(0.6) {
                let value = random_name(&mut rng);
                let fresh = store.true_if_insert(&name, &value);
                assert_eq!(fresh, !model.contains_key(&name));
                if fresh {
                    model.insert(name, value);
                }
            } else {
                let removed = store.true_if_removed(&name);
                assert_eq!(removed, model.remove(&name).is_some());
            }
        }
        let names = store.inorder_names();
        assert!(names.windows(2).all(|w| w[0] < w[1]));
        let expected: Vec<&Vec<u8>> = model.keys().collect();
        assert_eq!(names.len(), expected.len());
        for (got, want) in names.iter().zip(expected) {
            assert_eq!(got.as_ref(), &want[..]);
        }
        for (name, value) in model.iter() {
            assert_eq!(store.get_cloned(name).unwrap().as_ref(), &value[..]);
        }
    }
}

mod concurrency_tests {
    use super::super::Store;
    use rand::prelude::*;
    use std::thread;

    // a deliberately small keyspace so that threads keep colliding on the
    // same paths
    fn pick_name(rng: &mut impl Rng) -> [u8; 2] {
        [rng.gen_range(b'a'..=b'h'), rng.gen_range(b'a'..=b'h')]
    }

    #[test]
    fn test_mixed_ops_terminate_and_preserve_order() {
        let store = Store::new();
        thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    let mut rng = rand::thread_rng();
                    for _ in 0..2000 {
                        let name = pick_name(&mut rng);
                        match rng.gen_range(0..3) {
                            0 => {
                                store.true_if_insert(&name, b"v");
                            }
                            1 => {
                                store.true_if_removed(&name);
                            }
                            _ => {
                                store.get_cloned(&name);
                            }
                        }
                    }
                });
            }
        });
        let names = store.inorder_names();
        assert!(names.windows(2).all(|w| w[0] < w[1]));
        for name in names {
            assert!(store.get_cloned(&name).is_some());
        }
    }

    #[test]
    fn test_readers_overlap_writer() {
        let store = Store::new();
        for name in [&b"m"[..], b"f", b"t", b"a", b"h", b"p", b"x"] {
            store.true_if_insert(name, b"seed");
        }
        thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for _ in 0..5000 {
                        store.get_cloned(b"h");
                        store.get_cloned(b"x");
                    }
                });
            }
            scope.spawn(|| {
                let mut rng = rand::thread_rng();
                for _ in 0..2000 {
                    let name = pick_name(&mut rng);
                    if rng.gen_bool(0.5) {
                        store.true_if_insert(&name, b"w");
                    } else {
                        store.true_if_removed(&name);
                    }
                }
            });
        });
        assert!(store.get_cloned(b"m").is_some());
    }
}
