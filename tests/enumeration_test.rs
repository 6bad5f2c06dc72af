//! Integration tests for sequences, tree rows, descendants and diatomic terms.

use num_bigint::BigInt;
use rstest::{fixture, rstest};

use sbtree::application::services::{
    calkin_wilf, descendants_of, numeric_sequence, sequence_between, Navigator,
};
use sbtree::domain::{are_neighbors, Node, TreeConfig};
use sbtree::util::testing::{node, nodes};

#[fixture]
fn stern_brocot() -> Navigator {
    Navigator::new(TreeConfig::stern_brocot())
}

#[rstest]
fn given_depth_three_when_sequence_then_nine_ordered_nodes(stern_brocot: Navigator) {
    assert_eq!(
        stern_brocot.sequence(3),
        nodes(&[(0, 1), (1, 3), (1, 2), (2, 3), (1, 1), (3, 2), (2, 1), (3, 1), (1, 0)])
    );
}

#[rstest]
#[case(0, 2)]
#[case(1, 3)]
#[case(4, 17)]
#[case(6, 65)]
fn given_depth_when_sequence_then_doubling_size(
    stern_brocot: Navigator,
    #[case] depth: usize,
    #[case] len: usize,
) {
    let seq = stern_brocot.sequence(depth);
    assert_eq!(seq.len(), len);
    assert!(seq.windows(2).all(|w| w[0] < w[1]));
    assert!(seq.windows(2).all(|w| are_neighbors(&w[0], &w[1])));
}

#[rstest]
#[case(1, 2)]
#[case(3, 5)]
#[case(5, 17)]
#[case(7, 65)]
fn given_depth_when_tree_then_row_size_law(
    stern_brocot: Navigator,
    #[case] depth: usize,
    #[case] total: usize,
) {
    let rows = stern_brocot.tree(depth);
    assert_eq!(rows.len(), depth);
    assert_eq!(rows.iter().map(Vec::len).sum::<usize>(), total);
    assert_eq!(total, (1 << (depth - 1)) + 1);
}

#[rstest]
fn given_tree_five_when_flattened_then_seventeen_nodes(stern_brocot: Navigator) {
    let rows = stern_brocot.tree(5);
    let sizes: Vec<usize> = rows.iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![2, 1, 2, 4, 8]);
    assert_eq!(rows[3], nodes(&[(1, 3), (2, 3), (3, 2), (3, 1)]));
}

#[rstest]
fn given_subtree_when_inorder_then_sequence_interior(stern_brocot: Navigator) {
    let arena = stern_brocot.subtree(4);
    let inorder: Vec<Node> = arena
        .iter_inorder()
        .map(|(_, pos)| pos.data.node.clone())
        .collect();
    let seq = stern_brocot.sequence(4);
    assert_eq!(inorder, seq[1..seq.len() - 1].to_vec());
    assert_eq!(arena.depth(), 4);
}

#[rstest]
fn given_arena_node_when_ancestry_then_matches_path(stern_brocot: Navigator) {
    let arena = stern_brocot.subtree(5);
    let idx = arena.find(&node(3, 5)).unwrap();
    let path = stern_brocot.path_to(&node(3, 5)).unwrap();
    assert_eq!(arena.ancestry(idx), path[2..].to_vec());
}

#[rstest]
#[case(node(1, 3), node(1, 1))]
#[case(node(2, 5), node(2, 3))]
#[case(node(0, 1), node(2, 1))]
fn given_non_neighbors_when_strict_descendants_then_empty(#[case] p1: Node, #[case] p2: Node) {
    assert!(!are_neighbors(&p1, &p2));
    assert!(descendants_of(&p1, &p2, 3, true).is_empty());
}

#[rstest]
fn given_reversed_pair_when_descendants_then_same_ascending_result() {
    let forward = descendants_of(&node(1, 2), &node(1, 1), 3, true);
    let backward = descendants_of(&node(1, 1), &node(1, 2), 3, true);
    assert_eq!(forward, backward);
    assert_eq!(forward.len(), 7);
    assert_eq!(forward, sequence_between(3, &node(1, 2), &node(1, 1))[1..8].to_vec());
}

#[rstest]
fn given_two_iterators_when_taking_then_independent() {
    let mut first = numeric_sequence();
    first.nth(10);
    let fresh: Vec<BigInt> = numeric_sequence().take(3).collect();
    assert_eq!(fresh, vec![BigInt::from(1), BigInt::from(1), BigInt::from(2)]);
}

#[rstest]
fn given_calkin_wilf_when_taking_many_then_no_repeats() {
    let first: Vec<Node> = calkin_wilf().take(200).collect();
    let unique: std::collections::HashSet<&Node> = first.iter().collect();
    assert_eq!(unique.len(), first.len());
}
