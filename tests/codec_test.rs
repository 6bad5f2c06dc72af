//! Integration tests for the L/R path codec and the mediant algebra.

use num_bigint::BigInt;
use rstest::rstest;

use sbtree::domain::codec::{matrix_of, path_len};
use sbtree::domain::{
    are_neighbors, child_of, decode, encode, mediant, minus, other_parent, Move, MoveMatrix, Node,
    TreeConfig,
};
use sbtree::application::services::Navigator;
use sbtree::util::testing::node;

#[rstest]
#[case(node(4, 3), "RLL")]
#[case(node(1, 2), "L")]
#[case(node(3, 5), "LRL")]
#[case(node(5, 2), "RRL")]
#[case(node(1, 4), "LLL")]
fn given_node_when_encoding_then_lr_path(#[case] target: Node, #[case] path: &str) {
    assert_eq!(encode(&target, None).as_deref(), Some(path));
    assert_eq!(decode(path), target);
}

#[rstest]
fn given_sentinel_nodes_when_encoding_then_documented_results() {
    assert_eq!(encode(&Node::zero(), None), None);
    assert_eq!(encode(&Node::infinity(), None), None);
    assert_eq!(encode(&Node::one(), None), Some(String::new()));
    assert_eq!(decode(""), Node::one());
}

#[rstest]
#[case("0 1 1", "LRR")]
#[case("r-l-l", "RLL")]
fn given_alternate_alphabet_when_decoding_then_same_as_lr(#[case] raw: &str, #[case] lr: &str) {
    assert_eq!(decode(raw), decode(lr));
}

#[rstest]
fn given_path_when_decoding_then_matches_path_to_depth() {
    let target = node(11, 10);
    let code = encode(&target, None).unwrap();
    let depth = Navigator::new(TreeConfig::stern_brocot())
        .depth_of(&target)
        .unwrap();
    // the root 1/1 is one step below the boundaries
    assert_eq!(code.len() + 1, depth);
    assert_eq!(path_len(&target), Some(BigInt::from(code.len())));
}

#[rstest]
fn given_any_path_when_accumulating_moves_then_unimodular() {
    let m = matrix_of("RLLRRRLRL");
    assert_eq!(m.determinant(), BigInt::from(1));
    let expected = Move::Right.matrix();
    assert_eq!(matrix_of("R"), expected);
    assert_eq!(
        &MoveMatrix::identity() * &Move::Left.matrix(),
        Move::Left.matrix()
    );
}

#[rstest]
fn given_boundaries_when_taking_mediant_then_root() {
    assert_eq!(mediant(&Node::zero(), &Node::infinity()), Node::one());
}

#[rstest]
#[case(node(5, 4), node(4, 3), true)]
#[case(node(5, 4), node(8, 5), false)]
#[case(node(0, 1), Node::infinity(), true)]
#[case(node(1, 3), node(1, 1), false)]
fn given_pair_when_checking_neighbors_then_determinant_rule(
    #[case] a: Node,
    #[case] b: Node,
    #[case] expected: bool,
) {
    assert_eq!(are_neighbors(&a, &b), expected);
    assert_eq!(are_neighbors(&b, &a), expected);
}

#[rstest]
fn given_child_and_parent_when_recovering_then_other_parent() {
    let child = mediant(&node(2, 3), &node(3, 4));
    assert_eq!(child, node(5, 7));
    assert_eq!(other_parent(&child, &node(2, 3)).unwrap(), node(3, 4));
    assert_eq!(minus(&node(5, 7), &node(3, 4)).unwrap(), node(2, 3));
    assert_eq!(child_of(&node(1, 3), &node(1, 1), true), None);
    assert_eq!(child_of(&node(1, 2), &node(1, 1), true), Some(node(2, 3)));
}
