use astree::{
    CondOp, DumpOptions, Literal, NodeId, NodeKind, OpKind, Tree, TreeError, TreeOptions,
};
use rstest::{fixture, rstest};

#[fixture]
fn tree() -> Tree {
    Tree::new().unwrap()
}

/// Builds `if (x > 1) { y = x + 2 }` the way a recursive-descent parser would,
/// promoting already parsed operands into an operator node.
fn build_if(tree: &mut Tree) -> NodeId {
    let root = tree.root();
    let if_node = tree.add_child_with_kind(root, NodeKind::If).unwrap();

    let cond = tree.add_child(if_node).unwrap();
    tree.add_child_with_kind(cond, NodeKind::variable("x")).unwrap();
    tree.add_child_with_kind(cond, NodeKind::Literal(Literal::Int(1)))
        .unwrap();
    tree.set_kind(cond, NodeKind::Cond(CondOp::GreaterThan))
        .unwrap();

    let body = tree.add_child_with_kind(if_node, NodeKind::Sequence).unwrap();
    let assign = tree.add_child_with_kind(body, NodeKind::Assign).unwrap();
    tree.add_child_with_kind(assign, NodeKind::variable("y")).unwrap();
    let value = tree.add_child_with_kind(assign, NodeKind::Sequence).unwrap();
    tree.add_child_with_kind(value, NodeKind::variable("x")).unwrap();
    tree.add_child_with_kind(value, NodeKind::Literal(Literal::Int(2)))
        .unwrap();
    let add = tree.insert_parent_above_children(value).unwrap();
    tree.set_kind(add, NodeKind::Op(OpKind::Add)).unwrap();

    if_node
}

#[rstest]
fn test_root_invariant(tree: Tree) {
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.kind(tree.root()).unwrap(), &NodeKind::Sequence);
    assert_eq!(tree.parent(tree.root()).unwrap(), None);
    assert_eq!(tree.arena().iter_active().count(), 1);
}

#[rstest]
fn test_end_to_end_literals_and_op(mut tree: Tree) {
    let root = tree.root();
    let three = tree
        .add_child_with_kind(root, NodeKind::Literal(Literal::Int(3)))
        .unwrap();
    let four = tree
        .add_child_with_kind(root, NodeKind::Literal(Literal::Int(4)))
        .unwrap();
    let add = tree.add_child_with_kind(root, NodeKind::Op(OpKind::Add)).unwrap();

    let node = |id| tree.node(id).unwrap().clone();
    assert_eq!(node(three).prev_sibling, None);
    assert_eq!(node(three).next_sibling, Some(four));
    assert_eq!(node(four).prev_sibling, Some(three));
    assert_eq!(node(four).next_sibling, Some(add));
    assert_eq!(node(add).prev_sibling, Some(four));
    assert_eq!(node(add).next_sibling, None);
    assert_eq!(node(add).first_child, None);

    let lines: Vec<String> = tree.render().lines().map(str::to_string).collect();
    assert_eq!(
        lines,
        vec![
            "--- TREE MAP ---",
            "0: (idx: 0) sequence node",
            "parent: -1, first_child: 1, next_sibling: -1, prev_sibling: -1",
            "\t1: (idx: 1) literal node: 3",
            "\tparent: 0, first_child: -1, next_sibling: 2, prev_sibling: -1",
            "\t1: (idx: 2) literal node: 4",
            "\tparent: 0, first_child: -1, next_sibling: 3, prev_sibling: 1",
            "\t1: (idx: 3) op node: add",
            "\tparent: 0, first_child: -1, next_sibling: -1, prev_sibling: 2",
            "--- END TREE MAP ---",
        ]
    );
}

#[rstest]
fn test_parser_style_construction(mut tree: Tree) {
    let if_node = build_if(&mut tree);

    assert!(tree.check_invariants().is_ok());
    assert_eq!(tree.children(tree.root()).collect::<Vec<_>>(), vec![if_node]);

    let rendered = tree.render_with(&DumpOptions::compact());
    let expected = "\
--- TREE MAP ---
0: (idx: 0) sequence node
\t1: (idx: 1) if node
\t\t2: (idx: 2) cond node: greater than
\t\t\t3: (idx: 3) variable node: x
\t\t\t3: (idx: 4) literal node: 1
\t\t2: (idx: 5) sequence node
\t\t\t3: (idx: 6) assign node
\t\t\t\t4: (idx: 7) variable node: y
\t\t\t\t4: (idx: 8) sequence node
\t\t\t\t\t5: (idx: 11) op node: add
\t\t\t\t\t\t6: (idx: 9) variable node: x
\t\t\t\t\t\t6: (idx: 10) literal node: 2
--- END TREE MAP ---
";
    assert_eq!(rendered, expected);
}

#[rstest]
fn test_splice_changes_node_count_by_one(mut tree: Tree) {
    let root = tree.root();
    for value in [1, 2, 3] {
        tree.add_child_with_kind(root, NodeKind::Literal(Literal::Int(value)))
            .unwrap();
    }
    let before = tree.render_with(&DumpOptions::compact()).lines().count();

    let x = tree.insert_parent_above_children(root).unwrap();
    let after = tree.render_with(&DumpOptions::compact()).lines().count();

    assert_eq!(after, before + 1);
    assert_eq!(
        tree.children(x)
            .map(|id| tree.kind(id).unwrap().clone())
            .collect::<Vec<_>>(),
        vec![
            NodeKind::Literal(Literal::Int(1)),
            NodeKind::Literal(Literal::Int(2)),
            NodeKind::Literal(Literal::Int(3)),
        ]
    );
}

#[rstest]
#[case::first_growth(1, 2, 1)]
#[case::room_left(4, 4, 3)]
#[case::exactly_full(2, 4, 2)]
fn test_capacity_after_children(
    #[case] initial_capacity: usize,
    #[case] expected_capacity: usize,
    #[case] children: usize,
) {
    let mut tree = Tree::with_options(TreeOptions {
        initial_capacity,
        ..Default::default()
    })
    .unwrap();
    for _ in 0..children {
        tree.add_child(tree.root()).unwrap();
    }
    assert_eq!(tree.capacity(), expected_capacity);
}

#[test]
fn test_forced_failure_rolls_back_splice() {
    let mut tree = Tree::with_options(TreeOptions {
        initial_capacity: 2,
        max_capacity: 2,
    })
    .unwrap();
    let root = tree.root();
    let child = tree.add_child(root).unwrap();
    let before = tree.render();

    let err = tree.insert_parent_above_children(root).unwrap_err();

    assert_eq!(err, TreeError::CapacityOverflow { capacity: 2, max: 2 });
    assert_eq!(tree.first_child(root).unwrap(), Some(child));
    assert_eq!(tree.render(), before);
}

#[rstest]
fn test_errors_render_as_diagnostics(mut tree: Tree) {
    let err = tree.add_child(NodeId::new(42)).unwrap_err();
    let report = miette_report(err);
    assert!(report.contains("Node index 42 is out of range"));
}

fn miette_report(err: TreeError) -> String {
    format!("{:?}", miette::Report::new(err))
}
