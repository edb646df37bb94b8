#![no_main]

use arbitrary::Arbitrary;
use astree::{DumpOptions, Literal, NodeId, NodeKind, OpKind, Tree, TreeError, TreeOptions};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Clone, Arbitrary)]
enum Op {
    AddChild(u16),
    InsertParent(u16),
    SetLiteral(u16, i64),
    SetOp(u16),
    Dump(u16, u8),
}

#[derive(Debug, Clone, Arbitrary)]
struct Context {
    initial_capacity: u8,
    max_capacity: u8,
    ops: Vec<Op>,
}

fuzz_target!(|context: Context| {
    let options = TreeOptions {
        initial_capacity: context.initial_capacity as usize,
        max_capacity: context.max_capacity as usize,
    };
    let Ok(mut tree) = Tree::with_options(options) else {
        return;
    };

    for op in context.ops {
        let result = match op {
            // Raw indices on purpose: out-of-range and free slots must be rejected, not panic.
            Op::AddChild(n) => tree.add_child(NodeId::new(n.into())).map(|_| ()),
            Op::InsertParent(n) => tree.insert_parent_above_children(NodeId::new(n.into())).map(|_| ()),
            Op::SetLiteral(n, value) => tree.set_kind(NodeId::new(n.into()), NodeKind::Literal(Literal::Int(value))),
            Op::SetOp(n) => tree.set_kind(NodeId::new(n.into()), NodeKind::Op(OpKind::Add)),
            Op::Dump(n, depth) => {
                let mut lines: Vec<String> = Vec::new();
                tree.dump(NodeId::new(n.into()), depth.into(), &DumpOptions::default(), &mut lines);
                Ok(())
            }
        };

        if let Err(err) = result {
            assert!(matches!(
                err,
                TreeError::InvalidIndex(_) | TreeError::InactiveNode(_) | TreeError::CapacityOverflow { .. }
            ));
        }
        assert!(tree.check_invariants().is_ok());
    }
});
