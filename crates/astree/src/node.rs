use std::fmt::{self, Display, Formatter};

use smol_str::SmolStr;

use crate::arena::NodeId;

pub type Name = SmolStr;

#[non_exhaustive]
#[derive(PartialEq, Debug, Clone)]
pub enum Literal {
    None,
    Int(i64),
    Float(f64),
    String(SmolStr),
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Literal::None => write!(f, "none"),
            Literal::Int(i) => write!(f, "{}", i),
            Literal::Float(v) => write!(f, "{:.6}", v),
            Literal::String(s) => write!(f, "\"{}\"", s),
        }
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Int(value)
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Literal::Float(value)
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::String(SmolStr::new(value))
    }
}

#[non_exhaustive]
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum CondOp {
    GreaterThan,
    EqualTo,
}

impl Display for CondOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CondOp::GreaterThan => write!(f, "greater than"),
            CondOp::EqualTo => write!(f, "equal to"),
        }
    }
}

#[non_exhaustive]
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum OpKind {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Display for OpKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            OpKind::Add => write!(f, "add"),
            OpKind::Subtract => write!(f, "subtract"),
            OpKind::Multiply => write!(f, "multiply"),
            OpKind::Divide => write!(f, "divide"),
        }
    }
}

/// What a node represents, together with the payload that kind carries.
#[non_exhaustive]
#[derive(PartialEq, Debug, Clone, Default)]
pub enum NodeKind {
    /// A claimed slot whose kind the parser has not filled in yet.
    #[default]
    Unset,
    Sequence,
    FuncDef(Name),
    FuncCall(Name),
    If,
    Literal(Literal),
    Cond(CondOp),
    Op(OpKind),
    Variable(Name),
    Assign,
    FuncDefParm(Name),
}

impl NodeKind {
    pub fn func_def(name: &str) -> Self {
        NodeKind::FuncDef(Name::new(name))
    }

    pub fn func_call(name: &str) -> Self {
        NodeKind::FuncCall(Name::new(name))
    }

    pub fn variable(name: &str) -> Self {
        NodeKind::Variable(Name::new(name))
    }

    pub fn func_def_parm(name: &str) -> Self {
        NodeKind::FuncDefParm(Name::new(name))
    }

    /// Stable lowercase name of the kind, without payload.
    pub fn type_name(&self) -> &'static str {
        match self {
            NodeKind::Unset => "unknown",
            NodeKind::Sequence => "sequence",
            NodeKind::FuncDef(_) => "function def",
            NodeKind::FuncCall(_) => "function call",
            NodeKind::If => "if",
            NodeKind::Literal(_) => "literal",
            NodeKind::Cond(_) => "cond",
            NodeKind::Op(_) => "op",
            NodeKind::Variable(_) => "variable",
            NodeKind::Assign => "assign",
            NodeKind::FuncDefParm(_) => "function def parm",
        }
    }

    /// The name carried by definition, call, variable and parameter nodes.
    pub fn name(&self) -> Option<&str> {
        match self {
            NodeKind::FuncDef(name)
            | NodeKind::FuncCall(name)
            | NodeKind::Variable(name)
            | NodeKind::FuncDefParm(name) => Some(name.as_str()),
            _ => None,
        }
    }
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let type_name = self.type_name();
        match self {
            NodeKind::Sequence | NodeKind::If | NodeKind::Assign | NodeKind::Unset => {
                write!(f, "{} node", type_name)
            }
            NodeKind::FuncDef(name)
            | NodeKind::FuncCall(name)
            | NodeKind::Variable(name)
            | NodeKind::FuncDefParm(name) => write!(f, "{} node: {}", type_name, name),
            NodeKind::Literal(literal) => write!(f, "{} node: {}", type_name, literal),
            NodeKind::Cond(op) => write!(f, "{} node: {}", type_name, op),
            NodeKind::Op(op) => write!(f, "{} node: {}", type_name, op),
        }
    }
}

/// A single slot of the node arena.
///
/// Topology is stored as indices into the same arena. A slot with
/// `active == false` is free and must not be linked from anywhere.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct Node {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub first_child: Option<NodeId>,
    pub next_sibling: Option<NodeId>,
    pub prev_sibling: Option<NodeId>,
    pub active: bool,
}

impl Node {
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[inline]
    pub fn has_children(&self) -> bool {
        self.first_child.is_some()
    }
}
