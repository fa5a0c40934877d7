use core::ops::Index;

use crate::types::NumericType;
use crate::values::Value;

use super::node::{AssignOp, BinOp, MathFn, Node, NodeFlags, NodeId, NodeKind, UnOp};

/// An immutable, index-addressed program tree.
///
/// Children and parents are stored as [`NodeId`]s, so the back-links the
/// compiler walks never own the nodes they point to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId(i as u32), node))
    }

    /// Function entries in creation order.
    pub fn functions(&self) -> Vec<NodeId> {
        self.iter()
            .filter(|(_, node)| node.parent.is_none() && matches!(node.kind, NodeKind::Function(_)))
            .map(|(id, _)| id)
            .collect()
    }

    /// Whether `id` is the left child of its parent.
    pub fn is_left_child(&self, id: NodeId) -> bool {
        self.get(id)
            .and_then(|node| node.parent)
            .and_then(|parent| self.get(parent))
            .is_some_and(|parent| parent.left == Some(id))
    }
}

impl Index<NodeId> for Tree {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }
}

/// Builds a [`Tree`] bottom-up and links parent back-references.
///
/// Every constructor takes already-built children, so a child always has a
/// smaller id than its parent.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<Node>,
    line: u32,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Source line recorded on nodes created from now on.
    pub fn at_line(&mut self, line: u32) -> &mut Self {
        self.line = line;
        self
    }

    pub fn add(&mut self, kind: NodeKind, left: Option<NodeId>, right: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        for child in [left, right].into_iter().flatten() {
            let child = &mut self.nodes[child.index()];
            debug_assert!(child.parent.is_none(), "node already has a parent");
            child.parent = Some(id);
        }
        let mut node = Node::new(kind);
        node.line = self.line;
        node.left = left;
        node.right = right;
        self.nodes.push(node);
        id
    }

    pub fn set_type(&mut self, id: NodeId, ty: NumericType) -> NodeId {
        self.nodes[id.index()].ty = Some(ty);
        id
    }

    pub fn set_flags(&mut self, id: NodeId, flags: NodeFlags) -> NodeId {
        self.nodes[id.index()].flags.insert(flags);
        id
    }

    /// Mark `id` as a complete statement.
    pub fn statement(&mut self, id: NodeId) -> NodeId {
        self.set_flags(id, NodeFlags::END_STATEMENT)
    }

    fn ty(&self, id: NodeId) -> Option<NumericType> {
        self.nodes[id.index()].ty
    }

    pub fn constant(&mut self, value: Value) -> NodeId {
        let id = self.add(NodeKind::Constant(value), None, None);
        self.set_type(id, value.ty())
    }

    /// A register with a compile-time index.
    pub fn register(&mut self, ty: NumericType, index: u64) -> NodeId {
        let id = self.add(NodeKind::VarConst { index }, None, None);
        self.set_type(id, ty)
    }

    /// A register indexed by the value of `index`.
    pub fn register_at(&mut self, ty: NumericType, index: NodeId) -> NodeId {
        let id = self.add(NodeKind::VarExp, Some(index), None);
        self.set_type(id, ty)
    }

    pub fn binary(&mut self, op: BinOp, left: NodeId, right: NodeId) -> NodeId {
        let ty = match (op.value_op(), self.ty(left), self.ty(right)) {
            (None, _, _) => Some(NumericType::I32),
            (Some(op), Some(l), Some(r)) => Some(op.result_type(l, r)),
            _ => None,
        };
        let id = self.add(NodeKind::Binary(op), Some(left), Some(right));
        if let Some(ty) = ty {
            self.set_type(id, ty);
        }
        id
    }

    /// Rotation of a 32- or 64-bit word, chosen by the width of `word`.
    pub fn rotate(&mut self, op: BinOp, word: NodeId, amount: NodeId) -> NodeId {
        debug_assert!(matches!(op, BinOp::Rotl | BinOp::Rotr));
        let wide = self.ty(word).is_some_and(|ty| ty.bits() == 64);
        let id = self.binary(op, word, amount);
        if wide {
            self.set_flags(id, NodeFlags::WIDE);
        }
        id
    }

    pub fn assign(&mut self, op: AssignOp, target: NodeId, value: NodeId) -> NodeId {
        let ty = self.ty(target);
        let id = self.add(NodeKind::Assign(op), Some(target), Some(value));
        if let Some(ty) = ty {
            self.set_type(id, ty);
        }
        id
    }

    pub fn unary(&mut self, op: UnOp, operand: NodeId) -> NodeId {
        let ty = self.ty(operand);
        let id = self.add(NodeKind::Unary(op), Some(operand), None);
        if let Some(ty) = ty {
            self.set_type(id, ty);
        }
        id
    }

    pub fn math(&mut self, f: MathFn, arg: NodeId) -> NodeId {
        debug_assert_eq!(f.arity(), 1);
        let id = self.add(NodeKind::Math(f), Some(arg), None);
        self.set_type(id, NumericType::F64)
    }

    pub fn math2(&mut self, f: MathFn, a: NodeId, b: NodeId) -> NodeId {
        debug_assert_eq!(f.arity(), 2);
        let id = self.add(NodeKind::Math(f), Some(a), Some(b));
        self.set_type(id, NumericType::F64)
    }

    pub fn conditional(&mut self, cond: NodeId, then: NodeId, otherwise: NodeId) -> NodeId {
        let ty = self.ty(then);
        let branches = self.add(NodeKind::CondElse, Some(then), Some(otherwise));
        let id = self.add(NodeKind::Conditional, Some(cond), Some(branches));
        if let Some(ty) = ty {
            self.set_type(id, ty);
        }
        id
    }

    pub fn if_then(&mut self, cond: NodeId, body: NodeId) -> NodeId {
        let id = self.add(NodeKind::If, Some(cond), Some(body));
        self.statement(id)
    }

    pub fn if_else(&mut self, cond: NodeId, then: NodeId, otherwise: NodeId) -> NodeId {
        let branches = self.add(NodeKind::Else, Some(then), Some(otherwise));
        self.statement(branches);
        self.if_then(cond, branches)
    }

    pub fn repeat(
        &mut self,
        token: u32,
        count: NodeId,
        max_iterations: i64,
        counter: u64,
        body: NodeId,
    ) -> NodeId {
        let kind = NodeKind::Repeat { token, max_iterations, counter };
        let id = self.add(kind, Some(count), Some(body));
        self.statement(id)
    }

    /// A block over `statements`, chained through right children.
    pub fn block(&mut self, statements: &[NodeId]) -> NodeId {
        let mut next = None;
        for &statement in statements.iter().rev() {
            next = Some(self.add(NodeKind::Block, Some(statement), next));
        }
        match next {
            Some(id) => id,
            None => self.add(NodeKind::Block, None, None),
        }
    }

    pub fn function(&mut self, name: impl Into<String>, body: NodeId) -> NodeId {
        self.add(NodeKind::Function(name.into()), None, Some(body))
    }

    pub fn call(&mut self, name: impl Into<String>) -> NodeId {
        self.add(NodeKind::Call(name.into()), None, None)
    }

    pub fn break_loop(&mut self) -> NodeId {
        let id = self.add(NodeKind::Break, None, None);
        self.statement(id)
    }

    pub fn continue_loop(&mut self) -> NodeId {
        let id = self.add(NodeKind::Continue, None, None);
        self.statement(id)
    }

    pub fn verify_bounty(&mut self, condition: NodeId) -> NodeId {
        let id = self.add(NodeKind::VerifyBounty, Some(condition), None);
        self.statement(id)
    }

    pub fn verify_pow(&mut self, args: [NodeId; 4]) -> NodeId {
        let mut next = None;
        for arg in args.into_iter().rev() {
            next = Some(self.add(NodeKind::Param, Some(arg), next));
        }
        let id = self.add(NodeKind::VerifyPow, next, None);
        self.statement(id)
    }

    pub fn finish(self) -> Tree {
        Tree { nodes: self.nodes }
    }
}
