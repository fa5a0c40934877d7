use bitflags::bitflags;
use core::fmt;

use crate::types::NumericType;
use crate::values::{ArithOp, BinaryOp, BitwiseOp, CompareOp, ShiftOp, UnaryOp, Value};

/// Index of a node inside its [`Tree`](super::Tree).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

bitflags! {
    /// Per-node properties set by the parser.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
    pub struct NodeFlags: u8 {
        /// The node is a complete statement and is emitted with its terminator.
        const END_STATEMENT = 1;
        /// Rotations operate on 64-bit words.
        const WIDE = 1 << 1;
        /// An unsigned reference into the `m` working memory.
        const WORKING_MEMORY = 1 << 2;
        /// An unsigned reference into the `s` persistent storage.
        const STORAGE = 1 << 3;
    }
}

/// Binary operators as they appear in the source tree.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    Ne,
    Gt,
    Lt,
    Ge,
    Le,
    And,
    Or,
    BitAnd,
    BitXor,
    BitOr,
    Shl,
    Shr,
    Rotl,
    Rotr,
}

impl BinOp {
    /// Operator text in the generated script.
    pub const fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Gt => ">",
            BinOp::Lt => "<",
            BinOp::Ge => ">=",
            BinOp::Le => "<=",
            BinOp::And => "&&",
            BinOp::Or => "||",
            BinOp::BitAnd => "&",
            BinOp::BitXor => "^",
            BinOp::BitOr => "|",
            BinOp::Shl => "<<",
            BinOp::Shr => ">>",
            BinOp::Rotl => "<<<",
            BinOp::Rotr => ">>>",
        }
    }

    /// The typed operator this node evaluates, if any. Logical `&&` and `||`
    /// work on truthiness and have no typed counterpart.
    pub const fn value_op(self) -> Option<BinaryOp> {
        let op = match self {
            BinOp::Add => BinaryOp::Arith(ArithOp::Add),
            BinOp::Sub => BinaryOp::Arith(ArithOp::Sub),
            BinOp::Mul => BinaryOp::Arith(ArithOp::Mul),
            BinOp::Div => BinaryOp::Arith(ArithOp::Div),
            BinOp::Mod => BinaryOp::Arith(ArithOp::Mod),
            BinOp::Eq => BinaryOp::Compare(CompareOp::Eq),
            BinOp::Ne => BinaryOp::Compare(CompareOp::Ne),
            BinOp::Gt => BinaryOp::Compare(CompareOp::Gt),
            BinOp::Lt => BinaryOp::Compare(CompareOp::Lt),
            BinOp::Ge => BinaryOp::Compare(CompareOp::Ge),
            BinOp::Le => BinaryOp::Compare(CompareOp::Le),
            BinOp::And | BinOp::Or => return None,
            BinOp::BitAnd => BinaryOp::Bitwise(BitwiseOp::And),
            BinOp::BitXor => BinaryOp::Bitwise(BitwiseOp::Xor),
            BinOp::BitOr => BinaryOp::Bitwise(BitwiseOp::Or),
            BinOp::Shl => BinaryOp::Shift(ShiftOp::Shl),
            BinOp::Shr => BinaryOp::Shift(ShiftOp::Shr),
            BinOp::Rotl => BinaryOp::Shift(ShiftOp::Rotl),
            BinOp::Rotr => BinaryOp::Shift(ShiftOp::Rotr),
        };
        Some(op)
    }
}

/// Plain and compound assignment.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum AssignOp {
    Assign,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Shl,
    Shr,
    And,
    Xor,
    Or,
}

impl AssignOp {
    pub const fn symbol(self) -> &'static str {
        match self {
            AssignOp::Assign => "=",
            AssignOp::Add => "+=",
            AssignOp::Sub => "-=",
            AssignOp::Mul => "*=",
            AssignOp::Div => "/=",
            AssignOp::Mod => "%=",
            AssignOp::Shl => "<<=",
            AssignOp::Shr => ">>=",
            AssignOp::And => "&=",
            AssignOp::Xor => "^=",
            AssignOp::Or => "|=",
        }
    }

    /// The operator a compound assignment applies before storing.
    pub const fn value_op(self) -> Option<BinaryOp> {
        let op = match self {
            AssignOp::Assign => return None,
            AssignOp::Add => BinaryOp::Arith(ArithOp::Add),
            AssignOp::Sub => BinaryOp::Arith(ArithOp::Sub),
            AssignOp::Mul => BinaryOp::Arith(ArithOp::Mul),
            AssignOp::Div => BinaryOp::Arith(ArithOp::Div),
            AssignOp::Mod => BinaryOp::Arith(ArithOp::Mod),
            AssignOp::Shl => BinaryOp::Shift(ShiftOp::Shl),
            AssignOp::Shr => BinaryOp::Shift(ShiftOp::Shr),
            AssignOp::And => BinaryOp::Bitwise(BitwiseOp::And),
            AssignOp::Xor => BinaryOp::Bitwise(BitwiseOp::Xor),
            AssignOp::Or => BinaryOp::Bitwise(BitwiseOp::Or),
        };
        Some(op)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UnOp {
    PreIncrement,
    PostIncrement,
    PreDecrement,
    PostDecrement,
    Not,
    Compl,
    Neg,
}

impl UnOp {
    pub const fn value_op(self) -> Option<UnaryOp> {
        match self {
            UnOp::Not => Some(UnaryOp::Not),
            UnOp::Compl => Some(UnaryOp::Compl),
            UnOp::Neg => Some(UnaryOp::Neg),
            _ => None,
        }
    }
}

/// Math intrinsics provided by the host.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MathFn {
    Sin,
    Cos,
    Tan,
    Sinh,
    Cosh,
    Tanh,
    Asin,
    Acos,
    Atan,
    Atan2,
    Exp,
    Log,
    Log10,
    Sqrt,
    Ceil,
    Floor,
    Abs,
    Fabs,
    Fmod,
    Pow,
    Gcd,
}

impl MathFn {
    pub const fn arity(self) -> usize {
        match self {
            MathFn::Atan2 | MathFn::Fmod | MathFn::Pow | MathFn::Gcd => 2,
            _ => 1,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            MathFn::Sin => "sin",
            MathFn::Cos => "cos",
            MathFn::Tan => "tan",
            MathFn::Sinh => "sinh",
            MathFn::Cosh => "cosh",
            MathFn::Tanh => "tanh",
            MathFn::Asin => "asin",
            MathFn::Acos => "acos",
            MathFn::Atan => "atan",
            MathFn::Atan2 => "atan2",
            MathFn::Exp => "exp",
            MathFn::Log => "log",
            MathFn::Log10 => "log10",
            MathFn::Sqrt => "sqrt",
            MathFn::Ceil => "ceil",
            MathFn::Floor => "floor",
            MathFn::Abs => "abs",
            MathFn::Fabs => "fabs",
            MathFn::Fmod => "fmod",
            MathFn::Pow => "pow",
            MathFn::Gcd => "gcd",
        }
    }
}

/// What a node is, together with the literal data it carries.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// A typed literal.
    Constant(Value),
    /// A register whose index is known at compile time.
    VarConst { index: u64 },
    /// A register indexed by the expression in the left child.
    VarExp,
    /// Function entry. The right child is the body block.
    Function(String),
    Call(String),
    /// One argument of a multi-argument sentinel, chained through the right child.
    Param,
    VerifyBounty,
    VerifyPow,
    If,
    Else,
    /// A bounded loop. `token` names the loop counter, `max_iterations` is the
    /// upper literal and `counter` the unsigned register seeded each iteration.
    Repeat {
        token: u32,
        max_iterations: i64,
        counter: u64,
    },
    Block,
    Break,
    Continue,
    /// `cond ? a : b`. The right child is the [`NodeKind::CondElse`] pair.
    Conditional,
    CondElse,
    Binary(BinOp),
    Assign(AssignOp),
    Unary(UnOp),
    Math(MathFn),
}

impl NodeKind {
    /// Number of fragments the node consumes from the code stack.
    pub fn operand_count(&self) -> usize {
        match self {
            NodeKind::Constant(_)
            | NodeKind::VarConst { .. }
            | NodeKind::Function(_)
            | NodeKind::Call(_)
            | NodeKind::Else
            | NodeKind::Block
            | NodeKind::Break
            | NodeKind::Continue
            | NodeKind::CondElse => 0,
            NodeKind::VarExp
            | NodeKind::Unary(_)
            | NodeKind::If
            | NodeKind::Repeat { .. }
            | NodeKind::VerifyBounty
            | NodeKind::Param => 1,
            NodeKind::Math(f) => f.arity(),
            NodeKind::Binary(_) | NodeKind::Assign(_) => 2,
            NodeKind::Conditional => 3,
            NodeKind::VerifyPow => 4,
        }
    }

    /// Control nodes that open a brace and change indentation.
    pub fn is_control(&self) -> bool {
        matches!(self, NodeKind::If | NodeKind::Else | NodeKind::Repeat { .. })
    }

    /// Nodes whose own fragment is never wrapped as a statement.
    pub fn is_structural(&self) -> bool {
        self.is_control() || matches!(self, NodeKind::Block | NodeKind::Function(_))
    }

    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Constant(_) => "constant",
            NodeKind::VarConst { .. } => "var_const",
            NodeKind::VarExp => "var_exp",
            NodeKind::Function(_) => "function",
            NodeKind::Call(_) => "call",
            NodeKind::Param => "param",
            NodeKind::VerifyBounty => "verify_bounty",
            NodeKind::VerifyPow => "verify_pow",
            NodeKind::If => "if",
            NodeKind::Else => "else",
            NodeKind::Repeat { .. } => "repeat",
            NodeKind::Block => "block",
            NodeKind::Break => "break",
            NodeKind::Continue => "continue",
            NodeKind::Conditional => "conditional",
            NodeKind::CondElse => "cond_else",
            NodeKind::Binary(_) => "binary",
            NodeKind::Assign(_) => "assign",
            NodeKind::Unary(_) => "unary",
            NodeKind::Math(_) => "math",
        }
    }
}

/// One node of the parsed program.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    /// Declared type, resolved by the parser.
    pub ty: Option<NumericType>,
    pub flags: NodeFlags,
    /// Source line, reported in diagnostics.
    pub line: u32,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
    pub(crate) parent: Option<NodeId>,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            ty: None,
            flags: NodeFlags::empty(),
            line: 0,
            left: None,
            right: None,
            parent: None,
        }
    }

    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn ends_statement(&self) -> bool {
        self.flags.contains(NodeFlags::END_STATEMENT)
    }
}
