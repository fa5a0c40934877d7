//! Per-node lowering to script fragments.

use tracing::trace;

use crate::api::MemoryClass;
use crate::ast::{AssignOp, BinOp, MathFn, Node, NodeFlags, NodeId, NodeKind, Tree, UnOp};
use crate::types::NumericType;
use crate::values::{BinaryOp, Value};

use super::prelude::check_identifier;
use super::state::{CompilerState, Operands};
use super::CompileError;

/// Pop the operands of `id`, push its fragment.
pub(crate) fn lower(state: &mut CompilerState, tree: &Tree, id: NodeId) -> Result<(), CompileError> {
    let node = tree.get(id).ok_or(CompileError::UnknownNode { node: id })?;
    let operands = state.pop_operands(node.kind.operand_count(), node.line)?;
    check_types(tree, node)?;

    trace!(kind = node.kind.name(), line = node.line, depth = state.depth(), "lower node");

    let text = match &node.kind {
        NodeKind::CondElse => return Ok(()),
        NodeKind::Function(name) => {
            check_identifier(name, node.line)?;
            format!("function {name}() {{\n")
        }
        NodeKind::Call(name) => {
            check_identifier(name, node.line)?;
            if name.eq_ignore_ascii_case("verify") {
                format!("{name}(verify_pow, target)")
            } else {
                format!("{name}()")
            }
        }
        NodeKind::Constant(value) => constant(*value),
        NodeKind::VarConst { index } => {
            let class = memory_class(node)?;
            let index = state.capacities().clamp(class, *index);
            format!("{}[{index}]", class.prefix())
        }
        NodeKind::VarExp => {
            let class = memory_class(node)?;
            let cap = state.capacities().of(class);
            let prefix = class.prefix();
            let index = &operands[0];
            let is_target = node
                .parent()
                .and_then(|parent| tree.get(parent))
                .is_some_and(|parent| {
                    parent.ends_statement() && parent.left() == Some(id) && writes_left(&parent.kind)
                });
            if is_target {
                format!("if(({index}) < {cap})\n\t{}{prefix}[{index}]", state.indent())
            } else {
                format!("{prefix}[((({index}) < {cap}) ? {index} : 0)]")
            }
        }
        NodeKind::If => {
            state.tabs = state.tabs.max(1);
            format!("{}if ({}) {{\n", state.outer_indent(), operands[0])
        }
        NodeKind::Else => {
            state.tabs = state.tabs.max(1);
            let outer = state.outer_indent();
            let then_is_block = node
                .left()
                .and_then(|left| tree.get(left))
                .is_none_or(|left| left.kind == NodeKind::Block);
            if then_is_block {
                format!("{outer}else {{\n")
            } else {
                format!("{outer}}}\n{outer}else {{\n")
            }
        }
        NodeKind::Repeat { token, max_iterations, counter } => {
            state.tabs = state.tabs.max(1);
            let t = state.outer_indent();
            let count = &operands[0];
            let counter = state.capacities().clamp(MemoryClass::Uint, *counter);
            format!(
                "{t}var loop{token} = 0;\n\
                 {t}for (loop{token} = 0; loop{token} < ({count}); loop{token}++) {{\n\
                 {t}\tif (loop{token} >= {max_iterations}) break;\n\
                 {t}\tu[{counter}] = loop{token};\n"
            )
        }
        NodeKind::Block => block(state, tree, id, node),
        NodeKind::Break => "break".to_string(),
        NodeKind::Continue => "continue".to_string(),
        NodeKind::Conditional => {
            format!("(({}) ? ({}) : ({}))", operands[0], operands[1], operands[2])
        }
        NodeKind::Param => operands[0].clone(),
        NodeKind::VerifyBounty => format!("bounty_found = ({} != 0 ? 1 : 0)", operands[0]),
        NodeKind::VerifyPow => {
            let args = operands.join(",");
            format!(
                "if (verify_pow == 1)\n\
                 \t\tpow_found = ExposedToRhino.check_pow({args}, m, target);\n\
                 \telse\n\
                 \t\t{{ pow_found = 0; ExposedToRhino.check_pow({args}, m, target); }}"
            )
        }
        NodeKind::Binary(op) => binary(*op, node.flags, &operands),
        NodeKind::Assign(op) => {
            let (l, r) = (&operands[0], &operands[1]);
            match op {
                AssignOp::Div | AssignOp::Mod => {
                    let sym = if *op == AssignOp::Div { "/" } else { "%" };
                    format!("{l} = ((({r}) != 0) ? ({l}) {sym} ({r}) : 0)")
                }
                _ => format!("{l} {} {r}", op.symbol()),
            }
        }
        NodeKind::Unary(op) => {
            let x = &operands[0];
            match op {
                UnOp::PreIncrement => format!("++{x}"),
                UnOp::PostIncrement => format!("{x}++"),
                UnOp::PreDecrement => format!("--{x}"),
                UnOp::PostDecrement => format!("{x}--"),
                UnOp::Not => format!("!({x})"),
                UnOp::Compl => format!("~({x})"),
                UnOp::Neg => format!("-({x})"),
            }
        }
        NodeKind::Math(f) => math(*f, &operands),
    };

    if node.ends_statement() && !node.kind.is_structural() {
        state.push(format!("{}{text};\n", state.indent()));
    } else {
        state.push(text);
    }
    Ok(())
}

/// The `}` closing a block, placed according to what owns the block.
fn block(state: &CompilerState, tree: &Tree, id: NodeId, node: &Node) -> String {
    let parent = node.parent().and_then(|parent| tree.get(parent));
    match parent.map(|parent| &parent.kind) {
        Some(NodeKind::Function(_)) => "}\n".to_string(),
        Some(NodeKind::Else) if parent.is_some_and(|p| p.right() == Some(id)) => String::new(),
        _ => format!("{}}}\n", state.outer_indent()),
    }
}

fn constant(value: Value) -> String {
    match value {
        Value::F32(_) | Value::F64(_) => format!("{:.6}", value.to_f64()),
        _ => value.to_string(),
    }
}

fn binary(op: BinOp, flags: NodeFlags, operands: &Operands) -> String {
    let (l, r) = (&operands[0], &operands[1]);
    let bits = if flags.contains(NodeFlags::WIDE) { 64 } else { 32 };
    match op {
        BinOp::Div | BinOp::Mod => {
            format!("((({r}) != 0) ? ({l}) {} ({r}) : 0)", op.symbol())
        }
        BinOp::Rotl => format!("rotl{bits}({l}, {r})"),
        BinOp::Rotr => format!("rotr{bits}({l}, {r})"),
        _ => format!("({l}) {} ({r})", op.symbol()),
    }
}

fn math(f: MathFn, operands: &Operands) -> String {
    let x = &operands[0];
    // Binary intrinsics: x is the left operand, y the right one.
    let y = operands.get(1).map(String::as_str).unwrap_or_default();
    match f {
        MathFn::Sin
        | MathFn::Cos
        | MathFn::Tan
        | MathFn::Tanh
        | MathFn::Atan
        | MathFn::Ceil
        | MathFn::Floor => format!("Math.{}({x})", f.name()),
        MathFn::Abs | MathFn::Fabs => format!("Math.abs({x})"),
        MathFn::Sinh | MathFn::Cosh | MathFn::Asin | MathFn::Acos => {
            format!("((({x} >= -1.0) && ({x} <= 1.0)) ? Math.{}( {x} ) : 0.0)", f.name())
        }
        MathFn::Exp => format!("(((({x}) >= -708.0) && (({x}) <= 709.0)) ? Math.exp( {x} ) : 0.0)"),
        MathFn::Log | MathFn::Log10 | MathFn::Sqrt => {
            format!("(({x} > 0) ? Math.{}( {x} ) : 0.0)", f.name())
        }
        MathFn::Atan2 => format!("(({y} != 0) ? Math.atan2({x}, {y}) : 0.0)"),
        MathFn::Fmod => format!("(({y} != 0) ? ({x} % {y}) : 0.0)"),
        MathFn::Pow => format!("Math.pow({x}, {y})"),
        MathFn::Gcd => format!("gcd({x}, {y})"),
    }
}

/// The array a register node addresses.
fn memory_class(node: &Node) -> Result<MemoryClass, CompileError> {
    let ty = node.ty.ok_or(CompileError::InvalidVariable { line: node.line })?;
    let class = match ty {
        NumericType::U32 if node.flags.contains(NodeFlags::WORKING_MEMORY) => MemoryClass::M,
        NumericType::U32 if node.flags.contains(NodeFlags::STORAGE) => MemoryClass::Storage,
        ty => MemoryClass::register(ty),
    };
    Ok(class)
}

/// Reject integer-only operators whose declared operand types promote to a
/// float. Operands without a declared type are not checked.
fn check_types(tree: &Tree, node: &Node) -> Result<(), CompileError> {
    let ty_of = |child: Option<NodeId>| child.and_then(|id| tree.get(id)).and_then(|n| n.ty);
    let type_error = |source| CompileError::Type { line: node.line, source };

    let op: Option<BinaryOp> = match &node.kind {
        NodeKind::Binary(op) => op.value_op(),
        NodeKind::Assign(op) => op.value_op(),
        NodeKind::Unary(UnOp::Compl) => {
            if let Some(ty) = ty_of(node.left()) {
                ty.require_integer("~").map_err(type_error)?;
            }
            return Ok(());
        }
        _ => None,
    };
    if let Some(op) = op.filter(|op| op.requires_integer()) {
        if let (Some(l), Some(r)) = (ty_of(node.left()), ty_of(node.right())) {
            op.check(l, r).map_err(type_error)?;
        }
    }
    Ok(())
}

/// Statements that store into their left operand.
fn writes_left(kind: &NodeKind) -> bool {
    matches!(
        kind,
        NodeKind::Assign(_)
            | NodeKind::Unary(
                UnOp::PreIncrement | UnOp::PostIncrement | UnOp::PreDecrement | UnOp::PostDecrement
            )
    )
}
