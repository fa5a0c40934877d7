//! Iterative tree walk.
//!
//! The walk follows parent links instead of recursing, so its memory use does
//! not depend on tree depth. It is a two-state machine: `Descend` runs down to
//! the left-most unvisited node, `Ascend` climbs back up, lowering nodes whose
//! subtrees are finished and turning into any pending right branch.

use tracing::debug;

use crate::api::StopSignal;
use crate::ast::{Node, NodeId, NodeKind, Tree};

use super::CompileError;
use super::lower::lower;
use super::state::{CompilerState, indent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Descend,
    Ascend,
}

fn node_at(tree: &Tree, id: NodeId) -> Result<&Node, CompileError> {
    tree.get(id).ok_or(CompileError::UnknownNode { node: id })
}

/// `if` and `repeat` indent everything below them.
fn opens_scope(node: &Node) -> bool {
    matches!(node.kind, NodeKind::If | NodeKind::Repeat { .. })
}

/// Convert the function rooted at `root`, appending its fragments to `state`.
pub(crate) fn convert_function(
    state: &mut CompilerState,
    tree: &Tree,
    root: NodeId,
    stop: &impl StopSignal,
) -> Result<(), CompileError> {
    let root_node = node_at(tree, root)?;
    if let NodeKind::Function(name) = &root_node.kind {
        if root_node.right().is_none() {
            return Err(CompileError::MissingBody {
                name: name.clone(),
                line: root_node.line,
            });
        }
        debug!(function = %name, line = root_node.line, "converting function");
    }

    state.tabs += 1;
    let mut ptr = root;
    let mut direction = Direction::Descend;

    loop {
        if stop.should_stop() {
            return Err(CompileError::Interrupted);
        }
        match direction {
            Direction::Descend => {
                let mut node = node_at(tree, ptr)?;
                while let Some(left) = node.left() {
                    ptr = left;
                    node = node_at(tree, ptr)?;
                    if opens_scope(node) {
                        state.tabs += 1;
                    }
                }

                if matches!(node.kind, NodeKind::Function(_)) {
                    lower(state, tree, ptr)?;
                }

                match node.right() {
                    Some(right) => ptr = right,
                    None => {
                        lower(state, tree, ptr)?;
                        direction = Direction::Ascend;
                    }
                }
            }
            Direction::Ascend => {
                let Some(parent_id) = node_at(tree, ptr)?.parent() else {
                    break;
                };
                if parent_id == root {
                    break;
                }
                let parent = node_at(tree, parent_id)?;

                match parent.right() {
                    // Finished a left branch: turn into the right one.
                    Some(right) if parent.left() == Some(ptr) => {
                        ptr = right;
                        if parent.kind.is_control() {
                            lower(state, tree, parent_id)?;
                            if opens_scope(node_at(tree, right)?) {
                                state.tabs += 1;
                            }
                        }
                        direction = Direction::Descend;
                    }
                    _ => {
                        ptr = parent_id;
                        if parent.kind.is_control() {
                            state.tabs = state.tabs.saturating_sub(1);
                            let is_else = parent.kind == NodeKind::Else;
                            let body_is_block = match parent.right() {
                                Some(body) => node_at(tree, body)?.kind == NodeKind::Block,
                                None => true,
                            };
                            if !is_else && !body_is_block {
                                state.push(format!("{}}}\n", indent(state.tabs)));
                            }
                            // The else branch lines up with its `if`.
                            if is_else {
                                state.tabs += 1;
                            }
                        } else if parent.kind == NodeKind::Block {
                            // Only the outermost link of a statement chain closes a brace.
                            let owner = parent.parent().map(|id| node_at(tree, id)).transpose()?;
                            if owner.is_some_and(|owner| {
                                owner.kind.is_control() || matches!(owner.kind, NodeKind::Function(_))
                            }) {
                                lower(state, tree, parent_id)?;
                            }
                        } else {
                            lower(state, tree, parent_id)?;
                        }
                    }
                }
            }
        }
    }

    debug!(fragments = state.depth(), "function converted");
    Ok(())
}
