// Copyright 2026 the Limelight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scripted nodes.

use alloc::rc::Rc;
use core::cell::Cell;

use kurbo::Rect;
use limelight_core::error::InvalidNode;
use limelight_core::host::Measure;

/// What a [`ScriptedNode`] reports when measured.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NodeState {
    /// In the tree at the given rectangle.
    Attached(Rect),
    /// Removed from the tree; measures as a zero rectangle.
    Detached,
    /// Cannot be measured at all.
    Invalid,
}

/// A node whose measurement can be changed while a session runs.
///
/// Clones share state, so a test can keep one handle and give another to
/// the session.
#[derive(Clone, Debug)]
pub struct ScriptedNode {
    state: Rc<Cell<NodeState>>,
}

impl ScriptedNode {
    /// Creates an attached node at `rect`.
    #[must_use]
    pub fn attached(rect: Rect) -> Self {
        Self {
            state: Rc::new(Cell::new(NodeState::Attached(rect))),
        }
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> NodeState {
        self.state.get()
    }

    /// Moves the node, attaching it if needed.
    pub fn move_to(&self, rect: Rect) {
        self.state.set(NodeState::Attached(rect));
    }

    /// Detaches the node from the tree.
    pub fn detach(&self) {
        self.state.set(NodeState::Detached);
    }

    /// Makes the node unmeasurable.
    pub fn invalidate(&self) {
        self.state.set(NodeState::Invalid);
    }
}

impl Measure for ScriptedNode {
    fn measure(&self) -> Result<Rect, InvalidNode> {
        match self.state.get() {
            NodeState::Attached(rect) => Ok(rect),
            NodeState::Detached => Ok(Rect::ZERO),
            NodeState::Invalid => Err(InvalidNode),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let a = ScriptedNode::attached(Rect::new(0.0, 0.0, 5.0, 5.0));
        let b = a.clone();
        b.detach();
        assert_eq!(a.measure(), Ok(Rect::ZERO));
        b.invalidate();
        assert_eq!(a.measure(), Err(InvalidNode));
        a.move_to(Rect::new(1.0, 1.0, 2.0, 2.0));
        assert_eq!(b.state(), NodeState::Attached(Rect::new(1.0, 1.0, 2.0, 2.0)));
    }
}
