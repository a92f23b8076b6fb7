/*
 * Created on Tue Feb 08 2022
 *
 * This file is a part of Oakdb
 * Oakdb is a free and open-source concurrent ordered key/value database
 * written by Ray Mercer ("the Author") with the vision to provide safe
 * shared access to tree-structured data without compromising on
 * correctness or simplicity
 *
 * Copyright (c) 2022, Ray Mercer <hey.raymercer@outlook.com>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 *
*/

//! # The tree
//!
//! The nodes of the binary search tree and the hand-over-hand descents that
//! every store operation is built from. Each node is a refcounted
//! reader/writer lock around its entry and its two child links, so a guard
//! on a node protects exactly the data a descent needs to inspect before it
//! can step further down. The `arc_lock` guards own the node they lock,
//! which is what lets a search return to its caller while still holding the
//! parent (and possibly target) locks.
//!
//! ## Lock discipline
//!
//! A descent locks the sentinel first and then couples downward: the child
//! is always acquired while the parent is still held, and the parent is
//! released only after the child is in hand. Locks are therefore only ever
//! taken in root-to-leaf order, which rules out wait cycles. The two-child
//! delete extends this chain into the target's right subtree and never
//! back up.

use super::data::Data;
use parking_lot::lock_api::{ArcRwLockReadGuard, ArcRwLockWriteGuard};
use parking_lot::{RawRwLock, RwLock};
use std::mem;
use std::sync::Arc;

/// A shared handle to a locked tree node
pub(super) type NodeRef = Arc<RwLock<Node>>;
/// A node guard that owns its node (read mode)
pub(super) type ReadGuard = ArcRwLockReadGuard<RawRwLock, Node>;
/// A node guard that owns its node (write mode)
pub(super) type WriteGuard = ArcRwLockWriteGuard<RawRwLock, Node>;

/// One key/value entry and its position in the tree
///
/// The lock around a `Node` guards all four fields. `name` and `value` are
/// immutable for the node's lifetime except during the two-child delete,
/// which swaps their handles with the in-order successor's while both nodes
/// are write-locked.
pub(super) struct Node {
    pub(super) name: Data,
    pub(super) value: Data,
    pub(super) left: Option<NodeRef>,
    pub(super) right: Option<NodeRef>,
}

impl Node {
    /// Allocate a new detached node with empty children
    pub(super) fn allocate(name: &[u8], value: &[u8]) -> NodeRef {
        Arc::new(RwLock::new(Node {
            name: Data::copy_from_slice(name),
            value: Data::copy_from_slice(value),
            left: None,
            right: None,
        }))
    }
    /// The permanent root. Its name is the empty string, so every real key
    /// compares strictly greater and its left child stays empty forever
    pub(super) fn sentinel() -> NodeRef {
        Arc::new(RwLock::new(Node {
            name: Data::empty(),
            value: Data::empty(),
            left: None,
            right: None,
        }))
    }
    /// The child slot a search for `name` must take from this node
    fn step(&self, name: &[u8]) -> Option<NodeRef> {
        let slot = if name < self.name.as_ref() {
            self.left.as_ref()
        } else {
            self.right.as_ref()
        };
        slot.map(Arc::clone)
    }
}

/// Outcome of a read-mode descent
pub(super) enum ReadSearch {
    /// The key exists; both guards are still held
    Hit { parent: ReadGuard, target: ReadGuard },
    /// The key doesn't exist; the would-be parent is still held
    Miss { parent: ReadGuard },
}

/// Outcome of a write-mode descent
pub(super) enum WriteSearch {
    Hit {
        parent: WriteGuard,
        target: WriteGuard,
    },
    Miss {
        parent: WriteGuard,
    },
}

/// Descend from the sentinel with read locks, hand over hand
pub(super) fn descend_read(root: &NodeRef, name: &[u8]) -> ReadSearch {
    let mut parent = root.read_arc();
    loop {
        let child = match parent.step(name) {
            Some(child) => child,
            None => return ReadSearch::Miss { parent },
        };
        let candidate = child.read_arc();
        if candidate.name.as_ref() == name {
            return ReadSearch::Hit {
                parent,
                target: candidate,
            };
        }
        // the parent gives way only now that the child is held
        parent = candidate;
    }
}

/// Descend from the sentinel with write locks, hand over hand
pub(super) fn descend_write(root: &NodeRef, name: &[u8]) -> WriteSearch {
    let mut parent = root.write_arc();
    loop {
        let child = match parent.step(name) {
            Some(child) => child,
            None => return WriteSearch::Miss { parent },
        };
        let candidate = child.write_arc();
        if candidate.name.as_ref() == name {
            return WriteSearch::Hit {
                parent,
                target: candidate,
            };
        }
        parent = candidate;
    }
}

/// Point the parent slot that currently holds `target` at `replacement`
///
/// The slot is picked by comparing names, exactly like the descent that got
/// us here did. Once the slot is reassigned no reachable pointer refers to
/// the target anymore; it dies when its guard goes
pub(super) fn reattach(parent: &mut WriteGuard, target: &Node, replacement: Option<NodeRef>) {
    if target.name.as_ref() < parent.name.as_ref() {
        parent.left = replacement;
    } else {
        parent.right = replacement;
    }
}

/// Remove a target that has both children, by in-order successor swap
///
/// The caller keeps the target write-locked as the anchor; `right` is the
/// target's right child. We couple down the left spine of the right subtree
/// in write mode, swap the name/value handles between target and successor
/// (the target keeps its position, so no grandparent pointer needs fixing)
/// and splice the successor out through its parent's left slot.
pub(super) fn excise_two_child(target: &mut WriteGuard, right: NodeRef) {
    let mut sparent = right.write_arc();
    let mut lchild = match sparent.left.as_ref() {
        Some(lchild) => Arc::clone(lchild),
        None => {
            // the right child is itself the in-order successor and the
            // target holds its slot
            mem::swap(&mut target.name, &mut sparent.name);
            mem::swap(&mut target.value, &mut sparent.value);
            target.right = sparent.right.take();
            // dropping the guard destroys the spliced-out node
            return;
        }
    };
    loop {
        let mut succ = lchild.write_arc();
        let deeper = succ.left.as_ref().map(Arc::clone);
        match deeper {
            Some(next) => {
                // not leftmost yet; couple downward
                sparent = succ;
                lchild = next;
            }
            None => {
                mem::swap(&mut target.name, &mut succ.name);
                mem::swap(&mut target.value, &mut succ.value);
                // the successor has no left child by construction
                sparent.left = succ.right.take();
                drop(succ);
                drop(sparent);
                return;
            }
        }
    }
}
