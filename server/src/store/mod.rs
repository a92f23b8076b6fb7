/*
 * Created on Wed Feb 09 2022
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

//! # The store
//!
//! The `Store` is the shared in-memory table: an unbalanced binary search
//! tree over byte-string names, ordered lexicographically. All concurrency
//! control is per-node; the store itself has no global lock, so operations
//! on disjoint subtrees proceed in parallel and readers never block each
//! other. See [`tree`] for the locking discipline.

pub mod data;
mod tree;
#[cfg(test)]
mod tests;

pub use data::Data;
use std::sync::Arc;
use tree::{Node, NodeRef, ReadSearch, WriteSearch};

/// The shared key/value table
pub struct Store {
    /// the sentinel; all real data hangs off its right subtree
    root: NodeRef,
}

impl Default for Store {
    fn default() -> Self {
        Store {
            root: Node::sentinel(),
        }
    }
}

impl Store {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
    /// Get an owned copy of the value bound to `name`, if it exists
    pub fn get_cloned(&self, name: &[u8]) -> Option<Data> {
        match tree::descend_read(&self.root, name) {
            ReadSearch::Hit { parent, target } => {
                let value = target.value.clone();
                drop(target);
                drop(parent);
                Some(value)
            }
            ReadSearch::Miss { parent } => {
                // a miss still terminates holding a real lock: the sentinel
                // is locked before the first step, so there is always a
                // parent to release
                drop(parent);
                None
            }
        }
    }
    /// Returns true if the non-existent name was bound to the value
    pub fn true_if_insert(&self, name: &[u8], value: &[u8]) -> bool {
        match tree::descend_write(&self.root, name) {
            WriteSearch::Hit { .. } => false,
            WriteSearch::Miss { mut parent } => {
                let newnode = Node::allocate(name, value);
                if name < parent.name.as_ref() {
                    parent.left = Some(newnode);
                } else {
                    parent.right = Some(newnode);
                }
                true
            }
        }
    }
    /// Returns true if an existent name was removed
    pub fn true_if_removed(&self, name: &[u8]) -> bool {
        let (mut parent, mut target) = match tree::descend_write(&self.root, name) {
            WriteSearch::Miss { parent } => {
                drop(parent);
                return false;
            }
            WriteSearch::Hit { parent, target } => (parent, target),
        };
        match (target.left.is_some(), target.right.clone()) {
            (_, None) => {
                // no right child: the left subtree (which may be empty)
                // takes over the slot
                let orphan = target.left.take();
                tree::reattach(&mut parent, &target, orphan);
            }
            (false, Some(_)) => {
                // only a right child
                let orphan = target.right.take();
                tree::reattach(&mut parent, &target, orphan);
            }
            (true, Some(right)) => {
                // two children: swap contents with the in-order successor
                // and unlink that node instead; the target stays put
                tree::excise_two_child(&mut target, right);
            }
        }
        drop(target);
        drop(parent);
        true
    }
    /// In-order walk of all names, for invariant checks. Takes every lock
    /// on the way down, so only meaningful when nothing else is running
    #[cfg(test)]
    pub fn inorder_names(&self) -> Vec<Data> {
        fn walk(slot: &Option<NodeRef>, out: &mut Vec<Data>) {
            if let Some(node) = slot {
                let guard = node.read();
                walk(&guard.left, out);
                out.push(guard.name.clone());
                walk(&guard.right, out);
            }
        }
        let mut out = Vec::new();
        let root = self.root.read();
        walk(&root.right, &mut out);
        out
    }
}

impl Drop for Store {
    fn drop(&mut self) {
        // iterative teardown; a long chain of nodes would otherwise drop
        // recursively, one stack frame per level
        let mut stack = vec![Arc::clone(&self.root)];
        while let Some(node) = stack.pop() {
            let mut guard = node.write();
            if let Some(left) = guard.left.take() {
                stack.push(left);
            }
            if let Some(right) = guard.right.take() {
                stack.push(right);
            }
        }
    }
}
