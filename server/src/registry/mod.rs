/*
 * Created on Mon Feb 14 2022
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

//! # System-wide registry
//!
//! Global run-state shared between the supervisor and every session. The
//! only piece of it today is the pause gate. It is threaded to sessions as
//! a value at creation time rather than living in a `static`

use parking_lot::{Condvar, Mutex};

/// The gate sessions pass between commands
///
/// While the gate is paused, a session that arrives at
/// [`wait_until_resumed`](Self::wait_until_resumed) parks on the condvar;
/// commands already inside the store run to completion first, because the
/// gate is only ever checked between commands. Resuming flips the flag and
/// wakes every waiter.
pub struct PauseGate {
    paused: Mutex<bool>,
    cond: Condvar,
}

impl PauseGate {
    pub fn new() -> Self {
        PauseGate {
            paused: Mutex::new(false),
            cond: Condvar::new(),
        }
    }
    /// Engage the gate. Callers currently mid-command are unaffected until
    /// their next check
    pub fn pause(&self) {
        *self.paused.lock() = true;
    }
    /// Disengage the gate and wake every parked session
    pub fn resume(&self) {
        let mut paused = self.paused.lock();
        *paused = false;
        self.cond.notify_all();
    }
    /// Park until the gate is open. The loop re-checks the flag after every
    /// wakeup, so a stray notify can't leak a session through a paused gate
    pub fn wait_until_resumed(&self) {
        let mut paused = self.paused.lock();
        while *paused {
            self.cond.wait(&mut paused);
        }
    }
}

impl Default for PauseGate {
    fn default() -> Self {
        Self::new()
    }
}
