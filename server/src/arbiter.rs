/*
 * Created on Thu Feb 17 2022
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

//! # The arbiter
//!
//! The process-wide controller. It owns the store, the pause gate and the
//! session slot table, consumes operator commands from stdin and is the
//! only thing that ever joins session threads. Sessions exit on their own
//! (transport end-of-input) and flag themselves reapable; the arbiter joins
//! them opportunistically between commands, or all at once on `w` and at
//! shutdown.

use crate::clients::{FileTransport, Session, Transport};
use crate::config::ConfigurationSet;
use crate::registry::PauseGate;
use crate::store::Store;
use crate::util::error::OakResult;
use liboak::util::terminal;
use parking_lot::Mutex;
use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

const MENU: &str = "\nList of Commands:
e: Create an interactive session in a window
E: Create a session fed from a file
s: Stop processing session commands
g: Continue processing session commands
w: Join sessions, waiting for the ones still running
Press ^D to join everything and shut down

Please choose a command: ";

/// What a slot in the session table is doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    /// nobody home
    Free,
    /// a session thread exists (or is being set up) for this slot
    Running,
    /// the session has exited and wants to be joined
    Reapable,
}

struct Slot {
    state: SlotState,
    handle: Option<JoinHandle<()>>,
    service_time: Option<u128>,
}

impl Slot {
    const fn vacant() -> Self {
        Slot {
            state: SlotState::Free,
            handle: None,
            service_time: None,
        }
    }
}

/// The bounded session slot table. One mutex guards every slot's state,
/// join handle and service-time record
pub struct SessionTable {
    slots: Mutex<Vec<Slot>>,
}

impl SessionTable {
    pub fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, Slot::vacant);
        SessionTable {
            slots: Mutex::new(slots),
        }
    }
    pub fn capacity(&self) -> usize {
        self.slots.lock().len()
    }
    /// Reserve the lowest free slot for a new session
    pub fn reserve(&self) -> Option<usize> {
        let mut slots = self.slots.lock();
        let id = slots.iter().position(|slot| slot.state == SlotState::Free)?;
        slots[id].state = SlotState::Running;
        Some(id)
    }
    /// Hand the reserved slot its thread
    fn install(&self, id: usize, handle: JoinHandle<()>) {
        self.slots.lock()[id].handle = Some(handle);
    }
    /// Give a reservation back (the session never started)
    fn release(&self, id: usize) {
        self.slots.lock()[id] = Slot::vacant();
    }
    /// Called by a session on its way out
    pub fn mark_reapable(&self, id: usize, service_time: u128) {
        let mut slots = self.slots.lock();
        slots[id].state = SlotState::Reapable;
        slots[id].service_time = Some(service_time);
    }
    fn take_handle(&self, id: usize) -> Option<JoinHandle<()>> {
        self.slots.lock()[id].handle.take()
    }
    fn take_handle_if_reapable(&self, id: usize) -> Option<JoinHandle<()>> {
        let mut slots = self.slots.lock();
        if slots[id].state == SlotState::Reapable {
            slots[id].handle.take()
        } else {
            None
        }
    }
    /// Reclaim a joined slot, yielding its recorded service time
    fn free(&self, id: usize) -> u128 {
        let mut slots = self.slots.lock();
        let service_time = slots[id].service_time.take().unwrap_or(0);
        slots[id].state = SlotState::Free;
        service_time
    }
    #[cfg(test)]
    pub fn state_of(&self, id: usize) -> SlotState {
        self.slots.lock()[id].state
    }
    #[cfg(test)]
    pub fn service_time_of(&self, id: usize) -> Option<u128> {
        self.slots.lock()[id].service_time
    }
}

/// The controller value threaded through the whole process
pub struct Supervisor {
    store: Arc<Store>,
    gate: Arc<PauseGate>,
    table: Arc<SessionTable>,
}

impl Supervisor {
    pub fn new(cfg: &ConfigurationSet) -> Self {
        Supervisor {
            store: Arc::new(Store::new()),
            gate: Arc::new(PauseGate::new()),
            table: Arc::new(SessionTable::with_capacity(cfg.max_sessions)),
        }
    }
    /// Engage the pause gate. In-flight commands finish; nothing new starts
    pub fn pause(&self) {
        self.gate.pause();
    }
    /// Disengage the pause gate and wake every waiting session
    pub fn resume(&self) {
        self.gate.resume();
    }

    fn spawn_reserved<F>(&self, id: usize, make_transport: F)
    where
        F: FnOnce() -> OakResult<Box<dyn Transport>> + Send + 'static,
    {
        let session = Session::new(
            id,
            Arc::clone(&self.store),
            Arc::clone(&self.gate),
            Arc::clone(&self.table),
        );
        let spawned = thread::Builder::new()
            .name(format!("session/{}", id))
            .spawn(move || session.run(make_transport));
        match spawned {
            Ok(handle) => {
                self.table.install(id, handle);
                log::info!("Session {} created", id);
            }
            Err(e) => {
                self.table.release(id);
                log::error!("Failed to start session {}: {}", id, e);
            }
        }
    }

    /// `e`: an interactive session in its own terminal window
    pub fn create_windowed_session(&self) {
        #[cfg(unix)]
        {
            let id = match self.table.reserve() {
                Some(id) => id,
                None => return self.report_full(),
            };
            let window = match crate::clients::window::WindowHandle::create(id) {
                Ok(window) => window,
                Err(e) => {
                    self.table.release(id);
                    log::error!("Failed to open a session window: {}", e);
                    return;
                }
            };
            // the blocking half of the window setup runs on the session
            // thread, not on the operator thread
            self.spawn_reserved(id, move || {
                window
                    .connect()
                    .map(|transport| Box::new(transport) as Box<dyn Transport>)
            });
        }
        #[cfg(not(unix))]
        log::error!("Windowed sessions need a unix host");
    }

    /// `E`: a session fed from a command file, answering into another file
    /// (or stdout when no output path was given)
    pub fn create_file_session(&self, input: &str, output: Option<&str>) {
        let id = match self.table.reserve() {
            Some(id) => id,
            None => return self.report_full(),
        };
        match FileTransport::open(input, output) {
            Ok(transport) => {
                let transport: Box<dyn Transport> = Box::new(transport);
                self.spawn_reserved(id, move || Ok(transport));
            }
            Err(e) => {
                self.table.release(id);
                log::error!("Failed to create a file-fed session: {}", e);
            }
        }
    }

    fn report_full(&self) {
        log::error!(
            "The session table is full ({} slots); join some sessions first",
            self.table.capacity()
        );
    }

    /// `w` and shutdown: join every reapable *and* every running session
    pub fn join_all(&self) {
        for id in 0..self.table.capacity() {
            // the table lock is not held across the join, so sessions that
            // finish meanwhile can still mark themselves reapable
            if let Some(handle) = self.table.take_handle(id) {
                self.join_one(id, handle);
            }
        }
    }

    /// Between operator commands: join whatever has already finished
    pub fn reap_finished(&self) {
        for id in 0..self.table.capacity() {
            if let Some(handle) = self.table.take_handle_if_reapable(id) {
                self.join_one(id, handle);
            }
        }
    }

    fn join_one(&self, id: usize, handle: JoinHandle<()>) {
        if handle.join().is_err() {
            log::error!("Session {} panicked", id);
        }
        let service_time = self.table.free(id);
        log::info!("Session {} joined. Service time: {} ms", id, service_time);
    }
}

fn read_operator_line() -> OakResult<Option<String>> {
    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        Ok(None)
    } else {
        Ok(Some(line))
    }
}

/// Walk the operator through the two file prompts of `E`. An empty output
/// path means the daemon's own stdout. `None` means the operator stream hit
/// end-of-input mid-prompt
fn prompt_for_files() -> OakResult<Option<(String, Option<String>)>> {
    let _ = terminal::write_info("Please enter an input file name: ");
    let input = match read_operator_line()? {
        Some(line) => line.trim().to_owned(),
        None => return Ok(None),
    };
    let _ = terminal::write_info("Please enter an output file name (empty for stdout): ");
    let output = match read_operator_line()? {
        Some(line) => line.trim().to_owned(),
        None => return Ok(None),
    };
    let output = if output.is_empty() { None } else { Some(output) };
    Ok(Some((input, output)))
}

/// The operator loop. Returns once the operator stream reaches end-of-input
/// and every session has been joined
pub fn run(supervisor: Supervisor) -> OakResult<()> {
    loop {
        let _ = terminal::write_info(MENU);
        let command = match read_operator_line()? {
            Some(line) => line,
            None => break,
        };
        match command.trim().chars().next() {
            Some('e') => supervisor.create_windowed_session(),
            Some('E') => match prompt_for_files()? {
                Some((input, output)) => {
                    supervisor.create_file_session(&input, output.as_deref())
                }
                None => break,
            },
            Some('s') => {
                supervisor.pause();
                log::info!("Paused session command processing");
            }
            Some('g') => {
                supervisor.resume();
                log::info!("Resumed session command processing");
            }
            Some('w') => supervisor.join_all(),
            _ => {
                let _ = terminal::write_error("Invalid Command\n");
            }
        }
        supervisor.reap_finished();
    }
    log::info!("Operator stream closed; shutting down");
    // a paused gate would keep joinees from draining their transports
    supervisor.resume();
    supervisor.join_all();
    Ok(())
}
