/*
 * Created on Tue Feb 15 2022
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

//! # Client sessions
//!
//! A session is one worker thread bound to a transport. It pulls command
//! lines, runs them through the query engine and pushes responses back,
//! yielding to the pause gate between commands and never inside a store
//! operation. When its transport dries up it records its service time and
//! marks itself reapable so the supervisor can join it.

pub mod transport;
#[cfg(unix)]
pub mod window;

pub use transport::{FileTransport, Transport};

use crate::arbiter::SessionTable;
use crate::protocol::responses;
use crate::queryengine;
use crate::registry::PauseGate;
use crate::store::Store;
use crate::util::error::OakResult;
use std::sync::Arc;
use std::time::Instant;

pub struct Session {
    id: usize,
    store: Arc<Store>,
    gate: Arc<PauseGate>,
    table: Arc<SessionTable>,
}

impl Session {
    pub fn new(
        id: usize,
        store: Arc<Store>,
        gate: Arc<PauseGate>,
        table: Arc<SessionTable>,
    ) -> Self {
        Session {
            id,
            store,
            gate,
            table,
        }
    }

    /// The session main loop. Consumes the session; the slot is reapable by
    /// the time this returns, whatever happened
    pub fn run<F>(self, make_transport: F)
    where
        F: FnOnce() -> OakResult<Box<dyn Transport>>,
    {
        let mut transport = match make_transport() {
            Ok(transport) => transport,
            Err(e) => {
                log::error!("Session {} failed to open its transport: {}", self.id, e);
                self.table.mark_reapable(self.id, 0);
                return;
            }
        };
        log::info!("Session {} is up", self.id);
        // a session created under an engaged gate serves nothing until the
        // operator resumes; the clock starts after that
        self.gate.wait_until_resumed();
        let start = Instant::now();
        loop {
            let command = match transport.read_line() {
                Ok(Some(command)) => command,
                Ok(None) => {
                    let _ = transport.write_response(responses::groups::ALL_DONE);
                    break;
                }
                Err(e) => {
                    log::error!("Session {} lost its transport: {}", self.id, e);
                    break;
                }
            };
            self.gate.wait_until_resumed();
            let response = queryengine::execute(&self.store, &command);
            if let Err(e) = transport.write_response(&response) {
                log::error!("Session {} failed to respond: {}", self.id, e);
                break;
            }
        }
        let service_time = start.elapsed().as_millis();
        self.table.mark_reapable(self.id, service_time);
        drop(transport);
        log::info!("Session {} is done", self.id);
    }
}
