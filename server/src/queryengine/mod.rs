/*
 * Created on Sat Feb 12 2022
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

//! # The Query Engine
//!
//! A stateless dispatcher from one command line to one response. All shared
//! state lives in the [`Store`](crate::store::Store); the engine itself can
//! be entered from any number of sessions at once, and re-enters itself for
//! the lines of a batch file

use crate::actions;
use crate::protocol::responses;
use crate::store::Store;
use bytes::Bytes;

/// What goes back over the transport: either a value or one of the
/// pre-compiled phrases
pub type Response = Bytes;

/// Execute one command line against the store
///
/// The verb is the first non-whitespace character; everything after it is
/// the verb's argument text. Anything unrecognizable comes back as an
/// ill-formed command, never as an error
pub fn execute(store: &Store, line: &str) -> Response {
    let line = line.trim_start();
    match line.as_bytes().first().copied() {
        Some(b'q') => actions::query::query(store, &line[1..]),
        Some(b'a') => actions::add::add(store, &line[1..]),
        Some(b'd') => actions::del::del(store, &line[1..]),
        Some(b'f') => actions::runfile::runfile(store, &line[1..]),
        Some(_) | None => Bytes::from_static(responses::groups::ILL_FORMED),
    }
}
