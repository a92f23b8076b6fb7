/*
 * Created on Fri Feb 11 2022
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

//! Primitives for generating responses of the line protocol

pub mod groups {
    #![allow(unused)]
    //! # Pre-compiled response **phrases**
    //! Every non-value response a session can see is one of these. The
    //! phrases are part of the protocol: clients (and the test suite) match
    //! on them verbatim
    /// A fresh name was bound
    pub const ADDED: &[u8] = "added".as_bytes();
    /// The name passed to `a` already exists
    pub const ALREADY_IN_DB: &[u8] = "already in database".as_bytes();
    /// An existing name was removed
    pub const REMOVED: &[u8] = "removed".as_bytes();
    /// The name passed to `d` doesn't exist
    pub const NOT_IN_DB: &[u8] = "not in database".as_bytes();
    /// The name passed to `q` doesn't exist
    pub const NOT_FOUND: &[u8] = "not found".as_bytes();
    /// Unparseable input: unknown verb, bad arity or an oversized token
    pub const ILL_FORMED: &[u8] = "ill-formed command".as_bytes();
    /// The batch file passed to `f` couldn't be opened
    pub const BAD_FILE_NAME: &[u8] = "bad file name".as_bytes();
    /// A batch file was consumed to its end
    pub const FILE_PROCESSED: &[u8] = "file processed".as_bytes();
    /// The transport reported end-of-input and the session is going away
    pub const ALL_DONE: &[u8] = "all done".as_bytes();
}
