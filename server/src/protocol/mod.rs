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

//! # The line protocol
//!
//! One command per line: a single-character verb followed by
//! whitespace-delimited tokens. This module only tokenizes; verb dispatch
//! lives in the queryengine

pub mod responses;

/// The longest name or value token the protocol accepts
pub const MAX_TOKEN_SIZE: usize = 255;

/// Split the argument part of a command line into tokens
///
/// Returns `None` if any token is larger than [`MAX_TOKEN_SIZE`]; the
/// caller reports that as an ill-formed command
pub fn tokenize(args: &str) -> Option<Vec<String>> {
    let tokens = liboak::split_into_args(args);
    if tokens.iter().any(|tok| tok.len() > MAX_TOKEN_SIZE) {
        None
    } else {
        Some(tokens)
    }
}
