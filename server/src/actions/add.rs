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

//! # The `a` verb
//! Bind a fresh name to a value; an existing binding is left untouched

use crate::protocol::responses;
use crate::queryengine::Response;
use crate::store::Store;
use crate::{err_if_len_is, tokenize_or_bail};
use bytes::Bytes;

pub fn add(store: &Store, args: &str) -> Response {
    let act = tokenize_or_bail!(args);
    err_if_len_is!(act, not 2);
    if store.true_if_insert(act[0].as_bytes(), act[1].as_bytes()) {
        Bytes::from_static(responses::groups::ADDED)
    } else {
        Bytes::from_static(responses::groups::ALREADY_IN_DB)
    }
}
