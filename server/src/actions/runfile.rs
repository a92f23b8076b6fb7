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

//! # The `f` verb
//! Feed each line of a batch file back through the query engine. The
//! per-line responses are discarded; the caller only sees whether the file
//! was consumed. Every line runs to completion before the next read, so no
//! store locks are ever held across file I/O

use crate::protocol::responses;
use crate::queryengine::{self, Response};
use crate::store::Store;
use crate::{err_if_len_is, tokenize_or_bail};
use bytes::Bytes;
use std::fs::File;
use std::io::{BufRead, BufReader};

pub fn runfile(store: &Store, args: &str) -> Response {
    let act = tokenize_or_bail!(args);
    err_if_len_is!(act, not 1);
    let file = match File::open(&act[0]) {
        Ok(file) => file,
        Err(e) => {
            log::debug!("Failed to open batch file `{}`: {}", act[0], e);
            return Bytes::from_static(responses::groups::BAD_FILE_NAME);
        }
    };
    let reader = BufReader::new(file);
    for line in reader.lines() {
        match line {
            Ok(line) => {
                let _ = queryengine::execute(store, &line);
            }
            // a torn read ends the batch; everything before it has already
            // been applied
            Err(_) => break,
        }
    }
    Bytes::from_static(responses::groups::FILE_PROCESSED)
}
