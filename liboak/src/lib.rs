/*
 * Created on Sat Feb 05 2022
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

//! The core library for Oakdb
//!
//! This contains helpers shared across the project: terminal I/O utilities,
//! command-line token splitting and the version/URL constants

pub mod util;

use std::str::FromStr;

/// This version of Oakdb
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// The project homepage
pub const URL: &str = "https://github.com/oakdb/oakdb";

lazy_static::lazy_static! {
    static ref RE: regex::Regex = regex::Regex::from_str(r#"[\S]+"#).unwrap();
}

/// Split a command line into its whitespace-delimited tokens
pub fn split_into_args(q: &str) -> Vec<String> {
    let args: Vec<String> = RE.find_iter(q).map(|val| val.as_str().to_owned()).collect();
    args
}

#[test]
fn test_split_into_args() {
    assert_eq!(
        split_into_args(" a  sampledata\tsamplevalue \n"),
        vec!["a".to_owned(), "sampledata".to_owned(), "samplevalue".to_owned()]
    );
    assert!(split_into_args("   \t \n").is_empty());
}
