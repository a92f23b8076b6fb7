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

//! # Configuration
//!
//! `oakd` takes no command-line arguments; the few tunables come from the
//! environment:
//! - `OAK_LOG`: the log filter (read by `main`, default `info`)
//! - `OAK_MAX_SESSIONS`: capacity of the session slot table

use std::env;

const DEFAULT_MAX_SESSIONS: usize = 1000;

#[derive(Debug, PartialEq)]
pub struct ConfigurationSet {
    /// how many session slots the supervisor keeps
    pub max_sessions: usize,
}

impl Default for ConfigurationSet {
    fn default() -> Self {
        ConfigurationSet {
            max_sessions: DEFAULT_MAX_SESSIONS,
        }
    }
}

/// Assemble the configuration from the environment, falling back to the
/// defaults on anything unset or unparseable
pub fn get_config() -> ConfigurationSet {
    let max_sessions = match env::var("OAK_MAX_SESSIONS") {
        Ok(var) => match var.parse::<usize>() {
            Ok(n) if n != 0 => n,
            _ => {
                log::warn!(
                    "Bad value `{}` for OAK_MAX_SESSIONS. Using the default of {}",
                    var,
                    DEFAULT_MAX_SESSIONS
                );
                DEFAULT_MAX_SESSIONS
            }
        },
        Err(_) => DEFAULT_MAX_SESSIONS,
    };
    ConfigurationSet { max_sessions }
}
