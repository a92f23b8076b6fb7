/*
 * Created on Fri Feb 04 2022
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

//! # Oakdb
//!
//! The `oakd` crate is Oakdb's database daemon: a concurrent in-memory
//! ordered key/value store kept in a lock-coupled binary search tree,
//! served to interactive and file-fed client sessions under an operator
//! driven supervisor. See the modules for their respective documentation.

use env_logger::*;
use liboak::util::terminal;
use liboak::{URL, VERSION};
use std::env;

mod actions;
mod arbiter;
mod clients;
mod config;
mod protocol;
mod queryengine;
mod registry;
mod store;
mod util;
#[cfg(test)]
mod tests;

#[cfg(all(not(target_env = "msvc"), not(miri)))]
use jemallocator::Jemalloc;

#[cfg(all(not(target_env = "msvc"), not(miri)))]
#[global_allocator]
/// Jemallocator - this is the default memory allocator for platforms other than msvc
static GLOBAL: Jemalloc = Jemalloc;

fn main() {
    Builder::new()
        .parse_filters(&env::var("OAK_LOG").unwrap_or_else(|_| "info".to_owned()))
        .init();
    // oakd is configured through the environment alone
    if env::args().len() != 1 {
        log::error!("Startup failure: oakd takes no arguments");
        util::exit_error();
    }
    println!("Oakdb v{} | {}", VERSION, URL);
    let cfg = config::get_config();
    log::info!("Session table capacity: {}", cfg.max_sessions);
    let supervisor = arbiter::Supervisor::new(&cfg);
    if let Err(e) = arbiter::run(supervisor) {
        log::error!("Supervisor failure: {}", e);
        util::exit_error();
    }
    let _ = terminal::write_info("Goodbye :)\n");
}
