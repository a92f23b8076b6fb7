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

//! # Session transports
//!
//! A transport is whatever carries command lines to a session and responses
//! back out. Sessions only ever see this trait; the windowed and file-fed
//! variants live behind it

use crate::util::error::{Error, OakResult};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Result as IoResult, Write};

/// The capability set a session needs from its other end
pub trait Transport: Send {
    /// Get the next command line, without its line terminator. `None` is
    /// end-of-input and ends the session
    fn read_line(&mut self) -> IoResult<Option<String>>;
    /// Send one response line back
    fn write_response(&mut self, response: &[u8]) -> IoResult<()>;
}

/// Strip the line terminator a buffered reader leaves on
pub(super) fn chomp(mut line: String) -> String {
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
    line
}

/// A transport fed from a file of commands, writing responses to another
/// file (or to the daemon's stdout when no output path was given)
pub struct FileTransport {
    reader: BufReader<File>,
    writer: Box<dyn Write + Send>,
}

impl FileTransport {
    pub fn open(input: &str, output: Option<&str>) -> OakResult<Self> {
        let infile = File::open(input)
            .map_err(|e| Error::ioerror_extra(e, format!("opening `{}`", input)))?;
        let writer: Box<dyn Write + Send> = match output {
            Some(path) => Box::new(
                File::create(path)
                    .map_err(|e| Error::ioerror_extra(e, format!("creating `{}`", path)))?,
            ),
            None => Box::new(io::stdout()),
        };
        Ok(FileTransport {
            reader: BufReader::new(infile),
            writer,
        })
    }
}

impl Transport for FileTransport {
    fn read_line(&mut self) -> IoResult<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(chomp(line)))
    }
    fn write_response(&mut self, response: &[u8]) -> IoResult<()> {
        self.writer.write_all(response)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }
}
