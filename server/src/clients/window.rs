/*
 * Created on Wed Feb 16 2022
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

//! # The windowed transport
//!
//! An interactive session runs in its own terminal window: we spawn an
//! `xterm` whose shell bridges keyboard lines into a request fifo and
//! echoes whatever comes back out of a response fifo. Closing the window
//! tears the bridge down, which the session observes as end-of-input.
//!
//! Creation is split in two because fifo opens block until the peer shows
//! up: [`WindowHandle::create`] does the fast part (fifos + xterm spawn) on
//! the operator thread, and [`WindowHandle::connect`] does the blocking
//! part on the session thread itself.

use super::transport::{chomp, Transport};
use crate::util::error::{Error, OakResult};
use std::ffi::CString;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Error as IoError, Result as IoResult, Write};
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::io::AsRawFd;
use std::path::{Path, PathBuf};
use std::process::{self, Child, Command};
use std::thread;
use std::time::Duration;

/// How long to wait between probes for the window-side bridge
const BRIDGE_PROBE_INTERVAL: Duration = Duration::from_millis(50);

fn mkfifo(path: &Path) -> OakResult<()> {
    let raw = CString::new(path.as_os_str().as_bytes())
        .map_err(|_| Error::other("fifo path contains a NUL byte"))?;
    let ret = unsafe { libc::mkfifo(raw.as_ptr(), 0o600) };
    if ret != 0 {
        Err(Error::ioerror_extra(
            IoError::last_os_error(),
            format!("creating fifo `{}`", path.display()),
        ))
    } else {
        Ok(())
    }
}

/// A spawned-but-not-yet-connected window
pub struct WindowHandle {
    dir: PathBuf,
    req: PathBuf,
    rsp: PathBuf,
    child: Child,
}

impl WindowHandle {
    /// Set up the fifo pair and start the window. Does not block
    pub fn create(id: usize) -> OakResult<Self> {
        let dir = std::env::temp_dir().join(format!("oakd-{}-session-{}", process::id(), id));
        fs::create_dir_all(&dir)
            .map_err(|e| Error::ioerror_extra(e, format!("creating `{}`", dir.display())))?;
        let req = dir.join("req.fifo");
        let rsp = dir.join("rsp.fifo");
        mkfifo(&req)?;
        mkfifo(&rsp)?;
        // the bridge opens the response end first; connect() probes for
        // that before it commits to the blocking open of the request end
        let bridge = format!(
            "exec 4< '{rsp}' 3> '{req}'; \
             while IFS= read -r line; do \
             printf '%s\\n' \"$line\" >&3; \
             IFS= read -r resp <&4 || exit 0; \
             printf '%s\\n' \"$resp\"; \
             done",
            req = req.display(),
            rsp = rsp.display()
        );
        let child = Command::new("xterm")
            .arg("-T")
            .arg(format!("Session {}", id))
            .arg("-e")
            .arg("/bin/sh")
            .arg("-c")
            .arg(bridge)
            .spawn()
            .map_err(|e| Error::ioerror_extra(e, "spawning the session window"))?;
        Ok(WindowHandle {
            dir,
            req,
            rsp,
            child,
        })
    }

    /// Open both ends of the bridge. Blocks until the window is up; bails
    /// out if the window dies first instead of wedging the session thread
    pub fn connect(mut self) -> OakResult<WindowTransport> {
        let writer = loop {
            match OpenOptions::new()
                .write(true)
                .custom_flags(libc::O_NONBLOCK)
                .open(&self.rsp)
            {
                Ok(file) => break file,
                Err(e) if e.raw_os_error() == Some(libc::ENXIO) => {
                    // no reader yet; is the window still alive?
                    if self.child.try_wait()?.is_some() {
                        return Err(Error::other("the session window exited before connecting"));
                    }
                    thread::sleep(BRIDGE_PROBE_INTERVAL);
                }
                Err(e) => return Err(e.into()),
            }
        };
        // writes should block normally from here on
        let ret = unsafe { libc::fcntl(writer.as_raw_fd(), libc::F_SETFL, 0) };
        if ret == -1 {
            return Err(IoError::last_os_error().into());
        }
        let reader = BufReader::new(
            File::open(&self.req)
                .map_err(|e| Error::ioerror_extra(e, "opening the request fifo"))?,
        );
        Ok(WindowTransport {
            reader,
            writer,
            _window: self,
        })
    }
}

impl Drop for WindowHandle {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
        let _ = fs::remove_dir_all(&self.dir);
    }
}

/// A connected window bridge
pub struct WindowTransport {
    reader: BufReader<File>,
    writer: File,
    _window: WindowHandle,
}

impl Transport for WindowTransport {
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
