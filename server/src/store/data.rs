/*
 * Created on Tue Feb 08 2022
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

use bytes::Bytes;
use std::ops::Deref;

/// A wrapper for `Bytes`
///
/// `Data` is an owning handle to an immutable byte string. Clones are cheap
/// (refcount bump) and swapping two `Data` values exchanges the underlying
/// handles, never the bytes themselves; this is what makes the content swap
/// in the two-child delete safe for allocations of different lengths.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone)]
pub struct Data {
    /// The blob of data
    blob: Bytes,
}

impl Data {
    /// Create a new blob by copying the given slice
    pub fn copy_from_slice(slice: &[u8]) -> Self {
        Self {
            blob: Bytes::copy_from_slice(slice),
        }
    }
    /// An empty blob
    pub const fn empty() -> Self {
        Self { blob: Bytes::new() }
    }
    pub fn into_inner(self) -> Bytes {
        self.blob
    }
}

impl Deref for Data {
    type Target = [u8];
    fn deref(&self) -> &<Self>::Target {
        &self.blob
    }
}

impl AsRef<[u8]> for Data {
    fn as_ref(&self) -> &[u8] {
        &self.blob
    }
}

impl PartialEq<str> for Data {
    fn eq(&self, oth: &str) -> bool {
        self.blob.eq(oth)
    }
}

impl PartialEq<[u8]> for Data {
    fn eq(&self, oth: &[u8]) -> bool {
        self.blob.eq(oth)
    }
}

impl<T> From<T> for Data
where
    T: Into<Bytes>,
{
    fn from(dat: T) -> Self {
        Self { blob: dat.into() }
    }
}
