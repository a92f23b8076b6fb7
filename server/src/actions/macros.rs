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

#[macro_export]
/// Bail out of an action with an ill-formed response unless the token list
/// has exactly the arity the verb wants
macro_rules! err_if_len_is {
    ($tokens:ident, not $len:literal) => {
        if $tokens.len() != $len {
            return ::bytes::Bytes::from_static(
                $crate::protocol::responses::groups::ILL_FORMED,
            );
        }
    };
}

#[macro_export]
/// Tokenize a verb's argument text or bail out with an ill-formed response
/// (some token was oversized)
macro_rules! tokenize_or_bail {
    ($args:ident) => {
        match $crate::protocol::tokenize($args) {
            Some(tokens) => tokens,
            None => {
                return ::bytes::Bytes::from_static(
                    $crate::protocol::responses::groups::ILL_FORMED,
                )
            }
        }
    };
}
