// Copyright 2025 GE2025 Map contributors.
// This file is part of GE2025 Map.
// GE2025 Map is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// GE2025 Map is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with GE2025 Map.  If not, see <https://www.gnu.org/licenses/>.


//! Some utility routines that make parsing HTML pages easier.


use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Selector};

/// Collapse runs of whitespace into single spaces, and trim the ends.
pub fn collapse_whitespace(s:&str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Get all the text in an element as a string, with whitespace tidied.
pub fn text_content(e:&ElementRef<'_>) -> String {
    collapse_whitespace(&e.text().collect::<Vec<_>>().join(""))
}

/// The text of the first descendant of e matching selector, if it exists and is not blank.
pub fn first_text(e:&ElementRef<'_>,selector:&Selector) -> Option<String> {
    e.select(selector).next().map(|found|text_content(&found)).filter(|s|!s.is_empty())
}

static INTEGER_TOKEN : Lazy<Regex> = Lazy::new(||Regex::new(r"[0-9][0-9,]*").unwrap());

/// The first integer in some text, allowing thousands separators. E.g. "Electors: 150,123" gives 150123.
pub fn first_integer_token(s:&str) -> Option<u64> {
    let token = INTEGER_TOKEN.find(s)?.as_str();
    token.replace(',',"").parse().ok()
}

/// Fold case for comparing constituency names from different sources.
pub fn fold_case(s:&str) -> String { s.to_lowercase() }
