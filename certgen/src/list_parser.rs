// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Certgen Authors

use pest::{iterators::Pair, Parser};
use pest_derive::Parser;
use thiserror::Error;

#[derive(Parser)]
#[grammar = "list.pest"]
pub struct ListParser;

#[derive(Error, Debug)]
pub enum ListParsingError {
    #[error("failed to parse list")]
    ParseError(#[source] Box<pest::error::Error<Rule>>),
}

fn collect_items(pair: Pair<'_, Rule>, items: &mut Vec<String>) {
    for item in pair.into_inner() {
        match item.as_rule() {
            Rule::bracketed | Rule::items | Rule::single | Rule::double => {
                collect_items(item, items);
            }
            Rule::single_content | Rule::double_content | Rule::unquoted => {
                let s = item.as_str();
                if !s.is_empty() {
                    items.push(s.to_string());
                }
            }
            Rule::EOI => break,
            _ => {}
        }
    }
}

/// Parses a list from a string slice and returns the items as a Vec<String>
///
/// The list in the input string:
///
/// * can contain single-quoted, double-quoted, or unquoted strings
/// * can be inside square brackets ("[]") or not
/// * can have items separated by commas, white spaces, or newlines
///
/// Quotes are removed from the items, and empty quoted items are dropped.
///
/// # Examples
///
/// * `a b c` => `["a", "b", "c"]`
/// * `'a' "b" c` => `["a", "b", "c"]`
/// * `[a, b, c]` => `["a", "b", "c"]`
/// * `*.mesh.io,clustermesh.local` => `["*.mesh.io", "clustermesh.local"]`
pub fn parse_list(list: &str) -> Result<Vec<String>, ListParsingError> {
    let mut items = Vec::new();
    if let Some(pair) = ListParser::parse(Rule::list, list)
        .map_err(|e| ListParsingError::ParseError(Box::new(e)))?
        .next()
    {
        collect_items(pair, &mut items);
    }
    Ok(items)
}
