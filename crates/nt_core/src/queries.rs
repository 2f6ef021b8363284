//! Turns user preferences into search-query strings.
//!
//! Every builder is pure. Missing fields contribute nothing, so no
//! placeholder text ever reaches a query.

use std::collections::HashSet;
use crate::types::{Location, UserPreferences};

pub fn build_local_queries(location: Option<&Location>) -> Vec<String> {
    let Some(location) = location else {
        return Vec::new();
    };

    let present = |field: &Option<String>| {
        field
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    };

    let mut queries = Vec::new();
    if let Some(city) = present(&location.city) {
        queries.push(format!("{} news", city));
        queries.push(format!("{} local news", city));
    }
    if let Some(state) = present(&location.state) {
        queries.push(format!("{} local news", state));
        queries.push(format!("{} latest news", state));
    }
    if let Some(country) = present(&location.country) {
        queries.push(format!("{} national news", country));
        queries.push(format!("{} latest news", country));
    }
    queries
}

/// Blank or whitespace-only interests are skipped.
pub fn build_business_queries(interests: &[String]) -> Vec<String> {
    interests
        .iter()
        .map(|interest| interest.trim())
        .filter(|interest| !interest.is_empty())
        .flat_map(|interest| {
            [
                format!("{} business news", interest),
                format!("{} trends", interest),
            ]
        })
        .collect()
}

pub fn build_community_queries(community: Option<&str>) -> Vec<String> {
    match community.map(str::trim) {
        Some(community) if !community.is_empty() => vec![
            format!("{} schemes", community),
            format!("{} news", community),
            format!("{} initiatives", community),
        ],
        _ => Vec::new(),
    }
}

/// Local, then business, then community queries with blanks removed and
/// exact duplicates collapsed to their first occurrence.
pub fn build_all_queries(data: Option<&UserPreferences>) -> Vec<String> {
    let Some(data) = data else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    build_local_queries(data.location.as_ref())
        .into_iter()
        .chain(build_business_queries(&data.business_interests))
        .chain(build_community_queries(data.community.as_deref()))
        .filter(|query| !query.trim().is_empty())
        .filter(|query| seen.insert(query.clone()))
        .collect()
}
