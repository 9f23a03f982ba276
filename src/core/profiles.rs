use std::{
    collections::HashSet,
    sync::LazyLock,
};

use regex::Regex;

use super::{
    constants::ALL_SOURCES,
    models::{
        CoffeeProfile,
        Row,
        FIELD_ID,
        FIELD_ORIGIN,
        FIELD_SOURCE,
    },
};

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// `" Grind Size "` -> `"grind_size"`
pub fn normalize_header(header: &str) -> String {
    WHITESPACE_RUN.replace_all(&header.trim().to_lowercase(), "_").into_owned()
}

/// Turns parsed rows into profiles, using the first row as headers.
///
/// Needs a header row and at least one data row, otherwise nothing is
/// returned. Data rows without cells are skipped. Missing cells become empty
/// strings and cells beyond the header width are dropped. Profiles without a
/// `source` inherit `origin`, and profiles without an `id` get
/// `coffee-<row index>`.
pub fn map_rows(rows: &[Row]) -> Vec<CoffeeProfile> {
    let Some((header_row, data_rows)) = rows.split_first() else {
        return Vec::new();
    };
    if data_rows.is_empty() {
        return Vec::new();
    }

    let headers: Vec<String> = header_row.iter().map(|h| normalize_header(h)).collect();
    let mut profiles = Vec::with_capacity(data_rows.len());

    for (offset, row) in data_rows.iter().enumerate() {
        if row.is_empty() {
            continue;
        }

        let mut profile = CoffeeProfile::new();
        for (index, header) in headers.iter().enumerate() {
            let cell = row.get(index).map(|c| c.trim()).unwrap_or("");
            profile.set(header.clone(), cell);
        }

        if profile.is_blank(FIELD_SOURCE) && !profile.is_blank(FIELD_ORIGIN) {
            let origin = profile.value(FIELD_ORIGIN).to_string();
            profile.set(FIELD_SOURCE, origin);
        }

        if profile.is_blank(FIELD_ID) {
            profile.set(FIELD_ID, format!("coffee-{}", offset + 1));
        }

        profiles.push(profile);
    }

    profiles
}

/// Same as [`map_rows`], for callers that may not have rows at all.
pub fn map_optional_rows(rows: Option<&[Row]>) -> Vec<CoffeeProfile> {
    rows.map(map_rows).unwrap_or_default()
}

/// Makes ids non-empty and unique within the collection. Blank ids become
/// `coffee-<position>`; repeated ids get a `-2`, `-3`, ... suffix.
pub fn ensure_unique_ids(profiles: &mut [CoffeeProfile]) {
    let mut seen = HashSet::new();

    for (index, profile) in profiles.iter_mut().enumerate() {
        let base = if profile.is_blank(FIELD_ID) {
            format!("coffee-{}", index + 1)
        } else {
            profile.id().to_string()
        };

        let mut candidate = base.clone();
        let mut suffix = 2;
        while !seen.insert(candidate.clone()) {
            candidate = format!("{base}-{suffix}");
            suffix += 1;
        }

        if candidate != profile.id() {
            tracing::debug!("Assigning id '{candidate}' to profile '{}'", profile.name());
            profile.set(FIELD_ID, candidate);
        }
    }
}

/// `"All"` followed by every distinct non-empty source, in first-seen order.
pub fn distinct_sources(profiles: &[CoffeeProfile]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut sources = vec![ALL_SOURCES.to_string()];

    for profile in profiles {
        let source = profile.source();
        if !source.is_empty() && seen.insert(source) {
            sources.push(source.to_string());
        }
    }

    sources
}

/// Exact, case-sensitive match on `source`. `"All"` keeps everything.
pub fn filter_by_source<'a>(profiles: &'a [CoffeeProfile], selected: &str) -> Vec<&'a CoffeeProfile> {
    if selected == ALL_SOURCES {
        return profiles.iter().collect();
    }
    profiles.iter().filter(|p| p.source() == selected).collect()
}
