use std::ops::Range;

use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use crate::{
    distribute::distribute_segments,
    dom::{content_root, parse_document, DomNode},
    error::Error,
    fetch::Fetch,
    normalize::normalize,
    segments::{extract_segments, TextSegment},
    types::{ChangeLogEntry, ChangeReport, ChangeRequest, Suggestion},
    xpath::element_xpath,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    pub change_log: Vec<ChangeLogEntry>,
    pub unmatched: Vec<usize>,
    pub warnings: Vec<String>,
}

/// Fetch and parse failures abort; everything after is isolated per suggestion.
pub fn find_and_prepare_changes(
    fetcher: &dyn Fetch,
    request: &ChangeRequest,
) -> Result<ChangeReport, Error> {
    let html = fetcher.fetch(&request.url)?;
    let document_digest = document_digest(&html);
    let document = parse_document(&html)?;
    let root = content_root(&document)?;

    let segments: Vec<_> = extract_segments(&root).collect();
    info!(
        url = %request.url,
        segments = segments.len(),
        suggestions = request.suggestions.len(),
        "extracted text segments"
    );

    let Plan {
        change_log,
        unmatched,
        warnings,
    } = plan(&segments, &request.suggestions);
    info!(
        entries = change_log.len(),
        unmatched = unmatched.len(),
        "planning complete"
    );

    Ok(ChangeReport {
        url: request.url.clone(),
        document_digest,
        change_log,
        unmatched,
        warnings,
    })
}

/// Matches each suggestion against `segments` independently. The document
/// the segments came from must still be alive, or every entry degrades to a
/// `NotInTree` warning.
pub fn plan<N: DomNode>(segments: &[TextSegment<N>], suggestions: &[Suggestion]) -> Plan {
    let mut plan = Plan::default();
    for (idx, suggestion) in suggestions.iter().enumerate() {
        let target = normalize(&suggestion.current_val);
        if target.is_empty() {
            warn!(suggestion = idx, "skipping suggestion with blank current_val");
            plan.unmatched.push(idx);
            continue;
        }
        let Some(run) = find_run(segments, &target) else {
            warn!(suggestion = idx, current_val = %suggestion.current_val, "no match found");
            plan.unmatched.push(idx);
            continue;
        };

        let matched = &segments[run];
        debug!(suggestion = idx, segments = matched.len(), "match found");
        let proposals = if matched.len() == 1 {
            vec![suggestion.new_val.clone()]
        } else {
            distribute_segments(&suggestion.new_val, matched)
        };

        for (segment, new_text) in matched.iter().zip(proposals) {
            match element_xpath(&segment.element) {
                Ok(xpath) => plan.change_log.push(ChangeLogEntry {
                    xpath,
                    original_text: segment.raw_text.clone(),
                    new_text,
                    suggestion_index: idx,
                }),
                Err(err) => {
                    warn!(suggestion = idx, %err, "dropping change entry");
                    plan.warnings.push(format!(
                        "suggestion {idx}: dropped entry for {:?}: {err}",
                        segment.normalized_text
                    ));
                }
            }
        }
    }
    plan
}

/// Earliest, then shortest, run of consecutive segments whose joined text is
/// exactly `target`. A run only grows while it is still a word-aligned prefix
/// of the target.
pub fn find_run<N>(segments: &[TextSegment<N>], target: &str) -> Option<Range<usize>> {
    for start in 0..segments.len() {
        let mut joined = String::new();
        for (end, segment) in segments.iter().enumerate().skip(start) {
            if !joined.is_empty() {
                joined.push(' ');
            }
            joined.push_str(&segment.normalized_text);
            if joined == target {
                return Some(start..end + 1);
            }
            if !is_word_prefix(&joined, target) {
                break;
            }
        }
    }
    None
}

fn is_word_prefix(prefix: &str, target: &str) -> bool {
    target
        .strip_prefix(prefix)
        .is_some_and(|rest| rest.starts_with(' '))
}

pub fn document_digest(html: &str) -> String {
    format!("{:x}", Sha256::digest(html.as_bytes()))
}
