pub mod config;
pub mod distribute;
pub mod dom;
pub mod error;
pub mod fetch;
pub mod normalize;
pub mod planner;
pub mod segments;
pub mod types;
pub mod xpath;

pub use distribute::distribute;
pub use dom::{content_root, parse_document, DomNode};
pub use error::Error;
pub use fetch::{Fetch, HttpFetcher, StaticFetcher};
pub use normalize::normalize;
pub use planner::{find_and_prepare_changes, plan, Plan};
pub use segments::{extract_segments, TextSegment};
pub use types::{ChangeLogEntry, ChangeReport, ChangeRequest, Suggestion, SuggestionOutcome};
pub use xpath::{element_xpath, resolve_xpath};
