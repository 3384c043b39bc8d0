pub mod artifacts;
pub mod comment;
pub mod labels;
pub mod response;
pub mod verdict;

pub use comment::normalize_comment;
pub use labels::{LABEL_COUNT, LABELS};
pub use response::ClassifyResponse;
pub use verdict::{DEFAULT_THRESHOLD, Verdict};
