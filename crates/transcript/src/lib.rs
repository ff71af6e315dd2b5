pub mod diff;
pub mod normalize;
pub mod reconcile;
pub mod types;
pub mod words;

pub use diff::{compute_diff, compute_lcs, DiffOp, Lcs};
pub use normalize::{normalize, NormalizationConfig, NormalizeStats};
pub use reconcile::{reconcile_segment, ReconcileOutcome};
pub use types::{Segment, ShapeError, Transcript, Word};
pub use words::{reconstruct_text, text_to_words};
