// Processing stages applied to a parsed dictionary tree, in order:
// normalize (string leaves) then filter (keys).

pub mod filter;
pub mod normalize;

pub use filter::KeyFilter;
pub use normalize::{clean, normalize, NormalizeSummary, ParagraphKind, TextNormalizer};
