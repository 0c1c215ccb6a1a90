pub mod normalize;
pub mod segment;

pub use normalize::normalize_for_speech;
pub use segment::split_into_sentences;
