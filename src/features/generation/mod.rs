pub mod client;
pub mod engine;
pub mod text;

pub use engine::FlashcardGenerator;
pub use text::TextProcessor;
