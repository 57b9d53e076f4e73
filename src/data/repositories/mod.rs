pub mod deck;
pub mod flashcard;
pub mod user;

pub use deck::DeckRepository;
pub use flashcard::FlashcardRepository;
pub use user::UserRepository;
