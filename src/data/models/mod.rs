pub mod auth_models;
pub mod card_models;
pub mod deck_models;
pub mod study_models;
pub mod user_models;

pub use auth_models::{
    LoginError, LoginRequest, LoginResponse, RegisterError, RegisterRequest, RegisterResponse,
};
pub use card_models::{
    Difficulty, Flashcard, FlashcardListResponse, FlashcardView, GeneratedCard, NewFlashcard,
};
pub use deck_models::{
    ApiError, ApiResponse, CreateDeckRequest, CreateDeckResponse, Deck, DeckListResponse, DeckRow,
};
pub use study_models::{JumpRequest, StartStudyRequest, StudyCardView, StudyStateView};
pub use user_models::{NewUser, User, UserView};
