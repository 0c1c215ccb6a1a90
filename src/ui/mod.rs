pub mod app;
pub mod components;
pub mod state;
pub mod theme;

pub use app::ParleyApp;
pub use state::UiState;
pub use theme::Theme;
