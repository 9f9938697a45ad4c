pub mod callback;
pub mod credentials;
pub mod manager;
pub mod state;
pub mod token;

pub use callback::{listen_for_callback, CallbackTarget};
pub use credentials::{Credentials, Endpoints, API_HOST, AUTH_HOST, SCOPE_DELIMITER};
pub use manager::TokenManager;
pub use state::generate_state;
pub use token::Token;
