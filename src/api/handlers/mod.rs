pub mod health;
pub use self::health::health;

pub mod pages;

pub mod session;
pub use self::session::{get_session, sign_out};
