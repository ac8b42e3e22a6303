pub mod bet;
pub mod game;
pub mod notification;
pub mod user;

pub use bet::*;
pub use game::*;
pub use notification::*;
pub use user::*;
