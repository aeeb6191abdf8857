pub mod rating;
pub mod server;

pub use rating::RatingService;
pub use server::ServerService;
