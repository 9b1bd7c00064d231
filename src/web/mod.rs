pub mod handlers;
pub mod pages;
pub mod router;

pub use router::create_router;
