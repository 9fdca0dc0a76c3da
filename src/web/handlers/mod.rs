//! HTML template rendering handlers for the browser pages.

mod error_page;
mod home;
mod not_found;

pub use error_page::error_page_handler;
pub use home::home_handler;
pub use not_found::not_found_handler;
