pub mod fetch_window;
pub mod price;

pub use fetch_window::FetchWindow;
pub use price::Price;
