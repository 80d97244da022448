pub mod check;
pub mod crawl;
pub mod process;

// Re-export command functions for convenience
pub use check::check;
pub use crawl::crawl;
pub use process::process;
