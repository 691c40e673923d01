//! Stock image provider implementations.

pub mod mock;
pub mod pexels;
pub mod unsplash;

// Re-export for convenience
pub use mock::MockProvider;
pub use pexels::PexelsProvider;
pub use unsplash::UnsplashProvider;
