pub mod mock_listings;
pub mod mock_otp;

pub use mock_listings::InMemoryListingService;
pub use mock_otp::InMemoryOtpService;
