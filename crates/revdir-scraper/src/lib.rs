pub mod browser;
pub mod chrome;
pub mod driver;
pub mod error;
pub mod extract;
pub mod node;
pub mod pagination;
pub mod profile;

pub use browser::BrowserSession;
pub use chrome::ChromeSession;
pub use driver::{PaginationDriver, ScrapeOutcome, ScrapeSession, StopReason};
pub use error::ScrapeError;
pub use extract::extract_listing;
pub use node::ListingNode;
pub use profile::{SiteProfile, Strategy};
