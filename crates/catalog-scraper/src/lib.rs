pub mod client;
pub mod crawl;
pub mod error;
pub mod pagination;
pub mod parse;

pub use client::{CatalogClient, ClientSettings};
pub use crawl::{crawl, scrape, CrawlOptions, CrawlReport, StopReason, DEFAULT_PAGE_DELAY};
pub use error::{FetchFailureKind, FieldError, ParseError, ScraperError};
pub use parse::{parse_listing_page, parse_product_card, ListingPage};
