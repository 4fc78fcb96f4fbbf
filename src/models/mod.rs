mod movie;

pub use movie::{MovieListing, MovieRecord, MovieSummary};
