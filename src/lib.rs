pub mod artifacts;
pub mod book_names;
pub mod canon;
pub mod config;
pub mod crossref;
pub mod logger;
pub mod prepare;
pub mod usfx;
