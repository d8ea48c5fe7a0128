pub mod core;
pub mod extract;
pub mod memory;
pub mod model;

pub use self::core::{CodeforcesClient, FetchError, SubmissionSource, DEFAULT_API_URL};
pub use extract::{extract, SolvedSet};
pub use memory::InMemorySource;
