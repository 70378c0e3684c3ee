pub mod fixtures;
pub mod upstream_env;

// Re-export key testing utilities
pub use fixtures::{Cassette, load_cassette, load_response_body};
pub use upstream_env::UpstreamTestServer;
