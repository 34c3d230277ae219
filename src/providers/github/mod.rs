mod client;
mod provider;
mod types;

pub use provider::{
    FetchOptions, GitHubProvider, DEFAULT_API_URL, DEFAULT_CALENDAR_RANGE,
    DEFAULT_CONTRIBUTIONS_URL, DEFAULT_PER_PAGE,
};
