mod tavily;
mod unavailable;

pub use tavily::{TavilySearch, TAVILY_BASE_URL};
pub use unavailable::UnavailableSearch;
