mod engine;
mod schema;
mod session;
mod url_state;

pub use engine::*;
pub use schema::*;
pub use session::*;
pub use sitesearch_syntax::{FilterMap, FilterValue, ParsedQuery, build, parse};
pub use url_state::*;
