//! User-agent handling.
//!
//! Classification picks the response encoding (human-readable text for
//! browsers, JSON for tools); the tally keeps a bounded count of exact
//! user-agent strings for the stats endpoint.

mod classifier;
mod tally;

pub use classifier::{classify_user_agent, AgentClass};
pub use tally::{TallySnapshot, UserAgentTally};
