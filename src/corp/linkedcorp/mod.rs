//! Linked corporations (互联企业)

mod agent;

pub use agent::{list_agent_perm, ResultAgentPermList};
