#![deny(warnings)]
pub mod belief;
pub mod config;
pub mod model;

pub struct AgentInfo;

impl AgentInfo {
    pub const fn name() -> &'static str {
        "theaustronaut"
    }

    pub const fn codename() -> &'static str {
        "Lookahead Explorer"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}
