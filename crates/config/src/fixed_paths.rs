//! Non-configurable filesystem paths for pact

pub const LOGS_DIR: &str = "/var/tmp/pact/logs";
