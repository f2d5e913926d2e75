//! Dumps the global registry's dispatch table as JSON.
//!
//! Run with: `cargo run --example registry_report`

use std::error::Error;

use tagcode::{Registry, RegistryInspector, TagcodeProduct};

#[derive(Debug, Clone, PartialEq, TagcodeProduct)]
#[tagcode(implements(Event))]
struct Started;

#[derive(Debug, Clone, PartialEq, TagcodeProduct)]
#[tagcode(implements(Event))]
struct Finished {
    exit_code: i64,
}

#[derive(Debug, Clone, PartialEq, TagcodeProduct)]
#[tagcode(implements(Event))]
struct Logged {
    level: String,
    message: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let _ = Started::registration();
    let _ = Finished::registration();
    let _ = Logged::registration();

    let report = RegistryInspector::inspect(&Registry::global())?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
