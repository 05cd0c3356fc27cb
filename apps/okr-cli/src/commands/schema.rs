// schema.rs — Print the mutation request schema.
//
// The JSON Schema for BridgeRequest is what gets handed to the model
// provider as the tool parameter definition, so the agent emits payloads
// the bridge will accept. Printing it keeps the contract inspectable.

use okr_bridge::BridgeRequest;
use schemars::schema_for;

pub fn execute() -> anyhow::Result<()> {
    let schema = schema_for!(BridgeRequest);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
