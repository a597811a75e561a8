//! Builds a SOAP request from a JSON parameter tree and prints it.
//!
//! ```sh
//! RUST_LOG=debug cargo run -p pmosoap --example build_envelope
//! ```

use anyhow::Result;
use pmosoap::{Client, Definitions, EnvelopeEncoder, NamespaceParam, Process, Request, SoapValue};
use serde_json::json;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let params = SoapValue::try_from(json!({
        "Location": {"City": "Lyon", "Zip": 69001},
        "Days": 3
    }))?;

    let client = Client::new(Definitions::with_target_namespace("urn:weather")).with_header(
        "AuthHeader",
        vec![
            SoapValue::pair("User", "demo"),
            NamespaceParam::new("sec", "Token", "s3cr3t").into(),
        ],
    );

    let process = Process::new(client, Request::new("GetForecast", params));
    let xml = EnvelopeEncoder::default().to_string_pretty(&process, 2)?;
    println!("{}", xml);

    Ok(())
}
