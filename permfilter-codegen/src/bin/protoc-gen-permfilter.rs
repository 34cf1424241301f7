//! `protoc` plugin generating permission filters.
//!
//! ```text
//! protoc --plugin=protoc-gen-permfilter --permfilter_out=src/gen \
//!     --permfilter_opt=paths=source_relative user.proto
//! ```
//!
//! Logs go to stderr; set `PERMFILTER_LOG` (e.g. `debug`) to see them.

use std::io::{self, Read, Write};

use anyhow::Context;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_env("PERMFILTER_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let mut request = Vec::new();
    io::stdin()
        .read_to_end(&mut request)
        .context("failed to read CodeGeneratorRequest from stdin")?;

    let response = permfilter_codegen::plugin::run(&request);

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(&response)
        .context("failed to write CodeGeneratorResponse to stdout")?;
    stdout.flush().context("failed to flush stdout")?;
    Ok(())
}
