use std::io::Write;

use metadict_core::MetadictCore;
use metadict_types::{ResponseContent, StepDiagnostic};
use serde::Serialize;

#[derive(Debug, Default, Clone, Copy)]
pub struct QueryOptions {
    pub diagnostics: bool,
    pub compact: bool,
}

#[derive(Serialize)]
struct QueryOutput<'a> {
    query: &'a str,
    #[serde(flatten)]
    content: ResponseContent<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    diagnostics: Option<&'a [StepDiagnostic]>,
}

/// Answer `query` in `dictionaries` and print the merged response as JSON
pub async fn handle_query(
    core: &MetadictCore,
    dictionaries: &str,
    query: &str,
    options: QueryOptions,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let response = core.query(query, dictionaries).await?;

    for failed in response.failed_steps() {
        tracing::warn!(
            "Engine '{}' {} for {}: {}",
            failed.engine_name,
            failed.status,
            failed.target,
            failed.error.as_deref().unwrap_or("no details")
        );
    }

    let output = QueryOutput {
        query: &response.query,
        content: response.content(),
        diagnostics: options.diagnostics.then_some(response.diagnostics.as_slice()),
    };

    if options.compact {
        serde_json::to_writer(&mut *out, &output)?;
    } else {
        serde_json::to_writer_pretty(&mut *out, &output)?;
    }
    writeln!(out)?;

    Ok(())
}
