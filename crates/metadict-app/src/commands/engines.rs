use std::io::Write;

use metadict_core::MetadictCore;

pub fn handle_engines(core: &MetadictCore, out: &mut impl Write) -> anyhow::Result<()> {
    let registry = core.registry();
    if registry.is_empty() {
        writeln!(out, "No engines registered")?;
        return Ok(());
    }

    for engine in registry.engines() {
        let description = engine.description();
        let features = engine.features();

        writeln!(
            out,
            "{} ({})",
            engine.name(),
            description.backend_name.as_deref().unwrap_or("unknown backend")
        )?;

        let dictionaries: Vec<String> = features
            .supported_bilingual_dictionaries()
            .iter()
            .map(ToString::to_string)
            .collect();
        if !dictionaries.is_empty() {
            writeln!(out, "  bilingual: {}", dictionaries.join(", "))?;
        }

        let languages: Vec<String> = features
            .supported_monolingual_languages()
            .iter()
            .map(ToString::to_string)
            .collect();
        if !languages.is_empty() {
            writeln!(out, "  monolingual: {}", languages.join(", "))?;
        }

        writeln!(out, "  self-test: {}", if features.supports_self_test() { "yes" } else { "no" })?;
    }

    Ok(())
}
