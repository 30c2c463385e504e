use std::path::Path;

/// Write a footerlog.toml with the given keys into `path`
pub fn setup_config<P: AsRef<Path>>(
    path: P,
    values: &[(&str, toml::Value)],
) -> Result<(), Box<dyn std::error::Error>> {
    let mut table = toml::value::Table::new();
    for (key, value) in values {
        table.insert(key.to_string(), value.clone());
    }

    std::fs::write(
        path.as_ref().join("footerlog.toml"),
        toml::to_string_pretty(&toml::Value::Table(table))?,
    )?;

    Ok(())
}
