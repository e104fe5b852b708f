use lab_client::tasks::NewAttribute;
use lab_wizard::field::parse_number;

/// One `KEY[=VALUE][:DESCRIPTION]` flag value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Row {
    pub key: String,
    pub value: String,
    pub description: String,
}

/// Parse a repeated row flag such as `--attribute 4=3.5:after watering`.
///
/// The description is everything after the first `:`; the value is what
/// follows `=` before it.
pub fn parse_row(raw: &str, field: &str) -> anyhow::Result<Row> {
    let (head, description) = raw.split_once(':').unwrap_or((raw, ""));
    let (key, value) = head.split_once('=').unwrap_or((head, ""));
    let key = key.trim();
    if key.is_empty() {
        anyhow::bail!("invalid {field} '{raw}': expected KEY[=VALUE][:DESCRIPTION]");
    }
    Ok(Row {
        key: key.to_string(),
        value: value.trim().to_string(),
        description: description.trim().to_string(),
    })
}

/// Parse a measured attribute for a report payload.
pub fn parse_attribute(raw: &str) -> anyhow::Result<NewAttribute> {
    let row = parse_row(raw, "attribute")?;
    let element_id = row
        .key
        .parse::<i64>()
        .map_err(|_| anyhow::anyhow!("invalid attribute '{raw}': element id must be a number"))?;
    let value = parse_number(&row.value)
        .ok_or_else(|| anyhow::anyhow!("invalid attribute '{raw}': value must be a number"))?;
    Ok(NewAttribute {
        element_id,
        value,
        description: row.description,
    })
}
