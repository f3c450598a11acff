use crate::core::{AggregationResult, CanonicalPrice};
use crate::utils::error::{Result, ScoutError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Json,
    Table,
    Csv,
}

pub fn render(result: &AggregationResult, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        ReportFormat::Table => Ok(render_table(result)),
        ReportFormat::Csv => render_csv(result),
    }
}

fn render_table(result: &AggregationResult) -> String {
    if !result.found {
        return result.message.clone().unwrap_or_default();
    }

    let source_width = result
        .comparison
        .iter()
        .map(|row| row.source.len())
        .max()
        .unwrap_or(0)
        .max("SOURCE".len());

    let mut lines = vec![format!(
        "{:<3} {:<source_width$} {:>10}  {}",
        "#", "SOURCE", "PRICE", "TITLE"
    )];
    for (rank, row) in result.comparison.iter().enumerate() {
        lines.push(format!(
            "{:<3} {:<source_width$} {:>10}  {}",
            rank + 1,
            row.source,
            row.price.to_string(),
            row.title
        ));
    }

    if let Some(best) = &result.recommended {
        lines.push(String::new());
        lines.push(format!(
            "Recommended: {} at {} ({})",
            best.source_id,
            best.raw_price.as_deref().unwrap_or("unknown price"),
            best.link
        ));
    }

    lines.join("\n")
}

/// The comparison table as CSV; unknown prices are left blank.
fn render_csv(result: &AggregationResult) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["source", "title", "price"])?;
    for row in &result.comparison {
        let price = match row.price {
            CanonicalPrice::Known(amount) => amount.to_string(),
            CanonicalPrice::Unknown => String::new(),
        };
        writer.write_record([row.source.as_str(), row.title.as_str(), price.as_str()])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ScoutError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| ScoutError::ParseError {
        message: e.to_string(),
    })
}
