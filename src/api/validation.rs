use crate::error::{ChartError, ChartResult};

use super::chart::ChartConfig;
use super::sections::ColumnFormatList;

/// Runs every structural check and reports all violations at once.
pub(super) fn validate_chart(chart: &ChartConfig) -> ChartResult<()> {
    let checks = [
        validate_language(&chart.language),
        validate_column_formats(&chart.transform.column_format),
        chart.family.validate(),
    ];
    let violations: Vec<String> = checks
        .into_iter()
        .filter_map(Result::err)
        .map(|err| match err {
            ChartError::Validation(message) => message,
            other => other.to_string(),
        })
        .collect();
    if violations.is_empty() {
        return Ok(());
    }
    Err(ChartError::Validation(violations.join("; ")))
}

fn validate_language(language: &str) -> ChartResult<()> {
    if language.trim().is_empty() {
        return Err(ChartError::Validation(
            "chart language must not be empty".to_owned(),
        ));
    }
    Ok(())
}

fn validate_column_formats(formats: &ColumnFormatList) -> ChartResult<()> {
    for (index, format) in formats.0.iter().enumerate() {
        if format.column.is_empty() {
            return Err(ChartError::Validation(format!(
                "column format {index} has an empty column name"
            )));
        }
        if formats.0[..index]
            .iter()
            .any(|earlier| earlier.column == format.column)
        {
            return Err(ChartError::Validation(format!(
                "column `{}` is formatted twice",
                format.column
            )));
        }
    }
    Ok(())
}

/// Checks that `value` is finite and inside `min..=max`.
pub(crate) fn validate_in_range(field: &str, value: f64, min: f64, max: f64) -> ChartResult<()> {
    if !value.is_finite() || value < min || value > max {
        return Err(ChartError::Validation(format!(
            "{field} must be between {min} and {max}, got {value}"
        )));
    }
    Ok(())
}

pub(crate) fn validate_non_negative(field: &str, value: f64) -> ChartResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(ChartError::Validation(format!(
            "{field} must be finite and >= 0, got {value}"
        )));
    }
    Ok(())
}

pub(crate) fn validate_column_name(field: &str, column: &str) -> ChartResult<()> {
    if column.is_empty() {
        return Err(ChartError::Validation(format!(
            "{field} requires a non-empty column name"
        )));
    }
    Ok(())
}
