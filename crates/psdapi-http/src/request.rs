//! Query string parsing and input extraction.

use psdapi_model::error::PsdApiError;
use psdapi_model::input::PsdApiInput;
use psdapi_model::operations::PsdApiOperation;

/// Parse a query string into decoded key-value pairs.
///
/// Uses `application/x-www-form-urlencoded` rules, so `+` decodes to a space.
#[must_use]
pub fn parse_query_params(query: &str) -> Vec<(String, String)> {
    form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect()
}

/// Get the value of a query parameter by name. The last occurrence wins.
#[must_use]
pub fn query_value<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .rev()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// Build the input for `op` from the raw request query string.
///
/// Fails with a missing-parameter error when the required parameter is
/// absent or empty.
pub fn extract_input(
    op: PsdApiOperation,
    query: Option<&str>,
) -> Result<PsdApiInput, PsdApiError> {
    let name = op.required_parameter();
    let params = parse_query_params(query.unwrap_or_default());

    match query_value(&params, name) {
        Some(value) if !value.is_empty() => Ok(PsdApiInput::new(op, value.to_owned())),
        _ => Err(PsdApiError::missing_parameter(name)),
    }
}
