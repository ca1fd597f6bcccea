//! Query-parameter construction for the Alpha Vantage quote endpoint.

/// The Alpha Vantage query function this provider consumes.
pub const FUNCTION: &str = "TIME_SERIES_DAILY";

/// Bar interval requested alongside the function.
pub const INTERVAL: &str = "1min";

/// Response format. Only JSON is supported by the response decoder.
pub const DATATYPE: &str = "json";

/// Builds the query parameters for one symbol's fetch.
pub fn construct_params(symbol: &str, api_key: &str) -> Vec<(String, String)> {
    vec![
        ("apikey".to_string(), api_key.to_string()),
        ("function".to_string(), FUNCTION.to_string()),
        ("symbol".to_string(), symbol.to_string()),
        ("interval".to_string(), INTERVAL.to_string()),
        ("datatype".to_string(), DATATYPE.to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_carry_the_symbol_and_fixed_function() {
        let params = construct_params("NVDA", "demo");
        assert!(params.contains(&("symbol".to_string(), "NVDA".to_string())));
        assert!(params.contains(&("function".to_string(), FUNCTION.to_string())));
        assert!(params.contains(&("apikey".to_string(), "demo".to_string())));
    }
}
