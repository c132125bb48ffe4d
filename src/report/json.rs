use serde::Serialize;

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::fixtures::snapshot;
    use crate::engine::{compute_index, validate_formula_integrity};

    #[test]
    fn json_index_uses_camel_case_fields() {
        let index = compute_index(&snapshot(72.5, 64.8, 61.2)).expect("index should compute");
        let rendered = to_json(&index).expect("json should serialize");
        assert!(rendered.contains("\"score\": 67.0"));
        assert!(rendered.contains("\"previousScore\": 67.0"));
        assert!(rendered.contains("\"status\": \"competitive\""));
        assert!(rendered.contains("\"trend\": \"flat\""));
        assert!(rendered.contains("\"driverType\": \"visibility\""));
    }

    #[test]
    fn json_integrity_lists_weights() {
        let rendered = to_json(&validate_formula_integrity()).expect("json should serialize");
        assert!(rendered.contains("\"valid\": true"));
        assert!(rendered.contains("\"visibility\": 0.4"));
        assert!(rendered.contains("\"status\": \"at_risk\""));
    }
}
