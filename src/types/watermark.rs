use serde::{Deserialize, Serialize};

/// Issuer stamp embedded in mini program encrypted data
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Watermark {
    /// Unix time of encryption
    pub timestamp: i64,
    pub appid: String,
}

impl Watermark {
    pub fn is_issued_for(&self, appid: &str) -> bool {
        self.appid == appid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_issued_for() {
        let watermark: Watermark =
            serde_json::from_str(r#"{"timestamp":1477314187,"appid":"wx4f4bc4dec97d474b"}"#).unwrap();

        assert!(watermark.is_issued_for("wx4f4bc4dec97d474b"));
        assert!(!watermark.is_issued_for("wx0000000000000000"));
    }
}
