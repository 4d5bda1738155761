use unicode_normalization::UnicodeNormalization;

/// Normalization applied to every query string before planning
pub trait Preprocessor: Send + Sync {
    fn process(&self, text: &str) -> String {
        let text = text.trim();

        if text.is_empty() {
            return String::new();
        }

        // NFC
        let text: String = text.nfc().collect();

        // Line breaks and runs of whitespace collapse to single spaces
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}
