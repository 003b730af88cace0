//! Fixed lookup tables served by the reference endpoints.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    /// ISO 639-1 code
    pub code: &'static str,
    pub name: &'static str,
    /// Name in its own script
    pub native: &'static str,
}

pub const LANGUAGES: [Language; 11] = [
    Language {
        code: "en",
        name: "English",
        native: "English",
    },
    Language {
        code: "hi",
        name: "Hindi",
        native: "हिन्दी",
    },
    Language {
        code: "bn",
        name: "Bengali",
        native: "বাংলা",
    },
    Language {
        code: "mr",
        name: "Marathi",
        native: "मराठी",
    },
    Language {
        code: "te",
        name: "Telugu",
        native: "తెలుగు",
    },
    Language {
        code: "ta",
        name: "Tamil",
        native: "தமிழ்",
    },
    Language {
        code: "gu",
        name: "Gujarati",
        native: "ગુજરાતી",
    },
    Language {
        code: "ur",
        name: "Urdu",
        native: "اردو",
    },
    Language {
        code: "kn",
        name: "Kannada",
        native: "ಕನ್ನಡ",
    },
    Language {
        code: "or",
        name: "Odia",
        native: "ଓଡ଼ିଆ",
    },
    Language {
        code: "ml",
        name: "Malayalam",
        native: "മലയാളം",
    },
];

pub const CATEGORY_DESCRIPTIONS: [(&str, &str); 4] = [
    ("potholes", "Road damage and pothole complaints"),
    ("streetlight", "Street lighting and visibility issues"),
    ("garbage", "Waste collection and cleanliness problems"),
    ("others", "General municipal complaints"),
];

/// Display names of the supported languages, in table order.
pub fn language_names() -> Vec<String> {
    LANGUAGES.iter().map(|l| l.name.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_language_codes_are_unique() {
        let codes: HashSet<&str> = LANGUAGES.iter().map(|l| l.code).collect();
        assert_eq!(codes.len(), LANGUAGES.len());
        let expected: HashSet<&str> = [
            "en", "hi", "bn", "mr", "te", "ta", "gu", "ur", "kn", "or", "ml",
        ]
        .into_iter()
        .collect();
        assert_eq!(codes, expected);
    }

    #[test]
    fn test_language_names_order() {
        let names = language_names();
        assert_eq!(names.first().map(String::as_str), Some("English"));
        assert_eq!(names.last().map(String::as_str), Some("Malayalam"));
    }
}
