//! Keyword lookup tables (category -> emoji and the like).

/// Keyword rules matched case-insensitively as substrings. The longest keyword
/// wins, so "Sporthalle" beats "Sport".
#[derive(Clone, Debug)]
pub struct KeywordTable {
    rules: Vec<(String, &'static str)>,
    fallback: &'static str,
}

impl KeywordTable {
    pub fn new(rules: &[(&str, &'static str)], fallback: &'static str) -> Self {
        let mut rules: Vec<(String, &'static str)> = rules
            .iter()
            .map(|(k, v)| (k.to_lowercase(), *v))
            .collect();
        rules.sort_by(|a, b| b.0.chars().count().cmp(&a.0.chars().count()));
        KeywordTable { rules, fallback }
    }

    pub fn find(&self, text: &str) -> Option<&'static str> {
        let haystack = text.to_lowercase();
        self.rules
            .iter()
            .find(|(k, _)| haystack.contains(k.as_str()))
            .map(|(_, v)| *v)
    }

    pub fn lookup(&self, text: &str) -> &'static str {
        self.find(text).unwrap_or(self.fallback)
    }
}
