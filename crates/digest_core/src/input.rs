/// Classification of a single invocation argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    ArticleFile,
    ClassifierLabels,
    ClassifierText,
    Url,
    Unrecognized,
}

/// Marker token to input kind, checked case-insensitively in this order.
///
/// The first marker contained in an argument decides its kind.
pub const MARKERS: &[(&str, InputKind)] = &[
    ("ARTICLE.TXT", InputKind::ArticleFile),
    ("CLASSIFIERS.CSV", InputKind::ClassifierLabels),
    ("CLASSIFIERS_TXT.TXT", InputKind::ClassifierText),
    ("HTTP", InputKind::Url),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputArgument {
    pub raw: String,
    pub kind: InputKind,
}

impl InputArgument {
    pub fn classify(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let upper = raw.to_uppercase();
        let kind = MARKERS
            .iter()
            .find(|(marker, _)| upper.contains(marker))
            .map(|(_, kind)| *kind)
            .unwrap_or(InputKind::Unrecognized);
        Self { raw, kind }
    }

    /// Argument as a file path with Windows separators turned into `/`.
    pub fn path(&self) -> String {
        normalize_path(&self.raw)
    }
}

pub fn normalize_path(raw: &str) -> String {
    raw.replace('\\', "/")
}
