use std::path::{Path, PathBuf};

pub const ARTICLE_SUMMARY_FILENAME: &str = "OUTPUT_article-summary.txt";
pub const CLASSIFIER_SCORES_FILENAME: &str = "OUTPUT_classifiers.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    /// Model-generated summary of an article file.
    ArticleSummary,
    /// Raw text extracted from a web page, written without summarization.
    ExtractedArticle,
    /// Zero-shot scores in label order.
    ClassifierScores,
}

impl OutputKind {
    pub fn filename(self) -> &'static str {
        match self {
            OutputKind::ArticleSummary | OutputKind::ExtractedArticle => ARTICLE_SUMMARY_FILENAME,
            OutputKind::ClassifierScores => CLASSIFIER_SCORES_FILENAME,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum OutputPayload {
    Text(String),
    Scores(Vec<f32>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Output {
    pub kind: OutputKind,
    pub payload: OutputPayload,
    /// Destination directory; `None` means the working directory.
    pub dir: Option<PathBuf>,
}

impl Output {
    pub fn text(&self) -> Option<&str> {
        match &self.payload {
            OutputPayload::Text(text) => Some(text),
            OutputPayload::Scores(_) => None,
        }
    }

    pub fn scores(&self) -> Option<&[f32]> {
        match &self.payload {
            OutputPayload::Scores(scores) => Some(scores),
            OutputPayload::Text(_) => None,
        }
    }
}

/// Directory holding `path`, or `None` for a bare file name.
pub fn output_dir_for(path: &str) -> Option<PathBuf> {
    Path::new(path)
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map(Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::{output_dir_for, OutputKind};
    use std::path::PathBuf;

    #[test]
    fn summary_kinds_share_a_filename() {
        assert_eq!(
            OutputKind::ArticleSummary.filename(),
            OutputKind::ExtractedArticle.filename()
        );
        assert_eq!(
            OutputKind::ClassifierScores.filename(),
            "OUTPUT_classifiers.json"
        );
    }

    #[test]
    fn dir_is_parent_of_input() {
        assert_eq!(
            output_dir_for("data/in/ARTICLE.txt"),
            Some(PathBuf::from("data/in"))
        );
        assert_eq!(output_dir_for("ARTICLE.txt"), None);
    }
}
