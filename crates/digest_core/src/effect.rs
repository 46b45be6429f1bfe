/// One unit of work derived from the invocation arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Summarize the article text stored at `path`.
    SummarizeArticleFile { path: String },
    /// Score the text at `text_path` against the labels in `labels_path`.
    ClassifyFile {
        labels_path: String,
        text_path: String,
    },
    /// Resolve, fetch and extract the page behind `url`.
    HarvestUrl { url: String },
}
