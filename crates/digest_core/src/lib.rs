//! Digest core: pure input classification, planning and output helpers.
mod effect;
mod input;
mod labels;
mod output;
mod plan;
mod text;

pub use effect::Effect;
pub use input::{normalize_path, InputArgument, InputKind, MARKERS};
pub use labels::LabelSet;
pub use output::{
    output_dir_for, Output, OutputKind, OutputPayload, ARTICLE_SUMMARY_FILENAME,
    CLASSIFIER_SCORES_FILENAME,
};
pub use plan::plan;
pub use text::{truncate_chars, MAX_SUMMARY_INPUT_CHARS};
