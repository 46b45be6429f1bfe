use crate::{Effect, InputArgument, InputKind};

/// Turns invocation arguments into effects, in argument order.
///
/// A labels file pairs with every classifier-text argument in the list; an
/// unpaired labels file, a lone text file and unrecognized arguments produce
/// nothing.
pub fn plan<S: AsRef<str>>(args: &[S]) -> Vec<Effect> {
    let inputs: Vec<InputArgument> = args
        .iter()
        .map(|arg| InputArgument::classify(arg.as_ref()))
        .collect();

    let text_paths: Vec<String> = inputs
        .iter()
        .filter(|input| input.kind == InputKind::ClassifierText)
        .map(InputArgument::path)
        .collect();

    let mut effects = Vec::new();
    for input in &inputs {
        match input.kind {
            InputKind::ArticleFile => {
                effects.push(Effect::SummarizeArticleFile { path: input.path() });
            }
            InputKind::ClassifierLabels => {
                let labels_path = input.path();
                effects.extend(text_paths.iter().map(|text_path| Effect::ClassifyFile {
                    labels_path: labels_path.clone(),
                    text_path: text_path.clone(),
                }));
            }
            InputKind::Url => {
                effects.push(Effect::HarvestUrl {
                    url: input.raw.clone(),
                });
            }
            InputKind::ClassifierText | InputKind::Unrecognized => {}
        }
    }
    effects
}
