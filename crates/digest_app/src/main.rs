//! `article-digest`: summarize article files, score classifier inputs and
//! extract article text from URLs given on the command line.
mod platform;

fn main() -> anyhow::Result<()> {
    platform::run_app()
}
