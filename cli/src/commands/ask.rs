use super::ui;
use anyhow::Result;
use chatpdf_config::Config;

pub fn handle_ask(config: &Config, question: &str, show_sources: bool) -> Result<()> {
    let pipeline = super::open_pipeline(config)?;

    let answer = pipeline.answer(question)?;
    ui::print_answer(&answer, show_sources);
    Ok(())
}
