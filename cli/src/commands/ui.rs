use chatpdf_config::ErrorFormatter;
use chatpdf_core::{Answer, ChatPdfError};
use console::Style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use termimad::{FmtText, MadSkin};

pub fn print_header(title: &str) {
    println!("\n{}", Style::new().bold().cyan().apply_to(title));
    println!("{}", Style::new().dim().apply_to("─".repeat(title.chars().count())));
}

pub fn print_success(msg: &str) {
    println!("{} {}", Style::new().green().bold().apply_to("SUCCESS:"), msg);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", Style::new().red().bold().apply_to("ERROR:"), msg);
}

pub fn print_key_value(key: &str, value: &str) {
    println!(
        "{}: {}",
        Style::new().dim().apply_to(key),
        Style::new().bold().apply_to(value)
    );
}

/// Render a pipeline failure the way the user should see it
pub fn print_pipeline_error(err: &ChatPdfError) {
    match err {
        ChatPdfError::Config(config_err) => eprintln!("{}", ErrorFormatter::new(config_err)),
        other => print_error(&other.user_message()),
    }
}

/// Top-level error rendering for the binary
pub fn print_failure(err: &anyhow::Error) {
    if let Some(pipeline_err) = err.downcast_ref::<ChatPdfError>() {
        print_pipeline_error(pipeline_err);
    } else if let Some(config_err) = err.downcast_ref::<chatpdf_config::ConfigError>() {
        eprintln!("{}", ErrorFormatter::new(config_err));
    } else {
        print_error(&format!("{:#}", err));
    }
}

pub fn spinner(msg: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
        .template("{spinner:.green} {msg}")
    {
        spinner.set_style(style);
    }
    spinner.set_message(msg.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

pub fn render_markdown_answer(text: &str) -> String {
    let skin = MadSkin::default();
    let (w, _) = termimad::terminal_size();
    let width = std::cmp::max(20, w.saturating_sub(4) as usize);
    FmtText::from(&skin, text, Some(width)).to_string()
}

pub fn print_answer(answer: &Answer, show_sources: bool) {
    println!("{}", Style::new().bold().apply_to("Reply:"));
    println!("{}", render_markdown_answer(&answer.text));

    if show_sources && !answer.sources.is_empty() {
        print_header("Sources");
        for (i, source) in answer.sources.iter().enumerate() {
            println!(
                "{}",
                Style::new()
                    .bold()
                    .blue()
                    .apply_to(format!("#{} (score {:.4})", i + 1, source.score))
            );
            println!("{}", Style::new().dim().apply_to(excerpt(&source.text, 400)));
            println!();
        }
    }
}

/// First `max_chars` characters of `text` on one line
fn excerpt(text: &str, max_chars: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max_chars {
        return flat;
    }
    let cut: String = flat.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}
