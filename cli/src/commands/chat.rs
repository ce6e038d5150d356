use super::ingest::ingest_files;
use super::status::print_status;
use super::ui;
use anyhow::Result;
use chatpdf_config::Config;
use console::Style;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Debug, PartialEq)]
enum Input<'a> {
    Empty,
    Quit,
    Status,
    Ingest(Vec<PathBuf>),
    Question(&'a str),
    Unknown(&'a str),
}

fn parse_line(line: &str) -> Input<'_> {
    let line = line.trim();
    if line.is_empty() {
        return Input::Empty;
    }
    if !line.starts_with(':') {
        return Input::Question(line);
    }

    let mut parts = line.split_whitespace();
    match parts.next().unwrap_or_default() {
        ":q" | ":quit" | ":exit" => Input::Quit,
        ":status" => Input::Status,
        ":ingest" => Input::Ingest(parts.map(PathBuf::from).collect()),
        other => Input::Unknown(other),
    }
}

#[derive(Debug)]
enum LineRead {
    Line,
    /// A line that is not valid UTF-8; it has been consumed
    Invalid(io::Error),
    Eof,
}

fn read_input(reader: &mut impl BufRead, line: &mut String) -> io::Result<LineRead> {
    line.clear();
    match reader.read_line(line) {
        Ok(0) => Ok(LineRead::Eof),
        Ok(_) => Ok(LineRead::Line),
        Err(e) if e.kind() == io::ErrorKind::InvalidData => Ok(LineRead::Invalid(e)),
        Err(e) => Err(e),
    }
}

/// Question loop over stdin; failures are reported and the session continues
pub fn handle_chat(config: &Config, pdfs: &[PathBuf], show_sources: bool) -> Result<()> {
    let pipeline = super::open_pipeline(config)?;

    ui::print_header("Chat with PDF using Gemini");
    if !pdfs.is_empty() {
        if let Err(err) = ingest_files(&pipeline, pdfs) {
            ui::print_failure(&err);
        }
    }
    println!(
        "{}",
        Style::new()
            .dim()
            .apply_to("Ask a question from the PDF files. Commands: :ingest <PDF>...  :status  :quit")
    );

    let mut input = io::stdin().lock();
    let mut line = String::new();
    loop {
        print!("{} ", Style::new().cyan().bold().apply_to(">"));
        io::stdout().flush()?;

        match read_input(&mut input, &mut line)? {
            LineRead::Line => {}
            LineRead::Invalid(err) => {
                ui::print_error(&format!("Could not read input: {}", err));
                continue;
            }
            LineRead::Eof => {
                println!();
                break;
            }
        }

        match parse_line(&line) {
            Input::Empty => {}
            Input::Quit => break,
            Input::Status => match pipeline.index_status() {
                Ok(status) => print_status(&status, config),
                Err(err) => ui::print_pipeline_error(&err),
            },
            Input::Ingest(paths) => {
                if let Err(err) = ingest_files(&pipeline, &paths) {
                    ui::print_failure(&err);
                }
            }
            Input::Question(question) => match pipeline.answer(question) {
                Ok(answer) => ui::print_answer(&answer, show_sources),
                Err(err) => ui::print_pipeline_error(&err),
            },
            Input::Unknown(command) => {
                ui::print_error(&format!("Unknown command {}", command));
            }
        }
    }

    Ok(())
}
