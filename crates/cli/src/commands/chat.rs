//! `fifi chat`: interactive conversation in the terminal.

use std::io::Write;

use fifi_core::message::SessionId;
use tokio::io::{AsyncBufReadExt, BufReader};

const BANNER: &str = r"
    ============================================================
    |                                                          |
    |      FFFFF  III  FFFFF  III                              |
    |      F       I   F       I                               |
    |      FFFF    I   FFFF    I                               |
    |      F       I   F       I                               |
    |      F      III  F      III                              |
    |                                                          |
    |         IU South Bend Information Assistant              |
    |                                                          |
    ============================================================
";

const HELP: &str = "
FIFI: I can help you with information about:
  - Admissions and applications
  - Academic programs and courses
  - Tuition and financial aid
  - Student services and resources
  - Campus facilities and parking
  - Career services and internships
  - And much more about IU South Bend!

Just ask me a question!";

const GOODBYE: &str = "Goodbye! Good luck with your IU South Bend journey! Go Titans!";

/// What to do with one line of terminal input.
#[derive(Debug, PartialEq, Eq)]
pub enum Input<'a> {
    Skip,
    Quit,
    Help,
    Question(&'a str),
}

pub fn interpret(line: &str) -> Input<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Input::Skip;
    }
    match trimmed.to_lowercase().as_str() {
        "quit" | "exit" | "bye" => Input::Quit,
        "help" => Input::Help,
        _ => Input::Question(trimmed),
    }
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config()?;
    super::require_api_key(&config)?;
    let assistant = super::build_assistant(&config)?;
    let session = SessionId::new();

    println!("{BANNER}");
    println!(
        "    Loaded {} IU South Bend URLs as knowledge base\n",
        assistant.corpus().len()
    );
    println!("    Type 'quit' or 'exit' to end the conversation");
    println!("    Type 'help' for assistance");
    println!("{}", "=".repeat(60));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("\nYou: ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };

        match interpret(&line) {
            Input::Skip => continue,
            Input::Quit => {
                println!("\nFIFI: {GOODBYE}");
                break;
            }
            Input::Help => println!("{HELP}"),
            Input::Question(question) => {
                let reply = assistant.respond(&session, question).await;
                println!("\nFIFI: {}", reply.text);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quit_words_are_case_insensitive() {
        assert_eq!(interpret("quit"), Input::Quit);
        assert_eq!(interpret("  EXIT "), Input::Quit);
        assert_eq!(interpret("Bye"), Input::Quit);
    }

    #[test]
    fn blank_lines_are_skipped() {
        assert_eq!(interpret(""), Input::Skip);
        assert_eq!(interpret("   \t"), Input::Skip);
    }

    #[test]
    fn questions_are_trimmed() {
        assert_eq!(interpret("help"), Input::Help);
        assert_eq!(
            interpret("  where do I park?  "),
            Input::Question("where do I park?")
        );
    }
}
