use anyhow::Result;
use async_trait::async_trait;
use std::io::{BufRead, Write};

/// Input that ends the question loop (case-insensitive, whitespace ignored)
pub const EXIT_SENTINEL: &str = "exit";

/// Answers one free-text question
#[async_trait(?Send)]
pub trait Responder {
    async fn respond(&self, question: &str) -> Result<String>;
}

pub fn is_exit(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case(EXIT_SENTINEL)
}

/// Interactive read-answer loop
///
/// Prints a banner, then for each line: `exit` stops, blank lines are
/// skipped, anything else is answered by `responder`. End of input also
/// stops. Returns the number of questions answered.
pub async fn run_query_loop<S, R, W>(responder: &S, mut input: R, mut output: W) -> Result<usize>
where
    S: Responder + ?Sized,
    R: BufRead,
    W: Write,
{
    writeln!(output, "\nRAG demo ready! Type your question (or 'exit' to quit):")?;

    let mut answered = 0;
    loop {
        write!(output, "> ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            tracing::debug!("End of input, leaving query loop");
            break;
        }

        if is_exit(&line) {
            break;
        }

        let question = line.trim();
        if question.is_empty() {
            continue;
        }

        let answer = responder.respond(question).await?;
        writeln!(output, "\nAnswer:\n{}\n", answer)?;
        answered += 1;
    }

    tracing::info!("Query loop finished after {} question(s)", answered);
    Ok(answered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_exit() {
        assert!(is_exit("exit"));
        assert!(is_exit("  EXIT \n"));
        assert!(is_exit("Exit\r\n"));
        assert!(!is_exit("exit now"));
        assert!(!is_exit("quit"));
        assert!(!is_exit(""));
    }
}
