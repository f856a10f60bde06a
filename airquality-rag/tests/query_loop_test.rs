//! Interactive loop behaviour with scripted stdin
//!
//! A counting responder stands in for the query engine so the tests can
//! check exactly which lines reached retrieval.

use airquality_rag::{run_query_loop, Responder};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::cell::RefCell;
use std::io::Cursor;

#[derive(Default)]
struct CountingResponder {
    questions: RefCell<Vec<String>>,
}

#[async_trait(?Send)]
impl Responder for CountingResponder {
    async fn respond(&self, question: &str) -> Result<String> {
        self.questions.borrow_mut().push(question.to_string());
        Ok(format!("answer to '{}'", question))
    }
}

struct FailingResponder;

#[async_trait(?Send)]
impl Responder for FailingResponder {
    async fn respond(&self, _question: &str) -> Result<String> {
        Err(anyhow!("model unavailable"))
    }
}

async fn run(input: &str, responder: &CountingResponder) -> (usize, String) {
    let mut output = Vec::new();
    let answered = run_query_loop(responder, Cursor::new(input.to_string()), &mut output)
        .await
        .unwrap();
    (answered, String::from_utf8(output).unwrap())
}

#[tokio::test]
async fn test_exit_first_issues_no_query() {
    let responder = CountingResponder::default();

    let (answered, output) = run("exit\n", &responder).await;

    assert_eq!(answered, 0);
    assert!(responder.questions.borrow().is_empty());
    assert!(output.contains("RAG demo ready! Type your question (or 'exit' to quit):"));
    assert!(!output.contains("Answer:"));
}

#[tokio::test]
async fn test_exit_sentinel_is_case_and_whitespace_insensitive() {
    let responder = CountingResponder::default();

    let (answered, _) = run("Which sensor is highest?\n   EXIT  \nnever asked\n", &responder).await;

    assert_eq!(answered, 1);
    assert_eq!(*responder.questions.borrow(), vec!["Which sensor is highest?"]);
}

#[tokio::test]
async fn test_answers_are_printed() {
    let responder = CountingResponder::default();

    let (answered, output) = run("What is PM2.5?\nIs today's AQI good?\nexit\n", &responder).await;

    assert_eq!(answered, 2);
    assert!(output.contains("\nAnswer:\nanswer to 'What is PM2.5?'\n"));
    assert!(output.contains("\nAnswer:\nanswer to 'Is today's AQI good?'\n"));
    assert_eq!(output.matches("> ").count(), 3);
}

#[tokio::test]
async fn test_blank_lines_skipped_and_eof_ends_loop() {
    let responder = CountingResponder::default();

    let (answered, _) = run("\n   \nHow is Clairton today?", &responder).await;

    assert_eq!(answered, 1);
    assert_eq!(*responder.questions.borrow(), vec!["How is Clairton today?"]);
}

#[tokio::test]
async fn test_responder_error_ends_loop() {
    let mut output = Vec::new();
    let result = run_query_loop(&FailingResponder, Cursor::new("question\n"), &mut output).await;

    assert_eq!(result.unwrap_err().to_string(), "model unavailable");
}
