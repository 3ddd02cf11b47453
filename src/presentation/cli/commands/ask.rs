use colored::Colorize;

use crate::application::services::assistant::{Assistant, GREETING};
use crate::domain::value_objects::thresholds::ThresholdSet;

/// Answers a help question. An empty question prints the greeting.
pub fn run_ask(thresholds: &ThresholdSet, question: &[String]) {
    let question = question.join(" ");
    let answer = if question.trim().is_empty() {
        GREETING.to_string()
    } else {
        println!("{} {}", "you ›".dimmed(), question);
        Assistant::new(thresholds).answer(&question)
    };
    println!("{} {}", "💧 namjai ›".cyan().bold(), answer);
}
