// Licensed under the Apache-2.0 license

//! Sections of the cumulative build summary.
//!
//! Every generator contributes one [`SummarySection`] right after writing its
//! artifacts. Sections share a fixed rendering (title, bullet list, TODO list,
//! dashed rule) so the aggregated `README.txt` stays scannable however many
//! generators ran.

use std::fmt::Write;

/// One generator's contribution to the summary document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SummarySection {
    pub title: String,
    pub bullets: Vec<String>,
    pub todos: Vec<String>,
}

impl SummarySection {
    pub fn new(title: impl Into<String>) -> Self {
        SummarySection {
            title: title.into(),
            bullets: Vec::new(),
            todos: Vec::new(),
        }
    }

    /// Adds one line to the "what was generated" list.
    pub fn bullet(mut self, line: impl Into<String>) -> Self {
        self.bullets.push(line.into());
        self
    }

    /// Adds one line to the user TODO list.
    pub fn todo(mut self, line: impl Into<String>) -> Self {
        self.todos.push(line.into());
        self
    }

    /// Renders the section in the fixed summary format.
    pub fn render(&self) -> String {
        let mut out = String::new();
        writeln!(out, "{}", self.title).unwrap();
        writeln!(out).unwrap();
        for bullet in &self.bullets {
            writeln!(out, "- {bullet}").unwrap();
        }
        if !self.todos.is_empty() {
            writeln!(out).unwrap();
            writeln!(out, "TODOs for User:").unwrap();
            for todo in &self.todos {
                writeln!(out, "- {todo}").unwrap();
            }
        }
        writeln!(out).unwrap();
        writeln!(out, "{}", "-".repeat(72)).unwrap();
        writeln!(out).unwrap();
        out
    }
}
