//! Plain-text presenter writing to any `Write` sink.

use std::io::Write;

use crate::domain::consultation::{InputWidget, Question, ResultSet};
use crate::ports::{Presenter, PresenterError};

/// Renders the questionnaire as plain text.
pub struct TerminalPresenter<W: Write + Send> {
    out: W,
}

impl<W: Write + Send> TerminalPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_block(&mut self, title: &str, lines: &[String]) -> Result<(), PresenterError> {
        writeln!(self.out, "{}:", title)?;
        if lines.is_empty() {
            writeln!(self.out, "  (none)")?;
        }
        for line in lines {
            writeln!(self.out, "  - {}", line)?;
        }
        Ok(())
    }

    fn write_results(&mut self, results: &ResultSet) -> Result<(), PresenterError> {
        self.write_block("Daily Reminders", &results.reminders)?;
        writeln!(self.out)?;
        self.write_block("Analysis Conclusions", &results.conclusions)
    }
}

impl<W: Write + Send> Presenter for TerminalPresenter<W> {
    fn show_welcome(&mut self, question: &Question) -> Result<(), PresenterError> {
        writeln!(self.out, "{}", question.text)?;
        writeln!(self.out, "[Next] press Enter")?;
        self.out.flush()?;
        Ok(())
    }

    fn show_question(&mut self, question: &Question, widget: &InputWidget) -> Result<(), PresenterError> {
        writeln!(self.out)?;
        if let Some(notice) = &question.notice {
            writeln!(self.out, "! {}", notice)?;
        }
        writeln!(self.out, "{}", question.text)?;
        match widget {
            InputWidget::ExclusiveChoice { options } => {
                for (i, option) in options.iter().enumerate() {
                    writeln!(self.out, "  ({}) {}", i + 1, option.text)?;
                }
                write!(self.out, "Choose one: ")?;
            }
            InputWidget::MultiSelect { options } => {
                for (i, option) in options.iter().enumerate() {
                    writeln!(self.out, "  [{}] {}", i + 1, option.text)?;
                }
                write!(self.out, "Choose any, separated by commas (blank for none): ")?;
            }
            InputWidget::Freeform { default: Some(default) } => {
                write!(self.out, "Answer [{}]: ", default)?;
            }
            InputWidget::Freeform { default: None } => {
                write!(self.out, "Answer: ")?;
            }
        }
        self.out.flush()?;
        Ok(())
    }

    fn show_results(&mut self, results: &ResultSet) -> Result<(), PresenterError> {
        writeln!(self.out)?;
        self.write_results(results)?;
        writeln!(self.out, "[Finish] press Enter")?;
        self.out.flush()?;
        Ok(())
    }

    fn show_failure(&mut self, message: &str, results: &ResultSet) -> Result<(), PresenterError> {
        writeln!(self.out)?;
        writeln!(self.out, "The consultation stopped early: {}", message)?;
        if !results.is_empty() {
            self.write_results(results)?;
        }
        writeln!(self.out, "[Finish] press Enter")?;
        self.out.flush()?;
        Ok(())
    }

    fn show_input_error(&mut self, message: &str) -> Result<(), PresenterError> {
        write!(self.out, "{} Try again: ", message)?;
        self.out.flush()?;
        Ok(())
    }

    fn show_finished(&mut self) -> Result<(), PresenterError> {
        writeln!(self.out, "Goodbye.")?;
        self.out.flush()?;
        Ok(())
    }
}
