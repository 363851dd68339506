//! Console frontend - drives the interaction controller from line input.
//!
//! Every line is one "advance" action. While a question is open the line is
//! first turned into a selection for its input control; input that does not
//! fit is refused locally and never reaches shared state.

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use crate::application::{ControllerError, ControllerStep, InteractionController};
use crate::domain::askable::AskableOption;
use crate::domain::consultation::InputWidget;
use crate::ports::{Presenter, PresenterError};

/// Errors that end a console session
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("Cannot read input: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Controller(#[from] ControllerError),

    #[error(transparent)]
    Presenter(#[from] PresenterError),
}

/// Why a line could not be used as a selection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("An answer is required.")]
    Required,

    #[error("'{0}' is not one of the options.")]
    UnknownOption(String),

    #[error("Choose exactly one option.")]
    TooMany,
}

/// How a console session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleOutcome {
    /// The user pressed "Finish" on the results screen.
    Finished,
    /// Input ended before the user finished.
    InputClosed,
}

pub struct ConsoleFrontend<R> {
    lines: Lines<R>,
}

impl<R: AsyncBufRead + Unpin> ConsoleFrontend<R> {
    pub fn new(reader: R) -> Self {
        Self { lines: reader.lines() }
    }

    pub async fn run<P: Presenter>(
        &mut self,
        controller: &mut InteractionController<P>,
    ) -> Result<ConsoleOutcome, ConsoleError> {
        controller.start()?;
        loop {
            let Some(line) = self.lines.next_line().await? else {
                tracing::info!(phase = %controller.phase(), "Input closed");
                return Ok(ConsoleOutcome::InputClosed);
            };

            if let Some(widget) = controller.widget().cloned() {
                match parse_selection(&widget, &line) {
                    Ok(values) => {
                        controller.select(values);
                    }
                    Err(err) => {
                        controller.presenter_mut().show_input_error(&err.to_string())?;
                        continue;
                    }
                }
            }

            if controller.advance().await? == ControllerStep::Exit {
                return Ok(ConsoleOutcome::Finished);
            }
        }
    }
}

/// Turns a typed line into the raw answer sequence for `widget`.
///
/// Options may be given by their 1-based number or by id.
pub fn parse_selection(widget: &InputWidget, line: &str) -> Result<Vec<String>, SelectionError> {
    let line = line.trim();
    match widget {
        InputWidget::ExclusiveChoice { options } => {
            if line.is_empty() {
                return Err(SelectionError::Required);
            }
            if line.contains(',') {
                return Err(SelectionError::TooMany);
            }
            Ok(vec![option_id(options, line)?])
        }
        InputWidget::MultiSelect { options } => {
            let mut picked: Vec<String> = Vec::new();
            for token in line.split(',').map(str::trim).filter(|t| !t.is_empty()) {
                let id = option_id(options, token)?;
                if !picked.contains(&id) {
                    picked.push(id);
                }
            }
            Ok(picked)
        }
        InputWidget::Freeform { default } => match (line.is_empty(), default) {
            (false, _) => Ok(vec![line.to_string()]),
            (true, Some(default)) => Ok(vec![default.clone()]),
            (true, None) => Err(SelectionError::Required),
        },
    }
}

fn option_id(options: &[AskableOption], token: &str) -> Result<String, SelectionError> {
    if let Ok(n) = token.parse::<usize>() {
        if let Some(option) = n.checked_sub(1).and_then(|i| options.get(i)) {
            return Ok(option.id.clone());
        }
    }
    options
        .iter()
        .find(|o| o.id.eq_ignore_ascii_case(token))
        .map(|o| o.id.clone())
        .ok_or_else(|| SelectionError::UnknownOption(token.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<AskableOption> {
        vec![
            AskableOption::new("dry", "Dry"),
            AskableOption::new("oily", "Oily"),
            AskableOption::new("combination", "Combination"),
        ]
    }

    fn exclusive() -> InputWidget {
        InputWidget::ExclusiveChoice { options: options() }
    }

    fn multi() -> InputWidget {
        InputWidget::MultiSelect { options: options() }
    }

    #[test]
    fn exclusive_accepts_number_or_id() {
        assert_eq!(parse_selection(&exclusive(), "2").unwrap(), vec!["oily".to_string()]);
        assert_eq!(parse_selection(&exclusive(), " Dry ").unwrap(), vec!["dry".to_string()]);
    }

    #[test]
    fn exclusive_rejects_blank_unknown_and_many() {
        assert_eq!(parse_selection(&exclusive(), ""), Err(SelectionError::Required));
        assert_eq!(parse_selection(&exclusive(), "4"), Err(SelectionError::UnknownOption("4".into())));
        assert_eq!(parse_selection(&exclusive(), "0"), Err(SelectionError::UnknownOption("0".into())));
        assert_eq!(parse_selection(&exclusive(), "1,2"), Err(SelectionError::TooMany));
    }

    #[test]
    fn multi_keeps_pick_order_and_drops_repeats() {
        let picked = parse_selection(&multi(), "3, dry, 3").unwrap();
        assert_eq!(picked, vec!["combination".to_string(), "dry".to_string()]);
    }

    #[test]
    fn multi_blank_is_empty_selection() {
        assert_eq!(parse_selection(&multi(), "  ").unwrap(), Vec::<String>::new());
    }

    #[test]
    fn freeform_uses_default_on_blank() {
        let widget = InputWidget::Freeform { default: Some("30".to_string()) };
        assert_eq!(parse_selection(&widget, "").unwrap(), vec!["30".to_string()]);
        assert_eq!(parse_selection(&widget, "41").unwrap(), vec!["41".to_string()]);

        let widget = InputWidget::Freeform { default: None };
        assert_eq!(parse_selection(&widget, ""), Err(SelectionError::Required));
    }

    #[test]
    fn freeform_passes_text_through_unvalidated() {
        let widget = InputWidget::Freeform { default: None };
        assert_eq!(parse_selection(&widget, "abc").unwrap(), vec!["abc".to_string()]);
    }
}
