//! Inbound before-input events and the eligibility guard.

/// Semantic type of an inbound input event, as classified by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputType {
    /// Plain text insertion (typing). The only eligible type.
    InsertText,
    /// Text arriving from an active IME composition.
    InsertCompositionText,
    /// Paste, drop, autocomplete and similar bulk insertions.
    InsertFromPaste,
    /// Everything else (deletions, formatting, line breaks, ...).
    Other,
}

/// A host "about to insert text" notification.
#[derive(Clone, Debug)]
pub struct BeforeInput {
    pub input_type: InputType,
    /// The literal text about to be inserted, if any.
    pub data: Option<String>,
    /// Whether an IME composition session is active.
    pub composing: bool,
}

impl BeforeInput {
    /// A plain typed character, the common case.
    pub fn typed(c: char) -> Self {
        Self {
            input_type: InputType::InsertText,
            data: Some(c.to_string()),
            composing: false,
        }
    }
}

/// Basic eligibility: not composing, a plain text insertion, and the data
/// is exactly one character. Anything else is filtered out before any pair
/// lookup happens.
pub fn eligible_char(event: &BeforeInput) -> Option<char> {
    if event.composing || event.input_type != InputType::InsertText {
        return None;
    }
    let data = event.data.as_deref()?;
    let mut chars = data.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    Some(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_typed_char_is_eligible() {
        assert_eq!(eligible_char(&BeforeInput::typed('(')), Some('('));
    }

    #[test]
    fn composition_events_are_filtered() {
        let mut ev = BeforeInput::typed('(');
        ev.composing = true;
        assert_eq!(eligible_char(&ev), None);

        ev.composing = false;
        ev.input_type = InputType::InsertCompositionText;
        assert_eq!(eligible_char(&ev), None);
    }

    #[test]
    fn multi_char_and_empty_data_are_filtered() {
        let ev = BeforeInput {
            input_type: InputType::InsertText,
            data: Some("()".to_string()),
            composing: false,
        };
        assert_eq!(eligible_char(&ev), None);

        let ev = BeforeInput {
            input_type: InputType::InsertText,
            data: None,
            composing: false,
        };
        assert_eq!(eligible_char(&ev), None);
    }

    #[test]
    fn paste_is_filtered() {
        let ev = BeforeInput {
            input_type: InputType::InsertFromPaste,
            data: Some("(".to_string()),
            composing: false,
        };
        assert_eq!(eligible_char(&ev), None);
    }

    #[test]
    fn multibyte_single_char_is_eligible() {
        assert_eq!(eligible_char(&BeforeInput::typed('€')), Some('€'));
    }
}
