//! Smoke tests for the widgets module

#[cfg(test)]
mod tests {
    use crate::api::TaskStatus;
    use crate::shared::theme::Icons;
    use crate::widgets::*;

    #[test]
    fn test_input_insert_and_value() {
        let mut input = InputState::new();
        for c in "Buy milk".chars() {
            input.insert_char(c);
        }
        assert_eq!(input.value(), "Buy milk");
        assert_eq!(input.cursor(), 8);
    }

    #[test]
    fn test_input_backspace_at_start_is_noop() {
        let mut input = InputState::new();
        input.backspace();
        assert_eq!(input.value(), "");

        input.insert_char('a');
        input.move_home();
        input.backspace();
        assert_eq!(input.value(), "a");
    }

    #[test]
    fn test_input_edit_in_middle() {
        let mut input = InputState::new();
        for c in "By".chars() {
            input.insert_char(c);
        }
        input.move_left();
        input.insert_char('u');
        assert_eq!(input.value(), "Buy");

        input.delete();
        assert_eq!(input.value(), "Bu");
    }

    #[test]
    fn test_input_handles_multibyte_graphemes() {
        let mut input = InputState::new();
        for c in "käse".chars() {
            input.insert_char(c);
        }
        assert_eq!(input.cursor(), 4);

        input.backspace();
        input.backspace();
        input.backspace();
        assert_eq!(input.value(), "k");
    }

    #[test]
    fn test_prefix_width_counts_wide_chars() {
        let mut input = InputState::new();
        input.insert_char('한');
        input.insert_char('a');
        // CJK character is two columns wide.
        assert_eq!(input.prefix_width(), 3);
    }

    #[test]
    fn test_input_clear_resets_cursor() {
        let mut input = InputState::new();
        input.insert_char('x');
        input.clear();
        assert!(input.is_empty());
        assert_eq!(input.cursor(), 0);
        input.insert_char('y');
        assert_eq!(input.value(), "y");
    }

    #[test]
    fn test_status_icon() {
        assert_eq!(status_icon(Some(TaskStatus::Done)), Icons::DONE);
        assert_eq!(status_icon(Some(TaskStatus::Open)), Icons::OPEN);
        assert_eq!(status_icon(None), Icons::OPEN);
    }
}
