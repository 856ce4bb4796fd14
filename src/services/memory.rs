use crate::domain::Turn;

/// Render the most recent `max_turns` turns for inclusion in a prompt,
/// oldest first. Returns the `"None"` sentinel instead of an empty
/// string so the prompt's history section is never ambiguously blank.
/// Earlier turns stay in the caller's sequence; they are just invisible
/// to the model.
pub fn format_history(turns: &[Turn], max_turns: usize) -> String {
    if turns.is_empty() || max_turns == 0 {
        return "None".to_string();
    }

    let start = turns.len().saturating_sub(max_turns);
    let mut rendered = String::new();

    for turn in &turns[start..] {
        rendered.push_str("User: ");
        rendered.push_str(&turn.question);
        rendered.push_str("\nAssistant: ");
        rendered.push_str(&turn.answer);
        rendered.push('\n');
    }

    rendered.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn turn(i: usize) -> Turn {
        Turn::new(format!("question {i}"), format!("answer {i}"))
    }

    #[test]
    fn test_empty_history_renders_sentinel() {
        assert_eq!(format_history(&[], 4), "None");
        assert_eq!(format_history(&[turn(1)], 0), "None");
    }

    #[test]
    fn test_single_turn_round_trips() {
        let rendered = format_history(&[turn(1)], 4);
        assert_eq!(rendered, "User: question 1\nAssistant: answer 1");
    }

    #[test]
    fn test_window_keeps_most_recent_in_order() {
        let turns: Vec<Turn> = (1..=6).map(turn).collect();
        let rendered = format_history(&turns, 4);

        assert!(!rendered.contains("question 1"));
        assert!(!rendered.contains("question 2"));
        for i in 3..=6 {
            assert!(rendered.contains(&format!("User: question {i}")));
            assert!(rendered.contains(&format!("Assistant: answer {i}")));
        }

        let pos = |needle: &str| rendered.find(needle).unwrap();
        assert!(pos("question 3") < pos("question 4"));
        assert!(pos("question 4") < pos("question 5"));
        assert!(pos("question 5") < pos("question 6"));
    }

    #[test]
    fn test_each_windowed_turn_is_distinguishable() {
        let turns: Vec<Turn> = (1..=4).map(turn).collect();
        let rendered = format_history(&turns, 4);

        let expected = "User: question 1\nAssistant: answer 1\n\
                        User: question 2\nAssistant: answer 2\n\
                        User: question 3\nAssistant: answer 3\n\
                        User: question 4\nAssistant: answer 4";
        assert_eq!(rendered, expected);
    }
}
