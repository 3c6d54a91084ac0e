//! Prompt construction from the persona preamble and the dialogue so far.

use tutor_constant::persona;
use tutor_core::{GenerationRequest, Role, Transcript};

/// Render the full prompt sent to the backend.
///
/// Lines, joined by `\n`: the persona, one `"<Role>: <text>"` per transcript
/// turn in order, `"User: <message>"`, and the `"Assistant:"` cue.
pub fn compose(persona: &str, transcript: &Transcript, message: &str) -> String {
    let mut lines = Vec::with_capacity(transcript.len() + 3);
    lines.push(persona.to_string());
    lines.extend(
        transcript
            .iter()
            .map(|turn| format!("{}: {}", turn.role.label(), turn.text)),
    );
    lines.push(format!("{}: {}", Role::User.label(), message));
    lines.push(format!("{}:", Role::Assistant.label()));
    lines.join("\n")
}

/// Compose the prompt for a request using the English teacher persona.
pub fn build_prompt(request: &GenerationRequest) -> String {
    compose(
        persona::ENGLISH_TEACHER,
        request.transcript(),
        request.message(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tutor_core::ConversationTurn;

    #[test]
    fn test_compose_empty_history() {
        let persona = "You are a teacher.";
        let prompt = compose(persona, &Transcript::new(), "Hello");
        assert_eq!(prompt, format!("{persona}\nUser: Hello\nAssistant:"));
    }

    #[test]
    fn test_compose_with_history_in_order() {
        let transcript: Transcript = vec![
            ConversationTurn::user("Hi"),
            ConversationTurn::assistant("Hello! How can I help?"),
        ]
        .into_iter()
        .collect();

        let prompt = compose("P", &transcript, "How are you?");
        assert_eq!(
            prompt,
            "P\nUser: Hi\nAssistant: Hello! How can I help?\nUser: How are you?\nAssistant:"
        );
    }

    #[test]
    fn test_compose_is_deterministic() {
        let transcript: Transcript = vec![ConversationTurn::user("Hi")].into_iter().collect();
        assert_eq!(
            compose("P", &transcript, "x"),
            compose("P", &transcript, "x")
        );
    }

    #[test]
    fn test_build_prompt_uses_teacher_persona() {
        let request = GenerationRequest::new("I has a cat", Transcript::new(), "gemma:2b");
        let prompt = build_prompt(&request);

        assert!(prompt.starts_with("You are a friendly, patient, and encouraging English language teacher."));
        assert!(prompt.ends_with("\nUser: I has a cat\nAssistant:"));
    }
}
