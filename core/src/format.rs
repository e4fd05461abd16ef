//! Deterministic rendering of a completed entry into a human-readable
//! summary for the chat hand-off.
//!
//! Pure function of the entry: the only time that appears is the entry's
//! own date. Sections with no content are omitted entirely rather than
//! rendered as empty headers, so the summary stays golden-testable.

use reframe_protocol::DiaryEntry;
use reframe_protocol::EmotionKind;
use reframe_protocol::EmotionSet;

pub fn render_summary(entry: &DiaryEntry) -> String {
    let mut out = String::new();
    push_line(&mut out, &format!("CBT DIARY ENTRY - {}", entry.date.format("%Y-%m-%d")));

    if !entry.situation.trim().is_empty() {
        push_section(&mut out, "SITUATION");
        push_line(&mut out, entry.situation.trim());
    }

    if let Some(rendered) = render_emotions(&entry.initial_emotions) {
        push_section(&mut out, "INITIAL EMOTIONS");
        push_line(&mut out, &rendered);
    }

    let thoughts: Vec<String> = entry
        .automatic_thoughts
        .iter()
        .filter(|t| !t.thought.trim().is_empty())
        .map(|t| format!("- {} (credibility {}/10)", t.thought.trim(), t.credibility))
        .collect();
    if !thoughts.is_empty() {
        push_section(&mut out, "AUTOMATIC THOUGHTS");
        for line in thoughts {
            push_line(&mut out, &line);
        }
    }

    if !entry.core_belief_text.trim().is_empty() {
        push_section(&mut out, "CORE BELIEF");
        push_line(
            &mut out,
            &format!(
                "{} (credibility {}/10)",
                entry.core_belief_text.trim(),
                entry.core_belief_credibility
            ),
        );
    }

    let behaviors: Vec<(&str, &str)> = [
        ("Confirming", entry.confirming_behaviors.as_str()),
        ("Avoidant", entry.avoidant_behaviors.as_str()),
        ("Overriding", entry.overriding_behaviors.as_str()),
    ]
    .into_iter()
    .filter(|(_, text)| !text.trim().is_empty())
    .collect();
    if !behaviors.is_empty() {
        push_section(&mut out, "BEHAVIORS");
        for (label, text) in behaviors {
            push_line(&mut out, &format!("{label}: {}", text.trim()));
        }
    }

    let modes: Vec<String> = entry
        .schema_modes
        .iter()
        .filter(|m| m.selected)
        .map(|m| match m.intensity {
            Some(intensity) => format!("- {} ({intensity}/10)", m.mode),
            None => format!("- {}", m.mode),
        })
        .collect();
    if !modes.is_empty() {
        push_section(&mut out, "SCHEMA MODES");
        for line in modes {
            push_line(&mut out, &line);
        }
    }

    let challenges: Vec<String> = entry
        .challenge_questions
        .iter()
        .filter(|q| !q.answer.trim().is_empty())
        .map(|q| format!("Q: {}\nA: {}", q.question.trim(), q.answer.trim()))
        .collect();
    if !challenges.is_empty() {
        push_section(&mut out, "CHALLENGE RESPONSES");
        for block in challenges {
            push_line(&mut out, &block);
        }
    }

    let additional: Vec<String> = entry
        .additional_questions
        .iter()
        .filter(|q| !q.question.trim().is_empty() || !q.answer.trim().is_empty())
        .map(|q| format!("Q: {}\nA: {}", q.question.trim(), q.answer.trim()))
        .collect();
    if !additional.is_empty() {
        push_section(&mut out, "OWN QUESTIONS");
        for block in additional {
            push_line(&mut out, &block);
        }
    }

    let rational: Vec<String> = entry
        .rational_thoughts
        .iter()
        .filter(|t| !t.thought.trim().is_empty())
        .map(|t| format!("- {} (confidence {}/10)", t.thought.trim(), t.confidence))
        .collect();
    if !rational.is_empty() {
        push_section(&mut out, "RATIONAL THOUGHTS");
        for line in rational {
            push_line(&mut out, &line);
        }
    }

    let alternatives: Vec<String> = entry
        .alternative_responses
        .iter()
        .filter(|r| !r.trim().is_empty())
        .map(|r| format!("- {}", r.trim()))
        .collect();
    if !alternatives.is_empty() {
        push_section(&mut out, "ALTERNATIVE RESPONSES");
        for line in alternatives {
            push_line(&mut out, &line);
        }
    }

    let reflection = &entry.schema_reflection;
    if reflection.enabled {
        let answered: Vec<String> = reflection
            .questions
            .iter()
            .filter(|q| !q.answer.trim().is_empty())
            .map(|q| format!("Q: {}\nA: {}", q.question.trim(), q.answer.trim()))
            .collect();
        if !answered.is_empty() || !reflection.self_assessment.trim().is_empty() {
            push_section(&mut out, "SCHEMA REFLECTION");
            for block in answered {
                push_line(&mut out, &block);
            }
            if !reflection.self_assessment.trim().is_empty() {
                push_line(
                    &mut out,
                    &format!("Self-assessment: {}", reflection.self_assessment.trim()),
                );
            }
        }
    }

    let final_emotions = render_emotions(&entry.final_emotions);
    let has_outcome = final_emotions.is_some()
        || !entry.new_behaviors.trim().is_empty()
        || entry.original_thought_credibility > 0;
    if has_outcome {
        push_section(&mut out, "OUTCOME");
        if let Some(rendered) = final_emotions {
            push_line(&mut out, &format!("Emotions now: {rendered}"));
        }
        if !entry.new_behaviors.trim().is_empty() {
            push_line(&mut out, &format!("New behaviors: {}", entry.new_behaviors.trim()));
        }
        if entry.original_thought_credibility > 0 {
            push_line(
                &mut out,
                &format!(
                    "Original thought credibility now: {}/10",
                    entry.original_thought_credibility
                ),
            );
        }
    }

    out
}

/// Nonzero scales plus any named other emotion, or `None` when nothing was
/// recorded.
fn render_emotions(set: &EmotionSet) -> Option<String> {
    let mut parts: Vec<String> = EmotionKind::ALL
        .into_iter()
        .filter(|kind| set.get(*kind) > 0)
        .map(|kind| format!("{kind} {}/10", set.get(kind)))
        .collect();
    if let Some(other) = &set.other {
        if !other.name.trim().is_empty() && other.intensity > 0 {
            parts.push(format!("{} {}/10", other.name.trim(), other.intensity));
        }
    }
    if parts.is_empty() { None } else { Some(parts.join(", ")) }
}

fn push_section(out: &mut String, header: &str) {
    out.push('\n');
    push_line(out, header);
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}
