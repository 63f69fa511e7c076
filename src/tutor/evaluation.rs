//! Answer evaluation records

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result of grading a student's answer
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    /// 0..=100
    pub score: u8,
    pub feedback: String,
    pub misconceptions: String,
}

impl Evaluation {
    /// Record used when the model reply is not machine-readable
    pub fn unparsed(raw_reply: &str) -> Self {
        Self {
            score: 50,
            feedback: raw_reply.trim().to_string(),
            misconceptions: "Unable to parse specific misconceptions.".to_string(),
        }
    }

    /// Record used when the model could not be reached
    pub fn unavailable(reason: &str) -> Self {
        Self {
            score: 0,
            feedback: format!("Error evaluating answer: {}", reason),
            misconceptions: "Unable to evaluate due to an error.".to_string(),
        }
    }

    /// Best-effort parse of a model reply.
    ///
    /// Accepts a bare JSON object or one embedded in surrounding text (such
    /// as a fenced code block). Scores may be numbers or numeric strings and
    /// are clamped to 100; list-valued misconceptions are joined. Anything
    /// else degrades to [`Evaluation::unparsed`].
    pub fn from_reply(reply: &str) -> Self {
        extract_object(reply)
            .and_then(|object| Self::from_value(&object))
            .unwrap_or_else(|| Self::unparsed(reply))
    }

    fn from_value(value: &Value) -> Option<Self> {
        let score = match value.get("score")? {
            Value::Number(n) => n.as_f64()?,
            Value::String(s) => s.trim().trim_end_matches('%').parse::<f64>().ok()?,
            _ => return None,
        };
        let feedback = text_field(value.get("feedback")?)?;
        let misconceptions = value
            .get("misconceptions")
            .and_then(text_field)
            .unwrap_or_default();

        Some(Self {
            score: score.round().clamp(0.0, 100.0) as u8,
            feedback,
            misconceptions,
        })
    }
}

fn text_field(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => {
            let parts: Vec<String> = items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.clone()),
                    Value::Null => None,
                    other => Some(other.to_string()),
                })
                .collect();
            Some(parts.join("; "))
        }
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

fn extract_object(reply: &str) -> Option<Value> {
    if let Ok(value @ Value::Object(_)) = serde_json::from_str::<Value>(reply.trim()) {
        return Some(value);
    }

    let start = reply.find('{')?;
    let end = reply.rfind('}')?;
    if end <= start {
        return None;
    }
    match serde_json::from_str::<Value>(&reply[start..=end]) {
        Ok(value @ Value::Object(_)) => Some(value),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_json() {
        let eval = Evaluation::from_reply(
            r#"{"score": 85, "feedback": "Good order.", "misconceptions": "None."}"#,
        );
        assert_eq!(eval.score, 85);
        assert_eq!(eval.feedback, "Good order.");
        assert_eq!(eval.misconceptions, "None.");
    }

    #[test]
    fn test_parse_fenced_json_with_list() {
        let reply = "Here you go:\n```json\n{\"score\": \"70\", \"feedback\": \"Close\", \"misconceptions\": [\"stack vs queue\", \"order\"]}\n```";
        let eval = Evaluation::from_reply(reply);

        assert_eq!(eval.score, 70);
        assert_eq!(eval.misconceptions, "stack vs queue; order");
    }

    #[test]
    fn test_score_clamped() {
        let eval = Evaluation::from_reply(r#"{"score": 140, "feedback": "x"}"#);
        assert_eq!(eval.score, 100);
        assert_eq!(eval.misconceptions, "");
    }

    #[test]
    fn test_unparseable_falls_back() {
        let eval = Evaluation::from_reply("  Mostly right, but BFS uses a queue.  ");
        assert_eq!(eval, Evaluation::unparsed("Mostly right, but BFS uses a queue."));
        assert_eq!(eval.score, 50);
    }

    #[test]
    fn test_missing_feedback_falls_back() {
        let eval = Evaluation::from_reply(r#"{"score": 90}"#);
        assert_eq!(eval.score, 50);
        assert_eq!(eval.feedback, r#"{"score": 90}"#);
    }

    #[test]
    fn test_unavailable_record() {
        let eval = Evaluation::unavailable("timeout");
        assert_eq!(eval.score, 0);
        assert_eq!(eval.feedback, "Error evaluating answer: timeout");
    }
}
