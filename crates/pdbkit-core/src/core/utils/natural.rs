use std::cmp::Ordering;
use std::fmt;

/// One run of a natural-sort key: either a run of digits read as an integer or a
/// run of anything else kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyPart {
    Number(i64),
    Text(String),
}

impl PartialOrd for KeyPart {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for KeyPart {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (KeyPart::Number(a), KeyPart::Number(b)) => a.cmp(b),
            (KeyPart::Text(a), KeyPart::Text(b)) => a.cmp(b),
            (KeyPart::Number(_), KeyPart::Text(_)) => Ordering::Less,
            (KeyPart::Text(_), KeyPart::Number(_)) => Ordering::Greater,
        }
    }
}

/// A key that orders embedded numbers by value, so `"9" < "10" < "10A" < "11"`.
///
/// Used for residue sequence numbers with insertion codes. Surrounding whitespace
/// is ignored, and a leading minus sign binds to the first number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NaturalKey {
    parts: Vec<KeyPart>,
}

impl NaturalKey {
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        let mut parts = Vec::new();
        let mut rest = text;

        if let Some(stripped) = rest.strip_prefix('-') {
            let digits = leading_run(stripped, |c| c.is_ascii_digit());
            if !digits.is_empty() {
                if let Ok(value) = format!("-{}", digits).parse::<i64>() {
                    parts.push(KeyPart::Number(value));
                    rest = &stripped[digits.len()..];
                }
            }
        }

        while !rest.is_empty() {
            let digits = leading_run(rest, |c| c.is_ascii_digit());
            if !digits.is_empty() {
                parts.push(match digits.parse::<i64>() {
                    Ok(value) => KeyPart::Number(value),
                    Err(_) => KeyPart::Text(digits.to_string()),
                });
                rest = &rest[digits.len()..];
                continue;
            }
            let text_run = leading_run(rest, |c| !c.is_ascii_digit());
            parts.push(KeyPart::Text(text_run.to_string()));
            rest = &rest[text_run.len()..];
        }

        Self { parts }
    }

    pub fn parts(&self) -> &[KeyPart] {
        &self.parts
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

impl fmt::Display for NaturalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for part in &self.parts {
            match part {
                KeyPart::Number(n) => write!(f, "{}", n)?,
                KeyPart::Text(t) => write!(f, "{}", t)?,
            }
        }
        Ok(())
    }
}

fn leading_run(s: &str, pred: impl Fn(char) -> bool) -> &str {
    let end = s.find(|c: char| !pred(c)).unwrap_or(s.len());
    &s[..end]
}
