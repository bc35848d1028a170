use serde::Deserialize;

/// Front matter fields a deck document may carry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DeckMeta {
    pub title: Option<String>,
    pub voice: Option<String>,
}

/// A parsed deck document: front matter plus ordered slide bodies.
///
/// Bodies are opaque to the rest of the system; this module only finds
/// their boundaries.
#[derive(Debug, Clone, Default)]
pub struct DeckSource {
    pub meta: DeckMeta,
    pub bodies: Vec<String>,
}

impl DeckSource {
    /// Parse a deck document: optional `---`-fenced YAML front matter at
    /// the top, then slide bodies separated by `---` lines. Separator
    /// lines inside fenced code blocks are body content, not breaks.
    pub fn parse(input: &str) -> DeckSource {
        let (meta, body) = extract_front_matter(input);
        DeckSource {
            meta,
            bodies: split_bodies(body),
        }
    }
}

/// Split off a leading front matter block. Unterminated front matter is
/// left in place and the whole input is treated as body.
fn extract_front_matter(input: &str) -> (DeckMeta, &str) {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    let Some(after_open) = input
        .strip_prefix("---\n")
        .or_else(|| input.strip_prefix("---\r\n"))
    else {
        return (DeckMeta::default(), input);
    };

    let mut offset = 0;
    for line in after_open.split_inclusive('\n') {
        let text = line.strip_suffix('\n').unwrap_or(line);
        let text = text.strip_suffix('\r').unwrap_or(text);
        if text == "---" {
            let yaml = &after_open[..offset];
            let body = &after_open[offset + line.len()..];
            let meta = serde_yaml::from_str(yaml).unwrap_or_default();
            return (meta, body);
        }
        offset += line.len();
    }

    (DeckMeta::default(), input)
}

fn split_bodies(body: &str) -> Vec<String> {
    let body = body.replace("\r\n", "\n");
    let mut bodies = Vec::new();
    let mut current = String::new();
    let mut in_code_fence = false;
    let mut fence_char = '`';
    let mut fence_len = 0;

    for line in body.split('\n') {
        let trimmed = line.trim();

        if in_code_fence {
            let closing = trimmed.chars().take_while(|&c| c == fence_char).count();
            if closing >= fence_len && trimmed.chars().skip(closing).all(char::is_whitespace) {
                in_code_fence = false;
            }
        } else if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            in_code_fence = true;
            fence_char = trimmed.chars().next().unwrap_or('`');
            fence_len = trimmed.chars().take_while(|&c| c == fence_char).count();
        } else if is_separator(trimmed) {
            push_body(&mut bodies, &mut current);
            continue;
        }

        if !current.is_empty() {
            current.push('\n');
        }
        current.push_str(line);
    }
    push_body(&mut bodies, &mut current);

    bodies
}

fn push_body(bodies: &mut Vec<String>, current: &mut String) {
    let text = current.trim().to_string();
    if !text.is_empty() {
        bodies.push(text);
    }
    current.clear();
}

fn is_separator(line: &str) -> bool {
    line.len() >= 3 && line.chars().all(|c| c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_front_matter_extracted() {
        let input = "---\ntitle: Orientation\nvoice: en-US-Standard-C\n---\n\nFirst slide\n\n---\n\nSecond slide\n";
        let deck = DeckSource::parse(input);
        assert_eq!(deck.meta.title.as_deref(), Some("Orientation"));
        assert_eq!(deck.meta.voice.as_deref(), Some("en-US-Standard-C"));
        assert_eq!(deck.bodies, vec!["First slide", "Second slide"]);
    }

    #[test]
    fn test_no_front_matter() {
        let deck = DeckSource::parse("Only slide\n");
        assert!(deck.meta.title.is_none());
        assert_eq!(deck.bodies, vec!["Only slide"]);
    }

    #[test]
    fn test_separator_splits_bodies() {
        let deck = DeckSource::parse("one\n---\ntwo\n----\nthree");
        assert_eq!(deck.bodies, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_separator_inside_code_fence_kept() {
        let input = "```\n---\nstill code\n```\n---\nafter";
        let deck = DeckSource::parse(input);
        assert_eq!(deck.bodies.len(), 2);
        assert!(deck.bodies[0].contains("---"));
        assert_eq!(deck.bodies[1], "after");
    }

    #[test]
    fn test_consecutive_separators_drop_empty_bodies() {
        let deck = DeckSource::parse("one\n---\n---\ntwo");
        assert_eq!(deck.bodies, vec!["one", "two"]);
    }

    #[test]
    fn test_empty_document() {
        assert!(DeckSource::parse("").bodies.is_empty());
        assert!(DeckSource::parse("\n\n").bodies.is_empty());
    }

    #[test]
    fn test_unterminated_front_matter_is_body() {
        let deck = DeckSource::parse("---\ntitle: lost\nno closing fence");
        assert!(deck.meta.title.is_none());
        // the leading `---` acts as a plain separator, the rest is one body
        assert_eq!(deck.bodies, vec!["title: lost\nno closing fence"]);
    }

    #[test]
    fn test_bad_front_matter_yaml_ignored() {
        let input = "---\n:::not yaml:::\n---\nbody";
        let deck = DeckSource::parse(input);
        assert!(deck.meta.title.is_none());
        assert_eq!(deck.bodies, vec!["body"]);
    }
}
