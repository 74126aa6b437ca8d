/// One physical line: content plus the terminator it was read with.
///
/// The last line of a file without a trailing newline has an empty `ending`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    pub body: String,
    pub ending: String,
}

impl RawLine {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            ending: "\n".to_string(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.body.trim().is_empty()
    }
}

pub fn split_lines(text: &str) -> Vec<RawLine> {
    text.split_inclusive('\n')
        .map(|chunk| {
            let (body, ending) = if let Some(b) = chunk.strip_suffix("\r\n") {
                (b, "\r\n")
            } else if let Some(b) = chunk.strip_suffix('\n') {
                (b, "\n")
            } else {
                (chunk, "")
            };
            RawLine {
                body: body.to_string(),
                ending: ending.to_string(),
            }
        })
        .collect()
}

pub fn join_lines<'a>(lines: impl IntoIterator<Item = &'a RawLine>) -> String {
    let mut out = String::new();
    for l in lines {
        out.push_str(&l.body);
        out.push_str(&l.ending);
    }
    out
}

/// Terminator for a line inserted at `idx`, copied from the nearest
/// terminated line so CRLF files stay CRLF.
///
/// When the preceding line was the unterminated last line, it gains that
/// terminator and the inserted line takes over the missing one, so the file
/// keeps its "no trailing newline" shape.
pub fn ending_for_insert(lines: &mut [RawLine], idx: usize) -> String {
    let nearest = lines[..idx]
        .iter()
        .rev()
        .chain(lines[idx..].iter())
        .map(|l| l.ending.as_str())
        .find(|e| !e.is_empty())
        .unwrap_or("\n")
        .to_string();
    if idx > 0 && idx == lines.len() && lines[idx - 1].ending.is_empty() {
        lines[idx - 1].ending = nearest;
        return String::new();
    }
    nearest
}
