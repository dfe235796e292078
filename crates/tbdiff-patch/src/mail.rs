//! Mail-level helpers: mbox envelopes and the subject header.

/// Date `git format-patch` writes on every mbox envelope line.
const FORMAT_PATCH_DATE: &str = "Mon Sep 17 00:00:00 2001";

/// Identifier carried by the mbox envelope (`From <id> <date>`) on the
/// first line of a mail.
pub fn envelope_id(mail: &str) -> Option<&str> {
    let first = mail.lines().next()?;
    let rest = first.strip_prefix("From ")?;
    rest.split_whitespace().next()
}

/// Returns `true` for an envelope line that starts a new mail in a
/// format-patch mbox: `From <40 hex> Mon Sep 17 00:00:00 2001`.
pub fn is_envelope(line: &str) -> bool {
    let Some(rest) = line.strip_prefix("From ") else {
        return false;
    };
    let Some((id, date)) = rest.split_once(' ') else {
        return false;
    };
    id.len() == 40
        && id.bytes().all(|b| b.is_ascii_hexdigit())
        && date.trim_end() == FORMAT_PATCH_DATE
}

/// Split an mbox into its mails. Text before the first envelope is ignored.
pub fn split_mbox(mbox: &str) -> Vec<&str> {
    let mut starts = Vec::new();
    let mut offset = 0;
    for line in mbox.split_inclusive('\n') {
        if is_envelope(line) {
            starts.push(offset);
        }
        offset += line.len();
    }

    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(mbox.len());
            &mbox[start..end]
        })
        .collect()
}

/// The unfolded `Subject:` header with leading `[...]` tags removed.
///
/// Returns an empty string when the mail has no subject.
pub fn subject(mail: &str) -> String {
    let mut value: Option<String> = None;

    for line in mail.lines() {
        if line.trim().is_empty() {
            break;
        }
        if let Some(current) = value.as_mut() {
            // Folded continuation of the subject header.
            if line.starts_with(' ') || line.starts_with('\t') {
                current.push(' ');
                current.push_str(line.trim());
                continue;
            }
            break;
        }
        if let Some(rest) = line.strip_prefix("Subject:") {
            value = Some(rest.trim().to_string());
        }
    }

    value.map(|s| strip_tags(&s).to_string()).unwrap_or_default()
}

fn strip_tags(mut subject: &str) -> &str {
    while let Some(rest) = subject.strip_prefix('[') {
        match rest.split_once(']') {
            Some((_, after)) => subject = after.trim_start(),
            None => break,
        }
    }
    subject
}
