use std::collections::BTreeSet;

/// Distinct messages in ascending lexicographic order.
///
/// The result depends only on the set of messages, never on the order they
/// were collected in.
pub fn dedupe_messages<I, S>(messages: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    messages
        .into_iter()
        .map(Into::into)
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorts_and_removes_duplicates() {
        let messages = ["b", "a", "b", "C", "a"];
        assert_eq!(dedupe_messages(messages), ["C", "a", "b"]);
    }

    #[test]
    fn empty_input() {
        assert!(dedupe_messages(Vec::<String>::new()).is_empty());
    }
}
