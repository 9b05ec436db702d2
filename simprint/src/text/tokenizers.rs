/// Splits text on ASCII whitespace and punctuation, dropping empty tokens.
/// ```
/// use simprint::text::whitespace_split;
///
/// let tokens: Vec<&str> = whitespace_split("Hello, World!  again").collect();
/// assert_eq!(tokens, vec!["Hello", "World", "again"]);
/// ```
pub fn whitespace_split<'a>(text: &'a str) -> impl Iterator<Item = &'a str> {
    text.split(|c: char| c.is_ascii_punctuation() || c.is_ascii_whitespace())
        .filter(|&x| !x.is_empty())
}
