// Fixed prompt material: one embedded paragraph per difficulty and one
// token pool per practice focus.

pub const EASY_TEXT: &str = include_str!("../../assets/prompts/easy.txt");
pub const MEDIUM_TEXT: &str = include_str!("../../assets/prompts/medium.txt");
pub const HARD_TEXT: &str = include_str!("../../assets/prompts/hard.txt");

pub const NUMBER_POOL: &[&str] = &[
    "7", "13", "25", "42", "60", "89", "100", "256", "365", "404", "512", "777", "999", "1000",
    "1337", "2024", "5280", "8675", "90210", "123456",
];

pub const SYMBOL_POOL: &[&str] = &[
    "!@#", "$%^", "&*()", "{}[]", "<>?", ";:'", "++--", "==>", "||&&", "##~", "__-", "()=>",
    "%$#@", "^&*!", "[]{};", "??!!", "::<>", "*&^%", "-+=_", "~!~!",
];

pub const UPPERCASE_POOL: &[&str] = &[
    "THE", "QUICK", "BROWN", "FOX", "JUMPS", "OVER", "LAZY", "DOG", "PACK", "BOX", "FIVE",
    "DOZEN", "JUGS", "WALTZ", "NYMPH", "SPHINX", "QUARTZ", "WIZARD", "ZEBRA", "JACKDAW",
];

pub const LOWERCASE_POOL: &[&str] = &[
    "banana", "bubble", "fizzy", "giggle", "hubbub", "jazzy", "kayak", "llama", "mellow",
    "pajama", "pepper", "puppy", "quokka", "razzle", "summer", "velvet", "window", "yellow",
    "zigzag", "breeze",
];

pub const COMMON_WORD_POOL: &[&str] = &[
    "the", "of", "and", "to", "in", "is", "you", "that", "it", "he", "was", "for", "on", "are",
    "as", "with", "his", "they", "at", "be",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_texts_are_nonempty() {
        assert!(!EASY_TEXT.trim().is_empty());
        assert!(!MEDIUM_TEXT.trim().is_empty());
        assert!(!HARD_TEXT.trim().is_empty());
    }

    #[test]
    fn test_pools_have_no_whitespace_tokens() {
        for pool in [
            NUMBER_POOL,
            SYMBOL_POOL,
            UPPERCASE_POOL,
            LOWERCASE_POOL,
            COMMON_WORD_POOL,
        ] {
            assert!(!pool.is_empty());
            for token in pool {
                assert!(!token.is_empty());
                assert!(!token.chars().any(char::is_whitespace), "bad token: {token:?}");
            }
        }
    }
}
