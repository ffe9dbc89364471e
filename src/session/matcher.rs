#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharVerdict {
    Correct,
    Incorrect,
    /// Target has a character here but the typed text ended early.
    Missing,
    /// Typed text ran past the end of the target.
    Extra,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CharCheck {
    /// The target character, except for Extra positions where it is the
    /// surplus typed character.
    pub ch: char,
    pub verdict: CharVerdict,
}

#[derive(Clone, Debug)]
pub struct WordComparison {
    pub chars: Vec<CharCheck>,
    pub correct_chars: usize,
    /// max(target length, typed length) in characters. Length mismatches are
    /// charged as errors through this denominator.
    pub compared_chars: usize,
    pub full_match: bool,
}

/// Position-by-position comparison of a typed word against its target.
/// Operates on char positions, never bytes, so multi-byte characters count
/// once. Pure; called per keystroke for highlighting and once per submit.
pub fn compare(target: &str, typed: &str) -> WordComparison {
    let target_chars: Vec<char> = target.chars().collect();
    let typed_chars: Vec<char> = typed.chars().collect();

    let mut chars = Vec::with_capacity(target_chars.len().max(typed_chars.len()));
    let mut correct_chars = 0;

    for (i, &expected) in target_chars.iter().enumerate() {
        let verdict = match typed_chars.get(i) {
            Some(&actual) if actual == expected => {
                correct_chars += 1;
                CharVerdict::Correct
            }
            Some(_) => CharVerdict::Incorrect,
            None => CharVerdict::Missing,
        };
        chars.push(CharCheck {
            ch: expected,
            verdict,
        });
    }
    for &actual in typed_chars.iter().skip(target_chars.len()) {
        chars.push(CharCheck {
            ch: actual,
            verdict: CharVerdict::Extra,
        });
    }

    WordComparison {
        chars,
        correct_chars,
        compared_chars: target_chars.len().max(typed_chars.len()),
        full_match: typed == target,
    }
}
