//! Text normalization for speech synthesis
//!
//! The VITS voices read exactly what they are given, so abbreviations,
//! symbols, and digit groups are expanded into the words a narrator would
//! actually say before a sentence reaches the synthesizer.

/// Normalize a sentence for speech synthesis.
pub fn normalize_for_speech(text: &str) -> String {
    let mut result = expand_abbreviations(text);
    result = expand_symbols(&result);
    result = expand_clock_times(&result);
    result = expand_ordinals(&result);

    // Collapse whitespace
    let result = result.split_whitespace().collect::<Vec<_>>().join(" ");

    // Drop characters the voices cannot render
    result
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || ".,!?;:'-\"".contains(*c))
        .collect::<String>()
        .trim()
        .to_string()
}

fn expand_abbreviations(text: &str) -> String {
    const EXPANSIONS: &[(&str, &str)] = &[
        ("Mr.", "Mister"),
        ("Mrs.", "Misses"),
        ("Ms.", "Miss"),
        ("Dr.", "Doctor"),
        ("Prof.", "Professor"),
        ("Jr.", "Junior"),
        ("Sr.", "Senior"),
        ("St.", "Street"),
        ("vs.", "versus"),
        ("etc.", "etcetera"),
        ("e.g.", "for example"),
        ("i.e.", "that is"),
        ("approx.", "approximately"),
        ("No.", "Number"),
        ("MPH", "miles per hour"),
        ("km/h", "kilometers per hour"),
    ];

    let mut result = text.to_string();
    for (abbrev, expansion) in EXPANSIONS {
        result = result.replace(abbrev, expansion);
    }
    result
}

fn expand_symbols(text: &str) -> String {
    const SYMBOLS: &[(&str, &str)] = &[
        ("&", " and "),
        ("%", " percent"),
        ("@", " at "),
        ("#", " number "),
        ("$", " dollars "),
        ("€", " euros "),
        ("£", " pounds "),
        ("+", " plus "),
        ("=", " equals "),
        ("°", " degrees "),
    ];

    let mut result = text.to_string();
    for (symbol, word) in SYMBOLS {
        result = result.replace(symbol, word);
    }
    result
}

/// Expand "3:30" into "three thirty" and "7:00" into "seven o'clock".
fn expand_clock_times(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if !c.is_ascii_digit() {
            result.push(c);
            continue;
        }

        let mut hour = String::from(c);
        while let Some(&next) = chars.peek() {
            if next.is_ascii_digit() {
                hour.push(next);
                chars.next();
            } else {
                break;
            }
        }

        if chars.peek() != Some(&':') {
            result.push_str(&hour);
            continue;
        }
        chars.next();

        let mut minutes = String::new();
        while let Some(&next) = chars.peek() {
            if next.is_ascii_digit() && minutes.len() < 2 {
                minutes.push(next);
                chars.next();
            } else {
                break;
            }
        }

        if minutes.is_empty() {
            result.push_str(&hour);
            result.push(':');
        } else if minutes == "00" {
            result.push_str(&format!("{} o'clock", number_to_words(&hour)));
        } else {
            result.push_str(&format!(
                "{} {}",
                number_to_words(&hour),
                number_to_words(&minutes)
            ));
        }
    }

    result
}

/// Expand ordinal digit groups ("1st", "42nd") into words.
fn expand_ordinals(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let (digits, suffix) = split_ordinal(word);
            if digits.is_empty() {
                return word.to_string();
            }
            let (_, trailing) = suffix;
            match digits.parse::<u32>() {
                Ok(n) => format!("{}{trailing}", ordinal_to_words(n)),
                Err(_) => word.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split "42nd," into ("42", ("nd", ",")). Returns empty digits when the
/// word is not an ordinal.
fn split_ordinal(word: &str) -> (String, (&str, &str)) {
    let digits: String = word.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return (String::new(), ("", word));
    }

    let rest = &word[digits.len()..];
    for suffix in ["st", "nd", "rd", "th"] {
        if let Some(trailing) = rest.strip_prefix(suffix) {
            if trailing.chars().all(|c| ".,!?;:".contains(c)) {
                return (digits, (suffix, trailing));
            }
        }
    }

    (String::new(), ("", word))
}

fn ordinal_to_words(n: u32) -> String {
    const IRREGULAR: &[(u32, &str)] = &[
        (1, "first"),
        (2, "second"),
        (3, "third"),
        (5, "fifth"),
        (8, "eighth"),
        (9, "ninth"),
        (12, "twelfth"),
    ];

    if let Some((_, word)) = IRREGULAR.iter().find(|(v, _)| *v == n) {
        return (*word).to_string();
    }

    let cardinal = number_to_words(&n.to_string());
    if n >= 20 && n % 10 != 0 {
        // "twenty-one" -> "twenty-first"
        if let Some(pos) = cardinal.rfind('-') {
            return format!("{}{}", &cardinal[..pos + 1], ordinal_to_words(n % 10));
        }
    }

    match cardinal.chars().last() {
        Some('y') => format!("{}ieth", &cardinal[..cardinal.len() - 1]),
        _ => format!("{cardinal}th"),
    }
}

/// Convert a number string to words (up to the hundreds)
pub fn number_to_words(num_str: &str) -> String {
    let num: u32 = match num_str.parse() {
        Ok(n) => n,
        Err(_) => return num_str.to_string(),
    };

    const ONES: [&str; 20] = [
        "", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
        "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen",
        "eighteen", "nineteen",
    ];

    const TENS: [&str; 10] = [
        "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
    ];

    match num {
        0 => "zero".to_string(),
        1..=19 => ONES[num as usize].to_string(),
        20..=99 => {
            let t = (num / 10) as usize;
            let o = (num % 10) as usize;
            if o == 0 {
                TENS[t].to_string()
            } else {
                format!("{}-{}", TENS[t], ONES[o])
            }
        }
        100..=999 => {
            let h = (num / 100) as usize;
            let rem = num % 100;
            if rem == 0 {
                format!("{} hundred", ONES[h])
            } else {
                format!("{} hundred {}", ONES[h], number_to_words(&rem.to_string()))
            }
        }
        _ => num_str.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abbreviations() {
        let out = normalize_for_speech("Dr. Smith met Mr. Jones");
        assert!(out.contains("Doctor"));
        assert!(out.contains("Mister"));
    }

    #[test]
    fn test_symbols() {
        let out = normalize_for_speech("50% off & free shipping");
        assert!(out.contains("percent"));
        assert!(out.contains("and"));
        assert!(!out.contains('%'));
    }

    #[test]
    fn test_clock_times() {
        assert!(normalize_for_speech("meet at 3:30 today").contains("three thirty"));
        assert!(normalize_for_speech("meet at 7:00 today").contains("seven o'clock"));
    }

    #[test]
    fn test_ordinals() {
        assert!(normalize_for_speech("the 1st place").contains("first"));
        assert!(normalize_for_speech("the 22nd floor").contains("twenty-second"));
        assert!(normalize_for_speech("the 20th try").contains("twentieth"));
        assert!(normalize_for_speech("the 4th wall,").contains("fourth wall"));
    }

    #[test]
    fn test_number_to_words() {
        assert_eq!(number_to_words("0"), "zero");
        assert_eq!(number_to_words("15"), "fifteen");
        assert_eq!(number_to_words("42"), "forty-two");
        assert_eq!(number_to_words("100"), "one hundred");
        assert_eq!(number_to_words("123"), "one hundred twenty-three");
    }

    #[test]
    fn test_whitespace_collapse() {
        assert_eq!(normalize_for_speech("a   b\n\nc"), "a b c");
    }

    #[test]
    fn test_character_whitelist() {
        let out = normalize_for_speech("keep words (drop parens) {and braces}");
        assert!(!out.contains('('));
        assert!(!out.contains('{'));
        assert!(out.contains("drop parens"));
    }
}
