//! Code 39
//!
//! Nine elements per character, three of them wide. Wide elements are three
//! modules, narrow elements one, and characters are separated by a narrow
//! space. No check character is appended.

use super::expand_widths;

const WIDE: u8 = 3;
const NARROW: u8 = 1;

/// (character, elements) with `w` for wide, `n` for narrow, bar first
const TABLE: [(char, &str); 44] = [
    ('0', "nnnwwnwnn"), ('1', "wnnwnnnnw"), ('2', "nnwwnnnnw"), ('3', "wnwwnnnnn"),
    ('4', "nnnwwnnnw"), ('5', "wnnwwnnnn"), ('6', "nnwwwnnnn"), ('7', "nnnwnnwnw"),
    ('8', "wnnwnnwnn"), ('9', "nnwwnnwnn"), ('A', "wnnnnwnnw"), ('B', "nnwnnwnnw"),
    ('C', "wnwnnwnnn"), ('D', "nnnnwwnnw"), ('E', "wnnnwwnnn"), ('F', "nnwnwwnnn"),
    ('G', "nnnnnwwnw"), ('H', "wnnnnwwnn"), ('I', "nnwnnwwnn"), ('J', "nnnnwwwnn"),
    ('K', "wnnnnnnww"), ('L', "nnwnnnnww"), ('M', "wnwnnnnwn"), ('N', "nnnnwnnww"),
    ('O', "wnnnwnnwn"), ('P', "nnwnwnnwn"), ('Q', "nnnnnnwww"), ('R', "wnnnnnwwn"),
    ('S', "nnwnnnwwn"), ('T', "nnnnwnwwn"), ('U', "wwnnnnnnw"), ('V', "nwwnnnnnw"),
    ('W', "wwwnnnnnn"), ('X', "nwnnwnnnw"), ('Y', "wwnnwnnnn"), ('Z', "nwwnwnnnn"),
    ('-', "nwnnnnwnw"), ('.', "wwnnnnwnn"), (' ', "nwwnnnwnn"), ('$', "nwnwnwnnn"),
    ('/', "nwnwnnnwn"), ('+', "nwnnnwnwn"), ('%', "nnnwnwnwn"), ('*', "nwnnwnwnn"),
];

fn elements(c: char) -> Option<&'static str> {
    TABLE.iter().find(|(k, _)| *k == c).map(|(_, e)| *e)
}

fn push_character(pattern: &str, modules: &mut Vec<bool>) {
    let widths: Vec<u8> = pattern
        .chars()
        .map(|e| if e == 'w' { WIDE } else { NARROW })
        .collect();
    expand_widths(&widths, modules);
}

pub(crate) fn encode(value: &str) -> Result<Vec<bool>, String> {
    if value.is_empty() {
        return Err("value is empty".to_string());
    }

    let upper = value.to_ascii_uppercase();
    let mut patterns = Vec::with_capacity(upper.len() + 2);
    patterns.push(elements('*').unwrap_or_default());
    for c in upper.chars() {
        if c == '*' {
            return Err("'*' is reserved for start/stop".to_string());
        }
        let pattern = elements(c).ok_or_else(|| format!("character {:?} is not in code 39", c))?;
        patterns.push(pattern);
    }
    patterns.push(elements('*').unwrap_or_default());

    let mut modules = Vec::new();
    for (i, pattern) in patterns.iter().enumerate() {
        if i > 0 {
            modules.push(false);
        }
        push_character(pattern, &mut modules);
    }
    Ok(modules)
}
