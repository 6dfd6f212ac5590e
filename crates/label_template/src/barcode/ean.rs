//! EAN-13 and UPC-A
//!
//! UPC-A is EAN-13 with an implied leading zero. The check digit is computed
//! when omitted and verified when given.

/// Left-hand odd parity (set A) digit patterns; set C is the complement and
/// set B is set C reversed.
const L_CODES: [&str; 10] = [
    "0001101", "0011001", "0010011", "0111101", "0100011",
    "0110001", "0101111", "0111011", "0110111", "0001011",
];

/// Parity of the six left-hand digits, selected by the leading digit
const PARITY: [&str; 10] = [
    "LLLLLL", "LLGLGG", "LLGGLG", "LLGGGL", "LGLLGG",
    "LGGLLG", "LGGGLL", "LGLGLG", "LGLGGL", "LGGLGL",
];

const GUARD: &str = "101";
const CENTER: &str = "01010";

fn digits(value: &str) -> Result<Vec<u8>, String> {
    value
        .chars()
        .map(|c| {
            c.to_digit(10)
                .map(|d| d as u8)
                .ok_or_else(|| format!("character {:?} is not a digit", c))
        })
        .collect()
}

/// Check digit over the first 12 digits: weights 1,3,1,3,...
pub(crate) fn check_digit(payload: &[u8]) -> u8 {
    let sum: u32 = payload
        .iter()
        .enumerate()
        .map(|(i, &d)| d as u32 * if i % 2 == 0 { 1 } else { 3 })
        .sum();
    ((10 - sum % 10) % 10) as u8
}

fn push_bits(bits: &str, modules: &mut Vec<bool>) {
    modules.extend(bits.chars().map(|b| b == '1'));
}

fn r_code(digit: u8) -> String {
    L_CODES[digit as usize]
        .chars()
        .map(|b| if b == '1' { '0' } else { '1' })
        .collect()
}

fn g_code(digit: u8) -> String {
    r_code(digit).chars().rev().collect()
}

pub(crate) fn encode_ean13(value: &str) -> Result<Vec<bool>, String> {
    let mut code = digits(value)?;
    match code.len() {
        12 => code.push(check_digit(&code)),
        13 => {
            let expected = check_digit(&code[..12]);
            if code[12] != expected {
                return Err(format!(
                    "check digit is {} but should be {}",
                    code[12], expected
                ));
            }
        }
        n => return Err(format!("expected 12 or 13 digits, got {}", n)),
    }

    let parity = PARITY[code[0] as usize];
    let mut modules = Vec::with_capacity(95);
    push_bits(GUARD, &mut modules);
    for (&digit, set) in code[1..7].iter().zip(parity.chars()) {
        if set == 'L' {
            push_bits(L_CODES[digit as usize], &mut modules);
        } else {
            push_bits(&g_code(digit), &mut modules);
        }
    }
    push_bits(CENTER, &mut modules);
    for &digit in &code[7..13] {
        push_bits(&r_code(digit), &mut modules);
    }
    push_bits(GUARD, &mut modules);
    Ok(modules)
}

pub(crate) fn encode_upca(value: &str) -> Result<Vec<bool>, String> {
    match value.chars().count() {
        11 | 12 => encode_ean13(&format!("0{}", value)),
        n => Err(format!("expected 11 or 12 digits, got {}", n)),
    }
}
