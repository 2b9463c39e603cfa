//! Brazilian tax documents: CPF (individuals) and CNPJ (companies).
//!
//! Both formats end in two check digits derived from the preceding digits by
//! a weighted sum modulo 11. Validation here is purely structural; it says
//! nothing about whether the document is registered.
//!
//! Inputs may carry any punctuation (`111.444.777-35`, `11.222.333/0001-81`);
//! everything except ASCII digits is discarded before checking.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

pub const CPF_LEN: usize = 11;
pub const CNPJ_LEN: usize = 14;

/// Which document a value claims to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DocumentKind {
    Cpf,
    Cnpj,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Cpf => "CPF",
            DocumentKind::Cnpj => "CNPJ",
        }
    }

    /// Number of digits once punctuation is stripped.
    pub fn digit_count(&self) -> usize {
        match self {
            DocumentKind::Cpf => CPF_LEN,
            DocumentKind::Cnpj => CNPJ_LEN,
        }
    }

    pub fn is_valid(&self, input: &str) -> bool {
        match self {
            DocumentKind::Cpf => is_valid_cpf(input),
            DocumentKind::Cnpj => is_valid_cnpj(input),
        }
    }
}

impl core::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for DocumentKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CPF" => Ok(DocumentKind::Cpf),
            "CNPJ" => Ok(DocumentKind::Cnpj),
            other => Err(DomainError::validation(format!(
                "unknown document kind '{other}' (expected CPF or CNPJ)"
            ))),
        }
    }
}

/// Keep only the ASCII digits of `input`.
pub fn only_digits(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

fn digit_values(input: &str) -> Vec<u32> {
    input.chars().filter_map(|c| c.to_digit(10)).collect()
}

fn all_repeated(digits: &[u32]) -> bool {
    digits.windows(2).all(|w| w[0] == w[1])
}

/// CPF check digit over `prefix` (9 or 10 digits).
///
/// Weights descend from `prefix.len() + 1` down to 2.
fn cpf_check_digit(prefix: &[u32]) -> u32 {
    let top = prefix.len() as u32 + 1;
    let sum: u32 = prefix
        .iter()
        .enumerate()
        .map(|(i, d)| d * (top - i as u32))
        .sum();
    let rem = (sum * 10) % 11;
    if rem >= 10 { 0 } else { rem }
}

/// CNPJ check digit over `prefix` (12 or 13 digits).
///
/// Read right to left, the weights run 2..=9 and wrap back to 2.
fn cnpj_check_digit(prefix: &[u32]) -> u32 {
    let sum: u32 = prefix
        .iter()
        .rev()
        .zip((2..=9).cycle())
        .map(|(d, w)| d * w)
        .sum();
    let rem = sum % 11;
    if rem < 2 { 0 } else { 11 - rem }
}

/// Validate an individual taxpayer number (CPF).
///
/// Rejects anything that is not 11 digits after stripping punctuation, the
/// all-same-digit sequences, and any value whose check digits do not match.
pub fn is_valid_cpf(input: &str) -> bool {
    let d = digit_values(input);
    if d.len() != CPF_LEN || all_repeated(&d) {
        return false;
    }
    cpf_check_digit(&d[..9]) == d[9] && cpf_check_digit(&d[..10]) == d[10]
}

/// Validate a company registration number (CNPJ).
pub fn is_valid_cnpj(input: &str) -> bool {
    let d = digit_values(input);
    if d.len() != CNPJ_LEN || all_repeated(&d) {
        return false;
    }
    cnpj_check_digit(&d[..12]) == d[12] && cnpj_check_digit(&d[..13]) == d[13]
}

/// A checksum-valid CPF or CNPJ, stored as bare digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaxDocument {
    kind: DocumentKind,
    digits: String,
}

impl ValueObject for TaxDocument {}

impl TaxDocument {
    pub fn parse(kind: DocumentKind, raw: &str) -> DomainResult<Self> {
        if !kind.is_valid(raw) {
            return Err(DomainError::invalid_document(kind));
        }
        Ok(Self {
            kind,
            digits: only_digits(raw),
        })
    }

    pub fn cpf(raw: &str) -> DomainResult<Self> {
        Self::parse(DocumentKind::Cpf, raw)
    }

    pub fn cnpj(raw: &str) -> DomainResult<Self> {
        Self::parse(DocumentKind::Cnpj, raw)
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    /// Digits only, as the backend expects them.
    pub fn digits(&self) -> &str {
        &self.digits
    }
}

impl core::fmt::Display for TaxDocument {
    /// Canonical mask: `000.000.000-00` or `00.000.000/0000-00`.
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let d = &self.digits;
        match self.kind {
            DocumentKind::Cpf => write!(f, "{}.{}.{}-{}", &d[..3], &d[3..6], &d[6..9], &d[9..]),
            DocumentKind::Cnpj => write!(
                f,
                "{}.{}.{}/{}-{}",
                &d[..2],
                &d[2..5],
                &d[5..8],
                &d[8..12],
                &d[12..]
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cpf_accepts_known_valid_numbers() {
        assert!(is_valid_cpf("111.444.777-35"));
        assert!(is_valid_cpf("11144477735"));
        assert!(is_valid_cpf("529.982.247-25"));
    }

    #[test]
    fn cpf_rejects_repeated_digits() {
        assert!(!is_valid_cpf("111.111.111-11"));
        assert!(!is_valid_cpf("00000000000"));
    }

    #[test]
    fn cpf_rejects_wrong_length() {
        assert!(!is_valid_cpf("1114447773"));
        assert!(!is_valid_cpf("111444777350"));
        assert!(!is_valid_cpf(""));
    }

    #[test]
    fn cpf_rejects_wrong_check_digits() {
        assert!(!is_valid_cpf("111.444.777-34"));
        assert!(!is_valid_cpf("111.444.777-25"));
    }

    #[test]
    fn cpf_ignores_non_ascii_digits() {
        // Arabic-Indic three is a Unicode digit but not an ASCII one.
        assert!(!is_valid_cpf("111.444.777-3\u{0663}"));
        assert!(is_valid_cpf("cpf: 111 444 777 / 35"));
    }

    #[test]
    fn cnpj_accepts_known_valid_numbers() {
        assert!(is_valid_cnpj("11.222.333/0001-81"));
        assert!(is_valid_cnpj("11222333000181"));
        assert!(is_valid_cnpj("11.444.777/0001-61"));
    }

    #[test]
    fn cnpj_rejects_repeated_digits_and_bad_length() {
        assert!(!is_valid_cnpj("11.111.111/1111-11"));
        assert!(!is_valid_cnpj("1122233300018"));
        assert!(!is_valid_cnpj("112223330001811"));
    }

    #[test]
    fn cnpj_rejects_wrong_check_digits() {
        assert!(!is_valid_cnpj("11.222.333/0001-82"));
        assert!(!is_valid_cnpj("11.222.333/0001-71"));
    }

    #[test]
    fn validators_do_not_cross_accept() {
        assert!(!is_valid_cnpj("111.444.777-35"));
        assert!(!is_valid_cpf("11.222.333/0001-81"));
    }

    #[test]
    fn tax_document_normalizes_and_masks() {
        let cpf = TaxDocument::cpf("11144477735").unwrap();
        assert_eq!(cpf.digits(), "11144477735");
        assert_eq!(cpf.to_string(), "111.444.777-35");

        let cnpj = TaxDocument::cnpj("11 222 333 0001 81").unwrap();
        assert_eq!(cnpj.kind(), DocumentKind::Cnpj);
        assert_eq!(cnpj.to_string(), "11.222.333/0001-81");
    }

    #[test]
    fn tax_document_reports_kind_on_failure() {
        let err = TaxDocument::cnpj("11.111.111/1111-11").unwrap_err();
        assert_eq!(err, DomainError::InvalidDocument { kind: DocumentKind::Cnpj });
        assert_eq!(err.to_string(), "invalid CNPJ");
    }

    #[test]
    fn document_kind_parses_case_insensitively() {
        assert_eq!("cpf".parse::<DocumentKind>().unwrap(), DocumentKind::Cpf);
        assert_eq!(" CNPJ ".parse::<DocumentKind>().unwrap(), DocumentKind::Cnpj);
        assert!("rg".parse::<DocumentKind>().is_err());
        assert_eq!(serde_json::to_string(&DocumentKind::Cnpj).unwrap(), "\"CNPJ\"");
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        /// Reference check digits written straight from the published rules.
        fn reference_cpf(base: &[u32]) -> (u32, u32) {
            let mut sum = 0;
            for i in 1..=9 {
                sum += base[i - 1] * (11 - i as u32);
            }
            let mut first = (sum * 10) % 11;
            if first == 10 || first == 11 {
                first = 0;
            }
            let mut sum = 0;
            for i in 1..=10 {
                let d = if i == 10 { first } else { base[i - 1] };
                sum += d * (12 - i as u32);
            }
            let mut second = (sum * 10) % 11;
            if second == 10 || second == 11 {
                second = 0;
            }
            (first, second)
        }

        fn reference_cnpj(base: &[u32]) -> (u32, u32) {
            const W1: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
            const W2: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
            let check = |sum: u32| if sum % 11 < 2 { 0 } else { 11 - sum % 11 };
            let first = check(base.iter().zip(W1).map(|(d, w)| d * w).sum());
            let second = check(
                base.iter()
                    .chain(std::iter::once(&first))
                    .zip(W2)
                    .map(|(d, w)| d * w)
                    .sum(),
            );
            (first, second)
        }

        fn render(digits: &[u32]) -> String {
            digits.iter().map(|d| char::from_digit(*d, 10).unwrap_or('0')).collect()
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 1000,
                ..ProptestConfig::default()
            })]

            /// Property: validators are total over arbitrary strings.
            #[test]
            fn validators_never_panic(input in ".{0,40}") {
                let _ = is_valid_cpf(&input);
                let _ = is_valid_cnpj(&input);
            }

            /// Property: every CPF with computed check digits validates, masked or not.
            #[test]
            fn generated_cpf_is_accepted(base in proptest::collection::vec(0u32..10, 9)) {
                let (a, b) = reference_cpf(&base);
                let mut digits = base.clone();
                digits.extend([a, b]);
                prop_assume!(!all_repeated(&digits));

                let bare = render(&digits);
                let masked = format!("{}.{}.{}-{}", &bare[..3], &bare[3..6], &bare[6..9], &bare[9..]);
                prop_assert!(is_valid_cpf(&bare));
                prop_assert!(is_valid_cpf(&masked));
            }

            /// Property: altering the last check digit always breaks a CPF.
            #[test]
            fn altered_cpf_check_digit_is_rejected(
                base in proptest::collection::vec(0u32..10, 9),
                shift in 1u32..10,
            ) {
                let (a, b) = reference_cpf(&base);
                let mut digits = base.clone();
                digits.extend([a, (b + shift) % 10]);
                prop_assert!(!is_valid_cpf(&render(&digits)));
            }

            /// Property: every CNPJ with computed check digits validates.
            #[test]
            fn generated_cnpj_is_accepted(base in proptest::collection::vec(0u32..10, 12)) {
                let (a, b) = reference_cnpj(&base);
                let mut digits = base.clone();
                digits.extend([a, b]);
                prop_assume!(!all_repeated(&digits));

                let bare = render(&digits);
                prop_assert!(is_valid_cnpj(&bare));
                prop_assert_eq!(
                    TaxDocument::cnpj(&bare).map(|d| d.digits().to_string()),
                    Ok(bare.clone())
                );
            }

            /// Property: altering the first check digit always breaks a CNPJ.
            #[test]
            fn altered_cnpj_check_digit_is_rejected(
                base in proptest::collection::vec(0u32..10, 12),
                shift in 1u32..10,
            ) {
                let (a, b) = reference_cnpj(&base);
                let mut digits = base.clone();
                digits.extend([(a + shift) % 10, b]);
                prop_assert!(!is_valid_cnpj(&render(&digits)));
            }
        }
    }
}
