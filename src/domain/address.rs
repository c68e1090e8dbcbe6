//! Street address plausibility heuristics.
//!
//! Location recognizers fire on any proper noun that looks like a place.
//! A location is only trusted as an address when it carries an explicit
//! address marker or a house/unit number, and never when it reads like a
//! monetary or procedural phrase.

/// Words that rule a candidate out, checked before anything else.
pub const EXCLUSION_KEYWORDS: &[&str] = &[
    "centavo",
    "centavos",
    "real",
    "reais",
    "valor",
    "total",
    "pagamento",
    "saldo",
    "taxa",
    "juros",
    "desconto",
    "processo",
];

/// Street types, unit markers and other explicit address vocabulary.
pub const ADDRESS_KEYWORDS: &[&str] = &[
    "rua",
    "av",
    "av.",
    "avenida",
    "praça",
    "travessa",
    "tv",
    "alameda",
    "rodovia",
    "rod",
    "rodov",
    "km",
    "cep",
    "bairro",
    "nº",
    "numero",
    "apto",
    "apartamento",
    "bloco",
    "andar",
    "s/n",
    "sn",
    "sala",
    "conjunto",
    "cj",
    "edificio",
    "edif",
    "ed.",
];

/// Heuristic classifier for free-text location spans.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddressValidator;

impl AddressValidator {
    pub fn new() -> Self {
        Self
    }

    /// Decides whether `text` plausibly denotes a postal address.
    ///
    /// Keywords match as plain substrings of the lowercased text. The first
    /// rule that applies wins:
    /// 1. any exclusion keyword → `false`
    /// 2. any address keyword → `true`
    /// 3. any ASCII decimal digit → `true`
    /// 4. otherwise `false`
    pub fn is_plausible_address(&self, text: &str) -> bool {
        let lower = text.to_lowercase();

        if EXCLUSION_KEYWORDS.iter().any(|k| lower.contains(k)) {
            return false;
        }
        if ADDRESS_KEYWORDS.iter().any(|k| lower.contains(k)) {
            return true;
        }
        lower.chars().any(|c| c.is_ascii_digit())
    }
}
