//! Unicode normalization for corpus lines.
//!
//! Training splits words into codepoints, so the normalization form decides
//! what a "character" is: under NFD `é` becomes two symbols, under NFC one.
//! No normalization is applied unless asked for. Lines are normalized before
//! whitespace splitting, so a compatibility mapping that produces a space
//! (NFKC of U+00A0) splits words instead of leaking into a symbol.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use unicode_normalization::UnicodeNormalization;

/// Normalization form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NormalizationForm {
    /// No normalization
    #[default]
    None,
    /// Canonical composition
    NFC,
    /// Canonical decomposition
    NFD,
    /// Compatibility composition
    NFKC,
    /// Compatibility decomposition
    NFKD,
}

impl FromStr for NormalizationForm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "nfc" => Ok(Self::NFC),
            "nfd" => Ok(Self::NFD),
            "nfkc" => Ok(Self::NFKC),
            "nfkd" => Ok(Self::NFKD),
            other => Err(format!(
                "unknown normalization form '{}' (expected none, nfc, nfd, nfkc or nfkd)",
                other
            )),
        }
    }
}

impl fmt::Display for NormalizationForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::NFC => "nfc",
            Self::NFD => "nfd",
            Self::NFKC => "nfkc",
            Self::NFKD => "nfkd",
        };
        f.write_str(name)
    }
}

/// Unicode normalizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer {
    form: NormalizationForm,
}

impl Normalizer {
    pub fn new(form: NormalizationForm) -> Self {
        Self { form }
    }

    pub fn form(&self) -> NormalizationForm {
        self.form
    }

    /// Normalize text, borrowing it unchanged when normalization is off.
    pub fn normalize<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match self.form {
            NormalizationForm::None => Cow::Borrowed(text),
            NormalizationForm::NFC => Cow::Owned(text.nfc().collect()),
            NormalizationForm::NFD => Cow::Owned(text.nfd().collect()),
            NormalizationForm::NFKC => Cow::Owned(text.nfkc().collect()),
            NormalizationForm::NFKD => Cow::Owned(text.nfkd().collect()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.form != NormalizationForm::None
    }
}
