//! Table-driven Malayalam grapheme-to-IPA transcription.
//!
//! Output is one IPA string per phoneme. Rules:
//!
//! | Grapheme | Output |
//! |----------|--------|
//! | consonant | consonant + inherent `a`, unless a vowel sign or virama follows |
//! | vowel sign | replaces the inherent `a` of the preceding consonant |
//! | virama (്) | suppresses the inherent vowel; word-final it is the half-u `ɨ` |
//! | chillu (ൺ ൻ ർ ൽ ൾ ൿ) | bare consonant, no vowel |
//! | consonant + virama + ZWJ | same as the atomic chillu of that consonant |
//! | anusvara (ം) / visarga (ഃ) | `m` / `h` |
//! | Malayalam digits | ASCII digits |
//!
//! Other signs inside the Malayalam block (chandrabindu, avagraha, fraction
//! and date marks) and ZWJ/ZWNJ are silently dropped. Anything outside the
//! block is an error.

use super::{PhoneticTranscriber, TranscriberError};

// ---------------------------------------------------------------------------
// Unicode ranges
// ---------------------------------------------------------------------------

const MALAYALAM_START: char = '\u{0D00}';
const MALAYALAM_END: char = '\u{0D7F}';

const ZWNJ: char = '\u{200C}';
const ZWJ: char = '\u{200D}';

/// Atomic chillu, the consonant it is the vowel-less form of, and the
/// phoneme both encodings produce.
const CHILLUS: [(char, char, &str); 6] = [
    ('ൺ', 'ണ', "ɳ"),
    ('ൻ', 'ന', "n"),
    ('ർ', 'ര', "r"),
    ('ൽ', 'ല', "l"),
    ('ൾ', 'ള', "ɭ"),
    ('ൿ', 'ക', "k"),
];

fn chillu_of(base: char) -> Option<&'static str> {
    CHILLUS
        .iter()
        .find(|(_, consonant, _)| *consonant == base)
        .map(|&(_, _, phoneme)| phoneme)
}

const INHERENT_VOWEL: &str = "a";
const HALF_U: &str = "ɨ";

#[derive(Debug, Clone, Copy, PartialEq)]
enum Grapheme {
    Vowel(&'static str),
    Consonant(&'static str),
    VowelSign(&'static str),
    Virama,
    /// Chillus, anusvara, visarga and digits: emitted as-is, no vowel.
    Bare(&'static str),
    Joiner,
    Ignored,
}

fn classify(c: char) -> Result<Grapheme, TranscriberError> {
    use Grapheme::*;

    if let Some(&(_, _, phoneme)) = CHILLUS.iter().find(|(atomic, _, _)| *atomic == c) {
        return Ok(Bare(phoneme));
    }

    let grapheme = match c {
        // independent vowels
        'അ' => Vowel("a"),
        'ആ' => Vowel("aː"),
        'ഇ' => Vowel("i"),
        'ഈ' => Vowel("iː"),
        'ഉ' => Vowel("u"),
        'ഊ' => Vowel("uː"),
        'ഋ' => Vowel("rɨ"),
        'ൠ' => Vowel("rɨː"),
        'ഌ' => Vowel("lɨ"),
        'ൡ' => Vowel("lɨː"),
        'എ' => Vowel("e"),
        'ഏ' => Vowel("eː"),
        'ഐ' => Vowel("ai̯"),
        'ഒ' => Vowel("o"),
        'ഓ' => Vowel("oː"),
        'ഔ' => Vowel("au̯"),

        // consonants
        'ക' => Consonant("k"),
        'ഖ' => Consonant("kʰ"),
        'ഗ' => Consonant("g"),
        'ഘ' => Consonant("gʱ"),
        'ങ' => Consonant("ŋ"),
        'ച' => Consonant("t͡ʃ"),
        'ഛ' => Consonant("t͡ʃʰ"),
        'ജ' => Consonant("d͡ʒ"),
        'ഝ' => Consonant("d͡ʒʱ"),
        'ഞ' => Consonant("ɲ"),
        'ട' => Consonant("ʈ"),
        'ഠ' => Consonant("ʈʰ"),
        'ഡ' => Consonant("ɖ"),
        'ഢ' => Consonant("ɖʱ"),
        'ണ' => Consonant("ɳ"),
        'ത' => Consonant("t̪"),
        'ഥ' => Consonant("t̪ʰ"),
        'ദ' => Consonant("d̪"),
        'ധ' => Consonant("d̪ʱ"),
        'ന' => Consonant("n̪"),
        'ഩ' => Consonant("n"),
        'പ' => Consonant("p"),
        'ഫ' => Consonant("pʰ"),
        'ബ' => Consonant("b"),
        'ഭ' => Consonant("bʱ"),
        'മ' => Consonant("m"),
        'യ' => Consonant("j"),
        'ര' => Consonant("ɾ"),
        'റ' => Consonant("r"),
        'ല' => Consonant("l"),
        'ള' => Consonant("ɭ"),
        'ഴ' => Consonant("ɻ"),
        'വ' => Consonant("ʋ"),
        'ശ' => Consonant("ʃ"),
        'ഷ' => Consonant("ʂ"),
        'സ' => Consonant("s"),
        'ഹ' => Consonant("h"),
        'ഺ' => Consonant("t"),

        // dependent vowel signs
        'ാ' => VowelSign("aː"),
        'ി' => VowelSign("i"),
        'ീ' => VowelSign("iː"),
        'ു' => VowelSign("u"),
        'ൂ' => VowelSign("uː"),
        'ൃ' => VowelSign("rɨ"),
        'ൄ' => VowelSign("rɨː"),
        'െ' => VowelSign("e"),
        'േ' => VowelSign("eː"),
        'ൈ' => VowelSign("ai̯"),
        'ൊ' => VowelSign("o"),
        'ോ' => VowelSign("oː"),
        'ൌ' | 'ൗ' => VowelSign("au̯"),

        '്' => Virama,

        'ം' => Bare("m"),
        'ഃ' => Bare("h"),

        '൦' => Bare("0"),
        '൧' => Bare("1"),
        '൨' => Bare("2"),
        '൩' => Bare("3"),
        '൪' => Bare("4"),
        '൫' => Bare("5"),
        '൬' => Bare("6"),
        '൭' => Bare("7"),
        '൮' => Bare("8"),
        '൯' => Bare("9"),

        ZWJ => Joiner,
        ZWNJ => Ignored,
        MALAYALAM_START..=MALAYALAM_END => Ignored,

        other => return Err(TranscriberError::UnsupportedCharacter(other)),
    };
    Ok(grapheme)
}

// ---------------------------------------------------------------------------
// MalayalamTranscriber
// ---------------------------------------------------------------------------

/// Stateless Malayalam grapheme-to-phoneme converter.
#[derive(Debug, Clone, Copy, Default)]
pub struct MalayalamTranscriber;

impl MalayalamTranscriber {
    pub fn new() -> Self {
        Self
    }
}

impl PhoneticTranscriber for MalayalamTranscriber {
    fn transcribe(&self, word: &str) -> Result<Vec<String>, TranscriberError> {
        if word.is_empty() {
            return Err(TranscriberError::EmptyWord);
        }

        let mut phonemes: Vec<&'static str> = Vec::with_capacity(word.len());
        // A consonant has been emitted and still owes its vowel.
        let mut awaiting_vowel = false;
        // The last significant grapheme was a virama after a consonant.
        let mut trailing_virama = false;
        // Consonant whose phoneme is last in `phonemes`.
        let mut last_consonant: Option<char> = None;

        for c in word.chars() {
            let grapheme = classify(c)?;
            match grapheme {
                Grapheme::Consonant(p) => {
                    if awaiting_vowel {
                        phonemes.push(INHERENT_VOWEL);
                    }
                    phonemes.push(p);
                    awaiting_vowel = true;
                    trailing_virama = false;
                    last_consonant = Some(c);
                }
                Grapheme::VowelSign(v) => {
                    phonemes.push(v);
                    awaiting_vowel = false;
                    trailing_virama = false;
                }
                Grapheme::Virama => {
                    trailing_virama = awaiting_vowel;
                    awaiting_vowel = false;
                }
                Grapheme::Vowel(p) | Grapheme::Bare(p) => {
                    if awaiting_vowel {
                        phonemes.push(INHERENT_VOWEL);
                    }
                    phonemes.push(p);
                    awaiting_vowel = false;
                    trailing_virama = false;
                }
                Grapheme::Joiner => {
                    if trailing_virama {
                        if let Some(chillu) = last_consonant.and_then(chillu_of) {
                            if let Some(last) = phonemes.last_mut() {
                                *last = chillu;
                            }
                        }
                    }
                    trailing_virama = false;
                }
                Grapheme::Ignored => {}
            }
            if !matches!(
                grapheme,
                Grapheme::Consonant(_) | Grapheme::Virama | Grapheme::Ignored
            ) {
                last_consonant = None;
            }
        }

        if awaiting_vowel {
            phonemes.push(INHERENT_VOWEL);
        }
        if trailing_virama {
            phonemes.push(HALF_U);
        }

        Ok(phonemes.into_iter().map(str::to_owned).collect())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
