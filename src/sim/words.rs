//! Target words
//!
//! A word has a display form (what the HUD shows, accents and all) and a
//! playable form (A-Z only, what tiles are matched against). Words are served
//! from a shuffled queue that presents every word once before any repeats.

use rand::seq::SliceRandom;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::MAX_WORD_LEN;

/// Used when neither the supplied list nor the language defaults yield a word
pub const PLACEHOLDER_WORD: &str = "SWEEP";

/// Fold one uppercase char to its A-Z spelling.
/// Returns `None` for anything that is not a letter of the supported languages.
fn fold_upper(c: char) -> Option<&'static str> {
    Some(match c {
        'A'..='Z' => return LETTERS.get((c as u8 - b'A') as usize).copied(),
        'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' | 'Ā' | 'Ą' => "A",
        'Æ' => "AE",
        'Ç' | 'Ć' | 'Č' => "C",
        'Ď' | 'Đ' | 'Ð' => "D",
        'È' | 'É' | 'Ê' | 'Ë' | 'Ē' | 'Ę' | 'Ě' => "E",
        'Ì' | 'Í' | 'Î' | 'Ï' | 'Ī' => "I",
        'Ł' => "L",
        'Ñ' | 'Ń' | 'Ň' => "N",
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' | 'Ø' | 'Ō' | 'Ő' => "O",
        'Œ' => "OE",
        'Ř' => "R",
        'Ś' | 'Š' | 'Ş' => "S",
        'ẞ' => "SS",
        'Ť' => "T",
        'Þ' => "TH",
        'Ù' | 'Ú' | 'Û' | 'Ü' | 'Ū' | 'Ů' | 'Ű' => "U",
        'Ý' | 'Ÿ' => "Y",
        'Ź' | 'Ż' | 'Ž' => "Z",
        _ => return None,
    })
}

const LETTERS: [&str; 26] = [
    "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", "P", "Q", "R",
    "S", "T", "U", "V", "W", "X", "Y", "Z",
];

/// Playable spelling of a single display char (may be 0, 1 or 2 letters)
fn fold_char(c: char) -> String {
    c.to_uppercase().filter_map(fold_upper).collect()
}

/// Uppercase for display. `ß` has no one-char uppercase in std, so it becomes
/// `ẞ` instead of `SS`.
fn display_upper(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            'ß' => out.push('ẞ'),
            _ => out.extend(c.to_uppercase()),
        }
    }
    out
}

/// Strip diacritics and split ligatures: `"É"` -> `"E"`, `"œ"` -> `"OE"`,
/// `"au"` -> `"AU"`. Non-letters are dropped.
pub fn normalize_glyph(glyph: &str) -> String {
    glyph.chars().map(fold_char).collect()
}

/// A glyph counts as a letter only if it normalizes to exactly one A-Z char
pub fn glyph_as_letter(glyph: &str) -> Option<char> {
    let normalized = normalize_glyph(glyph);
    let mut chars = normalized.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// A word in both of its forms
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    /// Original letters, uppercased
    pub display: String,
    /// A-Z only
    pub playable: String,
    /// For each playable letter: (display char index, whether the display char
    /// folds to exactly that one letter)
    spelling: Vec<(usize, bool)>,
}

impl Word {
    /// Derive both forms. `None` when the playable form is empty or too long.
    pub fn parse(raw: &str) -> Option<Self> {
        let display = display_upper(raw.trim());
        let mut playable = String::new();
        let mut spelling = Vec::new();
        for (idx, c) in display.chars().enumerate() {
            let folded = fold_char(c);
            let exact = folded.len() == 1;
            for letter in folded.chars() {
                playable.push(letter);
                spelling.push((idx, exact));
            }
        }
        if playable.is_empty() || playable.len() > MAX_WORD_LEN {
            return None;
        }
        Some(Self {
            display,
            playable,
            spelling,
        })
    }

    /// Number of playable letters
    pub fn len(&self) -> usize {
        self.playable.len()
    }

    pub fn is_empty(&self) -> bool {
        self.playable.is_empty()
    }

    /// Playable letter at `index`
    pub fn letter(&self, index: usize) -> Option<char> {
        self.playable.as_bytes().get(index).map(|&b| b as char)
    }

    /// Tile glyph to spawn for playable letter `index`: the accented display
    /// char when it folds to exactly that letter, otherwise the plain letter
    pub fn tile_glyph(&self, index: usize) -> Option<String> {
        let letter = self.letter(index)?;
        match self.spelling.get(index) {
            Some(&(display_idx, true)) => self
                .display
                .chars()
                .nth(display_idx)
                .map(|c| c.to_string()),
            _ => Some(letter.to_string()),
        }
    }

    /// Display chars fully covered once `collected` playable letters are in.
    /// A ligature only counts once both of its letters are collected.
    pub fn display_prefix_len(&self, collected: usize) -> usize {
        if collected == 0 {
            return 0;
        }
        if collected >= self.len() {
            return self.display.chars().count();
        }
        let (next_idx, _) = self.spelling[collected];
        next_idx
    }
}

/// The word currently being spelled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetWord {
    pub word: Word,
    /// Playable letters collected so far (only grows)
    pub collected: usize,
}

impl TargetWord {
    pub fn new(word: Word) -> Self {
        Self { word, collected: 0 }
    }

    /// Next letter to collect, `None` once complete
    pub fn needed(&self) -> Option<char> {
        self.word.letter(self.collected)
    }

    pub fn needed_glyph(&self) -> Option<String> {
        self.word.tile_glyph(self.collected)
    }

    /// Record a correct letter. Returns true if this completed the word.
    pub fn advance(&mut self) -> bool {
        if self.collected < self.word.len() {
            self.collected += 1;
        }
        self.is_complete()
    }

    pub fn is_complete(&self) -> bool {
        self.collected >= self.word.len()
    }
}

/// Validated word list with fallback to defaults
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordList {
    words: Vec<Word>,
}

impl WordList {
    /// Parse a raw list, dropping invalid words and duplicates. An empty result
    /// falls back to `fallback`, then to a single placeholder word.
    pub fn from_raw<S: AsRef<str>>(raw: &[S], fallback: Language) -> Self {
        let words = Self::parse_all(raw);
        if !words.is_empty() {
            return Self { words };
        }
        log::info!(
            "Word list yielded no playable words, using {} defaults",
            fallback.code()
        );
        Self::defaults(fallback)
    }

    /// Built-in list for a language
    pub fn defaults(language: Language) -> Self {
        let mut words = Self::parse_all(language.default_words());
        if words.is_empty() {
            words.extend(Word::parse(PLACEHOLDER_WORD));
        }
        Self { words }
    }

    fn parse_all<S: AsRef<str>>(raw: &[S]) -> Vec<Word> {
        let mut words: Vec<Word> = Vec::new();
        for w in raw {
            match Word::parse(w.as_ref()) {
                Some(word) if !words.iter().any(|x| x.display == word.display) => {
                    words.push(word)
                }
                Some(_) => {}
                None => log::debug!("Skipping unplayable word {:?}", w.as_ref()),
            }
        }
        words
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Shuffled no-repeat queue over a word list
#[derive(Debug, Clone)]
pub struct WordQueue {
    list: WordList,
    order: Vec<usize>,
    cursor: usize,
    last: Option<usize>,
}

impl WordQueue {
    pub fn new(list: WordList) -> Self {
        Self {
            list,
            order: Vec::new(),
            cursor: 0,
            last: None,
        }
    }

    /// Swap the underlying list. The shuffle restarts on the next draw.
    /// Returns false when `list` is the one already in use.
    pub fn set_list(&mut self, list: WordList) -> bool {
        if list == self.list {
            return false;
        }
        self.list = list;
        self.order.clear();
        self.cursor = 0;
        self.last = None;
        true
    }

    pub fn list(&self) -> &WordList {
        &self.list
    }

    /// Draw the next word, reshuffling when the cycle is exhausted
    pub fn next_word(&mut self, rng: &mut Pcg32) -> Word {
        if self.cursor >= self.order.len() {
            self.reshuffle(rng);
        }
        let idx = self.order[self.cursor];
        self.cursor += 1;
        self.last = Some(idx);
        self.list.words[idx].clone()
    }

    fn reshuffle(&mut self, rng: &mut Pcg32) {
        self.order = (0..self.list.len()).collect();
        self.order.shuffle(rng);
        // Don't let a new cycle open with the word that closed the last one
        if self.order.len() > 1 && self.order.first() == self.last.as_ref() {
            let end = self.order.len() - 1;
            self.order.swap(0, end);
        }
        self.cursor = 0;
    }
}

/// Languages with a built-in word list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    Fr,
    #[default]
    En,
    PtBr,
    Es,
    Pl,
    No,
    De,
}

impl Language {
    pub const ALL: [Language; 7] = [
        Language::Fr,
        Language::En,
        Language::PtBr,
        Language::Es,
        Language::Pl,
        Language::No,
        Language::De,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Language::Fr => "fr",
            Language::En => "en",
            Language::PtBr => "pt-BR",
            Language::Es => "es",
            Language::Pl => "pl",
            Language::No => "no",
            Language::De => "de",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|l| l.code().eq_ignore_ascii_case(code))
    }

    /// Native name of the language
    pub fn name(&self) -> &'static str {
        match self {
            Language::Fr => "Français",
            Language::En => "English",
            Language::PtBr => "Português (BR)",
            Language::Es => "Español",
            Language::Pl => "Polski",
            Language::No => "Norsk",
            Language::De => "Deutsch",
        }
    }

    pub fn default_words(&self) -> &'static [&'static str] {
        match self {
            Language::Fr => &[
                "RUE", "GARE", "CAFÉ", "MÉTRO", "VÉLO", "PONT", "PARC", "VILLE", "BALAI",
                "TROTTOIR", "ÉCOLE", "MARCHÉ", "CŒUR", "PLACE",
            ],
            Language::En => &[
                "BUS", "CAR", "TAXI", "ROAD", "PARK", "CITY", "STREET", "BRIDGE", "TRAIN", "SHOP",
                "LAMP", "BIKE", "TRUCK", "PLAZA", "METRO", "BROOM", "CORNER", "TOWER",
            ],
            Language::PtBr => &[
                "RUA", "ÔNIBUS", "PRAÇA", "PONTE", "CIDADE", "CARRO", "METRÔ", "CALÇADA",
                "ESTAÇÃO", "LOJA", "VASSOURA", "ESQUINA",
            ],
            Language::Es => &[
                "CALLE", "PLAZA", "PUENTE", "CIUDAD", "AUTOBÚS", "COCHE", "ESTACIÓN", "TIENDA",
                "ESCOBA", "MERCADO", "ESQUINA", "NIÑO",
            ],
            Language::Pl => &[
                "ULICA", "MIASTO", "MOST", "TRAMWAJ", "AUTOBUS", "PLAC", "SKLEP", "DWORZEC",
                "MIOTŁA", "ŁAWKA", "ŻÓŁW", "RYNEK",
            ],
            Language::No => &[
                "GATE", "BRO", "BUSS", "TORG", "BYEN", "SYKKEL", "BUTIKK", "KOST", "STASJON",
                "PARK", "BÅT", "GÅRD",
            ],
            Language::De => &[
                "STRAßE", "BAHNHOF", "PLATZ", "BRÜCKE", "STADT", "BESEN", "LADEN", "AUTO",
                "TURM", "GASSE", "ZUG", "MÜLL",
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_normalize_strips_diacritics() {
        assert_eq!(normalize_glyph("É"), "E");
        assert_eq!(normalize_glyph("ł"), "L");
        assert_eq!(normalize_glyph("Œ"), "OE");
        assert_eq!(normalize_glyph("ß"), "SS");
        assert_eq!(normalize_glyph("au"), "AU");
        assert_eq!(normalize_glyph("7"), "");
    }

    #[test]
    fn test_glyph_as_letter_rejects_digraphs() {
        assert_eq!(glyph_as_letter("Ç"), Some('C'));
        assert_eq!(glyph_as_letter("AU"), None);
        assert_eq!(glyph_as_letter("Æ"), None);
        assert_eq!(glyph_as_letter(""), None);
    }

    #[test]
    fn test_word_forms() {
        let word = Word::parse("café").unwrap();
        assert_eq!(word.display, "CAFÉ");
        assert_eq!(word.playable, "CAFE");
        assert_eq!(word.tile_glyph(3).as_deref(), Some("É"));
    }

    #[test]
    fn test_sharp_s_keeps_its_display_form() {
        let word = Word::parse("STRAßE").unwrap();
        assert_eq!(word.display, "STRAẞE");
        assert_eq!(word.playable, "STRASSE");
        // Both S tiles spawn plain; the display letter lights up once both are in
        assert_eq!(word.tile_glyph(4).as_deref(), Some("S"));
        assert_eq!(word.display_prefix_len(5), 4);
        assert_eq!(word.display_prefix_len(6), 5);
    }

    #[test]
    fn test_word_rejects_empty_and_long() {
        assert!(Word::parse("   ").is_none());
        assert!(Word::parse("123").is_none());
        assert!(Word::parse("ABCDEFGHIJKLM").is_none());
        assert!(Word::parse("ABCDEFGHIJKL").is_some());
    }

    #[test]
    fn test_ligature_prefix_and_tiles() {
        let word = Word::parse("CŒUR").unwrap();
        assert_eq!(word.playable, "COEUR");
        // Ligature letters spawn plain
        assert_eq!(word.tile_glyph(1).as_deref(), Some("O"));
        assert_eq!(word.tile_glyph(2).as_deref(), Some("E"));
        assert_eq!(word.display_prefix_len(1), 1);
        // Half a ligature doesn't light it up
        assert_eq!(word.display_prefix_len(2), 1);
        assert_eq!(word.display_prefix_len(3), 2);
        assert_eq!(word.display_prefix_len(5), 4);
    }

    #[test]
    fn test_target_word_advances_to_completion() {
        let mut target = TargetWord::new(Word::parse("BUS").unwrap());
        assert_eq!(target.needed(), Some('B'));
        assert!(!target.advance());
        assert!(!target.advance());
        assert!(target.advance());
        assert_eq!(target.needed(), None);
        // Never runs past the end
        target.advance();
        assert_eq!(target.collected, 3);
    }

    #[test]
    fn test_empty_list_falls_back_to_defaults() {
        let empty: Vec<String> = Vec::new();
        let list = WordList::from_raw(&empty, Language::En);
        assert_eq!(list, WordList::defaults(Language::En));
        assert!(!list.is_empty());
    }

    #[test]
    fn test_invalid_words_dropped() {
        let list = WordList::from_raw(&["bus", "", "42", "BUS", "tram"], Language::En);
        let displays: Vec<&str> = list.words().iter().map(|w| w.display.as_str()).collect();
        assert_eq!(displays, vec!["BUS", "TRAM"]);
    }

    #[test]
    fn test_every_language_default_list_is_fully_playable() {
        for lang in Language::ALL {
            let list = WordList::defaults(lang);
            assert_eq!(list.len(), lang.default_words().len(), "{}", lang.code());
            assert_eq!(Language::from_code(lang.code()), Some(lang));
        }
    }

    #[test]
    fn test_queue_no_repeat_within_cycle() {
        let list = WordList::defaults(Language::En);
        let n = list.len();
        let mut queue = WordQueue::new(list);
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..3 {
            let cycle: HashSet<String> =
                (0..n).map(|_| queue.next_word(&mut rng).display).collect();
            assert_eq!(cycle.len(), n);
        }
    }

    #[test]
    fn test_queue_no_back_to_back_across_cycles() {
        let list = WordList::from_raw(&["ONE", "TWO"], Language::En);
        let mut queue = WordQueue::new(list);
        let mut rng = Pcg32::seed_from_u64(1);
        let mut prev = queue.next_word(&mut rng);
        for _ in 0..20 {
            let next = queue.next_word(&mut rng);
            assert_ne!(prev, next);
            prev = next;
        }
    }

    #[test]
    fn test_queue_restarts_on_list_change() {
        let mut queue = WordQueue::new(WordList::from_raw(&["ONE", "TWO"], Language::En));
        let mut rng = Pcg32::seed_from_u64(3);
        queue.next_word(&mut rng);
        queue.set_list(WordList::from_raw(&["SOLO"], Language::En));
        assert_eq!(queue.next_word(&mut rng).display, "SOLO");
    }
}
