use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::text::TermSet;

const CONNECTIVES: &[&str] = &[
    "além disso",
    "contudo",
    "portanto",
    "assim",
    "dessa forma",
    "desse modo",
    "no entanto",
    "todavia",
    "entretanto",
    "logo",
    "porém",
    "por conseguinte",
    "em suma",
    "por fim",
    "primeiramente",
    "em primeiro lugar",
    "em segundo lugar",
    "por outro lado",
    "ou seja",
    "nesse sentido",
    "nesse contexto",
    "diante disso",
    "dessa maneira",
    "além do mais",
];

const THESIS_MARKERS: &[&str] = &[
    "defende-se",
    "sustenta-se",
    "argumenta-se",
    "este texto",
    "neste texto",
    "é necessário",
    "é preciso",
    "portanto",
    "logo",
    "propõe-se",
    "propomos",
    "defendo",
    "sustento",
    "sou de opinião",
];

const EXAMPLE_MARKERS: &[&str] = &[
    "por exemplo",
    "como exemplo",
    "segundo",
    "de acordo com",
    "dados",
    "pesquisa",
    "ibge",
    "onu",
    "unesco",
    "fundo monetário",
    "banco mundial",
    "constituição",
    "lei",
    "estatuto",
    "artigo",
    "em 20",
    "em 19",
];

const ORTHOGRAPHY_PAIRS: &[(&str, &str)] = &[
    ("á", "à"),
    ("a internet", "à internet"),
    ("a educação", "à educação"),
    ("a inclusão", "à inclusão"),
    ("a medida que", "à medida que"),
    ("seculo", "século"),
    ("possivel", "possível"),
    ("economica", "econômica"),
    ("ultimos", "últimos"),
    ("voce", "você"),
];

const FILLER_WORDS: &[&str] = &["coisa", "negócio", "legal", "tipo", "muito", "bem", "aí"];

const POINT_OF_VIEW_MARKERS: &[&str] = &[
    "defendo",
    "sustento",
    "ponto de vista",
    "tese",
    "na minha opinião",
    "entendo que",
];

const FIRST_PERSON_MARKERS: &[&str] = &[
    "eu",
    "acredito",
    "penso",
    "defendo",
    "entendo",
    "proponho",
    "creio",
    "considero",
    "na minha opinião",
    "ao meu ver",
];

const STOPWORDS: &[&str] = &[
    "de", "da", "do", "a", "o", "e", "que", "em", "um", "uma", "para", "as", "os",
];

/// A common misspelling and its correct form.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct OrthographyPair {
    pub wrong: String,
    pub right: String,
}

/// Reference word lists consulted by the criteria.
///
/// All entries are lowercase and matched as whole words or phrases against
/// the lowercased essay. Any list left out of a config file keeps its
/// built-in Portuguese default.
///
/// Example YAML:
/// ```yaml
/// lexicon:
///   filler_words: ["coisa", "negócio"]
///   orthography:
///     - { wrong: "seculo", right: "século" }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Lexicon {
    /// Discourse connectives ("portanto", "no entanto", ...)
    pub connectives: Vec<String>,
    /// Phrases that state an explicit argumentative stance
    pub thesis_markers: Vec<String>,
    /// Phrases and sources that signal repertoire or evidence
    pub example_markers: Vec<String>,
    /// Misspellings penalised by the orthography criterion
    pub orthography: Vec<OrthographyPair>,
    /// Vague words penalised by the vocabulary criterion
    pub filler_words: Vec<String>,
    /// Phrases announcing a point of view
    pub point_of_view_markers: Vec<String>,
    /// First-person stance words
    pub first_person_markers: Vec<String>,
    /// Words ignored when looking for the most repeated content word
    pub stopwords: Vec<String>,
}

fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            connectives: owned(CONNECTIVES),
            thesis_markers: owned(THESIS_MARKERS),
            example_markers: owned(EXAMPLE_MARKERS),
            orthography: ORTHOGRAPHY_PAIRS
                .iter()
                .map(|(wrong, right)| OrthographyPair {
                    wrong: wrong.to_string(),
                    right: right.to_string(),
                })
                .collect(),
            filler_words: owned(FILLER_WORDS),
            point_of_view_markers: owned(POINT_OF_VIEW_MARKERS),
            first_person_markers: owned(FIRST_PERSON_MARKERS),
            stopwords: owned(STOPWORDS),
        }
    }
}

impl Lexicon {
    /// Compile every matched list into whole-word patterns.
    ///
    /// Orthography entries are lowercased before compiling, since they are
    /// matched against the lowercased essay.
    pub fn compile(&self) -> CompiledLexicon {
        let misspellings: Vec<String> = self
            .orthography
            .iter()
            .map(|p| p.wrong.to_lowercase())
            .collect();

        CompiledLexicon {
            connectives: TermSet::compile(&self.connectives),
            thesis_markers: TermSet::compile(&self.thesis_markers),
            example_markers: TermSet::compile(&self.example_markers),
            misspellings: TermSet::compile(&misspellings),
            point_of_view_markers: TermSet::compile(&self.point_of_view_markers),
            first_person_markers: TermSet::compile(&self.first_person_markers),
            filler_words: self.filler_words.clone(),
            stopwords: self.stopwords.iter().cloned().collect(),
        }
    }
}

/// A [`Lexicon`] ready for matching, built once per rubric.
///
/// Phrase lists hold compiled patterns. Fillers and stopwords are compared
/// against tokens, so they stay plain strings.
#[derive(Debug, Clone)]
pub struct CompiledLexicon {
    pub connectives: TermSet,
    pub thesis_markers: TermSet,
    pub example_markers: TermSet,
    /// The `wrong` side of each orthography pair
    pub misspellings: TermSet,
    pub point_of_view_markers: TermSet,
    pub first_person_markers: TermSet,
    pub filler_words: Vec<String>,
    stopwords: HashSet<String>,
}

impl CompiledLexicon {
    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(token)
    }
}
