//! TF-IDF vectorization over a fixed document set.
//!
//! Vectors are sparse, L2-normalized, and share one vocabulary fitted once at
//! build time, so cosine similarity reduces to a dot product.

use std::collections::{BTreeMap, HashMap, HashSet};

/// Common English words dropped in content mode
const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst", "amoungst",
    "amount", "an", "and", "another", "any", "anyhow", "anyone", "anything", "anyway", "anywhere",
    "are", "around", "as", "at", "back", "be", "became", "because", "become", "becomes", "becoming",
    "been", "before", "beforehand", "behind", "being", "below", "beside", "besides", "between",
    "beyond", "bill", "both", "bottom", "but", "by", "call", "can", "cannot", "cant", "co", "con",
    "could", "couldnt", "cry", "de", "describe", "detail", "do", "done", "down", "due", "during",
    "each", "eg", "eight", "either", "eleven", "else", "elsewhere", "empty", "enough", "etc",
    "even", "ever", "every", "everyone", "everything", "everywhere", "except", "few", "fifteen",
    "fifty", "fill", "find", "fire", "first", "five", "for", "former", "formerly", "forty", "found",
    "four", "from", "front", "full", "further", "get", "give", "go", "had", "has", "hasnt", "have",
    "he", "hence", "her", "here", "hereafter", "hereby", "herein", "hereupon", "hers", "herself",
    "him", "himself", "his", "how", "however", "hundred", "i", "ie", "if", "in", "inc", "indeed",
    "interest", "into", "is", "it", "its", "itself", "keep", "last", "latter", "latterly", "least",
    "less", "ltd", "made", "many", "may", "me", "meanwhile", "might", "mill", "mine", "more",
    "moreover", "most", "mostly", "move", "much", "must", "my", "myself", "name", "namely",
    "neither", "never", "nevertheless", "next", "nine", "no", "nobody", "none", "noone", "nor",
    "not", "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto",
    "or", "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own", "part",
    "per", "perhaps", "please", "put", "rather", "re", "same", "see", "seem", "seemed", "seeming",
    "seems", "serious", "several", "she", "should", "show", "side", "since", "sincere", "six",
    "sixty", "so", "some", "somehow", "someone", "something", "sometime", "sometimes", "somewhere",
    "still", "such", "system", "take", "ten", "than", "that", "the", "their", "them", "themselves",
    "then", "thence", "there", "thereafter", "thereby", "therefore", "therein", "thereupon",
    "these", "they", "thick", "thin", "third", "this", "those", "though", "three", "through",
    "throughout", "thru", "thus", "to", "together", "too", "top", "toward", "towards", "twelve",
    "twenty", "two", "un", "under", "until", "up", "upon", "us", "very", "via", "was", "we", "well",
    "were", "what", "whatever", "when", "whence", "whenever", "where", "whereafter", "whereas",
    "whereby", "wherein", "whereupon", "wherever", "whether", "which", "while", "whither", "who",
    "whoever", "whole", "whom", "whose", "why", "will", "with", "within", "without", "would", "yet",
    "you", "your", "yours", "yourself", "yourselves",
];

/// Tokenization and vocabulary settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorizerOptions {
    /// Inclusive (min, max) n-gram lengths
    pub ngram_range: (usize, usize),
    pub stop_words: bool,
    /// Keep only the most frequent terms across the corpus
    pub max_features: Option<usize>,
}

impl VectorizerOptions {
    /// Unigrams and bigrams over normalized titles
    pub fn titles() -> Self {
        Self {
            ngram_range: (1, 2),
            stop_words: false,
            max_features: None,
        }
    }

    /// Unigrams over free text with English stop words removed
    pub fn content(max_features: usize) -> Self {
        Self {
            ngram_range: (1, 1),
            stop_words: true,
            max_features: Some(max_features),
        }
    }
}

impl Default for VectorizerOptions {
    fn default() -> Self {
        Self::titles()
    }
}

/// Sparse vector as `(term index, weight)` pairs sorted by index
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(u32, f32)>,
}

impl SparseVector {
    fn from_counts(counts: BTreeMap<u32, f32>) -> Self {
        let norm = counts.values().map(|w| w * w).sum::<f32>().sqrt();
        if norm == 0.0 {
            return Self::default();
        }
        Self {
            entries: counts.into_iter().map(|(i, w)| (i, w / norm)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[(u32, f32)] {
        &self.entries
    }

    /// Dot product of two sparse vectors
    pub fn dot(&self, other: &SparseVector) -> f32 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (a_idx, a_w) = self.entries[i];
            let (b_idx, b_w) = other.entries[j];
            match a_idx.cmp(&b_idx) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a_w * b_w;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    /// Cosine similarity; both sides are unit length or empty
    pub fn cosine(&self, other: &SparseVector) -> f32 {
        if self.is_empty() || other.is_empty() {
            return 0.0;
        }
        self.dot(other)
    }
}

/// Fitted vocabulary with smoothed inverse document frequencies
#[derive(Debug, Clone)]
pub struct Vectorizer {
    options: VectorizerOptions,
    vocabulary: HashMap<String, u32>,
    idf: Vec<f32>,
    stop_words: HashSet<&'static str>,
}

impl Vectorizer {
    /// Learns the vocabulary and IDF weights from `documents`
    pub fn fit<S: AsRef<str>>(documents: &[S], options: VectorizerOptions) -> Self {
        let stop_words = if options.stop_words {
            ENGLISH_STOP_WORDS.iter().copied().collect()
        } else {
            HashSet::new()
        };

        let mut document_frequency: BTreeMap<String, u32> = BTreeMap::new();
        let mut corpus_frequency: BTreeMap<String, u64> = BTreeMap::new();

        for doc in documents {
            let terms = analyze(doc.as_ref(), &options, &stop_words);
            let mut seen = HashSet::new();
            for term in terms {
                *corpus_frequency.entry(term.clone()).or_default() += 1;
                if seen.insert(term.clone()) {
                    *document_frequency.entry(term).or_default() += 1;
                }
            }
        }

        let mut kept: Vec<String> = match options.max_features {
            Some(limit) if limit < corpus_frequency.len() => {
                let mut ranked: Vec<(&String, &u64)> = corpus_frequency.iter().collect();
                ranked.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
                ranked.into_iter().take(limit).map(|(t, _)| t.clone()).collect()
            }
            _ => corpus_frequency.into_keys().collect(),
        };
        kept.sort();

        let n_docs = documents.len() as f32;
        let idf = kept
            .iter()
            .map(|term| {
                let df = document_frequency.get(term).copied().unwrap_or(0) as f32;
                ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        let vocabulary = kept
            .into_iter()
            .enumerate()
            .map(|(i, term)| (term, i as u32))
            .collect();

        Self {
            options,
            vocabulary,
            idf,
            stop_words,
        }
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn term_index(&self, term: &str) -> Option<u32> {
        self.vocabulary.get(term).copied()
    }

    /// Maps a document into the fitted space; unknown terms are ignored
    pub fn transform(&self, document: &str) -> SparseVector {
        let mut counts: BTreeMap<u32, f32> = BTreeMap::new();
        for term in analyze(document, &self.options, &self.stop_words) {
            if let Some(&index) = self.vocabulary.get(&term) {
                *counts.entry(index).or_default() += 1.0;
            }
        }
        for (index, weight) in counts.iter_mut() {
            *weight *= self.idf[*index as usize];
        }
        SparseVector::from_counts(counts)
    }
}

/// Lowercased word tokens of two or more characters
fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| token.chars().count() >= 2)
        .map(str::to_lowercase)
}

fn analyze(text: &str, options: &VectorizerOptions, stop_words: &HashSet<&'static str>) -> Vec<String> {
    let tokens: Vec<String> = tokenize(text)
        .filter(|token| !stop_words.contains(token.as_str()))
        .collect();

    let (min_n, max_n) = options.ngram_range;
    let mut terms = Vec::new();
    for n in min_n.max(1)..=max_n {
        if n > tokens.len() {
            break;
        }
        terms.extend(tokens.windows(n).map(|window| window.join(" ")));
    }
    terms
}

/// One unit vector per document, aligned by position with the input order
#[derive(Debug, Clone)]
pub struct VectorIndex {
    vectorizer: Vectorizer,
    rows: Vec<SparseVector>,
}

impl VectorIndex {
    pub fn build<S: AsRef<str>>(documents: &[S], options: VectorizerOptions) -> Self {
        let vectorizer = Vectorizer::fit(documents, options);
        let rows = documents
            .iter()
            .map(|doc| vectorizer.transform(doc.as_ref()))
            .collect();

        Self { vectorizer, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn vectorizer(&self) -> &Vectorizer {
        &self.vectorizer
    }

    pub fn row(&self, position: usize) -> Option<&SparseVector> {
        self.rows.get(position)
    }

    pub fn transform(&self, query: &str) -> SparseVector {
        self.vectorizer.transform(query)
    }

    /// Cosine similarity of `query` against every row, in row order
    pub fn similarities(&self, query: &SparseVector) -> Vec<f32> {
        self.rows.iter().map(|row| query.cosine(row)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unigrams() -> VectorizerOptions {
        VectorizerOptions {
            ngram_range: (1, 1),
            stop_words: false,
            max_features: None,
        }
    }

    #[test]
    fn test_tokenize_lowercases_and_drops_single_chars() {
        let tokens: Vec<String> = tokenize("A Clockwork Orange, 1971!").collect();
        assert_eq!(tokens, vec!["clockwork", "orange", "1971"]);
    }

    #[test]
    fn test_bigrams() {
        let terms = analyze("dark knight rises", &VectorizerOptions::titles(), &HashSet::new());
        assert_eq!(
            terms,
            vec!["dark", "knight", "rises", "dark knight", "knight rises"]
        );
    }

    #[test]
    fn test_stop_words_removed_before_ngrams() {
        let stop_words: HashSet<&'static str> = ENGLISH_STOP_WORDS.iter().copied().collect();
        let options = VectorizerOptions {
            ngram_range: (1, 2),
            stop_words: true,
            max_features: None,
        };
        let terms = analyze("the lord of the rings", &options, &stop_words);
        assert_eq!(terms, vec!["lord", "rings", "lord rings"]);
    }

    #[test]
    fn test_content_vocabulary_drops_number_and_verb_stop_words() {
        let vectorizer = Vectorizer::fit(
            &["the first two men find a way to get home", "see the show"],
            VectorizerOptions::content(5000),
        );

        for word in ["first", "two", "find", "get", "see", "show"] {
            assert_eq!(vectorizer.term_index(word), None, "{} should be a stop word", word);
        }
        assert!(vectorizer.term_index("men").is_some());
        assert!(vectorizer.term_index("home").is_some());
        assert_eq!(ENGLISH_STOP_WORDS.len(), 318);
    }

    #[test]
    fn test_vocabulary_is_sorted() {
        let vectorizer = Vectorizer::fit(&["dark knight", "dark city"], unigrams());
        assert_eq!(vectorizer.vocabulary_len(), 3);
        assert_eq!(vectorizer.term_index("city"), Some(0));
        assert_eq!(vectorizer.term_index("dark"), Some(1));
        assert_eq!(vectorizer.term_index("knight"), Some(2));
    }

    #[test]
    fn test_rare_terms_weigh_more() {
        let vectorizer = Vectorizer::fit(&["dark knight", "dark city"], unigrams());
        let vector = vectorizer.transform("dark knight");

        let weights: HashMap<u32, f32> = vector.entries().iter().copied().collect();
        let dark = weights[&1];
        let knight = weights[&2];
        assert!(knight > dark);

        // idf(dark) = 1, idf(knight) = ln(3/2) + 1
        let expected_ratio = (1.5f32).ln() + 1.0;
        assert!((knight / dark - expected_ratio).abs() < 1e-5);
    }

    #[test]
    fn test_vectors_are_unit_length() {
        let index = VectorIndex::build(&["alien", "aliens", "alien covenant"], unigrams());
        for position in 0..index.len() {
            let row = index.row(position).unwrap();
            let norm: f32 = row.entries().iter().map(|(_, w)| w * w).sum();
            assert!((norm - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_out_of_vocabulary_terms_ignored() {
        let vectorizer = Vectorizer::fit(&["heat", "ronin"], unigrams());
        assert!(vectorizer.transform("casino").is_empty());

        let vector = vectorizer.transform("heat casino");
        assert_eq!(vector.len(), 1);
    }

    #[test]
    fn test_max_features_keeps_most_frequent() {
        let options = VectorizerOptions {
            ngram_range: (1, 1),
            stop_words: false,
            max_features: Some(2),
        };
        let vectorizer = Vectorizer::fit(&["space war", "space wars", "space war ship"], options);
        assert_eq!(vectorizer.vocabulary_len(), 2);
        assert!(vectorizer.term_index("space").is_some());
        assert!(vectorizer.term_index("war").is_some());
        assert!(vectorizer.term_index("ship").is_none());
    }

    #[test]
    fn test_identical_documents_have_cosine_one() {
        let index = VectorIndex::build(&["Inception", "TheMatrix"], VectorizerOptions::titles());
        let query = index.transform("Inception");
        let scores = index.similarities(&query);
        assert!((scores[0] - 1.0).abs() < 1e-5);
        assert_eq!(scores[1], 0.0);
    }

    #[test]
    fn test_empty_vocabulary_yields_zero_scores() {
        let index = VectorIndex::build(&["a", "b"], VectorizerOptions::titles());
        assert_eq!(index.len(), 2);
        assert_eq!(index.vectorizer().vocabulary_len(), 0);
        let scores = index.similarities(&index.transform("a"));
        assert_eq!(scores, vec![0.0, 0.0]);
    }

    #[test]
    fn test_dot_on_disjoint_vectors() {
        let a = SparseVector { entries: vec![(0, 1.0)] };
        let b = SparseVector { entries: vec![(1, 1.0)] };
        assert_eq!(a.dot(&b), 0.0);
    }
}
