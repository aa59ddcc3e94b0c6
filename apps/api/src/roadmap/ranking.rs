//! Re-ranks live search results by how well their titles fit the learner.
//!
//! Score = 0.7 * relevance + 0.3 * popularity, where relevance is the TF-IDF
//! cosine similarity between a title and `"{skill} {level} tutorial course"`.
//! Sorting is stable, so equal scores keep the provider's order.

use std::collections::{HashMap, HashSet};

use crate::assessment::level::ProficiencyLevel;
use crate::roadmap::resources::Resource;

const RELEVANCE_WEIGHT: f64 = 0.7;
const POPULARITY_WEIGHT: f64 = 0.3;

/// Popularity prior for video results.
pub const VIDEO_POPULARITY: f64 = 0.9;
/// Popularity prior for website results.
pub const WEBSITE_POPULARITY: f64 = 0.8;

/// English stop words, the same list scikit-learn's `TfidfVectorizer` uses.
const STOP_WORDS: &[&str] = &[
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

/// Lowercased words of two or more alphanumeric characters, minus stop words.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() >= 2 && !STOP_WORDS.contains(t))
        .map(str::to_string)
        .collect()
}

/// L2-normalized TF-IDF vectors with smoothed idf: `ln((1 + n) / (1 + df)) + 1`.
fn tfidf_vectors(documents: &[Vec<String>]) -> Vec<HashMap<&str, f64>> {
    let n = documents.len() as f64;
    let mut df: HashMap<&str, f64> = HashMap::new();
    for doc in documents {
        let unique: HashSet<&str> = doc.iter().map(String::as_str).collect();
        for term in unique {
            *df.entry(term).or_default() += 1.0;
        }
    }

    documents
        .iter()
        .map(|doc| {
            let mut weights: HashMap<&str, f64> = HashMap::new();
            for term in doc {
                *weights.entry(term.as_str()).or_default() += 1.0;
            }
            for (term, weight) in weights.iter_mut() {
                let idf = ((1.0 + n) / (1.0 + df[term])).ln() + 1.0;
                *weight *= idf;
            }
            let norm = weights.values().map(|w| w * w).sum::<f64>().sqrt();
            if norm > 0.0 {
                weights.values_mut().for_each(|w| *w /= norm);
            }
            weights
        })
        .collect()
}

fn cosine(a: &HashMap<&str, f64>, b: &HashMap<&str, f64>) -> f64 {
    a.iter()
        .filter_map(|(term, wa)| b.get(term).map(|wb| wa * wb))
        .sum()
}

/// Relevance of each title to the skill/level query, in input order.
pub fn relevance_scores(titles: &[&str], skill: &str, level: ProficiencyLevel) -> Vec<f64> {
    if titles.is_empty() {
        return Vec::new();
    }

    let query = format!("{skill} {level} tutorial course");
    let mut documents: Vec<Vec<String>> = titles.iter().map(|t| tokenize(t)).collect();
    documents.push(tokenize(&query));

    let vectors = tfidf_vectors(&documents);
    let Some((query_vec, title_vecs)) = vectors.split_last() else {
        return Vec::new();
    };
    title_vecs.iter().map(|v| cosine(query_vec, v)).collect()
}

/// Sorts `resources` best first.
pub fn rank_resources(
    resources: Vec<Resource>,
    skill: &str,
    level: ProficiencyLevel,
    popularity: f64,
) -> Vec<Resource> {
    let titles: Vec<&str> = resources.iter().map(|r| r.title.as_str()).collect();
    let relevance = relevance_scores(&titles, skill, level);

    let mut scored: Vec<(f64, Resource)> = relevance
        .into_iter()
        .map(|r| RELEVANCE_WEIGHT * r + POPULARITY_WEIGHT * popularity)
        .zip(resources)
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored.into_iter().map(|(_, resource)| resource).collect()
}
